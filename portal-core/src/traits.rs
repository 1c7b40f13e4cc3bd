use crate::structs::ScanEntry;
use async_trait::async_trait;
use std::borrow::Cow;

// 在这里定义页面控制器和开发服务器用到的所有 trait。

/// Where the controller gets the list of networks from (normally `GET /scan`).
#[async_trait]
pub trait ScanSource: Send + Sync {
    /// Fetches the current scan list. Transport and decoding problems are errors;
    /// an empty list is a valid answer.
    async fn fetch_networks(&self) -> crate::Result<Vec<ScanEntry>>;
}

/// The parts of the configuration page the controller touches:
/// the `#networks` select and the `#password` input.
pub trait PortalDom: Send + Sync {
    fn set_selector_disabled(&self, disabled: bool);

    /// Sets the label of the placeholder option (the first option of `#networks`).
    fn set_selector_status(&self, label: &str);

    fn append_network_option(&self, value: &str, label: &str);

    fn focus_password(&self);
}

/// 阻塞式的用户提示框（浏览器里的 `alert`）。
pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

/// 前端资源提供者接口。
#[async_trait]
pub trait UiAssetProvider: Send + Sync {
    /// Retrieves a single UI asset.
    ///
    /// # Arguments
    /// * `path` - The path to the asset (e.g., "index.html", "style.css").
    ///
    /// # Returns
    /// A tuple of the asset's content and its MIME type, or
    /// `Error::AssetNotFound`.
    async fn get_asset(&self, path: &str) -> crate::Result<(Cow<'static, [u8]>, String)>;
}

/// What the development server answers `/scan` with.
#[async_trait]
pub trait ScanBackend: Send + Sync {
    async fn scan(&self) -> crate::Result<Vec<ScanEntry>>;
}
