use crate::structs::ScanEntry;
use crate::{Error, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// 编译进二进制的默认配置
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../configs.toml");

/// 顶层应用配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub portal: PortalConfig,
    pub server: ServerConfig,
}

/// 用于解析 TOML 的临时结构
#[derive(Deserialize)]
struct AppConfigFile {
    /// [portal] 表
    portal: PortalConfigToml,
    /// [server] 表（可选）
    #[serde(default)]
    server: Option<ServerConfigToml>,
}

// ============= 页面控制器配置 =============

/// Settings of the page controller and its `/scan` client.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub base_url: String,
    pub scan_path: String,
    pub retry_on_empty: bool,
    pub retry_delay: Duration,
    pub focus_delay: Duration,
    pub request_timeout: Duration,
}

#[derive(Deserialize)]
struct PortalConfigToml {
    base_url: String,
    #[serde(default = "default_scan_path")]
    scan_path: String,
    #[serde(default = "default_true")]
    retry_on_empty: bool,
    #[serde(default)]
    retry_delay_ms: u64,
    #[serde(default = "default_focus_delay_ms")]
    focus_delay_ms: u64,
    #[serde(default = "default_request_timeout_ms")]
    request_timeout_ms: u64,
}

fn default_scan_path() -> String {
    "/scan".to_string()
}

fn default_true() -> bool {
    true
}

fn default_focus_delay_ms() -> u64 {
    100
}

fn default_request_timeout_ms() -> u64 {
    5000
}

impl TryFrom<PortalConfigToml> for PortalConfig {
    type Error = Error;

    fn try_from(t: PortalConfigToml) -> Result<Self> {
        if !t.scan_path.starts_with('/') {
            return Err(Error::Config(format!(
                "scan_path must start with '/': {}",
                t.scan_path
            )));
        }
        Ok(PortalConfig {
            base_url: t.base_url,
            scan_path: t.scan_path,
            retry_on_empty: t.retry_on_empty,
            retry_delay: Duration::from_millis(t.retry_delay_ms),
            focus_delay: Duration::from_millis(t.focus_delay_ms),
            request_timeout: Duration::from_millis(t.request_timeout_ms),
        })
    }
}

// ============= 开发服务器配置 =============

/// Settings of the development server that stands in for the device.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// 模拟一次扫描所需的时间
    pub scan_duration: Duration,
    /// 设置后从磁盘读取 UI（调试用），否则使用嵌入的资源
    pub ui_dir: Option<PathBuf>,
    /// 覆盖模拟后端返回的网络列表
    pub networks: Option<Vec<ScanEntry>>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            scan_duration: Duration::from_millis(2000),
            ui_dir: None,
            networks: None,
        }
    }
}

#[derive(Deserialize)]
struct ServerConfigToml {
    bind_addr: String,
    #[serde(default)]
    scan_duration_ms: Option<u64>,
    #[serde(default)]
    ui_dir: Option<PathBuf>,
    #[serde(default)]
    networks: Option<Vec<ScanEntry>>,
}

impl TryFrom<ServerConfigToml> for ServerConfig {
    type Error = Error;

    fn try_from(t: ServerConfigToml) -> Result<Self> {
        let bind_addr = SocketAddr::from_str(&t.bind_addr)
            .map_err(|e| Error::Config(format!("invalid bind_addr '{}': {}", t.bind_addr, e)))?;
        let defaults = ServerConfig::default();
        Ok(ServerConfig {
            bind_addr,
            scan_duration: t
                .scan_duration_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.scan_duration),
            ui_dir: t.ui_dir,
            networks: t.networks,
        })
    }
}

// ============= 配置加载函数 =============

/// 从 TOML 字符串加载应用配置
pub fn load_config_from_toml_str(s: &str) -> Result<AppConfig> {
    let parsed: AppConfigFile = toml::from_str(s)?;

    Ok(AppConfig {
        portal: PortalConfig::try_from(parsed.portal)?,
        server: match parsed.server {
            Some(server) => ServerConfig::try_from(server)?,
            None => ServerConfig::default(),
        },
    })
}

/// 从文件加载应用配置
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let data = std::fs::read_to_string(path)?;
    load_config_from_toml_str(&data)
}

/// 编译进来的默认配置
pub fn default_config() -> Result<AppConfig> {
    load_config_from_toml_str(DEFAULT_CONFIG_TOML)
}
