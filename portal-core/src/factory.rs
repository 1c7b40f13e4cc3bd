use crate::backends::mock::{MockBackend, default_networks};
use crate::config::ServerConfig;
use crate::traits::{ScanBackend, UiAssetProvider};
use std::sync::Arc;

/// Picks the UI provider: disk when `ui_dir` is configured, embedded otherwise.
pub fn create_frontend(config: &ServerConfig) -> Arc<dyn UiAssetProvider> {
    match &config.ui_dir {
        Some(dir) => {
            tracing::info!("💿 Frontend: Disk Provider selected ({})", dir.display());
            Arc::new(crate::frontends::provider_disk::DiskFrontend::new(dir.clone()))
        }
        None => {
            tracing::info!("📦 Frontend: Embed Provider selected");
            Arc::new(crate::frontends::provider_embed::EmbedFrontend::new())
        }
    }
}

pub fn create_backend(config: &ServerConfig) -> Arc<dyn ScanBackend> {
    let networks = config.networks.clone().unwrap_or_else(default_networks);
    Arc::new(MockBackend::new(networks, config.scan_duration))
}
