//! `ScanSource` backed by the device's HTTP `/scan` endpoint.

use crate::config::PortalConfig;
use crate::structs::ScanEntry;
use crate::traits::ScanSource;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::time::Duration;

pub struct HttpScanSource {
    client: Client,
    url: Url,
}

impl HttpScanSource {
    /// Builds a client for `base_url` + `scan_path`.
    pub fn new(base_url: &str, scan_path: &str, timeout: Duration) -> Result<Self> {
        let url = Url::parse(base_url)
            .and_then(|base| base.join(scan_path))
            .map_err(|e| {
                Error::Config(format!("invalid scan url '{}{}': {}", base_url, scan_path, e))
            })?;

        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self { client, url })
    }

    pub fn from_config(config: &PortalConfig) -> Result<Self> {
        Self::new(&config.base_url, &config.scan_path, config.request_timeout)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl ScanSource for HttpScanSource {
    async fn fetch_networks(&self) -> Result<Vec<ScanEntry>> {
        tracing::debug!(url = %self.url, "Requesting scan list");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let networks: Vec<ScanEntry> = serde_json::from_slice(&body)?;
        tracing::debug!("Scan endpoint returned {} networks", networks.len());
        Ok(networks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_url_and_scan_path() {
        let source =
            HttpScanSource::new("http://192.168.4.1", "/scan", Duration::from_secs(1)).unwrap();
        assert_eq!(source.url().as_str(), "http://192.168.4.1/scan");
    }

    #[test]
    fn absolute_scan_path_replaces_base_path() {
        let source =
            HttpScanSource::new("http://10.0.0.1:8080/portal/", "/scan", Duration::from_secs(1))
                .unwrap();
        assert_eq!(source.url().as_str(), "http://10.0.0.1:8080/scan");
    }

    #[test]
    fn malformed_base_url_is_a_config_error() {
        let err = HttpScanSource::new("not a url", "/scan", Duration::from_secs(1))
            .err()
            .unwrap();
        assert!(matches!(err, Error::Config(_)));
    }
}
