use serde::{Deserialize, Serialize};

/// 扫描到的单个 Wi-Fi 网络，即 `/scan` 返回数组中的一项。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanEntry {
    pub ssid: String,
    pub rssi: i32, // dBm，通常在 -100 到 -30 之间

    // 设备固件额外上报的字段，旧固件可能不带
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<u8>,
}

impl ScanEntry {
    pub fn new(ssid: impl Into<String>, rssi: i32) -> Self {
        Self {
            ssid: ssid.into(),
            rssi,
            bssid: None,
            channel: None,
            secure: None,
        }
    }

    pub fn signal_percent(&self) -> u8 {
        rssi_to_percent(self.rssi)
    }

    /// Text shown for this network in the dropdown, e.g. `80% MyHomeWiFi`.
    pub fn option_label(&self) -> String {
        format!("{}% {}", self.signal_percent(), self.ssid)
    }
}

/// Maps an RSSI reading to a signal quality in percent:
/// `clamp((rssi + 100) * 2, 0, 100)`.
pub fn rssi_to_percent(rssi: i32) -> u8 {
    // 先钳位再计算，避免极端值溢出
    ((rssi.clamp(-100, -50) + 100) * 2) as u8
}

/// Sorts networks by descending signal strength. Equal readings keep their
/// order from the scan.
pub fn sort_by_signal(mut networks: Vec<ScanEntry>) -> Vec<ScanEntry> {
    networks.sort_by(|a, b| b.rssi.cmp(&a.rssi));
    networks
}
