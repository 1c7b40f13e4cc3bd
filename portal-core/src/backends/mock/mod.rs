use crate::Result;
use crate::structs::ScanEntry;
use crate::traits::ScanBackend;
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

/// 模拟扫描的状态
#[derive(Debug)]
enum ScanState {
    /// 还没有开始扫描
    Idle,
    /// 扫描进行中
    Running { started: Instant },
}

/// A mock backend standing in for the device firmware.
///
/// The device scans asynchronously: the first `/scan` request only starts a
/// scan and gets `[]`, requests during the scan get `[]` too, and the first
/// request after the scan completed gets the results. Handing results out
/// discards them and starts the next scan right away.
#[derive(Debug)]
pub struct MockBackend {
    networks: Vec<ScanEntry>,
    scan_duration: Duration,
    state: Mutex<ScanState>,
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new(default_networks(), Duration::from_secs(2))
    }
}

impl MockBackend {
    pub fn new(networks: Vec<ScanEntry>, scan_duration: Duration) -> Self {
        Self {
            networks,
            scan_duration,
            state: Mutex::new(ScanState::Idle),
        }
    }
}

#[async_trait]
impl ScanBackend for MockBackend {
    async fn scan(&self) -> Result<Vec<ScanEntry>> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let now = Instant::now();
        match *state {
            ScanState::Idle => {
                println!("🤖 [MockBackend] Starting scan...");
                *state = ScanState::Running { started: now };
                Ok(Vec::new())
            }
            ScanState::Running { started } if now.duration_since(started) < self.scan_duration => {
                tracing::debug!("[MockBackend] Scan still running");
                Ok(Vec::new())
            }
            ScanState::Running { .. } => {
                // 返回结果后立即开始下一轮扫描
                *state = ScanState::Running { started: now };
                println!("🤖 [MockBackend] Found {} networks.", self.networks.len());
                Ok(self.networks.clone())
            }
        }
    }
}

/// Fixed list of fake networks, deliberately not sorted.
pub fn default_networks() -> Vec<ScanEntry> {
    let mut networks = vec![
        ScanEntry::new("CafeGuest", -67),
        ScanEntry::new("MyHomeWiFi", -42),
        ScanEntry::new("Neighbor's Network", -81),
        ScanEntry::new("xfinitywifi", -58),
        ScanEntry::new("HiddenNetwork", -93),
    ];
    for (i, network) in networks.iter_mut().enumerate() {
        network.bssid = Some(format!("02:00:00:00:00:{:02X}", i + 1));
        network.channel = Some([1, 6, 11][i % 3]);
        network.secure = Some(if network.ssid == "CafeGuest" { 0 } else { 3 });
    }
    networks
}
