//! Page controller for the network dropdown.
//!
//! On load the `#networks` select is disabled and shows a scanning status,
//! the scan list is fetched (retried once if the device answered with an
//! empty list) and rendered strongest-first. Choosing a network hands the
//! focus over to `#password` after a short delay.

use crate::config::PortalConfig;
use crate::structs::{ScanEntry, sort_by_signal};
use crate::traits::{Alerter, PortalDom, ScanSource};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::sleep;

pub const SCANNING_LABEL: &str = "Scanning WiFi...";
pub const NO_NETWORKS_LABEL: &str = "No networks discovered";
pub const DISCOVERED_LABEL: &str = "Discovered WiFi networks:";
pub const FETCH_ERROR_MESSAGE: &str = "Error while fetching the list of available WiFi networks";

#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// Ask a second time when the first answer is an empty list.
    pub retry_on_empty: bool,
    /// 重试前的等待时间（设备的异步扫描可能还没完成）
    pub retry_delay: Duration,
    /// Delay between a selection change and the password focus.
    pub focus_delay: Duration,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            retry_on_empty: true,
            retry_delay: Duration::ZERO,
            focus_delay: Duration::from_millis(100),
        }
    }
}

impl From<&PortalConfig> for ControllerOptions {
    fn from(config: &PortalConfig) -> Self {
        Self {
            retry_on_empty: config.retry_on_empty,
            retry_delay: config.retry_delay,
            focus_delay: config.focus_delay,
        }
    }
}

/// How a page load ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// The selector is enabled and holds this many networks.
    Listed(usize),
    /// Successful but empty scan; the selector stays disabled.
    NoNetworks,
    /// The scan list could not be fetched; the user was alerted.
    Failed,
}

pub struct PageController {
    source: Arc<dyn ScanSource>,
    dom: Arc<dyn PortalDom>,
    alerter: Arc<dyn Alerter>,
    options: ControllerOptions,
}

impl PageController {
    pub fn new(
        source: Arc<dyn ScanSource>,
        dom: Arc<dyn PortalDom>,
        alerter: Arc<dyn Alerter>,
        options: ControllerOptions,
    ) -> Self {
        Self {
            source,
            dom,
            alerter,
            options,
        }
    }

    /// Runs the page-load sequence once.
    pub async fn load(&self) -> ScanOutcome {
        self.dom.set_selector_disabled(true);
        self.dom.set_selector_status(SCANNING_LABEL);

        let networks = match self.fetch_with_retry().await {
            Ok(networks) => networks,
            Err(e) => {
                tracing::warn!("Failed to fetch scan list: {}", e);
                self.alerter.alert(FETCH_ERROR_MESSAGE);
                return ScanOutcome::Failed;
            }
        };

        if networks.is_empty() {
            tracing::info!("Scan finished without any network");
            self.dom.set_selector_status(NO_NETWORKS_LABEL);
            return ScanOutcome::NoNetworks;
        }

        let networks = sort_by_signal(networks);
        for network in &networks {
            self.dom
                .append_network_option(&network.ssid, &network.option_label());
        }
        self.dom.set_selector_disabled(false);
        self.dom.set_selector_status(DISCOVERED_LABEL);

        tracing::info!("Listed {} networks", networks.len());
        ScanOutcome::Listed(networks.len())
    }

    /// 只有在成功但为空的结果上才重试一次；传输错误直接返回。
    async fn fetch_with_retry(&self) -> crate::Result<Vec<ScanEntry>> {
        let networks = self.source.fetch_networks().await?;
        if !networks.is_empty() || !self.options.retry_on_empty {
            return Ok(networks);
        }

        tracing::debug!(
            delay_ms = self.options.retry_delay.as_millis() as u64,
            "Empty scan list, asking once more"
        );
        if !self.options.retry_delay.is_zero() {
            sleep(self.options.retry_delay).await;
        }
        self.source.fetch_networks().await
    }

    /// Handles one selection change: waits `focus_delay`, then focuses `#password`.
    pub async fn on_selection_change(&self) {
        sleep(self.options.focus_delay).await;
        self.dom.focus_password();
    }

    /// Wires the selection-change events of the page to the focus handoff.
    /// Every event schedules its own delayed focus, like a page timer would.
    /// The task ends when the event sender is dropped.
    pub fn spawn_focus_handoff(
        self: &Arc<Self>,
        mut changes: mpsc::UnboundedReceiver<String>,
    ) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            while let Some(ssid) = changes.recv().await {
                tracing::debug!(%ssid, "Network selected");
                let controller = Arc::clone(&controller);
                tokio::spawn(async move { controller.on_selection_change().await });
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::HeadlessPage;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Answers with a scripted sequence; `None` simulates a transport failure.
    struct ScriptedSource {
        answers: Mutex<VecDeque<Option<Vec<ScanEntry>>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(answers: Vec<Option<Vec<ScanEntry>>>) -> Arc<Self> {
            Arc::new(Self {
                answers: Mutex::new(answers.into()),
                calls: AtomicUsize::new(0),
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScanSource for ScriptedSource {
        async fn fetch_networks(&self) -> crate::Result<Vec<ScanEntry>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.answers.lock().unwrap().pop_front() {
                Some(Some(networks)) => Ok(networks),
                Some(None) => Err(crate::Error::Status(503)),
                None => Ok(Vec::new()),
            }
        }
    }

    fn controller(
        source: Arc<ScriptedSource>,
        page: &Arc<HeadlessPage>,
        options: ControllerOptions,
    ) -> Arc<PageController> {
        Arc::new(PageController::new(
            source,
            page.clone(),
            page.clone(),
            options,
        ))
    }

    fn sample() -> Vec<ScanEntry> {
        vec![
            ScanEntry::new("Neighbor", -85),
            ScanEntry::new("MyHomeWiFi", -48),
            ScanEntry::new("CafeGuest", -60),
        ]
    }

    #[tokio::test]
    async fn lists_networks_strongest_first() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(sample())]);
        let outcome = controller(source.clone(), &page, ControllerOptions::default())
            .load()
            .await;

        assert_eq!(outcome, ScanOutcome::Listed(3));
        let snap = page.snapshot();
        assert!(!snap.disabled);
        assert_eq!(snap.status_label, DISCOVERED_LABEL);
        let labels: Vec<_> = snap.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, ["100% MyHomeWiFi", "80% CafeGuest", "30% Neighbor"]);
        assert_eq!(snap.options[0].value, "MyHomeWiFi");
        assert!(snap.alerts.is_empty());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn empty_answer_is_retried_exactly_once() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(vec![]), Some(sample())]);
        let outcome = controller(source.clone(), &page, ControllerOptions::default())
            .load()
            .await;

        assert_eq!(outcome, ScanOutcome::Listed(3));
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn two_empty_answers_end_in_no_networks() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(vec![]), Some(vec![]), Some(sample())]);
        let outcome = controller(source.clone(), &page, ControllerOptions::default())
            .load()
            .await;

        assert_eq!(outcome, ScanOutcome::NoNetworks);
        assert_eq!(source.calls(), 2);
        let snap = page.snapshot();
        assert!(snap.disabled);
        assert_eq!(snap.status_label, NO_NETWORKS_LABEL);
        assert!(snap.options.is_empty());
        assert!(snap.alerts.is_empty());
    }

    #[tokio::test]
    async fn empty_answer_without_retry_flag_is_final() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(vec![]), Some(sample())]);
        let options = ControllerOptions {
            retry_on_empty: false,
            ..ControllerOptions::default()
        };
        let outcome = controller(source.clone(), &page, options).load().await;

        assert_eq!(outcome, ScanOutcome::NoNetworks);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn fetch_failure_alerts_once_and_keeps_selector_disabled() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![None, Some(sample())]);
        let outcome = controller(source.clone(), &page, ControllerOptions::default())
            .load()
            .await;

        assert_eq!(outcome, ScanOutcome::Failed);
        // 传输错误不重试
        assert_eq!(source.calls(), 1);
        let snap = page.snapshot();
        assert_eq!(snap.alerts, [FETCH_ERROR_MESSAGE]);
        assert!(snap.disabled);
        assert_eq!(snap.status_label, SCANNING_LABEL);
        assert!(snap.options.is_empty());
    }

    #[tokio::test]
    async fn failing_retry_alerts_once() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(vec![]), None]);
        let outcome = controller(source.clone(), &page, ControllerOptions::default())
            .load()
            .await;

        assert_eq!(outcome, ScanOutcome::Failed);
        assert_eq!(source.calls(), 2);
        assert_eq!(page.snapshot().alerts.len(), 1);
        assert!(page.snapshot().disabled);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_waits_for_the_configured_delay() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(vec![]), Some(sample())]);
        let options = ControllerOptions {
            retry_delay: Duration::from_secs(2),
            ..ControllerOptions::default()
        };
        let started = tokio::time::Instant::now();
        let outcome = controller(source.clone(), &page, options).load().await;

        assert_eq!(outcome, ScanOutcome::Listed(3));
        assert!(started.elapsed() >= Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn selection_change_focuses_password_after_delay() {
        let page = Arc::new(HeadlessPage::new());
        let source = ScriptedSource::new(vec![Some(sample())]);
        let controller = controller(source, &page, ControllerOptions::default());
        let handoff = controller.spawn_focus_handoff(page.take_selection_changes().unwrap());

        controller.load().await;
        page.select_network("CafeGuest").unwrap();

        sleep(Duration::from_millis(50)).await;
        assert!(!page.snapshot().password_focused);

        sleep(Duration::from_millis(60)).await;
        let snap = page.snapshot();
        assert!(snap.password_focused);
        assert_eq!(snap.selected.as_deref(), Some("CafeGuest"));

        handoff.abort();
    }
}
