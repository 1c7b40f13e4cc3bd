use crate::traits::{Alerter, PortalDom};
use crate::{Error, Result};
use std::fmt::Write as _;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

/// One `<option>` of the `#networks` select.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

/// 页面状态的只读拷贝
#[derive(Debug, Clone, Default)]
pub struct PageSnapshot {
    pub disabled: bool,
    pub status_label: String,
    pub options: Vec<SelectOption>,
    pub selected: Option<String>,
    pub password_focused: bool,
    pub alerts: Vec<String>,
}

/// An in-memory configuration page: the `#networks` select with its
/// placeholder option, the `#password` input and the alert dialogs raised.
pub struct HeadlessPage {
    state: Mutex<PageSnapshot>,
    changes_tx: mpsc::UnboundedSender<String>,
    changes_rx: Mutex<Option<mpsc::UnboundedReceiver<String>>>,
}

impl Default for HeadlessPage {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessPage {
    pub fn new() -> Self {
        let (changes_tx, changes_rx) = mpsc::unbounded_channel();
        Self {
            state: Mutex::new(PageSnapshot::default()),
            changes_tx,
            changes_rx: Mutex::new(Some(changes_rx)),
        }
    }

    fn state(&self) -> MutexGuard<'_, PageSnapshot> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Hands out the stream of selection-change events. Only the first call
    /// gets it.
    pub fn take_selection_changes(&self) -> Option<mpsc::UnboundedReceiver<String>> {
        self.changes_rx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }

    /// Selects a network the way a user would. A change event is only
    /// emitted when the selected value actually changes.
    pub fn select_network(&self, value: &str) -> Result<()> {
        let mut state = self.state();
        if state.disabled {
            return Err(Error::Dom("#networks is disabled".to_string()));
        }
        if !state.options.iter().any(|o| o.value == value) {
            return Err(Error::Dom(format!("#networks has no option '{}'", value)));
        }
        if state.selected.as_deref() == Some(value) {
            return Ok(());
        }
        state.selected = Some(value.to_string());
        drop(state);

        // 没有人监听时事件直接丢弃
        let _ = self.changes_tx.send(value.to_string());
        Ok(())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        self.state().clone()
    }

    /// Plain-text view of the form, used by the CLI.
    pub fn render(&self) -> String {
        let state = self.state();
        let mut out = String::new();
        let _ = writeln!(
            out,
            "#networks{}",
            if state.disabled { " (disabled)" } else { "" }
        );
        let marker = if state.selected.is_none() { '>' } else { ' ' };
        let _ = writeln!(out, " {} {}", marker, state.status_label);
        for option in &state.options {
            let marker = if state.selected.as_deref() == Some(option.value.as_str()) {
                '>'
            } else {
                ' '
            };
            let _ = writeln!(out, " {}   {}", marker, option.label);
        }
        let _ = writeln!(
            out,
            "#password{}",
            if state.password_focused { " (focused)" } else { "" }
        );
        for alert in &state.alerts {
            let _ = writeln!(out, "alert: {}", alert);
        }
        out
    }
}

impl PortalDom for HeadlessPage {
    fn set_selector_disabled(&self, disabled: bool) {
        self.state().disabled = disabled;
    }

    fn set_selector_status(&self, label: &str) {
        self.state().status_label = label.to_string();
    }

    fn append_network_option(&self, value: &str, label: &str) {
        self.state().options.push(SelectOption {
            value: value.to_string(),
            label: label.to_string(),
        });
    }

    fn focus_password(&self) {
        self.state().password_focused = true;
    }
}

impl Alerter for HeadlessPage {
    fn alert(&self, message: &str) {
        tracing::error!("alert: {}", message);
        self.state().alerts.push(message.to_string());
    }
}
