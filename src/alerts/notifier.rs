//! Alert notification system
//!
//! Delivers alert records to notification channels. Only a terminal channel
//! ships today.

use super::types::{AlertRecord, AlertState};
use crate::error::Result;
use std::io::{self, Write};

/// Notification channel trait
pub trait Notifier: Send + Sync {
    /// Send a notification for an alert
    fn notify(&self, alert: &AlertRecord) -> Result<()>;

    /// Channel name for identification
    fn name(&self) -> &str;
}

/// Terminal/console notifier
///
/// Outputs alerts to stdout/stderr with colored formatting
pub struct TerminalNotifier {
    /// Use stderr instead of stdout
    use_stderr: bool,
    /// Use colors (ANSI escape codes)
    use_colors: bool,
}

impl TerminalNotifier {
    /// Create a new terminal notifier
    pub fn new() -> Self {
        Self {
            use_stderr: true,
            use_colors: Self::supports_color(),
        }
    }

    /// Create a notifier that uses stdout
    pub fn stdout() -> Self {
        Self {
            use_stderr: false,
            use_colors: Self::supports_color(),
        }
    }

    /// Disable ANSI colors
    pub fn without_color(mut self) -> Self {
        self.use_colors = false;
        self
    }

    fn supports_color() -> bool {
        std::env::var("TERM")
            .map(|term| term != "dumb")
            .unwrap_or(false)
            && std::env::var_os("NO_COLOR").is_none()
    }

    fn format_alert(&self, alert: &AlertRecord) -> String {
        format!(
            "{} line {}: {}",
            self.format_state(alert.state),
            alert.line,
            alert.message
        )
    }

    fn format_state(&self, state: AlertState) -> String {
        if !self.use_colors {
            return state.to_string();
        }

        let color_code = match state {
            AlertState::Firing => "\x1b[31m", // Red
            AlertState::Ok => "\x1b[32m",     // Green
        };

        format!("{}{}\x1b[0m", color_code, state)
    }
}

impl Default for TerminalNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for TerminalNotifier {
    fn notify(&self, alert: &AlertRecord) -> Result<()> {
        let message = self.format_alert(alert);

        if self.use_stderr {
            let stderr = io::stderr();
            let mut handle = stderr.lock();
            writeln!(handle, "{}", message)?;
        } else {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", message)?;
        }

        Ok(())
    }

    fn name(&self) -> &str {
        "terminal"
    }
}

/// Notification manager
///
/// Dispatches every alert to all registered channels
pub struct NotificationManager {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotificationManager {
    /// Create a manager with no channels
    pub fn new() -> Self {
        Self {
            notifiers: Vec::new(),
        }
    }

    /// Add a notifier
    pub fn add_notifier(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Send notification to all channels
    ///
    /// A failing channel is logged and does not stop the others.
    pub fn notify_all(&self, alert: &AlertRecord) -> usize {
        let mut delivered = 0;
        for notifier in &self.notifiers {
            match notifier.notify(alert) {
                Ok(()) => delivered += 1,
                Err(e) => log::warn!("Failed to notify via {}: {}", notifier.name(), e),
            }
        }
        delivered
    }

    /// Send notifications for multiple alerts, returning the delivery count
    pub fn notify_batch(&self, alerts: &[AlertRecord]) -> usize {
        alerts.iter().map(|alert| self.notify_all(alert)).sum()
    }

    /// Get number of active notifiers
    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }
}

impl Default for NotificationManager {
    fn default() -> Self {
        let mut manager = Self::new();
        manager.add_notifier(Box::new(TerminalNotifier::new()));
        manager
    }
}
