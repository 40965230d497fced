//! Minimal plugin host
//!
//! Registers one plugin, runs its query against a data source and delivers
//! the resulting alerts to the notification channels.

use super::query::{DataSourceSettings, QueryResult};
use super::AlertingPlugin;
use crate::alerts::NotificationManager;
use crate::error::Result;

/// Host owning a registered plugin
pub struct PluginHost {
    plugin: Box<dyn AlertingPlugin>,
    source: DataSourceSettings,
    notifier: NotificationManager,
}

impl PluginHost {
    /// Register a plugin; calls its `init` once
    pub fn register(
        mut plugin: Box<dyn AlertingPlugin>,
        source: DataSourceSettings,
        notifier: NotificationManager,
    ) -> Result<Self> {
        plugin.init()?;
        log::info!(
            "Registered alerting plugin {} with {} notifiers",
            plugin.name(),
            notifier.notifier_count()
        );

        Ok(Self {
            plugin,
            source,
            notifier,
        })
    }

    /// Build a query, run it, and notify every alert
    pub fn tick(&self) -> Result<QueryResult> {
        let query = self.plugin.new_alert_query()?;
        let result = self.plugin.run_query(&self.source, &query)?;

        let delivered = self.notifier.notify_batch(&result.alerts);
        log::debug!(
            "Delivered {} notifications for {} alerts",
            delivered,
            result.alerts.len()
        );

        Ok(result)
    }

    pub fn plugin_name(&self) -> &str {
        self.plugin.name()
    }
}
