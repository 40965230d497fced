//! Alerting plugin layer
//!
//! The host drives a plugin through three calls: `init` once after
//! registration, `new_alert_query` to build the query model, and `run_query`
//! to evaluate it against a data source.

pub mod csv_plugin;
pub mod host;
pub mod query;

pub use csv_plugin::CsvAlertingPlugin;
pub use host::PluginHost;
pub use query::{DataSourceSettings, QueryModel, QueryResult, RuleQuery};

use crate::error::Result;

/// Trait implemented by alerting plugins
pub trait AlertingPlugin: Send + Sync {
    /// Prepare the plugin; called once by the host after registration
    fn init(&mut self) -> Result<()>;

    /// Build the query model the host stores and later passes back
    fn new_alert_query(&self) -> Result<QueryModel>;

    /// Evaluate a query against a data source
    fn run_query(&self, source: &DataSourceSettings, query: &QueryModel) -> Result<QueryResult>;

    /// Plugin name for identification
    fn name(&self) -> &str;
}
