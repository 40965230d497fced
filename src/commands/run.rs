//! Run command implementation
//!
//! Registers the CSV plugin with the host and runs one query, delivering
//! alerts to the terminal.

use crate::alerts::{NotificationManager, TerminalNotifier};
use crate::cli::args::{OutputFormat, RunArgs};
use crate::cli::output::{print_output, Message};
use crate::config::Config;
use crate::error::Result;
use crate::plugin::{CsvAlertingPlugin, DataSourceSettings, PluginHost};

/// Execute the run command
pub fn run_plugin(config: &Config, args: &RunArgs, format: OutputFormat) -> Result<()> {
    let source = DataSourceSettings::from_config(config)?;
    let plugin = Box::new(CsvAlertingPlugin::new(config.clone()));

    let host = PluginHost::register(plugin, source, notification_manager(args))?;
    let result = host.tick()?;

    let message = Message {
        message: format!(
            "{}: {} alerts, {} rows skipped",
            result.state(),
            result.alerts.len(),
            result.rows_skipped
        ),
    };
    print_output(&message, format)?;

    Ok(())
}

fn terminal_notifier(args: &RunArgs) -> TerminalNotifier {
    let notifier = if args.stdout {
        TerminalNotifier::stdout()
    } else {
        TerminalNotifier::new()
    };
    if args.no_color {
        notifier.without_color()
    } else {
        notifier
    }
}

fn notification_manager(args: &RunArgs) -> NotificationManager {
    let mut manager = NotificationManager::new();
    manager.add_notifier(Box::new(terminal_notifier(args)));
    manager
}
