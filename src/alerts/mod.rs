//! Alert evaluation and notification
//!
//! Provides threshold-based evaluation of a CSV field with notification channels.

mod evaluator;
mod notifier;
mod types;

pub use evaluator::{Evaluation, Evaluator, RowSkip};
pub use notifier::{NotificationManager, Notifier, TerminalNotifier};
pub use types::{AlertRecord, AlertState};
