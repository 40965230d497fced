//! csvalert - threshold alerting on a CSV field
//!
//! This library reads a CSV source, picks one field per row, compares it
//! against a numeric threshold and produces alert records through an
//! alerting plugin interface.
//!
//! # Modules
//!
//! - [`alerts`]: Evaluator, alert records and notification channels
//! - [`cli`]: Command-line interface definitions
//! - [`commands`]: Command handlers
//! - [`config`]: Configuration system
//! - [`domain`]: Field selector, condition and row types
//! - [`error`]: Error types
//! - [`plugin`]: Alerting plugin trait, CSV plugin and host
//! - [`source`]: CSV source reading

pub mod alerts;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod error;
pub mod plugin;
pub mod source;

pub use error::{AppError, Result};
