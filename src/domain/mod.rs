//! Domain models for csvalert
//!
//! This module contains the field selector, comparison condition and row types.
//! Types are validated on construction (fail-fast pattern).

pub mod condition;
pub mod row;
pub mod selector;

pub use condition::{Condition, Operator};
pub use row::{Row, Table};
pub use selector::{FieldSelector, ResolvedField};
