//! taskman core data models.
//!
//! This crate defines the task record shared by the registry, the storage
//! backends, and the CLI.

#![warn(missing_docs)]

mod date;
mod error;
mod task;

pub use date::{format_due_date, parse_due_date, DATE_FORMAT};
pub use error::{InvalidDateReason, ValidationError};
pub use task::{parse_dependency_list, parse_priority, Task, TaskRecord};

/// Calendar date type used for due dates
pub type Date = chrono::NaiveDate;
