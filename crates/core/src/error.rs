//! Validation errors raised while constructing a task.

/// Why a due date string was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidDateReason {
    /// Not shaped like `YYYY-MM-DD`
    BadFormat,
    /// Year outside the supported calendar range
    BadYear,
    /// Month outside 1..=12
    BadMonth,
    /// Day does not exist in the given month
    BadDay,
}

impl InvalidDateReason {
    /// Human-readable description of the problem.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::BadFormat => "expected the format YYYY-MM-DD",
            Self::BadYear => "the year must be a valid number between 0001 and 9999",
            Self::BadMonth => "the month must be between 1 and 12",
            Self::BadDay => "the day is not valid for the given month",
        }
    }
}

impl std::fmt::Display for InvalidDateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// Errors that can occur when building a [`Task`](crate::Task).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Name is empty or whitespace only
    #[error("task name cannot be empty")]
    EmptyName,

    /// Priority is not an integer
    #[error("priority must be an integer, got {0:?}")]
    InvalidPriority(String),

    /// Due date is not a valid calendar date
    #[error("invalid due date {value:?}: {reason}")]
    InvalidDate {
        /// The rejected input
        value: String,
        /// What was wrong with it
        reason: InvalidDateReason,
    },
}

impl ValidationError {
    /// Date sub-reason, if this is a date error.
    pub fn date_reason(&self) -> Option<InvalidDateReason> {
        match self {
            Self::InvalidDate { reason, .. } => Some(*reason),
            _ => None,
        }
    }
}
