//! Task model - the unit of work tracked by the registry.

use crate::Date;
use serde::{Deserialize, Serialize};

use crate::date::{format_due_date, parse_due_date};
use crate::error::ValidationError;

/// A task with a priority, a due date, and named dependencies.
///
/// Fields are read through accessors; the only mutation after construction
/// is [`Task::mark_completed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    name: String,
    priority: i64,
    due_date: Date,
    dependencies: Vec<String>,
    completed: bool,
}

impl Task {
    /// Build a pending task from raw inputs.
    ///
    /// The name is trimmed; the due date must be `YYYY-MM-DD`.
    pub fn new(
        name: impl Into<String>,
        priority: i64,
        due_date: &str,
        dependencies: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let name: String = name.into();
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        let due_date = parse_due_date(due_date)?;

        Ok(Self {
            name: name.to_string(),
            priority,
            due_date,
            dependencies,
            completed: false,
        })
    }

    /// Set the completed flag at construction time.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Task name as entered.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Priority (lower is more important).
    pub fn priority(&self) -> i64 {
        self.priority
    }

    /// Due date.
    pub fn due_date(&self) -> Date {
        self.due_date
    }

    /// Names of the tasks this one depends on.
    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Whether the task has been completed.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Mark the task as completed. There is no way back.
    pub fn mark_completed(&mut self) {
        self.completed = true;
    }

    /// Case-insensitive exact name match.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }
}

impl std::fmt::Display for Task {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} | priority {} | due {} | depends on [{}]",
            self.name,
            self.priority,
            format_due_date(self.due_date),
            self.dependencies.join(", ")
        )
    }
}

/// Serialized form of a [`Task`].
///
/// Loading a record runs the same validation as [`Task::new`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Task name
    pub name: String,

    /// Priority
    pub priority: i64,

    /// Due date as `YYYY-MM-DD`
    pub due_date: String,

    /// Dependency names
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        Self {
            name: task.name,
            priority: task.priority,
            due_date: format_due_date(task.due_date),
            dependencies: task.dependencies,
            completed: task.completed,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        Ok(Task::new(record.name, record.priority, &record.due_date, record.dependencies)?
            .with_completed(record.completed))
    }
}

/// Parse a priority typed as text.
pub fn parse_priority(input: &str) -> Result<i64, ValidationError> {
    input
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidPriority(input.to_string()))
}

/// Split a comma-separated list of dependency names.
///
/// Entries are trimmed and blanks dropped, so `""` yields no dependencies.
pub fn parse_dependency_list(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
