//! Task selection strategies.

use taskman_core::Task;

/// Strategy for picking the next task among executable candidates.
///
/// Candidates arrive in insertion order and are already filtered to pending,
/// executable tasks.
pub trait TaskSelector: Send + Sync {
    /// Select the next task.
    fn select<'a>(&self, candidates: &[&'a Task]) -> Option<&'a Task>;
}

/// Default selector: lowest priority number, then earliest due date.
///
/// Remaining ties go to the first candidate in insertion order.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSelector;

impl DefaultSelector {
    /// Create a new default selector.
    pub fn new() -> Self {
        Self
    }
}

impl TaskSelector for DefaultSelector {
    fn select<'a>(&self, candidates: &[&'a Task]) -> Option<&'a Task> {
        // min_by_key keeps the first of several equal minima
        candidates
            .iter()
            .copied()
            .min_by_key(|t| (t.priority(), t.due_date()))
    }
}
