//! Composable task predicates

use std::fmt;

use super::id::{EmployeeId, Identifiable};
use super::task::{Priority, Task, TaskStatus};

type Predicate = dyn Fn(&Task) -> bool + Send + Sync;

/// A boolean test over a task
///
/// Filters combine with [`TaskFilter::and`]; the right-hand side only runs
/// when the left-hand side passes.
pub struct TaskFilter {
    predicate: Box<Predicate>,
}

impl TaskFilter {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&Task) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Box::new(predicate),
        }
    }

    pub fn test(&self, task: &Task) -> bool {
        (self.predicate)(task)
    }

    pub fn and(self, other: TaskFilter) -> TaskFilter {
        TaskFilter::new(move |task| self.test(task) && other.test(task))
    }

    /// Matches every task
    pub fn all() -> Self {
        Self::new(|_| true)
    }

    /// Matches tasks with `High` priority
    pub fn high_priority() -> Self {
        Self::new(|task| task.priority() == Priority::High)
    }

    pub fn not_done() -> Self {
        Self::new(|task| !task.status().is_complete())
    }

    pub fn with_status(status: TaskStatus) -> Self {
        Self::new(move |task| task.status() == status)
    }

    pub fn assigned_to(employee: EmployeeId) -> Self {
        Self::new(move |task| task.assigned_to().is_some_and(|e| e.id() == employee))
    }
}

impl fmt::Debug for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskFilter").finish_non_exhaustive()
    }
}
