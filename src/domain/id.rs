//! Numeric identifiers for employees and tasks
//!
//! IDs are plain positive integers issued by an [`IdGenerator`]. Tasks and
//! employees draw from independent counters, so `TaskId(1)` and
//! `EmployeeId(1)` can coexist.
//!
//! The generator is an ordinary value that callers construct and pass around,
//! which keeps issuance deterministic in tests. Counters are atomic, so a
//! shared generator stays unique under concurrent callers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identifier of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(u64);

impl TaskId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of an employee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeId(u64);

impl EmployeeId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EmployeeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An entity with a stable, unique identifier
///
/// Repositories key their entries by [`Identifiable::id`].
pub trait Identifiable {
    type Id: Copy + Ord + fmt::Display;

    fn id(&self) -> Self::Id;
}

/// Issues task and employee IDs from two independent counters starting at 1
#[derive(Debug)]
pub struct IdGenerator {
    task: AtomicU64,
    employee: AtomicU64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            task: AtomicU64::new(1),
            employee: AtomicU64::new(1),
        }
    }

    /// Returns the next task ID
    pub fn next_task(&self) -> TaskId {
        TaskId(self.task.fetch_add(1, Ordering::Relaxed))
    }

    /// Returns the next employee ID
    pub fn next_employee(&self) -> EmployeeId {
        EmployeeId(self.employee.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
