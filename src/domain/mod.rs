//! Domain models for the task board
//!
//! Contains the core business types without any I/O concerns.

mod id;
mod person;
mod task;
mod filter;

pub use id::{EmployeeId, IdGenerator, Identifiable, TaskId};
pub use person::{compare_by_name, default_email, Employee, Person, DEFAULT_EMAIL_DOMAIN};
pub use task::{today, BuildError, Priority, Task, TaskBuilder, TaskStatus, DEFAULT_DUE_IN_DAYS};
pub use filter::TaskFilter;
