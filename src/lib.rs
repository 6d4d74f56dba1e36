//! taskboard - an in-memory task board
//!
//! Employees, tasks with priorities and due dates, composable filters,
//! grouping by assignee, file export and a background reporter, all held in
//! memory for the life of the process.

pub mod domain;
pub mod storage;
pub mod service;
pub mod cli;

pub use domain::{Employee, EmployeeId, IdGenerator, Priority, Task, TaskFilter, TaskId, TaskStatus};
pub use service::{ServiceError, TaskService};
pub use storage::{InMemoryRepository, Repository};
