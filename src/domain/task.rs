//! Task domain model
//!
//! A task has a fixed identity, title, priority and due date. Status is the
//! only field that changes after a task is built. Whether a task is overdue is
//! computed on read from the due date and the current date.

use chrono::{Days, Local, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;
use thiserror::Error;

use super::id::{Identifiable, TaskId};
use super::person::{Employee, Person};

/// Days from today a task is due when the builder is given no date
pub const DEFAULT_DUE_IN_DAYS: u64 = 7;

/// Returns today's date in the local timezone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("Task title is required")]
    MissingTitle,

    #[error("Task title must not be empty")]
    EmptyTitle,
}

/// Status of a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    /// Returns true if this status represents completion
    pub fn is_complete(&self) -> bool {
        matches!(self, TaskStatus::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority of a task, ordered `Low < Medium < High`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "LOW",
            Priority::Medium => "MEDIUM",
            Priority::High => "HIGH",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A unit of work, optionally assigned to an employee
///
/// Equality and hashing use the ID only. The assignee is shared, not owned:
/// removing the employee from its repository leaves the task untouched.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    id: TaskId,
    title: String,
    status: TaskStatus,
    priority: Priority,
    due_date: NaiveDate,
    #[serde(serialize_with = "serialize_assignee")]
    assigned_to: Option<Arc<Employee>>,
}

fn serialize_assignee<S>(assignee: &Option<Arc<Employee>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match assignee {
        Some(employee) => serializer.serialize_some(employee.name()),
        None => serializer.serialize_none(),
    }
}

impl Task {
    /// Starts building a task with the given ID
    pub fn builder(id: TaskId) -> TaskBuilder {
        TaskBuilder::new(id)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn assigned_to(&self) -> Option<&Arc<Employee>> {
        self.assigned_to.as_ref()
    }

    pub fn set_status(&mut self, status: TaskStatus) {
        self.status = status;
    }

    /// Returns true if the task is past due today and not done
    pub fn is_overdue(&self) -> bool {
        self.is_overdue_on(today())
    }

    /// Returns true if `date` is strictly after the due date and the task is not done
    pub fn is_overdue_on(&self, date: NaiveDate) -> bool {
        date > self.due_date && !self.status.is_complete()
    }
}

impl Identifiable for Task {
    type Id = TaskId;

    fn id(&self) -> TaskId {
        self.id
    }
}

impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Task {}

impl Hash for Task {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let assignee = self
            .assigned_to
            .as_deref()
            .map(Person::name)
            .unwrap_or("unassigned");
        write!(
            f,
            "Task{{id={}, title='{}', status={}, priority={}, dueDate={}, assignedTo={}}}",
            self.id,
            self.title,
            self.status,
            self.priority,
            self.due_date.format("%Y-%m-%d"),
            assignee
        )
    }
}

/// Builder for [`Task`]
///
/// Defaults: status `Todo`, priority `Medium`, due seven days from today, no
/// assignee. The title has no default; [`TaskBuilder::build`] fails without one.
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    id: TaskId,
    title: Option<String>,
    status: TaskStatus,
    priority: Priority,
    due_date: NaiveDate,
    assigned_to: Option<Arc<Employee>>,
}

impl TaskBuilder {
    pub fn new(id: TaskId) -> Self {
        let due_date = today()
            .checked_add_days(Days::new(DEFAULT_DUE_IN_DAYS))
            .unwrap_or(NaiveDate::MAX);
        Self {
            id,
            title: None,
            status: TaskStatus::default(),
            priority: Priority::default(),
            due_date,
            assigned_to: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn due_date(mut self, due_date: NaiveDate) -> Self {
        self.due_date = due_date;
        self
    }

    pub fn assigned_to(mut self, employee: Arc<Employee>) -> Self {
        self.assigned_to = Some(employee);
        self
    }

    pub fn build(self) -> Result<Task, BuildError> {
        let title = self.title.ok_or(BuildError::MissingTitle)?;
        if title.trim().is_empty() {
            return Err(BuildError::EmptyTitle);
        }

        Ok(Task {
            id: self.id,
            title,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            assigned_to: self.assigned_to,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EmployeeId;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_task(id: u64) -> TaskBuilder {
        Task::builder(TaskId::new(id)).title(format!("Task {}", id))
    }

    #[test]
    fn builder_applies_defaults() {
        let task = make_task(1).build().unwrap();

        assert_eq!(task.status(), TaskStatus::Todo);
        assert_eq!(task.priority(), Priority::Medium);
        assert!(task.assigned_to().is_none());
        assert_eq!(
            task.due_date(),
            today().checked_add_days(Days::new(DEFAULT_DUE_IN_DAYS)).unwrap()
        );
    }

    #[test]
    fn builder_without_title_fails() {
        let result = Task::builder(TaskId::new(1)).priority(Priority::High).build();
        assert_eq!(result.unwrap_err(), BuildError::MissingTitle);
    }

    #[test]
    fn builder_with_blank_title_fails() {
        let result = Task::builder(TaskId::new(1)).title("   ").build();
        assert_eq!(result.unwrap_err(), BuildError::EmptyTitle);
    }

    #[test]
    fn status_is_mutable() {
        let mut task = make_task(1).build().unwrap();
        task.set_status(TaskStatus::InProgress);
        assert_eq!(task.status(), TaskStatus::InProgress);
        assert!(!task.status().is_complete());
        task.set_status(TaskStatus::Done);
        assert!(task.status().is_complete());
    }

    #[test]
    fn overdue_requires_past_due_and_not_done() {
        let due = date(2024, 3, 10);
        let mut task = make_task(1).due_date(due).build().unwrap();

        assert!(!task.is_overdue_on(due));
        assert!(task.is_overdue_on(date(2024, 3, 11)));

        task.set_status(TaskStatus::Done);
        assert!(!task.is_overdue_on(date(2024, 3, 11)));
    }

    #[test]
    fn equality_is_by_id() {
        let a = make_task(1).priority(Priority::High).build().unwrap();
        let b = Task::builder(TaskId::new(1)).title("Other").build().unwrap();
        let c = make_task(2).build().unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn display_matches_export_format() {
        let siri = Arc::new(Employee::new(EmployeeId::new(1), "Siri Reddy", 3));
        let task = Task::builder(TaskId::new(1))
            .title("Build first MVP model")
            .status(TaskStatus::InProgress)
            .priority(Priority::High)
            .due_date(date(2025, 1, 9))
            .assigned_to(siri)
            .build()
            .unwrap();

        assert_eq!(
            task.to_string(),
            "Task{id=1, title='Build first MVP model', status=IN_PROGRESS, priority=HIGH, dueDate=2025-01-09, assignedTo=Siri Reddy}"
        );
    }

    #[test]
    fn display_unassigned() {
        let task = make_task(3).due_date(date(2025, 1, 1)).build().unwrap();
        assert!(task.to_string().ends_with("assignedTo=unassigned}"));
    }

    #[test]
    fn json_uses_screaming_enums_and_assignee_name() {
        let sam = Arc::new(Employee::new(EmployeeId::new(4), "Sam", 2));
        let task = make_task(9)
            .status(TaskStatus::InProgress)
            .due_date(date(2025, 6, 1))
            .assigned_to(sam)
            .build()
            .unwrap();

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["id"], 9);
        assert_eq!(json["status"], "IN_PROGRESS");
        assert_eq!(json["priority"], "MEDIUM");
        assert_eq!(json["due_date"], "2025-06-01");
        assert_eq!(json["assigned_to"], "Sam");
    }

    #[test]
    fn priority_ordering() {
        assert!(Priority::Low < Priority::Medium);
        assert!(Priority::Medium < Priority::High);
    }
}
