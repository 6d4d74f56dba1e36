//! # Task Service
//!
//! Domain operations over a task repository: status updates, filtering,
//! due-date windows, grouping by assignee and overdue detection.
//!
//! Date-based queries come in two forms: one that reads today's date
//! (`due_in`, `overdue`) and one that takes the date explicitly
//! (`due_in_from`, `overdue_on`).

mod reporter;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use thiserror::Error;

use crate::domain::{today, Employee, Identifiable, Task, TaskFilter, TaskId, TaskStatus};
use crate::storage::{InMemoryRepository, Repository};

pub use reporter::{print_report, spawn_reporter, ReporterHandle};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Task with id {0} not found")]
    TaskNotFound(TaskId),
}

/// Use-case layer over a [`Repository`] of tasks
pub struct TaskService<R = InMemoryRepository<Task>> {
    repo: R,
}

impl<R: Repository<Task>> TaskService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Returns the underlying repository
    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Stores a new task
    pub fn create(&self, task: Task) -> Task {
        tracing::debug!(id = %task.id(), title = task.title(), "creating task");
        self.repo.save(task)
    }

    /// Changes the status of a stored task
    ///
    /// Nothing is written when the task does not exist.
    pub fn update_status(&self, id: TaskId, status: TaskStatus) -> Result<Task, ServiceError> {
        let mut task = self
            .repo
            .find_by_id(id)
            .ok_or(ServiceError::TaskNotFound(id))?;
        task.set_status(status);
        tracing::debug!(%id, %status, "updated task status");
        Ok(self.repo.save(task))
    }

    /// Returns tasks matching `filter`, in repository order
    pub fn find_tasks(&self, filter: &TaskFilter) -> Vec<Task> {
        self.repo
            .find_all()
            .into_iter()
            .filter(|task| filter.test(task))
            .collect()
    }

    /// Total number of tasks
    pub fn count(&self) -> usize {
        self.find_tasks(&TaskFilter::all()).len()
    }

    /// Tasks due between today and `days` from today, both inclusive
    pub fn due_in(&self, days: u64) -> Vec<Task> {
        self.due_in_from(today(), days)
    }

    pub fn due_in_from(&self, from: NaiveDate, days: u64) -> Vec<Task> {
        let limit = from.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        self.repo
            .find_all()
            .into_iter()
            .filter(|task| (from..=limit).contains(&task.due_date()))
            .collect()
    }

    /// Groups assigned tasks by employee; unassigned tasks are left out
    pub fn by_employee(&self) -> HashMap<Arc<Employee>, Vec<Task>> {
        let mut groups: HashMap<Arc<Employee>, Vec<Task>> = HashMap::new();
        for task in self.repo.find_all() {
            if let Some(employee) = task.assigned_to().cloned() {
                groups.entry(employee).or_default().push(task);
            }
        }
        groups
    }

    /// Tasks past their due date that are not done
    pub fn overdue(&self) -> HashSet<Task> {
        self.overdue_on(today())
    }

    pub fn overdue_on(&self, date: NaiveDate) -> HashSet<Task> {
        self.repo
            .find_all()
            .into_iter()
            .filter(|task| task.is_overdue_on(date))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, Priority};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn service() -> TaskService {
        TaskService::new(InMemoryRepository::new())
    }

    fn task_due(id: u64, due: NaiveDate) -> Task {
        Task::builder(TaskId::new(id))
            .title(format!("Task {}", id))
            .due_date(due)
            .build()
            .unwrap()
    }

    #[test]
    fn create_stores_task() {
        let service = service();
        let created = service.create(task_due(1, date(2025, 1, 1)));

        assert_eq!(service.repository().find_by_id(created.id()), Some(created));
        assert_eq!(service.count(), 1);
    }

    #[test]
    fn update_status_changes_stored_task() {
        let service = service();
        service.create(task_due(1, date(2025, 1, 1)));

        let updated = service.update_status(TaskId::new(1), TaskStatus::Done).unwrap();
        assert_eq!(updated.status(), TaskStatus::Done);

        let stored = service.repository().find_by_id(TaskId::new(1)).unwrap();
        assert_eq!(stored.status(), TaskStatus::Done);
    }

    #[test]
    fn update_status_unknown_id_fails_without_writing() {
        let service = service();
        service.create(task_due(1, date(2025, 1, 1)));

        let err = service.update_status(TaskId::new(42), TaskStatus::Done).unwrap_err();
        assert_eq!(err, ServiceError::TaskNotFound(TaskId::new(42)));
        assert_eq!(err.to_string(), "Task with id 42 not found");
        assert_eq!(service.count(), 1);
        assert!(service.repository().find_by_id(TaskId::new(42)).is_none());
    }

    #[test]
    fn due_in_zero_days_is_today_only() {
        let today = date(2025, 5, 10);
        let service = service();
        service.create(task_due(1, today));
        service.create(task_due(2, date(2025, 5, 11)));
        service.create(task_due(3, date(2025, 5, 9)));

        let due: Vec<_> = service.due_in_from(today, 0).iter().map(|t| t.id().value()).collect();
        assert_eq!(due, vec![1]);

        let due: Vec<_> = service.due_in_from(today, 1).iter().map(|t| t.id().value()).collect();
        assert_eq!(due, vec![1, 2]);
    }

    #[test]
    fn overdue_excludes_done_tasks() {
        let today = date(2025, 5, 10);
        let service = service();
        service.create(task_due(1, date(2025, 5, 9)));
        service.create(
            Task::builder(TaskId::new(2))
                .title("Finished")
                .status(TaskStatus::Done)
                .due_date(date(2025, 5, 9))
                .build()
                .unwrap(),
        );
        service.create(task_due(3, today));

        let overdue = service.overdue_on(today);
        assert_eq!(overdue.len(), 1);
        assert!(overdue.contains(&task_due(1, today)));
    }

    #[test]
    fn by_employee_groups_by_id_not_name() {
        let first = Arc::new(Employee::new(EmployeeId::new(1), "Alex", 1));
        let second = Arc::new(Employee::new(EmployeeId::new(2), "Alex", 4));
        let service = service();

        let assign = |id: u64, employee: &Arc<Employee>| {
            Task::builder(TaskId::new(id))
                .title(format!("Task {}", id))
                .assigned_to(Arc::clone(employee))
                .build()
                .unwrap()
        };
        service.create(assign(1, &first));
        service.create(assign(2, &second));
        service.create(assign(3, &first));
        service.create(task_due(4, date(2025, 1, 1)));

        let groups = service.by_employee();
        assert_eq!(groups.len(), 2);

        let ids = |e: &Arc<Employee>| -> Vec<u64> {
            groups[e].iter().map(|t| t.id().value()).collect()
        };
        assert_eq!(ids(&first), vec![1, 3]);
        assert_eq!(ids(&second), vec![2]);
    }

    #[test]
    fn find_tasks_applies_filter() {
        let service = service();
        for (id, priority) in [(1, Priority::High), (2, Priority::Low), (3, Priority::High)] {
            service.create(
                Task::builder(TaskId::new(id))
                    .title("t")
                    .priority(priority)
                    .build()
                    .unwrap(),
            );
        }

        let high: Vec<_> = service
            .find_tasks(&TaskFilter::high_priority())
            .iter()
            .map(|t| t.id().value())
            .collect();
        assert_eq!(high, vec![1, 3]);
    }
}
