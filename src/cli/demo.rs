//! The demonstration run
//!
//! Seeds two employees and three tasks, prints each board view, exports the
//! tasks to a file and lets the background reporter tick for a while.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Days;
use serde::Serialize;

use super::app::DemoArgs;
use super::output::Output;
use crate::domain::{
    compare_by_name, today, Employee, IdGenerator, Identifiable, Person, Priority, Task,
    TaskFilter, TaskStatus,
};
use crate::service::{spawn_reporter, TaskService};
use crate::storage::{export_tasks, BoardConfig, ExportFormat, InMemoryRepository, Repository};

/// Window used for the "due soon" view
const DUE_SOON_DAYS: u64 = 3;

/// Settings for one demo run, after merging config and flags
#[derive(Debug, Clone)]
pub struct DemoSettings {
    pub export_path: PathBuf,
    pub export_format: ExportFormat,
    pub linger: Duration,
    pub report_interval: Duration,
}

impl DemoSettings {
    pub fn resolve(board: &BoardConfig, args: DemoArgs) -> Self {
        Self {
            export_path: args.export.unwrap_or_else(|| board.export_path.clone()),
            export_format: args.export_format.unwrap_or(board.export_format),
            linger: args.linger.map(Duration::from_secs).unwrap_or_else(|| board.linger()),
            report_interval: args
                .report_interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| board.report_interval()),
        }
    }
}

/// One employee and the tasks assigned to them
#[derive(Debug, Serialize)]
struct Assignment {
    employee: String,
    employee_id: u64,
    tasks: Vec<Task>,
}

impl fmt::Display for Assignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tasks: Vec<String> = self.tasks.iter().map(Task::to_string).collect();
        write!(f, "{} -> [{}]", self.employee, tasks.join(", "))
    }
}

pub fn run(output: &Output, settings: &DemoSettings) -> Result<()> {
    let ids = IdGenerator::new();
    let employees = InMemoryRepository::<Employee>::new();
    let service = Arc::new(TaskService::new(InMemoryRepository::<Task>::new()));

    let siri = Arc::new(employees.save(Employee::with_email(
        ids.next_employee(),
        "Siri Reddy",
        "siri@aistartup.com",
        3,
    )));
    let suraj = Arc::new(employees.save(Employee::new(ids.next_employee(), "Suraj Kumar", 5)));

    output.section("Employees", &employees.find_all_sorted(compare_by_name));

    let diff = siri.experience_years().abs_diff(suraj.experience_years());
    if output.is_json() {
        output.data(&serde_json::json!({ "experience_diff_years": diff }));
    } else {
        println!("Experience diff: {} years", diff);
        output.blank();
    }

    let today = today();
    let day_offset = |days: u64| {
        today
            .checked_add_days(Days::new(days))
            .context("Due date out of range")
    };
    let yesterday = today
        .checked_sub_days(Days::new(1))
        .context("Due date out of range")?;

    let tasks = [
        Task::builder(ids.next_task())
            .title("Build first MVP model")
            .status(TaskStatus::InProgress)
            .priority(Priority::High)
            .due_date(day_offset(2)?)
            .assigned_to(Arc::clone(&siri))
            .build()?,
        Task::builder(ids.next_task())
            .title("Set up CI/CD pipeline")
            .status(TaskStatus::Todo)
            .priority(Priority::Medium)
            .due_date(day_offset(5)?)
            .assigned_to(Arc::clone(&suraj))
            .build()?,
        Task::builder(ids.next_task())
            .title("Prepare pitch deck")
            .status(TaskStatus::Todo)
            .priority(Priority::High)
            .due_date(yesterday)
            .assigned_to(Arc::clone(&siri))
            .build()?,
    ];
    for task in tasks {
        service.create(task);
    }

    output.section("All Tasks", &service.repository().find_all());

    let report_output = *output;
    let reporter = spawn_reporter(Arc::clone(&service), settings.report_interval, move |total| {
        report_output.report(total)
    })
    .context("Failed to start reporter thread")?;

    output.blank();
    let urgent = TaskFilter::high_priority().and(TaskFilter::not_done());
    output.section("High Priority Not Done", &service.find_tasks(&urgent));

    output.blank();
    output.section(
        &format!("Due in {} days", DUE_SOON_DAYS),
        &service.due_in(DUE_SOON_DAYS),
    );

    output.blank();
    let mut overdue: Vec<Task> = service.overdue().into_iter().collect();
    overdue.sort_by_key(Task::id);
    output.section("Overdue", &overdue);

    output.blank();
    let mut groups: Vec<_> = service.by_employee().into_iter().collect();
    groups.sort_by(|(a, _), (b, _)| compare_by_name::<Employee>(a, b));
    let assignments: Vec<Assignment> = groups
        .into_iter()
        .map(|(employee, tasks)| Assignment {
            employee: employee.name().to_string(),
            employee_id: employee.id().value(),
            tasks,
        })
        .collect();
    output.section("By Employee", &assignments);

    match export_tasks(
        &settings.export_path,
        settings.export_format,
        &service.repository().find_all(),
    ) {
        Ok(count) => output.verbose_ctx(
            "export",
            &format!("Exported {} tasks to {}", count, settings.export_path.display()),
        ),
        Err(e) => output.warn(&format!("Export failed: {}", e)),
    }

    thread::sleep(settings.linger);

    let reports = reporter.stop();
    output.verbose_ctx("reporter", &format!("Stopped after {} reports", reports));

    output.blank();
    output.success("Finished.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EmployeeId, TaskId};

    #[test]
    fn flags_override_config() {
        let board = BoardConfig::default();
        let args = DemoArgs {
            export: Some(PathBuf::from("custom.txt")),
            export_format: None,
            linger: Some(0),
            report_interval: None,
        };

        let settings = DemoSettings::resolve(&board, args);
        assert_eq!(settings.export_path, PathBuf::from("custom.txt"));
        assert_eq!(settings.export_format, ExportFormat::Text);
        assert_eq!(settings.linger, Duration::ZERO);
        assert_eq!(settings.report_interval, Duration::from_secs(2));
    }

    #[test]
    fn assignment_lists_tasks_in_brackets() {
        let ana = Arc::new(Employee::new(EmployeeId::new(1), "Ana", 2));
        let task = |id: u64| {
            Task::builder(TaskId::new(id))
                .title(format!("T{}", id))
                .due_date(chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
                .assigned_to(Arc::clone(&ana))
                .build()
                .unwrap()
        };
        let assignment = Assignment {
            employee: ana.name().to_string(),
            employee_id: 1,
            tasks: vec![task(1), task(2)],
        };

        let text = assignment.to_string();
        assert!(text.starts_with("Ana -> [Task{id=1, title='T1'"));
        assert!(text.contains("}, Task{id=2, title='T2'"));
        assert!(text.ends_with("assignedTo=Ana}]"));
    }
}
