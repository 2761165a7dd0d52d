//! Demo seed list every fresh session starts from.

use chrono::{DateTime, NaiveDate, Utc};

use crate::task::{Priority, Task, TaskStatus};

fn december(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 12, day).expect("seed dates are valid")
}

/// Six tasks across the three fixed projects, mixing every status and
/// priority. All are timestamped `now`.
pub fn seed_tasks(now: DateTime<Utc>) -> Vec<Task> {
    vec![
        Task::new("1", "Complete project proposal", now)
            .with_description("Finalize the Q4 project proposal and submit to stakeholders")
            .with_priority(Priority::High)
            .with_due_date(december(30))
            .with_project("work"),
        Task::new("2", "Review code documentation", now)
            .with_description("Go through the API documentation and update outdated sections")
            .with_status(TaskStatus::InProgress)
            .with_due_date(december(28))
            .with_project("work"),
        Task::new("3", "Plan weekend trip", now)
            .with_description("Research destinations and book accommodations")
            .with_status(TaskStatus::Completed)
            .with_priority(Priority::Low)
            .with_due_date(december(25))
            .with_project("personal"),
        Task::new("4", "Learn advanced UI patterns", now)
            .with_description("Study advanced component patterns and apply them in a practice project")
            .with_status(TaskStatus::InProgress)
            .with_due_date(december(29))
            .with_project("learning"),
        Task::new("5", "Prepare presentation slides", now)
            .with_description("Create slides for quarterly business review meeting")
            .with_priority(Priority::High)
            .with_due_date(december(31))
            .with_project("work"),
        Task::new("6", "Exercise routine", now)
            .with_description("Complete 30-minute workout session")
            .with_status(TaskStatus::Completed)
            .with_priority(Priority::Low)
            .with_due_date(december(26))
            .with_project("personal"),
    ]
}
