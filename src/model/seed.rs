//! Built-in sample data the board starts with.

use chrono::{DateTime, Duration, Utc};

use super::column::Column;
use super::task::{Priority, SubTask, Task, TeamMember};

/// The four starting columns: To Do, In Progress, Review, Done
pub fn default_columns() -> Vec<Column> {
    vec![
        Column::new("col-1", "To Do"),
        Column::new("col-2", "In Progress"),
        Column::new("col-3", "Review"),
        Column::new("col-4", "Done"),
    ]
}

fn member(id: &str, name: &str, role: &str) -> TeamMember {
    TeamMember {
        id: id.to_string(),
        name: name.to_string(),
        role: role.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        avatar: Some(format!(
            "https://ui-avatars.com/api/?name={}&background=random&color=fff",
            name
        )),
    }
}

pub fn sample_members() -> Vec<TeamMember> {
    vec![
        member("tm-1", "Priyanshu", "Developer"),
        member("tm-2", "Madhura", "Designer"),
        member("tm-3", "Aditya", "QA"),
        member("tm-4", "Ariv", "Developer"),
        member("tm-5", "Supriya", "Project Manager"),
    ]
}

struct Sample {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    status: &'static str,
    priority: Priority,
    /// Deadline offset from now, in days
    due_in_days: i64,
    /// Indexes into `sample_members()`
    assignees: &'static [usize],
    labels: &'static [&'static str],
}

const SAMPLES: [Sample; 8] = [
    Sample {
        id: "1",
        title: "Design user dashboard",
        description: "Create wireframes and mockups for the user dashboard.",
        status: "col-2",
        priority: Priority::High,
        due_in_days: 2,
        assignees: &[1],
        labels: &["design", "ui/ux"],
    },
    Sample {
        id: "2",
        title: "Update API documentation",
        description: "Review and update the API documentation with the latest endpoints.",
        status: "col-2",
        priority: Priority::Medium,
        due_in_days: -1,
        assignees: &[0, 3],
        labels: &["Documentation", "API"],
    },
    Sample {
        id: "3",
        title: "Fix login page bug",
        description: "The login page has an issue with form validation. Fix it.",
        status: "col-3",
        priority: Priority::High,
        due_in_days: 1,
        assignees: &[2],
        labels: &["Bugfix", "High Priority"],
    },
    Sample {
        id: "4",
        title: "Set up automated testing",
        description: "Configure Jest and implement unit tests for core components.",
        status: "col-2",
        priority: Priority::Low,
        due_in_days: 7,
        assignees: &[0],
        labels: &["Testing", "Setup"],
    },
    Sample {
        id: "5",
        title: "Deploy v1.0 to production",
        description: "Finalize release notes and deploy to production environment.",
        status: "col-4",
        priority: Priority::High,
        due_in_days: -3,
        assignees: &[4],
        labels: &["Deployment", "Release"],
    },
    Sample {
        id: "6",
        title: "Customer feedback review",
        description: "Analyze recent customer feedback and create action items.",
        status: "col-2",
        priority: Priority::Medium,
        due_in_days: 1,
        assignees: &[4, 2],
        labels: &["Feedback", "Analysis"],
    },
    Sample {
        id: "7",
        title: "Weekly team meeting",
        description: "Prepare agenda and meeting notes for weekly sync.",
        status: "col-2",
        priority: Priority::Medium,
        due_in_days: 2,
        assignees: &[4],
        labels: &["Meeting", "Planning"],
    },
    Sample {
        id: "8",
        title: "Research new technology stack",
        description: "Evaluate potential technologies for the next project.",
        status: "col-2",
        priority: Priority::Low,
        due_in_days: 14,
        assignees: &[1, 3],
        labels: &["Research", "Tech Stack"],
    },
];

/// The eight sample tasks, with deadlines relative to `now`.
pub fn sample_tasks(now: DateTime<Utc>) -> Vec<Task> {
    let members = sample_members();
    SAMPLES
        .iter()
        .map(|s| {
            let mut task = Task {
                id: s.id.to_string(),
                title: s.title.to_string(),
                description: s.description.to_string(),
                status: s.status.to_string(),
                priority: s.priority,
                deadline: now + Duration::days(s.due_in_days),
                created_at: now,
                assignees: s.assignees.iter().map(|&i| members[i].clone()).collect(),
                documents: Vec::new(),
                comments: Vec::new(),
                labels: s.labels.iter().map(|l| l.to_string()).collect(),
                subtasks: Vec::new(),
            };
            if s.id == "1" {
                task.subtasks = vec![
                    SubTask {
                        id: "st-1".into(),
                        title: "Create wireframes".into(),
                        completed: true,
                        created_at: now,
                        assignee: None,
                    },
                    SubTask {
                        id: "st-2".into(),
                        title: "Design mockups".into(),
                        completed: false,
                        created_at: now,
                        assignee: None,
                    },
                ];
            }
            task
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_shape() {
        let now = Utc::now();
        let tasks = sample_tasks(now);
        assert_eq!(tasks.len(), 8);
        assert_eq!(sample_members().len(), 5);
        assert_eq!(default_columns().len(), 4);

        let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4", "5", "6", "7", "8"]);

        let columns = default_columns();
        assert!(
            tasks
                .iter()
                .all(|t| columns.iter().any(|c| c.id == t.status))
        );
    }

    #[test]
    fn test_sample_deadlines_are_relative() {
        let now = Utc::now();
        let tasks = sample_tasks(now);
        assert_eq!(tasks[1].deadline, now - Duration::days(1));
        assert_eq!(tasks[7].deadline, now + Duration::days(14));
        assert_eq!(tasks[0].subtask_progress(), (1, 2));
        assert_eq!(tasks[1].assignees[1].name, "Ariv");
    }
}
