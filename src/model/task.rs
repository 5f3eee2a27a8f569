use chrono::{DateTime, Utc};
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    /// Parse the lowercase wire name
    pub fn from_name(s: &str) -> Option<Priority> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

/// A person that can be assigned to tasks and subtasks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: String,
    pub name: String,
    pub role: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl TeamMember {
    /// A member created on the spot from a typed-in name.
    ///
    /// Role defaults to `Member` and the email is derived from the name
    /// (`Jane Doe` → `jane.doe@example.com`).
    pub fn ad_hoc(id: String, name: &str) -> Self {
        let local = name
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(".");
        TeamMember {
            id,
            name: name.to_string(),
            role: "Member".to_string(),
            email: format!("{}@example.com", local),
            avatar: None,
        }
    }
}

/// A file attached to a task. Produced outside the board and stored verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    /// MIME type
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Opaque reference to the content
    pub url: String,
    pub uploaded_by: String,
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    /// Owning task (informational only)
    pub task_id: String,
    pub author_id: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTask {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<TeamMember>,
}

/// A task on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Id of the column this task sits in
    pub status: String,
    pub priority: Priority,
    pub deadline: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub assignees: Vec<TeamMember>,
    #[serde(default)]
    pub documents: Vec<Document>,
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Unique, case-sensitive, insertion ordered
    #[serde(default)]
    pub labels: IndexSet<String>,
    #[serde(default)]
    pub subtasks: Vec<SubTask>,
}

impl Task {
    /// Number of completed subtasks and the total count
    pub fn subtask_progress(&self) -> (usize, usize) {
        let done = self.subtasks.iter().filter(|s| s.completed).count();
        (done, self.subtasks.len())
    }

    pub fn has_assignee_named(&self, name: &str) -> bool {
        let lowered = name.to_lowercase();
        self.assignees
            .iter()
            .any(|a| a.name.to_lowercase() == lowered)
    }
}

/// Fields supplied when creating a task. The board fills in the id and
/// creation time.
#[derive(Debug, Clone)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: Priority,
    pub deadline: DateTime<Utc>,
    pub assignees: Vec<TeamMember>,
    pub documents: Vec<Document>,
    pub comments: Vec<Comment>,
    pub labels: Vec<String>,
    pub subtasks: Vec<SubTask>,
}

impl NewTask {
    pub fn new(
        title: impl Into<String>,
        status: impl Into<String>,
        priority: Priority,
        deadline: DateTime<Utc>,
    ) -> Self {
        NewTask {
            title: title.into(),
            description: String::new(),
            status: status.into(),
            priority,
            deadline,
            assignees: Vec::new(),
            documents: Vec::new(),
            comments: Vec::new(),
            labels: Vec::new(),
            subtasks: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_assignees(mut self, assignees: Vec<TeamMember>) -> Self {
        self.assignees = assignees;
        self
    }

    pub fn with_labels<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.labels = labels.into_iter().map(Into::into).collect();
        self
    }
}
