use serde::{Deserialize, Serialize};

/// Icon shown next to a column title
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnIcon {
    Star,
    Circle,
    Square,
    Triangle,
}

impl ColumnIcon {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnIcon::Star => "star",
            ColumnIcon::Circle => "circle",
            ColumnIcon::Square => "square",
            ColumnIcon::Triangle => "triangle",
        }
    }

    /// Terminal glyph for this icon
    pub fn glyph(self) -> char {
        match self {
            ColumnIcon::Star => '★',
            ColumnIcon::Circle => '●',
            ColumnIcon::Square => '■',
            ColumnIcon::Triangle => '▲',
        }
    }

    pub fn from_name(s: &str) -> Option<ColumnIcon> {
        match s {
            "star" => Some(ColumnIcon::Star),
            "circle" => Some(ColumnIcon::Circle),
            "square" => Some(ColumnIcon::Square),
            "triangle" => Some(ColumnIcon::Triangle),
            _ => None,
        }
    }
}

/// A workflow stage. Tasks belong to a column through their `status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
}

impl Column {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Column {
            id: id.into(),
            title: title.into(),
            icon: None,
        }
    }

    pub fn with_icon(mut self, icon: ColumnIcon) -> Self {
        self.icon = Some(icon);
        self
    }
}

/// A column together with the ids of the tasks currently in it.
///
/// Lanes are derived from the task list and rebuilt after every change;
/// they are never edited directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Lane {
    pub column_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
    pub task_ids: Vec<String>,
}
