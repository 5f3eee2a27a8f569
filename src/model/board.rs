use std::collections::HashSet;

use chrono::Utc;
use indexmap::IndexMap;

use super::column::{Column, Lane};
use super::config::{BoardConfig, DEFAULT_ID_LENGTH, MIN_ID_LENGTH};
use super::seed;
use super::task::{Document, Task, TeamMember};
use crate::ops::projection::project;
use crate::util::id::generate_id;

/// Error type for board operations
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("{what} cannot be empty")]
    EmptyInput { what: &'static str },
    #[error("cannot delete the last column")]
    LastColumn,
    #[error("a board needs at least one column")]
    NoColumns,
    #[error("column not found: {0}")]
    ColumnNotFound(String),
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),
    #[error("assignee \"{0}\" already added")]
    DuplicateAssignee(String),
}

/// The in-memory board: the authoritative task and column lists plus the
/// lanes projected from them.
#[derive(Debug, Clone)]
pub struct Board {
    pub(crate) name: String,
    pub(crate) tasks: Vec<Task>,
    pub(crate) columns: Vec<Column>,
    /// Derived from `tasks` and `columns`; rebuilt by `reproject`
    pub(crate) lanes: Vec<Lane>,
    pub(crate) id_length: usize,
}

impl Board {
    /// Build a board from columns and tasks.
    ///
    /// Fails if there are no columns, two columns share an id, or a task's
    /// status names no column.
    pub fn new(
        name: impl Into<String>,
        columns: Vec<Column>,
        tasks: Vec<Task>,
    ) -> Result<Self, BoardError> {
        if columns.is_empty() {
            return Err(BoardError::NoColumns);
        }
        let mut seen = HashSet::new();
        for col in &columns {
            if !seen.insert(col.id.as_str()) {
                return Err(BoardError::DuplicateColumn(col.id.clone()));
            }
        }
        if let Some(orphan) = tasks.iter().find(|t| !seen.contains(t.status.as_str())) {
            return Err(BoardError::ColumnNotFound(orphan.status.clone()));
        }

        let mut board = Board {
            name: name.into(),
            tasks,
            columns,
            lanes: Vec::new(),
            id_length: DEFAULT_ID_LENGTH,
        };
        board.reproject();
        Ok(board)
    }

    /// The sample board: four default columns, eight tasks, five people.
    pub fn seed() -> Self {
        Board {
            name: "Project Board".to_string(),
            tasks: seed::sample_tasks(Utc::now()),
            columns: seed::default_columns(),
            lanes: Vec::new(),
            id_length: DEFAULT_ID_LENGTH,
        }
        .reprojected()
    }

    /// Build the starting board described by a config file.
    pub fn from_config(config: &BoardConfig) -> Result<Self, BoardError> {
        let mut board = if config.seed.sample_data {
            Board::seed()
        } else if config.columns.is_empty() {
            Board::new(&config.board.name, seed::default_columns(), Vec::new())?
        } else {
            Board::new(&config.board.name, config.columns.clone(), Vec::new())?
        };
        board.name = config.board.name.clone();
        board.id_length = config.ids.length.max(MIN_ID_LENGTH);
        Ok(board)
    }

    // -----------------------------------------------------------------------
    // Read access
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Columns with their current members, in column order
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn column(&self, id: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.id == id)
    }

    pub fn has_column(&self, id: &str) -> bool {
        self.column(id).is_some()
    }

    /// Tasks in the given column, in task-list order. Empty for an unknown
    /// column.
    pub fn column_tasks(&self, column_id: &str) -> Vec<&Task> {
        self.lanes
            .iter()
            .find(|l| l.column_id == column_id)
            .map(|lane| {
                lane.task_ids
                    .iter()
                    .filter_map(|id| self.task(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Everyone assigned to a task or subtask, first appearance wins
    pub fn members(&self) -> Vec<&TeamMember> {
        let mut members: IndexMap<&str, &TeamMember> = IndexMap::new();
        for task in &self.tasks {
            let subtask_assignees = task.subtasks.iter().filter_map(|s| s.assignee.as_ref());
            for m in task.assignees.iter().chain(subtask_assignees) {
                members.entry(m.id.as_str()).or_insert(m);
            }
        }
        members.into_values().collect()
    }

    /// Every document on the board with the task it is attached to
    pub fn documents(&self) -> Vec<(&Task, &Document)> {
        self.tasks
            .iter()
            .flat_map(|t| t.documents.iter().map(move |d| (t, d)))
            .collect()
    }

    /// A fresh id not used by any task or column on this board
    pub fn next_id(&self) -> String {
        loop {
            let id = generate_id(self.id_length);
            if self.task(&id).is_none() && !self.has_column(&id) {
                return id;
            }
        }
    }

    // -----------------------------------------------------------------------
    // Internal helpers for ops
    // -----------------------------------------------------------------------

    pub(crate) fn reproject(&mut self) {
        self.lanes = project(&self.columns, &self.tasks);
    }

    fn reprojected(mut self) -> Self {
        self.reproject();
        self
    }

    pub(crate) fn require_column(&self, id: &str) -> Result<(), BoardError> {
        if self.has_column(id) {
            Ok(())
        } else {
            Err(BoardError::ColumnNotFound(id.to_string()))
        }
    }

    pub(crate) fn task_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }
}

/// Trim `text` and reject it if nothing is left.
pub(crate) fn require_text<'a>(text: &'a str, what: &'static str) -> Result<&'a str, BoardError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Err(BoardError::EmptyInput { what })
    } else {
        Ok(trimmed)
    }
}
