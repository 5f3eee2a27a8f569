use std::collections::HashSet;

use chrono::Utc;
use tracing::{debug, info};

use crate::model::board::{Board, BoardError, require_text};
use crate::model::task::{Comment, Document, NewTask, SubTask, Task, TeamMember};

impl Board {
    // -----------------------------------------------------------------------
    // Task CRUD
    // -----------------------------------------------------------------------

    /// Create a task and append it to the task list. Returns the new id.
    pub fn create_task(&mut self, new: NewTask) -> Result<String, BoardError> {
        let title = require_text(&new.title, "task title")?.to_string();
        self.require_column(&new.status)?;
        check_assignees(&new.assignees)?;

        let id = self.next_id();
        let task = Task {
            id: id.clone(),
            title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            deadline: new.deadline,
            created_at: Utc::now(),
            assignees: new.assignees,
            documents: new.documents,
            comments: new.comments,
            labels: new.labels.into_iter().collect(),
            subtasks: new.subtasks,
        };
        info!(task = %id, column = %task.status, "created task");
        self.tasks.push(task);
        self.reproject();
        Ok(id)
    }

    /// Upsert: replace the task with the same id in place, or append it.
    ///
    /// Everything but the creation time is overwritten; callers pass the
    /// complete object.
    pub fn update_task(&mut self, mut task: Task) -> Result<(), BoardError> {
        require_text(&task.id, "task id")?;
        task.title = require_text(&task.title, "task title")?.to_string();
        self.require_column(&task.status)?;
        check_assignees(&task.assignees)?;

        match self.task_mut(&task.id) {
            Some(slot) => {
                debug!(task = %task.id, "replaced task");
                // Creation time is fixed once the task exists
                task.created_at = slot.created_at;
                *slot = task;
            }
            None => {
                info!(task = %task.id, "inserted task via update");
                self.tasks.push(task);
            }
        }
        self.reproject();
        Ok(())
    }

    /// Remove a task. Returns false if there was no such task.
    pub fn delete_task(&mut self, id: &str) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            debug!(task = id, "delete: task not found");
            return false;
        }
        info!(task = id, "deleted task");
        self.reproject();
        true
    }

    /// Put a task in another column.
    ///
    /// The target column must exist. A missing task is a no-op.
    pub fn move_task(&mut self, task_id: &str, column_id: &str) -> Result<bool, BoardError> {
        self.require_column(column_id)?;
        let moved = self.edit_task(task_id, "move", |task| {
            let from = std::mem::replace(&mut task.status, column_id.to_string());
            info!(task = task_id, %from, to = column_id, "moved task");
        });
        Ok(moved.is_some())
    }

    // -----------------------------------------------------------------------
    // Comments and labels
    // -----------------------------------------------------------------------

    /// Append a comment. Returns the comment id, or None if the task is
    /// missing.
    pub fn add_comment(
        &mut self,
        task_id: &str,
        author_id: &str,
        text: &str,
    ) -> Result<Option<String>, BoardError> {
        let text = require_text(text, "comment")?;
        let id = self.next_id();
        Ok(self.edit_task(task_id, "add_comment", move |task| {
            task.comments.push(Comment {
                id: id.clone(),
                task_id: task.id.clone(),
                author_id: author_id.to_string(),
                text: text.to_string(),
                created_at: Utc::now(),
            });
            id
        }))
    }

    /// Add a label. Returns false if the label was already there or the task
    /// is missing.
    pub fn add_label(&mut self, task_id: &str, label: &str) -> Result<bool, BoardError> {
        let label = require_text(label, "label")?;
        Ok(self
            .edit_task(task_id, "add_label", |task| task.labels.insert(label.to_string()))
            .unwrap_or(false))
    }

    pub fn remove_label(&mut self, task_id: &str, label: &str) -> bool {
        self.edit_task(task_id, "remove_label", |task| task.labels.shift_remove(label))
            .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Assignees and documents
    // -----------------------------------------------------------------------

    /// Assign someone by name, creating the team member on the spot.
    ///
    /// Names are compared case-insensitively; a second "alice" is rejected.
    /// Returns the new member id, or None if the task is missing.
    pub fn add_assignee(
        &mut self,
        task_id: &str,
        name: &str,
    ) -> Result<Option<String>, BoardError> {
        let name = require_text(name, "assignee name")?;
        let id = self.next_id();
        self.edit_task(task_id, "add_assignee", move |task| {
            if task.has_assignee_named(name) {
                return Err(BoardError::DuplicateAssignee(name.to_string()));
            }
            task.assignees.push(TeamMember::ad_hoc(id.clone(), name));
            Ok(id)
        })
        .transpose()
    }

    pub fn remove_assignee(&mut self, task_id: &str, member_id: &str) -> bool {
        self.edit_task(task_id, "remove_assignee", |task| {
            let before = task.assignees.len();
            task.assignees.retain(|a| a.id != member_id);
            task.assignees.len() != before
        })
        .unwrap_or(false)
    }

    /// Attach a document as-is.
    pub fn attach_document(&mut self, task_id: &str, document: Document) -> bool {
        self.edit_task(task_id, "attach_document", |task| task.documents.push(document))
            .is_some()
    }

    pub fn remove_document(&mut self, task_id: &str, document_id: &str) -> bool {
        self.edit_task(task_id, "remove_document", |task| {
            let before = task.documents.len();
            task.documents.retain(|d| d.id != document_id);
            task.documents.len() != before
        })
        .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Subtasks
    // -----------------------------------------------------------------------

    /// Append an open subtask. Returns its id, or None if the task is
    /// missing.
    pub fn add_subtask(
        &mut self,
        task_id: &str,
        title: &str,
        assignee: Option<TeamMember>,
    ) -> Result<Option<String>, BoardError> {
        let title = require_text(title, "subtask title")?;
        let id = self.next_id();
        Ok(self.edit_task(task_id, "add_subtask", move |task| {
            task.subtasks.push(SubTask {
                id: id.clone(),
                title: title.to_string(),
                completed: false,
                created_at: Utc::now(),
                assignee,
            });
            id
        }))
    }

    /// Flip a subtask's completed flag. Returns false if either id is
    /// unknown.
    pub fn toggle_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.edit_task(task_id, "toggle_subtask", |task| {
            match task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                Some(sub) => {
                    sub.completed = !sub.completed;
                    true
                }
                None => false,
            }
        })
        .unwrap_or(false)
    }

    pub fn delete_subtask(&mut self, task_id: &str, subtask_id: &str) -> bool {
        self.edit_task(task_id, "delete_subtask", |task| {
            let before = task.subtasks.len();
            task.subtasks.retain(|s| s.id != subtask_id);
            task.subtasks.len() != before
        })
        .unwrap_or(false)
    }

    pub fn assign_subtask(&mut self, task_id: &str, subtask_id: &str, assignee: TeamMember) -> bool {
        self.edit_task(task_id, "assign_subtask", move |task| {
            match task.subtasks.iter_mut().find(|s| s.id == subtask_id) {
                Some(sub) => {
                    sub.assignee = Some(assignee);
                    true
                }
                None => false,
            }
        })
        .unwrap_or(false)
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    /// Apply `f` to the task with `task_id` and re-project. A missing task
    /// is logged and skipped.
    fn edit_task<R>(
        &mut self,
        task_id: &str,
        op: &'static str,
        f: impl FnOnce(&mut Task) -> R,
    ) -> Option<R> {
        let Some(task) = self.task_mut(task_id) else {
            debug!(task = task_id, op, "task not found; ignoring");
            return None;
        };
        let result = f(task);
        self.reproject();
        Some(result)
    }
}

/// No two assignees on one task may share a name, ignoring case.
fn check_assignees(assignees: &[TeamMember]) -> Result<(), BoardError> {
    let mut seen = HashSet::new();
    for member in assignees {
        if !seen.insert(member.name.to_lowercase()) {
            return Err(BoardError::DuplicateAssignee(member.name.clone()));
        }
    }
    Ok(())
}
