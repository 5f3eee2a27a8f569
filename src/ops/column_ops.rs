use tracing::{debug, info};

use crate::model::board::{Board, BoardError, require_text};
use crate::model::column::{Column, ColumnIcon};

impl Board {
    /// Append an empty column. Returns the new column id.
    pub fn add_column(
        &mut self,
        title: &str,
        icon: Option<ColumnIcon>,
    ) -> Result<String, BoardError> {
        let title = require_text(title, "column title")?;
        let id = self.next_id();
        self.columns.push(Column {
            id: id.clone(),
            title: title.to_string(),
            icon,
        });
        info!(column = %id, title, "added column");
        self.reproject();
        Ok(id)
    }

    /// Delete a column and move its tasks to the first remaining column.
    ///
    /// Refused while only one column is left. Returns false if the column
    /// does not exist.
    pub fn delete_column(&mut self, id: &str) -> Result<bool, BoardError> {
        if self.columns.len() <= 1 {
            return Err(BoardError::LastColumn);
        }
        let Some(idx) = self.columns.iter().position(|c| c.id == id) else {
            debug!(column = id, "delete: column not found");
            return Ok(false);
        };
        let removed = self.columns.remove(idx);
        let fallback = self.columns[0].id.clone();

        let mut reassigned = 0usize;
        for task in self.tasks.iter_mut().filter(|t| t.status == removed.id) {
            task.status = fallback.clone();
            reassigned += 1;
        }
        info!(column = id, title = %removed.title, %fallback, reassigned, "deleted column");
        self.reproject();
        Ok(true)
    }

    /// Change a column's title and icon. `None` clears the icon.
    pub fn rename_column(
        &mut self,
        id: &str,
        title: &str,
        icon: Option<ColumnIcon>,
    ) -> Result<bool, BoardError> {
        let title = require_text(title, "column title")?;
        let Some(column) = self.columns.iter_mut().find(|c| c.id == id) else {
            debug!(column = id, "rename: column not found");
            return Ok(false);
        };
        column.title = title.to_string();
        column.icon = icon;
        info!(column = id, title, "renamed column");
        self.reproject();
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{NewTask, Priority};
    use chrono::Utc;

    fn ids(board: &Board) -> Vec<&str> {
        board.columns().iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_add_column() {
        let mut board = Board::seed();
        let id = board.add_column(" Blocked ", Some(ColumnIcon::Square)).unwrap();
        let col = board.column(&id).unwrap();
        assert_eq!(col.title, "Blocked");
        assert_eq!(col.icon, Some(ColumnIcon::Square));
        assert_eq!(board.lanes().last().unwrap().column_id, id);
        assert!(board.column_tasks(&id).is_empty());
    }

    #[test]
    fn test_add_column_rejects_blank() {
        let mut board = Board::seed();
        assert_eq!(
            board.add_column("   ", None),
            Err(BoardError::EmptyInput {
                what: "column title"
            })
        );
        assert_eq!(board.columns().len(), 4);
    }

    #[test]
    fn test_delete_column_reassigns_to_first_remaining() {
        let mut board = Board::seed();
        assert!(board.delete_column("col-2").unwrap());
        assert_eq!(ids(&board), vec!["col-1", "col-3", "col-4"]);
        assert_eq!(board.task("1").unwrap().status, "col-1");
        assert_eq!(board.column_tasks("col-1").len(), 6);
        assert!(
            board
                .tasks()
                .iter()
                .all(|t| board.has_column(&t.status))
        );
    }

    #[test]
    fn test_delete_first_column_falls_back_to_next() {
        let mut board = Board::seed();
        board
            .create_task(NewTask::new("new", "col-1", Priority::Low, Utc::now()))
            .unwrap();
        board.delete_column("col-1").unwrap();
        assert_eq!(board.column_tasks("col-2").len(), 7);
    }

    #[test]
    fn test_delete_last_column_refused() {
        let mut board = Board::seed();
        board.delete_column("col-1").unwrap();
        board.delete_column("col-2").unwrap();
        board.delete_column("col-3").unwrap();
        assert_eq!(ids(&board), vec!["col-4"]);

        assert_eq!(board.delete_column("col-4"), Err(BoardError::LastColumn));
        assert_eq!(board.delete_column("elsewhere"), Err(BoardError::LastColumn));
        assert_eq!(ids(&board), vec!["col-4"]);
        assert_eq!(board.column_tasks("col-4").len(), 8);
    }

    #[test]
    fn test_delete_missing_column_is_noop() {
        let mut board = Board::seed();
        assert!(!board.delete_column("col-9").unwrap());
        assert_eq!(board.columns().len(), 4);
    }

    #[test]
    fn test_rename_column() {
        let mut board = Board::seed();
        assert!(
            board
                .rename_column("col-3", "QA", Some(ColumnIcon::Triangle))
                .unwrap()
        );
        assert_eq!(board.column("col-3").unwrap().title, "QA");
        assert_eq!(board.lanes()[2].title, "QA");
        assert_eq!(board.lanes()[2].icon, Some(ColumnIcon::Triangle));

        board.rename_column("col-3", "QA", None).unwrap();
        assert_eq!(board.column("col-3").unwrap().icon, None);
    }

    #[test]
    fn test_rename_missing_column() {
        let mut board = Board::seed();
        assert!(!board.rename_column("col-9", "x", None).unwrap());
        assert!(board.rename_column("col-1", "", None).is_err());
        assert_eq!(board.column("col-1").unwrap().title, "To Do");
    }
}
