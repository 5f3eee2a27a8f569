use chrono::NaiveDate;
use serde::Serialize;

use crate::model::board::Board;
use crate::model::task::Priority;
use crate::ops::deadline::{DeadlineBucket, local_date, today};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnCount {
    pub id: String,
    pub title: String,
    pub tasks: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PriorityCounts {
    pub low: usize,
    pub medium: usize,
    pub high: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardStats {
    pub total: usize,
    pub columns: Vec<ColumnCount>,
    pub priorities: PriorityCounts,
    pub overdue: usize,
    pub subtasks_done: usize,
    pub subtasks_total: usize,
}

/// Counts per column and priority, overdue tasks, and subtask progress.
pub fn board_stats(board: &Board, today: NaiveDate) -> BoardStats {
    let mut priorities = PriorityCounts::default();
    let mut overdue = 0;
    let mut subtasks_done = 0;
    let mut subtasks_total = 0;

    for task in board.tasks() {
        match task.priority {
            Priority::Low => priorities.low += 1,
            Priority::Medium => priorities.medium += 1,
            Priority::High => priorities.high += 1,
        }
        if DeadlineBucket::classify(local_date(&task.deadline), today) == DeadlineBucket::Overdue {
            overdue += 1;
        }
        let (done, total) = task.subtask_progress();
        subtasks_done += done;
        subtasks_total += total;
    }

    BoardStats {
        total: board.tasks().len(),
        columns: board
            .lanes()
            .iter()
            .map(|lane| ColumnCount {
                id: lane.column_id.clone(),
                title: lane.title.clone(),
                tasks: lane.task_ids.len(),
            })
            .collect(),
        priorities,
        overdue,
        subtasks_done,
        subtasks_total,
    }
}

impl Board {
    pub fn stats(&self) -> BoardStats {
        board_stats(self, today())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_stats() {
        let board = Board::seed();
        let stats = board.stats();
        assert_eq!(stats.total, 8);
        let counts: Vec<usize> = stats.columns.iter().map(|c| c.tasks).collect();
        assert_eq!(counts, vec![0, 6, 1, 1]);
        assert_eq!(
            stats.priorities,
            PriorityCounts {
                low: 2,
                medium: 3,
                high: 3
            }
        );
        assert_eq!(stats.overdue, 2);
        assert_eq!((stats.subtasks_done, stats.subtasks_total), (1, 2));
    }

    #[test]
    fn test_stats_follow_mutations() {
        let mut board = Board::seed();
        board.delete_task("2");
        board.move_task("5", "col-1").unwrap();
        let stats = board.stats();
        assert_eq!(stats.total, 7);
        assert_eq!(stats.columns[0].tasks, 1);
        assert_eq!(stats.columns[3].tasks, 0);
        assert_eq!(stats.overdue, 1);
    }
}
