use crate::model::column::{Column, Lane};
use crate::model::task::Task;

/// Group tasks into lanes by matching `task.status` against column ids.
///
/// Lanes follow column order; tasks inside a lane keep task-list order.
/// Tasks whose status names no column appear in no lane.
pub fn project(columns: &[Column], tasks: &[Task]) -> Vec<Lane> {
    columns
        .iter()
        .map(|column| Lane {
            column_id: column.id.clone(),
            title: column.title.clone(),
            icon: column.icon,
            task_ids: tasks
                .iter()
                .filter(|t| t.status == column.id)
                .map(|t| t.id.clone())
                .collect(),
        })
        .collect()
}
