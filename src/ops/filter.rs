use chrono::NaiveDate;

use crate::model::board::Board;
use crate::model::task::{Priority, Task};
use crate::ops::deadline::{DeadlineBucket, local_date, today};

/// Criteria for narrowing the task list. Every unset field matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Column id
    pub status: Option<String>,
    pub priority: Option<Priority>,
    pub deadline: Option<DeadlineBucket>,
}

impl TaskFilter {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.priority.is_none() && self.deadline.is_none()
    }

    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        if let Some(status) = &self.status
            && task.status != *status
        {
            return false;
        }
        if let Some(priority) = self.priority
            && task.priority != priority
        {
            return false;
        }
        if let Some(bucket) = self.deadline
            && DeadlineBucket::classify(local_date(&task.deadline), today) != bucket
        {
            return false;
        }
        true
    }
}

/// Tasks matching all of the filter's criteria, in list order.
pub fn filter_tasks<'a>(tasks: &'a [Task], filter: &TaskFilter, today: NaiveDate) -> Vec<&'a Task> {
    tasks.iter().filter(|t| filter.matches(t, today)).collect()
}

impl Board {
    /// Filter the board's tasks against today's local date
    pub fn filter_tasks(&self, filter: &TaskFilter) -> Vec<&Task> {
        filter_tasks(&self.tasks, filter, today())
    }
}
