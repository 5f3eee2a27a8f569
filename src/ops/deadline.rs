//! Deadline classification against the local calendar date.

use chrono::{DateTime, Days, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Coarse deadline grouping used by the deadline filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineBucket {
    Overdue,
    Today,
    Week,
    Future,
}

impl DeadlineBucket {
    /// Classify a deadline date relative to `today`.
    ///
    /// `Today` covers today *and* tomorrow: the upper bound is inclusive of
    /// the next day.
    pub fn classify(deadline: NaiveDate, today: NaiveDate) -> DeadlineBucket {
        if deadline < today {
            return DeadlineBucket::Overdue;
        }
        if deadline <= today + Days::new(1) {
            return DeadlineBucket::Today;
        }
        if deadline <= today + Days::new(7) {
            return DeadlineBucket::Week;
        }
        DeadlineBucket::Future
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DeadlineBucket::Overdue => "overdue",
            DeadlineBucket::Today => "today",
            DeadlineBucket::Week => "week",
            DeadlineBucket::Future => "future",
        }
    }

    pub fn from_name(s: &str) -> Option<DeadlineBucket> {
        match s {
            "overdue" => Some(DeadlineBucket::Overdue),
            "today" => Some(DeadlineBucket::Today),
            "week" => Some(DeadlineBucket::Week),
            "future" => Some(DeadlineBucket::Future),
            _ => None,
        }
    }
}

/// Display status of a deadline: overdue, due within two days, or later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineStatus {
    Overdue,
    Upcoming,
    Future,
}

impl DeadlineStatus {
    pub fn classify(deadline: NaiveDate, today: NaiveDate) -> DeadlineStatus {
        if deadline < today {
            DeadlineStatus::Overdue
        } else if deadline <= today + Days::new(2) {
            DeadlineStatus::Upcoming
        } else {
            DeadlineStatus::Future
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DeadlineStatus::Overdue => "Overdue",
            DeadlineStatus::Upcoming => "Upcoming",
            DeadlineStatus::Future => "Future",
        }
    }
}

/// The calendar date of a timestamp in local time
pub fn local_date(ts: &DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&Local).date_naive()
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Short month-day form, e.g. `Jan 9`
pub fn format_short(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}
