use std::ops::Range;

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Utc};
use serde::Serialize;

use crate::model::column::{Column, ColumnIcon, Lane};
use crate::model::task::{Document, Priority, Task, TeamMember};
use crate::ops::deadline::{DeadlineBucket, DeadlineStatus, format_short, local_date};
use crate::ops::search::{MatchField, SearchHit};
use crate::ops::stats::BoardStats;
use crate::util::unicode::{display_width, pad_to_width, wrap_to_width};

/// Width of the wrapped description in `show`
const DETAIL_WIDTH: usize = 72;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskJson<'a> {
    #[serde(flatten)]
    pub task: &'a Task,
    pub deadline_status: DeadlineStatus,
}

#[derive(Serialize)]
pub struct LaneJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
    pub tasks: Vec<TaskJson<'a>>,
}

#[derive(Serialize)]
pub struct ColumnJson<'a> {
    pub id: &'a str,
    pub title: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<ColumnIcon>,
    pub tasks: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHitJson<'a> {
    pub task_id: &'a str,
    pub title: &'a str,
    pub field: &'static str,
    /// Byte offsets `[start, end)` of each match
    pub spans: Vec<[usize; 2]>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentJson<'a> {
    pub task_id: &'a str,
    #[serde(flatten)]
    pub document: &'a Document,
}

/// Result of a write command: the id it created or touched
#[derive(Serialize)]
pub struct IdJson {
    pub id: String,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task, today: NaiveDate) -> TaskJson<'_> {
    TaskJson {
        task,
        deadline_status: DeadlineStatus::classify(local_date(&task.deadline), today),
    }
}

pub fn lane_to_json<'a>(lane: &'a Lane, tasks: &[&'a Task], today: NaiveDate) -> LaneJson<'a> {
    LaneJson {
        id: &lane.column_id,
        title: &lane.title,
        icon: lane.icon,
        tasks: tasks.iter().map(|t| task_to_json(t, today)).collect(),
    }
}

pub fn hit_to_json<'a>(hit: &'a SearchHit, title: &'a str) -> SearchHitJson<'a> {
    SearchHitJson {
        task_id: &hit.task_id,
        title,
        field: field_name(hit.field),
        spans: hit.spans.iter().map(|r| [r.start, r.end]).collect(),
    }
}

pub fn field_name(field: MatchField) -> &'static str {
    match field {
        MatchField::Title => "title",
        MatchField::Description => "description",
    }
}

// ---------------------------------------------------------------------------
// Human-readable formatting
// ---------------------------------------------------------------------------

/// Short deadline, with `!` appended when overdue
fn due_label(task: &Task, today: NaiveDate) -> String {
    let date = local_date(&task.deadline);
    let mut s = format_short(date);
    if DeadlineStatus::classify(date, today) == DeadlineStatus::Overdue {
        s.push('!');
    }
    s
}

/// Format a single task as a one-line summary
pub fn format_task_line(task: &Task, today: NaiveDate) -> String {
    let mut line = format!(
        "{:<7} {:<6} {} {}",
        task.id,
        task.priority.as_str(),
        pad_to_width(&due_label(task, today), 7),
        task.title
    );
    let (done, total) = task.subtask_progress();
    if total > 0 {
        line.push_str(&format!(" [{}/{}]", done, total));
    }
    for label in &task.labels {
        line.push_str(&format!(" #{}", label));
    }
    for member in &task.assignees {
        line.push_str(&format!(" @{}", member.name));
    }
    line
}

fn column_heading(title: &str, icon: Option<ColumnIcon>) -> String {
    match icon {
        Some(icon) => format!("{} {}", icon.glyph(), title),
        None => title.to_string(),
    }
}

/// A lane header followed by its tasks, indented
pub fn format_lane(lane: &Lane, tasks: &[&Task], today: NaiveDate) -> Vec<String> {
    let mut lines = vec![format!(
        "== {} ({}) ==",
        column_heading(&lane.title, lane.icon),
        tasks.len()
    )];
    if tasks.is_empty() {
        lines.push("  (empty)".to_string());
    }
    for task in tasks {
        lines.push(format!("  {}", format_task_line(task, today)));
    }
    lines
}

/// Column listing: id, heading and task count, aligned
pub fn format_columns(columns: &[Column], lanes: &[Lane]) -> Vec<String> {
    let id_w = columns.iter().map(|c| c.id.len()).max().unwrap_or(0);
    let headings: Vec<String> = columns
        .iter()
        .map(|c| column_heading(&c.title, c.icon))
        .collect();
    let title_w = headings.iter().map(|h| display_width(h)).max().unwrap_or(0);
    columns
        .iter()
        .zip(&headings)
        .map(|(col, heading)| {
            let count = lanes
                .iter()
                .find(|l| l.column_id == col.id)
                .map_or(0, |l| l.task_ids.len());
            format!(
                "{:<id_w$}  {}  {:>3}",
                col.id,
                pad_to_width(heading, title_w),
                count
            )
        })
        .collect()
}

/// Format detailed task view
pub fn format_task_detail(task: &Task, column_title: &str, today: NaiveDate) -> Vec<String> {
    let mut lines = Vec::new();
    let date = local_date(&task.deadline);

    lines.push(format!("{}  {}", task.id, task.title));
    lines.push(format!("column:    {} ({})", column_title, task.status));
    lines.push(format!("priority:  {}", task.priority.as_str()));
    lines.push(format!(
        "deadline:  {} ({})",
        format_short(date),
        DeadlineStatus::classify(date, today).label()
    ));
    lines.push(format!(
        "created:   {}",
        task.created_at.with_timezone(&Local).format("%Y-%m-%d %H:%M")
    ));

    if !task.assignees.is_empty() {
        let names: Vec<String> = task
            .assignees
            .iter()
            .map(|m| format!("{} ({})", m.name, m.id))
            .collect();
        lines.push(format!("assignees: {}", names.join(", ")));
    }
    if !task.labels.is_empty() {
        let labels: Vec<&str> = task.labels.iter().map(String::as_str).collect();
        lines.push(format!("labels:    {}", labels.join(", ")));
    }

    let wrapped = wrap_to_width(&task.description, DETAIL_WIDTH);
    if !wrapped.is_empty() {
        lines.push(String::new());
        for line in wrapped {
            lines.push(format!("  {}", line));
        }
    }

    if !task.subtasks.is_empty() {
        let (done, total) = task.subtask_progress();
        lines.push(String::new());
        lines.push(format!("subtasks ({}/{}):", done, total));
        for sub in &task.subtasks {
            let check = if sub.completed { 'x' } else { ' ' };
            let who = sub
                .assignee
                .as_ref()
                .map(|m| format!(" @{}", m.name))
                .unwrap_or_default();
            lines.push(format!("  [{}] {} {}{}", check, sub.id, sub.title, who));
        }
    }

    if !task.documents.is_empty() {
        lines.push(String::new());
        lines.push("documents:".to_string());
        for doc in &task.documents {
            lines.push(format!("  {} {} ({})", doc.id, doc.name, doc.mime_type));
        }
    }

    if !task.comments.is_empty() {
        lines.push(String::new());
        lines.push("comments:".to_string());
        for c in &task.comments {
            lines.push(format!(
                "  {} [{}] {}",
                c.created_at.with_timezone(&Local).format("%b %-d %H:%M"),
                c.author_id,
                c.text
            ));
        }
    }

    lines
}

/// Wrap each span of `text` in brackets
pub fn highlight(text: &str, spans: &[Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len() + spans.len() * 2);
    let mut pos = 0;
    for span in spans {
        out.push_str(&text[pos..span.start]);
        out.push('[');
        out.push_str(&text[span.clone()]);
        out.push(']');
        pos = span.end;
    }
    out.push_str(&text[pos..]);
    out
}

pub fn format_hit(hit: &SearchHit, task: &Task) -> String {
    let text = match hit.field {
        MatchField::Title => &task.title,
        MatchField::Description => &task.description,
    };
    format!(
        "{:<7} {:<11} {}",
        task.id,
        field_name(hit.field),
        highlight(text, &hit.spans)
    )
}

pub fn format_member_line(member: &TeamMember) -> String {
    format!(
        "{:<7} {:<16} {:<16} {}",
        member.id,
        member.name,
        member.role,
        member.email
    )
}

pub fn format_document_line(task: &Task, doc: &Document) -> String {
    format!(
        "{:<7} {:<7} {} ({}) by {} on {}",
        task.id,
        doc.id,
        doc.name,
        doc.mime_type,
        doc.uploaded_by,
        format_short(local_date(&doc.uploaded_at))
    )
}

pub fn format_stats(stats: &BoardStats) -> Vec<String> {
    let title_w = stats
        .columns
        .iter()
        .map(|c| display_width(&c.title))
        .max()
        .unwrap_or(0)
        .max(5); // "Total"
    let mut lines = Vec::new();
    for col in &stats.columns {
        lines.push(format!(" {}  {:>4}", pad_to_width(&col.title, title_w), col.tasks));
    }
    lines.push(format!(" {}  {:>4}", pad_to_width("Total", title_w), stats.total));
    lines.push(String::new());
    lines.push(format!(
        " priority  high {}  medium {}  low {}",
        stats.priorities.high, stats.priorities.medium, stats.priorities.low
    ));
    lines.push(format!(" overdue   {}", stats.overdue));
    lines.push(format!(
        " subtasks  {}/{} done",
        stats.subtasks_done, stats.subtasks_total
    ));
    lines
}

// ---------------------------------------------------------------------------
// Argument parsing
// ---------------------------------------------------------------------------

pub fn parse_priority(s: &str) -> Result<Priority, String> {
    Priority::from_name(&s.to_lowercase())
        .ok_or_else(|| format!("unknown priority '{}' (expected: low, medium, high)", s))
}

pub fn parse_bucket(s: &str) -> Result<DeadlineBucket, String> {
    DeadlineBucket::from_name(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "unknown deadline filter '{}' (expected: overdue, today, week, future)",
            s
        )
    })
}

pub fn parse_icon(s: &str) -> Result<ColumnIcon, String> {
    ColumnIcon::from_name(&s.to_lowercase()).ok_or_else(|| {
        format!(
            "unknown icon '{}' (expected: star, circle, square, triangle)",
            s
        )
    })
}

/// Parse a deadline. Dates without a time (`today`, `tomorrow`, `+3d`,
/// `2024-05-01`) land on local noon; full RFC 3339 timestamps are taken as is.
pub fn parse_deadline(s: &str, today: NaiveDate) -> Result<DateTime<Utc>, String> {
    let s = s.trim();
    let date = match s {
        "today" => Some(today),
        "tomorrow" => today.checked_add_days(Days::new(1)),
        _ => {
            if let Some(n) = s.strip_prefix('+').and_then(|r| r.strip_suffix('d')) {
                let days: u64 = n
                    .parse()
                    .map_err(|_| format!("invalid day offset '{}'", s))?;
                today.checked_add_days(Days::new(days))
            } else if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
                Some(date)
            } else {
                let ts = DateTime::parse_from_rfc3339(s).map_err(|_| {
                    format!(
                        "invalid deadline '{}' (expected: today, tomorrow, +Nd, YYYY-MM-DD or RFC 3339)",
                        s
                    )
                })?;
                return Ok(ts.with_timezone(&Utc));
            }
        }
    };
    date.and_then(|d| d.and_hms_opt(12, 0, 0))
        .and_then(|dt| Local.from_local_datetime(&dt).earliest())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| format!("deadline out of range: '{}'", s))
}

/// MIME type from a file name's extension
pub fn guess_mime_type(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "md" => "text/markdown",
        "csv" => "text/csv",
        "json" => "application/json",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}
