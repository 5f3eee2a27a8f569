use std::ops::Range;

use regex::{Regex, RegexBuilder};

use crate::model::board::Board;
use crate::model::task::Task;

/// Which field of a task matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Title,
    Description,
}

/// A search hit for a task field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub task_id: String,
    pub field: MatchField,
    /// Byte ranges of each match within the field
    pub spans: Vec<Range<usize>>,
}

/// Case-insensitive substring test used by `search_tasks`.
///
/// The term is matched as typed (surrounding whitespace included); a blank
/// term yields no matcher.
struct TermMatcher {
    needle: String,
}

impl TermMatcher {
    fn new(term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(TermMatcher {
            needle: term.to_lowercase(),
        })
    }

    fn matches(&self, task: &Task) -> bool {
        task.title.to_lowercase().contains(&self.needle)
            || task.description.to_lowercase().contains(&self.needle)
    }
}

/// Tasks whose title or description contains `term`, ignoring case.
///
/// A blank term returns every task in list order.
pub fn search_tasks<'a>(tasks: &'a [Task], term: &str) -> Vec<&'a Task> {
    match TermMatcher::new(term) {
        Some(matcher) => tasks.iter().filter(|t| matcher.matches(t)).collect(),
        None => tasks.iter().collect(),
    }
}

/// Literal, case-insensitive regex for a search term
fn term_regex(term: &str) -> Option<Regex> {
    if term.trim().is_empty() {
        return None;
    }
    RegexBuilder::new(&regex::escape(term))
        .case_insensitive(true)
        .build()
        .ok()
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Match positions of `term` in each task's title and description, for
/// highlighting. Empty for a blank term.
pub fn search_hits(tasks: &[Task], term: &str) -> Vec<SearchHit> {
    let Some(re) = term_regex(term) else {
        return Vec::new();
    };
    let mut hits = Vec::new();
    for task in tasks {
        for (field, text) in [
            (MatchField::Title, &task.title),
            (MatchField::Description, &task.description),
        ] {
            let spans = find_matches(&re, text);
            if !spans.is_empty() {
                hits.push(SearchHit {
                    task_id: task.id.clone(),
                    field,
                    spans,
                });
            }
        }
    }
    hits
}

impl Board {
    pub fn search_tasks(&self, term: &str) -> Vec<&Task> {
        search_tasks(&self.tasks, term)
    }
}
