//! Board Search
//!
//! Case-insensitive filter over task fields. Queries shorter than three
//! characters leave the current filter alone; an empty query clears it.

use std::collections::BTreeMap;

use crate::models::Task;

pub const MIN_QUERY_CHARS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchAction {
    ShowAll,
    /// Lowercased, trimmed term
    Filter(String),
    /// Too short to act on
    Keep,
}

pub fn classify_query(raw: &str) -> SearchAction {
    let term = raw.trim().to_lowercase();
    match term.chars().count() {
        0 => SearchAction::ShowAll,
        n if n < MIN_QUERY_CHARS => SearchAction::Keep,
        _ => SearchAction::Filter(term),
    }
}

/// Next active filter after applying `action`
pub fn next_filter(current: Option<String>, action: SearchAction) -> Option<String> {
    match action {
        SearchAction::ShowAll => None,
        SearchAction::Filter(term) => Some(term),
        SearchAction::Keep => current,
    }
}

/// `term` must already be lowercase
pub fn task_matches(task: &Task, term: &str) -> bool {
    let fields = [
        task.title.as_str(),
        task.description.as_str(),
        task.category.as_str(),
        task.priority.as_str(),
        task.due_date.as_str(),
    ];
    fields.iter().any(|f| f.to_lowercase().contains(term))
        || task.assigned_to.iter().any(|a| a.name.to_lowercase().contains(term))
}

/// Whether the card for `task_id` is shown under `filter`.
/// Cards missing from the search snapshot stay visible.
pub fn is_visible(filter: Option<&str>, snapshot: &BTreeMap<String, Task>, task_id: &str) -> bool {
    match (filter, snapshot.get(task_id)) {
        (Some(term), Some(task)) => task_matches(task, term),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Assignee, Stage, Subtask, SubtaskId, TaskDraft};

    fn task(id: &str, title: &str) -> Task {
        let mut task = TaskDraft {
            title: title.into(),
            description: "Polish the board".into(),
            due_date: "2025-03-01".into(),
            category: "User Story".into(),
            ..TaskDraft::default()
        }
        .into_task(Stage::ToDo, 0);
        task.id = id.into();
        task
    }

    #[test]
    fn test_classify() {
        assert_eq!(classify_query("   "), SearchAction::ShowAll);
        assert_eq!(classify_query(" ab "), SearchAction::Keep);
        assert_eq!(classify_query("äöü"), SearchAction::Filter("äöü".into()));
        assert_eq!(classify_query(" SPEC "), SearchAction::Filter("spec".into()));
    }

    #[test]
    fn test_short_query_keeps_filter() {
        let current = Some("spec".to_string());
        assert_eq!(next_filter(current.clone(), classify_query("sp")), current);
        assert_eq!(next_filter(current, classify_query("")), None);
    }

    #[test]
    fn test_matches_any_field() {
        let mut t = task("1", "Write spec");
        t.assigned_to.push(Assignee {
            id: "a".into(),
            name: "Anna Alt".into(),
            email: String::new(),
            color: String::new(),
        });
        t.subtasks.push(Subtask::new(SubtaskId(1), "Proofread"));

        for term in ["write", "polish", "user story", "medium", "2025-03", "anna"] {
            assert!(task_matches(&t, term), "{term}");
        }
        // Subtask names are not searched
        assert!(!task_matches(&t, "proof"));
        assert!(!task_matches(&t, "zebra"));
    }

    #[test]
    fn test_unknown_cards_stay_visible() {
        let mut snapshot = BTreeMap::new();
        snapshot.insert("1".to_string(), task("1", "Write spec"));

        assert!(is_visible(Some("spec"), &snapshot, "1"));
        assert!(!is_visible(Some("zebra"), &snapshot, "1"));
        assert!(is_visible(Some("zebra"), &snapshot, "2"));
        assert!(is_visible(None, &snapshot, "1"));
    }
}
