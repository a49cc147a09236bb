//! Subtask Checklist
//!
//! Editing state for the subtasks of one task. Items are addressed by a
//! `SubtaskId` handed out when the checklist is opened, so removing an item
//! never shifts the identity of the others.

use crate::models::{Subtask, SubtaskId};

/// Longest subtask name kept; longer input is cut
pub const MAX_SUBTASK_CHARS: usize = 40;

/// Number the subtasks of a freshly loaded task from 1
pub fn assign_ids(subtasks: &mut [Subtask]) {
    for (i, subtask) in subtasks.iter_mut().enumerate() {
        subtask.id = SubtaskId(i as u32 + 1);
    }
}

fn clean_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(MAX_SUBTASK_CHARS).collect())
}

/// Completed vs. total
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    pub fn of(subtasks: &[Subtask]) -> Self {
        Self {
            done: subtasks.iter().filter(|s| s.completed).count(),
            total: subtasks.len(),
        }
    }

    pub fn percent(self) -> f64 {
        if self.total == 0 { 0.0 } else { self.done as f64 * 100.0 / self.total as f64 }
    }

    pub fn is_complete(self) -> bool {
        self.total > 0 && self.done == self.total
    }

    /// `2/3 Subtasks`
    pub fn label(self) -> String {
        format!("{}/{} Subtasks", self.done, self.total)
    }

    /// CSS class of the card label
    pub fn state_class(self) -> &'static str {
        if self.is_complete() { "all-done" } else { "not-done" }
    }
}

/// Result of committing an inline rename
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenameOutcome {
    Renamed,
    /// Blank names delete the item
    Removed,
    Missing,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubtaskList {
    items: Vec<Subtask>,
    next_id: u32,
}

impl SubtaskList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take over subtasks whose ids were assigned on load
    pub fn from_subtasks(mut items: Vec<Subtask>) -> Self {
        if items.iter().any(|s| s.id == SubtaskId::default()) {
            assign_ids(&mut items);
        }
        let next_id = items.iter().map(|s| s.id.0).max().unwrap_or(0);
        Self { items, next_id }
    }

    pub fn items(&self) -> &[Subtask] {
        &self.items
    }

    pub fn to_vec(&self) -> Vec<Subtask> {
        self.items.clone()
    }

    pub fn get(&self, id: SubtaskId) -> Option<&Subtask> {
        self.items.iter().find(|s| s.id == id)
    }

    pub fn progress(&self) -> Progress {
        Progress::of(&self.items)
    }

    /// Append a trimmed, length-capped item. Blank input adds nothing.
    pub fn add(&mut self, raw: &str) -> Option<SubtaskId> {
        let name = clean_name(raw)?;
        self.next_id += 1;
        let id = SubtaskId(self.next_id);
        self.items.push(Subtask::new(id, name));
        Some(id)
    }

    /// Flip completion; returns false for unknown ids
    pub fn toggle(&mut self, id: SubtaskId) -> bool {
        match self.items.iter_mut().find(|s| s.id == id) {
            Some(subtask) => {
                subtask.completed = !subtask.completed;
                true
            }
            None => false,
        }
    }

    pub fn rename(&mut self, id: SubtaskId, raw: &str) -> RenameOutcome {
        let Some(position) = self.items.iter().position(|s| s.id == id) else {
            return RenameOutcome::Missing;
        };
        match clean_name(raw) {
            Some(name) => {
                self.items[position].name = name;
                RenameOutcome::Renamed
            }
            None => {
                self.items.remove(position);
                RenameOutcome::Removed
            }
        }
    }

    pub fn remove(&mut self, id: SubtaskId) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s.id != id);
        self.items.len() != before
    }
}
