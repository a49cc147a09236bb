//! Global Application State Store
//!
//! Uses Leptos reactive_stores for fine-grained reactivity.

use std::collections::BTreeMap;

use leptos::prelude::*;
use reactive_stores::Store;

use crate::models::{Person, Stage, Subtask, Task};

/// Global application state with field-level reactivity
#[derive(Clone, Debug, Default, Store)]
pub struct AppState {
    /// Tasks shown on the board, in key order
    pub tasks: Vec<Task>,
    /// Tasks as of the last search load, keyed by id
    pub search_index: BTreeMap<String, Task>,
    /// Accounts followed by contacts
    pub people: Vec<Person>,
}

/// Type alias for the store
pub type AppStore = Store<AppState>;

/// Get the app store from context
pub fn use_app_store() -> AppStore {
    expect_context::<AppStore>()
}

// ========================
// Store Helper Functions
// ========================

/// Replace the board tasks and refresh the search snapshot
pub fn store_set_tasks(store: &AppStore, tasks: Vec<Task>) {
    *store.search_index().write() = tasks.iter().map(|t| (t.id.clone(), t.clone())).collect();
    *store.tasks().write() = tasks;
}

pub fn store_set_search_index(store: &AppStore, index: BTreeMap<String, Task>) {
    *store.search_index().write() = index;
}

pub fn store_set_people(store: &AppStore, people: Vec<Person>) {
    *store.people().write() = people;
}

/// Task by id (untracked)
pub fn store_task(store: &AppStore, task_id: &str) -> Option<Task> {
    store.tasks().with_untracked(|tasks| tasks.iter().find(|t| t.id == task_id).cloned())
}

/// Add a new task to the board
pub fn store_add_task(store: &AppStore, task: Task) {
    store.search_index().write().insert(task.id.clone(), task.clone());
    store.tasks().write().push(task);
}

/// Update a task in the store by ID
pub fn store_update_task(store: &AppStore, updated: Task) {
    store.search_index().write().insert(updated.id.clone(), updated.clone());
    store.tasks().write().iter_mut()
        .find(|task| task.id == updated.id)
        .map(|task| *task = updated);
}

/// Move a task locally. Returns the stage it had before.
pub fn store_set_stage(store: &AppStore, task_id: &str, stage: Stage) -> Option<Stage> {
    let previous = store.tasks().write().iter_mut()
        .find(|task| task.id == task_id)
        .map(|task| std::mem::replace(&mut task.stage, stage));
    if let Some(task) = store.search_index().write().get_mut(task_id) {
        task.stage = stage;
    }
    previous
}

/// Result of a local board move
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LocalMove {
    /// Stage changed; holds the stage it had before
    Moved(Stage),
    /// Already in the target stage
    Unchanged,
    Missing,
}

/// Move a task locally unless it already sits in `stage`
pub fn store_move_task(store: &AppStore, task_id: &str, stage: Stage) -> LocalMove {
    match store_task(store, task_id).map(|t| t.stage) {
        None => LocalMove::Missing,
        Some(current) if current == stage => LocalMove::Unchanged,
        Some(_) => match store_set_stage(store, task_id, stage) {
            Some(previous) => LocalMove::Moved(previous),
            None => LocalMove::Missing,
        },
    }
}

/// Replace the subtask list of a task
pub fn store_set_subtasks(store: &AppStore, task_id: &str, subtasks: Vec<Subtask>) {
    if let Some(task) = store.search_index().write().get_mut(task_id) {
        task.subtasks = subtasks.clone();
    }
    store.tasks().write().iter_mut()
        .find(|task| task.id == task_id)
        .map(|task| task.subtasks = subtasks);
}

/// Remove a task from the store by ID
pub fn store_remove_task(store: &AppStore, task_id: &str) {
    store.search_index().write().remove(task_id);
    store.tasks().write().retain(|task| task.id != task_id);
}

/// Insert or replace a person by ID
pub fn store_upsert_person(store: &AppStore, person: Person) {
    let field = store.people();
    let mut people = field.write();
    match people.iter_mut().find(|p| p.id() == person.id()) {
        Some(existing) => *existing = person,
        None => people.push(person),
    }
}

pub fn store_remove_person(store: &AppStore, person_id: &str) {
    store.people().write().retain(|p| p.id() != person_id);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PersonInfo, SubtaskId, TaskDraft};

    fn task(id: &str, stage: Stage) -> Task {
        let mut task = TaskDraft { title: id.into(), ..TaskDraft::default() }.into_task(stage, 0);
        task.id = id.into();
        task
    }

    fn contact(id: &str, name: &str) -> Person {
        Person::Contact(PersonInfo {
            id: id.into(),
            name: name.into(),
            email: String::new(),
            phone: String::new(),
            color: "#FF7A00".into(),
        })
    }

    #[test]
    fn test_move_updates_board_and_search_index() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());
        store_set_tasks(&store, vec![task("a", Stage::ToDo), task("b", Stage::Done)]);

        assert_eq!(store_move_task(&store, "a", Stage::AwaitFeedback), LocalMove::Moved(Stage::ToDo));
        assert_eq!(store_task(&store, "a").map(|t| t.stage), Some(Stage::AwaitFeedback));
        let indexed = store.search_index().with_untracked(|index| index.get("a").map(|t| t.stage));
        assert_eq!(indexed, Some(Stage::AwaitFeedback));

        // Dropping back onto the same column is a no-op
        assert_eq!(store_move_task(&store, "b", Stage::Done), LocalMove::Unchanged);
        assert_eq!(store_move_task(&store, "zzz", Stage::Done), LocalMove::Missing);
    }

    #[test]
    fn test_upsert_and_remove_person() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());

        store_upsert_person(&store, contact("c1", "Carl"));
        store_upsert_person(&store, contact("c1", "Carl Cox"));
        store_upsert_person(&store, contact("c2", "Dora"));
        let names: Vec<String> = store.people().with_untracked(|people| people.iter().map(|p| p.info().name.clone()).collect());
        assert_eq!(names, vec!["Carl Cox", "Dora"]);

        store_remove_person(&store, "c1");
        assert_eq!(store.people().with_untracked(|people| people.len()), 1);
    }

    #[test]
    fn test_subtasks_replace_in_both_views() {
        let owner = Owner::new();
        owner.set();
        let store = Store::new(AppState::default());
        store_set_tasks(&store, vec![task("a", Stage::ToDo)]);

        store_set_subtasks(&store, "a", vec![Subtask::new(SubtaskId(1), "one")]);
        assert_eq!(store_task(&store, "a").map(|t| t.subtasks.len()), Some(1));
        let indexed = store.search_index().with_untracked(|index| index["a"].subtasks.len());
        assert_eq!(indexed, 1);
    }
}
