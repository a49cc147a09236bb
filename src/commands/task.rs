//! Task Commands
//!
//! Reads and writes under `tasks/`.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Value};

use crate::remote::{doc_path, encode, DocumentStore, StoreError};
use crate::error::AppError;
use crate::models::{decode_collection, Assignee, Priority, Stage, Subtask, Task, TaskDraft};
use crate::subtasks::assign_ids;
use crate::validation::validate_task_draft;

pub const TASKS: &str = "tasks";

// ========================
// Argument Structs
// ========================

/// Fields written when an edited task is saved
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaskPatch<'a> {
    title: &'a str,
    description: &'a str,
    due_date: &'a str,
    priority: Priority,
    category: &'a str,
    assigned_to: &'a [Assignee],
    subtasks: &'a [Subtask],
}

impl<'a> From<&'a TaskDraft> for TaskPatch<'a> {
    fn from(draft: &'a TaskDraft) -> Self {
        Self {
            title: draft.title.trim(),
            description: draft.description.trim(),
            due_date: draft.due_date.trim(),
            priority: draft.priority,
            category: &draft.category,
            assigned_to: &draft.assigned_to,
            subtasks: &draft.subtasks,
        }
    }
}

// ========================
// Decoding
// ========================

/// Decode the `tasks` collection. Documents without a valid stage are left out.
pub fn decode_tasks(value: Value) -> BTreeMap<String, Task> {
    let mut tasks: BTreeMap<String, Task> = decode_collection(value);
    for (id, task) in tasks.iter_mut() {
        task.id = id.clone();
        assign_ids(&mut task.subtasks);
    }
    tasks
}

// ========================
// Commands
// ========================

/// All tasks keyed by id, in key order
pub async fn load_task_index<S: DocumentStore + ?Sized>(store: &S) -> Result<BTreeMap<String, Task>, AppError> {
    let value = store.get(TASKS).await?;
    Ok(decode_tasks(value))
}

pub async fn list_tasks<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Task>, AppError> {
    Ok(load_task_index(store).await?.into_values().collect())
}

pub async fn get_task<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<Task, AppError> {
    let path = doc_path(TASKS, id);
    let value = store.get(&path).await?;
    if value.is_null() {
        return Err(AppError::NotFound { what: "task", id: id.to_string() });
    }
    let mut task: Task = serde_json::from_value(value).map_err(|source| StoreError::Decode { path, source })?;
    task.id = id.to_string();
    assign_ids(&mut task.subtasks);
    Ok(task)
}

/// Validate the draft and append it to `tasks/`
pub async fn create_task<S: DocumentStore + ?Sized>(
    store: &S,
    draft: TaskDraft,
    stage: Stage,
    task_index: i64,
) -> Result<Task, AppError> {
    validate_task_draft(&draft)?;
    let mut task = draft.into_task(stage, task_index);
    let body = encode(TASKS, &task)?;
    task.id = store.post(TASKS, &body).await?;
    log::info!("created task {} in {}", task.id, stage.label());
    Ok(task)
}

/// Re-read the task, set its stage and write the whole document back
pub async fn move_task<S: DocumentStore + ?Sized>(store: &S, id: &str, stage: Stage) -> Result<Task, AppError> {
    let mut task = get_task(store, id).await?;
    task.stage = stage;
    let path = doc_path(TASKS, id);
    let body = encode(&path, &task)?;
    store.put(&path, &body).await?;
    log::info!("moved task {} to {}", id, stage.label());
    Ok(task)
}

/// Save an edited task; completion state of subtasks is kept
pub async fn update_task<S: DocumentStore + ?Sized>(store: &S, id: &str, draft: &TaskDraft) -> Result<(), AppError> {
    validate_task_draft(draft)?;
    let path = doc_path(TASKS, id);
    let body = encode(&path, &TaskPatch::from(draft))?;
    store.patch(&path, &body).await?;
    Ok(())
}

/// Overwrite only the subtask list of a task
pub async fn save_subtasks<S: DocumentStore + ?Sized>(store: &S, id: &str, subtasks: &[Subtask]) -> Result<(), AppError> {
    let path = doc_path(TASKS, id);
    let subtasks = encode(&path, &subtasks)?;
    store.patch(&path, &json!({ "subtasks": subtasks })).await?;
    Ok(())
}

pub async fn delete_task<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<(), AppError> {
    store.delete(&doc_path(TASKS, id)).await?;
    log::info!("deleted task {}", id);
    Ok(())
}
