//! Board Actions
//!
//! Optimistic writes started from the UI: the store changes first, the
//! remote write follows, and a failure restores the old value and offers a
//! retry through the notice banner.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::scroll_into_view;
use crate::commands;
use crate::context::AppContext;
use crate::error::AppError;
use crate::models::{card_element_id, Stage, Subtask};
use crate::remote::DocumentStore;
use crate::store::{store_move_task, store_set_stage, store_set_subtasks, AppStore, LocalMove};
use crate::sync::{commit_or_restore, Rollback};

/// Delay before the moved card is scrolled to
pub const DROP_SCROLL_DELAY_MS: u32 = 400;
/// Length of the highlight pulse on a moved card
pub const DROP_PULSE_MS: u32 = 500;

/// Write a stage change that is already applied locally; puts `previous` back on failure
pub async fn write_stage<S: DocumentStore + ?Sized>(
    remote: &S,
    store: AppStore,
    task_id: &str,
    previous: Stage,
    stage: Stage,
) -> Result<(), AppError> {
    commit_or_restore(Rollback::capture(&previous), commands::move_task(remote, task_id, stage), |old| {
        store_set_stage(&store, task_id, old);
    })
    .await
    .map(|_| ())
}

/// Write a subtask list that is already applied locally.
/// On failure `previous` goes back into the store and into `local`, the
/// list an open editor is showing.
pub async fn write_subtasks<S: DocumentStore + ?Sized>(
    remote: &S,
    store: AppStore,
    task_id: &str,
    previous: Vec<Subtask>,
    next: &[Subtask],
    local: Option<Callback<Vec<Subtask>>>,
) -> Result<(), AppError> {
    commit_or_restore(Rollback::capture(&previous), commands::save_subtasks(remote, task_id, next), |old| {
        store_set_subtasks(&store, task_id, old.clone());
        if let Some(local) = local {
            local.run(old);
        }
    })
    .await
}

/// Move a task to `stage` and write it back.
/// `set_pulse` marks the moved card for the highlight pulse.
pub fn move_task(ctx: AppContext, store: AppStore, task_id: String, stage: Stage, set_pulse: WriteSignal<Option<String>>) {
    let previous = match store_move_task(&store, &task_id, stage) {
        LocalMove::Moved(previous) => previous,
        LocalMove::Unchanged => return,
        LocalMove::Missing => {
            log::warn!("dropped unknown task {}", task_id);
            return;
        }
    };
    log::debug!("task {} {:?} -> {:?}", task_id, previous, stage);

    let pulse_id = task_id.clone();
    spawn_local(async move {
        TimeoutFuture::new(DROP_SCROLL_DELAY_MS).await;
        scroll_into_view(&card_element_id(&pulse_id));
        set_pulse.set(Some(pulse_id.clone()));
        TimeoutFuture::new(DROP_PULSE_MS).await;
        set_pulse.update(|current| {
            if current.as_deref() == Some(pulse_id.as_str()) {
                *current = None;
            }
        });
    });

    spawn_local(async move {
        if let Err(e) = write_stage(&ctx.store(), store, &task_id, previous, stage).await {
            log::error!("moving task {} failed: {}", task_id, e);
            let retry = Callback::new(move |_| move_task(ctx, store, task_id.clone(), stage, set_pulse));
            ctx.notify(format!("Could not move the task: {}", e), Some(retry));
        }
    });
}

/// Replace a task's subtasks locally and patch them remotely.
/// `local` mirrors the list into an open editor, on retry and on rollback.
pub fn save_subtasks(
    ctx: AppContext,
    store: AppStore,
    task_id: String,
    previous: Vec<Subtask>,
    next: Vec<Subtask>,
    local: Option<Callback<Vec<Subtask>>>,
) {
    store_set_subtasks(&store, &task_id, next.clone());
    if let Some(local) = local {
        local.run(next.clone());
    }

    spawn_local(async move {
        let result = write_subtasks(&ctx.store(), store, &task_id, previous.clone(), &next, local).await;
        if let Err(e) = result {
            log::error!("saving subtasks of {} failed: {}", task_id, e);
            let retry = Callback::new(move |_| {
                save_subtasks(ctx, store, task_id.clone(), previous.clone(), next.clone(), local)
            });
            ctx.notify(format!("Could not save the subtasks: {}", e), Some(retry));
        }
    });
}

#[cfg(test)]
mod tests {
    use reactive_stores::Store;

    use super::*;
    use crate::commands::{create_task, get_task};
    use crate::models::{SubtaskId, TaskDraft};
    use crate::remote::MemoryStore;
    use crate::store::{store_set_tasks, store_task, AppState};
    use crate::subtasks::SubtaskList;

    fn draft() -> TaskDraft {
        TaskDraft {
            title: "Sync".into(),
            due_date: "2025-01-01".into(),
            category: "User Story".into(),
            subtasks: vec![Subtask::new(SubtaskId(1), "one")],
            ..TaskDraft::default()
        }
    }

    #[tokio::test]
    async fn test_failed_subtask_delete_restores_editor() {
        let owner = Owner::new();
        owner.set();
        let remote = MemoryStore::new();
        let task = create_task(&remote, draft(), Stage::ToDo, 1).await.unwrap();
        let store = Store::new(AppState::default());
        store_set_tasks(&store, vec![task.clone()]);

        // Editor state after deleting the only item
        let editor = RwSignal::new(SubtaskList::from_subtasks(task.subtasks.clone()));
        let previous = editor.with_untracked(|l| l.to_vec());
        editor.update(|l| {
            l.remove(SubtaskId(1));
        });
        let next = editor.with_untracked(|l| l.to_vec());
        store_set_subtasks(&store, &task.id, next.clone());
        let local = Callback::new(move |items: Vec<Subtask>| editor.set(SubtaskList::from_subtasks(items)));

        remote.fail_writes(true);
        let result = write_subtasks(&remote, store, &task.id, previous, &next, Some(local)).await;

        assert!(result.is_err());
        assert_eq!(editor.with_untracked(|l| l.items().len()), 1);
        assert_eq!(store_task(&store, &task.id).map(|t| t.subtasks.len()), Some(1));
        assert_eq!(get_task(&remote, &task.id).await.unwrap().subtasks.len(), 1);
    }

    #[tokio::test]
    async fn test_failed_move_puts_card_back() {
        let owner = Owner::new();
        owner.set();
        let remote = MemoryStore::new();
        let task = create_task(&remote, draft(), Stage::ToDo, 1).await.unwrap();
        let store = Store::new(AppState::default());
        store_set_tasks(&store, vec![task.clone()]);

        assert_eq!(store_move_task(&store, &task.id, Stage::Done), LocalMove::Moved(Stage::ToDo));
        remote.fail_writes(true);
        let result = write_stage(&remote, store, &task.id, Stage::ToDo, Stage::Done).await;

        assert!(result.is_err());
        assert_eq!(store_task(&store, &task.id).map(|t| t.stage), Some(Stage::ToDo));
    }

    #[tokio::test]
    async fn test_move_is_written_whole() {
        let owner = Owner::new();
        owner.set();
        let remote = MemoryStore::new();
        let task = create_task(&remote, draft(), Stage::ToDo, 1).await.unwrap();
        let store = Store::new(AppState::default());
        store_set_tasks(&store, vec![task.clone()]);

        store_move_task(&store, &task.id, Stage::InProgress);
        write_stage(&remote, store, &task.id, Stage::ToDo, Stage::InProgress).await.unwrap();

        let stored = get_task(&remote, &task.id).await.unwrap();
        assert_eq!(stored.stage, Stage::InProgress);
        assert_eq!(stored.title, "Sync");
    }
}
