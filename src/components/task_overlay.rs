//! Task Overlay Component
//!
//! Detail view of one task with its subtask checklist. Switches to the
//! task form for editing.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::board::{avatar_row, category_class, color_index, refresh_colors, DETAIL_AVATARS};
use crate::commands;
use crate::components::{Avatar, DeleteConfirmButton, FormMode, OverflowAvatar, TaskForm};
use crate::context::use_app_context;
use crate::models::{SubtaskId, Task};
use crate::store::{store_remove_task, use_app_store, AppStateStoreFields};
use crate::subtasks::SubtaskList;
use crate::validation::format_due_date;

#[component]
pub fn TaskOverlay(task_id: String, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (editing, set_editing) = signal(false);

    let lookup_id = task_id.clone();
    let task = Memo::new(move |_| {
        store.tasks().with(|tasks| tasks.iter().find(|t| t.id == lookup_id).cloned())
    });

    let toggle_subtask = move |id: SubtaskId| {
        let Some(current) = task.get_untracked() else { return };
        let mut list = SubtaskList::from_subtasks(current.subtasks.clone());
        if list.toggle(id) {
            actions::save_subtasks(ctx, store, current.id, current.subtasks, list.to_vec(), None);
        }
    };

    let delete_id = task_id.clone();
    let on_delete = Callback::new(move |_| {
        let id = delete_id.clone();
        spawn_local(async move {
            match commands::delete_task(&ctx.store(), &id).await {
                Ok(()) => {
                    store_remove_task(&store, &id);
                    on_close.run(());
                }
                Err(e) => {
                    log::error!("deleting task {} failed: {}", id, e);
                    ctx.notify(format!("Could not delete the task: {}", e), None);
                }
            }
        });
    });

    let details = move |task: Task| {
        let colors = store.people().with_untracked(|people| color_index(people));
        let row = avatar_row(&refresh_colors(&task.assigned_to, &colors), DETAIL_AVATARS);

        view! {
            <div class="task-overlay-header">
                <span class=format!("task-category {}", category_class(&task.category))>{task.category.clone()}</span>
                <button class="overlay-close" title="Close" on:click=move |_| on_close.run(())>"✕"</button>
            </div>
            <h2 class="task-overlay-title">{task.title.clone()}</h2>
            <p class="task-overlay-description">{task.description.clone()}</p>
            <div class="task-overlay-row">
                <span class="row-label">"Due date:"</span>
                <span>{format_due_date(&task.due_date)}</span>
            </div>
            <div class="task-overlay-row">
                <span class="row-label">"Priority:"</span>
                <span class=format!("priority-label {}", task.priority.css_class())>
                    {task.priority.as_str()}
                    <img src=task.priority.icon() alt="" />
                </span>
            </div>
            <div class="task-overlay-assignees">
                <span class="row-label">"Assigned To:"</span>
                {row.shown.into_iter().map(|a| view! {
                    <div class="assignee-row">
                        <Avatar name=a.name.clone() email=a.email.clone() color=a.color.clone() />
                        <span>{a.display_name().to_string()}</span>
                    </div>
                }).collect_view()}
                <OverflowAvatar count=row.hidden />
            </div>
            <div class="task-overlay-subtasks">
                <span class="row-label">"Subtasks"</span>
                {task.subtasks.iter().map(|s| {
                    let id = s.id;
                    view! {
                        <label class="subtask-check">
                            <input type="checkbox" prop:checked=s.completed on:change=move |_| toggle_subtask(id) />
                            <span>{s.name.clone()}</span>
                        </label>
                    }
                }).collect_view()}
            </div>
            <div class="task-overlay-actions">
                <DeleteConfirmButton button_class="overlay-delete" on_confirm=on_delete />
                <button class="overlay-edit" on:click=move |_| set_editing.set(true)>"Edit"</button>
            </div>
        }
    };

    let edit_id = StoredValue::new(task_id);

    view! {
        <div class="overlay" on:click=move |_| on_close.run(())>
            <div class="overlay-panel task-overlay" on:click=|ev| ev.stop_propagation()>
                {move || {
                    if editing.get() {
                        view! {
                            <TaskForm mode=FormMode::Edit(edit_id.get_value()) on_close=move |_| set_editing.set(false) />
                        }
                        .into_any()
                    } else {
                        match task.get() {
                            Some(task) => details(task).into_any(),
                            None => view! { <p class="task-missing">"This task no longer exists."</p> }.into_any(),
                        }
                    }
                }}
            </div>
        </div>
    }
}
