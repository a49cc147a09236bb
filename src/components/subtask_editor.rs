//! Subtask Editor Component
//!
//! Working subtask list of the task form: add with Enter, double-click to
//! rename, delete. With `on_persist` set, adds and deletes are written
//! through immediately; renames wait for the form save.

use leptos::prelude::*;

use crate::models::{Subtask, SubtaskId};
use crate::subtasks::{RenameOutcome, SubtaskList, MAX_SUBTASK_CHARS};

#[component]
pub fn SubtaskEditor(
    list: RwSignal<SubtaskList>,
    /// Receives `(previous, next)` after a persisted change
    #[prop(optional, into)]
    on_persist: Option<Callback<(Vec<Subtask>, Vec<Subtask>)>>,
) -> impl IntoView {
    let (draft, set_draft) = signal(String::new());
    let editing = RwSignal::new(None::<SubtaskId>);

    // Run a list mutation; persists when it changed something
    let apply = move |change: &dyn Fn(&mut SubtaskList) -> bool| {
        let previous = list.with_untracked(|l| l.to_vec());
        let mut changed = false;
        list.update(|l| changed = change(l));
        if changed {
            if let Some(callback) = on_persist {
                callback.run((previous, list.with_untracked(|l| l.to_vec())));
            }
        }
    };

    let add = move || {
        let name = draft.get_untracked();
        apply(&|l| l.add(&name).is_some());
        set_draft.set(String::new());
    };

    let commit = move |id: SubtaskId, value: String| {
        if editing.get_untracked() != Some(id) {
            return;
        }
        editing.set(None);
        let previous = list.with_untracked(|l| l.to_vec());
        let mut outcome = RenameOutcome::Missing;
        list.update(|l| outcome = l.rename(id, &value));
        if outcome == RenameOutcome::Removed {
            if let Some(callback) = on_persist {
                callback.run((previous, list.with_untracked(|l| l.to_vec())));
            }
        }
    };

    view! {
        <div class="subtask-editor">
            <div class="subtask-input-row">
                <input
                    id="subtasks"
                    type="text"
                    placeholder="Add new subtask"
                    maxlength=MAX_SUBTASK_CHARS.to_string()
                    prop:value=move || draft.get()
                    on:input=move |ev| set_draft.set(event_target_value(&ev))
                    on:keydown=move |ev| {
                        if ev.key() == "Enter" {
                            ev.prevent_default();
                            add();
                        }
                    }
                />
                <button type="button" class="subtask-add" on:click=move |_| add()>"+"</button>
            </div>
            <ul class="subtask-list">
                <For
                    each=move || list.with(|l| l.items().to_vec())
                    key=|s| (s.id, s.name.clone())
                    children=move |subtask| {
                        let id = subtask.id;
                        let label = format!("• {}", subtask.name);
                        let name = subtask.name;
                        view! {
                            <li class="subtask-item" on:dblclick=move |_| editing.set(Some(id))>
                                <Show
                                    when=move || editing.get() == Some(id)
                                    fallback=move || view! { <span class="subtask-name">{label.clone()}</span> }
                                >
                                    <input
                                        class="subtask-edit-input"
                                        type="text"
                                        maxlength=MAX_SUBTASK_CHARS.to_string()
                                        value=name.clone()
                                        autofocus=true
                                        on:keydown=move |ev| {
                                            if ev.key() == "Enter" {
                                                ev.prevent_default();
                                                commit(id, event_target_value(&ev));
                                            }
                                        }
                                        on:blur=move |ev| commit(id, event_target_value(&ev))
                                    />
                                </Show>
                                <span class="subtask-actions">
                                    <button type="button" class="subtask-edit" title="Edit" on:click=move |_| editing.set(Some(id))>
                                        "✎"
                                    </button>
                                    <button
                                        type="button"
                                        class="subtask-delete"
                                        title="Delete"
                                        on:click=move |_| apply(&|l| l.remove(id))
                                    >
                                        "🗑"
                                    </button>
                                </span>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
