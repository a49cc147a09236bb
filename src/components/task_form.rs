//! Task Form Component
//!
//! Add and edit form for tasks. Used by the add-task page, the board's add
//! overlay and the edit view of the task overlay.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::actions;
use crate::browser::now_ms;
use crate::commands;
use crate::components::{AssigneePicker, SubtaskEditor};
use crate::context::use_app_context;
use crate::error::{field_message, FieldError};
use crate::models::{Priority, Stage, Subtask, TaskDraft};
use crate::store::{store_add_task, store_task, store_update_task, use_app_store};
use crate::subtasks::SubtaskList;
use crate::validation::{validate_task_draft, CATEGORIES, CATEGORY_PLACEHOLDER};

#[derive(Clone, Debug, PartialEq)]
pub enum FormMode {
    /// New task placed in the given column
    Add(Stage),
    /// Existing task by id
    Edit(String),
}

#[component]
pub fn TaskForm(mode: FormMode, #[prop(into)] on_close: Callback<()>) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let initial = match &mode {
        FormMode::Edit(id) => store_task(&store, id).map(|t| TaskDraft::from_task(&t)).unwrap_or_default(),
        FormMode::Add(_) => TaskDraft::default(),
    };

    let title = RwSignal::new(initial.title);
    let description = RwSignal::new(initial.description);
    let due_date = RwSignal::new(initial.due_date);
    let category = RwSignal::new(initial.category);
    let priority = RwSignal::new(initial.priority);
    let assigned = RwSignal::new(initial.assigned_to);
    let subtasks = RwSignal::new(SubtaskList::from_subtasks(initial.subtasks));
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let (saving, set_saving) = signal(false);

    // Edit mode writes subtask adds and deletes through right away
    let persist = match &mode {
        FormMode::Edit(id) => {
            let id = id.clone();
            let mirror = Callback::new(move |items: Vec<Subtask>| subtasks.set(SubtaskList::from_subtasks(items)));
            Some(Callback::new(move |(previous, next): (Vec<Subtask>, Vec<Subtask>)| {
                actions::save_subtasks(ctx, store, id.clone(), previous, next, Some(mirror));
            }))
        }
        FormMode::Add(_) => None,
    };

    let error_for = move |field: &'static str| {
        move || errors.with(|list| field_message(list, field).map(str::to_string))
    };

    let clear = move || {
        title.set(String::new());
        description.set(String::new());
        due_date.set(String::new());
        category.set(String::new());
        priority.set(Priority::Medium);
        assigned.set(Vec::new());
        subtasks.set(SubtaskList::new());
        errors.set(Vec::new());
    };

    let is_edit = matches!(mode, FormMode::Edit(_));
    let mode = StoredValue::new(mode);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }

        let draft = TaskDraft {
            title: title.get_untracked(),
            description: description.get_untracked(),
            due_date: due_date.get_untracked(),
            category: category.get_untracked(),
            priority: priority.get_untracked(),
            assigned_to: assigned.get_untracked(),
            subtasks: subtasks.with_untracked(|l| l.to_vec()),
        };
        if let Err(e) = validate_task_draft(&draft) {
            errors.set(e.field_errors().to_vec());
            return;
        }
        errors.set(Vec::new());
        set_saving.set(true);

        let mode = mode.get_value();
        spawn_local(async move {
            let remote = ctx.store();
            let result = match mode {
                FormMode::Add(stage) => commands::create_task(&remote, draft, stage, now_ms())
                    .await
                    .map(|task| store_add_task(&store, task)),
                FormMode::Edit(id) => commands::update_task(&remote, &id, &draft).await.map(|_| {
                    if let Some(mut task) = store_task(&store, &id) {
                        draft.apply_to(&mut task);
                        store_update_task(&store, task);
                    }
                }),
            };
            set_saving.set(false);

            match result {
                Ok(()) => {
                    on_close.run(());
                    ctx.reload();
                }
                Err(e) => {
                    log::error!("saving task failed: {}", e);
                    if e.field_errors().is_empty() {
                        ctx.notify(format!("Could not save the task: {}", e), None);
                    } else {
                        errors.set(e.field_errors().to_vec());
                    }
                }
            }
        });
    };

    view! {
        <form class="task-form" novalidate=true on:submit=on_submit>
            <h2 class="task-form-title">{if is_edit { "Edit Task" } else { "Add Task" }}</h2>

            <div class="form-columns">
                <div class="form-column">
                    <label for="title">"Title" <span class="required">"*"</span></label>
                    <input
                        id="title"
                        type="text"
                        placeholder="Enter a title"
                        prop:value=move || title.get()
                        on:input=move |ev| title.set(event_target_value(&ev))
                    />
                    <span class="field-error">{error_for("title")}</span>

                    <label for="description">"Description"</label>
                    <textarea
                        id="description"
                        placeholder="Enter a Description"
                        prop:value=move || description.get()
                        on:input=move |ev| description.set(event_target_value(&ev))
                    ></textarea>

                    <label for="assignedTo">"Assigned to"</label>
                    <AssigneePicker selected=assigned />
                </div>

                <div class="form-column">
                    <label for="due-date">"Due date" <span class="required">"*"</span></label>
                    <input
                        id="due-date"
                        type="date"
                        prop:value=move || due_date.get()
                        on:input=move |ev| due_date.set(event_target_value(&ev))
                    />
                    <span class="field-error">{error_for("due-date")}</span>

                    <label>"Prio"</label>
                    <div class="priority-buttons">
                        {Priority::ALL
                            .into_iter()
                            .map(|p| {
                                let class = move || {
                                    if priority.get() == p {
                                        format!("priority-btn {} active", p.css_class())
                                    } else {
                                        format!("priority-btn {}", p.css_class())
                                    }
                                };
                                view! {
                                    <button type="button" class=class on:click=move |_| priority.set(p)>
                                        {p.as_str()}
                                        <img src=p.icon() alt="" />
                                    </button>
                                }
                            })
                            .collect_view()}
                    </div>

                    <label for="categorySelect">"Category" <span class="required">"*"</span></label>
                    <select id="categorySelect" on:change=move |ev| category.set(event_target_value(&ev))>
                        <option value="" selected=move || category.with(|c| c.is_empty())>
                            {CATEGORY_PLACEHOLDER}
                        </option>
                        {CATEGORIES
                            .into_iter()
                            .map(|c| view! {
                                <option value=c selected=move || category.with(|current| current == c)>{c}</option>
                            })
                            .collect_view()}
                    </select>
                    <span class="field-error">{error_for("categorySelect")}</span>

                    <label for="subtasks">"Subtasks"</label>
                    {match persist {
                        Some(callback) => view! { <SubtaskEditor list=subtasks on_persist=callback /> }.into_any(),
                        None => view! { <SubtaskEditor list=subtasks /> }.into_any(),
                    }}
                </div>
            </div>

            <div class="form-footer">
                <span class="required-note"><span class="required">"*"</span>"This field is required"</span>
                <button
                    type="button"
                    class="btn-secondary"
                    on:click=move |_| if is_edit { on_close.run(()) } else { clear() }
                >
                    {if is_edit { "Cancel" } else { "Clear ✗" }}
                </button>
                <button type="submit" class="btn-primary" disabled=move || saving.get()>
                    {if is_edit { "Ok ✓" } else { "Create Task ✓" }}
                </button>
            </div>
        </form>
    }
}
