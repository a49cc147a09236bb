//! Task Card Component
//!
//! One card on the board: category, title, description preview,
//! subtask progress, assignee avatars and priority.

use leptos::prelude::*;
use leptos_dragdrop::{is_dragging, make_on_dragend, make_on_dragstart, DndSignals};

use crate::board::{avatar_row, card_progress, category_class, color_index, refresh_colors, truncate_description, CARD_AVATARS};
use crate::components::{Avatar, MoveMenu, OverflowAvatar};
use crate::models::{card_element_id, Stage};
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn TaskCard(
    task_id: String,
    stage: Stage,
    dnd: DndSignals,
    /// Hidden by the search filter when false
    #[prop(into)] visible: Signal<bool>,
    /// Card currently showing the drop pulse
    pulse: ReadSignal<Option<String>>,
    touch: bool,
    #[prop(into)] on_open: Callback<String>,
    #[prop(into)] on_move: Callback<(String, Stage)>,
) -> impl IntoView {
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);

    let lookup_id = task_id.clone();
    let task = Memo::new(move |_| {
        store.tasks().with(|tasks| tasks.iter().find(|t| t.id == lookup_id).cloned())
    });

    let element_id = card_element_id(&task_id);
    let drag_id = element_id.clone();
    let pulse_id = task_id.clone();
    let card_class = move || {
        let mut class = String::from("task");
        if is_dragging(&dnd, &drag_id) {
            class.push_str(" dragging");
        }
        if pulse.with(|p| p.as_deref() == Some(pulse_id.as_str())) {
            class.push_str(" task-dropped");
        }
        class
    };

    let open_id = task_id.clone();
    let move_id = task_id.clone();

    view! {
        <div
            id=element_id.clone()
            class=card_class
            data-task-id=task_id.clone()
            draggable="true"
            style:display=move || if visible.get() { "block" } else { "none" }
            on:dragstart=make_on_dragstart(dnd, element_id.clone(), stage.index())
            on:dragend=make_on_dragend(dnd)
            on:click=move |_| on_open.run(open_id.clone())
        >
            {move || task.get().map(|task| {
                let colors = store.people().with(|people| color_index(people));
                let row = avatar_row(&refresh_colors(&task.assigned_to, &colors), CARD_AVATARS);
                let progress = card_progress(&task);

                view! {
                    <span class=format!("task-category {}", category_class(&task.category))>
                        {task.category.clone()}
                    </span>
                    <h3 class="task-title">{task.title.clone()}</h3>
                    <p class="task-description">{truncate_description(&task.description)}</p>
                    {progress.map(|p| view! {
                        <div class="subtask-progress">
                            <div class="progress-bar">
                                <div class="progress-fill" style=format!("width: {}%;", p.percent())></div>
                            </div>
                            <span class=format!("subtask-count {}", p.state_class())>{p.label()}</span>
                        </div>
                    })}
                    <div class="task-footer">
                        <div class="task-assignees">
                            {row.shown.into_iter().map(|a| view! {
                                <Avatar name=a.name email=a.email color=a.color />
                            }).collect_view()}
                            <OverflowAvatar count=row.hidden />
                        </div>
                        <img class="priority-icon" src=task.priority.icon() alt=task.priority.as_str() />
                    </div>
                }
            })}

            <Show when=move || touch>
                <button
                    class="move-btn"
                    title="Move"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_menu_open.set(true);
                    }
                >
                    "⇅"
                </button>
            </Show>
            <Show when=move || menu_open.get()>
                {
                    let move_id = move_id.clone();
                    view! {
                        <MoveMenu
                            current=stage
                            on_move=move |target: Stage| on_move.run((move_id.clone(), target))
                            on_close=move |_| set_menu_open.set(false)
                        />
                    }
                }
            </Show>
        </div>
    }
}
