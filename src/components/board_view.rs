//! Board View Component
//!
//! Search bar, the four stage columns and the task overlays.

use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::create_dnd_signals;

use crate::actions;
use crate::board::partition_by_stage;
use crate::browser::is_touch_device;
use crate::commands;
use crate::components::{BoardColumn, FormMode, TaskForm, TaskOverlay};
use crate::context::use_app_context;
use crate::models::Stage;
use crate::search::{classify_query, next_filter};
use crate::store::{store_set_search_index, use_app_store, AppStateStoreFields};

#[component]
pub fn BoardView() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let dnd = create_dnd_signals(Stage::ALL.len());
    let (filter, set_filter) = signal(None::<String>);
    let (pulse, set_pulse) = signal(None::<String>);
    let (open_task, set_open_task) = signal(None::<String>);
    let (add_stage, set_add_stage) = signal(None::<Stage>);
    let touch = is_touch_device();

    let columns = Memo::new(move |_| store.tasks().with(|tasks| partition_by_stage(tasks)));

    let on_move = Callback::new(move |(task_id, stage): (String, Stage)| {
        actions::move_task(ctx, store, task_id, stage, set_pulse);
    });
    let on_open = Callback::new(move |task_id: String| set_open_task.set(Some(task_id)));
    let on_add = Callback::new(move |stage: Stage| set_add_stage.set(Some(stage)));

    let on_search = move |ev: leptos::ev::Event| {
        let action = classify_query(&event_target_value(&ev));
        set_filter.update(|current| *current = next_filter(current.take(), action));
    };

    // The snapshot is normally filled by the board load; fetch it if that failed
    let on_search_focus = move |_: leptos::ev::FocusEvent| {
        if !store.search_index().with_untracked(|index| index.is_empty()) {
            return;
        }
        spawn_local(async move {
            match commands::load_task_index(&ctx.store()).await {
                Ok(index) => store_set_search_index(&store, index),
                Err(e) => log::error!("loading search index failed: {}", e),
            }
        });
    };

    view! {
        <div class="board-view">
            <div class="board-header">
                <h1 class="board-title">"Board"</h1>
                <div class="board-actions">
                    <input
                        id="taskSearch"
                        class="search-input"
                        type="text"
                        placeholder="Find Task"
                        on:input=on_search
                        on:focus=on_search_focus
                    />
                    <button class="btn-primary" on:click=move |_| on_add.run(Stage::ToDo)>
                        "Add task +"
                    </button>
                </div>
            </div>

            <div class="board-columns">
                {Stage::ALL
                    .into_iter()
                    .map(|stage| {
                        view! {
                            <BoardColumn
                                stage=stage
                                task_ids=Signal::derive(move || {
                                    columns.with(|c| c[stage.index()].iter().map(|t| t.id.clone()).collect())
                                })
                                dnd=dnd
                                filter=filter
                                pulse=pulse
                                touch=touch
                                on_open=on_open
                                on_add=on_add
                                on_move=on_move
                            />
                        }
                    })
                    .collect_view()}
            </div>

            {move || open_task.get().map(|task_id| view! {
                <TaskOverlay task_id=task_id on_close=move |_| set_open_task.set(None) />
            })}

            {move || add_stage.get().map(|stage| view! {
                <div class="overlay" on:click=move |_| set_add_stage.set(None)>
                    <div class="overlay-panel" on:click=|ev| ev.stop_propagation()>
                        <TaskForm mode=FormMode::Add(stage) on_close=move |_| set_add_stage.set(None) />
                    </div>
                </div>
            })}
        </div>
    }
}
