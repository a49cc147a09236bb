//! Board Column Component
//!
//! One stage of the board. Cards are dropped here to change their stage.

use leptos::prelude::*;
use leptos_dragdrop::{is_highlighted, make_on_dragenter, make_on_dragleave, make_on_drop, on_dragover, DndSignals};

use crate::board::{drop_target, EMPTY_COLUMN_TEXT};
use crate::components::TaskCard;
use crate::models::Stage;
use crate::search::is_visible;
use crate::store::{use_app_store, AppStateStoreFields};

#[component]
pub fn BoardColumn(
    stage: Stage,
    /// Ids of the tasks in this column, in board order
    #[prop(into)] task_ids: Signal<Vec<String>>,
    dnd: DndSignals,
    /// Active search term, lowercased
    filter: ReadSignal<Option<String>>,
    pulse: ReadSignal<Option<String>>,
    touch: bool,
    #[prop(into)] on_open: Callback<String>,
    #[prop(into)] on_add: Callback<Stage>,
    #[prop(into)] on_move: Callback<(String, Stage)>,
) -> impl IntoView {
    let store = use_app_store();
    let column = stage.index();

    // Cards the current filter leaves on screen
    let visible_count = Memo::new(move |_| {
        let ids = task_ids.get();
        let filter = filter.get();
        store.search_index().with(|index| {
            ids.iter()
                .filter(|id| is_visible(filter.as_deref(), index, id))
                .count()
        })
    });

    let on_drop = make_on_drop(dnd, move |payload: String, container_id: String| {
        on_move.run(drop_target(&payload, &container_id));
    });

    let list_class = move || {
        if is_highlighted(&dnd, column) {
            "task-list highlight-container"
        } else {
            "task-list"
        }
    };

    view! {
        <section class="board-column">
            <div class="column-header">
                <h2 class="column-title">{stage.label()}</h2>
                <button class="column-add" title="Add task" on:click=move |_| on_add.run(stage)>
                    "+"
                </button>
            </div>
            <div
                id=stage.container_id()
                class=list_class
                on:dragover=on_dragover
                on:dragenter=make_on_dragenter(dnd, column)
                on:dragleave=make_on_dragleave(dnd, column)
                on:drop=on_drop
            >
                <For
                    each=move || task_ids.get()
                    key=|id| id.clone()
                    children=move |task_id| {
                        let lookup = task_id.clone();
                        let visible = Signal::derive(move || {
                            let filter = filter.get();
                            store.search_index().with(|index| is_visible(filter.as_deref(), index, &lookup))
                        });
                        view! {
                            <TaskCard
                                task_id=task_id
                                stage=stage
                                dnd=dnd
                                visible=visible
                                pulse=pulse
                                touch=touch
                                on_open=on_open
                                on_move=on_move
                            />
                        }
                    }
                />
                <Show when=move || visible_count.get() == 0>
                    <div class="no-tasks">{EMPTY_COLUMN_TEXT}</div>
                </Show>
            </div>
        </section>
    }
}
