//! Move Menu Component
//!
//! Touch fallback for dragging: lists the four stages for one card.

use leptos::ev;
use leptos::prelude::*;

use crate::models::Stage;

#[component]
pub fn MoveMenu(
    current: Stage,
    #[prop(into)] on_move: Callback<Stage>,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    // Any click that reaches the window closes the menu
    let handle = window_event_listener(ev::click, move |_| on_close.run(()));
    on_cleanup(move || handle.remove());

    view! {
        <div id="mobileTaskActions" class="move-menu" on:click=|ev| ev.stop_propagation()>
            <span class="move-menu-title">"Move To"</span>
            {Stage::ALL
                .into_iter()
                .map(|stage| {
                    view! {
                        <button
                            class="move-menu-option"
                            class:current={stage == current}
                            on:click=move |ev| {
                                ev.stop_propagation();
                                on_move.run(stage);
                                on_close.run(());
                            }
                        >
                            {stage.label()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
