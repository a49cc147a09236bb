//! Summary Page Component
//!
//! Task counts per stage, urgent tasks and the greeting.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::browser::{local_hour, today, viewport_width};
use crate::context::{use_app_context, Page};
use crate::store::{use_app_store, AppStateStoreFields};
use crate::summary::{format_long_date, greeting, TaskCounts, GREETING_SPLASH_MAX_WIDTH, GREETING_SPLASH_MS};

#[component]
fn SummaryTile(label: &'static str, count: Signal<usize>, #[prop(optional)] wide: bool) -> impl IntoView {
    let ctx = use_app_context();
    view! {
        <button class=if wide { "summary-tile wide" } else { "summary-tile" } on:click=move |_| ctx.navigate(Page::Board)>
            <span class="summary-count">{move || count.get()}</span>
            <span class="summary-label">{label}</span>
        </button>
    }
}

#[component]
pub fn SummaryPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let counts = Memo::new(move |_| store.tasks().with(|tasks| TaskCounts::from_tasks(tasks)));
    let count = move |pick: fn(&TaskCounts) -> usize| Signal::derive(move || pick(&counts.get()));

    // Signed-in account's display name; guests get none
    let user_name = move || {
        let token = ctx.session.get().token?;
        store.people().with(|people| {
            people
                .iter()
                .find(|p| p.id() == token)
                .map(|p| p.info().name.clone())
                .filter(|name| !name.trim().is_empty())
        })
    };

    let (splash, set_splash) = signal(viewport_width() < GREETING_SPLASH_MAX_WIDTH);
    if splash.get_untracked() {
        spawn_local(async move {
            TimeoutFuture::new(GREETING_SPLASH_MS).await;
            set_splash.set(false);
        });
    }

    let greeting_view = move || {
        let text = greeting(local_hour());
        match user_name() {
            Some(name) => view! {
                <span class="greeting-text">{format!("{},", text)}</span>
                <span class="greeting-name">{name}</span>
            }
            .into_any(),
            None => view! { <span class="greeting-text">{format!("{}!", text)}</span> }.into_any(),
        }
    };

    let date = today().map(format_long_date).unwrap_or_default();

    view! {
        <div class="summary-page">
            <Show when=move || splash.get()>
                <div class="greeting-splash">{greeting_view}</div>
            </Show>
            <h1 class="summary-title">"Join 360"</h1>
            <p class="summary-subtitle">"Key Metrics at a Glance"</p>

            <div class="summary-grid">
                <SummaryTile label="To-do" count=count(|c| c.to_do) />
                <SummaryTile label="Done" count=count(|c| c.done) />
                <div class="summary-urgent">
                    <SummaryTile label="Urgent" count=count(|c| c.urgent) wide=true />
                    <span class="summary-date">{date}</span>
                </div>
                <SummaryTile label="Tasks in Board" count=count(|c| c.all) />
                <SummaryTile label="Tasks in Progress" count=count(|c| c.in_progress) />
                <SummaryTile label="Awaiting Feedback" count=count(|c| c.await_feedback) />
            </div>

            <div class="greeting">{greeting_view}</div>
        </div>
    }
}
