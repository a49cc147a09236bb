//! Join Frontend App
//!
//! Main application component: navigation, header and the active page.

use leptos::prelude::*;
use leptos::task::spawn_local;
use reactive_stores::Store;

use crate::commands;
use crate::components::{BoardView, ContactsPage, FormMode, HeaderBar, NoticeBanner, SideNav, SignUp, SummaryPage, TaskForm};
use crate::config::AppConfig;
use crate::context::{AppContext, Notice, Page};
use crate::models::Stage;
use crate::session::{BrowserStorage, Session};
use crate::store::{store_set_people, store_set_tasks, AppState};

#[component]
pub fn App() -> impl IntoView {
    // State
    let session = Session::load(&BrowserStorage);
    let start_page = if session.is_active() { Page::Summary } else { Page::SignUp };
    let (reload_trigger, set_reload_trigger) = signal(0u32);
    let (page, set_page) = signal(start_page);
    let (session, set_session) = signal(session);
    let (notice, set_notice) = signal(None::<Notice>);

    // Provide context to all children
    let ctx = AppContext::new(
        (reload_trigger, set_reload_trigger),
        (page, set_page),
        (session, set_session),
        (notice, set_notice),
        AppConfig::from_env(),
    );
    provide_context(ctx);
    let store = Store::new(AppState::default());
    provide_context(store);

    // Load tasks and people when the trigger changes
    Effect::new(move |_| {
        let trigger = reload_trigger.get();
        log::debug!("loading board, trigger={}", trigger);
        spawn_local(async move {
            let remote = ctx.store();
            match commands::list_tasks(&remote).await {
                Ok(tasks) => {
                    log::info!("loaded {} tasks", tasks.len());
                    store_set_tasks(&store, tasks);
                }
                Err(e) => log::error!("loading tasks failed: {}", e),
            }
            match commands::list_people(&remote).await {
                Ok(people) => store_set_people(&store, people),
                Err(e) => log::error!("loading people failed: {}", e),
            }
        });
    });

    // Without a stored name only the sign-up page is reachable
    let current_page = move || {
        if session.with(|s| s.is_active()) { page.get() } else { Page::SignUp }
    };

    view! {
        {move || match current_page() {
            Page::SignUp => view! { <SignUp /> }.into_any(),
            page => view! {
                <div class="app-layout">
                    <SideNav />
                    <div class="app-main">
                        <HeaderBar />
                        <NoticeBanner />
                        <main class="main-content">
                            {match page {
                                Page::Summary | Page::SignUp => view! { <SummaryPage /> }.into_any(),
                                Page::AddTask => view! {
                                    <TaskForm
                                        mode=FormMode::Add(Stage::ToDo)
                                        on_close=move |_| ctx.navigate(Page::Board)
                                    />
                                }
                                .into_any(),
                                Page::Board => view! { <BoardView /> }.into_any(),
                                Page::Contacts => view! { <ContactsPage /> }.into_any(),
                            }}
                        </main>
                    </div>
                </div>
            }
            .into_any(),
        }}
    }
}
