//! Side Navigation Component

use leptos::prelude::*;

use crate::context::{use_app_context, Page};

const NAV_PAGES: [Page; 4] = [Page::Summary, Page::AddTask, Page::Board, Page::Contacts];

#[component]
pub fn SideNav() -> impl IntoView {
    let ctx = use_app_context();

    view! {
        <nav class="side-nav">
            <div class="side-nav-logo">"Join"</div>
            {NAV_PAGES
                .into_iter()
                .map(|page| {
                    let class = move || {
                        if ctx.page.get() == page { "side-nav-link active" } else { "side-nav-link" }
                    };
                    view! {
                        <button class=class on:click=move |_| ctx.navigate(page)>
                            {page.title()}
                        </button>
                    }
                })
                .collect_view()}
        </nav>
    }
}
