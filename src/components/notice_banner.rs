//! Notice Banner Component
//!
//! Shows the last failed write, with a Retry button when it can be repeated.

use leptos::prelude::*;

use crate::context::use_app_context;

#[component]
pub fn NoticeBanner() -> impl IntoView {
    let ctx = use_app_context();

    move || {
        ctx.notice.get().map(|notice| {
            let retry = notice.retry.map(|retry| {
                view! {
                    <button
                        class="notice-retry"
                        on:click=move |_| {
                            ctx.clear_notice();
                            retry.run(());
                        }
                    >
                        "Retry"
                    </button>
                }
            });

            view! {
                <div class="notice-banner" role="alert">
                    <span class="notice-text">{notice.message}</span>
                    {retry}
                    <button class="notice-close" on:click=move |_| ctx.clear_notice()>"×"</button>
                </div>
            }
        })
    }
}
