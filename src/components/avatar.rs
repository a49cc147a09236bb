//! Avatar Component
//!
//! Colored initials badge for a person or assignee.

use leptos::prelude::*;

use crate::contacts::badge_initials;

#[component]
pub fn Avatar(
    #[prop(into)] name: String,
    #[prop(into)] email: String,
    #[prop(into)] color: String,
    #[prop(optional, into)] class: Option<String>,
) -> impl IntoView {
    let initials = badge_initials(&name, &email);
    let class = class.unwrap_or_else(|| "avatar".to_string());

    view! {
        <div class=class style=format!("background-color: {};", color) title=name>
            {initials}
        </div>
    }
}

/// `+N` bubble for assignees that did not fit
#[component]
pub fn OverflowAvatar(count: usize) -> impl IntoView {
    view! {
        <Show when=move || { count > 0 }>
            <div class="avatar avatar-overflow">{format!("+{}", count)}</div>
        </Show>
    }
}
