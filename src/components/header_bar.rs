//! Header Bar Component
//!
//! Top bar with the user badge and its menu.

use leptos::prelude::*;

use crate::contacts::initials;
use crate::context::{use_app_context, Page};
use crate::session::Session;
use crate::store::{use_app_store, AppStateStoreFields};

/// Badge text for the signed-in account; `G` for guests and unknown tokens
fn badge_text(session: &Session, store: &crate::store::AppStore) -> String {
    if session.is_guest() {
        return "G".to_string();
    }
    let Some(token) = session.token.as_deref() else {
        return "G".to_string();
    };
    store
        .people()
        .read()
        .iter()
        .find(|p| p.id() == token)
        .map(|p| initials(&p.info().name))
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| "G".to_string())
}

#[component]
pub fn HeaderBar() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();
    let (menu_open, set_menu_open) = signal(false);

    let badge = move || badge_text(&ctx.session.get(), &store);

    let on_logout = move |_| {
        let session = Session::sign_out(&ctx.storage());
        log::info!("signed out");
        ctx.set_session(session);
        set_menu_open.set(false);
        ctx.navigate(Page::SignUp);
    };

    view! {
        <header class="header-bar">
            <span class="header-title">"Kanban Project Management Tool"</span>
            <div class="header-user">
                <button
                    id="userLink"
                    class="user-badge"
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_menu_open.update(|open| *open = !*open);
                    }
                >
                    {badge}
                </button>
                <Show when=move || menu_open.get()>
                    <nav id="userLinkOptions" class="user-menu">
                        <a class="user-menu-link" href="legal-notice.html">"Legal Notice"</a>
                        <a class="user-menu-link" href="privacy-policy.html">"Privacy Policy"</a>
                        <a class="user-menu-link" on:click=on_logout>"Log out"</a>
                    </nav>
                </Show>
            </div>
        </header>
    }
}
