//! Sign Up Component
//!
//! Account registration and guest entry.

use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::context::{use_app_context, Page};
use crate::error::{field_message, AppError, FieldError};
use crate::session::Session;
use crate::validation::SignUpForm;

/// Time the success toast stays up before the summary opens
const SIGNED_UP_TOAST_MS: u32 = 2000;

#[component]
pub fn SignUp() -> impl IntoView {
    let ctx = use_app_context();

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let confirm = RwSignal::new(String::new());
    let privacy = RwSignal::new(false);
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let (toast, set_toast) = signal(false);
    let (busy, set_busy) = signal(false);

    let error_for = move |field: &'static str| {
        move || errors.with(|list| field_message(list, field).map(str::to_string))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get_untracked() {
            return;
        }
        let form = SignUpForm {
            name: name.get_untracked(),
            email: email.get_untracked(),
            password: password.get_untracked(),
            confirm_password: confirm.get_untracked(),
            privacy_accepted: privacy.get_untracked(),
        };
        set_busy.set(true);

        spawn_local(async move {
            match commands::create_account(&ctx.store(), &form).await {
                Ok(id) => {
                    errors.set(Vec::new());
                    let session = Session::sign_in(&ctx.storage(), &id, &form.email.trim().to_lowercase());
                    set_toast.set(true);
                    TimeoutFuture::new(SIGNED_UP_TOAST_MS).await;
                    set_toast.set(false);
                    ctx.set_session(session);
                    ctx.reload();
                    ctx.navigate(Page::Summary);
                }
                Err(AppError::Validation(list)) => errors.set(list),
                Err(e) => {
                    log::error!("sign up failed: {}", e);
                    ctx.notify(format!("Could not create the account: {}", e), None);
                }
            }
            set_busy.set(false);
        });
    };

    let on_guest = move |_| {
        let session = Session::guest(&ctx.storage());
        log::info!("guest session started");
        ctx.set_session(session);
        ctx.navigate(Page::Summary);
    };

    view! {
        <div class="sign-up-page">
            <img class="sign-up-logo" src="assets/images/logo.svg" alt="Join" />
            <form class="sign-up-form" novalidate=true on:submit=on_submit>
                <h1>"Sign up"</h1>

                <input
                    id="nameInput"
                    type="text"
                    placeholder="Name"
                    prop:value=move || name.get()
                    on:input=move |ev| name.set(event_target_value(&ev))
                />
                <span class="field-error">{error_for("nameInput")}</span>

                <input
                    id="emailInput"
                    type="email"
                    placeholder="Email"
                    prop:value=move || email.get()
                    on:input=move |ev| email.set(event_target_value(&ev))
                />
                <span class="field-error">{error_for("emailInput")}</span>

                <input
                    id="passwordInput"
                    type="password"
                    placeholder="Password"
                    prop:value=move || password.get()
                    on:input=move |ev| password.set(event_target_value(&ev))
                />
                <span class="field-error">{error_for("passwordInput")}</span>

                <input
                    id="confirmPasswordInput"
                    type="password"
                    placeholder="Confirm Password"
                    prop:value=move || confirm.get()
                    on:input=move |ev| confirm.set(event_target_value(&ev))
                />
                <span class="field-error">{error_for("confirmPasswordInput")}</span>

                <label class="privacy-check">
                    <input
                        id="acceptPrivacyPolicy"
                        type="checkbox"
                        prop:checked=move || privacy.get()
                        on:change=move |ev| privacy.set(event_target_checked(&ev))
                    />
                    "I accept the "
                    <a href="privacy-policy.html">"Privacy policy"</a>
                </label>
                <span class="field-error">{error_for("acceptPrivacyPolicy")}</span>

                <div class="sign-up-actions">
                    <button type="submit" class="btn-primary" disabled=move || busy.get()>"Sign up"</button>
                    <button type="button" class="btn-secondary" on:click=on_guest>"Guest log in"</button>
                </div>
            </form>

            <Show when=move || toast.get()>
                <div class="toast">"You Signed Up successfully"</div>
            </Show>
        </div>
    }
}
