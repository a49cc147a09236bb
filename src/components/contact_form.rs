//! Contact Form Component
//!
//! Add or edit one person. Accounts keep their email.

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::components::Avatar;
use crate::contacts::{sanitize_name, sanitize_phone, ContactInput};
use crate::context::use_app_context;
use crate::error::{field_message, AppError, FieldError};
use crate::models::{Person, FALLBACK_COLOR};
use crate::store::{store_upsert_person, use_app_store};

#[component]
pub fn ContactForm(
    /// Person being edited; `None` adds a new contact
    person: Option<Person>,
    #[prop(into)] on_close: Callback<()>,
    /// Called with the saved email
    #[prop(into)] on_saved: Callback<String>,
) -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let info = person.as_ref().map(|p| p.info().clone());
    let name = RwSignal::new(info.as_ref().map(|i| i.name.clone()).unwrap_or_default());
    let email = RwSignal::new(info.as_ref().map(|i| i.email.clone()).unwrap_or_default());
    let phone = RwSignal::new(info.as_ref().map(|i| i.phone.clone()).unwrap_or_default());
    let errors = RwSignal::new(Vec::<FieldError>::new());
    let form_error = RwSignal::new(None::<String>);
    let (saving, set_saving) = signal(false);

    let email_locked = matches!(person, Some(Person::Account(_)));
    let is_edit = person.is_some();
    let badge_color = info.as_ref().map(|i| i.color.clone()).unwrap_or_else(|| FALLBACK_COLOR.to_string());
    let person = StoredValue::new(person);

    let error_for = move |field: &'static str| {
        move || errors.with(|list| field_message(list, field).map(str::to_string))
    };

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if saving.get_untracked() {
            return;
        }
        let input = ContactInput::new(&name.get_untracked(), &email.get_untracked(), &phone.get_untracked());
        if let Err(e) = input.validate() {
            errors.set(e.field_errors().to_vec());
            return;
        }
        errors.set(Vec::new());
        form_error.set(None);
        set_saving.set(true);

        let person = person.get_value();
        let session = ctx.session.get_untracked();
        spawn_local(async move {
            let remote = ctx.store();
            let result = match &person {
                Some(existing) => commands::save_person(&remote, existing, &input, &session).await,
                None => commands::create_contact(&remote, &input)
                    .await
                    .map(|created| store_upsert_person(&store, created)),
            };
            set_saving.set(false);

            match result {
                Ok(()) => {
                    let saved_email = match &person {
                        Some(Person::Account(info)) => info.email.clone(),
                        _ => input.email.clone(),
                    };
                    on_saved.run(saved_email);
                }
                Err(AppError::Validation(list)) => errors.set(list),
                Err(e @ AppError::Unauthorized { .. }) => form_error.set(Some(e.to_string())),
                Err(e) => {
                    log::error!("saving contact failed: {}", e);
                    ctx.notify(format!("Could not save the contact: {}", e), None);
                }
            }
        });
    };

    view! {
        <div class="overlay" on:click=move |_| on_close.run(())>
            <div class="overlay-panel contact-form-panel" on:click=|ev| ev.stop_propagation()>
                <div class="contact-form-side">
                    <h2>{if is_edit { "Edit contact" } else { "Add contact" }}</h2>
                    <Show when=move || !is_edit>
                        <p>"Tasks are better with a team!"</p>
                    </Show>
                </div>
                <form class="contact-form" novalidate=true on:submit=on_submit>
                    <button type="button" class="overlay-close" title="Close" on:click=move |_| on_close.run(())>"✕"</button>
                    {move || view! {
                        <Avatar name=name.get() email=email.get() color=badge_color.clone() class="avatar avatar-large" />
                    }}

                    <input
                        id="contactName"
                        type="text"
                        placeholder="Name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(sanitize_name(&event_target_value(&ev)))
                    />
                    <span class="field-error">{error_for("contactName")}</span>

                    <input
                        id="contactEmail"
                        type="email"
                        placeholder="Email"
                        readonly=email_locked
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <span class="field-error">{error_for("contactEmail")}</span>

                    <input
                        id="contactPhone"
                        type="tel"
                        placeholder="Phone"
                        prop:value=move || phone.get()
                        on:input=move |ev| phone.set(sanitize_phone(&event_target_value(&ev)))
                    />

                    {move || form_error.get().map(|message| view! { <p class="form-error">{message}</p> })}

                    <div class="form-footer">
                        <button type="button" class="btn-secondary" on:click=move |_| on_close.run(())>"Cancel ✗"</button>
                        <button type="submit" class="btn-primary" disabled=move || saving.get()>
                            {if is_edit { "Save ✓" } else { "Create contact ✓" }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
