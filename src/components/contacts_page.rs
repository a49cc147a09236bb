//! Contacts Page Component
//!
//! Alphabetical person list with a details pane and the add/edit forms.

use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::json;

use crate::browser::{post_to_contact_frame, FrameMessage};
use crate::commands;
use crate::components::{Avatar, ContactForm, DeleteConfirmButton};
use crate::contacts::group_by_initial;
use crate::context::use_app_context;
use crate::error::{AppError, PersonAction};
use crate::models::Person;
use crate::session::{remember_edited_contact, remember_selected_contact, take_edited_contact};
use crate::store::{store_remove_person, store_set_people, use_app_store, AppStateStoreFields};

#[derive(Clone, Debug, PartialEq)]
enum FormState {
    Closed,
    Add,
    Edit(Person),
}

#[component]
pub fn ContactsPage() -> impl IntoView {
    let ctx = use_app_context();
    let store = use_app_store();

    let selected = RwSignal::new(None::<String>);
    let form = RwSignal::new(FormState::Closed);
    let auth_error = RwSignal::new(None::<String>);

    // Fresh snapshot on every reload: selects the contact edited before it
    // and hands the raw collections to the embedded editor
    Effect::new(move |_| {
        let _ = ctx.reload_trigger.get();
        spawn_local(async move {
            let snapshot = match commands::load_people(&ctx.store()).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    log::error!("loading contacts failed: {}", e);
                    return;
                }
            };
            store_set_people(&store, snapshot.people());

            if let Some(email) = take_edited_contact(&ctx.storage()) {
                if let Some(person) = snapshot.find_by_email(&email) {
                    selected.set(Some(person.id().to_string()));
                }
            }

            let data = json!({ "login": snapshot.accounts, "contact": snapshot.contacts });
            let merged = snapshot.merged();
            let token = selected.get_untracked().unwrap_or_default();
            post_to_contact_frame(&FrameMessage::new(&data, &token, &merged));
        });
    });

    let groups = Memo::new(move |_| store.people().with(|people| group_by_initial(people)));
    let current = Memo::new(move |_| {
        let id = selected.get()?;
        store.people().with(|people| people.iter().find(|p| p.id() == id).cloned())
    });

    let select = move |person: &Person| {
        auth_error.set(None);
        let id = person.id().to_string();
        if selected.get_untracked().as_deref() == Some(id.as_str()) {
            selected.set(None);
        } else {
            remember_selected_contact(&ctx.storage(), &person.info().email);
            selected.set(Some(id));
        }
    };

    let on_saved = Callback::new(move |email: String| {
        form.set(FormState::Closed);
        remember_edited_contact(&ctx.storage(), &email);
        ctx.reload();
    });

    let on_edit = move |person: Person| {
        match person.authorize(PersonAction::Edit, &ctx.session.get_untracked()) {
            Ok(()) => {
                auth_error.set(None);
                form.set(FormState::Edit(person));
            }
            Err(e) => auth_error.set(Some(e.to_string())),
        }
    };

    let on_delete = move |person: Person| {
        let session = ctx.session.get_untracked();
        spawn_local(async move {
            match commands::delete_person(&ctx.store(), &person, &session).await {
                Ok(()) => {
                    store_remove_person(&store, person.id());
                    selected.set(None);
                    remember_edited_contact(&ctx.storage(), &person.info().email);
                    ctx.reload();
                }
                Err(e @ AppError::Unauthorized { .. }) => auth_error.set(Some(e.to_string())),
                Err(e) => {
                    log::error!("deleting {} failed: {}", person.doc_path(), e);
                    ctx.notify(format!("Could not delete the contact: {}", e), None);
                }
            }
        });
    };

    let details = move |person: Person| {
        let info = person.info().clone();
        let for_edit = person.clone();
        let for_delete = person.clone();
        view! {
            <div class="contact-details">
                <div class="contact-details-head">
                    <Avatar name=info.name.clone() email=info.email.clone() color=info.color.clone() class="avatar avatar-large" />
                    <div>
                        <h2 class="contact-details-name">{info.name.clone()}</h2>
                        <div class="contact-details-actions">
                            <button class="contact-edit" on:click=move |_| on_edit(for_edit.clone())>"Edit"</button>
                            <DeleteConfirmButton
                                button_class="contact-delete"
                                on_confirm=move |_| on_delete(for_delete.clone())
                            />
                        </div>
                    </div>
                </div>
                {move || auth_error.get().map(|message| view! { <p class="auth-error">{message}</p> })}
                <h3>"Contact Information"</h3>
                <span class="row-label">"Email"</span>
                <a class="contact-mail" href=format!("mailto:{}", info.email)>{info.email.clone()}</a>
                <span class="row-label">"Phone"</span>
                <span class="contact-phone">{info.phone.clone()}</span>
            </div>
        }
    };

    view! {
        <div class="contacts-page">
            <aside class="contact-list">
                <button class="btn-primary contact-add" on:click=move |_| form.set(FormState::Add)>
                    "Add new contact"
                </button>
                <For
                    each=move || groups.get()
                    key=|group| (group.letter, group.people.iter().map(|p| p.info().clone()).collect::<Vec<_>>())
                    children=move |group| {
                        view! {
                            <div class="contact-group">
                                <h3 class="contact-letter">{group.letter.to_string()}</h3>
                                {group.people.into_iter().map(|person| {
                                    let info = person.info().clone();
                                    let id = info.id.clone();
                                    let row_class = move || {
                                        if selected.with(|s| s.as_deref() == Some(id.as_str())) {
                                            "contact-row selected"
                                        } else {
                                            "contact-row"
                                        }
                                    };
                                    view! {
                                        <div class=row_class on:click=move |_| select(&person)>
                                            <Avatar name=info.name.clone() email=info.email.clone() color=info.color.clone() />
                                            <div class="contact-row-text">
                                                <span class="contact-name">{info.name.clone()}</span>
                                                <span class="contact-email">{info.email.clone()}</span>
                                            </div>
                                        </div>
                                    }
                                }).collect_view()}
                            </div>
                        }
                    }
                />
            </aside>

            <section class="contact-pane">
                <h1 class="contacts-title">"Contacts"</h1>
                <p class="contacts-subtitle">"Better with a team"</p>
                {move || current.get().map(details)}
            </section>

            {move || match form.get() {
                FormState::Closed => None,
                FormState::Add => Some(view! {
                    <ContactForm person=None on_close=move |_| form.set(FormState::Closed) on_saved=on_saved />
                }.into_any()),
                FormState::Edit(person) => Some(view! {
                    <ContactForm person=Some(person) on_close=move |_| form.set(FormState::Closed) on_saved=on_saved />
                }.into_any()),
            }}
        </div>
    }
}
