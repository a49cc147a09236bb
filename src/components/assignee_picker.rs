//! Assignee Picker Component
//!
//! Dropdown of everyone in the person set with a name filter, checkboxes
//! and initials chips for the current selection.

use leptos::prelude::*;

use crate::components::Avatar;
use crate::models::{Assignee, Person};
use crate::store::{use_app_store, AppStateStoreFields};

fn matches_query(person: &Person, query: &str) -> bool {
    query.is_empty() || person.info().name.to_lowercase().contains(query)
}

#[component]
pub fn AssigneePicker(selected: RwSignal<Vec<Assignee>>) -> impl IntoView {
    let store = use_app_store();
    let (open, set_open) = signal(false);
    let (query, set_query) = signal(String::new());

    let candidates = move || {
        let query = query.get().trim().to_lowercase();
        store.people().with(|people| {
            people
                .iter()
                .filter(|p| matches_query(p, &query))
                .cloned()
                .collect::<Vec<_>>()
        })
    };

    let toggle = move |person: Person| {
        selected.update(|list| {
            match list.iter().position(|a| a.id == person.id()) {
                Some(position) => {
                    list.remove(position);
                }
                None => list.push(person.to_assignee()),
            }
        });
    };

    view! {
        <div class="assignee-picker">
            <div class="assignee-select" on:click=move |_| set_open.update(|o| *o = !*o)>
                <input
                    id="assignedTo"
                    type="text"
                    placeholder="Select contacts to assign"
                    prop:value=move || query.get()
                    on:input=move |ev| {
                        set_query.set(event_target_value(&ev));
                        set_open.set(true);
                    }
                    on:click=move |ev| {
                        ev.stop_propagation();
                        set_open.set(true);
                    }
                />
                <span class="assignee-arrow">{move || if open.get() { "▲" } else { "▼" }}</span>
            </div>

            <Show when=move || open.get()>
                <ul class="assignee-options">
                    <For
                        each=candidates
                        key=|p| p.id().to_string()
                        children=move |person| {
                            let id = person.id().to_string();
                            let info = person.info().clone();
                            let is_selected = Memo::new(move |_| selected.with(|list| list.iter().any(|a| a.id == id)));
                            let row_class = move || if is_selected.get() { "assignee-option selected" } else { "assignee-option" };
                            view! {
                                <li class=row_class on:click=move |_| toggle(person.clone())>
                                    <Avatar name=info.name.clone() email=info.email.clone() color=info.color.clone() />
                                    <span class="assignee-name">{info.name.clone()}</span>
                                    <input type="checkbox" prop:checked=move || is_selected.get() />
                                </li>
                            }
                        }
                    />
                </ul>
            </Show>

            <div class="assignee-chips">
                {move || selected.get().into_iter().map(|a| view! {
                    <Avatar name=a.name email=a.email color=a.color />
                }).collect_view()}
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonInfo;

    #[test]
    fn test_query_filters_by_name() {
        let person = Person::Contact(PersonInfo {
            id: "c1".into(),
            name: "Anna Alt".into(),
            email: "anna@example.com".into(),
            phone: String::new(),
            color: "#FF7A00".into(),
        });
        assert!(matches_query(&person, ""));
        assert!(matches_query(&person, "alt"));
        assert!(!matches_query(&person, "bob"));
    }
}
