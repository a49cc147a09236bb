//! Person Commands
//!
//! Accounts live under `login/`, address-book contacts under `contact/`.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::contacts::{next_account_color, ContactInput, CONTACT_COLOR};
use crate::error::{AppError, PersonAction};
use crate::models::{decode_collection, Collection, Person, PersonDoc};
use crate::remote::{encode, DocumentStore};
use crate::session::Session;
use crate::validation::{validate_sign_up, SignUpForm};

// ========================
// Argument Structs
// ========================

#[derive(Serialize)]
struct NewAccount<'a> {
    name: &'a str,
    email: String,
    password: &'a str,
    color: &'a str,
    phone: &'a str,
    #[serde(rename = "type")]
    kind: Collection,
}

#[derive(Serialize)]
struct NewContact<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    color: &'a str,
    #[serde(rename = "type")]
    kind: Collection,
}

// ========================
// Snapshot
// ========================

/// Raw `login` and `contact` collections as last read
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PeopleSnapshot {
    pub accounts: Value,
    pub contacts: Value,
}

impl PeopleSnapshot {
    /// Accounts first, then contacts, each in key order
    pub fn people(&self) -> Vec<Person> {
        let mut people = decode_people(Collection::Login, &self.accounts);
        people.extend(decode_people(Collection::Contact, &self.contacts));
        people
    }

    /// All person documents in one `key -> document` map; contacts win on key clashes
    pub fn merged(&self) -> Value {
        let mut merged = Map::new();
        for collection in [&self.accounts, &self.contacts] {
            if let Value::Object(docs) = collection {
                merged.extend(docs.iter().map(|(k, v)| (k.clone(), v.clone())));
            }
        }
        Value::Object(merged)
    }

    pub fn find_by_email(&self, email: &str) -> Option<Person> {
        let email = email.trim();
        self.people()
            .into_iter()
            .find(|p| p.info().email.eq_ignore_ascii_case(email))
    }

    /// Colors of existing accounts, oldest first
    pub fn account_colors(&self) -> Vec<String> {
        decode_people(Collection::Login, &self.accounts)
            .into_iter()
            .map(|p| p.info().color.clone())
            .collect()
    }
}

fn decode_people(collection: Collection, value: &Value) -> Vec<Person> {
    decode_collection::<PersonDoc>(value.clone())
        .into_iter()
        .map(|(id, doc)| Person::from_doc(collection, id, doc))
        .collect()
}

// ========================
// Commands
// ========================

pub async fn load_people<S: DocumentStore + ?Sized>(store: &S) -> Result<PeopleSnapshot, AppError> {
    let accounts = store.get(Collection::Login.path()).await?;
    let contacts = store.get(Collection::Contact.path()).await?;
    Ok(PeopleSnapshot { accounts, contacts })
}

pub async fn list_people<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Person>, AppError> {
    Ok(load_people(store).await?.people())
}

/// Validate the sign-up form and register a new account.
/// Returns the new account key.
pub async fn create_account<S: DocumentStore + ?Sized>(store: &S, form: &SignUpForm) -> Result<String, AppError> {
    let people = load_people(store).await?;
    let taken = !form.email.trim().is_empty() && people.find_by_email(&form.email).is_some();
    validate_sign_up(form, taken)?;

    let color = next_account_color(&people.account_colors());
    let path = Collection::Login.path();
    let body = encode(
        path,
        &NewAccount {
            name: form.name.trim(),
            email: form.email.trim().to_lowercase(),
            password: &form.password,
            color,
            phone: "",
            kind: Collection::Login,
        },
    )?;
    let id = store.post(path, &body).await?;
    log::info!("registered account {} with color {}", id, color);
    Ok(id)
}

pub async fn create_contact<S: DocumentStore + ?Sized>(store: &S, input: &ContactInput) -> Result<Person, AppError> {
    input.validate()?;
    let path = Collection::Contact.path();
    let body = encode(
        path,
        &NewContact {
            name: &input.name,
            email: &input.email,
            phone: &input.phone,
            color: CONTACT_COLOR,
            kind: Collection::Contact,
        },
    )?;
    let id = store.post(path, &body).await?;
    log::info!("added contact {}", id);

    let doc = PersonDoc {
        name: input.name.clone(),
        email: input.email.clone(),
        phone: input.phone.clone(),
        color: CONTACT_COLOR.to_string(),
        kind: Some(Collection::Contact),
    };
    Ok(Person::from_doc(Collection::Contact, id, doc))
}

/// Save contact form values onto an existing person
pub async fn save_person<S: DocumentStore + ?Sized>(
    store: &S,
    person: &Person,
    input: &ContactInput,
    session: &Session,
) -> Result<(), AppError> {
    person.authorize(PersonAction::Edit, session)?;
    input.validate()?;
    store.patch(&person.doc_path(), &input.patch_body(person)).await?;
    Ok(())
}

pub async fn delete_person<S: DocumentStore + ?Sized>(store: &S, person: &Person, session: &Session) -> Result<(), AppError> {
    person.authorize(PersonAction::Delete, session)?;
    store.delete(&person.doc_path()).await?;
    log::info!("deleted {}", person.doc_path());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::{FIRST_ACCOUNT_COLOR, PALETTE};
    use crate::remote::{MemoryStore, Method};
    use crate::validation::EMAIL_TAKEN;
    use serde_json::json;

    fn sign_up(name: &str, email: &str) -> SignUpForm {
        SignUpForm {
            name: name.into(),
            email: email.into(),
            password: "secret".into(),
            confirm_password: "secret".into(),
            privacy_accepted: true,
        }
    }

    fn seeded() -> MemoryStore {
        MemoryStore::with_root(json!({
            "login": {
                "-A1": { "name": "Anna Alt", "email": "anna@example.com", "color": "#FF5EB3", "type": "login" }
            },
            "contact": {
                "-C1": { "name": "Carl Cole", "email": "carl@example.com", "phone": "+491", "type": "contact" }
            }
        }))
    }

    #[tokio::test]
    async fn test_people_accounts_first() {
        let people = list_people(&seeded()).await.unwrap();
        assert_eq!(people.len(), 2);
        assert!(matches!(people[0], Person::Account(_)));
        assert!(matches!(people[1], Person::Contact(_)));
        assert_eq!(people[1].info().color, "#A8A8A8");
    }

    #[tokio::test]
    async fn test_first_account_color() {
        let store = MemoryStore::new();
        let id = create_account(&store, &sign_up("Zoe", "Zoe@Example.com")).await.unwrap();
        let stored = store.snapshot(&format!("login/{}", id));
        assert_eq!(stored["color"], FIRST_ACCOUNT_COLOR);
        assert_eq!(stored["email"], "zoe@example.com");
        assert_eq!(stored["type"], "login");
        assert_eq!(stored["phone"], "");
    }

    #[tokio::test]
    async fn test_next_account_takes_free_color() {
        let store = seeded();
        let id = create_account(&store, &sign_up("Ben", "ben@example.com")).await.unwrap();
        assert_eq!(store.snapshot(&format!("login/{}", id))["color"], PALETTE[1]);
    }

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let store = seeded();
        let err = create_account(&store, &sign_up("Anna", "ANNA@example.com")).await.unwrap_err();
        assert_eq!(err.message_for("emailInput"), Some(EMAIL_TAKEN));
        assert_eq!(store.count(Method::Post), 0);
    }

    #[tokio::test]
    async fn test_contact_lifecycle() {
        let store = MemoryStore::new();
        let guest = Session { token: None, name: Some("guest".into()) };

        let contact = create_contact(&store, &ContactInput::new("Dora", "dora@example.com", "12")).await.unwrap();
        assert_eq!(contact.info().color, CONTACT_COLOR);

        let edit = ContactInput::new("Dora Dee", "dora@example.org", "34");
        save_person(&store, &contact, &edit, &guest).await.unwrap();
        let stored = store.snapshot(&contact.doc_path());
        assert_eq!(stored["name"], "Dora Dee");
        assert_eq!(stored["email"], "dora@example.org");
        assert_eq!(stored["color"], CONTACT_COLOR);

        delete_person(&store, &contact, &guest).await.unwrap();
        assert!(store.snapshot(&contact.doc_path()).is_null());
    }

    #[tokio::test]
    async fn test_foreign_account_is_never_deleted() {
        let store = seeded();
        let anna = list_people(&store).await.unwrap().remove(0);
        let someone_else = Session { token: Some("-B2".into()), name: Some("b@example.com".into()) };

        let err = delete_person(&store, &anna, &someone_else).await.unwrap_err();
        assert_eq!(err.to_string(), "You can't delete other registered users.");
        assert_eq!(store.count(Method::Delete), 0);

        let err = save_person(&store, &anna, &ContactInput::new("X", "x@example.com", ""), &someone_else)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "You can't edit other registered users.");
        assert_eq!(store.count(Method::Patch), 0);
    }

    #[tokio::test]
    async fn test_owner_edits_account_without_email() {
        let store = seeded();
        let anna = list_people(&store).await.unwrap().remove(0);
        let owner = Session { token: Some("-A1".into()), name: Some("anna@example.com".into()) };

        save_person(&store, &anna, &ContactInput::new("Anna B", "changed@example.com", "99"), &owner)
            .await
            .unwrap();
        let stored = store.snapshot("login/-A1");
        assert_eq!(stored["name"], "Anna B");
        assert_eq!(stored["email"], "anna@example.com");
        assert_eq!(stored["phone"], "99");
    }

    #[test]
    fn test_merged_snapshot() {
        let snapshot = PeopleSnapshot {
            accounts: json!({ "k": { "name": "account" }, "a": { "name": "A" } }),
            contacts: json!({ "k": { "name": "contact" } }),
        };
        let merged = snapshot.merged();
        assert_eq!(merged["k"]["name"], "contact");
        assert_eq!(merged["a"]["name"], "A");
    }
}
