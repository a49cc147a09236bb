//! Contacts
//!
//! Grouping, initials, color assignment, contact form hygiene and the
//! ownership rule for editing accounts.

use serde_json::{json, Value};

use crate::error::{check_fields, AppError, FieldError, PersonAction};
use crate::models::Person;
use crate::session::Session;
use crate::validation::{email_is_valid, CANNOT_BE_EMPTY, EMAIL_INVALID};

/// Account colors, handed out in order
pub const PALETTE: [&str; 14] = [
    "#FF5EB3", "#6E52FF", "#9327FF", "#00BEE8", "#1FD7C1", "#FF745E", "#FFA35E",
    "#FC71FF", "#FFC701", "#0038FF", "#C3FF2B", "#FFE62B", "#FF4646", "#FFBB2B",
];

/// Color of the very first account
pub const FIRST_ACCOUNT_COLOR: &str = "#FF7A00";
/// Color of contacts added from the contacts page
pub const CONTACT_COLOR: &str = "#FF7A00";

// ========================
// Colors
// ========================

/// Color for a new account given the colors of existing accounts, oldest first.
/// The first unused palette entry wins; once all are taken the entry after the
/// newest account's color is reused.
pub fn next_account_color(used: &[String]) -> &'static str {
    if used.is_empty() {
        return FIRST_ACCOUNT_COLOR;
    }
    let taken = |color: &str| used.iter().any(|u| u.eq_ignore_ascii_case(color));
    if let Some(free) = PALETTE.iter().copied().find(|c| !taken(*c)) {
        return free;
    }
    let newest = used
        .iter()
        .rev()
        .find_map(|u| PALETTE.iter().position(|c| c.eq_ignore_ascii_case(u)));
    match newest {
        Some(i) => PALETTE[(i + 1) % PALETTE.len()],
        None => PALETTE[0],
    }
}

// ========================
// Display helpers
// ========================

/// `Anna Maria Alt` -> `AA`, `Anna` -> `A`, blank -> empty
pub fn initials(name: &str) -> String {
    let words: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |word: &str| word.chars().next().map(|c| c.to_uppercase().collect::<String>());
    match words.as_slice() {
        [] => String::new(),
        [only] => first_letter(*only).unwrap_or_default(),
        [first, .., last] => {
            let mut out = first_letter(*first).unwrap_or_default();
            out.push_str(&first_letter(*last).unwrap_or_default());
            out
        }
    }
}

/// Initials of a name, falling back to the email, then `?`
pub fn badge_initials(name: &str, email: &str) -> String {
    let from_name = initials(name);
    if !from_name.is_empty() {
        return from_name;
    }
    let from_email = initials(email);
    if from_email.is_empty() { "?".to_string() } else { from_email }
}

/// One letter section of the contact list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactGroup {
    pub letter: char,
    pub people: Vec<Person>,
}

/// Sort by name (case-insensitive) and group by first letter.
/// Nameless entries go under `#`.
pub fn group_by_initial(people: &[Person]) -> Vec<ContactGroup> {
    let mut sorted: Vec<&Person> = people.iter().collect();
    sorted.sort_by_key(|p| p.info().name.trim().to_lowercase());

    let mut groups: Vec<ContactGroup> = Vec::new();
    for person in sorted {
        let letter = person
            .info()
            .name
            .trim()
            .chars()
            .next()
            .and_then(|c| c.to_uppercase().next())
            .unwrap_or('#');
        match groups.iter_mut().find(|g| g.letter == letter) {
            Some(group) => group.people.push(person.clone()),
            None => groups.push(ContactGroup { letter, people: vec![person.clone()] }),
        }
    }
    groups.sort_by_key(|g| g.letter);
    groups
}

// ========================
// Contact form
// ========================

/// Raw contact form values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Names never contain digits
pub fn sanitize_name(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_ascii_digit()).collect()
}

/// Phone numbers keep only digits and `+`
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit() || *c == '+').collect()
}

impl ContactInput {
    pub fn new(name: &str, email: &str, phone: &str) -> Self {
        Self {
            name: sanitize_name(name).trim().to_string(),
            email: email.trim().to_lowercase(),
            phone: sanitize_phone(phone),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone.is_empty()
    }

    /// Something must be filled in; an email, when given, must look like one
    pub fn validate(&self) -> Result<(), AppError> {
        let mut errors = Vec::new();
        if self.is_blank() {
            errors.push(FieldError::new("contactName", CANNOT_BE_EMPTY));
        }
        if !self.email.is_empty() && !email_is_valid(&self.email) {
            errors.push(FieldError::new("contactEmail", EMAIL_INVALID));
        }
        check_fields(errors)
    }

    /// Fields written when saving `person`; account emails are fixed
    pub fn patch_body(&self, person: &Person) -> Value {
        match person {
            Person::Contact(_) => json!({ "name": self.name, "email": self.email, "phone": self.phone }),
            Person::Account(_) => json!({ "name": self.name, "phone": self.phone }),
        }
    }
}

// ========================
// Ownership
// ========================

impl Person {
    /// Accounts may only be changed by their owner; contacts by anyone.
    pub fn authorize(&self, action: PersonAction, session: &Session) -> Result<(), AppError> {
        match self {
            Person::Contact(_) => Ok(()),
            Person::Account(info) if session.owns(&info.id) => Ok(()),
            Person::Account(_) => Err(AppError::Unauthorized { action }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PersonInfo;

    fn info(id: &str, name: &str) -> PersonInfo {
        PersonInfo {
            id: id.into(),
            name: name.into(),
            email: format!("{}@example.com", id),
            phone: String::new(),
            color: PALETTE[0].into(),
        }
    }

    fn colors(list: &[&str]) -> Vec<String> {
        list.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_first_account_gets_fallback() {
        assert_eq!(next_account_color(&[]), FIRST_ACCOUNT_COLOR);
    }

    #[test]
    fn test_first_unused_palette_color() {
        assert_eq!(next_account_color(&colors(&["#FF5EB3"])), "#6E52FF");
        assert_eq!(next_account_color(&colors(&["#6E52FF", "#FF7A00"])), "#FF5EB3");
    }

    #[test]
    fn test_full_palette_wraps_after_newest() {
        assert_eq!(next_account_color(&colors(&PALETTE)), PALETTE[0]);

        let mut shuffled = colors(&PALETTE);
        shuffled.swap(3, 13);
        // Newest account now holds PALETTE[3]
        assert_eq!(next_account_color(&shuffled), PALETTE[4]);
    }

    #[test]
    fn test_initials() {
        assert_eq!(initials("Anna Maria Alt"), "AA");
        assert_eq!(initials("  ben  "), "B");
        assert_eq!(initials(""), "");
        assert_eq!(badge_initials("", "zoe@example.com"), "Z");
        assert_eq!(badge_initials(" ", ""), "?");
    }

    #[test]
    fn test_grouping_is_sorted() {
        let people = vec![
            Person::Contact(info("c1", "bob Stone")),
            Person::Account(info("a1", "Anna Alt")),
            Person::Contact(info("c2", "Berta Bay")),
            Person::Contact(info("c3", "")),
        ];
        let groups = group_by_initial(&people);
        let letters: Vec<char> = groups.iter().map(|g| g.letter).collect();
        assert_eq!(letters, vec!['#', 'A', 'B']);

        let b: Vec<&str> = groups[2].people.iter().map(|p| p.info().name.as_str()).collect();
        assert_eq!(b, vec!["Berta Bay", "bob Stone"]);
    }

    #[test]
    fn test_input_hygiene() {
        let input = ContactInput::new(" R2D2 Droid ", " R2@Example.com ", "+49 (0) 123-45");
        assert_eq!(input.name, "RD Droid");
        assert_eq!(input.email, "r2@example.com");
        assert_eq!(input.phone, "+49012345");
        assert!(input.validate().is_ok());
        assert!(ContactInput::new("", "", "").is_blank());
    }

    #[test]
    fn test_input_validation() {
        let err = ContactInput::new("", "", "").validate().unwrap_err();
        assert_eq!(err.message_for("contactName"), Some(CANNOT_BE_EMPTY));

        let err = ContactInput::new("", "not-an-email", "").validate().unwrap_err();
        assert_eq!(err.message_for("contactName"), None);
        assert_eq!(err.message_for("contactEmail"), Some(EMAIL_INVALID));

        assert!(ContactInput::new("", "only@mail.de", "").validate().is_ok());
    }

    #[test]
    fn test_single_field_is_enough() {
        assert!(ContactInput::new("Anna Alt", "", "").validate().is_ok());
        assert!(ContactInput::new("", "", "+4912").validate().is_ok());
    }

    #[test]
    fn test_account_patch_omits_email() {
        let input = ContactInput::new("Anna", "new@example.com", "1");
        let body = input.patch_body(&Person::Account(info("a1", "Anna")));
        assert!(body.get("email").is_none());
        let body = input.patch_body(&Person::Contact(info("c1", "Anna")));
        assert_eq!(body["email"], "new@example.com");
    }

    #[test]
    fn test_only_owner_changes_account() {
        let owner = Session { token: Some("a1".into()), name: Some("a1@example.com".into()) };
        let guest = Session { token: None, name: Some("guest".into()) };
        let account = Person::Account(info("a1", "Anna"));
        let contact = Person::Contact(info("c1", "Carl"));

        assert!(account.authorize(PersonAction::Edit, &owner).is_ok());
        assert!(matches!(
            account.authorize(PersonAction::Delete, &guest),
            Err(AppError::Unauthorized { action: PersonAction::Delete })
        ));
        assert!(contact.authorize(PersonAction::Delete, &guest).is_ok());
    }
}
