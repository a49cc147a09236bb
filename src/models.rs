//! Frontend Models
//!
//! Documents stored in the remote database and their in-memory forms.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Color shown for people or assignees that never got one
pub const FALLBACK_COLOR: &str = "#A8A8A8";

fn fallback_color() -> String {
    FALLBACK_COLOR.to_string()
}

// ========================
// Board stages
// ========================

/// Board column a task sits in (stored as 0..=3)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Stage {
    ToDo,
    InProgress,
    AwaitFeedback,
    Done,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::ToDo, Stage::InProgress, Stage::AwaitFeedback, Stage::Done];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Stage> {
        Self::ALL.get(index).copied()
    }

    /// Column header text
    pub fn label(self) -> &'static str {
        match self {
            Stage::ToDo => "To do",
            Stage::InProgress => "In Progress",
            Stage::AwaitFeedback => "Await Feedback",
            Stage::Done => "Done",
        }
    }

    /// DOM id of the column container
    pub fn container_id(self) -> &'static str {
        match self {
            Stage::ToDo => "toDo",
            Stage::InProgress => "inProgress",
            Stage::AwaitFeedback => "awaitFeedback",
            Stage::Done => "done",
        }
    }

    /// Unknown containers fall back to the first column.
    pub fn from_container_id(container_id: &str) -> Stage {
        Self::ALL
            .into_iter()
            .find(|stage| stage.container_id() == container_id)
            .unwrap_or(Stage::ToDo)
    }
}

impl From<Stage> for u8 {
    fn from(stage: Stage) -> u8 {
        stage as u8
    }
}

impl TryFrom<u8> for Stage {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Stage::from_index(value as usize).ok_or_else(|| format!("stage {} is out of range", value))
    }
}

// ========================
// Priority
// ========================

/// Task priority; decodes leniently, anything unrecognised is Low
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Priority {
    Urgent,
    Medium,
    Low,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Urgent, Priority::Medium, Priority::Low];

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }

    /// Lowercase name, used for CSS classes and icon file names
    pub fn css_class(self) -> &'static str {
        match self {
            Priority::Urgent => "urgent",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }

    pub fn icon(self) -> String {
        format!("assets/images/{}.svg", self.css_class())
    }

    fn unset() -> Priority {
        Priority::Low
    }
}

impl From<String> for Priority {
    fn from(raw: String) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "urgent" => Priority::Urgent,
            "medium" => Priority::Medium,
            _ => Priority::Low,
        }
    }
}

impl From<Priority> for String {
    fn from(priority: Priority) -> String {
        priority.as_str().to_string()
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ========================
// Tasks
// ========================

/// Person assigned to a task (denormalised copy)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assignee {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default = "fallback_color")]
    pub color: String,
}

impl Assignee {
    /// Name, or email when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() { &self.email } else { &self.name }
    }
}

/// Identity of a subtask within its open checklist; never persisted
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubtaskId(pub u32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    #[serde(skip)]
    pub id: SubtaskId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub completed: bool,
}

impl Subtask {
    pub fn new(id: SubtaskId, name: impl Into<String>) -> Self {
        Self { id, name: name.into(), completed: false }
    }
}

/// Task document; `id` is the store key and is not part of the body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(skip)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default = "Priority::unset")]
    pub priority: Priority,
    #[serde(default)]
    pub category: String,
    pub stage: Stage,
    #[serde(default, deserialize_with = "lenient_list")]
    pub assigned_to: Vec<Assignee>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub task_index: i64,
}

pub const CARD_ID_PREFIX: &str = "task";

pub fn card_element_id(task_id: &str) -> String {
    format!("{}{}", CARD_ID_PREFIX, task_id)
}

/// Form contents for creating or editing a task
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub category: String,
    pub priority: Priority,
    pub assigned_to: Vec<Assignee>,
    pub subtasks: Vec<Subtask>,
}

impl Default for TaskDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            due_date: String::new(),
            category: String::new(),
            priority: Priority::Medium,
            assigned_to: Vec::new(),
            subtasks: Vec::new(),
        }
    }
}

impl TaskDraft {
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone(),
            due_date: task.due_date.clone(),
            category: task.category.clone(),
            priority: task.priority,
            assigned_to: task.assigned_to.clone(),
            subtasks: task.subtasks.clone(),
        }
    }

    /// Build the document for a new task; new subtasks always start incomplete.
    pub fn into_task(self, stage: Stage, task_index: i64) -> Task {
        Task {
            id: String::new(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            due_date: self.due_date.trim().to_string(),
            priority: self.priority,
            category: self.category,
            stage,
            assigned_to: self.assigned_to,
            subtasks: self
                .subtasks
                .into_iter()
                .filter(|s| !s.name.trim().is_empty())
                .map(|s| Subtask { completed: false, ..s })
                .collect(),
            task_index,
        }
    }

    /// Copy the edited fields onto `task`; stage, index and completion stay
    pub fn apply_to(&self, task: &mut Task) {
        task.title = self.title.trim().to_string();
        task.description = self.description.trim().to_string();
        task.due_date = self.due_date.trim().to_string();
        task.category = self.category.clone();
        task.priority = self.priority;
        task.assigned_to = self.assigned_to.clone();
        task.subtasks = self.subtasks.clone();
    }
}

// ========================
// People
// ========================

/// The two person collections in the store
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Login,
    Contact,
}

impl Collection {
    pub fn path(self) -> &'static str {
        match self {
            Collection::Login => "login",
            Collection::Contact => "contact",
        }
    }
}

/// Person document as stored in `login/` or `contact/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDoc {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default = "fallback_color")]
    pub color: String,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Collection>,
}

/// Display projection shared by accounts and contacts
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersonInfo {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub color: String,
}

/// Someone who can be assigned to tasks.
/// Accounts can only be changed by their owner, contacts by anyone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Person {
    Account(PersonInfo),
    Contact(PersonInfo),
}

impl Person {
    /// The collection a document was loaded from decides its variant.
    pub fn from_doc(collection: Collection, id: String, doc: PersonDoc) -> Self {
        let info = PersonInfo {
            id,
            name: doc.name,
            email: doc.email,
            phone: doc.phone,
            color: if doc.color.trim().is_empty() { fallback_color() } else { doc.color },
        };
        match collection {
            Collection::Login => Person::Account(info),
            Collection::Contact => Person::Contact(info),
        }
    }

    pub fn info(&self) -> &PersonInfo {
        match self {
            Person::Account(info) | Person::Contact(info) => info,
        }
    }

    pub fn id(&self) -> &str {
        &self.info().id
    }

    pub fn collection(&self) -> Collection {
        match self {
            Person::Account(_) => Collection::Login,
            Person::Contact(_) => Collection::Contact,
        }
    }

    /// Store path of this person's document
    pub fn doc_path(&self) -> String {
        format!("{}/{}", self.collection().path(), self.id())
    }

    pub fn to_assignee(&self) -> Assignee {
        let info = self.info();
        Assignee {
            id: info.id.clone(),
            name: info.name.clone(),
            email: info.email.clone(),
            color: info.color.clone(),
        }
    }
}

// ========================
// Wire helpers
// ========================

/// Accept `null`, arrays with holes, or key→object maps for list fields.
/// Firebase turns arrays into maps once they get sparse.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    let entries: Vec<Value> = match value {
        Value::Null => Vec::new(),
        Value::Array(items) => items,
        Value::Object(map) => {
            let mut entries: Vec<(String, Value)> = map.into_iter().collect();
            entries.sort_by(|(a, _), (b, _)| match (a.parse::<u64>(), b.parse::<u64>()) {
                (Ok(a), Ok(b)) => a.cmp(&b),
                _ => a.cmp(b),
            });
            entries.into_iter().map(|(_, v)| v).collect()
        }
        other => return Err(D::Error::custom(format!("expected a list, got {}", other))),
    };

    entries
        .into_iter()
        .filter(|v| !v.is_null())
        .map(|v| T::deserialize(v).map_err(D::Error::custom))
        .collect()
}

/// Decode a `key → document` collection, dropping documents that don't parse.
pub fn decode_collection<T: DeserializeOwned>(value: Value) -> BTreeMap<String, T> {
    let Value::Object(map) = value else {
        return BTreeMap::new();
    };
    map.into_iter()
        .filter_map(|(key, doc)| match serde_json::from_value::<T>(doc) {
            Ok(parsed) => Some((key, parsed)),
            Err(e) => {
                log::debug!("skipping document {}: {}", key, e);
                None
            }
        })
        .collect()
}
