//! Remote Document Store
//!
//! JSON documents addressed by slash-separated paths. The live backend is a
//! Firebase Realtime Database reached over REST; every path maps to
//! `{base}{path}.json`.

mod firebase;
#[cfg(test)]
mod memory;

use std::fmt;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use serde_json::Value;
use thiserror::Error;

pub use firebase::FirebaseStore;
#[cfg(test)]
pub use memory::{MemoryStore, StoreCall};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        })
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{method} {path} failed: {source}")]
    Http {
        method: Method,
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{method} {path} returned HTTP {status}")]
    Status { method: Method, path: String, status: u16 },

    #[error("could not decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode body for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("POST {path} did not return a key")]
    MissingKey { path: String },
}

/// Path-addressed JSON document store
#[async_trait(?Send)]
pub trait DocumentStore {
    /// Document at `path`, or `Value::Null` when nothing is stored there
    async fn get(&self, path: &str) -> Result<Value, StoreError>;

    /// Append under `path`; returns the generated key
    async fn post(&self, path: &str, body: &Value) -> Result<String, StoreError>;

    /// Replace the document at `path`
    async fn put(&self, path: &str, body: &Value) -> Result<(), StoreError>;

    /// Merge top-level fields into the document at `path`
    async fn patch(&self, path: &str, body: &Value) -> Result<(), StoreError>;

    async fn delete(&self, path: &str) -> Result<(), StoreError>;
}

/// Characters that cannot appear raw inside one path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'?')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Join `collection` and `key` into a document path, escaping the key.
pub fn doc_path(collection: &str, key: &str) -> String {
    format!("{}/{}", collection, utf8_percent_encode(key, SEGMENT))
}

/// Serialize a request body
pub fn encode<T: serde::Serialize>(path: &str, body: &T) -> Result<Value, StoreError> {
    serde_json::to_value(body).map_err(|source| StoreError::Encode { path: path.to_string(), source })
}
