//! In-memory document store for tests
//!
//! Keeps one JSON tree and records every call made against it.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use percent_encoding::percent_decode_str;
use serde_json::{Map, Value};

use super::{DocumentStore, Method, StoreError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreCall {
    pub method: Method,
    pub path: String,
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    root: RefCell<Value>,
    calls: RefCell<Vec<StoreCall>>,
    next_key: Cell<u32>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_root(Value::Object(Map::new()))
    }

    pub fn with_root(root: Value) -> Self {
        Self { root: RefCell::new(root), ..Default::default() }
    }

    /// Make every write fail with HTTP 503 until switched off
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, method: Method) -> usize {
        self.calls.borrow().iter().filter(|c| c.method == method).count()
    }

    /// Current document at `path`
    pub fn snapshot(&self, path: &str) -> Value {
        let root = self.root.borrow();
        let mut node = &*root;
        for segment in segments(path) {
            match node.get(segment.as_str()) {
                Some(next) => node = next,
                None => return Value::Null,
            }
        }
        node.clone()
    }

    fn record(&self, method: Method, path: &str) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(StoreCall { method, path: path.to_string() });
        if method != Method::Get && self.fail_writes.get() {
            return Err(StoreError::Status { method, path: path.to_string(), status: 503 });
        }
        Ok(())
    }

    fn with_slot<R>(&self, path: &str, f: impl FnOnce(&mut Value) -> R) -> R {
        let mut root = self.root.borrow_mut();
        let mut node = &mut *root;
        for segment in segments(path) {
            if !node.is_object() {
                *node = Value::Object(Map::new());
            }
            let Value::Object(map) = node else { unreachable!() };
            node = map.entry(segment).or_insert(Value::Null);
        }
        f(node)
    }
}

fn segments(path: &str) -> Vec<String> {
    path.split('/')
        .filter(|s| !s.is_empty())
        .map(|s| percent_decode_str(s).decode_utf8_lossy().into_owned())
        .collect()
}

#[async_trait(?Send)]
impl DocumentStore for MemoryStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        self.record(Method::Get, path)?;
        Ok(self.snapshot(path))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<String, StoreError> {
        self.record(Method::Post, path)?;
        let n = self.next_key.get() + 1;
        self.next_key.set(n);
        let key = format!("-Key{:04}", n);
        self.with_slot(&format!("{}/{}", path, key), |slot| *slot = body.clone());
        Ok(key)
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), StoreError> {
        self.record(Method::Put, path)?;
        self.with_slot(path, |slot| *slot = body.clone());
        Ok(())
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<(), StoreError> {
        self.record(Method::Patch, path)?;
        self.with_slot(path, |slot| {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let (Value::Object(target), Value::Object(fields)) = (slot, body) {
                for (k, v) in fields {
                    target.insert(k.clone(), v.clone());
                }
            }
        });
        Ok(())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.record(Method::Delete, path)?;
        let mut parts = segments(path);
        let Some(last) = parts.pop() else {
            *self.root.borrow_mut() = Value::Object(Map::new());
            return Ok(());
        };
        let mut root = self.root.borrow_mut();
        let mut node = &mut *root;
        for segment in parts {
            match node.get_mut(segment.as_str()) {
                Some(next) => node = next,
                None => return Ok(()),
            }
        }
        if let Value::Object(map) = node {
            map.remove(&last);
        }
        Ok(())
    }
}
