//! Firebase Realtime Database REST client

use async_trait::async_trait;
use serde_json::Value;

use super::{DocumentStore, Method, StoreError};

#[derive(Clone, Debug)]
pub struct FirebaseStore {
    base_url: String,
}

impl FirebaseStore {
    /// `base_url` must end with `/`
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}.json", self.base_url, path.trim_matches('/'))
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value, StoreError> {
        let url = self.endpoint(path);
        let client = reqwest::Client::new();
        let request = match method {
            Method::Get => client.get(&url),
            Method::Post => client.post(&url),
            Method::Put => client.put(&url),
            Method::Patch => client.patch(&url),
            Method::Delete => client.delete(&url),
        };
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        log::debug!("{} {}", method, url);
        let http_error = |source| StoreError::Http { method, path: path.to_string(), source };

        let response = request.send().await.map_err(http_error)?;
        let status = response.status();
        if !status.is_success() {
            log::warn!("{} {} -> {}", method, url, status);
            return Err(StoreError::Status {
                method,
                path: path.to_string(),
                status: status.as_u16(),
            });
        }

        let text = response.text().await.map_err(http_error)?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|source| StoreError::Decode { path: path.to_string(), source })
    }
}

#[async_trait(?Send)]
impl DocumentStore for FirebaseStore {
    async fn get(&self, path: &str) -> Result<Value, StoreError> {
        self.send(Method::Get, path, None).await
    }

    async fn post(&self, path: &str, body: &Value) -> Result<String, StoreError> {
        let reply = self.send(Method::Post, path, Some(body)).await?;
        reply
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MissingKey { path: path.to_string() })
    }

    async fn put(&self, path: &str, body: &Value) -> Result<(), StoreError> {
        self.send(Method::Put, path, Some(body)).await.map(|_| ())
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<(), StoreError> {
        self.send(Method::Patch, path, Some(body)).await.map(|_| ())
    }

    async fn delete(&self, path: &str) -> Result<(), StoreError> {
        self.send(Method::Delete, path, None).await.map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let store = FirebaseStore::new("https://db.example/");
        assert_eq!(store.endpoint("tasks"), "https://db.example/tasks.json");
        assert_eq!(store.endpoint("login/-Nk1/"), "https://db.example/login/-Nk1.json");
        assert_eq!(store.endpoint(""), "https://db.example/.json");
    }
}
