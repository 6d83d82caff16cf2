//! Shared fixtures for the HTTP-level tests.

#![allow(dead_code)] // not every binary uses every fixture

use std::sync::{Arc, Mutex};

use chrono::DateTime;
use serde_json::json;
use url::Url;
use wiremock::{Request, Respond, ResponseTemplate};

use shopkeeper_client::{
    ClientConfig, MemoryTokenStore, NoticeKind, Notifier, StorageError, StoredToken, TokenStore,
};

/// Ordered record of cross-component events, shared by spies.
#[derive(Clone, Default)]
pub struct EventLog(Arc<Mutex<Vec<String>>>);

impl EventLog {
    pub fn push(&self, event: &str) {
        self.0.lock().expect("event lock").push(event.to_owned());
    }

    pub fn snapshot(&self) -> Vec<String> {
        self.0.lock().expect("event lock").clone()
    }
}

/// Notifier that records every notice it is handed.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<(NoticeKind, String, Option<String>)>>>,
}

impl RecordingNotifier {
    pub fn notices(&self) -> Vec<(NoticeKind, String, Option<String>)> {
        self.notices.lock().expect("notice lock").clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NoticeKind, title: &str, detail: Option<&str>) {
        self.notices
            .lock()
            .expect("notice lock")
            .push((kind, title.to_owned(), detail.map(str::to_owned)));
    }
}

/// Token store that logs every durable write into the shared event log.
pub struct LoggingStore {
    inner: MemoryTokenStore,
    log: EventLog,
}

impl LoggingStore {
    pub fn new(inner: MemoryTokenStore, log: EventLog) -> Self {
        Self { inner, log }
    }
}

impl TokenStore for LoggingStore {
    fn get(&self, key: &str) -> Result<Option<StoredToken>, StorageError> {
        self.inner.get(key)
    }

    fn set(
        &mut self,
        key: &str,
        value: &str,
        expires_at: DateTime<chrono::Utc>,
    ) -> Result<(), StorageError> {
        self.log.push("persist");
        self.inner.set(key, value, expires_at)
    }

    fn clear(&mut self, key: &str) -> Result<(), StorageError> {
        self.inner.clear(key)
    }
}

/// Responder that logs the catalog hit into the shared event log before
/// answering.
pub struct LoggingResponder {
    log: EventLog,
    body: serde_json::Value,
}

impl LoggingResponder {
    pub fn new(log: EventLog, body: serde_json::Value) -> Self {
        Self { log, body }
    }
}

impl Respond for LoggingResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.log.push("fetch");
        ResponseTemplate::new(200).set_body_json(self.body.clone())
    }
}

/// Configuration pointed at a mock server.
pub fn test_config(base_url: &str) -> ClientConfig {
    ClientConfig {
        api_base: Url::parse(base_url).expect("mock server uri"),
        api_path: "teststore".to_owned(),
        state_dir: std::path::PathBuf::from("."),
        username: None,
        password: None,
    }
}

/// A product object in the service's wire format.
pub fn product_json(id: &str, title: &str) -> serde_json::Value {
    json!({
        "id": id,
        "title": title,
        "origin_price": 140,
        "price": 99,
        "is_enabled": 1,
        "category": "coffee",
        "description": "Short description.",
        "content": "Long-form content.",
        "imageUrl": "https://img.example.com/main.jpg"
    })
}
