//! # Transport Port
//!
//! The client never speaks HTTP itself. An authenticated session (cookie
//! login, API key handling, retries, timeouts) implements [`Transport`] and
//! is handed to [`crate::client::IpGroupClient`].

use async_trait::async_trait;
use serde_json::Value;

/// Form or query fields, in submission order.
pub type Fields = [(&'static str, String)];

#[async_trait]
pub trait Transport: Send + Sync {
    /// Issues a GET with `query` appended to `path`.
    async fn get(&self, path: &str, query: &Fields) -> anyhow::Result<Value>;

    /// Issues a form-encoded POST.
    ///
    /// Endpoints that answer with plain text (e.g. `deleteIPGroup`) are
    /// surfaced as [`Value::String`].
    async fn post(&self, path: &str, form: &Fields) -> anyhow::Result<Value>;
}
