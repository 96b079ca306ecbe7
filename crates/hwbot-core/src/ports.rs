use async_trait::async_trait;

use crate::{domain::Cursor, Result};

/// Hexagonal port for the homework review API.
///
/// Implementations perform exactly one request per call and return the decoded
/// body untouched; shape checks happen in [`crate::validate`].
#[async_trait]
pub trait StatusApi: Send + Sync {
    async fn fetch_status(&self, from_date: Cursor) -> Result<serde_json::Value>;
}

/// Hexagonal port for the chat the notifications are relayed to.
#[async_trait]
pub trait ChatPort: Send + Sync {
    async fn send_text(&self, text: &str) -> Result<()>;
}
