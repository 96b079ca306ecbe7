use std::sync::Arc;

use crate::ports::ChatPort;

/// Delivers messages to the chat without ever failing the caller.
///
/// A broken chat must not stop polling, so delivery errors are logged and
/// reported as `false`.
#[derive(Clone)]
pub struct Notifier {
    chat: Arc<dyn ChatPort>,
}

impl Notifier {
    pub fn new(chat: Arc<dyn ChatPort>) -> Self {
        Self { chat }
    }

    pub async fn notify(&self, message: &str) -> bool {
        match self.chat.send_text(message).await {
            Ok(()) => {
                tracing::debug!(%message, "bot sent message");
                true
            }
            Err(e) => {
                tracing::error!(error = %e, kind = e.kind(), "failed to send chat message");
                false
            }
        }
    }
}
