//! Telegram adapter (teloxide).
//!
//! This crate implements the `hwbot-core` ChatPort over Telegram Bot API.

use async_trait::async_trait;

use teloxide::{prelude::*, types::Recipient};

use tokio::time::sleep;

use hwbot_core::{domain::ChatTarget, errors::Error, ports::ChatPort, Result};

/// Sends plain-text messages to one fixed chat.
#[derive(Clone)]
pub struct TelegramMessenger {
    bot: Bot,
    target: ChatTarget,
}

impl TelegramMessenger {
    pub fn new(bot: Bot, target: ChatTarget) -> Self {
        Self { bot, target }
    }

    pub fn from_token(token: impl Into<String>, target: ChatTarget) -> Self {
        Self::new(Bot::new(token), target)
    }

    fn recipient(&self) -> Recipient {
        tg_recipient(&self.target)
    }
}

/// Run a Bot API call, retrying once when Telegram asks us to back off.
async fn with_retry<T, Fut>(mut op: impl FnMut() -> Fut) -> Result<T>
where
    Fut: std::future::IntoFuture<Output = std::result::Result<T, teloxide::RequestError>>,
    Fut::IntoFuture: Send,
{
    const MAX_RETRIES: usize = 1;
    let mut attempts = 0usize;
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(teloxide::RequestError::RetryAfter(wait)) if attempts < MAX_RETRIES => {
                attempts += 1;
                tracing::debug!(?wait, "telegram flood control, retrying");
                sleep(wait).await;
            }
            Err(other) => return Err(map_err(other)),
        }
    }
}

fn tg_recipient(target: &ChatTarget) -> Recipient {
    match target {
        ChatTarget::Id(id) => Recipient::Id(teloxide::types::ChatId(*id)),
        ChatTarget::Username(name) => Recipient::ChannelUsername(name.clone()),
    }
}

fn map_err(e: teloxide::RequestError) -> Error {
    Error::Delivery(format!("telegram error: {e}"))
}

#[async_trait]
impl ChatPort for TelegramMessenger {
    async fn send_text(&self, text: &str) -> Result<()> {
        with_retry(|| self.bot.send_message(self.recipient(), text.to_string()))
            .await?;
        Ok(())
    }
}
