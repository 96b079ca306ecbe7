use std::sync::Arc;

use anyhow::Context;

use hwbot_core::{
    config::Config,
    domain::Cursor,
    notifier::Notifier,
    poller::{PollState, Poller},
};
use hwbot_practicum::PracticumClient;
use hwbot_telegram::TelegramMessenger;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    hwbot_core::logging::init("hwbot")?;

    let cfg = Config::load().context("startup aborted")?;
    tracing::debug!(?cfg, "configuration loaded");

    let api = Arc::new(
        PracticumClient::new(&cfg.endpoint, &cfg.practicum_token, cfg.request_timeout)
            .context("failed to build the status api client")?,
    );
    let chat = Arc::new(TelegramMessenger::from_token(
        cfg.telegram_token.clone(),
        cfg.chat_target(),
    ));

    let poller = Poller::new(api, Notifier::new(chat), cfg.retry_period);
    poller.run(PollState::new(Cursor::now())).await;

    Ok(())
}
