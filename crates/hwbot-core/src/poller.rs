//! The poll loop: fetch, validate, compare, notify, advance, sleep.
//!
//! All state lives in [`PollState`], owned by the caller and threaded through
//! each [`Poller::tick`], so a single iteration can be driven in isolation.

use std::{
    collections::{HashMap, HashSet},
    sync::Arc,
    time::Duration,
};

use serde_json::Value;
use tokio::time::sleep;

use crate::{
    domain::Cursor,
    errors::Error,
    notifier::Notifier,
    ports::StatusApi,
    status::render_message,
    validate::{current_date, extract_homeworks},
    Result,
};

const FAILURE_PREFIX: &str = "Сбой в работе программы";

/// Error texts already relayed to the chat.
///
/// `reported` is never evicted, so it grows with the number of distinct
/// failures seen over the process lifetime.
#[derive(Clone, Debug, Default)]
pub struct ErrorMemory {
    last: Option<String>,
    reported: HashSet<String>,
}

impl ErrorMemory {
    /// Record a failure and decide whether it should be relayed.
    ///
    /// Relay only if it differs from the previous failure and was never relayed
    /// before. The "last" marker is updated either way.
    pub fn record(&mut self, text: &str) -> bool {
        let relay = self.last.as_deref() != Some(text) && !self.reported.contains(text);
        if relay {
            self.reported.insert(text.to_string());
        }
        self.last = Some(text.to_string());
        relay
    }

    pub fn clear_last(&mut self) {
        self.last = None;
    }

    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    pub fn reported_count(&self) -> usize {
        self.reported.len()
    }
}

/// Loop-local state, created at startup and kept for the process lifetime.
#[derive(Clone, Debug)]
pub struct PollState {
    pub cursor: Cursor,
    /// Last seen status per homework name.
    pub statuses: HashMap<String, String>,
    pub errors: ErrorMemory,
}

impl PollState {
    pub fn new(cursor: Cursor) -> Self {
        Self {
            cursor,
            statuses: HashMap::new(),
            errors: ErrorMemory::default(),
        }
    }
}

/// What a single iteration did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Iteration {
    /// The API returned no homeworks.
    NoUpdates,
    /// The newest homework still has the remembered status.
    Unchanged,
    /// A status change was announced (`delivered` is the chat outcome).
    Notified { delivered: bool },
    /// The iteration failed; `notified` tells whether the failure was relayed.
    Failed { notified: bool },
}

pub struct Poller {
    api: Arc<dyn StatusApi>,
    notifier: Notifier,
    retry_period: Duration,
}

impl Poller {
    pub fn new(api: Arc<dyn StatusApi>, notifier: Notifier, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            retry_period,
        }
    }

    /// Poll forever, sleeping `retry_period` after every iteration.
    pub async fn run(&self, mut state: PollState) {
        tracing::debug!(
            cursor = state.cursor.0,
            retry_period_secs = self.retry_period.as_secs(),
            "polling started"
        );
        loop {
            let outcome = self.tick(&mut state).await;
            tracing::debug!(?outcome, cursor = state.cursor.0, "iteration finished");
            sleep(self.retry_period).await;
        }
    }

    /// One iteration with its error boundary. Never fails.
    pub async fn tick(&self, state: &mut PollState) -> Iteration {
        match self.poll_once(state).await {
            Ok(outcome) => {
                state.errors.clear_last();
                outcome
            }
            Err(err) => self.report_failure(state, err).await,
        }
    }

    async fn poll_once(&self, state: &mut PollState) -> Result<Iteration> {
        let response = self.api.fetch_status(state.cursor).await?;
        let homeworks = extract_homeworks(&response)?;

        let outcome = match homeworks.first() {
            None => {
                tracing::debug!("no new statuses in the response");
                Iteration::NoUpdates
            }
            Some(homework) => self.check_homework(state, homework).await?,
        };

        match current_date(&response) {
            Some(ts) => state.cursor = Cursor(ts),
            None => tracing::debug!(
                cursor = state.cursor.0,
                "current_date is not a timestamp, keeping cursor"
            ),
        }
        Ok(outcome)
    }

    async fn check_homework(&self, state: &mut PollState, homework: &Value) -> Result<Iteration> {
        let key = status_key(homework);
        if let Some((name, status)) = &key {
            if state.statuses.get(name) == Some(status) {
                return Ok(Iteration::Unchanged);
            }
        }

        let message = render_message(homework)?;
        let delivered = self.notifier.notify(&message).await;
        if let Some((name, status)) = key {
            state.statuses.insert(name, status);
        }
        Ok(Iteration::Notified { delivered })
    }

    async fn report_failure(&self, state: &mut PollState, err: Error) -> Iteration {
        let text = err.to_string();
        let message = format!("{FAILURE_PREFIX}: {text}");
        tracing::error!(kind = err.kind(), "{message}");

        if !state.errors.record(&text) {
            return Iteration::Failed { notified: false };
        }
        self.notifier.notify(&message).await;
        Iteration::Failed { notified: true }
    }
}

// (homework name, status) as remembered between iterations. Only string
// names are remembered; anything else is announced every time.
fn status_key(homework: &Value) -> Option<(String, String)> {
    let name = homework.get("homework_name")?.as_str()?;
    let status = homework.get("status")?.as_str()?;
    Some((name.to_string(), status.to_string()))
}
