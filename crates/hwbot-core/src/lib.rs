//! Core domain + application logic for the homework status bot.
//!
//! This crate is intentionally framework-agnostic. The review API and the chat
//! live behind ports (traits) implemented in adapter crates.

pub mod config;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod notifier;
pub mod poller;
pub mod ports;
pub mod status;
pub mod validate;

pub use errors::{ApiRequestError, Error, Result};
