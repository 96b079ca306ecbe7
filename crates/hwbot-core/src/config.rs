use std::{env, fmt, fs, path::Path, time::Duration};

use crate::{domain::ChatTarget, errors::Error, Result};

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_RETRY_PERIOD: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

/// The three credentials the bot cannot start without.
#[derive(Clone, Default)]
pub struct Credentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub telegram_chat_id: Option<String>,
}

impl Credentials {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Self {
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN).and_then(non_empty),
            telegram_token: lookup(TELEGRAM_TOKEN).and_then(non_empty),
            telegram_chat_id: lookup(TELEGRAM_CHAT_ID).and_then(non_empty),
        }
    }

    /// Names of the credentials that are absent or blank, in declaration order.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (PRACTICUM_TOKEN, &self.practicum_token),
            (TELEGRAM_TOKEN, &self.telegram_token),
            (TELEGRAM_CHAT_ID, &self.telegram_chat_id),
        ]
        .into_iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Startup guard: returns whether every credential is present.
///
/// Missing names are logged at the highest severity.
pub fn check_tokens(creds: &Credentials) -> bool {
    let missing = creds.missing();
    if missing.is_empty() {
        return true;
    }
    tracing::error!(
        critical = true,
        missing = %missing.join(", "),
        "required credentials are missing"
    );
    false
}

/// Typed configuration for the bot.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,

    pub endpoint: String,
    pub retry_period: Duration,
    pub request_timeout: Duration,
}

impl Config {
    /// Load from the process environment, merging `./.env` first.
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(env_str)
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let creds = Credentials::from_lookup(&lookup);
        if !check_tokens(&creds) {
            return Err(Error::MissingCredentials {
                names: creds.missing(),
            });
        }
        let Credentials {
            practicum_token: Some(practicum_token),
            telegram_token: Some(telegram_token),
            telegram_chat_id: Some(telegram_chat_id),
        } = creds
        else {
            return Err(Error::Config("credentials vanished after check".to_string()));
        };

        let endpoint = lookup("PRACTICUM_ENDPOINT")
            .and_then(non_empty)
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let retry_period = secs(&lookup, "RETRY_PERIOD_SECS")?.unwrap_or(DEFAULT_RETRY_PERIOD);
        let request_timeout =
            secs(&lookup, "API_REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            endpoint,
            retry_period,
            request_timeout,
        })
    }

    pub fn chat_target(&self) -> ChatTarget {
        ChatTarget::parse(&self.telegram_chat_id)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint)
            .field("retry_period", &self.retry_period)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

fn secs(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<Duration>> {
    let Some(raw) = lookup(key).and_then(non_empty) else {
        return Ok(None);
    };
    match raw.trim().parse::<u64>() {
        Ok(v) if v > 0 => Ok(Some(Duration::from_secs(v))),
        _ => Err(Error::Config(format!(
            "{key} must be a positive number of seconds, got {raw:?}"
        ))),
    }
}

fn env_str(key: &str) -> Option<String> {
    env::var(key).ok()
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for (key, val) in parse_dotenv(&contents) {
        if env::var_os(&key).is_some() {
            continue; // do not override existing env
        }
        env::set_var(key, val);
    }
}

fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    let mut out = Vec::new();
    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let line = line.strip_prefix("export ").unwrap_or(line);
        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }

        let mut val = v.trim().to_string();
        // Strip optional surrounding quotes.
        if val.len() >= 2
            && ((val.starts_with('"') && val.ends_with('"'))
                || (val.starts_with('\'') && val.ends_with('\'')))
        {
            val = val[1..val.len() - 1].to_string();
        }

        out.push((key.to_string(), val));
    }
    out
}

fn non_empty(s: String) -> Option<String> {
    if s.trim().is_empty() {
        None
    } else {
        Some(s)
    }
}
