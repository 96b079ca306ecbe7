/// Core error type for the homework bot.
///
/// Adapter crates map their specific errors into this type so the poll loop
/// can handle every failure through one boundary. The display text of the
/// recoverable kinds is what ends up in the chat, so it is kept human-readable.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Отсутствуют обязательные токены: {}", .names.join(", "))]
    MissingCredentials { names: Vec<&'static str> },

    #[error(transparent)]
    ApiRequest(#[from] ApiRequestError),

    #[error("Ответ API имеет неверный формат: {0}")]
    WrongType(String),

    #[error("Отсутствует ожидаемый ключ \"{0}\" в ответе API")]
    MissingKey(&'static str),

    #[error("{0}")]
    HomeworkStatus(String),

    #[error("Ошибка при отправке сообщения: {0}")]
    Delivery(String),

    #[error("config error: {0}")]
    Config(String),
}

impl Error {
    /// Short, stable name of the failure kind for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::MissingCredentials { .. } => "missing_credentials",
            Error::ApiRequest(_) => "api_request",
            Error::WrongType(_) => "wrong_type",
            Error::MissingKey(_) => "missing_key",
            Error::HomeworkStatus(_) => "homework_status",
            Error::Delivery(_) => "delivery",
            Error::Config(_) => "config",
        }
    }

    /// Only a startup failure stops the bot; everything else is retried next cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::MissingCredentials { .. })
    }
}

/// Failures of the status request itself.
#[derive(Debug, thiserror::Error)]
pub enum ApiRequestError {
    #[error("Ошибка запроса к API: {0}")]
    Transport(String),

    #[error(
        "Эндпоинт {endpoint} недоступен.\n Код ответа API: {status}.\n URL запроса: {url}.\n Хедеры ответа: {headers}.\n Текст ответа: {body}"
    )]
    Status {
        endpoint: String,
        status: u16,
        url: String,
        headers: String,
        body: String,
    },

    #[error("Ошибка декодирования ответа API: {0}")]
    Decode(String),
}

impl ApiRequestError {
    /// HTTP status code, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiRequestError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_missing_credentials_is_fatal() {
        let missing = Error::MissingCredentials {
            names: vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"],
        };
        assert!(missing.is_fatal());
        assert_eq!(
            missing.to_string(),
            "Отсутствуют обязательные токены: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );

        assert!(!Error::MissingKey("homeworks").is_fatal());
        assert!(!Error::Delivery("chat not found".into()).is_fatal());
        assert!(!Error::from(ApiRequestError::Transport("timed out".into())).is_fatal());
    }

    #[test]
    fn status_failure_carries_diagnostics() {
        let err = ApiRequestError::Status {
            endpoint: "https://example.test/api/".into(),
            status: 503,
            url: "https://example.test/api/?from_date=0".into(),
            headers: "{\"server\": \"nginx\"}".into(),
            body: "maintenance".into(),
        };
        assert_eq!(err.status(), Some(503));
        let text = Error::from(err).to_string();
        assert!(text.contains("Код ответа API: 503"));
        assert!(text.contains("https://example.test/api/?from_date=0"));
        assert!(text.contains("maintenance"));
    }
}
