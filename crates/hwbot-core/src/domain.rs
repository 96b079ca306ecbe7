/// Unix timestamp (seconds) used as the `from_date` lower bound of a status query.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cursor(pub i64);

impl Cursor {
    pub fn now() -> Self {
        Self(chrono::Utc::now().timestamp())
    }
}

/// Review outcome reported by the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Parse the API `status` value. Unknown keys yield `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            Verdict::Approved => "approved",
            Verdict::Reviewing => "reviewing",
            Verdict::Rejected => "rejected",
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

/// Where notifications go. The configured id is opaque: numeric ids address a
/// chat directly, anything else is a public channel username.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChatTarget {
    Id(i64),
    Username(String),
}

impl ChatTarget {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        match raw.parse::<i64>() {
            Ok(id) => ChatTarget::Id(id),
            Err(_) if raw.starts_with('@') => ChatTarget::Username(raw.to_string()),
            Err(_) => ChatTarget::Username(format!("@{raw}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_keys_round_trip() {
        for v in Verdict::ALL {
            assert_eq!(Verdict::from_key(v.key()), Some(v));
        }
        assert_eq!(Verdict::from_key("unknown_status"), None);
        assert_eq!(Verdict::from_key("Approved"), None);
    }

    #[test]
    fn chat_target_accepts_ids_and_usernames() {
        assert_eq!(ChatTarget::parse("123456"), ChatTarget::Id(123456));
        assert_eq!(ChatTarget::parse(" -100200300 "), ChatTarget::Id(-100200300));
        assert_eq!(
            ChatTarget::parse("@homework_feed"),
            ChatTarget::Username("@homework_feed".into())
        );
        assert_eq!(
            ChatTarget::parse("homework_feed"),
            ChatTarget::Username("@homework_feed".into())
        );
    }
}
