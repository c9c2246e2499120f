use reqwest::StatusCode;
use thiserror::Error;

/// Every failure a poll cycle (or startup) can produce.
#[derive(Debug, Error)]
pub enum BotError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    ConfigMissing(Vec<&'static str>),

    #[error("homework API is unreachable: {0}")]
    TransportFailure(#[source] reqwest::Error),

    #[error("homework API returned {status} for {url} (params: {params})")]
    BadStatus {
        status: StatusCode,
        url: String,
        params: String,
    },

    #[error("failed to decode homework API response as JSON: {0}")]
    DecodeFailure(#[source] serde_json::Error),

    #[error("response is missing the expected key `{0}`")]
    MissingKey(&'static str),

    #[error("unexpected response shape: {0}")]
    TypeMismatch(String),

    #[error("homework list is empty")]
    EmptyList,

    #[error("homework record has no `{0}` field")]
    MissingField(&'static str),

    #[error("unknown homework status `{0}`")]
    UnknownStatus(String),

    #[error("failed to send Telegram message: {0}")]
    SendFailure(String),
}

impl BotError {
    /// Whether the poller should relay this failure to the chat. Missing
    /// response keys, empty lists and failed sends are only logged.
    pub fn alerts_operator(&self) -> bool {
        !matches!(
            self,
            BotError::MissingKey(_) | BotError::SendFailure(_) | BotError::EmptyList
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_missing_lists_names() {
        let err = BotError::ConfigMissing(vec!["PRACTICUM_TOKEN", "TELEGRAM_CHAT_ID"]);
        assert_eq!(
            err.to_string(),
            "missing required environment variables: PRACTICUM_TOKEN, TELEGRAM_CHAT_ID"
        );
    }

    #[test]
    fn test_bad_status_carries_diagnostics() {
        let err = BotError::BadStatus {
            status: StatusCode::NOT_FOUND,
            url: "https://example.test/api/".to_string(),
            params: "from_date=0".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("404"));
        assert!(text.contains("https://example.test/api/"));
        assert!(text.contains("from_date=0"));
    }

    #[test]
    fn test_alert_policy() {
        assert!(!BotError::MissingKey("homeworks").alerts_operator());
        assert!(!BotError::SendFailure("timeout".into()).alerts_operator());
        assert!(!BotError::EmptyList.alerts_operator());
        assert!(BotError::UnknownStatus("lost".into()).alerts_operator());
        assert!(BotError::TypeMismatch("not an object".into()).alerts_operator());
    }
}
