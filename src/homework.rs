use serde::Deserialize;
use serde_json::Value;

use crate::error::BotError;

/// The newest homework entry of an API response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct HomeworkRecord {
    #[serde(default)]
    pub homework_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Check the response shape and pull out the most recent homework.
///
/// The API lists homeworks newest first, so the first element is the one whose
/// status matters.
pub fn extract_homework(response: &Value) -> Result<HomeworkRecord, BotError> {
    let response = response
        .as_object()
        .ok_or_else(|| BotError::TypeMismatch("response is not a JSON object".into()))?;

    let homeworks = response
        .get("homeworks")
        .ok_or(BotError::MissingKey("homeworks"))?
        .as_array()
        .ok_or_else(|| BotError::TypeMismatch("`homeworks` is not a list".into()))?;

    let latest = homeworks.first().ok_or(BotError::EmptyList)?;
    if !latest.is_object() {
        return Err(BotError::TypeMismatch(
            "homework entry is not a JSON object".into(),
        ));
    }

    HomeworkRecord::deserialize(latest)
        .map_err(|e| BotError::TypeMismatch(format!("malformed homework entry: {}", e)))
}

/// The server time to use as the next `from_date`, if the response has one.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get("current_date").and_then(Value::as_i64)
}
