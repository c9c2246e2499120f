use std::str::FromStr;

use crate::error::BotError;
use crate::homework::HomeworkRecord;

/// Review states reported by the Practicum API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeworkStatus {
    Approved,
    Reviewing,
    Rejected,
}

impl HomeworkStatus {
    /// Localized sentence shown to the student.
    pub fn verdict(self) -> &'static str {
        match self {
            HomeworkStatus::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            HomeworkStatus::Reviewing => "Работа взята на проверку ревьюером.",
            HomeworkStatus::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl FromStr for HomeworkStatus {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "approved" => Ok(HomeworkStatus::Approved),
            "reviewing" => Ok(HomeworkStatus::Reviewing),
            "rejected" => Ok(HomeworkStatus::Rejected),
            other => Err(BotError::UnknownStatus(other.to_string())),
        }
    }
}

/// Build the chat message for a homework record.
pub fn format_status(record: &HomeworkRecord) -> Result<String, BotError> {
    let name = record
        .homework_name
        .as_deref()
        .ok_or(BotError::MissingField("homework_name"))?;
    let status: HomeworkStatus = record
        .status
        .as_deref()
        .ok_or(BotError::MissingField("status"))?
        .parse()?;

    Ok(format!(
        "Изменился статус проверки работы \"{}\". {}",
        name,
        status.verdict()
    ))
}
