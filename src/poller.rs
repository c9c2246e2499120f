use std::time::Duration;

use tracing::{debug, error, info, warn};

use crate::error::BotError;
use crate::homework;
use crate::notifier::Notifier;
use crate::practicum::HomeworkApi;
use crate::verdict;

/// Result of a single poll cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A new status message was delivered.
    Notified,
    /// The status message matched the last one delivered.
    Unchanged,
    /// No homework changed since the cursor.
    NoHomework,
    /// The cycle failed; `alerted` says whether the chat was told.
    Failed { alerted: bool },
}

/// Owns the cursor and the last delivered message, and drives the
/// fetch → validate → format → notify cycle.
pub struct Poller<A, N> {
    api: A,
    notifier: N,
    cursor: i64,
    last_message: Option<String>,
    retry_period: Duration,
}

impl<A: HomeworkApi, N: Notifier> Poller<A, N> {
    pub fn new(api: A, notifier: N, initial_cursor: i64, retry_period: Duration) -> Self {
        Self {
            api,
            notifier,
            cursor: initial_cursor,
            last_message: None,
            retry_period,
        }
    }

    /// Poll forever, sleeping `retry_period` after every cycle whatever its outcome.
    pub async fn run(mut self) {
        info!(
            "Polling homework statuses every {}s, starting from {}",
            self.retry_period.as_secs(),
            self.cursor
        );
        loop {
            match self.tick().await {
                CycleOutcome::Failed { alerted } => {
                    debug!("Cycle failed, chat alerted: {}", alerted)
                }
                outcome => debug!("Cycle finished: {:?}", outcome),
            }
            tokio::time::sleep(self.retry_period).await;
        }
    }

    /// Run one cycle. Never fails; errors are logged and, when appropriate,
    /// relayed to the chat.
    pub async fn tick(&mut self) -> CycleOutcome {
        match self.cycle().await {
            Ok(outcome) => outcome,
            Err(err) => self.handle_failure(err).await,
        }
    }

    async fn cycle(&mut self) -> Result<CycleOutcome, BotError> {
        let response = self.api.fetch(self.cursor).await?;

        let outcome = match homework::extract_homework(&response) {
            Ok(record) => {
                let message = verdict::format_status(&record)?;
                self.deliver(message).await?
            }
            Err(BotError::EmptyList) => {
                debug!("No homework updates since {}", self.cursor);
                CycleOutcome::NoHomework
            }
            Err(e) => return Err(e),
        };

        if let Some(next) = homework::current_date(&response) {
            self.cursor = next;
        }
        Ok(outcome)
    }

    async fn deliver(&mut self, message: String) -> Result<CycleOutcome, BotError> {
        if self.last_message.as_deref() == Some(message.as_str()) {
            debug!("Status unchanged, nothing to send");
            return Ok(CycleOutcome::Unchanged);
        }

        self.notifier.notify(&message).await?;
        info!("Status update delivered: {}", message);
        self.last_message = Some(message);
        Ok(CycleOutcome::Notified)
    }

    async fn handle_failure(&mut self, err: BotError) -> CycleOutcome {
        if !err.alerts_operator() {
            match &err {
                BotError::SendFailure(_) => {
                    warn!("Status update not delivered, will retry next cycle: {}", err)
                }
                _ => error!("Unexpected API response: {}", err),
            }
            return CycleOutcome::Failed { alerted: false };
        }

        let message = format!("Сбой в работе программы: {}", err);
        error!("{}", message);

        if self.last_message.as_deref() == Some(message.as_str()) {
            return CycleOutcome::Failed { alerted: false };
        }

        match self.notifier.notify(&message).await {
            Ok(()) => {
                self.last_message = Some(message);
                CycleOutcome::Failed { alerted: true }
            }
            Err(send_err) => {
                error!("Could not alert the chat: {}", send_err);
                CycleOutcome::Failed { alerted: false }
            }
        }
    }
}

#[cfg(test)]
impl<A, N> Poller<A, N> {
    fn cursor(&self) -> i64 {
        self.cursor
    }

    fn last_message(&self) -> Option<&str> {
        self.last_message.as_deref()
    }
}
