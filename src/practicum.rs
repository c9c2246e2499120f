use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::error::BotError;

/// Source of homework status snapshots.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch every status change since `cursor` (a Unix timestamp).
    async fn fetch(&self, cursor: i64) -> Result<Value, BotError>;
}

/// Client for the Practicum `homework_statuses` endpoint.
pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            token: token.into(),
        }
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn fetch(&self, cursor: i64) -> Result<Value, BotError> {
        let params = [("from_date", cursor.to_string())];

        debug!("Requesting homework statuses: url={}, params={:?}", self.endpoint, params);

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, format!("OAuth {}", self.token))
            .query(&params)
            .send()
            .await
            .map_err(BotError::TransportFailure)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BotError::BadStatus {
                status,
                url: self.endpoint.clone(),
                params: format!("from_date={}", cursor),
            });
        }

        let body = response.text().await.map_err(BotError::TransportFailure)?;
        decode_body(&body)
    }
}

fn decode_body(body: &str) -> Result<Value, BotError> {
    serde_json::from_str(body).map_err(BotError::DecodeFailure)
}
