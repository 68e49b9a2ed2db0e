use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;

use crate::domain::RelayPayload;
use crate::error::RelayError;

/// Destination of relayed telemetry.
#[async_trait]
pub trait Sink: Send + Sync {
    async fn send(&self, payload: &RelayPayload) -> Result<(), RelayError>;
}

/// Posts payloads to a ThingsBoard-style device telemetry URL
/// (`<base>/api/v1/<access token>/telemetry`).
pub struct HttpSink {
    client: Client,
    url: String,
}

impl HttpSink {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl Sink for HttpSink {
    async fn send(&self, payload: &RelayPayload) -> Result<(), RelayError> {
        let resp = self
            .client
            .post(&self.url)
            .header(CONTENT_TYPE, "application/json")
            .json(payload)
            .send()
            .await?;
        RelayError::check(resp).await?;
        Ok(())
    }
}
