//! Notification dispatch through Novu's event trigger API.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::models::notification::{NotificationPayload, Recipient};

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// What the notification service reports back for an accepted trigger.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Acknowledgement {
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub transaction_id: Option<String>,
}

#[async_trait]
pub trait NotificationDispatcher: Send + Sync {
    async fn dispatch(
        &self,
        template_id: &str,
        recipient: &Recipient,
        payload: &NotificationPayload,
    ) -> Result<Acknowledgement, DispatchError>;
}

#[derive(Debug, Serialize)]
struct TriggerRequest<'a> {
    name: &'a str,
    to: &'a Recipient,
    payload: &'a NotificationPayload,
}

#[derive(Debug, Deserialize)]
struct TriggerResponse {
    #[serde(default)]
    data: Acknowledgement,
}

#[derive(Debug, Deserialize)]
struct NovuError {
    message: serde_json::Value,
}

#[derive(Clone)]
pub struct NovuClient {
    client: Client,
    api_key: String,
    trigger_url: String,
}

impl NovuClient {
    pub fn new(base_url: &str, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            trigger_url: format!("{}/v1/events/trigger", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl NotificationDispatcher for NovuClient {
    async fn dispatch(
        &self,
        template_id: &str,
        recipient: &Recipient,
        payload: &NotificationPayload,
    ) -> Result<Acknowledgement, DispatchError> {
        let response = self
            .client
            .post(&self.trigger_url)
            .header("Authorization", format!("ApiKey {}", self.api_key))
            .json(&TriggerRequest {
                name: template_id,
                to: recipient,
                payload,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Novu reports validation failures as an array of messages.
            let message = match serde_json::from_str::<NovuError>(&body).map(|e| e.message) {
                Ok(serde_json::Value::String(s)) => s,
                Ok(other) => other.to_string(),
                Err(_) => body,
            };
            return Err(DispatchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let ack = response.json::<TriggerResponse>().await?.data;
        debug!(
            "Triggered '{}' for {}: acknowledged={} status={:?} transaction={:?}",
            template_id, recipient.email, ack.acknowledged, ack.status, ack.transaction_id
        );
        Ok(ack)
    }
}
