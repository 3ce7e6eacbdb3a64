//! Webhook notification channel.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Notifier;
use crate::error::AlertError;

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    topic: &'a str,
    subject: &'a str,
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct PublishResponse {
    #[serde(rename = "messageId")]
    message_id: Option<String>,
}

/// Publishes alerts by POSTing a JSON payload to a configured webhook.
///
/// An unconfigured channel reports [`AlertError::NotConfigured`]; the
/// dispatcher logs and swallows it, so a missing webhook never disturbs
/// the envelope returned to the scheduler.
pub struct WebhookNotifier {
    webhook_url: Option<String>,
    client: reqwest::Client,
}

impl WebhookNotifier {
    pub fn new(webhook_url: Option<String>) -> Self {
        if webhook_url.is_none() {
            debug!("alert webhook disabled (no URL configured)");
        }
        Self {
            webhook_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.webhook_url.is_some()
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn publish(&self, topic: &str, subject: &str, body: &str) -> Result<String, AlertError> {
        let url = self.webhook_url.as_deref().ok_or(AlertError::NotConfigured)?;

        let response = self
            .client
            .post(url)
            .json(&WebhookPayload {
                topic,
                subject,
                message: body,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AlertError::Rejected(format!("webhook returned {status}")));
        }

        // Channels that do not echo a message id still get a usable one.
        let message_id = response
            .json::<PublishResponse>()
            .await
            .ok()
            .and_then(|p| p.message_id)
            .unwrap_or_else(|| format!("http-{}", status.as_u16()));

        Ok(message_id)
    }
}
