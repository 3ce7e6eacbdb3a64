//! Alert dispatcher.

use std::time::Duration;

use dbpulse_models::AlertMessage;
use tokio::time::timeout;
use tracing::{error, info};

use crate::clients::Notifier;
use crate::error::AlertError;
use crate::settings::CheckSettings;

/// Bound on the publish call, applied here so it holds for any channel.
pub const PUBLISH_TIMEOUT: Duration = Duration::from_secs(30);

/// Render and publish a health-check alert for the given error detail.
///
/// Delivery failures are logged and swallowed: an alert that cannot be sent
/// must neither mask the original failure being reported nor crash the
/// invocation.
pub async fn dispatch(notifier: &dyn Notifier, settings: &CheckSettings, detail: &str) {
    let alert = AlertMessage::new(&settings.rds_endpoint, &settings.db_name, detail);

    let publish = notifier.publish(&settings.topic_arn, &alert.subject, &alert.body);
    let result = match timeout(PUBLISH_TIMEOUT, publish).await {
        Ok(result) => result,
        Err(_) => Err(AlertError::Timeout(PUBLISH_TIMEOUT)),
    };

    match result {
        Ok(message_id) => {
            info!(%message_id, "Alert sent successfully");
        }
        Err(e) => {
            error!(error = %e, "Failed to send alert");
        }
    }
}
