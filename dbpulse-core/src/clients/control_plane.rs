//! HTTP control-plane client.

use async_trait::async_trait;
use dbpulse_models::InstanceDescriptor;
use tracing::debug;

use super::ControlPlane;
use crate::error::StatusError;

/// Queries the instance description endpoint of the control-plane API.
///
/// The lookup degrades gracefully when no base URL is configured: the
/// status fetcher absorbs [`StatusError::NotConfigured`] like any other
/// lookup failure, so an agent without a control plane still reports a
/// complete envelope.
pub struct HttpControlPlane {
    base_url: Option<String>,
    client: reqwest::Client,
}

impl HttpControlPlane {
    pub fn new(base_url: Option<String>) -> Self {
        if base_url.is_none() {
            debug!("control plane disabled (no base URL configured)");
        }
        Self {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    pub fn enabled(&self) -> bool {
        self.base_url.is_some()
    }

    fn instance_url(base_url: &str, identifier: &str) -> String {
        format!("{}/instances/{}", base_url.trim_end_matches('/'), identifier)
    }
}

#[async_trait]
impl ControlPlane for HttpControlPlane {
    async fn describe_instance(
        &self,
        identifier: &str,
    ) -> Result<Vec<InstanceDescriptor>, StatusError> {
        let base_url = self.base_url.as_deref().ok_or(StatusError::NotConfigured)?;
        let url = Self::instance_url(base_url, identifier);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| StatusError::Api(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StatusError::Api(format!("{url} returned {status}")));
        }

        response
            .json::<Vec<InstanceDescriptor>>()
            .await
            .map_err(|e| StatusError::Api(format!("invalid descriptor payload: {e}")))
    }
}
