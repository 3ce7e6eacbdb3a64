//! Instance status fetcher.

use std::time::Duration;

use dbpulse_models::InstanceStatus;
use tokio::time::timeout;
use tracing::{error, info};

use crate::clients::ControlPlane;
use crate::error::StatusError;

/// Bound on the control-plane call. The underlying client keeps its own
/// defaults; this cap holds for any implementation.
pub const CONTROL_PLANE_TIMEOUT: Duration = Duration::from_secs(30);

/// Derive the instance identifier from the endpoint: the substring before
/// the first dot, e.g. `mydb.abcdef.us-east-1.rds.amazonaws.com` -> `mydb`.
pub fn instance_identifier(endpoint: &str) -> &str {
    endpoint.split('.').next().unwrap_or(endpoint)
}

/// Look up the instance description for the configured endpoint.
///
/// Every failure mode, including an empty result and the timeout cap, is
/// converted into an [`InstanceStatus`] carrying only an error field. This
/// function never returns an error to its caller.
pub async fn fetch(control_plane: &dyn ControlPlane, endpoint: &str) -> InstanceStatus {
    let identifier = instance_identifier(endpoint);

    let lookup = async {
        let descriptors = control_plane.describe_instance(identifier).await?;
        descriptors
            .into_iter()
            .next()
            .ok_or_else(|| StatusError::NotFound(identifier.to_string()))
    };

    let result = match timeout(CONTROL_PLANE_TIMEOUT, lookup).await {
        Ok(result) => result,
        Err(_) => Err(StatusError::Timeout(CONTROL_PLANE_TIMEOUT)),
    };

    match result {
        Ok(descriptor) => {
            let status = InstanceStatus::from_descriptor(descriptor);
            info!(?status, "RDS instance status");
            status
        }
        Err(e) => {
            let message = format!("Failed to get RDS status: {e}");
            error!("{message}");
            InstanceStatus::from_error(message)
        }
    }
}
