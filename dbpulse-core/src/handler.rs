//! Orchestrator: the single entry point for one health-check invocation.

use std::sync::Arc;

use dbpulse_models::{CheckReport, InvocationContext};
use tracing::{error, info};

use crate::alert;
use crate::clients::{ControlPlane, Database, Notifier};
use crate::error::CheckError;
use crate::probe;
use crate::settings::CheckSettings;
use crate::status;

/// One health check, with its collaborators injected. The settings and
/// client handles are built once at startup and shared read-only.
pub struct HealthCheck {
    settings: CheckSettings,
    database: Arc<dyn Database>,
    control_plane: Arc<dyn ControlPlane>,
    notifier: Arc<dyn Notifier>,
}

impl HealthCheck {
    pub fn new(
        settings: CheckSettings,
        database: Arc<dyn Database>,
        control_plane: Arc<dyn ControlPlane>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            settings,
            database,
            control_plane,
            notifier,
        }
    }

    pub fn settings(&self) -> &CheckSettings {
        &self.settings
    }

    /// Run one invocation to a terminal envelope.
    ///
    /// The event payload and context are opaque pass-through values. A probe
    /// failure skips the status lookup, dispatches exactly one alert, and
    /// yields the 500 envelope; no error of any kind crosses this boundary.
    pub async fn run(&self, event: &serde_json::Value, context: &InvocationContext) -> CheckReport {
        let _ = event;
        if let Some(request_id) = &context.request_id {
            info!(%request_id, "Starting RDS health check");
        }

        match self.execute().await {
            Ok(report) => report,
            Err(e) => {
                let detail = e.to_string();
                let description = format!("RDS Health Check Failed: {detail}");
                error!("{description}");
                alert::dispatch(self.notifier.as_ref(), &self.settings, &detail).await;
                CheckReport::failure(description)
            }
        }
    }

    async fn execute(&self) -> Result<CheckReport, CheckError> {
        let connection_test = probe::run(self.database.as_ref(), &self.settings).await?;
        let rds_status = status::fetch(self.control_plane.as_ref(), &self.settings.rds_endpoint).await;

        let report = CheckReport::success(&self.settings.rds_endpoint, connection_test, rds_status);
        if let Ok(json) = serde_json::to_string(&report) {
            info!("Health check completed successfully: {json}");
        }
        Ok(report)
    }
}
