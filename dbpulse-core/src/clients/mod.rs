//! Client seams for the three external collaborators.
//!
//! The workflow only ever talks to these traits; the production
//! implementations ([`MySqlDatabase`], [`HttpControlPlane`],
//! [`WebhookNotifier`]) are wired in by the agent binary.

pub mod control_plane;
pub mod mysql;
pub mod webhook;

pub use control_plane::HttpControlPlane;
pub use mysql::MySqlDatabase;
pub use webhook::WebhookNotifier;

use async_trait::async_trait;
use dbpulse_models::{InstanceDescriptor, LivenessRow};

use crate::error::{AlertError, StatusError};
use crate::settings::CheckSettings;

/// Opens probe connections to the database instance.
#[async_trait]
pub trait Database: Send + Sync {
    /// Establish a connection bounded by the configured connect timeout.
    async fn connect(&self, settings: &CheckSettings) -> anyhow::Result<Box<dyn ProbeConnection>>;
}

/// One open database connection, exclusively owned by a single probe call.
#[async_trait]
pub trait ProbeConnection: Send {
    /// Run the liveness query (a constant plus the server clock) and return
    /// its single row.
    async fn liveness(&mut self) -> anyhow::Result<LivenessRow>;

    /// Count the catalog tables. Best-effort diagnostic only.
    async fn table_count(&mut self) -> anyhow::Result<i64>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> anyhow::Result<()>;
}

/// Control-plane description API for managed database instances.
#[async_trait]
pub trait ControlPlane: Send + Sync {
    /// Describe the instance with the given identifier. An empty list means
    /// the identifier matched nothing.
    async fn describe_instance(
        &self,
        identifier: &str,
    ) -> Result<Vec<InstanceDescriptor>, StatusError>;
}

/// Notification channel for health-check alerts.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Publish a message under the given topic, returning the channel's
    /// message id.
    async fn publish(&self, topic: &str, subject: &str, body: &str) -> Result<String, AlertError>;
}
