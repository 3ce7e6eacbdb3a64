//! Error taxonomy for the health-check workflow.
//!
//! Exactly one error kind propagates: [`CheckError`], raised by the
//! connectivity probe and converted into the failure envelope by the
//! orchestrator. [`StatusError`] is absorbed inside the status fetcher and
//! [`AlertError`] inside the alert dispatcher; neither crosses its layer.

use std::time::Duration;
use thiserror::Error;

/// Failure of the connectivity probe. The orchestrator is the only layer
/// allowed to handle this.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error("Database connection failed: {0}")]
    Connection(String),
}

/// Failure of the control-plane lookup, degraded into the `error` field of
/// the instance status.
#[derive(Debug, Error)]
pub enum StatusError {
    #[error("control plane not configured")]
    NotConfigured,

    #[error("RDS instance not found: {0}")]
    NotFound(String),

    #[error("control plane request failed: {0}")]
    Api(String),

    #[error("control plane request timed out after {0:?}")]
    Timeout(Duration),
}

/// Failure of the alert publish, logged and swallowed by the dispatcher.
#[derive(Debug, Error)]
pub enum AlertError {
    #[error("notification channel not configured")]
    NotConfigured,

    #[error("notification request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("notification rejected: {0}")]
    Rejected(String),

    #[error("notification publish timed out after {0:?}")]
    Timeout(Duration),
}
