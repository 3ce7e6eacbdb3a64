//! Probe-and-report workflow for scheduled RDS health checks.
//!
//! One invocation runs the connectivity probe, consults the control plane
//! for the instance description, and on a probe failure dispatches a single
//! alert before returning a failure envelope. The collaborating services
//! (database, control plane, notification channel) sit behind traits in
//! [`clients`] so the workflow can be driven against test doubles.

pub mod alert;
pub mod clients;
pub mod error;
pub mod handler;
pub mod probe;
pub mod settings;
pub mod status;

#[cfg(test)]
pub(crate) mod testing;

pub use handler::HealthCheck;
pub use settings::{CheckSettings, ConnectTimeouts};
