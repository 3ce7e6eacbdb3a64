use std::sync::Arc;

use anyhow::Result;
use dbpulse_core::clients::{HttpControlPlane, MySqlDatabase, WebhookNotifier};
use dbpulse_core::HealthCheck;
use dbpulse_models::InvocationContext;
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

/// Tracing goes to stderr so stdout carries only the envelope JSON the
/// scheduler consumes.
fn initialize_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,dbpulse_core=debug".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    initialize_tracing();

    // Fail fast on configuration errors; there is no alert channel to lean
    // on before configuration is resolved.
    let config = Config::load()?;
    tracing::info!(endpoint = %config.check.rds_endpoint, "Starting RDS health check");

    let check = HealthCheck::new(
        config.check.clone(),
        Arc::new(MySqlDatabase::new()),
        Arc::new(HttpControlPlane::new(config.control_plane_url.clone())),
        Arc::new(WebhookNotifier::new(config.alert_webhook_url.clone())),
    );

    let report = check
        .run(&serde_json::json!({}), &InvocationContext::default())
        .await;

    println!("{}", serde_json::to_string_pretty(&report)?);

    if !report.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
