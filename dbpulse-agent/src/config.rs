use std::time::Duration;

use anyhow::{bail, Context, Result};
use dbpulse_core::{CheckSettings, ConnectTimeouts};

/// Agent configuration, resolved once before the invocation starts.
///
/// Missing or empty required variables abort the process; no alert is
/// attempted for a configuration error since the alert channel itself may
/// be unconfigured.
#[derive(Debug, Clone)]
pub struct Config {
    pub check: CheckSettings,
    pub control_plane_url: Option<String>,
    pub alert_webhook_url: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from(|key| std::env::var(key).ok())
    }

    // Reads through an injected lookup so tests never touch the process
    // environment.
    fn load_from(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            match get(key) {
                Some(value) if !value.trim().is_empty() => Ok(value),
                Some(_) => bail!("{key} must not be empty"),
                None => bail!("{key} must be set"),
            }
        };

        let timeout = |key: &str| -> Result<Duration> {
            match get(key) {
                Some(value) => {
                    let secs: u64 = value
                        .parse()
                        .with_context(|| format!("{key} must be a number of seconds"))?;
                    Ok(Duration::from_secs(secs))
                }
                None => Ok(Duration::from_secs(10)),
            }
        };

        let check = CheckSettings {
            rds_endpoint: required("RDS_ENDPOINT")?,
            db_name: get("DB_NAME").unwrap_or_else(|| "mysql".to_string()),
            db_user: required("DB_USER")?,
            db_pass: required("DB_PASS")?,
            topic_arn: required("SNS_TOPIC_ARN")?,
            timeouts: ConnectTimeouts {
                connect: timeout("DB_CONNECT_TIMEOUT_SECS")?,
                read: timeout("DB_READ_TIMEOUT_SECS")?,
                write: timeout("DB_WRITE_TIMEOUT_SECS")?,
            },
        };

        Ok(Self {
            check,
            control_plane_url: get("CONTROL_PLANE_URL"),
            alert_webhook_url: get("ALERT_WEBHOOK_URL"),
        })
    }
}
