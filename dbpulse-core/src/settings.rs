use std::time::Duration;

/// Resolved configuration for one health check. Built once at startup and
/// shared read-only across the workflow; never mutated after construction.
#[derive(Debug, Clone)]
pub struct CheckSettings {
    /// Database endpoint, also the source of the control-plane identifier
    pub rds_endpoint: String,
    pub db_name: String,
    pub db_user: String,
    pub db_pass: String,
    /// Notification topic the alert is published under
    pub topic_arn: String,
    pub timeouts: ConnectTimeouts,
}

/// Independent bounds for the probe connection
#[derive(Debug, Clone, Copy)]
pub struct ConnectTimeouts {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl Default for ConnectTimeouts {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(10),
            read: Duration::from_secs(10),
            write: Duration::from_secs(10),
        }
    }
}
