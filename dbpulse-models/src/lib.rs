use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome tag for a connectivity probe
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProbeStatus {
    Healthy,
    Failed,
}

/// Single row returned by the liveness query (`SELECT 1, NOW()`)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LivenessRow {
    /// Constant marker selected by the query, always 1
    pub health_check: i64,
    /// Server-side clock at query time
    pub server_time: DateTime<Utc>,
}

/// Result of the connectivity probe against the database instance
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConnectionOutcome {
    pub status: ProbeStatus,
    pub result: LivenessRow,
    pub message: String,
    /// Best-effort catalog table count; absent when the secondary query failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_count: Option<i64>,
}

impl ConnectionOutcome {
    pub fn healthy(result: LivenessRow, table_count: Option<i64>) -> Self {
        Self {
            status: ProbeStatus::Healthy,
            result,
            message: "Database connection successful".to_string(),
            table_count,
        }
    }
}

/// Instance description as returned by the control-plane API
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InstanceDescriptor {
    pub db_instance_status: Option<String>,
    pub multi_az: Option<bool>,
    pub availability_zone: Option<String>,
    pub secondary_availability_zone: Option<String>,
    pub engine: Option<String>,
    pub engine_version: Option<String>,
}

/// Control-plane view of the instance, or the lookup error when the
/// control plane could not be consulted. A lookup failure never escapes
/// this type; it is carried in `error` and the envelope stays well-formed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct InstanceStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub db_instance_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multi_az: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secondary_availability_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl InstanceStatus {
    pub fn from_descriptor(descriptor: InstanceDescriptor) -> Self {
        Self {
            db_instance_status: descriptor.db_instance_status,
            multi_az: descriptor.multi_az,
            availability_zone: descriptor.availability_zone,
            secondary_availability_zone: descriptor.secondary_availability_zone,
            engine: descriptor.engine,
            engine_version: descriptor.engine_version,
            error: None,
        }
    }

    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }
}

/// Envelope returned by every invocation. Serializes to the same JSON
/// shape on both branches as the scheduler-facing contract: `statusCode`
/// plus either the full check payload (200) or an error description (500).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CheckReport {
    Success {
        #[serde(rename = "statusCode")]
        status_code: u16,
        timestamp: DateTime<Utc>,
        rds_endpoint: String,
        connection_test: ConnectionOutcome,
        rds_status: InstanceStatus,
    },
    Failure {
        #[serde(rename = "statusCode")]
        status_code: u16,
        error: String,
        timestamp: DateTime<Utc>,
    },
}

impl CheckReport {
    pub fn success(
        rds_endpoint: impl Into<String>,
        connection_test: ConnectionOutcome,
        rds_status: InstanceStatus,
    ) -> Self {
        Self::Success {
            status_code: 200,
            timestamp: Utc::now(),
            rds_endpoint: rds_endpoint.into(),
            connection_test,
            rds_status,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self::Failure {
            status_code: 500,
            error: error.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::Success { status_code, .. } | Self::Failure { status_code, .. } => *status_code,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

/// Alert rendered on the failure branch and handed to the notifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

impl AlertMessage {
    pub fn new(rds_endpoint: &str, db_name: &str, detail: &str) -> Self {
        let subject = format!("RDS Health Check Alert - {rds_endpoint}");
        let body = format!(
            "RDS Health Check Alert\n\
             \n\
             Timestamp: {timestamp}\n\
             RDS Endpoint: {rds_endpoint}\n\
             Database: {db_name}\n\
             \n\
             Error Details:\n\
             {detail}\n\
             \n\
             Please check the RDS instance status and connectivity.\n",
            timestamp = Utc::now().to_rfc3339(),
        );
        Self { subject, body }
    }
}

/// Opaque invocation context passed through the entry point. Only its
/// existence matters to the workflow; the request id is used for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InvocationContext {
    pub request_id: Option<String>,
}
