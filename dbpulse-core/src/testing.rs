//! Scripted collaborator doubles for workflow tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use dbpulse_models::{InstanceDescriptor, LivenessRow};

use crate::clients::{ControlPlane, Database, Notifier, ProbeConnection};
use crate::error::{AlertError, StatusError};
use crate::settings::{CheckSettings, ConnectTimeouts};

pub fn test_settings() -> CheckSettings {
    CheckSettings {
        rds_endpoint: "mydb.abcdef.us-east-1.rds.amazonaws.com".to_string(),
        db_name: "appdb".to_string(),
        db_user: "app".to_string(),
        db_pass: "secret".to_string(),
        topic_arn: "arn:aws:sns:us-east-1:123456789012:rds-alerts".to_string(),
        timeouts: ConnectTimeouts::default(),
    }
}

pub fn test_liveness_row() -> LivenessRow {
    LivenessRow {
        health_check: 1,
        server_time: Utc.with_ymd_and_hms(2026, 8, 25, 12, 0, 0).unwrap(),
    }
}

pub fn available_descriptor() -> InstanceDescriptor {
    InstanceDescriptor {
        db_instance_status: Some("available".to_string()),
        multi_az: Some(true),
        availability_zone: Some("us-east-1a".to_string()),
        secondary_availability_zone: Some("us-east-1b".to_string()),
        engine: Some("mysql".to_string()),
        engine_version: Some("8.0.35".to_string()),
    }
}

/// Database double with scriptable failures at each probe step.
#[derive(Default)]
pub struct ScriptedDatabase {
    fail_connect: Option<String>,
    fail_liveness: Option<String>,
    fail_table_count: Option<String>,
    closed: Arc<AtomicBool>,
}

impl ScriptedDatabase {
    pub fn healthy() -> Self {
        Self::default()
    }

    pub fn failing_connect(message: &str) -> Self {
        Self {
            fail_connect: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_liveness(message: &str) -> Self {
        Self {
            fail_liveness: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn failing_table_count(message: &str) -> Self {
        Self {
            fail_table_count: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Database for ScriptedDatabase {
    async fn connect(&self, _settings: &CheckSettings) -> anyhow::Result<Box<dyn ProbeConnection>> {
        if let Some(message) = &self.fail_connect {
            anyhow::bail!("{message}");
        }
        Ok(Box::new(ScriptedConnection {
            fail_liveness: self.fail_liveness.clone(),
            fail_table_count: self.fail_table_count.clone(),
            closed: Arc::clone(&self.closed),
        }))
    }
}

struct ScriptedConnection {
    fail_liveness: Option<String>,
    fail_table_count: Option<String>,
    closed: Arc<AtomicBool>,
}

#[async_trait]
impl ProbeConnection for ScriptedConnection {
    async fn liveness(&mut self) -> anyhow::Result<LivenessRow> {
        if let Some(message) = &self.fail_liveness {
            anyhow::bail!("{message}");
        }
        Ok(test_liveness_row())
    }

    async fn table_count(&mut self) -> anyhow::Result<i64> {
        if let Some(message) = &self.fail_table_count {
            anyhow::bail!("{message}");
        }
        Ok(87)
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        self.closed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Control-plane double returning a fixed descriptor list, a fixed error,
/// or never resolving at all.
pub struct ScriptedControlPlane {
    script: Result<Vec<InstanceDescriptor>, String>,
    hang: bool,
    requested: Mutex<Vec<String>>,
}

impl ScriptedControlPlane {
    pub fn with_descriptors(descriptors: Vec<InstanceDescriptor>) -> Self {
        Self {
            script: Ok(descriptors),
            hang: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            script: Err(message.to_string()),
            hang: false,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn hanging() -> Self {
        Self {
            script: Ok(Vec::new()),
            hang: true,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested_identifiers(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlPlane for ScriptedControlPlane {
    async fn describe_instance(
        &self,
        identifier: &str,
    ) -> Result<Vec<InstanceDescriptor>, StatusError> {
        self.requested.lock().unwrap().push(identifier.to_string());
        if self.hang {
            std::future::pending::<()>().await;
        }
        match &self.script {
            Ok(descriptors) => Ok(descriptors.clone()),
            Err(message) => Err(StatusError::Api(message.clone())),
        }
    }
}

/// Notifier double recording every publish attempt.
#[derive(Default)]
pub struct RecordingNotifier {
    fail: bool,
    hang: bool,
    attempts: AtomicUsize,
    published: Mutex<Vec<(String, String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::default()
        }
    }

    pub fn publish_attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn published(&self) -> Vec<(String, String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn publish(&self, topic: &str, subject: &str, body: &str) -> Result<String, AlertError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            std::future::pending::<()>().await;
        }
        if self.fail {
            return Err(AlertError::Rejected("endpoint unavailable".to_string()));
        }
        self.published
            .lock()
            .unwrap()
            .push((topic.to_string(), subject.to_string(), body.to_string()));
        Ok("msg-0001".to_string())
    }
}
