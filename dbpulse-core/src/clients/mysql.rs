//! sqlx-backed MySQL probe client.

use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dbpulse_models::LivenessRow;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection};
use sqlx::{ConnectOptions, Connection, Row};
use tokio::time::timeout;

use super::{Database, ProbeConnection};
use crate::settings::CheckSettings;

const LIVENESS_SQL: &str = "SELECT 1 AS health_check, NOW() AS server_time";
const TABLE_COUNT_SQL: &str = "SELECT COUNT(*) AS table_count FROM information_schema.tables";

/// Probe client for MySQL-compatible instances. Every network operation is
/// bounded by the corresponding timeout from [`CheckSettings`].
#[derive(Debug, Default)]
pub struct MySqlDatabase;

impl MySqlDatabase {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Database for MySqlDatabase {
    async fn connect(&self, settings: &CheckSettings) -> anyhow::Result<Box<dyn ProbeConnection>> {
        let options = MySqlConnectOptions::new()
            .host(&settings.rds_endpoint)
            .username(&settings.db_user)
            .password(&settings.db_pass)
            .database(&settings.db_name)
            .disable_statement_logging();

        let conn = timeout(settings.timeouts.connect, MySqlConnection::connect_with(&options))
            .await
            .map_err(|_| {
                anyhow::anyhow!(
                    "connect to {} timed out after {:?}",
                    settings.rds_endpoint,
                    settings.timeouts.connect
                )
            })?
            .with_context(|| format!("connect to {} failed", settings.rds_endpoint))?;

        Ok(Box::new(MySqlProbeConnection {
            conn,
            read_timeout: settings.timeouts.read,
            write_timeout: settings.timeouts.write,
        }))
    }
}

struct MySqlProbeConnection {
    conn: MySqlConnection,
    read_timeout: Duration,
    write_timeout: Duration,
}

impl MySqlProbeConnection {
    async fn fetch_one(&mut self, sql: &'static str) -> anyhow::Result<sqlx::mysql::MySqlRow> {
        timeout(self.read_timeout, sqlx::query(sql).fetch_one(&mut self.conn))
            .await
            .map_err(|_| anyhow::anyhow!("query timed out after {:?}", self.read_timeout))?
            .with_context(|| format!("query failed: {sql}"))
    }
}

#[async_trait]
impl ProbeConnection for MySqlProbeConnection {
    async fn liveness(&mut self) -> anyhow::Result<LivenessRow> {
        let row = self.fetch_one(LIVENESS_SQL).await?;
        let health_check: i64 = row.try_get("health_check")?;
        let server_time: DateTime<Utc> = row.try_get("server_time")?;
        Ok(LivenessRow {
            health_check,
            server_time,
        })
    }

    async fn table_count(&mut self) -> anyhow::Result<i64> {
        let row = self.fetch_one(TABLE_COUNT_SQL).await?;
        Ok(row.try_get("table_count")?)
    }

    async fn close(self: Box<Self>) -> anyhow::Result<()> {
        timeout(self.write_timeout, self.conn.close())
            .await
            .map_err(|_| anyhow::anyhow!("close timed out"))?
            .context("close failed")
    }
}
