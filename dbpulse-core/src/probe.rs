//! Connectivity prober.

use dbpulse_models::ConnectionOutcome;
use tracing::{info, warn};

use crate::clients::Database;
use crate::error::CheckError;
use crate::settings::CheckSettings;

/// Open a bounded connection, run the liveness query, and best-effort count
/// the catalog tables. The connection is released on every exit path.
///
/// Connect and liveness failures propagate as [`CheckError::Connection`];
/// a failing table count only downgrades to a warning and never turns a
/// healthy probe into a failure.
pub async fn run(
    database: &dyn Database,
    settings: &CheckSettings,
) -> Result<ConnectionOutcome, CheckError> {
    let mut conn = database
        .connect(settings)
        .await
        .map_err(|e| CheckError::Connection(format!("{e:#}")))?;

    let result = match conn.liveness().await {
        Ok(row) => row,
        Err(e) => {
            if let Err(close_err) = conn.close().await {
                warn!(error = %close_err, "Failed to close probe connection");
            }
            return Err(CheckError::Connection(format!("{e:#}")));
        }
    };

    let table_count = match conn.table_count().await {
        Ok(count) => {
            info!("Database has {count} tables");
            Some(count)
        }
        Err(e) => {
            warn!(error = %e, "Could not count tables");
            None
        }
    };

    if let Err(e) = conn.close().await {
        warn!(error = %e, "Failed to close probe connection");
    }

    info!("Database connection test successful");
    Ok(ConnectionOutcome::healthy(result, table_count))
}
