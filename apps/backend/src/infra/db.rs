//! Database connection bootstrap.

use std::time::Duration;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbOwner, DbProfile};
use crate::error::AppError;

/// Connect to the database at the given URL with the standard pool settings.
pub async fn connect_db(url: &str) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(url.to_string());
    options
        .max_connections(10)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(8))
        .acquire_timeout(Duration::from_secs(8))
        .sqlx_logging(false);

    let conn = Database::connect(options)
        .await
        .map_err(|e| AppError::db_unavailable(format!("Failed to connect to database: {e}")))?;

    info!(backend = ?conn.get_database_backend(), "database connected");
    Ok(conn)
}

/// Single entrypoint used by the state builder: resolve the URL for the
/// profile/owner pair and connect.
pub async fn bootstrap_db(
    profile: DbProfile,
    owner: DbOwner,
) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile, owner)?;
    connect_db(&url).await
}
