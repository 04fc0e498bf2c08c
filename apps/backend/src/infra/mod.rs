//! Infrastructure layer - database connections, error mapping, state building.

pub mod db;
pub mod db_errors;
pub mod state;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Centralized helper to access the database connection from AppState.
///
/// Returns a borrowed reference to the DatabaseConnection if available,
/// or `AppError::DbUnavailable` if the database is not configured.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state
        .db()
        .ok_or_else(|| AppError::db_unavailable("Database connection not available"))
}

#[cfg(test)]
mod tests {
    use super::require_db;
    use crate::error::AppError;
    use crate::state::app_state::AppState;
    use crate::state::security_config::SecurityConfig;

    #[test]
    fn require_db_without_db_is_unavailable() {
        let app_state = AppState::new_without_db(SecurityConfig::default());

        match require_db(&app_state) {
            Err(AppError::DbUnavailable { .. }) => {}
            other => panic!("Expected DbUnavailable, got {other:?}"),
        }
    }
}
