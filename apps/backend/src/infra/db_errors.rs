//! SeaORM -> DomainError translation helpers.
//!
//! Adapters surface raw `sea_orm::DbErr`; this module converts them into
//! `crate::errors::domain::DomainError` so higher layers can map to
//! `AppError` via `From`.

use tracing::warn;

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        map_db_err(e)
    }
}

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split_whitespace().next().map(|s| s.trim_end_matches(','));
    }
    None
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "user_credentials.email" => Some((ConflictKind::UniqueEmail, "Email already registered")),
        "user_credentials.google_sub" => Some((
            ConflictKind::Other("UniqueGoogleSub".into()),
            "Google account already linked to another user",
        )),
        "teams.division_id" => Some((
            ConflictKind::UniqueTeamName,
            "Team name already taken in this division",
        )),
        "scoreboards.match_id" => Some((
            ConflictKind::ScoreboardExists,
            "Scoreboard already open for this match",
        )),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("ux_user_credentials_email") {
        return Some((ConflictKind::UniqueEmail, "Email already registered"));
    }
    if error_msg.contains("ux_user_credentials_google_sub") {
        return Some((
            ConflictKind::Other("UniqueGoogleSub".into()),
            "Google account already linked to another user",
        ));
    }
    if error_msg.contains("ux_teams_division_id_name") {
        return Some((
            ConflictKind::UniqueTeamName,
            "Team name already taken in this division",
        ));
    }
    if error_msg.contains("ux_scoreboards_match_id") {
        return Some((
            ConflictKind::ScoreboardExists,
            "Scoreboard already open for this match",
        ));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("MATCH_NOT_FOUND:") => {
            if let Some(match_id) = msg
                .strip_prefix("MATCH_NOT_FOUND:")
                .and_then(|s| s.parse::<i64>().ok())
            {
                warn!(trace_id = %trace_id, match_id, "Match not found");
                return DomainError::not_found(
                    NotFoundKind::Match,
                    format!("Match {match_id} not found"),
                );
            }
            return DomainError::not_found(NotFoundKind::Match, "Match not found");
        }
        sea_orm::DbErr::Custom(msg) if msg.starts_with("OPTIMISTIC_LOCK:") => {
            if let Some(json_str) = msg.strip_prefix("OPTIMISTIC_LOCK:") {
                #[derive(serde::Deserialize)]
                struct LockInfo {
                    expected: i32,
                    actual: i32,
                }

                if let Ok(info) = serde_json::from_str::<LockInfo>(json_str) {
                    warn!(
                        trace_id = %trace_id,
                        expected = info.expected,
                        actual = info.actual,
                        "Optimistic lock conflict detected"
                    );

                    return DomainError::conflict(
                        ConflictKind::OptimisticLock,
                        format!(
                            "Resource was modified concurrently (expected version {}, actual version {}). Please refresh and retry.",
                            info.expected, info.actual
                        ),
                    );
                }
            }

            warn!(trace_id = %trace_id, "Optimistic lock conflict detected (version info unavailable)");
            return DomainError::conflict(
                ConflictKind::OptimisticLock,
                "Resource was modified by another transaction; please retry",
            );
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503")
        || error_msg.contains("FOREIGN KEY constraint failed")
    {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if mentions_sqlstate(&error_msg, "23514") || error_msg.contains("CHECK constraint failed") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Check constraint violation");
        return DomainError::validation("Check constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unclassified database error");
    DomainError::infra(InfraErrorKind::Other("Db".into()), "Database error")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_email_sqlite_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "UNIQUE constraint failed: user_credentials.email".to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => {}
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn unique_team_postgres_maps_to_conflict() {
        let err = sea_orm::DbErr::Custom(
            "duplicate key value violates unique constraint \"ux_teams_division_id_name\""
                .to_string(),
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueTeamName, _) => {}
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn optimistic_lock_payload_is_parsed() {
        let err =
            sea_orm::DbErr::Custom("OPTIMISTIC_LOCK:{\"expected\":3,\"actual\":4}".to_string());
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::OptimisticLock, detail) => {
                assert!(detail.contains("expected version 3"));
                assert!(detail.contains("actual version 4"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn match_not_found_custom_error() {
        let err = sea_orm::DbErr::Custom("MATCH_NOT_FOUND:42".to_string());
        match map_db_err(err) {
            DomainError::NotFound(NotFoundKind::Match, detail) => {
                assert!(detail.contains("42"));
            }
            other => panic!("unexpected mapping: {other:?}"),
        }
    }

    #[test]
    fn record_not_found_maps_generically() {
        let err = sea_orm::DbErr::RecordNotFound("whatever".to_string());
        match map_db_err(err) {
            DomainError::NotFound(NotFoundKind::Other(_), _) => {}
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
