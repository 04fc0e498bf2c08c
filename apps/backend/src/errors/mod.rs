//! Error handling for the club backend.

pub mod domain;
pub mod error_code;

pub use domain::DomainError;
pub use error_code::ErrorCode;

use crate::error::AppError;
use domain::{ConflictKind, InfraErrorKind, NotFoundKind};

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => {
                AppError::bad_request(ErrorCode::ValidationError, detail)
            }
            DomainError::Conflict(kind, detail) => {
                let code = match kind {
                    ConflictKind::UniqueEmail => ErrorCode::UniqueEmail,
                    ConflictKind::UniqueTeamName => ErrorCode::UniqueTeamName,
                    ConflictKind::GoogleSubMismatch => ErrorCode::GoogleSubMismatch,
                    ConflictKind::OptimisticLock => ErrorCode::OptimisticLock,
                    ConflictKind::ScoreboardExists => ErrorCode::ScoreboardExists,
                    ConflictKind::MatchStatus => ErrorCode::MatchStatusConflict,
                    _ => ErrorCode::Conflict,
                };
                AppError::conflict(code, detail)
            }
            DomainError::NotFound(kind, detail) => {
                let code = match kind {
                    NotFoundKind::User => ErrorCode::UserNotFound,
                    NotFoundKind::Player => ErrorCode::PlayerNotFound,
                    NotFoundKind::Team => ErrorCode::TeamNotFound,
                    NotFoundKind::Division => ErrorCode::DivisionNotFound,
                    NotFoundKind::Match => ErrorCode::MatchNotFound,
                    NotFoundKind::Scoreboard => ErrorCode::ScoreboardNotFound,
                    NotFoundKind::Event => ErrorCode::EventNotFound,
                    _ => ErrorCode::NotFound,
                };
                AppError::not_found(code, detail)
            }
            DomainError::Infra(kind, detail) => match kind {
                InfraErrorKind::Timeout => AppError::db_timeout(detail),
                InfraErrorKind::DbUnavailable => AppError::db_unavailable(detail),
                InfraErrorKind::DataCorruption => {
                    AppError::internal_with(ErrorCode::DataCorruption, detail)
                }
                _ => AppError::internal(detail),
            },
        }
    }
}

#[cfg(test)]
mod tests_error_mapping {
    use actix_web::http::StatusCode;

    use super::domain::{ConflictKind, InfraErrorKind, NotFoundKind};
    use super::{DomainError, ErrorCode};
    use crate::error::AppError;

    #[test]
    fn validation_maps_to_bad_request() {
        let app: AppError = DomainError::validation("bad hand score").into();
        assert_eq!(app.status(), StatusCode::BAD_REQUEST);
        assert_eq!(app.code(), ErrorCode::ValidationError);
    }

    #[test]
    fn conflict_kinds_map_to_specific_codes() {
        let app: AppError =
            DomainError::conflict(ConflictKind::UniqueEmail, "email taken").into();
        assert_eq!(app.status(), StatusCode::CONFLICT);
        assert_eq!(app.code(), ErrorCode::UniqueEmail);

        let app: AppError =
            DomainError::conflict(ConflictKind::OptimisticLock, "stale write").into();
        assert_eq!(app.code(), ErrorCode::OptimisticLock);
    }

    #[test]
    fn not_found_kinds_map_to_specific_codes() {
        let app: AppError = DomainError::not_found(NotFoundKind::Match, "match 9").into();
        assert_eq!(app.status(), StatusCode::NOT_FOUND);
        assert_eq!(app.code(), ErrorCode::MatchNotFound);
    }

    #[test]
    fn infra_maps_to_server_errors() {
        let app: AppError =
            DomainError::infra(InfraErrorKind::DbUnavailable, "pool down").into();
        assert_eq!(app.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(app.code(), ErrorCode::DbUnavailable);
    }
}
