//! Error codes for the club backend API.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses. Add new codes here; never pass ad-hoc
//! strings as error codes.

use core::fmt;

/// Centralized error codes for the club backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,
    /// User not found in database
    ForbiddenUserNotFound,
    /// Operation requires club admin
    AdminRequired,
    /// Invalid email or password
    InvalidCredentials,

    // Request Validation
    /// Invalid match ID provided
    InvalidMatchId,
    /// Invalid email address
    InvalidEmail,
    /// Password does not meet requirements
    InvalidPassword,
    /// Invalid Google sub provided
    InvalidGoogleSub,
    /// Hand score outside the allowed range
    InvalidHandScore,
    /// Submitted hand set is incomplete or malformed
    InvalidHandSheet,
    /// Home and away teams must differ and belong to the division
    InvalidFixture,
    /// Match is not in the required status for this operation
    MatchStatusConflict,
    /// Scoreboard key event outside the sequence bounds
    InvalidScoreboardInput,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Match not found
    MatchNotFound,
    /// User not found
    UserNotFound,
    /// Player not found
    PlayerNotFound,
    /// Team not found
    TeamNotFound,
    /// Division not found
    DivisionNotFound,
    /// Scoreboard not found
    ScoreboardNotFound,
    /// Event not found
    EventNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Google sub mismatch for existing email
    GoogleSubMismatch,
    /// Unique email constraint
    UniqueEmail,
    /// Team name already taken within the division
    UniqueTeamName,
    /// Optimistic lock conflict
    OptimisticLock,
    /// Scoreboard already open for this match
    ScoreboardExists,
    /// Generic conflict (fallback for unmatched conflicts)
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Unique constraint violation (SQLSTATE 23505; generic 409)
    UniqueViolation,
    /// Foreign key constraint violation (SQLSTATE 23503; generic 409)
    FkViolation,
    /// Check constraint violation (SQLSTATE 23514; generic 400)
    CheckViolation,
    /// Record not found (generic 404 for DB-driven not-found)
    RecordNotFound,

    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
    /// Data corruption detected
    DataCorruption,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    ///
    /// This is the exact string that appears in HTTP responses.
    pub const fn as_str(&self) -> &'static str {
        match self {
            // Authentication & Authorization
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",

            // Request Validation
            Self::InvalidMatchId => "INVALID_MATCH_ID",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::InvalidGoogleSub => "INVALID_GOOGLE_SUB",
            Self::InvalidHandScore => "INVALID_HAND_SCORE",
            Self::InvalidHandSheet => "INVALID_HAND_SHEET",
            Self::InvalidFixture => "INVALID_FIXTURE",
            Self::MatchStatusConflict => "MATCH_STATUS_CONFLICT",
            Self::InvalidScoreboardInput => "INVALID_SCOREBOARD_INPUT",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            // Resource Not Found
            Self::MatchNotFound => "MATCH_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PlayerNotFound => "PLAYER_NOT_FOUND",
            Self::TeamNotFound => "TEAM_NOT_FOUND",
            Self::DivisionNotFound => "DIVISION_NOT_FOUND",
            Self::ScoreboardNotFound => "SCOREBOARD_NOT_FOUND",
            Self::EventNotFound => "EVENT_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            // Business Logic Conflicts
            Self::GoogleSubMismatch => "GOOGLE_SUB_MISMATCH",
            Self::UniqueEmail => "UNIQUE_EMAIL",
            Self::UniqueTeamName => "UNIQUE_TEAM_NAME",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::ScoreboardExists => "SCOREBOARD_EXISTS",
            Self::Conflict => "CONFLICT",

            // System Errors
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::CheckViolation => "CHECK_VIOLATION",
            Self::RecordNotFound => "RECORD_NOT_FOUND",

            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
            Self::DataCorruption => "DATA_CORRUPTION",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_strings() {
        assert_eq!(ErrorCode::Unauthorized.as_str(), "UNAUTHORIZED");
        assert_eq!(
            ErrorCode::UnauthorizedMissingBearer.as_str(),
            "UNAUTHORIZED_MISSING_BEARER"
        );
        assert_eq!(ErrorCode::AdminRequired.as_str(), "ADMIN_REQUIRED");
        assert_eq!(ErrorCode::InvalidHandScore.as_str(), "INVALID_HAND_SCORE");
        assert_eq!(ErrorCode::MatchNotFound.as_str(), "MATCH_NOT_FOUND");
        assert_eq!(ErrorCode::OptimisticLock.as_str(), "OPTIMISTIC_LOCK");
        assert_eq!(ErrorCode::UniqueViolation.as_str(), "UNIQUE_VIOLATION");
        assert_eq!(ErrorCode::RecordNotFound.as_str(), "RECORD_NOT_FOUND");
        assert_eq!(ErrorCode::Internal.as_str(), "INTERNAL");
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", ErrorCode::MatchStatusConflict), "MATCH_STATUS_CONFLICT");
        assert_eq!(format!("{}", ErrorCode::UniqueEmail), "UNIQUE_EMAIL");
        assert_eq!(format!("{}", ErrorCode::DbUnavailable), "DB_UNAVAILABLE");
    }
}
