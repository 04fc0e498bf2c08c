//! DTOs for the matches adapter.

use time::OffsetDateTime;

use crate::entities::match_hands::HandSide;
use crate::entities::matches::MatchStatus;

/// DTO for scheduling a fixture.
#[derive(Debug, Clone)]
pub struct MatchCreate {
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub scheduled_at: OffsetDateTime,
    pub venue: Option<String>,
}

/// DTO for recording a completed result with optimistic locking.
#[derive(Debug, Clone)]
pub struct MatchResultUpdate {
    pub id: i64,
    pub current_lock_version: i32,
    pub home_score: i32,
    pub away_score: i32,
}

/// DTO for a bare status transition with optimistic locking.
#[derive(Debug, Clone)]
pub struct MatchStatusUpdate {
    pub id: i64,
    pub current_lock_version: i32,
    pub status: MatchStatus,
}

/// One hand score to persist for a match.
#[derive(Debug, Clone, Copy)]
pub struct HandInsert {
    pub player_id: i64,
    pub side: HandSide,
    pub hand_no: i16,
    pub pins: i16,
}
