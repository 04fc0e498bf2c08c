//! Match repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::matches_sea as matches_adapter;
use crate::adapters::matches_sea::{HandInsert, MatchCreate, MatchResultUpdate, MatchStatusUpdate};
use crate::domain::standings::ResultLine;
use crate::entities::match_hands::HandSide;
use crate::entities::matches::MatchStatus;
use crate::errors::domain::DomainError;

/// Match domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub scheduled_at: time::OffsetDateTime,
    pub venue: Option<String>,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub lock_version: i32,
}

impl Match {
    /// The result as seen by the standings table, if the match is completed.
    pub fn result_line(&self) -> Option<ResultLine> {
        match (self.status, self.home_score, self.away_score) {
            (MatchStatus::Completed, Some(home_score), Some(away_score)) => Some(ResultLine {
                home_team_id: self.home_team_id,
                away_team_id: self.away_team_id,
                home_score,
                away_score,
            }),
            _ => None,
        }
    }
}

/// One persisted hand score domain model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchHand {
    pub match_id: i64,
    pub player_id: i64,
    pub side: HandSide,
    pub hand_no: i16,
    pub pins: i16,
}

pub async fn create_match(
    txn: &DatabaseTransaction,
    dto: MatchCreate,
) -> Result<Match, DomainError> {
    let match_row = matches_adapter::create_match(txn, dto).await?;
    Ok(Match::from(match_row))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<Match>, DomainError> {
    let match_row = matches_adapter::find_by_id(conn, match_id).await?;
    Ok(match_row.map(Match::from))
}

pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Match, DomainError> {
    let match_row = matches_adapter::require_match(conn, match_id).await?;
    Ok(Match::from(match_row))
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: Option<i64>,
    status: Option<MatchStatus>,
) -> Result<Vec<Match>, DomainError> {
    let rows = matches_adapter::list(conn, division_id, status).await?;
    Ok(rows.into_iter().map(Match::from).collect())
}

/// Completed results for a division, as standings input lines.
pub async fn completed_results<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<ResultLine>, DomainError> {
    let rows = matches_adapter::completed_in_division(conn, division_id).await?;
    Ok(rows
        .into_iter()
        .map(Match::from)
        .filter_map(|m| m.result_line())
        .collect())
}

pub async fn update_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchResultUpdate,
) -> Result<Match, DomainError> {
    let match_row = matches_adapter::update_result(conn, dto).await?;
    Ok(Match::from(match_row))
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchStatusUpdate,
) -> Result<Match, DomainError> {
    let match_row = matches_adapter::update_status(conn, dto).await?;
    Ok(Match::from(match_row))
}

pub async fn replace_hands(
    txn: &DatabaseTransaction,
    match_id: i64,
    hands: Vec<HandInsert>,
) -> Result<(), DomainError> {
    matches_adapter::replace_hands(txn, match_id, hands).await?;
    Ok(())
}

pub async fn hands_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<MatchHand>, DomainError> {
    let hands = matches_adapter::hands_for_match(conn, match_id).await?;
    Ok(hands.into_iter().map(MatchHand::from).collect())
}

pub async fn hands_for_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: Vec<i64>,
) -> Result<Vec<MatchHand>, DomainError> {
    let hands = matches_adapter::hands_for_matches(conn, match_ids).await?;
    Ok(hands.into_iter().map(MatchHand::from).collect())
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::matches::Model> for Match {
    fn from(model: crate::entities::matches::Model) -> Self {
        Self {
            id: model.id,
            division_id: model.division_id,
            home_team_id: model.home_team_id,
            away_team_id: model.away_team_id,
            scheduled_at: model.scheduled_at,
            venue: model.venue,
            status: model.status,
            home_score: model.home_score,
            away_score: model.away_score,
            lock_version: model.lock_version,
        }
    }
}

impl From<crate::entities::match_hands::Model> for MatchHand {
    fn from(model: crate::entities::match_hands::Model) -> Self {
        Self {
            match_id: model.match_id,
            player_id: model.player_id,
            side: model.side,
            hand_no: model.hand_no,
            pins: model.pins,
        }
    }
}
