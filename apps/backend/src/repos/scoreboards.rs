//! Scoreboard repository functions (generic over ConnectionTrait).
//!
//! The entries jsonb column round-trips as `Vec<Option<u8>>`, aligned with
//! the precomputed turn sequence.

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::scoreboards_sea as scoreboards_adapter;
use crate::adapters::scoreboards_sea::ScoreboardUpdate;
use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};

/// Persisted scoreboard domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreboardState {
    pub id: i64,
    pub match_id: i64,
    pub cursor: usize,
    pub entries: Vec<Option<u8>>,
    pub lock_version: i32,
}

pub async fn create(
    txn: &DatabaseTransaction,
    match_id: i64,
    slots: usize,
) -> Result<ScoreboardState, DomainError> {
    let entries = serde_json::to_value(vec![Option::<u8>::None; slots])
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("Json".into()), e.to_string()))?;
    let board = scoreboards_adapter::create(txn, match_id, entries).await?;
    ScoreboardState::try_from(board)
}

pub async fn find_by_match_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<ScoreboardState>, DomainError> {
    let board = scoreboards_adapter::find_by_match_id(conn, match_id).await?;
    board.map(ScoreboardState::try_from).transpose()
}

pub async fn require_by_match_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<ScoreboardState, DomainError> {
    find_by_match_id(conn, match_id).await?.ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Scoreboard,
            format!("No open scoreboard for match {match_id}"),
        )
    })
}

pub async fn save<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    board: &ScoreboardState,
) -> Result<ScoreboardState, DomainError> {
    let entries = serde_json::to_value(&board.entries)
        .map_err(|e| DomainError::infra(InfraErrorKind::Other("Json".into()), e.to_string()))?;
    let updated = scoreboards_adapter::update(
        conn,
        ScoreboardUpdate {
            id: board.id,
            current_lock_version: board.lock_version,
            cursor: board.cursor as i32,
            entries,
        },
    )
    .await?;
    ScoreboardState::try_from(updated)
}

pub async fn delete_by_match_id(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<(), DomainError> {
    scoreboards_adapter::delete_by_match_id(txn, match_id).await?;
    Ok(())
}

impl TryFrom<crate::entities::scoreboards::Model> for ScoreboardState {
    type Error = DomainError;

    fn try_from(model: crate::entities::scoreboards::Model) -> Result<Self, DomainError> {
        let entries: Vec<Option<u8>> = serde_json::from_value(model.entries).map_err(|e| {
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("scoreboard {} entries are not a score array: {e}", model.id),
            )
        })?;
        if model.cursor < 0 {
            return Err(DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("scoreboard {} cursor is negative", model.id),
            ));
        }
        Ok(Self {
            id: model.id,
            match_id: model.match_id,
            cursor: model.cursor as usize,
            entries,
            lock_version: model.lock_version,
        })
    }
}
