use sea_orm::{ConnectionTrait, DatabaseTransaction};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::adapters::matches_sea::HandInsert;
use crate::domain::scoreboard::{turn_sequence, Board, Key, Side, Turn};
use crate::entities::match_hands::HandSide;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::matches::{self, Match};
use crate::repos::players;
use crate::repos::scoreboards;

/// Snapshot of a live board sent to clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardView {
    pub match_id: i64,
    pub sequence: Vec<Turn>,
    pub entries: Vec<Option<u8>>,
    pub cursor: usize,
    pub home_total: i32,
    pub away_total: i32,
    pub complete: bool,
    pub lock_version: i32,
}

impl BoardView {
    fn assemble(match_id: i64, board: &Board, lock_version: i32) -> Self {
        let (home_total, away_total) = board.totals();
        Self {
            match_id,
            sequence: board.sequence().to_vec(),
            entries: board.entries().to_vec(),
            cursor: board.cursor(),
            home_total,
            away_total,
            complete: board.is_complete(),
            lock_version,
        }
    }
}

/// Rebuild the turn sequence for a match from the current rosters.
async fn sequence_for_match<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    fixture: &Match,
) -> Result<Vec<Turn>, AppError> {
    let home: Vec<i64> = players::roster_for_team(txn, fixture.home_team_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let away: Vec<i64> = players::roster_for_team(txn, fixture.away_team_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    if home.is_empty() || away.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidHandSheet,
            "Both teams need at least one rostered player to open a scoreboard",
        ));
    }

    Ok(turn_sequence(&home, &away))
}

/// Open the live board for a scheduled match and mark it in progress.
pub async fn open_board(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<BoardView, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if fixture.status != MatchStatus::Scheduled {
        return Err(AppError::conflict(
            ErrorCode::MatchStatusConflict,
            format!("Match {match_id} is not open for scoring"),
        ));
    }

    let sequence = sequence_for_match(txn, &fixture).await?;
    let state = scoreboards::create(txn, match_id, sequence.len()).await?;

    matches::update_status(
        txn,
        crate::adapters::matches_sea::MatchStatusUpdate {
            id: fixture.id,
            current_lock_version: fixture.lock_version,
            status: MatchStatus::InProgress,
        },
    )
    .await?;

    let board = Board::resume(sequence, state.entries, state.cursor).map_err(AppError::from)?;
    info!(match_id, turns = board.sequence().len(), "Scoreboard opened");
    Ok(BoardView::assemble(match_id, &board, state.lock_version))
}

/// Current board state for subscribers and page loads.
pub async fn board_view<C: ConnectionTrait + Send + Sync>(
    txn: &C,
    match_id: i64,
) -> Result<BoardView, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    let state = scoreboards::require_by_match_id(txn, match_id).await?;
    let sequence = sequence_for_match(txn, &fixture).await?;

    let board = Board::resume(sequence, state.entries, state.cursor).map_err(AppError::from)?;
    Ok(BoardView::assemble(match_id, &board, state.lock_version))
}

/// Apply a batch of key events and persist the outcome.
///
/// The client sends the keys typed since its last sync; any digits left
/// uncommitted at the end of the batch are discarded, exactly as a page
/// reload would discard them. The persisted write carries the client's
/// lock_version, so a concurrent scorer surfaces as an optimistic-lock
/// conflict rather than a lost update.
pub async fn apply_input(
    txn: &DatabaseTransaction,
    match_id: i64,
    expected_lock_version: i32,
    keys: &[Key],
) -> Result<BoardView, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if fixture.status != MatchStatus::InProgress {
        return Err(AppError::conflict(
            ErrorCode::MatchStatusConflict,
            format!("Match {match_id} has no live scoreboard"),
        ));
    }

    let mut state = scoreboards::require_by_match_id(txn, match_id).await?;
    if state.lock_version != expected_lock_version {
        return Err(AppError::conflict(
            ErrorCode::OptimisticLock,
            format!(
                "Scoreboard was modified concurrently (expected version {}, actual version {})",
                expected_lock_version, state.lock_version
            ),
        ));
    }

    let sequence = sequence_for_match(txn, &fixture).await?;
    let mut board =
        Board::resume(sequence, state.entries.clone(), state.cursor).map_err(AppError::from)?;

    for key in keys {
        board.apply(*key).map_err(AppError::from)?;
    }

    state.entries = board.entries().to_vec();
    state.cursor = board.cursor();
    let saved = scoreboards::save(txn, &state).await?;

    Ok(BoardView::assemble(match_id, &board, saved.lock_version))
}

/// Close a complete board: materialize its entries into hand rows, record
/// the result (standings included) and drop the board.
pub async fn close_board(txn: &DatabaseTransaction, match_id: i64) -> Result<Match, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if fixture.status != MatchStatus::InProgress {
        return Err(AppError::conflict(
            ErrorCode::MatchStatusConflict,
            format!("Match {match_id} has no live scoreboard"),
        ));
    }

    let state = scoreboards::require_by_match_id(txn, match_id).await?;
    let sequence = sequence_for_match(txn, &fixture).await?;
    let board =
        Board::resume(sequence, state.entries, state.cursor).map_err(AppError::from)?;

    if !board.is_complete() {
        return Err(AppError::bad_request(
            ErrorCode::InvalidHandSheet,
            "Scoreboard still has unscored hands",
        ));
    }

    let hands: Vec<HandInsert> = board
        .sequence()
        .iter()
        .zip(board.entries())
        .map(|(turn, entry)| HandInsert {
            player_id: turn.player_id,
            side: match turn.side {
                Side::Home => HandSide::Home,
                Side::Away => HandSide::Away,
            },
            hand_no: i16::from(turn.hand_no),
            // complete board checked above
            pins: i16::from(entry.unwrap_or_default()),
        })
        .collect();

    let updated = super::matches::record_result(txn, match_id, hands).await?;
    scoreboards::delete_by_match_id(txn, match_id).await?;

    info!(match_id, "Scoreboard closed and result recorded");
    Ok(updated)
}
