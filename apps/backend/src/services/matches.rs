use std::collections::{HashMap, HashSet};

use sea_orm::DatabaseTransaction;
use time::OffsetDateTime;
use tracing::info;

use crate::adapters::matches_sea::{
    side_totals, HandInsert, MatchCreate, MatchResultUpdate, MatchStatusUpdate,
};
use crate::domain::scoreboard::{HANDS_PER_PLAYER, MAX_HAND_SCORE};
use crate::domain::standings::{apply_result, max_score_for, revert_result, ResultLine};
use crate::entities::match_hands::HandSide;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::matches::{self, Match};
use crate::repos::players;
use crate::repos::standings;
use crate::repos::teams;

/// Schedule a fixture. Home and away must be distinct teams of the division.
pub async fn schedule_match(
    txn: &DatabaseTransaction,
    division_id: i64,
    home_team_id: i64,
    away_team_id: i64,
    scheduled_at: OffsetDateTime,
    venue: Option<String>,
) -> Result<Match, AppError> {
    if home_team_id == away_team_id {
        return Err(AppError::bad_request(
            ErrorCode::InvalidFixture,
            "A team cannot play itself",
        ));
    }

    for team_id in [home_team_id, away_team_id] {
        let team = teams::require_team(txn, team_id).await?;
        if team.division_id != division_id {
            return Err(AppError::bad_request(
                ErrorCode::InvalidFixture,
                format!("Team {team_id} is not in division {division_id}"),
            ));
        }
    }

    let fixture = matches::create_match(
        txn,
        MatchCreate {
            division_id,
            home_team_id,
            away_team_id,
            scheduled_at,
            venue,
        },
    )
    .await?;

    info!(match_id = fixture.id, division_id, "Fixture scheduled");
    Ok(fixture)
}

/// Validate a submitted hand sheet against the two rosters.
///
/// Every listed player must belong to the right team and carry exactly five
/// hands numbered 1..=5, each within 0..=18 pins. Both sides must have at
/// least one player.
pub async fn validate_hand_sheet(
    txn: &DatabaseTransaction,
    fixture: &Match,
    hands: &[HandInsert],
) -> Result<(), AppError> {
    let home_ids: HashSet<i64> = players::roster_for_team(txn, fixture.home_team_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();
    let away_ids: HashSet<i64> = players::roster_for_team(txn, fixture.away_team_id)
        .await?
        .into_iter()
        .map(|p| p.id)
        .collect();

    let mut hands_seen: HashMap<i64, HashSet<i16>> = HashMap::new();
    let mut sides_present: HashSet<HandSide> = HashSet::new();

    for hand in hands {
        if hand.pins < 0 || hand.pins > i16::from(MAX_HAND_SCORE) {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHandScore,
                format!("Hand score {} is outside 0..=18", hand.pins),
            ));
        }
        if hand.hand_no < 1 || hand.hand_no > i16::from(HANDS_PER_PLAYER) {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHandSheet,
                format!("Hand number {} is outside 1..=5", hand.hand_no),
            ));
        }

        let roster = match hand.side {
            HandSide::Home => &home_ids,
            HandSide::Away => &away_ids,
        };
        if !roster.contains(&hand.player_id) {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHandSheet,
                format!(
                    "Player {} is not on the {} team's roster",
                    hand.player_id,
                    match hand.side {
                        HandSide::Home => "home",
                        HandSide::Away => "away",
                    }
                ),
            ));
        }

        if !hands_seen.entry(hand.player_id).or_default().insert(hand.hand_no) {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHandSheet,
                format!(
                    "Duplicate hand {} for player {}",
                    hand.hand_no, hand.player_id
                ),
            ));
        }
        sides_present.insert(hand.side);
    }

    for (player_id, numbers) in &hands_seen {
        if numbers.len() != HANDS_PER_PLAYER as usize {
            return Err(AppError::bad_request(
                ErrorCode::InvalidHandSheet,
                format!(
                    "Player {player_id} has {} hands, expected {HANDS_PER_PLAYER}",
                    numbers.len()
                ),
            ));
        }
    }

    if sides_present.len() != 2 {
        return Err(AppError::bad_request(
            ErrorCode::InvalidHandSheet,
            "Both sides must have at least one player",
        ));
    }

    Ok(())
}

/// Record a completed result for a scheduled or in-progress match.
///
/// Persists the hand sheet, completes the match, and applies the outcome to
/// the division standings - all within the caller's transaction.
pub async fn record_result(
    txn: &DatabaseTransaction,
    match_id: i64,
    hands: Vec<HandInsert>,
) -> Result<Match, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if !matches!(
        fixture.status,
        MatchStatus::Scheduled | MatchStatus::InProgress
    ) {
        return Err(AppError::conflict(
            ErrorCode::MatchStatusConflict,
            format!("Match {match_id} already has a recorded result"),
        ));
    }

    validate_hand_sheet(txn, &fixture, &hands).await?;
    let (home_score, away_score) = side_totals(&hands);

    let updated = matches::update_result(
        txn,
        MatchResultUpdate {
            id: fixture.id,
            current_lock_version: fixture.lock_version,
            home_score,
            away_score,
        },
    )
    .await?;
    matches::replace_hands(txn, fixture.id, hands).await?;

    let line = ResultLine {
        home_team_id: fixture.home_team_id,
        away_team_id: fixture.away_team_id,
        home_score,
        away_score,
    };
    let mut table = standings::table_for_division(txn, fixture.division_id).await?;
    apply_result(&mut table, &line);
    standings::write_table(txn, fixture.division_id, &table).await?;

    info!(
        match_id,
        home_score, away_score, "Result recorded and standings updated"
    );
    Ok(updated)
}

/// Correct an already-recorded result: revert the old outcome, apply the
/// new one, and rescan max_score for both teams - atomically.
pub async fn correct_result(
    txn: &DatabaseTransaction,
    match_id: i64,
    hands: Vec<HandInsert>,
) -> Result<Match, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    let old_line = fixture.result_line().ok_or_else(|| {
        AppError::conflict(
            ErrorCode::MatchStatusConflict,
            format!("Match {match_id} has no recorded result to correct"),
        )
    })?;

    validate_hand_sheet(txn, &fixture, &hands).await?;
    let (home_score, away_score) = side_totals(&hands);

    let updated = matches::update_result(
        txn,
        MatchResultUpdate {
            id: fixture.id,
            current_lock_version: fixture.lock_version,
            home_score,
            away_score,
        },
    )
    .await?;
    matches::replace_hands(txn, fixture.id, hands).await?;

    let new_line = ResultLine {
        home_team_id: fixture.home_team_id,
        away_team_id: fixture.away_team_id,
        home_score,
        away_score,
    };

    let mut table = standings::table_for_division(txn, fixture.division_id).await?;
    revert_result(&mut table, &old_line);
    apply_result(&mut table, &new_line);

    // max_score cannot be reverted from the aggregate; rescan the completed
    // results (which already reflect the correction) for both teams.
    let completed = matches::completed_results(txn, fixture.division_id).await?;
    for row in table.iter_mut() {
        if row.team_id == fixture.home_team_id || row.team_id == fixture.away_team_id {
            row.max_score = max_score_for(row.team_id, &completed);
        }
    }

    standings::write_table(txn, fixture.division_id, &table).await?;

    info!(
        match_id,
        old_home = old_line.home_score,
        old_away = old_line.away_score,
        home_score,
        away_score,
        "Result corrected and standings rebuilt"
    );
    Ok(updated)
}

/// Postpone a scheduled fixture.
pub async fn postpone_match(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<Match, AppError> {
    let fixture = matches::require_match(txn, match_id).await?;
    if fixture.status != MatchStatus::Scheduled {
        return Err(AppError::conflict(
            ErrorCode::MatchStatusConflict,
            "Only scheduled matches can be postponed",
        ));
    }

    let updated = matches::update_status(
        txn,
        MatchStatusUpdate {
            id: fixture.id,
            current_lock_version: fixture.lock_version,
            status: MatchStatus::Postponed,
        },
    )
    .await?;

    info!(match_id, "Fixture postponed");
    Ok(updated)
}
