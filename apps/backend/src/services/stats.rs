use std::collections::HashMap;

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::domain::stats::{player_totals, HandLine};
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::repos::matches;
use crate::repos::players;
use crate::repos::seasons;
use crate::repos::standings;

/// Per-player statistics row for the stats page.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerStats {
    pub player_id: i64,
    pub display_name: String,
    pub games: i32,
    pub hands: i32,
    pub total_pins: i32,
    pub average: f64,
    pub best_hand: i32,
    pub best_match: i32,
}

/// Per-team statistics row: standings projection plus per-match average.
#[derive(Debug, Clone, Serialize)]
pub struct TeamStats {
    pub team_id: i64,
    pub team_name: String,
    pub played: i32,
    pub points: i32,
    pub pins_for: i32,
    pub pins_against: i32,
    pub average_per_match: f64,
    pub max_score: i32,
}

/// Player aggregates over the completed matches of a division, ordered by
/// average descending then name.
pub async fn player_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<PlayerStats>, AppError> {
    seasons::require_division(conn, division_id).await?;

    let completed = matches::list(conn, Some(division_id), Some(MatchStatus::Completed)).await?;
    let match_ids: Vec<i64> = completed.iter().map(|m| m.id).collect();
    let hands = matches::hands_for_matches(conn, match_ids).await?;

    let lines: Vec<HandLine> = hands
        .iter()
        .map(|h| HandLine {
            match_id: h.match_id,
            player_id: h.player_id,
            pins: i32::from(h.pins),
        })
        .collect();
    let totals = player_totals(&lines);

    let names: HashMap<i64, String> = players::list(conn, None)
        .await?
        .into_iter()
        .map(|p| (p.id, p.display_name))
        .collect();

    let mut rows: Vec<PlayerStats> = totals
        .into_iter()
        .map(|t| PlayerStats {
            player_id: t.player_id,
            display_name: names.get(&t.player_id).cloned().unwrap_or_default(),
            games: t.games,
            hands: t.hands,
            total_pins: t.total_pins,
            average: t.average(),
            best_hand: t.best_hand,
            best_match: t.best_match,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.average
            .partial_cmp(&a.average)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.display_name.cmp(&b.display_name))
    });
    Ok(rows)
}

/// Team aggregates for a division, in table order.
pub async fn team_stats<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<TeamStats>, AppError> {
    seasons::require_division(conn, division_id).await?;

    let mut rows = standings::table_for_division(conn, division_id).await?;
    crate::domain::standings::sort_table(&mut rows);

    Ok(rows
        .into_iter()
        .map(|row| {
            let average_per_match = if row.played == 0 {
                0.0
            } else {
                (f64::from(row.pins_for) / f64::from(row.played) * 100.0).round() / 100.0
            };
            TeamStats {
                team_id: row.team_id,
                team_name: row.team_name,
                played: row.played,
                points: row.points,
                pins_for: row.pins_for,
                pins_against: row.pins_against,
                average_per_match,
                max_score: row.max_score,
            }
        })
        .collect())
}
