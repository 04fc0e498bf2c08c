//! Standings repository functions (generic over ConnectionTrait).
//!
//! Rows are loaded into the domain's [`TableRow`] with team names joined in
//! from the teams table, so the domain arithmetic and the display sort work
//! on one shape.

use std::collections::HashMap;

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::standings_sea as standings_adapter;
use crate::adapters::standings_sea::RowCounters;
use crate::adapters::teams_sea as teams_adapter;
use crate::domain::standings::TableRow;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Seed a zeroed row for a newly created team.
pub async fn seed_row(
    txn: &DatabaseTransaction,
    division_id: i64,
    team_id: i64,
) -> Result<(), DomainError> {
    standings_adapter::seed_row(txn, division_id, team_id).await?;
    Ok(())
}

/// Load a division's table with team names resolved.
pub async fn table_for_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<TableRow>, DomainError> {
    let rows = standings_adapter::rows_for_division(conn, division_id).await?;
    let teams = teams_adapter::list_by_division(conn, division_id).await?;
    let names: HashMap<i64, String> = teams.into_iter().map(|t| (t.id, t.name)).collect();

    Ok(rows
        .into_iter()
        .map(|row| TableRow {
            team_id: row.team_id,
            team_name: names.get(&row.team_id).cloned().unwrap_or_default(),
            played: row.played,
            won: row.won,
            lost: row.lost,
            drawn: row.drawn,
            points: row.points,
            pins_for: row.pins_for,
            pins_against: row.pins_against,
            max_score: row.max_score,
        })
        .collect())
}

/// Persist the counters of every given row back to the standings table.
pub async fn write_table(
    txn: &DatabaseTransaction,
    division_id: i64,
    rows: &[TableRow],
) -> Result<(), DomainError> {
    for row in rows {
        let existing = standings_adapter::find_row(txn, division_id, row.team_id)
            .await?
            .ok_or_else(|| {
                DomainError::not_found(
                    NotFoundKind::Team,
                    format!(
                        "No standings row for team {} in division {division_id}",
                        row.team_id
                    ),
                )
            })?;
        standings_adapter::write_counters(txn, existing, RowCounters::from(row)).await?;
    }
    Ok(())
}
