use std::sync::Arc;

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::{debug, info};

use crate::domain::standings::{recompute, sort_table, TableRow};
use crate::error::AppError;
use crate::repos::matches;
use crate::repos::seasons;
use crate::repos::standings;
use crate::repos::teams;
use crate::state::app_state::AppState;

/// A division's table, sorted for display, served from the cache when warm.
pub async fn division_table<C: ConnectionTrait + Send + Sync>(
    state: &AppState,
    conn: &C,
    division_id: i64,
) -> Result<Arc<Vec<TableRow>>, AppError> {
    if let Some(cached) = state.standings_cache().get(&division_id).await {
        debug!(division_id, "Standings served from cache");
        return Ok(cached);
    }

    seasons::require_division(conn, division_id).await?;

    let mut rows = standings::table_for_division(conn, division_id).await?;
    sort_table(&mut rows);

    let rows = Arc::new(rows);
    state
        .standings_cache()
        .insert(division_id, rows.clone())
        .await;
    Ok(rows)
}

/// Drop a division's cached table after any result write.
pub async fn invalidate(state: &AppState, division_id: i64) {
    state.standings_cache().invalidate(&division_id).await;
}

/// Rebuild a division's standings from its completed matches.
///
/// Admin repair operation: overwrites every row with a from-scratch
/// recomputation, max_score included.
pub async fn recompute_division(
    txn: &DatabaseTransaction,
    division_id: i64,
) -> Result<Vec<TableRow>, AppError> {
    seasons::require_division(txn, division_id).await?;

    let team_names: Vec<(i64, String)> = teams::list_by_division(txn, division_id)
        .await?
        .into_iter()
        .map(|t| (t.id, t.name))
        .collect();
    let results = matches::completed_results(txn, division_id).await?;

    let mut rows = recompute(&team_names, &results);
    standings::write_table(txn, division_id, &rows).await?;
    sort_table(&mut rows);

    info!(
        division_id,
        teams = team_names.len(),
        results = results.len(),
        "Standings recomputed from scratch"
    );
    Ok(rows)
}
