use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::Date;
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::players::{self, Player};
use crate::repos::seasons::{self, Division, Season};
use crate::repos::standings;
use crate::repos::teams::{self, Team};

/// Team plus its roster in playing order.
#[derive(Debug, Clone, PartialEq)]
pub struct TeamView {
    pub team: Team,
    pub roster: Vec<Player>,
}

fn normalize_name(name: &str, what: &str) -> Result<String, AppError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            format!("{what} name cannot be empty"),
        ));
    }
    Ok(name)
}

pub async fn create_season(
    txn: &DatabaseTransaction,
    name: &str,
    starts_on: Date,
    ends_on: Date,
) -> Result<Season, AppError> {
    let name = normalize_name(name, "Season")?;
    if ends_on < starts_on {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            "Season cannot end before it starts",
        ));
    }
    let season = seasons::create_season(txn, name, starts_on, ends_on).await?;
    info!(season_id = season.id, "Season created");
    Ok(season)
}

pub async fn create_division(
    txn: &DatabaseTransaction,
    season_id: i64,
    name: &str,
) -> Result<Division, AppError> {
    let name = normalize_name(name, "Division")?;
    seasons::require_season(txn, season_id).await?;
    let division = seasons::create_division(txn, season_id, name).await?;
    info!(division_id = division.id, season_id, "Division created");
    Ok(division)
}

/// Create a team and seed its zeroed standings row in the same transaction.
pub async fn create_team(
    txn: &DatabaseTransaction,
    division_id: i64,
    name: &str,
) -> Result<Team, AppError> {
    let name = normalize_name(name, "Team")?;
    seasons::require_division(txn, division_id).await?;

    let team = teams::create_team(txn, division_id, name).await?;
    standings::seed_row(txn, division_id, team.id).await?;

    info!(team_id = team.id, division_id, "Team created");
    Ok(team)
}

pub async fn team_with_roster<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<TeamView, AppError> {
    let team = teams::require_team(conn, team_id).await?;
    let roster = players::roster_for_team(conn, team_id).await?;
    Ok(TeamView { team, roster })
}

pub async fn list_teams<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: Option<i64>,
) -> Result<Vec<Team>, AppError> {
    let teams = match division_id {
        Some(division_id) => teams::list_by_division(conn, division_id).await?,
        None => teams::list_all(conn).await?,
    };
    Ok(teams)
}
