//! Team repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::teams_sea as teams_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Team domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Team {
    pub id: i64,
    pub division_id: i64,
    pub name: String,
}

pub async fn create_team(
    txn: &DatabaseTransaction,
    division_id: i64,
    name: String,
) -> Result<Team, DomainError> {
    let team = teams_adapter::create_team(txn, division_id, name).await?;
    Ok(Team::from(team))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<Team>, DomainError> {
    let team = teams_adapter::find_by_id(conn, team_id).await?;
    Ok(team.map(Team::from))
}

pub async fn require_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Team, DomainError> {
    find_by_id(conn, team_id)
        .await?
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Team, format!("Team {team_id} not found")))
}

pub async fn list_by_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<Team>, DomainError> {
    let teams = teams_adapter::list_by_division(conn, division_id).await?;
    Ok(teams.into_iter().map(Team::from).collect())
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<Team>, DomainError> {
    let teams = teams_adapter::list_all(conn).await?;
    Ok(teams.into_iter().map(Team::from).collect())
}

impl From<crate::entities::teams::Model> for Team {
    fn from(model: crate::entities::teams::Model) -> Self {
        Self {
            id: model.id,
            division_id: model.division_id,
            name: model.name,
        }
    }
}
