//! Season and division repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::Date;

use crate::adapters::seasons_sea as seasons_adapter;
use crate::errors::domain::{DomainError, NotFoundKind};

/// Season domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub id: i64,
    pub name: String,
    pub starts_on: Date,
    pub ends_on: Date,
}

/// Division domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Division {
    pub id: i64,
    pub season_id: i64,
    pub name: String,
}

pub async fn create_season(
    txn: &DatabaseTransaction,
    name: String,
    starts_on: Date,
    ends_on: Date,
) -> Result<Season, DomainError> {
    let season = seasons_adapter::create_season(txn, name, starts_on, ends_on).await?;
    Ok(Season::from(season))
}

pub async fn list_seasons<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Season>, DomainError> {
    let seasons = seasons_adapter::list_seasons(conn).await?;
    Ok(seasons.into_iter().map(Season::from).collect())
}

pub async fn require_season<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Season, DomainError> {
    let season = seasons_adapter::find_season_by_id(conn, season_id).await?;
    season.map(Season::from).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Other("Season".into()),
            format!("Season {season_id} not found"),
        )
    })
}

pub async fn create_division(
    txn: &DatabaseTransaction,
    season_id: i64,
    name: String,
) -> Result<Division, DomainError> {
    let division = seasons_adapter::create_division(txn, season_id, name).await?;
    Ok(Division::from(division))
}

pub async fn require_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Division, DomainError> {
    let division = seasons_adapter::find_division_by_id(conn, division_id).await?;
    division.map(Division::from).ok_or_else(|| {
        DomainError::not_found(
            NotFoundKind::Division,
            format!("Division {division_id} not found"),
        )
    })
}

pub async fn list_divisions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<Division>, DomainError> {
    let divisions = seasons_adapter::list_divisions(conn, season_id).await?;
    Ok(divisions.into_iter().map(Division::from).collect())
}

impl From<crate::entities::seasons::Model> for Season {
    fn from(model: crate::entities::seasons::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            starts_on: model.starts_on,
            ends_on: model.ends_on,
        }
    }
}

impl From<crate::entities::divisions::Model> for Division {
    fn from(model: crate::entities::divisions::Model) -> Self {
        Self {
            id: model.id,
            season_id: model.season_id,
            name: model.name,
        }
    }
}
