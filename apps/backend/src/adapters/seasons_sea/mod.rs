//! SeaORM adapter for seasons and divisions.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::Date;

use crate::entities::{divisions, seasons};

pub async fn create_season(
    txn: &DatabaseTransaction,
    name: String,
    starts_on: Date,
    ends_on: Date,
) -> Result<seasons::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let season_active = seasons::ActiveModel {
        id: NotSet,
        name: Set(name),
        starts_on: Set(starts_on),
        ends_on: Set(ends_on),
        created_at: Set(now),
        updated_at: Set(now),
    };

    season_active.insert(txn).await
}

pub async fn list_seasons<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find()
        .order_by_desc(seasons::Column::StartsOn)
        .all(conn)
        .await
}

pub async fn create_division(
    txn: &DatabaseTransaction,
    season_id: i64,
    name: String,
) -> Result<divisions::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let division_active = divisions::ActiveModel {
        id: NotSet,
        season_id: Set(season_id),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    division_active.insert(txn).await
}

pub async fn find_division_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Option<divisions::Model>, sea_orm::DbErr> {
    divisions::Entity::find_by_id(division_id).one(conn).await
}

pub async fn list_divisions<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Vec<divisions::Model>, sea_orm::DbErr> {
    divisions::Entity::find()
        .filter(divisions::Column::SeasonId.eq(season_id))
        .order_by_asc(divisions::Column::Name)
        .all(conn)
        .await
}

pub async fn find_season_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    season_id: i64,
) -> Result<Option<seasons::Model>, sea_orm::DbErr> {
    seasons::Entity::find_by_id(season_id).one(conn).await
}
