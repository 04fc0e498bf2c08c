//! SeaORM adapter for standings rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};

use crate::entities::standings;

pub mod dto;

pub use dto::RowCounters;

/// Seed a zeroed standings row for a team; done when the team is created.
pub async fn seed_row(
    txn: &DatabaseTransaction,
    division_id: i64,
    team_id: i64,
) -> Result<standings::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let row_active = standings::ActiveModel {
        id: NotSet,
        division_id: Set(division_id),
        team_id: Set(team_id),
        played: Set(0),
        won: Set(0),
        lost: Set(0),
        drawn: Set(0),
        points: Set(0),
        pins_for: Set(0),
        pins_against: Set(0),
        max_score: Set(0),
        created_at: Set(now),
        updated_at: Set(now),
    };

    row_active.insert(txn).await
}

pub async fn rows_for_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .filter(standings::Column::DivisionId.eq(division_id))
        .all(conn)
        .await
}

pub async fn find_row<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
    team_id: i64,
) -> Result<Option<standings::Model>, sea_orm::DbErr> {
    standings::Entity::find()
        .filter(standings::Column::DivisionId.eq(division_id))
        .filter(standings::Column::TeamId.eq(team_id))
        .one(conn)
        .await
}

/// Overwrite every counter on an existing row.
pub async fn write_counters(
    txn: &DatabaseTransaction,
    row: standings::Model,
    counters: RowCounters,
) -> Result<standings::Model, sea_orm::DbErr> {
    let mut active: standings::ActiveModel = row.into();
    active.played = Set(counters.played);
    active.won = Set(counters.won);
    active.lost = Set(counters.lost);
    active.drawn = Set(counters.drawn);
    active.points = Set(counters.points);
    active.pins_for = Set(counters.pins_for);
    active.pins_against = Set(counters.pins_against);
    active.max_score = Set(counters.max_score);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(txn).await
}
