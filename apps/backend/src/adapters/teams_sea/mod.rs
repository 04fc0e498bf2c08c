//! SeaORM adapter for teams.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::teams;

pub async fn create_team(
    txn: &DatabaseTransaction,
    division_id: i64,
    name: String,
) -> Result<teams::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let team_active = teams::ActiveModel {
        id: NotSet,
        division_id: Set(division_id),
        name: Set(name),
        created_at: Set(now),
        updated_at: Set(now),
    };

    team_active.insert(txn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Option<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find_by_id(team_id).one(conn).await
}

pub async fn list_by_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .filter(teams::Column::DivisionId.eq(division_id))
        .order_by_asc(teams::Column::Name)
        .all(conn)
        .await
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<teams::Model>, sea_orm::DbErr> {
    teams::Entity::find()
        .order_by_asc(teams::Column::Name)
        .all(conn)
        .await
}
