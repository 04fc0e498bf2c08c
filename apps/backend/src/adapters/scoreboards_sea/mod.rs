//! SeaORM adapter for live scoreboard state.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, Set,
};

use crate::entities::scoreboards;

pub mod dto;

pub use dto::ScoreboardUpdate;

pub async fn create(
    txn: &DatabaseTransaction,
    match_id: i64,
    entries: serde_json::Value,
) -> Result<scoreboards::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let board_active = scoreboards::ActiveModel {
        id: NotSet,
        match_id: Set(match_id),
        cursor: Set(0),
        entries: Set(entries),
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    board_active.insert(txn).await
}

pub async fn find_by_match_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<scoreboards::Model>, sea_orm::DbErr> {
    scoreboards::Entity::find()
        .filter(scoreboards::Column::MatchId.eq(match_id))
        .one(conn)
        .await
}

/// Persist cursor + entries with a lock version check.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: ScoreboardUpdate,
) -> Result<scoreboards::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = scoreboards::Entity::update_many()
        .col_expr(scoreboards::Column::Cursor, Expr::val(dto.cursor).into())
        .col_expr(scoreboards::Column::Entries, Expr::val(dto.entries).into())
        .col_expr(scoreboards::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            scoreboards::Column::LockVersion,
            Expr::col(scoreboards::Column::LockVersion).add(1),
        )
        .filter(scoreboards::Column::Id.eq(dto.id))
        .filter(scoreboards::Column::LockVersion.eq(dto.current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let board = scoreboards::Entity::find_by_id(dto.id).one(conn).await?;
        if let Some(board) = board {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                dto.current_lock_version, board.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::RecordNotFound(
                "Scoreboard not found".to_string(),
            ));
        }
    }

    scoreboards::Entity::find_by_id(dto.id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("Scoreboard not found".to_string()))
}

pub async fn delete_by_match_id(
    txn: &DatabaseTransaction,
    match_id: i64,
) -> Result<(), sea_orm::DbErr> {
    scoreboards::Entity::delete_many()
        .filter(scoreboards::Column::MatchId.eq(match_id))
        .exec(txn)
        .await?;
    Ok(())
}
