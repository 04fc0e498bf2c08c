//! SeaORM adapter for fixtures, results and per-player hand scores.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::match_hands::{self, HandSide};
use crate::entities::matches::{self, MatchStatus};

pub mod dto;

pub use dto::{HandInsert, MatchCreate, MatchResultUpdate, MatchStatusUpdate};

/// Helper: Apply optimistic update with lock version check, then refetch.
///
/// - Adds lock_version increment and updated_at to the update
/// - Filters by id and current_lock_version
/// - Checks rows_affected to distinguish NotFound vs OptimisticLock
/// - Refetches and returns the updated model
async fn optimistic_update_then_fetch<C, F>(
    conn: &C,
    id: i64,
    current_lock_version: i32,
    configure_update: F,
) -> Result<matches::Model, sea_orm::DbErr>
where
    C: ConnectionTrait + Send + Sync,
    F: FnOnce(sea_orm::UpdateMany<matches::Entity>) -> sea_orm::UpdateMany<matches::Entity>,
{
    use sea_orm::sea_query::Expr;

    let now = time::OffsetDateTime::now_utc();

    let result = configure_update(matches::Entity::update_many())
        .col_expr(matches::Column::UpdatedAt, Expr::val(now).into())
        .col_expr(
            matches::Column::LockVersion,
            Expr::col(matches::Column::LockVersion).add(1),
        )
        .filter(matches::Column::Id.eq(id))
        .filter(matches::Column::LockVersion.eq(current_lock_version))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        let found = matches::Entity::find_by_id(id).one(conn).await?;
        if let Some(found) = found {
            let payload = format!(
                "OPTIMISTIC_LOCK:{{\"expected\":{},\"actual\":{}}}",
                current_lock_version, found.lock_version
            );
            return Err(sea_orm::DbErr::Custom(payload));
        } else {
            return Err(sea_orm::DbErr::Custom(format!("MATCH_NOT_FOUND:{id}")));
        }
    }

    matches::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("MATCH_NOT_FOUND:{id}")))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Option<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find_by_id(match_id).one(conn).await
}

/// Find match by ID or return a structured MATCH_NOT_FOUND error.
pub async fn require_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<matches::Model, sea_orm::DbErr> {
    find_by_id(conn, match_id)
        .await?
        .ok_or_else(|| sea_orm::DbErr::Custom(format!("MATCH_NOT_FOUND:{match_id}")))
}

pub async fn create_match(
    txn: &DatabaseTransaction,
    dto: MatchCreate,
) -> Result<matches::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let match_active = matches::ActiveModel {
        id: NotSet,
        division_id: Set(dto.division_id),
        home_team_id: Set(dto.home_team_id),
        away_team_id: Set(dto.away_team_id),
        scheduled_at: Set(dto.scheduled_at),
        venue: Set(dto.venue),
        status: Set(MatchStatus::Scheduled),
        home_score: NotSet,
        away_score: NotSet,
        lock_version: Set(1),
        created_at: Set(now),
        updated_at: Set(now),
    };

    match_active.insert(txn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: Option<i64>,
    status: Option<MatchStatus>,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    let mut query = matches::Entity::find();
    if let Some(division_id) = division_id {
        query = query.filter(matches::Column::DivisionId.eq(division_id));
    }
    if let Some(status) = status {
        query = query.filter(matches::Column::Status.eq(status));
    }
    query
        .order_by_asc(matches::Column::ScheduledAt)
        .order_by_asc(matches::Column::Id)
        .all(conn)
        .await
}

pub async fn completed_in_division<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    division_id: i64,
) -> Result<Vec<matches::Model>, sea_orm::DbErr> {
    matches::Entity::find()
        .filter(matches::Column::DivisionId.eq(division_id))
        .filter(matches::Column::Status.eq(MatchStatus::Completed))
        .order_by_asc(matches::Column::ScheduledAt)
        .all(conn)
        .await
}

/// Record or correct a result: status, both scores, one version bump.
pub async fn update_result<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchResultUpdate,
) -> Result<matches::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Alias, Expr};

    optimistic_update_then_fetch(conn, dto.id, dto.current_lock_version, |update| {
        update
            .col_expr(
                matches::Column::Status,
                Expr::val(MatchStatus::Completed).cast_as(Alias::new("match_status")),
            )
            .col_expr(
                matches::Column::HomeScore,
                Expr::val(Some(dto.home_score)).into(),
            )
            .col_expr(
                matches::Column::AwayScore,
                Expr::val(Some(dto.away_score)).into(),
            )
    })
    .await
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: MatchStatusUpdate,
) -> Result<matches::Model, sea_orm::DbErr> {
    use sea_orm::sea_query::{Alias, Expr};

    optimistic_update_then_fetch(conn, dto.id, dto.current_lock_version, |update| {
        update.col_expr(
            matches::Column::Status,
            Expr::val(dto.status).cast_as(Alias::new("match_status")),
        )
    })
    .await
}

/// Replace the full hand sheet for a match.
pub async fn replace_hands(
    txn: &DatabaseTransaction,
    match_id: i64,
    hands: Vec<HandInsert>,
) -> Result<(), sea_orm::DbErr> {
    match_hands::Entity::delete_many()
        .filter(match_hands::Column::MatchId.eq(match_id))
        .exec(txn)
        .await?;

    if hands.is_empty() {
        return Ok(());
    }

    let now = time::OffsetDateTime::now_utc();
    let rows = hands.into_iter().map(|hand| match_hands::ActiveModel {
        id: NotSet,
        match_id: Set(match_id),
        player_id: Set(hand.player_id),
        side: Set(hand.side),
        hand_no: Set(hand.hand_no),
        pins: Set(hand.pins),
        created_at: Set(now),
        updated_at: Set(now),
    });

    match_hands::Entity::insert_many(rows).exec(txn).await?;
    Ok(())
}

pub async fn hands_for_match<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_id: i64,
) -> Result<Vec<match_hands::Model>, sea_orm::DbErr> {
    match_hands::Entity::find()
        .filter(match_hands::Column::MatchId.eq(match_id))
        .order_by_asc(match_hands::Column::PlayerId)
        .order_by_asc(match_hands::Column::HandNo)
        .all(conn)
        .await
}

pub async fn hands_for_matches<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    match_ids: Vec<i64>,
) -> Result<Vec<match_hands::Model>, sea_orm::DbErr> {
    if match_ids.is_empty() {
        return Ok(Vec::new());
    }
    match_hands::Entity::find()
        .filter(match_hands::Column::MatchId.is_in(match_ids))
        .all(conn)
        .await
}

/// Pin total per side for a hand sheet; used to cross-check submitted totals.
pub fn side_totals(hands: &[HandInsert]) -> (i32, i32) {
    let mut home = 0;
    let mut away = 0;
    for hand in hands {
        match hand.side {
            HandSide::Home => home += i32::from(hand.pins),
            HandSide::Away => away += i32::from(hand.pins),
        }
    }
    (home, away)
}
