//! SeaORM adapter for club events.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::entities::events;

pub mod dto;

pub use dto::{EventCreate, EventUpdate};

pub async fn create(
    txn: &DatabaseTransaction,
    dto: EventCreate,
) -> Result<events::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let event_active = events::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        starts_at: Set(dto.starts_at),
        venue: Set(dto.venue),
        description: Set(dto.description),
        created_at: Set(now),
        updated_at: Set(now),
    };

    event_active.insert(txn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Option<events::Model>, sea_orm::DbErr> {
    events::Entity::find_by_id(event_id).one(conn).await
}

/// Events starting at or after the given instant, soonest first.
pub async fn list_upcoming<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    after: OffsetDateTime,
) -> Result<Vec<events::Model>, sea_orm::DbErr> {
    events::Entity::find()
        .filter(events::Column::StartsAt.gte(after))
        .order_by_asc(events::Column::StartsAt)
        .all(conn)
        .await
}

pub async fn update(
    txn: &DatabaseTransaction,
    event: events::Model,
    dto: EventUpdate,
) -> Result<events::Model, sea_orm::DbErr> {
    let mut active: events::ActiveModel = event.into();
    if let Some(title) = dto.title {
        active.title = Set(title);
    }
    if let Some(starts_at) = dto.starts_at {
        active.starts_at = Set(starts_at);
    }
    if let Some(venue) = dto.venue {
        active.venue = Set(venue);
    }
    if let Some(description) = dto.description {
        active.description = Set(description);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(txn).await
}

pub async fn delete(txn: &DatabaseTransaction, event_id: i64) -> Result<(), sea_orm::DbErr> {
    events::Entity::delete_by_id(event_id).exec(txn).await?;
    Ok(())
}
