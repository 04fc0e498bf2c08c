//! Event repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;

use crate::adapters::events_sea as events_adapter;
use crate::adapters::events_sea::{EventCreate, EventUpdate};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Club event domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub starts_at: OffsetDateTime,
    pub venue: Option<String>,
    pub description: Option<String>,
}

pub async fn create(txn: &DatabaseTransaction, dto: EventCreate) -> Result<Event, DomainError> {
    let event = events_adapter::create(txn, dto).await?;
    Ok(Event::from(event))
}

pub async fn require_event<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    event_id: i64,
) -> Result<Event, DomainError> {
    let event = events_adapter::find_by_id(conn, event_id).await?;
    event.map(Event::from).ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Event, format!("Event {event_id} not found"))
    })
}

pub async fn list_upcoming<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    after: OffsetDateTime,
) -> Result<Vec<Event>, DomainError> {
    let events = events_adapter::list_upcoming(conn, after).await?;
    Ok(events.into_iter().map(Event::from).collect())
}

pub async fn update(
    txn: &DatabaseTransaction,
    event_id: i64,
    dto: EventUpdate,
) -> Result<Event, DomainError> {
    let existing = events_adapter::find_by_id(txn, event_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Event, format!("Event {event_id} not found"))
        })?;
    let event = events_adapter::update(txn, existing, dto).await?;
    Ok(Event::from(event))
}

pub async fn delete(txn: &DatabaseTransaction, event_id: i64) -> Result<(), DomainError> {
    events_adapter::delete(txn, event_id).await?;
    Ok(())
}

impl From<crate::entities::events::Model> for Event {
    fn from(model: crate::entities::events::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            starts_at: model.starts_at,
            venue: model.venue,
            description: model.description,
        }
    }
}
