use sea_orm::{ConnectionTrait, DatabaseTransaction};
use time::OffsetDateTime;
use tracing::info;

use crate::adapters::events_sea::{EventCreate, EventUpdate};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::events::{self, Event};

pub async fn create_event(
    txn: &DatabaseTransaction,
    title: &str,
    starts_at: OffsetDateTime,
    venue: Option<String>,
    description: Option<String>,
) -> Result<Event, AppError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            "Event title cannot be empty",
        ));
    }

    let event = events::create(
        txn,
        EventCreate {
            title: title.to_string(),
            starts_at,
            venue,
            description,
        },
    )
    .await?;

    info!(event_id = event.id, "Event created");
    Ok(event)
}

/// Upcoming events, soonest first.
pub async fn upcoming_events<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    now: OffsetDateTime,
) -> Result<Vec<Event>, AppError> {
    Ok(events::list_upcoming(conn, now).await?)
}

pub async fn update_event(
    txn: &DatabaseTransaction,
    event_id: i64,
    dto: EventUpdate,
) -> Result<Event, AppError> {
    if let Some(title) = &dto.title {
        if title.trim().is_empty() {
            return Err(AppError::bad_request(
                ErrorCode::ValidationError,
                "Event title cannot be empty",
            ));
        }
    }
    Ok(events::update(txn, event_id, dto).await?)
}

pub async fn delete_event(txn: &DatabaseTransaction, event_id: i64) -> Result<(), AppError> {
    events::require_event(txn, event_id).await?;
    events::delete(txn, event_id).await?;
    info!(event_id, "Event deleted");
    Ok(())
}
