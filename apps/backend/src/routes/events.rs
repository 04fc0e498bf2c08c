//! Club event routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::events_sea::EventUpdate;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::admin::AdminUser;
use crate::repos::events::Event;
use crate::services::events as event_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    pub venue: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    pub title: Option<String>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub starts_at: Option<OffsetDateTime>,
    /// Explicit null clears the field; absent means no change.
    #[serde(default, deserialize_with = "double_option")]
    pub venue: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

/// Distinguishes an absent field from an explicit null.
fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::Deserialize;
    Option::<String>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Serialize)]
pub struct EventResponse {
    pub id: i64,
    pub title: String,
    #[serde(with = "time::serde::rfc3339")]
    pub starts_at: OffsetDateTime,
    pub venue: Option<String>,
    pub description: Option<String>,
}

impl From<Event> for EventResponse {
    fn from(event: Event) -> Self {
        Self {
            id: event.id,
            title: event.title,
            starts_at: event.starts_at,
            venue: event.venue,
            description: event.description,
        }
    }
}

/// GET /api/events - upcoming club events, soonest first.
async fn list_events(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let now = OffsetDateTime::now_utc();

    let events = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { event_service::upcoming_events(txn, now).await })
    })
    .await?;

    let body: Vec<EventResponse> = events.into_iter().map(EventResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn create_event(
    http_req: HttpRequest,
    req: web::Json<CreateEventRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateEventRequest {
        title,
        starts_at,
        venue,
        description,
    } = req.into_inner();

    let event = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            event_service::create_event(txn, &title, starts_at, venue, description).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(EventResponse::from(event)))
}

async fn update_event(
    http_req: HttpRequest,
    path: web::Path<i64>,
    req: web::Json<UpdateEventRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();
    let UpdateEventRequest {
        title,
        starts_at,
        venue,
        description,
    } = req.into_inner();

    let event = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            event_service::update_event(
                txn,
                event_id,
                EventUpdate {
                    title,
                    starts_at,
                    venue,
                    description,
                },
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(EventResponse::from(event)))
}

async fn delete_event(
    http_req: HttpRequest,
    path: web::Path<i64>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let event_id = path.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { event_service::delete_event(txn, event_id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/events")
            .route(web::get().to(list_events))
            .route(web::post().to(create_event)),
    );
    cfg.service(
        web::resource("/api/events/{event_id}")
            .route(web::patch().to(update_event))
            .route(web::delete().to(delete_event)),
    );
}
