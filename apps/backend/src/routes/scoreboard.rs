//! Live scoreboard routes.
//!
//! The manual scoreboard lives under its match:
//! - POST   /api/matches/{match_id}/scoreboard        open (admin)
//! - GET    /api/matches/{match_id}/scoreboard        current board
//! - POST   /api/matches/{match_id}/scoreboard/input  apply key events (admin)
//! - POST   /api/matches/{match_id}/scoreboard/close  finalize (admin)
//!
//! Every mutation publishes the fresh board version to the realtime layer
//! so subscribed websocket sessions resync.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;
use tracing::warn;

use crate::db::txn::with_txn;
use crate::domain::scoreboard::Key;
use crate::error::AppError;
use crate::extractors::admin::AdminUser;
use crate::extractors::match_id::MatchId;
use crate::services::scoreboard as scoreboard_service;
use crate::services::standings as standings_service;
use crate::state::app_state::AppState;
use crate::ws::hub::BoardBroadcast;

#[derive(Debug, Deserialize)]
pub struct InputRequest {
    /// Client's last-seen board version; stale input is rejected.
    pub lock_version: i32,
    #[serde(default)]
    pub keys: Vec<Key>,
}

/// Push a board change to local sessions and, when configured, to the
/// other instances via Redis.
async fn publish_board(app_state: &AppState, match_id: i64, lock_version: i32) {
    app_state.ws_registry().broadcast(
        match_id,
        BoardBroadcast {
            match_id,
            lock_version,
        },
    );

    if let Some(broker) = app_state.realtime() {
        if let Err(err) = broker.publish_board(match_id, lock_version).await {
            warn!(match_id, error = %err, "Failed to publish board event to Redis");
        }
    }
}

async fn open_board(
    http_req: HttpRequest,
    match_id: MatchId,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;

    let board = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { scoreboard_service::open_board(txn, id).await })
    })
    .await?;

    publish_board(&app_state, id, board.lock_version).await;
    Ok(HttpResponse::Created().json(board))
}

async fn get_board(
    http_req: HttpRequest,
    match_id: MatchId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;

    let board = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { scoreboard_service::board_view(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(board))
}

async fn board_input(
    http_req: HttpRequest,
    match_id: MatchId,
    req: web::Json<InputRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;
    let InputRequest { lock_version, keys } = req.into_inner();

    let board = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            scoreboard_service::apply_input(txn, id, lock_version, &keys).await
        })
    })
    .await?;

    publish_board(&app_state, id, board.lock_version).await;
    Ok(HttpResponse::Ok().json(board))
}

async fn close_board(
    http_req: HttpRequest,
    match_id: MatchId,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { scoreboard_service::close_board(txn, id).await })
    })
    .await?;

    standings_service::invalidate(&app_state, fixture.division_id).await;
    publish_board(&app_state, id, fixture.lock_version).await;

    Ok(HttpResponse::Ok().json(crate::routes::matches::MatchResponse::from(fixture)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/matches/{match_id}/scoreboard")
            .route(web::post().to(open_board))
            .route(web::get().to(get_board)),
    );
    cfg.service(
        web::resource("/api/matches/{match_id}/scoreboard/input")
            .route(web::post().to(board_input)),
    );
    cfg.service(
        web::resource("/api/matches/{match_id}/scoreboard/close")
            .route(web::post().to(close_board)),
    );
}
