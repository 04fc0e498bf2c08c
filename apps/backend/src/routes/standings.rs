//! League table routes.

use actix_web::http::header::{ETAG, IF_NONE_MATCH};
use actix_web::http::StatusCode;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::admin::AdminUser;
use crate::http::etag::{if_none_match_hits, standings_etag};
use crate::services::standings as standings_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct DivisionQuery {
    division: Option<i64>,
}

fn require_division_param(query: &DivisionQuery) -> Result<i64, AppError> {
    query.division.ok_or_else(|| {
        AppError::bad_request(
            ErrorCode::BadRequest,
            "Missing required query parameter: division",
        )
    })
}

/// GET /api/standings?division= - the league table page.
///
/// Supports `If-None-Match`: when the client's ETag still matches, returns
/// `304 Not Modified` with no body.
async fn get_standings(
    http_req: HttpRequest,
    query: web::Query<DivisionQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = require_division_param(&query)?;

    let state = app_state.clone();
    let rows = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { standings_service::division_table(&state, txn, division_id).await })
    })
    .await?;

    let etag_value = standings_etag(division_id, &rows);

    if let Some(if_none_match) = http_req.headers().get(IF_NONE_MATCH) {
        if let Ok(client_etag) = if_none_match.to_str() {
            if if_none_match_hits(client_etag, &etag_value) {
                return Ok(HttpResponse::build(StatusCode::NOT_MODIFIED)
                    .insert_header((ETAG, etag_value))
                    .finish());
            }
        }
    }

    Ok(HttpResponse::Ok()
        .insert_header((ETAG, etag_value))
        .json(&*rows))
}

/// POST /api/standings/recompute?division= - admin repair: rebuild the
/// table from completed results.
async fn recompute_standings(
    http_req: HttpRequest,
    query: web::Query<DivisionQuery>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = require_division_param(&query)?;

    let rows = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { standings_service::recompute_division(txn, division_id).await })
    })
    .await?;

    standings_service::invalidate(&app_state, division_id).await;
    Ok(HttpResponse::Ok().json(rows))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/standings").route(web::get().to(get_standings)));
    cfg.service(
        web::resource("/api/standings/recompute").route(web::post().to(recompute_standings)),
    );
}
