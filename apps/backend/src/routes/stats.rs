//! Statistics routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::Deserialize;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::services::stats;
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

/// GET /api/stats/players?division= - per-player averages and bests.
async fn player_stats(
    http_req: HttpRequest,
    query: web::Query<DivisionQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = require_division_param(&query)?;

    let rows = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { stats::player_stats(txn, division_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

/// GET /api/stats/teams?division= - standings projection with averages.
async fn team_stats(
    http_req: HttpRequest,
    query: web::Query<DivisionQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = require_division_param(&query)?;

    let rows = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { stats::team_stats(txn, division_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(rows))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/stats/players").route(web::get().to(player_stats)));
    cfg.service(web::resource("/api/stats/teams").route(web::get().to(team_stats)));
}
