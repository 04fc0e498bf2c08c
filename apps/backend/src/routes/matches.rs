//! Fixture and result routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::matches_sea::HandInsert;
use crate::db::txn::with_txn;
use crate::entities::match_hands::HandSide;
use crate::entities::matches::MatchStatus;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::admin::AdminUser;
use crate::extractors::match_id::MatchId;
use crate::repos::matches::Match;
use crate::services::matches as match_service;
use crate::services::standings as standings_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleMatchRequest {
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub scheduled_at: OffsetDateTime,
    pub venue: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct HandScoreRequest {
    pub player_id: i64,
    pub side: HandSide,
    pub hand_no: i16,
    pub pins: i16,
}

#[derive(Debug, Deserialize)]
pub struct ResultRequest {
    #[serde(default)]
    pub hands: Vec<HandScoreRequest>,
}

impl From<HandScoreRequest> for HandInsert {
    fn from(req: HandScoreRequest) -> Self {
        Self {
            player_id: req.player_id,
            side: req.side,
            hand_no: req.hand_no,
            pins: req.pins,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub id: i64,
    pub division_id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub scheduled_at: OffsetDateTime,
    pub venue: Option<String>,
    pub status: MatchStatus,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
}

impl From<Match> for MatchResponse {
    fn from(m: Match) -> Self {
        Self {
            id: m.id,
            division_id: m.division_id,
            home_team_id: m.home_team_id,
            away_team_id: m.away_team_id,
            scheduled_at: m.scheduled_at,
            venue: m.venue,
            status: m.status,
            home_score: m.home_score,
            away_score: m.away_score,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ListMatchesQuery {
    division: Option<i64>,
    status: Option<String>,
}

fn parse_status(raw: &str) -> Result<MatchStatus, AppError> {
    match raw {
        "scheduled" => Ok(MatchStatus::Scheduled),
        "in_progress" => Ok(MatchStatus::InProgress),
        "completed" => Ok(MatchStatus::Completed),
        "postponed" => Ok(MatchStatus::Postponed),
        other => Err(AppError::bad_request(
            ErrorCode::BadRequest,
            format!("Unknown match status filter: {other}"),
        )),
    }
}

/// GET /api/matches?division=&status= - the fixtures page.
async fn list_matches(
    http_req: HttpRequest,
    query: web::Query<ListMatchesQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = query.division;
    let status = query.status.as_deref().map(parse_status).transpose()?;

    let fixtures = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            Ok(crate::repos::matches::list(txn, division_id, status).await?)
        })
    })
    .await?;

    let body: Vec<MatchResponse> = fixtures.into_iter().map(MatchResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_match(
    http_req: HttpRequest,
    match_id: MatchId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { Ok(crate::repos::matches::require_match(txn, id).await?) })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MatchResponse::from(fixture)))
}

async fn schedule_match(
    http_req: HttpRequest,
    req: web::Json<ScheduleMatchRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let ScheduleMatchRequest {
        division_id,
        home_team_id,
        away_team_id,
        scheduled_at,
        venue,
    } = req.into_inner();

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            match_service::schedule_match(
                txn,
                division_id,
                home_team_id,
                away_team_id,
                scheduled_at,
                venue,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(MatchResponse::from(fixture)))
}

/// POST /api/matches/{match_id}/result - record a completed result.
async fn record_result(
    http_req: HttpRequest,
    match_id: MatchId,
    req: web::Json<ResultRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;
    let hands: Vec<HandInsert> = req.into_inner().hands.into_iter().map(Into::into).collect();

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { match_service::record_result(txn, id, hands).await })
    })
    .await?;

    standings_service::invalidate(&app_state, fixture.division_id).await;
    Ok(HttpResponse::Ok().json(MatchResponse::from(fixture)))
}

/// PUT /api/matches/{match_id}/result - correct an already-recorded result.
async fn correct_result(
    http_req: HttpRequest,
    match_id: MatchId,
    req: web::Json<ResultRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;
    let hands: Vec<HandInsert> = req.into_inner().hands.into_iter().map(Into::into).collect();

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { match_service::correct_result(txn, id, hands).await })
    })
    .await?;

    standings_service::invalidate(&app_state, fixture.division_id).await;
    Ok(HttpResponse::Ok().json(MatchResponse::from(fixture)))
}

async fn postpone_match(
    http_req: HttpRequest,
    match_id: MatchId,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = match_id.0;

    let fixture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { match_service::postpone_match(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(MatchResponse::from(fixture)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/matches")
            .route(web::get().to(list_matches))
            .route(web::post().to(schedule_match)),
    );
    cfg.service(web::resource("/api/matches/{match_id}").route(web::get().to(get_match)));
    cfg.service(
        web::resource("/api/matches/{match_id}/result")
            .route(web::post().to(record_result))
            .route(web::put().to(correct_result)),
    );
    cfg.service(
        web::resource("/api/matches/{match_id}/postpone").route(web::post().to(postpone_match)),
    );
}
