//! Team, season and division routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::admin::AdminUser;
use crate::repos::players::Player;
use crate::services::teams::{self, TeamView};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateSeasonRequest {
    #[serde(default)]
    pub name: String,
    pub starts_on: Date,
    pub ends_on: Date,
}

#[derive(Debug, Deserialize)]
pub struct CreateDivisionRequest {
    pub season_id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateTeamRequest {
    pub division_id: i64,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct RosterEntry {
    pub player_id: i64,
    pub display_name: String,
    pub position: i16,
}

#[derive(Debug, Serialize)]
pub struct TeamResponse {
    pub id: i64,
    pub division_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roster: Option<Vec<RosterEntry>>,
}

fn roster_entries(roster: Vec<Player>) -> Vec<RosterEntry> {
    roster
        .into_iter()
        .map(|p| RosterEntry {
            player_id: p.id,
            display_name: p.display_name,
            position: p.position,
        })
        .collect()
}

async fn create_season(
    http_req: HttpRequest,
    req: web::Json<CreateSeasonRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateSeasonRequest {
        name,
        starts_on,
        ends_on,
    } = req.into_inner();

    let season = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { teams::create_season(txn, &name, starts_on, ends_on).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": season.id,
        "name": season.name,
        "starts_on": season.starts_on,
        "ends_on": season.ends_on,
    })))
}

async fn create_division(
    http_req: HttpRequest,
    req: web::Json<CreateDivisionRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateDivisionRequest { season_id, name } = req.into_inner();

    let division = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { teams::create_division(txn, season_id, &name).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "id": division.id,
        "season_id": division.season_id,
        "name": division.name,
    })))
}

async fn create_team(
    http_req: HttpRequest,
    req: web::Json<CreateTeamRequest>,
    _admin: AdminUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let CreateTeamRequest { division_id, name } = req.into_inner();

    let team = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { teams::create_team(txn, division_id, &name).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(TeamResponse {
        id: team.id,
        division_id: team.division_id,
        name: team.name,
        roster: None,
    }))
}

#[derive(Debug, Deserialize)]
struct ListTeamsQuery {
    division: Option<i64>,
}

async fn list_teams(
    http_req: HttpRequest,
    query: web::Query<ListTeamsQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let division_id = query.division;

    let teams = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { teams::list_teams(txn, division_id).await })
    })
    .await?;

    let body: Vec<TeamResponse> = teams
        .into_iter()
        .map(|t| TeamResponse {
            id: t.id,
            division_id: t.division_id,
            name: t.name,
            roster: None,
        })
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn get_team(
    http_req: HttpRequest,
    path: web::Path<i64>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = path.into_inner();

    let TeamView { team, roster } = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { teams::team_with_roster(txn, team_id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(TeamResponse {
        id: team.id,
        division_id: team.division_id,
        name: team.name,
        roster: Some(roster_entries(roster)),
    }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/seasons").route(web::post().to(create_season)));
    cfg.service(web::resource("/api/divisions").route(web::post().to(create_division)));
    cfg.service(
        web::resource("/api/teams")
            .route(web::post().to(create_team))
            .route(web::get().to(list_teams)),
    );
    cfg.service(web::resource("/api/teams/{team_id}").route(web::get().to(get_team)));
}
