//! Player registration and profile routes.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::players_sea::{ContactUpsert, PlayerUpdate};
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::players::{Player, PlayerContact};
use crate::services::players::{self, PlayerView};
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterPlayerRequest {
    #[serde(default)]
    pub display_name: String,
    pub team_id: Option<i64>,
    #[serde(default)]
    pub position: i16,
    #[serde(default)]
    pub contact: ContactRequest,
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl From<ContactRequest> for ContactUpsert {
    fn from(req: ContactRequest) -> Self {
        Self {
            email: req.email,
            phone: req.phone,
            address: req.address,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdatePlayerRequest {
    pub display_name: Option<String>,
    /// Explicit null leaves the team; absent field means no change.
    #[serde(default, with = "serde_double_option")]
    pub team_id: Option<Option<i64>>,
    pub position: Option<i16>,
    pub contact: Option<ContactRequest>,
}

/// Distinguishes an absent field from an explicit null.
mod serde_double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Option<i64>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<i64>::deserialize(deserializer).map(Some)
    }
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlayerResponse {
    pub id: i64,
    pub team_id: Option<i64>,
    pub display_name: String,
    pub position: i16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<ContactResponse>,
}

impl PlayerResponse {
    fn from_view(view: PlayerView) -> Self {
        let PlayerView { player, contact } = view;
        Self::assemble(player, contact)
    }

    fn assemble(player: Player, contact: Option<PlayerContact>) -> Self {
        Self {
            id: player.id,
            team_id: player.team_id,
            display_name: player.display_name,
            position: player.position,
            contact: contact.map(|c| ContactResponse {
                email: c.email,
                phone: c.phone,
                address: c.address,
            }),
        }
    }
}

async fn register_player(
    http_req: HttpRequest,
    req: web::Json<RegisterPlayerRequest>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let RegisterPlayerRequest {
        display_name,
        team_id,
        position,
        contact,
    } = req.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            players::register_player(
                txn,
                &current_user,
                &display_name,
                team_id,
                position,
                contact.into(),
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(PlayerResponse::from_view(view)))
}

async fn get_player(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: Option<CurrentUser>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = path.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            players::view_player(txn, player_id, current_user.as_ref()).await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayerResponse::from_view(view)))
}

#[derive(Debug, Deserialize)]
struct ListPlayersQuery {
    team: Option<i64>,
}

async fn list_players(
    http_req: HttpRequest,
    query: web::Query<ListPlayersQuery>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let team_id = query.team;

    let players = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { players::list_players(txn, team_id).await })
    })
    .await?;

    let body: Vec<PlayerResponse> = players
        .into_iter()
        .map(|p| PlayerResponse::assemble(p, None))
        .collect();
    Ok(HttpResponse::Ok().json(body))
}

async fn update_player(
    http_req: HttpRequest,
    path: web::Path<i64>,
    req: web::Json<UpdatePlayerRequest>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let player_id = path.into_inner();
    let UpdatePlayerRequest {
        display_name,
        team_id,
        position,
        contact,
    } = req.into_inner();

    let view = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            players::update_player(
                txn,
                &current_user,
                player_id,
                PlayerUpdate {
                    display_name,
                    team_id,
                    position,
                },
                contact.map(ContactUpsert::from),
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(PlayerResponse::from_view(view)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/api/players")
            .route(web::post().to(register_player))
            .route(web::get().to(list_players)),
    );
    cfg.service(
        web::resource("/api/players/{player_id}")
            .route(web::get().to(get_player))
            .route(web::patch().to(update_player)),
    );
}
