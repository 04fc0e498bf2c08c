//! Player repository functions (generic over ConnectionTrait).

use sea_orm::{ConnectionTrait, DatabaseTransaction};

use crate::adapters::players_sea as players_adapter;
use crate::adapters::players_sea::{ContactUpsert, PlayerCreate, PlayerUpdate};
use crate::errors::domain::{DomainError, NotFoundKind};

/// Public player profile domain model
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub team_id: Option<i64>,
    pub user_id: Option<i64>,
    pub display_name: String,
    pub position: i16,
}

/// Private contact record domain model
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerContact {
    pub player_id: i64,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

pub async fn create_player(
    txn: &DatabaseTransaction,
    dto: PlayerCreate,
) -> Result<Player, DomainError> {
    let player = players_adapter::create_player(txn, dto).await?;
    Ok(Player::from(player))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<Player>, DomainError> {
    let player = players_adapter::find_by_id(conn, player_id).await?;
    Ok(player.map(Player::from))
}

pub async fn require_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Player, DomainError> {
    find_by_id(conn, player_id).await?.ok_or_else(|| {
        DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
    })
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: Option<i64>,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::list(conn, team_id).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

/// Roster in fixed playing order for the scoreboard sequencer.
pub async fn roster_for_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<Player>, DomainError> {
    let players = players_adapter::roster_for_team(conn, team_id).await?;
    Ok(players.into_iter().map(Player::from).collect())
}

pub async fn update_player(
    txn: &DatabaseTransaction,
    player_id: i64,
    dto: PlayerUpdate,
) -> Result<Player, DomainError> {
    let existing = players_adapter::find_by_id(txn, player_id)
        .await?
        .ok_or_else(|| {
            DomainError::not_found(NotFoundKind::Player, format!("Player {player_id} not found"))
        })?;
    let player = players_adapter::update_player(txn, existing, dto).await?;
    Ok(Player::from(player))
}

pub async fn find_contact<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<PlayerContact>, DomainError> {
    let contact = players_adapter::find_contact_by_player_id(conn, player_id).await?;
    Ok(contact.map(PlayerContact::from))
}

pub async fn upsert_contact(
    txn: &DatabaseTransaction,
    player_id: i64,
    dto: ContactUpsert,
) -> Result<PlayerContact, DomainError> {
    let contact = players_adapter::upsert_contact(txn, player_id, dto).await?;
    Ok(PlayerContact::from(contact))
}

// Conversions between SeaORM models and domain models

impl From<crate::entities::players::Model> for Player {
    fn from(model: crate::entities::players::Model) -> Self {
        Self {
            id: model.id,
            team_id: model.team_id,
            user_id: model.user_id,
            display_name: model.display_name,
            position: model.position,
        }
    }
}

impl From<crate::entities::player_contacts::Model> for PlayerContact {
    fn from(model: crate::entities::player_contacts::Model) -> Self {
        Self {
            player_id: model.player_id,
            email: model.email,
            phone: model.phone,
            address: model.address,
        }
    }
}
