//! SeaORM adapter for players and their private contact rows.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseTransaction, EntityTrait, NotSet,
    QueryFilter, QueryOrder, Set,
};

use crate::entities::{player_contacts, players};

pub mod dto;

pub use dto::{ContactUpsert, PlayerCreate, PlayerUpdate};

pub async fn create_player(
    txn: &DatabaseTransaction,
    dto: PlayerCreate,
) -> Result<players::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let player_active = players::ActiveModel {
        id: NotSet,
        team_id: Set(dto.team_id),
        user_id: Set(dto.user_id),
        display_name: Set(dto.display_name),
        position: Set(dto.position),
        created_at: Set(now),
        updated_at: Set(now),
    };

    player_active.insert(txn).await
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<players::Model>, sea_orm::DbErr> {
    players::Entity::find_by_id(player_id).one(conn).await
}

pub async fn list<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: Option<i64>,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    let mut query = players::Entity::find();
    if let Some(team_id) = team_id {
        query = query.filter(players::Column::TeamId.eq(team_id));
    }
    query
        .order_by_asc(players::Column::DisplayName)
        .all(conn)
        .await
}

/// Roster in fixed playing order - the order the scoreboard sequencer uses.
pub async fn roster_for_team<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: i64,
) -> Result<Vec<players::Model>, sea_orm::DbErr> {
    players::Entity::find()
        .filter(players::Column::TeamId.eq(team_id))
        .order_by_asc(players::Column::Position)
        .order_by_asc(players::Column::Id)
        .all(conn)
        .await
}

pub async fn update_player(
    txn: &DatabaseTransaction,
    player: players::Model,
    dto: PlayerUpdate,
) -> Result<players::Model, sea_orm::DbErr> {
    let mut active: players::ActiveModel = player.into();
    if let Some(display_name) = dto.display_name {
        active.display_name = Set(display_name);
    }
    if let Some(team_id) = dto.team_id {
        active.team_id = Set(team_id);
    }
    if let Some(position) = dto.position {
        active.position = Set(position);
    }
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(txn).await
}

pub async fn find_contact_by_player_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
) -> Result<Option<player_contacts::Model>, sea_orm::DbErr> {
    player_contacts::Entity::find()
        .filter(player_contacts::Column::PlayerId.eq(player_id))
        .one(conn)
        .await
}

/// Insert or update the single contact row for a player.
pub async fn upsert_contact(
    txn: &DatabaseTransaction,
    player_id: i64,
    dto: ContactUpsert,
) -> Result<player_contacts::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();

    match find_contact_by_player_id(txn, player_id).await? {
        Some(existing) => {
            let mut active: player_contacts::ActiveModel = existing.into();
            active.email = Set(dto.email);
            active.phone = Set(dto.phone);
            active.address = Set(dto.address);
            active.updated_at = Set(now);
            active.update(txn).await
        }
        None => {
            let contact_active = player_contacts::ActiveModel {
                id: NotSet,
                player_id: Set(player_id),
                email: Set(dto.email),
                phone: Set(dto.phone),
                address: Set(dto.address),
                created_at: Set(now),
                updated_at: Set(now),
            };
            contact_active.insert(txn).await
        }
    }
}
