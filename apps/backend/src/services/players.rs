use sea_orm::{ConnectionTrait, DatabaseTransaction};
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::adapters::players_sea::{ContactUpsert, PlayerCreate, PlayerUpdate};
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::current_user::CurrentUser;
use crate::repos::players::{self, Player, PlayerContact};
use crate::repos::teams;

/// Player profile plus contact data when the viewer may see it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerView {
    pub player: Player,
    pub contact: Option<PlayerContact>,
}

/// NFC-normalize and trim a display name.
fn normalize_display_name(name: &str) -> Result<String, AppError> {
    let name: String = name.trim().nfc().collect();
    if name.is_empty() {
        return Err(AppError::bad_request(
            ErrorCode::ValidationError,
            "Display name cannot be empty",
        ));
    }
    Ok(name)
}

/// Register a player: public profile plus private contact row, one txn.
pub async fn register_player(
    txn: &DatabaseTransaction,
    current_user: &CurrentUser,
    display_name: &str,
    team_id: Option<i64>,
    position: i16,
    contact: ContactUpsert,
) -> Result<PlayerView, AppError> {
    let display_name = normalize_display_name(display_name)?;

    if let Some(team_id) = team_id {
        teams::require_team(txn, team_id).await?;
    }

    let mut create = PlayerCreate::new(display_name).for_user(current_user.id);
    if let Some(team_id) = team_id {
        create = create.in_team(team_id, position);
    }
    let player = players::create_player(txn, create).await?;

    let contact = players::upsert_contact(txn, player.id, contact).await?;

    info!(player_id = player.id, user_id = current_user.id, "Player registered");
    Ok(PlayerView {
        player,
        contact: Some(contact),
    })
}

/// A player's profile; contact data only for the owning user or an admin.
pub async fn view_player<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    player_id: i64,
    viewer: Option<&CurrentUser>,
) -> Result<PlayerView, AppError> {
    let player = players::require_player(conn, player_id).await?;

    let may_see_contact = viewer
        .map(|v| v.is_admin || player.user_id == Some(v.id))
        .unwrap_or(false);

    let contact = if may_see_contact {
        players::find_contact(conn, player_id).await?
    } else {
        None
    };

    Ok(PlayerView { player, contact })
}

/// Update profile and/or contact data. Owner or admin only.
pub async fn update_player(
    txn: &DatabaseTransaction,
    current_user: &CurrentUser,
    player_id: i64,
    mut update: PlayerUpdate,
    contact: Option<ContactUpsert>,
) -> Result<PlayerView, AppError> {
    let existing = players::require_player(txn, player_id).await?;

    if !current_user.is_admin && existing.user_id != Some(current_user.id) {
        return Err(AppError::forbidden());
    }

    if let Some(name) = update.display_name.take() {
        update.display_name = Some(normalize_display_name(&name)?);
    }
    if let Some(Some(team_id)) = update.team_id {
        teams::require_team(txn, team_id).await?;
    }

    let player = players::update_player(txn, player_id, update).await?;

    let contact = match contact {
        Some(contact) => Some(players::upsert_contact(txn, player_id, contact).await?),
        None => players::find_contact(txn, player_id).await?,
    };

    Ok(PlayerView { player, contact })
}

pub async fn list_players<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    team_id: Option<i64>,
) -> Result<Vec<Player>, AppError> {
    Ok(players::list(conn, team_id).await?)
}

#[cfg(test)]
mod tests {
    use super::normalize_display_name;

    #[test]
    fn display_name_is_trimmed_and_nfc() {
        assert_eq!(normalize_display_name("  Joe  ").unwrap(), "Joe");
        // e + combining acute composes to é
        assert_eq!(normalize_display_name("Jose\u{0301}").unwrap(), "Jos\u{00e9}");
    }

    #[test]
    fn empty_display_name_is_rejected() {
        assert!(normalize_display_name("   ").is_err());
    }
}
