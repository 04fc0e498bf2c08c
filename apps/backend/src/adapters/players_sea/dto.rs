//! DTOs for the players adapter.

/// DTO for registering a new player.
#[derive(Debug, Clone)]
pub struct PlayerCreate {
    pub team_id: Option<i64>,
    pub user_id: Option<i64>,
    pub display_name: String,
    pub position: i16,
}

impl PlayerCreate {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            team_id: None,
            user_id: None,
            display_name: display_name.into(),
            position: 0,
        }
    }

    pub fn in_team(mut self, team_id: i64, position: i16) -> Self {
        self.team_id = Some(team_id);
        self.position = position;
        self
    }

    pub fn for_user(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Partial update for a player profile.
///
/// `team_id` is three-state: None = no change, Some(None) = leave team,
/// Some(Some(id)) = move to team.
#[derive(Debug, Clone, Default)]
pub struct PlayerUpdate {
    pub display_name: Option<String>,
    pub team_id: Option<Option<i64>>,
    pub position: Option<i16>,
}

/// Full replacement of a player's private contact data.
#[derive(Debug, Clone, Default)]
pub struct ContactUpsert {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}
