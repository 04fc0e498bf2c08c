use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "match_status")]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[sea_orm(string_value = "SCHEDULED")]
    Scheduled,
    #[sea_orm(string_value = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(string_value = "COMPLETED")]
    Completed,
    #[sea_orm(string_value = "POSTPONED")]
    Postponed,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "matches")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "division_id")]
    pub division_id: i64,
    #[sea_orm(column_name = "home_team_id")]
    pub home_team_id: i64,
    #[sea_orm(column_name = "away_team_id")]
    pub away_team_id: i64,
    #[sea_orm(column_name = "scheduled_at")]
    pub scheduled_at: OffsetDateTime,
    pub venue: Option<String>,
    pub status: MatchStatus,
    #[sea_orm(column_name = "home_score")]
    pub home_score: Option<i32>,
    #[sea_orm(column_name = "away_score")]
    pub away_score: Option<i32>,
    #[sea_orm(column_name = "lock_version")]
    pub lock_version: i32,
    #[sea_orm(column_name = "created_at")]
    pub created_at: OffsetDateTime,
    #[sea_orm(column_name = "updated_at")]
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::divisions::Entity",
        from = "Column::DivisionId",
        to = "super::divisions::Column::Id"
    )]
    Division,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::HomeTeamId",
        to = "super::teams::Column::Id"
    )]
    HomeTeam,
    #[sea_orm(
        belongs_to = "super::teams::Entity",
        from = "Column::AwayTeamId",
        to = "super::teams::Column::Id"
    )]
    AwayTeam,
    #[sea_orm(has_many = "super::match_hands::Entity")]
    MatchHands,
    #[sea_orm(has_one = "super::scoreboards::Entity")]
    Scoreboard,
}

impl Related<super::divisions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Division.def()
    }
}

impl Related<super::match_hands::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MatchHands.def()
    }
}

impl Related<super::scoreboards::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Scoreboard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
