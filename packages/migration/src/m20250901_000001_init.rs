use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{DatabaseBackend, Statement};
use sea_orm_migration::sea_query::extension::postgres::Type as PgType;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(Iden)]
enum Users {
    Table,
    Id,
    Sub,
    Username,
    IsAdmin,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserCredentials {
    Table,
    Id,
    UserId,
    PasswordHash,
    Email,
    GoogleSub,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Seasons {
    Table,
    Id,
    Name,
    StartsOn,
    EndsOn,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Divisions {
    Table,
    Id,
    SeasonId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Teams {
    Table,
    Id,
    DivisionId,
    Name,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Players {
    Table,
    Id,
    TeamId,
    UserId,
    DisplayName,
    Position,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum PlayerContacts {
    Table,
    Id,
    PlayerId,
    Email,
    Phone,
    Address,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Matches {
    Table,
    Id,
    DivisionId,
    HomeTeamId,
    AwayTeamId,
    ScheduledAt,
    Venue,
    Status,
    HomeScore,
    AwayScore,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MatchHands {
    Table,
    Id,
    MatchId,
    PlayerId,
    Side,
    HandNo,
    Pins,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Standings {
    Table,
    Id,
    DivisionId,
    TeamId,
    Played,
    Won,
    Lost,
    Drawn,
    Points,
    PinsFor,
    PinsAgainst,
    MaxScore,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Scoreboards {
    Table,
    Id,
    MatchId,
    Cursor,
    Entries,
    LockVersion,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum Events {
    Table,
    Id,
    Title,
    StartsAt,
    Venue,
    Description,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum MatchStatusEnum {
    #[iden = "match_status"]
    Type,
}

#[derive(Iden)]
enum HandSideEnum {
    #[iden = "hand_side"]
    Type,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // users table
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Users::Sub).string().not_null())
                    .col(ColumnDef::new(Users::Username).string().null())
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_users_sub")
                    .table(Users::Table)
                    .col(Users::Sub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // user_credentials table
        manager
            .create_table(
                Table::create()
                    .table(UserCredentials::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserCredentials::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(UserCredentials::UserId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(UserCredentials::PasswordHash).string().null())
                    .col(ColumnDef::new(UserCredentials::Email).string().not_null())
                    .col(ColumnDef::new(UserCredentials::GoogleSub).string().null())
                    .col(
                        ColumnDef::new(UserCredentials::LastLogin)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(UserCredentials::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(UserCredentials::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_user_credentials_user_id")
                            .from(UserCredentials::Table, UserCredentials::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_user_credentials_email")
                    .table(UserCredentials::Table)
                    .col(UserCredentials::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_user_credentials_google_sub")
                    .table(UserCredentials::Table)
                    .col(UserCredentials::GoogleSub)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Create Postgres enums (PostgreSQL only)
        match manager.get_database_backend() {
            DatabaseBackend::Postgres => {
                async fn enum_exists(
                    manager: &SchemaManager<'_>,
                    enum_name: &str,
                ) -> Result<bool, DbErr> {
                    let result = manager
                        .get_connection()
                        .query_one(Statement::from_string(
                            DatabaseBackend::Postgres,
                            format!("SELECT 1 FROM pg_type WHERE typname = '{}'", enum_name),
                        ))
                        .await?;
                    Ok(result.is_some())
                }

                if !enum_exists(manager, "match_status").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(MatchStatusEnum::Type)
                                .values(["SCHEDULED", "IN_PROGRESS", "COMPLETED", "POSTPONED"])
                                .to_owned(),
                        )
                        .await?;
                }

                if !enum_exists(manager, "hand_side").await? {
                    manager
                        .create_type(
                            PgType::create()
                                .as_enum(HandSideEnum::Type)
                                .values(["HOME", "AWAY"])
                                .to_owned(),
                        )
                        .await?;
                }
            }
            DatabaseBackend::Sqlite => {
                // SQLite doesn't need enum types - they're stored as TEXT
            }
            _ => {
                return Err(DbErr::Custom("Unsupported database backend".into()));
            }
        }

        // seasons table
        manager
            .create_table(
                Table::create()
                    .table(Seasons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Seasons::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Seasons::Name).string().not_null())
                    .col(ColumnDef::new(Seasons::StartsOn).date().not_null())
                    .col(ColumnDef::new(Seasons::EndsOn).date().not_null())
                    .col(
                        ColumnDef::new(Seasons::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Seasons::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_seasons_name")
                    .table(Seasons::Table)
                    .col(Seasons::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // divisions table
        manager
            .create_table(
                Table::create()
                    .table(Divisions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Divisions::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Divisions::SeasonId).big_integer().not_null())
                    .col(ColumnDef::new(Divisions::Name).string().not_null())
                    .col(
                        ColumnDef::new(Divisions::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Divisions::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_divisions_season_id")
                            .from(Divisions::Table, Divisions::SeasonId)
                            .to(Seasons::Table, Seasons::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_divisions_season_id_name")
                    .table(Divisions::Table)
                    .col(Divisions::SeasonId)
                    .col(Divisions::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // teams table
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teams::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Teams::DivisionId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teams::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Teams::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_division_id")
                            .from(Teams::Table, Teams::DivisionId)
                            .to(Divisions::Table, Divisions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_teams_division_id_name")
                    .table(Teams::Table)
                    .col(Teams::DivisionId)
                    .col(Teams::Name)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // players table
        manager
            .create_table(
                Table::create()
                    .table(Players::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Players::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Players::TeamId).big_integer().null())
                    .col(ColumnDef::new(Players::UserId).big_integer().null())
                    .col(ColumnDef::new(Players::DisplayName).string().not_null())
                    .col(
                        ColumnDef::new(Players::Position)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Players::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Players::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_team_id")
                            .from(Players::Table, Players::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_players_user_id")
                            .from(Players::Table, Players::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_players_team_id")
                    .table(Players::Table)
                    .col(Players::TeamId)
                    .to_owned(),
            )
            .await?;

        // player_contacts table (private data, split from the public profile)
        manager
            .create_table(
                Table::create()
                    .table(PlayerContacts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(PlayerContacts::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(PlayerContacts::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(PlayerContacts::Email).string().null())
                    .col(ColumnDef::new(PlayerContacts::Phone).string().null())
                    .col(ColumnDef::new(PlayerContacts::Address).string().null())
                    .col(
                        ColumnDef::new(PlayerContacts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(PlayerContacts::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_player_contacts_player_id")
                            .from(PlayerContacts::Table, PlayerContacts::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_player_contacts_player_id")
                    .table(PlayerContacts::Table)
                    .col(PlayerContacts::PlayerId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // matches table
        manager
            .create_table(
                Table::create()
                    .table(Matches::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Matches::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Matches::DivisionId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Matches::HomeTeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::AwayTeamId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::ScheduledAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Matches::Venue).string().null())
                    .col(
                        ColumnDef::new(Matches::Status)
                            .custom(MatchStatusEnum::Type)
                            .not_null()
                            .default("SCHEDULED"),
                    )
                    .col(ColumnDef::new(Matches::HomeScore).integer().null())
                    .col(ColumnDef::new(Matches::AwayScore).integer().null())
                    .col(
                        ColumnDef::new(Matches::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Matches::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Matches::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_division_id")
                            .from(Matches::Table, Matches::DivisionId)
                            .to(Divisions::Table, Divisions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_home_team_id")
                            .from(Matches::Table, Matches::HomeTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_matches_away_team_id")
                            .from(Matches::Table, Matches::AwayTeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_matches_division_id_scheduled_at")
                    .table(Matches::Table)
                    .col(Matches::DivisionId)
                    .col(Matches::ScheduledAt)
                    .to_owned(),
            )
            .await?;

        // match_hands table
        manager
            .create_table(
                Table::create()
                    .table(MatchHands::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(MatchHands::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(MatchHands::MatchId).big_integer().not_null())
                    .col(
                        ColumnDef::new(MatchHands::PlayerId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchHands::Side)
                            .custom(HandSideEnum::Type)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchHands::HandNo)
                            .small_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(MatchHands::Pins).small_integer().not_null())
                    .col(
                        ColumnDef::new(MatchHands::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(MatchHands::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_hands_match_id")
                            .from(MatchHands::Table, MatchHands::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_match_hands_player_id")
                            .from(MatchHands::Table, MatchHands::PlayerId)
                            .to(Players::Table, Players::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_match_hands_match_player_hand")
                    .table(MatchHands::Table)
                    .col(MatchHands::MatchId)
                    .col(MatchHands::PlayerId)
                    .col(MatchHands::HandNo)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // standings table
        manager
            .create_table(
                Table::create()
                    .table(Standings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Standings::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Standings::DivisionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Standings::TeamId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Standings::Played)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Won)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Lost)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Drawn)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::Points)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::PinsFor)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::PinsAgainst)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::MaxScore)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Standings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Standings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_standings_division_id")
                            .from(Standings::Table, Standings::DivisionId)
                            .to(Divisions::Table, Divisions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_standings_team_id")
                            .from(Standings::Table, Standings::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_standings_division_id_team_id")
                    .table(Standings::Table)
                    .col(Standings::DivisionId)
                    .col(Standings::TeamId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // scoreboards table
        manager
            .create_table(
                Table::create()
                    .table(Scoreboards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Scoreboards::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(
                        ColumnDef::new(Scoreboards::MatchId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Scoreboards::Cursor)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Scoreboards::Entries).json_binary().not_null())
                    .col(
                        ColumnDef::new(Scoreboards::LockVersion)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Scoreboards::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Scoreboards::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_scoreboards_match_id")
                            .from(Scoreboards::Table, Scoreboards::MatchId)
                            .to(Matches::Table, Matches::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_scoreboards_match_id")
                    .table(Scoreboards::Table)
                    .col(Scoreboards::MatchId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // events table
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Events::Id)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Events::Title).string().not_null())
                    .col(
                        ColumnDef::new(Events::StartsAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Events::Venue).string().null())
                    .col(ColumnDef::new(Events::Description).text().null())
                    .col(
                        ColumnDef::new(Events::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Events::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_events_starts_at")
                    .table(Events::Table)
                    .col(Events::StartsAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Events::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Scoreboards::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Standings::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(MatchHands::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Matches::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(PlayerContacts::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Players::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Divisions::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(UserCredentials::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).if_exists().to_owned())
            .await?;

        if manager.get_database_backend() == DatabaseBackend::Postgres {
            manager
                .get_connection()
                .execute(Statement::from_string(
                    DatabaseBackend::Postgres,
                    "DROP TYPE IF EXISTS match_status; DROP TYPE IF EXISTS hand_side;".to_string(),
                ))
                .await?;
        }

        Ok(())
    }
}
