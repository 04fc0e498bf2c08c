//! SeaORM adapters. Functions here return raw `sea_orm::DbErr`; the repos
//! layer maps to `DomainError`.

pub mod events_sea;
pub mod matches_sea;
pub mod players_sea;
pub mod scoreboards_sea;
pub mod seasons_sea;
pub mod standings_sea;
pub mod teams_sea;
pub mod users_sea;
