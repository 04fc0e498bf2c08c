//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod events;
pub mod matches;
pub mod players;
pub mod scoreboards;
pub mod seasons;
pub mod standings;
pub mod teams;
pub mod users;
