//! Business operations. Routes own the transaction via `with_txn` and call
//! in here; services validate, run the domain arithmetic and persist.

pub mod events;
pub mod matches;
pub mod players;
pub mod scoreboard;
pub mod standings;
pub mod stats;
pub mod teams;
pub mod users;
