//! DTOs for the scoreboards adapter.

/// Persist one input batch outcome with optimistic locking.
#[derive(Debug, Clone)]
pub struct ScoreboardUpdate {
    pub id: i64,
    pub current_lock_version: i32,
    pub cursor: i32,
    pub entries: serde_json::Value,
}
