//! In-process registry of websocket sessions subscribed to scoreboards.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

/// Pushed to every session subscribed to a match when its board changes.
#[derive(Message, Clone, Copy, Debug)]
#[rtype(result = "()")]
pub struct BoardBroadcast {
    pub match_id: i64,
    pub lock_version: i32,
}

/// Sessions per match id; a session registers once per subscription and is
/// addressed through its broadcast recipient.
#[derive(Default)]
pub struct ScoreboardRegistry {
    sessions: DashMap<i64, DashMap<Uuid, Recipient<BoardBroadcast>>>,
}

impl ScoreboardRegistry {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, match_id: i64, recipient: Recipient<BoardBroadcast>) -> Uuid {
        let token = Uuid::new_v4();
        let entry = self.sessions.entry(match_id).or_default();
        entry.insert(token, recipient);
        token
    }

    pub fn unregister(&self, match_id: i64, token: Uuid) {
        if let Some(entry) = self.sessions.get(&match_id) {
            entry.remove(&token);
            if entry.is_empty() {
                drop(entry);
                self.sessions.remove_if(&match_id, |_, v| v.is_empty());
            }
        }
    }

    pub fn broadcast(&self, match_id: i64, message: BoardBroadcast) {
        if let Some(entry) = self.sessions.get(&match_id) {
            for recipient in entry.iter() {
                recipient.value().do_send(message);
            }
        }
    }

    /// Number of live subscriptions for a match (test observability).
    pub fn subscriber_count(&self, match_id: i64) -> usize {
        self.sessions.get(&match_id).map(|e| e.len()).unwrap_or(0)
    }
}
