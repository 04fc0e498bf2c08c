//! Player statistics over completed matches.

use std::collections::BTreeMap;

use serde::Serialize;

/// One persisted hand score, flattened for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandLine {
    pub match_id: i64,
    pub player_id: i64,
    pub pins: i32,
}

/// Per-player aggregate across completed matches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerTotals {
    pub player_id: i64,
    pub games: i32,
    pub hands: i32,
    pub total_pins: i32,
    pub best_hand: i32,
    /// Highest single-match pin total.
    pub best_match: i32,
}

impl PlayerTotals {
    /// Average pins per hand, rounded to two decimal places.
    pub fn average(&self) -> f64 {
        if self.hands == 0 {
            return 0.0;
        }
        (f64::from(self.total_pins) / f64::from(self.hands) * 100.0).round() / 100.0
    }
}

/// Aggregate hand lines into per-player totals, ordered by player id.
pub fn player_totals(lines: &[HandLine]) -> Vec<PlayerTotals> {
    // (player -> match -> pins in that match) plus flat counters
    let mut per_match: BTreeMap<i64, BTreeMap<i64, i32>> = BTreeMap::new();
    let mut totals: BTreeMap<i64, PlayerTotals> = BTreeMap::new();

    for line in lines {
        let entry = totals.entry(line.player_id).or_insert_with(|| PlayerTotals {
            player_id: line.player_id,
            games: 0,
            hands: 0,
            total_pins: 0,
            best_hand: 0,
            best_match: 0,
        });
        entry.hands += 1;
        entry.total_pins += line.pins;
        entry.best_hand = entry.best_hand.max(line.pins);

        *per_match
            .entry(line.player_id)
            .or_default()
            .entry(line.match_id)
            .or_insert(0) += line.pins;
    }

    for (player_id, matches) in per_match {
        if let Some(entry) = totals.get_mut(&player_id) {
            entry.games = matches.len() as i32;
            entry.best_match = matches.values().copied().max().unwrap_or(0);
        }
    }

    totals.into_values().collect()
}
