//! Manual scoreboard turn sequencing and keyboard input handling.
//!
//! The turn sequence is a pure function of the two rosters: at each of the
//! five hands the sides alternate player-by-player, and the side that bowls
//! first alternates from hand to hand. A cursor walks the precomputed
//! sequence; digit keys build up a two-digit buffer that is only written to
//! the board on commit, which also advances the cursor.

use serde::{Deserialize, Serialize};

use crate::errors::domain::DomainError;

/// Hands each player bowls per match.
pub const HANDS_PER_PLAYER: u8 = 5;
/// Highest pin count a single hand can score (two throws of nine pins).
pub const MAX_HAND_SCORE: u8 = 18;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Home,
    Away,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::Home => Side::Away,
            Side::Away => Side::Home,
        }
    }
}

/// One position in the precomputed turn sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub side: Side,
    pub player_id: i64,
    pub hand_no: u8,
}

/// Precompute the full turn sequence for a match.
///
/// Players are given in their fixed playing order. Hand 1 starts with the
/// home side; each subsequent hand flips the starting side. Within a hand
/// the sides alternate player-by-player; if the rosters are uneven the
/// shorter side simply drops out of the tail of each hand.
pub fn turn_sequence(home: &[i64], away: &[i64]) -> Vec<Turn> {
    let mut sequence = Vec::with_capacity((home.len() + away.len()) * HANDS_PER_PLAYER as usize);

    let mut starting = Side::Home;
    for hand_no in 1..=HANDS_PER_PLAYER {
        let (first, second) = match starting {
            Side::Home => (home, away),
            Side::Away => (away, home),
        };
        for i in 0..first.len().max(second.len()) {
            if let Some(&player_id) = first.get(i) {
                sequence.push(Turn {
                    side: starting,
                    player_id,
                    hand_no,
                });
            }
            if let Some(&player_id) = second.get(i) {
                sequence.push(Turn {
                    side: starting.other(),
                    player_id,
                    hand_no,
                });
            }
        }
        starting = starting.other();
    }

    sequence
}

/// A key event against the live board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "key", rename_all = "snake_case")]
pub enum Key {
    Left,
    Right,
    Digit { value: u8 },
    Commit,
    Clear,
}

/// Live scoreboard state: the sequence, the committed entries aligned with
/// it, the cursor, and the transient digit buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    sequence: Vec<Turn>,
    entries: Vec<Option<u8>>,
    cursor: usize,
    buffer: Option<u8>,
    buffered_digits: u8,
}

impl Board {
    /// Fresh board with no committed scores.
    pub fn new(sequence: Vec<Turn>) -> Self {
        let entries = vec![None; sequence.len()];
        Self {
            sequence,
            entries,
            cursor: 0,
            buffer: None,
            buffered_digits: 0,
        }
    }

    /// Rebuild a board from persisted entries and cursor.
    ///
    /// The digit buffer is transient input state and is never persisted.
    pub fn resume(
        sequence: Vec<Turn>,
        entries: Vec<Option<u8>>,
        cursor: usize,
    ) -> Result<Self, DomainError> {
        if entries.len() != sequence.len() {
            return Err(DomainError::validation(format!(
                "scoreboard has {} entries for a sequence of {}",
                entries.len(),
                sequence.len()
            )));
        }
        if cursor >= sequence.len() && !sequence.is_empty() {
            return Err(DomainError::validation(format!(
                "scoreboard cursor {} outside sequence of {}",
                cursor,
                sequence.len()
            )));
        }
        if let Some(bad) = entries.iter().flatten().find(|&&pins| pins > MAX_HAND_SCORE) {
            return Err(DomainError::validation(format!(
                "scoreboard entry {bad} exceeds the maximum hand score"
            )));
        }
        Ok(Self {
            sequence,
            entries,
            cursor,
            buffer: None,
            buffered_digits: 0,
        })
    }

    pub fn sequence(&self) -> &[Turn] {
        &self.sequence
    }

    pub fn entries(&self) -> &[Option<u8>] {
        &self.entries
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn buffer(&self) -> Option<u8> {
        self.buffer
    }

    /// True once every position has a committed score.
    pub fn is_complete(&self) -> bool {
        self.entries.iter().all(Option::is_some)
    }

    /// Committed pin totals as (home, away).
    pub fn totals(&self) -> (i32, i32) {
        let mut home = 0;
        let mut away = 0;
        for (turn, entry) in self.sequence.iter().zip(&self.entries) {
            if let Some(pins) = entry {
                match turn.side {
                    Side::Home => home += i32::from(*pins),
                    Side::Away => away += i32::from(*pins),
                }
            }
        }
        (home, away)
    }

    /// Apply one key event.
    pub fn apply(&mut self, key: Key) -> Result<(), DomainError> {
        match key {
            Key::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                self.reset_buffer();
            }
            Key::Right => {
                if self.cursor + 1 < self.sequence.len() {
                    self.cursor += 1;
                }
                self.reset_buffer();
            }
            Key::Digit { value } => {
                if value > 9 {
                    return Err(DomainError::validation(format!(
                        "digit key out of range: {value}"
                    )));
                }
                if self.sequence.is_empty() {
                    return Err(DomainError::validation("scoreboard has no turns"));
                }
                self.push_digit(value);
            }
            Key::Commit => {
                if let Some(pins) = self.buffer.take() {
                    self.entries[self.cursor] = Some(pins);
                    self.buffered_digits = 0;
                    if self.cursor + 1 < self.sequence.len() {
                        self.cursor += 1;
                    }
                }
            }
            Key::Clear => self.reset_buffer(),
        }
        Ok(())
    }

    /// Buffer a digit: a second digit extends the value when the result is
    /// still a legal hand score, otherwise it starts a new buffer.
    fn push_digit(&mut self, digit: u8) {
        match (self.buffer, self.buffered_digits) {
            (Some(first), 1) => {
                let candidate = first * 10 + digit;
                if candidate <= MAX_HAND_SCORE {
                    self.buffer = Some(candidate);
                    self.buffered_digits = 2;
                } else {
                    self.buffer = Some(digit);
                    self.buffered_digits = 1;
                }
            }
            _ => {
                self.buffer = Some(digit);
                self.buffered_digits = 1;
            }
        }
    }

    fn reset_buffer(&mut self) {
        self.buffer = None;
        self.buffered_digits = 0;
    }
}
