//! DTOs for the standings adapter.

use crate::domain::standings::TableRow;

/// Full counter set for one standings row.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowCounters {
    pub played: i32,
    pub won: i32,
    pub lost: i32,
    pub drawn: i32,
    pub points: i32,
    pub pins_for: i32,
    pub pins_against: i32,
    pub max_score: i32,
}

impl From<&TableRow> for RowCounters {
    fn from(row: &TableRow) -> Self {
        Self {
            played: row.played,
            won: row.won,
            lost: row.lost,
            drawn: row.drawn,
            points: row.points,
            pins_for: row.pins_for,
            pins_against: row.pins_against,
            max_score: row.max_score,
        }
    }
}
