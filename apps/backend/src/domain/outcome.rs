//! Match outcome classification and points.

/// Points awarded to the winner of a match.
pub const WIN_POINTS: i32 = 2;
/// Points awarded to each side of a drawn match.
pub const DRAW_POINTS: i32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

/// Classify a completed match by its pin totals.
pub fn match_outcome(home_score: i32, away_score: i32) -> Outcome {
    match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => Outcome::HomeWin,
        std::cmp::Ordering::Less => Outcome::AwayWin,
        std::cmp::Ordering::Equal => Outcome::Draw,
    }
}

/// Points awarded as (home, away): winner 2, loser 0, equal scores both 1.
pub fn match_points(home_score: i32, away_score: i32) -> (i32, i32) {
    match match_outcome(home_score, away_score) {
        Outcome::HomeWin => (WIN_POINTS, 0),
        Outcome::AwayWin => (0, WIN_POINTS),
        Outcome::Draw => (DRAW_POINTS, DRAW_POINTS),
    }
}
