//! League table arithmetic: applying, reverting and ordering match results.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::outcome::{match_outcome, match_points, Outcome};

/// One standings row for a team within a division.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    pub team_id: i64,
    pub team_name: String,
    pub played: i32,
    pub won: i32,
    pub lost: i32,
    pub drawn: i32,
    pub points: i32,
    pub pins_for: i32,
    pub pins_against: i32,
    /// Highest single-match pin total recorded by the team.
    pub max_score: i32,
}

impl TableRow {
    pub fn zeroed(team_id: i64, team_name: impl Into<String>) -> Self {
        Self {
            team_id,
            team_name: team_name.into(),
            played: 0,
            won: 0,
            lost: 0,
            drawn: 0,
            points: 0,
            pins_for: 0,
            pins_against: 0,
            max_score: 0,
        }
    }
}

/// A completed match result as seen by the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResultLine {
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: i32,
    pub away_score: i32,
}

/// Accumulate a completed result into the table.
///
/// Teams without a row in `rows` are skipped; callers seed a zeroed row per
/// team when the division is set up.
pub fn apply_result(rows: &mut [TableRow], result: &ResultLine) {
    let outcome = match_outcome(result.home_score, result.away_score);
    let (home_points, away_points) = match_points(result.home_score, result.away_score);

    for row in rows.iter_mut() {
        if row.team_id == result.home_team_id {
            row.played += 1;
            row.points += home_points;
            row.pins_for += result.home_score;
            row.pins_against += result.away_score;
            row.max_score = row.max_score.max(result.home_score);
            match outcome {
                Outcome::HomeWin => row.won += 1,
                Outcome::AwayWin => row.lost += 1,
                Outcome::Draw => row.drawn += 1,
            }
        } else if row.team_id == result.away_team_id {
            row.played += 1;
            row.points += away_points;
            row.pins_for += result.away_score;
            row.pins_against += result.home_score;
            row.max_score = row.max_score.max(result.away_score);
            match outcome {
                Outcome::HomeWin => row.lost += 1,
                Outcome::AwayWin => row.won += 1,
                Outcome::Draw => row.drawn += 1,
            }
        }
    }
}

/// Subtract a previously-applied result from the table.
///
/// Exact inverse of [`apply_result`] for every counter except `max_score`,
/// which cannot be walked back from the aggregate alone. Callers correcting
/// a result recompute `max_score` from the remaining results via
/// [`max_score_for`] inside the same transaction.
pub fn revert_result(rows: &mut [TableRow], result: &ResultLine) {
    let outcome = match_outcome(result.home_score, result.away_score);
    let (home_points, away_points) = match_points(result.home_score, result.away_score);

    for row in rows.iter_mut() {
        if row.team_id == result.home_team_id {
            row.played -= 1;
            row.points -= home_points;
            row.pins_for -= result.home_score;
            row.pins_against -= result.away_score;
            match outcome {
                Outcome::HomeWin => row.won -= 1,
                Outcome::AwayWin => row.lost -= 1,
                Outcome::Draw => row.drawn -= 1,
            }
        } else if row.team_id == result.away_team_id {
            row.played -= 1;
            row.points -= away_points;
            row.pins_for -= result.away_score;
            row.pins_against -= result.home_score;
            match outcome {
                Outcome::HomeWin => row.lost -= 1,
                Outcome::AwayWin => row.won -= 1,
                Outcome::Draw => row.drawn -= 1,
            }
        }
    }
}

/// Highest single-match score for a team across a set of results.
pub fn max_score_for(team_id: i64, results: &[ResultLine]) -> i32 {
    results
        .iter()
        .filter_map(|r| {
            if r.home_team_id == team_id {
                Some(r.home_score)
            } else if r.away_team_id == team_id {
                Some(r.away_score)
            } else {
                None
            }
        })
        .max()
        .unwrap_or(0)
}

/// Rebuild a full table from zeroed rows and a list of completed results.
pub fn recompute(teams: &[(i64, String)], results: &[ResultLine]) -> Vec<TableRow> {
    let mut rows: Vec<TableRow> = teams
        .iter()
        .map(|(id, name)| TableRow::zeroed(*id, name.clone()))
        .collect();
    for result in results {
        apply_result(&mut rows, result);
    }
    rows
}

/// Compare average pins-for-per-game without floating point: cross-multiply
/// `pins_for / played`. A team with no games played averages zero.
fn cmp_average(a: &TableRow, b: &TableRow) -> Ordering {
    let lhs = i64::from(a.pins_for) * i64::from(b.played.max(1));
    let rhs = i64::from(b.pins_for) * i64::from(a.played.max(1));
    lhs.cmp(&rhs)
}

/// Sort a table by the display tie-break chain: points desc, average
/// pins-for-per-game desc, total pins-for desc, max single score desc,
/// team name asc. `sort_by` is stable, so equal rows keep their order.
pub fn sort_table(rows: &mut [TableRow]) {
    rows.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| cmp_average(b, a))
            .then_with(|| b.pins_for.cmp(&a.pins_for))
            .then_with(|| b.max_score.cmp(&a.max_score))
            .then_with(|| a.team_name.cmp(&b.team_name))
    });
}
