//! Property tests for the standings arithmetic (pure domain, no DB).

use proptest::prelude::*;

use crate::domain::standings::{
    apply_result, recompute, revert_result, sort_table, ResultLine, TableRow,
};

const TEAMS: i64 = 4;

fn arb_result() -> impl Strategy<Value = ResultLine> {
    (0..TEAMS, 0..TEAMS - 1, 0i32..500, 0i32..500).prop_map(|(home, away_raw, hs, aws)| {
        // away_raw is shifted past home so the two teams always differ
        let away = if away_raw >= home { away_raw + 1 } else { away_raw };
        ResultLine {
            home_team_id: home,
            away_team_id: away,
            home_score: hs,
            away_score: aws,
        }
    })
}

fn fresh_table() -> Vec<TableRow> {
    (0..TEAMS)
        .map(|id| TableRow::zeroed(id, format!("Team {id}")))
        .collect()
}

proptest! {
    /// Winner gets 2, loser 0, draws 1 apiece - and points mirror outcomes.
    #[test]
    fn prop_points_match_outcome(result in arb_result()) {
        let mut rows = fresh_table();
        apply_result(&mut rows, &result);

        let home = rows.iter().find(|r| r.team_id == result.home_team_id).unwrap();
        let away = rows.iter().find(|r| r.team_id == result.away_team_id).unwrap();

        if result.home_score > result.away_score {
            prop_assert_eq!((home.points, away.points), (2, 0));
            prop_assert_eq!((home.won, away.lost), (1, 1));
        } else if result.home_score < result.away_score {
            prop_assert_eq!((home.points, away.points), (0, 2));
            prop_assert_eq!((home.lost, away.won), (1, 1));
        } else {
            prop_assert_eq!((home.points, away.points), (1, 1));
            prop_assert_eq!((home.drawn, away.drawn), (1, 1));
        }
    }

    /// Revert-then-reapply of an edit restores the table byte-for-byte for
    /// every field except max_score, which the caller rescans.
    #[test]
    fn prop_revert_is_inverse_modulo_max_score(
        history in proptest::collection::vec(arb_result(), 0..12),
        edit in arb_result(),
    ) {
        let mut rows = fresh_table();
        for r in &history {
            apply_result(&mut rows, r);
        }

        let mut edited = rows.clone();
        apply_result(&mut edited, &edit);
        revert_result(&mut edited, &edit);

        for (before, after) in rows.iter().zip(&edited) {
            prop_assert_eq!(before.played, after.played);
            prop_assert_eq!(before.won, after.won);
            prop_assert_eq!(before.lost, after.lost);
            prop_assert_eq!(before.drawn, after.drawn);
            prop_assert_eq!(before.points, after.points);
            prop_assert_eq!(before.pins_for, after.pins_for);
            prop_assert_eq!(before.pins_against, after.pins_against);
        }
    }

    /// Total points across the table equal twice the number of matches
    /// between known teams.
    #[test]
    fn prop_points_are_conserved(
        history in proptest::collection::vec(arb_result(), 0..20),
    ) {
        let mut rows = fresh_table();
        for r in &history {
            apply_result(&mut rows, r);
        }

        let total_points: i32 = rows.iter().map(|r| r.points).sum();
        prop_assert_eq!(total_points, 2 * history.len() as i32);

        let total_played: i32 = rows.iter().map(|r| r.played).sum();
        prop_assert_eq!(total_played, 2 * history.len() as i32);

        let pins_for: i32 = rows.iter().map(|r| r.pins_for).sum();
        let pins_against: i32 = rows.iter().map(|r| r.pins_against).sum();
        prop_assert_eq!(pins_for, pins_against);
    }

    /// Incremental application always agrees with a from-scratch rebuild.
    #[test]
    fn prop_incremental_equals_recompute(
        history in proptest::collection::vec(arb_result(), 0..16),
    ) {
        let teams: Vec<(i64, String)> =
            (0..TEAMS).map(|id| (id, format!("Team {id}"))).collect();

        let mut incremental = fresh_table();
        for r in &history {
            apply_result(&mut incremental, r);
        }

        prop_assert_eq!(incremental, recompute(&teams, &history));
    }

    /// Sorting is total: points descend down the table, and ties on every
    /// key fall back to team name ascending.
    #[test]
    fn prop_sort_orders_points_descending(
        history in proptest::collection::vec(arb_result(), 0..16),
    ) {
        let mut rows = fresh_table();
        for r in &history {
            apply_result(&mut rows, r);
        }
        sort_table(&mut rows);

        for pair in rows.windows(2) {
            prop_assert!(pair[0].points >= pair[1].points);
        }
    }
}
