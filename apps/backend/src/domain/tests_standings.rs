use crate::domain::standings::{
    apply_result, max_score_for, recompute, revert_result, sort_table, ResultLine, TableRow,
};

fn two_team_table() -> Vec<TableRow> {
    vec![TableRow::zeroed(1, "Anchor"), TableRow::zeroed(2, "Bell")]
}

#[test]
fn single_match_accumulates_both_rows() {
    // Worked example: home A 85, away B 90.
    let mut rows = two_team_table();
    apply_result(
        &mut rows,
        &ResultLine {
            home_team_id: 1,
            away_team_id: 2,
            home_score: 85,
            away_score: 90,
        },
    );

    let a = &rows[0];
    assert_eq!(
        (a.played, a.won, a.lost, a.drawn, a.points, a.pins_for, a.pins_against),
        (1, 0, 1, 0, 0, 85, 90)
    );
    assert_eq!(a.max_score, 85);

    let b = &rows[1];
    assert_eq!(
        (b.played, b.won, b.lost, b.drawn, b.points, b.pins_for, b.pins_against),
        (1, 1, 0, 0, 2, 90, 85)
    );
    assert_eq!(b.max_score, 90);
}

#[test]
fn draw_awards_one_point_each() {
    let mut rows = two_team_table();
    apply_result(
        &mut rows,
        &ResultLine {
            home_team_id: 1,
            away_team_id: 2,
            home_score: 70,
            away_score: 70,
        },
    );

    assert_eq!(rows[0].drawn, 1);
    assert_eq!(rows[1].drawn, 1);
    assert_eq!(rows[0].points, 1);
    assert_eq!(rows[1].points, 1);
}

#[test]
fn revert_is_inverse_of_apply_for_counters() {
    let mut rows = two_team_table();
    let earlier = ResultLine {
        home_team_id: 1,
        away_team_id: 2,
        home_score: 88,
        away_score: 72,
    };
    apply_result(&mut rows, &earlier);
    let before = rows.clone();

    let edited = ResultLine {
        home_team_id: 1,
        away_team_id: 2,
        home_score: 66,
        away_score: 91,
    };
    apply_result(&mut rows, &edited);
    revert_result(&mut rows, &edited);

    assert_eq!(rows, before);
}

#[test]
fn revert_leaves_max_score_for_recomputation() {
    let mut rows = two_team_table();
    let result = ResultLine {
        home_team_id: 1,
        away_team_id: 2,
        home_score: 95,
        away_score: 60,
    };
    apply_result(&mut rows, &result);
    revert_result(&mut rows, &result);

    // Counters return to zero; max_score stays until the caller rescans.
    assert_eq!(rows[0].played, 0);
    assert_eq!(rows[0].max_score, 95);

    let remaining: Vec<ResultLine> = vec![];
    rows[0].max_score = max_score_for(1, &remaining);
    assert_eq!(rows[0].max_score, 0);
}

#[test]
fn max_score_for_scans_both_sides() {
    let results = [
        ResultLine {
            home_team_id: 1,
            away_team_id: 2,
            home_score: 81,
            away_score: 85,
        },
        ResultLine {
            home_team_id: 2,
            away_team_id: 1,
            home_score: 79,
            away_score: 93,
        },
    ];
    assert_eq!(max_score_for(1, &results), 93);
    assert_eq!(max_score_for(2, &results), 85);
    assert_eq!(max_score_for(99, &results), 0);
}

#[test]
fn unknown_teams_are_skipped() {
    let mut rows = two_team_table();
    apply_result(
        &mut rows,
        &ResultLine {
            home_team_id: 7,
            away_team_id: 8,
            home_score: 50,
            away_score: 60,
        },
    );
    assert_eq!(rows, two_team_table());
}

#[test]
fn sort_orders_by_points_then_average() {
    let mut rows = vec![
        TableRow {
            played: 2,
            points: 2,
            pins_for: 150,
            ..TableRow::zeroed(1, "Anchor")
        },
        TableRow {
            played: 1,
            points: 2,
            pins_for: 90,
            ..TableRow::zeroed(2, "Bell")
        },
        TableRow {
            played: 2,
            points: 4,
            pins_for: 140,
            ..TableRow::zeroed(3, "Crown")
        },
    ];
    sort_table(&mut rows);

    // Crown leads on points; Bell beats Anchor on average (90 > 75).
    let order: Vec<i64> = rows.iter().map(|r| r.team_id).collect();
    assert_eq!(order, vec![3, 2, 1]);
}

#[test]
fn sort_falls_through_to_pins_max_score_then_name() {
    let mut rows = vec![
        TableRow {
            played: 1,
            points: 2,
            pins_for: 80,
            max_score: 80,
            ..TableRow::zeroed(1, "Bell")
        },
        TableRow {
            played: 1,
            points: 2,
            pins_for: 80,
            max_score: 80,
            ..TableRow::zeroed(2, "Anchor")
        },
        TableRow {
            played: 1,
            points: 2,
            pins_for: 80,
            max_score: 85,
            ..TableRow::zeroed(3, "Drovers")
        },
    ];
    sort_table(&mut rows);

    // Same points/average/pins: Drovers on max_score, then name ascending.
    let order: Vec<i64> = rows.iter().map(|r| r.team_id).collect();
    assert_eq!(order, vec![3, 2, 1]);
}

#[test]
fn recompute_matches_incremental_application() {
    let teams = vec![
        (1, "Anchor".to_string()),
        (2, "Bell".to_string()),
        (3, "Crown".to_string()),
    ];
    let results = [
        ResultLine {
            home_team_id: 1,
            away_team_id: 2,
            home_score: 85,
            away_score: 90,
        },
        ResultLine {
            home_team_id: 3,
            away_team_id: 1,
            home_score: 77,
            away_score: 77,
        },
    ];

    let rebuilt = recompute(&teams, &results);

    let mut incremental: Vec<TableRow> = teams
        .iter()
        .map(|(id, name)| TableRow::zeroed(*id, name.clone()))
        .collect();
    for r in &results {
        apply_result(&mut incremental, r);
    }

    assert_eq!(rebuilt, incremental);
}
