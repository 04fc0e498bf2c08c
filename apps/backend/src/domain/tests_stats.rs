use crate::domain::stats::{player_totals, HandLine};

fn line(match_id: i64, player_id: i64, pins: i32) -> HandLine {
    HandLine {
        match_id,
        player_id,
        pins,
    }
}

#[test]
fn totals_accumulate_across_matches() {
    let lines = [
        line(1, 5, 7),
        line(1, 5, 9),
        line(2, 5, 4),
        line(2, 6, 12),
    ];

    let totals = player_totals(&lines);
    assert_eq!(totals.len(), 2);

    let p5 = &totals[0];
    assert_eq!(p5.player_id, 5);
    assert_eq!(p5.games, 2);
    assert_eq!(p5.hands, 3);
    assert_eq!(p5.total_pins, 20);
    assert_eq!(p5.best_hand, 9);
    assert_eq!(p5.best_match, 16);

    let p6 = &totals[1];
    assert_eq!(p6.games, 1);
    assert_eq!(p6.best_match, 12);
}

#[test]
fn average_rounds_to_two_decimals() {
    let lines = [line(1, 5, 7), line(1, 5, 9), line(2, 5, 4)];
    let totals = player_totals(&lines);
    // 20 / 3 = 6.666...
    assert_eq!(totals[0].average(), 6.67);
}

#[test]
fn empty_input_yields_no_rows() {
    assert!(player_totals(&[]).is_empty());
}

#[test]
fn zero_hands_average_is_zero() {
    use crate::domain::stats::PlayerTotals;
    let empty = PlayerTotals {
        player_id: 1,
        games: 0,
        hands: 0,
        total_pins: 0,
        best_hand: 0,
        best_match: 0,
    };
    assert_eq!(empty.average(), 0.0);
}
