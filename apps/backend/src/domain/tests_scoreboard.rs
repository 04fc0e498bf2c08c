use crate::domain::scoreboard::{turn_sequence, Board, Key, Side, HANDS_PER_PLAYER};

fn digit(value: u8) -> Key {
    Key::Digit { value }
}

#[test]
fn sequence_interleaves_sides_within_a_hand() {
    let seq = turn_sequence(&[11, 12], &[21, 22]);

    // Hand 1 starts home: H11 A21 H12 A22
    let first_hand: Vec<(Side, i64)> = seq[..4].iter().map(|t| (t.side, t.player_id)).collect();
    assert_eq!(
        first_hand,
        vec![
            (Side::Home, 11),
            (Side::Away, 21),
            (Side::Home, 12),
            (Side::Away, 22)
        ]
    );

    // Hand 2 starts away: A21 H11 A22 H12
    let second_hand: Vec<(Side, i64)> = seq[4..8].iter().map(|t| (t.side, t.player_id)).collect();
    assert_eq!(
        second_hand,
        vec![
            (Side::Away, 21),
            (Side::Home, 11),
            (Side::Away, 22),
            (Side::Home, 12)
        ]
    );
}

#[test]
fn sequence_covers_five_hands_per_player() {
    let seq = turn_sequence(&[11, 12, 13], &[21, 22, 23]);
    assert_eq!(seq.len(), 6 * HANDS_PER_PLAYER as usize);

    let hands_for_11 = seq.iter().filter(|t| t.player_id == 11).count();
    assert_eq!(hands_for_11, HANDS_PER_PLAYER as usize);

    // hand_no climbs 1..=5 and never interleaves across hands
    let mut last_hand = 0;
    for turn in &seq {
        assert!(turn.hand_no >= last_hand);
        last_hand = turn.hand_no;
    }
    assert_eq!(last_hand, HANDS_PER_PLAYER);
}

#[test]
fn uneven_rosters_drop_the_short_side_tail() {
    let seq = turn_sequence(&[11, 12], &[21]);
    assert_eq!(seq.len(), 3 * HANDS_PER_PLAYER as usize);

    // Hand 1: H11 A21 H12 (away has nobody at index 1)
    let first: Vec<i64> = seq[..3].iter().map(|t| t.player_id).collect();
    assert_eq!(first, vec![11, 21, 12]);
}

#[test]
fn commit_writes_buffer_and_advances_cursor() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    board.apply(digit(9)).unwrap();
    assert_eq!(board.buffer(), Some(9));
    assert_eq!(board.entries()[0], None);

    board.apply(Key::Commit).unwrap();
    assert_eq!(board.entries()[0], Some(9));
    assert_eq!(board.cursor(), 1);
    assert_eq!(board.buffer(), None);
}

#[test]
fn two_digit_buffering_extends_when_legal() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    board.apply(digit(1)).unwrap();
    board.apply(digit(7)).unwrap();
    assert_eq!(board.buffer(), Some(17));

    board.apply(Key::Commit).unwrap();
    assert_eq!(board.entries()[0], Some(17));
}

#[test]
fn illegal_two_digit_value_restarts_the_buffer() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    // 9 then 5 would be 95, beyond a hand's maximum; buffer restarts at 5.
    board.apply(digit(9)).unwrap();
    board.apply(digit(5)).unwrap();
    assert_eq!(board.buffer(), Some(5));

    // A third digit replaces a full two-digit buffer.
    board.apply(digit(1)).unwrap();
    board.apply(digit(8)).unwrap();
    assert_eq!(board.buffer(), Some(18));
    board.apply(digit(3)).unwrap();
    assert_eq!(board.buffer(), Some(3));
}

#[test]
fn commit_with_empty_buffer_is_a_no_op() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    board.apply(Key::Commit).unwrap();
    assert_eq!(board.cursor(), 0);
    assert!(board.entries().iter().all(Option::is_none));
}

#[test]
fn arrows_move_cursor_within_bounds_and_drop_buffer() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    board.apply(Key::Left).unwrap();
    assert_eq!(board.cursor(), 0);

    board.apply(digit(7)).unwrap();
    board.apply(Key::Right).unwrap();
    assert_eq!(board.cursor(), 1);
    assert_eq!(board.buffer(), None);

    // 10 turns in this sequence; cursor pegs at the last position.
    for _ in 0..20 {
        board.apply(Key::Right).unwrap();
    }
    assert_eq!(board.cursor(), 9);
}

#[test]
fn cursor_stays_on_last_turn_after_final_commit() {
    let seq = turn_sequence(&[11], &[21]);
    let last = seq.len() - 1;
    let mut board = Board::new(seq);

    for _ in 0..last {
        board.apply(digit(8)).unwrap();
        board.apply(Key::Commit).unwrap();
    }
    assert_eq!(board.cursor(), last);

    board.apply(digit(6)).unwrap();
    board.apply(Key::Commit).unwrap();
    assert_eq!(board.cursor(), last);
    assert!(board.is_complete());
}

#[test]
fn totals_split_by_side() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    // Hand 1: home then away.
    board.apply(digit(8)).unwrap();
    board.apply(Key::Commit).unwrap();
    board.apply(digit(6)).unwrap();
    board.apply(Key::Commit).unwrap();

    assert_eq!(board.totals(), (8, 6));
}

#[test]
fn digit_out_of_range_is_rejected() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));
    assert!(board.apply(Key::Digit { value: 10 }).is_err());
}

#[test]
fn resume_validates_entry_count_and_cursor() {
    let seq = turn_sequence(&[11], &[21]);

    assert!(Board::resume(seq.clone(), vec![None; 3], 0).is_err());
    assert!(Board::resume(seq.clone(), vec![None; seq.len()], seq.len()).is_err());
    assert!(Board::resume(seq.clone(), vec![Some(19); seq.len()], 0).is_err());
    assert!(Board::resume(seq.clone(), vec![Some(18); seq.len()], 3).is_ok());
}

#[test]
fn edit_an_earlier_hand_then_return() {
    let mut board = Board::new(turn_sequence(&[11], &[21]));

    board.apply(digit(7)).unwrap();
    board.apply(Key::Commit).unwrap();
    board.apply(digit(5)).unwrap();
    board.apply(Key::Commit).unwrap();

    // Walk back and overwrite the first score.
    board.apply(Key::Left).unwrap();
    board.apply(Key::Left).unwrap();
    board.apply(digit(9)).unwrap();
    board.apply(Key::Commit).unwrap();

    assert_eq!(board.entries()[0], Some(9));
    assert_eq!(board.entries()[1], Some(5));
}
