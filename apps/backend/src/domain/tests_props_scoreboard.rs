//! Property tests for the scoreboard sequencer and input handling.

use proptest::prelude::*;

use crate::domain::scoreboard::{
    turn_sequence, Board, Key, Side, HANDS_PER_PLAYER, MAX_HAND_SCORE,
};

/// Roster of distinct player ids drawn from a side-specific range so the
/// two rosters never overlap.
fn arb_roster(range: std::ops::Range<i64>, max: usize) -> impl Strategy<Value = Vec<i64>> {
    proptest::collection::vec(range, 1..=max).prop_map(|mut ids| {
        ids.sort_unstable();
        ids.dedup();
        ids
    })
}

fn home_roster(max: usize) -> impl Strategy<Value = Vec<i64>> {
    arb_roster(1..1000, max)
}

fn away_roster(max: usize) -> impl Strategy<Value = Vec<i64>> {
    arb_roster(1000..2000, max)
}

fn arb_key() -> impl Strategy<Value = Key> {
    prop_oneof![
        Just(Key::Left),
        Just(Key::Right),
        Just(Key::Commit),
        Just(Key::Clear),
        (0u8..=9).prop_map(|value| Key::Digit { value }),
    ]
}

proptest! {
    /// Every player bowls exactly five hands, numbered 1..=5.
    #[test]
    fn prop_each_player_gets_five_hands(
        home in home_roster(6),
        away in away_roster(6),
    ) {
        let seq = turn_sequence(&home, &away);
        prop_assert_eq!(seq.len(), (home.len() + away.len()) * HANDS_PER_PLAYER as usize);

        for &player in home.iter().chain(&away) {
            let hands: Vec<u8> = seq
                .iter()
                .filter(|t| t.player_id == player)
                .map(|t| t.hand_no)
                .collect();
            prop_assert_eq!(hands, (1..=HANDS_PER_PLAYER).collect::<Vec<u8>>());
        }
    }

    /// The starting side alternates every hand.
    #[test]
    fn prop_starting_side_alternates(
        home in home_roster(6),
        away in away_roster(6),
    ) {
        let seq = turn_sequence(&home, &away);
        for hand_no in 1..=HANDS_PER_PLAYER {
            let first = seq.iter().find(|t| t.hand_no == hand_no).unwrap();
            let expected = if hand_no % 2 == 1 { Side::Home } else { Side::Away };
            prop_assert_eq!(first.side, expected);
        }
    }

    /// No key storm can push the cursor out of bounds, commit an illegal
    /// score, or panic.
    #[test]
    fn prop_board_invariants_survive_any_keys(
        home in home_roster(4),
        away in away_roster(4),
        keys in proptest::collection::vec(arb_key(), 0..200),
    ) {
        let seq = turn_sequence(&home, &away);
        let len = seq.len();
        let mut board = Board::new(seq);

        for key in keys {
            // Digits 0..=9 only, so no key in this stream is rejected.
            board.apply(key).unwrap();

            prop_assert!(board.cursor() < len);
            for entry in board.entries().iter().flatten() {
                prop_assert!(*entry <= MAX_HAND_SCORE);
            }
            if let Some(buffered) = board.buffer() {
                prop_assert!(buffered <= MAX_HAND_SCORE);
            }
        }

        let (home_total, away_total) = board.totals();
        let committed: i32 = board
            .entries()
            .iter()
            .flatten()
            .map(|pins| i32::from(*pins))
            .sum();
        prop_assert_eq!(home_total + away_total, committed);
    }

    /// Resume accepts exactly what a live board can persist.
    #[test]
    fn prop_persisted_board_resumes(
        home in home_roster(4),
        away in away_roster(4),
        keys in proptest::collection::vec(arb_key(), 0..80),
    ) {
        let seq = turn_sequence(&home, &away);
        let mut board = Board::new(seq.clone());
        for key in keys {
            board.apply(key).unwrap();
        }

        let resumed = Board::resume(seq, board.entries().to_vec(), board.cursor()).unwrap();
        prop_assert_eq!(resumed.entries(), board.entries());
        prop_assert_eq!(resumed.cursor(), board.cursor());
    }
}
