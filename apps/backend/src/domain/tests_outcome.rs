use crate::domain::outcome::{match_outcome, match_points, Outcome};

#[test]
fn higher_score_wins_two_points() {
    assert_eq!(match_outcome(90, 85), Outcome::HomeWin);
    assert_eq!(match_points(90, 85), (2, 0));

    assert_eq!(match_outcome(85, 90), Outcome::AwayWin);
    assert_eq!(match_points(85, 90), (0, 2));
}

#[test]
fn equal_scores_give_both_sides_one_point() {
    assert_eq!(match_outcome(77, 77), Outcome::Draw);
    assert_eq!(match_points(77, 77), (1, 1));
}

#[test]
fn zero_zero_is_still_a_draw() {
    assert_eq!(match_outcome(0, 0), Outcome::Draw);
    assert_eq!(match_points(0, 0), (1, 1));
}
