use crate::engine::core::Sti;
use crate::engine::output::allen;

fn rel(a: (i64, i64), b: (i64, i64)) -> char {
    allen::relation(&Sti::new(a.0, a.1, 1), &Sti::new(b.0, b.1, 2))
}

#[test]
fn all_seven_relations() {
    assert_eq!(rel((0, 2), (5, 9)), '<');
    assert_eq!(rel((0, 5), (5, 9)), 'm');
    assert_eq!(rel((0, 5), (2, 7)), 'o');
    assert_eq!(rel((0, 7), (2, 7)), 'f');
    assert_eq!(rel((0, 9), (2, 7)), 'c');
    assert_eq!(rel((0, 5), (0, 5)), '=');
    assert_eq!(rel((0, 5), (0, 9)), 'S');
}

#[test]
fn meet_wins_over_the_start_comparisons() {
    // Touching end-points classify as meet even for a shared start of zero
    // length.
    assert_eq!(rel((0, 0), (0, 5)), 'm');
}

#[test]
fn equal_wins_over_starts() {
    assert_eq!(rel((3, 3), (3, 3)), '=');
}
