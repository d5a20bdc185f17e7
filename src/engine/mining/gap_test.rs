use crate::engine::mining::gap::max_gap_holds;
use crate::test_helpers::SeqDbFactory;

#[test]
fn gap_must_strictly_exceed_the_distance() {
    let (index, _db) = SeqDbFactory::new()
        .entity("E1", &[(0, 5, 1), (30, 40, 2)])
        .build();
    let candidate = &index.master("2+").occurrences("E1")[0];

    // Candidate starts 25 units after the earliest finish.
    assert!(max_gap_holds(Some(5), candidate, 26));
    assert!(!max_gap_holds(Some(5), candidate, 25));
    assert!(!max_gap_holds(Some(5), candidate, 10));
}

#[test]
fn unset_minimum_always_passes() {
    let (index, _db) = SeqDbFactory::new()
        .entity("E1", &[(100, 200, 1)])
        .build();
    let candidate = &index.master("1+").occurrences("E1")[0];
    assert!(max_gap_holds(None, candidate, 0));
}
