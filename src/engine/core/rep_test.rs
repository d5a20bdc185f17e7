use crate::engine::core::rep;

#[test]
fn start_and_finish_predicates() {
    assert!(rep::is_start_rep("7+"));
    assert!(!rep::is_start_rep("7-"));
    assert!(rep::is_finish_rep("7-"));
    assert!(rep::is_start_rep("_7+"));
    assert!(rep::is_finish_rep("@7-"));
}

#[test]
fn prefix_predicates() {
    assert!(rep::is_co_rep("_12+"));
    assert!(!rep::is_co_rep("12+"));
    assert!(rep::is_meet_rep("@12+"));
    assert!(!rep::is_meet_rep("_12+"));
}

#[test]
fn base_form_strips_one_marker() {
    assert_eq!(rep::base_form("12+"), "12+");
    assert_eq!(rep::base_form("_12+"), "12+");
    assert_eq!(rep::base_form("@12-"), "12-");
}

#[test]
fn complements_flip_the_kind_suffix() {
    assert_eq!(rep::finish_complement("12+"), "12-");
    assert_eq!(rep::start_complement("12-"), "12+");
    // Already in the requested form is a no-op.
    assert_eq!(rep::start_complement("12+"), "12+");
}
