use std::rc::Rc;

use crate::engine::core::{CoRef, TiepKind};
use crate::test_helpers::SeqDbFactory;

fn chain_of(first: Option<CoRef>) -> Vec<CoRef> {
    let mut chain = Vec::new();
    let mut current = first;
    while let Some(co) = current {
        current = co.borrow().next.clone();
        chain.push(co);
    }
    chain
}

#[test]
fn builds_a_linked_chain_with_meets() {
    let (_index, db) = SeqDbFactory::new()
        .entity("E1", &[(0, 5, 1), (0, 5, 2), (5, 9, 3)])
        .build();

    assert_eq!(db.db.len(), 1);
    let seq = &db.db[0].seq;
    assert_eq!(seq.entity.as_ref(), "E1");
    assert!(seq.partial_co.is_none());

    let chain = chain_of(seq.first_co.clone());
    assert_eq!(chain.len(), 4);

    // [1+ 2+] [1- 2-] [3+ meet] [3-]
    let c0 = chain[0].borrow();
    assert_eq!(c0.index, 0);
    assert_eq!(c0.kind(), TiepKind::Start);
    assert!(!c0.is_meet);
    assert_eq!(c0.tieps.len(), 2);
    assert_eq!(c0.tieps[0].primitive_rep, "1+");
    assert_eq!(c0.tieps[1].primitive_rep, "2+");

    let c1 = chain[1].borrow();
    assert_eq!(c1.kind(), TiepKind::Finish);
    assert!(!c1.is_meet);

    let c2 = chain[2].borrow();
    assert_eq!(c2.index, 2);
    assert!(c2.is_meet);
    assert_eq!(c2.tieps[0].primitive_rep, "3+");

    assert_eq!(chain[3].borrow().tieps[0].primitive_rep, "3-");
}

#[test]
fn tieps_link_back_to_their_coincidence() {
    let (index, db) = SeqDbFactory::new()
        .entity("E1", &[(0, 5, 1), (2, 7, 2)])
        .build();

    let chain = chain_of(db.db[0].seq.first_co.clone());
    let start_b = &index.master("2+").occurrences("E1")[0];
    assert!(Rc::ptr_eq(&start_b.coincidence(), &chain[1]));
}

#[test]
fn entity_indices_follow_occurrence_order() {
    let (index, _db) = SeqDbFactory::new()
        .entity("E1", &[(0, 2, 1), (4, 6, 1)])
        .build();

    let starts = index.master("1+").occurrences("E1");
    assert_eq!(starts[0].entity_tiep_index.get(), 0);
    assert_eq!(starts[1].entity_tiep_index.get(), 1);

    // The STI's own index tracks its finish occurrence.
    let finishes = index.master("1-").occurrences("E1");
    assert_eq!(finishes[0].sti.entity_sti_index.get(), 0);
    assert_eq!(finishes[1].sti.entity_sti_index.get(), 1);
}

#[test]
fn fresh_instances_start_empty() {
    let (_index, db) = SeqDbFactory::new().entity("E1", &[(0, 5, 1)]).build();
    let instance = &db.db[0].instance;
    assert!(instance.tieps.is_empty());
    assert!(instance.pre_matched.is_empty());
    assert_eq!(instance.minimal_finish_time, None);
    assert_eq!(instance.first_expected_finish_time, None);
}
