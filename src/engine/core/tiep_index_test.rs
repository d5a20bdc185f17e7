use crate::test_helpers::SeqDbFactory;

#[test]
fn representations_keep_discovery_order() {
    let (index, _db) = SeqDbFactory::new()
        .entity("E1", &[(0, 5, 2), (1, 3, 1)])
        .build();

    // Slot order is (0,S,[2]) (1,S,[1]) (3,F,[1]) (5,F,[2]).
    let reps: Vec<&str> = index.master_tieps.keys().map(String::as_str).collect();
    assert_eq!(reps, vec!["2+", "1+", "1-", "2-"]);
}

#[test]
fn occurrences_are_indexed_per_entity_in_time_order() {
    let (index, _db) = SeqDbFactory::new()
        .entity("E1", &[(0, 2, 1), (4, 6, 1)])
        .entity("E2", &[(1, 3, 1)])
        .build();

    let master = index.master("1+");
    assert_eq!(master.support(), 2);
    assert_eq!(
        master
            .supporting_entities
            .iter()
            .map(|e| e.as_ref())
            .collect::<Vec<_>>(),
        vec!["E1", "E2"]
    );

    let occurrences = master.occurrences("E1");
    assert_eq!(occurrences.len(), 2);
    assert_eq!(occurrences[0].time, 0);
    assert_eq!(occurrences[1].time, 4);
    assert_eq!(occurrences[0].entity_tiep_index.get(), 0);
    assert_eq!(occurrences[1].entity_tiep_index.get(), 1);
}

#[test]
fn pruning_removes_infrequent_reps_and_keeps_order() {
    let (mut index, _db) = SeqDbFactory::new()
        .entity("E1", &[(0, 5, 1), (1, 2, 9), (6, 8, 3)])
        .entity("E2", &[(0, 5, 1), (6, 8, 3)])
        .build();

    index.prune_infrequent(2);

    assert!(!index.contains("9+"));
    assert!(!index.contains("9-"));
    let reps: Vec<&str> = index.master_tieps.keys().map(String::as_str).collect();
    assert_eq!(reps, vec!["1+", "1-", "3+", "3-"]);
}
