mod support;

use indoc::indoc;
use support::MiningRun;

#[test]
fn overlapping_pair_yields_the_overlap_tirp() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,5,1;2,7,2;
        "},
        false,
        1,
        1.0,
        100,
    );

    let lines = run.lines();
    assert!(lines.contains(&"2 1-2 o. 1 1.0 E1 [0-5][2-7]".to_string()));
    assert_eq!(run.written, lines.len());
}

#[test]
fn touching_intervals_yield_the_meet_relation() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,5,1;5,9,2;
        "},
        false,
        1,
        1.0,
        100,
    );

    assert!(
        run.lines()
            .contains(&"2 1-2 m. 1 1.0 E1 [0-5][5-9]".to_string())
    );
}

#[test]
fn shared_singleton_across_two_entities() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,2
            E1
            0,5,1;
            E2
            0,5,1;
        "},
        false,
        2,
        1.0,
        100,
    );

    assert_eq!(run.lines(), vec!["1 1 -. 2 2 E1 [0-5] E2 [0-5]"]);
}

#[test]
fn maximal_gap_suppresses_distant_pairs() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,2,1;30,40,2;
        "},
        false,
        1,
        1.0,
        10,
    );

    for line in run.lines() {
        assert!(line.starts_with("1 "), "unexpected multi-STI TIRP: {line}");
    }
}

#[test]
fn equal_intervals_yield_the_equal_relation_via_co_occurrence() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,5,1;0,5,2;
        "},
        false,
        1,
        1.0,
        100,
    );

    assert!(
        run.lines()
            .contains(&"2 1-2 =. 1 1.0 E1 [0-5][0-5]".to_string())
    );
}

#[test]
fn output_is_deterministic_across_runs() {
    let input = indoc! {"
        startToncepts
        numberOfEntities,2
        E1
        0,5,1;2,7,2;6,9,1;
        E2
        0,5,1;3,8,2;
    "};

    let first = MiningRun::execute(input, false, 2, 0.5, 100);
    let second = MiningRun::execute(input, false, 2, 0.5, 100);
    assert_eq!(first.lines(), second.lines());
    assert!(!first.lines().is_empty());
}

#[test]
fn sorted_companion_is_ordered_and_complete() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,5,1;2,7,2;
        "},
        false,
        1,
        1.0,
        100,
    );

    let mut expected = run.lines();
    expected.sort();
    assert_eq!(run.sorted_lines(), expected);
}

#[test]
fn stats_companion_holds_a_runtime() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,1
            E1
            0,5,1;
        "},
        false,
        1,
        1.0,
        100,
    );

    let runtime: f64 = run.stats().parse().expect("runtime in seconds");
    assert!(runtime >= 0.0);
}

#[test]
fn support_threshold_binds_every_emission() {
    let run = MiningRun::execute(
        indoc! {"
            startToncepts
            numberOfEntities,3
            E1
            0,5,1;2,7,2;
            E2
            0,5,1;2,7,2;
            E3
            0,5,1;
        "},
        false,
        3,
        0.66,
        100,
    );

    // min_support = ceil(3 * 0.66) = 2.
    for line in run.lines() {
        let support: usize = line.split(' ').nth(3).unwrap().parse().unwrap();
        assert!(support >= 2, "under-supported line: {line}");
    }
    assert!(run.lines().iter().any(|line| line.starts_with("2 1-2 o. 2 ")));
}
