mod support;

use indoc::indoc;
use support::MiningRun;

const CONTAINMENT: &str = indoc! {"
    startToncepts
    numberOfEntities,1
    E1
    0,10,1;2,6,2;
"};

#[test]
fn contained_singleton_appears_only_in_open_mode() {
    let open = MiningRun::execute(CONTAINMENT, false, 1, 1.0, 100);
    let closed = MiningRun::execute(CONTAINMENT, true, 1, 1.0, 100);

    let open_lines = open.lines();
    let closed_lines = closed.lines();

    assert!(open_lines.contains(&"1 1 -. 1 1 E1 [0-10]".to_string()));
    assert!(!closed_lines.contains(&"1 1 -. 1 1 E1 [0-10]".to_string()));

    // The covering containment pair survives both modes.
    let pair = "2 1-2 c. 1 1.0 E1 [0-10][2-6]".to_string();
    assert!(open_lines.contains(&pair));
    assert!(closed_lines.contains(&pair));
}

#[test]
fn closed_output_never_leaves_the_open_output() {
    let input = indoc! {"
        startToncepts
        numberOfEntities,2
        E1
        0,10,1;2,6,2;12,20,3;
        E2
        0,10,1;2,6,2;
    "};

    let open = MiningRun::execute(input, false, 2, 0.5, 100);
    let closed = MiningRun::execute(input, true, 2, 0.5, 100);

    let open_lines = open.lines();
    let closed_lines = closed.lines();

    assert!(!closed_lines.is_empty());
    for line in &closed_lines {
        assert!(open_lines.contains(line), "closed-only line: {line}");
    }
    assert!(closed_lines.len() < open_lines.len());
}

#[test]
fn closed_mode_keeps_equal_support_structure_across_entities() {
    let input = indoc! {"
        startToncepts
        numberOfEntities,2
        E1
        0,10,1;2,6,2;
        E2
        0,10,1;2,6,2;
    "};

    let closed = MiningRun::execute(input, true, 2, 1.0, 100);
    let lines = closed.lines();

    assert!(lines.contains(&"2 1-2 c. 2 1.0 E1 [0-10][2-6] E2 [0-10][2-6]".to_string()));
    assert!(!lines.iter().any(|line| line.starts_with("1 1 ")));
}
