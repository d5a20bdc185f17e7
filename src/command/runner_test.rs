use indoc::indoc;
use std::fs;

use tempfile::tempdir;

use crate::command::args::RunConfig;
use crate::command::runner;
use crate::engine::errors::SetupError;
use crate::engine::output::tirp_writer;

fn write_input(dir: &std::path::Path) -> std::path::PathBuf {
    let input = dir.join("series.txt");
    fs::write(
        &input,
        indoc! {"
            startToncepts
            numberOfEntities,2
            E1
            0,5,1;
            E2
            0,5,1;
        "},
    )
    .unwrap();
    input
}

fn config_for(dir: &std::path::Path) -> RunConfig {
    RunConfig {
        is_closed_tirp_mining: false,
        num_entities: 2,
        min_support_percentage: 1.0,
        maximal_gap: 100,
        in_file_path: write_input(dir),
        out_file_path: dir.join("out.txt"),
    }
}

#[test]
fn runs_end_to_end_and_writes_all_companions() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());

    let written = runner::run(&config).unwrap();
    assert_eq!(written, 1);

    let output = fs::read_to_string(&config.out_file_path).unwrap();
    assert_eq!(output, "1 1 -. 2 2 E1 [0-5] E2 [0-5]\n");

    let sorted =
        fs::read_to_string(tirp_writer::sorted_output_path(&config.out_file_path)).unwrap();
    assert_eq!(sorted, output);

    let stats =
        fs::read_to_string(tirp_writer::stats_output_path(&config.out_file_path)).unwrap();
    assert!(stats.parse::<f64>().unwrap() >= 0.0);
}

#[test]
fn refuses_to_overwrite_a_previous_run() {
    let dir = tempdir().unwrap();
    let config = config_for(dir.path());

    runner::run(&config).unwrap();
    let second = runner::run(&config);
    assert!(matches!(second, Err(SetupError::OutputExists(_))));
}

#[test]
fn missing_input_fails_before_mining() {
    let dir = tempdir().unwrap();
    let mut config = config_for(dir.path());
    config.in_file_path = dir.path().join("nope.txt");
    // A fresh output path so the input check is what fires.
    config.out_file_path = dir.path().join("out2.txt");

    let result = runner::run(&config);
    assert!(matches!(result, Err(SetupError::InputMissing(_))));
}
