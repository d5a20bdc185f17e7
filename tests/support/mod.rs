#![allow(dead_code)]

use std::fs;
use std::path::PathBuf;

use tempfile::TempDir;

use tirpclo::command::args::RunConfig;
use tirpclo::command::runner;
use tirpclo::engine::output::tirp_writer;

/// One full mining run over an inline input file, kept alive with its
/// scratch directory so the produced files can be inspected.
pub struct MiningRun {
    _dir: TempDir,
    pub out_path: PathBuf,
    pub written: usize,
}

impl MiningRun {
    /// Writes `input` to disk and runs the whole pipeline over it.
    pub fn execute(
        input: &str,
        closed: bool,
        num_entities: usize,
        min_support_percentage: f64,
        maximal_gap: i64,
    ) -> MiningRun {
        let dir = TempDir::new().expect("scratch dir");
        let in_path = dir.path().join("series.txt");
        fs::write(&in_path, input).expect("write input");

        let config = RunConfig {
            is_closed_tirp_mining: closed,
            num_entities,
            min_support_percentage,
            maximal_gap,
            in_file_path: in_path,
            out_file_path: dir.path().join("out.txt"),
        };
        let written = runner::run(&config).expect("mining run");

        MiningRun {
            out_path: config.out_file_path,
            written,
            _dir: dir,
        }
    }

    /// Output lines in emission order.
    pub fn lines(&self) -> Vec<String> {
        fs::read_to_string(&self.out_path)
            .expect("read output")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Lines of the sorted companion file.
    pub fn sorted_lines(&self) -> Vec<String> {
        fs::read_to_string(tirp_writer::sorted_output_path(&self.out_path))
            .expect("read sorted output")
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Contents of the stats companion file.
    pub fn stats(&self) -> String {
        fs::read_to_string(tirp_writer::stats_output_path(&self.out_path)).expect("read stats")
    }
}
