use std::thread;
use std::time::Instant;

use tracing::info;

use crate::command::args::RunConfig;
use crate::engine::core::TiepIndex;
use crate::engine::errors::SetupError;
use crate::engine::input::{builder, reader};
use crate::engine::mining::miner;
use crate::engine::output::tirp_writer::{self, TirpWriter};

/// Stack size for the mining thread. Recursion depth grows with twice the
/// longest frequent pattern and reaches the thousands on real datasets; the
/// initial database's linked chains are also torn down on this thread.
const MINING_STACK_BYTES: usize = 512 * 1024 * 1024;

/// Runs a full discovery: read the input, mine, write the output and its
/// sorted and stats companions. Returns the number of TIRPs written.
pub fn run(config: &RunConfig) -> Result<usize, SetupError> {
    let writer = TirpWriter::create(&config.out_file_path)?;
    let min_support = config.min_support();

    info!(
        target: "tirpclo::run",
        input = %config.in_file_path.display(),
        support = config.min_support_percentage,
        gap = config.maximal_gap,
        closed = config.is_closed_tirp_mining,
        "Starting TIRP discovery"
    );

    let started = Instant::now();
    let entities = reader::read_sti_file(&config.in_file_path)?;

    let maximal_gap = config.maximal_gap;
    let closed = config.is_closed_tirp_mining;
    let written = thread::Builder::new()
        .name("tirpclo-miner".into())
        .stack_size(MINING_STACK_BYTES)
        .spawn(move || -> Result<usize, SetupError> {
            let mut index = TiepIndex::new();
            let mut initial_seq_db = builder::build_initial_seq_db(entities, &mut index);
            let mut writer = writer;
            miner::discover_tirps(
                &mut index,
                &mut initial_seq_db,
                min_support,
                maximal_gap,
                &mut writer,
                closed,
            )?;
            let written = writer.written();
            writer.finish()?;
            Ok(written)
        })
        .expect("failed to spawn mining thread")
        .join()
        .expect("mining thread panicked")?;

    let runtime_sec = started.elapsed().as_secs_f64();
    info!(
        target: "tirpclo::run",
        tirps = written,
        runtime_sec,
        "Finished TIRP discovery"
    );

    tirp_writer::generate_sorted_output_file(&config.out_file_path)?;
    tirp_writer::generate_stats_output_file(&config.out_file_path, runtime_sec)?;

    Ok(written)
}
