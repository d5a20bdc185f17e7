use clap::Parser;
use tirpclo::command::args::{Args, RunConfig};
use tirpclo::command::runner;
use tirpclo::logging;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logging::init()?;

    let config = RunConfig::from_args(args)?;
    let written = runner::run(&config)?;

    info!(
        target: "tirpclo::run",
        tirps = written,
        output = %config.out_file_path.display(),
        "Done"
    );
    Ok(())
}
