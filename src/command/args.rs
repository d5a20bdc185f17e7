use clap::{ArgAction, Parser};
use std::path::{Path, PathBuf};

use crate::engine::errors::SetupError;

/// Command-line surface of the miner.
#[derive(Debug, Parser)]
#[command(name = "tirpclo")]
#[command(about = "Frequent and closed time-interval relation pattern discovery", long_about = None)]
pub struct Args {
    /// Mine only closed TIRPs (`true`) or every frequent TIRP (`false`).
    #[arg(short = 'c', long, action = ArgAction::Set)]
    pub is_closed_tirp_mining: bool,

    /// Number of entities described by the input file.
    #[arg(short = 'n', long)]
    pub num_entities: usize,

    /// Minimum vertical support as a fraction in (0, 1].
    #[arg(short = 's', long, allow_negative_numbers = true)]
    pub min_support_percentage: f64,

    /// Maximal gap between a new start and the earliest matched finish.
    #[arg(short = 'g', long, allow_negative_numbers = true)]
    pub maximal_gap: i64,

    /// Input STI series file.
    #[arg(short = 'f', long)]
    pub in_file_path: PathBuf,

    /// Output TIRPs file; derived from the input path when omitted.
    #[arg(short = 'o', long)]
    pub out_file_path: Option<PathBuf>,
}

/// Validated run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub is_closed_tirp_mining: bool,
    pub num_entities: usize,
    pub min_support_percentage: f64,
    pub maximal_gap: i64,
    pub in_file_path: PathBuf,
    pub out_file_path: PathBuf,
}

impl RunConfig {
    pub fn from_args(args: Args) -> Result<RunConfig, SetupError> {
        if !(args.min_support_percentage > 0.0 && args.min_support_percentage <= 1.0) {
            return Err(SetupError::Usage(format!(
                "min_support_percentage must be in (0, 1], got {}",
                args.min_support_percentage
            )));
        }
        if args.num_entities == 0 {
            return Err(SetupError::Usage("num_entities must be positive".into()));
        }
        if args.maximal_gap < 0 {
            return Err(SetupError::Usage(format!(
                "maximal_gap must be non-negative, got {}",
                args.maximal_gap
            )));
        }

        let out_file_path = args.out_file_path.unwrap_or_else(|| {
            default_out_path(
                &args.in_file_path,
                args.min_support_percentage,
                args.maximal_gap,
            )
        });

        Ok(RunConfig {
            is_closed_tirp_mining: args.is_closed_tirp_mining,
            num_entities: args.num_entities,
            min_support_percentage: args.min_support_percentage,
            maximal_gap: args.maximal_gap,
            in_file_path: args.in_file_path,
            out_file_path,
        })
    }

    /// `ceil(num_entities × min_support_percentage)`.
    pub fn min_support(&self) -> usize {
        (self.num_entities as f64 * self.min_support_percentage).ceil() as usize
    }
}

/// `<input minus extension>-support-<pct>-gap-<gap>.txt`, next to the input.
fn default_out_path(in_path: &Path, min_support_percentage: f64, maximal_gap: i64) -> PathBuf {
    let path = in_path.to_string_lossy();
    let base = path
        .strip_suffix(".txt")
        .or_else(|| path.strip_suffix(".csv"))
        .unwrap_or(&path);
    PathBuf::from(format!(
        "{base}-support-{min_support_percentage:?}-gap-{maximal_gap}.txt"
    ))
}
