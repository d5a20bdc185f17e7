use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced while setting a mining run up.
///
/// The mining core itself has no recoverable error states: once the input is
/// parsed and the output file is open, the only failures left are broken
/// internal invariants, which are bugs and panic.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("input file does not exist: {0}")]
    InputMissing(PathBuf),

    #[error("incorrect file format: {0}")]
    InputMalformed(String),

    #[error("output tirps file already exists: {0}")]
    OutputExists(PathBuf),

    #[error("invalid arguments: {0}")]
    Usage(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
