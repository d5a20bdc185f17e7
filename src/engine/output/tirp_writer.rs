use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::engine::core::{PatternInstance, SequenceDB, StiRef};
use crate::engine::errors::SetupError;
use crate::engine::output::allen;

/// Receives completed TIRPs from the miner.
pub trait TirpSink {
    fn emit(&mut self, seq_db: &SequenceDB) -> io::Result<()>;
}

/// Formats discovered TIRPs into the output file, one line per TIRP, in
/// append mode.
pub struct TirpWriter {
    out: BufWriter<File>,
    written: usize,
}

impl TirpWriter {
    /// Opens the output file for appending; refuses to reuse an existing
    /// file.
    pub fn create(path: &Path) -> Result<TirpWriter, SetupError> {
        if path.is_file() {
            return Err(SetupError::OutputExists(path.to_path_buf()));
        }
        let file = OpenOptions::new().append(true).create(true).open(path)?;
        Ok(TirpWriter {
            out: BufWriter::new(file),
            written: 0,
        })
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl TirpSink for TirpWriter {
    fn emit(&mut self, seq_db: &SequenceDB) -> io::Result<()> {
        self.written += 1;
        writeln!(self.out, "{}", format_tirp(seq_db))
    }
}

/// In-memory sink, for tests and dry runs.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub lines: Vec<String>,
}

impl TirpSink for MemorySink {
    fn emit(&mut self, seq_db: &SequenceDB) -> io::Result<()> {
        self.lines.push(format_tirp(seq_db));
        Ok(())
    }
}

/// One output line:
/// `{k} {sym1-…-symk} {relations} {support} {mean instances or support} {entity [s-f]… …}`.
pub fn format_tirp(seq_db: &SequenceDB) -> String {
    let support = seq_db.support;
    let first_instance = &seq_db.db[0].instance;
    let length = first_instance.tieps.len() / 2;

    let mut stis = start_stis(first_instance);
    stis.sort();

    let mut line = format!("{length} ");
    line.push_str(
        &stis
            .iter()
            .map(|sti| sti.symbol.to_string())
            .collect::<Vec<_>>()
            .join("-"),
    );
    line.push(' ');

    if length == 1 {
        line.push_str("-.");
    } else {
        for i in 0..length {
            for j in i + 1..length {
                line.push(allen::relation(&stis[i], &stis[j]));
                line.push('.');
            }
        }
    }

    line.push_str(&format!(" {support} "));
    if length == 1 {
        line.push_str(&format!("{support}"));
    } else {
        let mean = (seq_db.db.len() as f64 / support as f64 * 100.0).round() / 100.0;
        line.push_str(&format!("{mean:?}"));
    }

    line.push_str(&format!(" {} {}", seq_db.db[0].seq.entity, stis_as_str(&stis)));
    for entry in &seq_db.db[1..] {
        let mut stis = start_stis(&entry.instance);
        stis.sort();
        line.push_str(&format!(" {} {}", entry.seq.entity, stis_as_str(&stis)));
    }
    line
}

fn start_stis(instance: &PatternInstance) -> Vec<StiRef> {
    instance
        .tieps
        .iter()
        .filter(|tiep| tiep.is_start())
        .map(|tiep| Rc::clone(&tiep.sti))
        .collect()
}

fn stis_as_str(stis: &[StiRef]) -> String {
    stis.iter().map(|sti| sti.to_string()).collect()
}

/// `<path minus .txt>_sorted.txt`.
pub fn sorted_output_path(out_path: &Path) -> PathBuf {
    companion_path(out_path, "_sorted.txt")
}

/// `<path minus .txt>_stats.txt`.
pub fn stats_output_path(out_path: &Path) -> PathBuf {
    companion_path(out_path, "_stats.txt")
}

fn companion_path(out_path: &Path, suffix: &str) -> PathBuf {
    let path = out_path.to_string_lossy();
    let base = path.strip_suffix(".txt").unwrap_or(&path);
    PathBuf::from(format!("{base}{suffix}"))
}

/// Rewrites the output lines in lexicographic order into the sorted
/// companion file. Sorting an already sorted file is idempotent.
pub fn generate_sorted_output_file(out_path: &Path) -> io::Result<()> {
    let reader = BufReader::new(File::open(out_path)?);
    let mut lines: Vec<String> = reader.lines().collect::<io::Result<_>>()?;
    lines.sort();

    let sorted_path = sorted_output_path(out_path);
    let mut out = BufWriter::new(File::create(&sorted_path)?);
    for line in &lines {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    debug!(
        target: "tirpclo::output",
        file = %sorted_path.display(),
        lines = lines.len(),
        "Wrote sorted output file"
    );
    Ok(())
}

/// Writes the stats companion file holding the runtime in seconds.
pub fn generate_stats_output_file(out_path: &Path, runtime_sec: f64) -> io::Result<()> {
    let mut out = File::create(stats_output_path(out_path))?;
    write!(out, "{runtime_sec:?}")
}
