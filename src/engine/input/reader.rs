use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use crate::engine::errors::SetupError;

pub const FILE_START: &str = "startToncepts";
pub const FILE_NUM: &str = "numberOfEntities";

/// One parsed entity block: its ID and raw STI triples in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityStis {
    pub entity_id: String,
    /// `(start_time, finish_time, symbol)` triples.
    pub stis: Vec<(i64, i64, u32)>,
}

/// Reads an STI series file into its entity blocks.
///
/// The format starts with a `startToncepts` header line followed by a
/// `numberOfEntities` line; entities then come in pairs of non-empty lines
/// (entity line, STI line), separated by blank lines, until EOF.
pub fn read_sti_file(path: &Path) -> Result<Vec<EntityStis>, SetupError> {
    if !path.is_file() {
        return Err(SetupError::InputMissing(path.to_path_buf()));
    }
    let entities = parse_sti_series(BufReader::new(File::open(path)?))?;
    debug!(
        target: "tirpclo::input",
        file = %path.display(),
        entities = entities.len(),
        "Read STI series file"
    );
    Ok(entities)
}

pub fn parse_sti_series(reader: impl BufRead) -> Result<Vec<EntityStis>, SetupError> {
    let mut lines = reader.lines();

    let mut found_start = false;
    for line in &mut lines {
        if line?.starts_with(FILE_START) {
            found_start = true;
            break;
        }
    }
    if !found_start {
        return Err(SetupError::InputMalformed(format!(
            "missing '{FILE_START}' header"
        )));
    }
    let num_line = lines.next().transpose()?.unwrap_or_default();
    if !num_line.starts_with(FILE_NUM) {
        return Err(SetupError::InputMalformed(format!(
            "missing '{FILE_NUM}' header"
        )));
    }

    let mut entities = Vec::new();
    while let Some(line) = lines.next() {
        let line = line?;
        let entity_line = line.trim();
        if entity_line.is_empty() {
            continue;
        }

        let entity_id = entity_id_of(entity_line);
        let sti_line = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(SetupError::InputMalformed(format!(
                    "entity '{entity_id}' has no STI line"
                )));
            }
        };
        let stis = parse_sti_line(sti_line.trim(), &entity_id)?;
        entities.push(EntityStis { entity_id, stis });
    }

    Ok(entities)
}

/// The entity ID is the first `,`/`;`-delimited token of the entity line.
fn entity_id_of(line: &str) -> String {
    line.split(';')
        .next()
        .unwrap_or("")
        .split(',')
        .next()
        .unwrap_or("")
        .to_string()
}

fn parse_sti_line(line: &str, entity_id: &str) -> Result<Vec<(i64, i64, u32)>, SetupError> {
    let mut stis = Vec::new();
    for tuple in line.split(';').filter(|part| !part.trim().is_empty()) {
        let mut fields = tuple.split(',');
        let start = parse_field::<i64>(fields.next(), tuple, entity_id)?;
        let finish = parse_field::<i64>(fields.next(), tuple, entity_id)?;
        let symbol = parse_field::<u32>(fields.next(), tuple, entity_id)?;
        if finish < start {
            return Err(SetupError::InputMalformed(format!(
                "entity '{entity_id}': STI '{tuple}' finishes before it starts"
            )));
        }
        stis.push((start, finish, symbol));
    }
    Ok(stis)
}

fn parse_field<T: std::str::FromStr>(
    field: Option<&str>,
    tuple: &str,
    entity_id: &str,
) -> Result<T, SetupError> {
    field
        .map(str::trim)
        .and_then(|value| value.parse::<T>().ok())
        .ok_or_else(|| {
            SetupError::InputMalformed(format!("entity '{entity_id}': bad STI tuple '{tuple}'"))
        })
}
