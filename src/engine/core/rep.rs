//! Tiep string representations.
//!
//! The primitive representation of a tiep is its symbol followed by `+`
//! (start) or `-` (finish), e.g. `17+`. During mining a candidate may carry a
//! one-character marker in front: `_` for a co-occurrence tiep taken from a
//! partially projected coincidence, `@` for a tiep inside a meet coincidence.

pub const START_REP: char = '+';
pub const FINISH_REP: char = '-';
pub const MEET_REP: char = '@';
pub const CO_REP: char = '_';

pub fn is_start_rep(rep: &str) -> bool {
    rep.ends_with(START_REP)
}

pub fn is_finish_rep(rep: &str) -> bool {
    rep.ends_with(FINISH_REP)
}

pub fn is_co_rep(rep: &str) -> bool {
    rep.starts_with(CO_REP)
}

pub fn is_meet_rep(rep: &str) -> bool {
    rep.starts_with(MEET_REP)
}

/// Strips a leading co-occurrence or meet marker, if any.
pub fn base_form(rep: &str) -> &str {
    rep.strip_prefix(CO_REP)
        .or_else(|| rep.strip_prefix(MEET_REP))
        .unwrap_or(rep)
}

/// The finish tiep of the same symbol: `"7+"` → `"7-"`.
pub fn finish_complement(rep: &str) -> String {
    format!("{}{}", &rep[..rep.len() - 1], FINISH_REP)
}

/// The start tiep of the same symbol: `"7-"` → `"7+"`.
pub fn start_complement(rep: &str) -> String {
    format!("{}{}", &rep[..rep.len() - 1], START_REP)
}
