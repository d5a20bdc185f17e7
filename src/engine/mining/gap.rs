use crate::engine::core::Tiep;

/// The maximal-gap constraint: a candidate tiep's interval may not begin
/// `maximal_gap` or more time units after the pattern's earliest matched
/// finish. An unset minimum (`None`, nothing matched yet) always passes.
pub fn max_gap_holds(minimal_finish_time: Option<i64>, candidate: &Tiep, maximal_gap: i64) -> bool {
    match minimal_finish_time {
        Some(finish) => maximal_gap > candidate.sti.start_time - finish,
        None => true,
    }
}
