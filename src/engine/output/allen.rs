use crate::engine::core::Sti;

pub const BEFORE: char = '<';
pub const MEET: char = 'm';
pub const OVERLAP: char = 'o';
pub const FINISH_BY: char = 'f';
pub const CONTAIN: char = 'c';
pub const EQUAL: char = '=';
pub const STARTS: char = 'S';

/// Allen temporal relation between two STIs already ordered by
/// `(start, finish, symbol)`. The ladder order is the tie-breaking rule:
/// before on a strict gap, meet on touching end-points, then the
/// equal/contain/starts/finish-by start-and-finish comparisons, with overlap
/// as the remaining case.
pub fn relation(first: &Sti, second: &Sti) -> char {
    if first.finish_time < second.start_time {
        return BEFORE;
    }
    if first.finish_time == second.start_time {
        return MEET;
    }
    if first.start_time == second.start_time && first.finish_time == second.finish_time {
        return EQUAL;
    }
    if first.start_time < second.start_time && first.finish_time > second.finish_time {
        return CONTAIN;
    }
    if first.start_time == second.start_time && first.finish_time < second.finish_time {
        return STARTS;
    }
    if first.start_time < second.start_time && first.finish_time == second.finish_time {
        return FINISH_BY;
    }
    OVERLAP
}
