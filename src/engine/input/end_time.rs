use std::cmp::Ordering;
use std::rc::Rc;

use crate::engine::core::{StiRef, TiepKind};

/// One slot of co-occurring end-points: every STI with an end-point of the
/// given kind at the given time.
#[derive(Debug)]
pub struct EndTime {
    /// STIs of the slot, ordered by ascending symbol.
    pub stis: Vec<StiRef>,
    pub time: i64,
    pub kind: TiepKind,
}

impl EndTime {
    pub fn new(sti: StiRef, time: i64, kind: TiepKind) -> Self {
        EndTime {
            stis: vec![sti],
            time,
            kind,
        }
    }

    /// Keeps the slot ordered by ascending symbol; equal symbols keep
    /// insertion order.
    pub fn add_sti(&mut self, new_sti: StiRef) {
        let position = self
            .stis
            .partition_point(|sti| sti.symbol <= new_sti.symbol);
        self.stis.insert(position, new_sti);
    }

    /// Slot ordering: by time ascending; at equal times finish slots precede
    /// start slots.
    fn cmp_key(&self, time: i64, kind: TiepKind) -> Ordering {
        match self.time.cmp(&time) {
            Ordering::Equal if self.kind == kind => Ordering::Equal,
            Ordering::Equal if self.kind == TiepKind::Finish => Ordering::Less,
            Ordering::Equal => Ordering::Greater,
            ordering => ordering,
        }
    }
}

/// Inserts both end-points of an STI into the ordered slot list.
pub fn add_sti_end_points(end_times: &mut Vec<EndTime>, sti: &StiRef) {
    add_point(end_times, sti, sti.start_time, TiepKind::Start);
    add_point(end_times, sti, sti.finish_time, TiepKind::Finish);
}

/// Inserts one end-point, merging into an existing `(time, kind)` slot when
/// present.
fn add_point(end_times: &mut Vec<EndTime>, sti: &StiRef, time: i64, kind: TiepKind) {
    match end_times.binary_search_by(|slot| slot.cmp_key(time, kind)) {
        Ok(found) => end_times[found].add_sti(Rc::clone(sti)),
        Err(position) => end_times.insert(position, EndTime::new(Rc::clone(sti), time, kind)),
    }
}
