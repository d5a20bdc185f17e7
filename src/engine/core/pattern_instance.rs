use rustc_hash::FxHashMap;
use std::rc::Rc;

use crate::engine::core::coincidence::CoRef;
use crate::engine::core::sti::StiRef;
use crate::engine::core::tiep::TiepRef;

/// Matching state of one record for the pattern currently being grown.
#[derive(Debug, Default)]
pub struct PatternInstance {
    /// Matched tieps, in projection order.
    pub tieps: Vec<TiepRef>,
    /// For every symbol with a matched start: the entity occurrence index of
    /// its most recent start tiep, used later to locate the complementing
    /// finish.
    pub symbol_db_indices: FxHashMap<u32, usize>,
    /// Minimum finish time over all matched intervals; `None` until the
    /// first start is matched. Drives the maximal-gap checks.
    pub minimal_finish_time: Option<i64>,
    /// Intervals whose start is matched but whose finish is still awaited.
    pub pre_matched: Vec<StiRef>,
    /// Minimum finish time over `pre_matched`; `None` when every matched
    /// interval is complete.
    pub first_expected_finish_time: Option<i64>,
    /// For the i-th matched tiep: the coincidence its back-scan starts from.
    /// Populated under closed mining only; one leading slot is seeded by the
    /// initial projection, so the list runs one ahead of `tieps`.
    pub next_coincidences: Vec<Option<CoRef>>,
}

impl PatternInstance {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy that further extensions cannot alias back into this instance.
    pub fn pre_extend_copy(&self, closed: bool) -> PatternInstance {
        PatternInstance {
            tieps: self.tieps.clone(),
            symbol_db_indices: self.symbol_db_indices.clone(),
            minimal_finish_time: self.minimal_finish_time,
            pre_matched: self.pre_matched.clone(),
            first_expected_finish_time: self.first_expected_finish_time,
            next_coincidences: if closed {
                self.next_coincidences.clone()
            } else {
                Vec::new()
            },
        }
    }

    /// Extends the instance with one more matched tiep.
    ///
    /// A finish tiep closes its interval and re-derives the expected-finish
    /// clock; a start tiep opens one and lowers both clocks. `next_co` is
    /// the first coincidence of the record after this projection, recorded
    /// for back-scans under closed mining.
    pub fn extend(&mut self, new_tiep: &TiepRef, next_co: Option<CoRef>, closed: bool) {
        self.tieps.push(Rc::clone(new_tiep));
        if closed {
            self.next_coincidences.push(next_co);
        }

        if let Some(pos) = self
            .pre_matched
            .iter()
            .position(|sti| Rc::ptr_eq(sti, &new_tiep.sti))
        {
            self.pre_matched.remove(pos);
            self.first_expected_finish_time =
                self.pre_matched.iter().map(|sti| sti.finish_time).min();
        } else {
            self.symbol_db_indices
                .insert(new_tiep.symbol, new_tiep.entity_tiep_index.get());
            self.pre_matched.push(Rc::clone(&new_tiep.sti));
            let finish = new_tiep.sti.finish_time;
            self.first_expected_finish_time = Some(match self.first_expected_finish_time {
                Some(current) => current.min(finish),
                None => finish,
            });
        }

        if new_tiep.is_start() {
            let finish = new_tiep.sti.finish_time;
            self.minimal_finish_time = Some(match self.minimal_finish_time {
                Some(current) => current.min(finish),
                None => finish,
            });
        }
    }
}
