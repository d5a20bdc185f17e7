use std::rc::Rc;

use indexmap::IndexMap;

use crate::engine::core::rep;
use crate::engine::core::{
    CoRef, Coincidence, CoincidenceSequence, DbEntry, PatternInstance, SequenceDB, Tiep, TiepIndex,
    TiepProjector, TiepRef,
};
use crate::engine::mining::closure::{self, BackwardExtensionTiep, BeTiepsLists};
use crate::engine::mining::gap::max_gap_holds;

/// Result of projecting the initial database by a start tiep.
pub struct InitialProjection {
    pub seq_db: SequenceDB,
    /// Closed mining: whether the single-tiep pattern can still be closed.
    /// Always `true` otherwise.
    pub may_be_closed: bool,
    /// Closed mining: backward-extension tieps of the single-tiep pattern.
    pub be_tieps_lists: Option<BeTiepsLists>,
}

/// Projects the initial database by a frequent start tiep: every occurrence
/// in every supporting entity becomes one record of the projected database.
///
/// Under closed mining this also runs the initial backward-extension
/// collection, anchoring occurrence `i > 0` at occurrence `i - 1`'s
/// coincidence and occurrence `0` at the sequence head.
pub fn project_initial_seq_db(
    initial_seq_db: &SequenceDB,
    tiep_primitive_rep: &str,
    supporting_entities: &[Rc<str>],
    index: &TiepIndex,
    maximal_gap: i64,
    closed: bool,
) -> InitialProjection {
    let master = index.master(tiep_primitive_rep);
    let mut projected_db: Vec<DbEntry> = Vec::new();
    let mut cumulative_be_tieps: Option<IndexMap<String, BackwardExtensionTiep>> = None;
    let mut entry_index = 0usize;

    for entry in &initial_seq_db.db {
        let entity = &entry.seq.entity;
        if !supporting_entities.iter().any(|e| e == entity) {
            continue;
        }

        let occurrences = master.occurrences(entity);
        let mut entity_be_tieps: IndexMap<String, BackwardExtensionTiep> = IndexMap::new();

        for (i, occurrence) in occurrences.iter().enumerate() {
            let Some(projected_record) =
                project_seq_by_tiep_instance(occurrence, tiep_primitive_rep, &entry.seq, &entry.instance)
            else {
                continue;
            };

            let mut instance = PatternInstance::new();
            if closed {
                instance.next_coincidences.push(entry.seq.first_co.clone());
            }
            instance.extend(occurrence, projected_record.first_co.clone(), closed);
            projected_db.push(DbEntry {
                seq: projected_record,
                instance,
            });

            if closed {
                let scan_from = if i == 0 {
                    entry
                        .seq
                        .first_co
                        .clone()
                        .expect("supporting entity keeps a non-empty sequence")
                } else {
                    occurrences[i - 1].coincidence()
                };
                closure::collect_be_tieps_wrt_tiep_instance(
                    occurrence,
                    scan_from,
                    entry_index,
                    &mut entity_be_tieps,
                    cumulative_be_tieps.as_ref(),
                    maximal_gap,
                );
            }

            entry_index += 1;
        }

        cumulative_be_tieps = Some(entity_be_tieps);
    }

    let mut may_be_closed = true;
    let mut be_tieps_lists = None;
    let mut pre_matched = None;
    if closed {
        let (still_closable, lists) =
            closure::finalize_initial_be_tieps(cumulative_be_tieps.unwrap_or_default());
        may_be_closed = still_closable;
        be_tieps_lists = Some(lists);
        pre_matched = Some(vec![rep::finish_complement(tiep_primitive_rep)]);
    }

    InitialProjection {
        seq_db: SequenceDB {
            db: projected_db,
            entries_prev_indices: None,
            support: master.support(),
            pre_matched,
        },
        may_be_closed,
        be_tieps_lists,
    }
}

/// Projects a projected database by a candidate tiep, using the candidate's
/// tiep-projector to visit only surviving records, each from its first legal
/// occurrence.
///
/// Cutoffs, per record: occurrences past the first expected finish are
/// skipped (a finish is still awaited earlier); once a start-tiep candidate
/// violates the maximal gap the occurrence loop stops; co-occurrence, meet
/// and finish candidates admit at most one projection attempt per record.
pub fn project_projected_seq_db(
    seq_db: &SequenceDB,
    tiep: &str,
    tiep_projector: &TiepProjector,
    index: &TiepIndex,
    maximal_gap: i64,
    closed: bool,
) -> SequenceDB {
    let mut projected_db: Vec<DbEntry> = Vec::new();
    let mut projected_indices: Vec<usize> = Vec::new();

    let is_meet = rep::is_meet_rep(tiep);
    let is_co = rep::is_co_rep(tiep);
    let base_form = rep::base_form(tiep);
    let is_start_tiep = rep::is_start_rep(base_form);
    let master = index.master(base_form);
    let mut supporting_entities: Vec<Rc<str>> = Vec::new();

    for (&db_entry_index, &first_index) in &tiep_projector.first_indices {
        let entry = &seq_db.db[db_entry_index];
        let entity = &entry.seq.entity;
        let occurrences = master.occurrences(entity);

        for occurrence in &occurrences[first_index..] {
            if let Some(expected) = entry.instance.first_expected_finish_time {
                if occurrence.time > expected {
                    continue;
                }
            }
            if is_start_tiep
                && !max_gap_holds(entry.instance.minimal_finish_time, occurrence, maximal_gap)
            {
                break;
            }

            if let Some(projected_record) =
                project_seq_by_tiep_instance(occurrence, tiep, &entry.seq, &entry.instance)
            {
                if !supporting_entities.iter().any(|e| e == entity) {
                    supporting_entities.push(Rc::clone(entity));
                }
                let mut instance = entry.instance.pre_extend_copy(closed);
                instance.extend(occurrence, projected_record.first_co.clone(), closed);
                projected_db.push(DbEntry {
                    seq: projected_record,
                    instance,
                });
                projected_indices.push(db_entry_index);
            }

            if is_co || is_meet || !is_start_tiep {
                break;
            }
        }
    }

    let pre_matched = if closed {
        let mut awaited = seq_db
            .pre_matched
            .clone()
            .expect("closed mining tracks awaited finishes");
        if is_start_tiep {
            awaited.push(rep::finish_complement(base_form));
        } else {
            let position = awaited
                .iter()
                .position(|awaited_rep| awaited_rep == base_form)
                .expect("finish candidate must be awaited");
            awaited.remove(position);
        }
        Some(awaited)
    } else {
        None
    };

    SequenceDB {
        db: projected_db,
        entries_prev_indices: Some(projected_indices),
        support: supporting_entities.len(),
        pre_matched,
    }
}

/// Projects one coincidence sequence by one occurrence of a candidate tiep.
///
/// The anchor is the sequence's partial coincidence when it sits at the
/// occurrence's chain index, the occurrence's own coincidence otherwise.
/// Within the anchor the occurrence is matched by pointer identity, or by
/// original identity for a co-occurrence candidate. A matched finish tiep
/// must close a pre-matched interval; otherwise the projection fails.
pub(crate) fn project_seq_by_tiep_instance(
    occurrence: &TiepRef,
    tiep: &str,
    coincidence_seq: &CoincidenceSequence,
    pattern_instance: &PatternInstance,
) -> Option<CoincidenceSequence> {
    let occurrence_co = occurrence.coincidence();
    let occurrence_co_index = occurrence_co.borrow().index;

    let anchor: CoRef = match &coincidence_seq.partial_co {
        Some(partial) if partial.borrow().index == occurrence_co_index => Rc::clone(partial),
        _ => occurrence_co,
    };

    let match_by_orig = rep::is_co_rep(tiep);
    let first_co = {
        let anchor_ref = anchor.borrow();
        let position = anchor_ref.tieps.iter().position(|candidate| {
            if match_by_orig {
                candidate
                    .orig
                    .as_ref()
                    .is_some_and(|orig| Rc::ptr_eq(orig, occurrence))
            } else {
                Rc::ptr_eq(candidate, occurrence)
            }
        })?;

        let matched = &anchor_ref.tieps[position];
        if matched.is_finish()
            && !pattern_instance
                .pre_matched
                .iter()
                .any(|sti| Rc::ptr_eq(sti, &matched.sti))
        {
            return None;
        }

        // Fragment holding the tieps strictly to the right of the match. A
        // partial anchor already holds shadows, so its tieps are reused;
        // otherwise each remaining tiep is shadow-copied.
        let partial = Coincidence::new_partial(anchor_ref.index);
        {
            let mut fragment = partial.borrow_mut();
            for tiep_right in &anchor_ref.tieps[position + 1..] {
                fragment.tieps.push(if anchor_ref.is_co {
                    Rc::clone(tiep_right)
                } else {
                    Tiep::shadow_of(tiep_right)
                });
            }
            fragment.next = anchor_ref.next.clone();
        }

        if partial.borrow().tieps.is_empty() {
            anchor_ref.next.clone()
        } else {
            Some(partial)
        }
    };

    let partial_co = match &first_co {
        Some(co) if co.borrow().index == occurrence_co_index => Some(Rc::clone(co)),
        _ => None,
    };

    Some(CoincidenceSequence {
        entity: Rc::clone(&coincidence_seq.entity),
        first_co,
        partial_co,
    })
}
