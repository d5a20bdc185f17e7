use std::rc::Rc;

use indexmap::IndexMap;

use crate::engine::core::rep;
use crate::engine::core::{CoRef, CoincidenceSequence, PatternInstance, SequenceDB, TiepIndex, TiepKind, TiepProjector};
use crate::engine::mining::gap::max_gap_holds;

/// Candidate extension tieps of the current pattern, keyed by their (possibly
/// co/meet-prefixed) representation. Iteration order is discovery order.
pub type Projectors = IndexMap<String, TiepProjector>;

/// Generates the tiep-projectors of the next extension candidates.
///
/// Right after the initial projection (no previous projectors) candidates
/// are discovered by walking every record's chain. Deeper in the recursion
/// they are replayed from the previous level's projectors, then augmented
/// with the last tiep's complement and with co-occurrence/meet candidates
/// from each record's leading coincidences.
pub fn get_tiep_projectors(
    seq_db: &SequenceDB,
    pattern_last_tiep: &str,
    previous_projectors: Option<&Projectors>,
    index: &TiepIndex,
    min_support: usize,
    maximal_gap: i64,
) -> Projectors {
    let Some(previous_projectors) = previous_projectors else {
        return initial_tiep_projectors(seq_db, pattern_last_tiep, maximal_gap);
    };

    let pattern_last_tiep = rep::base_form(pattern_last_tiep);
    let mut projectors = Projectors::new();
    let allowed_non_supporting = seq_db.db.len() as isize - min_support as isize;

    populate_from_previous(
        seq_db,
        pattern_last_tiep,
        previous_projectors,
        index,
        min_support,
        maximal_gap,
        &mut projectors,
        allowed_non_supporting,
    );

    if rep::is_start_rep(pattern_last_tiep) {
        add_complement_finish(
            seq_db,
            pattern_last_tiep,
            index,
            &mut projectors,
            allowed_non_supporting,
        );
    }
    if rep::is_finish_rep(pattern_last_tiep) {
        add_complement_start(
            seq_db,
            pattern_last_tiep,
            index,
            maximal_gap,
            &mut projectors,
            allowed_non_supporting,
        );
    }

    for (entry_index, entry) in seq_db.db.iter().enumerate() {
        let Some(first_co) = entry.seq.first_co.clone() else {
            continue;
        };
        add_meet_co_candidates(
            first_co,
            &entry.seq.entity,
            entry_index,
            &mut projectors,
            &entry.instance,
        );
    }

    projectors
}

/// Replays every previous candidate that is still frequent (and neither
/// co/meet-prefixed nor the tiep just projected) against the new database.
#[allow(clippy::too_many_arguments)]
fn populate_from_previous(
    seq_db: &SequenceDB,
    pattern_last_tiep: &str,
    previous_projectors: &Projectors,
    index: &TiepIndex,
    min_support: usize,
    maximal_gap: i64,
    projectors: &mut Projectors,
    allowed_non_supporting: isize,
) {
    let prev_indices = seq_db
        .entries_prev_indices
        .as_ref()
        .expect("projected database records parent entry indices");

    for (candidate, previous_projector) in previous_projectors {
        if previous_projector.support() < min_support {
            continue;
        }
        if rep::is_co_rep(candidate) || rep::is_meet_rep(candidate) {
            continue;
        }
        if candidate == pattern_last_tiep {
            continue;
        }

        let master = index.master(candidate);
        let is_finish_tiep = rep::is_finish_rep(candidate);
        let mut non_supporting: isize = 0;

        for (entry_index, entry) in seq_db.db.iter().enumerate() {
            if non_supporting > allowed_non_supporting {
                break;
            }

            let entity = &entry.seq.entity;
            let Some(start_co) = first_regular_coincidence(&entry.seq, true) else {
                non_supporting += 1;
                continue;
            };
            let start_co_index = start_co.borrow().index;

            let previous_entry_index = prev_indices[entry_index];
            if !previous_projector
                .first_indices
                .contains_key(&previous_entry_index)
            {
                non_supporting += 1;
                continue;
            }

            let occurrences = master.occurrences(entity);

            // For a finish tiep the only legal occurrence is the one
            // complementing the matched start of its symbol.
            if is_finish_tiep {
                let symbol = occurrences[0].symbol;
                let occurrence_index = entry.instance.symbol_db_indices[&symbol];
                if occurrences[occurrence_index].coincidence().borrow().index >= start_co_index {
                    add_to_projectors(candidate, entity, entry_index, projectors, occurrence_index, false);
                } else {
                    non_supporting += 1;
                }
                continue;
            }

            let prev_start_index = previous_projector.first_indices[&previous_entry_index];
            let mut found = false;
            for (i, occurrence) in occurrences.iter().enumerate().skip(prev_start_index) {
                if !max_gap_holds(entry.instance.minimal_finish_time, occurrence, maximal_gap) {
                    break;
                }
                if occurrence.coincidence().borrow().index >= start_co_index {
                    add_to_projectors(candidate, entity, entry_index, projectors, i, false);
                    found = true;
                    break;
                }
            }
            if !found {
                non_supporting += 1;
            }
        }
    }
}

/// The finish complementing a just-projected start: each record contributes
/// the specific occurrence closing its matched start, when it is still
/// reachable.
fn add_complement_finish(
    seq_db: &SequenceDB,
    pattern_last_tiep: &str,
    index: &TiepIndex,
    projectors: &mut Projectors,
    allowed_non_supporting: isize,
) {
    let finish_rep = rep::finish_complement(pattern_last_tiep);
    let master = index.master(&finish_rep);
    let mut non_supporting: isize = 0;

    for (entry_index, entry) in seq_db.db.iter().enumerate() {
        if non_supporting > allowed_non_supporting {
            break;
        }

        let entity = &entry.seq.entity;
        let Some(start_co) = first_regular_coincidence(&entry.seq, false) else {
            non_supporting += 1;
            continue;
        };
        let start_co_index = start_co.borrow().index;

        let occurrences = master.occurrences(entity);
        let symbol = occurrences[0].symbol;
        let occurrence_index = entry.instance.symbol_db_indices[&symbol];
        if occurrences[occurrence_index].coincidence().borrow().index >= start_co_index {
            add_to_projectors(&finish_rep, entity, entry_index, projectors, occurrence_index, false);
        } else {
            non_supporting += 1;
        }
    }
}

/// The start complementing a just-projected finish: each record contributes
/// the first in-reach occurrence after the one just matched.
fn add_complement_start(
    seq_db: &SequenceDB,
    pattern_last_tiep: &str,
    index: &TiepIndex,
    maximal_gap: i64,
    projectors: &mut Projectors,
    allowed_non_supporting: isize,
) {
    let start_rep = rep::start_complement(pattern_last_tiep);
    let master = index.master(&start_rep);
    let mut non_supporting: isize = 0;

    for (entry_index, entry) in seq_db.db.iter().enumerate() {
        if non_supporting > allowed_non_supporting {
            break;
        }

        let entity = &entry.seq.entity;
        let Some(start_co) = first_regular_coincidence(&entry.seq, true) else {
            non_supporting += 1;
            continue;
        };
        let start_co_index = start_co.borrow().index;

        let occurrences = master.occurrences(entity);
        let from = entry
            .instance
            .tieps
            .last()
            .expect("projected pattern has at least one tiep")
            .entity_tiep_index
            .get()
            + 1;
        let mut found = false;
        for (i, occurrence) in occurrences.iter().enumerate().skip(from) {
            if !max_gap_holds(entry.instance.minimal_finish_time, occurrence, maximal_gap) {
                break;
            }
            if occurrence.coincidence().borrow().index >= start_co_index {
                add_to_projectors(&start_rep, entity, entry_index, projectors, i, false);
                found = true;
                break;
            }
        }
        if !found {
            non_supporting += 1;
        }
    }
}

/// First-level candidate discovery: walks the whole chain of every record,
/// collecting start tieps until the maximal gap is violated and the finish
/// complement of the last tiep, whichever coincidences come first.
fn initial_tiep_projectors(
    seq_db: &SequenceDB,
    pattern_last_tiep: &str,
    maximal_gap: i64,
) -> Projectors {
    let mut projectors = Projectors::new();

    for (entry_index, entry) in seq_db.db.iter().enumerate() {
        let entity = &entry.seq.entity;
        let mut found_complement = false;
        let mut beyond_gap = false;
        let mut current = entry.seq.first_co.clone();

        while let Some(co) = current {
            if beyond_gap && found_complement {
                break;
            }
            let next = {
                let co_ref = co.borrow();
                let is_finish_coincidence = co_ref.kind() == TiepKind::Finish;
                let skip = (found_complement && is_finish_coincidence)
                    || (beyond_gap && !is_finish_coincidence);

                if !skip {
                    for tiep in &co_ref.tieps {
                        if is_finish_coincidence {
                            if rep::start_complement(&tiep.primitive_rep) == pattern_last_tiep {
                                add_to_projectors(
                                    &tiep.primitive_rep,
                                    entity,
                                    entry_index,
                                    &mut projectors,
                                    tiep.entity_tiep_index.get(),
                                    false,
                                );
                                found_complement = true;
                                break;
                            }
                            continue;
                        }

                        if tiep.primitive_rep == pattern_last_tiep {
                            continue;
                        }
                        if !max_gap_holds(entry.instance.minimal_finish_time, tiep, maximal_gap) {
                            beyond_gap = true;
                            break;
                        }

                        let candidate_rep = if co_ref.is_co {
                            format!("{}{}", rep::CO_REP, tiep.primitive_rep)
                        } else {
                            tiep.primitive_rep.clone()
                        };
                        let original = tiep.orig.as_ref().unwrap_or(tiep);
                        add_to_projectors(
                            &candidate_rep,
                            entity,
                            entry_index,
                            &mut projectors,
                            original.entity_tiep_index.get(),
                            true,
                        );
                    }
                }
                co_ref.next.clone()
            };
            current = next;
        }
    }

    projectors
}

/// Registers a candidate occurrence. `validate_first` keeps an already
/// recorded first index for the entry instead of overwriting it.
fn add_to_projectors(
    tiep_rep: &str,
    entity: &Rc<str>,
    entry_index: usize,
    projectors: &mut Projectors,
    first_index: usize,
    validate_first: bool,
) {
    let projector = projectors.entry(tiep_rep.to_string()).or_default();
    if !projector.supporting_entities.iter().any(|e| e == entity) {
        projector.supporting_entities.push(Rc::clone(entity));
    }
    if !validate_first || !projector.first_indices.contains_key(&entry_index) {
        projector.first_indices.insert(entry_index, first_index);
    }
}

/// Co-occurrence and meet candidates from a record's leading coincidences: a
/// leading partial coincidence contributes `_`-prefixed tieps (finish tieps
/// only when their interval is pre-matched), and a meet coincidence right
/// behind it, or leading itself, contributes `@`-prefixed tieps.
fn add_meet_co_candidates(
    first_co: CoRef,
    entity: &Rc<str>,
    entry_index: usize,
    projectors: &mut Projectors,
    instance: &PatternInstance,
) {
    let co_ref = first_co.borrow();

    if co_ref.is_co {
        let is_finish_coincidence = co_ref.kind() == TiepKind::Finish;
        for tiep in &co_ref.tieps {
            if is_finish_coincidence
                && !instance
                    .pre_matched
                    .iter()
                    .any(|sti| Rc::ptr_eq(sti, &tiep.sti))
            {
                continue;
            }
            let candidate_rep = format!("{}{}", rep::CO_REP, tiep.primitive_rep);
            let original_index = tiep
                .orig
                .as_ref()
                .expect("partial coincidences hold shadow tieps")
                .entity_tiep_index
                .get();
            add_to_projectors(&candidate_rep, entity, entry_index, projectors, original_index, false);
        }

        if let Some(next) = co_ref.next.clone() {
            if next.borrow().is_meet {
                for tiep in &next.borrow().tieps {
                    let candidate_rep = format!("{}{}", rep::MEET_REP, tiep.primitive_rep);
                    add_to_projectors(
                        &candidate_rep,
                        entity,
                        entry_index,
                        projectors,
                        tiep.entity_tiep_index.get(),
                        false,
                    );
                }
            }
        }
    } else if co_ref.is_meet {
        for tiep in &co_ref.tieps {
            let candidate_rep = format!("{}{}", rep::MEET_REP, tiep.primitive_rep);
            add_to_projectors(
                &candidate_rep,
                entity,
                entry_index,
                projectors,
                tiep.entity_tiep_index.get(),
                false,
            );
        }
    }
}

/// Skips a leading partial coincidence (and, when `skip_meet` is set, a meet
/// coincidence behind it) to reach the record's first regular coincidence.
fn first_regular_coincidence(seq: &CoincidenceSequence, skip_meet: bool) -> Option<CoRef> {
    let mut co = seq.first_co.clone()?;
    if co.borrow().is_co {
        let next = co.borrow().next.clone();
        co = next?;
    }
    if skip_meet && co.borrow().is_meet {
        let next = co.borrow().next.clone();
        co = next?;
    }
    Some(co)
}
