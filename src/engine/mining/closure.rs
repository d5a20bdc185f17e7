use std::rc::Rc;

use indexmap::IndexMap;

use crate::engine::core::rep;
use crate::engine::core::{CoRef, DbEntry, SequenceDB, StiRef, TiepProjector, TiepRef};
use crate::engine::mining::candidates::Projectors;
use crate::engine::mining::gap::max_gap_holds;

/// Records, per database entry, the STIs whose tiep could be prepended into
/// the pattern at one fixed position without losing that entry.
#[derive(Debug, Default, Clone)]
pub struct BackwardExtensionTiep {
    pub stis_per_entry: IndexMap<usize, Vec<StiRef>>,
}

impl BackwardExtensionTiep {
    pub fn add_sti_in_entry(&mut self, entry_index: usize, sti: StiRef) {
        self.stis_per_entry.entry(entry_index).or_default().push(sti);
    }
}

/// Backward-extension tieps surviving the cross-entity intersection, keyed
/// by primitive start representation.
pub type BeTiepsLists = IndexMap<String, Vec<BackwardExtensionTiep>>;

/// Backward-extension tieps of one entity, keyed by prefixed representation.
pub type EntityBeTieps = IndexMap<String, BackwardExtensionTiep>;

/// Forward-extension analysis: the TIRP cannot be closed when some candidate
/// occurs in every supporting record, either directly for a start candidate
/// or for a finish candidate whose same-symbol backward-extension start
/// covers every entity as well (the two together embed a whole extra
/// interval).
pub fn may_tirp_be_closed(
    pattern_seq_db: &SequenceDB,
    tiep_projectors: &Projectors,
    be_tieps_lists: &BeTiepsLists,
) -> bool {
    for (tiep, projector) in tiep_projectors {
        if pattern_seq_db.support != projector.support() {
            continue;
        }

        if rep::is_start_rep(tiep) {
            return false;
        }

        let primitive = rep::base_form(tiep);
        let complement_start = rep::start_complement(primitive);
        if let Some(start_be_tieps) = be_tieps_lists.get(&complement_start) {
            if do_be_fe_match_in_all_entities(start_be_tieps, projector, pattern_seq_db) {
                return false;
            }
        }
    }
    true
}

fn do_be_fe_match_in_all_entities(
    start_be_tieps: &[BackwardExtensionTiep],
    finish_projector: &TiepProjector,
    pattern_seq_db: &SequenceDB,
) -> bool {
    for be_tiep in start_be_tieps {
        let mut matching_entities: Vec<Rc<str>> = Vec::new();

        for (&entry_index, &finish_first_index) in &finish_projector.first_indices {
            let Some(stis) = be_tiep.stis_per_entry.get(&entry_index) else {
                continue;
            };
            let entity = &pattern_seq_db.db[entry_index].seq.entity;
            if matching_entities.iter().any(|e| e == entity) {
                continue;
            }
            if stis
                .iter()
                .any(|sti| sti.entity_sti_index.get() >= finish_first_index)
            {
                matching_entities.push(Rc::clone(entity));
            }
        }

        if pattern_seq_db.support == matching_entities.len() {
            return true;
        }
    }
    false
}

fn do_be_be_match_in_all_entities(
    start_be_tieps: &[BackwardExtensionTiep],
    finish_be_tiep: &BackwardExtensionTiep,
    pattern_seq_db: &SequenceDB,
) -> bool {
    for be_tiep in start_be_tieps {
        let mut matching_entities: Vec<Rc<str>> = Vec::new();

        for (&entry_index, finish_stis) in &finish_be_tiep.stis_per_entry {
            let Some(start_stis) = be_tiep.stis_per_entry.get(&entry_index) else {
                continue;
            };
            let entity = &pattern_seq_db.db[entry_index].seq.entity;
            if matching_entities.iter().any(|e| e == entity) {
                continue;
            }
            if finish_stis
                .iter()
                .any(|finish_sti| start_stis.iter().any(|start_sti| Rc::ptr_eq(start_sti, finish_sti)))
            {
                matching_entities.push(Rc::clone(entity));
            }
        }

        if pattern_seq_db.support == matching_entities.len() {
            return true;
        }
    }
    false
}

/// Backward-extension analysis of a projected pattern: for every tiep
/// position, walks each record from the coincidence the position was
/// projected at up to the matched tiep's coincidence, classifying traversed
/// tieps with a two-character prefix and intersecting the findings across
/// entities. Returns whether the pattern can still be closed, plus the
/// surviving start BE tieps for the forward-extension cross-check.
pub fn back_scan(pattern_seq_db: &SequenceDB, maximal_gap: i64) -> (bool, BeTiepsLists) {
    let mut be_tieps_lists = BeTiepsLists::new();
    let positions = pattern_seq_db.db[0].instance.tieps.len();

    for position in 0..positions {
        let mut cumulative: Option<EntityBeTieps> = None;
        let mut entity_map: Option<EntityBeTieps> = None;
        let mut intersection_emptied = false;

        for (entry_index, entry) in pattern_seq_db.db.iter().enumerate() {
            let entity_boundary = entry_index == 0
                || entry.seq.entity != pattern_seq_db.db[entry_index - 1].seq.entity;
            if entity_boundary {
                cumulative = entity_map.take();
                if cumulative.as_ref().is_some_and(|c| c.is_empty()) {
                    intersection_emptied = true;
                    break;
                }
                entity_map = Some(EntityBeTieps::new());
            }

            scan_record_before_position(
                entry,
                position,
                entry_index,
                entity_map.as_mut().expect("entity map initialized at boundary"),
                cumulative.as_ref(),
                maximal_gap,
            );
        }

        let final_be_tieps = if intersection_emptied {
            EntityBeTieps::new()
        } else {
            entity_map.unwrap_or_default()
        };
        if final_be_tieps.is_empty() {
            continue;
        }
        if !finalize_ith_before_be_tieps(final_be_tieps, &mut be_tieps_lists, pattern_seq_db) {
            return (false, be_tieps_lists);
        }
    }

    (true, be_tieps_lists)
}

/// Walks one record's chain from the recorded back-scan origin of the given
/// position up to the matched tiep's coincidence. `pre1` describes the
/// traversed coincidence's relation to the previous one, `pre2` its relation
/// to the target (meet when the target sits in a meet coincidence right
/// behind, co-occurrence inside the target's own coincidence, `*` otherwise).
/// Gap checks apply to plain positions only.
fn scan_record_before_position(
    entry: &DbEntry,
    position: usize,
    entry_index: usize,
    entity_map: &mut EntityBeTieps,
    cumulative: Option<&EntityBeTieps>,
    maximal_gap: i64,
) {
    let instance = &entry.instance;
    let target = &instance.tieps[position];
    let target_co = target.coincidence();
    let target_co_index = target_co.borrow().index;
    let target_in_meet = target_co.borrow().is_meet;

    let mut current = instance.next_coincidences[position]
        .clone()
        .expect("back-scan origin recorded for every position");
    let mut pre1 = {
        let co_ref = current.borrow();
        if co_ref.is_co {
            rep::CO_REP
        } else if co_ref.is_meet {
            rep::MEET_REP
        } else {
            '*'
        }
    };

    while current.borrow().index != target_co_index {
        let next = {
            let co_ref = current.borrow();
            if co_ref.index + 1 == target_co_index && target_in_meet {
                for tiep in &co_ref.tieps {
                    let full_rep = format!("{pre1}{}{}", rep::MEET_REP, tiep.primitive_rep);
                    add_to_entity_be_tieps(
                        target, tiep, &full_rep, entry_index, entity_map, cumulative, maximal_gap,
                        false,
                    );
                }
            } else {
                for tiep in &co_ref.tieps {
                    let full_rep = format!("{pre1}*{}", tiep.primitive_rep);
                    add_to_entity_be_tieps(
                        target, tiep, &full_rep, entry_index, entity_map, cumulative, maximal_gap,
                        true,
                    );
                }
            }
            pre1 = if co_ref.is_co && co_ref.next.as_ref().is_some_and(|n| n.borrow().is_meet) {
                rep::MEET_REP
            } else {
                '*'
            };
            co_ref
                .next
                .clone()
                .expect("back-scan chain reaches the target coincidence")
        };
        current = next;
    }

    let co_ref = current.borrow();
    for tiep in &co_ref.tieps {
        if Rc::ptr_eq(tiep, target)
            || tiep.orig.as_ref().is_some_and(|orig| Rc::ptr_eq(orig, target))
        {
            break;
        }
        let full_rep = format!("{pre1}{}{}", rep::CO_REP, tiep.primitive_rep);
        add_to_entity_be_tieps(
            target, tiep, &full_rep, entry_index, entity_map, cumulative, maximal_gap, false,
        );
    }
}

/// Adds one traversed tiep to the entity's BE set, keeping only
/// representations still present in the running cross-entity intersection
/// and, where requested, satisfying the maximal gap towards the target.
#[allow(clippy::too_many_arguments)]
fn add_to_entity_be_tieps(
    projected: &TiepRef,
    current_tiep: &TiepRef,
    full_rep: &str,
    entry_index: usize,
    entity_map: &mut EntityBeTieps,
    cumulative: Option<&EntityBeTieps>,
    maximal_gap: i64,
    check_gap: bool,
) {
    if let Some(cumulative) = cumulative {
        if !cumulative.contains_key(full_rep) {
            return;
        }
    }
    if check_gap && !max_gap_holds(Some(current_tiep.sti.finish_time), projected, maximal_gap) {
        return;
    }

    let be_tiep = entity_map
        .entry(full_rep.to_string())
        .or_insert_with(|| match cumulative {
            None => BackwardExtensionTiep::default(),
            Some(cumulative) => cumulative[full_rep].clone(),
        });
    be_tiep.add_sti_in_entry(entry_index, Rc::clone(&current_tiep.sti));
}

/// Folds one position's surviving BE tieps into the pattern's lists: start
/// tieps are kept; a finish tiep whose same-symbol start BE shares an STI in
/// every entity proves a full-interval backward extension, so the pattern
/// cannot be closed.
pub fn finalize_ith_before_be_tieps(
    cumulative: EntityBeTieps,
    be_tieps_lists: &mut BeTiepsLists,
    pattern_seq_db: &SequenceDB,
) -> bool {
    for (full_rep, be_tiep) in &cumulative {
        let primitive = &full_rep[2..];
        if rep::is_start_rep(primitive) {
            be_tieps_lists
                .entry(primitive.to_string())
                .or_default()
                .push(be_tiep.clone());
        }
    }

    for (full_rep, be_tiep) in &cumulative {
        let primitive = &full_rep[2..];
        if rep::is_finish_rep(primitive) {
            let start_rep = rep::start_complement(primitive);
            if let Some(start_be_tieps) = be_tieps_lists.get(&start_rep) {
                if do_be_be_match_in_all_entities(start_be_tieps, be_tiep, pattern_seq_db) {
                    return false;
                }
            }
        }
    }

    true
}

/// For the initial one-tiep pattern: any surviving finish BE tiep kills the
/// branch outright; start BE tieps seed the lists.
pub fn finalize_initial_be_tieps(cumulative: EntityBeTieps) -> (bool, BeTiepsLists) {
    let mut be_tieps_lists = BeTiepsLists::new();

    for (full_rep, be_tiep) in cumulative {
        let primitive = &full_rep[1..];
        if rep::is_start_rep(primitive) {
            be_tieps_lists
                .entry(primitive.to_string())
                .or_default()
                .push(be_tiep);
        } else {
            return (false, be_tieps_lists);
        }
    }

    (true, be_tieps_lists)
}

/// Initial-projection BE collection for one occurrence of the projected
/// start tiep. Representations here carry a single-character prefix; STIs
/// recorded for the previous occurrence are carried forward when they still
/// satisfy the gap towards this occurrence.
pub fn collect_be_tieps_wrt_tiep_instance(
    occurrence: &TiepRef,
    scan_from: CoRef,
    entry_index: usize,
    entity_map: &mut EntityBeTieps,
    cumulative: Option<&EntityBeTieps>,
    maximal_gap: i64,
) {
    if let Some(previous_entry) = entry_index.checked_sub(1) {
        for (full_rep, be_tiep) in entity_map.iter_mut() {
            if full_rep.starts_with(rep::CO_REP) || full_rep.starts_with(rep::MEET_REP) {
                continue;
            }
            let Some(previous_stis) = be_tiep.stis_per_entry.get(&previous_entry) else {
                continue;
            };
            let carried: Vec<StiRef> = previous_stis
                .iter()
                .filter(|sti| max_gap_holds(Some(sti.finish_time), occurrence, maximal_gap))
                .cloned()
                .collect();
            for sti in carried {
                be_tiep.add_sti_in_entry(entry_index, sti);
            }
        }
    }

    let target_co = occurrence.coincidence();
    let target_co_index = target_co.borrow().index;
    let target_in_meet = target_co.borrow().is_meet;

    let mut current = scan_from;
    while current.borrow().index != target_co_index {
        let next = {
            let co_ref = current.borrow();
            if co_ref.index + 1 == target_co_index && target_in_meet {
                for tiep in &co_ref.tieps {
                    let full_rep = format!("{}{}", rep::MEET_REP, tiep.primitive_rep);
                    add_to_entity_be_tieps(
                        occurrence, tiep, &full_rep, entry_index, entity_map, cumulative,
                        maximal_gap, false,
                    );
                }
            } else {
                for tiep in &co_ref.tieps {
                    let full_rep = format!("*{}", tiep.primitive_rep);
                    add_to_entity_be_tieps(
                        occurrence, tiep, &full_rep, entry_index, entity_map, cumulative,
                        maximal_gap, true,
                    );
                }
            }
            co_ref
                .next
                .clone()
                .expect("chain reaches the projected occurrence")
        };
        current = next;
    }

    let co_ref = current.borrow();
    for tiep in &co_ref.tieps {
        if Rc::ptr_eq(tiep, occurrence) {
            break;
        }
        let full_rep = format!("{}{}", rep::CO_REP, tiep.primitive_rep);
        add_to_entity_be_tieps(
            occurrence, tiep, &full_rep, entry_index, entity_map, cumulative, maximal_gap, false,
        );
    }
}
