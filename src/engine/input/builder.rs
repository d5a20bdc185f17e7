use std::rc::Rc;
use tracing::debug;

use crate::engine::core::{
    CoRef, Coincidence, CoincidenceSequence, DbEntry, PatternInstance, SequenceDB, Sti, Tiep,
    TiepIndex, TiepKind,
};
use crate::engine::input::end_time::{self, EndTime};
use crate::engine::input::reader::EntityStis;

/// Builds the initial sequence database from parsed entity blocks,
/// populating the tiep index on the way.
pub fn build_initial_seq_db(entities: Vec<EntityStis>, index: &mut TiepIndex) -> SequenceDB {
    let mut db = Vec::with_capacity(entities.len());
    for record in entities {
        let entity: Rc<str> = Rc::from(record.entity_id.as_str());
        let mut end_times: Vec<EndTime> = Vec::new();
        for (start, finish, symbol) in record.stis {
            let sti = Sti::new(start, finish, symbol);
            end_time::add_sti_end_points(&mut end_times, &sti);
        }
        let seq = build_coincidence_seq(&entity, end_times, index);
        db.push(DbEntry {
            seq,
            instance: PatternInstance::new(),
        });
    }
    debug!(
        target: "tirpclo::input",
        entities = db.len(),
        tiep_reps = index.master_tieps.len(),
        "Built initial sequence database"
    );
    SequenceDB::initial(db)
}

/// Converts the ordered slot list into a linked coincidence sequence. Slot i
/// becomes coincidence i; a start slot at the same instant as its
/// predecessor is flagged as a meet.
fn build_coincidence_seq(
    entity: &Rc<str>,
    end_times: Vec<EndTime>,
    index: &mut TiepIndex,
) -> CoincidenceSequence {
    let mut first_co: Option<CoRef> = None;
    let mut prev_co: Option<CoRef> = None;
    let mut last_time: Option<i64> = None;

    for (slot_index, slot) in end_times.into_iter().enumerate() {
        let is_meet = slot.kind == TiepKind::Start && last_time == Some(slot.time);
        let co = Coincidence::new(slot_index, is_meet);

        for sti in &slot.stis {
            let tiep = Tiep::new(slot.time, Rc::clone(sti), slot.kind, Rc::downgrade(&co));
            co.borrow_mut().tieps.push(Rc::clone(&tiep));
            let occurrence_index = index.add_tiep_occurrence(&tiep.primitive_rep, entity, &tiep);
            sti.entity_sti_index.set(occurrence_index);
        }

        match &prev_co {
            Some(prev) => prev.borrow_mut().next = Some(Rc::clone(&co)),
            None => first_co = Some(Rc::clone(&co)),
        }
        last_time = Some(slot.time);
        prev_co = Some(co);
    }

    CoincidenceSequence {
        entity: Rc::clone(entity),
        first_co,
        partial_co: None,
    }
}
