use indexmap::IndexMap;
use std::rc::Rc;
use tracing::debug;

use crate::engine::core::tiep::TiepRef;

/// All indexed occurrences of one primitive tiep representation.
#[derive(Debug, Default)]
pub struct MasterTiep {
    /// Occurrences per entity, in time order (list position equals the
    /// tiep's `entity_tiep_index`).
    pub tiep_occurrences: IndexMap<Rc<str>, Vec<TiepRef>>,
    /// Entities with at least one occurrence, in first-seen order.
    pub supporting_entities: Vec<Rc<str>>,
}

impl MasterTiep {
    /// Indexes one occurrence and returns its position within the entity.
    pub fn add_occurrence(&mut self, entity: &Rc<str>, tiep: &TiepRef) -> usize {
        if !self.tiep_occurrences.contains_key(entity.as_ref()) {
            self.tiep_occurrences.insert(Rc::clone(entity), Vec::new());
            self.supporting_entities.push(Rc::clone(entity));
        }
        let occurrences = self
            .tiep_occurrences
            .get_mut(entity.as_ref())
            .expect("entity occurrence list just ensured");
        let index = occurrences.len();
        tiep.entity_tiep_index.set(index);
        occurrences.push(Rc::clone(tiep));
        index
    }

    pub fn occurrences(&self, entity: &str) -> &[TiepRef] {
        &self.tiep_occurrences[entity]
    }

    pub fn support(&self) -> usize {
        self.supporting_entities.len()
    }
}

/// The end-point index: every primitive representation mapped to its ordered
/// per-entity occurrences. Iteration order is insertion order, which the
/// output contract depends on.
#[derive(Debug, Default)]
pub struct TiepIndex {
    pub master_tieps: IndexMap<String, MasterTiep>,
}

impl TiepIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a tiep occurrence under `(tiep_rep, entity)` and returns its
    /// index within the entity.
    pub fn add_tiep_occurrence(&mut self, tiep_rep: &str, entity: &Rc<str>, tiep: &TiepRef) -> usize {
        if !self.master_tieps.contains_key(tiep_rep) {
            self.master_tieps
                .insert(tiep_rep.to_string(), MasterTiep::default());
        }
        self.master_tieps[tiep_rep].add_occurrence(entity, tiep)
    }

    pub fn contains(&self, tiep_rep: &str) -> bool {
        self.master_tieps.contains_key(tiep_rep)
    }

    /// Panics on an unknown representation; callers only look up reps that
    /// survived pruning.
    pub fn master(&self, tiep_rep: &str) -> &MasterTiep {
        &self.master_tieps[tiep_rep]
    }

    /// Drops every representation whose support is below the threshold,
    /// preserving the insertion order of the survivors.
    pub fn prune_infrequent(&mut self, min_support: usize) {
        let infrequent: Vec<String> = self
            .master_tieps
            .iter()
            .filter(|(_, master)| master.support() < min_support)
            .map(|(rep, _)| rep.clone())
            .collect();
        for rep in &infrequent {
            self.master_tieps.shift_remove(rep);
        }
        debug!(
            target: "tirpclo::mining",
            pruned = infrequent.len(),
            remaining = self.master_tieps.len(),
            "Pruned infrequent tieps"
        );
    }
}
