use std::rc::Rc;

use crate::engine::core::coincidence::{CoRef, CoincidenceSequence};
use crate::engine::core::pattern_instance::PatternInstance;
use crate::engine::core::tiep_index::TiepIndex;

/// One record of a sequence database: an entity's (possibly projected)
/// coincidence sequence plus the matching state accumulated for it so far.
#[derive(Debug)]
pub struct DbEntry {
    pub seq: CoincidenceSequence,
    pub instance: PatternInstance,
}

/// A sequence database: all records supporting the pattern currently being
/// grown. The initial database holds one record per entity; projected
/// databases hold one record per surviving pattern instance.
#[derive(Debug)]
pub struct SequenceDB {
    pub db: Vec<DbEntry>,
    /// For projected databases: the parent-database entry each record was
    /// derived from.
    pub entries_prev_indices: Option<Vec<usize>>,
    /// Number of distinct supporting entities.
    pub support: usize,
    /// Closed mining only: primitive finish representations still awaited by
    /// the pattern.
    pub pre_matched: Option<Vec<String>>,
}

impl SequenceDB {
    pub fn initial(db: Vec<DbEntry>) -> Self {
        SequenceDB {
            db,
            entries_prev_indices: None,
            support: 0,
            pre_matched: None,
        }
    }

    /// Rewrites the initial database after tiep-index pruning: drops every
    /// tiep whose representation was pruned, unlinks emptied coincidences,
    /// renumbers the survivors to stay contiguous and clears the meet flag
    /// of a coincidence whose immediate predecessor was just deleted.
    pub fn filter_infrequent_tieps(&mut self, index: &TiepIndex) {
        for entry in &mut self.db {
            let mut current = entry.seq.first_co.clone();
            let mut previous: Option<CoRef> = None;
            let mut removed_coincidences = 0usize;
            let mut removed_recent = false;

            while let Some(co) = current {
                let (next, now_empty) = {
                    let mut c = co.borrow_mut();
                    c.tieps.retain(|tiep| index.contains(&tiep.primitive_rep));
                    (c.next.clone(), c.tieps.is_empty())
                };

                if now_empty {
                    removed_coincidences += 1;
                    removed_recent = true;
                    if let Some(prev) = &previous {
                        prev.borrow_mut().next = next.clone();
                    }
                } else {
                    {
                        let mut c = co.borrow_mut();
                        c.index -= removed_coincidences;
                        if removed_recent {
                            c.is_meet = false;
                        }
                    }
                    if previous.is_none() {
                        entry.seq.first_co = Some(Rc::clone(&co));
                    }
                    removed_recent = false;
                    previous = Some(co);
                }

                current = next;
            }
        }
    }
}
