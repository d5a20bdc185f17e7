use std::io;

use tracing::debug;

use crate::engine::core::rep;
use crate::engine::core::{SequenceDB, TiepIndex};
use crate::engine::mining::candidates::{self, Projectors};
use crate::engine::mining::closure::{self, BeTiepsLists};
use crate::engine::mining::projection;
use crate::engine::output::tirp_writer::TirpSink;

/// Discovers every frequent (or closed-frequent) TIRP in the database.
///
/// Prunes infrequent primitives from the index and the initial database
/// first, then walks every surviving start tiep depth-first, emitting each
/// balanced pattern through the sink exactly once.
pub fn discover_tirps<S: TirpSink>(
    index: &mut TiepIndex,
    initial_seq_db: &mut SequenceDB,
    min_support: usize,
    maximal_gap: i64,
    sink: &mut S,
    closed: bool,
) -> io::Result<()> {
    index.prune_infrequent(min_support);
    initial_seq_db.filter_infrequent_tieps(index);
    let index = &*index;

    let miner = Miner {
        index,
        min_support,
        maximal_gap,
        closed,
    };

    for (tiep, master_tiep) in &index.master_tieps {
        if !rep::is_start_rep(tiep) {
            continue;
        }
        debug!(
            target: "tirpclo::mining",
            tiep = %tiep,
            support = master_tiep.support(),
            "Projecting start tiep"
        );

        let initial = projection::project_initial_seq_db(
            initial_seq_db,
            tiep,
            &master_tiep.supporting_entities,
            index,
            maximal_gap,
            closed,
        );
        if closed && !initial.may_be_closed {
            continue;
        }
        miner.extend_tirp(&initial.seq_db, tiep, None, initial.be_tieps_lists.as_ref(), sink)?;
    }

    Ok(())
}

/// Mining parameters shared by every recursion frame.
struct Miner<'a> {
    index: &'a TiepIndex,
    min_support: usize,
    maximal_gap: i64,
    closed: bool,
}

impl Miner<'_> {
    /// Recursively extends the pattern represented by `pattern_seq_db` with
    /// every frequent candidate tiep.
    fn extend_tirp<S: TirpSink>(
        &self,
        pattern_seq_db: &SequenceDB,
        pattern_last_tiep: &str,
        previous_projectors: Option<&Projectors>,
        be_tieps_lists: Option<&BeTiepsLists>,
        sink: &mut S,
    ) -> io::Result<()> {
        let projectors = candidates::get_tiep_projectors(
            pattern_seq_db,
            pattern_last_tiep,
            previous_projectors,
            self.index,
            self.min_support,
            self.maximal_gap,
        );

        if all_in_pairs(pattern_seq_db) {
            let emit = !self.closed
                || closure::may_tirp_be_closed(
                    pattern_seq_db,
                    &projectors,
                    be_tieps_lists.expect("closed mining carries BE tieps"),
                );
            if emit {
                sink.emit(pattern_seq_db)?;
            }
        }

        for (tiep, projector) in &projectors {
            if projector.support() < self.min_support {
                continue;
            }

            // A finish candidate that closes no pending start cannot keep
            // the pattern closable.
            if self.closed && rep::is_finish_rep(tiep) {
                let primitive = rep::base_form(tiep);
                let awaited = pattern_seq_db
                    .pre_matched
                    .as_ref()
                    .expect("closed mining tracks awaited finishes");
                if !awaited.iter().any(|awaited_rep| awaited_rep == primitive) {
                    continue;
                }
            }

            let projected = projection::project_projected_seq_db(
                pattern_seq_db,
                tiep,
                projector,
                self.index,
                self.maximal_gap,
                self.closed,
            );
            if projected.support < self.min_support {
                continue;
            }

            let mut current_be_tieps: Option<BeTiepsLists> = None;
            if self.closed {
                let (may_be_closed, lists) = closure::back_scan(&projected, self.maximal_gap);
                if !may_be_closed {
                    continue;
                }
                current_be_tieps = Some(lists);
            }

            self.extend_tirp(&projected, tiep, Some(&projectors), current_be_tieps.as_ref(), sink)?;
        }

        Ok(())
    }
}

/// A pattern is balanced, and therefore represents a TIRP, when no matched
/// start still awaits its finish.
fn all_in_pairs(pattern_seq_db: &SequenceDB) -> bool {
    pattern_seq_db.db[0].instance.pre_matched.is_empty()
}
