use crate::engine::core::{SequenceDB, TiepIndex};
use crate::engine::input::builder;
use crate::engine::input::reader::EntityStis;
use crate::engine::mining::miner;
use crate::engine::output::tirp_writer::MemorySink;

/// Builds tiep indexes and initial sequence databases for tests without
/// touching the filesystem.
pub struct SeqDbFactory {
    entities: Vec<EntityStis>,
}

impl SeqDbFactory {
    pub fn new() -> Self {
        SeqDbFactory {
            entities: Vec::new(),
        }
    }

    /// Adds an entity with its `(start, finish, symbol)` intervals.
    pub fn entity(mut self, id: &str, stis: &[(i64, i64, u32)]) -> Self {
        self.entities.push(EntityStis {
            entity_id: id.to_string(),
            stis: stis.to_vec(),
        });
        self
    }

    pub fn build(self) -> (TiepIndex, SequenceDB) {
        let mut index = TiepIndex::new();
        let seq_db = builder::build_initial_seq_db(self.entities, &mut index);
        (index, seq_db)
    }

    /// Runs a full discovery over the built database and returns the output
    /// lines in emission order.
    pub fn mine(self, min_support: usize, maximal_gap: i64, closed: bool) -> Vec<String> {
        let (mut index, mut seq_db) = self.build();
        let mut sink = MemorySink::default();
        miner::discover_tirps(
            &mut index,
            &mut seq_db,
            min_support,
            maximal_gap,
            &mut sink,
            closed,
        )
        .expect("in-memory sink cannot fail");
        sink.lines
    }
}
