pub mod coincidence;
pub mod pattern_instance;
pub mod rep;
pub mod sequence_db;
pub mod sti;
pub mod tiep;
pub mod tiep_index;
pub mod tiep_projector;

#[cfg(test)]
mod rep_test;
#[cfg(test)]
mod sti_tests;
#[cfg(test)]
mod tiep_index_test;

pub use coincidence::{CoRef, Coincidence, CoincidenceSequence};
pub use pattern_instance::PatternInstance;
pub use sequence_db::{DbEntry, SequenceDB};
pub use sti::{Sti, StiRef};
pub use tiep::{Tiep, TiepKind, TiepRef};
pub use tiep_index::{MasterTiep, TiepIndex};
pub use tiep_projector::TiepProjector;
