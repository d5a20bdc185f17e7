use indexmap::IndexMap;
use std::rc::Rc;

/// Projection guide for one candidate extension tiep: which records of the
/// current database survive the extension, and the earliest legal occurrence
/// index within each.
#[derive(Debug, Default)]
pub struct TiepProjector {
    pub supporting_entities: Vec<Rc<str>>,
    /// Database entry index → first allowable occurrence index in that
    /// entity's occurrence list. Insertion order is projection order.
    pub first_indices: IndexMap<usize, usize>,
}

impl TiepProjector {
    pub fn support(&self) -> usize {
        self.supporting_entities.len()
    }
}
