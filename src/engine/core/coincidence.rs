use std::cell::RefCell;
use std::rc::Rc;

use crate::engine::core::tiep::{TiepKind, TiepRef};

pub type CoRef = Rc<RefCell<Coincidence>>;

/// A group of same-kind tieps occurring at one time-point in one entity.
///
/// Coincidences form a singly linked chain per entity. Projection allocates
/// fresh partial (`is_co`) nodes whose `next` aliases the remainder of the
/// parent chain; everything downstream is shared, never copied.
#[derive(Debug)]
pub struct Coincidence {
    /// Position within the chain. Monotonic along `next`; rewritten only by
    /// initial-database pruning.
    pub index: usize,
    /// Start coincidence at the same instant as the preceding finish
    /// coincidence (an Allen "meet").
    pub is_meet: bool,
    /// Fragment left over after projection consumed one of the tieps.
    pub is_co: bool,
    pub tieps: Vec<TiepRef>,
    pub next: Option<CoRef>,
}

impl Coincidence {
    pub fn new(index: usize, is_meet: bool) -> CoRef {
        Rc::new(RefCell::new(Coincidence {
            index,
            is_meet,
            is_co: false,
            tieps: Vec::new(),
            next: None,
        }))
    }

    /// A fresh partially-projected coincidence at the given chain index.
    pub fn new_partial(index: usize) -> CoRef {
        Rc::new(RefCell::new(Coincidence {
            index,
            is_meet: false,
            is_co: true,
            tieps: Vec::new(),
            next: None,
        }))
    }

    /// All tieps of a coincidence share one kind; the first one decides.
    pub fn kind(&self) -> TiepKind {
        self.tieps[0].kind
    }
}

/// Per-entity ordered chain of coincidences.
#[derive(Debug, Clone)]
pub struct CoincidenceSequence {
    pub entity: Rc<str>,
    pub first_co: Option<CoRef>,
    /// When set, the first coincidence is a partial one produced by the last
    /// projection, starting the sequence at the projecting tiep's
    /// coincidence index.
    pub partial_co: Option<CoRef>,
}
