use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::engine::core::coincidence::{CoRef, Coincidence};
use crate::engine::core::rep::{FINISH_REP, START_REP};
use crate::engine::core::sti::StiRef;

pub type TiepRef = Rc<Tiep>;

/// Whether a tiep marks the start or the finish of its interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiepKind {
    Start,
    Finish,
}

impl TiepKind {
    pub fn rep(self) -> char {
        match self {
            TiepKind::Start => START_REP,
            TiepKind::Finish => FINISH_REP,
        }
    }
}

/// A time-interval end-point.
///
/// Original tieps are built once by the sequence builder and live for the
/// whole run. Shadow copies (see [`Tiep::shadow_of`]) live inside partially
/// projected coincidences and point back at their original.
#[derive(Debug)]
pub struct Tiep {
    pub time: i64,
    pub sti: StiRef,
    pub kind: TiepKind,
    pub symbol: u32,
    /// `"{symbol}+"` or `"{symbol}-"`, precomputed once.
    pub primitive_rep: String,
    /// Back-link to the coincidence holding this tiep. Non-owning.
    pub coincidence: Weak<RefCell<Coincidence>>,
    /// For a shadow copy: the original tiep it was derived from.
    pub orig: Option<TiepRef>,
    /// Position within the entity's list of tieps sharing `primitive_rep`.
    pub entity_tiep_index: Cell<usize>,
}

impl Tiep {
    pub fn new(time: i64, sti: StiRef, kind: TiepKind, coincidence: Weak<RefCell<Coincidence>>) -> TiepRef {
        let symbol = sti.symbol;
        Rc::new(Tiep {
            time,
            sti,
            kind,
            symbol,
            primitive_rep: format!("{symbol}{}", kind.rep()),
            coincidence,
            orig: None,
            entity_tiep_index: Cell::new(usize::MAX),
        })
    }

    /// Shallow copy for a partially projected coincidence. Shares the STI,
    /// keeps the original's coincidence link and entity index, and records
    /// the original itself.
    pub fn shadow_of(original: &TiepRef) -> TiepRef {
        Rc::new(Tiep {
            time: original.time,
            sti: Rc::clone(&original.sti),
            kind: original.kind,
            symbol: original.symbol,
            primitive_rep: original.primitive_rep.clone(),
            coincidence: original.coincidence.clone(),
            orig: Some(Rc::clone(original)),
            entity_tiep_index: Cell::new(original.entity_tiep_index.get()),
        })
    }

    pub fn is_start(&self) -> bool {
        self.kind == TiepKind::Start
    }

    pub fn is_finish(&self) -> bool {
        self.kind == TiepKind::Finish
    }

    /// The coincidence this tiep was built into. Original tieps never
    /// outlive their sequence, so the upgrade cannot fail for them.
    pub fn coincidence(&self) -> CoRef {
        self.coincidence
            .upgrade()
            .expect("tiep outlived its coincidence")
    }
}
