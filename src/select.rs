//! The selection phase operators.
//!
//! Two regimes are provided:
//! * [Truncation](crate::select::Truncation) sorts a slice by fitness and
//!   marks a dead suffix and an elite prefix; replacement happens in a
//!   separate pass (see
//!   [next_generation_truncation](crate::evolve::next_generation_truncation)).
//! * [Tournament](crate::select::Tournament) fuses selection and
//!   replacement: tournament losers are overwritten in place by offspring of
//!   the winners, so no extra offspring buffer is needed.
mod tournament;
mod truncation;

pub use self::tournament::Tournament;
pub use self::truncation::Truncation;

use crate::chromosome::Gene;
use fixedbitset::FixedBitSet;

/// Reusable per-worker operator workspace, allocated once per batch.
#[derive(Clone, Debug)]
pub struct Scratch {
    pub marks: FixedBitSet,
    pub parent_buffer: Vec<Gene>,
    pub contestants: Vec<usize>,
}

impl Scratch {
    pub fn new(genes_size: usize) -> Self {
        Self {
            marks: FixedBitSet::with_capacity(genes_size),
            parent_buffer: Vec::with_capacity(genes_size),
            contestants: Vec::new(),
        }
    }
}
