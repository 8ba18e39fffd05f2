//! The problem adapter (the search space).
//!
//! A [Genotype] bundles the problem data with the gene-level capability set
//! the engine needs: seeding, fitness, crossover and mutation. Operators and
//! the engine are written against this trait, so nothing in the evolutionary
//! loop knows it is solving a travelling salesman problem.
//!
//! See [TourGenotype](crate::genotype::TourGenotype) for the TSP
//! specialisation.
pub mod tour;

pub use self::tour::{Node, TourGenotype};

use crate::chromosome::Gene;
use crate::fitness::FitnessValue;
use crate::rng::WorkerRng;
use fixedbitset::FixedBitSet;

/// The capability set of a problem: initialise, evaluate, cross, mutate.
///
/// All methods work on plain gene slices; caching and bookkeeping of
/// metadata stay with the caller. `marks` buffers are caller-owned scratch
/// of `genes_size` bits, so per-call allocations stay out of the hot loop.
pub trait Genotype: Clone + Send + Sync + std::fmt::Debug {
    fn genes_size(&self) -> usize;

    /// Fill `genes` with a fresh random solution.
    fn seed_genes(&self, genes: &mut [Gene], marks: &mut FixedBitSet, rng: &mut WorkerRng);

    /// Evaluate a solution. Pure, the caller owns the cache.
    fn fitness(&self, genes: &[Gene]) -> FitnessValue;

    /// Produce a child from two parents into `child`. The parents may be the
    /// same slice; the child buffer is always distinct.
    fn crossover(
        &self,
        father: &[Gene],
        mother: &[Gene],
        child: &mut [Gene],
        marks: &mut FixedBitSet,
        mutation_rate: u32,
        rng: &mut WorkerRng,
    );

    /// Mutate a solution in place, returns the number of applied mutations.
    fn mutate(&self, genes: &mut [Gene], mutation_rate: u32, rng: &mut WorkerRng) -> usize;
}
