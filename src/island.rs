//! Island coordination: partitioning and the parallel batch.
//!
//! The population is partitioned into contiguous near-equal index ranges,
//! one per worker. Workers evolve their range independently; because the
//! [Island](crate::population::Island) views are pairwise disjoint and the
//! problem data is immutable, the parallel path needs no locks. That the
//! write sets stay statically disjoint is the central concurrency invariant
//! of the whole engine.
use crate::evolve::{next_generation, EvolveConfig};
use crate::genotype::Genotype;
use crate::population::Population;
use crate::rng::WorkerRng;
use crate::select::Scratch;
use log::debug;
use rayon::prelude::*;

/// Half-open island ranges as a `T+1` bounds vector covering `[0, size)`.
/// Every island gets `size / T` members, the last also takes the remainder.
pub fn island_bounds(population_size: usize, num_islands: usize) -> Vec<usize> {
    let num_islands = num_islands.max(1);
    let mut bounds = Vec::with_capacity(num_islands + 1);
    let mut low = 0;
    bounds.push(low);
    for _ in 0..num_islands - 1 {
        low += population_size / num_islands;
        bounds.push(low);
    }
    bounds.push(population_size);
    bounds
}

/// Evolve every island for `generations` epochs in parallel. Worker `t`
/// operates only on island `t` and draws only from `rngs[t]`.
pub fn evolve_islands<G: Genotype>(
    population: &mut Population,
    bounds: &[usize],
    genotype: &G,
    config: &EvolveConfig,
    generations: u32,
    rngs: &mut [WorkerRng],
) {
    if generations == 0 || population.size() == 0 {
        return;
    }
    debug!(
        "dispatching {} generation(s) to {} island(s)",
        generations,
        bounds.len() - 1
    );
    let genes_size = population.genes_size();
    let islands = population.split_islands(bounds);
    islands
        .into_par_iter()
        .zip(rngs.par_iter_mut())
        .for_each(|(mut island, rng)| {
            let mut scratch = Scratch::new(genes_size);
            for _ in 0..generations {
                next_generation(&mut island, genotype, config, &mut scratch, rng);
            }
        });
}
