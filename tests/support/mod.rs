#[allow(unused_imports)]
pub use tsp_islands::chromosome::Gene;
#[allow(unused_imports)]
pub use tsp_islands::genotype::{Genotype, Node, TourGenotype};
#[allow(unused_imports)]
pub use tsp_islands::population::Population;
#[allow(unused_imports)]
pub use tsp_islands::rng::WorkerRng;

use std::collections::HashSet;

/// The four corners of a unit square; every closed tour has length 4.
#[allow(dead_code)]
pub fn square_genotype() -> TourGenotype {
    TourGenotype::new(vec![
        Node { x: 0.0, y: 0.0 },
        Node { x: 0.0, y: 1.0 },
        Node { x: 1.0, y: 1.0 },
        Node { x: 1.0, y: 0.0 },
    ])
    .unwrap()
}

/// `size` nodes on a line with unit spacing; the optimal closed tour is
/// out-and-back with length `2 * (size - 1)`.
#[allow(dead_code)]
pub fn line_genotype(size: usize) -> TourGenotype {
    TourGenotype::new(
        (0..size)
            .map(|i| Node {
                x: i as f64,
                y: 0.0,
            })
            .collect(),
    )
    .unwrap()
}

#[allow(dead_code)]
pub fn rng(seed: u64) -> WorkerRng {
    WorkerRng::from_master(seed, 0)
}

#[allow(dead_code)]
pub fn is_permutation(genes: &[Gene]) -> bool {
    let seen: HashSet<Gene> = genes.iter().copied().collect();
    seen.len() == genes.len() && genes.iter().all(|&gene| (gene as usize) < genes.len())
}

#[allow(dead_code)]
pub fn population_genes(population: &Population) -> Vec<Vec<Gene>> {
    (0..population.size())
        .map(|index| population.genes_of(index).to_vec())
        .collect()
}
