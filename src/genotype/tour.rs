//! The travelling salesman specialisation of [Genotype].
use super::Genotype;
use crate::chromosome::Gene;
use crate::fitness::FitnessValue;
use crate::rng::WorkerRng;
use fixedbitset::FixedBitSet;
use itertools::Itertools;
use std::fmt;
use thiserror::Error;

/// Mutation rates are expressed as events per `2^20` trials; draws are
/// compared against the rate under this mask.
pub const MUTATION_RATE_MASK: u32 = 0xF_FFFF;

/// An immutable 2D coordinate.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum GenotypeError {
    #[error("TourGenotype requires at least two nodes")]
    TooFewNodes,
}

/// A closed tour over a fixed node list.
///
/// Chromosomes are permutations of `{0, .., N-1}`; the fitness is the sum of
/// rounded Euclidean edge lengths including the wrap-around edge, lower is
/// better. Crossover is an order-preserving half-copy; mutation applies
/// neighbour-biased 2-swaps and 3-cycles at a rate of `mutation_rate`
/// events per `2^20` trials.
#[derive(Clone, Debug)]
pub struct TourGenotype {
    nodes: Vec<Node>,
}

impl TourGenotype {
    pub fn new(nodes: Vec<Node>) -> Result<Self, GenotypeError> {
        if nodes.len() < 2 {
            Err(GenotypeError::TooFewNodes)
        } else {
            Ok(Self { nodes })
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Rounded Euclidean distance between two nodes.
    pub fn distance(&self, a: Gene, b: Gene) -> FitnessValue {
        let (a, b) = (self.nodes[a as usize], self.nodes[b as usize]);
        let dx = a.x - b.x;
        let dy = a.y - b.y;
        (dx * dx + dy * dy).sqrt().round() as FitnessValue
    }
}

impl Genotype for TourGenotype {
    fn genes_size(&self) -> usize {
        self.nodes.len()
    }

    /// Uniformly random permutation. Iterating `j` from N down to 1, draw
    /// `r = rand() % j` and write the `r`-th unmarked node index into gene
    /// slot `j-1`. The draw order is fixed, it is part of the
    /// reproducibility contract.
    fn seed_genes(&self, genes: &mut [Gene], marks: &mut FixedBitSet, rng: &mut WorkerRng) {
        marks.clear();
        for j in (1..=genes.len()).rev() {
            let mut r = rng.index(j);
            let mut l = 0;
            while marks.contains(l) || r > 0 {
                if !marks.contains(l) && r > 0 {
                    r -= 1;
                }
                l += 1;
            }
            genes[j - 1] = l as Gene;
            marks.insert(l);
        }
    }

    fn fitness(&self, genes: &[Gene]) -> FitnessValue {
        genes
            .iter()
            .copied()
            .circular_tuple_windows()
            .map(|(a, b)| self.distance(a, b))
            .sum()
    }

    /// Order-preserving half-copy: a contiguous half of the father starting
    /// at a random offset, then the remaining node ids in mother order.
    /// Parents agreeing on at least 95% of positions get the child mutated
    /// at twenty times the configured rate, a local-diversity injection.
    fn crossover(
        &self,
        father: &[Gene],
        mother: &[Gene],
        child: &mut [Gene],
        marks: &mut FixedBitSet,
        mutation_rate: u32,
        rng: &mut WorkerRng,
    ) {
        let genes_size = father.len();
        let half = genes_size / 2;
        let start = rng.index(half);

        marks.clear();
        for i in 0..half {
            let gene = father[start + i];
            child[i] = gene;
            marks.insert(gene as usize);
        }
        let mut fill = half;
        for &gene in mother {
            if marks.contains(gene as usize) {
                continue;
            }
            child[fill] = gene;
            fill += 1;
        }

        let diff = father
            .iter()
            .zip(mother)
            .filter(|(a, b)| a != b)
            .count();
        if diff <= genes_size / 20 {
            self.mutate(child, mutation_rate.wrapping_mul(20), rng);
        }
    }

    /// Draw-while-below-threshold swap loop. Each pass picks an index, a
    /// partner which is the right neighbour with probability ~3/4 and
    /// uniform otherwise, then performs a 2-swap (10 times in 16) or a
    /// 3-cycle with a third uniform index. The raw draw that chose the
    /// partner doubles as the next continue check, yielding a geometric
    /// number of mutations of mean ~`rate / 2^20`.
    fn mutate(&self, genes: &mut [Gene], mutation_rate: u32, rng: &mut WorkerRng) -> usize {
        let genes_size = genes.len();
        let rate = mutation_rate & MUTATION_RATE_MASK;
        let neighbour_rate = 3 * rate / 4 + 1;
        let mut mutations = 0;

        let mut draw = rng.next_long();
        while (draw & MUTATION_RATE_MASK) < rate {
            let entry_draw = draw;
            draw = rng.next_long();
            let i = draw as usize % genes_size;
            let aux = genes[i];
            draw = rng.next_long();

            let j = if (entry_draw & MUTATION_RATE_MASK) < neighbour_rate {
                (i + 1) % genes_size
            } else {
                draw as usize % genes_size
            };

            if (draw & 0xF) < 0xA {
                genes[i] = genes[j];
                genes[j] = aux;
            } else {
                draw = rng.next_long();
                let k = draw as usize % genes_size;
                genes[i] = genes[j];
                genes[j] = genes[k];
                genes[k] = aux;
            }
            mutations += 1;
        }
        mutations
    }
}

impl fmt::Display for TourGenotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "genotype:")?;
        writeln!(f, "  nodes: {}", self.nodes.len())
    }
}
