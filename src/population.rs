//! The population: an ordered array of individuals over the gene arena.
//!
//! The population owns the [GeneArena] and the [Individual] metadata array.
//! All evolutionary operators work on an [Island] view, a borrowed pair of
//! (member slice, arena row range). The whole population is itself one such
//! view, and [Population::split_islands] hands out pairwise disjoint views
//! for the parallel path: no locks are needed because the write sets are
//! statically disjoint.
use crate::chromosome::{ArenaView, Gene, GeneArena};
use crate::fitness::{FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use crate::individual::Individual;
use crate::rng::WorkerRng;
use fixedbitset::FixedBitSet;
use log::warn;
use std::cmp::Reverse;

#[derive(Clone, Debug)]
pub struct Population {
    pub individuals: Vec<Individual>,
    arena: GeneArena,
}

impl Population {
    /// Allocate the arena once and seed every individual with the genotype
    /// initialiser. Individual `i` is bound to arena row `i`.
    pub fn new<G: Genotype>(size: usize, genotype: &G, rng: &mut WorkerRng) -> Self {
        let genes_size = genotype.genes_size();
        let mut arena = GeneArena::new(size, genes_size);
        let individuals: Vec<Individual> = (0..size).map(Individual::new).collect();
        let mut marks = FixedBitSet::with_capacity(genes_size);
        {
            let mut view = arena.view();
            for row in 0..size {
                genotype.seed_genes(view.row_mut(row), &mut marks, rng);
            }
        }
        Self { individuals, arena }
    }

    pub fn size(&self) -> usize {
        self.individuals.len()
    }

    pub fn genes_size(&self) -> usize {
        self.arena.genes_size()
    }

    /// Genes of the individual at `index` (population order, not row order).
    pub fn genes_of(&self, index: usize) -> &[Gene] {
        self.arena.row(self.individuals[index].row)
    }

    /// Overwrite the chromosome of the individual at `index`, invalidating
    /// its fitness cache.
    pub fn set_genes_of(&mut self, index: usize, genes: &[Gene]) {
        let row = self.individuals[index].row;
        self.arena.view().row_mut(row).copy_from_slice(genes);
        self.individuals[index].taint_fitness_score();
    }

    /// The whole population as a single island.
    pub fn as_island(&mut self) -> Island<'_> {
        Island {
            id: 0,
            members: &mut self.individuals,
            arena: self.arena.view(),
        }
    }

    /// Split into disjoint islands along `bounds` (length T+1 covering
    /// `[0, size)`). Members of island t must be bound to rows within
    /// `[bounds[t], bounds[t+1])`; see [Population::rebind_rows].
    pub fn split_islands(&mut self, bounds: &[usize]) -> Vec<Island<'_>> {
        let views = self.arena.split(bounds);
        let mut islands = Vec::with_capacity(views.len());
        let mut rest: &mut [Individual] = &mut self.individuals;
        for (id, view) in views.into_iter().enumerate() {
            let len = bounds[id + 1] - bounds[id];
            let (members, tail) = std::mem::take(&mut rest).split_at_mut(len);
            rest = tail;
            islands.push(Island {
                id,
                members,
                arena: view,
            });
        }
        islands
    }

    /// A single island view.
    pub fn island(&mut self, bounds: &[usize], index: usize) -> Island<'_> {
        self.split_islands(bounds).swap_remove(index)
    }

    /// Restore the identity row binding (`individuals[i].row == i`) by
    /// permuting arena rows in place. A whole-population generation may
    /// sort individuals across island boundaries; rebinding afterwards
    /// keeps the contiguous per-island arena split valid for the next
    /// parallel batch.
    pub fn rebind_rows(&mut self) {
        let genes_size = self.arena.genes_size();
        let size = self.individuals.len();
        let mut visited = FixedBitSet::with_capacity(size);
        let mut buffer: Vec<Gene> = vec![0; genes_size];
        let mut view = self.arena.view();

        for start in 0..size {
            if visited.contains(start) || self.individuals[start].row == start {
                visited.insert(start);
                continue;
            }
            // follow the cycle, pulling each row into its slot
            buffer.copy_from_slice(view.row(start));
            let mut slot = start;
            loop {
                let source = self.individuals[slot].row;
                visited.insert(slot);
                self.individuals[slot].row = slot;
                if source == start {
                    view.row_mut(slot).copy_from_slice(&buffer);
                    break;
                }
                view.copy_row(source, slot);
                slot = source;
            }
        }
    }

    /// Validate every chromosome as a permutation; regenerate broken ones
    /// from the initialiser. Returns the number of repaired individuals.
    pub fn verify_and_repair<G: Genotype>(&mut self, genotype: &G, rng: &mut WorkerRng) -> usize {
        let genes_size = self.arena.genes_size();
        let mut seen = FixedBitSet::with_capacity(genes_size);
        let mut marks = FixedBitSet::with_capacity(genes_size);
        let mut repaired = 0;
        let mut view = self.arena.view();

        for individual in self.individuals.iter_mut() {
            seen.clear();
            let genes = view.row(individual.row);
            let broken = genes.iter().any(|&gene| {
                let gene = gene as usize;
                gene >= genes_size || seen.put(gene)
            });
            if broken {
                genotype.seed_genes(view.row_mut(individual.row), &mut marks, rng);
                individual.taint_fitness_score();
                repaired += 1;
            }
        }
        if repaired > 0 {
            warn!("repaired {} invalid chromosomes", repaired);
        }
        repaired
    }

}

/// A contiguous half-open sub-population bound to one worker.
///
/// Holds the member metadata slice and the matching arena row range. All
/// gene access goes through this view, which resolves each member's row
/// binding and keeps parent/child borrows disjoint.
#[derive(Debug)]
pub struct Island<'a> {
    pub id: usize,
    pub members: &'a mut [Individual],
    arena: ArenaView<'a>,
}

impl<'a> Island<'a> {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn genes(&self, index: usize) -> &[Gene] {
        self.arena.row(self.members[index].row)
    }

    /// Fitness of member `index`, honouring the cache: return the cached
    /// value when present, otherwise compute, store and return it.
    pub fn fitness<G: Genotype>(&mut self, index: usize, genotype: &G) -> FitnessValue {
        if let Some(fitness_score) = self.members[index].fitness_score() {
            return fitness_score;
        }
        let fitness_score = genotype.fitness(self.arena.row(self.members[index].row));
        self.members[index].set_fitness_score(Some(fitness_score));
        fitness_score
    }

    pub fn fitness_all<G: Genotype>(&mut self, genotype: &G) {
        for index in 0..self.members.len() {
            self.fitness(index, genotype);
        }
    }

    /// Mutate member `index` in place, invalidating its fitness cache when
    /// at least one mutation fired.
    pub fn mutate<G: Genotype>(
        &mut self,
        index: usize,
        genotype: &G,
        mutation_rate: u32,
        rng: &mut WorkerRng,
    ) {
        let genes = self.arena.row_mut(self.members[index].row);
        if genotype.mutate(genes, mutation_rate, rng) > 0 {
            self.members[index].taint_fitness_score();
        }
    }

    /// Produce a child in the slot of member `child` from members `father`
    /// and `mother`. The parents may be equal; either parent may even be
    /// the child slot itself (a tournament group with uniform fitness), in
    /// which case the aliased parent is copied aside first. The child's
    /// fitness cache is always invalidated.
    #[allow(clippy::too_many_arguments)]
    pub fn crossover<G: Genotype>(
        &mut self,
        father: usize,
        mother: usize,
        child: usize,
        genotype: &G,
        marks: &mut FixedBitSet,
        parent_buffer: &mut Vec<Gene>,
        mutation_rate: u32,
        rng: &mut WorkerRng,
    ) {
        let father_row = self.members[father].row;
        let mother_row = self.members[mother].row;
        let child_row = self.members[child].row;

        if father_row == child_row {
            parent_buffer.clear();
            parent_buffer.extend_from_slice(self.arena.row(father_row));
            if mother_row == child_row {
                let child_genes = self.arena.row_mut(child_row);
                genotype.crossover(
                    parent_buffer.as_slice(),
                    parent_buffer.as_slice(),
                    child_genes,
                    marks,
                    mutation_rate,
                    rng,
                );
            } else {
                let (mother_genes, child_genes) = self.arena.row_pair_mut(mother_row, child_row);
                genotype.crossover(
                    parent_buffer.as_slice(),
                    mother_genes,
                    child_genes,
                    marks,
                    mutation_rate,
                    rng,
                );
            }
        } else if mother_row == child_row {
            parent_buffer.clear();
            parent_buffer.extend_from_slice(self.arena.row(mother_row));
            let (father_genes, child_genes) = self.arena.row_pair_mut(father_row, child_row);
            genotype.crossover(
                father_genes,
                parent_buffer.as_slice(),
                child_genes,
                marks,
                mutation_rate,
                rng,
            );
        } else {
            let (father_genes, mother_genes, child_genes) =
                self.arena.parents_and_child(father_row, mother_row, child_row);
            genotype.crossover(father_genes, mother_genes, child_genes, marks, mutation_rate, rng);
        }
        self.members[child].taint_fitness_score();
    }

    /// Replace member `target` with a copy of member `source`: gene copy
    /// over the arena slice plus a value-copy of fitness and generation.
    /// The copy is a plain replacement, never elite and never dead.
    pub fn clone_into(&mut self, source: usize, target: usize) {
        self.arena
            .copy_row(self.members[source].row, self.members[target].row);
        self.members[target].fitness_score = self.members[source].fitness_score;
        self.members[target].generation = self.members[source].generation;
        self.members[target].dead = false;
        self.members[target].elite = false;
    }

    /// Sort members by fitness, fittest first per the ordering. Unevaluated
    /// members sort last.
    pub fn sort_by_fitness(&mut self, fitness_ordering: FitnessOrdering) {
        match fitness_ordering {
            FitnessOrdering::Maximize => self.members.sort_unstable_by_key(|individual| {
                Reverse(individual.fitness_score().unwrap_or(FitnessValue::MIN))
            }),
            FitnessOrdering::Minimize => self.members.sort_unstable_by_key(|individual| {
                individual.fitness_score().unwrap_or(FitnessValue::MAX)
            }),
        }
    }

    pub fn increment_generation(&mut self) {
        for individual in self.members.iter_mut() {
            individual.generation += 1;
        }
    }

    pub fn generation(&self) -> u32 {
        self.members.first().map_or(0, |individual| individual.generation)
    }
}
