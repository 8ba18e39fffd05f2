use crate::fitness::FitnessOrdering;
use crate::genotype::Genotype;
use crate::population::Island;

/// Truncation selection with elitism.
///
/// Evaluates every member, sorts the slice with the fittest first, then
/// marks the weakest `percent_dead` percent as dead and, when `percent_elite`
/// is positive, the fittest `percent_elite` percent as elite. The survivors
/// occupy a prefix and the dead a suffix afterwards. This approach has the
/// risk of locking in to a local optimum, which is what the mutation of
/// non-elite survivors during replacement counters.
#[derive(Clone, Debug)]
pub struct Truncation {
    pub percent_dead: usize,
    pub percent_elite: usize,
}

impl Truncation {
    pub fn new(percent_dead: usize, percent_elite: usize) -> Self {
        Self {
            percent_dead,
            percent_elite,
        }
    }

    pub fn call<G: Genotype>(
        &self,
        island: &mut Island<'_>,
        genotype: &G,
        fitness_ordering: FitnessOrdering,
    ) {
        if island.is_empty() {
            return;
        }
        island.fitness_all(genotype);
        island.sort_by_fitness(fitness_ordering);

        let size = island.len();
        let dead_count = (size * self.percent_dead / 100).min(size);
        for (index, member) in island.members.iter_mut().enumerate() {
            member.dead = index >= size - dead_count;
        }

        if self.percent_elite > 0 {
            let elite_count = (size * self.percent_elite / 100).min(size);
            for member in island.members[..elite_count].iter_mut() {
                member.elite = true;
            }
            let survivor_end = size - dead_count;
            if elite_count < survivor_end {
                for member in island.members[elite_count..survivor_end].iter_mut() {
                    member.elite = false;
                }
            }
        }
    }
}
