use super::Scratch;
use crate::fitness::{FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use crate::population::Island;
use crate::rng::WorkerRng;

/// K-way tournament selection with in-place offspring placement.
///
/// Each round holds two back-to-back tournaments of `tournament_size`
/// distinct live members; the winner of each is a parent and the last-place
/// loser becomes the slot its offspring is written into. Members are marked
/// dead as they are drawn, so nobody plays in more than one tournament per
/// epoch and offspring placed into loser slots do not participate in the
/// current epoch either. Lower `tournament_size` means more members get
/// replaced per generation, higher means weak members win less often. The
/// strongest member is likely preserved because it can only appear as a
/// parent, never as a loser.
#[derive(Clone, Debug)]
pub struct Tournament {
    pub tournament_size: usize,
}

impl Tournament {
    pub fn new(tournament_size: usize) -> Self {
        Self { tournament_size }
    }

    /// One full epoch over the island: selection, reproduction and the
    /// generation bump, fused. Returns the new generation number.
    pub fn call<G: Genotype>(
        &self,
        island: &mut Island<'_>,
        genotype: &G,
        fitness_ordering: FitnessOrdering,
        mutation_rate: u32,
        scratch: &mut Scratch,
        rng: &mut WorkerRng,
    ) -> u32 {
        if island.is_empty() {
            return 0;
        }
        for member in island.members.iter_mut() {
            member.dead = false;
        }
        let tournament_size = self.tournament_size.max(2);
        let rounds = island.len() / (tournament_size * 2);

        for _ in 0..rounds {
            let (parent_one, loser_one) =
                self.hold_tournament(island, genotype, fitness_ordering, tournament_size, scratch, rng);
            let (parent_two, loser_two) =
                self.hold_tournament(island, genotype, fitness_ordering, tournament_size, scratch, rng);

            island.crossover(
                parent_one,
                parent_two,
                loser_one,
                genotype,
                &mut scratch.marks,
                &mut scratch.parent_buffer,
                mutation_rate,
                rng,
            );
            island.mutate(loser_one, genotype, mutation_rate, rng);
            island.fitness(loser_one, genotype);

            island.crossover(
                parent_two,
                parent_one,
                loser_two,
                genotype,
                &mut scratch.marks,
                &mut scratch.parent_buffer,
                mutation_rate,
                rng,
            );
            island.mutate(loser_two, genotype, mutation_rate, rng);
            island.fitness(loser_two, genotype);
        }

        island.increment_generation();
        island.generation()
    }

    /// Draw `tournament_size` distinct live members (linear-probing from a
    /// random start, marking them dead), evaluate them and return
    /// (winner, last-place loser) per the fitness ordering.
    fn hold_tournament<G: Genotype>(
        &self,
        island: &mut Island<'_>,
        genotype: &G,
        fitness_ordering: FitnessOrdering,
        tournament_size: usize,
        scratch: &mut Scratch,
        rng: &mut WorkerRng,
    ) -> (usize, usize) {
        let size = island.len();
        scratch.contestants.clear();
        for _ in 0..tournament_size {
            let mut pot = rng.index(size);
            while island.members[pot].dead {
                pot = (pot + 1) % size;
            }
            island.members[pot].dead = true;
            scratch.contestants.push(pot);
        }

        let mut winner = scratch.contestants[0];
        let mut loser = winner;
        let mut winning_fitness: FitnessValue = island.fitness(winner, genotype);
        let mut losing_fitness = winning_fitness;

        for position in 1..tournament_size {
            let contestant = scratch.contestants[position];
            let fitness = island.fitness(contestant, genotype);
            match fitness_ordering {
                FitnessOrdering::Minimize => {
                    if fitness < winning_fitness {
                        winning_fitness = fitness;
                        winner = contestant;
                    }
                    if fitness > losing_fitness {
                        losing_fitness = fitness;
                        loser = contestant;
                    }
                }
                FitnessOrdering::Maximize => {
                    if fitness > winning_fitness {
                        winning_fitness = fitness;
                        winner = contestant;
                    }
                    if fitness < losing_fitness {
                        losing_fitness = fitness;
                        loser = contestant;
                    }
                }
            }
        }
        (winner, loser)
    }
}
