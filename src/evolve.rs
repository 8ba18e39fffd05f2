//! The evolution strategy: epoch drivers and the engine.
//!
//! One epoch advances an island (or the whole population) by a single
//! generation. Two variants exist:
//! * [next_generation_truncation]: truncation selection followed by a
//!   replacement pass over the dead suffix.
//! * [next_generation_tournament]: the fused tournament operator, selection
//!   and replacement in one sweep.
//!
//! The [Evolve] engine owns the problem, the configuration, the population
//! and the per-worker random streams, and drives the serial or island-model
//! run loop. See [EvolveBuilder] for initialization options.
use crate::chromosome::Gene;
use crate::fitness::{FitnessOrdering, FitnessValue};
use crate::genotype::Genotype;
use crate::island;
use crate::population::{Island, Population};
use crate::reporter::{Reporter, StatsLine};
use crate::rng::WorkerRng;
use crate::select::{Scratch, Tournament, Truncation};
use crate::stats;
use log::{debug, info};

/// The selection regime driving each generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    /// Truncation-with-elitism selection plus a replacement pass.
    Truncation,
    /// K-way tournament with in-place offspring placement.
    Tournament { tournament_size: usize },
}

/// Run parameters, grouped so operators need nothing beyond their inputs.
#[derive(Clone, Debug)]
pub struct EvolveConfig {
    pub population_size: usize,
    pub max_generations: u32,
    /// Generations between statistics reports. `-1` disables all output,
    /// `0` only reports after the final generation. In multi-island runs
    /// reports happen at every cross boundary instead.
    pub stats_interval: i32,
    /// Expected mutations per `2^20` gene trials.
    pub mutation_rate: u32,
    pub num_islands: usize,
    /// Generations between island crosses, `<= 0` means islands never
    /// exchange members.
    pub island_cross_interval: i32,
    pub percent_dead: usize,
    pub percent_elite: usize,
    /// Share of replacements produced by crossover rather than cloning.
    /// Consumed by the truncation path only, tournament mode ignores it.
    pub percent_cross: usize,
    pub strategy: Strategy,
    pub fitness_ordering: FitnessOrdering,
    pub seed: u64,
}

impl Default for EvolveConfig {
    fn default() -> Self {
        Self {
            population_size: 2500,
            max_generations: 3000,
            stats_interval: 100,
            mutation_rate: 1000,
            num_islands: 1,
            island_cross_interval: 0,
            percent_dead: 50,
            percent_elite: 5,
            percent_cross: 50,
            strategy: Strategy::Tournament { tournament_size: 4 },
            fitness_ordering: FitnessOrdering::Minimize,
            seed: 1,
        }
    }
}

/// Advance the island by one generation per the configured strategy.
/// Returns the new generation number.
pub fn next_generation<G: Genotype>(
    island: &mut Island<'_>,
    genotype: &G,
    config: &EvolveConfig,
    scratch: &mut Scratch,
    rng: &mut WorkerRng,
) -> u32 {
    match config.strategy {
        Strategy::Truncation => next_generation_truncation(island, genotype, config, scratch, rng),
        Strategy::Tournament { tournament_size } => {
            next_generation_tournament(island, genotype, config, tournament_size, scratch, rng)
        }
    }
}

/// Truncation epoch: select, then refill the dead suffix from the
/// survivors. While the cross budget (`size * percent_cross / 100`) lasts,
/// replacements are offspring of two random survivors; after that they are
/// clones of a random survivor. Every replacement is mutated, and so is
/// every non-elite survivor (diversity pressure on the surviving pool).
pub fn next_generation_truncation<G: Genotype>(
    island: &mut Island<'_>,
    genotype: &G,
    config: &EvolveConfig,
    scratch: &mut Scratch,
    rng: &mut WorkerRng,
) -> u32 {
    Truncation::new(config.percent_dead, config.percent_elite).call(
        island,
        genotype,
        config.fitness_ordering,
    );

    let size = island.len();
    if size == 0 {
        return 0;
    }
    let dead_count = (size * config.percent_dead / 100).min(size);
    let threshold = size - dead_count;
    if threshold == 0 {
        return island.generation();
    }

    let mut cross_budget = size * config.percent_cross / 100;
    for slot in threshold..size {
        if cross_budget > 0 {
            let father = rng.index(threshold);
            let mother = rng.index(threshold);
            island.crossover(
                father,
                mother,
                slot,
                genotype,
                &mut scratch.marks,
                &mut scratch.parent_buffer,
                config.mutation_rate,
                rng,
            );
            cross_budget -= 1;
        } else {
            let source = rng.index(threshold);
            island.clone_into(source, slot);
        }
        island.mutate(slot, genotype, config.mutation_rate, rng);
        island.members[slot].dead = false;
    }

    for index in 0..threshold {
        if !island.members[index].elite {
            island.mutate(index, genotype, config.mutation_rate, rng);
        }
    }

    island.increment_generation();
    island.generation()
}

/// Tournament epoch: selection and replacement are fused in one operator.
pub fn next_generation_tournament<G: Genotype>(
    island: &mut Island<'_>,
    genotype: &G,
    config: &EvolveConfig,
    tournament_size: usize,
    scratch: &mut Scratch,
    rng: &mut WorkerRng,
) -> u32 {
    Tournament::new(tournament_size).call(
        island,
        genotype,
        config.fitness_ordering,
        config.mutation_rate,
        scratch,
        rng,
    )
}

/// Error returned when the builder has invalid or missing configuration.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

/// The engine: problem, parameters, population and random streams.
///
/// ```
/// use tsp_islands::evolve::Evolve;
/// use tsp_islands::genotype::{Node, TourGenotype};
/// use tsp_islands::reporter::NoopReporter;
///
/// let genotype = TourGenotype::new(vec![
///     Node { x: 0.0, y: 0.0 },
///     Node { x: 0.0, y: 1.0 },
///     Node { x: 1.0, y: 1.0 },
///     Node { x: 1.0, y: 0.0 },
/// ])
/// .unwrap();
///
/// let mut evolve = Evolve::builder()
///     .with_genotype(genotype)
///     .with_population_size(50)
///     .with_max_generations(100)
///     .with_stats_interval(-1)
///     .build()
///     .unwrap();
///
/// let mut reporter = NoopReporter;
/// evolve.call(&mut reporter);
/// let (fitness, tour) = evolve.best_tour().unwrap();
/// assert_eq!(fitness, 4);
/// assert_eq!(tour.len(), 4);
/// ```
pub struct Evolve<G: Genotype> {
    pub genotype: G,
    pub config: EvolveConfig,
    pub population: Population,
    rngs: Vec<WorkerRng>,
    bounds: Vec<usize>,
    generation: u32,
}

impl<G: Genotype> Evolve<G> {
    pub fn builder() -> EvolveBuilder<G> {
        EvolveBuilder::new()
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Run the full configured number of generations.
    pub fn call<R: Reporter>(&mut self, reporter: &mut R) {
        info!(
            "evolving {} individuals on {} island(s) for {} generations",
            self.config.population_size, self.config.num_islands, self.config.max_generations
        );
        if self.config.num_islands <= 1 {
            self.call_serial(reporter);
        } else {
            self.call_islands(reporter);
        }
    }

    fn call_serial<R: Reporter>(&mut self, reporter: &mut R) {
        let max_generations = self.config.max_generations;
        let interval = self.config.stats_interval;
        while self.generation < max_generations {
            let remaining = max_generations - self.generation;
            let batch = if interval > 0 {
                self.report_island(None, false, reporter);
                remaining.min(interval as u32)
            } else {
                remaining
            };
            island::evolve_islands(
                &mut self.population,
                &self.bounds,
                &self.genotype,
                &self.config,
                batch,
                &mut self.rngs,
            );
            self.generation += batch;
        }
        if interval >= 0 {
            self.report_island(None, true, reporter);
        }
    }

    fn call_islands<R: Reporter>(&mut self, reporter: &mut R) {
        let max_generations = self.config.max_generations;
        let interval = self.config.stats_interval;
        let num_islands = self.config.num_islands;

        if self.config.island_cross_interval <= 0 {
            // fully independent runs with one shared output
            if interval > 0 {
                for index in 0..num_islands {
                    self.report_island(Some(index), false, reporter);
                }
            }
            island::evolve_islands(
                &mut self.population,
                &self.bounds,
                &self.genotype,
                &self.config,
                max_generations,
                &mut self.rngs,
            );
            self.generation = max_generations;
        } else {
            let cross_interval = self.config.island_cross_interval as u32;
            while self.generation < max_generations {
                if interval > 0 {
                    for index in 0..num_islands {
                        self.report_island(Some(index), false, reporter);
                    }
                }
                let span = (max_generations - self.generation).min(cross_interval);
                island::evolve_islands(
                    &mut self.population,
                    &self.bounds,
                    &self.genotype,
                    &self.config,
                    span - 1,
                    &mut self.rngs,
                );
                self.population
                    .verify_and_repair(&self.genotype, &mut self.rngs[0]);
                self.cross_step();
                self.population.rebind_rows();
                self.generation += span;
            }
        }

        if interval >= 0 {
            if interval > 0 {
                for index in 0..num_islands {
                    self.report_island(Some(index), true, reporter);
                }
            }
            self.report_island(None, true, reporter);
        }
    }

    /// One generation on the whole population as a single island, letting
    /// selection reach across island boundaries (the migration mechanism).
    fn cross_step(&mut self) {
        debug!("cross step at generation {}", self.generation);
        let mut scratch = Scratch::new(self.population.genes_size());
        let mut island = self.population.as_island();
        next_generation(
            &mut island,
            &self.genotype,
            &self.config,
            &mut scratch,
            &mut self.rngs[0],
        );
    }

    /// Emit one statistics line. Reporting sorts the slice via truncation
    /// selection first; interim reports use the unsorted collector, the
    /// final report the sorted one (which carries the worst-elite value).
    fn report_island<R: Reporter>(
        &mut self,
        island_index: Option<usize>,
        final_report: bool,
        reporter: &mut R,
    ) {
        let select = Truncation::new(self.config.percent_dead, self.config.percent_elite);
        let mut view = match island_index {
            Some(index) if self.config.num_islands > 1 => {
                self.population.island(&self.bounds, index)
            }
            _ => self.population.as_island(),
        };
        let generation = view.generation();
        select.call(&mut view, &self.genotype, self.config.fitness_ordering);
        let collected = if final_report {
            stats::sorted_stats(&view, self.config.percent_elite)
        } else {
            stats::unsorted_stats(&view)
        };
        if let Some(collected) = collected {
            reporter.report(&StatsLine::new(
                island_index,
                generation,
                self.config.percent_elite,
                &collected,
            ));
        }
    }

    /// Sort the population by fitness and return the best tour with its
    /// length.
    pub fn best_tour(&mut self) -> Option<(FitnessValue, Vec<Gene>)> {
        {
            let mut island = self.population.as_island();
            Truncation::new(self.config.percent_dead, self.config.percent_elite).call(
                &mut island,
                &self.genotype,
                self.config.fitness_ordering,
            );
        }
        let individual = self.population.individuals.first()?;
        let fitness = individual.fitness_score()?;
        Some((fitness, self.population.genes_of(0).to_vec()))
    }
}

/// Builder for [Evolve].
#[derive(Clone, Debug)]
pub struct EvolveBuilder<G: Genotype> {
    pub genotype: Option<G>,
    pub config: EvolveConfig,
}

impl<G: Genotype> Default for EvolveBuilder<G> {
    fn default() -> Self {
        Self {
            genotype: None,
            config: EvolveConfig::default(),
        }
    }
}

impl<G: Genotype> EvolveBuilder<G> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_genotype(mut self, genotype: G) -> Self {
        self.genotype = Some(genotype);
        self
    }
    pub fn with_population_size(mut self, population_size: usize) -> Self {
        self.config.population_size = population_size;
        self
    }
    pub fn with_max_generations(mut self, max_generations: u32) -> Self {
        self.config.max_generations = max_generations;
        self
    }
    pub fn with_stats_interval(mut self, stats_interval: i32) -> Self {
        self.config.stats_interval = stats_interval;
        self
    }
    pub fn with_mutation_rate(mut self, mutation_rate: u32) -> Self {
        self.config.mutation_rate = mutation_rate;
        self
    }
    pub fn with_num_islands(mut self, num_islands: usize) -> Self {
        self.config.num_islands = num_islands;
        self
    }
    pub fn with_island_cross_interval(mut self, island_cross_interval: i32) -> Self {
        self.config.island_cross_interval = island_cross_interval;
        self
    }
    pub fn with_percent_dead(mut self, percent_dead: usize) -> Self {
        self.config.percent_dead = percent_dead;
        self
    }
    pub fn with_percent_elite(mut self, percent_elite: usize) -> Self {
        self.config.percent_elite = percent_elite;
        self
    }
    pub fn with_percent_cross(mut self, percent_cross: usize) -> Self {
        self.config.percent_cross = percent_cross;
        self
    }
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.config.strategy = strategy;
        self
    }
    pub fn with_fitness_ordering(mut self, fitness_ordering: FitnessOrdering) -> Self {
        self.config.fitness_ordering = fitness_ordering;
        self
    }
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    pub fn build(self) -> Result<Evolve<G>, TryFromBuilderError> {
        let genotype = self
            .genotype
            .ok_or(TryFromBuilderError("EvolveBuilder requires a genotype"))?;
        if self.config.num_islands == 0 {
            return Err(TryFromBuilderError(
                "EvolveBuilder requires at least one island",
            ));
        }
        let config = self.config;
        let mut rngs = WorkerRng::streams(config.seed, config.num_islands);
        let population = Population::new(config.population_size, &genotype, &mut rngs[0]);
        let bounds = island::island_bounds(config.population_size, config.num_islands);
        Ok(Evolve {
            genotype,
            config,
            population,
            rngs,
            bounds,
            generation: 0,
        })
    }
}
