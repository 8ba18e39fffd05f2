//! Per-individual metadata, separate from the genes themselves.
use crate::fitness::FitnessValue;

/// One member of the population.
///
/// The genes live in the [GeneArena](crate::chromosome::GeneArena); `row` is
/// the binding to the arena row holding this individual's chromosome. The
/// binding survives sorting of the population, rows themselves never move
/// during an epoch.
///
/// * `fitness_score` is the fitness cache: `None` whenever the chromosome
///   has been mutated or newly crossed, `Some` after evaluation.
/// * `dead` is a scratch flag with meaning only within a single selection
///   pass (replacement mark in truncation, already-drawn mark in
///   tournament).
/// * `elite` marks an individual currently immune to replacement
///   (truncation mode only).
/// * `generation` increases by exactly one per epoch the individual
///   participates in.
#[derive(Clone, Debug)]
pub struct Individual {
    pub row: usize,
    pub dead: bool,
    pub elite: bool,
    pub generation: u32,
    pub fitness_score: Option<FitnessValue>,
}

impl Individual {
    pub fn new(row: usize) -> Self {
        Self {
            row,
            dead: false,
            elite: false,
            generation: 0,
            fitness_score: None,
        }
    }

    pub fn fitness_score(&self) -> Option<FitnessValue> {
        self.fitness_score
    }

    pub fn set_fitness_score(&mut self, fitness_score: Option<FitnessValue>) {
        self.fitness_score = fitness_score;
    }

    /// Invalidate the fitness cache after a gene-level change.
    pub fn taint_fitness_score(&mut self) {
        self.fitness_score = None;
    }
}
