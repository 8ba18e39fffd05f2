//! Per-generation aggregate statistics.
use crate::fitness::FitnessValue;
use crate::population::Island;

/// Aggregates over one island (or the whole population).
///
/// `worst_elite` is only present for the sorted flavour, and only when the
/// elite percentage is positive and the boundary member actually carries
/// the elite mark.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GenerationStats {
    pub best: FitnessValue,
    pub worst_elite: Option<FitnessValue>,
    pub average: FitnessValue,
    pub worst: FitnessValue,
}

/// Statistics over a slice already sorted ascending by fitness.
pub fn sorted_stats(island: &Island<'_>, percent_elite: usize) -> Option<GenerationStats> {
    let size = island.len();
    if size == 0 {
        return None;
    }
    let fitness_of = |index: usize| island.members[index].fitness_score().unwrap_or(0);

    let worst_elite = if percent_elite > 0 {
        let elite_count = (size * percent_elite / 100).min(size);
        if elite_count > 0 && island.members[elite_count - 1].elite {
            Some(fitness_of(elite_count - 1))
        } else {
            None
        }
    } else {
        None
    };

    let sum: FitnessValue = (0..size).map(fitness_of).sum();
    Some(GenerationStats {
        best: fitness_of(0),
        worst_elite,
        average: sum / size as FitnessValue,
        worst: fitness_of(size - 1),
    })
}

/// Single-scan statistics over an unsorted slice. Does not report
/// `worst_elite`, the elite boundary is meaningless without the sort.
pub fn unsorted_stats(island: &Island<'_>) -> Option<GenerationStats> {
    let size = island.len();
    if size == 0 {
        return None;
    }
    let mut best = island.members[0].fitness_score().unwrap_or(0);
    let mut worst = best;
    let mut sum: FitnessValue = 0;
    for member in island.members.iter() {
        let fitness = member.fitness_score().unwrap_or(0);
        best = best.min(fitness);
        worst = worst.max(fitness);
        sum += fitness;
    }
    Some(GenerationStats {
        best,
        worst_elite: None,
        average: sum / size as FitnessValue,
        worst,
    })
}
