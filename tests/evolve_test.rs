mod support;
use support::*;

use tsp_islands::evolve::{
    next_generation_tournament, next_generation_truncation, Evolve, EvolveConfig, Strategy,
};
use tsp_islands::reporter::NoopReporter;
use tsp_islands::select::Scratch;

#[test]
fn tournament_converges_on_the_unit_square() {
    let mut evolve = Evolve::builder()
        .with_genotype(square_genotype())
        .with_population_size(100)
        .with_max_generations(200)
        .with_strategy(Strategy::Tournament { tournament_size: 2 })
        .with_stats_interval(-1)
        .with_seed(1)
        .build()
        .unwrap();
    evolve.call(&mut NoopReporter);

    let (fitness, tour) = evolve.best_tour().unwrap();
    assert_eq!(fitness, 4);
    assert!(is_permutation(&tour));
}

#[test]
fn tournament_converges_on_the_five_node_line() {
    let mut evolve = Evolve::builder()
        .with_genotype(line_genotype(5))
        .with_population_size(100)
        .with_max_generations(200)
        .with_strategy(Strategy::Tournament { tournament_size: 2 })
        .with_stats_interval(-1)
        .with_seed(1)
        .build()
        .unwrap();
    evolve.call(&mut NoopReporter);

    // out-and-back is optimal
    let (fitness, _) = evolve.best_tour().unwrap();
    assert_eq!(fitness, 8);
}

#[test]
fn truncation_converges_on_the_five_node_line() {
    let mut evolve = Evolve::builder()
        .with_genotype(line_genotype(5))
        .with_population_size(100)
        .with_max_generations(200)
        .with_strategy(Strategy::Truncation)
        .with_stats_interval(-1)
        .with_seed(1)
        .build()
        .unwrap();
    evolve.call(&mut NoopReporter);

    let (fitness, _) = evolve.best_tour().unwrap();
    assert_eq!(fitness, 8);
}

#[test]
fn every_individual_ages_once_per_generation() {
    let mut evolve = Evolve::builder()
        .with_genotype(line_genotype(6))
        .with_population_size(30)
        .with_max_generations(50)
        .with_stats_interval(-1)
        .with_seed(2)
        .build()
        .unwrap();
    evolve.call(&mut NoopReporter);

    assert_eq!(evolve.generation(), 50);
    for individual in evolve.population.individuals.iter() {
        assert_eq!(individual.generation, 50);
    }
    for index in 0..evolve.population.size() {
        assert!(is_permutation(evolve.population.genes_of(index)));
    }
}

#[test]
fn truncation_epoch_returns_the_new_generation_number() {
    let genotype = line_genotype(6);
    let config = EvolveConfig {
        strategy: Strategy::Truncation,
        ..EvolveConfig::default()
    };
    let mut population = Population::new(20, &genotype, &mut rng(3));
    let mut worker = rng(4);
    let mut scratch = Scratch::new(6);

    let mut island = population.as_island();
    assert_eq!(
        next_generation_truncation(&mut island, &genotype, &config, &mut scratch, &mut worker),
        1
    );
    assert_eq!(
        next_generation_truncation(&mut island, &genotype, &config, &mut scratch, &mut worker),
        2
    );
    for index in 0..island.len() {
        assert!(is_permutation(island.genes(index)));
    }
}

#[test]
fn truncation_epoch_respects_the_survivor_prefix() {
    let genotype = line_genotype(6);
    let config = EvolveConfig {
        strategy: Strategy::Truncation,
        percent_dead: 50,
        percent_cross: 50,
        percent_elite: 10,
        ..EvolveConfig::default()
    };
    let mut population = Population::new(20, &genotype, &mut rng(5));
    let mut worker = rng(6);
    let mut scratch = Scratch::new(6);

    let mut island = population.as_island();
    next_generation_truncation(&mut island, &genotype, &config, &mut scratch, &mut worker);

    // replacements reset the scratch flag, survivors were cleared by the sort
    assert!(island.members.iter().all(|m| !m.dead));
    // the elite prefix survived selection
    assert!(island.members[0].elite);
    assert!(island.members[1].elite);
}

#[test]
fn tournament_epoch_matches_the_fused_operator_contract() {
    let genotype = line_genotype(8);
    let config = EvolveConfig::default();
    let mut population = Population::new(32, &genotype, &mut rng(7));
    let mut worker = rng(8);
    let mut scratch = Scratch::new(8);

    let mut island = population.as_island();
    let generation =
        next_generation_tournament(&mut island, &genotype, &config, 4, &mut scratch, &mut worker);
    assert_eq!(generation, 1);
    assert_eq!(island.generation(), 1);
}

#[test]
fn percent_cross_controls_the_crossover_share_of_replacements() {
    // with mutation off, crossover replacements carry a tainted fitness
    // cache while clones keep the survivor's evaluated score, so the
    // cross budget is observable from the caches after one epoch
    let tainted_after_one_epoch = |percent_cross: usize| {
        let mut evolve = Evolve::builder()
            .with_genotype(line_genotype(6))
            .with_population_size(20)
            .with_max_generations(1)
            .with_strategy(Strategy::Truncation)
            .with_percent_dead(50)
            .with_percent_cross(percent_cross)
            .with_mutation_rate(0)
            .with_stats_interval(-1)
            .with_seed(11)
            .build()
            .unwrap();
        evolve.call(&mut NoopReporter);
        evolve
            .population
            .individuals
            .iter()
            .filter(|individual| individual.fitness_score().is_none())
            .count()
    };

    // the budget is size * percent_cross / 100, capped by the 10 dead slots
    assert_eq!(tainted_after_one_epoch(0), 0);
    assert_eq!(tainted_after_one_epoch(25), 5);
    assert_eq!(tainted_after_one_epoch(100), 10);
}

#[test]
fn builder_requires_a_genotype() {
    let result = Evolve::<TourGenotype>::builder().build();
    assert!(result.is_err());
}
