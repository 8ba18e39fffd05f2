use criterion::*;
use tsp_islands::evolve::{next_generation, EvolveConfig, Strategy};
use tsp_islands::genotype::{Genotype, Node, TourGenotype};
use tsp_islands::population::Population;
use tsp_islands::rng::WorkerRng;
use tsp_islands::select::Scratch;

pub fn criterion_benchmark(c: &mut Criterion) {
    let genes_size = 100;
    let population_size = 1000;

    let nodes: Vec<Node> = {
        let mut rng = WorkerRng::from_master(42, 0);
        (0..genes_size)
            .map(|_| Node {
                x: rng.index(10_000) as f64,
                y: rng.index(10_000) as f64,
            })
            .collect()
    };
    let genotype = TourGenotype::new(nodes).unwrap();

    let mut group = c.benchmark_group("evolve");

    group.bench_function(
        format!("tournament-{}-pop{}", genes_size, population_size),
        |b| {
            let config = EvolveConfig {
                strategy: Strategy::Tournament { tournament_size: 4 },
                ..EvolveConfig::default()
            };
            let mut rng = WorkerRng::from_master(1, 0);
            let mut population = Population::new(population_size, &genotype, &mut rng);
            let mut scratch = Scratch::new(genotype.genes_size());
            b.iter(|| {
                let mut island = population.as_island();
                next_generation(&mut island, &genotype, &config, &mut scratch, &mut rng)
            });
        },
    );

    group.bench_function(
        format!("truncation-{}-pop{}", genes_size, population_size),
        |b| {
            let config = EvolveConfig {
                strategy: Strategy::Truncation,
                ..EvolveConfig::default()
            };
            let mut rng = WorkerRng::from_master(1, 0);
            let mut population = Population::new(population_size, &genotype, &mut rng);
            let mut scratch = Scratch::new(genotype.genes_size());
            b.iter(|| {
                let mut island = population.as_island();
                next_generation(&mut island, &genotype, &config, &mut scratch, &mut rng)
            });
        },
    );

    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
