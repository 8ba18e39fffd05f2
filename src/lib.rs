//! A parallel island-model genetic algorithm for the symmetric 2D Euclidean
//! travelling salesman problem.
//!
//! There are three main elements to this approach:
//! * The [Genotype](crate::genotype) (the search space: closed tours as
//!   permutations over a shared gene arena)
//! * The selection regime (the search pressure:
//!   [truncation-with-elitism](crate::select::Truncation) or
//!   [k-way tournament](crate::select::Tournament))
//! * The [Evolve](crate::evolve::Evolve) engine (the search strategy:
//!   serial or island-parallel)
//!
//! All chromosomes of a population live in one contiguous
//! [GeneArena](crate::chromosome::GeneArena); islands are disjoint borrowed
//! views over it, which makes the parallel path lock-free. Every island
//! worker owns a private [WorkerRng](crate::rng::WorkerRng), so runs are
//! reproducible for a given seed and island count.
//!
//! ## Quick usage
//!
//! ```rust
//! use tsp_islands::evolve::{Evolve, Strategy};
//! use tsp_islands::genotype::{Node, TourGenotype};
//! use tsp_islands::reporter::NoopReporter;
//!
//! // the problem: four corners of a unit square
//! let genotype = TourGenotype::new(vec![
//!     Node { x: 0.0, y: 0.0 },
//!     Node { x: 0.0, y: 1.0 },
//!     Node { x: 1.0, y: 1.0 },
//!     Node { x: 1.0, y: 0.0 },
//! ])
//! .unwrap();
//!
//! // the engine
//! let mut evolve = Evolve::builder()
//!     .with_genotype(genotype)
//!     .with_population_size(100)
//!     .with_max_generations(200)
//!     .with_strategy(Strategy::Tournament { tournament_size: 2 })
//!     .with_stats_interval(-1) // silent
//!     .with_seed(1)
//!     .build()
//!     .unwrap();
//!
//! let mut reporter = NoopReporter;
//! evolve.call(&mut reporter);
//!
//! // it's all about the shortest tour after all
//! let (fitness, tour) = evolve.best_tour().unwrap();
//! assert_eq!(fitness, 4);
//! assert_eq!(tour.len(), 4);
//! ```

pub mod chromosome;
pub mod evolve;
pub mod fitness;
pub mod genotype;
pub mod individual;
pub mod island;
pub mod population;
pub mod reporter;
pub mod rng;
pub mod select;
pub mod stats;
pub mod tsplib;
