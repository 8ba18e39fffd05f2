use clap::Parser;
use itertools::Itertools;
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;
use tsp_islands::evolve::{Evolve, Strategy};
use tsp_islands::genotype::TourGenotype;
use tsp_islands::reporter::{CompositeReporter, CsvReporter, Reporter, StdoutReporter};
use tsp_islands::tsplib;

#[derive(Parser, Debug)]
#[command(version, about = "Evolve travelling salesman tours with an island-model genetic algorithm")]
struct Args {
    /// Print the shortest path found after finishing evolution
    #[arg(short = 'a')]
    answer: bool,

    /// Elite percentage, affects display of generation statistics and
    /// truncation selection
    #[arg(short = 'e', value_name = "PERCENT", default_value_t = 5)]
    elite: usize,

    /// Load TSP from the given TSPLIB file, excluding duplicate nodes
    #[arg(short = 'f', value_name = "FILE")]
    file_deduplicated: Option<PathBuf>,

    /// Number of generations to evolve
    #[arg(short = 'g', value_name = "N", default_value_t = 3000)]
    generations: u32,

    /// Generations between statistics prints; -1 disables all output, 0
    /// only prints after the final generation. With more than one island,
    /// statistics are printed at every island cross instead
    #[arg(short = 'i', value_name = "N", default_value_t = 100, allow_negative_numbers = true)]
    interval: i32,

    /// Number of individuals per tournament
    #[arg(short = 'k', value_name = "N", default_value_t = 4)]
    tournament_size: usize,

    /// Load TSP from the given TSPLIB file, keeping duplicate nodes
    #[arg(short = 'l', value_name = "FILE")]
    file: Option<PathBuf>,

    /// Mutation rate out of 1024*1024
    #[arg(short = 'm', value_name = "N", default_value_t = 1000)]
    mutation_rate: u32,

    /// Also append generation statistics to a CSV file
    #[arg(short = 'o', value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Total population size, divided evenly among the islands
    #[arg(short = 'p', value_name = "N", default_value_t = 2500)]
    population_size: usize,

    /// Master PRNG seed
    #[arg(short = 'r', value_name = "SEED", default_value_t = 1)]
    seed: u64,

    /// Use truncation selection with elitism instead of tournament
    /// selection
    #[arg(short = 's')]
    truncation: bool,

    /// Number of islands, each evolved by its own worker
    #[arg(short = 't', value_name = "N", default_value_t = 1)]
    islands: usize,

    /// Generations between island crosses; below 1 the islands never cross
    #[arg(short = 'u', value_name = "N", default_value_t = 0, allow_negative_numbers = true)]
    cross_interval: i32,

    /// Problem file (TSPLIB format), equivalent to -l
    #[arg(value_name = "FILE.tsp")]
    path: Option<PathBuf>,
}

fn run(args: Args) -> Result<(), String> {
    let nodes = if let Some(path) = &args.file_deduplicated {
        tsplib::read_deduplicated(path).map_err(|e| e.to_string())?
    } else if let Some(path) = args.file.as_ref().or(args.path.as_ref()) {
        tsplib::read(path).map_err(|e| e.to_string())?
    } else {
        return Err("no problem file given, see -h for help".to_string());
    };
    info!("problem dimension: {}", nodes.len());

    let genotype = TourGenotype::new(nodes).map_err(|e| e.to_string())?;
    let strategy = if args.truncation {
        Strategy::Truncation
    } else {
        Strategy::Tournament {
            tournament_size: args.tournament_size,
        }
    };

    let mut evolve = Evolve::builder()
        .with_genotype(genotype)
        .with_population_size(args.population_size)
        .with_max_generations(args.generations)
        .with_stats_interval(args.interval)
        .with_mutation_rate(args.mutation_rate)
        .with_num_islands(args.islands)
        .with_island_cross_interval(args.cross_interval)
        .with_percent_elite(args.elite)
        .with_strategy(strategy)
        .with_seed(args.seed)
        .build()
        .map_err(|e| e.0.to_string())?;

    let mut reporters: Vec<Box<dyn Reporter>> = vec![Box::new(StdoutReporter)];
    if let Some(path) = &args.csv {
        reporters.push(Box::new(
            CsvReporter::create(path).map_err(|e| e.to_string())?,
        ));
    }
    let mut reporter = CompositeReporter::new(reporters);

    evolve.call(&mut reporter);

    if args.answer {
        if let Some((fitness, tour)) = evolve.best_tour() {
            println!(
                "\nBest path after {} generations: {}",
                args.generations, fitness
            );
            println!("{}", tour.iter().join(" -> "));
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}
