//! Reporting sinks for per-generation statistics.
//!
//! The engine emits [StatsLine] tuples; sinks decide how to render them.
//! [StdoutReporter] prints the classic run log, [CsvReporter] appends
//! machine-readable rows, [BufferReporter] captures lines in memory (used
//! by the determinism tests), [CompositeReporter] fans out to several sinks.
use crate::fitness::FitnessValue;
use crate::stats::GenerationStats;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// One emitted statistics tuple. `island` is `None` for single-population
/// and whole-population lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatsLine {
    pub island: Option<usize>,
    pub generation: u32,
    pub percent_elite: usize,
    pub best: FitnessValue,
    pub worst_elite: Option<FitnessValue>,
    pub average: FitnessValue,
    pub worst: FitnessValue,
}

impl StatsLine {
    pub fn new(
        island: Option<usize>,
        generation: u32,
        percent_elite: usize,
        stats: &GenerationStats,
    ) -> Self {
        Self {
            island,
            generation,
            percent_elite,
            best: stats.best,
            worst_elite: stats.worst_elite,
            average: stats.average,
            worst: stats.worst,
        }
    }
}

pub trait Reporter {
    fn report(&mut self, line: &StatsLine);
}

/// Silences reporting.
#[derive(Clone, Debug, Default)]
pub struct NoopReporter;

impl Reporter for NoopReporter {
    fn report(&mut self, _line: &StatsLine) {}
}

/// The run log on stdout.
#[derive(Clone, Debug, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn report(&mut self, line: &StatsLine) {
        let worst_elite = line.worst_elite.unwrap_or(0);
        match line.island {
            Some(island) => println!(
                "I: {:3}\tG: {:6}:\tB: {:5}\t{:3}%: {:5}\tA: {:5}\tW: {:5}",
                island, line.generation, line.best, line.percent_elite, worst_elite, line.average, line.worst
            ),
            None => println!(
                "G: {:6}:\tB: {:5}\t{:3}%: {:5}\tA: {:5}\tW: {:5}",
                line.generation, line.best, line.percent_elite, worst_elite, line.average, line.worst
            ),
        }
    }
}

/// CSV rows under a fixed header, one file per run.
#[derive(Debug)]
pub struct CsvReporter {
    writer: BufWriter<File>,
}

impl CsvReporter {
    pub fn create<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        let mut writer = BufWriter::new(File::create(path)?);
        writeln!(writer, "Island,Generation,Best,Elite%,Elite,Average,Worst")?;
        Ok(Self { writer })
    }
}

impl Reporter for CsvReporter {
    fn report(&mut self, line: &StatsLine) {
        // stats sinks are best effort, a full disk should not abort the run
        writeln!(
            self.writer,
            "{},{},{},{},{},{},{}",
            line.island.unwrap_or(0),
            line.generation,
            line.best,
            line.percent_elite,
            line.worst_elite.unwrap_or(0),
            line.average,
            line.worst
        )
        .unwrap_or(());
    }
}

impl Drop for CsvReporter {
    fn drop(&mut self) {
        self.writer.flush().unwrap_or(());
    }
}

/// Captures lines in memory.
#[derive(Clone, Debug, Default)]
pub struct BufferReporter {
    pub lines: Vec<StatsLine>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Reporter for BufferReporter {
    fn report(&mut self, line: &StatsLine) {
        self.lines.push(line.clone());
    }
}

/// Fans a line out to every contained reporter.
#[derive(Default)]
pub struct CompositeReporter {
    pub reporters: Vec<Box<dyn Reporter>>,
}

impl CompositeReporter {
    pub fn new(reporters: Vec<Box<dyn Reporter>>) -> Self {
        Self { reporters }
    }
}

impl Reporter for CompositeReporter {
    fn report(&mut self, line: &StatsLine) {
        for reporter in self.reporters.iter_mut() {
            reporter.report(line);
        }
    }
}
