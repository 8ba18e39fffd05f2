//! Reader for the TSPLIB subset the engine consumes.
//!
//! Line-oriented: a `DIMENSION: <n>` line declares the node count, lines of
//! the form `<index> <x> <y>` (1-based index) populate the nodes, everything
//! else is ignored. [read_deduplicated] additionally discards nodes whose
//! coordinates equal an earlier node's; the engine then runs with fewer
//! nodes.
use crate::genotype::Node;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TsplibError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TSPLIB format error: coordinates read before dimension (line {0})")]
    CoordinatesBeforeDimension(usize),
    #[error("TSPLIB format error: malformed coordinate line {0}")]
    MalformedCoordinates(usize),
}

/// Read a problem, keeping duplicate nodes.
pub fn read<P: AsRef<Path>>(path: P) -> Result<Vec<Node>, TsplibError> {
    let reader = BufReader::new(File::open(path)?);
    let mut nodes: Vec<Node> = Vec::new();

    for (line_number, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = line_number + 1;
        let mut tokens = line.split(|c| c == ' ' || c == ':' || c == '\t').filter(|t| !t.is_empty());
        let Some(first) = tokens.next() else { continue };

        if first == "DIMENSION" {
            let dimension = tokens
                .next()
                .and_then(|t| t.parse::<usize>().ok())
                .unwrap_or(0);
            nodes = Vec::with_capacity(dimension);
            nodes.resize(dimension, Node { x: 0.0, y: 0.0 });
            continue;
        }

        // 1-based coordinate line, anything non-numeric is a keyword we skip
        let Ok(index) = first.parse::<usize>() else { continue };
        if index == 0 {
            continue;
        }
        if nodes.is_empty() {
            return Err(TsplibError::CoordinatesBeforeDimension(line_number));
        }
        let x = tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .ok_or(TsplibError::MalformedCoordinates(line_number))?;
        let y = tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .ok_or(TsplibError::MalformedCoordinates(line_number))?;
        if index <= nodes.len() {
            nodes[index - 1] = Node { x, y };
        }
    }
    Ok(nodes)
}

/// Read a problem, discarding any node whose coordinates equal an earlier
/// node's.
pub fn read_deduplicated<P: AsRef<Path>>(path: P) -> Result<Vec<Node>, TsplibError> {
    let nodes = read(path)?;
    let mut deduplicated: Vec<Node> = Vec::with_capacity(nodes.len());
    for node in nodes {
        if !deduplicated.contains(&node) {
            deduplicated.push(node);
        }
    }
    Ok(deduplicated)
}
