//! The search goal to optimize towards (maximize or minimize).
//!
//! For the travelling salesman problem the fitness is the closed tour length
//! and the ordering is [FitnessOrdering::Minimize]. The value itself is
//! computed by the [Genotype](crate::genotype::Genotype) and cached on the
//! [Individual](crate::individual::Individual).

/// Use i64 for easy handling of scores (ordering, comparing) as floats are
/// tricky in that regard. Tour lengths are rounded edge sums, so they fit
/// comfortably.
pub type FitnessValue = i64;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitnessOrdering {
    Maximize,
    Minimize,
}
