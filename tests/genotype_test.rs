mod support;
use support::*;

use fixedbitset::FixedBitSet;
use tsp_islands::genotype::tour::GenotypeError;

fn scratch_marks(genes_size: usize) -> FixedBitSet {
    FixedBitSet::with_capacity(genes_size)
}

#[test]
fn new_rejects_degenerate_problems() {
    assert_eq!(
        TourGenotype::new(vec![Node { x: 0.0, y: 0.0 }]).unwrap_err(),
        GenotypeError::TooFewNodes
    );
    assert!(TourGenotype::new(vec![
        Node { x: 0.0, y: 0.0 },
        Node { x: 1.0, y: 0.0 }
    ])
    .is_ok());
}

#[test]
fn seed_genes_is_permutation() {
    let genotype = line_genotype(10);
    let mut rng = rng(42);
    let mut marks = scratch_marks(10);
    let mut genes = vec![0 as Gene; 10];
    genotype.seed_genes(&mut genes, &mut marks, &mut rng);
    assert!(is_permutation(&genes));
}

#[test]
fn seed_genes_is_reproducible() {
    let genotype = line_genotype(10);
    let mut marks = scratch_marks(10);
    let mut first = vec![0 as Gene; 10];
    let mut second = vec![0 as Gene; 10];
    genotype.seed_genes(&mut first, &mut marks, &mut rng(42));
    genotype.seed_genes(&mut second, &mut marks, &mut rng(42));
    assert_eq!(first, second);

    let mut third = vec![0 as Gene; 10];
    genotype.seed_genes(&mut third, &mut marks, &mut rng(43));
    assert_ne!(first, third);
}

#[test]
fn distance_is_rounded_euclidean() {
    let genotype = square_genotype();
    assert_eq!(genotype.distance(0, 1), 1);
    // the diagonal, sqrt(2), rounds down to 1
    assert_eq!(genotype.distance(0, 2), 1);
    assert_eq!(genotype.distance(1, 3), 1);
}

#[test]
fn fitness_includes_wrap_around_edge() {
    let square = square_genotype();
    assert_eq!(square.fitness(&[0, 1, 2, 3]), 4);

    let line = line_genotype(5);
    assert_eq!(line.fitness(&[0, 1, 2, 3, 4]), 8);
    assert_eq!(line.fitness(&[0, 2, 1, 3, 4]), 10);
}

#[test]
fn crossover_produces_valid_permutation() {
    let genotype = line_genotype(25);
    let mut rng = rng(7);
    let mut marks = scratch_marks(25);
    let mut father = vec![0 as Gene; 25];
    let mut mother = vec![0 as Gene; 25];
    let mut child = vec![0 as Gene; 25];

    for _ in 0..20 {
        genotype.seed_genes(&mut father, &mut marks, &mut rng);
        genotype.seed_genes(&mut mother, &mut marks, &mut rng);
        genotype.crossover(&father, &mother, &mut child, &mut marks, 0, &mut rng);
        assert!(is_permutation(&child));
    }
}

#[test]
fn crossover_copies_a_father_window_then_fills_from_mother() {
    let genotype = line_genotype(20);
    let mut rng = rng(3);
    let mut marks = scratch_marks(20);
    let mut father = vec![0 as Gene; 20];
    let mut mother = vec![0 as Gene; 20];
    let mut child = vec![0 as Gene; 20];
    genotype.seed_genes(&mut father, &mut marks, &mut rng);
    genotype.seed_genes(&mut mother, &mut marks, &mut rng);

    genotype.crossover(&father, &mother, &mut child, &mut marks, 0, &mut rng);

    // the first half is a contiguous window of the father
    let half = 10;
    let start = father.iter().position(|&g| g == child[0]).unwrap();
    assert_eq!(&child[..half], &father[start..start + half]);

    // the second half is the remaining ids in mother order
    let copied: Vec<Gene> = child[..half].to_vec();
    let expected: Vec<Gene> = mother
        .iter()
        .copied()
        .filter(|gene| !copied.contains(gene))
        .collect();
    assert_eq!(&child[half..], expected.as_slice());
}

#[test]
fn crossover_boosts_mutation_for_similar_parents() {
    let genotype = line_genotype(40);
    let mut rng = rng(11);
    let mut marks = scratch_marks(40);
    let mut parent = vec![0 as Gene; 40];
    genotype.seed_genes(&mut parent, &mut marks, &mut rng);
    let mut child = vec![0 as Gene; 40];

    // identical parents trip the similarity boost; the child stays a valid
    // permutation even at twenty times the configured rate
    genotype.crossover(&parent.clone(), &parent, &mut child, &mut marks, 50_000, &mut rng);
    assert!(is_permutation(&child));
}

#[test]
fn mutate_zero_rate_is_noop() {
    let genotype = line_genotype(15);
    let mut rng = rng(5);
    let mut marks = scratch_marks(15);
    let mut genes = vec![0 as Gene; 15];
    genotype.seed_genes(&mut genes, &mut marks, &mut rng);
    let before = genes.clone();

    assert_eq!(genotype.mutate(&mut genes, 0, &mut rng), 0);
    assert_eq!(genes, before);
}

#[test]
fn mutate_preserves_permutation() {
    let genotype = line_genotype(30);
    let mut rng = rng(9);
    let mut marks = scratch_marks(30);
    let mut genes = vec![0 as Gene; 30];
    genotype.seed_genes(&mut genes, &mut marks, &mut rng);

    let mut total = 0;
    for _ in 0..50 {
        total += genotype.mutate(&mut genes, 1 << 18, &mut rng);
        assert!(is_permutation(&genes));
    }
    assert!(total > 0);
}
