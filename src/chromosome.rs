//! The gene arena: one contiguous buffer holding every chromosome.
//!
//! All `P × N` genes of a population live in a single allocation, with
//! individual `i`'s chromosome occupying rows `[i·N, (i+1)·N)`. Individuals
//! do not own their genes, they hold a row binding into the arena (see
//! [Individual](crate::individual::Individual)). The arena is allocated once
//! before the first generation and freed once after the last; it is
//! trivially splittable into disjoint per-island views, which is what makes
//! the lock-free parallel path possible.
use std::cmp::Ordering;

/// A gene is a node index in `[0, N)`.
pub type Gene = u32;

/// The single contiguous gene buffer backing a whole population.
#[derive(Clone, Debug)]
pub struct GeneArena {
    data: Vec<Gene>,
    genes_size: usize,
}

impl GeneArena {
    pub fn new(rows: usize, genes_size: usize) -> Self {
        Self {
            data: vec![0; rows * genes_size],
            genes_size,
        }
    }

    pub fn rows(&self) -> usize {
        if self.genes_size == 0 {
            0
        } else {
            self.data.len() / self.genes_size
        }
    }

    pub fn genes_size(&self) -> usize {
        self.genes_size
    }

    /// Shared access to one row.
    pub fn row(&self, row: usize) -> &[Gene] {
        &self.data[row * self.genes_size..][..self.genes_size]
    }

    /// Borrow the whole arena as one view.
    pub fn view(&mut self) -> ArenaView<'_> {
        ArenaView {
            base_row: 0,
            genes_size: self.genes_size,
            genes: &mut self.data,
        }
    }

    /// Split into disjoint views along the half-open row ranges described by
    /// `bounds` (length T+1, covering `[0, rows)`).
    pub fn split(&mut self, bounds: &[usize]) -> Vec<ArenaView<'_>> {
        let genes_size = self.genes_size;
        let mut views = Vec::with_capacity(bounds.len().saturating_sub(1));
        let mut rest: &mut [Gene] = &mut self.data;
        for window in bounds.windows(2) {
            let rows = window[1] - window[0];
            let (head, tail) = std::mem::take(&mut rest).split_at_mut(rows * genes_size);
            rest = tail;
            views.push(ArenaView {
                base_row: window[0],
                genes_size,
                genes: head,
            });
        }
        views
    }
}

/// A borrowed range of arena rows `[base_row, base_row + len)`.
///
/// Row ids are global: a view indexes them relative to its base. Each worker
/// gets one view, so writes from different workers can never overlap.
#[derive(Debug)]
pub struct ArenaView<'a> {
    genes: &'a mut [Gene],
    base_row: usize,
    genes_size: usize,
}

impl<'a> ArenaView<'a> {
    pub fn genes_size(&self) -> usize {
        self.genes_size
    }

    #[inline]
    fn offset(&self, row: usize) -> usize {
        debug_assert!(row >= self.base_row, "row below view base");
        let offset = (row - self.base_row) * self.genes_size;
        debug_assert!(offset + self.genes_size <= self.genes.len(), "row above view");
        offset
    }

    pub fn row(&self, row: usize) -> &[Gene] {
        let offset = self.offset(row);
        &self.genes[offset..offset + self.genes_size]
    }

    pub fn row_mut(&mut self, row: usize) -> &mut [Gene] {
        let offset = self.offset(row);
        &mut self.genes[offset..offset + self.genes_size]
    }

    /// Two distinct rows, both mutable.
    pub fn row_pair_mut(&mut self, a: usize, b: usize) -> (&mut [Gene], &mut [Gene]) {
        let n = self.genes_size;
        let (a_offset, b_offset) = (self.offset(a), self.offset(b));
        match a_offset.cmp(&b_offset) {
            Ordering::Less => {
                let (left, right) = self.genes.split_at_mut(b_offset);
                (&mut left[a_offset..a_offset + n], &mut right[..n])
            }
            Ordering::Greater => {
                let (left, right) = self.genes.split_at_mut(a_offset);
                (&mut right[..n], &mut left[b_offset..b_offset + n])
            }
            Ordering::Equal => panic!("row_pair_mut with equal rows"),
        }
    }

    /// Two parent rows (shared, may be the same row) and one child row
    /// (mutable, distinct from both parents).
    pub fn parents_and_child(
        &mut self,
        father: usize,
        mother: usize,
        child: usize,
    ) -> (&[Gene], &[Gene], &mut [Gene]) {
        assert!(father != child && mother != child, "child row aliases a parent");
        let n = self.genes_size;
        let (father_offset, mother_offset) = (self.offset(father), self.offset(mother));
        let child_offset = self.offset(child);

        let (left, rest) = self.genes.split_at_mut(child_offset);
        let (child_genes, right) = rest.split_at_mut(n);
        let father_genes: &[Gene] = if father_offset < child_offset {
            &left[father_offset..father_offset + n]
        } else {
            &right[father_offset - child_offset - n..][..n]
        };
        let mother_genes: &[Gene] = if mother_offset < child_offset {
            &left[mother_offset..mother_offset + n]
        } else {
            &right[mother_offset - child_offset - n..][..n]
        };
        (father_genes, mother_genes, child_genes)
    }

    /// Copy the genes of `source` over `target`. Rows must be distinct.
    pub fn copy_row(&mut self, source: usize, target: usize) {
        let (source_genes, target_genes) = self.row_pair_mut(source, target);
        target_genes.copy_from_slice(source_genes);
    }
}
