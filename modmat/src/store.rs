//! Ordered in-memory collection of matrices
//!
//! Entries are addressed by position. Replacing or removing an entry moves
//! the displaced matrix out to the caller, so its buffer is freed exactly
//! once when the caller drops it.

use modmat_core::DenseMatrix;

/// Matrices addressed by position, in load order until sorted
#[derive(Debug, Default)]
pub struct MatrixStore {
    matrices: Vec<DenseMatrix>,
}

impl MatrixStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with room for `capacity` matrices
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            matrices: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }

    /// Map a signed index from the command stream onto a live position
    pub fn resolve(&self, index: i64) -> Option<usize> {
        usize::try_from(index)
            .ok()
            .filter(|&position| position < self.matrices.len())
    }

    pub fn get(&self, index: usize) -> Option<&DenseMatrix> {
        self.matrices.get(index)
    }

    /// Append a matrix and return its index
    pub fn push(&mut self, matrix: DenseMatrix) -> usize {
        self.matrices.push(matrix);
        self.matrices.len() - 1
    }

    /// Swap in a new matrix at `index`, handing back the previous one
    pub fn replace(&mut self, index: usize, matrix: DenseMatrix) -> Option<DenseMatrix> {
        self.matrices
            .get_mut(index)
            .map(|slot| std::mem::replace(slot, matrix))
    }

    /// Remove the matrix at `index`, shifting later entries down by one
    ///
    /// Spare capacity is released once the store is less than half full.
    pub fn remove(&mut self, index: usize) -> Option<DenseMatrix> {
        if index >= self.matrices.len() {
            return None;
        }
        let removed = self.matrices.remove(index);

        let capacity = self.matrices.capacity();
        if self.matrices.len() + 1 < capacity / 2 {
            self.matrices.shrink_to(capacity / 2);
        }
        Some(removed)
    }

    /// Order matrices by ascending aggregate
    ///
    /// Selection sort with swaps: for each position the first smallest
    /// remaining aggregate is swapped in. Equal aggregates may therefore
    /// change relative order.
    pub fn sort_by_aggregate(&mut self) {
        let len = self.matrices.len();
        for i in 0..len.saturating_sub(1) {
            let mut min_index = i;
            for j in i + 1..len {
                if self.matrices[j].sum() < self.matrices[min_index].sum() {
                    min_index = j;
                }
            }
            self.matrices.swap(i, min_index);
        }
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &DenseMatrix> + '_ {
        self.matrices.iter()
    }

    /// Drop every stored matrix
    pub fn clear(&mut self) {
        self.matrices.clear();
    }
}
