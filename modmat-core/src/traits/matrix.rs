//! Read-only matrix access trait

use crate::element::Residue;
use crate::matrix::DenseMatrix;

/// Element-level read access to a modular matrix
///
/// Implementors guarantee that every element returned lies in
/// `[0, MODULUS)` and that `aggregate` equals the reduced sum of all
/// elements.
pub trait MatrixAccess {
    /// Get an element at the specified position
    ///
    /// Returns `None` if the position is out of bounds.
    fn get_element(&self, row: usize, col: usize) -> Option<Residue>;

    /// Get matrix dimensions as (rows, cols)
    fn dimensions(&self) -> (usize, usize);

    /// Reduced sum of all elements
    fn aggregate(&self) -> Residue;

    /// True when rows == cols
    fn is_square(&self) -> bool {
        let (rows, cols) = self.dimensions();
        rows == cols
    }
}

impl MatrixAccess for DenseMatrix {
    fn get_element(&self, row: usize, col: usize) -> Option<Residue> {
        self.get(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        DenseMatrix::dimensions(self)
    }

    fn aggregate(&self) -> Residue {
        self.sum()
    }
}

impl<M: MatrixAccess + ?Sized> MatrixAccess for &M {
    fn get_element(&self, row: usize, col: usize) -> Option<Residue> {
        (**self).get_element(row, col)
    }

    fn dimensions(&self) -> (usize, usize) {
        (**self).dimensions()
    }

    fn aggregate(&self) -> Residue {
        (**self).aggregate()
    }
}
