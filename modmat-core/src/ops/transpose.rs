//! Matrix transpose

use crate::error::Result;
use crate::matrix::{try_alloc, DenseMatrix};

/// Transpose `a`
///
/// The aggregate is carried over unchanged since transposition only
/// permutes elements.
pub fn transpose(a: &DenseMatrix) -> Result<DenseMatrix> {
    let (rows, cols) = a.dimensions();
    let mut data = try_alloc(a.len())?;

    for (i, row) in a.iter_rows().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            data[j * rows + i] = value;
        }
    }

    Ok(DenseMatrix::with_aggregate(cols, rows, data, a.sum()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::test_support::random_matrix;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_transpose_rectangular() {
        let a = DenseMatrix::from_values(2, 3, &[1, 2, 3, 4, 5, 6]).unwrap();
        let t = transpose(&a).unwrap();

        assert_eq!(t.dimensions(), (3, 2));
        assert_eq!(t.as_raw(), &[1, 4, 2, 5, 3, 6]);
        assert_eq!(t.sum(), a.sum());
    }

    #[test]
    fn test_transpose_scalar() {
        let a = DenseMatrix::from_values(1, 1, &[3]).unwrap();
        let t = transpose(&a).unwrap();
        assert_eq!(t.as_raw(), &[3]);
        assert_eq!(t.sum().value(), 3);
    }

    #[test]
    fn test_transpose_involution() {
        let mut rng = StdRng::seed_from_u64(7);
        for (rows, cols) in [(1, 5), (4, 4), (7, 3), (0, 2)] {
            let a = random_matrix(&mut rng, rows, cols);
            let t = transpose(&a).unwrap();
            assert_eq!(t.sum(), a.sum());
            assert_eq!(transpose(&t).unwrap(), a);
        }
    }
}
