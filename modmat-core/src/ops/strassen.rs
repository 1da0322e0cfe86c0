//! Strassen multiplication for power-of-two square matrices
//!
//! Each level splits both operands into four quadrants, forms seven
//! products of quadrant combinations recursively and recombines them into
//! the four quadrants of the result:
//!
//! ```text
//! P1 = A11 (B12 - B22)        C11 = P5 + P4 + P6 - P2
//! P2 = (A11 + A12) B22        C12 = P1 + P2
//! P3 = (A21 + A22) B11        C21 = P3 + P4
//! P4 = A22 (B21 - B11)        C22 = P5 + P1 - P3 - P7
//! P5 = (A11 + A22)(B11 + B22)
//! P6 = (A12 - A22)(B21 + B22)
//! P7 = (A11 - A21)(B11 + B12)
//! ```
//!
//! Every block is an owned buffer scoped to the call that created it, so
//! an allocation failure at any depth unwinds through `?` and releases all
//! sibling blocks on the way out.

use alloc::vec::Vec;

use crate::element::Residue;
use crate::error::{ModmatError, Result};
use crate::matrix::{checked_len, try_with_capacity, DenseMatrix};
use crate::ops::basic::{add_blocks, sub_blocks};

/// Multiply two `n x n` matrices with Strassen's algorithm
///
/// Both operands must be square with the same size `n`, and `n` must be a
/// power of two. Validation happens once here: halving a power of two
/// yields a power of two, so the recursion never sees an odd size.
pub fn strassen(a: &DenseMatrix, b: &DenseMatrix) -> Result<DenseMatrix> {
    if !a.is_square() || !b.is_square() {
        return Err(ModmatError::NotSquare);
    }
    if a.rows() != b.rows() {
        return Err(ModmatError::DimensionMismatch);
    }

    let n = a.rows();
    if !n.is_power_of_two() {
        return Err(ModmatError::NotPowerOfTwo);
    }

    let data = multiply_blocks(a.as_slice(), b.as_slice(), n)?;
    Ok(DenseMatrix::from_parts(n, n, data))
}

/// Recursive step over row-major `n x n` blocks
fn multiply_blocks(a: &[Residue], b: &[Residue], n: usize) -> Result<Vec<Residue>> {
    debug_assert!(n.is_power_of_two());
    debug_assert_eq!(a.len(), n * n);
    debug_assert_eq!(b.len(), n * n);

    if n == 1 {
        let mut out = try_with_capacity(1)?;
        out.push(a[0] * b[0]);
        return Ok(out);
    }

    let k = n / 2;

    // Input quadrants are dropped at the end of this block, before the
    // result quadrants are formed.
    let [p1, p2, p3, p4, p5, p6, p7] = {
        let [a11, a12, a21, a22] = split_quadrants(a, n)?;
        let [b11, b12, b21, b22] = split_quadrants(b, n)?;

        let p1 = multiply_blocks(&a11, &sub_blocks(&b12, &b22)?, k)?;
        let p2 = multiply_blocks(&add_blocks(&a11, &a12)?, &b22, k)?;
        let p3 = multiply_blocks(&add_blocks(&a21, &a22)?, &b11, k)?;
        let p4 = multiply_blocks(&a22, &sub_blocks(&b21, &b11)?, k)?;
        let p5 = multiply_blocks(&add_blocks(&a11, &a22)?, &add_blocks(&b11, &b22)?, k)?;
        let p6 = multiply_blocks(&sub_blocks(&a12, &a22)?, &add_blocks(&b21, &b22)?, k)?;
        let p7 = multiply_blocks(&sub_blocks(&a11, &a21)?, &add_blocks(&b11, &b12)?, k)?;

        [p1, p2, p3, p4, p5, p6, p7]
    };

    let c11 = sub_blocks(&add_blocks(&add_blocks(&p5, &p4)?, &p6)?, &p2)?;
    let c12 = add_blocks(&p1, &p2)?;
    let c21 = add_blocks(&p3, &p4)?;
    let c22 = sub_blocks(&sub_blocks(&add_blocks(&p5, &p1)?, &p3)?, &p7)?;

    join_quadrants(&c11, &c12, &c21, &c22, k)
}

/// Copy the four `n/2 x n/2` quadrants out of an `n x n` block
///
/// Returned in order top-left, top-right, bottom-left, bottom-right.
fn split_quadrants(src: &[Residue], n: usize) -> Result<[Vec<Residue>; 4]> {
    let k = n / 2;
    let len = checked_len(k, k)?;
    let mut q11 = try_with_capacity(len)?;
    let mut q12 = try_with_capacity(len)?;
    let mut q21 = try_with_capacity(len)?;
    let mut q22 = try_with_capacity(len)?;

    for i in 0..k {
        let top = &src[i * n..(i + 1) * n];
        let bottom = &src[(k + i) * n..(k + i + 1) * n];
        q11.extend_from_slice(&top[..k]);
        q12.extend_from_slice(&top[k..]);
        q21.extend_from_slice(&bottom[..k]);
        q22.extend_from_slice(&bottom[k..]);
    }

    Ok([q11, q12, q21, q22])
}

/// Inverse of [`split_quadrants`]: lay four `k x k` blocks into a `2k x 2k` block
fn join_quadrants(
    c11: &[Residue],
    c12: &[Residue],
    c21: &[Residue],
    c22: &[Residue],
    k: usize,
) -> Result<Vec<Residue>> {
    let n = 2 * k;
    let mut out = try_with_capacity(checked_len(n, n)?)?;

    for (left, right) in [(c11, c12), (c21, c22)] {
        for i in 0..k {
            out.extend_from_slice(&left[i * k..(i + 1) * k]);
            out.extend_from_slice(&right[i * k..(i + 1) * k]);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::basic::multiply;
    use crate::ops::test_support::random_matrix;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_scalar_base_case() {
        let a = DenseMatrix::from_values(1, 1, &[6]).unwrap();
        let b = DenseMatrix::from_values(1, 1, &[8]).unwrap();
        let c = strassen(&a, &b).unwrap();
        assert_eq!(c.as_raw(), &[48]);
        assert_eq!(c.sum().value(), 48);
    }

    #[test]
    fn test_two_by_two() {
        let a = DenseMatrix::from_values(2, 2, &[1, 2, 3, 4]).unwrap();
        let b = DenseMatrix::from_values(2, 2, &[5, 6, 7, 8]).unwrap();
        let c = strassen(&a, &b).unwrap();
        assert_eq!(c.as_raw(), &[19, 22, 43, 50]);
        assert_eq!(c, multiply(&a, &b).unwrap());
    }

    #[test]
    fn test_matches_schoolbook() {
        let mut rng = StdRng::seed_from_u64(42);
        for n in [1, 2, 4, 8, 16, 32] {
            let a = random_matrix(&mut rng, n, n);
            let b = random_matrix(&mut rng, n, n);
            assert_eq!(
                strassen(&a, &b).unwrap(),
                multiply(&a, &b).unwrap(),
                "size {n}"
            );
        }
    }

    #[test]
    fn test_reduces_large_values() {
        let n = 4;
        let a = DenseMatrix::from_values(n, n, &[10006; 16]).unwrap();
        let c = strassen(&a, &a).unwrap();
        // Each entry is 4 * (-1)(-1) = 4
        assert!(c.as_raw().iter().all(|&v| v == 4));
        assert_eq!(c.sum().value(), 64);
    }

    #[test]
    fn test_quadrant_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        let m = random_matrix(&mut rng, 8, 8);
        let [q11, q12, q21, q22] = split_quadrants(m.as_slice(), 8).unwrap();
        assert_eq!(q12[0], m.get(0, 4).unwrap());
        assert_eq!(q21[0], m.get(4, 0).unwrap());
        let joined = join_quadrants(&q11, &q12, &q21, &q22, 4).unwrap();
        assert_eq!(joined.as_slice(), m.as_slice());
    }

    #[test]
    fn test_rejects_invalid_shapes() {
        let rect = DenseMatrix::from_values(2, 4, &[0; 8]).unwrap();
        let two = DenseMatrix::from_values(2, 2, &[0; 4]).unwrap();
        let four = DenseMatrix::from_values(4, 4, &[0; 16]).unwrap();
        let six = DenseMatrix::from_values(6, 6, &[0; 36]).unwrap();
        let empty = DenseMatrix::from_values(0, 0, &[]).unwrap();

        assert_eq!(strassen(&rect, &two), Err(ModmatError::NotSquare));
        assert_eq!(strassen(&two, &four), Err(ModmatError::DimensionMismatch));
        assert_eq!(strassen(&six, &six), Err(ModmatError::NotPowerOfTwo));
        assert_eq!(strassen(&empty, &empty), Err(ModmatError::NotPowerOfTwo));
    }
}
