#![no_std]

//! modmat-core - Modular integer matrix arithmetic
//!
//! This crate provides the arithmetic engine for dense integer matrices
//! whose elements live modulo a fixed prime ([`MODULUS`] = 10007):
//! elementwise addition and subtraction, schoolbook and Strassen
//! multiplication, transpose, submatrix extraction and exponentiation by
//! squaring.
//!
//! The crate performs no I/O. Storage, command parsing and output belong
//! to the `modmat` crate.
//!
//! ```rust
//! use modmat_core::{multiply, strassen, DenseMatrix};
//!
//! let a = DenseMatrix::from_values(2, 2, &[1, 2, 3, 4]).unwrap();
//! let b = DenseMatrix::from_values(2, 2, &[5, 6, 7, 8]).unwrap();
//!
//! let c = multiply(&a, &b).unwrap();
//! assert_eq!(c.as_raw(), &[19, 22, 43, 50]);
//! assert_eq!(strassen(&a, &b).unwrap(), c);
//! ```

extern crate alloc;

pub mod constants;
pub mod element;
pub mod error;
pub mod matrix;
pub mod modular;
pub mod ops;
pub mod traits;

pub use constants::MODULUS;
pub use element::Residue;
pub use error::{ErrorCategory, ModmatError, Result};
pub use matrix::DenseMatrix;
pub use modular::reduce;
pub use ops::{add, multiply, power, strassen, submatrix, subtract, transpose};
pub use traits::MatrixAccess;
