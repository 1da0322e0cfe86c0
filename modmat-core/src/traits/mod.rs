//! Abstract interfaces over modular matrices
//!
//! Traits here let consumers read any matrix representation without caring
//! how its elements are stored.

pub mod matrix;

pub use matrix::MatrixAccess;
