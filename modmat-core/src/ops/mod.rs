//! Matrix arithmetic engine
//!
//! Every operation borrows its inputs and returns a freshly allocated
//! result; nothing here retains a matrix past the call that produced it.

pub mod basic;
pub mod power;
pub mod strassen;
pub mod submatrix;
pub mod transpose;

pub use basic::{add, multiply, subtract};
pub use power::power;
pub use strassen::strassen;
pub use submatrix::submatrix;
pub use transpose::transpose;
