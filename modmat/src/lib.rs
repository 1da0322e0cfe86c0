//! modmat - In-memory modular matrix store with a command protocol
//!
//! This library drives the `modmat-core` arithmetic engine from a stream of
//! single-letter commands, keeping loaded and computed matrices in an
//! ordered store.
//!
//! ## Architecture
//!
//! - **modmat-core**: modular arithmetic, dense matrices, Strassen and
//!   power (no I/O)
//! - **modmat**: the matrix store, command parsing, session dispatch and
//!   output rendering
//!
//! ## Quick Start
//!
//! ```rust
//! use modmat::{Session, SessionConfig};
//!
//! let script = "L 2 2 1 2 3 4\nL 2 2 5 6 7 8\nS 0 1\nP 2\nQ\n";
//! let mut session = Session::new(Vec::new(), SessionConfig::default());
//! session.run(script.as_bytes()).unwrap();
//!
//! let output = String::from_utf8(session.into_inner()).unwrap();
//! assert_eq!(output, "19 22 \n43 50 \n");
//! ```

// Re-export the arithmetic engine
pub use modmat_core::{
    add, multiply, power, reduce, strassen, submatrix, subtract, transpose, DenseMatrix,
    ErrorCategory, MatrixAccess, ModmatError, Residue, MODULUS,
};

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod render;
pub mod scanner;
pub mod store;

pub use command::Command;
pub use config::{OutputFormat, SessionConfig};
pub use dispatcher::{Flow, Rejection, Session, SessionSummary};
pub use error::SessionError;
pub use render::Renderer;
pub use scanner::Scanner;
pub use store::MatrixStore;
