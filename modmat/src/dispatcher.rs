//! Command session: reads commands, applies them to the store, writes output
//!
//! Rejected commands produce one message line and leave the store
//! untouched. Input errors and allocation failure end the session.

use std::fmt;
use std::io::{BufRead, Write};

use modmat_core::{DenseMatrix, ErrorCategory, ModmatError, Residue};
use tracing::{debug, info, instrument, warn};

use crate::command::Command;
use crate::config::SessionConfig;
use crate::error::Result;
use crate::render::Renderer;
use crate::scanner::Scanner;
use crate::store::MatrixStore;

/// Reason a command was refused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    NoSuchMatrix,
    NegativeExponent,
    CannotMultiply,
    InvalidSelection,
    InvalidDimensions,
    UnrecognizedCommand,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            Rejection::NoSuchMatrix => "No matrix with the given index",
            Rejection::NegativeExponent => "Power should be positive",
            Rejection::CannotMultiply => "Cannot perform matrix multiplication",
            Rejection::InvalidSelection => "Invalid row or column index",
            Rejection::InvalidDimensions => "Invalid matrix dimensions",
            Rejection::UnrecognizedCommand => "Unrecognized command",
        };
        write!(f, "{msg}")
    }
}

impl Rejection {
    /// Classify an engine error, passing fatal ones through
    fn from_engine(err: ModmatError) -> std::result::Result<Self, ModmatError> {
        match (err, err.category()) {
            (_, ErrorCategory::Resource) => Err(err),
            (_, ErrorCategory::Shape) => Ok(Rejection::CannotMultiply),
            (ModmatError::InvalidExponent, _) => Ok(Rejection::NegativeExponent),
            (ModmatError::IndexOutOfBounds, _) => Ok(Rejection::InvalidSelection),
            (_, ErrorCategory::Argument) => Ok(Rejection::InvalidDimensions),
        }
    }
}

/// Whether the session should keep reading commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Counters reported when a session ends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub executed: usize,
    pub rejected: usize,
    pub quit: bool,
}

type Step = std::result::Result<(), Rejection>;

/// A command session over one matrix store and one output sink
pub struct Session<W: Write> {
    store: MatrixStore,
    renderer: Renderer,
    out: W,
    summary: SessionSummary,
}

impl<W: Write> Session<W> {
    /// Create a session writing protocol output to `out`
    pub fn new(out: W, config: SessionConfig) -> Self {
        Self {
            store: MatrixStore::with_capacity(config.initial_capacity),
            renderer: Renderer::new(config.output_format),
            out,
            summary: SessionSummary::default(),
        }
    }

    /// Matrices currently held by the session
    pub fn store(&self) -> &MatrixStore {
        &self.store
    }

    pub fn summary(&self) -> SessionSummary {
        self.summary
    }

    /// Consume the session, returning the output sink
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Execute commands until `Q` or end of input
    #[instrument(skip_all)]
    pub fn run<R: BufRead>(&mut self, input: R) -> Result<SessionSummary> {
        info!("session started");
        let mut scanner = Scanner::new(input);

        while let Some(command) = Command::read(&mut scanner).inspect_err(|err| {
            warn!(%err, "aborting session while reading input");
        })? {
            let flow = self.execute(command)?;
            self.out.flush()?;
            if flow == Flow::Quit {
                break;
            }
        }

        info!(
            executed = self.summary.executed,
            rejected = self.summary.rejected,
            stored = self.store.len(),
            "session finished"
        );
        Ok(self.summary)
    }

    /// Apply one command
    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        debug!(command = %command.letter(), "dispatching");
        self.summary.executed += 1;

        let outcome = match command {
            Command::Load { rows, cols, values } => self.load(rows, cols, values)?,
            Command::Dimensions { index } => self.dimensions(index)?,
            Command::Print { index } => self.print(index)?,
            Command::Crop { index, rows, cols } => self.crop(index, &rows, &cols)?,
            Command::Multiply { lhs, rhs } => {
                self.append_product(lhs, rhs, modmat_core::multiply)?
            }
            Command::Transpose { index } => {
                self.replace_with(index, modmat_core::transpose)?
            }
            Command::Sort => {
                self.store.sort_by_aggregate();
                Ok(())
            }
            Command::Power { index, exponent } => {
                self.replace_with(index, |m| modmat_core::power(m, exponent))?
            }
            Command::Free { index } => self.free(index),
            Command::Strassen { lhs, rhs } => self.append_product(lhs, rhs, split_product)?,
            Command::Quit => {
                self.store.clear();
                self.summary.quit = true;
                return Ok(Flow::Quit);
            }
            Command::Unrecognized(_) => Err(Rejection::UnrecognizedCommand),
        };

        if let Err(rejection) = outcome {
            debug!(%rejection, "command rejected");
            self.summary.rejected += 1;
            self.renderer
                .write_rejection(&mut self.out, &rejection.to_string())?;
        }
        Ok(Flow::Continue)
    }

    fn lookup(&self, index: i64) -> std::result::Result<usize, Rejection> {
        self.store.resolve(index).ok_or(Rejection::NoSuchMatrix)
    }

    /// Convert an engine result into a rejection or a fatal error
    fn engine<T>(result: modmat_core::Result<T>) -> Result<std::result::Result<T, Rejection>> {
        match result {
            Ok(value) => Ok(Ok(value)),
            Err(err) => match Rejection::from_engine(err) {
                Ok(rejection) => Ok(Err(rejection)),
                Err(fatal) => {
                    warn!(%fatal, "matrix engine failure");
                    Err(fatal.into())
                }
            },
        }
    }

    fn load(&mut self, rows: i64, cols: i64, values: Vec<Residue>) -> Result<Step> {
        let (Ok(rows), Ok(cols)) = (usize::try_from(rows), usize::try_from(cols)) else {
            return Ok(Err(Rejection::InvalidDimensions));
        };
        Ok(Self::engine(DenseMatrix::from_residues(rows, cols, values))?.map(|matrix| {
            let index = self.store.push(matrix);
            debug!(index, rows, cols, "matrix loaded");
        }))
    }

    fn dimensions(&mut self, index: i64) -> Result<Step> {
        let Some(matrix) = self.store.resolve(index).and_then(|p| self.store.get(p)) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };
        let (rows, cols) = matrix.dimensions();
        self.renderer.write_dimensions(&mut self.out, rows, cols)?;
        Ok(Ok(()))
    }

    fn print(&mut self, index: i64) -> Result<Step> {
        let Some(matrix) = self.store.resolve(index).and_then(|p| self.store.get(p)) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };
        self.renderer.write_matrix(&mut self.out, matrix)?;
        Ok(Ok(()))
    }

    fn crop(&mut self, index: i64, rows: &[i64], cols: &[i64]) -> Result<Step> {
        let Ok(position) = self.lookup(index) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };
        let to_positions = |indices: &[i64]| -> Option<Vec<usize>> {
            indices.iter().map(|&i| usize::try_from(i).ok()).collect()
        };
        let (Some(rows), Some(cols)) = (to_positions(rows), to_positions(cols)) else {
            return Ok(Err(Rejection::InvalidSelection));
        };

        self.replace_at(position, |m| modmat_core::submatrix(m, &rows, &cols))
    }

    fn replace_with<F>(&mut self, index: i64, op: F) -> Result<Step>
    where
        F: FnOnce(&DenseMatrix) -> modmat_core::Result<DenseMatrix>,
    {
        match self.lookup(index) {
            Ok(position) => self.replace_at(position, op),
            Err(rejection) => Ok(Err(rejection)),
        }
    }

    fn replace_at<F>(&mut self, position: usize, op: F) -> Result<Step>
    where
        F: FnOnce(&DenseMatrix) -> modmat_core::Result<DenseMatrix>,
    {
        let Some(source) = self.store.get(position) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };
        Ok(Self::engine(op(source))?.map(|result| {
            // The displaced matrix is dropped here
            self.store.replace(position, result);
        }))
    }

    fn append_product<F>(&mut self, lhs: i64, rhs: i64, op: F) -> Result<Step>
    where
        F: FnOnce(&DenseMatrix, &DenseMatrix) -> modmat_core::Result<DenseMatrix>,
    {
        let (Ok(l), Ok(r)) = (self.lookup(lhs), self.lookup(rhs)) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };
        let (Some(a), Some(b)) = (self.store.get(l), self.store.get(r)) else {
            return Ok(Err(Rejection::NoSuchMatrix));
        };

        Ok(Self::engine(op(a, b))?.map(|product| {
            let index = self.store.push(product);
            debug!(index, "product stored");
        }))
    }

    fn free(&mut self, index: i64) -> Step {
        let position = self.lookup(index)?;
        self.store.remove(position);
        Ok(())
    }
}

/// Strassen product for the `S` command, which only splits even sizes
fn split_product(a: &DenseMatrix, b: &DenseMatrix) -> modmat_core::Result<DenseMatrix> {
    if a.rows() % 2 == 1 || b.rows() % 2 == 1 {
        return Err(ModmatError::NotPowerOfTwo);
    }
    modmat_core::strassen(a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    fn run(script: &str) -> (String, SessionSummary) {
        let mut session = Session::new(Vec::new(), SessionConfig::default());
        let summary = session.run(script.as_bytes()).unwrap();
        (String::from_utf8(session.into_inner()).unwrap(), summary)
    }

    #[test]
    fn test_rejection_messages() {
        assert_eq!(
            Rejection::NoSuchMatrix.to_string(),
            "No matrix with the given index"
        );
        assert_eq!(
            Rejection::from_engine(ModmatError::NotPowerOfTwo),
            Ok(Rejection::CannotMultiply)
        );
        assert_eq!(
            Rejection::from_engine(ModmatError::InvalidExponent),
            Ok(Rejection::NegativeExponent)
        );
        assert_eq!(
            Rejection::from_engine(ModmatError::IndexOutOfBounds),
            Ok(Rejection::InvalidSelection)
        );
        assert_eq!(
            Rejection::from_engine(ModmatError::AllocationFailure),
            Err(ModmatError::AllocationFailure)
        );
    }

    #[test]
    fn test_load_print_dimensions() {
        let (out, summary) = run("L 2 3\n1 2 3\n4 5 6\nD 0\nP 0\nQ\n");
        assert_eq!(out, "2 3\n1 2 3 \n4 5 6 \n");
        assert_eq!(summary.executed, 4);
        assert_eq!(summary.rejected, 0);
        assert!(summary.quit);
    }

    #[test]
    fn test_bad_index() {
        let (out, summary) = run("D 0\nP -1\nT 3\nF 0\nM 0 0\nQ");
        assert_eq!(out, "No matrix with the given index\n".repeat(5));
        assert_eq!(summary.rejected, 5);
    }

    #[test]
    fn test_execute_without_input() {
        let mut session = Session::new(
            Vec::new(),
            SessionConfig::default().with_output_format(OutputFormat::Json),
        );
        let flow = session
            .execute(Command::Load {
                rows: 1,
                cols: 1,
                values: vec![Residue::new(7)],
            })
            .unwrap();
        assert_eq!(flow, Flow::Continue);
        assert_eq!(session.execute(Command::Quit).unwrap(), Flow::Quit);
        assert!(session.store().is_empty());
        assert!(session.into_inner().is_empty());
    }

    #[test]
    fn test_strassen_command_needs_even_size() {
        let (out, summary) = run("L 1 1 6\nL 1 1 8\nS 0 1\nD 2\nM 0 1\nP 2\nQ");
        assert_eq!(
            out,
            "Cannot perform matrix multiplication\nNo matrix with the given index\n48 \n"
        );
        assert_eq!(summary.rejected, 2);
    }

    #[test]
    fn test_end_of_input_without_quit() {
        let (out, summary) = run("L 1 1 5 P 0");
        assert_eq!(out, "5 \n");
        assert!(!summary.quit);
    }
}
