//! Output encoding for matrices, dimensions and rejection messages

use std::io::Write;

use modmat_core::MatrixAccess;
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::Result;

#[derive(Serialize)]
struct Dimensions {
    rows: usize,
    cols: usize,
}

#[derive(Serialize)]
struct Rejected<'a> {
    error: &'a str,
}

/// Writes protocol output in the configured format
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    format: OutputFormat,
}

impl Renderer {
    /// Create a renderer for the given output format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    fn write_json<W: Write, T: Serialize + ?Sized>(&self, out: &mut W, value: &T) -> Result<()> {
        serde_json::to_writer(&mut *out, value)?;
        writeln!(out)?;
        Ok(())
    }

    /// Write every element of a matrix
    ///
    /// Text output puts each row on its own line with every value followed
    /// by a single space.
    pub fn write_matrix<W, M>(&self, out: &mut W, matrix: &M) -> Result<()>
    where
        W: Write,
        M: MatrixAccess + Serialize,
    {
        match self.format {
            OutputFormat::Json => self.write_json(out, matrix),
            OutputFormat::Text => {
                let (rows, cols) = matrix.dimensions();
                for row in 0..rows {
                    for value in (0..cols).filter_map(|col| matrix.get_element(row, col)) {
                        write!(out, "{value} ")?;
                    }
                    writeln!(out)?;
                }
                Ok(())
            }
        }
    }

    pub fn write_dimensions<W: Write>(&self, out: &mut W, rows: usize, cols: usize) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(out, &Dimensions { rows, cols }),
            OutputFormat::Text => {
                writeln!(out, "{rows} {cols}")?;
                Ok(())
            }
        }
    }

    pub fn write_rejection<W: Write>(&self, out: &mut W, message: &str) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.write_json(out, &Rejected { error: message }),
            OutputFormat::Text => {
                writeln!(out, "{message}")?;
                Ok(())
            }
        }
    }
}
