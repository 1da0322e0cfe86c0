//! Command protocol
//!
//! Each command is one letter followed by its integer arguments:
//!
//! | Letter | Arguments                  | Meaning                              |
//! |--------|----------------------------|--------------------------------------|
//! | `L`    | `m n v1 .. v(m*n)`         | load an `m x n` matrix               |
//! | `D`    | `i`                        | print dimensions                     |
//! | `P`    | `i`                        | print elements                       |
//! | `C`    | `i l r1 .. rl k c1 .. ck`  | keep only the listed rows/columns    |
//! | `M`    | `i j`                      | append the product `i * j`           |
//! | `T`    | `i`                        | transpose in place                   |
//! | `O`    |                            | sort by element sum                  |
//! | `R`    | `i p`                      | raise to the power `p` in place      |
//! | `F`    | `i`                        | free and compact                     |
//! | `S`    | `i j`                      | append the Strassen product `i * j`  |
//! | `Q`    |                            | release everything and stop          |

use std::io::BufRead;

use modmat_core::{ModmatError, Residue};

use crate::error::{Result, SessionError};
use crate::scanner::Scanner;

/// Upper bound on speculative pre-allocation for argument lists
const MAX_PREALLOCATED_ARGS: usize = 1 << 16;

/// One parsed protocol command with its raw, unvalidated arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load { rows: i64, cols: i64, values: Vec<Residue> },
    Dimensions { index: i64 },
    Print { index: i64 },
    Crop { index: i64, rows: Vec<i64>, cols: Vec<i64> },
    Multiply { lhs: i64, rhs: i64 },
    Transpose { index: i64 },
    Sort,
    Power { index: i64, exponent: i64 },
    Free { index: i64 },
    Strassen { lhs: i64, rhs: i64 },
    Quit,
    Unrecognized(u8),
}

impl Command {
    /// Read the next command and all of its arguments
    ///
    /// Returns `None` at end of input. `Load` with a negative dimension
    /// reads no values; the dispatcher rejects it.
    pub fn read<R: BufRead>(scanner: &mut Scanner<R>) -> Result<Option<Command>> {
        let Some(letter) = scanner.next_byte()? else {
            return Ok(None);
        };

        let command = match letter {
            b'L' => {
                let rows = scanner.next_int("row count")?;
                let cols = scanner.next_int("column count")?;
                let values = match (usize::try_from(rows), usize::try_from(cols)) {
                    (Ok(rows), Ok(cols)) => read_elements(scanner, rows, cols)?,
                    _ => Vec::new(),
                };
                Command::Load { rows, cols, values }
            }
            b'D' => Command::Dimensions {
                index: scanner.next_int("matrix index")?,
            },
            b'P' => Command::Print {
                index: scanner.next_int("matrix index")?,
            },
            b'C' => {
                let index = scanner.next_int("matrix index")?;
                let row_count = read_count(scanner, "row index count")?;
                let rows = read_list(scanner, row_count, "row index")?;
                let col_count = read_count(scanner, "column index count")?;
                let cols = read_list(scanner, col_count, "column index")?;
                Command::Crop { index, rows, cols }
            }
            b'M' => Command::Multiply {
                lhs: scanner.next_int("matrix index")?,
                rhs: scanner.next_int("matrix index")?,
            },
            b'T' => Command::Transpose {
                index: scanner.next_int("matrix index")?,
            },
            b'O' => Command::Sort,
            b'R' => Command::Power {
                index: scanner.next_int("matrix index")?,
                exponent: scanner.next_int("exponent")?,
            },
            b'F' => Command::Free {
                index: scanner.next_int("matrix index")?,
            },
            b'S' => Command::Strassen {
                lhs: scanner.next_int("matrix index")?,
                rhs: scanner.next_int("matrix index")?,
            },
            b'Q' => Command::Quit,
            other => Command::Unrecognized(other),
        };

        Ok(Some(command))
    }

    /// Protocol letter for this command
    pub fn letter(&self) -> char {
        match self {
            Command::Load { .. } => 'L',
            Command::Dimensions { .. } => 'D',
            Command::Print { .. } => 'P',
            Command::Crop { .. } => 'C',
            Command::Multiply { .. } => 'M',
            Command::Transpose { .. } => 'T',
            Command::Sort => 'O',
            Command::Power { .. } => 'R',
            Command::Free { .. } => 'F',
            Command::Strassen { .. } => 'S',
            Command::Quit => 'Q',
            Command::Unrecognized(byte) => char::from(*byte),
        }
    }
}

/// Read `rows * cols` matrix elements, reducing each as it arrives
///
/// The buffer is reserved up front so an oversized load reports
/// `AllocationFailure` instead of aborting.
fn read_elements<R: BufRead>(
    scanner: &mut Scanner<R>,
    rows: usize,
    cols: usize,
) -> Result<Vec<Residue>> {
    let count = rows
        .checked_mul(cols)
        .ok_or(ModmatError::ArraySizeOverflow)?;
    let mut values = Vec::new();
    values
        .try_reserve_exact(count)
        .map_err(|_| ModmatError::AllocationFailure)?;
    for _ in 0..count {
        values.push(Residue::new(scanner.next_int("matrix element")?));
    }
    Ok(values)
}

/// Read a list length, rejecting negative counts
fn read_count<R: BufRead>(scanner: &mut Scanner<R>, what: &'static str) -> Result<i64> {
    let count = scanner.next_int(what)?;
    if count < 0 {
        return Err(SessionError::Parse {
            expected: what,
            found: count.to_string(),
        });
    }
    Ok(count)
}

fn read_list<R: BufRead>(
    scanner: &mut Scanner<R>,
    count: i64,
    what: &'static str,
) -> Result<Vec<i64>> {
    let count = usize::try_from(count).unwrap_or(0);
    let mut values = Vec::with_capacity(count.min(MAX_PREALLOCATED_ARGS));
    for _ in 0..count {
        values.push(scanner.next_int(what)?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all(input: &str) -> Vec<Command> {
        let mut scanner = Scanner::new(input.as_bytes());
        let mut commands = Vec::new();
        while let Some(command) = Command::read(&mut scanner).unwrap() {
            commands.push(command);
        }
        commands
    }

    #[test]
    fn test_parse_script() {
        let commands = parse_all("L 2 2\n1 2\n3 4\nD 0\nC 0 1 1 2 0 1\nR 0 -3\nO\nx Q");

        assert_eq!(
            commands,
            vec![
                Command::Load {
                    rows: 2,
                    cols: 2,
                    values: [1, 2, 3, 4].map(Residue::new).to_vec()
                },
                Command::Dimensions { index: 0 },
                Command::Crop {
                    index: 0,
                    rows: vec![1],
                    cols: vec![0, 1]
                },
                Command::Power {
                    index: 0,
                    exponent: -3
                },
                Command::Sort,
                Command::Unrecognized(b'x'),
                Command::Quit,
            ]
        );
    }

    #[test]
    fn test_load_negative_dimensions_reads_no_values() {
        let commands = parse_all("L -1 3 P 0");
        assert_eq!(
            commands,
            vec![
                Command::Load {
                    rows: -1,
                    cols: 3,
                    values: vec![]
                },
                Command::Print { index: 0 },
            ]
        );
    }

    #[test]
    fn test_truncated_arguments() {
        let mut scanner = Scanner::new("M 0".as_bytes());
        assert!(matches!(
            Command::read(&mut scanner),
            Err(SessionError::UnexpectedEof("matrix index"))
        ));

        let mut scanner = Scanner::new("L 2 2 1 2 3".as_bytes());
        assert!(matches!(
            Command::read(&mut scanner),
            Err(SessionError::UnexpectedEof("matrix element"))
        ));
    }

    #[test]
    fn test_load_reduces_while_reading() {
        let commands = parse_all("L 1 3 -1 10007 20015");
        assert_eq!(
            commands,
            vec![Command::Load {
                rows: 1,
                cols: 3,
                values: vec![Residue::new(10006), Residue::ZERO, Residue::ONE]
            }]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_load_reports_allocation_failure() {
        // 2^62 elements cannot be reserved
        let mut scanner = Scanner::new("L 2147483648 2147483648 1".as_bytes());
        assert!(matches!(
            Command::read(&mut scanner),
            Err(SessionError::Core(ModmatError::AllocationFailure))
        ));

        let mut scanner = Scanner::new("L 4294967296 4294967296".as_bytes());
        assert!(matches!(
            Command::read(&mut scanner),
            Err(SessionError::Core(ModmatError::ArraySizeOverflow))
        ));
    }

    #[test]
    fn test_negative_crop_count() {
        let mut scanner = Scanner::new("C 0 -1".as_bytes());
        assert!(matches!(
            Command::read(&mut scanner),
            Err(SessionError::Parse { .. })
        ));
    }

    #[test]
    fn test_letters() {
        assert_eq!(Command::Sort.letter(), 'O');
        assert_eq!(Command::Unrecognized(b'z').letter(), 'z');
        assert_eq!(Command::Strassen { lhs: 0, rhs: 1 }.letter(), 'S');
    }
}
