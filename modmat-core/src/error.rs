//! Error types for modular matrix operations

/// Errors that can occur during matrix arithmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModmatError {
    /// Elementwise operands differ in shape
    ShapeMismatch,
    /// Inner dimensions of a product do not agree
    DimensionMismatch,
    /// Operation requires a square matrix
    NotSquare,
    /// Strassen operand size is not a power of two
    NotPowerOfTwo,
    /// Negative exponent passed to power
    InvalidExponent,
    /// Row or column index outside the matrix
    IndexOutOfBounds,
    /// Element buffer length disagrees with rows * cols
    DataLengthMismatch,
    /// rows * cols does not fit in usize
    ArraySizeOverflow,
    /// Result or intermediate block could not be allocated
    AllocationFailure,
}

/// Coarse grouping of errors for callers that only need to know who is at fault
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Operand shapes are incompatible with the operation
    Shape,
    /// An argument other than a shape is invalid
    Argument,
    /// The system ran out of resources
    Resource,
}

impl ModmatError {
    /// Get the category this error belongs to
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ModmatError::ShapeMismatch
            | ModmatError::DimensionMismatch
            | ModmatError::NotSquare
            | ModmatError::NotPowerOfTwo => ErrorCategory::Shape,
            ModmatError::InvalidExponent
            | ModmatError::IndexOutOfBounds
            | ModmatError::DataLengthMismatch => ErrorCategory::Argument,
            ModmatError::ArraySizeOverflow | ModmatError::AllocationFailure => {
                ErrorCategory::Resource
            }
        }
    }

    /// Whether the error should abort the whole session rather than one command
    pub const fn is_fatal(&self) -> bool {
        matches!(self.category(), ErrorCategory::Resource)
    }
}

impl core::fmt::Display for ModmatError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            ModmatError::ShapeMismatch => "Operand shapes differ",
            ModmatError::DimensionMismatch => "Inner dimensions do not match",
            ModmatError::NotSquare => "Matrix is not square",
            ModmatError::NotPowerOfTwo => "Matrix size is not a power of two",
            ModmatError::InvalidExponent => "Exponent must not be negative",
            ModmatError::IndexOutOfBounds => "Index out of bounds",
            ModmatError::DataLengthMismatch => "Element count does not match dimensions",
            ModmatError::ArraySizeOverflow => "Matrix size overflows usize",
            ModmatError::AllocationFailure => "Allocation failed",
        };
        write!(f, "{msg}")
    }
}

impl core::error::Error for ModmatError {}

/// Result type for matrix operations
pub type Result<T> = core::result::Result<T, ModmatError>;
