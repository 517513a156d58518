use thiserror::Error;

/// Custom error type for Itersol
///
/// This error type is used to wrap all possible errors that can occur when using Itersol
#[derive(Error, Debug)]
pub enum ItersolError {
    #[error("Linear solver error: {0}")]
    LinearSolverError(#[from] LinearSolverError),
    #[error("Matrix error: {0}")]
    MatrixError(#[from] MatrixError),
    #[error("Error: {0}")]
    Other(String),
}

/// Possible errors that can occur when solving a linear problem
#[derive(Error, Debug)]
pub enum LinearSolverError {
    #[error("Right-hand side has wrong length: expected {expected}, got {found}")]
    RhsWrongLength { expected: usize, found: usize },
    #[error("Error: {0}")]
    Other(String),
}

/// Possible errors for matrix operations
#[derive(Error, Debug)]
pub enum MatrixError {
    #[error("Index out of bounds")]
    IndexOutOfBounds,
    #[error("Error: {0}")]
    Other(String),
}

#[macro_export]
macro_rules! matrix_error {
    ($variant:ident) => {
        ItersolError::from(MatrixError::$variant)
    };
    ($variant:ident, $($arg:tt)*) => {
        ItersolError::from(MatrixError::$variant($($arg)*))
    };
}
