//! Convenience result type alias for Salat Board.

use crate::error::AppError;

/// A specialized `Result` type for Salat Board operations.
pub type AppResult<T> = Result<T, AppError>;
