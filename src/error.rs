//! Global error handling for tidyfs
//!
//! This module provides a centralized error type that can represent errors
//! from all stages of the organize pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Global error type for tidyfs operations
#[derive(Error, Debug)]
pub enum TidyFsError {
    /// The scan root is missing or not a directory
    #[error("Scan error: {0}")]
    Scan(String),

    /// A filter argument could not be compiled
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// Two plan entries (or a plan entry and an on-disk file) resolved to
    /// the same destination
    #[error("Destination collision: {} is claimed by {} and {}", destination.display(), first.display(), second.display())]
    Collision {
        first: PathBuf,
        second: PathBuf,
        destination: PathBuf,
    },

    /// A naming or mapping argument has the wrong shape
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for tidyfs operations
pub type Result<T> = std::result::Result<T, TidyFsError>;

/// Creates a TidyFsError with a formatted message
#[macro_export]
macro_rules! error {
    ($error_type:ident, $($arg:tt)*) => {
        $crate::error::TidyFsError::$error_type(format!($($arg)*))
    };
}

/// Returns an error result with a formatted message
#[macro_export]
macro_rules! bail {
    ($error_type:ident, $($arg:tt)*) => {
        return Err($crate::error!($error_type, $($arg)*))
    };
}

/// Ensures a condition is true, otherwise returns an error
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $error_type:ident, $($arg:tt)*) => {
        if !($cond) {
            $crate::bail!($error_type, $($arg)*)
        }
    };
}
