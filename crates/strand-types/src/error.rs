//! Error types for the Strand engine.
//!
//! All crates return `StrandResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Strand engine.
#[derive(Debug, Error)]
pub enum StrandError {
    /// Batched arrays have mismatched lengths. Always a caller bug.
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    Shape {
        context: String,
        expected: usize,
        actual: usize,
    },

    /// Degenerate geometry (zero length, singular inertia, ...).
    /// The current run should stop with the offending state intact.
    #[error("Physical state error in rod {rod}, index {index}: {reason}")]
    PhysicalState {
        rod: usize,
        index: usize,
        reason: String,
    },

    /// Incompatible systems handed to one memory block.
    #[error("Packing error: {0}")]
    Packing(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Time integration stopped on an error raised during a step.
    #[error("Integration stopped after step {last_valid_step}: {source}")]
    Integration {
        last_valid_step: u64,
        #[source]
        source: Box<StrandError>,
    },
}

impl StrandError {
    /// Shorthand for a [`StrandError::Shape`] error.
    pub fn shape(context: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::Shape {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Shorthand for a [`StrandError::PhysicalState`] error.
    pub fn physical(rod: usize, index: usize, reason: impl Into<String>) -> Self {
        Self::PhysicalState {
            rod,
            index,
            reason: reason.into(),
        }
    }

    /// Returns true for errors a caller can recover from by aborting the run.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StrandError::PhysicalState { .. } => true,
            StrandError::Integration { source, .. } => source.is_recoverable(),
            _ => false,
        }
    }
}

/// Convenience alias for `Result<T, StrandError>`.
pub type StrandResult<T> = Result<T, StrandError>;
