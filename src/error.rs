//! Boundary validation errors
//!
//! Everything the type system can rule out (adding a non-vector, passing an
//! absent actor) is ruled out there. What remains are the runtime boundaries:
//! numeric input, level plans, and JSON coming from outside the crate.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("{field} must be a finite vector, got ({x}, {y})")]
    NonFiniteVector { field: &'static str, x: f32, y: f32 },
    #[error("level {index} of the pack has no rows")]
    EmptyLevel { index: usize },
    #[error("level pack contains no levels")]
    EmptyLevelPack,
    #[error("invalid level pack: {0}")]
    InvalidLevelPack(#[source] serde_json::Error),
    #[error("invalid settings: {0}")]
    Settings(#[source] serde_json::Error),
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type SimResult<T> = Result<T, SimError>;
