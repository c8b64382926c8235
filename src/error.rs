// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for melody generation and session setup.

use thiserror::Error;

/// Errors raised when generation or session input is malformed.
///
/// These are fatal at generation time and are never retried. Silence and
/// wrong pitches are ordinary session inputs, not errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    #[error("unknown scale type '{0}'")]
    UnknownScaleType(String),
    #[error("unknown chord type '{0}'")]
    UnknownChordType(String),
    #[error("unknown note '{0}'")]
    UnknownNote(String),
    #[error("unknown interval '{0}'")]
    UnknownInterval(String),
    #[error("scale has no notes")]
    EmptyScale,
    #[error("melody is empty")]
    EmptyProgression,
    #[error("progression entry {index} has a phrase length of zero")]
    InvalidPhraseLength { index: usize },
    #[error("requested {requested} problems but only {available} distinct notes exist")]
    TooManyProblems { requested: usize, available: usize },
    #[error("note hold duration must be positive and finite, got {0}")]
    InvalidHoldDuration(f64),
    #[error("unknown song '{0}'")]
    UnknownSong(String),
}

/// Result alias for library operations.
pub type Result<T> = std::result::Result<T, ConfigurationError>;
