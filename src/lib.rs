// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! earlab: ear-training melody generation and call-and-response practice.
//!
//! Generates improvisation phrases over a chord progression and interval
//! drills, then walks a singer through them one note at a time, judging
//! detected pitches against the expected notes.

pub mod config;
pub mod error;
pub mod generators;
pub mod music;
pub mod pitch;
pub mod practice;
pub mod timing;

pub use config::PracticeConfig;
pub use error::{ConfigurationError, Result};
pub use generators::{Melody, MelodyComposer, Phrase, PhraseGenerator, ProgressionEntry};
pub use music::{Note, Semitones};
pub use practice::{PracticeSession, SessionSettings, SharedSession};
