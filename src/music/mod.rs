// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music vocabulary for the ear trainer.
//!
//! This module provides the chromatic note ordering, scale and chord-tone
//! templates, named intervals, and frequency-to-note mapping. Everything
//! here is a pure lookup with no state.

pub mod chord;
pub mod frequency;
pub mod interval;
pub mod scale;

pub use chord::{chord_tones, Chord, ChordType};
pub use frequency::{frequency_to_base_note, frequency_to_note_name, note_frequency};
pub use interval::{transpose, Direction, IntervalName};
pub use scale::{chromatic_from, scale_notes, Note, Scale, ScaleType, Semitones};
