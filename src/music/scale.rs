// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chromatic notes and scale templates.
//!
//! Provides the twelve pitch classes, the scale templates used for phrase
//! generation, and the derivation of scale notes from a root and template.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, Result};

/// Semitone offset type
pub type Semitones = i32;

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the chromatic index (0-11) for this note
    pub fn index(self) -> usize {
        self as usize
    }

    /// Get note from a chromatic index, wrapping modulo 12
    pub fn from_index(index: usize) -> Self {
        Note::ALL[index % 12]
    }

    /// Transpose by semitones, wrapping within the octave
    pub fn transpose(self, semitones: Semitones) -> Self {
        let offset = semitones.rem_euclid(12) as usize;
        Note::from_index(self.index() + offset)
    }

    /// Sharp spelling used for display and serialization
    pub fn name(self) -> &'static str {
        match self {
            Note::C => "C",
            Note::Cs => "C#",
            Note::D => "D",
            Note::Ds => "D#",
            Note::E => "E",
            Note::F => "F",
            Note::Fs => "F#",
            Note::G => "G",
            Note::Gs => "G#",
            Note::A => "A",
            Note::As => "A#",
            Note::B => "B",
        }
    }
}

impl FromStr for Note {
    type Err = ConfigurationError;

    /// Parse note from string (e.g., "C", "C#", "Db", "F#")
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_uppercase().as_str() {
            "C" | "B#" => Ok(Note::C),
            "C#" | "DB" => Ok(Note::Cs),
            "D" => Ok(Note::D),
            "D#" | "EB" => Ok(Note::Ds),
            "E" | "FB" => Ok(Note::E),
            "F" | "E#" => Ok(Note::F),
            "F#" | "GB" => Ok(Note::Fs),
            "G" => Ok(Note::G),
            "G#" | "AB" => Ok(Note::Gs),
            "A" => Ok(Note::A),
            "A#" | "BB" => Ok(Note::As),
            "B" | "CB" => Ok(Note::B),
            _ => Err(ConfigurationError::UnknownNote(s.to_string())),
        }
    }
}

impl TryFrom<String> for Note {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<Note> for String {
    fn from(note: Note) -> Self {
        note.name().to_string()
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// The twelve notes in chromatic order starting at `note`.
pub fn chromatic_from(note: Note) -> [Note; 12] {
    let mut notes = Note::ALL;
    notes.rotate_left(note.index());
    notes
}

/// Scale types supported by the phrase generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ScaleType {
    Major,
    NaturalMinor,
    HarmonicMinor,
}

impl ScaleType {
    pub const ALL: [ScaleType; 3] = [
        ScaleType::Major,
        ScaleType::NaturalMinor,
        ScaleType::HarmonicMinor,
    ];

    /// Get the intervals (semitones from root) for this scale type
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ScaleType::Major => &[0, 2, 4, 5, 7, 9, 11],
            ScaleType::NaturalMinor => &[0, 2, 3, 5, 7, 8, 10],
            ScaleType::HarmonicMinor => &[0, 2, 3, 5, 7, 8, 11],
        }
    }

    /// Template key as written in progression tables
    pub fn key(self) -> &'static str {
        match self {
            ScaleType::Major => "major",
            ScaleType::NaturalMinor => "natural_minor",
            ScaleType::HarmonicMinor => "harmonic_minor",
        }
    }
}

impl FromStr for ScaleType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        ScaleType::ALL
            .into_iter()
            .find(|scale_type| scale_type.key() == s.trim())
            .ok_or_else(|| ConfigurationError::UnknownScaleType(s.to_string()))
    }
}

impl TryFrom<String> for ScaleType {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ScaleType> for String {
    fn from(scale_type: ScaleType) -> Self {
        scale_type.key().to_string()
    }
}

impl fmt::Display for ScaleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Derive notes from a root and a semitone template.
pub(crate) fn notes_from_template(root: Note, intervals: &[u8]) -> Vec<Note> {
    let chromatic = chromatic_from(root);
    intervals
        .iter()
        .map(|&i| chromatic[i as usize % 12])
        .collect()
}

/// A complete scale with root and type
#[derive(Debug, Clone, PartialEq)]
pub struct Scale {
    root: Note,
    scale_type: ScaleType,
    notes: Vec<Note>,
}

impl Scale {
    /// Create a new scale from root and type
    pub fn new(root: Note, scale_type: ScaleType) -> Self {
        Self {
            root,
            scale_type,
            notes: notes_from_template(root, scale_type.intervals()),
        }
    }

    /// Parse a scale from strings (e.g., "C", "major")
    pub fn parse(root_str: &str, scale_str: &str) -> Result<Self> {
        Ok(Scale::new(root_str.parse()?, scale_str.parse()?))
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the scale type
    pub fn scale_type(&self) -> ScaleType {
        self.scale_type
    }

    /// Get the notes in this scale
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Check if a note is in this scale
    pub fn contains(&self, note: Note) -> bool {
        self.notes.contains(&note)
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.root, self.scale_type)
    }
}

/// Scale notes for a root and a scale template key.
pub fn scale_notes(root: Note, scale_type: &str) -> Result<Vec<Note>> {
    let scale_type: ScaleType = scale_type.parse()?;
    Ok(Scale::new(root, scale_type).notes)
}
