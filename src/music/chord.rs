// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord-tone templates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scale::{notes_from_template, Note};
use crate::error::{ConfigurationError, Result};

/// Four-note chord qualities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChordType {
    /// Major triad with added sixth
    Maj,
    Maj7,
    Min7,
    /// Half-diminished
    Min7b5,
    Dom7,
    Dim7,
}

impl ChordType {
    pub const ALL: [ChordType; 6] = [
        ChordType::Maj,
        ChordType::Maj7,
        ChordType::Min7,
        ChordType::Min7b5,
        ChordType::Dom7,
        ChordType::Dim7,
    ];

    /// Semitones from the chord root
    pub fn intervals(self) -> &'static [u8] {
        match self {
            ChordType::Maj => &[0, 4, 7, 9],
            ChordType::Maj7 => &[0, 4, 7, 11],
            ChordType::Min7 => &[0, 3, 7, 10],
            ChordType::Min7b5 => &[0, 3, 6, 10],
            ChordType::Dom7 => &[0, 4, 7, 10],
            ChordType::Dim7 => &[0, 3, 6, 9],
        }
    }

    /// Template key as written in progression tables
    pub fn key(self) -> &'static str {
        match self {
            ChordType::Maj => "maj",
            ChordType::Maj7 => "maj7",
            ChordType::Min7 => "min7",
            ChordType::Min7b5 => "min7(b5)",
            ChordType::Dom7 => "dom7",
            ChordType::Dim7 => "dim7",
        }
    }
}

impl FromStr for ChordType {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        ChordType::ALL
            .into_iter()
            .find(|chord_type| chord_type.key() == s.trim())
            .ok_or_else(|| ConfigurationError::UnknownChordType(s.to_string()))
    }
}

impl TryFrom<String> for ChordType {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ChordType> for String {
    fn from(chord_type: ChordType) -> Self {
        chord_type.key().to_string()
    }
}

impl fmt::Display for ChordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A chord with root and quality
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    root: Note,
    chord_type: ChordType,
    tones: Vec<Note>,
}

impl Chord {
    pub fn new(root: Note, chord_type: ChordType) -> Self {
        Self {
            root,
            chord_type,
            tones: notes_from_template(root, chord_type.intervals()),
        }
    }

    pub fn root(&self) -> Note {
        self.root
    }

    pub fn chord_type(&self) -> ChordType {
        self.chord_type
    }

    /// Chord tones, root first
    pub fn tones(&self) -> &[Note] {
        &self.tones
    }

    pub fn contains(&self, note: Note) -> bool {
        self.tones.contains(&note)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.root, self.chord_type)
    }
}

/// Chord tones for a root and a chord template key.
pub fn chord_tones(root: Note, chord_type: &str) -> Result<Vec<Note>> {
    let chord_type: ChordType = chord_type.parse()?;
    Ok(Chord::new(root, chord_type).tones)
}
