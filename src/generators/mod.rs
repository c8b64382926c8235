// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Generative engines for practice material.
//!
//! This module provides the phrase generator (a constrained random walk over
//! a scale, anchored by chord tones) and the melody composer that strings
//! phrases together across a chord progression or builds interval drills.

pub mod composer;
pub mod phrase;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use composer::MelodyComposer;
pub use phrase::{adjacent_notes, is_chord_tone, PhraseGenerator, PreviousNote};

use crate::error::{ConfigurationError, Result};
use crate::music::{Chord, ChordType, Note, Scale, ScaleType};

/// One row of a chord progression table:
/// `(scale_root, scale_type, chord_root, chord_type, length)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressionEntry(pub Note, pub ScaleType, pub Note, pub ChordType, pub usize);

impl ProgressionEntry {
    pub fn new(
        scale_root: Note,
        scale_type: ScaleType,
        chord_root: Note,
        chord_type: ChordType,
        length: usize,
    ) -> Self {
        Self(scale_root, scale_type, chord_root, chord_type, length)
    }

    /// Parse an entry from its textual table form
    pub fn parse(
        scale_root: &str,
        scale_type: &str,
        chord_root: &str,
        chord_type: &str,
        length: usize,
    ) -> Result<Self> {
        Ok(Self(
            scale_root.parse()?,
            scale_type.parse()?,
            chord_root.parse()?,
            chord_type.parse()?,
            length,
        ))
    }

    pub fn scale(&self) -> Scale {
        Scale::new(self.0, self.1)
    }

    pub fn chord(&self) -> Chord {
        Chord::new(self.2, self.3)
    }

    /// Requested number of notes
    pub fn length(&self) -> usize {
        self.4
    }
}

/// Reject entries that would produce an empty phrase.
pub fn validate_progression(progression: &[ProgressionEntry]) -> Result<()> {
    match progression.iter().position(|entry| entry.length() == 0) {
        Some(index) => Err(ConfigurationError::InvalidPhraseLength { index }),
        None => Ok(()),
    }
}

/// A generated note sequence tied to one chord/scale context
#[derive(Debug, Clone, PartialEq)]
pub struct Phrase {
    notes: Vec<Note>,
    scale: Scale,
    chord: Chord,
}

impl Phrase {
    pub fn new(notes: Vec<Note>, scale: Scale, chord: Chord) -> Self {
        Self { notes, scale, chord }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn scale(&self) -> &Scale {
        &self.scale
    }

    pub fn chord(&self) -> &Chord {
        &self.chord
    }

    /// Chord label, e.g. `Cmaj7`
    pub fn chord_name(&self) -> String {
        self.chord.to_string()
    }

    /// Scale label, e.g. `A natural_minor`
    pub fn scale_info(&self) -> String {
        self.scale.to_string()
    }

    pub fn last_note(&self) -> Option<Note> {
        self.notes.last().copied()
    }
}

impl fmt::Display for Phrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}):", self.chord_name(), self.scale_info())?;
        for note in &self.notes {
            write!(f, " {}", note)?;
        }
        Ok(())
    }
}

/// The full result of a generation run
#[derive(Debug, Clone, PartialEq)]
pub enum Melody {
    /// Piece practice: one phrase per progression entry
    Phrases(Vec<Phrase>),
    /// Interval practice: `[base, target, base]` per base note
    Intervals(Vec<[Note; 3]>),
}

impl Melody {
    /// Number of phrases or interval triples
    pub fn len(&self) -> usize {
        match self {
            Melody::Phrases(phrases) => phrases.len(),
            Melody::Intervals(triples) => triples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Notes of the segment (phrase or triple) at `index`
    pub fn segment(&self, index: usize) -> Option<&[Note]> {
        match self {
            Melody::Phrases(phrases) => phrases.get(index).map(Phrase::notes),
            Melody::Intervals(triples) => triples.get(index).map(|triple| triple.as_slice()),
        }
    }

    pub fn phrases(&self) -> Option<&[Phrase]> {
        match self {
            Melody::Phrases(phrases) => Some(phrases),
            Melody::Intervals(_) => None,
        }
    }

    pub fn triples(&self) -> Option<&[[Note; 3]]> {
        match self {
            Melody::Phrases(_) => None,
            Melody::Intervals(triples) => Some(triples),
        }
    }

    /// Total number of notes across all segments
    pub fn note_count(&self) -> usize {
        match self {
            Melody::Phrases(phrases) => phrases.iter().map(Phrase::len).sum(),
            Melody::Intervals(triples) => triples.len() * 3,
        }
    }
}

impl fmt::Display for Melody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Melody::Phrases(phrases) => {
                for (i, phrase) in phrases.iter().enumerate() {
                    writeln!(f, "{:>2}. {}", i + 1, phrase)?;
                }
            }
            Melody::Intervals(triples) => {
                for (i, [base, target, back]) in triples.iter().enumerate() {
                    writeln!(f, "{:>2}. {} -> {} -> {}", i + 1, base, target, back)?;
                }
            }
        }
        Ok(())
    }
}
