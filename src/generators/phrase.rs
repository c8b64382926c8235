// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Phrase generator using a chord-anchored random walk.
//!
//! Chord tones may leap to any other scale note; non-chord tones resolve
//! stepwise to one of their two scale neighbours. The same rule governs the
//! first note of a phrase relative to the last note of the previous one.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::trace;

use super::{Phrase, ProgressionEntry};
use crate::error::{ConfigurationError, Result};
use crate::music::{chromatic_from, Note};

/// Last note of the preceding phrase and whether it was a chord tone there
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviousNote {
    pub note: Note,
    pub was_chord_tone: bool,
}

/// Check if a note is a chord tone.
pub fn is_chord_tone(note: Note, chord_tones: &[Note]) -> bool {
    chord_tones.contains(&note)
}

/// Neighbours of `note` within `scale_notes`, lower first.
///
/// Members of the scale get their cyclic neighbours in scale order. Notes
/// outside the scale search the chromatic circle in each direction for the
/// nearest member, which takes at most 11 steps.
pub fn adjacent_notes(note: Note, scale_notes: &[Note]) -> Result<(Note, Note)> {
    if scale_notes.is_empty() {
        return Err(ConfigurationError::EmptyScale);
    }

    if let Some(index) = scale_notes.iter().position(|&n| n == note) {
        let len = scale_notes.len();
        return Ok((
            scale_notes[(index + len - 1) % len],
            scale_notes[(index + 1) % len],
        ));
    }

    let chromatic = chromatic_from(note);
    let lower = (1..12)
        .map(|step| chromatic[12 - step])
        .find(|n| scale_notes.contains(n))
        .ok_or(ConfigurationError::EmptyScale)?;
    let higher = (1..12)
        .map(|step| chromatic[step])
        .find(|n| scale_notes.contains(n))
        .ok_or(ConfigurationError::EmptyScale)?;

    Ok((lower, higher))
}

/// Phrase generator with an injectable random source
#[derive(Debug, Clone)]
pub struct PhraseGenerator<R = StdRng> {
    rng: R,
}

impl PhraseGenerator<StdRng> {
    /// Create a generator seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a reproducible generator
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for PhraseGenerator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PhraseGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// Uniform pick among scale notes other than `exclude`.
    ///
    /// A scale consisting of only `exclude` yields `exclude` itself.
    fn choose_other(&mut self, scale_notes: &[Note], exclude: Note) -> Result<Note> {
        let available: Vec<Note> = scale_notes.iter().copied().filter(|&n| n != exclude).collect();
        if available.is_empty() {
            return if scale_notes.is_empty() {
                Err(ConfigurationError::EmptyScale)
            } else {
                Ok(exclude)
            };
        }
        Ok(available[self.rng.gen_range(0..available.len())])
    }

    /// Uniform pick between the two neighbours of `note`.
    fn choose_adjacent(&mut self, note: Note, scale_notes: &[Note]) -> Result<Note> {
        let (lower, higher) = adjacent_notes(note, scale_notes)?;
        Ok(if self.rng.gen() { lower } else { higher })
    }

    /// Next note of the walk.
    ///
    /// Chord tones move freely to any other scale note; anything else moves
    /// to one of its two neighbours.
    pub fn next_note(
        &mut self,
        current: Note,
        scale_notes: &[Note],
        chord_tones: &[Note],
    ) -> Result<Note> {
        if is_chord_tone(current, chord_tones) {
            self.choose_other(scale_notes, current)
        } else {
            self.choose_adjacent(current, scale_notes)
        }
    }

    /// First note of a phrase given how the previous phrase ended.
    pub fn select_first_note(
        &mut self,
        scale_notes: &[Note],
        chord_tones: &[Note],
        prev: Option<PreviousNote>,
    ) -> Result<Note> {
        let Some(prev) = prev else {
            return scale_notes
                .choose(&mut self.rng)
                .copied()
                .ok_or(ConfigurationError::EmptyScale);
        };

        if prev.was_chord_tone || is_chord_tone(prev.note, chord_tones) {
            self.choose_other(scale_notes, prev.note)
        } else {
            self.choose_adjacent(prev.note, scale_notes)
        }
    }

    /// Generate one phrase for a progression entry.
    pub fn generate_phrase(
        &mut self,
        entry: &ProgressionEntry,
        prev: Option<PreviousNote>,
    ) -> Result<Phrase> {
        let scale = entry.scale();
        let chord = entry.chord();
        let length = entry.length();
        if length == 0 {
            return Err(ConfigurationError::InvalidPhraseLength { index: 0 });
        }

        let mut notes = Vec::with_capacity(length);
        let mut current = self.select_first_note(scale.notes(), chord.tones(), prev)?;
        notes.push(current);

        for _ in 1..length {
            current = self.next_note(current, scale.notes(), chord.tones())?;
            notes.push(current);
        }

        trace!(chord = %chord, scale = %scale, ?notes, "generated phrase");
        Ok(Phrase::new(notes, scale, chord))
    }
}
