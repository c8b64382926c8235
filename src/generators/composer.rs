// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Melody composer.
//!
//! Runs the phrase generator across a chord progression, carrying the last
//! note of each phrase into the next, and builds interval drills from a set
//! of base notes.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, info};

use super::phrase::{is_chord_tone, PhraseGenerator, PreviousNote};
use super::{validate_progression, Melody, ProgressionEntry};
use crate::error::{ConfigurationError, Result};
use crate::music::{transpose, Note, Semitones};

/// Orchestrates phrase generation into complete melodies
#[derive(Debug, Clone)]
pub struct MelodyComposer<R = StdRng> {
    phrase_generator: PhraseGenerator<R>,
}

impl MelodyComposer<StdRng> {
    pub fn new() -> Self {
        Self {
            phrase_generator: PhraseGenerator::new(),
        }
    }

    /// Create a reproducible composer
    pub fn with_seed(seed: u64) -> Self {
        Self {
            phrase_generator: PhraseGenerator::with_seed(seed),
        }
    }
}

impl Default for MelodyComposer<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> MelodyComposer<R> {
    pub fn with_generator(phrase_generator: PhraseGenerator<R>) -> Self {
        Self { phrase_generator }
    }

    pub fn phrase_generator_mut(&mut self) -> &mut PhraseGenerator<R> {
        &mut self.phrase_generator
    }

    /// Generate one phrase per progression entry.
    ///
    /// After each phrase its last note, and whether that note is a chord tone
    /// of the phrase's own chord, seed the first-note choice of the next.
    pub fn generate_phrases(&mut self, progression: &[ProgressionEntry]) -> Result<Melody> {
        validate_progression(progression)?;

        let mut phrases = Vec::with_capacity(progression.len());
        let mut prev: Option<PreviousNote> = None;

        for entry in progression {
            let phrase = self.phrase_generator.generate_phrase(entry, prev)?;

            prev = phrase.last_note().map(|note| PreviousNote {
                note,
                was_chord_tone: is_chord_tone(note, phrase.chord().tones()),
            });

            debug!(
                chord = %phrase.chord_name(),
                scale = %phrase.scale_info(),
                length = phrase.len(),
                "composed phrase"
            );
            phrases.push(phrase);
        }

        info!(phrases = phrases.len(), "generated piece melody");
        Ok(Melody::Phrases(phrases))
    }

    /// Build `[base, target, base]` triples, target being `base` moved by
    /// `interval` semitones modulo the octave.
    pub fn generate_interval_melody(&self, base_notes: &[Note], interval: Semitones) -> Melody {
        let triples: Vec<[Note; 3]> = base_notes
            .iter()
            .map(|&base| [base, transpose(base, interval), base])
            .collect();

        info!(problems = triples.len(), interval, "generated interval melody");
        Melody::Intervals(triples)
    }

    /// Sample `count` distinct base notes in random order.
    pub fn random_base_notes(&mut self, count: usize) -> Result<Vec<Note>> {
        if count > Note::ALL.len() {
            return Err(ConfigurationError::TooManyProblems {
                requested: count,
                available: Note::ALL.len(),
            });
        }

        let mut notes = Note::ALL.to_vec();
        notes.shuffle(self.phrase_generator.rng_mut());
        notes.truncate(count);
        Ok(notes)
    }

    /// Random base notes combined into an interval drill.
    pub fn generate_interval_practice(
        &mut self,
        num_problems: usize,
        interval: Semitones,
    ) -> Result<Melody> {
        let base_notes = self.random_base_notes(num_problems)?;
        Ok(self.generate_interval_melody(&base_notes, interval))
    }
}
