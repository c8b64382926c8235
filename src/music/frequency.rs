// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Frequency to note-name mapping (12-TET, A4 = 440 Hz).

use super::scale::Note;

/// Reference pitch
pub const A4_FREQUENCY: f32 = 440.0;

/// Semitones from C to A within an octave
const A_OFFSET: i32 = 9;

/// Nearest semitone counted from C4, or `None` for silence.
fn semitones_from_c4(frequency: f32) -> Option<i32> {
    if !frequency.is_finite() || frequency <= 0.0 {
        return None;
    }
    let from_a4 = (12.0 * (frequency / A4_FREQUENCY).log2()).round() as i32;
    Some(from_a4 + A_OFFSET)
}

/// Pitch class of the nearest note, ignoring octave.
pub fn frequency_to_base_note(frequency: f32) -> Option<Note> {
    semitones_from_c4(frequency).map(|n| Note::from_index(n.rem_euclid(12) as usize))
}

/// Nearest note with octave, e.g. `"A4"` for 440 Hz.
pub fn frequency_to_note_name(frequency: f32) -> Option<String> {
    let n = semitones_from_c4(frequency)?;
    let note = Note::from_index(n.rem_euclid(12) as usize);
    let octave = 4 + n.div_euclid(12);
    Some(format!("{}{}", note, octave))
}

/// Equal-tempered frequency of a note in a given octave.
pub fn note_frequency(note: Note, octave: i32) -> f32 {
    let n = (octave - 4) * 12 + note.index() as i32 - A_OFFSET;
    A4_FREQUENCY * 2f32.powf(n as f32 / 12.0)
}
