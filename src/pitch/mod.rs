// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch detection abstraction.
//!
//! The pitch-estimation model lives outside this crate. It is consumed
//! through [`PitchDetector`], which turns one audio buffer into a frequency
//! in Hz; zero or a negative value means no voice was detected.

use std::collections::VecDeque;

/// Trait for pitch estimators.
pub trait PitchDetector: Send {
    /// Estimate the fundamental frequency of one audio buffer.
    ///
    /// # Returns
    /// * Frequency in Hz, or a value `<= 0.0` for silence
    fn detect_pitch(&mut self, frame: &[f32]) -> f32;
}

/// Detector that always reports the same frequency
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPitch(pub f32);

impl PitchDetector for FixedPitch {
    fn detect_pitch(&mut self, _frame: &[f32]) -> f32 {
        self.0
    }
}

/// Detector that replays a fixed sequence of frequencies, one per buffer,
/// then reports silence.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPitch {
    frequencies: VecDeque<f32>,
}

impl ScriptedPitch {
    pub fn new<I: IntoIterator<Item = f32>>(frequencies: I) -> Self {
        Self {
            frequencies: frequencies.into_iter().collect(),
        }
    }

    /// Queue more frequencies
    pub fn push(&mut self, frequency: f32) {
        self.frequencies.push_back(frequency);
    }

    pub fn remaining(&self) -> usize {
        self.frequencies.len()
    }
}

impl PitchDetector for ScriptedPitch {
    fn detect_pitch(&mut self, _frame: &[f32]) -> f32 {
        self.frequencies.pop_front().unwrap_or(0.0)
    }
}

impl<F> PitchDetector for F
where
    F: FnMut(&[f32]) -> f32 + Send,
{
    fn detect_pitch(&mut self, frame: &[f32]) -> f32 {
        self(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripted_pitch_replays_then_silence() {
        let mut detector = ScriptedPitch::new([440.0, 261.63]);
        let frame = [0.0f32; 64];

        assert_eq!(detector.detect_pitch(&frame), 440.0);
        assert_eq!(detector.remaining(), 1);
        assert_eq!(detector.detect_pitch(&frame), 261.63);
        assert_eq!(detector.detect_pitch(&frame), 0.0);

        detector.push(330.0);
        assert_eq!(detector.detect_pitch(&frame), 330.0);
    }

    #[test]
    fn test_fixed_pitch() {
        let mut detector = FixedPitch(440.0);
        assert_eq!(detector.detect_pitch(&[]), 440.0);
        assert_eq!(detector.detect_pitch(&[1.0; 8]), 440.0);
    }

    #[test]
    fn test_closure_detector() {
        // Loudness gate standing in for a real model
        let mut detector = |frame: &[f32]| {
            if frame.iter().any(|s| s.abs() > 0.1) {
                220.0
            } else {
                0.0
            }
        };

        assert_eq!(detector.detect_pitch(&[0.0, 0.05]), 0.0);
        assert_eq!(detector.detect_pitch(&[0.0, 0.5]), 220.0);
    }
}
