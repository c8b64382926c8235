// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Named intervals for interval practice.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::scale::{chromatic_from, Note, Semitones};
use crate::error::{ConfigurationError, Result};

/// Intervals offered for interval practice, minor second through octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IntervalName {
    Minor2nd,
    Major2nd,
    Minor3rd,
    Major3rd,
    Perfect4th,
    Tritone,
    Perfect5th,
    Minor6th,
    Major6th,
    Minor7th,
    Major7th,
    Octave,
}

impl IntervalName {
    pub const ALL: [IntervalName; 12] = [
        IntervalName::Minor2nd,
        IntervalName::Major2nd,
        IntervalName::Minor3rd,
        IntervalName::Major3rd,
        IntervalName::Perfect4th,
        IntervalName::Tritone,
        IntervalName::Perfect5th,
        IntervalName::Minor6th,
        IntervalName::Major6th,
        IntervalName::Minor7th,
        IntervalName::Major7th,
        IntervalName::Octave,
    ];

    /// Size in semitones (1-12)
    pub fn semitones(self) -> Semitones {
        self as Semitones + 1
    }

    pub fn key(self) -> &'static str {
        match self {
            IntervalName::Minor2nd => "minor_2nd",
            IntervalName::Major2nd => "major_2nd",
            IntervalName::Minor3rd => "minor_3rd",
            IntervalName::Major3rd => "major_3rd",
            IntervalName::Perfect4th => "perfect_4th",
            IntervalName::Tritone => "tritone",
            IntervalName::Perfect5th => "perfect_5th",
            IntervalName::Minor6th => "minor_6th",
            IntervalName::Major6th => "major_6th",
            IntervalName::Minor7th => "minor_7th",
            IntervalName::Major7th => "major_7th",
            IntervalName::Octave => "octave",
        }
    }
}

impl FromStr for IntervalName {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase().replace([' ', '-'], "_");
        IntervalName::ALL
            .into_iter()
            .find(|interval| interval.key() == key)
            .ok_or_else(|| ConfigurationError::UnknownInterval(s.to_string()))
    }
}

impl TryFrom<String> for IntervalName {
    type Error = ConfigurationError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<IntervalName> for String {
    fn from(interval: IntervalName) -> Self {
        interval.key().to_string()
    }
}

impl fmt::Display for IntervalName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Direction in which the target note lies from the base note
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    #[default]
    Up,
    Down,
}

impl Direction {
    /// Apply this direction to an unsigned interval size
    pub fn apply(self, semitones: Semitones) -> Semitones {
        match self {
            Direction::Up => semitones,
            Direction::Down => -semitones,
        }
    }
}

/// Transpose a note by a signed interval, modulo the octave.
///
/// Indexes the chromatic rotation starting at `note` with
/// `interval.rem_euclid(12)`, so `-1` lands one semitone below.
pub fn transpose(note: Note, interval: Semitones) -> Note {
    chromatic_from(note)[interval.rem_euclid(12) as usize]
}
