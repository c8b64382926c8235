// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration system for earlab.
//!
//! This module provides data structures for loading practice settings from
//! YAML: audio buffer and timing parameters, the chord progressions used for
//! piece practice, and interval drill options. Every field has a default,
//! so an empty or missing file yields a usable configuration.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::ConfigurationError;
use crate::generators::{validate_progression, ProgressionEntry};
use crate::music::{ChordType, Direction, IntervalName, Note, ScaleType, Semitones};
use crate::practice::SessionSettings;

/// Name of the built-in progression
pub const DEFAULT_SONG: &str = "fly_me_to_the_moon";

/// Root practice configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PracticeConfig {
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub piece_practice: PiecePracticeConfig,
    #[serde(default)]
    pub interval_practice: IntervalPracticeConfig,
}

impl PracticeConfig {
    /// Load a configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        let config = Self::from_yaml(&contents)?;
        info!(path = ?path.as_ref(), "loaded configuration");
        Ok(config)
    }

    /// Load a configuration, falling back to defaults when the file is
    /// absent. A file that exists but does not parse is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            warn!(path = ?path.as_ref(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse a configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // serde_yaml rejects an empty document
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// The selected song's progression, validated
    pub fn selected_progression(&self) -> crate::error::Result<Vec<ProgressionEntry>> {
        self.piece_practice.progression(&self.piece_practice.selected_song)
    }

    /// Signed interval for drills: negative when practicing downward
    pub fn interval_semitones(&self) -> Semitones {
        self.interval_practice.semitones()
    }

    /// Session settings for piece practice
    pub fn piece_session_settings(&self) -> crate::error::Result<SessionSettings> {
        SessionSettings::new(self.audio.note_duration)
    }

    /// Session settings for interval drills, auto-advancing if enabled
    pub fn interval_session_settings(&self) -> crate::error::Result<SessionSettings> {
        let settings = SessionSettings::new(self.audio.note_duration)?;
        if self.interval_practice.auto_advance {
            settings.with_auto_advance(self.audio.auto_advance_duration)
        } else {
            Ok(settings)
        }
    }
}

/// Audio input and note timing
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioConfig {
    /// Input sample rate in Hz
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,
    /// Seconds of audio per pitch observation
    #[serde(default = "default_buffer_duration")]
    pub buffer_duration: f64,
    /// Seconds a correct pitch must be held
    #[serde(default = "default_note_duration")]
    pub note_duration: f64,
    /// Seconds per note in auto-advance mode
    #[serde(default = "default_auto_advance_duration")]
    pub auto_advance_duration: f64,
    /// Parameters handed to the external pitch estimator
    #[serde(default)]
    pub pitch_detector: PitchDetectorConfig,
}

fn default_sample_rate() -> u32 {
    44100
}
fn default_buffer_duration() -> f64 {
    0.2
}
fn default_note_duration() -> f64 {
    1.0
}
fn default_auto_advance_duration() -> f64 {
    3.0
}

impl AudioConfig {
    /// Number of samples in one observation buffer
    pub fn buffer_len(&self) -> usize {
        (self.sample_rate as f64 * self.buffer_duration).round().max(0.0) as usize
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            buffer_duration: default_buffer_duration(),
            note_duration: default_note_duration(),
            auto_advance_duration: default_auto_advance_duration(),
            pitch_detector: PitchDetectorConfig::default(),
        }
    }
}

/// Pitch estimator tuning. Opaque to this crate; passed through to
/// whichever detector backs the session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PitchDetectorConfig {
    #[serde(default = "default_hop_length")]
    pub hop_length: usize,
    #[serde(default = "default_decoder_mode")]
    pub decoder_mode: String,
    /// Voiced/unvoiced decision threshold
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    /// Lowest pitch reported, in Hz
    #[serde(default = "default_f0_min")]
    pub f0_min: f32,
    /// Highest pitch reported, in Hz
    #[serde(default = "default_f0_max")]
    pub f0_max: f32,
    #[serde(default)]
    pub interp_uv: bool,
    #[serde(default = "default_device")]
    pub device: String,
}

fn default_hop_length() -> usize {
    512
}
fn default_decoder_mode() -> String {
    "local_argmax".to_string()
}
fn default_threshold() -> f64 {
    0.006
}
fn default_f0_min() -> f32 {
    80.0
}
fn default_f0_max() -> f32 {
    880.0
}
fn default_device() -> String {
    "cpu".to_string()
}

impl Default for PitchDetectorConfig {
    fn default() -> Self {
        Self {
            hop_length: default_hop_length(),
            decoder_mode: default_decoder_mode(),
            threshold: default_threshold(),
            f0_min: default_f0_min(),
            f0_max: default_f0_max(),
            interp_uv: false,
            device: default_device(),
        }
    }
}

/// Piece practice: named chord progressions and the one to play
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PiecePracticeConfig {
    #[serde(default = "default_selected_song")]
    pub selected_song: String,
    #[serde(default = "default_chord_progressions")]
    pub chord_progressions: HashMap<String, Vec<ProgressionEntry>>,
}

fn default_selected_song() -> String {
    DEFAULT_SONG.to_string()
}
fn default_chord_progressions() -> HashMap<String, Vec<ProgressionEntry>> {
    HashMap::from([(DEFAULT_SONG.to_string(), fly_me_to_the_moon())])
}

impl PiecePracticeConfig {
    /// Look up and validate a progression by song name
    pub fn progression(&self, song: &str) -> crate::error::Result<Vec<ProgressionEntry>> {
        let progression = self
            .chord_progressions
            .get(song)
            .ok_or_else(|| ConfigurationError::UnknownSong(song.to_string()))?;
        validate_progression(progression)?;
        Ok(progression.clone())
    }

    /// Song names in alphabetical order
    pub fn song_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.chord_progressions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for PiecePracticeConfig {
    fn default() -> Self {
        Self {
            selected_song: default_selected_song(),
            chord_progressions: default_chord_progressions(),
        }
    }
}

/// Interval drill options
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IntervalPracticeConfig {
    /// Number of distinct base notes, at most 12
    #[serde(default = "default_num_problems")]
    pub num_problems: usize,
    #[serde(default = "default_interval")]
    pub interval: IntervalName,
    #[serde(default)]
    pub direction: Direction,
    #[serde(default)]
    pub auto_advance: bool,
}

fn default_num_problems() -> usize {
    10
}
fn default_interval() -> IntervalName {
    IntervalName::Minor2nd
}

impl IntervalPracticeConfig {
    pub fn semitones(&self) -> Semitones {
        self.direction.apply(self.interval.semitones())
    }
}

impl Default for IntervalPracticeConfig {
    fn default() -> Self {
        Self {
            num_problems: default_num_problems(),
            interval: default_interval(),
            direction: Direction::default(),
            auto_advance: false,
        }
    }
}

/// "Fly Me to the Moon" chord progression
pub fn fly_me_to_the_moon() -> Vec<ProgressionEntry> {
    use ChordType::*;
    use Note::*;
    use ScaleType::*;

    vec![
        ProgressionEntry::new(A, NaturalMinor, A, Min7, 8),
        ProgressionEntry::new(A, NaturalMinor, D, Min7, 8),
        ProgressionEntry::new(C, Major, G, Dom7, 8),
        ProgressionEntry::new(C, Major, C, Maj7, 4),
        ProgressionEntry::new(F, Major, C, Dom7, 4),
        ProgressionEntry::new(C, Major, F, Maj7, 8),
        ProgressionEntry::new(A, NaturalMinor, B, Min7b5, 8),
        ProgressionEntry::new(A, HarmonicMinor, E, Dom7, 8),
        ProgressionEntry::new(A, NaturalMinor, A, Min7, 4),
        ProgressionEntry::new(D, HarmonicMinor, A, Dom7, 4),
    ]
}
