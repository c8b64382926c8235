// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Call-and-response practice session.
//!
//! The session walks through a generated melody one note at a time. Each
//! pitch observation is judged against the expected note; a correct pitch
//! must be held for the configured duration before the note is complete.
//! In auto-advance mode the session instead moves on after a fixed time per
//! note and scores what was last sung.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use super::results::{ResultEntry, ResultsLog, Verdict};
use crate::error::{ConfigurationError, Result};
use crate::generators::{Melody, Phrase};
use crate::music::{frequency_to_base_note, Note};
use crate::pitch::PitchDetector;
use crate::timing::{Clock, SystemClock};

/// Outcome of judging one pitch observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PitchResult {
    pub target_note: Note,
    /// Pitch class sung, `None` when no voice was detected
    pub detected_note: Option<Note>,
    pub is_correct: bool,
    /// Seconds the correct pitch must still be held, never negative
    pub remaining_time: f64,
}

impl PitchResult {
    /// The correct pitch has been held long enough
    pub fn is_complete(&self) -> bool {
        self.is_correct && self.remaining_time <= 0.0
    }
}

/// Lifecycle state of a practice session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No melody loaded
    Idle,
    Active,
    Stopped,
}

/// Position within the melody
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub phrase_index: usize,
    pub note_index: usize,
}

/// Emitted whenever the session moves to the next note
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    pub from: Position,
    pub to: Position,
    /// The previous phrase (or triple) was finished
    pub phrase_completed: bool,
    /// Wrapped from the last phrase back to the first
    pub wrapped: bool,
    /// Score recorded in auto-advance mode
    pub scored: Option<ResultEntry>,
}

/// Everything produced by one observation
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub result: PitchResult,
    pub advance: Option<Advance>,
}

/// Session timing options
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// How long a correct pitch must be held
    pub note_hold_duration: Duration,
    /// Fixed time per note when auto-advancing
    pub auto_advance: Option<Duration>,
}

impl SessionSettings {
    /// Manual mode with the given hold duration in seconds
    pub fn new(note_hold_secs: f64) -> Result<Self> {
        Ok(Self {
            note_hold_duration: positive_duration(note_hold_secs)?,
            auto_advance: None,
        })
    }

    /// Switch to auto-advance mode with the given seconds per note
    pub fn with_auto_advance(mut self, note_secs: f64) -> Result<Self> {
        self.auto_advance = Some(positive_duration(note_secs)?);
        Ok(self)
    }

    pub fn is_auto_advance(&self) -> bool {
        self.auto_advance.is_some()
    }
}

fn positive_duration(secs: f64) -> Result<Duration> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ConfigurationError::InvalidHoldDuration(secs));
    }
    Duration::try_from_secs_f64(secs).map_err(|_| ConfigurationError::InvalidHoldDuration(secs))
}

/// Advisory copy of session state for display
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub position: Position,
    pub current_note: Option<Note>,
    pub segment_count: usize,
    pub results: ResultsLog,
}

impl SessionSnapshot {
    pub fn idle() -> Self {
        Self {
            state: SessionState::Idle,
            position: Position::default(),
            current_note: None,
            segment_count: 0,
            results: ResultsLog::new(),
        }
    }
}

/// Practice session over a non-empty melody
pub struct PracticeSession<C: Clock = SystemClock> {
    melody: Melody,
    settings: SessionSettings,
    position: Position,
    running: bool,
    sustain_start: Option<Instant>,
    note_started_at: Instant,
    last_detected: Option<Note>,
    results: ResultsLog,
    clock: C,
}

impl PracticeSession<SystemClock> {
    /// Start a session timed by the wall clock
    pub fn start(melody: Melody, settings: SessionSettings) -> Result<Self> {
        Self::start_with_clock(melody, settings, SystemClock)
    }
}

impl<C: Clock> PracticeSession<C> {
    /// Start a session with an injected time source.
    ///
    /// Fails for an empty melody or one containing an empty phrase.
    pub fn start_with_clock(melody: Melody, settings: SessionSettings, clock: C) -> Result<Self> {
        check_playable(&melody)?;

        let now = clock.now();
        info!(
            segments = melody.len(),
            notes = melody.note_count(),
            auto_advance = settings.is_auto_advance(),
            "practice session started"
        );

        Ok(Self {
            melody,
            settings,
            position: Position::default(),
            running: true,
            sustain_start: None,
            note_started_at: now,
            last_detected: None,
            results: ResultsLog::new(),
            clock,
        })
    }

    /// Replace the melody and reset all progress
    pub fn restart(&mut self, melody: Melody) -> Result<()> {
        check_playable(&melody)?;

        self.melody = melody;
        self.position = Position::default();
        self.running = true;
        self.sustain_start = None;
        self.note_started_at = self.clock.now();
        self.last_detected = None;
        self.results.clear();

        info!(segments = self.melody.len(), "practice session restarted");
        Ok(())
    }

    /// Stop immediately; further observations are ignored
    pub fn stop(&mut self) {
        if self.running {
            info!(scored = self.results.len(), "practice session stopped");
        }
        self.running = false;
        self.sustain_start = None;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn state(&self) -> SessionState {
        if self.running {
            SessionState::Active
        } else {
            SessionState::Stopped
        }
    }

    pub fn melody(&self) -> &Melody {
        &self.melody
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// Notes of the current phrase or triple
    pub fn current_segment(&self) -> &[Note] {
        match &self.melody {
            Melody::Phrases(phrases) => phrases[self.position.phrase_index].notes(),
            Melody::Intervals(triples) => &triples[self.position.phrase_index],
        }
    }

    /// The current phrase in piece practice
    pub fn current_phrase(&self) -> Option<&Phrase> {
        self.melody
            .phrases()
            .map(|phrases| &phrases[self.position.phrase_index])
    }

    pub fn current_note(&self) -> Note {
        self.current_segment()[self.position.note_index]
    }

    pub fn results(&self) -> &ResultsLog {
        &self.results
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            state: self.state(),
            position: self.position,
            current_note: Some(self.current_note()),
            segment_count: self.melody.len(),
            results: self.results.clone(),
        }
    }

    fn hold_secs(&self) -> f64 {
        self.settings.note_hold_duration.as_secs_f64()
    }

    /// Judge one observation against `target_note`.
    ///
    /// Silence or a wrong pitch resets the sustain timer. A correct pitch
    /// starts it, or reports how much longer it must be held.
    pub fn process_observation(&mut self, frequency: f32, target_note: Note) -> PitchResult {
        let detected = if frequency > 0.0 {
            frequency_to_base_note(frequency)
        } else {
            None
        };

        let Some(detected) = detected else {
            self.sustain_start = None;
            return PitchResult {
                target_note,
                detected_note: None,
                is_correct: false,
                remaining_time: self.hold_secs(),
            };
        };

        self.last_detected = Some(detected);

        if detected != target_note {
            self.sustain_start = None;
            return PitchResult {
                target_note,
                detected_note: Some(detected),
                is_correct: false,
                remaining_time: self.hold_secs(),
            };
        }

        let now = self.clock.now();
        let remaining_time = match self.sustain_start {
            None => {
                self.sustain_start = Some(now);
                self.hold_secs()
            }
            Some(start) => {
                let elapsed = now.saturating_duration_since(start);
                self.settings
                    .note_hold_duration
                    .saturating_sub(elapsed)
                    .as_secs_f64()
            }
        };

        PitchResult {
            target_note,
            detected_note: Some(detected),
            is_correct: true,
            remaining_time,
        }
    }

    /// Judge an observation against the current note and advance when due.
    ///
    /// Manual mode advances once the correct pitch has been held long
    /// enough. Auto-advance mode ignores correctness and advances once the
    /// note's time is up. Returns `None` when the session is stopped.
    pub fn observe(&mut self, frequency: f32) -> Option<Feedback> {
        if !self.running {
            return None;
        }

        let result = self.process_observation(frequency, self.current_note());

        let due = match self.settings.auto_advance {
            Some(note_duration) => {
                self.clock.now().saturating_duration_since(self.note_started_at) >= note_duration
            }
            None => result.remaining_time <= 0.0,
        };

        let advance = due.then(|| self.advance());
        Some(Feedback { result, advance })
    }

    /// Detect the pitch of one audio buffer and observe it
    pub fn process_audio<D: PitchDetector + ?Sized>(
        &mut self,
        detector: &mut D,
        frame: &[f32],
    ) -> Option<Feedback> {
        if !self.running {
            return None;
        }
        let frequency = detector.detect_pitch(frame);
        self.observe(frequency)
    }

    /// Move to the next note, wrapping at the end of each phrase and at the
    /// end of the melody. Scores the note first in auto-advance mode.
    pub fn advance(&mut self) -> Advance {
        let from = self.position;
        let scored = self.settings.is_auto_advance().then(|| self.score_current());

        let mut to = Position {
            phrase_index: from.phrase_index,
            note_index: from.note_index + 1,
        };
        let phrase_completed = to.note_index >= self.current_segment().len();
        let mut wrapped = false;

        if phrase_completed {
            to.note_index = 0;
            to.phrase_index += 1;
            if to.phrase_index >= self.melody.len() {
                to.phrase_index = 0;
                wrapped = true;
            }
        }

        self.position = to;
        self.sustain_start = None;
        self.last_detected = None;
        self.note_started_at = self.clock.now();

        if phrase_completed {
            debug!(
                phrase = to.phrase_index + 1,
                wrapped,
                "advanced to next phrase"
            );
        } else {
            debug!(note = to.note_index + 1, "advanced to next note");
        }

        Advance {
            from,
            to,
            phrase_completed,
            wrapped,
            scored,
        }
    }

    fn score_current(&mut self) -> ResultEntry {
        let target_note = self.current_note();
        let entry = ResultEntry {
            phrase_number: self.position.phrase_index + 1,
            base_note: self.current_segment()[0],
            target_note,
            detected_note: self.last_detected,
            verdict: Verdict::judge(self.last_detected, target_note),
        };

        debug!(
            phrase = entry.phrase_number,
            target = %entry.target_note,
            verdict = %entry.verdict,
            "scored note"
        );
        self.results.push(entry.clone());
        entry
    }
}

/// A melody can be practiced when it has at least one segment and no
/// segment is empty.
fn check_playable(melody: &Melody) -> Result<()> {
    if melody.is_empty() {
        return Err(ConfigurationError::EmptyProgression);
    }
    if let Some(phrases) = melody.phrases() {
        if let Some(index) = phrases.iter().position(Phrase::is_empty) {
            return Err(ConfigurationError::InvalidPhraseLength { index });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{MelodyComposer, ProgressionEntry};
    use crate::music::{note_frequency, Chord, ChordType, Scale, ScaleType};
    use crate::pitch::ScriptedPitch;
    use crate::timing::ManualClock;

    fn hz(note: Note) -> f32 {
        note_frequency(note, 4)
    }

    fn phrase(notes: &[Note]) -> Phrase {
        Phrase::new(
            notes.to_vec(),
            Scale::new(Note::C, ScaleType::Major),
            Chord::new(Note::C, ChordType::Maj7),
        )
    }

    fn two_phrase_melody() -> Melody {
        Melody::Phrases(vec![
            phrase(&[Note::C, Note::E, Note::G]),
            phrase(&[Note::A, Note::B]),
        ])
    }

    fn manual_session(melody: Melody) -> (PracticeSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let settings = SessionSettings::new(1.0).unwrap();
        let session = PracticeSession::start_with_clock(melody, settings, clock.clone()).unwrap();
        (session, clock)
    }

    fn auto_session(melody: Melody) -> (PracticeSession<ManualClock>, ManualClock) {
        let clock = ManualClock::new();
        let settings = SessionSettings::new(1.0)
            .unwrap()
            .with_auto_advance(3.0)
            .unwrap();
        let session = PracticeSession::start_with_clock(melody, settings, clock.clone()).unwrap();
        (session, clock)
    }

    #[test]
    fn test_no_voice_result() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        let result = session.process_observation(0.0, Note::A);

        assert_eq!(result.target_note, Note::A);
        assert_eq!(result.detected_note, None);
        assert!(!result.is_correct);
        assert_eq!(result.remaining_time, 1.0);

        let result = session.process_observation(-1.0, Note::A);
        assert_eq!(result.detected_note, None);
    }

    #[test]
    fn test_incorrect_pitch_result() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        let result = session.process_observation(440.0, Note::C);

        assert_eq!(result.detected_note, Some(Note::A));
        assert!(!result.is_correct);
        assert_eq!(result.remaining_time, 1.0);
    }

    #[test]
    fn test_sustain_timer_counts_down() {
        let (mut session, clock) = manual_session(two_phrase_melody());

        let first = session.process_observation(440.0, Note::A);
        clock.advance_secs(0.5);
        let second = session.process_observation(440.0, Note::A);
        clock.advance_secs(0.5);
        let third = session.process_observation(440.0, Note::A);

        assert!(first.is_correct && second.is_correct && third.is_correct);
        assert_eq!(first.remaining_time, 1.0);
        assert_eq!(second.remaining_time, 0.5);
        assert_eq!(third.remaining_time, 0.0);
        assert!(third.is_complete());
    }

    #[test]
    fn test_sustain_timer_clamps_at_zero() {
        let (mut session, clock) = manual_session(two_phrase_melody());

        session.process_observation(440.0, Note::A);
        clock.advance_secs(5.0);
        let result = session.process_observation(440.0, Note::A);
        assert_eq!(result.remaining_time, 0.0);
    }

    #[test]
    fn test_wrong_pitch_resets_sustain() {
        let (mut session, clock) = manual_session(two_phrase_melody());

        session.process_observation(440.0, Note::A);
        clock.advance_secs(0.5);
        let wrong = session.process_observation(hz(Note::C), Note::A);
        clock.advance_secs(0.5);
        let again = session.process_observation(440.0, Note::A);

        assert_eq!(wrong.remaining_time, 1.0);
        assert!(again.is_correct);
        assert_eq!(again.remaining_time, 1.0);
    }

    #[test]
    fn test_silence_resets_sustain() {
        let (mut session, clock) = manual_session(two_phrase_melody());

        session.process_observation(440.0, Note::A);
        clock.advance_secs(0.9);
        session.process_observation(0.0, Note::A);
        clock.advance_secs(0.5);
        let again = session.process_observation(440.0, Note::A);
        assert_eq!(again.remaining_time, 1.0);
    }

    #[test]
    fn test_octave_does_not_matter() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        let result = session.process_observation(220.0, Note::A);
        assert!(result.is_correct);
        let result = session.process_observation(note_frequency(Note::C, 5), Note::C);
        assert!(result.is_correct);
    }

    #[test]
    fn test_advance_within_and_across_phrases() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        assert_eq!(session.current_note(), Note::C);

        let step = session.advance();
        assert_eq!(step.to, Position { phrase_index: 0, note_index: 1 });
        assert!(!step.phrase_completed);
        assert_eq!(session.current_note(), Note::E);

        session.advance();
        let step = session.advance();
        assert!(step.phrase_completed);
        assert!(!step.wrapped);
        assert_eq!(step.to, Position { phrase_index: 1, note_index: 0 });
        assert_eq!(session.current_note(), Note::A);
        assert_eq!(step.scored, None);
    }

    #[test]
    fn test_advance_wraps_to_start() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        for _ in 0..4 {
            session.advance();
        }
        assert_eq!(session.position(), Position { phrase_index: 1, note_index: 1 });

        let step = session.advance();
        assert!(step.wrapped);
        assert_eq!(session.position(), Position::default());
        assert_eq!(session.current_note(), Note::C);
    }

    #[test]
    fn test_single_note_melody_wraps_in_place() {
        let (mut session, _clock) = manual_session(Melody::Phrases(vec![phrase(&[Note::G])]));
        let step = session.advance();
        assert!(step.wrapped);
        assert_eq!(session.position(), Position::default());
    }

    #[test]
    fn test_observe_advances_after_hold() {
        let (mut session, clock) = manual_session(two_phrase_melody());

        let feedback = session.observe(hz(Note::C)).unwrap();
        assert!(feedback.result.is_correct);
        assert!(feedback.advance.is_none());

        clock.advance_secs(1.0);
        let feedback = session.observe(hz(Note::C)).unwrap();
        assert!(feedback.result.is_complete());
        assert_eq!(
            feedback.advance.map(|a| a.to),
            Some(Position { phrase_index: 0, note_index: 1 })
        );

        // Sustain does not carry over into the next note
        let feedback = session.observe(hz(Note::E)).unwrap();
        assert_eq!(feedback.result.remaining_time, 1.0);
        assert!(feedback.advance.is_none());
    }

    #[test]
    fn test_observe_wrong_pitch_never_advances_in_manual_mode() {
        let (mut session, clock) = manual_session(two_phrase_melody());
        for _ in 0..10 {
            clock.advance_secs(1.0);
            let feedback = session.observe(hz(Note::D)).unwrap();
            assert!(feedback.advance.is_none());
        }
        assert_eq!(session.position(), Position::default());
        assert!(session.results().is_empty());
    }

    #[test]
    fn test_auto_advance_scores_on_timer() {
        let melody = MelodyComposer::with_seed(0).generate_interval_melody(&[Note::C], 1);
        let (mut session, clock) = auto_session(melody);

        // Correct C, held, but the timer has not run out
        session.observe(hz(Note::C));
        clock.advance_secs(2.0);
        assert!(session.observe(hz(Note::C)).unwrap().advance.is_none());

        clock.advance_secs(1.0);
        let feedback = session.observe(hz(Note::C)).unwrap();
        let scored = feedback.advance.and_then(|a| a.scored).unwrap();
        assert_eq!(scored.phrase_number, 1);
        assert_eq!(scored.base_note, Note::C);
        assert_eq!(scored.target_note, Note::C);
        assert_eq!(scored.verdict, Verdict::Pass);

        // Sing the wrong note for the whole C# slot
        clock.advance_secs(3.0);
        let feedback = session.observe(hz(Note::D)).unwrap();
        let scored = feedback.advance.and_then(|a| a.scored).unwrap();
        assert_eq!(scored.target_note, Note::Cs);
        assert_eq!(scored.detected_note, Some(Note::D));
        assert_eq!(scored.verdict, Verdict::Fail);

        assert_eq!(session.results().len(), 2);
        assert_eq!(session.results().pass_count(), 1);
    }

    #[test]
    fn test_auto_advance_ignores_completed_sustain() {
        let melody = MelodyComposer::with_seed(0).generate_interval_melody(&[Note::A], 2);
        let (mut session, clock) = auto_session(melody);

        session.observe(440.0);
        clock.advance_secs(1.5);
        let feedback = session.observe(440.0).unwrap();
        assert!(feedback.result.is_complete());
        assert!(feedback.advance.is_none());
    }

    #[test]
    fn test_auto_advance_silence_fails() {
        let melody = MelodyComposer::with_seed(0).generate_interval_melody(&[Note::E], 3);
        let (mut session, clock) = auto_session(melody);

        clock.advance_secs(3.0);
        let scored = session.observe(0.0).unwrap().advance.and_then(|a| a.scored).unwrap();
        assert_eq!(scored.detected_note, None);
        assert_eq!(scored.verdict, Verdict::Fail);
    }

    #[test]
    fn test_auto_advance_scores_last_detected_note() {
        let melody = MelodyComposer::with_seed(0).generate_interval_melody(&[Note::G], 5);
        let (mut session, clock) = auto_session(melody);

        session.observe(hz(Note::G));
        clock.advance_secs(3.0);
        // Voice drops out just as time runs out
        let scored = session.observe(0.0).unwrap().advance.and_then(|a| a.scored).unwrap();
        assert_eq!(scored.detected_note, Some(Note::G));
        assert_eq!(scored.verdict, Verdict::Pass);
    }

    #[test]
    fn test_manual_advance_scores_in_auto_mode() {
        let (mut session, _clock) = auto_session(two_phrase_melody());
        session.process_observation(hz(Note::C), Note::C);
        let step = session.advance();
        assert_eq!(step.scored.map(|e| e.verdict), Some(Verdict::Pass));
    }

    #[test]
    fn test_results_use_phrase_base_note() {
        let (mut session, _clock) = auto_session(two_phrase_melody());
        for _ in 0..4 {
            session.advance();
        }
        let entries = session.results().entries();
        assert_eq!(entries[3].phrase_number, 2);
        assert_eq!(entries[3].base_note, Note::A);
        assert_eq!(entries[3].target_note, Note::A);
        assert_eq!(entries[2].phrase_number, 1);
        assert_eq!(entries[2].base_note, Note::C);
        assert_eq!(entries[2].target_note, Note::G);
    }

    #[test]
    fn test_start_rejects_empty_melody() {
        let settings = SessionSettings::new(1.0).unwrap();
        assert_eq!(
            PracticeSession::start(Melody::Phrases(Vec::new()), settings).err(),
            Some(ConfigurationError::EmptyProgression)
        );
        assert_eq!(
            PracticeSession::start(Melody::Intervals(Vec::new()), settings).err(),
            Some(ConfigurationError::EmptyProgression)
        );
    }

    #[test]
    fn test_start_rejects_empty_phrase() {
        let settings = SessionSettings::new(1.0).unwrap();
        let melody = Melody::Phrases(vec![phrase(&[Note::C]), phrase(&[])]);
        assert_eq!(
            PracticeSession::start(melody, settings).err(),
            Some(ConfigurationError::InvalidPhraseLength { index: 1 })
        );
    }

    #[test]
    fn test_settings_reject_bad_durations() {
        assert_eq!(
            SessionSettings::new(0.0),
            Err(ConfigurationError::InvalidHoldDuration(0.0))
        );
        assert!(SessionSettings::new(f64::NAN).is_err());
        assert!(SessionSettings::new(1.0).unwrap().with_auto_advance(-3.0).is_err());
        assert_eq!(
            SessionSettings::new(1e30),
            Err(ConfigurationError::InvalidHoldDuration(1e30))
        );
        assert!(SessionSettings::new(1.0).unwrap().with_auto_advance(1e30).is_err());
    }

    #[test]
    fn test_stop_is_immediate() {
        let (mut session, _clock) = manual_session(two_phrase_melody());
        session.process_observation(hz(Note::C), Note::C);
        session.stop();

        assert_eq!(session.state(), SessionState::Stopped);
        assert!(session.observe(hz(Note::C)).is_none());

        let mut detector = ScriptedPitch::new([hz(Note::C)]);
        assert!(session.process_audio(&mut detector, &[0.0; 16]).is_none());
        // The detector is not consulted once stopped
        assert_eq!(detector.remaining(), 1);

        session.stop();
        assert!(!session.is_running());
    }

    #[test]
    fn test_restart_resets_progress() {
        let (mut session, _clock) = auto_session(two_phrase_melody());
        session.advance();
        session.advance();
        session.stop();

        let melody = MelodyComposer::with_seed(0).generate_interval_melody(&[Note::D], 7);
        session.restart(melody).unwrap();

        assert_eq!(session.state(), SessionState::Active);
        assert_eq!(session.position(), Position::default());
        assert!(session.results().is_empty());
        assert_eq!(session.current_segment(), &[Note::D, Note::A, Note::D]);
        assert!(session.current_phrase().is_none());
    }

    #[test]
    fn test_process_audio_uses_detector() {
        let (mut session, clock) = manual_session(two_phrase_melody());
        let mut detector = ScriptedPitch::new([hz(Note::C), hz(Note::C)]);

        session.process_audio(&mut detector, &[0.0; 16]);
        clock.advance_secs(1.0);
        let feedback = session.process_audio(&mut detector, &[0.0; 16]).unwrap();
        assert!(feedback.advance.is_some());
        assert_eq!(session.current_note(), Note::E);
    }

    #[test]
    fn test_snapshot() {
        let melody = Melody::Phrases(vec![phrase(&[Note::C, Note::D])]);
        let (mut session, _clock) = manual_session(melody);
        session.advance();

        let snapshot = session.snapshot();
        assert_eq!(snapshot.state, SessionState::Active);
        assert_eq!(snapshot.position.note_index, 1);
        assert_eq!(snapshot.current_note, Some(Note::D));
        assert_eq!(snapshot.segment_count, 1);
    }

    #[test]
    fn test_generated_piece_session_walks_every_note() {
        let progression = [
            ProgressionEntry::new(Note::C, ScaleType::Major, Note::C, ChordType::Maj7, 3),
            ProgressionEntry::new(Note::A, ScaleType::NaturalMinor, Note::A, ChordType::Min7, 2),
        ];
        let melody = MelodyComposer::with_seed(9).generate_phrases(&progression).unwrap();
        let expected: Vec<Note> = melody
            .phrases()
            .unwrap()
            .iter()
            .flat_map(|p| p.notes().to_vec())
            .collect();
        let (mut session, clock) = manual_session(melody);

        let mut sung = Vec::new();
        for _ in 0..expected.len() {
            let target = session.current_note();
            sung.push(target);
            session.observe(hz(target));
            clock.advance_secs(1.0);
            let feedback = session.observe(hz(target)).unwrap();
            assert!(feedback.advance.is_some());
        }

        assert_eq!(sung, expected);
        assert_eq!(session.position(), Position::default());
    }
}
