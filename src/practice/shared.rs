// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Thread-safe handle to a practice session.
//!
//! The audio thread feeds observations while a UI thread reads progress.
//! Every mutation runs under one lock so that judging an observation,
//! deciding to advance and advancing happen atomically. Readers that must
//! not stall use [`SharedSession::try_snapshot`].

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::warn;

use super::session::{
    Advance, Feedback, PracticeSession, SessionSettings, SessionSnapshot, SessionState,
};
use crate::error::Result;
use crate::generators::Melody;
use crate::pitch::PitchDetector;
use crate::timing::{Clock, SystemClock};

/// Cloneable handle shared between the audio and UI threads.
///
/// Holds no session until [`SharedSession::start`] is called.
pub struct SharedSession<C: Clock = SystemClock> {
    inner: Arc<Mutex<Option<PracticeSession<C>>>>,
}

impl<C: Clock> Clone for SharedSession<C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<C: Clock> Default for SharedSession<C> {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(None)),
        }
    }
}

impl<C: Clock> SharedSession<C> {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<PracticeSession<C>>> {
        // A panic elsewhere leaves the session consistent between calls
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Start (or replace) the session
    pub fn start(&self, melody: Melody, settings: SessionSettings, clock: C) -> Result<()> {
        let session = PracticeSession::start_with_clock(melody, settings, clock)?;
        let mut guard = self.lock();
        if guard.as_ref().is_some_and(PracticeSession::is_running) {
            warn!("replacing a running practice session");
        }
        *guard = Some(session);
        Ok(())
    }

    /// Restart the existing session with a new melody, keeping its clock
    /// and settings. Returns `Ok(false)` when no session exists.
    pub fn restart(&self, melody: Melody) -> Result<bool> {
        match self.lock().as_mut() {
            Some(session) => session.restart(melody).map(|_| true),
            None => Ok(false),
        }
    }

    pub fn stop(&self) {
        if let Some(session) = self.lock().as_mut() {
            session.stop();
        }
    }

    pub fn state(&self) -> SessionState {
        self.lock()
            .as_ref()
            .map_or(SessionState::Idle, PracticeSession::state)
    }

    /// Judge one frequency against the current note
    pub fn observe(&self, frequency: f32) -> Option<Feedback> {
        self.lock().as_mut()?.observe(frequency)
    }

    /// Detect and judge one audio buffer
    pub fn process_audio<D: PitchDetector + ?Sized>(
        &self,
        detector: &mut D,
        frame: &[f32],
    ) -> Option<Feedback> {
        self.lock().as_mut()?.process_audio(detector, frame)
    }

    /// Skip to the next note. `None` when idle or stopped.
    pub fn advance(&self) -> Option<Advance> {
        let mut guard = self.lock();
        let session = guard.as_mut()?;
        if !session.is_running() {
            return None;
        }
        Some(session.advance())
    }

    /// Blocking copy of the current state
    pub fn snapshot(&self) -> SessionSnapshot {
        self.lock()
            .as_ref()
            .map_or_else(SessionSnapshot::idle, PracticeSession::snapshot)
    }

    /// Non-blocking copy of the current state, `None` if the lock is busy
    pub fn try_snapshot(&self) -> Option<SessionSnapshot> {
        let guard = match self.inner.try_lock() {
            Ok(guard) => guard,
            Err(std::sync::TryLockError::Poisoned(poisoned)) => poisoned.into_inner(),
            Err(std::sync::TryLockError::WouldBlock) => return None,
        };
        Some(
            guard
                .as_ref()
                .map_or_else(SessionSnapshot::idle, PracticeSession::snapshot),
        )
    }

    /// Run `f` against the session under the lock
    pub fn with_session<T>(&self, f: impl FnOnce(&mut PracticeSession<C>) -> T) -> Option<T> {
        self.lock().as_mut().map(f)
    }
}
