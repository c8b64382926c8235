// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Practice module.
//!
//! This module provides the call-and-response session that judges sung
//! pitches against a generated melody, the results log kept in
//! auto-advance mode, and a lock-guarded handle for sharing a session
//! between threads.

pub mod results;
pub mod session;
pub mod shared;

pub use results::{ResultEntry, ResultsLog, Verdict};
pub use session::{
    Advance, Feedback, PitchResult, Position, PracticeSession, SessionSettings, SessionSnapshot,
    SessionState,
};
pub use shared::SharedSession;
