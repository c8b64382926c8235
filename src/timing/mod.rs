// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides the injectable time sources used by the
//! practice session's sustain and auto-advance timers.

pub mod clock;

pub use clock::{Clock, ManualClock, SystemClock};
