// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Timing module.
//!
//! This module provides the metronome engine and tempo range utilities.

pub mod metronome;
pub mod tempo;

pub use metronome::{
    beat_period, is_accent, BeatSink, Metronome, MetronomeState, BEATS_PER_BAR, DEFAULT_BPM,
};
pub use tempo::{clamp_bpm, parse_bpm, MAX_BPM, MIN_BPM};
