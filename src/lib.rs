// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitchdrill - random pitch ear-training drill with an accented metronome.
//!
//! The drill draws the twelve sharp-spelled pitch classes in random order
//! without repeats, while a metronome clicks at a clamped tempo with an
//! accent on the first beat of every four.

pub mod audio;
pub mod config;
pub mod control;
pub mod cycler;
pub mod music;
pub mod session;
pub mod timing;
pub mod ui;

pub use audio::{AudioContext, AudioEngine, ClickSynth};
pub use config::PracticeConfig;
pub use control::{Command, KeyboardController, TempoControl};
pub use cycler::{CycleEvent, NoteCycler, COMPLETION_MESSAGE};
pub use music::PitchClass;
pub use session::{DisplayState, Flow, Session};
pub use timing::{BeatSink, Metronome, MetronomeState};
