// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory utilities for the drill.
//!
//! This module provides the fixed pitch set the note cycler draws from.

pub mod pitch;

pub use pitch::{ParsePitchError, PitchClass, PITCH_COUNT};
