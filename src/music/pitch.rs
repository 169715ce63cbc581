// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Pitch classes used by the note drill.
//!
//! The drill works on the twelve chromatic pitch classes spelled with
//! sharps only, starting from A.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of pitch classes in an octave
pub const PITCH_COUNT: usize = 12;

/// Pitch class names (sharps, no enharmonic duplicates)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PitchClass {
    A,
    As, // A#
    B,
    C,
    Cs, // C#
    D,
    Ds, // D#
    E,
    F,
    Fs, // F#
    G,
    Gs, // G#
}

impl PitchClass {
    /// The drill's pitch set, in display order
    pub const ALL: [PitchClass; PITCH_COUNT] = [
        PitchClass::A,
        PitchClass::As,
        PitchClass::B,
        PitchClass::C,
        PitchClass::Cs,
        PitchClass::D,
        PitchClass::Ds,
        PitchClass::E,
        PitchClass::F,
        PitchClass::Fs,
        PitchClass::G,
        PitchClass::Gs,
    ];

    /// Position of this pitch class in the pitch set (0-11)
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label shown to the player
    pub fn label(self) -> &'static str {
        match self {
            PitchClass::A => "A",
            PitchClass::As => "A#",
            PitchClass::B => "B",
            PitchClass::C => "C",
            PitchClass::Cs => "C#",
            PitchClass::D => "D",
            PitchClass::Ds => "D#",
            PitchClass::E => "E",
            PitchClass::F => "F",
            PitchClass::Fs => "F#",
            PitchClass::G => "G",
            PitchClass::Gs => "G#",
        }
    }

    /// Whether the label carries a sharp
    pub fn is_sharp(self) -> bool {
        self.label().ends_with('#')
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not one of the twelve sharp spellings
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown pitch class: {0:?}")]
pub struct ParsePitchError(pub String);

impl FromStr for PitchClass {
    type Err = ParsePitchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim().to_uppercase();
        PitchClass::ALL
            .into_iter()
            .find(|p| p.label() == label)
            .ok_or_else(|| ParsePitchError(s.to_string()))
    }
}
