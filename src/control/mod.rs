// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control system for keyboard input.
//!
//! This module provides:
//! - The command set every external trigger maps onto
//! - Keyboard shortcut handling
//! - The tempo field and its clamping policy

pub mod keyboard;
pub mod tempo;

pub use keyboard::{KeyBinding, KeyboardController, Shortcut};
pub use tempo::TempoControl;

/// Command issued by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    // Note drill
    /// Draw the next pitch (or reset a completed cycle)
    GeneratePitch,

    // Metronome
    /// Start (or restart) the metronome at the tempo field's value
    StartMetronome,
    /// Stop the metronome
    StopMetronome,

    // Tempo field
    /// Replace the tempo field text
    EditTempo(String),
    /// Append a digit to the tempo field
    TypeTempoDigit(char),
    /// Remove the last character of the tempo field
    EraseTempoDigit,
    /// Step the tempo field by a number of BPM
    AdjustTempo(i64),

    // UI
    /// Toggle help display
    ToggleHelp,
    /// Quit application
    Quit,
}

impl Command {
    /// Check if this is a metronome transport command
    pub fn is_transport(&self) -> bool {
        matches!(self, Command::StartMetronome | Command::StopMetronome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_categories() {
        assert!(Command::StartMetronome.is_transport());
        assert!(Command::StopMetronome.is_transport());
        assert!(!Command::GeneratePitch.is_transport());
    }
}
