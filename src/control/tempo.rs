// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tempo field.
//!
//! Holds the tempo exactly as typed, which may be half-finished or out of
//! range. The metronome only ever sees clamped values:
//! - starting clamps to 40-208 and writes the clamped value back;
//! - editing always caps at 208, and while running also lifts to 40 and
//!   returns the tempo to restart at.

use tracing::debug;

use crate::timing::{clamp_bpm, parse_bpm, MAX_BPM, MIN_BPM};

/// Longest text the field accepts from digit entry
const MAX_DIGITS: usize = 4;

/// Editable tempo field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TempoControl {
    /// Text as typed
    text: String,
    /// Last tempo the metronome was started at
    last_bpm: u32,
}

impl TempoControl {
    /// Create a field showing `initial`
    pub fn new(initial: u32) -> Self {
        Self {
            text: initial.to_string(),
            last_bpm: clamp_bpm(initial as i64),
        }
    }

    /// Current field text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Tempo used when the field cannot be parsed
    pub fn last_bpm(&self) -> u32 {
        self.last_bpm
    }

    /// Parsed field value, unclamped
    pub fn value(&self) -> Option<i64> {
        parse_bpm(&self.text)
    }

    /// Replace the field text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Text after appending a digit (non-digits and overlong input ignored)
    pub fn with_digit(&self, digit: char) -> String {
        let mut text = self.text.clone();
        if digit.is_ascii_digit() && text.len() < MAX_DIGITS {
            text.push(digit);
        }
        text
    }

    /// Text after removing the last character
    pub fn without_last(&self) -> String {
        let mut text = self.text.clone();
        text.pop();
        text
    }

    /// Text after stepping the value by `delta`, kept inside the tempo range
    pub fn stepped(&self, delta: i64) -> String {
        let base = self.value().unwrap_or(self.last_bpm as i64);
        clamp_bpm(base.saturating_add(delta)).to_string()
    }

    /// Resolve the tempo to start the metronome at
    ///
    /// Out-of-range values are clamped, unparsable text falls back to the
    /// last tempo used. The field is rewritten to the result.
    pub fn resolve_for_start(&mut self) -> u32 {
        let bpm = match self.value() {
            Some(value) => clamp_bpm(value),
            None => self.last_bpm,
        };
        self.text = bpm.to_string();
        self.last_bpm = bpm;
        bpm
    }

    /// React to an edit of the field
    ///
    /// Returns the tempo to restart at when `running` and the text parses.
    pub fn on_edit(&mut self, running: bool) -> Option<u32> {
        let mut value = self.value()?;

        if value > MAX_BPM as i64 {
            value = MAX_BPM as i64;
            self.text = MAX_BPM.to_string();
        }

        if !running {
            return None;
        }

        if value < MIN_BPM as i64 {
            value = MIN_BPM as i64;
            self.text = MIN_BPM.to_string();
        }

        let bpm = value as u32;
        debug!(bpm, "tempo edited while running");
        self.last_bpm = bpm;
        Some(bpm)
    }
}

impl Default for TempoControl {
    fn default() -> Self {
        Self::new(crate::timing::DEFAULT_BPM)
    }
}
