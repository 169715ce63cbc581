// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Metronome click synthesis.
//!
//! Each click is two sine tones started together:
//!
//! | tone      | normal          | accented        | attack | length |
//! |-----------|-----------------|-----------------|--------|--------|
//! | click     | 2000 Hz @ 0.3   | 2200 Hz @ 0.5   | 1 ms   | 30 ms  |
//! | resonance | 440 Hz @ 0.1    | 480 Hz @ 0.2    | 5 ms   | 100 ms |

use std::time::Duration;

use tracing::trace;

use super::context::AudioContext;
use super::envelope::Envelope;
use super::voice::{Tone, Voice};
use crate::timing::BeatSink;

/// Click tone frequency (Hz)
pub const CLICK_FREQUENCY: f32 = 2000.0;
/// Click tone frequency on an accent (Hz)
pub const ACCENT_CLICK_FREQUENCY: f32 = 2200.0;
/// Click tone peak level
pub const CLICK_PEAK: f32 = 0.3;
/// Click tone peak level on an accent
pub const ACCENT_CLICK_PEAK: f32 = 0.5;
/// Click tone attack
pub const CLICK_ATTACK: Duration = Duration::from_millis(1);
/// Click tone length
pub const CLICK_LENGTH: Duration = Duration::from_millis(30);

/// Resonance tone frequency (Hz)
pub const RESONANCE_FREQUENCY: f32 = 440.0;
/// Resonance tone frequency on an accent (Hz)
pub const ACCENT_RESONANCE_FREQUENCY: f32 = 480.0;
/// Resonance tone peak level
pub const RESONANCE_PEAK: f32 = 0.1;
/// Resonance tone peak level on an accent
pub const ACCENT_RESONANCE_PEAK: f32 = 0.2;
/// Resonance tone attack
pub const RESONANCE_ATTACK: Duration = Duration::from_millis(5);
/// Resonance tone length
pub const RESONANCE_LENGTH: Duration = Duration::from_millis(100);

/// Builds metronome clicks on a shared audio context
#[derive(Debug, Clone)]
pub struct ClickSynth {
    context: AudioContext,
}

impl ClickSynth {
    /// Create a synth that plays through `context`
    pub fn new(context: AudioContext) -> Self {
        Self { context }
    }

    /// The context clicks are played on
    pub fn context(&self) -> &AudioContext {
        &self.context
    }

    /// Build a click. Nothing sounds until [`ClickSound::start`] is called.
    pub fn synthesize(&self, accent: bool) -> ClickSound {
        let (click_freq, click_peak) = if accent {
            (ACCENT_CLICK_FREQUENCY, ACCENT_CLICK_PEAK)
        } else {
            (CLICK_FREQUENCY, CLICK_PEAK)
        };
        let (res_freq, res_peak) = if accent {
            (ACCENT_RESONANCE_FREQUENCY, ACCENT_RESONANCE_PEAK)
        } else {
            (RESONANCE_FREQUENCY, RESONANCE_PEAK)
        };

        ClickSound {
            accent,
            click: Tone::sine(
                click_freq,
                Envelope::percussive(click_peak, CLICK_ATTACK, CLICK_LENGTH),
            ),
            resonance: Tone::sine(
                res_freq,
                Envelope::percussive(res_peak, RESONANCE_ATTACK, RESONANCE_LENGTH),
            ),
            context: self.context.clone(),
        }
    }
}

impl BeatSink for ClickSynth {
    fn beat(&self, accent: bool) {
        self.synthesize(accent).start();
    }
}

/// One click, ready to play
#[derive(Debug, Clone)]
pub struct ClickSound {
    accent: bool,
    click: Tone,
    resonance: Tone,
    context: AudioContext,
}

impl ClickSound {
    /// Start both tones at the context's current time
    ///
    /// Each tone stops on its own once its envelope has run out.
    pub fn start(self) {
        let now = self.context.current_time();
        trace!(accent = self.accent, at = now, "click");
        self.context.schedule(Voice::new(self.click, now));
        self.context.schedule(Voice::new(self.resonance, now));
    }

    /// Whether this is an accented click
    pub fn is_accent(&self) -> bool {
        self.accent
    }

    /// The high click tone
    pub fn click(&self) -> &Tone {
        &self.click
    }

    /// The low resonance tone
    pub fn resonance(&self) -> &Tone {
        &self.resonance
    }

    /// Time until both tones have stopped
    pub fn duration(&self) -> Duration {
        self.click
            .envelope
            .duration()
            .max(self.resonance.envelope.duration())
    }
}
