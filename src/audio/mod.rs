// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Audio engine for the drill.
//!
//! This module provides:
//! - A shared software audio context that voices are scheduled on
//! - Percussive envelopes and sine voices
//! - Metronome click synthesis
//! - Audio output via cpal

pub mod context;
pub mod envelope;
pub mod output;
pub mod synth;
pub mod voice;

pub use context::{AudioContext, ContextState};
pub use envelope::Envelope;
pub use output::{AudioConfig, AudioOutput};
pub use synth::{ClickSound, ClickSynth};
pub use voice::{Tone, Voice};

use tracing::info;

/// Audio engine combining the context and the device output
pub struct AudioEngine {
    /// Shared audio context
    context: AudioContext,
    /// Audio output
    output: Option<AudioOutput>,
    /// Output configuration
    config: AudioConfig,
}

impl AudioEngine {
    /// Create an engine with a suspended context. No device is opened yet.
    pub fn new(config: AudioConfig) -> Self {
        let context = AudioContext::new(config.sample_rate);
        context.set_gain(config.volume);
        Self {
            context,
            output: None,
            config,
        }
    }

    /// Handle to the shared context
    pub fn context(&self) -> AudioContext {
        self.context.clone()
    }

    /// Open the output device and start rendering the context into it
    pub fn start(&mut self) -> Result<(), AudioError> {
        if self.output.is_some() {
            return Ok(());
        }

        let context = self.context.clone();
        let output = AudioOutput::new(self.config.clone(), move |buffer, channels| {
            context.render(buffer, channels);
        })?;

        self.output = Some(output);
        Ok(())
    }

    /// Close the output device. The context is suspended until resumed.
    pub fn stop(&mut self) {
        if self.output.take().is_some() {
            self.context.suspend();
            info!("audio output stopped");
        }
    }

    /// Close the device and the context
    pub fn shutdown(&mut self) {
        self.stop();
        self.context.close();
    }

    /// Check if a device is open
    pub fn is_running(&self) -> bool {
        self.output.is_some()
    }
}

impl Default for AudioEngine {
    fn default() -> Self {
        Self::new(AudioConfig::default())
    }
}

/// Audio error types
#[derive(Debug, Clone, thiserror::Error)]
pub enum AudioError {
    /// Failed to initialize audio
    #[error("Audio initialization failed: {0}")]
    InitFailed(String),
    /// Failed to start audio stream
    #[error("Audio stream failed: {0}")]
    StreamFailed(String),
    /// No audio device available
    #[error("No audio device available")]
    NoDevice,
    /// Invalid configuration
    #[error("Invalid audio configuration: {0}")]
    InvalidConfig(String),
}
