// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Shared audio context.
//!
//! The context owns the clock that voices are scheduled against and mixes
//! every active voice into the output buffer. It is created once at
//! startup and handed to whatever needs to make sound; clones share the
//! same mixer.
//!
//! A new context starts out [`ContextState::Suspended`]: rendering outputs
//! silence and the clock does not advance until [`AudioContext::resume`]
//! is called.

use std::sync::{Arc, Mutex};

use tracing::{debug, info};

use super::voice::Voice;

/// Power state of the audio context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState {
    /// Clock frozen, output silent
    Suspended,
    /// Clock advancing, voices audible
    Running,
    /// Permanently shut down
    Closed,
}

#[derive(Debug)]
struct Mixer {
    sample_rate: u32,
    /// Frames rendered since the context was created
    frame: u64,
    state: ContextState,
    gain: f32,
    voices: Vec<Voice>,
}

impl Mixer {
    fn current_time(&self) -> f64 {
        self.frame as f64 / self.sample_rate as f64
    }
}

/// Handle to the shared audio context
#[derive(Debug, Clone)]
pub struct AudioContext {
    inner: Arc<Mutex<Mixer>>,
}

impl AudioContext {
    /// Create a suspended context running at `sample_rate`
    pub fn new(sample_rate: u32) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Mixer {
                sample_rate: sample_rate.max(1),
                frame: 0,
                state: ContextState::Suspended,
                gain: 1.0,
                voices: Vec::new(),
            })),
        }
    }

    /// Sample rate in Hz
    pub fn sample_rate(&self) -> u32 {
        self.inner.lock().map(|m| m.sample_rate).unwrap_or(1)
    }

    /// Context clock in seconds
    pub fn current_time(&self) -> f64 {
        self.inner.lock().map(|m| m.current_time()).unwrap_or(0.0)
    }

    /// Current power state
    pub fn state(&self) -> ContextState {
        self.inner
            .lock()
            .map(|m| m.state)
            .unwrap_or(ContextState::Closed)
    }

    /// Resume a suspended context. No effect once closed.
    pub fn resume(&self) {
        self.transition(ContextState::Running);
    }

    /// Suspend a running context. No effect once closed.
    pub fn suspend(&self) {
        self.transition(ContextState::Suspended);
    }

    /// Close the context and drop every pending voice
    pub fn close(&self) {
        if let Ok(mut mixer) = self.inner.lock() {
            mixer.state = ContextState::Closed;
            mixer.voices.clear();
            info!("audio context closed");
        }
    }

    fn transition(&self, to: ContextState) {
        if let Ok(mut mixer) = self.inner.lock() {
            if mixer.state != ContextState::Closed && mixer.state != to {
                info!(from = ?mixer.state, ?to, "audio context state change");
                mixer.state = to;
            }
        }
    }

    /// Set master gain (0.0 - 1.0)
    pub fn set_gain(&self, gain: f32) {
        if let Ok(mut mixer) = self.inner.lock() {
            mixer.gain = gain.clamp(0.0, 1.0);
        }
    }

    /// Master gain
    pub fn gain(&self) -> f32 {
        self.inner.lock().map(|m| m.gain).unwrap_or(0.0)
    }

    /// Hand a voice to the mixer. Ignored once closed.
    pub fn schedule(&self, voice: Voice) {
        if let Ok(mut mixer) = self.inner.lock() {
            if mixer.state == ContextState::Closed {
                return;
            }
            debug!(
                frequency = voice.tone().frequency,
                start = voice.start_time(),
                stop = voice.stop_time(),
                "voice scheduled"
            );
            mixer.voices.push(voice);
        }
    }

    /// Number of voices that have not finished yet
    pub fn active_voices(&self) -> usize {
        self.inner.lock().map(|m| m.voices.len()).unwrap_or(0)
    }

    /// Mix all active voices into an interleaved buffer
    ///
    /// The mono mix is added to every channel. Finished voices are dropped
    /// after the buffer is rendered.
    pub fn render(&self, buffer: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        let Ok(mut mixer) = self.inner.lock() else {
            return;
        };
        if mixer.state != ContextState::Running {
            return;
        }

        let sample_rate = mixer.sample_rate as f64;
        let frames = buffer.len() / channels;

        for (i, frame) in buffer.chunks_mut(channels).take(frames).enumerate() {
            let time = (mixer.frame + i as u64) as f64 / sample_rate;
            let value: f32 = mixer.voices.iter().map(|v| v.value_at(time)).sum();
            let value = value * mixer.gain;
            for sample in frame.iter_mut() {
                *sample += value;
            }
        }

        mixer.frame += frames as u64;
        let now = mixer.current_time();
        mixer.voices.retain(|v| !v.is_finished(now));
    }
}
