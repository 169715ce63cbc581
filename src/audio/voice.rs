// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Tone generators and scheduled voices.

use std::f64::consts::TAU;

use super::envelope::Envelope;

/// A sine oscillator shaped by an envelope
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tone {
    /// Frequency in Hz
    pub frequency: f32,
    /// Amplitude envelope
    pub envelope: Envelope,
}

impl Tone {
    /// Create a sine tone
    pub fn sine(frequency: f32, envelope: Envelope) -> Self {
        Self { frequency, envelope }
    }

    /// Sample value `t` seconds after the tone started
    pub fn sample_at(&self, t: f64) -> f32 {
        let phase = (TAU * self.frequency as f64 * t).sin() as f32;
        phase * self.envelope.amplitude_at(t)
    }

    /// Peak amplitude
    pub fn peak(&self) -> f32 {
        self.envelope.peak
    }
}

/// A tone bound to start and stop times on an audio context clock
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Voice {
    tone: Tone,
    /// Context time the tone starts, in seconds
    start: f64,
    /// Context time the tone stops, in seconds
    stop: f64,
}

impl Voice {
    /// Schedule a tone to start at `start` and stop when its envelope ends
    pub fn new(tone: Tone, start: f64) -> Self {
        Self {
            tone,
            start,
            stop: start + tone.envelope.duration().as_secs_f64(),
        }
    }

    /// The scheduled tone
    pub fn tone(&self) -> &Tone {
        &self.tone
    }

    /// Scheduled start time
    pub fn start_time(&self) -> f64 {
        self.start
    }

    /// Scheduled stop time
    pub fn stop_time(&self) -> f64 {
        self.stop
    }

    /// Sample value at context time `time`
    pub fn value_at(&self, time: f64) -> f32 {
        if time < self.start || time >= self.stop {
            0.0
        } else {
            self.tone.sample_at(time - self.start)
        }
    }

    /// Whether the voice has stopped by context time `time`
    pub fn is_finished(&self, time: f64) -> bool {
        time >= self.stop
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn tone() -> Tone {
        Tone::sine(
            440.0,
            Envelope::percussive(0.1, Duration::from_millis(5), Duration::from_millis(100)),
        )
    }

    #[test]
    fn test_voice_window() {
        let voice = Voice::new(tone(), 1.0);
        assert!((voice.stop_time() - 1.1).abs() < 1e-9);
        assert_eq!(voice.value_at(0.99), 0.0);
        assert_eq!(voice.value_at(1.1), 0.0);
        assert!(!voice.is_finished(1.05));
        assert!(voice.is_finished(1.1));
    }

    #[test]
    fn test_voice_sounds_inside_window() {
        let voice = Voice::new(tone(), 0.0);
        // A quarter period of 440 Hz after the attack peak
        let t = 0.005 + 1.0 / (4.0 * 440.0);
        assert!(voice.value_at(t).abs() > 0.01);
    }

    #[test]
    fn test_sample_never_exceeds_peak() {
        let tone = tone();
        for i in 0..4410 {
            let t = i as f64 / 44100.0;
            assert!(tone.sample_at(t).abs() <= tone.peak() + 1e-6);
        }
    }
}
