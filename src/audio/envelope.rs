// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Percussive amplitude envelope.
//!
//! Linear attack from silence to the peak, then an exponential ramp down
//! to [`SILENCE_FLOOR`] at the end of the envelope. The floor is held after
//! that point, matching how an exponential ramp can never reach zero.

use std::time::Duration;

/// Level the exponential decay ramps toward
pub const SILENCE_FLOOR: f32 = 0.001;

/// Attack/decay envelope for a single tone
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    /// Peak amplitude reached at the end of the attack
    pub peak: f32,
    /// Time from silence to peak
    pub attack: Duration,
    /// Time from the start of the tone to the end of the decay
    pub total: Duration,
}

impl Envelope {
    /// Create a percussive envelope
    ///
    /// `total` is clamped so it is never shorter than `attack`.
    pub fn percussive(peak: f32, attack: Duration, total: Duration) -> Self {
        Self {
            peak,
            attack,
            total: total.max(attack),
        }
    }

    /// Amplitude `t` seconds after the tone started
    pub fn amplitude_at(&self, t: f64) -> f32 {
        if t < 0.0 || self.peak <= 0.0 {
            return 0.0;
        }

        let attack = self.attack.as_secs_f64();
        let total = self.total.as_secs_f64();

        if t < attack {
            return self.peak * (t / attack) as f32;
        }

        let decay = total - attack;
        if t >= total || decay <= 0.0 {
            return SILENCE_FLOOR;
        }

        let progress = (t - attack) / decay;
        let ratio = (SILENCE_FLOOR / self.peak) as f64;
        self.peak * ratio.powf(progress) as f32
    }

    /// Length of the envelope
    pub fn duration(&self) -> Duration {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click() -> Envelope {
        Envelope::percussive(0.3, Duration::from_millis(1), Duration::from_millis(30))
    }

    #[test]
    fn test_starts_silent() {
        let env = click();
        assert_eq!(env.amplitude_at(0.0), 0.0);
        assert_eq!(env.amplitude_at(-0.01), 0.0);
    }

    #[test]
    fn test_linear_attack() {
        let env = click();
        assert!((env.amplitude_at(0.0005) - 0.15).abs() < 1e-4);
        assert!((env.amplitude_at(0.001) - 0.3).abs() < 1e-4);
    }

    #[test]
    fn test_exponential_decay() {
        let env = click();
        // Halfway through the decay the level is the geometric mean of
        // the peak and the floor
        let mid = 0.001 + 0.029 / 2.0;
        let expected = (0.3f64 * SILENCE_FLOOR as f64).sqrt() as f32;
        assert!((env.amplitude_at(mid) - expected).abs() < 1e-4);

        let mut last = env.amplitude_at(0.001);
        for i in 2..30 {
            let level = env.amplitude_at(i as f64 / 1000.0);
            assert!(level < last);
            last = level;
        }
    }

    #[test]
    fn test_holds_floor_after_end() {
        let env = click();
        assert_eq!(env.amplitude_at(0.03), SILENCE_FLOOR);
        assert_eq!(env.amplitude_at(1.0), SILENCE_FLOOR);
        assert_eq!(env.duration(), Duration::from_millis(30));
    }

    #[test]
    fn test_total_never_shorter_than_attack() {
        let env = Envelope::percussive(0.5, Duration::from_millis(10), Duration::from_millis(2));
        assert_eq!(env.total, Duration::from_millis(10));
    }
}
