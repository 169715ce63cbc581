// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Random note cycler.
//!
//! Walks the pitch set in random order without repeats. Every draw is
//! uniform over the pitches not yet used in the current cycle. Once all
//! twelve have been drawn the cycle is complete, and the next request
//! resets it instead of producing a pitch.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::music::{PitchClass, PITCH_COUNT};

/// Notice shown once every pitch in the set has been drawn
pub const COMPLETION_MESSAGE: &str = "All 12 notes have been randomly selected!";

/// Outcome of a single generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleEvent {
    /// A pitch was drawn and the cycle continues
    Note(PitchClass),
    /// The last remaining pitch was drawn; the cycle is now complete
    Completed(PitchClass),
    /// The completed cycle was cleared; no pitch was drawn
    Reset,
}

impl CycleEvent {
    /// The pitch drawn by this request, if any
    pub fn pitch(&self) -> Option<PitchClass> {
        match self {
            CycleEvent::Note(p) | CycleEvent::Completed(p) => Some(*p),
            CycleEvent::Reset => None,
        }
    }
}

/// Note cycler state
#[derive(Debug)]
pub struct NoteCycler {
    /// Pitches already emitted in the current cycle
    used: BTreeSet<PitchClass>,
    /// Most recently emitted pitch
    current: Option<PitchClass>,
    /// True once `used` holds the whole pitch set
    complete: bool,
    rng: StdRng,
}

impl NoteCycler {
    /// Create a cycler seeded from system entropy
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    /// Create a cycler with a fixed seed (reproducible draw order)
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            used: BTreeSet::new(),
            current: None,
            complete: false,
            rng,
        }
    }

    /// Handle a generation request
    pub fn generate(&mut self) -> CycleEvent {
        if self.complete {
            self.reset();
            debug!("cycle reset");
            return CycleEvent::Reset;
        }

        let available = self.remaining();
        // Non-empty: an incomplete cycle has at least one unused pitch.
        let pitch = available[self.rng.gen_range(0..available.len())];
        self.current = Some(pitch);
        self.used.insert(pitch);
        debug!(%pitch, used = self.used.len(), "drew pitch");

        if self.used.len() == PITCH_COUNT {
            self.complete = true;
            debug!("cycle complete");
            CycleEvent::Completed(pitch)
        } else {
            CycleEvent::Note(pitch)
        }
    }

    /// Clear the current cycle
    pub fn reset(&mut self) {
        self.used.clear();
        self.current = None;
        self.complete = false;
    }

    /// Pitches not yet drawn in this cycle, in pitch-set order
    pub fn remaining(&self) -> Vec<PitchClass> {
        PitchClass::ALL
            .into_iter()
            .filter(|p| !self.used.contains(p))
            .collect()
    }

    /// Pitches drawn so far in this cycle
    pub fn used(&self) -> &BTreeSet<PitchClass> {
        &self.used
    }

    /// Most recently drawn pitch
    pub fn current(&self) -> Option<PitchClass> {
        self.current
    }

    /// Whether every pitch has been drawn
    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

impl Default for NoteCycler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_full_cycle_covers_pitch_set() {
        let mut cycler = NoteCycler::with_seed(7);
        let mut drawn = Vec::new();

        for _ in 0..PITCH_COUNT {
            drawn.push(cycler.generate().pitch().unwrap());
        }

        let unique: HashSet<PitchClass> = drawn.iter().copied().collect();
        assert_eq!(unique.len(), PITCH_COUNT);
        assert!(cycler.is_complete());
        assert!(cycler.remaining().is_empty());
    }

    #[test]
    fn test_completed_on_twelfth_draw_only() {
        let mut cycler = NoteCycler::with_seed(1);
        for i in 0..PITCH_COUNT {
            let event = cycler.generate();
            if i + 1 < PITCH_COUNT {
                assert!(matches!(event, CycleEvent::Note(_)));
                assert!(!cycler.is_complete());
            } else {
                assert!(matches!(event, CycleEvent::Completed(_)));
            }
        }
    }

    #[test]
    fn test_reset_after_complete() {
        let mut cycler = NoteCycler::with_seed(3);
        for _ in 0..PITCH_COUNT {
            cycler.generate();
        }

        assert_eq!(cycler.generate(), CycleEvent::Reset);
        assert!(cycler.used().is_empty());
        assert_eq!(cycler.current(), None);
        assert!(!cycler.is_complete());

        // Next request starts a fresh cycle
        let event = cycler.generate();
        assert!(matches!(event, CycleEvent::Note(_)));
        assert_eq!(cycler.used().len(), 1);
    }

    #[test]
    fn test_used_tracks_current() {
        let mut cycler = NoteCycler::with_seed(11);
        assert_eq!(cycler.current(), None);

        for n in 1..=5 {
            let pitch = cycler.generate().pitch().unwrap();
            assert_eq!(cycler.current(), Some(pitch));
            assert!(cycler.used().contains(&pitch));
            assert_eq!(cycler.used().len(), n);
            assert_eq!(cycler.remaining().len(), PITCH_COUNT - n);
        }
    }

    #[test]
    fn test_seeded_cyclers_agree() {
        let mut a = NoteCycler::with_seed(42);
        let mut b = NoteCycler::with_seed(42);
        for _ in 0..30 {
            assert_eq!(a.generate(), b.generate());
        }
    }

    #[test]
    fn test_first_draw_is_spread() {
        // Every pitch should turn up first across enough seeds
        let firsts: HashSet<PitchClass> = (0..500)
            .filter_map(|seed| NoteCycler::with_seed(seed).generate().pitch())
            .collect();
        assert_eq!(firsts.len(), PITCH_COUNT);
    }
}
