// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Metronome engine.
//!
//! While running, a single repeating task fires once per beat and hands the
//! beat to a [`BeatSink`], with an accent on every fourth beat starting from
//! the first. Starting again (for example after a tempo change) cancels the
//! running task before the new one is installed, so beats are never double
//! scheduled. Phase restarts at beat 0 on every start and stop.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{info, trace};

/// Beats in an accent group
pub const BEATS_PER_BAR: u64 = 4;

/// Tempo used until the first start
pub const DEFAULT_BPM: u32 = 120;

/// Receives beats from the metronome
pub trait BeatSink: Send + Sync + 'static {
    /// Called once per beat, from the metronome's trigger task
    fn beat(&self, accent: bool);
}

/// An absent sink swallows beats; the metronome still keeps time
impl<S: BeatSink> BeatSink for Option<S> {
    fn beat(&self, accent: bool) {
        if let Some(sink) = self {
            sink.beat(accent);
        }
    }
}

/// Metronome state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetronomeState {
    Stopped,
    Running,
}

/// Whether the beat at `index` carries an accent
pub fn is_accent(index: u64) -> bool {
    index % BEATS_PER_BAR == 0
}

/// Time between beats at `bpm`
pub fn beat_period(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / bpm.max(1) as f64)
}

/// Handle to the running trigger task. Dropping it cancels the task.
#[derive(Debug)]
struct BeatTrigger {
    task: JoinHandle<()>,
    /// Beats emitted by this trigger
    beat: Arc<AtomicU64>,
    period: Duration,
}

impl BeatTrigger {
    fn spawn<S: BeatSink>(runtime: &Handle, sink: Arc<S>, period: Duration) -> Self {
        let beat = Arc::new(AtomicU64::new(0));
        let counter = Arc::clone(&beat);
        // First beat lands one period after start
        let first = Instant::now() + period;

        let task = runtime.spawn(async move {
            let mut ticker = time::interval_at(first, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let index = counter.load(Ordering::Acquire);
                let accent = is_accent(index);
                trace!(index, accent, "beat");
                sink.beat(accent);
                counter.store(index + 1, Ordering::Release);
            }
        });

        Self { task, beat, period }
    }
}

impl Drop for BeatTrigger {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Metronome engine
pub struct Metronome<S: BeatSink> {
    sink: Arc<S>,
    runtime: Handle,
    /// Tempo of the current or most recent run
    bpm: u32,
    /// Active trigger, present only while running
    trigger: Option<BeatTrigger>,
}

impl<S: BeatSink> Metronome<S> {
    /// Create a stopped metronome that spawns its trigger on `runtime`
    pub fn new(sink: S, runtime: Handle) -> Self {
        Self {
            sink: Arc::new(sink),
            runtime,
            bpm: DEFAULT_BPM,
            trigger: None,
        }
    }

    /// Start beating at `bpm`
    ///
    /// The caller is responsible for keeping `bpm` in range. Any running
    /// trigger is cancelled first and the beat count restarts at 0.
    pub fn start(&mut self, bpm: u32) {
        let restarting = self.trigger.take().is_some();
        let period = beat_period(bpm);
        self.bpm = bpm;
        self.trigger = Some(BeatTrigger::spawn(&self.runtime, Arc::clone(&self.sink), period));

        if restarting {
            info!(bpm, period_ms = period.as_secs_f64() * 1000.0, "metronome restarted");
        } else {
            info!(bpm, period_ms = period.as_secs_f64() * 1000.0, "metronome started");
        }
    }

    /// Stop beating. Does nothing when already stopped.
    pub fn stop(&mut self) {
        if self.trigger.take().is_some() {
            info!("metronome stopped");
        }
    }

    /// Current state
    pub fn state(&self) -> MetronomeState {
        if self.trigger.is_some() {
            MetronomeState::Running
        } else {
            MetronomeState::Stopped
        }
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.trigger.is_some()
    }

    /// Tempo of the current or most recent run
    pub fn bpm(&self) -> u32 {
        self.bpm
    }

    /// Beats emitted since the last start (0 while stopped)
    pub fn beat_index(&self) -> u64 {
        self.trigger
            .as_ref()
            .map(|t| t.beat.load(Ordering::Acquire))
            .unwrap_or(0)
    }

    /// Position of the next beat within its accent group (0-3)
    pub fn beat_in_bar(&self) -> u64 {
        self.beat_index() % BEATS_PER_BAR
    }

    /// Beat period of the active trigger
    pub fn period(&self) -> Option<Duration> {
        self.trigger.as_ref().map(|t| t.period)
    }
}
