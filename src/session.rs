// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Practice session.
//!
//! Owns the note cycler, the metronome and the tempo field, and applies
//! every [`Command`] to them. The results land in a [`DisplayState`] that
//! the terminal UI renders.

use std::time::{Duration, Instant};

use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::audio::{AudioContext, AudioEngine, ClickSynth, ContextState};
use crate::control::{Command, TempoControl};
use crate::cycler::{CycleEvent, NoteCycler, COMPLETION_MESSAGE};
use crate::music::{PitchClass, PITCH_COUNT};
use crate::timing::{BeatSink, Metronome, MetronomeState};

/// How long a status message stays visible
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Whether the session should keep running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything the display surface shows
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayState {
    /// Pitch on display, cleared after a cycle reset
    pub note: Option<PitchClass>,
    /// Completion notice, visible while set
    pub completion: Option<String>,
    /// Pitches drawn in the current cycle
    pub cycle_progress: usize,
    /// Tempo field text
    pub tempo_text: String,
    /// Metronome state
    pub metronome: MetronomeState,
    /// Tempo the metronome is running at
    pub bpm: u32,
    /// Beats emitted since the metronome started
    pub beat: u64,
    /// Help overlay visible
    pub show_help: bool,
    /// Status message
    pub status_message: Option<String>,
    /// Status message timestamp
    pub status_time: Option<Instant>,
}

impl DisplayState {
    fn new(tempo_text: &str, bpm: u32) -> Self {
        Self {
            note: None,
            completion: None,
            cycle_progress: 0,
            tempo_text: tempo_text.to_string(),
            metronome: MetronomeState::Stopped,
            bpm,
            beat: 0,
            show_help: false,
            status_message: None,
            status_time: None,
        }
    }

    /// Text for the note panel
    pub fn note_text(&self) -> &str {
        self.note.map(|p| p.label()).unwrap_or("")
    }

    /// Set a status message that will be displayed temporarily
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_time = Some(Instant::now());
    }

    /// Clear expired status message
    pub fn clear_expired_status(&mut self) {
        if let Some(time) = self.status_time {
            if time.elapsed() > STATUS_TIMEOUT {
                self.status_message = None;
                self.status_time = None;
            }
        }
    }
}

/// Session that clicks through an [`AudioEngine`] when it has an output
pub type EngineSession = Session<Option<ClickSynth>>;

/// A practice session
pub struct Session<S: BeatSink> {
    cycler: NoteCycler,
    metronome: Metronome<S>,
    tempo: TempoControl,
    /// Context to wake on the first start, if audio is wired up
    audio: Option<AudioContext>,
    display: DisplayState,
}

impl EngineSession {
    /// Wire a session to `engine`
    ///
    /// Clicks are synthesized only if the engine has an open output when
    /// the session is built. Without one the metronome keeps time silently
    /// and the context is never woken.
    pub fn with_engine(
        cycler: NoteCycler,
        tempo: TempoControl,
        engine: &AudioEngine,
        runtime: Handle,
    ) -> Self {
        if engine.is_running() {
            let metronome = Metronome::new(Some(ClickSynth::new(engine.context())), runtime);
            Self::new(cycler, metronome, tempo).with_audio(engine.context())
        } else {
            info!("no audio output, metronome runs silent");
            Self::new(cycler, Metronome::new(None, runtime), tempo)
        }
    }
}

impl<S: BeatSink> Session<S> {
    /// Create a session from its parts
    pub fn new(cycler: NoteCycler, metronome: Metronome<S>, tempo: TempoControl) -> Self {
        let display = DisplayState::new(tempo.text(), metronome.bpm());
        Self {
            cycler,
            metronome,
            tempo,
            audio: None,
            display,
        }
    }

    /// Attach the audio context the metronome plays through
    pub fn with_audio(mut self, context: AudioContext) -> Self {
        self.audio = Some(context);
        self
    }

    /// Apply a command
    pub fn dispatch(&mut self, command: Command) -> Flow {
        if command.is_transport() {
            info!(?command, "transport");
        } else {
            debug!(?command, "dispatch");
        }
        match command {
            Command::GeneratePitch => {
                self.generate_pitch();
            }
            Command::StartMetronome => {
                self.start_metronome();
            }
            Command::StopMetronome => self.stop_metronome(),
            Command::EditTempo(text) => self.edit_tempo(text),
            Command::TypeTempoDigit(digit) => {
                let text = self.tempo.with_digit(digit);
                self.edit_tempo(text);
            }
            Command::EraseTempoDigit => {
                let text = self.tempo.without_last();
                self.edit_tempo(text);
            }
            Command::AdjustTempo(delta) => {
                let text = self.tempo.stepped(delta);
                self.edit_tempo(text);
            }
            Command::ToggleHelp => self.display.show_help = !self.display.show_help,
            Command::Quit => return Flow::Quit,
        }
        self.refresh();
        Flow::Continue
    }

    /// Draw the next pitch and update the display
    pub fn generate_pitch(&mut self) -> CycleEvent {
        let event = self.cycler.generate();
        match event {
            CycleEvent::Note(pitch) => {
                self.display.note = Some(pitch);
            }
            CycleEvent::Completed(pitch) => {
                self.display.note = Some(pitch);
                self.display.completion = Some(COMPLETION_MESSAGE.to_string());
            }
            CycleEvent::Reset => {
                self.display.note = None;
                self.display.completion = None;
            }
        }
        self.display.cycle_progress = self.cycler.used().len();
        event
    }

    /// Start (or restart) the metronome at the tempo field's value
    pub fn start_metronome(&mut self) -> u32 {
        if let Some(ref context) = self.audio {
            if context.state() == ContextState::Suspended {
                context.resume();
            }
        }

        let bpm = self.tempo.resolve_for_start();
        self.metronome.start(bpm);
        self.display.tempo_text = self.tempo.text().to_string();
        self.display.set_status(format!("Metronome at {} BPM", bpm));
        bpm
    }

    /// Stop the metronome
    pub fn stop_metronome(&mut self) {
        if self.metronome.is_running() {
            self.display.set_status("Metronome stopped");
        }
        self.metronome.stop();
    }

    /// Replace the tempo field text and react to it
    pub fn edit_tempo(&mut self, text: String) {
        self.tempo.set_text(text);
        if let Some(bpm) = self.tempo.on_edit(self.metronome.is_running()) {
            self.metronome.start(bpm);
        }
        self.display.tempo_text = self.tempo.text().to_string();
    }

    /// Pull live metronome state into the display
    pub fn refresh(&mut self) {
        self.display.metronome = self.metronome.state();
        self.display.bpm = self.metronome.bpm();
        self.display.beat = self.metronome.beat_index();
        self.display.clear_expired_status();
    }

    /// Stop everything that runs in the background
    pub fn shutdown(&mut self) {
        self.metronome.stop();
        info!("session shut down");
    }

    /// Current display state
    pub fn display(&self) -> &DisplayState {
        &self.display
    }

    /// Mutable display state
    pub fn display_mut(&mut self) -> &mut DisplayState {
        &mut self.display
    }

    /// The note cycler
    pub fn cycler(&self) -> &NoteCycler {
        &self.cycler
    }

    /// The metronome
    pub fn metronome(&self) -> &Metronome<S> {
        &self.metronome
    }

    /// The tempo field
    pub fn tempo(&self) -> &TempoControl {
        &self.tempo
    }

    /// Pitches remaining in the current cycle
    pub fn remaining(&self) -> usize {
        PITCH_COUNT - self.cycler.used().len()
    }
}
