// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for pitchdrill
//!
//! These tests verify that multiple components work together correctly.

use std::collections::BTreeSet;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::{self, Instant};

use pitchdrill::audio::{AudioConfig, AudioContext, AudioEngine, ClickSynth, ContextState};
use pitchdrill::control::{Command, KeyboardController, TempoControl};
use pitchdrill::cycler::{CycleEvent, NoteCycler, COMPLETION_MESSAGE};
use pitchdrill::music::{PitchClass, PITCH_COUNT};
use pitchdrill::session::{Flow, Session};
use pitchdrill::timing::{BeatSink, Metronome, MetronomeState};
use pitchdrill::PracticeConfig;

use crossterm::event::{KeyCode, KeyModifiers};

/// Beat sink that records accent flags and arrival times
#[derive(Clone, Default)]
struct Recorder {
    beats: Arc<Mutex<Vec<(bool, Instant)>>>,
}

impl Recorder {
    fn accents(&self) -> Vec<bool> {
        self.beats.lock().unwrap().iter().map(|(a, _)| *a).collect()
    }

    fn times(&self) -> Vec<Instant> {
        self.beats.lock().unwrap().iter().map(|(_, t)| *t).collect()
    }
}

impl BeatSink for Recorder {
    fn beat(&self, accent: bool) {
        self.beats.lock().unwrap().push((accent, Instant::now()));
    }
}

fn recording_session(seed: u64) -> (Session<Recorder>, Recorder) {
    let recorder = Recorder::default();
    let session = Session::new(
        NoteCycler::with_seed(seed),
        Metronome::new(recorder.clone(), Handle::current()),
        TempoControl::default(),
    );
    (session, recorder)
}

/// Let the paused clock run forward and give the trigger task a turn
async fn advance(duration: Duration) {
    time::sleep(duration).await;
    tokio::task::yield_now().await;
}

#[test]
fn test_full_cycle_covers_every_pitch() {
    for seed in 0..20 {
        let mut cycler = NoteCycler::with_seed(seed);
        let mut seen = BTreeSet::new();

        for n in 1..=PITCH_COUNT {
            let pitch = match cycler.generate() {
                CycleEvent::Note(p) if n < PITCH_COUNT => p,
                CycleEvent::Completed(p) if n == PITCH_COUNT => p,
                other => panic!("unexpected event {:?} at draw {}", other, n),
            };
            assert!(seen.insert(pitch), "{} drawn twice", pitch);
        }

        let all: BTreeSet<PitchClass> = PitchClass::ALL.iter().copied().collect();
        assert_eq!(seen, all);
    }
}

#[test]
fn test_thirteenth_draw_resets_then_new_cycle() {
    let mut cycler = NoteCycler::with_seed(11);
    for _ in 0..PITCH_COUNT {
        cycler.generate();
    }
    assert!(cycler.is_complete());

    assert_eq!(cycler.generate(), CycleEvent::Reset);
    assert!(cycler.used().is_empty());
    assert_eq!(cycler.current(), None);

    let event = cycler.generate();
    assert!(matches!(event, CycleEvent::Note(_)));
    assert_eq!(cycler.used().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_session_drill_round() {
    let (mut session, _) = recording_session(3);

    let mut drawn = Vec::new();
    for _ in 0..PITCH_COUNT {
        session.dispatch(Command::GeneratePitch);
        drawn.push(session.display().note_text().to_string());
    }
    assert_eq!(session.display().completion.as_deref(), Some(COMPLETION_MESSAGE));

    let unique: BTreeSet<&String> = drawn.iter().collect();
    assert_eq!(unique.len(), PITCH_COUNT);
    assert!(drawn.iter().all(|label| label.parse::<PitchClass>().is_ok()));

    session.dispatch(Command::GeneratePitch);
    assert_eq!(session.display().note_text(), "");
    assert_eq!(session.display().completion, None);
}

#[tokio::test(start_paused = true)]
async fn test_metronome_accents_and_spacing() {
    let (mut session, recorder) = recording_session(1);

    session.dispatch(Command::StartMetronome);
    advance(Duration::from_millis(500 * 8 + 100)).await;

    assert_eq!(
        recorder.accents(),
        vec![true, false, false, false, true, false, false, false]
    );

    let times = recorder.times();
    for pair in times.windows(2) {
        assert_eq!(pair[1] - pair[0], Duration::from_millis(500));
    }

    session.refresh();
    assert_eq!(session.display().beat, 8);
    session.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_restart_resets_phase() {
    let (mut session, recorder) = recording_session(1);

    session.dispatch(Command::StartMetronome);
    advance(Duration::from_millis(1100)).await; // two beats
    session.dispatch(Command::StartMetronome);
    advance(Duration::from_millis(1100)).await; // two more

    assert_eq!(recorder.accents(), vec![true, false, true, false]);
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent_and_silences() {
    let (mut session, recorder) = recording_session(1);

    session.dispatch(Command::StartMetronome);
    advance(Duration::from_millis(600)).await;
    session.dispatch(Command::StopMetronome);
    session.dispatch(Command::StopMetronome);

    let heard = recorder.accents().len();
    advance(Duration::from_secs(5)).await;

    assert_eq!(heard, 1);
    assert_eq!(recorder.accents().len(), heard);
    assert_eq!(session.metronome().state(), MetronomeState::Stopped);
    assert_eq!(session.metronome().beat_index(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_start_clamps_tempo() {
    let (mut session, recorder) = recording_session(1);

    session.dispatch(Command::EditTempo("20".into()));
    session.dispatch(Command::StartMetronome);
    assert_eq!(session.metronome().bpm(), 40);
    assert_eq!(session.display().tempo_text, "40");

    advance(Duration::from_millis(1500 * 2 + 100)).await;
    let times = recorder.times();
    assert_eq!(times.len(), 2);
    assert_eq!(times[1] - times[0], Duration::from_millis(1500));

    session.dispatch(Command::StopMetronome);
    session.dispatch(Command::EditTempo("300".into()));
    assert_eq!(session.display().tempo_text, "208");
    session.dispatch(Command::StartMetronome);
    assert_eq!(session.metronome().bpm(), 208);
}

#[tokio::test(start_paused = true)]
async fn test_unparsable_tempo_falls_back() {
    let (mut session, _) = recording_session(1);

    session.dispatch(Command::EditTempo("abc".into()));
    assert_eq!(session.display().tempo_text, "abc");

    session.dispatch(Command::StartMetronome);
    assert_eq!(session.metronome().bpm(), 120);
    assert_eq!(session.display().tempo_text, "120");
}

#[tokio::test(start_paused = true)]
async fn test_clicks_reach_audio_context() {
    let context = AudioContext::new(8000);
    let mut session = Session::new(
        NoteCycler::with_seed(2),
        Metronome::new(ClickSynth::new(context.clone()), Handle::current()),
        TempoControl::default(),
    )
    .with_audio(context.clone());

    assert_eq!(context.state(), ContextState::Suspended);
    session.dispatch(Command::StartMetronome);
    assert_eq!(context.state(), ContextState::Running);

    advance(Duration::from_millis(550)).await;
    // One click is a high tone plus a low resonance
    assert_eq!(context.active_voices(), 2);

    let mut buffer = vec![0.0f32; 8000 * 2 / 5];
    context.render(&mut buffer, 2);
    let peak = buffer.iter().fold(0.0f32, |m, s| m.max(s.abs()));
    assert!(peak > 0.1, "accented click too quiet: {}", peak);
    assert_eq!(context.active_voices(), 0);

    session.shutdown();
}

#[tokio::test(start_paused = true)]
async fn test_session_without_output_keeps_no_voices() {
    let engine = AudioEngine::new(AudioConfig::default());
    assert!(!engine.is_running());

    let mut session = Session::with_engine(
        NoteCycler::with_seed(8),
        TempoControl::new(208),
        &engine,
        Handle::current(),
    );
    session.dispatch(Command::StartMetronome);
    assert_eq!(session.display().metronome, MetronomeState::Running);

    // Ten minutes at the fastest tempo
    advance(Duration::from_secs(600)).await;

    let context = engine.context();
    assert_eq!(context.active_voices(), 0);
    assert_eq!(context.state(), ContextState::Suspended);
    assert_eq!(context.current_time(), 0.0);

    session.refresh();
    assert!(session.display().beat >= 2000);
    session.shutdown();
}

#[test]
fn test_accented_click_is_louder() {
    let synth = ClickSynth::new(AudioContext::new(44100));
    let normal = synth.synthesize(false);
    let accent = synth.synthesize(true);

    assert_eq!(accent.click().peak(), 0.5);
    assert_eq!(accent.resonance().peak(), 0.2);
    assert_eq!(normal.click().peak(), 0.3);
    assert_eq!(normal.resonance().peak(), 0.1);
}

#[tokio::test(start_paused = true)]
async fn test_keys_drive_session() {
    let (mut session, _) = recording_session(4);
    let keyboard = KeyboardController::with_defaults();

    let mut press = |code: KeyCode, modifiers: KeyModifiers| {
        keyboard
            .resolve(code, modifiers)
            .map(|command| session.dispatch(command))
    };

    assert_eq!(press(KeyCode::Char('n'), KeyModifiers::NONE), Some(Flow::Continue));
    assert_eq!(press(KeyCode::Char(' '), KeyModifiers::NONE), Some(Flow::Continue));
    assert_eq!(press(KeyCode::Backspace, KeyModifiers::NONE), Some(Flow::Continue));
    assert_eq!(press(KeyCode::Char('8'), KeyModifiers::NONE), Some(Flow::Continue));
    assert_eq!(press(KeyCode::Char('q'), KeyModifiers::NONE), Some(Flow::Quit));

    // "120" -> "12" lifted to "40" while running, then "408" capped
    assert_eq!(session.tempo().text(), "208");
    assert_eq!(session.metronome().bpm(), 208);
    assert!(session.display().note.is_some());
}

#[test]
fn test_config_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pitchdrill.yaml");
    std::fs::write(&path, "tempo: 30\nseed: 7\naudio_enabled: false\n").unwrap();

    let config = PracticeConfig::load(&path).unwrap();
    assert_eq!(config.validate().len(), 1);

    let config = config.normalized();
    assert_eq!(config.tempo, 40);
    assert_eq!(config.seed, Some(7));
    assert!(!config.audio_enabled);

    let mut a = NoteCycler::with_seed(config.seed.unwrap());
    let mut b = NoteCycler::with_seed(7);
    for _ in 0..PITCH_COUNT {
        assert_eq!(a.generate(), b.generate());
    }
}
