// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::env;
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use crossterm::event::{Event, KeyEventKind};
use tokio::runtime::Runtime;
use tracing::{info, warn, Level};

use pitchdrill::audio::output::{default_device_name, list_devices};
use pitchdrill::audio::{AudioEngine, ClickSynth};
use pitchdrill::control::{KeyboardController, TempoControl};
use pitchdrill::cycler::{CycleEvent, NoteCycler};
use pitchdrill::music::PITCH_COUNT;
use pitchdrill::session::{Flow, Session};
use pitchdrill::timing::{beat_period, clamp_bpm, Metronome, BEATS_PER_BAR};
use pitchdrill::ui::App;
use pitchdrill::PracticeConfig;

fn print_usage() {
    println!("pitchdrill - Random pitch drill with an accented metronome");
    println!();
    println!("Usage: pitchdrill [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --config <FILE>   Load settings from a YAML file");
    println!("  --bpm <N>         Initial tempo (clamped to 40-208)");
    println!("  --seed <N>        Fixed seed for the note order");
    println!("  --no-audio        Run without opening an audio device");
    println!("  --cycle           Print one full random cycle and exit");
    println!("  --click-test      Play one bar of clicks and exit");
    println!("  --list-devices    List audio output devices");
    println!("  --help            Show this help message");
}

/// What the command line asked for
enum Mode {
    Interactive,
    Cycle,
    ClickTest,
    ListDevices,
    Help,
}

struct Options {
    mode: Mode,
    config: Option<PathBuf>,
    bpm: Option<u32>,
    seed: Option<u64>,
    no_audio: bool,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options {
        mode: Mode::Interactive,
        config: None,
        bpm: None,
        seed: None,
        no_audio: false,
    };

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let path = iter
                    .next()
                    .ok_or_else(|| anyhow!("--config requires a file path"))?;
                options.config = Some(PathBuf::from(path));
            }
            "--bpm" => {
                let value = iter.next().ok_or_else(|| anyhow!("--bpm requires a tempo"))?;
                let bpm: i64 = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid tempo: {}", value))?;
                options.bpm = Some(clamp_bpm(bpm));
            }
            "--seed" => {
                let value = iter.next().ok_or_else(|| anyhow!("--seed requires a number"))?;
                let seed: u64 = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid seed: {}", value))?;
                options.seed = Some(seed);
            }
            "--no-audio" => options.no_audio = true,
            "--cycle" => options.mode = Mode::Cycle,
            "--click-test" => options.mode = Mode::ClickTest,
            "--list-devices" => options.mode = Mode::ListDevices,
            "--help" | "-h" => options.mode = Mode::Help,
            other => return Err(anyhow!("Unknown option: {}", other)),
        }
    }

    Ok(options)
}

/// Load the config file (if any) and fold the command line into it.
/// Out-of-range values are clamped and described in the returned warnings.
fn load_config(options: &Options) -> Result<(PracticeConfig, Vec<String>)> {
    let config = match options.config {
        Some(ref path) => PracticeConfig::load(path)?,
        None => PracticeConfig::default(),
    };

    let warnings = config.validate();
    let mut config = config.normalized();
    if let Some(bpm) = options.bpm {
        config.tempo = bpm;
    }
    if options.seed.is_some() {
        config.seed = options.seed;
    }
    if options.no_audio {
        config.audio_enabled = false;
    }
    Ok((config, warnings))
}

/// Install the log subscriber. The UI owns the terminal, so interactive
/// runs only log when a file is configured.
fn init_logging(config: &PracticeConfig, interactive: bool) -> Result<()> {
    let level = config.level().unwrap_or(Level::INFO);

    match config.log_file {
        Some(ref path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create log file: {:?}", path))?;
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None if !interactive => {
            tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .init();
        }
        None => {}
    }
    Ok(())
}

fn make_cycler(config: &PracticeConfig) -> NoteCycler {
    match config.seed {
        Some(seed) => NoteCycler::with_seed(seed),
        None => NoteCycler::new(),
    }
}

fn print_cycle(config: &PracticeConfig) {
    let mut cycler = make_cycler(config);

    for n in 1..=PITCH_COUNT {
        match cycler.generate() {
            CycleEvent::Note(pitch) => println!("{:2}. {}", n, pitch),
            CycleEvent::Completed(pitch) => {
                println!("{:2}. {}", n, pitch);
                println!();
                println!("{}", pitchdrill::COMPLETION_MESSAGE);
            }
            CycleEvent::Reset => break,
        }
    }
}

fn click_test(config: &PracticeConfig) -> Result<()> {
    let runtime = Runtime::new().context("Failed to start async runtime")?;
    let mut engine = AudioEngine::new(config.audio.clone());
    engine.start()?;

    let context = engine.context();
    context.resume();

    let bpm = config.tempo;
    let period = beat_period(bpm);
    println!(
        "Playing {} clicks at {} BPM on {}...",
        BEATS_PER_BAR,
        bpm,
        default_device_name().unwrap_or_else(|| "default device".into())
    );

    let mut metronome = Metronome::new(ClickSynth::new(context), runtime.handle().clone());
    metronome.start(bpm);
    // Beats land at 1..=4 periods; stop half a period after the last
    runtime.block_on(tokio::time::sleep(period * BEATS_PER_BAR as u32 + period / 2));
    metronome.stop();

    // Let the last click ring out
    runtime.block_on(tokio::time::sleep(Duration::from_millis(150)));
    engine.shutdown();

    println!("Click test complete!");
    Ok(())
}

fn run_interactive(config: &PracticeConfig, warnings: &[String]) -> Result<()> {
    let runtime = Runtime::new().context("Failed to start async runtime")?;

    let mut engine = AudioEngine::new(config.audio.clone());
    let mut audio_problem = None;
    if config.audio_enabled {
        if let Err(e) = engine.start() {
            warn!("running without audio: {}", e);
            audio_problem = Some(format!("No audio: {}", e));
        }
    }

    let mut session = Session::with_engine(
        make_cycler(config),
        TempoControl::new(config.tempo),
        &engine,
        runtime.handle().clone(),
    );

    if let Some(message) = audio_problem {
        session.display_mut().set_status(message);
    } else if !warnings.is_empty() {
        session
            .display_mut()
            .set_status(format!("Config: {}", warnings.join("; ")));
    }

    let keyboard = KeyboardController::with_defaults();
    let mut app = App::new(config.ui.frame_rate).context("Failed to initialize terminal")?;
    info!("session started");

    while app.is_running() {
        session.refresh();
        app.draw(session.display(), &keyboard)?;

        if let Some(Event::Key(key)) = app.poll_event()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(command) = keyboard.resolve(key.code, key.modifiers) {
                if session.dispatch(command) == Flow::Quit {
                    app.quit();
                }
            }
        }
    }

    drop(app);
    session.shutdown();
    engine.shutdown();
    Ok(())
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            print_usage();
            std::process::exit(1);
        }
    };

    if let Mode::Help = options.mode {
        print_usage();
        return Ok(());
    }

    let (config, warnings) = load_config(&options)?;
    init_logging(&config, matches!(options.mode, Mode::Interactive))?;
    for warning in &warnings {
        warn!(%warning, "config value clamped");
    }

    match options.mode {
        Mode::Interactive => run_interactive(&config, &warnings)?,
        Mode::Cycle => print_cycle(&config),
        Mode::ClickTest => click_test(&config)?,
        Mode::ListDevices => {
            let devices = list_devices();
            if devices.is_empty() {
                println!("No audio output devices found");
            }
            for (i, name) in devices.iter().enumerate() {
                println!("{}: {}", i, name);
            }
        }
        Mode::Help => print_usage(),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("pitchdrill")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_config_warnings_returned_not_printed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("drill.yaml");
        std::fs::write(&path, "tempo: 300\n").unwrap();

        let path = path.to_string_lossy().to_string();
        let options = parse_args(&args(&["--config", &path, "--no-audio"])).unwrap();
        let (config, warnings) = load_config(&options).unwrap();

        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("300"));
        assert_eq!(config.tempo, 208);
        assert!(!config.audio_enabled);
    }

    #[test]
    fn test_command_line_overrides() {
        let options = parse_args(&args(&["--bpm", "20", "--seed", "9"])).unwrap();
        let (config, warnings) = load_config(&options).unwrap();

        assert!(warnings.is_empty());
        assert_eq!(config.tempo, 40);
        assert_eq!(config.seed, Some(9));
        assert!(parse_args(&args(&["--bogus"])).is_err());
    }
}
