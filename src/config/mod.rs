// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Configuration for the drill.
//!
//! Every field has a default, so an empty file (or no file at all) is a
//! valid configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::Level;

use crate::audio::AudioConfig;
use crate::timing::{clamp_bpm, DEFAULT_BPM, MAX_BPM, MIN_BPM};

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PracticeConfig {
    /// Initial tempo field value in BPM
    pub tempo: u32,
    /// Fixed seed for the note cycler
    pub seed: Option<u64>,
    /// Open an audio device at startup
    pub audio_enabled: bool,
    /// Audio output settings
    pub audio: AudioConfig,
    /// Terminal UI settings
    pub ui: UiConfig,
    /// File to write logs to (the terminal is taken by the UI)
    pub log_file: Option<PathBuf>,
    /// Log level name ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
}

impl Default for PracticeConfig {
    fn default() -> Self {
        Self {
            tempo: DEFAULT_BPM,
            seed: None,
            audio_enabled: true,
            audio: AudioConfig::default(),
            ui: UiConfig::default(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

impl PracticeConfig {
    /// Load configuration from a YAML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;
        Self::from_yaml(&contents)
    }

    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).context("Failed to parse YAML configuration")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize configuration to YAML")
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = self.to_yaml()?;
        fs::write(path.as_ref(), yaml)
            .with_context(|| format!("Failed to write config file: {:?}", path.as_ref()))
    }

    /// Describe every out-of-range value
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if !(MIN_BPM..=MAX_BPM).contains(&self.tempo) {
            warnings.push(format!(
                "tempo {} outside {}-{} BPM, will be clamped",
                self.tempo, MIN_BPM, MAX_BPM
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            warnings.push(format!("volume {} outside 0.0-1.0", self.audio.volume));
        }
        if let Err(e) = self.audio.check() {
            warnings.push(e.to_string());
        }
        if !(1..=120).contains(&self.ui.frame_rate) {
            warnings.push(format!("frame rate {} outside 1-120", self.ui.frame_rate));
        }
        if let Err(e) = self.level() {
            warnings.push(e.to_string());
        }

        warnings
    }

    /// Clamp every value into range
    pub fn normalized(mut self) -> Self {
        self.tempo = clamp_bpm(self.tempo as i64);
        self.audio.volume = self.audio.volume.clamp(0.0, 1.0);
        self.ui.frame_rate = self.ui.frame_rate.clamp(1, 120);
        self
    }

    /// Parsed log level
    pub fn level(&self) -> Result<Level> {
        Level::from_str(&self.log_level)
            .map_err(|_| anyhow!("unknown log level: {:?}", self.log_level))
    }
}

/// Terminal UI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Redraw rate in frames per second
    pub frame_rate: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { frame_rate: 30 }
    }
}
