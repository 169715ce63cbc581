// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Keyboard shortcut handling.
//!
//! Maps key presses onto [`Command`]s. Digit keys that are not bound to
//! anything else type into the tempo field.

use std::collections::BTreeMap;
use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyModifiers};

use super::Command;

/// A keyboard shortcut definition
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shortcut {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl Shortcut {
    /// Create a new shortcut
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a shortcut with no modifiers
    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Create a shortcut with Ctrl modifier
    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Create a shortcut with Shift modifier
    pub fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }
}

/// A keyboard binding (shortcut to command)
#[derive(Debug, Clone)]
pub struct KeyBinding {
    /// The shortcut
    pub shortcut: Shortcut,
    /// The command to issue
    pub command: Command,
    /// Description for help display
    pub description: String,
    /// Category for grouping in help
    pub category: String,
}

impl KeyBinding {
    /// Create a new key binding
    pub fn new(shortcut: Shortcut, command: Command, description: impl Into<String>) -> Self {
        Self {
            shortcut,
            command,
            description: description.into(),
            category: "General".to_string(),
        }
    }

    /// Set the category
    pub fn category(mut self, cat: impl Into<String>) -> Self {
        self.category = cat.into();
        self
    }
}

/// Keyboard controller with configurable bindings
pub struct KeyboardController {
    bindings: HashMap<Shortcut, KeyBinding>,
}

impl KeyboardController {
    /// Create an empty keyboard controller
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a keyboard controller with default bindings
    pub fn with_defaults() -> Self {
        let mut controller = Self::new();
        controller.add_default_bindings();
        controller
    }

    fn add_default_bindings(&mut self) {
        // Notes
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('n')),
            Command::GeneratePitch,
            "Next note",
        ).category("Notes"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Enter),
            Command::GeneratePitch,
            "Next note",
        ).category("Notes"));

        // Metronome
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char(' ')),
            Command::StartMetronome,
            "Start metronome",
        ).category("Metronome"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('p')),
            Command::StartMetronome,
            "Start metronome",
        ).category("Metronome"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Esc),
            Command::StopMetronome,
            "Stop metronome",
        ).category("Metronome"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('s')),
            Command::StopMetronome,
            "Stop metronome",
        ).category("Metronome"));

        // Tempo
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Up),
            Command::AdjustTempo(1),
            "Tempo +1 BPM",
        ).category("Tempo"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Down),
            Command::AdjustTempo(-1),
            "Tempo -1 BPM",
        ).category("Tempo"));

        self.add(KeyBinding::new(
            Shortcut::shift(KeyCode::Up),
            Command::AdjustTempo(10),
            "Tempo +10 BPM",
        ).category("Tempo"));

        self.add(KeyBinding::new(
            Shortcut::shift(KeyCode::Down),
            Command::AdjustTempo(-10),
            "Tempo -10 BPM",
        ).category("Tempo"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Backspace),
            Command::EraseTempoDigit,
            "Erase tempo digit",
        ).category("Tempo"));

        // UI
        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('?')),
            Command::ToggleHelp,
            "Toggle help",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('h')),
            Command::ToggleHelp,
            "Toggle help",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::key(KeyCode::Char('q')),
            Command::Quit,
            "Quit",
        ).category("UI"));

        self.add(KeyBinding::new(
            Shortcut::ctrl(KeyCode::Char('c')),
            Command::Quit,
            "Quit",
        ).category("UI"));
    }

    /// Add a key binding
    pub fn add(&mut self, binding: KeyBinding) {
        self.bindings.insert(binding.shortcut.clone(), binding);
    }

    /// Resolve a key event to a command
    pub fn resolve(&self, code: KeyCode, modifiers: KeyModifiers) -> Option<Command> {
        let shortcut = Shortcut::new(code, modifiers);
        if let Some(binding) = self.bindings.get(&shortcut) {
            return Some(binding.command.clone());
        }

        // Terminals report shifted symbols like '?' with SHIFT set
        if let KeyCode::Char(_) = code {
            if modifiers == KeyModifiers::SHIFT {
                if let Some(binding) = self.bindings.get(&Shortcut::key(code)) {
                    return Some(binding.command.clone());
                }
            }
        }

        match code {
            KeyCode::Char(c)
                if c.is_ascii_digit()
                    && (modifiers == KeyModifiers::NONE || modifiers == KeyModifiers::SHIFT) =>
            {
                Some(Command::TypeTempoDigit(c))
            }
            _ => None,
        }
    }

    /// Help entries grouped by category, shortcuts sharing a description merged
    pub fn help(&self) -> BTreeMap<String, Vec<(String, String)>> {
        let mut grouped: BTreeMap<String, BTreeMap<String, Vec<String>>> = BTreeMap::new();

        for binding in self.bindings.values() {
            grouped
                .entry(binding.category.clone())
                .or_default()
                .entry(binding.description.clone())
                .or_default()
                .push(format_shortcut(&binding.shortcut));
        }

        grouped
            .into_iter()
            .map(|(category, entries)| {
                let lines = entries
                    .into_iter()
                    .map(|(description, mut keys)| {
                        keys.sort();
                        (keys.join("/"), description)
                    })
                    .collect();
                (category, lines)
            })
            .collect()
    }
}

impl Default for KeyboardController {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Format a shortcut for display
pub fn format_shortcut(shortcut: &Shortcut) -> String {
    let mut parts = Vec::new();

    if shortcut.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if shortcut.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }
    if shortcut.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }

    let key = match shortcut.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_uppercase().to_string(),
        KeyCode::F(n) => format!("F{}", n),
        KeyCode::Up => "↑".to_string(),
        KeyCode::Down => "↓".to_string(),
        KeyCode::Left => "←".to_string(),
        KeyCode::Right => "→".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Backspace => "Backspace".to_string(),
        _ => "?".to_string(),
    };

    parts.push(&key);
    parts.join("+")
}
