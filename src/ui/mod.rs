// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Terminal UI for the drill.
//!
//! Provides a ratatui-based terminal interface with the note panel,
//! metronome strip, status bar and a help overlay.

mod metronome;
mod note;

pub use metronome::MetronomeWidget;
pub use note::NoteWidget;

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame, Terminal,
};

use crate::control::KeyboardController;
use crate::session::DisplayState;

/// Terminal UI application
pub struct App {
    /// Terminal handle
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Target frame rate
    frame_rate: u32,
    /// Whether to continue running
    running: bool,
}

impl App {
    /// Take over the terminal
    pub fn new(frame_rate: u32) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self {
            terminal,
            frame_rate: frame_rate.clamp(1, 120),
            running: true,
        })
    }

    /// Check if running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Stop the app
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Poll for events, waiting at most one frame
    pub fn poll_event(&self) -> io::Result<Option<Event>> {
        if event::poll(frame_period(self.frame_rate))? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }

    /// Draw the UI
    pub fn draw(&mut self, state: &DisplayState, keyboard: &KeyboardController) -> io::Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();

            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(7),    // Note
                    Constraint::Length(3), // Metronome
                    Constraint::Length(1), // Status bar
                ])
                .split(area);

            let note = NoteWidget::new(state)
                .block(Block::default().borders(Borders::ALL).title(" Note "));
            frame.render_widget(note, chunks[0]);

            let metronome = MetronomeWidget::new(state)
                .block(Block::default().borders(Borders::ALL).title(" Metronome "));
            frame.render_widget(metronome, chunks[1]);

            render_status_bar(frame, chunks[2], state);

            if state.show_help {
                render_help_overlay(frame, area, keyboard);
            }
        })?;

        Ok(())
    }

    /// Cleanup terminal on drop
    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for App {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

fn frame_period(frame_rate: u32) -> Duration {
    Duration::from_millis(1000 / frame_rate.max(1) as u64)
}

/// Render status bar
fn render_status_bar(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let text = if let Some(ref msg) = state.status_message {
        Span::styled(msg, Style::default().fg(Color::Yellow))
    } else {
        Span::styled(
            " n: Next note | Space: Start | Esc: Stop | 0-9: Tempo | h: Help | q: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    frame.render_widget(Paragraph::new(text), area);
}

/// Help text built from the active key bindings
fn help_lines(keyboard: &KeyboardController) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for (category, entries) in keyboard.help() {
        // Digits are resolved outside the binding table
        let typed_digits = category == "Tempo";

        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.push(Line::from(Span::styled(
            category,
            Style::default().add_modifier(Modifier::BOLD),
        )));
        for (keys, description) in entries {
            lines.push(Line::from(format!("  {:<16}{}", keys, description)));
        }
        if typed_digits {
            lines.push(Line::from(format!("  {:<16}{}", "0-9", "Type tempo")));
        }
    }

    lines
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame, area: Rect, keyboard: &KeyboardController) {
    let lines = help_lines(keyboard);

    let width = 44.min(area.width.saturating_sub(4));
    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let help_area = Rect::new(x, y, width, height);

    frame.render_widget(Clear, help_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(help_area);
    frame.render_widget(block, help_area);
    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_frame_period() {
        assert_eq!(frame_period(30), Duration::from_millis(33));
        assert_eq!(frame_period(0), Duration::from_millis(1000));
    }

    #[test]
    fn test_help_lists_every_category() {
        let lines: Vec<String> = help_lines(&KeyboardController::with_defaults())
            .iter()
            .map(text)
            .collect();

        for category in ["Metronome", "Notes", "Tempo", "UI"] {
            assert!(lines.iter().any(|l| l == category), "missing {}", category);
        }
        assert!(lines.iter().any(|l| l.contains("Next note")));
        assert!(lines.iter().any(|l| l.contains("Type tempo")));
    }

    #[test]
    fn test_type_tempo_line_once() {
        let count = help_lines(&KeyboardController::with_defaults())
            .iter()
            .filter(|l| text(l).contains("Type tempo"))
            .count();
        assert_eq!(count, 1);
    }
}
