// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note display widget.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::music::PITCH_COUNT;
use crate::session::DisplayState;

/// Widget showing the current pitch, cycle progress and completion notice
pub struct NoteWidget<'a> {
    state: &'a DisplayState,
    block: Option<Block<'a>>,
}

impl<'a> NoteWidget<'a> {
    /// Create a new note widget
    pub fn new(state: &'a DisplayState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for NoteWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(1),    // Note
                Constraint::Length(1), // Progress
                Constraint::Length(1), // Completion notice
            ])
            .split(area);

        // Pad the note vertically so it sits in the middle of its area
        let pad = chunks[0].height.saturating_sub(1) / 2;
        let mut lines: Vec<Line> = (0..pad).map(|_| Line::from("")).collect();
        let note = if self.state.note_text().is_empty() {
            Span::styled("-", Style::default().fg(Color::DarkGray))
        } else {
            Span::styled(
                self.state.note_text(),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )
        };
        lines.push(Line::from(note));
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(chunks[0], buf);

        Paragraph::new(progress_bar(self.state.cycle_progress))
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green))
            .render(chunks[1], buf);

        if let Some(ref notice) = self.state.completion {
            Paragraph::new(notice.as_str())
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
                .render(chunks[2], buf);
        }
    }
}

/// One cell per pitch, filled for those drawn this cycle
fn progress_bar(drawn: usize) -> String {
    let drawn = drawn.min(PITCH_COUNT);
    format!(
        "{}{} {}/{}",
        "█".repeat(drawn),
        "░".repeat(PITCH_COUNT - drawn),
        drawn,
        PITCH_COUNT
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_bar() {
        assert_eq!(progress_bar(0), "░░░░░░░░░░░░ 0/12");
        assert_eq!(progress_bar(3), "███░░░░░░░░░ 3/12");
        assert_eq!(progress_bar(12), "████████████ 12/12");
        assert_eq!(progress_bar(20), "████████████ 12/12");
    }
}
