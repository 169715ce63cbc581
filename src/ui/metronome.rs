// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Metronome display widget.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Widget},
};

use crate::session::DisplayState;
use crate::timing::{MetronomeState, BEATS_PER_BAR};

/// Widget for displaying metronome state and the tempo field
pub struct MetronomeWidget<'a> {
    state: &'a DisplayState,
    block: Option<Block<'a>>,
}

impl<'a> MetronomeWidget<'a> {
    /// Create a new metronome widget
    pub fn new(state: &'a DisplayState) -> Self {
        Self { state, block: None }
    }

    /// Set the block wrapper
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }
}

impl Widget for MetronomeWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = if let Some(block) = self.block {
            let inner = block.inner(area);
            block.render(area, buf);
            inner
        } else {
            area
        };

        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(10), // Run/Stop indicator
                Constraint::Length(2),  // Spacer
                Constraint::Length(16), // Tempo field
                Constraint::Length(2),  // Spacer
                Constraint::Length(12), // Beat lights
                Constraint::Min(0),     // Remaining
            ])
            .split(area);

        let (indicator, style) = match self.state.metronome {
            MetronomeState::Running => (
                "▶ RUN",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ),
            MetronomeState::Stopped => ("■ STOP", Style::default().fg(Color::Yellow)),
        };
        Paragraph::new(indicator).style(style).render(chunks[0], buf);

        let field = Line::from(vec![
            Span::styled("BPM ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("[{:>4}]", self.state.tempo_text),
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
            ),
        ]);
        Paragraph::new(field).render(chunks[2], buf);

        let lights = beat_lights(self.state.metronome, self.state.beat);
        Paragraph::new(Line::from(lights)).render(chunks[4], buf);
    }
}

/// One light per beat in the bar; the last beat played is lit
fn beat_lights(state: MetronomeState, beat: u64) -> Vec<Span<'static>> {
    // `beat` counts beats already played, so the last one is beat - 1
    let lit = match state {
        MetronomeState::Running if beat > 0 => Some((beat - 1) % BEATS_PER_BAR),
        _ => None,
    };

    (0..BEATS_PER_BAR)
        .map(|i| {
            let style = match (lit == Some(i), i == 0) {
                (true, true) => Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                (true, false) => Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                (false, _) => Style::default().fg(Color::DarkGray),
            };
            let symbol = if lit == Some(i) { "● " } else { "○ " };
            Span::styled(symbol, style)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit_index(spans: &[Span]) -> Option<usize> {
        spans.iter().position(|s| s.content == "● ")
    }

    #[test]
    fn test_no_light_when_stopped() {
        let spans = beat_lights(MetronomeState::Stopped, 5);
        assert_eq!(spans.len(), 4);
        assert_eq!(lit_index(&spans), None);
    }

    #[test]
    fn test_no_light_before_first_beat() {
        assert_eq!(lit_index(&beat_lights(MetronomeState::Running, 0)), None);
    }

    #[test]
    fn test_light_follows_beat() {
        assert_eq!(lit_index(&beat_lights(MetronomeState::Running, 1)), Some(0));
        assert_eq!(lit_index(&beat_lights(MetronomeState::Running, 4)), Some(3));
        assert_eq!(lit_index(&beat_lights(MetronomeState::Running, 5)), Some(0));
    }
}
