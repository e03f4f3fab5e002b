use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};

use crate::labels;

pub const SPINNER_FRAMES: [&str; 10] = [
    "\u{280b}", "\u{2819}", "\u{2839}", "\u{2838}", "\u{283c}", "\u{2834}", "\u{2826}", "\u{2827}",
    "\u{2807}", "\u{280f}",
];

pub fn spinner(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}

/// Blocking loading indicator: a spinner with a fixed caption, centered.
pub struct LoadingIndicator {
    frame: usize,
}

impl LoadingIndicator {
    pub fn new(frame: usize) -> Self {
        Self { frame }
    }
}

impl Widget for LoadingIndicator {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [_, center, _] = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .areas(area);

        let line = Line::from(vec![
            Span::styled(
                spinner(self.frame),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(labels::LOADING_CAPTION, Style::default().fg(Color::White)),
        ]);
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .render(center, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::testing::buffer_lines;

    #[test]
    fn spinner_cycles() {
        assert_eq!(spinner(0), spinner(SPINNER_FRAMES.len()));
        assert_ne!(spinner(0), spinner(1));
    }

    #[test]
    fn caption_is_vertically_centered() {
        let area = Rect::new(0, 0, 40, 9);
        let mut buf = Buffer::empty(area);
        LoadingIndicator::new(0).render(area, &mut buf);

        let lines = buffer_lines(&buf);
        assert!(lines[4].contains(labels::LOADING_CAPTION));
    }
}
