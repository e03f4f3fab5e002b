use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget, Wrap};
use unicode_width::UnicodeWidthStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardTone {
    /// Alert styling for load failures.
    Danger,
    /// Muted styling for informational notices.
    Medium,
}

/// A bordered card with a bold heading and a wrapped body, placed near the
/// top of the area.
pub struct Card<'a> {
    heading: &'a str,
    body: &'a str,
    tone: CardTone,
}

impl<'a> Card<'a> {
    pub fn danger(heading: &'a str, body: &'a str) -> Self {
        Self {
            heading,
            body,
            tone: CardTone::Danger,
        }
    }

    pub fn info(heading: &'a str, body: &'a str) -> Self {
        Self {
            heading,
            body,
            tone: CardTone::Medium,
        }
    }
}

impl Widget for Card<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 4 || area.height < 3 {
            return;
        }

        let width = 70u16.min(area.width.saturating_sub(2)).max(4);
        // Inner width available for text (subtract 2 for border, 2 for padding)
        let inner_width = width.saturating_sub(4) as usize;

        let body_lines: usize = self
            .body
            .lines()
            .map(|line| wrapped_line_count(line, inner_width))
            .sum();

        // +2 for border, +2 for heading and blank line under it
        let height = ((body_lines as u16) + 4).min(area.height);
        let x = area.x + (area.width.saturating_sub(width)) / 2;
        let panel = Rect::new(x, area.y, width, height);

        let (border, heading, body) = match self.tone {
            CardTone::Danger => (
                Style::default().fg(Color::Red),
                Style::default()
                    .fg(Color::White)
                    .bg(Color::Red)
                    .add_modifier(Modifier::BOLD),
                Style::default().fg(Color::LightRed),
            ),
            CardTone::Medium => (
                Style::default().fg(Color::DarkGray),
                Style::default().fg(Color::Gray).add_modifier(Modifier::BOLD),
                Style::default().fg(Color::DarkGray),
            ),
        };

        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(panel);
        block.render(panel, buf);

        let lines = vec![
            Line::from(Span::styled(format!(" {} ", self.heading), heading)),
            Line::from(""),
            Line::from(Span::styled(self.body, body)),
        ];
        let text_area = Rect::new(
            inner.x + 1,
            inner.y,
            inner.width.saturating_sub(2),
            inner.height,
        );
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);
    }
}

/// Lines a greedy word wrap needs for `line` at `width` columns.
fn wrapped_line_count(line: &str, width: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let mut count = 1;
    let mut used = 0;
    for word in line.split_whitespace() {
        let w = word.width();
        if used == 0 {
            used = w;
        } else if used + 1 + w <= width {
            used += 1 + w;
        } else {
            count += 1;
            used = w;
        }
        // Words longer than the width are broken across lines.
        while used > width {
            count += 1;
            used -= width;
        }
    }
    count
}
