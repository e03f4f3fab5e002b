use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Widget;

use crate::app::App;
use crate::ui::loading::spinner;

const HINTS: &str = "r refrescar  ? ayuda  q salir ";

/// Bottom status bar showing the refresh spinner, row count, last update and
/// key hints.
pub struct StatusBar<'a> {
    pub app: &'a App,
}

impl<'a> StatusBar<'a> {
    pub fn new(app: &'a App) -> Self {
        Self { app }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        // Background
        let bg_style = Style::default().bg(Color::DarkGray).fg(Color::White);
        for x in area.x..area.x + area.width {
            buf[(x, area.y)].set_style(bg_style);
        }

        let mut spans = Vec::new();

        // Pull-to-refresh indicator
        if self.app.refresher.is_refreshing() {
            spans.push(Span::styled(
                format!(" {} actualizando ", spinner(self.app.spinner_frame)),
                Style::default()
                    .bg(Color::Magenta)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                " LISTA ",
                Style::default()
                    .bg(Color::Blue)
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));
        }
        spans.push(Span::raw(" "));

        let rows = self.app.screen.visible_rows();
        if rows > 0 {
            spans.push(Span::styled(
                format!("{}/{rows} personajes", self.app.selected_index + 1),
                bg_style,
            ));
        }

        if let Some(updated) = self.app.last_updated {
            spans.push(Span::styled(
                format!("  actualizado {}", updated.format("%H:%M:%S")),
                Style::default().bg(Color::DarkGray).fg(Color::Gray),
            ));
        }

        // Key hints (right-aligned)
        let left_width: usize = spans.iter().map(|s| s.width()).sum();
        let padding = (area.width as usize).saturating_sub(left_width + HINTS.len());
        if padding > 0 {
            spans.push(Span::styled(" ".repeat(padding), bg_style));
            spans.push(Span::styled(
                HINTS,
                Style::default().bg(Color::DarkGray).fg(Color::Yellow),
            ));
        }

        let line = Line::from(spans);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
