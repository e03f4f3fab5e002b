pub mod card;
pub mod help;
pub mod list;
pub mod loading;
pub mod row;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders};
use unicode_width::UnicodeWidthChar;

use crate::app::App;
use crate::labels;
use crate::screen::ScreenView;

use card::Card;
use help::HelpView;
use list::CharacterList;
use loading::LoadingIndicator;
use status_bar::StatusBar;

pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Layout: toolbar + main content + status bar
    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let toolbar = Line::from(Span::styled(
        format!(" {} ", labels::TITLE),
        Style::default()
            .fg(Color::White)
            .bg(Color::Blue)
            .add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(toolbar, header_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", labels::LARGE_TITLE))
        .title_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(main_area);
    frame.render_widget(block, main_area);

    // Exactly one of the four states is drawn.
    match app.screen.view() {
        ScreenView::Loading => {
            frame.render_widget(LoadingIndicator::new(app.spinner_frame), inner);
        }
        ScreenView::Error(message) => {
            frame.render_widget(Card::danger(labels::ERROR_HEADING, message), inner);
        }
        ScreenView::Empty => {
            frame.render_widget(Card::info(labels::EMPTY_HEADING, labels::EMPTY_BODY), inner);
        }
        ScreenView::Populated(rows) => {
            frame.render_widget(
                CharacterList::new(rows, &app.avatars).selected(app.selected_index),
                inner,
            );
        }
    }

    frame.render_widget(StatusBar::new(app), status_area);

    if app.show_help {
        frame.render_widget(HelpView::new(), main_area);
    }
}

/// Cut `text` to at most `width` terminal columns, ending in an ellipsis
/// when anything was dropped.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let total: usize = text.chars().filter_map(|c| c.width()).sum();
    if total <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('\u{2026}');
    out
}

#[cfg(test)]
pub(crate) mod testing {
    use ratatui::buffer::Buffer;

    /// Text of every buffer row, one `String` per line.
    pub fn buffer_lines(buf: &Buffer) -> Vec<String> {
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(buf.area.x + x, buf.area.y + y)].symbol())
                    .collect()
            })
            .collect()
    }

    pub fn buffer_text(buf: &Buffer) -> String {
        buffer_lines(buf).join("\n")
    }
}
