use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::Widget;

use crate::api::types::Character;
use crate::avatar::AvatarBook;
use crate::ui::row::{CharacterRow, ROW_HEIGHT};

/// A scrollable list of characters with selection highlight, in list order.
pub struct CharacterList<'a> {
    pub rows: &'a [Character],
    pub avatars: &'a AvatarBook,
    pub selected_index: usize,
}

impl<'a> CharacterList<'a> {
    pub fn new(rows: &'a [Character], avatars: &'a AvatarBook) -> Self {
        Self {
            rows,
            avatars,
            selected_index: 0,
        }
    }

    pub fn selected(mut self, index: usize) -> Self {
        self.selected_index = index;
        self
    }
}

impl Widget for CharacterList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if self.rows.is_empty() || area.width < 2 || area.height == 0 {
            return;
        }

        let content_width = area.width.saturating_sub(1); // 1 char left margin

        // Every row has the same height plus a separator line.
        let heights = vec![ROW_HEIGHT + 1; self.rows.len()];
        let scroll_start = compute_scroll_start(&heights, self.selected_index, area.height);

        let mut y = area.y;
        let mut row_idx = scroll_start;
        while row_idx < self.rows.len() && y < area.y + area.height {
            let character = &self.rows[row_idx];
            let remaining = area.y + area.height - y;
            let render_h = heights[row_idx].min(remaining);

            let row_area = Rect::new(area.x + 1, y, content_width, render_h.min(ROW_HEIGHT));
            CharacterRow::new(
                character,
                self.avatars.state(character.id),
                self.avatars.source(character),
            )
            .selected(row_idx == self.selected_index)
            .render(row_area, buf);

            y += render_h;

            // Draw separator line
            if render_h > ROW_HEIGHT && row_idx + 1 < self.rows.len() {
                let sep = "\u{2500}".repeat(content_width as usize);
                buf.set_string(
                    area.x + 1,
                    y - 1,
                    &sep,
                    Style::default().fg(Color::DarkGray),
                );
            }

            row_idx += 1;
        }
    }
}

/// Find the smallest scroll start index so that the selected item fits
/// within the available height.
fn compute_scroll_start(heights: &[u16], selected: usize, available: u16) -> usize {
    if heights.is_empty() {
        return 0;
    }

    let selected = selected.min(heights.len() - 1);
    if available == 0 {
        return selected;
    }

    // Build a viewport that always includes the selected row and packs as
    // many previous rows as can fit above it.
    let mut start = selected;
    let mut used = heights[selected];

    while start > 0 {
        let next = used.saturating_add(heights[start - 1]);
        if next > available {
            break;
        }
        start -= 1;
        used = next;
    }

    start
}
