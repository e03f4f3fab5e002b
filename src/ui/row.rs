use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Widget};

use crate::api::types::{Character, Status};
use crate::avatar::AvatarState;
use crate::labels;
use crate::ui::truncate_to_width;

/// Lines a row occupies, not counting the separator.
pub const ROW_HEIGHT: u16 = 5;

const AVATAR_WIDTH: u16 = 5;
const AVATAR_HEIGHT: u16 = 3;

/// Renders one character as a list row.
///
/// Layout:
///   ╭───╮ Bender
///   │ B │ Género: Hombre
///   ╰───╯  Estado: Muerto
///         Especie: Robot
///         img https://...
pub struct CharacterRow<'a> {
    pub character: &'a Character,
    pub avatar: AvatarState,
    pub avatar_source: &'a str,
    pub selected: bool,
}

impl<'a> CharacterRow<'a> {
    pub fn new(character: &'a Character, avatar: AvatarState, avatar_source: &'a str) -> Self {
        Self {
            character,
            avatar,
            avatar_source,
            selected: false,
        }
    }

    pub fn selected(mut self, selected: bool) -> Self {
        self.selected = selected;
        self
    }
}

/// Badge colors keyed by status.
pub fn status_badge_style(status: &Status) -> Style {
    let base = Style::default().add_modifier(Modifier::BOLD);
    match status {
        Status::Live => base.fg(Color::Black).bg(Color::Green),
        Status::Dead => base.fg(Color::White).bg(Color::Red),
        Status::Unknown(_) => base.fg(Color::White).bg(Color::DarkGray),
    }
}

fn avatar_glyph(character: &Character, avatar: &AvatarState) -> String {
    match avatar {
        AvatarState::Fallback => "\u{25cf}".to_string(),
        AvatarState::Pending | AvatarState::Loaded => character
            .name
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_else(|| "?".to_string()),
    }
}

impl Widget for CharacterRow<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let highlight_style = if self.selected {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default()
        };

        // -- Avatar --
        if area.width > AVATAR_WIDTH + 1 {
            let border_color = match (self.selected, &self.avatar) {
                (true, _) => Color::Cyan,
                (false, AvatarState::Loaded) => Color::Gray,
                (false, _) => Color::DarkGray,
            };
            let avatar_area = Rect::new(
                area.x,
                area.y,
                AVATAR_WIDTH,
                AVATAR_HEIGHT.min(area.height),
            );
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border_color));
            let inner = block.inner(avatar_area);
            block.render(avatar_area, buf);
            if inner.height > 0 {
                buf.set_string(
                    inner.x + 1,
                    inner.y,
                    avatar_glyph(self.character, &self.avatar),
                    Style::default()
                        .fg(border_color)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        let text_x = if area.width > AVATAR_WIDTH + 1 {
            area.x + AVATAR_WIDTH + 1
        } else {
            area.x
        };
        let text_width = area.x + area.width - text_x;
        let muted = Style::default().fg(Color::Gray);
        let small = Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC);

        let lines = [
            Line::from(Span::styled(
                self.character.name.as_str(),
                highlight_style.add_modifier(Modifier::BOLD),
            )),
            Line::from(vec![
                Span::styled(labels::GENDER_PREFIX, muted),
                Span::styled(self.character.gender.label(), muted),
            ]),
            Line::from(Span::styled(
                format!(
                    " {}{} ",
                    labels::STATUS_PREFIX,
                    self.character.status.label()
                ),
                status_badge_style(&self.character.status),
            )),
            Line::from(Span::styled(
                format!("{}{}", labels::SPECIES_PREFIX, self.character.species),
                small,
            )),
            Line::from(Span::styled(
                truncate_to_width(
                    &format!("img {}", self.avatar_source),
                    text_width as usize,
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ];

        for (offset, line) in lines.iter().enumerate() {
            let y = area.y + offset as u16;
            if y >= area.y + area.height {
                break;
            }
            buf.set_line(text_x, y, line, text_width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::Gender;
    use crate::ui::testing::buffer_lines;

    fn bender() -> Character {
        Character {
            id: 1,
            name: "Bender".to_string(),
            gender: Gender::Male,
            status: Status::Dead,
            species: "Robot".to_string(),
            created_at: None,
            image: "x".to_string(),
        }
    }

    fn render(row: CharacterRow<'_>) -> Vec<String> {
        let area = Rect::new(0, 0, 50, ROW_HEIGHT);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf);
        buffer_lines(&buf)
    }

    #[test]
    fn shows_mapped_labels() {
        let c = bender();
        let lines = render(CharacterRow::new(&c, AvatarState::Loaded, &c.image));

        assert!(lines[0].contains("Bender"));
        assert!(lines[1].contains("Género: Hombre"));
        assert!(lines[2].contains("Estado: Muerto"));
        assert!(lines[3].contains("Especie: Robot"));
        assert!(lines[4].contains("img x"));
        assert!(lines[1].contains("│ B │"));
    }

    #[test]
    fn badge_is_colored_by_status() {
        let c = bender();
        let area = Rect::new(0, 0, 50, ROW_HEIGHT);
        let mut buf = Buffer::empty(area);
        CharacterRow::new(&c, AvatarState::Loaded, &c.image).render(area, &mut buf);

        let badge_x = AVATAR_WIDTH + 2;
        assert_eq!(buf[(badge_x, 2)].bg, Color::Red);
        assert_eq!(status_badge_style(&Status::Live).bg, Some(Color::Green));
        assert_eq!(
            status_badge_style(&Status::from_raw("ALIVE")).bg,
            Some(Color::DarkGray)
        );
    }

    #[test]
    fn fallback_shows_placeholder_source() {
        let c = bender();
        let lines = render(CharacterRow::new(
            &c,
            AvatarState::Fallback,
            "https://fallback/avatar.svg",
        ));
        assert!(lines[4].contains("https://fallback/avatar.svg"));
        assert!(lines[1].contains("\u{25cf}"));
    }
}
