use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

use crate::widgets::centered_rect;

// Global
const GLOBAL_BINDINGS: &[(&str, &str)] = &[
    ("q, <C-c>", "keymap.quit"),
    ("?", "keymap.help"),
    ("<Esc>", "keymap.dismiss"),
    ("r", "keymap.reset_view"),
];

// Sky
const SKY_BINDINGS: &[(&str, &str)] = &[
    ("m", "keymap.meteor_showers"),
    ("p", "keymap.projection"),
    ("n / N", "keymap.next_constellation"),
    ("<LeftMouse>", "keymap.shower_details"),
    ("<LeftMouse>", "keymap.constellation_details"),
    ("<ScrollWheelUp> / <ScrollWheelDown>", "keymap.adjust_time"),
];

// Time
const TIME_BINDINGS: &[(&str, &str)] = &[
    ("[ / ]", "keymap.adjust_time"),
    ("{ / }", "keymap.adjust_day"),
    ("<LeftMouse>", "keymap.jump_time"),
];

// Details popup
const DETAILS_BINDINGS: &[(&str, &str)] = &[
    ("c", "keymap.copy"),
    ("<Esc> / <Enter>", "keymap.dismiss"),
];

// Constellation popup
const CONSTELLATION_BINDINGS: &[(&str, &str)] = &[
    ("n / N", "keymap.next_constellation"),
    ("j / k", "keymap.scroll"),
    ("c", "keymap.copy"),
    ("<Esc> / <Enter>", "keymap.dismiss"),
];

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    ("keymap.global", GLOBAL_BINDINGS),
    ("keymap.sky", SKY_BINDINGS),
    ("keymap.timeline", TIME_BINDINGS),
    ("keymap.details", DETAILS_BINDINGS),
    ("keymap.constellation", CONSTELLATION_BINDINGS),
];

pub struct Keymap;

impl Keymap {
    fn block() -> Block<'static> {
        Block::bordered().title(t!("keymap.title").to_string().blue())
    }
}

impl Widget for Keymap {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // Translate section names and descriptions
        let sections: Vec<_> = SECTIONS
            .iter()
            .map(|(section_key, bindings)| {
                let translated_bindings: Vec<(&str, String)> = bindings
                    .iter()
                    .map(|(key, i18n_key)| (*key, t!(*i18n_key).to_string()))
                    .collect();
                (t!(*section_key).to_string(), translated_bindings)
            })
            .collect();

        let (key_width, desc_width) = sections.iter().flat_map(|(_, bindings)| bindings).fold(
            (0usize, 0usize),
            |(key_width, desc_width), (key, desc)| {
                (key_width.max(key.width()), desc_width.max(desc.width()))
            },
        );

        let mut lines = Vec::new();
        for (i, (section_title, bindings)) in sections.into_iter().enumerate() {
            if i > 0 {
                lines.push(Line::raw(""));
            }
            lines.push(
                Line::styled(
                    format!(" {section_title} "),
                    Style::default().bold().reversed(),
                )
                .centered(),
            );

            for (key, desc) in bindings {
                lines.push(Line::from(vec![
                    Span::styled(format!("{key:>key_width$}"), Style::default().fg(Color::Cyan)),
                    Span::raw(" "),
                    Span::raw(desc),
                ]));
            }
        }

        let inner_width = key_width as u16 + 1 + desc_width as u16;
        let inner_height = lines.len() as u16;

        const BORDER_WIDTH: u16 = 1;
        let popup_area = centered_rect(
            inner_width + BORDER_WIDTH * 2,
            inner_height + BORDER_WIDTH * 2,
            area,
        );

        Clear.render(popup_area, buf);
        Paragraph::new(lines)
            .block(Self::block())
            .render(popup_area, buf);
    }
}
