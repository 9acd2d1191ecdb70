use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::States,
    event::Event,
    meteor::{catalog::Shower, status::Intensity},
    widgets::centered_rect,
};

/// A popup with everything known about a meteor shower.
pub struct ShowerDetails<'a> {
    pub shower: &'a Shower,
}

/// Returns the shower's details as label/value pairs.
pub fn details(shower: &Shower) -> Vec<(String, String)> {
    vec![
        (t!("details.name").into(), shower.name.into()),
        (t!("details.code").into(), shower.short_name.into()),
        (t!("details.peak").into(), shower.peak.into()),
        (t!("details.active").into(), shower.active.to_string()),
        (
            "ZHR".into(),
            format!("{} ({})", shower.zhr, Intensity::from_zhr(shower.zhr)),
        ),
        (
            t!("details.radiant").into(),
            format!(
                "RA {:.0}°, Dec {:+.0}°",
                shower.radiant.ra, shower.radiant.dec
            ),
        ),
        (t!("details.parent_body").into(), shower.parent_body.into()),
        (
            t!("details.velocity").into(),
            format!("{} km/s", shower.velocity_km_s),
        ),
    ]
}

/// Formats the details as plain text, one `label: value` pair per line.
fn details_text(shower: &Shower) -> String {
    details(shower)
        .into_iter()
        .map(|(label, value)| format!("{label}: {value}"))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ShowerDetails<'_> {
    fn block(&self) -> Block<'static> {
        Block::bordered()
            .title(self.shower.name.fg(self.shower.color).bold())
            .title_bottom(Line::from(t!("details.hint").to_string().dark_gray()).centered())
    }
}

impl Widget for ShowerDetails<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let entries = details(self.shower);

        let (label_width, value_width) = entries.iter().fold(
            (0usize, 0usize),
            |(label_width, value_width), (label, value)| {
                (label_width.max(label.width()), value_width.max(value.width()))
            },
        );

        let lines: Vec<Line> = entries
            .into_iter()
            .map(|(label, value)| {
                Line::from(vec![
                    Span::styled(format!("{label:>label_width$}"), Style::default().fg(Color::Cyan)),
                    Span::raw("  "),
                    Span::raw(value),
                ])
            })
            .collect();

        const BORDER_WIDTH: u16 = 1;
        let hint_width = t!("details.hint").width() as u16;
        let inner_width = ((label_width + 2 + value_width) as u16).max(hint_width);
        let popup_area = centered_rect(
            inner_width + BORDER_WIDTH * 2,
            lines.len() as u16 + BORDER_WIDTH * 2,
            area,
        );

        let block = self.block();
        Clear.render(popup_area, buf);
        Paragraph::new(lines).block(block).render(popup_area, buf);
    }
}

/// Handles input while the popup is open. Returns without doing anything
/// when no popup is shown.
pub async fn handle_event(event: Event, states: &mut States) -> Result<()> {
    let Some(shower) = states.details else {
        return Ok(());
    };

    match event {
        Event::Key(event) => handle_key_event(event, shower, states).await,
        Event::Mouse(event) if matches!(event.kind, MouseEventKind::Down(MouseButton::Left)) => {
            states.details = None;
            Ok(())
        }
        _ => Ok(()),
    }
}

async fn handle_key_event(
    event: KeyEvent,
    shower: &'static Shower,
    states: &mut States,
) -> Result<()> {
    match event.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => states.details = None,
        KeyCode::Char('c') => copy_to_clipboard(shower),
        _ => {}
    }
    Ok(())
}

fn copy_to_clipboard(shower: &Shower) {
    let result = Clipboard::new().and_then(|mut clipboard| clipboard.set_text(details_text(shower)));
    match result {
        Ok(()) => tracing::info!(shower = shower.name, "details copied to clipboard"),
        Err(err) => tracing::warn!(%err, "failed to copy to clipboard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meteor::catalog::CATALOG;

    fn perseids() -> &'static Shower {
        CATALOG.iter().find(|s| s.short_name == "PER").unwrap()
    }

    #[test]
    fn details_cover_every_field() {
        let text = details_text(perseids());
        assert_eq!(
            text,
            "Name: Perseids\n\
             Code: PER\n\
             Peak: 8/12-8/13\n\
             Active: 7/17-8/24\n\
             ZHR: 100 (strong)\n\
             Radiant: RA 48°, Dec +58°\n\
             Parent body: 109P/Swift-Tuttle\n\
             Velocity: 59 km/s"
        );
    }

    #[test]
    fn popup_renders_centered() {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        ShowerDetails { shower: perseids() }.render(area, &mut buf);
        let text: String = buf.content().iter().map(|cell| cell.symbol()).collect();
        assert!(text.contains("Perseids"));
        assert!(text.contains("109P/Swift-Tuttle"));
        assert!(text.contains("59 km/s"));
    }
}
