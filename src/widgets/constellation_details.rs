use anyhow::Result;
use arboard::Clipboard;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph, Scrollbar, ScrollbarState},
};
use rust_i18n::t;
use unicode_width::UnicodeWidthStr;

use crate::{
    app::States,
    event::Event,
    widgets::{centered_rect, wrap_text},
    zodiac::Constellation,
};

const POPUP_WIDTH: u16 = 72;
const POPUP_HEIGHT: u16 = 24;

/// A popup with the facts and stories of a zodiac constellation.
pub struct ConstellationDetails;

#[derive(Default)]
pub struct ConstellationDetailsState {
    constellation: Option<&'static Constellation>,
    scroll: u16,
    max_scroll: u16,
}

impl ConstellationDetailsState {
    pub fn open(&mut self, constellation: &'static Constellation) {
        self.constellation = Some(constellation);
        self.scroll = 0;
    }

    pub fn close(&mut self) {
        self.constellation = None;
    }

    /// Returns the constellation being shown, if the popup is open.
    pub fn constellation(&self) -> Option<&'static Constellation> {
        self.constellation
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll);
    }
}

/// Returns the short facts about a constellation as label/value pairs.
pub fn details(constellation: &Constellation) -> Vec<(String, String)> {
    vec![
        (t!("zodiac.dates").into(), constellation.dates.to_string()),
        (t!("zodiac.element").into(), constellation.element.to_string()),
        (t!("zodiac.ruler").into(), constellation.ruler.into()),
        (t!("zodiac.best_viewing").into(), constellation.best_viewing.into()),
        (t!("zodiac.main_stars").into(), constellation.main_stars.into()),
    ]
}

fn title(constellation: &Constellation) -> String {
    format!("{} {}", constellation.symbol, constellation.name)
}

/// Formats everything about the constellation as plain text.
fn details_text(constellation: &Constellation) -> String {
    let mut text = title(constellation);
    for (label, value) in details(constellation) {
        text += &format!("\n{label}: {value}");
    }
    text += &format!("\n\n{}\n{}", t!("zodiac.story"), constellation.story);
    text += &format!("\n\n{}\n{}", t!("zodiac.mythology"), constellation.mythology);
    text
}

/// Lays out the popup content for an inner width of `width` columns.
fn content(constellation: &Constellation, width: usize) -> Vec<Line<'static>> {
    let entries = details(constellation);
    let label_width = entries
        .iter()
        .map(|(label, _)| label.width())
        .max()
        .unwrap_or_default();
    let value_width = width.saturating_sub(label_width + 2).max(1);

    let mut lines = Vec::new();
    for (label, value) in entries {
        for (i, part) in wrap_text(&value, value_width).into_iter().enumerate() {
            let label = if i == 0 { label.as_str() } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{label:>label_width$}"), Style::default().fg(Color::Cyan)),
                Span::raw("  "),
                Span::raw(part),
            ]));
        }
    }

    for (heading, body) in [
        (t!("zodiac.story"), constellation.story),
        (t!("zodiac.mythology"), constellation.mythology),
    ] {
        lines.push(Line::raw(""));
        lines.push(Line::from(heading.to_string().bold()));
        lines.extend(wrap_text(body, width).into_iter().map(Line::raw));
    }
    lines
}

impl StatefulWidget for ConstellationDetails {
    type State = ConstellationDetailsState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let Some(constellation) = state.constellation else {
            return;
        };

        let popup_area = centered_rect(POPUP_WIDTH, POPUP_HEIGHT, area);
        let block = Block::bordered()
            .title(title(constellation).magenta().bold())
            .title_bottom(Line::from(t!("zodiac.hint").to_string().dark_gray()).centered());
        let inner_area = block.inner(popup_area);

        let lines = content(constellation, inner_area.width as usize);
        state.max_scroll = (lines.len() as u16).saturating_sub(inner_area.height);
        state.scroll = state.scroll.min(state.max_scroll);

        Clear.render(popup_area, buf);
        block.render(popup_area, buf);
        Paragraph::new(lines)
            .scroll((state.scroll, 0))
            .render(inner_area, buf);

        let mut scrollbar_state =
            ScrollbarState::new(state.max_scroll as usize).position(state.scroll as usize);
        Scrollbar::default().render(popup_area.inner(Margin::new(0, 1)), buf, &mut scrollbar_state);
    }
}

/// Handles input while the popup is open. Returns without doing anything
/// when no popup is shown.
pub async fn handle_event(event: Event, states: &mut States) -> Result<()> {
    let Some(constellation) = states.constellation_details.constellation() else {
        return Ok(());
    };

    match event {
        Event::Key(event) => handle_key_event(event, constellation, states).await,
        Event::Mouse(event) => handle_mouse_event(event, states).await,
        _ => Ok(()),
    }
}

async fn handle_key_event(
    event: KeyEvent,
    constellation: &'static Constellation,
    states: &mut States,
) -> Result<()> {
    match event.code {
        KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => states.constellation_details.close(),
        KeyCode::Char('n') => states.show_constellation(constellation.next()),
        KeyCode::Char('N') => states.show_constellation(constellation.previous()),
        KeyCode::Char('j') | KeyCode::Down => states.constellation_details.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => states.constellation_details.scroll_up(),
        KeyCode::Char('c') => copy_to_clipboard(constellation),
        _ => {}
    }
    Ok(())
}

async fn handle_mouse_event(event: MouseEvent, states: &mut States) -> Result<()> {
    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => states.constellation_details.close(),
        MouseEventKind::ScrollUp => states.constellation_details.scroll_up(),
        MouseEventKind::ScrollDown => states.constellation_details.scroll_down(),
        _ => {}
    }
    Ok(())
}

fn copy_to_clipboard(constellation: &Constellation) {
    let result =
        Clipboard::new().and_then(|mut clipboard| clipboard.set_text(details_text(constellation)));
    match result {
        Ok(()) => tracing::info!(constellation = constellation.name, "details copied to clipboard"),
        Err(err) => tracing::warn!(%err, "failed to copy to clipboard"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zodiac::ZODIAC;

    fn render(state: &mut ConstellationDetailsState, area: Rect) -> String {
        let mut buf = Buffer::empty(area);
        ConstellationDetails.render(area, &mut buf, state);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn facts_come_first() {
        let text = details_text(&ZODIAC[0]);
        assert!(text.starts_with(
            "♈ Aries\n\
             Dates: 3/21-4/19\n\
             Element: Fire\n\
             Ruler: Mars\n\
             Best viewing: November to December\n"
        ));
        assert!(text.contains("\n\nStory\nThe ram with the golden fleece."));
        assert!(text.contains("\n\nMythology\n"));
    }

    #[test]
    fn closed_popup_draws_nothing() {
        let area = Rect::new(0, 0, 80, 30);
        let mut state = ConstellationDetailsState::default();
        assert!(render(&mut state, area).trim().is_empty());
    }

    #[test]
    fn open_popup_shows_the_constellation() {
        let area = Rect::new(0, 0, 80, 30);
        let mut state = ConstellationDetailsState::default();
        state.open(&ZODIAC[7]);
        let text = render(&mut state, area);
        assert!(text.contains("Scorpius"));
        assert!(text.contains("Antares"));
    }

    #[test]
    fn scrolling_stops_at_the_end() {
        let mut state = ConstellationDetailsState::default();
        state.open(&ZODIAC[0]);
        render(&mut state, Rect::new(0, 0, 40, 10));
        assert!(state.max_scroll > 0);

        for _ in 0..100 {
            state.scroll_down();
        }
        assert_eq!(state.scroll, state.max_scroll);

        state.open(&ZODIAC[1]);
        assert_eq!(state.scroll, 0);
    }

    #[test]
    fn long_values_wrap_under_their_value_column() {
        let lines = content(&ZODIAC[6], 40);
        let plain: Vec<String> = lines
            .iter()
            .map(|line| line.spans.iter().map(|span| span.content.as_ref()).collect())
            .collect();
        let stars = plain.iter().position(|line| line.contains("Main stars")).unwrap();
        assert!(plain[stars + 1].starts_with("            "));
        assert!(plain.iter().all(|line| line.width() <= 40));
    }
}
