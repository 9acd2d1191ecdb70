use anyhow::Result;
use chrono::NaiveDate;
use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{Block, Paragraph, Scrollbar, ScrollbarState, Wrap},
};
use rust_i18n::t;

use crate::{
    app::States,
    event::Event,
    meteor::{catalog::active_showers, status::format_active_shower_status},
};

/// A widget that lists the meteor showers active on the simulation date.
pub struct ShowerStatus;

/// State of a [`ShowerStatus`] widget.
#[derive(Default)]
pub struct ShowerStatusState {
    /// Date the summary was computed for.
    date: Option<NaiveDate>,
    summary: Text<'static>,
    scroll: u16,
    /// The inner rendering area of the widget.
    inner_area: Rect,
}

impl ShowerStatusState {
    /// Recomputes the summary when the date has changed.
    pub fn update(&mut self, date: NaiveDate) {
        if self.date == Some(date) {
            return;
        }
        let active = active_showers(&date);
        tracing::info!(%date, active = active.len(), "active meteor showers updated");
        self.summary = format_active_shower_status(&active);
        self.date = Some(date);
        self.scroll = 0;
    }

    /// Returns the date of the current summary.
    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    fn scroll_down(&mut self) {
        self.scroll = (self.scroll + 1).min(self.max_scroll());
    }

    fn max_scroll(&self) -> u16 {
        (self.summary.lines.len() as u16).saturating_sub(self.inner_area.height)
    }
}

impl ShowerStatus {
    fn block(state: &ShowerStatusState) -> Block<'static> {
        let mut block = Block::bordered().title(t!("status.title").to_string().blue());
        if let Some(date) = state.date {
            block = block.title_bottom(Line::from(date.format("%Y-%m-%d").to_string()).right_aligned());
        }
        block
    }
}

impl StatefulWidget for ShowerStatus {
    type State = ShowerStatusState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let block = Self::block(state);
        state.inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(state.summary.clone())
            .wrap(Wrap { trim: false })
            .scroll((state.scroll, 0))
            .render(state.inner_area, buf);

        let mut scrollbar_state =
            ScrollbarState::new(state.max_scroll() as usize).position(state.scroll as usize);
        Scrollbar::default().render(area.inner(Margin::new(0, 1)), buf, &mut scrollbar_state);
    }
}

pub async fn handle_event(event: Event, states: &mut States) -> Result<()> {
    match event {
        Event::Tick => {
            let date = states.shared.time.local_date();
            states.status_state.update(date);
            Ok(())
        }
        Event::Mouse(event) => handle_mouse_event(event, states).await,
        _ => Ok(()),
    }
}

async fn handle_mouse_event(event: MouseEvent, states: &mut States) -> Result<()> {
    let state = &mut states.status_state;
    if !state
        .inner_area
        .contains(Position::new(event.column, event.row))
    {
        return Ok(());
    }

    match event.kind {
        MouseEventKind::ScrollUp => state.scroll_up(),
        MouseEventKind::ScrollDown => state.scroll_down(),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &mut ShowerStatusState) -> String {
        let area = Rect::new(0, 0, 60, 8);
        let mut buf = Buffer::empty(area);
        ShowerStatus.render(area, &mut buf, state);
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn lists_showers_for_the_date() {
        let mut state = ShowerStatusState::default();
        state.update(NaiveDate::from_ymd_opt(2025, 12, 18).unwrap());
        let text = render(&mut state);
        assert!(text.contains("Geminids"));
        assert!(text.contains("Ursids"));
        assert!(text.contains("2025-12-18"));
    }

    #[test]
    fn quiet_date_shows_none_active() {
        let mut state = ShowerStatusState::default();
        state.update(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert!(render(&mut state).contains("No active meteor showers"));
    }

    #[test]
    fn summary_follows_date_changes() {
        let mut state = ShowerStatusState::default();
        state.update(NaiveDate::from_ymd_opt(2026, 1, 3).unwrap());
        assert!(render(&mut state).contains("Quadrantids"));

        state.update(NaiveDate::from_ymd_opt(2026, 4, 22).unwrap());
        let text = render(&mut state);
        assert!(text.contains("Lyrids"));
        assert!(!text.contains("Quadrantids"));
    }
}
