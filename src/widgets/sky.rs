use anyhow::Result;
use chrono::Duration;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    prelude::*,
    widgets::{
        Block, Paragraph, Wrap,
        canvas::{Canvas, Circle, Context, Points},
    },
};
use rust_i18n::t;

use crate::{
    app::States,
    config::SkyConfig,
    coordinates::Horizontal,
    event::Event,
    meteor::layer::{MARKER_STROKE_COLOR, MARKER_STROKE_WIDTH, MeteorShowerLayer},
    projection::{ProjectionKind, SkyProjection, Viewport},
    shared_state::SharedState,
    widgets::window_to_area,
    zodiac::{self, Constellation, ConstellationLabel, ZODIAC},
};

/// Braille dots per terminal cell, horizontally and vertically.
const DOTS_PER_CELL: (f64, f64) = (2.0, 4.0);
/// Canvases smaller than this, in cells, are not drawn.
const MIN_CANVAS_SIZE: u16 = 5;
/// Extra pixels around a marker that still count as a click on it.
const HIT_TOLERANCE: f64 = 2.0;
/// Distance from a constellation centre that counts as a click on it.
const CONSTELLATION_HIT_TOLERANCE: f64 = 4.0;
/// Altitudes of the grid circles, in degrees.
const ALTITUDE_RINGS: [f64; 2] = [30.0, 60.0];
/// Spacing of the points that draw grid lines, in degrees.
const GRID_STEP: usize = 2;

const CONSTELLATION_COLOR: Color = Color::Magenta;
const SELECTED_CONSTELLATION_COLOR: Color = Color::LightMagenta;

/// A widget that displays the sky above the observer.
pub struct Sky<'a> {
    pub state: &'a mut SkyState,
    pub shared: &'a SharedState,
    pub meteor_layer: &'a MeteorShowerLayer,
    /// Constellation whose details are open. Other labels are dimmed.
    pub highlight: Option<&'static Constellation>,
}

/// State of a [`Sky`] widget.
pub struct SkyState {
    kind: ProjectionKind,
    configured_kind: ProjectionKind,
    /// The time step to advance or rewind when scrolling.
    pub time_delta: Duration,

    grid_color: Color,
    horizon_color: Color,

    /// Projection of the last drawn view. `None` while there is no room to draw.
    projection: Option<SkyProjection>,
    /// Constellation the chart is centred on.
    focus: Option<&'static Constellation>,
    /// Zodiac labels of the last drawn view.
    constellations: Vec<ConstellationLabel>,

    /// Identity of the last drawn view.
    view: Option<ViewKey>,
    /// Incremented every time the drawn view changes.
    generation: u64,

    /// The area of the canvas.
    canvas_area: Rect,
    /// Current mouse position within the canvas, in pixels.
    mouse_position: Option<(f64, f64)>,
    /// The inner rendering area of the widget.
    inner_area: Rect,
}

/// Everything that moves objects on the chart.
#[derive(Clone, Copy, PartialEq, Debug)]
struct ViewKey {
    kind: ProjectionKind,
    canvas_area: Rect,
    /// Simulation time in whole minutes since the Unix epoch.
    minute: i64,
    focus: Option<&'static str>,
}

impl SkyState {
    pub fn with_config(config: &SkyConfig) -> Self {
        Self {
            kind: config.projection,
            configured_kind: config.projection,
            time_delta: Duration::minutes(config.time_delta_min),
            grid_color: config.grid_color,
            horizon_color: config.horizon_color,
            projection: None,
            focus: None,
            constellations: Vec::new(),
            view: None,
            generation: 0,
            canvas_area: Default::default(),
            mouse_position: None,
            inner_area: Default::default(),
        }
    }

    /// Returns the generation of the last drawn view.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the projection of the last drawn view.
    pub fn projection(&self) -> Option<&SkyProjection> {
        self.projection.as_ref()
    }

    pub fn cycle_projection(&mut self) {
        self.kind = self.kind.next();
        tracing::info!(projection = ?self.kind, "projection changed");
    }

    /// Returns the constellation the chart is centred on.
    pub fn focus(&self) -> Option<&'static Constellation> {
        self.focus
    }

    /// Centres the chart on a constellation, or on the zenith for `None`.
    pub fn focus_on(&mut self, constellation: Option<&'static Constellation>) {
        self.focus = constellation;
    }

    /// Returns the zodiac labels of the last drawn view.
    pub fn constellations(&self) -> &[ConstellationLabel] {
        &self.constellations
    }

    /// Restores the configured projection and centres on the zenith.
    pub fn reset(&mut self) {
        self.kind = self.configured_kind;
        self.focus = None;
    }

    /// Records the view about to be drawn into `canvas_area`.
    fn update_view(&mut self, canvas_area: Rect, shared: &SharedState) {
        self.canvas_area = canvas_area;

        let time = shared.time.time();
        let key = ViewKey {
            kind: self.kind,
            canvas_area,
            minute: time.timestamp().div_euclid(60),
            focus: self.focus.map(|constellation| constellation.name),
        };
        if self.view == Some(key) {
            return;
        }
        self.view = Some(key);
        self.generation += 1;

        if canvas_area.width.min(canvas_area.height) < MIN_CANVAS_SIZE {
            tracing::debug!(?canvas_area, "sky canvas too small to draw");
            self.projection = None;
            self.constellations.clear();
            return;
        }

        let observer = &shared.observer.position;
        let center = self.focus.and_then(|constellation| {
            let center = constellation.center.to_horizontal(observer, &time);
            if center.alt < 0.0 {
                tracing::debug!(constellation = constellation.name, "below the horizon, not centring");
                return None;
            }
            Some(center)
        });
        let projection = SkyProjection {
            kind: self.kind,
            observer: observer.clone(),
            time,
            viewport: Viewport {
                width: canvas_area.width as f64 * DOTS_PER_CELL.0,
                height: canvas_area.height as f64 * DOTS_PER_CELL.1,
            },
            center,
        };
        self.constellations = zodiac::project_constellations(&projection);
        self.projection = Some(projection);
    }

    fn hovered_horizontal(&self) -> Option<Horizontal> {
        let (x, y) = self.mouse_position?;
        self.projection.as_ref()?.unproject(x, y)
    }
}

impl Widget for Sky<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = self.block();
        self.state.inner_area = block.inner(area);
        block.render(area, buf);

        let canvas_area = centered_square(self.state.inner_area);
        self.state.update_view(canvas_area, self.shared);

        match &self.state.projection {
            Some(projection) => self.render_chart(projection, buf),
            None => Self::centered_paragraph(t!("no_enough_space").dark_gray())
                .render(self.state.inner_area, buf),
        }
    }
}

impl Sky<'_> {
    fn block(&self) -> Block<'static> {
        let observer = &self.shared.observer;
        let mut block = Block::bordered()
            .title(format!("{} · {}", t!("sky.title"), self.state.kind.label()).blue())
            .title(
                Line::from(format!(
                    "{} ({})",
                    observer.name,
                    observer.position.to_short_string()
                ))
                .right_aligned(),
            );
        if let Some(constellation) = self.state.focus {
            block = block.title(
                format!("{} {}", constellation.symbol, constellation.name).fg(CONSTELLATION_COLOR),
            );
        }
        if self.meteor_layer.is_enabled() {
            block = block.title_bottom(t!("sky.radiants_shown").to_string().yellow());
        }
        if let Some(Horizontal { az, alt }) = self.state.hovered_horizontal() {
            block = block
                .title_bottom(Line::from(format!("Az {az:.1}°, Alt {alt:.1}°")).right_aligned());
        }
        block
    }

    fn render_chart(&self, projection: &SkyProjection, buf: &mut Buffer) {
        let Viewport { width, height } = projection.viewport;
        Canvas::default()
            .x_bounds([0.0, width])
            .y_bounds([0.0, height])
            .paint(|ctx| {
                self.draw_grid(ctx, projection);
                ctx.layer();
                self.draw_constellations(ctx, height);
                ctx.layer();
                self.draw_meteor_showers(ctx, height);
                ctx.layer();
                self.draw_meteor_shower_labels(ctx, height);
            })
            .render(self.state.canvas_area, buf);
    }

    /// Draws the chart outline, horizon, altitude rings, meridians and
    /// compass points.
    ///
    /// Screen coordinates grow downwards, canvas coordinates upwards.
    fn draw_grid(&self, ctx: &mut Context, projection: &SkyProjection) {
        let viewport = projection.viewport;
        let to_canvas = |az: f64, alt: f64| {
            let (x, y) = projection.horizontal_to_screen(&Horizontal { az, alt });
            (!x.is_nan()).then_some((x, viewport.height - y))
        };

        let (x, y) = viewport.center();
        ctx.draw(&Circle {
            x,
            y: viewport.height - y,
            radius: viewport.radius(),
            color: self.state.grid_color,
        });

        let meridians: Vec<_> = [0.0, 90.0, 180.0, 270.0]
            .into_iter()
            .flat_map(|az| (0..=90).step_by(GRID_STEP).map(move |alt| (az, alt as f64)))
            .filter_map(|(az, alt)| to_canvas(az, alt))
            .collect();
        ctx.draw(&Points {
            coords: &meridians,
            color: self.state.grid_color,
        });

        for (altitude, color) in [
            (ALTITUDE_RINGS[0], self.state.grid_color),
            (ALTITUDE_RINGS[1], self.state.grid_color),
            (0.0, self.state.horizon_color),
        ] {
            let ring: Vec<_> = (0..360)
                .step_by(GRID_STEP)
                .filter_map(|az| to_canvas(az as f64, altitude))
                .collect();
            ctx.draw(&Points {
                coords: &ring,
                color,
            });
        }

        for (label, az) in [("N", 0.0), ("E", 90.0), ("S", 180.0), ("W", 270.0)] {
            if let Some((label_x, label_y)) = to_canvas(az, 0.0) {
                ctx.print(label_x, label_y, label.green());
            }
        }
    }

    /// Labels the centre of every visible zodiac constellation.
    fn draw_constellations(&self, ctx: &mut Context, height: f64) {
        for label in self.state.constellations() {
            let constellation = label.constellation;
            let color = match self.highlight {
                None => CONSTELLATION_COLOR,
                Some(selected) if selected.name == constellation.name => {
                    SELECTED_CONSTELLATION_COLOR
                }
                Some(_) => Color::DarkGray,
            };
            let text = format!("{} {}", constellation.symbol, constellation.name);
            ctx.print(label.x, height - label.y, text.fg(color));
        }
    }

    /// Draws a filled, outlined circle for every radiant marker.
    fn draw_meteor_showers(&self, ctx: &mut Context, height: f64) {
        for marker in self.meteor_layer.markers() {
            let (x, y) = (marker.x, height - marker.y);
            let fill = marker.fill_color();

            let mut radius = marker.radius - MARKER_STROKE_WIDTH;
            while radius > 0.0 {
                ctx.draw(&Circle {
                    x,
                    y,
                    radius,
                    color: fill,
                });
                radius -= 1.0;
            }
            ctx.draw(&Points {
                coords: &[(x, y)],
                color: fill,
            });
            ctx.draw(&Circle {
                x,
                y,
                radius: marker.radius,
                color: MARKER_STROKE_COLOR,
            });
        }
    }

    fn draw_meteor_shower_labels(&self, ctx: &mut Context, height: f64) {
        let color = self.meteor_layer.label_color();
        for marker in self.meteor_layer.markers() {
            let (x, y) = marker.label_position();
            ctx.print(x, height - y, marker.shower.name.fg(color));
        }
    }

    fn centered_paragraph<'a>(text: impl Into<Text<'a>>) -> Paragraph<'a> {
        Paragraph::new(text).centered().wrap(Wrap { trim: true })
    }
}

/// Returns the largest area centred in `area` that renders as a square.
fn centered_square(area: Rect) -> Rect {
    let width = area.width.min(area.height.saturating_mul(2));
    let height = width / 2;
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

pub async fn handle_event(event: Event, states: &mut States) -> Result<()> {
    match event {
        Event::Key(event) => handle_key_event(event, states).await,
        Event::Mouse(event) => handle_mouse_event(event, states).await,
        _ => Ok(()),
    }
}

async fn handle_key_event(event: KeyEvent, states: &mut States) -> Result<()> {
    let focus = states.sky_state.focus();
    match event.code {
        KeyCode::Char('p') => states.sky_state.cycle_projection(),
        KeyCode::Char('n') => {
            states.show_constellation(focus.map_or(&ZODIAC[0], |constellation| constellation.next()))
        }
        KeyCode::Char('N') => states.show_constellation(
            focus.map_or(&ZODIAC[ZODIAC.len() - 1], |constellation| constellation.previous()),
        ),
        _ => {}
    }
    Ok(())
}

async fn handle_mouse_event(event: MouseEvent, states: &mut States) -> Result<()> {
    let global_mouse = Position::new(event.column, event.row);
    let canvas_area = states.sky_state.canvas_area;
    let Some(local_mouse) = window_to_area(global_mouse, canvas_area) else {
        states.sky_state.mouse_position = None;
        return Ok(());
    };

    // Centre of the hovered cell, in pixels.
    let x = (local_mouse.x as f64 + 0.5) * DOTS_PER_CELL.0;
    let y = (local_mouse.y as f64 + 0.5) * DOTS_PER_CELL.1;
    states.sky_state.mouse_position = Some((x, y));

    match event.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(marker) = states.meteor_layer.marker_at(x, y, HIT_TOLERANCE) {
                tracing::debug!(shower = marker.shower.name, "radiant selected");
                states.details = Some(marker.shower);
            } else if let Some(label) = zodiac::label_at(
                states.sky_state.constellations(),
                x,
                y,
                CONSTELLATION_HIT_TOLERANCE,
            ) {
                let constellation = label.constellation;
                states.show_constellation(constellation);
            }
        }
        MouseEventKind::ScrollUp => states.shared.time.rewind_time(states.sky_state.time_delta),
        MouseEventKind::ScrollDown => states.shared.time.advance_time(states.sky_state.time_delta),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, coordinates::Equatorial, meteor::catalog::CATALOG};

    fn shared() -> SharedState {
        SharedState::with_config(&Config::default())
    }

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn centered_square_keeps_two_to_one_cells() {
        assert_eq!(centered_square(Rect::new(0, 0, 80, 20)), Rect::new(20, 0, 40, 20));
        assert_eq!(centered_square(Rect::new(0, 0, 40, 40)), Rect::new(0, 10, 40, 20));
    }

    #[test]
    fn generation_follows_view_changes() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        let area = Rect::new(0, 0, 40, 20);

        state.update_view(area, &shared);
        let first = state.generation();
        state.update_view(area, &shared);
        assert!(state.generation() - first <= 1);

        let before = state.generation();
        state.cycle_projection();
        state.update_view(area, &shared);
        assert!(state.generation() > before);
        assert_eq!(
            state.projection().unwrap().kind,
            ProjectionKind::Stereographic
        );

        let before = state.generation();
        state.update_view(Rect::new(0, 0, 60, 30), &shared);
        assert!(state.generation() > before);
        assert_eq!(state.projection().unwrap().viewport.width, 120.0);
        assert_eq!(state.projection().unwrap().viewport.height, 120.0);
    }

    #[test]
    fn tiny_canvas_has_no_projection() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        state.update_view(Rect::new(0, 0, 8, 4), &shared);
        assert!(state.projection().is_none());
    }

    #[test]
    fn reset_restores_configured_projection() {
        let mut state = SkyState::with_config(&SkyConfig::default());
        state.cycle_projection();
        state.reset();
        assert_eq!(state.kind, ProjectionKind::Orthographic);
    }

    #[test]
    fn tiny_canvas_drops_constellation_labels() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        state.update_view(Rect::new(0, 0, 60, 30), &shared);
        assert!(!state.constellations().is_empty());

        state.update_view(Rect::new(0, 0, 8, 4), &shared);
        assert!(state.constellations().is_empty());
    }

    #[test]
    fn focus_centres_the_chart_on_the_constellation() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        let area = Rect::new(0, 0, 60, 30);
        state.update_view(area, &shared);
        let before = state.generation();

        // Half the zodiac is always above the horizon.
        let visible = ZODIAC
            .iter()
            .find(|c| {
                c.center
                    .to_horizontal(&shared.observer.position, &shared.time.time())
                    .alt
                    > 5.0
            })
            .unwrap();
        state.focus_on(Some(visible));
        state.update_view(area, &shared);
        assert!(state.generation() > before);

        let projection = state.projection().unwrap();
        assert!(projection.center.is_some());
        let label = state
            .constellations()
            .iter()
            .find(|label| label.constellation.name == visible.name)
            .unwrap();
        let (cx, cy) = projection.viewport.center();
        assert!(label.distance_to(cx, cy) < 1.0);

        state.reset();
        assert!(state.focus().is_none());
        state.update_view(area, &shared);
        assert!(state.projection().unwrap().center.is_none());
    }

    #[test]
    fn draws_marker_labels() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        let geminids = CATALOG.iter().find(|s| s.short_name == "GEM").unwrap();
        let mut layer = MeteorShowerLayer::new(true, Color::Yellow);
        layer.render(&[geminids], &|_: &Equatorial| (20.0, 20.0));

        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        Sky {
            state: &mut state,
            shared: &shared,
            meteor_layer: &layer,
            highlight: None,
        }
        .render(area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Geminids"));
        assert!(text.contains("Radiants shown"));
        assert!(state.projection().is_some());
    }

    #[test]
    fn tiny_area_shows_message() {
        let shared = shared();
        let mut state = SkyState::with_config(&SkyConfig::default());
        let layer = MeteorShowerLayer::default();

        let area = Rect::new(0, 0, 30, 5);
        let mut buf = Buffer::empty(area);
        Sky {
            state: &mut state,
            shared: &shared,
            meteor_layer: &layer,
            highlight: None,
        }
        .render(area, &mut buf);

        assert!(state.projection().is_none());
    }
}
