use ratatui::style::Color;

use crate::{meteor::catalog::Shower, projection::Projection};

/// Smallest marker radius in pixels.
const MIN_MARKER_RADIUS: f64 = 3.0;
/// ZHR per pixel of marker radius.
const ZHR_PER_PIXEL: f64 = 20.0;
/// Offset of a marker's label from its centre, in pixels (x right, y down).
const LABEL_OFFSET: (f64, f64) = (8.0, -8.0);

pub const MARKER_OPACITY: f64 = 0.8;
pub const MARKER_STROKE_COLOR: Color = Color::White;
pub const MARKER_STROKE_WIDTH: f64 = 1.0;

/// A radiant marker in screen space.
#[derive(Clone, PartialEq, Debug)]
pub struct Marker {
    pub shower: &'static Shower,
    /// Horizontal screen position in pixels.
    pub x: f64,
    /// Vertical screen position in pixels, growing downwards.
    pub y: f64,
    pub radius: f64,
}

impl Marker {
    /// Returns the position of the name label.
    pub fn label_position(&self) -> (f64, f64) {
        (self.x + LABEL_OFFSET.0, self.y + LABEL_OFFSET.1)
    }

    /// Returns the fill colour, faded towards the black sky background.
    pub fn fill_color(&self) -> Color {
        with_opacity(self.shower.color, MARKER_OPACITY)
    }

    /// Returns the distance from the marker centre to the given point.
    fn distance_to(&self, x: f64, y: f64) -> f64 {
        (self.x - x).hypot(self.y - y)
    }
}

/// Returns the marker radius for a zenithal hourly rate.
pub fn marker_radius(zhr: u32) -> f64 {
    (zhr as f64 / ZHR_PER_PIXEL).max(MIN_MARKER_RADIUS)
}

/// Computes the markers for the given showers.
///
/// Returns nothing when `enabled` is false. Showers whose radiant does not
/// project onto the screen (a NaN coordinate) are skipped.
pub fn render_active_showers(
    enabled: bool,
    active: &[&'static Shower],
    projection: &impl Projection,
) -> Vec<Marker> {
    if !enabled {
        return Vec::new();
    }

    active
        .iter()
        .filter_map(|&shower| {
            let (x, y) = projection.project(&shower.radiant);
            if x.is_nan() || y.is_nan() {
                tracing::trace!(shower = shower.name, "radiant not visible");
                return None;
            }
            Some(Marker {
                shower,
                x,
                y,
                radius: marker_radius(shower.zhr),
            })
        })
        .collect()
}

/// The meteor shower overlay of the sky view.
///
/// Owns the on/off switch and the markers currently on screen. The marker set
/// is always replaced as a whole.
#[derive(Default)]
pub struct MeteorShowerLayer {
    enabled: bool,
    markers: Vec<Marker>,
    /// View generation the current markers were computed for.
    rendered_generation: Option<u64>,
    label_color: Color,
}

impl MeteorShowerLayer {
    pub fn new(enabled: bool, label_color: Color) -> Self {
        Self {
            enabled,
            label_color,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn label_color(&self) -> Color {
        self.label_color
    }

    /// Switches the overlay on or off.
    ///
    /// Switching on draws the active showers right away if a projection is
    /// available; switching off removes every marker.
    pub fn toggle<P: Projection>(&mut self, active: &[&'static Shower], projection: Option<&P>) {
        if self.enabled {
            self.disable();
            return;
        }

        self.enabled = true;
        self.rendered_generation = None;
        tracing::info!("meteor shower radiants shown");
        if let Some(projection) = projection {
            self.render(active, projection);
        }
    }

    /// Switches the overlay off and removes every marker.
    pub fn disable(&mut self) {
        if self.enabled {
            tracing::info!("meteor shower radiants hidden");
        }
        self.enabled = false;
        self.rendered_generation = None;
        self.markers.clear();
    }

    /// Removes every marker while keeping the overlay switched on.
    ///
    /// Used when the sky has nowhere to draw; the next view renders afresh.
    pub fn clear(&mut self) {
        if !self.markers.is_empty() {
            tracing::trace!(markers = self.markers.len(), "meteor layer cleared, no render target");
        }
        self.markers.clear();
        self.rendered_generation = None;
    }

    /// Replaces the markers with the given showers as seen through
    /// `projection`.
    pub fn render(&mut self, active: &[&'static Shower], projection: &impl Projection) {
        self.markers = render_active_showers(self.enabled, active, projection);
    }

    /// Handles the sky view finishing a redraw of view `generation`.
    ///
    /// Re-renders only when the overlay is on and the generation has not been
    /// rendered yet, so repeated or out-of-date notifications are dropped.
    pub fn on_redraw_completed(
        &mut self,
        generation: u64,
        active: &[&'static Shower],
        projection: &impl Projection,
    ) {
        if !self.enabled {
            return;
        }
        if self
            .rendered_generation
            .is_some_and(|rendered| rendered >= generation)
        {
            return;
        }
        self.render(active, projection);
        self.rendered_generation = Some(generation);
        tracing::debug!(generation, markers = self.markers.len(), "meteor layer redrawn");
    }

    /// Returns the marker under the given screen point.
    ///
    /// `tolerance` widens every marker's hit area, in pixels. When markers
    /// overlap the closest one wins.
    pub fn marker_at(&self, x: f64, y: f64, tolerance: f64) -> Option<&Marker> {
        self.markers
            .iter()
            .map(|marker| (marker, marker.distance_to(x, y)))
            .filter(|(marker, distance)| *distance <= marker.radius + tolerance)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(marker, _)| marker)
    }
}

fn with_opacity(color: Color, opacity: f64) -> Color {
    let scale = |channel: u8| (channel as f64 * opacity).round() as u8;
    match color {
        Color::Rgb(r, g, b) => Color::Rgb(scale(r), scale(g), scale(b)),
        color => color,
    }
}
