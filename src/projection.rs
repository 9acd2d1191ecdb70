use std::{
    borrow::Cow,
    f64::consts::{FRAC_PI_2, PI},
};

use chrono::{DateTime, Utc};
use rust_i18n::t;
use serde::Deserialize;
use strum::{EnumIter, IntoEnumIterator};

use crate::coordinates::{Equatorial, Horizontal, Lla};

/// Maps sky coordinates to screen pixels.
pub trait Projection {
    /// Returns `(x, y)` in screen pixels, `y` growing downwards.
    ///
    /// Both values are NaN when the coordinate is outside the visible region.
    fn project(&self, coordinate: &Equatorial) -> (f64, f64);
}

impl<F> Projection for F
where
    F: Fn(&Equatorial) -> (f64, f64),
{
    fn project(&self, coordinate: &Equatorial) -> (f64, f64) {
        self(coordinate)
    }
}

/// Zenith-centred azimuthal projections of the visible hemisphere.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum ProjectionKind {
    #[default]
    Orthographic,
    Stereographic,
    Equidistant,
}

impl ProjectionKind {
    /// Returns the next projection in the cycle.
    pub fn next(self) -> Self {
        Self::iter()
            .cycle()
            .skip_while(|kind| *kind != self)
            .nth(1)
            .unwrap_or_default()
    }

    pub fn label(self) -> Cow<'static, str> {
        match self {
            Self::Orthographic => t!("projection.orthographic"),
            Self::Stereographic => t!("projection.stereographic"),
            Self::Equidistant => t!("projection.equidistant"),
        }
    }

    /// Returns the distance from the chart centre for a zenith distance in
    /// radians. The horizon lies on the unit circle.
    pub fn radius(self, zenith_distance: f64) -> f64 {
        match self {
            Self::Orthographic => zenith_distance.sin(),
            Self::Stereographic => (zenith_distance / 2.0).tan(),
            Self::Equidistant => zenith_distance / FRAC_PI_2,
        }
    }

    /// Inverse of [`ProjectionKind::radius`].
    fn zenith_distance(self, radius: f64) -> f64 {
        match self {
            Self::Orthographic => radius.clamp(0.0, 1.0).asin(),
            Self::Stereographic => 2.0 * radius.atan(),
            Self::Equidistant => radius * FRAC_PI_2,
        }
    }
}

/// Drawing area of the sky chart, in pixels.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Radius of the horizon circle.
    pub fn radius(&self) -> f64 {
        self.width.min(self.height) / 2.0
    }
}

/// The sky of an observer at a given time, projected onto a viewport.
///
/// Centred on the zenith, north is up and east is to the left, as seen lying
/// on your back. Centred elsewhere, the zenith is up.
#[derive(Clone, PartialEq, Debug)]
pub struct SkyProjection {
    pub kind: ProjectionKind,
    pub observer: Lla,
    pub time: DateTime<Utc>,
    pub viewport: Viewport,
    /// Direction at the middle of the chart. `None` for the zenith.
    pub center: Option<Horizontal>,
}

impl SkyProjection {
    /// Returns the altitude and azimuth of the chart centre, in radians.
    ///
    /// The zenith is given azimuth 180° so that north ends up at the top.
    fn center_radians(&self) -> (f64, f64) {
        match self.center {
            Some(Horizontal { az, alt }) => (alt.to_radians(), az.to_radians()),
            None => (FRAC_PI_2, PI),
        }
    }

    /// Projects a horizontal direction to screen pixels.
    ///
    /// Directions below the horizon, or more than 90° from the chart centre,
    /// yield a NaN pair.
    pub fn horizontal_to_screen(&self, horizontal: &Horizontal) -> (f64, f64) {
        if horizontal.alt < 0.0 {
            return (f64::NAN, f64::NAN);
        }
        let (alt0, az0) = self.center_radians();
        let (sin_alt0, cos_alt0) = alt0.sin_cos();
        let (sin_alt, cos_alt) = horizontal.alt.to_radians().sin_cos();
        let (sin_daz, cos_daz) = (horizontal.az.to_radians() - az0).sin_cos();

        // Offsets from the centre towards increasing azimuth and towards the zenith
        let right = cos_alt * sin_daz;
        let up = cos_alt0 * sin_alt - sin_alt0 * cos_alt * cos_daz;
        let cos_distance = sin_alt0 * sin_alt + cos_alt0 * cos_alt * cos_daz;
        if cos_distance < -1e-12 {
            return (f64::NAN, f64::NAN);
        }

        let sin_distance = right.hypot(up);
        let distance = sin_distance.atan2(cos_distance);
        let r = self.kind.radius(distance) * self.viewport.radius();
        let (cx, cy) = self.viewport.center();
        if sin_distance == 0.0 {
            return (cx, cy);
        }
        (cx + r * right / sin_distance, cy - r * up / sin_distance)
    }

    /// Returns the horizontal direction under a screen point, if it lies
    /// inside the chart circle and above the horizon.
    pub fn unproject(&self, x: f64, y: f64) -> Option<Horizontal> {
        let radius = self.viewport.radius();
        if radius <= 0.0 {
            return None;
        }
        let (cx, cy) = self.viewport.center();
        let (dx, dy) = (x - cx, cy - y);
        let offset = dx.hypot(dy);
        let r = offset / radius;
        if r > 1.0 {
            return None;
        }
        let (right, up) = if offset > 0.0 {
            (dx / offset, dy / offset)
        } else {
            (0.0, 1.0)
        };

        let (alt0, az0) = self.center_radians();
        let (sin_alt0, cos_alt0) = alt0.sin_cos();
        let (sin_distance, cos_distance) = self.kind.zenith_distance(r).sin_cos();
        let sin_alt = sin_alt0 * cos_distance + cos_alt0 * sin_distance * up;
        let daz = (right * sin_distance).atan2(cos_alt0 * cos_distance - sin_alt0 * sin_distance * up);

        let alt = sin_alt.clamp(-1.0, 1.0).asin().to_degrees();
        if alt < 0.0 {
            return None;
        }
        Some(Horizontal {
            az: (az0 + daz).rem_euclid(2.0 * PI).to_degrees(),
            alt,
        })
    }
}

impl Projection for SkyProjection {
    fn project(&self, coordinate: &Equatorial) -> (f64, f64) {
        self.horizontal_to_screen(&coordinate.to_horizontal(&self.observer, &self.time))
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    const EPSILON: f64 = 1e-9;

    fn projection(kind: ProjectionKind) -> SkyProjection {
        SkyProjection {
            kind,
            observer: Lla::new(25.033, 121.5654, 0.0),
            time: Utc.with_ymd_and_hms(2026, 1, 3, 18, 0, 0).unwrap(),
            viewport: Viewport {
                width: 200.0,
                height: 100.0,
            },
            center: None,
        }
    }

    fn assert_close((x, y): (f64, f64), (ex, ey): (f64, f64)) {
        assert!((x - ex).abs() < EPSILON && (y - ey).abs() < EPSILON, "({x}, {y}) != ({ex}, {ey})");
    }

    #[test]
    fn cycles_through_all_kinds() {
        assert_eq!(ProjectionKind::Orthographic.next(), ProjectionKind::Stereographic);
        assert_eq!(ProjectionKind::Stereographic.next(), ProjectionKind::Equidistant);
        assert_eq!(ProjectionKind::Equidistant.next(), ProjectionKind::Orthographic);
    }

    #[test]
    fn horizon_is_the_unit_circle() {
        for kind in ProjectionKind::iter() {
            assert!((kind.radius(FRAC_PI_2) - 1.0).abs() < EPSILON);
            assert!(kind.radius(0.0).abs() < EPSILON);
        }
    }

    #[test]
    fn compass_points() {
        let sky = projection(ProjectionKind::Stereographic);
        let at = |az: f64, alt: f64| sky.horizontal_to_screen(&Horizontal { az, alt });
        assert_close(at(0.0, 90.0), (100.0, 50.0));
        assert_close(at(0.0, 0.0), (100.0, 0.0));
        assert_close(at(90.0, 0.0), (50.0, 50.0));
        assert_close(at(180.0, 0.0), (100.0, 100.0));
        assert_close(at(270.0, 0.0), (150.0, 50.0));
    }

    #[test]
    fn below_horizon_is_nan() {
        let sky = projection(ProjectionKind::Orthographic);
        let (x, y) = sky.horizontal_to_screen(&Horizontal { az: 45.0, alt: -0.1 });
        assert!(x.is_nan() && y.is_nan());
    }

    #[test]
    fn unproject_inverts_projection() {
        for kind in ProjectionKind::iter() {
            let sky = projection(kind);
            let horizontal = Horizontal { az: 123.0, alt: 34.0 };
            let (x, y) = sky.horizontal_to_screen(&horizontal);
            let back = sky.unproject(x, y).unwrap();
            assert!((back.az - horizontal.az).abs() < 1e-6);
            assert!((back.alt - horizontal.alt).abs() < 1e-6);
        }
    }

    #[test]
    fn unproject_outside_horizon() {
        let sky = projection(ProjectionKind::Equidistant);
        assert!(sky.unproject(0.0, 0.0).is_none());
        assert!(sky.unproject(100.0, 50.0).is_some());
    }

    #[test]
    fn centred_view_puts_the_centre_in_the_middle() {
        for kind in ProjectionKind::iter() {
            let mut sky = projection(kind);
            sky.center = Some(Horizontal { az: 135.0, alt: 40.0 });
            let center = sky.horizontal_to_screen(&Horizontal { az: 135.0, alt: 40.0 });
            assert_close(center, (100.0, 50.0));

            // The zenith is straight up, 50° away
            let (x, y) = sky.horizontal_to_screen(&Horizontal { az: 0.0, alt: 90.0 });
            assert!((x - 100.0).abs() < 1e-9);
            assert!((50.0 - y - kind.radius(50f64.to_radians()) * 50.0).abs() < 1e-9);
        }
    }

    #[test]
    fn centred_view_hides_the_far_side() {
        let mut sky = projection(ProjectionKind::Orthographic);
        sky.center = Some(Horizontal { az: 90.0, alt: 10.0 });
        let (x, y) = sky.horizontal_to_screen(&Horizontal { az: 270.0, alt: 10.0 });
        assert!(x.is_nan() && y.is_nan());
        let (x, _) = sky.horizontal_to_screen(&Horizontal { az: 100.0, alt: 10.0 });
        assert!(x > 100.0, "increasing azimuth is to the right");
    }

    #[test]
    fn unproject_inverts_centred_projection() {
        for kind in ProjectionKind::iter() {
            let mut sky = projection(kind);
            sky.center = Some(Horizontal { az: 200.0, alt: 30.0 });
            let horizontal = Horizontal { az: 230.0, alt: 45.0 };
            let (x, y) = sky.horizontal_to_screen(&horizontal);
            let back = sky.unproject(x, y).unwrap();
            assert!((back.az - horizontal.az).abs() < 1e-6);
            assert!((back.alt - horizontal.alt).abs() < 1e-6);
        }
    }

    #[test]
    fn unproject_below_horizon_is_none() {
        let mut sky = projection(ProjectionKind::Equidistant);
        sky.center = Some(Horizontal { az: 180.0, alt: 5.0 });
        // Bottom of the chart circle, 85° below the horizon
        assert!(sky.unproject(100.0, 99.0).is_none());
    }

    #[test]
    fn projected_radiant_is_on_screen_or_nan() {
        let sky = projection(ProjectionKind::Orthographic);
        let (x, y) = sky.project(&Equatorial::new(230.0, 49.0));
        if !x.is_nan() {
            assert!((0.0..=200.0).contains(&x));
            assert!((0.0..=100.0).contains(&y));
        } else {
            assert!(y.is_nan());
        }
    }
}
