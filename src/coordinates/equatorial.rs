use chrono::{DateTime, Utc};
use nalgebra::{Matrix3, Vector3};

use crate::{
    coordinates::Lla,
    utils::{epoch_from_utc, gmst_from_jd_tt},
};

/// A direction in equatorial coordinates.
///
/// Precession and nutation are ignored; catalog radiants are only accurate to
/// about a degree anyway.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Equatorial {
    /// Right ascension in degrees.
    pub ra: f64,
    /// Declination in degrees.
    pub dec: f64,
}

/// A direction in the observer's local horizontal frame.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Horizontal {
    /// Azimuth in degrees, from north towards east, in [0, 360).
    pub az: f64,
    /// Altitude above the horizon in degrees.
    pub alt: f64,
}

impl Equatorial {
    pub const fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    /// Computes where this direction appears in the sky of `observer` at
    /// `time`.
    pub fn to_horizontal(&self, observer: &Lla, time: &DateTime<Utc>) -> Horizontal {
        let gmst = gmst_from_jd_tt(epoch_from_utc(time).to_jde_tt_days());
        let local_sidereal_time = gmst + observer.lon.to_radians();
        let hour_angle = local_sidereal_time - self.ra.to_radians();
        hour_angle_to_horizontal(
            hour_angle,
            self.dec.to_radians(),
            observer.lat.to_radians(),
        )
    }
}

/// Converts an hour angle and declination to azimuth and altitude.
///
/// All angles are in radians.
fn hour_angle_to_horizontal(hour_angle: f64, dec: f64, lat: f64) -> Horizontal {
    let (sin_dec, cos_dec) = dec.sin_cos();
    let (sin_ha, cos_ha) = hour_angle.sin_cos();
    let (sin_lat, cos_lat) = lat.sin_cos();

    // x: meridian on the celestial equator, y: east, z: celestial pole
    let equatorial = Vector3::new(cos_dec * cos_ha, -cos_dec * sin_ha, sin_dec);

    // Rows: north, east, up
    #[rustfmt::skip]
    let to_local = Matrix3::new(
        -sin_lat, 0.0, cos_lat,
        0.0,      1.0, 0.0,
        cos_lat,  0.0, sin_lat,
    );
    let local = to_local * equatorial;

    Horizontal {
        az: local.y.atan2(local.x).to_degrees().rem_euclid(360.0),
        alt: local.z.clamp(-1.0, 1.0).asin().to_degrees(),
    }
}
