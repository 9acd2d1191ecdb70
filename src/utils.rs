use chrono::{DateTime, Datelike, Timelike, Utc};
use hifitime::Epoch;

/// Returns the Epoch for the given UTC timestamp.
pub fn epoch_from_utc(time: &DateTime<Utc>) -> Epoch {
    Epoch::from_gregorian_utc(
        time.year(),
        time.month() as u8,
        time.day() as u8,
        time.hour() as u8,
        time.minute() as u8,
        time.second() as u8,
        time.nanosecond(),
    )
}

/// Calculates the Greenwich Mean Sidereal Time (GMST) in radians.
///
/// # Arguments
///
/// * `jd` - The Julian days in TT time scale
///
/// # Returns
///
/// The GMST in radians, normalized to [0, 2π].
pub fn gmst_from_jd_tt(jd: f64) -> f64 {
    const J2000_EPOCH: f64 = 2451545.0; // Julian Date for J2000.0 epoch
    const JULIAN_CENTURY: f64 = 36525.0; // Days in a Julian century

    // GMST formula coefficients (in degrees)
    const GMST_MEAN: f64 = 280.46061837;
    const GMST_ADVANCE: f64 = 360.98564736629;
    const T2_COEFF: f64 = 0.000387933;
    const T3_COEFF: f64 = -1.0 / 38710000.0;

    let t = (jd - J2000_EPOCH) / JULIAN_CENTURY;

    let gmst =
        GMST_MEAN + GMST_ADVANCE * (jd - J2000_EPOCH) + T2_COEFF * t.powi(2) + T3_COEFF * t.powi(3);

    gmst.rem_euclid(360.0).to_radians()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gmst_at_j2000() {
        let gmst = gmst_from_jd_tt(2451545.0);
        assert!((gmst.to_degrees() - 280.46061837).abs() < 1e-9);
    }

    #[test]
    fn gmst_advances_about_one_degree_per_day() {
        let today = gmst_from_jd_tt(2460000.5).to_degrees();
        let tomorrow = gmst_from_jd_tt(2460001.5).to_degrees();
        let advance = (tomorrow - today).rem_euclid(360.0);
        assert!((advance - 0.9856).abs() < 1e-3);
    }
}
