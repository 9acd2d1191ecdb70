use std::sync::LazyLock;

use reverse_geocoder::ReverseGeocoder;
use serde::Deserialize;

/// Reverse geocoder instance used to convert coordinates to location names.
static GEOCODER: LazyLock<ReverseGeocoder> = LazyLock::new(ReverseGeocoder::new);

/// A position in geodetic coordinates.
#[derive(Clone, PartialEq, Debug, Deserialize)]
pub struct Lla {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees, east positive.
    pub lon: f64,
    /// Altitude in km.
    #[serde(default)]
    pub alt: f64,
}

impl Lla {
    pub fn new(lat: f64, lon: f64, alt: f64) -> Self {
        debug_assert!((-90.0..=90.0).contains(&lat));
        debug_assert!((-180.0..=180.0).contains(&lon));
        debug_assert!(alt >= 0.0);
        Lla { lat, lon, alt }
    }

    /// Returns the city and country name.
    pub fn country_city(&self) -> (String, String) {
        let record = GEOCODER.search((self.lat, self.lon)).record;
        let city = &record.name;
        let country = match isocountry::CountryCode::for_alpha2(&record.cc) {
            Ok(code) => code.name(),
            Err(_) => "Unknown",
        };
        (country.to_owned(), city.to_owned())
    }

    /// Formats the position as `25.03°N, 121.57°E`.
    pub fn to_short_string(&self) -> String {
        let ns = if self.lat >= 0.0 { 'N' } else { 'S' };
        let ew = if self.lon >= 0.0 { 'E' } else { 'W' };
        format!(
            "{:.2}°{ns}, {:.2}°{ew}",
            self.lat.abs(),
            self.lon.abs()
        )
    }
}
