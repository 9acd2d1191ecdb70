use chrono::Datelike;
use ratatui::style::Color;

use crate::{
    coordinates::Equatorial,
    meteor::window::{ActiveWindow, MonthDay},
};

/// An annual meteor shower.
#[derive(Clone, PartialEq, Debug)]
pub struct Shower {
    /// Display name.
    pub name: &'static str,
    /// IAU three-letter code.
    pub short_name: &'static str,
    /// Peak dates, for display only.
    pub peak: &'static str,
    /// Dates during which the shower is observable.
    pub active: ActiveWindow,
    /// Zenithal hourly rate.
    pub zhr: u32,
    /// Point the meteors appear to originate from.
    pub radiant: Equatorial,
    /// Comet or asteroid the debris stream comes from.
    pub parent_body: &'static str,
    /// Entry velocity in km/s.
    pub velocity_km_s: u32,
    pub color: Color,
}

impl Shower {
    /// Returns `true` if the shower is active on the given day.
    pub fn is_active_on(&self, day: MonthDay) -> bool {
        self.active.contains(day)
    }
}

const fn window(start: (u32, u32), end: (u32, u32)) -> ActiveWindow {
    ActiveWindow::new(MonthDay::new(start.0, start.1), MonthDay::new(end.0, end.1))
}

/// Known annual meteor showers, in calendar order of their peaks.
pub static CATALOG: [Shower; 8] = [
    Shower {
        name: "Quadrantids",
        short_name: "QUA",
        peak: "1/3-1/4",
        active: window((12, 28), (1, 12)),
        zhr: 120,
        radiant: Equatorial::new(230.0, 49.0),
        parent_body: "2003 EH1",
        velocity_km_s: 41,
        color: Color::Rgb(0xff, 0xff, 0x00),
    },
    Shower {
        name: "Lyrids",
        short_name: "LYR",
        peak: "4/22-4/23",
        active: window((4, 16), (4, 25)),
        zhr: 18,
        radiant: Equatorial::new(271.0, 34.0),
        parent_body: "C/1861 G1 (Thatcher)",
        velocity_km_s: 49,
        color: Color::Rgb(0xff, 0x66, 0x00),
    },
    Shower {
        name: "Eta Aquariids",
        short_name: "ETA",
        peak: "5/5-5/6",
        active: window((4, 19), (5, 28)),
        zhr: 50,
        radiant: Equatorial::new(338.0, -1.0),
        parent_body: "1P/Halley",
        velocity_km_s: 66,
        color: Color::Rgb(0x00, 0xff, 0xff),
    },
    Shower {
        name: "Perseids",
        short_name: "PER",
        peak: "8/12-8/13",
        active: window((7, 17), (8, 24)),
        zhr: 100,
        radiant: Equatorial::new(48.0, 58.0),
        parent_body: "109P/Swift-Tuttle",
        velocity_km_s: 59,
        color: Color::Rgb(0xff, 0x00, 0x80),
    },
    Shower {
        name: "Orionids",
        short_name: "ORI",
        peak: "10/21-10/22",
        active: window((10, 2), (11, 7)),
        zhr: 25,
        radiant: Equatorial::new(95.0, 16.0),
        parent_body: "1P/Halley",
        velocity_km_s: 66,
        color: Color::Rgb(0x80, 0xff, 0x00),
    },
    Shower {
        name: "Leonids",
        short_name: "LEO",
        peak: "11/17-11/18",
        active: window((11, 6), (11, 30)),
        zhr: 15,
        radiant: Equatorial::new(152.0, 22.0),
        parent_body: "55P/Tempel-Tuttle",
        velocity_km_s: 71,
        color: Color::Rgb(0xff, 0x80, 0x00),
    },
    Shower {
        name: "Geminids",
        short_name: "GEM",
        peak: "12/13-12/14",
        active: window((12, 4), (12, 20)),
        zhr: 120,
        radiant: Equatorial::new(112.0, 33.0),
        parent_body: "3200 Phaethon",
        velocity_km_s: 35,
        color: Color::Rgb(0x00, 0x80, 0xff),
    },
    Shower {
        name: "Ursids",
        short_name: "URS",
        peak: "12/22-12/23",
        active: window((12, 17), (12, 26)),
        zhr: 10,
        radiant: Equatorial::new(217.0, 76.0),
        parent_body: "8P/Tuttle",
        velocity_km_s: 33,
        color: Color::Rgb(0xff, 0x40, 0x80),
    },
];

/// Returns the showers active on the given date, in catalog order.
///
/// Only the calendar month and day of `date` are compared; the caller decides
/// which timezone "today" is in.
pub fn active_showers(date: &impl Datelike) -> Vec<&'static Shower> {
    let today = MonthDay::from_date(date);
    CATALOG
        .iter()
        .filter(|shower| shower.is_active_on(today))
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn names_on(month: u32, day: u32) -> Vec<&'static str> {
        let date = NaiveDate::from_ymd_opt(2025, month, day).unwrap();
        active_showers(&date).iter().map(|shower| shower.name).collect()
    }

    #[test]
    fn quadrantids_active_across_new_year() {
        assert_eq!(names_on(1, 3), ["Quadrantids"]);
        assert_eq!(names_on(1, 12), ["Quadrantids"]);
        assert!(names_on(1, 13).is_empty());
        assert!(!names_on(12, 27).contains(&"Quadrantids"));
        assert!(names_on(12, 28).contains(&"Quadrantids"));
    }

    #[test]
    fn lyrids_inactive_in_january() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 3).unwrap();
        assert!(
            !active_showers(&date)
                .iter()
                .any(|shower| shower.short_name == "LYR")
        );
    }

    #[test]
    fn preserves_catalog_order() {
        assert_eq!(names_on(4, 20), ["Lyrids", "Eta Aquariids"]);
        assert_eq!(names_on(11, 6), ["Orionids", "Leonids"]);
        assert_eq!(names_on(12, 18), ["Geminids", "Ursids"]);
        assert_eq!(names_on(12, 28), ["Quadrantids"]);
    }

    #[test]
    fn quiet_period_has_no_showers() {
        assert!(names_on(3, 1).is_empty());
        assert!(names_on(9, 15).is_empty());
    }

    #[test]
    fn same_date_same_answer() {
        let date = NaiveDate::from_ymd_opt(2025, 8, 12).unwrap();
        let first = active_showers(&date);
        let second = active_showers(&date);
        assert_eq!(first, second);
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name, "Perseids");
    }

    #[test]
    fn year_does_not_matter() {
        for year in [1999, 2024, 2025, 2100] {
            let date = NaiveDate::from_ymd_opt(year, 10, 21).unwrap();
            let names: Vec<_> = active_showers(&date).iter().map(|s| s.name).collect();
            assert_eq!(names, ["Orionids"]);
        }
    }

    #[test]
    fn every_day_of_a_leap_year_is_evaluated() {
        let mut date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut active_days = 0;
        while date.year() == 2024 {
            if !active_showers(&date).is_empty() {
                active_days += 1;
            }
            date = date.succ_opt().unwrap();
        }
        assert!(active_days > 0 && active_days < 366);
    }
}
