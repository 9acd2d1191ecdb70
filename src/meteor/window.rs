use std::fmt::{Display, Formatter};

use chrono::Datelike;

/// A calendar day within a year.
///
/// Days are ordered by month first and day second, which is the ordering
/// used for every window comparison.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct MonthDay {
    // Field order defines the derived ordering.
    month: u32,
    day: u32,
}

impl MonthDay {
    /// Creates a new `MonthDay`.
    ///
    /// # Panics
    ///
    /// Panics if the pair is not a valid calendar day. February 29 is
    /// accepted.
    pub const fn new(month: u32, day: u32) -> Self {
        assert!(month >= 1 && month <= 12, "month out of range");
        assert!(day >= 1 && day <= days_in_month(month), "day out of range");
        Self { month, day }
    }

    /// Returns the month and day of the given date.
    pub fn from_date(date: &impl Datelike) -> Self {
        Self {
            month: date.month(),
            day: date.day(),
        }
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }
}

impl Display for MonthDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month, self.day)
    }
}

/// A yearly recurring date range, inclusive on both ends.
///
/// A window whose start comes after its end spans the turn of the year,
/// e.g. `12/28-1/12`. Start and end are compared as whole days, so a window
/// such as `3/20-3/5` wraps too and covers everything but `3/6-3/19`. A
/// comparison of months alone would treat it as never active.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ActiveWindow {
    pub start: MonthDay,
    pub end: MonthDay,
}

impl ActiveWindow {
    pub const fn new(start: MonthDay, end: MonthDay) -> Self {
        Self { start, end }
    }

    /// Returns `true` if the window crosses from December into January.
    pub fn wraps_year(&self) -> bool {
        self.start > self.end
    }

    /// Returns `true` if the given day lies within the window.
    pub fn contains(&self, day: MonthDay) -> bool {
        if self.wraps_year() {
            day >= self.start || day <= self.end
        } else {
            self.start <= day && day <= self.end
        }
    }
}

impl Display for ActiveWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

const fn days_in_month(month: u32) -> u32 {
    match month {
        2 => 29,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}
