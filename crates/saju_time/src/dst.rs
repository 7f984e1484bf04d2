//! Historical daylight-saving windows not carried by the tz database.
//!
//! South Korea observed summer time from 1948 to 1951 under proclamations
//! whose start and end days differ from what tz-database builds carry for
//! `Asia/Seoul`. Each window is `[start, end)` in local civil time and shifts
//! clocks forward by one hour.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One historical DST window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoricalDstWindow {
    /// IANA zone the window applies to.
    pub timezone: &'static str,
    pub year: i32,
    /// (month, day, hour) the window opens, local time.
    pub start: (u32, u32, u32),
    /// (month, day, hour) the window closes, local time (exclusive).
    pub end: (u32, u32, u32),
    /// Clock shift, minutes.
    pub shift_minutes: i32,
}

pub const KOREA_HISTORICAL_DST: [HistoricalDstWindow; 4] = [
    HistoricalDstWindow {
        timezone: "Asia/Seoul",
        year: 1948,
        start: (6, 1, 0),
        end: (9, 13, 0),
        shift_minutes: 60,
    },
    HistoricalDstWindow {
        timezone: "Asia/Seoul",
        year: 1949,
        start: (4, 3, 0),
        end: (9, 11, 0),
        shift_minutes: 60,
    },
    HistoricalDstWindow {
        timezone: "Asia/Seoul",
        year: 1950,
        start: (4, 1, 0),
        end: (9, 10, 0),
        shift_minutes: 60,
    },
    HistoricalDstWindow {
        timezone: "Asia/Seoul",
        year: 1951,
        start: (5, 6, 0),
        end: (9, 9, 0),
        shift_minutes: 60,
    },
];

impl HistoricalDstWindow {
    fn instant(&self, (month, day, hour): (u32, u32, u32)) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year, month, day)?.and_hms_opt(hour, 0, 0)
    }

    /// Whether a local civil date-time falls inside the window.
    pub fn contains(&self, local: &NaiveDateTime) -> bool {
        match (self.instant(self.start), self.instant(self.end)) {
            (Some(start), Some(end)) => start <= *local && *local < end,
            _ => false,
        }
    }
}

/// Table of historical DST windows, keyed by zone and year.
#[derive(Debug, Clone, Copy)]
pub struct HistoricalDstTable {
    windows: &'static [HistoricalDstWindow],
}

impl Default for HistoricalDstTable {
    fn default() -> Self {
        Self {
            windows: &KOREA_HISTORICAL_DST,
        }
    }
}

impl HistoricalDstTable {
    pub fn windows(&self) -> &'static [HistoricalDstWindow] {
        self.windows
    }

    /// Whether the table governs DST for `timezone` in `year`. Years it covers
    /// ignore the tz database's DST rules entirely.
    pub fn covers(&self, timezone: &str, year: i32) -> bool {
        self.windows
            .iter()
            .any(|w| w.timezone == timezone && w.year == year)
    }

    /// The window containing `local` in `timezone`, if any.
    pub fn active(&self, timezone: &str, local: &NaiveDateTime) -> Option<&'static HistoricalDstWindow> {
        self.windows
            .iter()
            .find(|w| w.timezone == timezone && w.contains(local))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn window_edges_are_half_open() {
        let table = HistoricalDstTable::default();
        assert!(table.active("Asia/Seoul", &at(1948, 6, 1, 0, 0)).is_some());
        assert!(table.active("Asia/Seoul", &at(1948, 5, 31, 23, 59)).is_none());
        assert!(table.active("Asia/Seoul", &at(1948, 9, 12, 23, 59)).is_some());
        assert!(table.active("Asia/Seoul", &at(1948, 9, 13, 0, 0)).is_none());
    }

    #[test]
    fn every_year_has_a_window() {
        let table = HistoricalDstTable::default();
        for (year, mid) in [(1948, (7, 1)), (1949, (6, 1)), (1950, (6, 1)), (1951, (7, 1))] {
            assert!(table.covers("Asia/Seoul", year));
            let w = table.active("Asia/Seoul", &at(year, mid.0, mid.1, 12, 0)).unwrap();
            assert_eq!(w.shift_minutes, 60);
        }
        assert!(!table.covers("Asia/Seoul", 1952));
    }

    #[test]
    fn other_zones_unaffected() {
        let table = HistoricalDstTable::default();
        assert!(table.active("Asia/Tokyo", &at(1949, 6, 1, 12, 0)).is_none());
        assert!(!table.covers("Asia/Tokyo", 1949));
    }
}
