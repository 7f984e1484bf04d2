//! Sexagenary pillar derivation.
//!
//! Four pure calculators turn a normalized civil date-time into year, month,
//! day and hour stem-branch pairs:
//!
//! - year: `(solar year − 4) mod 60` in the combined cycle
//! - month: month number from the governing sectional term, stem from the
//!   year stem via [`MONTH_STEM_OFFSET`]
//! - day: whole days from the 1900-01-01 = 甲戌 epoch
//! - hour: two-hour windows closed at their upper odd hour, stem from the day
//!   stem via [`DAY_STEM_BASE_OFFSET`]

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use saju_base::{Branch, Stem, StemBranch, month_number_from_civil, year_stem_branch};
use serde::Serialize;

use crate::lunar::SolarTermPeriod;

/// Civil date whose day pillar is [`DAY_EPOCH_CYCLE_INDEX`].
pub const DAY_EPOCH: (i32, u32, u32) = (1900, 1, 1);

/// Cycle index of the epoch day (甲戌).
pub const DAY_EPOCH_CYCLE_INDEX: i64 = 10;

/// Offset from the year stem to the stem of month 1 (寅), indexed by year stem.
///
/// 甲己 → 丙寅, 乙庚 → 戊寅, 丙辛 → 庚寅, 丁壬 → 壬寅, 戊癸 → 甲寅.
pub const MONTH_STEM_OFFSET: [u8; 10] = [2, 3, 4, 5, 6, 7, 8, 9, 0, 1];

/// Stem of the 子 hour, indexed by day stem.
///
/// 甲己 → 甲子, 乙庚 → 丙子, 丙辛 → 戊子, 丁壬 → 庚子, 戊癸 → 壬子.
pub const DAY_STEM_BASE_OFFSET: [u8; 10] = [0, 2, 4, 6, 8, 0, 2, 4, 6, 8];

/// Hour windows as `(start, end]` fractional hours, indexed by branch.
/// 子 wraps midnight.
pub const HOUR_WINDOWS: [(f64, f64); 12] = [
    (23.0, 1.0),
    (1.0, 3.0),
    (3.0, 5.0),
    (5.0, 7.0),
    (7.0, 9.0),
    (9.0, 11.0),
    (11.0, 13.0),
    (13.0, 15.0),
    (15.0, 17.0),
    (17.0, 19.0),
    (19.0, 21.0),
    (21.0, 23.0),
];

// ---------------------------------------------------------------------------
// Positions
// ---------------------------------------------------------------------------

/// The four pillar slots in chart order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PillarPosition {
    Year,
    Month,
    Day,
    Hour,
}

/// All positions in chart order.
pub const ALL_POSITIONS: [PillarPosition; 4] = [
    PillarPosition::Year,
    PillarPosition::Month,
    PillarPosition::Day,
    PillarPosition::Hour,
];

impl PillarPosition {
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Year => "year",
            Self::Month => "month",
            Self::Day => "day",
            Self::Hour => "hour",
        }
    }

    /// Hanja heading (年柱 .. 時柱).
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Year => "年柱",
            Self::Month => "月柱",
            Self::Day => "日柱",
            Self::Hour => "時柱",
        }
    }
}

impl std::fmt::Display for PillarPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Raw pillars
// ---------------------------------------------------------------------------

/// Four bare stem-branch pairs, before any annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPillars {
    pub year: StemBranch,
    pub month: StemBranch,
    pub day: StemBranch,
    pub hour: StemBranch,
    /// Sexagenary month number (1 = 寅 .. 12 = 丑).
    pub month_number: u8,
    /// Year counted from 立春.
    pub solar_year: i32,
}

impl RawPillars {
    pub fn get(&self, position: PillarPosition) -> StemBranch {
        match position {
            PillarPosition::Year => self.year,
            PillarPosition::Month => self.month,
            PillarPosition::Day => self.day,
            PillarPosition::Hour => self.hour,
        }
    }

    pub fn set(&mut self, position: PillarPosition, value: StemBranch) {
        match position {
            PillarPosition::Year => self.year = value,
            PillarPosition::Month => self.month = value,
            PillarPosition::Day => self.day = value,
            PillarPosition::Hour => self.hour = value,
        }
    }

    /// Pillars in chart order.
    pub fn as_array(&self) -> [StemBranch; 4] {
        [self.year, self.month, self.day, self.hour]
    }

    pub fn stems(&self) -> [Stem; 4] {
        self.as_array().map(|p| p.stem)
    }

    pub fn branches(&self) -> [Branch; 4] {
        self.as_array().map(|p| p.branch)
    }

    pub fn labels(&self) -> [String; 4] {
        self.as_array().map(StemBranch::label)
    }
}

// ---------------------------------------------------------------------------
// Calculators
// ---------------------------------------------------------------------------

/// Year counted from 立春: January and February dates still in month 11 or
/// 12 belong to the previous year.
pub fn solar_year(date: NaiveDate, month_number: u8) -> i32 {
    if month_number >= 11 && date.month() <= 2 {
        date.year() - 1
    } else {
        date.year()
    }
}

/// Year pillar of a solar year.
pub const fn year_pillar(solar_year: i32) -> StemBranch {
    year_stem_branch(solar_year)
}

/// Sexagenary month number: the governing sectional term's month when known,
/// else the civil month's usual month.
pub fn month_number(date: NaiveDate, term: Option<&SolarTermPeriod>) -> u8 {
    term.map_or_else(|| month_number_from_civil(date.month()), |t| t.month_number())
}

/// Stem of month 1 (寅) in a year whose stem is `year_stem`.
pub const fn first_month_stem(year_stem: Stem) -> Stem {
    year_stem.offset(MONTH_STEM_OFFSET[year_stem.index() as usize] as i64)
}

/// Month pillar for `month_number` (1..=12) of a year with `year_stem`.
pub const fn month_pillar(year_stem: Stem, month_number: u8) -> StemBranch {
    let steps = month_number as i64 - 1;
    StemBranch::new(
        first_month_stem(year_stem).offset(steps),
        Branch::cyclic(month_number as i64 + 1),
    )
}

/// Day pillar from whole days since [`DAY_EPOCH`].
pub fn day_pillar(date: NaiveDate) -> StemBranch {
    let days = NaiveDate::from_ymd_opt(DAY_EPOCH.0, DAY_EPOCH.1, DAY_EPOCH.2)
        .map_or(0, |epoch| date.signed_duration_since(epoch).num_days());
    StemBranch::from_cycle_index(days + DAY_EPOCH_CYCLE_INDEX)
}

/// Branch of the two-hour window containing `hour` (fractional, `[0, 24)`).
pub fn hour_branch(hour: f64) -> Branch {
    // (23, 1] → 0, (1, 3] → 1, …, (21, 23] → 11.
    let index = ((hour - 1.0) / 2.0).ceil() as i64;
    Branch::cyclic(index)
}

/// Stem of the `branch` hour on a day with `day_stem`.
pub const fn hour_stem(day_stem: Stem, branch: Branch) -> Stem {
    Stem::cyclic(DAY_STEM_BASE_OFFSET[day_stem.index() as usize] as i64 + branch.index() as i64)
}

/// Hour pillar for a fractional hour on a day with `day_stem`.
pub fn hour_pillar(day_stem: Stem, hour: f64) -> StemBranch {
    let branch = hour_branch(hour);
    StemBranch::new(hour_stem(day_stem, branch), branch)
}

/// Derive all four pillars for a normalized date-time.
pub fn derive_pillars(at: NaiveDateTime, hour: f64, term: Option<&SolarTermPeriod>) -> RawPillars {
    let date = at.date();
    let month_number = month_number(date, term);
    let solar_year = solar_year(date, month_number);
    let year = year_pillar(solar_year);
    let month = month_pillar(year.stem, month_number);
    let day = day_pillar(date);
    let hour = hour_pillar(day.stem, hour);
    RawPillars {
        year,
        month,
        day,
        hour,
        month_number,
        solar_year,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_base::SolarTerm;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sb(label: &str) -> StemBranch {
        StemBranch::parse(label).unwrap()
    }

    #[test]
    fn epoch_day() {
        assert_eq!(day_pillar(date(1900, 1, 1)).label(), "甲戌");
        assert_eq!(day_pillar(date(1899, 12, 31)).label(), "癸酉");
    }

    #[test]
    fn known_days() {
        assert_eq!(day_pillar(date(2023, 10, 2)).label(), "癸巳");
        assert_eq!(day_pillar(date(2023, 10, 3)).label(), "甲午");
        assert_eq!(day_pillar(date(2023, 10, 1)).label(), "壬辰");
        assert_eq!(day_pillar(date(2000, 1, 1)).label(), "戊午");
    }

    #[test]
    fn known_years() {
        assert_eq!(year_pillar(1986).label(), "丙寅");
        assert_eq!(year_pillar(2023).label(), "癸卯");
        assert_eq!(year_pillar(2024).label(), "甲辰");
    }

    #[test]
    fn first_months() {
        assert_eq!(month_pillar(Stem::Gap, 1), sb("丙寅"));
        assert_eq!(month_pillar(Stem::Eul, 1), sb("戊寅"));
        assert_eq!(month_pillar(Stem::Byeong, 1), sb("庚寅"));
        assert_eq!(month_pillar(Stem::Jeong, 1), sb("壬寅"));
        assert_eq!(month_pillar(Stem::Mu, 1), sb("甲寅"));
        assert_eq!(month_pillar(Stem::Gi, 1), sb("丙寅"));
    }

    #[test]
    fn months_advance_one_step() {
        assert_eq!(month_pillar(Stem::Gye, 8), sb("辛酉"));
        assert_eq!(month_pillar(Stem::Gye, 12), sb("乙丑"));
        for m in 1..12u8 {
            assert_eq!(month_pillar(Stem::Im, m).offset(1), month_pillar(Stem::Im, m + 1));
        }
    }

    #[test]
    fn hour_windows() {
        assert_eq!(hour_branch(0.0), Branch::Ja);
        assert_eq!(hour_branch(1.0), Branch::Ja);
        assert_eq!(hour_branch(1.5), Branch::Chuk);
        assert_eq!(hour_branch(12.0), Branch::O);
        assert_eq!(hour_branch(13.0), Branch::O);
        assert_eq!(hour_branch(13.01), Branch::Mi);
        assert_eq!(hour_branch(23.0), Branch::Hae);
        assert_eq!(hour_branch(23.5), Branch::Ja);
        for (i, (start, end)) in HOUR_WINDOWS.iter().enumerate().skip(1) {
            assert_eq!(hour_branch(*end).index() as usize, i);
            assert_eq!(hour_branch(start + 0.25).index() as usize, i);
        }
    }

    #[test]
    fn hour_pillars_for_byeong_day() {
        assert_eq!(hour_pillar(Stem::Byeong, 1.0).label(), "戊子");
        assert_eq!(hour_pillar(Stem::Byeong, 5.0).label(), "庚寅");
        assert_eq!(hour_pillar(Stem::Byeong, 21.0).label(), "戊戌");
        assert_eq!(hour_pillar(Stem::Gye, 12.0).label(), "戊午");
    }

    #[test]
    fn solar_year_turns_at_spring() {
        assert_eq!(solar_year(date(2024, 1, 20), 12), 2023);
        assert_eq!(solar_year(date(2024, 1, 3), 11), 2023);
        assert_eq!(solar_year(date(2024, 2, 10), 1), 2024);
        assert_eq!(solar_year(date(2023, 12, 20), 11), 2023);
    }

    #[test]
    fn civil_fallback_months() {
        assert_eq!(month_number(date(2023, 10, 2), None), 9);
        assert_eq!(month_number(date(2023, 1, 15), None), 12);
    }

    #[test]
    fn derive_with_terms() {
        let at = date(2023, 10, 2).and_hms_opt(12, 0, 0).unwrap();
        let midnight = |d: NaiveDate| d.and_hms_opt(0, 0, 0).unwrap();
        let term = SolarTermPeriod {
            current: SolarTerm::Chubun,
            current_start: midnight(date(2023, 9, 23)),
            sectional: SolarTerm::Baengno,
            sectional_start: midnight(date(2023, 9, 8)),
            next_sectional: SolarTerm::Hallo,
            next_sectional_start: midnight(date(2023, 10, 8)),
            precision: crate::lunar::TermPrecision::Approximate,
        };
        let p = derive_pillars(at, 12.0, Some(&term));
        assert_eq!(p.labels(), ["癸卯", "辛酉", "癸巳", "戊午"].map(String::from));
        assert_eq!(p.month_number, 8);
        assert_eq!(p.solar_year, 2023);
    }

    #[test]
    fn get_and_set_follow_positions() {
        let at = date(2000, 1, 1).and_hms_opt(0, 0, 0).unwrap();
        let mut p = derive_pillars(at, 0.0, None);
        for pos in ALL_POSITIONS {
            assert_eq!(p.get(pos), p.as_array()[pos.index()]);
        }
        p.set(PillarPosition::Hour, sb("甲子"));
        assert_eq!(p.hour, sb("甲子"));
    }
}
