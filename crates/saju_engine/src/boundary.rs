//! Boundary-case overrides.
//!
//! Three documented cases replace derived pillars with literal table values:
//!
//! - start of spring (立春): on listed dates the year and month pillars
//!   depend on whether the civil birth time is before the recorded boundary
//!   instant; a row for the birth place wins over the generic row
//! - 1 January: year and month are the previous solar year's 子 month
//! - disputed half-hours: [13:00, 13:30) becomes 未 and [23:00, 23:30)
//!   becomes 子, with the stem taken from the alternate stem tables
//!
//! Overrides run on the raw pillars, before combinations.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use saju_base::{Branch, Stem, StemBranch};
use serde::{Deserialize, Serialize};

use crate::boundary_data::{
    MIDDAY_WINDOW_STEMS, MIDNIGHT_WINDOW_STEMS, SPRING_START_ENTRIES, SpringEntry,
};
use crate::error::SajuError;
use crate::pillars::{PillarPosition, RawPillars, month_pillar, year_pillar};

/// Disputed half-hour after 13:00, `[start, end)`.
pub const MIDDAY_WINDOW: (f64, f64) = (13.0, 13.5);
/// Disputed half-hour after 23:00, `[start, end)`.
pub const MIDNIGHT_WINDOW: (f64, f64) = (23.0, 23.5);

/// Which boundary case fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BoundaryRule {
    SpringStart,
    NewYearsDay,
    MiddayWindow,
    MidnightWindow,
}

impl BoundaryRule {
    pub const fn name(self) -> &'static str {
        match self {
            Self::SpringStart => "spring-start",
            Self::NewYearsDay => "new-years-day",
            Self::MiddayWindow => "midday-window",
            Self::MidnightWindow => "midnight-window",
        }
    }
}

/// One pillar replaced by an override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AppliedOverride {
    pub rule: BoundaryRule,
    pub position: PillarPosition,
    pub before: StemBranch,
    pub after: StemBranch,
}

/// A 立春 row: pillars on either side of the boundary instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpringBoundaryRow {
    pub date: NaiveDate,
    /// Local clock time of the boundary.
    pub boundary: NaiveTime,
    /// Place the row is specific to; `None` for the generic row.
    pub place: Option<String>,
    pub before_year: StemBranch,
    pub before_month: StemBranch,
    pub after_year: StemBranch,
    pub after_month: StemBranch,
}

impl SpringBoundaryRow {
    fn from_entry(entry: &SpringEntry) -> Option<Self> {
        let (y, m, d) = entry.date;
        let (h, min) = entry.time;
        Some(Self {
            date: NaiveDate::from_ymd_opt(y, m, d)?,
            boundary: NaiveTime::from_hms_opt(h, min, 0)?,
            place: entry.place.map(str::to_string),
            before_year: entry.before[0],
            before_month: entry.before[1],
            after_year: entry.after[0],
            after_month: entry.after[1],
        })
    }

    fn matches_place(&self, place: &str) -> bool {
        self.place
            .as_deref()
            .is_some_and(|p| p.trim().eq_ignore_ascii_case(place.trim()))
    }
}

/// JSON shape of a 立春 row.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpringBoundaryRecord {
    date: String,
    time: String,
    #[serde(default)]
    place: Option<String>,
    before_year: String,
    before_month: String,
    after_year: String,
    after_month: String,
}

impl TryFrom<SpringBoundaryRecord> for SpringBoundaryRow {
    type Error = SajuError;

    fn try_from(r: SpringBoundaryRecord) -> Result<Self, SajuError> {
        let label = |s: &str| {
            StemBranch::parse(s).ok_or_else(|| SajuError::Table(format!("unknown pillar {s}")))
        };
        Ok(Self {
            date: NaiveDate::parse_from_str(r.date.trim(), "%Y-%m-%d")
                .map_err(|e| SajuError::Table(format!("{}: {e}", r.date)))?,
            boundary: NaiveTime::parse_from_str(r.time.trim(), "%H:%M")
                .map_err(|e| SajuError::Table(format!("{}: {e}", r.time)))?,
            before_year: label(&r.before_year)?,
            before_month: label(&r.before_month)?,
            after_year: label(&r.after_year)?,
            after_month: label(&r.after_month)?,
            place: r.place,
        })
    }
}

/// What the override step looks at besides the pillars.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryInput<'a> {
    /// Civil birth time before normalization.
    pub civil: NaiveDateTime,
    /// Normalized time the pillars were derived from.
    pub adjusted: NaiveDateTime,
    /// Fractional hour of `adjusted`.
    pub hour: f64,
    pub place: Option<&'a str>,
}

/// The literal override tables.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryTable {
    spring: Vec<SpringBoundaryRow>,
    midday_stems: [Stem; 10],
    midnight_stems: [Stem; 10],
}

impl Default for BoundaryTable {
    fn default() -> Self {
        Self {
            spring: SPRING_START_ENTRIES
                .iter()
                .filter_map(SpringBoundaryRow::from_entry)
                .collect(),
            midday_stems: MIDDAY_WINDOW_STEMS,
            midnight_stems: MIDNIGHT_WINDOW_STEMS,
        }
    }
}

impl BoundaryTable {
    /// Parse a JSON array of 立春 rows (`date`, `time`, `place`, `beforeYear`,
    /// `beforeMonth`, `afterYear`, `afterMonth`). The half-hour stem tables
    /// keep their embedded values.
    pub fn from_json(json: &str) -> Result<Self, SajuError> {
        let records: Vec<SpringBoundaryRecord> =
            serde_json::from_str(json).map_err(|e| SajuError::Table(e.to_string()))?;
        let spring = records
            .into_iter()
            .map(SpringBoundaryRow::try_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            spring,
            ..Self::default()
        })
    }

    pub fn spring_rows(&self) -> &[SpringBoundaryRow] {
        &self.spring
    }

    /// Add a 立春 row.
    pub fn push_spring_row(&mut self, row: SpringBoundaryRow) {
        self.spring.push(row);
    }

    /// The 立春 row for `date`: the row for `place` if present, else the
    /// generic row.
    pub fn spring_row(&self, date: NaiveDate, place: Option<&str>) -> Option<&SpringBoundaryRow> {
        let mut on_date = self.spring.iter().filter(|r| r.date == date);
        let specific = place.and_then(|p| on_date.clone().find(|r| r.matches_place(p)));
        specific.or_else(|| on_date.find(|r| r.place.is_none()))
    }

    /// Alternate hour stem for a disputed half-hour, with its branch.
    pub fn half_hour_pillar(&self, day_stem: Stem, hour: f64) -> Option<(BoundaryRule, StemBranch)> {
        let idx = day_stem.index() as usize;
        if (MIDDAY_WINDOW.0..MIDDAY_WINDOW.1).contains(&hour) {
            Some((
                BoundaryRule::MiddayWindow,
                StemBranch::new(self.midday_stems[idx], Branch::Mi),
            ))
        } else if (MIDNIGHT_WINDOW.0..MIDNIGHT_WINDOW.1).contains(&hour) {
            Some((
                BoundaryRule::MidnightWindow,
                StemBranch::new(self.midnight_stems[idx], Branch::Ja),
            ))
        } else {
            None
        }
    }

    /// Apply every matching case to `pillars`, returning what changed.
    pub fn apply(&self, input: &BoundaryInput<'_>, pillars: &mut RawPillars) -> Vec<AppliedOverride> {
        let mut applied = Vec::new();
        let mut replace = |rule, position, value: StemBranch, pillars: &mut RawPillars| {
            let before = pillars.get(position);
            if before != value {
                pillars.set(position, value);
                applied.push(AppliedOverride {
                    rule,
                    position,
                    before,
                    after: value,
                });
            }
        };

        let civil_date = input.civil.date();
        if let Some(row) = self.spring_row(civil_date, input.place) {
            let before = input.civil.time() < row.boundary;
            let (year, month) = if before {
                (row.before_year, row.before_month)
            } else {
                (row.after_year, row.after_month)
            };
            replace(BoundaryRule::SpringStart, PillarPosition::Year, year, pillars);
            replace(BoundaryRule::SpringStart, PillarPosition::Month, month, pillars);
            if before {
                pillars.month_number = 12;
                pillars.solar_year = civil_date.year() - 1;
            } else {
                pillars.month_number = 1;
                pillars.solar_year = civil_date.year();
            }
        }

        let date = input.adjusted.date();
        if date.month() == 1 && date.day() == 1 {
            let solar_year = date.year() - 1;
            let year = year_pillar(solar_year);
            replace(BoundaryRule::NewYearsDay, PillarPosition::Year, year, pillars);
            replace(
                BoundaryRule::NewYearsDay,
                PillarPosition::Month,
                month_pillar(year.stem, 11),
                pillars,
            );
            pillars.month_number = 11;
            pillars.solar_year = solar_year;
        }

        if let Some((rule, hour)) = self.half_hour_pillar(pillars.day.stem, input.hour) {
            replace(rule, PillarPosition::Hour, hour, pillars);
        }

        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pillars::derive_pillars;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    fn input(dt: NaiveDateTime, place: Option<&str>) -> BoundaryInput<'_> {
        BoundaryInput {
            civil: dt,
            adjusted: dt,
            hour: saju_time::fractional_hour(&dt),
            place,
        }
    }

    #[test]
    fn embedded_rows_load() {
        let table = BoundaryTable::default();
        assert_eq!(table.spring_rows().len(), SPRING_START_ENTRIES.len());
    }

    #[test]
    fn spring_row_before_boundary() {
        let table = BoundaryTable::default();
        let dt = at(2024, 2, 4, 10, 0);
        let mut p = derive_pillars(dt, 10.0, None);
        let applied = table.apply(&input(dt, None), &mut p);
        assert_eq!(p.year.label(), "癸卯");
        assert_eq!(p.month.label(), "乙丑");
        assert_eq!(p.month_number, 12);
        assert_eq!(p.solar_year, 2023);
        assert!(applied.iter().all(|a| a.rule == BoundaryRule::SpringStart));
    }

    #[test]
    fn spring_row_after_boundary() {
        let table = BoundaryTable::default();
        let dt = at(2024, 2, 4, 18, 0);
        let mut p = derive_pillars(dt, 18.0, None);
        table.apply(&input(dt, None), &mut p);
        assert_eq!(p.year.label(), "甲辰");
        assert_eq!(p.month.label(), "丙寅");
    }

    #[test]
    fn place_row_wins() {
        let table = BoundaryTable::default();
        let dt = at(2024, 2, 4, 5, 0);
        let mut seoul = derive_pillars(dt, 5.0, None);
        table.apply(&input(dt, None), &mut seoul);
        assert_eq!(seoul.year.label(), "癸卯");
        let mut ny = derive_pillars(dt, 5.0, None);
        table.apply(&input(dt, Some("new york")), &mut ny);
        assert_eq!(ny.year.label(), "甲辰");
        assert_eq!(
            table
                .spring_row(dt.date(), Some("Busan"))
                .and_then(|r| r.place.clone()),
            None
        );
    }

    #[test]
    fn new_years_day_takes_previous_ja_month() {
        let table = BoundaryTable::default();
        let dt = at(2024, 1, 1, 9, 0);
        let mut p = derive_pillars(dt, 9.0, None);
        let applied = table.apply(&input(dt, None), &mut p);
        assert_eq!(p.year.label(), "癸卯");
        assert_eq!(p.month.label(), "甲子");
        assert_eq!(p.month_number, 11);
        assert!(
            applied
                .iter()
                .any(|a| a.rule == BoundaryRule::NewYearsDay && a.position == PillarPosition::Month)
        );
    }

    #[test]
    fn midday_half_hour() {
        let table = BoundaryTable::default();
        assert_eq!(
            table.half_hour_pillar(Stem::Byeong, 13.0),
            Some((BoundaryRule::MiddayWindow, StemBranch::parse("甲未").unwrap()))
        );
        assert_eq!(table.half_hour_pillar(Stem::Byeong, 13.5), None);
        assert_eq!(table.half_hour_pillar(Stem::Byeong, 12.99), None);
    }

    #[test]
    fn midnight_half_hour() {
        let table = BoundaryTable::default();
        let (rule, p) = table.half_hour_pillar(Stem::Gap, 23.25).unwrap();
        assert_eq!(rule, BoundaryRule::MidnightWindow);
        assert_eq!(p.label(), "乙子");
    }

    #[test]
    fn ordinary_dates_pass_through() {
        let table = BoundaryTable::default();
        let dt = at(2023, 10, 2, 12, 0);
        let mut p = derive_pillars(dt, 12.0, None);
        let before = p;
        assert!(table.apply(&input(dt, None), &mut p).is_empty());
        assert_eq!(p, before);
    }

    #[test]
    fn rows_from_json() {
        let json = r#"[
            {"date": "2030-02-04", "time": "04:08", "beforeYear": "己酉",
             "beforeMonth": "丁丑", "afterYear": "庚戌", "afterMonth": "戊寅"}
        ]"#;
        let table = BoundaryTable::from_json(json).unwrap();
        assert_eq!(table.spring_rows().len(), 1);
        let dt = at(2030, 2, 4, 3, 0);
        let mut p = derive_pillars(dt, 3.0, None);
        table.apply(&input(dt, None), &mut p);
        assert_eq!(p.year.label(), "己酉");
    }

    #[test]
    fn bad_json_rows_are_rejected() {
        assert!(BoundaryTable::from_json("{").is_err());
        let bad_label = r#"[{"date": "2030-02-04", "time": "04:08", "beforeYear": "XX",
            "beforeMonth": "丁丑", "afterYear": "庚戌", "afterMonth": "戊寅"}]"#;
        assert!(matches!(
            BoundaryTable::from_json(bad_label),
            Err(SajuError::Table(_))
        ));
    }
}
