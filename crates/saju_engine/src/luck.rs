//! Ten-year luck cycles (大運).
//!
//! Cycles step forward from the month pillar for a yang year stem and male
//! gender or a yin year stem and female gender, backward otherwise. The first
//! cycle starts at the number of days between birth and the next (forward)
//! or previous (backward) sectional term divided by three.

use chrono::NaiveDateTime;
use saju_base::{BranchTenGodTable, Polarity, Stem, StemBranch, TenGod, stem_ten_god};
use serde::Serialize;

use crate::chart_types::{FourPillars, Gender};
use crate::lunar::SolarTermPeriod;

/// Number of cycles produced.
pub const LUCK_CYCLE_COUNT: usize = 8;
/// Years covered by one cycle.
pub const LUCK_CYCLE_YEARS: u32 = 10;
/// Days of birth offset per year of start age.
pub const DAYS_PER_YEAR: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LuckDirection {
    Forward,
    Backward,
}

impl LuckDirection {
    pub const fn step(self) -> i64 {
        match self {
            Self::Forward => 1,
            Self::Backward => -1,
        }
    }
}

/// One ten-year cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckCycle {
    /// 1-based position.
    pub order: u8,
    pub start_age: u32,
    pub end_age: u32,
    pub pillar: StemBranch,
    pub label: String,
    pub stem_ten_god: TenGod,
    pub branch_ten_god: TenGod,
}

/// All cycles of a chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LuckCycles {
    pub direction: LuckDirection,
    pub start_age: u32,
    pub cycles: Vec<LuckCycle>,
}

pub const fn luck_direction(year_stem: Stem, gender: Gender) -> LuckDirection {
    match (year_stem.polarity(), gender) {
        (Polarity::Yang, Gender::Male) | (Polarity::Yin, Gender::Female) => LuckDirection::Forward,
        _ => LuckDirection::Backward,
    }
}

/// Age at which the first cycle starts; at least 1.
pub fn start_age(birth: NaiveDateTime, term: &SolarTermPeriod, direction: LuckDirection) -> u32 {
    let span = match direction {
        LuckDirection::Forward => term.next_sectional_start - birth,
        LuckDirection::Backward => birth - term.sectional_start,
    };
    let days = span.num_seconds().max(0) as f64 / 86_400.0;
    ((days / DAYS_PER_YEAR).round() as u32).max(1)
}

/// Luck cycles for a chart; `None` without a gender or solar-term data.
pub fn luck_cycles(
    birth: NaiveDateTime,
    pillars: &FourPillars,
    gender: Option<Gender>,
    term: Option<&SolarTermPeriod>,
    table: &BranchTenGodTable,
) -> Option<LuckCycles> {
    let gender = gender?;
    let term = term?;
    let year_stem = pillars.year.original_stem.unwrap_or(pillars.year.stem);
    let direction = luck_direction(year_stem, gender);
    let first_age = start_age(birth, term, direction);
    let month = StemBranch::new(
        pillars.month.original_stem.unwrap_or(pillars.month.stem),
        pillars.month.branch,
    );
    let day_master = pillars.day_master();
    let cycles = (1..=LUCK_CYCLE_COUNT as u8)
        .map(|order| {
            let pillar = month.offset(direction.step() * i64::from(order));
            let start = first_age + LUCK_CYCLE_YEARS * u32::from(order - 1);
            LuckCycle {
                order,
                start_age: start,
                end_age: start + LUCK_CYCLE_YEARS - 1,
                pillar,
                label: pillar.label(),
                stem_ten_god: stem_ten_god(day_master, pillar.stem),
                branch_ten_god: table.relation(day_master, pillar.branch),
            }
        })
        .collect();
    Some(LuckCycles {
        direction,
        start_age: first_age,
        cycles,
    })
}
