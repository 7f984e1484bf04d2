//! Lunar-calendar bridge.
//!
//! True new-moon and solar-term timing come from an external converter behind
//! [`LunarBridge`]. [`StubLunarBridge`] is the degraded implementation: it
//! echoes the civil date as the lunar date and places solar terms on their
//! usual civil days at 00:00.
//!
//! [`LunarService`] picks one bridge at construction. A call that fails on a
//! full bridge is answered by the stub and reported to the observer.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use saju_base::{ALL_SOLAR_TERMS, SolarTerm};
use serde::Serialize;

use crate::error::BridgeError;
use crate::observer::{PipelineEvent, PipelineObserver};

/// First civil year the stub converts.
pub const STUB_MIN_YEAR: i32 = 1900;
/// Last civil year the stub converts.
pub const STUB_MAX_YEAR: i32 = 2100;

/// A lunar-calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LunarDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub is_leap_month: bool,
    /// Produced by the degraded stub rather than a real conversion.
    pub approximate: bool,
}

/// How precisely term boundaries are known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TermPrecision {
    /// Astronomical instant.
    Exact,
    /// Usual civil day, ±1 day.
    Approximate,
}

/// The solar-term period a moment falls in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SolarTermPeriod {
    /// Most recent term, sectional or mid-month.
    pub current: SolarTerm,
    pub current_start: NaiveDateTime,
    /// Most recent sectional term; it opens the sexagenary month.
    pub sectional: SolarTerm,
    pub sectional_start: NaiveDateTime,
    pub next_sectional: SolarTerm,
    pub next_sectional_start: NaiveDateTime,
    pub precision: TermPrecision,
}

impl SolarTermPeriod {
    /// Sexagenary month number (1 = 寅 .. 12 = 丑).
    pub fn month_number(&self) -> u8 {
        self.sectional.month_number()
    }
}

/// Converter from civil date-times to lunar dates and solar terms.
pub trait LunarBridge: Send + Sync + std::fmt::Debug {
    /// Short name for diagnostics.
    fn name(&self) -> &'static str;

    /// Whether the bridge can be used in this process.
    fn is_available(&self) -> bool {
        true
    }

    fn lunar_date(&self, at: NaiveDateTime) -> Result<LunarDate, BridgeError>;

    fn solar_term(&self, at: NaiveDateTime) -> Result<SolarTermPeriod, BridgeError>;
}

// ---------------------------------------------------------------------------
// Stub
// ---------------------------------------------------------------------------

/// Degraded bridge built on approximate civil term dates.
#[derive(Debug, Clone, Copy, Default)]
pub struct StubLunarBridge;

impl StubLunarBridge {
    fn check_range(at: &NaiveDateTime) -> Result<(), BridgeError> {
        if (STUB_MIN_YEAR..=STUB_MAX_YEAR).contains(&at.year()) {
            Ok(())
        } else {
            Err(BridgeError::OutOfRange(at.date().to_string()))
        }
    }

    /// Approximate start of every term in solar years `from..=to`, sorted.
    ///
    /// A solar year starts at 立春; its 小寒 and 大寒 fall in January of the
    /// following civil year.
    fn term_starts(from: i32, to: i32) -> Vec<(NaiveDateTime, SolarTerm)> {
        let mut starts: Vec<(NaiveDateTime, SolarTerm)> = (from..=to)
            .flat_map(|solar_year| {
                ALL_SOLAR_TERMS.into_iter().filter_map(move |term| {
                    let civil_year = if term.index() >= 22 {
                        solar_year + 1
                    } else {
                        solar_year
                    };
                    let (month, day) = term.approximate_start();
                    NaiveDate::from_ymd_opt(civil_year, month, day)
                        .and_then(|d| d.and_hms_opt(0, 0, 0))
                        .map(|start| (start, term))
                })
            })
            .collect();
        starts.sort_by_key(|(start, _)| *start);
        starts
    }
}

impl LunarBridge for StubLunarBridge {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn lunar_date(&self, at: NaiveDateTime) -> Result<LunarDate, BridgeError> {
        Self::check_range(&at)?;
        Ok(LunarDate {
            year: at.year(),
            month: at.month(),
            day: at.day(),
            is_leap_month: false,
            approximate: true,
        })
    }

    fn solar_term(&self, at: NaiveDateTime) -> Result<SolarTermPeriod, BridgeError> {
        Self::check_range(&at)?;
        let starts = Self::term_starts(at.year() - 2, at.year() + 1);
        let missing = || BridgeError::Conversion(format!("no solar term around {at}"));

        let current_idx = starts
            .iter()
            .rposition(|(start, _)| *start <= at)
            .ok_or_else(missing)?;
        let (current_start, current) = starts[current_idx];
        let (sectional_start, sectional) = starts[..=current_idx]
            .iter()
            .rev()
            .find(|(_, t)| t.is_sectional())
            .copied()
            .ok_or_else(missing)?;
        let (next_sectional_start, next_sectional) = starts[current_idx + 1..]
            .iter()
            .find(|(_, t)| t.is_sectional())
            .copied()
            .ok_or_else(missing)?;

        Ok(SolarTermPeriod {
            current,
            current_start,
            sectional,
            sectional_start,
            next_sectional,
            next_sectional_start,
            precision: TermPrecision::Approximate,
        })
    }
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The bridge chosen at construction plus the stub it degrades to.
#[derive(Debug, Clone)]
pub struct LunarService {
    primary: Option<Arc<dyn LunarBridge>>,
    stub: StubLunarBridge,
}

impl Default for LunarService {
    fn default() -> Self {
        Self::stub_only()
    }
}

impl LunarService {
    /// Use `bridge` if it reports itself available, otherwise the stub.
    pub fn select(bridge: Arc<dyn LunarBridge>) -> Self {
        Self {
            primary: bridge.is_available().then_some(bridge),
            stub: StubLunarBridge,
        }
    }

    pub fn stub_only() -> Self {
        Self {
            primary: None,
            stub: StubLunarBridge,
        }
    }

    /// Name of the bridge answering calls.
    pub fn active_name(&self) -> &'static str {
        self.primary
            .as_ref()
            .map_or_else(|| self.stub.name(), |b| b.name())
    }

    pub fn lunar_date(
        &self,
        at: NaiveDateTime,
        observer: &dyn PipelineObserver,
    ) -> Result<LunarDate, BridgeError> {
        match &self.primary {
            Some(bridge) => bridge.lunar_date(at).or_else(|e| {
                observer.on_event(&PipelineEvent::BridgeFallback {
                    bridge: bridge.name(),
                    operation: "lunar_date",
                    error: e.to_string(),
                });
                self.stub.lunar_date(at)
            }),
            None => self.stub.lunar_date(at),
        }
    }

    pub fn solar_term(
        &self,
        at: NaiveDateTime,
        observer: &dyn PipelineObserver,
    ) -> Result<SolarTermPeriod, BridgeError> {
        match &self.primary {
            Some(bridge) => bridge.solar_term(at).or_else(|e| {
                observer.on_event(&PipelineEvent::BridgeFallback {
                    bridge: bridge.name(),
                    operation: "solar_term",
                    error: e.to_string(),
                });
                self.stub.solar_term(at)
            }),
            None => self.stub.solar_term(at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn stub_echoes_civil_date() {
        let d = StubLunarBridge.lunar_date(at(2023, 10, 2, 12)).unwrap();
        assert_eq!((d.year, d.month, d.day), (2023, 10, 2));
        assert!(d.approximate);
    }

    #[test]
    fn stub_range() {
        assert!(StubLunarBridge.lunar_date(at(1899, 12, 31, 0)).is_err());
        assert!(StubLunarBridge.solar_term(at(2101, 1, 1, 0)).is_err());
        assert!(StubLunarBridge.solar_term(at(1900, 1, 1, 0)).is_ok());
    }

    #[test]
    fn stub_autumn_period() {
        let p = StubLunarBridge.solar_term(at(2023, 10, 2, 12)).unwrap();
        assert_eq!(p.current, SolarTerm::Chubun);
        assert_eq!(p.sectional, SolarTerm::Baengno);
        assert_eq!(p.next_sectional, SolarTerm::Hallo);
        assert_eq!(p.month_number(), 8);
        assert_eq!(p.sectional_start, at(2023, 9, 8, 0));
        assert_eq!(p.next_sectional_start, at(2023, 10, 8, 0));
    }

    #[test]
    fn stub_early_january_is_ja_month() {
        let p = StubLunarBridge.solar_term(at(2024, 1, 2, 12)).unwrap();
        assert_eq!(p.sectional, SolarTerm::Daeseol);
        assert_eq!(p.sectional_start, at(2023, 12, 7, 0));
        assert_eq!(p.next_sectional, SolarTerm::Sohan);
        assert_eq!(p.month_number(), 11);
    }

    #[test]
    fn stub_spring_start() {
        let before = StubLunarBridge.solar_term(at(2024, 2, 3, 23)).unwrap();
        assert_eq!(before.sectional, SolarTerm::Sohan);
        let after = StubLunarBridge.solar_term(at(2024, 2, 4, 0)).unwrap();
        assert_eq!(after.sectional, SolarTerm::Ipchun);
    }

    #[derive(Debug)]
    struct Failing;

    impl LunarBridge for Failing {
        fn name(&self) -> &'static str {
            "failing"
        }
        fn lunar_date(&self, _: NaiveDateTime) -> Result<LunarDate, BridgeError> {
            Err(BridgeError::Conversion("boom".into()))
        }
        fn solar_term(&self, _: NaiveDateTime) -> Result<SolarTermPeriod, BridgeError> {
            Err(BridgeError::Conversion("boom".into()))
        }
    }

    #[derive(Debug)]
    struct Unavailable;

    impl LunarBridge for Unavailable {
        fn name(&self) -> &'static str {
            "unavailable"
        }
        fn is_available(&self) -> bool {
            false
        }
        fn lunar_date(&self, _: NaiveDateTime) -> Result<LunarDate, BridgeError> {
            Err(BridgeError::Unavailable("missing".into()))
        }
        fn solar_term(&self, _: NaiveDateTime) -> Result<SolarTermPeriod, BridgeError> {
            Err(BridgeError::Unavailable("missing".into()))
        }
    }

    #[test]
    fn failing_bridge_degrades_per_call() {
        let service = LunarService::select(Arc::new(Failing));
        assert_eq!(service.active_name(), "failing");
        let observer = RecordingObserver::default();
        let p = service.solar_term(at(2023, 10, 2, 12), &observer).unwrap();
        assert_eq!(p.precision, TermPrecision::Approximate);
        assert_eq!(observer.events().len(), 1);
    }

    #[test]
    fn unavailable_bridge_is_never_selected() {
        let service = LunarService::select(Arc::new(Unavailable));
        assert_eq!(service.active_name(), "stub");
        let observer = RecordingObserver::default();
        assert!(service.lunar_date(at(2023, 10, 2, 12), &observer).is_ok());
        assert!(observer.events().is_empty());
    }
}
