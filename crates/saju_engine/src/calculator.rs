//! The chart calculator.
//!
//! [`SajuCalculator`] runs the whole pipeline for one birth:
//!
//! 1. parse the date (today's date substitutes for garbage input)
//! 2. normalize the civil time to the reference frame
//! 3. ask the lunar bridge for the lunar date and solar-term period
//! 4. derive the raw pillars and apply boundary overrides
//! 5. run the combination transformer
//! 6. annotate relations, resolve archetype and favorable element
//! 7. lay out luck cycles when a gender is known
//!
//! `calculate` never fails: any error becomes a fallback chart and a
//! [`PipelineEvent::FallbackChart`]. `try_calculate` returns the error.

use std::sync::Arc;

use chrono::NaiveDateTime;
use saju_base::{BranchTenGodTable, CombinationKind, CombinationTransformer};
use saju_time::{
    Location, NormalizedTime, NormalizerMode, TimeNormalizer, civil_datetime, fractional_hour,
    normalizer_for, parse_birth_date_or_today,
};
use serde::Serialize;

use crate::archetype::{count_ten_gods, resolve_archetype, resolve_favorable};
use crate::boundary::{AppliedOverride, BoundaryInput, BoundaryTable};
use crate::chart_types::{ChartResult, Gender};
use crate::config::{CalculatorOptions, OptionsPatch};
use crate::error::SajuError;
use crate::luck::luck_cycles;
use crate::lunar::{LunarBridge, LunarService, SolarTermPeriod};
use crate::observer::{NoopObserver, PipelineEvent, PipelineObserver};
use crate::pillars::{RawPillars, derive_pillars};
use crate::relations::annotate_pillars;

/// Raw pillars after boundary overrides, before any annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PillarReading {
    pub pillars: RawPillars,
    pub normalized: NormalizedTime,
    pub solar_term: Option<SolarTermPeriod>,
}

/// Four Pillars calculator.
///
/// Holds the options, the normalizer built from them and the read-only
/// tables. One instance can serve many threads; changing options needs
/// `&mut self`.
#[derive(Debug)]
pub struct SajuCalculator {
    options: CalculatorOptions,
    normalizer: Box<dyn TimeNormalizer>,
    lunar: LunarService,
    boundaries: BoundaryTable,
    branch_table: BranchTenGodTable,
    transformer: CombinationTransformer,
    observer: Arc<dyn PipelineObserver>,
}

impl Default for SajuCalculator {
    fn default() -> Self {
        Self::new(CalculatorOptions::default())
    }
}

impl SajuCalculator {
    pub fn new(options: CalculatorOptions) -> Self {
        Self {
            options,
            normalizer: normalizer_for(options.mode(), options.normalizer_options()),
            lunar: LunarService::stub_only(),
            boundaries: BoundaryTable::default(),
            branch_table: BranchTenGodTable::default(),
            transformer: CombinationTransformer::new(),
            observer: Arc::new(NoopObserver),
        }
    }

    /// Use `bridge` for lunar data when it reports itself available.
    pub fn with_bridge(mut self, bridge: Arc<dyn LunarBridge>) -> Self {
        self.lunar = LunarService::select(bridge);
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PipelineObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn with_boundary_table(mut self, table: BoundaryTable) -> Self {
        self.boundaries = table;
        self
    }

    pub fn with_branch_table(mut self, table: BranchTenGodTable) -> Self {
        self.branch_table = table;
        self
    }

    pub fn options(&self) -> &CalculatorOptions {
        &self.options
    }

    /// Replace the options and rebuild the normalizer.
    pub fn set_options(&mut self, options: CalculatorOptions) {
        self.options = options;
        self.normalizer = normalizer_for(options.mode(), options.normalizer_options());
    }

    /// Apply a partial update; returns the options now in effect.
    pub fn apply_patch(&mut self, patch: &OptionsPatch) -> CalculatorOptions {
        let mut options = self.options;
        options.apply(patch);
        self.set_options(options);
        options
    }

    pub fn normalizer_mode(&self) -> NormalizerMode {
        self.normalizer.mode()
    }

    pub fn lunar_bridge_name(&self) -> &'static str {
        self.lunar.active_name()
    }

    pub fn boundary_table(&self) -> &BoundaryTable {
        &self.boundaries
    }

    fn emit(&self, event: PipelineEvent) {
        self.observer.on_event(&event);
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Compute a chart. Errors produce [`ChartResult::fallback`].
    pub fn calculate(
        &self,
        birth_date: &str,
        birth_hour: f64,
        gender: Option<Gender>,
        location: Option<&Location>,
    ) -> ChartResult {
        self.try_calculate(birth_date, birth_hour, gender, location)
            .unwrap_or_else(|e| self.fallback(e, gender))
    }

    /// Compute a chart, returning pipeline errors to the caller.
    pub fn try_calculate(
        &self,
        birth_date: &str,
        birth_hour: f64,
        gender: Option<Gender>,
        location: Option<&Location>,
    ) -> Result<ChartResult, SajuError> {
        let parsed = parse_birth_date_or_today(birth_date);
        if parsed.substituted {
            self.emit(PipelineEvent::DateSubstituted {
                input: birth_date.to_string(),
                substituted: parsed.date,
            });
        }
        let civil = civil_datetime(parsed.date, birth_hour)?;
        let mut chart = self.try_calculate_at(civil, gender, location)?;
        chart.date_substituted = parsed.substituted;
        Ok(chart)
    }

    /// Compute a chart from an already combined civil date-time.
    pub fn calculate_at(
        &self,
        civil: NaiveDateTime,
        gender: Option<Gender>,
        location: Option<&Location>,
    ) -> ChartResult {
        self.try_calculate_at(civil, gender, location)
            .unwrap_or_else(|e| self.fallback(e, gender))
    }

    pub fn try_calculate_at(
        &self,
        civil: NaiveDateTime,
        gender: Option<Gender>,
        location: Option<&Location>,
    ) -> Result<ChartResult, SajuError> {
        let normalized = self.normalize(civil, location)?;
        let adjusted = normalized.adjusted;

        let lunar_date = match self.lunar.lunar_date(adjusted, self.observer.as_ref()) {
            Ok(date) => Some(date),
            Err(e) => {
                self.emit(PipelineEvent::LunarUnavailable {
                    error: e.to_string(),
                });
                None
            }
        };
        let solar_term = self.solar_term(adjusted);

        let (raw, boundary_overrides) =
            self.corrected_pillars(civil, &normalized, solar_term.as_ref(), location);

        let outcome = self.transformer.transform(raw.stems(), raw.branches());
        for record in outcome.applied() {
            self.emit(PipelineEvent::CombinationApplied {
                kind: match record.kind {
                    CombinationKind::Stem => "stem",
                    CombinationKind::Branch => "branch",
                },
                left: record.left,
                element: record.element.name(),
            });
        }

        let pillars = annotate_pillars(&self.branch_table, &raw, &outcome);
        let counts = count_ten_gods(&pillars);
        let archetype = resolve_archetype(&pillars, &counts);
        self.emit(PipelineEvent::ArchetypeResolved {
            archetype: archetype.archetype_type.base_name(),
            strength: archetype.strength.name(),
            score: archetype.score,
        });
        let day_master = pillars.day_master();
        let favorable = resolve_favorable(&archetype, &counts, day_master);
        let luck = luck_cycles(
            adjusted,
            &pillars,
            gender,
            solar_term.as_ref(),
            &self.branch_table,
        );

        Ok(ChartResult {
            pillars,
            day_master: Some(day_master),
            archetype,
            favorable,
            counts,
            lunar_date,
            solar_term,
            adjustment: Some(normalized.adjustment),
            adjusted_datetime: Some(adjusted),
            gender,
            luck,
            boundary_overrides,
            combinations: outcome.records,
            date_substituted: false,
            fallback: false,
        })
    }

    /// Pillars only: normalization, derivation and boundary overrides.
    pub fn read_pillars(
        &self,
        civil: NaiveDateTime,
        location: Option<&Location>,
    ) -> Result<PillarReading, SajuError> {
        let normalized = self.normalize(civil, location)?;
        let solar_term = self.solar_term(normalized.adjusted);
        let (pillars, _) =
            self.corrected_pillars(civil, &normalized, solar_term.as_ref(), location);
        Ok(PillarReading {
            pillars,
            normalized,
            solar_term,
        })
    }

    /// Normalize without computing a chart.
    pub fn normalize(
        &self,
        civil: NaiveDateTime,
        location: Option<&Location>,
    ) -> Result<NormalizedTime, SajuError> {
        let normalized = self.normalizer.normalize(civil, location)?;
        self.emit(PipelineEvent::Normalized {
            original: normalized.original,
            adjusted: normalized.adjusted,
            timezone: normalized.adjustment.timezone.clone(),
            total_seconds: normalized.adjustment.total_seconds,
        });
        Ok(normalized)
    }

    // -----------------------------------------------------------------------
    // Stages
    // -----------------------------------------------------------------------

    fn solar_term(&self, adjusted: NaiveDateTime) -> Option<SolarTermPeriod> {
        match self.lunar.solar_term(adjusted, self.observer.as_ref()) {
            Ok(term) => Some(term),
            Err(e) => {
                self.emit(PipelineEvent::LunarUnavailable {
                    error: e.to_string(),
                });
                None
            }
        }
    }

    fn corrected_pillars(
        &self,
        civil: NaiveDateTime,
        normalized: &NormalizedTime,
        term: Option<&SolarTermPeriod>,
        location: Option<&Location>,
    ) -> (RawPillars, Vec<AppliedOverride>) {
        let adjusted = normalized.adjusted;
        let hour = fractional_hour(&adjusted);
        let mut raw = derive_pillars(adjusted, hour, term);
        self.emit(PipelineEvent::PillarsDerived {
            labels: raw.labels(),
        });

        let place = normalized
            .adjustment
            .place
            .as_deref()
            .or_else(|| location.and_then(Location::name));
        let input = BoundaryInput {
            civil,
            adjusted,
            hour,
            place,
        };
        let overrides = self.boundaries.apply(&input, &mut raw);
        for o in &overrides {
            self.emit(PipelineEvent::BoundaryOverride {
                rule: o.rule.name(),
                position: o.position.name(),
                before: o.before.label(),
                after: o.after.label(),
            });
        }
        (raw, overrides)
    }

    fn fallback(&self, error: SajuError, gender: Option<Gender>) -> ChartResult {
        self.emit(PipelineEvent::FallbackChart {
            error: error.to_string(),
        });
        ChartResult::fallback(gender)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::RecordingObserver;

    fn quiet() -> SajuCalculator {
        SajuCalculator::new(CalculatorOptions::disabled())
    }

    #[test]
    fn calculator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SajuCalculator>();
    }

    #[test]
    fn international_toggle_swaps_normalizer() {
        let mut calc = quiet();
        assert_eq!(calc.normalizer_mode(), NormalizerMode::Domestic);
        let options = calc.apply_patch(&OptionsPatch {
            use_international_mode: Some(true),
            ..OptionsPatch::default()
        });
        assert!(options.use_international_mode);
        assert_eq!(calc.normalizer_mode(), NormalizerMode::International);
        calc.set_options(CalculatorOptions::disabled());
        assert_eq!(calc.normalizer_mode(), NormalizerMode::Domestic);
    }

    #[test]
    fn golden_pillars() {
        let chart = quiet().calculate("2023-10-02", 12.0, None, None);
        assert!(!chart.fallback);
        assert_eq!(chart.pillars.labels(), ["癸卯", "辛酉", "癸巳", "戊午"]);
        assert!(chart.luck.is_none());
    }

    #[test]
    fn invalid_hour_falls_back() {
        let recorder = Arc::new(RecordingObserver::default());
        let calc = quiet().with_observer(recorder.clone());
        let chart = calc.calculate("2023-10-02", 25.0, Some(Gender::Male), None);
        assert!(chart.fallback);
        assert_eq!(chart.gender, Some(Gender::Male));
        assert!(calc.try_calculate("2023-10-02", 25.0, None, None).is_err());
        assert!(
            recorder
                .events()
                .iter()
                .any(|e| matches!(e, PipelineEvent::FallbackChart { .. }))
        );
    }

    #[test]
    fn read_pillars_skips_annotation() {
        let civil = chrono::NaiveDate::from_ymd_opt(2023, 10, 2)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let reading = quiet().read_pillars(civil, None).unwrap();
        assert_eq!(reading.pillars.labels(), ["癸卯", "辛酉", "癸巳", "戊午"]);
        assert_eq!(reading.normalized.adjusted, civil);
        assert!(reading.solar_term.is_some());
    }
}
