//! End-to-end chart tests through the calculator.

use std::sync::Arc;

use chrono::NaiveDate;
use saju_base::{Element, Stem, TenGod};
use saju_engine::{
    ArchetypeType, BoundaryRule, CalculatorOptions, Gender, LuckDirection, OptionsPatch,
    PillarPosition, PipelineEvent, RecordingObserver, SajuCalculator, Strength, UNKNOWN_LABEL,
};
use saju_time::{Location, NormalizerMode};

fn quiet() -> SajuCalculator {
    SajuCalculator::new(CalculatorOptions::disabled())
}

// ---------------------------------------------------------------------------
// Golden chart
// ---------------------------------------------------------------------------

#[test]
fn golden_chart() {
    let chart = quiet().calculate("2023-10-02", 12.0, None, None);
    assert!(!chart.fallback);
    assert_eq!(chart.pillars.labels(), ["癸卯", "辛酉", "癸巳", "戊午"]);
    assert_eq!(chart.day_master, Some(Stem::Gye));
    assert_eq!(chart.archetype.archetype_type, ArchetypeType::Pyeonin);
    assert_eq!(chart.archetype.strength, Strength::Weak);
    assert_eq!(chart.archetype.score, 44.0);
    assert_eq!(chart.favorable.element(), Some(Element::Water));
    assert_eq!(chart.favorable_element_label(), "Water");
    assert_eq!(chart.favorable.primary.map(|p| p.ten_god), Some(TenGod::Bigyeon));
    assert!(chart.boundary_overrides.is_empty());
    assert!(chart.combinations.iter().all(|c| !c.applied()));
}

#[test]
fn golden_chart_in_seoul_keeps_pillars() {
    let seoul = Location::named("Seoul");
    let chart = SajuCalculator::default().calculate("2023-10-02", 12.0, None, Some(&seoul));
    let adj = chart.adjustment.as_ref().unwrap();
    assert_eq!(adj.timezone, "Asia/Seoul");
    assert_eq!(adj.place.as_deref(), Some("Seoul"));
    assert_eq!(adj.total_seconds, -32 * 60);
    assert_eq!(
        chart.adjusted_datetime,
        NaiveDate::from_ymd_opt(2023, 10, 2).and_then(|d| d.and_hms_opt(11, 28, 0))
    );
    assert_eq!(chart.pillars.labels(), ["癸卯", "辛酉", "癸巳", "戊午"]);
}

#[test]
fn golden_luck_cycles() {
    let chart = quiet().calculate("2023-10-02", 12.0, Some(Gender::Male), None);
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Backward);
    assert_eq!(luck.start_age, 8);
    assert_eq!(luck.cycles[0].label, "庚申");

    let chart = quiet().calculate("2023-10-02", 12.0, Some(Gender::Female), None);
    let luck = chart.luck.unwrap();
    assert_eq!(luck.direction, LuckDirection::Forward);
    assert_eq!(luck.cycles[0].label, "壬戌");
}

#[test]
fn identical_inputs_give_identical_json() {
    let calc = SajuCalculator::default();
    let busan = Location::named("Busan");
    let a = calc.calculate("1990-05-15", 14.5, Some(Gender::Female), Some(&busan));
    let b = calc.calculate("1990-05-15", 14.5, Some(Gender::Female), Some(&busan));
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}

// ---------------------------------------------------------------------------
// Degradation
// ---------------------------------------------------------------------------

#[test]
fn invalid_hour_gives_fallback_chart() {
    let chart = quiet().calculate("2023-10-02", 25.0, None, None);
    assert!(chart.fallback);
    assert_eq!(chart.pillars.labels(), ["甲子"; 4]);
    assert_eq!(chart.archetype.archetype_type, ArchetypeType::Unknown);
    assert_eq!(chart.favorable_element_label(), UNKNOWN_LABEL);
    assert!(chart.day_master.is_none());
}

#[test]
fn unknown_timezone_gives_fallback_chart() {
    let location = Location::Detailed {
        latitude: 0.0,
        longitude: 0.0,
        timezone: "Mars/Olympus".to_string(),
        name: None,
    };
    let calc = SajuCalculator::default();
    assert!(calc.calculate("2023-10-02", 12.0, None, Some(&location)).fallback);
    assert!(calc.try_calculate("2023-10-02", 12.0, None, Some(&location)).is_err());
}

#[test]
fn out_of_range_longitude_gives_fallback_chart() {
    let calc = SajuCalculator::default();
    let far = Location::coordinates(37.5, 1.0e17);
    assert!(calc.calculate("2023-10-02", 12.0, None, Some(&far)).fallback);
    assert!(calc.try_calculate("2023-10-02", 12.0, None, Some(&far)).is_err());

    let nan = Location::Detailed {
        latitude: 37.5,
        longitude: f64::NAN,
        timezone: "Asia/Seoul".to_string(),
        name: None,
    };
    assert!(calc.calculate("2023-10-02", 12.0, None, Some(&nan)).fallback);
}

#[test]
fn out_of_range_meridian_gives_fallback_chart() {
    let patch = OptionsPatch::from_json(r#"{"referenceStandardMeridian": 1e300}"#).unwrap();
    let mut calc = SajuCalculator::default();
    calc.apply_patch(&patch);
    assert!(calc.calculate("2023-10-02", 12.0, None, None).fallback);
}

#[test]
fn unparseable_date_substitutes_today() {
    let recorder = Arc::new(RecordingObserver::default());
    let calc = quiet().with_observer(recorder.clone());
    let chart = calc.calculate("someday", 9.0, None, None);
    assert!(chart.date_substituted);
    assert!(!chart.fallback);
    assert!(
        recorder
            .events()
            .iter()
            .any(|e| matches!(e, PipelineEvent::DateSubstituted { input, .. } if input == "someday"))
    );
}

// ---------------------------------------------------------------------------
// Boundaries
// ---------------------------------------------------------------------------

#[test]
fn midday_half_hour_on_byeong_day() {
    let calc = quiet();
    let civil = NaiveDate::from_ymd_opt(2023, 10, 5)
        .unwrap()
        .and_hms_opt(13, 0, 0)
        .unwrap();
    let reading = calc.read_pillars(civil, None).unwrap();
    assert_eq!(reading.pillars.day.stem, Stem::Byeong);
    assert_eq!(reading.pillars.hour.label(), "甲未");

    let chart = calc.calculate_at(civil, None, None);
    assert!(chart.boundary_overrides.iter().any(|o| {
        o.rule == BoundaryRule::MiddayWindow
            && o.position == PillarPosition::Hour
            && o.after.label() == "甲未"
    }));
}

#[test]
fn spring_start_before_boundary_keeps_old_year() {
    let civil = NaiveDate::from_ymd_opt(2024, 2, 4)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    let reading = quiet().read_pillars(civil, None).unwrap();
    assert_eq!(reading.pillars.year.label(), "癸卯");
    assert_eq!(reading.pillars.month.label(), "乙丑");
    assert_eq!(reading.pillars.solar_year, 2023);
}

#[test]
fn new_years_day_uses_previous_year() {
    let reading = quiet()
        .read_pillars(
            NaiveDate::from_ymd_opt(2024, 1, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            None,
        )
        .unwrap();
    assert_eq!(reading.pillars.year.label(), "癸卯");
    assert_eq!(reading.pillars.month.label(), "甲子");
}

// ---------------------------------------------------------------------------
// Configuration and observation
// ---------------------------------------------------------------------------

#[test]
fn options_patch_swaps_normalizer() {
    let mut calc = SajuCalculator::default();
    let patch = OptionsPatch::from_json(r#"{"useInternationalMode": true}"#).unwrap();
    let options = calc.apply_patch(&patch);
    assert!(options.use_international_mode);
    assert_eq!(calc.normalizer_mode(), NormalizerMode::International);
    assert!(calc.options().use_dst);
}

#[test]
fn observer_sees_every_stage() {
    let recorder = Arc::new(RecordingObserver::default());
    let calc = quiet().with_observer(recorder.clone());
    calc.calculate("2023-10-02", 12.0, None, None);
    let events = recorder.events();
    assert!(matches!(events[0], PipelineEvent::Normalized { total_seconds: 0, .. }));
    assert!(events.iter().any(|e| matches!(
        e,
        PipelineEvent::PillarsDerived { labels } if labels[2] == "癸巳"
    )));
    assert!(events.iter().any(|e| matches!(
        e,
        PipelineEvent::ArchetypeResolved { archetype: "偏印", strength: "weak", .. }
    )));
    assert!(!events.iter().any(PipelineEvent::is_degradation));
}

#[test]
fn bridge_name_defaults_to_stub() {
    assert_eq!(quiet().lunar_bridge_name(), "stub");
}
