//! Four Pillars (四柱) chart pipeline.
//!
//! This crate provides:
//! - Pillar derivation from a normalized birth time and solar-term period
//! - Boundary overrides for 立春, New Year's Day and the disputed half-hours
//! - Relational annotation (Ten Gods, hidden stems, fortunes, spirit killers)
//! - Archetype (格局) and favorable-element resolution
//! - Ten-year luck cycles
//! - The [`SajuCalculator`] façade, its options and observer hook

pub mod archetype;
mod archetype_data;
pub mod boundary;
mod boundary_data;
pub mod calculator;
pub mod chart_types;
pub mod config;
pub mod error;
pub mod luck;
pub mod lunar;
pub mod observer;
pub mod pillars;
pub mod relations;
pub mod render;

pub use archetype::{
    TenGodCounts, count_ten_gods, favorable_group, guardians, resolve_archetype,
    resolve_favorable, strength_for, strength_score,
};
pub use boundary::{
    AppliedOverride, BoundaryInput, BoundaryRule, BoundaryTable, MIDDAY_WINDOW, MIDNIGHT_WINDOW,
    SpringBoundaryRow,
};
pub use calculator::{PillarReading, SajuCalculator};
pub use chart_types::{
    Archetype, ArchetypeCategory, ArchetypeType, ChartResult, FavorableElement, FourPillars,
    Gender, HiddenStem, Pillar, ResolvedGod, Strength, UNKNOWN_LABEL, label_or_unknown,
};
pub use config::{CalculatorOptions, OptionsPatch};
pub use error::{BridgeError, SajuError};
pub use luck::{LuckCycle, LuckCycles, LuckDirection, luck_cycles, luck_direction};
pub use lunar::{
    LunarBridge, LunarDate, LunarService, SolarTermPeriod, StubLunarBridge, TermPrecision,
};
pub use observer::{
    NoopObserver, PipelineEvent, PipelineObserver, RecordingObserver, TracingObserver,
};
pub use pillars::{
    ALL_POSITIONS, PillarPosition, RawPillars, day_pillar, derive_pillars, hour_pillar,
    month_pillar, year_pillar,
};
pub use relations::annotate_pillars;
pub use render::{render_chart, render_pillars};
