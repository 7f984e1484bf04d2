//! Civil birth-time normalization for Four Pillars charts.
//!
//! This crate provides:
//! - Birth date and fractional-hour parsing
//! - A directory of named places with timezones and local-mean-time corrections
//! - The historical Korean DST table (1948–1951)
//! - Domestic (fixed reference meridian) and international normalizers

pub mod civil;
pub mod dst;
pub mod error;
pub mod normalizer;
pub mod options;
pub mod places;
mod places_data;

pub use civil::{
    ParsedDate, civil_datetime, fractional_hour, hour_to_time, parse_birth_date,
    parse_birth_date_or_today, round_to_minute,
};
pub use dst::{HistoricalDstTable, HistoricalDstWindow, KOREA_HISTORICAL_DST};
pub use error::TimeError;
pub use normalizer::{
    AdjustmentItem, AdjustmentSource, DomesticNormalizer, InternationalNormalizer,
    NormalizedTime, NormalizerMode, TimeNormalizer, TimezoneAdjustment, TimezoneSource,
    normalizer_for,
};
pub use options::{DEFAULT_TIMEZONE, KOREA_STANDARD_MERIDIAN, Location, NormalizerOptions};
pub use places::{CityTimezoneDirectory, Place, PlaceMatch, haversine_km};
