//! Birth-time normalization.
//!
//! A civil birth date-time is shifted onto the reference meridian's mean solar
//! time. Each enabled step contributes one itemized correction:
//!
//! 1. standard zone: reference offset minus the zone's standard offset
//! 2. DST: minus the tz database's DST shift, or
//! 3. historical DST: minus the shift of a table window (years the table
//!    covers ignore the tz database's DST)
//! 4. local mean time: `(longitude − reference meridian) × 4` minutes
//!
//! [`DomesticNormalizer`] measures against a fixed reference meridian
//! (135°E by default). [`InternationalNormalizer`] measures against the
//! birth zone's own standard meridian, so the standard-zone step is zero.

use chrono::{Datelike, Duration, NaiveDateTime, TimeZone};
use chrono_tz::{OffsetComponents, Tz};
use serde::Serialize;

use crate::civil::round_to_minute;
use crate::dst::HistoricalDstTable;
use crate::error::TimeError;
use crate::options::{Location, NormalizerOptions};
use crate::places::{CityTimezoneDirectory, Place, PlaceMatch};

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// How the birth timezone was decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimezoneSource {
    /// Supplied with the location.
    Explicit,
    /// From a place found by name.
    Place,
    /// From the place nearest the given coordinates.
    NearestPlace,
    /// Nothing resolved; the default zone.
    Default,
}

/// Origin of one correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AdjustmentSource {
    StandardTimeZone,
    Dst,
    HistoricalDst,
    LocalMeanTime,
    SecondsRounding,
}

/// One itemized correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdjustmentItem {
    pub source: AdjustmentSource,
    pub seconds: i64,
}

/// Everything the normalizer did to a birth time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimezoneAdjustment {
    /// Resolved IANA timezone.
    pub timezone: String,
    pub timezone_source: TimezoneSource,
    /// Directory place used, if any.
    pub place: Option<String>,
    pub is_dst: bool,
    /// Zone offset from UTC at the birth instant, DST included, minutes.
    pub offset_minutes: i32,
    /// Sum of all corrections, seconds.
    pub total_seconds: i64,
    pub breakdown: Vec<AdjustmentItem>,
}

impl TimezoneAdjustment {
    /// Correction contributed by one source, seconds (zero if absent).
    pub fn seconds_from(&self, source: AdjustmentSource) -> i64 {
        self.breakdown
            .iter()
            .filter(|i| i.source == source)
            .map(|i| i.seconds)
            .sum()
    }

    /// Total correction in minutes.
    pub fn total_minutes(&self) -> f64 {
        self.total_seconds as f64 / 60.0
    }
}

/// A normalized birth time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedTime {
    pub original: NaiveDateTime,
    pub adjusted: NaiveDateTime,
    pub adjustment: TimezoneAdjustment,
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Which reference frame a normalizer measures against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NormalizerMode {
    Domestic,
    International,
}

/// Converts a civil birth date-time into the reference frame.
pub trait TimeNormalizer: Send + Sync + std::fmt::Debug {
    fn mode(&self) -> NormalizerMode;

    fn options(&self) -> &NormalizerOptions;

    /// Normalize `local` (civil time at the birth place).
    fn normalize(
        &self,
        local: NaiveDateTime,
        location: Option<&Location>,
    ) -> Result<NormalizedTime, TimeError>;
}

/// Build the normalizer for a mode.
pub fn normalizer_for(mode: NormalizerMode, options: NormalizerOptions) -> Box<dyn TimeNormalizer> {
    match mode {
        NormalizerMode::Domestic => Box::new(DomesticNormalizer::new(options)),
        NormalizerMode::International => Box::new(InternationalNormalizer::new(options)),
    }
}

// ---------------------------------------------------------------------------
// Shared machinery
// ---------------------------------------------------------------------------

/// A timezone decision together with the longitude used for local mean time.
#[derive(Debug, Clone)]
struct ResolvedZone {
    tz: Tz,
    source: TimezoneSource,
    place: Option<&'static Place>,
    /// Place found by name (its fixed correction may be used).
    by_name: bool,
    longitude: Option<f64>,
}

#[derive(Debug, Clone)]
struct NormalizerCore {
    options: NormalizerOptions,
    directory: CityTimezoneDirectory,
    dst_table: HistoricalDstTable,
    default_timezone: Tz,
}

impl NormalizerCore {
    fn new(options: NormalizerOptions) -> Self {
        Self {
            options,
            directory: CityTimezoneDirectory::builtin(),
            dst_table: HistoricalDstTable::default(),
            default_timezone: chrono_tz::Asia::Seoul,
        }
    }

    fn resolve(&self, location: Option<&Location>) -> Result<ResolvedZone, TimeError> {
        let default = ResolvedZone {
            tz: self.default_timezone,
            source: TimezoneSource::Default,
            place: None,
            by_name: false,
            longitude: None,
        };
        let Some(location) = location else {
            return Ok(default);
        };
        validate_location(location)?;
        match location {
            Location::Detailed {
                timezone,
                longitude,
                ..
            } => Ok(ResolvedZone {
                tz: parse_timezone(timezone)?,
                source: TimezoneSource::Explicit,
                place: None,
                by_name: false,
                longitude: Some(*longitude),
            }),
            Location::Named(name) => match self.directory.lookup(name) {
                Some((place, how)) => Ok(ResolvedZone {
                    tz: parse_timezone(place.timezone)?,
                    source: TimezoneSource::Place,
                    place: Some(place),
                    by_name: matches!(how, PlaceMatch::Exact | PlaceMatch::Fuzzy),
                    longitude: Some(place.longitude),
                }),
                None => Ok(default),
            },
            Location::Coordinates {
                latitude,
                longitude,
            } => match self.directory.nearest(*latitude, *longitude) {
                Some(place) => Ok(ResolvedZone {
                    tz: parse_timezone(place.timezone)?,
                    source: TimezoneSource::NearestPlace,
                    place: Some(place),
                    by_name: false,
                    longitude: Some(*longitude),
                }),
                None => Ok(ResolvedZone {
                    longitude: Some(*longitude),
                    ..default
                }),
            },
        }
    }

    /// Run every enabled step. `reference` maps the zone's standard offset
    /// (minutes) to the reference offset (minutes) and meridian (degrees).
    fn normalize(
        &self,
        local: NaiveDateTime,
        location: Option<&Location>,
        reference: impl Fn(i32) -> (i32, f64),
    ) -> Result<NormalizedTime, TimeError> {
        let zone = self.resolve(location)?;
        let opts = &self.options;
        let tz_name = zone.tz.name();

        let offset = zone
            .tz
            .offset_from_local_datetime(&local)
            .earliest()
            .unwrap_or_else(|| zone.tz.offset_from_utc_datetime(&local));
        let base_minutes = (offset.base_utc_offset().num_seconds() / 60) as i32;
        let tz_dst_minutes = (offset.dst_offset().num_seconds() / 60) as i32;
        let (reference_offset, reference_meridian) = reference(base_minutes);
        check_degrees(reference_meridian, 180.0)?;

        let historical_governs =
            opts.use_historical_dst && self.dst_table.covers(tz_name, local.year());
        let historical = if historical_governs {
            self.dst_table.active(tz_name, &local)
        } else {
            None
        };
        let dst_minutes = match historical {
            Some(w) => w.shift_minutes,
            None if historical_governs => 0,
            None => tz_dst_minutes,
        };

        let mut breakdown = Vec::new();
        if opts.use_standard_time_zone {
            let seconds = (reference_offset as i64 - base_minutes as i64) * 60;
            push(&mut breakdown, AdjustmentSource::StandardTimeZone, seconds);
        }
        if let Some(window) = historical {
            let seconds = -(window.shift_minutes as i64) * 60;
            push(&mut breakdown, AdjustmentSource::HistoricalDst, seconds);
        } else if opts.use_dst && !historical_governs {
            push(&mut breakdown, AdjustmentSource::Dst, -(tz_dst_minutes as i64) * 60);
        }
        if let (true, Some(longitude)) = (opts.use_local_time, zone.longitude) {
            let seconds = local_mean_time_seconds(
                &zone,
                longitude,
                reference_meridian,
                opts.use_seconds_precision,
            );
            push(&mut breakdown, AdjustmentSource::LocalMeanTime, seconds);
        }

        let shift = breakdown
            .iter()
            .try_fold(0i64, |acc, i| acc.checked_add(i.seconds))
            .ok_or(TimeError::OutOfRange)?;
        let shifted = Duration::try_seconds(shift)
            .and_then(|delta| local.checked_add_signed(delta))
            .ok_or(TimeError::OutOfRange)?;
        let adjusted = if opts.use_seconds_precision {
            let rounded = round_to_minute(shifted);
            let seconds = (rounded - shifted).num_seconds();
            push(&mut breakdown, AdjustmentSource::SecondsRounding, seconds);
            rounded
        } else {
            shifted
        };
        let total_seconds = (adjusted - local).num_seconds();

        Ok(NormalizedTime {
            original: local,
            adjusted,
            adjustment: TimezoneAdjustment {
                timezone: tz_name.to_string(),
                timezone_source: zone.source,
                place: zone.place.map(|p| p.name.to_string()),
                is_dst: dst_minutes != 0,
                offset_minutes: base_minutes + dst_minutes,
                total_seconds,
                breakdown,
            },
        })
    }
}

/// Finite and within `[-limit, limit]` degrees.
fn check_degrees(value: f64, limit: f64) -> Result<(), TimeError> {
    if value.is_finite() && value.abs() <= limit {
        Ok(())
    } else {
        Err(TimeError::InvalidCoordinate(value))
    }
}

fn validate_location(location: &Location) -> Result<(), TimeError> {
    match location {
        Location::Named(_) => Ok(()),
        Location::Detailed {
            latitude,
            longitude,
            ..
        }
        | Location::Coordinates {
            latitude,
            longitude,
        } => {
            check_degrees(*latitude, 90.0)?;
            check_degrees(*longitude, 180.0)
        }
    }
}

fn push(breakdown: &mut Vec<AdjustmentItem>, source: AdjustmentSource, seconds: i64) {
    if seconds != 0 {
        breakdown.push(AdjustmentItem { source, seconds });
    }
}

/// Local mean time correction, seconds. A directory place found by name whose
/// zone meridian is the reference uses its fixed minute correction.
fn local_mean_time_seconds(
    zone: &ResolvedZone,
    longitude: f64,
    reference_meridian: f64,
    seconds_precision: bool,
) -> i64 {
    let fixed = zone
        .place
        .filter(|p| zone.by_name && (p.standard_meridian - reference_meridian).abs() < 1e-9);
    if let Some(place) = fixed {
        return place.correction_minutes as i64 * 60;
    }
    let minutes = (longitude - reference_meridian) * 4.0;
    if seconds_precision {
        (minutes * 60.0).round() as i64
    } else {
        minutes.round() as i64 * 60
    }
}

fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.parse::<Tz>()
        .map_err(|_| TimeError::UnknownTimezone(name.to_string()))
}

// ---------------------------------------------------------------------------
// Implementations
// ---------------------------------------------------------------------------

/// Measures against a fixed reference meridian (135°E unless configured).
#[derive(Debug, Clone)]
pub struct DomesticNormalizer {
    core: NormalizerCore,
}

impl DomesticNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            core: NormalizerCore::new(options),
        }
    }
}

impl Default for DomesticNormalizer {
    fn default() -> Self {
        Self::new(NormalizerOptions::default())
    }
}

impl TimeNormalizer for DomesticNormalizer {
    fn mode(&self) -> NormalizerMode {
        NormalizerMode::Domestic
    }

    fn options(&self) -> &NormalizerOptions {
        &self.core.options
    }

    fn normalize(
        &self,
        local: NaiveDateTime,
        location: Option<&Location>,
    ) -> Result<NormalizedTime, TimeError> {
        let opts = self.core.options;
        self.core.normalize(local, location, |_| {
            (opts.reference_offset_minutes(), opts.reference_standard_meridian)
        })
    }
}

/// Measures against the birth zone's own standard meridian.
#[derive(Debug, Clone)]
pub struct InternationalNormalizer {
    core: NormalizerCore,
}

impl InternationalNormalizer {
    pub fn new(options: NormalizerOptions) -> Self {
        Self {
            core: NormalizerCore::new(options),
        }
    }
}

impl TimeNormalizer for InternationalNormalizer {
    fn mode(&self) -> NormalizerMode {
        NormalizerMode::International
    }

    fn options(&self) -> &NormalizerOptions {
        &self.core.options
    }

    fn normalize(
        &self,
        local: NaiveDateTime,
        location: Option<&Location>,
    ) -> Result<NormalizedTime, TimeError> {
        self.core
            .normalize(local, location, |base| (base, base as f64 / 4.0))
    }
}
