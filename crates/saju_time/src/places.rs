//! City and timezone directory.
//!
//! Lookup order for a place name: exact (case-insensitive, any alias), then a
//! fuzzy match on the normalized name. Coordinates resolve to the nearest
//! place by great-circle distance.

use serde::Serialize;

use crate::places_data::PLACES;

/// Mean Earth radius in km, for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Administrative suffixes stripped before fuzzy matching.
const NAME_SUFFIXES: [&str; 6] = ["특별자치시", "특별시", "광역시", "시", " city", "-si"];

/// A named place with its timezone and fixed local-mean-time correction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Place {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    /// ISO 3166-1 alpha-2 country code.
    pub country: &'static str,
    pub latitude: f64,
    pub longitude: f64,
    /// IANA timezone identifier.
    pub timezone: &'static str,
    /// Standard meridian of the zone, degrees east.
    pub standard_meridian: f64,
    /// Local mean time correction against `standard_meridian`, minutes.
    pub correction_minutes: i32,
}

impl Place {
    /// Whether `query` names this place exactly (case-insensitive).
    pub fn matches(&self, query: &str) -> bool {
        let q = query.trim();
        self.name.eq_ignore_ascii_case(q) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(q))
    }

    /// Great-circle distance to a coordinate, km.
    pub fn distance_km(&self, latitude: f64, longitude: f64) -> f64 {
        haversine_km(self.latitude, self.longitude, latitude, longitude)
    }
}

/// How a place was found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaceMatch {
    Exact,
    Fuzzy,
    Nearest,
}

/// Static directory of named places.
#[derive(Debug, Clone, Copy)]
pub struct CityTimezoneDirectory {
    places: &'static [Place],
}

impl Default for CityTimezoneDirectory {
    fn default() -> Self {
        Self { places: PLACES }
    }
}

impl CityTimezoneDirectory {
    /// The built-in directory.
    pub fn builtin() -> Self {
        Self::default()
    }

    pub fn places(&self) -> &'static [Place] {
        self.places
    }

    pub fn len(&self) -> usize {
        self.places.len()
    }

    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Exact match on name or alias.
    pub fn find_exact(&self, query: &str) -> Option<&'static Place> {
        self.places.iter().find(|p| p.matches(query))
    }

    /// Fuzzy match: normalized names equal, then one contains the other.
    pub fn find_fuzzy(&self, query: &str) -> Option<&'static Place> {
        let q = normalize_name(query);
        if q.is_empty() {
            return None;
        }
        let names = |p: &'static Place| {
            std::iter::once(p.name)
                .chain(p.aliases.iter().copied())
                .map(normalize_name)
        };
        self.places
            .iter()
            .find(|p| names(*p).any(|n| n == q))
            .or_else(|| {
                self.places
                    .iter()
                    .find(|p| names(*p).any(|n| partial_match(&n, &q)))
            })
    }

    /// Exact lookup falling back to fuzzy.
    pub fn lookup(&self, query: &str) -> Option<(&'static Place, PlaceMatch)> {
        self.find_exact(query)
            .map(|p| (p, PlaceMatch::Exact))
            .or_else(|| self.find_fuzzy(query).map(|p| (p, PlaceMatch::Fuzzy)))
    }

    /// Nearest place to a coordinate.
    pub fn nearest(&self, latitude: f64, longitude: f64) -> Option<&'static Place> {
        self.places.iter().min_by(|a, b| {
            a.distance_km(latitude, longitude)
                .total_cmp(&b.distance_km(latitude, longitude))
        })
    }

    /// Places whose name, alias or country contains `query`, in directory order.
    pub fn search(&self, query: &str) -> Vec<&'static Place> {
        let q = normalize_name(query);
        self.places
            .iter()
            .filter(|p| {
                q.is_empty()
                    || p.country.eq_ignore_ascii_case(&q)
                    || std::iter::once(p.name)
                        .chain(p.aliases.iter().copied())
                        .any(|n| normalize_name(n).contains(&q))
            })
            .collect()
    }
}

/// Lowercase, drop whitespace and punctuation, strip administrative suffixes.
fn normalize_name(name: &str) -> String {
    let mut s = name.trim().to_lowercase();
    if let Some(stripped) = NAME_SUFFIXES
        .iter()
        .filter(|suffix| s.len() > suffix.len())
        .find_map(|suffix| s.strip_suffix(suffix))
    {
        s = stripped.to_string();
    }
    s.chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_' && *c != '.')
        .collect()
}

/// One normalized name contains the other, and the shorter one is long
/// enough to be meaningful (4 ASCII letters or 2 other characters).
fn partial_match(a: &str, b: &str) -> bool {
    let (short, long) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let min_chars = if short.is_ascii() { 4 } else { 2 };
    short.chars().count() >= min_chars && long.contains(short)
}

/// Great-circle distance between two coordinates, km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let (phi1, phi2) = (lat1.to_radians(), lat2.to_radians());
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lon2 - lon1).to_radians();
    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().min(1.0).asin()
}
