//! The 24 solar terms (절기).
//!
//! Terms are ordered from 立春 (Sun at 315°) in 15° steps. Even positions are
//! the sectional terms (절, "jie") that open a sexagenary month; odd positions
//! are the mid-month terms (중기).
//!
//! Approximate civil start days are the usual Gregorian dates and are good to
//! about ±1 day for 1900–2100. They back the degraded calendar path only.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;

/// The 24 solar terms starting from 立春.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum SolarTerm {
    Ipchun,
    Usu,
    Gyeongchip,
    Chunbun,
    Cheongmyeong,
    Gogu,
    Ipha,
    Soman,
    Mangjong,
    Haji,
    Soseo,
    Daeseo,
    Ipchu,
    Cheoseo,
    Baengno,
    Chubun,
    Hallo,
    Sanggang,
    Ipdong,
    Soseol,
    Daeseol,
    Dongji,
    Sohan,
    Daehan,
}

/// All 24 terms in order (index 0 = 立春).
pub const ALL_SOLAR_TERMS: [SolarTerm; 24] = [
    SolarTerm::Ipchun,
    SolarTerm::Usu,
    SolarTerm::Gyeongchip,
    SolarTerm::Chunbun,
    SolarTerm::Cheongmyeong,
    SolarTerm::Gogu,
    SolarTerm::Ipha,
    SolarTerm::Soman,
    SolarTerm::Mangjong,
    SolarTerm::Haji,
    SolarTerm::Soseo,
    SolarTerm::Daeseo,
    SolarTerm::Ipchu,
    SolarTerm::Cheoseo,
    SolarTerm::Baengno,
    SolarTerm::Chubun,
    SolarTerm::Hallo,
    SolarTerm::Sanggang,
    SolarTerm::Ipdong,
    SolarTerm::Soseol,
    SolarTerm::Daeseol,
    SolarTerm::Dongji,
    SolarTerm::Sohan,
    SolarTerm::Daehan,
];

const SOLAR_TERM_HANJA: [&str; 24] = [
    "立春", "雨水", "驚蟄", "春分", "淸明", "穀雨", "立夏", "小滿", "芒種", "夏至", "小暑", "大暑",
    "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至", "小寒", "大寒",
];

/// Approximate civil (month, day) on which each term begins.
const APPROXIMATE_START: [(u32, u32); 24] = [
    (2, 4),
    (2, 19),
    (3, 6),
    (3, 21),
    (4, 5),
    (4, 20),
    (5, 6),
    (5, 21),
    (6, 6),
    (6, 21),
    (7, 7),
    (7, 23),
    (8, 8),
    (8, 23),
    (9, 8),
    (9, 23),
    (10, 8),
    (10, 23),
    (11, 7),
    (11, 22),
    (12, 7),
    (12, 22),
    (1, 6),
    (1, 20),
];

impl SolarTerm {
    /// 0-based index (立春=0 .. 大寒=23).
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Term at a cyclic position; wraps modulo 24.
    pub const fn cyclic(position: i64) -> Self {
        ALL_SOLAR_TERMS[position.rem_euclid(24) as usize]
    }

    /// Hanja name.
    pub fn hanja(self) -> &'static str {
        SOLAR_TERM_HANJA[self.index() as usize]
    }

    /// Apparent solar longitude at which the term begins, in degrees.
    pub fn solar_longitude_deg(self) -> f64 {
        (315.0 + 15.0 * self.index() as f64) % 360.0
    }

    /// Whether this is a sectional term that opens a sexagenary month.
    pub fn is_sectional(self) -> bool {
        self.index() % 2 == 0
    }

    /// The sectional term governing this term's month (itself if sectional).
    pub fn sectional(self) -> Self {
        ALL_SOLAR_TERMS[(self.index() & !1) as usize]
    }

    /// Sexagenary month number (1 = 寅 month .. 12 = 丑 month) this term falls in.
    pub fn month_number(self) -> u8 {
        self.index() / 2 + 1
    }

    /// Branch of the month this term falls in.
    pub fn month_branch(self) -> Branch {
        Branch::cyclic(self.month_number() as i64 + 1)
    }

    /// Approximate civil (month, day) on which the term begins.
    pub fn approximate_start(self) -> (u32, u32) {
        APPROXIMATE_START[self.index() as usize]
    }
}

impl std::fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Sexagenary month number (1..=12) for a civil month when no solar-term
/// information is available: February opens month 1, January is month 12.
pub const fn month_number_from_civil(civil_month: u32) -> u8 {
    ((civil_month + 10) % 12 + 1) as u8
}
