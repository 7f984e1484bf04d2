//! Heavenly stems (천간).
//!
//! Ten cyclic symbols, each bound to exactly one element and one polarity.
//! Even indices are yang, odd indices yin; every two stems share an element.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};

/// The 10 heavenly stems starting from 甲.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stem {
    Gap,
    Eul,
    Byeong,
    Jeong,
    Mu,
    Gi,
    Gyeong,
    Sin,
    Im,
    Gye,
}

/// All 10 stems in cyclic order (0 = 甲, 9 = 癸).
pub const ALL_STEMS: [Stem; 10] = [
    Stem::Gap,
    Stem::Eul,
    Stem::Byeong,
    Stem::Jeong,
    Stem::Mu,
    Stem::Gi,
    Stem::Gyeong,
    Stem::Sin,
    Stem::Im,
    Stem::Gye,
];

const STEM_HANJA: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
const STEM_HANGUL: [&str; 10] = ["갑", "을", "병", "정", "무", "기", "경", "신", "임", "계"];

impl Stem {
    /// 0-based index (甲=0 .. 癸=9).
    pub const fn index(self) -> u8 {
        match self {
            Self::Gap => 0,
            Self::Eul => 1,
            Self::Byeong => 2,
            Self::Jeong => 3,
            Self::Mu => 4,
            Self::Gi => 5,
            Self::Gyeong => 6,
            Self::Sin => 7,
            Self::Im => 8,
            Self::Gye => 9,
        }
    }

    /// Stem for a 0-based index, `None` outside 0..10.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 10 {
            Some(ALL_STEMS[index as usize])
        } else {
            None
        }
    }

    /// Stem at a cyclic position; any integer wraps into the 10-cycle.
    pub const fn cyclic(position: i64) -> Self {
        ALL_STEMS[position.rem_euclid(10) as usize]
    }

    /// Parse a single hanja or hangul character.
    pub fn from_char(s: &str) -> Option<Self> {
        STEM_HANJA
            .iter()
            .position(|h| *h == s)
            .or_else(|| STEM_HANGUL.iter().position(|h| *h == s))
            .and_then(|i| Self::from_index(i as u8))
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        STEM_HANJA[self.index() as usize]
    }

    /// Hangul reading.
    pub const fn hangul(self) -> &'static str {
        STEM_HANGUL[self.index() as usize]
    }

    /// Element of the stem.
    pub const fn element(self) -> Element {
        Element::from_index(self.index() / 2)
    }

    /// Polarity of the stem.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// The unique stem carrying `element` with `polarity`.
    pub const fn with(element: Element, polarity: Polarity) -> Self {
        let base = element.index() * 2;
        match polarity {
            Polarity::Yang => ALL_STEMS[base as usize],
            Polarity::Yin => ALL_STEMS[(base + 1) as usize],
        }
    }

    /// The stem `steps` positions later in the cycle (negative steps go back).
    pub const fn offset(self, steps: i64) -> Self {
        Self::cyclic(self.index() as i64 + steps)
    }
}

impl std::fmt::Display for Stem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}
