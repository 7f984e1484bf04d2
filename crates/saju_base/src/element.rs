//! Five phases (오행) and polarity (음양).
//!
//! The generating cycle runs Wood → Fire → Earth → Metal → Water → Wood.
//! The controlling cycle skips one step: Wood → Earth → Water → Fire → Metal → Wood.

use serde::{Deserialize, Serialize};

/// One of the five phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

/// All five elements in generating-cycle order (index 0 = Wood).
pub const ALL_ELEMENTS: [Element; 5] = [
    Element::Wood,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Water,
];

impl Element {
    /// 0-based position in the generating cycle (Wood=0 .. Water=4).
    pub const fn index(self) -> u8 {
        match self {
            Self::Wood => 0,
            Self::Fire => 1,
            Self::Earth => 2,
            Self::Metal => 3,
            Self::Water => 4,
        }
    }

    /// Element at a cycle position; wraps modulo 5.
    pub const fn from_index(index: u8) -> Self {
        ALL_ELEMENTS[(index % 5) as usize]
    }

    /// Hanja character (木火土金水).
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Wood => "木",
            Self::Fire => "火",
            Self::Earth => "土",
            Self::Metal => "金",
            Self::Water => "水",
        }
    }

    /// English name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Wood => "Wood",
            Self::Fire => "Fire",
            Self::Earth => "Earth",
            Self::Metal => "Metal",
            Self::Water => "Water",
        }
    }

    /// The element this one generates (상생).
    pub const fn generates(self) -> Self {
        Self::from_index(self.index() + 1)
    }

    /// The element that generates this one.
    pub const fn generated_by(self) -> Self {
        Self::from_index(self.index() + 4)
    }

    /// The element this one controls (상극).
    pub const fn controls(self) -> Self {
        Self::from_index(self.index() + 2)
    }

    /// The element that controls this one.
    pub const fn controlled_by(self) -> Self {
        Self::from_index(self.index() + 3)
    }
}

impl std::fmt::Display for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Yang / yin polarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Polarity {
    Yang,
    Yin,
}

impl Polarity {
    /// Hanja character (陽/陰).
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Yang => "陽",
            Self::Yin => "陰",
        }
    }

    /// The opposite polarity.
    pub const fn flip(self) -> Self {
        match self {
            Self::Yang => Self::Yin,
            Self::Yin => Self::Yang,
        }
    }
}
