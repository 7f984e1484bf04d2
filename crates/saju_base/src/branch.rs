//! Earthly branches (지지) and their hidden stems (지장간).
//!
//! Polarity here is the branch's own (體) polarity: even indices are yang.
//! Hidden stems are listed primary (정기) first, then the middle and residual
//! stems in decreasing rank.

use serde::{Deserialize, Serialize};

use crate::element::{Element, Polarity};
use crate::stem::Stem;

/// The 12 earthly branches starting from 子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Branch {
    Ja,
    Chuk,
    In,
    Myo,
    Jin,
    Sa,
    O,
    Mi,
    Sin,
    Yu,
    Sul,
    Hae,
}

/// All 12 branches in cyclic order (0 = 子, 11 = 亥).
pub const ALL_BRANCHES: [Branch; 12] = [
    Branch::Ja,
    Branch::Chuk,
    Branch::In,
    Branch::Myo,
    Branch::Jin,
    Branch::Sa,
    Branch::O,
    Branch::Mi,
    Branch::Sin,
    Branch::Yu,
    Branch::Sul,
    Branch::Hae,
];

const BRANCH_HANJA: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
const BRANCH_HANGUL: [&str; 12] = [
    "자", "축", "인", "묘", "진", "사", "오", "미", "신", "유", "술", "해",
];

const BRANCH_ELEMENT: [Element; 12] = [
    Element::Water,
    Element::Earth,
    Element::Wood,
    Element::Wood,
    Element::Earth,
    Element::Fire,
    Element::Fire,
    Element::Earth,
    Element::Metal,
    Element::Metal,
    Element::Earth,
    Element::Water,
];

const HIDDEN_STEMS: [&[Stem]; 12] = [
    &[Stem::Gye, Stem::Im],                   // 子
    &[Stem::Gi, Stem::Gye, Stem::Sin],        // 丑
    &[Stem::Gap, Stem::Byeong, Stem::Mu],     // 寅
    &[Stem::Eul, Stem::Gap],                  // 卯
    &[Stem::Mu, Stem::Eul, Stem::Gye],        // 辰
    &[Stem::Byeong, Stem::Gyeong, Stem::Mu],  // 巳
    &[Stem::Jeong, Stem::Gi, Stem::Byeong],   // 午
    &[Stem::Gi, Stem::Jeong, Stem::Eul],      // 未
    &[Stem::Gyeong, Stem::Im, Stem::Mu],      // 申
    &[Stem::Sin, Stem::Gyeong],               // 酉
    &[Stem::Mu, Stem::Sin, Stem::Jeong],      // 戌
    &[Stem::Im, Stem::Gap, Stem::Mu],         // 亥
];

impl Branch {
    /// 0-based index (子=0 .. 亥=11).
    pub const fn index(self) -> u8 {
        match self {
            Self::Ja => 0,
            Self::Chuk => 1,
            Self::In => 2,
            Self::Myo => 3,
            Self::Jin => 4,
            Self::Sa => 5,
            Self::O => 6,
            Self::Mi => 7,
            Self::Sin => 8,
            Self::Yu => 9,
            Self::Sul => 10,
            Self::Hae => 11,
        }
    }

    /// Branch for a 0-based index, `None` outside 0..12.
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 12 {
            Some(ALL_BRANCHES[index as usize])
        } else {
            None
        }
    }

    /// Branch at a cyclic position; any integer wraps into the 12-cycle.
    pub const fn cyclic(position: i64) -> Self {
        ALL_BRANCHES[position.rem_euclid(12) as usize]
    }

    /// Parse a single hanja or hangul character.
    pub fn from_char(s: &str) -> Option<Self> {
        BRANCH_HANJA
            .iter()
            .position(|h| *h == s)
            .or_else(|| BRANCH_HANGUL.iter().position(|h| *h == s))
            .and_then(|i| Self::from_index(i as u8))
    }

    /// Hanja character.
    pub const fn hanja(self) -> &'static str {
        BRANCH_HANJA[self.index() as usize]
    }

    /// Hangul reading.
    pub const fn hangul(self) -> &'static str {
        BRANCH_HANGUL[self.index() as usize]
    }

    /// Element of the branch.
    pub const fn element(self) -> Element {
        BRANCH_ELEMENT[self.index() as usize]
    }

    /// Own (體) polarity of the branch.
    pub const fn polarity(self) -> Polarity {
        if self.index() % 2 == 0 {
            Polarity::Yang
        } else {
            Polarity::Yin
        }
    }

    /// Hidden stems, primary first. Never empty.
    pub const fn hidden_stems(self) -> &'static [Stem] {
        HIDDEN_STEMS[self.index() as usize]
    }

    /// Primary hidden stem (정기).
    pub const fn primary_hidden_stem(self) -> Stem {
        HIDDEN_STEMS[self.index() as usize][0]
    }

    /// The clashing branch six positions away (충).
    pub const fn opposite(self) -> Self {
        Self::cyclic(self.index() as i64 + 6)
    }

    /// The branch `steps` positions later in the cycle (negative steps go back).
    pub const fn offset(self, steps: i64) -> Self {
        Self::cyclic(self.index() as i64 + steps)
    }
}

impl std::fmt::Display for Branch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_sequential() {
        for (i, b) in ALL_BRANCHES.iter().enumerate() {
            assert_eq!(b.index() as usize, i);
        }
    }

    #[test]
    fn every_branch_has_hidden_stems() {
        for b in ALL_BRANCHES {
            let hidden = b.hidden_stems();
            assert!(!hidden.is_empty() && hidden.len() <= 3, "{b}");
        }
    }

    #[test]
    fn primary_hidden_stem_shares_branch_element() {
        for b in ALL_BRANCHES {
            assert_eq!(b.primary_hidden_stem().element(), b.element(), "{b}");
        }
    }

    #[test]
    fn opposite_pairs() {
        assert_eq!(Branch::Ja.opposite(), Branch::O);
        assert_eq!(Branch::Sa.opposite(), Branch::Hae);
        for b in ALL_BRANCHES {
            assert_eq!(b.opposite().opposite(), b);
        }
    }

    #[test]
    fn swapped_polarity_branches() {
        // 子午巳亥 use a primary stem of the opposite polarity.
        for b in [Branch::Ja, Branch::O, Branch::Sa, Branch::Hae] {
            assert_ne!(b.primary_hidden_stem().polarity(), b.polarity(), "{b}");
        }
    }

    #[test]
    fn parse_hanja() {
        assert_eq!(Branch::from_char("巳"), Some(Branch::Sa));
        assert_eq!(Branch::from_char("해"), Some(Branch::Hae));
        assert_eq!(Branch::from_char("甲"), None);
    }
}
