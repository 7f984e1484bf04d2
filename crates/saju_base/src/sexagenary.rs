//! Sexagenary (60-step) cycle arithmetic.
//!
//! A [`StemBranch`] pairs one stem with one branch. Regular cycle members pair
//! stems and branches of equal polarity, giving 60 combinations; the pair type
//! itself admits all 120 so that literal override tables can be represented
//! verbatim.
//!
//! The year cycle epoch is CE 4 = 甲子.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::stem::Stem;

/// Reference epoch: CE 4 = 甲子 (cycle index 0).
pub const SEXAGENARY_EPOCH_YEAR: i32 = 4;

/// Length of the combined stem-branch cycle.
pub const CYCLE_LENGTH: u8 = 60;

/// A stem-branch pair (간지).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StemBranch {
    pub stem: Stem,
    pub branch: Branch,
}

impl StemBranch {
    pub const fn new(stem: Stem, branch: Branch) -> Self {
        Self { stem, branch }
    }

    /// Member of the 60-cycle at `index`; any integer wraps.
    pub const fn from_cycle_index(index: i64) -> Self {
        Self {
            stem: Stem::cyclic(index),
            branch: Branch::cyclic(index),
        }
    }

    /// Position in the 60-cycle (甲子=0 .. 癸亥=59), `None` for pairs of
    /// mixed polarity, which never occur in the regular cycle.
    pub fn cycle_index(self) -> Option<u8> {
        let s = self.stem.index() as i64;
        let b = self.branch.index() as i64;
        if (s - b).rem_euclid(2) != 0 {
            return None;
        }
        // Solve n ≡ s (mod 10), n ≡ b (mod 12) for n in 0..60.
        let n = (6 * s - 5 * b).rem_euclid(60);
        Some(n as u8)
    }

    /// Hanja label, stem followed by branch.
    pub fn label(self) -> String {
        format!("{}{}", self.stem.hanja(), self.branch.hanja())
    }

    /// Hangul reading of the label.
    pub fn hangul(self) -> String {
        format!("{}{}", self.stem.hangul(), self.branch.hangul())
    }

    /// Parse a two-character label such as `"甲子"` or `"갑자"`.
    pub fn parse(label: &str) -> Option<Self> {
        let mut chars = label.trim().chars();
        let s = chars.next()?;
        let b = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let stem = Stem::from_char(s.encode_utf8(&mut [0u8; 4]))?;
        let branch = Branch::from_char(b.encode_utf8(&mut [0u8; 4]))?;
        Some(Self::new(stem, branch))
    }

    /// Advance both cycles by `steps` (negative steps go back).
    pub const fn offset(self, steps: i64) -> Self {
        Self {
            stem: self.stem.offset(steps),
            branch: self.branch.offset(steps),
        }
    }
}

impl std::fmt::Display for StemBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.stem.hanja(), self.branch.hanja())
    }
}

/// Stem-branch pair for a sexagenary year.
///
/// Stem index is `(year − 4) mod 10`, branch index `(year − 4) mod 12`.
pub const fn year_stem_branch(year: i32) -> StemBranch {
    StemBranch::from_cycle_index(year as i64 - SEXAGENARY_EPOCH_YEAR as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycle_index_roundtrip() {
        for i in 0..60 {
            let sb = StemBranch::from_cycle_index(i);
            assert_eq!(sb.cycle_index(), Some(i as u8), "{sb}");
        }
    }

    #[test]
    fn mixed_polarity_has_no_index() {
        let sb = StemBranch::new(Stem::Gap, Branch::Mi);
        assert_eq!(sb.cycle_index(), None);
        assert_eq!(sb.label(), "甲未");
    }

    #[test]
    fn epoch_year_is_gapja() {
        assert_eq!(year_stem_branch(4).label(), "甲子");
        assert_eq!(year_stem_branch(1984).label(), "甲子");
    }

    #[test]
    fn known_years() {
        assert_eq!(year_stem_branch(1986).label(), "丙寅");
        assert_eq!(year_stem_branch(2023).label(), "癸卯");
        assert_eq!(year_stem_branch(2024).label(), "甲辰");
    }

    #[test]
    fn year_before_epoch_wraps() {
        // 3 CE: -1 in the cycle → 癸亥
        assert_eq!(year_stem_branch(3).label(), "癸亥");
    }

    #[test]
    fn parse_labels() {
        let sb = StemBranch::parse("癸巳").unwrap();
        assert_eq!(sb, StemBranch::new(Stem::Gye, Branch::Sa));
        assert_eq!(StemBranch::parse("갑자").unwrap().label(), "甲子");
        assert!(StemBranch::parse("甲").is_none());
        assert!(StemBranch::parse("甲子丑").is_none());
        assert!(StemBranch::parse("子甲").is_none());
    }

    #[test]
    fn offset_wraps_both_cycles() {
        let sb = StemBranch::parse("癸亥").unwrap();
        assert_eq!(sb.offset(1).label(), "甲子");
        assert_eq!(sb.offset(-59).label(), "甲子");
    }
}
