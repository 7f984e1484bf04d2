//! Twelve Fortune stages (십이운성).
//!
//! Each stem passes through twelve life stages across the branches. Yang
//! stems count forward from their 長生 branch and yin stems count backward.
//! The dense matrix below is the lookup used at runtime; the counting rule is
//! kept alongside it for verification.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Polarity;
use crate::stem::Stem;

/// The twelve life stages, starting from 長生.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TwelveFortune {
    /// 長生
    Jangsaeng,
    /// 沐浴
    Mokyok,
    /// 冠帶
    Gwandae,
    /// 建祿 (臨官)
    Geollok,
    /// 帝旺
    Jewang,
    /// 衰
    Soe,
    /// 病
    Byeong,
    /// 死
    Sa,
    /// 墓
    Myo,
    /// 絶
    Jeol,
    /// 胎
    Tae,
    /// 養
    Yang,
}

/// All twelve stages in order.
pub const ALL_TWELVE_FORTUNES: [TwelveFortune; 12] = [
    TwelveFortune::Jangsaeng,
    TwelveFortune::Mokyok,
    TwelveFortune::Gwandae,
    TwelveFortune::Geollok,
    TwelveFortune::Jewang,
    TwelveFortune::Soe,
    TwelveFortune::Byeong,
    TwelveFortune::Sa,
    TwelveFortune::Myo,
    TwelveFortune::Jeol,
    TwelveFortune::Tae,
    TwelveFortune::Yang,
];

const FORTUNE_HANJA: [&str; 12] = [
    "長生", "沐浴", "冠帶", "建祿", "帝旺", "衰", "病", "死", "墓", "絶", "胎", "養",
];
const FORTUNE_HANGUL: [&str; 12] = [
    "장생", "목욕", "관대", "건록", "제왕", "쇠", "병", "사", "묘", "절", "태", "양",
];

/// Branch on which each stem's 長生 falls (甲..癸).
const JANGSAENG_BRANCH: [Branch; 10] = [
    Branch::Hae,
    Branch::O,
    Branch::In,
    Branch::Yu,
    Branch::In,
    Branch::Yu,
    Branch::Sa,
    Branch::Ja,
    Branch::Sin,
    Branch::Myo,
];

/// Rows: day master 甲..癸. Columns: branch 子..亥.
const FORTUNE_MATRIX: [[TwelveFortune; 12]; 10] = {
    use TwelveFortune::*;
    [
        // 甲
        [
            Mokyok, Gwandae, Geollok, Jewang, Soe, Byeong,
            Sa, Myo, Jeol, Tae, Yang, Jangsaeng,
        ],
        // 乙
        [
            Byeong, Soe, Jewang, Geollok, Gwandae, Mokyok,
            Jangsaeng, Yang, Tae, Jeol, Myo, Sa,
        ],
        // 丙
        [
            Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geollok,
            Jewang, Soe, Byeong, Sa, Myo, Jeol,
        ],
        // 丁
        [
            Jeol, Myo, Sa, Byeong, Soe, Jewang,
            Geollok, Gwandae, Mokyok, Jangsaeng, Yang, Tae,
        ],
        // 戊
        [
            Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geollok,
            Jewang, Soe, Byeong, Sa, Myo, Jeol,
        ],
        // 己
        [
            Jeol, Myo, Sa, Byeong, Soe, Jewang,
            Geollok, Gwandae, Mokyok, Jangsaeng, Yang, Tae,
        ],
        // 庚
        [
            Sa, Myo, Jeol, Tae, Yang, Jangsaeng,
            Mokyok, Gwandae, Geollok, Jewang, Soe, Byeong,
        ],
        // 辛
        [
            Jangsaeng, Yang, Tae, Jeol, Myo, Sa,
            Byeong, Soe, Jewang, Geollok, Gwandae, Mokyok,
        ],
        // 壬
        [
            Jewang, Soe, Byeong, Sa, Myo, Jeol,
            Tae, Yang, Jangsaeng, Mokyok, Gwandae, Geollok,
        ],
        // 癸
        [
            Geollok, Gwandae, Mokyok, Jangsaeng, Yang, Tae,
            Jeol, Myo, Sa, Byeong, Soe, Jewang,
        ],
    ]
};

impl TwelveFortune {
    /// 0-based stage index (長生=0 .. 養=11).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn hanja(self) -> &'static str {
        FORTUNE_HANJA[self.index() as usize]
    }

    pub const fn hangul(self) -> &'static str {
        FORTUNE_HANGUL[self.index() as usize]
    }

    /// Whether the stage counts as a strong (旺相) position: 長生 through 帝旺.
    pub const fn is_vigorous(self) -> bool {
        self.index() <= TwelveFortune::Jewang.index()
    }
}

impl std::fmt::Display for TwelveFortune {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Twelve Fortune stage of `branch` for `day_master`.
pub const fn twelve_fortune(day_master: Stem, branch: Branch) -> TwelveFortune {
    FORTUNE_MATRIX[day_master.index() as usize][branch.index() as usize]
}

/// Stage by counting from the 長生 branch in the stem's direction.
pub const fn twelve_fortune_by_rule(day_master: Stem, branch: Branch) -> TwelveFortune {
    let start = JANGSAENG_BRANCH[day_master.index() as usize].index() as i64;
    let b = branch.index() as i64;
    let steps = match day_master.polarity() {
        Polarity::Yang => b - start,
        Polarity::Yin => start - b,
    };
    ALL_TWELVE_FORTUNES[steps.rem_euclid(12) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::branch::ALL_BRANCHES;
    use crate::stem::ALL_STEMS;

    #[test]
    fn matrix_matches_counting_rule() {
        for s in ALL_STEMS {
            for b in ALL_BRANCHES {
                assert_eq!(twelve_fortune(s, b), twelve_fortune_by_rule(s, b), "{s}{b}");
            }
        }
    }

    #[test]
    fn each_row_is_a_permutation() {
        for s in ALL_STEMS {
            let mut seen = [false; 12];
            for b in ALL_BRANCHES {
                seen[twelve_fortune(s, b).index() as usize] = true;
            }
            assert!(seen.iter().all(|x| *x), "{s}");
        }
    }

    #[test]
    fn known_stages() {
        assert_eq!(twelve_fortune(Stem::Gap, Branch::Hae), TwelveFortune::Jangsaeng);
        assert_eq!(twelve_fortune(Stem::Gap, Branch::Myo), TwelveFortune::Jewang);
        assert_eq!(twelve_fortune(Stem::Gye, Branch::Myo), TwelveFortune::Jangsaeng);
        assert_eq!(twelve_fortune(Stem::Gye, Branch::Yu), TwelveFortune::Byeong);
        assert_eq!(twelve_fortune(Stem::Gye, Branch::Sa), TwelveFortune::Tae);
        assert_eq!(twelve_fortune(Stem::Gye, Branch::O), TwelveFortune::Jeol);
    }

    #[test]
    fn geollok_on_own_element_branch() {
        // 建祿 sits on the branch of the stem's own element and polarity.
        assert_eq!(twelve_fortune(Stem::Gap, Branch::In), TwelveFortune::Geollok);
        assert_eq!(twelve_fortune(Stem::Byeong, Branch::Sa), TwelveFortune::Geollok);
        assert_eq!(twelve_fortune(Stem::Gyeong, Branch::Sin), TwelveFortune::Geollok);
        assert_eq!(twelve_fortune(Stem::Im, Branch::Hae), TwelveFortune::Geollok);
    }

    #[test]
    fn vigorous_stages() {
        assert!(TwelveFortune::Jangsaeng.is_vigorous());
        assert!(TwelveFortune::Jewang.is_vigorous());
        assert!(!TwelveFortune::Soe.is_vigorous());
    }
}
