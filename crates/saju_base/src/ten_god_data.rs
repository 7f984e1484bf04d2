//! Literal relation tables.
//!
//! Rows of [`STEM_TEN_GOD_MATRIX`] are the day master (甲..癸), columns the
//! target stem (甲..癸).

use crate::branch::Branch;
use crate::stem::Stem;
use crate::ten_god::TenGod;

use TenGod::*;

pub(crate) const STEM_TEN_GOD_MATRIX: [[TenGod; 10]; 10] = [
    // 甲
    [
        Bigyeon, Geopjae, Siksin, Sanggwan, Pyeonjae, Jeongjae, Pyeongwan, Jeonggwan, Pyeonin, Jeongin,
    ],
    // 乙
    [
        Geopjae, Bigyeon, Sanggwan, Siksin, Jeongjae, Pyeonjae, Jeonggwan, Pyeongwan, Jeongin, Pyeonin,
    ],
    // 丙
    [
        Pyeonin, Jeongin, Bigyeon, Geopjae, Siksin, Sanggwan, Pyeonjae, Jeongjae, Pyeongwan, Jeonggwan,
    ],
    // 丁
    [
        Jeongin, Pyeonin, Geopjae, Bigyeon, Sanggwan, Siksin, Jeongjae, Pyeonjae, Jeonggwan, Pyeongwan,
    ],
    // 戊
    [
        Pyeongwan, Jeonggwan, Pyeonin, Jeongin, Bigyeon, Geopjae, Siksin, Sanggwan, Pyeonjae, Jeongjae,
    ],
    // 己
    [
        Jeonggwan, Pyeongwan, Jeongin, Pyeonin, Geopjae, Bigyeon, Sanggwan, Siksin, Jeongjae, Pyeonjae,
    ],
    // 庚
    [
        Pyeonjae, Jeongjae, Pyeongwan, Jeonggwan, Pyeonin, Jeongin, Bigyeon, Geopjae, Siksin, Sanggwan,
    ],
    // 辛
    [
        Jeongjae, Pyeonjae, Jeonggwan, Pyeongwan, Jeongin, Pyeonin, Geopjae, Bigyeon, Sanggwan, Siksin,
    ],
    // 壬
    [
        Siksin, Sanggwan, Pyeonjae, Jeongjae, Pyeongwan, Jeonggwan, Pyeonin, Jeongin, Bigyeon, Geopjae,
    ],
    // 癸
    [
        Sanggwan, Siksin, Jeongjae, Pyeonjae, Jeonggwan, Pyeongwan, Jeongin, Pyeonin, Geopjae, Bigyeon,
    ],
];

/// Branches whose primary hidden stem has the opposite polarity to the
/// branch body (子午巳亥), keyed by day master. Reading these by the body
/// would flip each relation; the rows pin the hidden-stem reading, so they
/// agree with [`branch_ten_god_by_rule`](crate::ten_god::branch_ten_god_by_rule)
/// and serve as golden data for it. An external table replaces them wholesale.
pub(crate) const BRANCH_TEN_GOD_SPECIAL_CASES: &[(Stem, Branch, TenGod)] = &[
    // 子
    (Stem::Gap, Branch::Ja, Jeongin),
    (Stem::Eul, Branch::Ja, Pyeonin),
    (Stem::Byeong, Branch::Ja, Jeonggwan),
    (Stem::Jeong, Branch::Ja, Pyeongwan),
    (Stem::Mu, Branch::Ja, Jeongjae),
    (Stem::Gi, Branch::Ja, Pyeonjae),
    (Stem::Gyeong, Branch::Ja, Sanggwan),
    (Stem::Sin, Branch::Ja, Siksin),
    (Stem::Im, Branch::Ja, Geopjae),
    (Stem::Gye, Branch::Ja, Bigyeon),
    // 巳
    (Stem::Gap, Branch::Sa, Siksin),
    (Stem::Eul, Branch::Sa, Sanggwan),
    (Stem::Byeong, Branch::Sa, Bigyeon),
    (Stem::Jeong, Branch::Sa, Geopjae),
    (Stem::Mu, Branch::Sa, Pyeonin),
    (Stem::Gi, Branch::Sa, Jeongin),
    (Stem::Gyeong, Branch::Sa, Pyeongwan),
    (Stem::Sin, Branch::Sa, Jeonggwan),
    (Stem::Im, Branch::Sa, Pyeonjae),
    (Stem::Gye, Branch::Sa, Jeongjae),
    // 午
    (Stem::Gap, Branch::O, Sanggwan),
    (Stem::Eul, Branch::O, Siksin),
    (Stem::Byeong, Branch::O, Geopjae),
    (Stem::Jeong, Branch::O, Bigyeon),
    (Stem::Mu, Branch::O, Jeongin),
    (Stem::Gi, Branch::O, Pyeonin),
    (Stem::Gyeong, Branch::O, Jeonggwan),
    (Stem::Sin, Branch::O, Pyeongwan),
    (Stem::Im, Branch::O, Jeongjae),
    (Stem::Gye, Branch::O, Pyeonjae),
    // 亥
    (Stem::Gap, Branch::Hae, Pyeonin),
    (Stem::Eul, Branch::Hae, Jeongin),
    (Stem::Byeong, Branch::Hae, Pyeongwan),
    (Stem::Jeong, Branch::Hae, Jeonggwan),
    (Stem::Mu, Branch::Hae, Pyeonjae),
    (Stem::Gi, Branch::Hae, Jeongjae),
    (Stem::Gyeong, Branch::Hae, Siksin),
    (Stem::Sin, Branch::Hae, Sanggwan),
    (Stem::Im, Branch::Hae, Bigyeon),
    (Stem::Gye, Branch::Hae, Geopjae),
];
