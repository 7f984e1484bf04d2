//! Twelve Spirit Killers (십이신살).
//!
//! The twelve tags cycle forward through the branches starting from 劫殺,
//! whose position depends on the 三合 group of the day master's element:
//! 亥卯未 (wood) starts at 申, 寅午戌 (fire, and earth with it) at 亥,
//! 巳酉丑 (metal) at 寅, 申子辰 (water) at 巳.

use serde::{Deserialize, Serialize};

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// The twelve spirit-killer tags in cycle order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpiritKiller {
    /// 劫殺
    Geopsal,
    /// 災殺
    Jaesal,
    /// 天殺
    Cheonsal,
    /// 地殺
    Jisal,
    /// 年殺 (桃花)
    Nyeonsal,
    /// 月殺
    Wolsal,
    /// 亡身殺
    Mangsinsal,
    /// 將星殺
    Jangseongsal,
    /// 攀鞍殺
    Banansal,
    /// 驛馬殺
    Yeongmasal,
    /// 六害殺
    Yukhaesal,
    /// 華蓋殺
    Hwagaesal,
}

pub const ALL_SPIRIT_KILLERS: [SpiritKiller; 12] = [
    SpiritKiller::Geopsal,
    SpiritKiller::Jaesal,
    SpiritKiller::Cheonsal,
    SpiritKiller::Jisal,
    SpiritKiller::Nyeonsal,
    SpiritKiller::Wolsal,
    SpiritKiller::Mangsinsal,
    SpiritKiller::Jangseongsal,
    SpiritKiller::Banansal,
    SpiritKiller::Yeongmasal,
    SpiritKiller::Yukhaesal,
    SpiritKiller::Hwagaesal,
];

const SPIRIT_KILLER_HANJA: [&str; 12] = [
    "劫殺", "災殺", "天殺", "地殺", "年殺", "月殺", "亡身殺", "將星殺", "攀鞍殺", "驛馬殺", "六害殺",
    "華蓋殺",
];
const SPIRIT_KILLER_HANGUL: [&str; 12] = [
    "겁살", "재살", "천살", "지살", "년살", "월살", "망신살", "장성살", "반안살", "역마살", "육해살",
    "화개살",
];

/// Rows: day master 甲..癸. Columns: branch 子..亥.
const SPIRIT_KILLER_MATRIX: [[SpiritKiller; 12]; 10] = {
    use SpiritKiller::*;
    [
        // 甲
        [
            Nyeonsal, Wolsal, Mangsinsal, Jangseongsal, Banansal, Yeongmasal,
            Yukhaesal, Hwagaesal, Geopsal, Jaesal, Cheonsal, Jisal,
        ],
        // 乙
        [
            Nyeonsal, Wolsal, Mangsinsal, Jangseongsal, Banansal, Yeongmasal,
            Yukhaesal, Hwagaesal, Geopsal, Jaesal, Cheonsal, Jisal,
        ],
        // 丙
        [
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
        ],
        // 丁
        [
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
        ],
        // 戊
        [
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
        ],
        // 己
        [
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
        ],
        // 庚
        [
            Yukhaesal, Hwagaesal, Geopsal, Jaesal, Cheonsal, Jisal,
            Nyeonsal, Wolsal, Mangsinsal, Jangseongsal, Banansal, Yeongmasal,
        ],
        // 辛
        [
            Yukhaesal, Hwagaesal, Geopsal, Jaesal, Cheonsal, Jisal,
            Nyeonsal, Wolsal, Mangsinsal, Jangseongsal, Banansal, Yeongmasal,
        ],
        // 壬
        [
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
        ],
        // 癸
        [
            Jangseongsal, Banansal, Yeongmasal, Yukhaesal, Hwagaesal, Geopsal,
            Jaesal, Cheonsal, Jisal, Nyeonsal, Wolsal, Mangsinsal,
        ],
    ]
};

impl SpiritKiller {
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn hanja(self) -> &'static str {
        SPIRIT_KILLER_HANJA[self.index() as usize]
    }

    pub const fn hangul(self) -> &'static str {
        SPIRIT_KILLER_HANGUL[self.index() as usize]
    }
}

impl std::fmt::Display for SpiritKiller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

/// Spirit-killer tag of `branch` for `day_master`.
pub const fn spirit_killer(day_master: Stem, branch: Branch) -> SpiritKiller {
    SPIRIT_KILLER_MATRIX[day_master.index() as usize][branch.index() as usize]
}

/// Branch carrying 劫殺 for a day-master element.
pub const fn geopsal_branch(element: Element) -> Branch {
    match element {
        Element::Wood => Branch::Sin,
        Element::Fire | Element::Earth => Branch::Hae,
        Element::Metal => Branch::In,
        Element::Water => Branch::Sa,
    }
}
