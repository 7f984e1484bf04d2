//! Ten-God (십신) relations to the day master.
//!
//! A relation combines the five-phase link between the day master and a
//! target (same, generates, controls, controlled by, generated by) with whether
//! their polarities match. The five links pair the ten relations into five
//! groups (比劫, 食傷, 財星, 官星, 印星).
//!
//! Branch relations are read from a special-case table first; pairs the table
//! does not cover fall back to the branch's primary hidden stem.

use serde::{Deserialize, Serialize};

use crate::branch::{ALL_BRANCHES, Branch};
use crate::element::Element;
use crate::error::BaseError;
use crate::stem::{ALL_STEMS, Stem};
use crate::ten_god_data::{BRANCH_TEN_GOD_SPECIAL_CASES, STEM_TEN_GOD_MATRIX};

// ---------------------------------------------------------------------------
// Ten gods
// ---------------------------------------------------------------------------

/// The ten relations to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenGod {
    /// 比肩: same element, same polarity.
    Bigyeon,
    /// 劫財: same element, opposite polarity.
    Geopjae,
    /// 食神: generated by the day master, same polarity.
    Siksin,
    /// 傷官: generated by the day master, opposite polarity.
    Sanggwan,
    /// 偏財: controlled by the day master, same polarity.
    Pyeonjae,
    /// 正財: controlled by the day master, opposite polarity.
    Jeongjae,
    /// 偏官 (七殺): controls the day master, same polarity.
    Pyeongwan,
    /// 正官: controls the day master, opposite polarity.
    Jeonggwan,
    /// 偏印: generates the day master, same polarity.
    Pyeonin,
    /// 正印: generates the day master, opposite polarity.
    Jeongin,
}

/// All ten relations in canonical order.
pub const ALL_TEN_GODS: [TenGod; 10] = [
    TenGod::Bigyeon,
    TenGod::Geopjae,
    TenGod::Siksin,
    TenGod::Sanggwan,
    TenGod::Pyeonjae,
    TenGod::Jeongjae,
    TenGod::Pyeongwan,
    TenGod::Jeonggwan,
    TenGod::Pyeonin,
    TenGod::Jeongin,
];

const TEN_GOD_HANJA: [&str; 10] = [
    "比肩", "劫財", "食神", "傷官", "偏財", "正財", "偏官", "正官", "偏印", "正印",
];
const TEN_GOD_HANGUL: [&str; 10] = [
    "비견", "겁재", "식신", "상관", "편재", "정재", "편관", "정관", "편인", "정인",
];

impl TenGod {
    /// 0-based canonical index.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Hanja name.
    pub const fn hanja(self) -> &'static str {
        TEN_GOD_HANJA[self.index() as usize]
    }

    /// Hangul name.
    pub const fn hangul(self) -> &'static str {
        TEN_GOD_HANGUL[self.index() as usize]
    }

    /// Parse a hanja or hangul name. `七殺` is accepted for 偏官.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        if name == "七殺" || name == "칠살" {
            return Some(Self::Pyeongwan);
        }
        TEN_GOD_HANJA
            .iter()
            .position(|h| *h == name)
            .or_else(|| TEN_GOD_HANGUL.iter().position(|h| *h == name))
            .map(|i| ALL_TEN_GODS[i])
    }

    /// Paired group this relation belongs to.
    pub const fn group(self) -> TenGodGroup {
        ALL_TEN_GOD_GROUPS[(self.index() / 2) as usize]
    }

    /// Whether the target shares the day master's polarity.
    pub const fn same_polarity(self) -> bool {
        self.index() % 2 == 0
    }
}

impl std::fmt::Display for TenGod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

// ---------------------------------------------------------------------------
// Groups
// ---------------------------------------------------------------------------

/// The five paired super-categories, in generating order from the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TenGodGroup {
    /// 比劫: same element.
    Bigeop,
    /// 食傷: element the day master generates.
    Siksang,
    /// 財星: element the day master controls.
    Jaeseong,
    /// 官星: element controlling the day master.
    Gwanseong,
    /// 印星: element generating the day master.
    Inseong,
}

/// All five groups in generating order.
pub const ALL_TEN_GOD_GROUPS: [TenGodGroup; 5] = [
    TenGodGroup::Bigeop,
    TenGodGroup::Siksang,
    TenGodGroup::Jaeseong,
    TenGodGroup::Gwanseong,
    TenGodGroup::Inseong,
];

impl TenGodGroup {
    /// 0-based index in generating order.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Group at a cyclic position; wraps modulo 5.
    pub const fn cyclic(position: i64) -> Self {
        ALL_TEN_GOD_GROUPS[position.rem_euclid(5) as usize]
    }

    /// Hanja name.
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Bigeop => "比劫",
            Self::Siksang => "食傷",
            Self::Jaeseong => "財星",
            Self::Gwanseong => "官星",
            Self::Inseong => "印星",
        }
    }

    /// Parse a hanja group name.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_TEN_GOD_GROUPS
            .into_iter()
            .find(|g| g.hanja() == name.trim())
    }

    /// Members in tie-break priority order: 比肩, 食神, 正財, 正官, 正印 first.
    pub const fn members(self) -> [TenGod; 2] {
        match self {
            Self::Bigeop => [TenGod::Bigyeon, TenGod::Geopjae],
            Self::Siksang => [TenGod::Siksin, TenGod::Sanggwan],
            Self::Jaeseong => [TenGod::Jeongjae, TenGod::Pyeonjae],
            Self::Gwanseong => [TenGod::Jeonggwan, TenGod::Pyeongwan],
            Self::Inseong => [TenGod::Jeongin, TenGod::Pyeonin],
        }
    }

    /// Element governed by this group for a day master of `day_element`.
    pub const fn element_for(self, day_element: Element) -> Element {
        Element::from_index(day_element.index() + self.index())
    }

    /// The group that generates this one.
    pub const fn generated_by(self) -> Self {
        Self::cyclic(self.index() as i64 - 1)
    }

    /// The group that controls this one.
    pub const fn controlled_by(self) -> Self {
        Self::cyclic(self.index() as i64 - 2)
    }

    /// Whether the group strengthens the day master (比劫 and 印星).
    pub const fn supports_day_master(self) -> bool {
        matches!(self, Self::Bigeop | Self::Inseong)
    }
}

impl std::fmt::Display for TenGodGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.hanja())
    }
}

// ---------------------------------------------------------------------------
// Stem relations
// ---------------------------------------------------------------------------

/// Ten-God relation of `target` to `day_master` from the five-phase rule.
pub const fn ten_god_between(day_master: Stem, target: Stem) -> TenGod {
    let link = (target.element().index() as i64 - day_master.element().index() as i64)
        .rem_euclid(5) as u8;
    let same = day_master.index() % 2 == target.index() % 2;
    ALL_TEN_GODS[(link * 2 + if same { 0 } else { 1 }) as usize]
}

/// Ten-God relation from the dense stem-pair matrix.
pub const fn stem_ten_god(day_master: Stem, target: Stem) -> TenGod {
    STEM_TEN_GOD_MATRIX[day_master.index() as usize][target.index() as usize]
}

// ---------------------------------------------------------------------------
// Branch relations
// ---------------------------------------------------------------------------

/// Special-cased (day master, branch) relations consulted before the
/// hidden-stem rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BranchTenGodTable {
    entries: [[Option<TenGod>; 12]; 10],
}

/// One row of an externally supplied branch relation table.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BranchTenGodRow {
    day_master: String,
    branch: String,
    ten_god: String,
}

impl Default for BranchTenGodTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for &(stem, branch, god) in BRANCH_TEN_GOD_SPECIAL_CASES {
            table.insert(stem, branch, god);
        }
        table
    }
}

impl BranchTenGodTable {
    /// A table with no special cases; every pair falls through to the rule.
    pub const fn empty() -> Self {
        Self {
            entries: [[None; 12]; 10],
        }
    }

    /// Parse a JSON array of `{"dayMaster", "branch", "tenGod"}` rows.
    pub fn from_json(json: &str) -> Result<Self, BaseError> {
        let rows: Vec<BranchTenGodRow> = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for row in rows {
            let stem = Stem::from_char(row.day_master.trim())
                .ok_or_else(|| BaseError::UnknownLabel(row.day_master.clone()))?;
            let branch = Branch::from_char(row.branch.trim())
                .ok_or_else(|| BaseError::UnknownLabel(row.branch.clone()))?;
            let god = TenGod::from_name(&row.ten_god)
                .ok_or_else(|| BaseError::UnknownLabel(row.ten_god.clone()))?;
            table.insert(stem, branch, god);
        }
        Ok(table)
    }

    /// Add or replace a special case.
    pub fn insert(&mut self, day_master: Stem, branch: Branch, god: TenGod) {
        self.entries[day_master.index() as usize][branch.index() as usize] = Some(god);
    }

    /// Special-cased relation, if any.
    pub fn get(&self, day_master: Stem, branch: Branch) -> Option<TenGod> {
        self.entries[day_master.index() as usize][branch.index() as usize]
    }

    /// Number of special-cased pairs.
    pub fn len(&self) -> usize {
        self.entries.iter().flatten().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Ten-God relation of `branch` to `day_master`.
    pub fn relation(&self, day_master: Stem, branch: Branch) -> TenGod {
        self.get(day_master, branch)
            .unwrap_or_else(|| branch_ten_god_by_rule(day_master, branch))
    }
}

/// General branch rule: relation of the primary hidden stem, or of the
/// branch's own element and polarity when it lists no hidden stem.
pub fn branch_ten_god_by_rule(day_master: Stem, branch: Branch) -> TenGod {
    match branch.hidden_stems().first() {
        Some(&primary) => ten_god_between(day_master, primary),
        None => ten_god_between(day_master, Stem::with(branch.element(), branch.polarity())),
    }
}

/// Every (day master, branch) pair, for exhaustive checks.
pub fn all_stem_branch_pairs() -> impl Iterator<Item = (Stem, Branch)> {
    ALL_STEMS
        .into_iter()
        .flat_map(|s| ALL_BRANCHES.into_iter().map(move |b| (s, b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Polarity;

    #[test]
    fn special_cases_differ_from_body_polarity() {
        for &(dm, branch, god) in BRANCH_TEN_GOD_SPECIAL_CASES {
            let body = Stem::with(branch.element(), branch.polarity());
            assert_ne!(ten_god_between(dm, body), god, "{dm}{branch}");
            assert_eq!(branch_ten_god_by_rule(dm, branch), god, "{dm}{branch}");
        }
    }

    #[test]
    fn matrix_matches_rule() {
        for dm in ALL_STEMS {
            for t in ALL_STEMS {
                assert_eq!(stem_ten_god(dm, t), ten_god_between(dm, t), "{dm} {t}");
            }
        }
    }

    #[test]
    fn self_is_bigyeon() {
        for s in ALL_STEMS {
            assert_eq!(ten_god_between(s, s), TenGod::Bigyeon);
        }
    }

    #[test]
    fn same_element_opposite_polarity_is_geopjae() {
        for s in ALL_STEMS {
            let sibling = Stem::with(s.element(), s.polarity().flip());
            assert_eq!(ten_god_between(s, sibling), TenGod::Geopjae);
        }
    }

    #[test]
    fn known_relations() {
        // 甲 day master
        assert_eq!(ten_god_between(Stem::Gap, Stem::Byeong), TenGod::Siksin);
        assert_eq!(ten_god_between(Stem::Gap, Stem::Gi), TenGod::Jeongjae);
        assert_eq!(ten_god_between(Stem::Gap, Stem::Sin), TenGod::Jeonggwan);
        assert_eq!(ten_god_between(Stem::Gap, Stem::Im), TenGod::Pyeonin);
        // 癸 day master
        assert_eq!(ten_god_between(Stem::Gye, Stem::Mu), TenGod::Jeonggwan);
        assert_eq!(ten_god_between(Stem::Gye, Stem::Sin), TenGod::Pyeonin);
    }

    #[test]
    fn groups_pair_members() {
        for g in ALL_TEN_GOD_GROUPS {
            for m in g.members() {
                assert_eq!(m.group(), g);
            }
        }
    }

    #[test]
    fn group_elements_for_water_day_master() {
        let w = Element::Water;
        assert_eq!(TenGodGroup::Bigeop.element_for(w), Element::Water);
        assert_eq!(TenGodGroup::Siksang.element_for(w), Element::Wood);
        assert_eq!(TenGodGroup::Jaeseong.element_for(w), Element::Fire);
        assert_eq!(TenGodGroup::Gwanseong.element_for(w), Element::Earth);
        assert_eq!(TenGodGroup::Inseong.element_for(w), Element::Metal);
    }

    #[test]
    fn group_cycle() {
        assert_eq!(TenGodGroup::Bigeop.generated_by(), TenGodGroup::Inseong);
        assert_eq!(TenGodGroup::Bigeop.controlled_by(), TenGodGroup::Gwanseong);
        assert_eq!(TenGodGroup::Jaeseong.controlled_by(), TenGodGroup::Bigeop);
    }

    #[test]
    fn special_cases_cover_swapped_branches() {
        let table = BranchTenGodTable::default();
        assert_eq!(table.len(), 40);
        assert_eq!(table.relation(Stem::Gap, Branch::Ja), TenGod::Jeongin);
        assert_eq!(table.relation(Stem::Gye, Branch::Sa), TenGod::Jeongjae);
        assert_eq!(table.relation(Stem::Gye, Branch::O), TenGod::Pyeonjae);
    }

    #[test]
    fn uncovered_pairs_use_primary_hidden_stem() {
        let table = BranchTenGodTable::default();
        assert!(table.get(Stem::Gap, Branch::In).is_none());
        assert_eq!(table.relation(Stem::Gap, Branch::In), TenGod::Bigyeon);
        assert_eq!(table.relation(Stem::Gye, Branch::Myo), TenGod::Siksin);
    }

    #[test]
    fn swapped_branch_differs_from_body_polarity() {
        // 子 is yang by body; 甲 sees yang water as 偏印, the table says 正印.
        let body = Stem::with(Branch::Ja.element(), Branch::Ja.polarity());
        assert_eq!(body.polarity(), Polarity::Yang);
        assert_eq!(ten_god_between(Stem::Gap, body), TenGod::Pyeonin);
        assert_eq!(
            BranchTenGodTable::default().relation(Stem::Gap, Branch::Ja),
            TenGod::Jeongin
        );
    }

    #[test]
    fn from_json_overrides() {
        let json = r#"[{"dayMaster": "甲", "branch": "子", "tenGod": "偏印"}]"#;
        let table = BranchTenGodTable::from_json(json).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.relation(Stem::Gap, Branch::Ja), TenGod::Pyeonin);
    }

    #[test]
    fn from_json_rejects_unknown_labels() {
        let json = r#"[{"dayMaster": "X", "branch": "子", "tenGod": "偏印"}]"#;
        assert!(matches!(
            BranchTenGodTable::from_json(json),
            Err(BaseError::UnknownLabel(_))
        ));
    }

    #[test]
    fn names_parse() {
        assert_eq!(TenGod::from_name("劫財"), Some(TenGod::Geopjae));
        assert_eq!(TenGod::from_name("칠살"), Some(TenGod::Pyeongwan));
        assert_eq!(TenGodGroup::from_name("印星"), Some(TenGodGroup::Inseong));
        assert_eq!(TenGod::from_name("unknown"), None);
    }

    #[test]
    fn pair_iterator_is_exhaustive() {
        assert_eq!(all_stem_branch_pairs().count(), 120);
    }
}
