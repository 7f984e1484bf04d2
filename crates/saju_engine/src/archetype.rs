//! Archetype classification and favorable-element resolution.
//!
//! Ten-God occurrences are counted across the chart (stems and branches at
//! full weight, hidden stems by rank), aggregated into the five groups and
//! compared:
//!
//! ```text
//! score = (比劫 + 印星 + month bonus) / (total + month bonus) × 100
//! ```
//!
//! where the month bonus applies when the month branch supports the day
//! master. Counts are kept in tenths so that ties compare exactly.

use saju_base::{ALL_TEN_GODS, Stem, TenGod, TenGodGroup};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::archetype_data::{DEFAULT_FAVORABLE, GUARDIANS, NORMAL_FAVORABLE, SPECIAL_FAVORABLE};
use crate::chart_types::{
    Archetype, ArchetypeCategory, ArchetypeType, FavorableElement, FourPillars, ResolvedGod,
    Strength,
};

/// Weight of a visible stem or branch, tenths.
pub const VISIBLE_WEIGHT_TENTHS: u32 = 10;
/// Weight of hidden stems by rank, tenths.
pub const HIDDEN_WEIGHT_TENTHS: [u32; 3] = [5, 3, 2];
/// Added to support and total when the month branch supports the day master, tenths.
pub const MONTH_BONUS_TENTHS: u32 = 10;

/// Scores at or above this are strong.
pub const STRONG_THRESHOLD: f64 = 55.0;
/// Scores below this are weak.
pub const WEAK_THRESHOLD: f64 = 45.0;
/// Scores at or above this follow the day master (從旺格).
pub const FOLLOW_STRONG_THRESHOLD: f64 = 80.0;
/// Scores at or below this follow the dominant drain group.
pub const FOLLOW_WEAK_THRESHOLD: f64 = 20.0;

// ---------------------------------------------------------------------------
// Counting
// ---------------------------------------------------------------------------

/// Weighted Ten-God occurrences across a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TenGodCounts {
    tenths: [u32; 10],
}

impl TenGodCounts {
    pub fn add(&mut self, god: TenGod, tenths: u32) {
        self.tenths[god.index() as usize] += tenths;
    }

    pub fn tenths(&self, god: TenGod) -> u32 {
        self.tenths[god.index() as usize]
    }

    pub fn get(&self, god: TenGod) -> f64 {
        f64::from(self.tenths(god)) / 10.0
    }

    pub fn group_tenths(&self, group: TenGodGroup) -> u32 {
        group.members().iter().map(|g| self.tenths(*g)).sum()
    }

    pub fn group(&self, group: TenGodGroup) -> f64 {
        f64::from(self.group_tenths(group)) / 10.0
    }

    pub fn total_tenths(&self) -> u32 {
        self.tenths.iter().sum()
    }

    /// Group with the highest count; ties go to the earlier group in
    /// generating order.
    pub fn most_frequent_group(&self) -> TenGodGroup {
        let mut best = TenGodGroup::Bigeop;
        for group in saju_base::ALL_TEN_GOD_GROUPS {
            if self.group_tenths(group) > self.group_tenths(best) {
                best = group;
            }
        }
        best
    }

    /// Member of `group` with the higher count; ties go to the first member.
    pub fn pick_member(&self, group: TenGodGroup) -> TenGod {
        let [first, second] = group.members();
        if self.tenths(second) > self.tenths(first) {
            second
        } else {
            first
        }
    }
}

impl Serialize for TenGodCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(ALL_TEN_GODS.len()))?;
        for god in ALL_TEN_GODS {
            map.serialize_entry(god.hanja(), &self.get(god))?;
        }
        map.end()
    }
}

/// Count every annotated relation in the chart.
pub fn count_ten_gods(pillars: &FourPillars) -> TenGodCounts {
    let mut counts = TenGodCounts::default();
    for pillar in pillars.iter() {
        if let Some(god) = pillar.stem_ten_god {
            counts.add(god, VISIBLE_WEIGHT_TENTHS);
        }
        if let Some(god) = pillar.branch_ten_god {
            counts.add(god, VISIBLE_WEIGHT_TENTHS);
        }
        for (hidden, weight) in pillar.hidden_stems.iter().zip(HIDDEN_WEIGHT_TENTHS) {
            if let Some(god) = hidden.ten_god {
                counts.add(god, weight);
            }
        }
    }
    counts
}

// ---------------------------------------------------------------------------
// Archetype
// ---------------------------------------------------------------------------

/// Strength score, 0–100 rounded to one decimal; `None` for an empty chart.
pub fn strength_score(pillars: &FourPillars, counts: &TenGodCounts) -> Option<f64> {
    let bonus = pillars
        .month
        .branch_ten_god
        .filter(|g| g.group().supports_day_master())
        .map_or(0, |_| MONTH_BONUS_TENTHS);
    let support = counts.group_tenths(TenGodGroup::Bigeop)
        + counts.group_tenths(TenGodGroup::Inseong)
        + bonus;
    let total = counts.total_tenths() + bonus;
    if total == 0 {
        return None;
    }
    let score = f64::from(support) / f64::from(total) * 100.0;
    Some((score * 10.0).round() / 10.0)
}

pub fn strength_for(score: f64) -> Strength {
    if score >= STRONG_THRESHOLD {
        Strength::Strong
    } else if score < WEAK_THRESHOLD {
        Strength::Weak
    } else {
        Strength::Neutral
    }
}

/// The drain group (食傷, 財星 or 官星) with the highest count.
fn dominant_drain(counts: &TenGodCounts) -> TenGodGroup {
    let mut best = TenGodGroup::Siksang;
    for group in [TenGodGroup::Jaeseong, TenGodGroup::Gwanseong] {
        if counts.group_tenths(group) > counts.group_tenths(best) {
            best = group;
        }
    }
    best
}

/// Classify the chart. Never fails; an empty chart gets the default archetype.
pub fn resolve_archetype(pillars: &FourPillars, counts: &TenGodCounts) -> Archetype {
    let Some(score) = strength_score(pillars, counts) else {
        return Archetype::default();
    };
    let strength = strength_for(score);
    let summary = format!(
        "support {:.1} of {:.1}, score {score:.1} ({})",
        counts.group(TenGodGroup::Bigeop) + counts.group(TenGodGroup::Inseong),
        f64::from(counts.total_tenths()) / 10.0,
        strength.name()
    );

    if let Some(original) = pillars.day.original_stem {
        return Archetype {
            archetype_type: ArchetypeType::Hwagi,
            category: ArchetypeCategory::Special,
            strength,
            score,
            rationale: format!(
                "day master {} transmuted to {}; {summary}",
                original, pillars.day.stem
            ),
        };
    }
    if score >= FOLLOW_STRONG_THRESHOLD {
        return Archetype {
            archetype_type: ArchetypeType::Jongwang,
            category: ArchetypeCategory::Special,
            strength: Strength::Strong,
            score,
            rationale: format!("overwhelming support; {summary}"),
        };
    }
    if score <= FOLLOW_WEAK_THRESHOLD {
        let drain = dominant_drain(counts);
        let archetype_type = match drain {
            TenGodGroup::Siksang => ArchetypeType::Jonga,
            TenGodGroup::Jaeseong => ArchetypeType::Jongjae,
            _ => ArchetypeType::Jongsal,
        };
        return Archetype {
            archetype_type,
            category: ArchetypeCategory::Special,
            strength: Strength::Weak,
            score,
            rationale: format!("{drain} dominates a rootless day master; {summary}"),
        };
    }

    match pillars.month.branch_ten_god {
        Some(god) => Archetype {
            archetype_type: ArchetypeType::from_month_ten_god(god),
            category: ArchetypeCategory::Normal,
            strength,
            score,
            rationale: format!("month branch {} is {god}; {summary}", pillars.month.branch),
        },
        None => Archetype {
            strength,
            score,
            ..Archetype::default()
        },
    }
}

// ---------------------------------------------------------------------------
// Favorable element
// ---------------------------------------------------------------------------

/// Favorable group for an archetype given the chart's most frequent group.
pub fn favorable_group(archetype: &Archetype, most_frequent: TenGodGroup) -> TenGodGroup {
    if let Some((_, group)) = SPECIAL_FAVORABLE
        .iter()
        .find(|(t, _)| *t == archetype.archetype_type)
    {
        return *group;
    }
    let row = match archetype.strength {
        Strength::Weak => 1,
        Strength::Strong | Strength::Neutral => 0,
    };
    archetype
        .archetype_type
        .normal_index()
        .map_or(DEFAULT_FAVORABLE, |i| {
            NORMAL_FAVORABLE[i][row][most_frequent.index() as usize]
        })
}

/// Ally, adversary and enemy of a favorable group.
pub const fn guardians(group: TenGodGroup) -> [TenGodGroup; 3] {
    GUARDIANS[group.index() as usize]
}

fn resolve(group: TenGodGroup, counts: &TenGodCounts, day_master: Stem) -> ResolvedGod {
    ResolvedGod {
        group,
        ten_god: counts.pick_member(group),
        element: group.element_for(day_master.element()),
    }
}

/// Favorable element and guardians. Never empty.
pub fn resolve_favorable(
    archetype: &Archetype,
    counts: &TenGodCounts,
    day_master: Stem,
) -> FavorableElement {
    let group = favorable_group(archetype, counts.most_frequent_group());
    let primary = resolve(group, counts, day_master);
    let [ally, adversary, enemy] = guardians(group).map(|g| resolve(g, counts, day_master));
    FavorableElement {
        primary: Some(primary),
        supporting_elements: vec![ally.element, primary.element.generates()],
        ally: Some(ally),
        adversary: Some(adversary),
        enemy: Some(enemy),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use saju_base::{BranchTenGodTable, CombinationTransformer, Element, StemBranch};

    use crate::pillars::{PillarPosition, RawPillars};
    use crate::relations::annotate_pillars;

    fn chart(labels: [&str; 4]) -> FourPillars {
        let [year, month, day, hour] = labels.map(|l| StemBranch::parse(l).unwrap());
        let raw = RawPillars {
            year,
            month,
            day,
            hour,
            month_number: 1,
            solar_year: 2000,
        };
        let outcome = CombinationTransformer::new().transform(raw.stems(), raw.branches());
        annotate_pillars(&BranchTenGodTable::default(), &raw, &outcome)
    }

    #[test]
    fn golden_counts() {
        let p = chart(["癸卯", "辛酉", "癸巳", "戊午"]);
        let c = count_ten_gods(&p);
        assert_eq!(c.group_tenths(TenGodGroup::Bigeop), 10);
        assert_eq!(c.group_tenths(TenGodGroup::Siksang), 18);
        assert_eq!(c.group_tenths(TenGodGroup::Jaeseong), 32);
        assert_eq!(c.group_tenths(TenGodGroup::Gwanseong), 15);
        assert_eq!(c.group_tenths(TenGodGroup::Inseong), 31);
        assert_eq!(c.total_tenths(), 106);
        assert_eq!(c.most_frequent_group(), TenGodGroup::Jaeseong);
    }

    #[test]
    fn golden_archetype() {
        let p = chart(["癸卯", "辛酉", "癸巳", "戊午"]);
        let c = count_ten_gods(&p);
        let a = resolve_archetype(&p, &c);
        assert_eq!(a.score, 44.0);
        assert_eq!(a.strength, Strength::Weak);
        assert_eq!(a.archetype_type, ArchetypeType::Pyeonin);
        assert_eq!(a.category, ArchetypeCategory::Normal);
    }

    #[test]
    fn golden_favorable() {
        let p = chart(["癸卯", "辛酉", "癸巳", "戊午"]);
        let c = count_ten_gods(&p);
        let a = resolve_archetype(&p, &c);
        let f = resolve_favorable(&a, &c, p.day_master());
        let primary = f.primary.unwrap();
        assert_eq!(primary.ten_god, TenGod::Bigyeon);
        assert_eq!(primary.element, Element::Water);
        assert_eq!(f.ally.unwrap().ten_god, TenGod::Pyeonin);
        assert_eq!(f.adversary.unwrap().ten_god, TenGod::Jeonggwan);
        assert_eq!(f.enemy.unwrap().ten_god, TenGod::Jeongjae);
        assert_eq!(f.supporting_elements, [Element::Metal, Element::Wood]);
    }

    #[test]
    fn ties_prefer_first_member() {
        let mut c = TenGodCounts::default();
        assert_eq!(c.pick_member(TenGodGroup::Inseong), TenGod::Jeongin);
        c.add(TenGod::Pyeonin, 5);
        assert_eq!(c.pick_member(TenGodGroup::Inseong), TenGod::Pyeonin);
        c.add(TenGod::Jeongin, 5);
        assert_eq!(c.pick_member(TenGodGroup::Inseong), TenGod::Jeongin);
        assert_eq!(TenGodCounts::default().most_frequent_group(), TenGodGroup::Bigeop);
    }

    #[test]
    fn thresholds() {
        assert_eq!(strength_for(55.0), Strength::Strong);
        assert_eq!(strength_for(54.9), Strength::Neutral);
        assert_eq!(strength_for(45.0), Strength::Neutral);
        assert_eq!(strength_for(44.9), Strength::Weak);
    }

    #[test]
    fn strongly_supported_chart_follows_day_master() {
        // 甲 day surrounded by wood and water.
        let p = chart(["甲寅", "甲寅", "甲寅", "壬子"]);
        let c = count_ten_gods(&p);
        let a = resolve_archetype(&p, &c);
        assert_eq!(a.archetype_type, ArchetypeType::Jongwang);
        assert_eq!(a.category, ArchetypeCategory::Special);
        let f = resolve_favorable(&a, &c, p.day_master());
        assert_eq!(f.primary.unwrap().group, TenGodGroup::Bigeop);
    }

    #[test]
    fn rootless_day_master_follows_wealth() {
        // 甲 day among earth.
        let p = chart(["戊辰", "己未", "甲戌", "戊辰"]);
        let c = count_ten_gods(&p);
        let a = resolve_archetype(&p, &c);
        assert!(a.score <= FOLLOW_WEAK_THRESHOLD, "{}", a.score);
        assert_eq!(a.archetype_type, ArchetypeType::Jongjae);
        let f = resolve_favorable(&a, &c, p.day_master());
        assert_eq!(f.primary.unwrap().element, Element::Earth);
    }

    #[test]
    fn transmuted_day_master_is_hwagi() {
        // 甲 month and 己 day combine into earth in a 辰 month.
        let p = chart(["丙寅", "甲辰", "己巳", "丙午"]);
        assert!(p.get(PillarPosition::Month).original_stem.is_some());
        assert!(p.day.original_stem.is_none());
        let p = chart(["丙寅", "己辰", "甲巳", "丙午"]);
        assert_eq!(p.day.original_stem, Some(Stem::Gap));
        let c = count_ten_gods(&p);
        assert_eq!(resolve_archetype(&p, &c).archetype_type, ArchetypeType::Hwagi);
    }

    #[test]
    fn every_normal_archetype_resolves() {
        let c = TenGodCounts::default();
        for t in crate::chart_types::NORMAL_ARCHETYPES {
            for strength in [Strength::Strong, Strength::Weak, Strength::Neutral] {
                let a = Archetype {
                    archetype_type: t,
                    strength,
                    ..Archetype::default()
                };
                let f = resolve_favorable(&a, &c, Stem::Gap);
                assert!(f.primary.is_some());
                assert_eq!(f.supporting_elements.len(), 2);
            }
        }
    }

    #[test]
    fn strong_rows_carry_the_archetype() {
        use ArchetypeType::*;
        let strong = |t, most| {
            let a = Archetype {
                archetype_type: t,
                strength: Strength::Strong,
                ..Archetype::default()
            };
            favorable_group(&a, most)
        };
        for (t, want) in [
            (Geollok, TenGodGroup::Gwanseong),
            (Jeonggwan, TenGodGroup::Gwanseong),
            (Sanggwan, TenGodGroup::Jaeseong),
            (Siksin, TenGodGroup::Siksang),
            (Jeongin, TenGodGroup::Siksang),
        ] {
            assert_eq!(strong(t, TenGodGroup::Bigeop), want, "{t:?}");
        }
        assert_eq!(strong(Pyeongwan, TenGodGroup::Gwanseong), TenGodGroup::Siksang);
        assert_eq!(strong(Jeonggwan, TenGodGroup::Gwanseong), TenGodGroup::Jaeseong);

        for t in crate::chart_types::NORMAL_ARCHETYPES {
            let weak = Archetype {
                archetype_type: t,
                strength: Strength::Weak,
                ..Archetype::default()
            };
            assert_eq!(favorable_group(&weak, TenGodGroup::Gwanseong), TenGodGroup::Inseong);
            assert_eq!(favorable_group(&weak, TenGodGroup::Jaeseong), TenGodGroup::Bigeop);
        }
    }

    #[test]
    fn counts_serialize_by_name() {
        let mut c = TenGodCounts::default();
        c.add(TenGod::Bigyeon, 15);
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["比肩"], 1.5);
        assert_eq!(json["正印"], 0.0);
    }
}
