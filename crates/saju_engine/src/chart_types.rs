//! Types for chart results.

use chrono::NaiveDateTime;
use saju_base::{
    Branch, CombinationRecord, Element, SpiritKiller, Stem, StemBranch, TenGod, TenGodGroup,
    TwelveFortune,
};
use saju_time::TimezoneAdjustment;
use serde::{Deserialize, Serialize};

use crate::archetype::TenGodCounts;
use crate::boundary::AppliedOverride;
use crate::lunar::{LunarDate, SolarTermPeriod};
use crate::luck::LuckCycles;
use crate::pillars::PillarPosition;

/// Rendering of a value that could not be determined.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Display `value`, or [`UNKNOWN_LABEL`] when absent.
pub fn label_or_unknown<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| UNKNOWN_LABEL.to_string(), |v| v.to_string())
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Gender, used only for the direction of luck cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Parse `male`/`m`/`남`/`남성` or `female`/`f`/`여`/`여성`.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "남" | "남성" | "남자" => Some(Self::Male),
            "female" | "f" | "여" | "여성" | "여자" => Some(Self::Female),
            _ => None,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Male => f.write_str("male"),
            Self::Female => f.write_str("female"),
        }
    }
}

// ---------------------------------------------------------------------------
// Pillars
// ---------------------------------------------------------------------------

/// A hidden stem with its relation to the day master.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenStem {
    pub stem: Stem,
    pub ten_god: Option<TenGod>,
    /// Counting weight by rank (primary first).
    pub weight: f64,
}

/// One annotated pillar.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pillar {
    pub position: PillarPosition,
    pub stem: Stem,
    pub branch: Branch,
    /// Stem followed by branch, in hanja.
    pub label: String,
    /// `None` for the day master itself.
    pub stem_ten_god: Option<TenGod>,
    pub branch_ten_god: Option<TenGod>,
    pub hidden_stems: Vec<HiddenStem>,
    pub fortune: Option<TwelveFortune>,
    pub spirit_killer: Option<SpiritKiller>,
    /// Element amplified by an applied combination.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhanced_element: Option<Element>,
    /// Stem before transmutation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_stem: Option<Stem>,
}

impl Pillar {
    /// An unannotated pillar.
    pub fn bare(position: PillarPosition, pair: StemBranch) -> Self {
        Self {
            position,
            stem: pair.stem,
            branch: pair.branch,
            label: pair.label(),
            stem_ten_god: None,
            branch_ten_god: None,
            hidden_stems: Vec::new(),
            fortune: None,
            spirit_killer: None,
            enhanced_element: None,
            original_stem: None,
        }
    }

    pub fn stem_branch(&self) -> StemBranch {
        StemBranch::new(self.stem, self.branch)
    }
}

/// The four annotated pillars.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FourPillars {
    pub year: Pillar,
    pub month: Pillar,
    pub day: Pillar,
    pub hour: Pillar,
}

impl FourPillars {
    /// The day stem, reference of every relation.
    pub fn day_master(&self) -> Stem {
        self.day.stem
    }

    pub fn get(&self, position: PillarPosition) -> &Pillar {
        match position {
            PillarPosition::Year => &self.year,
            PillarPosition::Month => &self.month,
            PillarPosition::Day => &self.day,
            PillarPosition::Hour => &self.hour,
        }
    }

    /// Pillars in chart order.
    pub fn iter(&self) -> impl Iterator<Item = &Pillar> {
        [&self.year, &self.month, &self.day, &self.hour].into_iter()
    }

    pub fn labels(&self) -> [&str; 4] {
        [
            self.year.label.as_str(),
            self.month.label.as_str(),
            self.day.label.as_str(),
            self.hour.label.as_str(),
        ]
    }
}

// ---------------------------------------------------------------------------
// Archetype
// ---------------------------------------------------------------------------

/// Special or normal archetype.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArchetypeCategory {
    Special,
    Normal,
}

/// Relative strength of the day master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strength {
    Strong,
    Weak,
    Neutral,
}

impl Strength {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Weak => "weak",
            Self::Neutral => "neutral",
        }
    }

    /// Hanja (身強 / 身弱 / 中和).
    pub const fn hanja(self) -> &'static str {
        match self {
            Self::Strong => "身強",
            Self::Weak => "身弱",
            Self::Neutral => "中和",
        }
    }
}

/// Named chart archetype (格局).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ArchetypeType {
    /// 建祿格: month branch is 比肩.
    Geollok,
    /// 羊刃格: month branch is 劫財.
    Yangin,
    Siksin,
    Sanggwan,
    Pyeonjae,
    Jeongjae,
    Pyeongwan,
    Jeonggwan,
    Pyeonin,
    Jeongin,
    /// 化氣格: the day master transmuted.
    Hwagi,
    /// 從旺格: overwhelming support.
    Jongwang,
    /// 從兒格: weak, output dominant.
    Jonga,
    /// 從財格: weak, wealth dominant.
    Jongjae,
    /// 從殺格: weak, officer dominant.
    Jongsal,
    /// Sentinel of the fallback chart.
    Unknown,
}

/// The ten normal archetypes, in Ten-God order.
pub const NORMAL_ARCHETYPES: [ArchetypeType; 10] = [
    ArchetypeType::Geollok,
    ArchetypeType::Yangin,
    ArchetypeType::Siksin,
    ArchetypeType::Sanggwan,
    ArchetypeType::Pyeonjae,
    ArchetypeType::Jeongjae,
    ArchetypeType::Pyeongwan,
    ArchetypeType::Jeonggwan,
    ArchetypeType::Pyeonin,
    ArchetypeType::Jeongin,
];

/// The five special archetypes.
pub const SPECIAL_ARCHETYPES: [ArchetypeType; 5] = [
    ArchetypeType::Hwagi,
    ArchetypeType::Jongwang,
    ArchetypeType::Jonga,
    ArchetypeType::Jongjae,
    ArchetypeType::Jongsal,
];

impl ArchetypeType {
    /// Normal archetype named after the month branch's Ten God.
    pub const fn from_month_ten_god(god: TenGod) -> Self {
        NORMAL_ARCHETYPES[god.index() as usize]
    }

    /// Position among [`NORMAL_ARCHETYPES`], `None` for special types.
    pub fn normal_index(self) -> Option<usize> {
        NORMAL_ARCHETYPES.iter().position(|t| *t == self)
    }

    pub const fn category(self) -> ArchetypeCategory {
        match self {
            Self::Hwagi | Self::Jongwang | Self::Jonga | Self::Jongjae | Self::Jongsal => {
                ArchetypeCategory::Special
            }
            _ => ArchetypeCategory::Normal,
        }
    }

    /// Name without the 格 suffix.
    pub const fn base_name(self) -> &'static str {
        match self {
            Self::Geollok => "建祿",
            Self::Yangin => "羊刃",
            Self::Siksin => "食神",
            Self::Sanggwan => "傷官",
            Self::Pyeonjae => "偏財",
            Self::Jeongjae => "正財",
            Self::Pyeongwan => "偏官",
            Self::Jeonggwan => "正官",
            Self::Pyeonin => "偏印",
            Self::Jeongin => "正印",
            Self::Hwagi => "化氣",
            Self::Jongwang => "從旺",
            Self::Jonga => "從兒",
            Self::Jongjae => "從財",
            Self::Jongsal => "從殺",
            Self::Unknown => UNKNOWN_LABEL,
        }
    }

    /// Full name with the 格 suffix.
    pub fn hanja(self) -> String {
        match self {
            Self::Unknown => UNKNOWN_LABEL.to_string(),
            _ => format!("{}格", self.base_name()),
        }
    }

    /// Parse a name with or without the 格 suffix.
    pub fn from_name(name: &str) -> Option<Self> {
        let base = name.trim().trim_end_matches('格');
        NORMAL_ARCHETYPES
            .into_iter()
            .chain(SPECIAL_ARCHETYPES)
            .find(|t| t.base_name() == base)
    }
}

impl std::fmt::Display for ArchetypeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.hanja())
    }
}

/// Chart classification.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Archetype {
    #[serde(rename = "type")]
    pub archetype_type: ArchetypeType,
    pub category: ArchetypeCategory,
    pub strength: Strength,
    /// Share of support in the weighted counts, 0–100, one decimal.
    pub score: f64,
    pub rationale: String,
}

impl Default for Archetype {
    fn default() -> Self {
        Self {
            archetype_type: ArchetypeType::Jeonggwan,
            category: ArchetypeCategory::Normal,
            strength: Strength::Neutral,
            score: 50.0,
            rationale: "insufficient data; default archetype".to_string(),
        }
    }
}

impl Archetype {
    /// Sentinel of the fallback chart.
    pub fn unknown() -> Self {
        Self {
            archetype_type: ArchetypeType::Unknown,
            category: ArchetypeCategory::Normal,
            strength: Strength::Neutral,
            score: 0.0,
            rationale: UNKNOWN_LABEL.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Favorable element
// ---------------------------------------------------------------------------

/// A group resolved to one of its members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedGod {
    pub group: TenGodGroup,
    pub ten_god: TenGod,
    pub element: Element,
}

/// The element judged to balance the chart, with its guardians.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavorableElement {
    pub primary: Option<ResolvedGod>,
    pub supporting_elements: Vec<Element>,
    /// Generates the favorable group.
    pub ally: Option<ResolvedGod>,
    /// Controls the favorable group.
    pub adversary: Option<ResolvedGod>,
    /// Generates the adversary.
    pub enemy: Option<ResolvedGod>,
}

impl FavorableElement {
    /// Sentinel of the fallback chart.
    pub fn unknown() -> Self {
        Self {
            primary: None,
            supporting_elements: Vec::new(),
            ally: None,
            adversary: None,
            enemy: None,
        }
    }

    pub fn element(&self) -> Option<Element> {
        self.primary.map(|p| p.element)
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// Everything computed for one birth.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartResult {
    pub pillars: FourPillars,
    pub day_master: Option<Stem>,
    pub archetype: Archetype,
    pub favorable: FavorableElement,
    pub counts: TenGodCounts,
    pub lunar_date: Option<LunarDate>,
    pub solar_term: Option<SolarTermPeriod>,
    pub adjustment: Option<TimezoneAdjustment>,
    pub adjusted_datetime: Option<NaiveDateTime>,
    pub gender: Option<Gender>,
    pub luck: Option<LuckCycles>,
    pub boundary_overrides: Vec<AppliedOverride>,
    pub combinations: Vec<CombinationRecord>,
    /// The birth date did not parse and today's date was used.
    pub date_substituted: bool,
    /// The pipeline failed; every value is a sentinel.
    pub fallback: bool,
}

impl ChartResult {
    /// Minimal chart returned when the pipeline fails: 甲子 four times with
    /// sentinel annotations.
    pub fn fallback(gender: Option<Gender>) -> Self {
        let pair = StemBranch::from_cycle_index(0);
        Self {
            pillars: FourPillars {
                year: Pillar::bare(PillarPosition::Year, pair),
                month: Pillar::bare(PillarPosition::Month, pair),
                day: Pillar::bare(PillarPosition::Day, pair),
                hour: Pillar::bare(PillarPosition::Hour, pair),
            },
            day_master: None,
            archetype: Archetype::unknown(),
            favorable: FavorableElement::unknown(),
            counts: TenGodCounts::default(),
            lunar_date: None,
            solar_term: None,
            adjustment: None,
            adjusted_datetime: None,
            gender,
            luck: None,
            boundary_overrides: Vec::new(),
            combinations: Vec::new(),
            date_substituted: false,
            fallback: true,
        }
    }

    /// Favorable element name, or the sentinel.
    pub fn favorable_element_label(&self) -> String {
        label_or_unknown(self.favorable.element())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gender_parse() {
        assert_eq!(Gender::parse("M"), Some(Gender::Male));
        assert_eq!(Gender::parse("여"), Some(Gender::Female));
        assert_eq!(Gender::parse("x"), None);
    }

    #[test]
    fn archetype_names() {
        assert_eq!(ArchetypeType::Geollok.hanja(), "建祿格");
        assert_eq!(ArchetypeType::from_name("偏印格"), Some(ArchetypeType::Pyeonin));
        assert_eq!(ArchetypeType::from_name("從殺"), Some(ArchetypeType::Jongsal));
        assert_eq!(ArchetypeType::from_name("unknown"), None);
        assert_eq!(
            ArchetypeType::from_month_ten_god(TenGod::Geopjae),
            ArchetypeType::Yangin
        );
        assert_eq!(ArchetypeType::Hwagi.category(), ArchetypeCategory::Special);
        assert_eq!(ArchetypeType::Pyeonin.normal_index(), Some(8));
    }

    #[test]
    fn fallback_chart_is_marked() {
        let chart = ChartResult::fallback(None);
        assert!(chart.fallback);
        assert_eq!(chart.pillars.labels(), ["甲子"; 4]);
        assert_eq!(chart.archetype.archetype_type, ArchetypeType::Unknown);
        assert_eq!(chart.favorable_element_label(), UNKNOWN_LABEL);
        assert_eq!(label_or_unknown(chart.pillars.day.stem_ten_god), "unknown");
    }
}
