//! Relational annotations of each pillar against the day master.
//!
//! Stems use the stem-pair matrix, branches the special-case table before the
//! hidden-stem rule, and fortune stages and spirit killers their dense
//! matrices. The stems seen here are the ones left by the combination step.

use saju_base::{
    Branch, BranchTenGodTable, CombinationOutcome, Stem, StemBranch, spirit_killer, stem_ten_god,
    twelve_fortune,
};

use crate::chart_types::{FourPillars, HiddenStem, Pillar};
use crate::pillars::{ALL_POSITIONS, PillarPosition, RawPillars};

/// Counting weight of hidden stems by rank.
pub const HIDDEN_STEM_WEIGHTS: [f64; 3] = [0.5, 0.3, 0.2];

/// Hidden stems of `branch` with their relation to `day_master`.
pub fn hidden_stems(day_master: Stem, branch: Branch) -> Vec<HiddenStem> {
    branch
        .hidden_stems()
        .iter()
        .zip(HIDDEN_STEM_WEIGHTS)
        .map(|(&stem, weight)| HiddenStem {
            stem,
            ten_god: Some(stem_ten_god(day_master, stem)),
            weight,
        })
        .collect()
}

/// Annotate one pillar. The day pillar's own stem carries no relation.
pub fn annotate_pillar(
    table: &BranchTenGodTable,
    day_master: Stem,
    position: PillarPosition,
    pair: StemBranch,
) -> Pillar {
    Pillar {
        stem_ten_god: (position != PillarPosition::Day).then(|| stem_ten_god(day_master, pair.stem)),
        branch_ten_god: Some(table.relation(day_master, pair.branch)),
        hidden_stems: hidden_stems(day_master, pair.branch),
        fortune: Some(twelve_fortune(day_master, pair.branch)),
        spirit_killer: Some(spirit_killer(day_master, pair.branch)),
        ..Pillar::bare(position, pair)
    }
}

/// Annotate all four pillars using the stems after combination.
pub fn annotate_pillars(
    table: &BranchTenGodTable,
    raw: &RawPillars,
    outcome: &CombinationOutcome,
) -> FourPillars {
    let day_master = outcome.stems[PillarPosition::Day.index()];
    let [year, month, day, hour] = ALL_POSITIONS.map(|position| {
        let i = position.index();
        let pair = StemBranch::new(outcome.stems[i], raw.get(position).branch);
        Pillar {
            enhanced_element: outcome.enhanced_elements[i],
            original_stem: outcome.original_stems[i],
            ..annotate_pillar(table, day_master, position, pair)
        }
    });
    FourPillars {
        year,
        month,
        day,
        hour,
    }
}
