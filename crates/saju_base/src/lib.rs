//! Sexagenary calendar primitives and Four Pillars rule tables.
//!
//! This crate provides:
//! - Heavenly stems, earthly branches, five phases and the 60-cycle
//! - The 24 solar terms and their month mapping
//! - Ten-God, Twelve-Fortune and Twelve-Spirit-Killer lookups keyed by day master
//! - Stem and branch combination tables with the adjacent-pillar transformer
//!
//! Every table is a read-only constant. Nothing here performs I/O.

pub mod branch;
pub mod combination;
pub mod element;
pub mod error;
pub mod fortune;
pub mod sexagenary;
pub mod solar_term;
pub mod spirit_killer;
pub mod stem;
pub mod ten_god;
mod ten_god_data;

pub use branch::{ALL_BRANCHES, Branch};
pub use combination::{
    BRANCH_COMBINATIONS, CombinationKind, CombinationOutcome, CombinationRecord,
    CombinationTransformer, STEM_COMBINATIONS, Suppression, branch_combination, seasonal_family,
    stem_combination, transmuted_stem,
};
pub use element::{ALL_ELEMENTS, Element, Polarity};
pub use error::BaseError;
pub use fortune::{ALL_TWELVE_FORTUNES, TwelveFortune, twelve_fortune};
pub use sexagenary::{StemBranch, year_stem_branch};
pub use solar_term::{ALL_SOLAR_TERMS, SolarTerm, month_number_from_civil};
pub use spirit_killer::{ALL_SPIRIT_KILLERS, SpiritKiller, spirit_killer};
pub use stem::{ALL_STEMS, Stem};
pub use ten_god::{
    ALL_TEN_GOD_GROUPS, ALL_TEN_GODS, BranchTenGodTable, TenGod, TenGodGroup,
    branch_ten_god_by_rule, stem_ten_god, ten_god_between,
};
