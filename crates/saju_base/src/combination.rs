//! Stem combinations (천간합) and branch combinations (지지육합).
//!
//! [`CombinationTransformer`] scans the three adjacent pillar pairs
//! (year–month, month–day, day–hour). A stem combination may transmute both
//! stems into the combination's element; a branch combination only marks the
//! element as enhanced on both pillars and leaves the branches untouched.
//!
//! Suppression:
//! - a member also combined from its other neighbour is contested and nothing
//!   transmutes;
//! - a branch pair flanked by a clashing (沖) branch is cancelled.

use serde::Serialize;

use crate::branch::Branch;
use crate::element::Element;
use crate::stem::Stem;

/// Pillar positions in chart order.
pub const PILLAR_COUNT: usize = 4;

/// Index of the month pillar, whose branch decides the season.
pub const MONTH_POSITION: usize = 1;

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// The five stem combinations and their transformed element.
pub const STEM_COMBINATIONS: [(Stem, Stem, Element); 5] = [
    (Stem::Gap, Stem::Gi, Element::Earth),
    (Stem::Eul, Stem::Gyeong, Element::Metal),
    (Stem::Byeong, Stem::Sin, Element::Water),
    (Stem::Jeong, Stem::Im, Element::Wood),
    (Stem::Mu, Stem::Gye, Element::Fire),
];

/// The six branch combinations and their shared element.
pub const BRANCH_COMBINATIONS: [(Branch, Branch, Element); 6] = [
    (Branch::Ja, Branch::Chuk, Element::Earth),
    (Branch::In, Branch::Hae, Element::Wood),
    (Branch::Myo, Branch::Sul, Element::Fire),
    (Branch::Jin, Branch::Yu, Element::Metal),
    (Branch::Sa, Branch::Sin, Element::Water),
    (Branch::O, Branch::Mi, Element::Fire),
];

/// Element produced when `a` and `b` combine, in either order.
pub fn stem_combination(a: Stem, b: Stem) -> Option<Element> {
    STEM_COMBINATIONS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, e)| *e)
}

/// Element shared when `a` and `b` combine, in either order.
pub fn branch_combination(a: Branch, b: Branch) -> Option<Element> {
    BRANCH_COMBINATIONS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, e)| *e)
}

/// Month branches in which an element is in season.
pub const fn seasonal_family(element: Element) -> &'static [Branch] {
    match element {
        Element::Wood => &[Branch::In, Branch::Myo, Branch::Jin],
        Element::Fire => &[Branch::Sa, Branch::O, Branch::Mi],
        Element::Earth => &[Branch::Jin, Branch::Sul, Branch::Chuk, Branch::Mi],
        Element::Metal => &[Branch::Sin, Branch::Yu, Branch::Sul],
        Element::Water => &[Branch::Hae, Branch::Ja, Branch::Chuk],
    }
}

/// The stem a combined stem turns into: the target element, own polarity.
pub const fn transmuted_stem(stem: Stem, element: Element) -> Stem {
    Stem::with(element, stem.polarity())
}

// ---------------------------------------------------------------------------
// Transformer
// ---------------------------------------------------------------------------

/// Which layer a combination was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombinationKind {
    Stem,
    Branch,
}

/// Why a detected combination did not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Suppression {
    /// A member is also combined from its other neighbour.
    Contested,
    /// A clashing branch sits next to the pair.
    Clash,
    /// The month branch is out of season or a controlling element is present.
    PreconditionFailed,
}

/// A detected adjacent-pair combination and its outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CombinationRecord {
    pub kind: CombinationKind,
    /// Left position of the pair; the right member is `left + 1`.
    pub left: usize,
    pub element: Element,
    /// `None` when the combination applied.
    pub suppressed: Option<Suppression>,
}

impl CombinationRecord {
    pub fn applied(&self) -> bool {
        self.suppressed.is_none()
    }
}

/// Result of running the transformer over one chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CombinationOutcome {
    /// Stems after transmutation.
    pub stems: [Stem; PILLAR_COUNT],
    /// Stem before transmutation, only where it changed.
    pub original_stems: [Option<Stem>; PILLAR_COUNT],
    /// Element amplified by an applied combination.
    pub enhanced_elements: [Option<Element>; PILLAR_COUNT],
    /// Every combination detected, applied or not.
    pub records: Vec<CombinationRecord>,
}

impl CombinationOutcome {
    /// Whether the stem at `position` was transmuted.
    pub fn transmuted(&self, position: usize) -> bool {
        self.original_stems
            .get(position)
            .is_some_and(|s| s.is_some())
    }

    /// Records of combinations that applied.
    pub fn applied(&self) -> impl Iterator<Item = &CombinationRecord> {
        self.records.iter().filter(|r| r.applied())
    }
}

/// Detects and applies adjacent-pillar combinations.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombinationTransformer;

impl CombinationTransformer {
    pub const fn new() -> Self {
        Self
    }

    /// Run stem and branch passes over the chart's stems and branches.
    pub fn transform(
        &self,
        stems: [Stem; PILLAR_COUNT],
        branches: [Branch; PILLAR_COUNT],
    ) -> CombinationOutcome {
        let mut outcome = CombinationOutcome {
            stems,
            original_stems: [None; PILLAR_COUNT],
            enhanced_elements: [None; PILLAR_COUNT],
            records: Vec::new(),
        };
        self.stem_pass(&stems, &branches, &mut outcome);
        self.branch_pass(&stems, &branches, &mut outcome);
        outcome
    }

    fn stem_pass(
        &self,
        stems: &[Stem; PILLAR_COUNT],
        branches: &[Branch; PILLAR_COUNT],
        outcome: &mut CombinationOutcome,
    ) {
        let month_branch = branches[MONTH_POSITION];
        for left in 0..PILLAR_COUNT - 1 {
            let right = left + 1;
            let Some(element) = stem_combination(stems[left], stems[right]) else {
                continue;
            };
            let contested = (left > 0 && stem_combination(stems[left - 1], stems[left]).is_some())
                || (right + 1 < PILLAR_COUNT
                    && stem_combination(stems[right], stems[right + 1]).is_some());
            let suppressed = if contested {
                Some(Suppression::Contested)
            } else if !seasonal_family(element).contains(&month_branch)
                || controller_outside(stems, left, right, element)
            {
                Some(Suppression::PreconditionFailed)
            } else {
                None
            };
            if suppressed.is_none() {
                for pos in [left, right] {
                    let changed = transmuted_stem(stems[pos], element);
                    if changed != stems[pos] {
                        outcome.original_stems[pos] = Some(stems[pos]);
                        outcome.stems[pos] = changed;
                    }
                }
            }
            outcome.records.push(CombinationRecord {
                kind: CombinationKind::Stem,
                left,
                element,
                suppressed,
            });
        }
    }

    fn branch_pass(
        &self,
        stems: &[Stem; PILLAR_COUNT],
        branches: &[Branch; PILLAR_COUNT],
        outcome: &mut CombinationOutcome,
    ) {
        for left in 0..PILLAR_COUNT - 1 {
            let right = left + 1;
            let Some(element) = branch_combination(branches[left], branches[right]) else {
                continue;
            };
            let contested = (left > 0
                && branch_combination(branches[left - 1], branches[left]).is_some())
                || (right + 1 < PILLAR_COUNT
                    && branch_combination(branches[right], branches[right + 1]).is_some());
            let pair = [branches[left], branches[right]];
            let clashes = |flank: Branch| pair.iter().any(|b| b.opposite() == flank);
            let clash = (left > 0 && clashes(branches[left - 1]))
                || (right + 1 < PILLAR_COUNT && clashes(branches[right + 1]));
            let supported = stems.iter().any(|s| s.element() == element)
                && !stems.iter().any(|s| s.element() == element.controlled_by());
            let suppressed = if clash {
                Some(Suppression::Clash)
            } else if contested {
                Some(Suppression::Contested)
            } else if !supported {
                Some(Suppression::PreconditionFailed)
            } else {
                None
            };
            if suppressed.is_none() {
                outcome.enhanced_elements[left] = Some(element);
                outcome.enhanced_elements[right] = Some(element);
            }
            outcome.records.push(CombinationRecord {
                kind: CombinationKind::Branch,
                left,
                element,
                suppressed,
            });
        }
    }
}

/// Whether a stem outside the pair carries the element controlling `element`.
fn controller_outside(
    stems: &[Stem; PILLAR_COUNT],
    left: usize,
    right: usize,
    element: Element,
) -> bool {
    let controller = element.controlled_by();
    stems
        .iter()
        .enumerate()
        .any(|(i, s)| i != left && i != right && s.element() == controller)
}
