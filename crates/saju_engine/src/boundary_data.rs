//! Embedded boundary-override tables.

use saju_base::{Branch, Stem, StemBranch};

const fn sb(stem: Stem, branch: Branch) -> StemBranch {
    StemBranch::new(stem, branch)
}

/// One embedded 立春 row.
pub(crate) struct SpringEntry {
    pub date: (i32, u32, u32),
    /// Local clock time of the boundary instant.
    pub time: (u32, u32),
    pub place: Option<&'static str>,
    /// Year and month pillars before the boundary.
    pub before: [StemBranch; 2],
    /// Year and month pillars from the boundary on.
    pub after: [StemBranch; 2],
}

/// 立春 instants, Korea Standard Time unless a place is given.
pub(crate) const SPRING_START_ENTRIES: &[SpringEntry] = {
    use Branch::{Chuk, Hae, In, Ja, Jin, Myo, Sa};
    use Stem::*;
    &[
        SpringEntry {
            date: (2020, 2, 4),
            time: (18, 3),
            place: None,
            before: [sb(Gi, Hae), sb(Jeong, Chuk)],
            after: [sb(Gyeong, Ja), sb(Mu, In)],
        },
        SpringEntry {
            date: (2021, 2, 3),
            time: (23, 59),
            place: None,
            before: [sb(Gyeong, Ja), sb(Gi, Chuk)],
            after: [sb(Sin, Chuk), sb(Gyeong, In)],
        },
        SpringEntry {
            date: (2022, 2, 4),
            time: (5, 51),
            place: None,
            before: [sb(Sin, Chuk), sb(Sin, Chuk)],
            after: [sb(Im, In), sb(Im, In)],
        },
        SpringEntry {
            date: (2023, 2, 4),
            time: (11, 43),
            place: None,
            before: [sb(Im, In), sb(Gye, Chuk)],
            after: [sb(Gye, Myo), sb(Gap, In)],
        },
        SpringEntry {
            date: (2024, 2, 4),
            time: (17, 27),
            place: None,
            before: [sb(Gye, Myo), sb(Eul, Chuk)],
            after: [sb(Gap, Jin), sb(Byeong, In)],
        },
        SpringEntry {
            date: (2024, 2, 4),
            time: (3, 27),
            place: Some("New York"),
            before: [sb(Gye, Myo), sb(Eul, Chuk)],
            after: [sb(Gap, Jin), sb(Byeong, In)],
        },
        SpringEntry {
            date: (2024, 2, 4),
            time: (0, 27),
            place: Some("Los Angeles"),
            before: [sb(Gye, Myo), sb(Eul, Chuk)],
            after: [sb(Gap, Jin), sb(Byeong, In)],
        },
        SpringEntry {
            date: (2024, 2, 4),
            time: (8, 27),
            place: Some("London"),
            before: [sb(Gye, Myo), sb(Eul, Chuk)],
            after: [sb(Gap, Jin), sb(Byeong, In)],
        },
        SpringEntry {
            date: (2025, 2, 3),
            time: (23, 10),
            place: None,
            before: [sb(Gap, Jin), sb(Jeong, Chuk)],
            after: [sb(Eul, Sa), sb(Mu, In)],
        },
    ]
};

/// Hour stem for births in [13:00, 13:30), indexed by day stem.
pub(crate) const MIDDAY_WINDOW_STEMS: [Stem; 10] = {
    use Stem::*;
    [Gyeong, Im, Gap, Byeong, Mu, Gyeong, Im, Gap, Byeong, Mu]
};

/// Hour stem for births in [23:00, 23:30), indexed by day stem.
pub(crate) const MIDNIGHT_WINDOW_STEMS: [Stem; 10] = {
    use Stem::*;
    [Eul, Jeong, Gi, Sin, Gye, Eul, Jeong, Gi, Sin, Gye]
};
