//! Favorable-group lookup tables.

use saju_base::TenGodGroup;

use crate::chart_types::ArchetypeType;

/// Favorable group for normal archetypes.
///
/// Indexed by `[archetype (NORMAL_ARCHETYPES order)][strong = 0, weak = 1]
/// [most frequent group (generating order)]`. Neutral charts use the strong row.
///
/// A weak day master needs support whatever its archetype, so the weak rows
/// are shared: 印星 unless 印星 or 財星 already dominates, then 比劫. The
/// archetype shows up in the strong rows. With 比劫 dominant, official and
/// 祿刃 archetypes take 官星 while 傷官 takes 財星; the rest drain through
/// 食傷. With 官星 dominant, 偏官 is tamed by 食傷 where every other
/// archetype takes 財星.
pub(crate) const NORMAL_FAVORABLE: [[[TenGodGroup; 5]; 2]; 10] = {
    use TenGodGroup::*;
    [
        // 建祿
        [
            [Gwanseong, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 羊刃
        [
            [Gwanseong, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 食神
        [
            [Siksang, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 傷官
        [
            [Jaeseong, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 偏財
        [
            [Siksang, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 正財
        [
            [Siksang, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 偏官
        [
            [Gwanseong, Jaeseong, Siksang, Siksang, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 正官
        [
            [Gwanseong, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 偏印
        [
            [Siksang, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
        // 正印
        [
            [Siksang, Jaeseong, Siksang, Jaeseong, Jaeseong],
            [Inseong, Inseong, Bigeop, Inseong, Bigeop],
        ],
    ]
};

/// Favorable group for special archetypes.
pub(crate) const SPECIAL_FAVORABLE: [(ArchetypeType, TenGodGroup); 5] = [
    (ArchetypeType::Hwagi, TenGodGroup::Bigeop),
    (ArchetypeType::Jongwang, TenGodGroup::Bigeop),
    (ArchetypeType::Jonga, TenGodGroup::Siksang),
    (ArchetypeType::Jongjae, TenGodGroup::Jaeseong),
    (ArchetypeType::Jongsal, TenGodGroup::Gwanseong),
];

/// Ally, adversary and enemy of each favorable group, in generating order.
pub(crate) const GUARDIANS: [[TenGodGroup; 3]; 5] = {
    use TenGodGroup::*;
    [
        // 比劫
        [Inseong, Gwanseong, Jaeseong],
        // 食傷
        [Bigeop, Inseong, Gwanseong],
        // 財星
        [Siksang, Bigeop, Inseong],
        // 官星
        [Jaeseong, Siksang, Bigeop],
        // 印星
        [Gwanseong, Jaeseong, Siksang],
    ]
};

/// Favorable group when nothing else resolves.
pub(crate) const DEFAULT_FAVORABLE: TenGodGroup = TenGodGroup::Inseong;
