//! Static set of world-object types the movement heuristic steers around.

use once_cell::sync::Lazy;

use crate::grid::ObjectId;

/// Aggressive animals, grouped by species.
const DEFAULT_HAZARD_IDS: [i32; 35] = [
    2156, // mosquito swarm
    764, 1385, // rattle snakes
    1323, 1328, 1333, 1334, 1339, 1341, 1347, 1348, // boars
    418, 1630, 420, 428, 429, 1761, 1640, 1642, 1636, 1635, 1631, 1748, 1641, // wolves
    628, 655, 653, 644, 631, 646, 635, 645, 632, 637, 654, // grizzly bears
];

static DEFAULT_HAZARDS: Lazy<HazardSet> =
    Lazy::new(|| HazardSet::new(DEFAULT_HAZARD_IDS.iter().copied().map(ObjectId)));

/// Immutable, sorted set of hazardous object ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HazardSet {
    ids: Box<[ObjectId]>,
}

impl HazardSet {
    /// Builds a set from any id sequence; duplicates are dropped.
    #[must_use]
    pub fn new(members: impl IntoIterator<Item = ObjectId>) -> Self {
        let mut ids: Vec<ObjectId> = members.into_iter().collect();
        ids.sort_unstable();
        ids.dedup();
        Self {
            ids: ids.into_boxed_slice(),
        }
    }

    /// Whether `id` is hazardous.
    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.ids.binary_search(&id).is_ok()
    }

    /// Number of distinct hazardous ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Whether nothing is considered hazardous.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = ObjectId> + '_ {
        self.ids.iter().copied()
    }
}

impl Default for HazardSet {
    fn default() -> Self {
        DEFAULT_HAZARDS.clone()
    }
}
