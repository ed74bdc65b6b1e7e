use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The four fixed rarity categories that partition the creature universe.
/// Opponent draws and roster selection are restricted to one active category.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    Normal,
    Rare,
    Legendary,
    Mythical,
}

const NORMAL_IDS: &[u32] = &[
    1, 4, 7, 10, 13, 16, 19, 21, 23, 25, 27, 29, 32, 35, 37, 39, 41, 43, 46, 48, 50, 52, 54, 56,
    58, 60, 63, 66, 69, 72, 74, 77, 79, 81, 83, 86, 88, 90, 92, 95, 98, 100, 102, 104, 106, 108,
    109, 111, 113, 114, 115, 116, 118, 120, 122, 123, 124, 125, 126, 127, 128, 129, 130, 131, 132,
    133, 134, 135, 136, 137, 138, 139, 140, 141, 142, 143,
];

const RARE_IDS: &[u32] = &[
    2, 3, 5, 6, 8, 9, 11, 12, 14, 15, 17, 18, 26, 28, 31, 34, 36, 38, 40, 42, 45, 47, 49, 51, 53,
    55, 57, 59, 62, 65, 68, 71, 73, 76, 78, 80, 82, 85, 87, 89, 91, 94, 97, 99, 101, 105, 110,
    112, 117, 119, 121,
];

const LEGENDARY_IDS: &[u32] = &[
    144, 145, 146, 150, 243, 244, 245, 249, 250, 377, 378, 379, 380, 381, 382, 383, 384, 480, 481,
    482, 483, 484, 485, 486, 487, 488, 638, 639, 640, 641, 642, 643, 644, 646, 716, 717, 718, 772,
    773, 785, 786, 787, 788, 789, 790, 791, 792, 888, 889, 890, 892, 894, 895, 896, 897, 898, 905,
    1001, 1002, 1003, 1004, 1007, 1008, 1014, 1015, 1016, 1017, 1024,
];

const MYTHICAL_IDS: &[u32] = &[
    151, 251, 385, 386, 490, 491, 492, 493, 494, 647, 648, 649, 720, 721, 800, 801, 802, 807, 808,
    809, 891, 892, 893,
];

impl Category {
    /// Catalog ids belonging to this category.
    pub fn member_ids(self) -> &'static [u32] {
        match self {
            Category::Normal => NORMAL_IDS,
            Category::Rare => RARE_IDS,
            Category::Legendary => LEGENDARY_IDS,
            Category::Mythical => MYTHICAL_IDS,
        }
    }

    pub fn contains(self, id: u32) -> bool {
        self.member_ids().contains(&id)
    }
}
