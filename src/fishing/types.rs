//! Catch data structures.

use crate::core::constants::{LEGENDARY_UNLOCK_LEVEL, RARE_UNLOCK_LEVEL};
use serde::{Deserialize, Serialize};

pub use crate::minigames::balance::CatchDifficulty;

/// Loot category, ordered by rarity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CatchCategory {
    Junk = 0,
    Common = 1,
    Rare = 2,
    Legendary = 3,
}

impl CatchCategory {
    pub const ALL: [CatchCategory; 4] = [
        CatchCategory::Junk,
        CatchCategory::Common,
        CatchCategory::Rare,
        CatchCategory::Legendary,
    ];

    /// Rarity tier (0 = junk, 3 = legendary).
    pub fn tier(self) -> u8 {
        self as u8
    }

    /// Lowest player level at which this category can be rolled.
    pub fn unlock_level(self) -> u32 {
        match self {
            Self::Junk | Self::Common => 1,
            Self::Rare => RARE_UNLOCK_LEVEL,
            Self::Legendary => LEGENDARY_UNLOCK_LEVEL,
        }
    }

    pub fn is_unlocked_at(self, level: u32) -> bool {
        level >= self.unlock_level()
    }

    /// Best category a player at `level` may receive.
    pub fn max_unlocked_at(level: u32) -> Self {
        Self::ALL
            .iter()
            .rev()
            .copied()
            .find(|c| c.is_unlocked_at(level))
            .unwrap_or(Self::Common)
    }

    /// Step a locked category down until it is available at `level`.
    ///
    /// Legendary falls to Rare, Rare falls to Common. Junk and Common are
    /// always available.
    pub fn gated_for_level(self, level: u32) -> Self {
        let mut category = self;
        while !category.is_unlocked_at(level) {
            category = match category {
                Self::Legendary => Self::Rare,
                Self::Rare => Self::Common,
                other => return other,
            };
        }
        category
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Junk => "Junk",
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Legendary => "Legendary",
        }
    }
}

/// A named catch the world can produce.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchSpecies {
    pub name: &'static str,
    pub description: &'static str,
    pub category: CatchCategory,
    /// Stable key the renderer maps to artwork.
    pub visual_id: u8,
}

/// A provisional catch rolled at throw time.
///
/// Owned by the encounter until it is confirmed or discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct CatchCandidate {
    pub species: &'static CatchSpecies,
    /// Kilograms, rounded to two decimals. Junk weighs nothing.
    pub weight: f64,
}

impl CatchCandidate {
    pub fn new(species: &'static CatchSpecies, weight: f64) -> Self {
        Self { species, weight }
    }

    pub fn name(&self) -> &'static str {
        self.species.name
    }

    pub fn description(&self) -> &'static str {
        self.species.description
    }

    pub fn category(&self) -> CatchCategory {
        self.species.category
    }

    pub fn tier(&self) -> u8 {
        self.species.category.tier()
    }

    pub fn visual_id(&self) -> u8 {
        self.species.visual_id
    }

    /// How hard this catch fights on the reel.
    pub fn difficulty(&self) -> CatchDifficulty {
        CatchDifficulty::from_tier(self.tier())
    }

    pub fn is_junk(&self) -> bool {
        self.species.category == CatchCategory::Junk
    }
}
