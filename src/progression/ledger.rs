//! Experience, level and lifetime catch totals.
//!
//! Every mutation is written through to the backing store immediately.
//! Store failures are logged and otherwise ignored; the in-memory state
//! stays authoritative for the session.

use super::gallery::SharedGallery;
use super::lock_recover;
use super::store::{KeyValueStore, MemoryStore, StoreMap};
use crate::core::constants::{
    BASE_XP_PER_CATCH, KEY_CURRENT_EXP, KEY_CURRENT_LEVEL, KEY_TOTAL_CAUGHT, KEY_TOTAL_WEIGHT,
    LEVEL_XP_REQUIREMENTS, MAX_LEVEL,
};
use crate::fishing::CatchCategory;
use std::sync::{Arc, Mutex};

/// Experience needed to reach `level`; 0 for levels outside the table.
pub fn level_requirement(level: u32) -> u32 {
    if level < 1 {
        return 0;
    }
    LEVEL_XP_REQUIREMENTS
        .get(level as usize)
        .copied()
        .unwrap_or(0)
}

/// Highest level reachable from `current` with `exp`, walking upward.
fn climb_levels(current: u32, exp: u32) -> u32 {
    let mut level = current;
    while level < MAX_LEVEL && exp >= level_requirement(level + 1) {
        level += 1;
    }
    level
}

/// The persisted progression counters.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressionState {
    pub current_exp: u32,
    /// 1..=MAX_LEVEL, only ever rises outside an explicit reset.
    pub current_level: u32,
    pub total_caught: u32,
    pub total_weight: f64,
}

impl Default for ProgressionState {
    fn default() -> Self {
        Self {
            current_exp: 0,
            current_level: 1,
            total_caught: 0,
            total_weight: 0.0,
        }
    }
}

impl ProgressionState {
    fn to_store_map(&self) -> StoreMap {
        let mut map = StoreMap::new();
        map.insert(KEY_CURRENT_EXP.to_string(), self.current_exp.into());
        map.insert(KEY_CURRENT_LEVEL.to_string(), self.current_level.into());
        map.insert(KEY_TOTAL_CAUGHT.to_string(), self.total_caught.into());
        map.insert(KEY_TOTAL_WEIGHT.to_string(), self.total_weight.into());
        map
    }

    /// Rebuild from stored entries, defaulting anything missing or malformed.
    fn from_store_map(map: &StoreMap) -> Self {
        let defaults = Self::default();

        let count = |key: &str, default: u32| -> u32 {
            match map.get(key) {
                None => default,
                Some(value) => match value.as_i64().and_then(|v| u32::try_from(v).ok()) {
                    Some(v) => v,
                    None => {
                        tracing::warn!(key, ?value, "malformed progression value, using default");
                        default
                    }
                },
            }
        };

        let total_weight = match map.get(KEY_TOTAL_WEIGHT) {
            None => defaults.total_weight,
            Some(value) => match value.as_f64().filter(|w| *w >= 0.0) {
                Some(w) => w,
                None => {
                    tracing::warn!(key = KEY_TOTAL_WEIGHT, ?value, "malformed progression value, using default");
                    defaults.total_weight
                }
            },
        };

        let current_exp = count(KEY_CURRENT_EXP, defaults.current_exp);
        let stored_level = count(KEY_CURRENT_LEVEL, defaults.current_level).clamp(1, MAX_LEVEL);

        Self {
            current_exp,
            current_level: climb_levels(stored_level, current_exp),
            total_caught: count(KEY_TOTAL_CAUGHT, defaults.total_caught),
            total_weight,
        }
    }
}

/// What a single award did, for presentation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AwardSummary {
    pub exp_gained: u32,
    pub new_level: u32,
    pub leveled_up: bool,
}

/// Player progression backed by a key-value store.
pub struct ProgressionLedger {
    state: ProgressionState,
    just_leveled: bool,
    store: Box<dyn KeyValueStore + Send>,
    gallery: Option<SharedGallery>,
}

impl std::fmt::Debug for ProgressionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressionLedger")
            .field("state", &self.state)
            .field("just_leveled", &self.just_leveled)
            .finish_non_exhaustive()
    }
}

impl ProgressionLedger {
    /// Load from `store`, starting fresh if it is empty or unreadable.
    pub fn load(store: impl KeyValueStore + Send + 'static) -> Self {
        let state = match store.load() {
            Ok(map) => ProgressionState::from_store_map(&map),
            Err(e) => {
                tracing::warn!(error = %e, "could not load progression, starting fresh");
                ProgressionState::default()
            }
        };
        tracing::debug!(?state, "progression loaded");

        Self {
            state,
            just_leveled: false,
            store: Box::new(store),
            gallery: None,
        }
    }

    /// Fresh ledger with nothing persisted outside the process.
    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }

    /// Gallery to wipe alongside progression on reset.
    pub fn attach_gallery(&mut self, gallery: SharedGallery) {
        self.gallery = Some(gallery);
    }

    pub fn gallery(&self) -> Option<&SharedGallery> {
        self.gallery.as_ref()
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state.to_store_map()) {
            tracing::warn!(error = %e, "failed to persist progression");
        }
    }

    /// Credit a confirmed catch of `rarity_tier` weighing `weight` kg.
    pub fn award_for_catch(&mut self, rarity_tier: u8, weight: f64) -> AwardSummary {
        let previous_level = self.state.current_level;
        let exp_gained = BASE_XP_PER_CATCH * rarity_tier as u32;

        self.state.current_exp = self.state.current_exp.saturating_add(exp_gained);
        self.state.total_caught = self.state.total_caught.saturating_add(1);
        if weight.is_finite() && weight > 0.0 {
            self.state.total_weight += weight;
        }
        self.state.current_level = climb_levels(previous_level, self.state.current_exp);

        let leveled_up = self.state.current_level > previous_level;
        if leveled_up {
            self.just_leveled = true;
            tracing::info!(
                level = self.state.current_level,
                next_requirement = self.next_level_requirement(),
                "level up"
            );
        }
        tracing::info!(
            rarity_tier,
            weight,
            exp_gained,
            current_exp = self.state.current_exp,
            total_caught = self.state.total_caught,
            "experience awarded"
        );

        self.persist();

        AwardSummary {
            exp_gained,
            new_level: self.state.current_level,
            leveled_up,
        }
    }

    /// Zero every counter, drop the level-up flag and wipe the gallery.
    pub fn reset_progress(&mut self) {
        self.state = ProgressionState::default();
        self.just_leveled = false;

        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear progression store");
        }
        self.persist();

        if let Some(gallery) = &self.gallery {
            lock_recover(gallery).clear();
        }
        tracing::info!("progress reset");
    }

    pub fn state(&self) -> &ProgressionState {
        &self.state
    }

    pub fn current_level(&self) -> u32 {
        self.state.current_level
    }

    pub fn current_exp(&self) -> u32 {
        self.state.current_exp
    }

    pub fn total_caught(&self) -> u32 {
        self.state.total_caught
    }

    pub fn total_weight(&self) -> f64 {
        self.state.total_weight
    }

    /// Requirement for the next level, or 0 at the cap.
    pub fn next_level_requirement(&self) -> u32 {
        if self.state.current_level >= MAX_LEVEL {
            return 0;
        }
        level_requirement(self.state.current_level + 1)
    }

    /// Fraction of the way from this level's requirement to the next.
    pub fn level_progress_ratio(&self) -> f64 {
        if self.state.current_level >= MAX_LEVEL {
            return 1.0;
        }
        let floor = level_requirement(self.state.current_level);
        let next = self.next_level_requirement();
        if next <= floor {
            return 1.0;
        }
        let into = self.state.current_exp.saturating_sub(floor) as f64;
        (into / (next - floor) as f64).clamp(0.0, 1.0)
    }

    pub fn is_category_unlocked(&self, category: CatchCategory) -> bool {
        category.is_unlocked_at(self.state.current_level)
    }

    pub fn max_unlocked_category(&self) -> CatchCategory {
        CatchCategory::max_unlocked_at(self.state.current_level)
    }

    /// Whether a level-up happened since the last call. Reading clears it.
    pub fn take_level_up(&mut self) -> bool {
        std::mem::take(&mut self.just_leveled)
    }
}

/// Handle shared between the encounter and the front end.
pub type SharedLedger = Arc<Mutex<ProgressionLedger>>;

pub fn shared_ledger(ledger: ProgressionLedger) -> SharedLedger {
    Arc::new(Mutex::new(ledger))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_awards_are_monotonic(
            awards in prop::collection::vec((0u8..=3, 0.0f64..5.0), 1..60)
        ) {
            let mut ledger = ProgressionLedger::in_memory();
            let mut caught = 0;
            let mut weight = 0.0;
            for (tier, w) in awards {
                let before = ledger.current_level();
                ledger.award_for_catch(tier, w);
                caught += 1;
                weight += w;

                prop_assert!(ledger.current_level() >= before);
                prop_assert!(ledger.current_level() <= MAX_LEVEL);
                prop_assert_eq!(ledger.total_caught(), caught);
                prop_assert!((ledger.total_weight() - weight).abs() < 1e-6);
            }
        }
    }
}
