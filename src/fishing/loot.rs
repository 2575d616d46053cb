//! Loot table: turns a throw outcome and player level into a catch.
//!
//! A trash roll comes first and gets likelier on a Miss. Otherwise a
//! category is drawn from the outcome's (common, rare, legendary)
//! distribution, stepped down to what the player's level allows, and a
//! species within it is picked uniformly.

use super::catalog::pick_species;
use super::types::{CatchCandidate, CatchCategory};
use crate::core::constants::{
    CATEGORY_CHANCES_GOOD, CATEGORY_CHANCES_GREAT, CATEGORY_CHANCES_MISS, MISS_TRASH_MULTIPLIER,
    TRASH_CHANCE_BY_LEVEL, TRASH_CHANCE_FLOOR, WEIGHT_BASE_PER_TIER, WEIGHT_VARIANCE_PER_TIER,
};
use crate::minigames::SkillOutcome;
use rand::Rng;

/// Probability of reeling in junk at `level` after a throw of `outcome`.
pub fn trash_chance(level: u32, outcome: SkillOutcome) -> f64 {
    let index = level.saturating_sub(1) as usize;
    let base = TRASH_CHANCE_BY_LEVEL
        .get(index)
        .copied()
        .unwrap_or(TRASH_CHANCE_FLOOR);

    if outcome == SkillOutcome::Miss {
        base * MISS_TRASH_MULTIPLIER
    } else {
        base
    }
}

/// (common, rare, legendary) probabilities for a throw outcome.
pub fn category_chances(outcome: SkillOutcome) -> [f64; 3] {
    match outcome {
        SkillOutcome::Great => CATEGORY_CHANCES_GREAT,
        SkillOutcome::Good => CATEGORY_CHANCES_GOOD,
        SkillOutcome::Miss => CATEGORY_CHANCES_MISS,
    }
}

/// Map a uniform roll in [0, 1) onto the outcome's category distribution.
pub fn category_for_roll(outcome: SkillOutcome, roll: f64) -> CatchCategory {
    let [common, rare, _legendary] = category_chances(outcome);
    if roll < common {
        CatchCategory::Common
    } else if roll < common + rare {
        CatchCategory::Rare
    } else {
        CatchCategory::Legendary
    }
}

/// Draw a gated category. Junk only comes from the trash roll.
pub fn roll_category<R: Rng>(outcome: SkillOutcome, level: u32, rng: &mut R) -> CatchCategory {
    if rng.gen::<f64>() < trash_chance(level, outcome) {
        return CatchCategory::Junk;
    }
    category_for_roll(outcome, rng.gen::<f64>()).gated_for_level(level)
}

/// Weight for a catch of `category`, rounded to two decimals.
///
/// Base and variance both scale with tier, so junk always weighs zero.
pub fn roll_weight<R: Rng>(category: CatchCategory, rng: &mut R) -> f64 {
    let tier = category.tier() as f64;
    let base = WEIGHT_BASE_PER_TIER * tier;
    let variance = WEIGHT_VARIANCE_PER_TIER * tier;
    let raw = base + rng.gen::<f64>() * variance;
    (raw * 100.0).round() / 100.0
}

/// Build a candidate for a requested category, downgraded to what `level` allows.
pub fn candidate_for_category<R: Rng>(
    requested: CatchCategory,
    level: u32,
    rng: &mut R,
) -> CatchCandidate {
    let category = requested.gated_for_level(level);
    let species = pick_species(category, rng);
    CatchCandidate::new(species, roll_weight(category, rng))
}

/// Resolve a throw into a concrete catch candidate.
pub fn resolve_catch<R: Rng>(outcome: SkillOutcome, level: u32, rng: &mut R) -> CatchCandidate {
    let category = roll_category(outcome, level, rng);
    let candidate = candidate_for_category(category, level, rng);

    tracing::debug!(
        ?outcome,
        level,
        name = candidate.name(),
        tier = candidate.tier(),
        weight = candidate.weight,
        "loot resolved"
    );
    candidate
}
