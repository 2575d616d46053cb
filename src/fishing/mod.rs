//! Catches: categories, the species catalogue and the loot table.

pub mod catalog;
pub mod loot;
pub mod types;

pub use catalog::{all_species, find_species, pick_species, species_in, SPECIES};
pub use loot::{candidate_for_category, resolve_catch, roll_category, roll_weight, trash_chance};
pub use types::*;
