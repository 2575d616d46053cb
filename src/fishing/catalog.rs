//! The fixed species catalogue.

use super::types::{CatchCategory, CatchSpecies};
use rand::Rng;

/// Every species the water can yield, grouped by category.
pub static SPECIES: [CatchSpecies; 8] = [
    CatchSpecies {
        name: "Old Boot",
        description: "A waterlogged boot. Not a fish, but at least you caught something!",
        category: CatchCategory::Junk,
        visual_id: 0,
    },
    CatchSpecies {
        name: "Rusty Can",
        description: "An old tin can. Maybe there's still something edible inside?",
        category: CatchCategory::Junk,
        visual_id: 1,
    },
    CatchSpecies {
        name: "Goldfish",
        description: "A common goldfish found in ponds and lakes.",
        category: CatchCategory::Common,
        visual_id: 2,
    },
    CatchSpecies {
        name: "Trout",
        description: "A freshwater trout with distinctive spots.",
        category: CatchCategory::Common,
        visual_id: 3,
    },
    CatchSpecies {
        name: "Koi",
        description: "A rare and colorful koi fish with distinctive patterns.",
        category: CatchCategory::Rare,
        visual_id: 4,
    },
    CatchSpecies {
        name: "Clownfish",
        description: "A bright orange clownfish with white stripes. Popular in reef aquariums.",
        category: CatchCategory::Rare,
        visual_id: 5,
    },
    CatchSpecies {
        name: "Marlin",
        description: "A legendary deep-sea marlin with a distinctive spear-like bill.",
        category: CatchCategory::Legendary,
        visual_id: 6,
    },
    CatchSpecies {
        name: "Great White Shark",
        description: "An apex predator of the ocean, this great white shark is a legendary catch!",
        category: CatchCategory::Legendary,
        visual_id: 7,
    },
];

pub fn all_species() -> &'static [CatchSpecies] {
    &SPECIES
}

/// Look up a species by its exact display name.
pub fn find_species(name: &str) -> Option<&'static CatchSpecies> {
    SPECIES.iter().find(|s| s.name == name)
}

/// Species belonging to one category, in catalogue order.
pub fn species_in(category: CatchCategory) -> impl Iterator<Item = &'static CatchSpecies> {
    SPECIES.iter().filter(move |s| s.category == category)
}

/// Uniformly pick a species of `category`.
pub fn pick_species<R: Rng>(category: CatchCategory, rng: &mut R) -> &'static CatchSpecies {
    let pool: Vec<&'static CatchSpecies> = species_in(category).collect();
    // Every category has at least one species in SPECIES
    pool[rng.gen_range(0..pool.len())]
}
