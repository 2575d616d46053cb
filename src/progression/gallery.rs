//! Registry of confirmed catches, keyed by species name.

use super::store::{KeyValueStore, MemoryStore, StoreMap, StoreValue};
use crate::fishing::{all_species, find_species, CatchCandidate, CatchSpecies};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex};

/// Caught counts per species, persisted as `name -> count`.
pub struct Gallery {
    counts: BTreeMap<&'static str, u32>,
    store: Box<dyn KeyValueStore + Send>,
}

impl std::fmt::Debug for Gallery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Gallery")
            .field("counts", &self.counts)
            .finish_non_exhaustive()
    }
}

impl Gallery {
    /// Rebuild from `store`, skipping unknown names and non-count values.
    pub fn load(store: impl KeyValueStore + Send + 'static) -> Self {
        let map = store.load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not load gallery, starting empty");
            StoreMap::new()
        });

        let mut counts = BTreeMap::new();
        for (name, value) in &map {
            let Some(species) = find_species(name) else {
                tracing::warn!(name = %name, "skipping unknown species in gallery");
                continue;
            };
            match value.as_i64().and_then(|v| u32::try_from(v).ok()) {
                Some(0) => {}
                Some(count) => {
                    counts.insert(species.name, count);
                }
                None => {
                    tracing::warn!(name = %name, ?value, "skipping malformed gallery count");
                }
            }
        }
        tracing::debug!(discovered = counts.len(), "gallery loaded");

        Self {
            counts,
            store: Box::new(store),
        }
    }

    pub fn in_memory() -> Self {
        Self::load(MemoryStore::new())
    }

    /// Count a confirmed catch and persist the new tally.
    pub fn record(&mut self, candidate: &CatchCandidate) {
        let name = candidate.name();
        let count = self.counts.entry(name).or_insert(0);
        *count = count.saturating_add(1);
        let count = *count;

        let mut entry = StoreMap::new();
        entry.insert(name.to_string(), StoreValue::from(count));
        if let Err(e) = self.store.save(&entry) {
            tracing::warn!(error = %e, name, "failed to persist gallery entry");
        }
        if count == 1 {
            tracing::info!(name, "new species discovered");
        }
    }

    pub fn caught_count(&self, name: &str) -> u32 {
        self.counts.get(name).copied().unwrap_or(0)
    }

    pub fn is_discovered(&self, name: &str) -> bool {
        self.caught_count(name) > 0
    }

    /// Every name the catalogue can produce.
    pub fn all_known_names(&self) -> BTreeSet<&'static str> {
        all_species().iter().map(|s| s.name).collect()
    }

    /// Every species in catalogue order with its caught count (0 = undiscovered).
    pub fn entries(&self) -> Vec<(&'static CatchSpecies, u32)> {
        all_species()
            .iter()
            .map(|s| (s, self.caught_count(s.name)))
            .collect()
    }

    /// (discovered, total) species counts.
    pub fn completion(&self) -> (usize, usize) {
        (self.counts.len(), all_species().len())
    }

    /// Forget every catch.
    pub fn clear(&mut self) {
        self.counts.clear();
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "failed to clear gallery store");
        }
    }
}

pub type SharedGallery = Arc<Mutex<Gallery>>;

pub fn shared_gallery(gallery: Gallery) -> SharedGallery {
    Arc::new(Mutex::new(gallery))
}
