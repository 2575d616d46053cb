//! Player progression: experience ledger, catch gallery and their store.

pub mod gallery;
pub mod ledger;
pub mod store;

pub use gallery::{shared_gallery, Gallery, SharedGallery};
pub use ledger::{
    level_requirement, shared_ledger, AwardSummary, ProgressionLedger, ProgressionState,
    SharedLedger,
};
pub use store::{JsonFileStore, KeyValueStore, MemoryStore, StoreMap, StoreValue};

use std::sync::{Mutex, MutexGuard};

/// Lock a shared handle, recovering the data if a holder panicked.
pub fn lock_recover<T>(handle: &Mutex<T>) -> MutexGuard<'_, T> {
    handle.lock().unwrap_or_else(|e| e.into_inner())
}
