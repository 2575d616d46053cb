//! Progression persistence tests
//!
//! Ledger and gallery round-trips through JSON files on disk, including
//! reset, hand-edited files and corrupt files.

use angler::core::constants::{GALLERY_FILE, KEY_CURRENT_LEVEL, PROGRESSION_FILE};
use angler::fishing::{find_species, CatchCandidate};
use angler::progression::{
    lock_recover, shared_gallery, Gallery, JsonFileStore, ProgressionLedger,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

fn unique_temp_dir() -> PathBuf {
    static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "angler-persistence-test-{}-{}",
        std::process::id(),
        id
    ));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn open_ledger(dir: &Path) -> ProgressionLedger {
    ProgressionLedger::load(JsonFileStore::in_dir(dir, PROGRESSION_FILE))
}

fn open_gallery(dir: &Path) -> Gallery {
    Gallery::load(JsonFileStore::in_dir(dir, GALLERY_FILE))
}

fn candidate(name: &str, weight: f64) -> CatchCandidate {
    CatchCandidate::new(find_species(name).unwrap(), weight)
}

#[test]
fn test_ledger_survives_restart() {
    let dir = unique_temp_dir();
    {
        let mut ledger = open_ledger(&dir);
        for _ in 0..6 {
            ledger.award_for_catch(2, 1.25);
        }
        assert_eq!(ledger.current_exp(), 120);
        assert_eq!(ledger.current_level(), 2);
    }

    let ledger = open_ledger(&dir);
    assert_eq!(ledger.current_exp(), 120);
    assert_eq!(ledger.current_level(), 2);
    assert_eq!(ledger.total_caught(), 6);
    assert!((ledger.total_weight() - 7.5).abs() < 1e-9);
}

#[test]
fn test_gallery_survives_restart() {
    let dir = unique_temp_dir();
    {
        let mut gallery = open_gallery(&dir);
        gallery.record(&candidate("Trout", 0.8));
        gallery.record(&candidate("Trout", 0.9));
        gallery.record(&candidate("Koi", 1.4));
    }

    let gallery = open_gallery(&dir);
    assert_eq!(gallery.caught_count("Trout"), 2);
    assert_eq!(gallery.caught_count("Koi"), 1);
    assert!(!gallery.is_discovered("Marlin"));
    assert_eq!(gallery.completion().0, 2);
}

#[test]
fn test_files_are_flat_json_objects() {
    let dir = unique_temp_dir();
    let mut ledger = open_ledger(&dir);
    ledger.award_for_catch(1, 0.75);
    let mut gallery = open_gallery(&dir);
    gallery.record(&candidate("Goldfish", 0.75));

    let progression: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(PROGRESSION_FILE)).unwrap()).unwrap();
    assert_eq!(progression["current_exp"], 10);
    assert_eq!(progression["current_level"], 1);
    assert_eq!(progression["total_fish_caught"], 1);
    assert_eq!(progression["total_weight"], 0.75);

    let entries: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(dir.join(GALLERY_FILE)).unwrap()).unwrap();
    assert_eq!(entries["Goldfish"], 1);
}

#[test]
fn test_reset_wipes_both_files() {
    let dir = unique_temp_dir();
    let gallery = shared_gallery(open_gallery(&dir));
    let mut ledger = open_ledger(&dir);
    ledger.attach_gallery(gallery.clone());

    ledger.award_for_catch(3, 4.0);
    lock_recover(&gallery).record(&candidate("Marlin", 4.0));
    assert!(dir.join(GALLERY_FILE).exists());

    ledger.reset_progress();
    assert!(!dir.join(GALLERY_FILE).exists());

    let reloaded = open_ledger(&dir);
    assert_eq!(reloaded.current_level(), 1);
    assert_eq!(reloaded.current_exp(), 0);
    assert_eq!(reloaded.total_caught(), 0);
    assert_eq!(open_gallery(&dir).completion().0, 0);
}

#[test]
fn test_hand_edited_level_is_repaired() {
    let dir = unique_temp_dir();
    fs::write(
        dir.join(PROGRESSION_FILE),
        format!(r#"{{ "current_exp": 260, "{}": 1 }}"#, KEY_CURRENT_LEVEL),
    )
    .unwrap();

    // Level catches up with the experience on file
    let ledger = open_ledger(&dir);
    assert_eq!(ledger.current_exp(), 260);
    assert_eq!(ledger.current_level(), 3);
}

#[test]
fn test_corrupt_files_start_fresh() {
    let dir = unique_temp_dir();
    fs::write(dir.join(PROGRESSION_FILE), "not json at all").unwrap();
    fs::write(dir.join(GALLERY_FILE), "[1, 2, 3]").unwrap();

    let mut ledger = open_ledger(&dir);
    assert_eq!(ledger.current_level(), 1);
    assert_eq!(ledger.total_caught(), 0);
    let gallery = open_gallery(&dir);
    assert_eq!(gallery.completion().0, 0);

    // The next save replaces the corrupt file with a valid one
    ledger.award_for_catch(1, 0.5);
    assert_eq!(open_ledger(&dir).total_caught(), 1);
}

#[test]
fn test_unknown_gallery_entries_are_ignored() {
    let dir = unique_temp_dir();
    fs::write(
        dir.join(GALLERY_FILE),
        r#"{ "Koi": 2, "Kraken": 5, "Trout": "lots", "Goldfish": 0 }"#,
    )
    .unwrap();

    let gallery = open_gallery(&dir);
    assert_eq!(gallery.caught_count("Koi"), 2);
    assert_eq!(gallery.caught_count("Trout"), 0);
    assert!(!gallery.is_discovered("Goldfish"));
    assert_eq!(gallery.completion(), (1, 8));
}
