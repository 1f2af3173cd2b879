//! Round-trip tests: exported text loaded as a fresh base source must
//! reproduce identical typed reads and identical absences.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use termcfg::{load_finalized, AccessError, ConfigStore, LoadOptions};

fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Reload an exported configuration through a fresh pipeline run.
fn reload(dir: &TempDir, exported: &str) -> ConfigStore {
    let path = write(dir, "reloaded.conf", exported);
    let (store, _) = load_finalized(&path, &LoadOptions::default()).unwrap();
    store
}

fn assert_same_reads(original: &ConfigStore, reloaded: &ConfigStore) {
    for key in [
        "cursor-style-blink",
        "window-decoration",
        "mouse-hide-while-typing",
        "confirm-close-surface",
    ] {
        assert_eq!(original.get_bool(key), reloaded.get_bool(key), "{key}");
    }
    for key in ["font-size", "background-opacity", "unfocused-split-opacity"] {
        assert_eq!(original.get_float(key), reloaded.get_float(key), "{key}");
    }
    for key in [
        "scrollback-limit",
        "window-padding-x",
        "window-padding-y",
        "background-blur-radius",
    ] {
        assert_eq!(original.get_u32(key), reloaded.get_u32(key), "{key}");
    }
    for key in [
        "background",
        "foreground",
        "cursor-color",
        "selection-background",
        "unfocused-split-fill",
    ] {
        assert_eq!(original.get_color(key), reloaded.get_color(key), "{key}");
    }
}

#[test]
fn test_round_trip_defaults_only() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.conf", "");

    let (original, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    let reloaded = reload(&dir, &original.export());
    assert_same_reads(&original, &reloaded);
}

#[test]
fn test_round_trip_mixed_explicit_and_default() {
    let dir = TempDir::new().unwrap();
    let base = write(
        &dir,
        "base.conf",
        "background = #102030\nfont-size = 14.5\nscrollback-limit = 42\n\
         cursor-style-blink = no\nselection-background = #ffffff\n",
    );

    let (original, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    let reloaded = reload(&dir, &original.export());
    assert_same_reads(&original, &reloaded);
}

#[test]
fn test_round_trip_preserves_absence() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.conf", "foreground = #abcdef\n");

    let (original, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    assert_eq!(
        original.get_color("background"),
        Err(AccessError::ValueUnset("background".to_string()))
    );

    let reloaded = reload(&dir, &original.export());
    assert_eq!(
        reloaded.get_color("background"),
        Err(AccessError::ValueUnset("background".to_string()))
    );
    assert_same_reads(&original, &reloaded);
}

#[test]
fn test_round_trip_after_clearing_a_color() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.conf", "background = #123abc\ncursor-color = #00ff00\n");

    let (mut original, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    original.set("cursor-color", "").unwrap();

    let reloaded = reload(&dir, &original.export());
    assert_eq!(
        reloaded.get_color("cursor-color"),
        Err(AccessError::ValueUnset("cursor-color".to_string()))
    );
    assert_same_reads(&original, &reloaded);
}

#[test]
fn test_exported_text_is_stable_across_round_trips() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.conf", "background = #123ABC\nfont-size = 13.5\n");

    let (original, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    let exported = original.export();
    let reloaded = reload(&dir, &exported);
    assert_eq!(reloaded.export(), exported);
}

#[test]
fn test_finalize_twice_exports_identically() {
    let dir = TempDir::new().unwrap();
    let base = write(&dir, "base.conf", "background = #123abc\nfont-size = 10\n");

    let (mut store, _) = load_finalized(&base, &LoadOptions::default()).unwrap();
    let once = store.export();
    store.finalize();
    assert_eq!(store.export(), once);
}
