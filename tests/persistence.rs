//! Persistence, OS-signal, and global-registration behavior.
//!
//! Detector overrides and the global store registration are process-wide,
//! so the tests touching them run serially.

use duotone::{
    global, init_global, set_mode_detector, ColorMode, FileStorage, ManualSignal, OsSignal,
    Preference, Storage, ThemeOptions, ThemeStore,
};
use serial_test::serial;

#[test]
fn test_preference_round_trips_through_files() {
    let tmp = tempfile::tempdir().unwrap();

    for preference in Preference::ALL {
        let store = ThemeStore::builder()
            .storage(FileStorage::with_dir(tmp.path()))
            .signal(ManualSignal::new(ColorMode::Light))
            .build();
        store.set_preference(preference);
        drop(store);

        let reloaded = ThemeStore::builder()
            .storage(FileStorage::with_dir(tmp.path()))
            .signal(ManualSignal::new(ColorMode::Light))
            .build();
        assert_eq!(reloaded.preference(), preference);
    }
}

#[test]
fn test_corrupted_file_falls_back_to_default() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::write(tmp.path().join("theme"), "solarized").unwrap();

    let store = ThemeStore::builder()
        .storage(FileStorage::with_dir(tmp.path()))
        .signal(ManualSignal::new(ColorMode::Dark))
        .build();

    assert_eq!(store.preference(), Preference::System);
    assert_eq!(store.resolved(), ColorMode::Dark);
}

#[test]
fn test_custom_storage_key_names_the_file() {
    let tmp = tempfile::tempdir().unwrap();
    let store = ThemeStore::builder()
        .options(ThemeOptions::new().with_storage_key("acme-theme"))
        .storage(FileStorage::with_dir(tmp.path()))
        .signal(ManualSignal::new(ColorMode::Light))
        .build();

    store.set_preference(Preference::Dark);

    let storage = FileStorage::with_dir(tmp.path());
    assert_eq!(storage.load("acme-theme").unwrap().as_deref(), Some("dark"));
    assert_eq!(storage.load("theme").unwrap(), None);
}

#[test]
#[serial]
fn test_os_signal_snapshot_feeds_initial_resolution() {
    set_mode_detector(|| ColorMode::Dark);

    let store = ThemeStore::builder().signal(OsSignal::new()).build();
    assert_eq!(store.system(), ColorMode::Dark);
    assert_eq!(store.resolved(), ColorMode::Dark);

    // Snapshot only: later detector changes do not reach a built store.
    set_mode_detector(|| ColorMode::Light);
    assert_eq!(store.resolved(), ColorMode::Dark);
}

#[test]
#[serial]
fn test_global_registration_is_first_wins() {
    let first = ThemeStore::builder()
        .signal(ManualSignal::new(ColorMode::Dark))
        .build();
    let registered = init_global(first);
    assert_eq!(registered.resolved(), ColorMode::Dark);

    let second = ThemeStore::builder()
        .signal(ManualSignal::new(ColorMode::Light))
        .build();
    let still_first = init_global(second);
    assert_eq!(still_first.resolved(), ColorMode::Dark);

    assert!(global().is_some());
}
