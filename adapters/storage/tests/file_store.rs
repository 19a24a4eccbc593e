use std::fs;

use neon_snake_core::GameMode;
use neon_snake_storage::{Persistence, PreferenceStore, Preferences, StorageError, TomlFileStore};

#[test]
fn missing_file_loads_nothing() {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut store = TomlFileStore::new(dir.path().join("prefs.toml"));
    assert!(store.load().expect("missing file is not an error").is_none());
}

#[test]
fn preferences_survive_a_restart() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("nested").join("prefs.toml");

    let mut first = Persistence::open(TomlFileStore::new(&path));
    assert!(first.record_best(31));
    first.set_mode(GameMode::Obstacles);
    first.set_haptics(false);
    first.set_theme("sunset");

    let second = Persistence::open(TomlFileStore::new(&path));
    assert_eq!(
        second.preferences(),
        &Preferences {
            best_score: 31,
            haptics: false,
            dpad: true,
            theme: "sunset".to_owned(),
            mode: GameMode::Obstacles,
        }
    );
}

#[test]
fn corrupt_file_falls_back_to_defaults() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prefs.toml");
    fs::write(&path, "snakeHighScore_v1 = \"lots\n").expect("write corrupt file");

    let mut store = TomlFileStore::new(&path);
    assert!(matches!(store.load(), Err(StorageError::Decode(_))));

    let mut persistence = Persistence::open(store);
    assert_eq!(persistence.preferences(), &Preferences::default());

    assert!(persistence.record_best(3));
    let text = fs::read_to_string(&path).expect("rewritten");
    assert_eq!(
        Preferences::from_toml(&text).expect("valid again").best_score,
        3
    );
}

#[test]
fn bad_value_keeps_the_stored_best() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("prefs.toml");
    fs::write(
        &path,
        "snakeHighScore_v1 = 500\nsnakeMode_v1 = \"tron\"\nsnakeTheme_v1 = \"dusk\"\n",
    )
    .expect("write preferences");

    let mut persistence = Persistence::open(TomlFileStore::new(&path));
    assert_eq!(persistence.best_score(), 500);
    assert_eq!(persistence.preferences().theme, "dusk");
    assert_eq!(persistence.preferences().mode, GameMode::Classic);

    assert!(!persistence.record_best(1));
    persistence.set_mode(GameMode::NeonFeast);

    let text = fs::read_to_string(&path).expect("rewritten");
    let reloaded = Preferences::from_toml(&text).expect("valid");
    assert_eq!(reloaded.best_score, 500);
    assert_eq!(reloaded.mode, GameMode::NeonFeast);
}

#[test]
fn unwritable_location_is_absorbed() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocker = dir.path().join("occupied");
    fs::write(&blocker, "not a directory").expect("write blocker");

    let mut persistence = Persistence::open(TomlFileStore::new(blocker.join("prefs.toml")));
    assert!(persistence.record_best(8));
    assert_eq!(persistence.best_score(), 8);
}
