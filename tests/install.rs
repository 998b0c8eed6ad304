use std::fs;
use std::path::{Path, PathBuf};

use modpak::{
    enumerate_workshop_mods, extract_name, install_mods, sanitize, BatchOptions, ExtractError,
    ModLayout,
};
use tempfile::TempDir;

fn package_bytes(name: &str) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"SBAsset6");
    bytes.extend((0..4096u32).map(|i| (i % 251) as u8));
    bytes.extend_from_slice(b"INDEX\x00\x00\x00\x00\x00\x01");
    bytes.extend_from_slice(b"\x04name\x00\x0b");
    bytes.extend_from_slice(name.as_bytes());
    bytes.extend_from_slice(b"\x00trailing");
    bytes
}

/// `<root>/steamapps/common/Starbound` with workshop items next to it.
fn steam_library(root: &Path, items: &[(&str, &str)]) -> PathBuf {
    let game = root.join("steamapps/common/Starbound");
    fs::create_dir_all(game.join("mods")).unwrap();
    let workshop = root.join("steamapps/workshop/content/211820");
    for (item, name) in items {
        let dir = workshop.join(item);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("contents.pak"), package_bytes(name)).unwrap();
    }
    game
}

#[test]
fn round_trip_name_and_file_name() {
    let bytes = package_bytes("MyMod Name!");
    let name = extract_name(&bytes).unwrap();
    assert_eq!(name, "MyMod Name!");
    assert_eq!(sanitize(&name), "MyMod_Name");
}

#[test]
fn installs_workshop_items_into_game_mods() {
    let root = TempDir::new().unwrap();
    let game = steam_library(
        root.path(),
        &[("729480149", "Frackin' Universe"), ("1115920474", "Arcana (v2.0)")],
    );
    let layout = ModLayout::from_game_dir(&game);

    let paths = enumerate_workshop_mods(&layout.workshop_dir).unwrap();
    assert_eq!(paths.len(), 2);
    let report = install_mods(&paths, &layout.mods_dir, &BatchOptions::default()).unwrap();

    assert_eq!(report.copied(), 2);
    assert_eq!(report.failed(), 0);
    let mods = game.join("mods");
    assert_eq!(
        fs::read(mods.join("Frackin_Universe.pak")).unwrap(),
        package_bytes("Frackin' Universe")
    );
    assert_eq!(
        fs::read(mods.join("Arcana_(v2.0).pak")).unwrap(),
        package_bytes("Arcana (v2.0)")
    );
}

#[test]
fn broken_package_does_not_stop_the_batch() {
    let root = TempDir::new().unwrap();
    let game = steam_library(root.path(), &[("1", "Working Mod")]);
    let layout = ModLayout::from_game_dir(&game);
    let broken = layout.workshop_dir.join("2");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("contents.pak"), b"INDEX without a name field").unwrap();

    let paths = enumerate_workshop_mods(&layout.workshop_dir).unwrap();
    let report = install_mods(&paths, &layout.mods_dir, &BatchOptions::default()).unwrap();

    assert_eq!(report.copied(), 1);
    let failure = report.failures().next().unwrap();
    assert_eq!(failure.path(), &broken.join("contents.pak"));
    assert!(matches!(
        failure,
        modpak::ModError::Extract {
            source: ExtractError::NameFieldNotFound,
            ..
        }
    ));
    assert!(game.join("mods/Working_Mod.pak").is_file());
}

#[test]
fn missing_mods_dir_is_reported_per_package() {
    let root = TempDir::new().unwrap();
    let game = steam_library(root.path(), &[("1", "A"), ("2", "B")]);
    fs::remove_dir(game.join("mods")).unwrap();
    let layout = ModLayout::from_game_dir(&game);

    let paths = enumerate_workshop_mods(&layout.workshop_dir).unwrap();
    let report = install_mods(&paths, &layout.mods_dir, &BatchOptions::default()).unwrap();

    assert_eq!(report.failed(), 2);
    assert!(!game.join("mods").exists());
}
