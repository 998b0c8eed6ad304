use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::WorkshopError;
use crate::sanitize::PACKAGE_EXTENSION;

/// Steam app id of the game whose workshop content is collected.
pub const APP_ID: &str = "211820";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModLayout {
    pub workshop_dir: PathBuf,
    pub mods_dir: PathBuf,
}

impl ModLayout {
    pub fn new(workshop_dir: impl Into<PathBuf>, mods_dir: impl Into<PathBuf>) -> ModLayout {
        ModLayout {
            workshop_dir: workshop_dir.into(),
            mods_dir: mods_dir.into(),
        }
    }

    /// Derives both directories from a game installed in a standard Steam
    /// library: `<library>/steamapps/common/<game>`.
    pub fn from_game_dir(game_dir: impl AsRef<Path>) -> ModLayout {
        let game_dir = game_dir.as_ref();
        let workshop_dir = game_dir
            .join("..")
            .join("..")
            .join("workshop")
            .join("content")
            .join(APP_ID);
        ModLayout::new(workshop_dir, game_dir.join("mods"))
    }
}

/// Lists every `.pak` below the workshop item directories of `workshop_dir`,
/// sorted by path. Files directly inside `workshop_dir` are not items and
/// are skipped.
pub fn enumerate_workshop_mods(workshop_dir: &Path) -> Result<Vec<PathBuf>, WorkshopError> {
    if !workshop_dir.is_dir() {
        return Err(WorkshopError::NotADirectory(workshop_dir.to_path_buf()));
    }

    let mut mods = Vec::new();
    for entry in WalkDir::new(workshop_dir).min_depth(2).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() && is_package(entry.path()) {
            trace!("found package '{}'", entry.path().display());
            mods.push(entry.into_path());
        }
    }

    info!(
        "{} packages in '{}'",
        mods.len(),
        workshop_dir.display()
    );
    Ok(mods)
}

fn is_package(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext == PACKAGE_EXTENSION)
        .unwrap_or(false)
}
