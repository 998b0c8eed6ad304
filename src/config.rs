use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;

pub const CONFIG_FILE_NAME: &str = "config.json";

const BLANK_CONFIG: &str = r#"{
    "game_dir": ""
}"#;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    pub game_dir: PathBuf,
}

impl Config {
    /// Loads and validates the config at `path`.
    ///
    /// A missing file is replaced by a blank template and reported as
    /// [`ConfigError::Created`]; the user has to fill in `game_dir` first.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.is_file() {
            warn!("'{}' doesn't exist, writing an empty config", path.display());
            fs::write(path, BLANK_CONFIG)?;
            return Err(ConfigError::Created(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        debug!("loaded config from '{}'", path.display());
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.game_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("'game_dir' must not be empty".into()));
        }
        Ok(())
    }
}

/// `config.json` beside the running executable.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    let exe = std::env::current_exe()?;
    let dir = exe.parent().unwrap_or_else(|| Path::new("."));
    Ok(dir.join(CONFIG_FILE_NAME))
}
