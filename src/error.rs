use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractError {
    /// No `INDEX` marker anywhere in the package.
    #[error("metadata block not found")]
    MetadataNotFound,

    /// The metadata block has no `\x04name` field.
    #[error("name field not found in metadata block")]
    NameFieldNotFound,

    #[error("name field is not valid ASCII (block offset {offset})")]
    Decode { offset: usize },

    #[error("io: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum CopyError {
    #[error("copy to '{}' failed: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Error)]
pub enum WorkshopError {
    #[error("workshop directory '{}' does not exist", .0.display())]
    NotADirectory(PathBuf),

    #[error("walking workshop directory: {0}")]
    Walk(#[from] walkdir::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config is not valid: {0}")]
    Parse(#[from] serde_json::Error),

    /// A blank config was written because none existed.
    #[error("no config found, created an empty one at '{}'", .0.display())]
    Created(PathBuf),

    #[error("config is not valid: {0}")]
    Invalid(String),
}

/// Per-package failure, tagged with the package it happened to.
#[derive(Debug, Error)]
pub enum ModError {
    #[error("'{}': {source}", .path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },

    #[error("'{}': {source}", .path.display())]
    Copy {
        path: PathBuf,
        #[source]
        source: CopyError,
    },
}

impl ModError {
    pub fn path(&self) -> &PathBuf {
        match self {
            ModError::Extract { path, .. } | ModError::Copy { path, .. } => path,
        }
    }
}
