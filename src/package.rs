use memmap::Mmap;
use std::path::Path;

use crate::error::ExtractError;
use crate::metadata::{self, NameMatch};
use crate::util::to_mmap_unsafe;

/// A workshop package mapped into memory for the metadata scan.
///
/// The mapping lives as long as the `Package`; drop it once the name is read.
#[derive(Debug)]
pub struct Package {
    mmap: Option<Mmap>,
}

impl Package {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Package, ExtractError> {
        let path = path.as_ref();
        let mmap = to_mmap_unsafe(path)?;
        debug!(
            "mapped '{}' ({} bytes)",
            path.display(),
            mmap.as_ref().map_or(0, |m| m.len())
        );
        Ok(Package { mmap })
    }
}

pub trait PackageRead {
    fn bytes(&self) -> &[u8];
    fn mod_name(&self, policy: NameMatch) -> Result<String, ExtractError>;
}

impl PackageRead for Package {
    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or_default()
    }

    fn mod_name(&self, policy: NameMatch) -> Result<String, ExtractError> {
        metadata::extract_name_with(self.bytes(), policy)
    }
}

/// Opens the package at `path`, reads its mod name and releases the file.
pub fn read_mod_name(path: &Path, policy: NameMatch) -> Result<String, ExtractError> {
    let name = Package::from_file(path)?.mod_name(policy)?;
    trace!("'{}' is named '{}'", path.display(), name);
    Ok(name)
}
