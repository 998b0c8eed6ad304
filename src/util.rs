use memmap::Mmap;
use memmap::MmapOptions;
use std::fs::File;
use std::io::Error;
use std::path::Path;

/// Maps `path` read-only. Empty files cannot be mapped and yield `None`.
pub fn to_mmap_unsafe(path: &Path) -> Result<Option<Mmap>, Error> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(None);
    }
    unsafe { MmapOptions::new().map(&file) }.map(Some)
}
