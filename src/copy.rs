use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::CopyError;
use crate::sanitize::destination_file_name;

/// Copies `source` to `dest_dir/<sanitized_name>.pak`, replacing any file
/// already there. Returns the destination path.
///
/// The bytes are streamed into a temporary file inside `dest_dir` which is
/// renamed over the destination once complete, so a failed copy leaves the
/// destination untouched. `dest_dir` must already exist.
pub fn copy_mod(
    source: &Path,
    dest_dir: &Path,
    sanitized_name: &str,
) -> Result<PathBuf, CopyError> {
    let destination = dest_dir.join(destination_file_name(sanitized_name));

    let mut input = File::open(source).map_err(|e| io_error(source, e))?;
    let mut staging = NamedTempFile::new_in(dest_dir).map_err(|e| io_error(dest_dir, e))?;

    let bytes = io::copy(&mut input, &mut staging).map_err(|e| io_error(&destination, e))?;
    staging
        .as_file()
        .sync_all()
        .map_err(|e| io_error(&destination, e))?;

    // the temporary file is removed when `persist` fails and the error drops
    staging
        .persist(&destination)
        .map_err(|e| io_error(&destination, e.error))?;

    debug!(
        "copied {} bytes '{}' -> '{}'",
        bytes,
        source.display(),
        destination.display()
    );
    Ok(destination)
}

fn io_error(path: &Path, source: io::Error) -> CopyError {
    CopyError::Io {
        path: path.to_path_buf(),
        source,
    }
}
