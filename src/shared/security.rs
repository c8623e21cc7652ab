use crate::shared::error::CulpritError;
use crate::shared::Result;
use std::fs;
use std::path::Path;

/// Maximum snapshot size accepted on load (512 MB)
///
/// Import graphs of very large monorepos stay well below this; anything
/// bigger is treated as a corrupt or hostile file.
pub const MAX_SNAPSHOT_SIZE: u64 = 512 * 1024 * 1024;

/// Checks that `path` is a regular file (not a symlink or directory)
/// no larger than `max_size`, returning its size in bytes.
///
/// # Security
/// Uses `symlink_metadata()` so the link itself is inspected rather than
/// its target.
///
/// # Errors
/// Returns a `CulpritError::Storage` when the file is missing, a symlink,
/// not a regular file, or too large.
pub fn ensure_readable_file(path: &Path, max_size: u64) -> Result<u64> {
    let metadata = fs::symlink_metadata(path)
        .map_err(|e| CulpritError::storage(path, format!("Failed to read metadata: {}", e)))?;

    if metadata.is_symlink() {
        return Err(CulpritError::storage(
            path,
            "Security: path is a symbolic link. Symbolic links are not allowed.",
        )
        .into());
    }

    if !metadata.is_file() {
        return Err(CulpritError::storage(path, "Not a regular file").into());
    }

    if metadata.len() > max_size {
        return Err(CulpritError::storage(
            path,
            format!(
                "Security: file is too large ({} bytes). Maximum allowed size is {} bytes.",
                metadata.len(),
                max_size
            ),
        )
        .into());
    }

    Ok(metadata.len())
}

/// Refuses to write through an existing symbolic link.
///
/// A path whose metadata cannot be read (usually because it does not exist
/// yet) is accepted; the write itself reports any real problem.
pub fn ensure_not_symlink(path: &Path) -> Result<()> {
    match fs::symlink_metadata(path) {
        Ok(metadata) if metadata.is_symlink() => Err(CulpritError::storage(
            path,
            "Security: path is a symbolic link. Writing through symbolic links is not allowed.",
        )
        .into()),
        _ => Ok(()),
    }
}
