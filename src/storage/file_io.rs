//! File I/O utilities with atomic writes
//!
//! Provides safe file operations that won't corrupt data on failure.

use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tempfile::Builder;

use crate::error::{VaultError, VaultResult};

const TEMP_SUFFIX: &str = ".tmp";

/// Name prefix of the temporary siblings used while replacing `path`
///
/// Each write gets its own `.<name>.<random>.tmp` file.
pub fn temp_prefix(path: &Path) -> OsString {
    let mut prefix = OsString::from(".");
    if let Some(name) = path.file_name() {
        prefix.push(name);
    }
    prefix.push(".");
    prefix
}

/// Read a UTF-8 file, returning `None` if it doesn't exist
pub fn read_optional<P: AsRef<Path>>(path: P) -> VaultResult<Option<String>> {
    let path = path.as_ref();
    match fs::read_to_string(path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) if e.kind() == ErrorKind::InvalidData => Err(VaultError::Format(format!(
            "{} is not valid UTF-8",
            path.display()
        ))),
        Err(e) => Err(VaultError::Io(format!(
            "Failed to read {}: {}",
            path.display(),
            e
        ))),
    }
}

/// Create the parent directory of `path` if needed
pub fn ensure_parent_dir(path: &Path) -> VaultResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            VaultError::Io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Open `path` for appending, creating it (and its directory) owner-only
pub fn open_append(path: &Path) -> VaultResult<File> {
    ensure_parent_dir(path)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| VaultError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    restrict_permissions(&file)?;
    Ok(file)
}

/// Write bytes to a file atomically (write to temp, then rename)
///
/// The destination is either fully replaced or left untouched. Concurrent
/// writers never share a temp file, so the last rename wins and every
/// writer that returns `Ok` had its bytes in place at some point.
pub fn write_atomic<P: AsRef<Path>>(path: P, data: &[u8]) -> VaultResult<()> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;
    let dir = parent_dir(path);

    // Same directory as the target so the rename stays on one filesystem.
    // Dropping `temp` on an early return removes it.
    let mut temp = Builder::new()
        .prefix(&temp_prefix(path))
        .suffix(TEMP_SUFFIX)
        .tempfile_in(dir)
        .map_err(|e| VaultError::Io(format!("Failed to create temp file: {}", e)))?;

    restrict_permissions(temp.as_file())?;
    temp.write_all(data)
        .map_err(|e| VaultError::Io(format!("Failed to write temp file: {}", e)))?;

    // Sync to disk before rename
    temp.as_file()
        .sync_all()
        .map_err(|e| VaultError::Io(format!("Failed to sync temp file: {}", e)))?;

    temp.persist(path).map_err(|e| {
        VaultError::Io(format!("Failed to replace {}: {}", path.display(), e.error))
    })?;

    sync_dir(dir);
    Ok(())
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

fn restrict_permissions(file: &File) -> VaultResult<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| VaultError::Io(format!("Failed to restrict file permissions: {}", e)))?;
    }
    #[cfg(not(unix))]
    {
        let _ = file;
    }
    Ok(())
}

/// Best-effort fsync of a directory so a rename in it is durable
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    {
        if let Ok(handle) = File::open(dir) {
            let _ = handle.sync_all();
        }
    }
    #[cfg(not(unix))]
    {
        let _ = dir;
    }
}

/// Temp files for `path` currently present in its directory
#[cfg(test)]
pub(crate) fn temp_files_for(path: &Path) -> Vec<std::path::PathBuf> {
    let prefix = temp_prefix(path);
    let prefix = prefix.to_string_lossy();
    let Ok(entries) = fs::read_dir(parent_dir(path)) else {
        return Vec::new();
    };
    entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|p| {
            p.file_name()
                .map(|n| n.to_string_lossy())
                .is_some_and(|n| n.starts_with(&*prefix) && n.ends_with(TEMP_SUFFIX))
        })
        .collect()
}
