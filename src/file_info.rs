//! Path checks run before the engine is invoked.

use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::foundation::error::{SoxError, SoxResult};

/// The input must exist, be a regular file, and be openable for reading.
pub fn validate_input_file(path: &Path) -> SoxResult<()> {
    let meta = fs::metadata(path).map_err(|e| {
        SoxError::path(format!("input file '{}' does not exist: {e}", path.display()))
    })?;
    if !meta.is_file() {
        return Err(SoxError::path(format!(
            "input path '{}' is not a file",
            path.display()
        )));
    }
    fs::File::open(path).map_err(|e| {
        SoxError::path(format!(
            "input file '{}' is not readable: {e}",
            path.display()
        ))
    })?;
    Ok(())
}

/// The destination directory must exist and be writable. An existing file is overwritten.
pub fn validate_output_file(path: &Path) -> SoxResult<()> {
    if path.as_os_str().is_empty() {
        return Err(SoxError::path("output path is empty"));
    }
    if path.is_dir() {
        return Err(SoxError::path(format!(
            "output path '{}' is a directory",
            path.display()
        )));
    }

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let meta = fs::metadata(parent).map_err(|e| {
        SoxError::path(format!(
            "output directory '{}' does not exist: {e}",
            parent.display()
        ))
    })?;
    if !meta.is_dir() {
        return Err(SoxError::path(format!(
            "output directory '{}' is not a directory",
            parent.display()
        )));
    }
    check_dir_writable(parent)?;
    if let Ok(existing) = fs::metadata(path)
        && existing.permissions().readonly()
    {
        return Err(SoxError::path(format!(
            "output file '{}' exists and is not writable",
            path.display()
        )));
    }
    if path.exists() {
        tracing::debug!(path = %path.display(), "output file exists and will be overwritten");
    }
    Ok(())
}

/// Writability for the current user: create and remove a scratch file in `dir`.
fn check_dir_writable(dir: &Path) -> SoxResult<()> {
    static SEQ: AtomicU64 = AtomicU64::new(0);

    loop {
        let seq = SEQ.fetch_add(1, Ordering::Relaxed);
        let probe = dir.join(format!(
            ".soxchain-write-check-{}-{seq}",
            std::process::id()
        ));
        match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&probe)
        {
            Ok(file) => {
                drop(file);
                if let Err(e) = fs::remove_file(&probe) {
                    tracing::warn!(path = %probe.display(), error = %e, "could not remove write check file");
                }
                return Ok(());
            }
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(SoxError::path(format!(
                    "output directory '{}' is not writable: {e}",
                    dir.display()
                )));
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/file_info.rs"]
mod tests;
