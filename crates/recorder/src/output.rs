//! Write-then-rename output files

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{RecorderError, Result};

/// Sibling of `path` with `.partial` appended to the file name
pub fn partial_path(path: &Path) -> Result<PathBuf> {
    let name = path
        .file_name()
        .ok_or_else(|| RecorderError::InvalidPath(path.to_path_buf()))?;
    let mut partial = OsString::from(name);
    partial.push(".partial");
    Ok(path.with_file_name(partial))
}

/// Removes a temporary file on drop unless committed
#[derive(Debug)]
pub struct PartialGuard {
    path: PathBuf,
    armed: bool,
}

impl PartialGuard {
    pub fn new(path: PathBuf) -> Self {
        Self { path, armed: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rename the temporary file to `target` and disarm the guard
    pub fn commit(mut self, target: &Path) -> Result<()> {
        fs::rename(&self.path, target).map_err(RecorderError::io(target))?;
        self.armed = false;
        Ok(())
    }
}

impl Drop for PartialGuard {
    fn drop(&mut self) {
        if self.armed && self.path.exists() {
            if let Err(err) = fs::remove_file(&self.path) {
                tracing::warn!(path = %self.path.display(), %err, "failed to remove partial output");
            }
        }
    }
}

/// Write `bytes` to `path` through a `.partial` sibling
///
/// The target only ever appears complete; on failure the partial file is
/// removed and any existing target is left alone.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let guard = PartialGuard::new(partial_path(path)?);
    fs::write(guard.path(), bytes).map_err(RecorderError::io(guard.path()))?;
    guard.commit(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "qr-tetris-output-{name}-{}",
            std::process::id()
        ));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn partial_path_appends_suffix() {
        let p = partial_path(Path::new("out/anim.gif")).unwrap();
        assert_eq!(p, Path::new("out/anim.gif.partial"));
        assert!(partial_path(Path::new("/")).is_err());
    }

    #[test]
    fn uncommitted_guard_removes_file() {
        let dir = scratch_dir("guard");
        let tmp = dir.join("x.partial");
        fs::write(&tmp, b"half").unwrap();
        drop(PartialGuard::new(tmp.clone()));
        assert!(!tmp.exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_atomic_leaves_only_target() {
        let dir = scratch_dir("atomic");
        let target = dir.join("data.bin");
        write_atomic(&target, b"payload").unwrap();
        assert_eq!(fs::read(&target).unwrap(), b"payload");
        assert!(!dir.join("data.bin.partial").exists());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn write_into_missing_dir_fails_cleanly() {
        let dir = scratch_dir("missing");
        let target = dir.join("nope").join("data.bin");
        let err = write_atomic(&target, b"payload").unwrap_err();
        assert!(matches!(err, RecorderError::Io { .. }));
        fs::remove_dir_all(dir).unwrap();
    }
}
