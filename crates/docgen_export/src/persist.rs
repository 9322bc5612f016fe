use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl PersistError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Ensure output directory exists; create it and its parents if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir(format!(
                "{} is not a directory",
                dir.display()
            )));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    // Writability check: create and drop a temp file.
    NamedTempFile::new_in(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    Ok(())
}

/// Delete every entry directly inside `dir`: files are removed and
/// subdirectories are removed recursively. `dir` itself is kept.
pub fn clear_directory(dir: &Path) -> Result<usize, PersistError> {
    let mut removed = 0;
    for entry in fs::read_dir(dir).map_err(|e| PersistError::io(dir, e))? {
        let entry = entry.map_err(|e| PersistError::io(dir, e))?;
        let path = entry.path();
        // `DirEntry::file_type` does not follow symlinks, so a link to a
        // directory is unlinked rather than emptied.
        let file_type = entry.file_type().map_err(|e| PersistError::io(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| PersistError::io(&path, e))?;
        } else {
            fs::remove_file(&path).map_err(|e| PersistError::io(&path, e))?;
        }
        removed += 1;
    }
    Ok(removed)
}

/// Atomically write content under a root directory by writing a temp file
/// next to the target then renaming it into place.
pub struct AtomicFileWriter {
    root: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write `content` to `root/relative`, creating parent directories on demand.
    pub fn write(&self, relative: &Path, content: &[u8]) -> Result<PathBuf, PersistError> {
        let target = self.root.join(relative);
        let parent = target.parent().unwrap_or(&self.root);
        fs::create_dir_all(parent).map_err(|e| PersistError::io(parent, e))?;

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| PersistError::io(parent, e))?;
        write_synced(&mut tmp, content).map_err(|e| PersistError::io(&target, e))?;

        // Replace existing file if present to keep determinism.
        if target.is_file() {
            fs::remove_file(&target).map_err(|e| PersistError::io(&target, e))?;
        }
        tmp.persist(&target)
            .map_err(|e| PersistError::io(&target, e.error))?;
        Ok(target)
    }
}

fn write_synced(tmp: &mut NamedTempFile, content: &[u8]) -> io::Result<()> {
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()
}
