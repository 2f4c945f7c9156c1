//! Storage seam used by the catalog and the renamer.
//!
//! Everything that enumerates or renames track files goes through the
//! [`Storage`] trait so the ordering and renaming rules can be tested
//! against an in-memory directory instead of the real filesystem.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

#[cfg(test)]
pub mod memory;

pub trait Storage {
    /// Whether `path` exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Whether anything (file or directory) exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    /// Regular files directly inside `dir`, sorted by file name.
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;

    /// Move `from` to `to`, replacing nothing: callers check `exists` first.
    fn rename(&self, from: &Path, to: &Path) -> io::Result<()>;
}

/// [`Storage`] backed by the local filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsStorage;

impl Storage for FsStorage {
    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        // Depth 0 is `dir` itself; track folders are flat.
        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        Ok(files)
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::rename(from, to)
    }
}
