use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Path, PathBuf};

use super::Storage;

/// In-memory directory tree with optional failure injection on rename.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    dirs: RefCell<BTreeSet<PathBuf>>,
    files: RefCell<BTreeMap<PathBuf, Vec<u8>>>,
    renames: Cell<usize>,
    fail_rename_at: Cell<Option<usize>>,
}

impl MemoryStorage {
    pub fn with_files<I, S>(dir: &Path, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let storage = Self::default();
        storage.dirs.borrow_mut().insert(dir.to_path_buf());
        for name in names {
            let name = name.as_ref();
            storage.add_file(&dir.join(name), name.as_bytes());
        }
        storage
    }

    pub fn add_file(&self, path: &Path, contents: &[u8]) {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), contents.to_vec());
    }

    pub fn add_dir(&self, path: &Path) {
        self.dirs.borrow_mut().insert(path.to_path_buf());
    }

    /// Make the `n`-th rename call (0-based, counted from now) fail.
    pub fn fail_rename_at(&self, n: usize) {
        self.fail_rename_at.set(Some(self.renames.get() + n));
    }

    pub fn file_names(&self, dir: &Path) -> Vec<String> {
        self.files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .filter_map(|p| p.file_name().and_then(|s| s.to_str()).map(str::to_string))
            .collect()
    }

    pub fn contents(&self, path: &Path) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }
}

impl Storage for MemoryStorage {
    fn is_dir(&self, path: &Path) -> bool {
        self.dirs.borrow().contains(path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.is_dir(path) || self.files.borrow().contains_key(path)
    }

    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        if !self.is_dir(dir) {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no such directory"));
        }
        Ok(self
            .files
            .borrow()
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect())
    }

    fn rename(&self, from: &Path, to: &Path) -> io::Result<()> {
        let call = self.renames.get();
        self.renames.set(call + 1);
        if self.fail_rename_at.get() == Some(call) {
            return Err(io::Error::other("injected rename failure"));
        }

        let mut files = self.files.borrow_mut();
        let contents = files
            .remove(from)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such file"))?;
        files.insert(to.to_path_buf(), contents);
        Ok(())
    }
}
