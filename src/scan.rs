//! Discovery of configuration directories.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

/// Directory names never descended into, on top of every dot-directory.
pub const DEFAULT_EXCLUDES: &[&str] = &[".terraform", ".git", "node_modules", "vendor"];

/// Capability to list the directories a hook should run in.
pub trait DirScanner {
    fn find_config_dirs(&self, root: &Path) -> Vec<PathBuf>;
}

impl<T: DirScanner + ?Sized> DirScanner for &T {
    fn find_config_dirs(&self, root: &Path) -> Vec<PathBuf> {
        (**self).find_config_dirs(root)
    }
}

/// Walks a tree and reports each directory that directly holds a file with
/// one of the configured suffixes.
#[derive(Debug, Clone)]
pub struct ConfigDirScanner {
    extensions: Vec<String>,
    excludes: HashSet<String>,
}

impl ConfigDirScanner {
    /// Scanner with the built-in exclusion set.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            extensions: extensions.into_iter().map(Into::into).collect(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Skip additional directory names.
    pub fn with_excludes<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excludes.extend(names.into_iter().map(Into::into));
        self
    }

    fn is_excluded(&self, entry: &DirEntry) -> bool {
        if entry.depth() == 0 || !entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        name.starts_with('.') || self.excludes.contains(name.as_ref())
    }

    fn is_config_file(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            return false;
        }
        let name = entry.file_name().to_string_lossy();
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }
}

impl DirScanner for ConfigDirScanner {
    /// Depth-first, alphabetical within a directory, directories listed in
    /// discovery order. Unreadable subtrees are logged and skipped so one bad
    /// directory never hides the rest of the tree.
    fn find_config_dirs(&self, root: &Path) -> Vec<PathBuf> {
        let mut dirs: Vec<PathBuf> = Vec::new();
        let mut seen: HashSet<PathBuf> = HashSet::new();

        let walker = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !self.is_excluded(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable path during scan");
                    continue;
                }
            };
            if entry.depth() == 0 || !self.is_config_file(&entry) {
                continue;
            }
            if let Some(parent) = entry.path().parent() {
                if seen.insert(parent.to_path_buf()) {
                    tracing::debug!(dir = %parent.display(), "found configuration directory");
                    dirs.push(parent.to_path_buf());
                }
            }
        }

        dirs
    }
}
