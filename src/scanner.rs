/*!
 * Directory scanning and metadata extraction
 */

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::error::Result;
use crate::types::{FileRecord, RecordKind};
use crate::{bail, ensure};

/// Scanner for directory contents
///
/// Produces one [`FileRecord`] per regular file under the root. Directories
/// and symlinks to directories are never pipeline candidates; the `show`
/// listing can opt into directory records with [`Scanner::with_directories`].
#[derive(Debug)]
pub struct Scanner {
    root: PathBuf,
    recurse: bool,
    include_dirs: bool,
}

impl Scanner {
    /// Create a scanner rooted at `root`, validating the root up front
    pub fn new(root: impl AsRef<Path>, recurse: bool) -> Result<Self> {
        let root = root.as_ref();
        ensure!(root.exists(), Scan, "{} is not an existing path", root.display());
        ensure!(root.is_dir(), Scan, "{} is not a directory", root.display());
        let root = match fs::canonicalize(root) {
            Ok(abs) => abs,
            Err(e) => bail!(Scan, "cannot resolve {}: {}", root.display(), e),
        };
        Ok(Self {
            root,
            recurse,
            include_dirs: false,
        })
    }

    /// Also yield records for directories (used by the `show` listing)
    pub fn with_directories(mut self) -> Self {
        self.include_dirs = true;
        self
    }

    /// Absolute scan root
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Lazily scan the root and yield one record per matching entry
    ///
    /// Unreadable entries and broken symlinks are skipped with a warning
    /// on stderr rather than aborting the scan.
    pub fn scan(&self) -> impl Iterator<Item = FileRecord> + '_ {
        let max_depth = if self.recurse { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(max_depth)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            // A symlinked directory is neither a candidate nor a subtree
            // to descend into.
            .filter_entry(|e| !(e.path_is_symlink() && e.file_type().is_dir()))
            .filter_map(|entry| match entry {
                Ok(entry) => self.to_record(&entry),
                Err(e) => {
                    eprintln!("Warning: skipping unreadable entry: {}", e);
                    None
                }
            })
            .filter(move |record| self.include_dirs || record.is_file())
    }

    /// Build a record snapshot from a directory entry
    fn to_record(&self, entry: &DirEntry) -> Option<FileRecord> {
        let kind = if entry.file_type().is_dir() {
            RecordKind::Directory
        } else if entry.file_type().is_file() {
            RecordKind::File
        } else {
            return None;
        };

        let metadata = match entry.metadata() {
            Ok(m) => m,
            Err(e) => {
                eprintln!("Warning: cannot stat {}: {}", entry.path().display(), e);
                return None;
            }
        };
        let modified = match metadata.modified() {
            Ok(t) => t,
            Err(e) => {
                eprintln!(
                    "Warning: no modification time for {}: {}",
                    entry.path().display(),
                    e
                );
                return None;
            }
        };

        let path = entry.path().to_path_buf();
        let name = entry.file_name().to_string_lossy().to_string();
        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let extension = match kind {
            RecordKind::File => path
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase())
                .unwrap_or_default(),
            RecordKind::Directory => String::new(),
        };

        Some(FileRecord {
            path,
            name,
            stem,
            extension,
            size: metadata.len(),
            modified,
            kind,
        })
    }
}
