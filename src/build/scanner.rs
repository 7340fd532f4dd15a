//! Input discovery
//!
//! Walks the fixed source, include and library directories and collects the
//! files handed to the compiler. Entries are visited in file-name order at
//! every level so repeated scans of the same tree agree exactly.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::build::platform::OperatingSystem;
use crate::error::BuildError;

/// Files and directories fed to one compiler invocation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputSet {
    /// C translation units
    pub source_files: Vec<PathBuf>,
    /// Include search directories
    pub header_dirs: Vec<PathBuf>,
    /// Headers found under the include root, for diagnostics only
    pub header_files: Vec<PathBuf>,
    /// Prebuilt static libraries, linked by path
    pub library_files: Vec<PathBuf>,
}

/// Scan the three input roots
///
/// A missing include or library root is fine. A missing source root, or one
/// without any `.c` file, is [`BuildError::MissingSources`].
pub fn scan(
    source_root: &Path,
    header_root: &Path,
    library_root: &Path,
    host: OperatingSystem,
) -> Result<InputSet, BuildError> {
    let source_files = collect_files(source_root, |ext| ext == "c");
    if source_files.is_empty() {
        return Err(BuildError::missing_sources(source_root));
    }

    let header_files = collect_files(header_root, |ext| ext == "h");
    let library_files = collect_files(library_root, |ext| is_library_extension(ext, host));

    Ok(InputSet {
        source_files,
        header_dirs: vec![header_root.to_path_buf()],
        header_files,
        library_files,
    })
}

/// `.a` everywhere, `.lib` only on Windows hosts
fn is_library_extension(ext: &str, host: OperatingSystem) -> bool {
    ext == "a" || (host.is_windows() && ext == "lib")
}

/// Recursively collect files under `root` whose extension passes `accept`
///
/// Symlinks to files are kept; symlinked directories are not descended.
fn collect_files(root: &Path, accept: impl Fn(&str) -> bool) -> Vec<PathBuf> {
    if !root.is_dir() {
        return Vec::new();
    }

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| {
            entry
                .path()
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| accept(ext))
        })
        .map(|entry| entry.into_path())
        .collect()
}
