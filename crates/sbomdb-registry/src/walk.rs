//! Directory tree walking and hashing.
//!
//! [`walk_tree`] is the filesystem-walk provider the package registry runs
//! on: it yields every regular file under a root together with its content
//! hash and its package-relative path. Relative paths use `/` separators on
//! every platform so directory codes stay portable.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use sbomdb_types::{ContentHash, DirectoryCode, VerificationCode};

use crate::error::{RegistryError, RegistryResult};

/// A regular file discovered under a package root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkedFile {
    /// Absolute (as-walked) path, usable for opening the file.
    pub path: PathBuf,
    /// Path relative to the walk root, `/`-separated.
    pub relative_path: String,
    /// Content hash of the file.
    pub hash: ContentHash,
}

/// Walk the tree rooted at `root`, hashing every regular file.
///
/// Symlinks are not followed. Results are sorted by relative path. Fails
/// with [`RegistryError::RootNotFound`] if `root` does not exist and
/// [`RegistryError::Io`] if any file cannot be read.
pub fn walk_tree(root: &Path) -> RegistryResult<Vec<WalkedFile>> {
    if !root.exists() {
        return Err(RegistryError::RootNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(false) {
        let entry = entry.map_err(walk_error(root))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path().to_path_buf();
        let hash = ContentHash::of_file(&path).map_err(|source| RegistryError::Io {
            path: path.clone(),
            source,
        })?;
        let relative_path = relative_to(root, &path);
        files.push(WalkedFile {
            path,
            relative_path,
            hash,
        });
    }

    files.sort_by(|a, b| a.relative_path.cmp(&b.relative_path));
    debug!(root = %root.display(), files = files.len(), "walked package tree");
    Ok(files)
}

/// The verification code over a walk result's file hashes.
pub fn verification_code(files: &[WalkedFile]) -> VerificationCode {
    VerificationCode::compute(files.iter().map(|file| &file.hash))
}

/// The content-derived directory code over a walk result.
pub fn directory_code(files: &[WalkedFile]) -> DirectoryCode {
    DirectoryCode::compute(
        files
            .iter()
            .map(|file| (file.relative_path.as_str(), &file.hash)),
    )
}

fn walk_error(root: &Path) -> impl Fn(walkdir::Error) -> RegistryError + '_ {
    move |error| {
        let path = error
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.to_path_buf());
        let source = error
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
        RegistryError::Io { path, source }
    }
}

fn relative_to(root: &Path, path: &Path) -> String {
    let relative = path
        .strip_prefix(root)
        .expect("walked entries are rooted under the walk root");
    relative
        .components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
