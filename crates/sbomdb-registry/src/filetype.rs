//! SPDX file-type classification.
//!
//! Classification is a collaborator seam: scanner plugins may supply their
//! own [`FileTypeClassifier`] (e.g., one that inspects content). The default
//! [`ExtensionClassifier`] maps file extensions to the four SPDX 2.0 file
//! types and always resolves — anything unrecognized is [`FileType::Other`].

use std::path::Path;

use sbomdb_types::FileType;

/// Maps a file path to an SPDX file type. Must always resolve; there is no
/// "unclassifiable" outcome.
pub trait FileTypeClassifier: Send + Sync {
    fn classify(&self, path: &Path) -> FileType;
}

/// Extensions treated as source code.
const SOURCE_EXTENSIONS: &[&str] = &[
    "c", "cc", "cpp", "cs", "css", "go", "h", "hpp", "html", "java", "js", "kt", "m", "php", "pl",
    "py", "rb", "rs", "scala", "sh", "sql", "swift", "ts",
];

/// Extensions treated as archives.
const ARCHIVE_EXTENSIONS: &[&str] = &[
    "7z", "bz2", "crate", "deb", "gem", "gz", "jar", "rpm", "tar", "tgz", "whl", "xz", "zip",
];

/// Extensions treated as binaries.
const BINARY_EXTENSIONS: &[&str] = &[
    "a", "bin", "class", "dll", "dylib", "exe", "o", "pyc", "so", "wasm",
];

/// Default classifier: lowercased file extension against fixed sets.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExtensionClassifier;

impl FileTypeClassifier for ExtensionClassifier {
    fn classify(&self, path: &Path) -> FileType {
        let Some(extension) = path.extension() else {
            return FileType::Other;
        };
        let extension = extension.to_string_lossy().to_lowercase();

        if SOURCE_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Source
        } else if ARCHIVE_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Archive
        } else if BINARY_EXTENSIONS.contains(&extension.as_str()) {
            FileType::Binary
        } else {
            FileType::Other
        }
    }
}
