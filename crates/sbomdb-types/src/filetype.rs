use std::fmt;

use serde::{Deserialize, Serialize};

/// SPDX file type tag attached to every registered file.
///
/// Classification always resolves: files that match no known category are
/// registered as [`FileType::Other`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileType {
    Source,
    Binary,
    Archive,
    Other,
}

impl FileType {
    /// The SPDX tag-value spelling of this file type.
    pub fn tag(&self) -> &'static str {
        match self {
            FileType::Source => "SOURCE",
            FileType::Binary => "BINARY",
            FileType::Archive => "ARCHIVE",
            FileType::Other => "OTHER",
        }
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tag())
    }
}
