//! Package-level fingerprints.
//!
//! A [`VerificationCode`] summarizes the *contents* of a package's file set
//! per the SPDX package-verification-code algorithm. A [`DirectoryCode`]
//! additionally folds in the files' relative paths, giving a directory tree
//! a location-independent identity: two trees with identical file contents
//! but different layouts share a verification code yet carry different
//! directory codes.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

use crate::error::TypeError;
use crate::hash::ContentHash;

/// SPDX package verification code: a single fingerprint over the content
/// hashes of every file in a package.
///
/// Defined as the SHA-1 of the lexicographically sorted, lowercase-hex file
/// hashes concatenated with no separator. Pure and order-independent: two
/// packages with identical file-hash sets always produce identical codes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct VerificationCode([u8; 20]);

impl VerificationCode {
    /// Compute the verification code for a set of file hashes.
    ///
    /// Callers excluding designated files (e.g., the SPDX document itself)
    /// must remove them from the input before calling; this function hashes
    /// exactly what it is given.
    pub fn compute<'a, I>(hashes: I) -> Self
    where
        I: IntoIterator<Item = &'a ContentHash>,
    {
        let mut hex_hashes: Vec<String> = hashes.into_iter().map(ContentHash::to_hex).collect();
        hex_hashes.sort_unstable();

        let mut hasher = Sha1::new();
        for h in &hex_hashes {
            hasher.update(h.as_bytes());
        }
        Self(hasher.finalize().into())
    }

    /// Lowercase hex representation (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 10 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(self.0)[..10].to_string()
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        ContentHash::from_hex(s).map(|h| Self(*h.as_bytes()))
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VerificationCode({})", self.short_hex())
    }
}

impl fmt::Display for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Content-derived identity of a directory tree.
///
/// Computed over the sorted `(relative_path, content_hash)` pairs of the
/// tree, so identity follows the tree's contents and layout rather than its
/// location on disk. Relocating a tree without changing it produces the same
/// directory code; reshuffling files between directories changes it even
/// when the verification code stays the same.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DirectoryCode([u8; 20]);

impl DirectoryCode {
    /// Compute the directory code for a tree's `(relative path, hash)` pairs.
    pub fn compute<'a, I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a ContentHash)>,
    {
        let mut pairs: Vec<(&str, String)> = entries
            .into_iter()
            .map(|(path, hash)| (path, hash.to_hex()))
            .collect();
        pairs.sort_unstable();

        let mut hasher = Sha1::new();
        for (path, hash_hex) in &pairs {
            // NUL-delimited so "a" + "bc" cannot collide with "ab" + "c".
            hasher.update(path.as_bytes());
            hasher.update([0u8]);
            hasher.update(hash_hex.as_bytes());
            hasher.update([0u8]);
        }
        Self(hasher.finalize().into())
    }

    /// Lowercase hex representation (40 characters).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Short hex representation (first 10 characters).
    pub fn short_hex(&self) -> String {
        hex::encode(self.0)[..10].to_string()
    }

    /// Parse from a hex string.
    pub fn from_hex(s: &str) -> Result<Self, TypeError> {
        ContentHash::from_hex(s).map(|h| Self(*h.as_bytes()))
    }

    /// The raw 20-byte digest.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Debug for DirectoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DirectoryCode({})", self.short_hex())
    }
}

impl fmt::Display for DirectoryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
