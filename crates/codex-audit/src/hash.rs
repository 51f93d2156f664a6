//! Artifact hash resolution for lifecycle events.
//!
//! A lifecycle event records the SHA-256 of the extension package it refers
//! to. The package is looked up as `<extension_id>-<version>.<ext>` in each
//! search directory in order; the first one that exists and can be read is
//! hashed. When none can be, the event carries `PENDING_HASH` instead and
//! the digest is filled in by a later process, so resolution never fails.
//!
//! Nothing is cached: every call re-reads the file system.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use codex_contracts::event::PENDING_HASH;

/// Locates and hashes extension packages.
#[derive(Debug, Clone)]
pub struct HashResolver {
    search_dirs: Vec<PathBuf>,
    package_extension: String,
}

impl HashResolver {
    /// Probe `search_dirs` in order for files with `package_extension`
    /// (without the dot, e.g. `"vsix"`).
    pub fn new(search_dirs: Vec<PathBuf>, package_extension: impl Into<String>) -> Self {
        Self {
            search_dirs,
            package_extension: package_extension.into(),
        }
    }

    /// The candidate package paths for one extension version, in probe order.
    pub fn candidates(&self, extension_id: &str, version: &str) -> Vec<PathBuf> {
        let file_name = format!("{extension_id}-{version}.{}", self.package_extension);
        self.search_dirs.iter().map(|dir| dir.join(&file_name)).collect()
    }

    /// Upper-case SHA-256 hex of the first readable candidate, or
    /// `PENDING_HASH` when there is none.
    ///
    /// A candidate that exists but cannot be read is logged and skipped.
    pub fn resolve(&self, extension_id: &str, version: &str) -> String {
        for candidate in self.candidates(extension_id, version) {
            if !candidate.exists() {
                continue;
            }
            match sha256_file(&candidate) {
                Ok(digest) => {
                    info!(path = %candidate.display(), "calculated package hash");
                    return digest;
                }
                Err(e) => {
                    warn!(path = %candidate.display(), error = %e, "failed to hash package");
                }
            }
        }

        debug!(%extension_id, %version, "no package found, hash pending");
        PENDING_HASH.to_string()
    }
}

/// Upper-case SHA-256 hex of the full contents of `path`.
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(hex::encode_upper(Sha256::digest(&bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA-256("hello world")
    const HELLO_SHA256: &str =
        "B94D27B9934D3E08A52E52D7DA7DABFAC484EFE37A5380EE9088F7ACE2EFCDE9";

    fn resolver(dirs: &[&Path]) -> HashResolver {
        HashResolver::new(dirs.iter().map(|d| d.to_path_buf()).collect(), "vsix")
    }

    #[test]
    fn test_candidates_follow_search_order() {
        let r = HashResolver::new(
            vec![PathBuf::from("/a"), PathBuf::from("/b")],
            "vsix",
        );
        assert_eq!(
            r.candidates("github.copilot", "1.2.3"),
            vec![
                PathBuf::from("/a/github.copilot-1.2.3.vsix"),
                PathBuf::from("/b/github.copilot-1.2.3.vsix"),
            ]
        );
    }

    #[test]
    fn test_missing_package_is_pending() {
        let dir = tempfile::tempdir().unwrap();
        let r = resolver(&[dir.path()]);
        assert_eq!(r.resolve("github.copilot", "9.9.9"), PENDING_HASH);
    }

    #[test]
    fn test_no_search_dirs_is_pending() {
        let r = HashResolver::new(Vec::new(), "vsix");
        assert_eq!(r.resolve("github.copilot", "1.0.0"), PENDING_HASH);
    }

    #[test]
    fn test_found_package_is_upper_hex_sha256() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("github.copilot-1.2.3.vsix"), b"hello world").unwrap();

        let r = resolver(&[dir.path()]);
        let hash = r.resolve("github.copilot", "1.2.3");

        assert_eq!(hash, HELLO_SHA256);
        assert_eq!(hash.len(), 64);
    }

    #[test]
    fn test_first_existing_candidate_wins() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(first.path().join("ext-1.0.0.vsix"), b"hello world").unwrap();
        std::fs::write(second.path().join("ext-1.0.0.vsix"), b"something else").unwrap();

        let r = resolver(&[first.path(), second.path()]);
        assert_eq!(r.resolve("ext", "1.0.0"), HELLO_SHA256);
    }

    #[test]
    fn test_unreadable_candidate_falls_through() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        // A directory with the package name exists but cannot be read as a file.
        std::fs::create_dir(first.path().join("ext-1.0.0.vsix")).unwrap();
        std::fs::write(second.path().join("ext-1.0.0.vsix"), b"hello world").unwrap();

        let r = resolver(&[first.path(), second.path()]);
        assert_eq!(r.resolve("ext", "1.0.0"), HELLO_SHA256);
    }

    #[test]
    fn test_unreadable_only_candidate_is_pending() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("ext-1.0.0.vsix")).unwrap();

        let r = resolver(&[dir.path()]);
        assert_eq!(r.resolve("ext", "1.0.0"), PENDING_HASH);
    }
}
