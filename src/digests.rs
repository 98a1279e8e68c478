/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! File-level size and digest computation for the package.

use crate::error::ExtractError;
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine};
use ring::digest;
use std::{fs, path::Path};

/// Size and content digests of the package file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSummary {
    pub file_size: u64,
    pub file_sha1_base64: String,
    pub file_sha256_base64: String,
}

pub struct DigestEngine;

impl DigestEngine {
    pub fn compute_sha1(data: &[u8]) -> String {
        base64_engine.encode(digest::digest(&digest::SHA1_FOR_LEGACY_USE_ONLY, data).as_ref())
    }

    pub fn compute_sha256(data: &[u8]) -> String {
        base64_engine.encode(digest::digest(&digest::SHA256, data).as_ref())
    }

    /// Read the package once and summarize it. Packages handled this way are
    /// small, so no streaming.
    pub fn summarize(path: &Path) -> Result<FileSummary, ExtractError> {
        if !path.exists() {
            return Err(ExtractError::NotFound(format!(
                "package file does not exist: {}",
                path.display()
            )));
        }
        let bytes = fs::read(path)?;
        Ok(FileSummary {
            file_size: bytes.len() as u64,
            file_sha1_base64: Self::compute_sha1(&bytes),
            file_sha256_base64: Self::compute_sha256(&bytes),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn digests_of_empty_input_match_known_values() {
        assert_eq!(
            DigestEngine::compute_sha1(b""),
            "2jmj7l5rSw0yVb/vlWAYkK/YBwk="
        );
        assert_eq!(
            DigestEngine::compute_sha256(b""),
            "47DEQpj8HBSa+/TImW+5JCeuQeRkm5NMpJWZG3hSuFU="
        );
    }

    #[test]
    fn summarize_reports_size_and_is_deterministic() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not really an apk").unwrap();

        let first = DigestEngine::summarize(file.path()).unwrap();
        let second = DigestEngine::summarize(file.path()).unwrap();
        assert_eq!(first.file_size, 17);
        assert_eq!(first, second);
    }

    #[test]
    fn changing_one_byte_changes_both_digests() {
        let a = b"package-contents".to_vec();
        let mut b = a.clone();
        b[0] ^= 1;
        assert_ne!(DigestEngine::compute_sha1(&a), DigestEngine::compute_sha1(&b));
        assert_ne!(
            DigestEngine::compute_sha256(&a),
            DigestEngine::compute_sha256(&b)
        );
    }

    #[test]
    fn missing_file_is_not_found() {
        let err = DigestEngine::summarize(Path::new("/does/not/exist.apk")).unwrap_err();
        assert!(matches!(err, ExtractError::NotFound(_)));
    }
}
