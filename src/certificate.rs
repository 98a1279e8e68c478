/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Signing certificate chain extraction.
//!
//! The JAR signing metadata lives under `META-INF/`. The signature block
//! found there is handed to an external converter that prints concatenated
//! PEM stanzas, and the stanzas are captured by a line scanner that never
//! re-encodes the certificate material.

use crate::{
    error::ExtractError, tools::PemConverter, ui::Ui, METADATA_DIR_PREFIX, SIGNATURE_BLOCK_EXT,
};
use lazy_static::lazy_static;
use regex::Regex;
use std::{
    fs,
    io::Read,
    path::{Path, PathBuf},
};
use tempfile::{tempdir, NamedTempFile};
use zip::ZipArchive;

lazy_static! {
    static ref BEGIN_CERTIFICATE: Regex = Regex::new(r"(?i)-+BEGIN\s+CERTIFICATE-+").unwrap();
    static ref END_CERTIFICATE: Regex = Regex::new(r"(?i)-+END\s+CERTIFICATE-+").unwrap();
}

pub struct CertificateExtractor;

impl CertificateExtractor {
    /// Extract the certificate chain from the package's signature block.
    ///
    /// Returns `Some(certs)` (possibly empty) whenever a signature block
    /// was found, and `None` for packages with no block under `META-INF/`
    /// (not an error in this path; the signature validator still runs).
    /// More than one block is ambiguous as to which key signed the package
    /// and fails with [`ExtractError::MultipleSigners`].
    pub fn extract(
        apk_path: &Path,
        converter: &dyn PemConverter,
        ui: &Ui,
    ) -> Result<Option<Vec<String>>, ExtractError> {
        let file = fs::File::open(apk_path)?;
        let mut archive = ZipArchive::new(file)?;

        let names: Vec<String> = archive
            .file_names()
            .filter(|n| n.starts_with(METADATA_DIR_PREFIX))
            .map(str::to_string)
            .collect();
        ui.verbose(&format!(
            "Found {} entries under {} in the package",
            names.len(),
            METADATA_DIR_PREFIX
        ));

        let temp_dir = tempdir()?;
        let mut block_paths: Vec<PathBuf> = Vec::new();
        for name in &names {
            if name.ends_with('/') {
                continue;
            }
            let mut entry = archive.by_name(name)?;
            let safe_name = match entry.enclosed_name() {
                Some(p) => p,
                None => {
                    ui.debug(&format!("Skipping unsafe entry name: {}", name));
                    continue;
                }
            };
            let dest = temp_dir.path().join(safe_name);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes)?;
            fs::write(&dest, &bytes)?;
            ui.debug(&format!("Extracted metadata entry: {}", name));
            if name.ends_with(SIGNATURE_BLOCK_EXT) {
                block_paths.push(dest);
            }
        }

        let block = match block_paths.as_slice() {
            [] => {
                ui.verbose("No signature block in the metadata directory");
                return Ok(None);
            }
            [single] => single,
            many => {
                return Err(ExtractError::MultipleSigners(format!(
                    "{} signature blocks found - the APK should only be signed by a single signer",
                    many.len()
                )))
            }
        };
        ui.verbose(&format!("Found signature block: {}", block.display()));

        let pem_out = NamedTempFile::new()?;
        converter.convert(block, pem_out.path())?;
        let pem_text = fs::read_to_string(pem_out.path()).map_err(|e| {
            ExtractError::ToolOutput(format!("converter output is not readable UTF-8: {}", e))
        })?;

        Ok(Some(scan_pem_certificates(&pem_text)))
    }
}

/// Three-state scan over PEM text, collecting the base64 body of each
/// BEGIN/END-delimited stanza in file order.
///
/// Marker matching is case-insensitive and tolerant of dash-run length.
/// Unbalanced markers are tolerated rather than rejected: an END with no
/// open stanza is ignored, a BEGIN inside a stanza restarts the accumulator,
/// and an unterminated final stanza is dropped.
pub fn scan_pem_certificates(text: &str) -> Vec<String> {
    let mut certs = Vec::new();
    let mut current: Option<String> = None;

    for raw in text.lines() {
        let line = raw.trim();
        if BEGIN_CERTIFICATE.is_match(line) {
            current = Some(String::new());
        } else if END_CERTIFICATE.is_match(line) {
            if let Some(cert) = current.take() {
                certs.push(cert);
            }
        } else if let Some(ref mut cert) = current {
            cert.push_str(line);
        }
    }

    certs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    #[test]
    fn scan_of_empty_text_finds_nothing() {
        assert!(scan_pem_certificates("").is_empty());
        assert!(scan_pem_certificates("subject=/CN=Nobody\n\n").is_empty());
    }

    #[test]
    fn scan_collects_one_stanza_without_reencoding() {
        let text = "-----BEGIN CERTIFICATE-----\nMIIBbzCC\nAdGgAwIB\n-----END CERTIFICATE-----\n";
        assert_eq!(scan_pem_certificates(text), vec!["MIIBbzCCAdGgAwIB"]);
    }

    #[test]
    fn scan_preserves_stanza_order() {
        let text = "subject=/CN=A\n\
                    -----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n\
                    subject=/CN=B\n\
                    -----BEGIN CERTIFICATE-----\nBBBB\n-----END CERTIFICATE-----\n\
                    -----BEGIN CERTIFICATE-----\nCCCC\n-----END CERTIFICATE-----\n";
        assert_eq!(scan_pem_certificates(text), vec!["AAAA", "BBBB", "CCCC"]);
    }

    #[test]
    fn markers_are_case_insensitive_and_dash_tolerant() {
        let text = "--begin certificate--\nZZZZ\n---End Certificate---\n";
        assert_eq!(scan_pem_certificates(text), vec!["ZZZZ"]);
    }

    #[test]
    fn end_without_begin_is_ignored() {
        let text = "-----END CERTIFICATE-----\n\
                    -----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n";
        assert_eq!(scan_pem_certificates(text), vec!["AAAA"]);
    }

    #[test]
    fn begin_inside_a_stanza_restarts_the_accumulator() {
        let text = "-----BEGIN CERTIFICATE-----\nAAAA\n\
                    -----BEGIN CERTIFICATE-----\nBBBB\n-----END CERTIFICATE-----\n";
        assert_eq!(scan_pem_certificates(text), vec!["BBBB"]);
    }

    #[test]
    fn unterminated_final_stanza_is_dropped() {
        let text = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n\
                    -----BEGIN CERTIFICATE-----\nBBBB\n";
        assert_eq!(scan_pem_certificates(text), vec!["AAAA"]);
    }

    // Writes `entries` into a fresh zip and returns its path.
    fn write_zip(dir: &Path, entries: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join("test.apk");
        let file = fs::File::create(&path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        for (name, bytes) in entries {
            writer.start_file(*name, options).unwrap();
            writer.write_all(bytes).unwrap();
        }
        writer.finish().unwrap();
        path
    }

    struct FixedPem(&'static str);

    impl PemConverter for FixedPem {
        fn convert(&self, _block: &Path, pem_out: &Path) -> Result<(), ExtractError> {
            fs::write(pem_out, self.0)?;
            Ok(())
        }
    }

    fn quiet() -> Ui {
        Ui::new(false, false, false, true, false)
    }

    #[test]
    fn package_without_signature_block_yields_none() {
        let dir = tempdir().unwrap();
        let apk = write_zip(
            dir.path(),
            &[("classes.dex", b"dex".as_slice()), ("META-INF/MANIFEST.MF", b"mf")],
        );
        let chain =
            CertificateExtractor::extract(&apk, &FixedPem(""), &quiet()).unwrap();
        assert_eq!(chain, None);
    }

    #[test]
    fn single_block_yields_the_scanned_chain() {
        let dir = tempdir().unwrap();
        let apk = write_zip(
            dir.path(),
            &[
                ("META-INF/MANIFEST.MF", b"mf".as_slice()),
                ("META-INF/CERT.RSA", b"\x30\x82binary"),
            ],
        );
        let pem = "-----BEGIN CERTIFICATE-----\nAAAA\n-----END CERTIFICATE-----\n\
                   -----BEGIN CERTIFICATE-----\nBBBB\n-----END CERTIFICATE-----\n";
        let chain = CertificateExtractor::extract(&apk, &FixedPem(pem), &quiet())
            .unwrap()
            .unwrap();
        assert_eq!(chain, vec!["AAAA", "BBBB"]);
    }

    #[test]
    fn block_with_no_stanzas_is_recorded_as_empty() {
        let dir = tempdir().unwrap();
        let apk = write_zip(
            dir.path(),
            &[("META-INF/CERT.RSA", b"\x30\x82binary".as_slice())],
        );
        let chain = CertificateExtractor::extract(&apk, &FixedPem("no stanzas here\n"), &quiet())
            .unwrap()
            .unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn two_blocks_fail_with_multiple_signers() {
        let dir = tempdir().unwrap();
        let apk = write_zip(
            dir.path(),
            &[
                ("META-INF/CERT.RSA", b"one".as_slice()),
                ("META-INF/OTHER.RSA", b"two"),
            ],
        );
        let err = CertificateExtractor::extract(&apk, &FixedPem(""), &quiet()).unwrap_err();
        assert!(matches!(err, ExtractError::MultipleSigners(_)));
    }

    #[test]
    fn signature_block_match_is_case_sensitive() {
        // Lowercase .rsa is not a signature block in this path.
        let dir = tempdir().unwrap();
        let apk = write_zip(
            dir.path(),
            &[("META-INF/cert.rsa", b"lower".as_slice())],
        );
        let chain = CertificateExtractor::extract(&apk, &FixedPem(""), &quiet()).unwrap();
        assert_eq!(chain, None);
    }
}
