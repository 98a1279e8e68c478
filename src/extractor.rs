/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! The extraction pipeline, run strictly in stage order: badging parse,
//! file digests, certificate chain, integrity gate, icon, hosting URL.
//! Any stage failure aborts the run; no partial record is ever surfaced.

use crate::{
    badging::parse_badging_lines,
    certificate::CertificateExtractor,
    digests::DigestEngine,
    error::ExtractError,
    icon::IconExtractor,
    metadata::ApkMetadata,
    tools::Toolchain,
    ui::Ui,
};
use std::path::PathBuf;

pub struct MetadataExtractor {
    apk_path: PathBuf,
    hosted_url: String,
    toolchain: Toolchain,
}

impl MetadataExtractor {
    pub fn new(apk_path: PathBuf, hosted_url: impl Into<String>, toolchain: Toolchain) -> Self {
        Self {
            apk_path,
            hosted_url: hosted_url.into(),
            toolchain,
        }
    }

    /// Run every stage and assemble the completed record.
    pub fn extract(&self, ui: &Ui) -> Result<ApkMetadata, ExtractError> {
        if !self.apk_path.exists() {
            return Err(ExtractError::Prerequisite(format!(
                "Could not find APK {}",
                self.apk_path.display()
            )));
        }

        let mut record = ApkMetadata::default();

        ui.info("Reading badging output...");
        let lines = self.toolchain.badging.dump_badging(&self.apk_path)?;
        let badging = parse_badging_lines(lines.iter().map(String::as_str), ui)?;
        record.package_name = badging.package_name;
        record.version_code = badging.version_code;
        record.version_name = badging.version_name;
        record.minimum_sdk = badging.minimum_sdk;
        record.maximum_sdk = badging.maximum_sdk;
        record.application_label = badging.application_label;
        record.icon_filename = badging.icon_filename;
        record.uses_feature = badging.uses_feature;
        record.uses_permission = badging.uses_permission;

        ui.info("Computing file digests...");
        let summary = DigestEngine::summarize(&self.apk_path)?;
        record.file_size = Some(summary.file_size);
        record.file_sha1_base64 = Some(summary.file_sha1_base64);
        record.file_sha256_base64 = Some(summary.file_sha256_base64);

        ui.info("Extracting certificate chain...");
        record.certificate_base64 =
            CertificateExtractor::extract(&self.apk_path, self.toolchain.pem.as_ref(), ui)?;

        ui.info("Validating alignment and signature...");
        self.toolchain.alignment.check(&self.apk_path)?;
        self.toolchain.signature.check(&self.apk_path)?;

        ui.info("Extracting icon...");
        record.icon_base64 = Some(IconExtractor::extract(
            &self.apk_path,
            record.icon_filename.as_deref(),
        )?);

        record.externally_hosted_url = Some(self.hosted_url.clone());
        ui.success("Extraction complete");
        Ok(record)
    }
}
