/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Launcher icon extraction from the package container.

use crate::error::ExtractError;
use base64::{engine::general_purpose::STANDARD as base64_engine, Engine};
use std::{fs, io::Read, path::Path};
use zip::{result::ZipError, ZipArchive};

pub struct IconExtractor;

impl IconExtractor {
    /// Read the icon entry named by the badging output and return its raw
    /// bytes base64-encoded.
    ///
    /// The filename is only ever discovered from an application summary
    /// line; a dump without one leaves us with nothing to extract, which is
    /// a prerequisite failure rather than a missing entry.
    pub fn extract(apk_path: &Path, icon_filename: Option<&str>) -> Result<String, ExtractError> {
        let name = icon_filename.ok_or_else(|| {
            ExtractError::Prerequisite("Couldn't find an icon in the APK".to_string())
        })?;

        let file = fs::File::open(apk_path)?;
        let mut archive = ZipArchive::new(file)?;
        let mut entry = archive.by_name(name).map_err(|e| match e {
            ZipError::FileNotFound => ExtractError::NotFound(format!(
                "icon entry '{}' is not present in the package",
                name
            )),
            other => ExtractError::Zip(other),
        })?;

        let mut bytes = Vec::new();
        entry.read_to_end(&mut bytes)?;
        Ok(base64_engine.encode(&bytes))
    }
}
