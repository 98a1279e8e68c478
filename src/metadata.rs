/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! The externally-hosted APK metadata record.

use serde::Serialize;

/// One `uses-permission` declaration from the manifest dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsesPermission {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_sdk_version: Option<String>,
}

impl UsesPermission {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            max_sdk_version: None,
        }
    }
}

/// The completed record uploaded to the distribution console.
///
/// Filled in stage order by the extractor; a field set by one stage is never
/// touched by a later one. Optional fields that were never set are omitted
/// from the JSON output. `certificate_base64` is `Some` (possibly empty)
/// exactly when a signature block was found in the package.
#[derive(Debug, Default, Serialize)]
pub struct ApkMetadata {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_sdk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_sdk: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application_label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_filename: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uses_feature: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub uses_permission: Vec<UsesPermission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_size: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha1_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_sha256_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub certificate_base64: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub externally_hosted_url: Option<String>,
}
