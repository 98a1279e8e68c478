/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! # ApkHosted Rust Library
//!
//! A library for describing an Android APK as an "externally hosted"
//! application. It inspects a package's declared manifest attributes, file
//! digests and signing certificate chain, and assembles the metadata record
//! that the distribution console expects when an APK is hosted outside the
//! store. It provides the core functionality for the `apkhosted`
//! command-line tool.

pub mod badging;
pub mod certificate;
pub mod cli;
pub mod config;
pub mod digests;
pub mod error;
pub mod extractor;
pub mod icon;
pub mod metadata;
pub mod tools;
pub mod ui;

pub const APP_NAME: &str = "ApkHosted";
pub const APP_BIN_NAME: &str = "apkhosted";
pub const APP_VERSION: &str = "1.0.0";
pub const APP_AUTHOR: &str = "Tiash H Kabir / @MrCarb0n";
pub const APP_ABOUT: &str =
    "For a given APK, create an externally-hosted APK definition JSON.";

/// The distribution console no longer accepts packages declaring a minimum
/// SDK below this level; lower values are clamped up when parsed.
pub const MIN_ALLOWED_SDK_VERSION: u32 = 26;

/// Directory inside the archive holding the JAR signing metadata.
pub const METADATA_DIR_PREFIX: &str = "META-INF/";

/// Filename extension marking a signature block in the metadata directory.
pub const SIGNATURE_BLOCK_EXT: &str = ".RSA";

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;
