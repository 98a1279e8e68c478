/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Configuration parsing for the ApkHosted CLI.

use crate::{error::ExtractError, ui::Ui};
use clap::ArgMatches;
use std::path::PathBuf;

/// Application configuration parsed from command-line arguments.
#[derive(Debug)]
pub struct Config {
    /// Path to the APK to describe
    pub apk_path: PathBuf,
    /// URL where the APK will be hosted
    pub hosted_url: String,
    /// Whether to suppress non-error output
    pub quiet: bool,
    /// Verbosity level (0 = off, 1 = verbose, 2 = very verbose, 3+ = debug)
    pub verbosity_level: u8,
}

impl Config {
    /// Translate clap matches into a typed configuration. Existence of the
    /// APK is deliberately not checked here; the pipeline's prerequisite
    /// stage owns that check.
    pub fn from_matches(matches: &ArgMatches, ui: &Ui) -> Result<Self, ExtractError> {
        let apk_path = matches
            .get_one::<String>("apk")
            .map(PathBuf::from)
            .ok_or_else(|| ExtractError::Prerequisite("No APK file specified".into()))?;
        let hosted_url = matches
            .get_one::<String>("url")
            .cloned()
            .ok_or_else(|| ExtractError::Prerequisite("No hosting URL specified".into()))?;

        ui.debug(&format!("APK: {}", apk_path.display()));
        ui.debug(&format!("Hosting URL: {}", hosted_url));

        Ok(Self {
            apk_path,
            hosted_url,
            quiet: matches.get_flag("quiet"),
            verbosity_level: matches.get_count("verbose"),
        })
    }
}
