/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

use crate::{
    config::Config,
    error::ExtractError,
    extractor::MetadataExtractor,
    tools::Toolchain,
    ui::Ui,
    APP_ABOUT, APP_AUTHOR, APP_BIN_NAME, APP_NAME, APP_VERSION,
};
use clap::{Arg, ArgAction, Command};

pub fn build_command() -> Command {
    Command::new(APP_NAME)
        .bin_name(APP_BIN_NAME)
        .version(APP_VERSION)
        .author(APP_AUTHOR)
        .about(APP_ABOUT)
        .help_template("{about-with-newline}{usage-heading} {usage}\n\n{all-args}\n")
        .arg(
            Arg::new("apk")
                .long("apk")
                .value_name("FILE")
                .required(true)
                .help("Path to the APK to describe"),
        )
        .arg(
            Arg::new("url")
                .long("externally-hosted-url")
                .value_name("URL")
                .required(true)
                .help("URL the APK will be served from"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Set verbosity level (-v for verbose, -vv for more verbose, -vvv for debug)"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .help("Suppress all output except errors"),
        )
}

/// Parse arguments, run the pipeline, and print the definition JSON to
/// stdout. All diagnostics go to stderr.
pub fn run() -> Result<(), ExtractError> {
    let matches = build_command().get_matches();

    let verbosity_level = matches.get_count("verbose");
    let quiet = matches.get_flag("quiet");
    let mut ui = Ui::from_verbosity_level(verbosity_level, quiet, true);
    ui.enable_colors_if_supported();
    ui.print_banner();

    let config = Config::from_matches(&matches, &ui)?;
    let toolchain = Toolchain::locate(&ui)?;

    let extractor = MetadataExtractor::new(config.apk_path, config.hosted_url, toolchain);
    let record = extractor.extract(&ui)?;

    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
