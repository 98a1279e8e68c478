/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Terminal diagnostics. Everything here writes to stderr: stdout is
//! reserved for the metadata JSON so the tool stays pipe-friendly.

use crate::{APP_NAME, APP_VERSION};
use colored::*;

pub struct Ui {
    pub verbose: bool,
    pub very_verbose: bool,
    pub debug: bool,
    silent: bool,
    colors: bool,
}

impl Default for Ui {
    fn default() -> Self {
        Self::new(false, false, false, false, true)
    }
}

impl Ui {
    pub fn new(v: bool, vv: bool, d: bool, s: bool, c: bool) -> Self {
        Self {
            verbose: v,
            very_verbose: vv,
            debug: d,
            silent: s,
            colors: c,
        }
    }

    pub fn from_verbosity_level(level: u8, s: bool, c: bool) -> Self {
        Self::new(level >= 1, level >= 2, level >= 3, s, c)
    }

    pub fn enable_colors_if_supported(&mut self) {
        #[cfg(windows)]
        if self.colors {
            colored::control::set_override(true);
        }
    }

    pub fn print_banner(&self) {
        if self.silent || !self.verbose {
            return;
        }
        let title = format!(" {} v{} ", APP_NAME, APP_VERSION);
        let border = "-".repeat(title.len());
        if self.supports_color() {
            let tb = format!("+-{}-+", border).magenta().bold();
            let mid = format!("| {} |", title.cyan().bold()).blue();
            eprintln!("{}\n{}\n{}", tb, mid, tb);
        } else {
            eprintln!("+-{}-+\n| {} |\n+-{}-+", border, title, border);
        }
    }

    fn paint(&self, icon: &str, msg: &str, color: &str, is_error: bool, is_dim: bool) {
        if self.silent && !is_error {
            return;
        }
        let line = if self.supports_color() {
            let ic = match color {
                "31" => icon.red().bold().to_string(),
                "32" => icon.green().bold().to_string(),
                "33" => icon.yellow().bold().to_string(),
                "34" => icon.blue().bold().to_string(),
                _ => icon.bold().to_string(),
            };
            if is_dim {
                format!("{} {}", ic.dimmed(), msg.dimmed())
            } else {
                format!("{} {}", ic, msg.normal())
            }
        } else {
            format!("{} {}", icon, msg)
        };
        eprintln!("{}", line);
    }

    fn supports_color(&self) -> bool {
        std::env::var("NO_COLOR").is_err() && self.colors
    }

    pub fn info(&self, msg: &str) {
        if self.verbose {
            self.paint("[i]", msg, "34", false, false);
        }
    }
    pub fn verbose(&self, msg: &str) {
        if self.verbose {
            self.paint("[v]", msg, "2", false, true);
        }
    }
    pub fn very_verbose(&self, msg: &str) {
        if self.very_verbose {
            self.paint("[vv]", msg, "2", false, true);
        }
    }
    pub fn debug(&self, msg: &str) {
        if self.debug {
            self.paint("[dbg]", msg, "2", false, true);
        }
    }
    pub fn success(&self, msg: &str) {
        if !self.silent {
            self.paint("[+]", msg, "32", false, false);
        }
    }
    pub fn warn(&self, msg: &str) {
        if !self.silent {
            self.paint("[!]", msg, "33", true, false);
        }
    }
    pub fn error(&self, msg: &str) {
        self.paint("[x]", msg, "31", true, false);
    }
}
