/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

use apkhosted::cli;
use apkhosted::ui::Ui;

fn main() {
    if let Err(e) = cli::run() {
        let mut ui = Ui::default();
        ui.enable_colors_if_supported();
        ui.error(&format!("{}", e));
        std::process::exit(1);
    }
}
