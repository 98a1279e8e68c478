/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Narrow interfaces over the external binaries the pipeline shells out to.
//!
//! Each tool is modeled as path(s) in, text or pass/fail out, so the parsing
//! stages stay testable without the Android SDK on PATH. The real wrappers
//! spawn the binary with a hard time budget and a killed child on expiry.

use crate::{error::ExtractError, ui::Ui};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::time::Duration;
use tempfile::NamedTempFile;

/// Hard ceiling on any single external tool invocation.
pub const TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Dumps a package's declared manifest attributes as text lines.
pub trait BadgingSource {
    fn dump_badging(&self, apk: &Path) -> Result<Vec<String>, ExtractError>;
}

/// Checks that the package container is correctly aligned.
pub trait AlignmentChecker {
    fn check(&self, apk: &Path) -> Result<(), ExtractError>;
}

/// Checks that the package signature verifies.
pub trait SignatureChecker {
    fn check(&self, apk: &Path) -> Result<(), ExtractError>;
}

/// Converts a raw signature block into concatenated PEM certificate text.
pub trait PemConverter {
    fn convert(&self, block: &Path, pem_out: &Path) -> Result<(), ExtractError>;
}

/// The full set of external collaborators, located up front so a missing
/// binary fails the run before any parsing starts.
pub struct Toolchain {
    pub badging: Box<dyn BadgingSource>,
    pub alignment: Box<dyn AlignmentChecker>,
    pub signature: Box<dyn SignatureChecker>,
    pub pem: Box<dyn PemConverter>,
}

impl Toolchain {
    pub fn locate(ui: &Ui) -> Result<Self, ExtractError> {
        Ok(Self {
            badging: Box::new(Aapt::locate(ui)?),
            alignment: Box::new(Zipalign::locate(ui)?),
            signature: Box::new(Jarsigner::locate(ui)?),
            pem: Box::new(OpensslPkcs7::locate(ui)?),
        })
    }
}

fn locate_exe(name: &str, hint: &str) -> Result<PathBuf, ExtractError> {
    which::which(name).map_err(|_| {
        ExtractError::Prerequisite(format!(
            "Couldn't find the {} binary on the system's PATH. {}",
            name, hint
        ))
    })
}

/// Extension trait to add `wait_timeout` to `Child`.
trait ChildExt {
    fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>>;
}

impl ChildExt for Child {
    fn wait_timeout(&mut self, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
        let start = std::time::Instant::now();
        let poll_interval = Duration::from_millis(50);

        loop {
            match self.try_wait()? {
                Some(status) => return Ok(Some(status)),
                None => {
                    if start.elapsed() >= timeout {
                        return Ok(None);
                    }
                    std::thread::sleep(poll_interval);
                }
            }
        }
    }
}

/// Run a tool to completion within `timeout`, collecting stdout and stderr
/// merged into one capture file (no pipe to fill up, so a chatty tool cannot
/// deadlock against the poll loop).
fn run_tool_with_timeout(
    mut command: Command,
    tool: &str,
    timeout: Duration,
) -> Result<(ExitStatus, String), ExtractError> {
    let capture = NamedTempFile::new()?;
    let stdout = capture.reopen()?;
    let stderr = stdout.try_clone()?;
    command
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr));

    let mut child = command
        .spawn()
        .map_err(|e| ExtractError::ToolOutput(format!("failed to run {}: {}", tool, e)))?;

    let status = match child.wait_timeout(timeout)? {
        Some(status) => status,
        None => {
            let _ = child.kill();
            let _ = child.wait(); // reap
            return Err(ExtractError::ToolTimeout(format!(
                "{} did not finish within {}s",
                tool,
                timeout.as_secs()
            )));
        }
    };

    let mut output = String::from_utf8_lossy(&fs::read(capture.path())?).into_owned();
    // Cap captured output so a runaway tool cannot blow up error messages.
    output.truncate(4096);
    Ok((status, output))
}

fn run_tool(command: Command, tool: &str) -> Result<(ExitStatus, String), ExtractError> {
    run_tool_with_timeout(command, tool, TOOL_TIMEOUT)
}

/// `aapt dump --values badging` wrapper.
pub struct Aapt {
    exe: PathBuf,
}

impl Aapt {
    pub fn locate(ui: &Ui) -> Result<Self, ExtractError> {
        let exe = locate_exe(
            "aapt",
            "This binary is part of the Android developer's SDK. \
             Please ensure it is available on the PATH.",
        )?;
        ui.debug(&format!("Using aapt at {}", exe.display()));
        Ok(Self { exe })
    }
}

impl BadgingSource for Aapt {
    fn dump_badging(&self, apk: &Path) -> Result<Vec<String>, ExtractError> {
        let mut command = Command::new(&self.exe);
        command.args(["dump", "--values", "badging"]).arg(apk);
        let (status, output) = run_tool(command, "aapt")?;
        if !status.success() {
            return Err(ExtractError::ToolOutput(format!(
                "aapt exited with {}: {}",
                status,
                output.trim_end()
            )));
        }
        Ok(output.lines().map(str::to_string).collect())
    }
}

/// `zipalign -c 4` wrapper.
pub struct Zipalign {
    exe: PathBuf,
}

impl Zipalign {
    pub fn locate(ui: &Ui) -> Result<Self, ExtractError> {
        let exe = locate_exe("zipalign", "This binary is needed to validate the APK.")?;
        ui.debug(&format!("Using zipalign at {}", exe.display()));
        Ok(Self { exe })
    }
}

impl AlignmentChecker for Zipalign {
    fn check(&self, apk: &Path) -> Result<(), ExtractError> {
        let mut command = Command::new(&self.exe);
        command.args(["-c", "4"]).arg(apk);
        let (status, _) = run_tool(command, "zipalign")?;
        if !status.success() {
            return Err(ExtractError::Validation(format!(
                "Zip alignment is incorrect ({})",
                status
            )));
        }
        Ok(())
    }
}

/// `jarsigner -verify` wrapper.
pub struct Jarsigner {
    exe: PathBuf,
}

impl Jarsigner {
    pub fn locate(ui: &Ui) -> Result<Self, ExtractError> {
        let exe = locate_exe("jarsigner", "This binary is needed to validate the APK.")?;
        ui.debug(&format!("Using jarsigner at {}", exe.display()));
        Ok(Self { exe })
    }
}

impl SignatureChecker for Jarsigner {
    fn check(&self, apk: &Path) -> Result<(), ExtractError> {
        let mut command = Command::new(&self.exe);
        command.arg("-verify").arg(apk);
        let (status, _) = run_tool(command, "jarsigner")?;
        if !status.success() {
            return Err(ExtractError::Validation(format!(
                "JAR signature doesn't validate correctly ({})",
                status
            )));
        }
        Ok(())
    }
}

/// `openssl pkcs7 -print_certs` wrapper. A command line tool rather than a
/// crypto library keeps the certificate material uninterpreted on our side.
pub struct OpensslPkcs7 {
    exe: PathBuf,
}

impl OpensslPkcs7 {
    pub fn locate(ui: &Ui) -> Result<Self, ExtractError> {
        let exe = locate_exe(
            "openssl",
            "This tool is used to extract certificates from the signature block.",
        )?;
        ui.debug(&format!("Using openssl at {}", exe.display()));
        Ok(Self { exe })
    }
}

impl PemConverter for OpensslPkcs7 {
    fn convert(&self, block: &Path, pem_out: &Path) -> Result<(), ExtractError> {
        let mut command = Command::new(&self.exe);
        command
            .arg("pkcs7")
            .arg("-in")
            .arg(block)
            .arg("-print_certs")
            .args(["-inform", "DER"])
            .arg("-out")
            .arg(pem_out);
        let (status, output) = run_tool(command, "openssl")?;
        if !status.success() {
            return Err(ExtractError::ToolOutput(format!(
                "openssl failed to convert the signature block ({}): {}",
                status,
                output.trim_end()
            )));
        }
        Ok(())
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn run_tool_merges_stdout_and_stderr() {
        let mut command = Command::new("sh");
        command.args(["-c", "echo out; echo err >&2"]);
        let (status, output) = run_tool(command, "sh").unwrap();
        assert!(status.success());
        assert!(output.contains("out"));
        assert!(output.contains("err"));
    }

    #[test]
    fn run_tool_reports_nonzero_exit_status() {
        let mut command = Command::new("sh");
        command.args(["-c", "exit 3"]);
        let (status, _) = run_tool(command, "sh").unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn run_tool_kills_children_past_the_deadline() {
        let mut command = Command::new("sh");
        command.args(["-c", "sleep 5"]);
        let err =
            run_tool_with_timeout(command, "sh", Duration::from_millis(100)).unwrap_err();
        assert!(matches!(err, ExtractError::ToolTimeout(_)));
    }

    #[test]
    fn missing_binary_is_a_tool_output_error() {
        let command = Command::new("/nonexistent/tool/binary");
        let err = run_tool(command, "tool").unwrap_err();
        assert!(matches!(err, ExtractError::ToolOutput(_)));
    }
}
