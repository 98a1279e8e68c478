/*
 * ApkHosted Rust v1.0.0
 * Copyright (c) 2026 Tiash H Kabir / @MrCarb0n.
 * Licensed under the MIT License.
 */

//! Error types and handling for the ApkHosted library.
//! Defines all possible errors that can occur while extracting metadata.

use std::{fmt, io};

/// Comprehensive error type for the extraction pipeline.
#[derive(Debug)]
pub enum ExtractError {
    /// I/O errors during file operations
    Io(io::Error),
    /// ZIP format errors while reading the package
    Zip(zip::result::ZipError),
    /// JSON serialization errors for the final record
    Json(serde_json::Error),
    /// A required input file or external tool is missing
    Prerequisite(String),
    /// An external tool ran but exited abnormally or produced unusable output
    ToolOutput(String),
    /// An external tool exceeded its time budget
    ToolTimeout(String),
    /// More than one signature block was found in the package
    MultipleSigners(String),
    /// Alignment or signature validation failed
    Validation(String),
    /// An expected archive entry is absent
    NotFound(String),
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::Io(e) => write!(f, "I/O Error: {}", e),
            ExtractError::Zip(e) => write!(f, "ZIP Error: {}", e),
            ExtractError::Json(e) => write!(f, "JSON Error: {}", e),
            ExtractError::Prerequisite(s) => write!(f, "Prerequisite Error: {}", s),
            ExtractError::ToolOutput(s) => write!(f, "Tool Output Error: {}", s),
            ExtractError::ToolTimeout(s) => write!(f, "Tool Timeout: {}", s),
            ExtractError::MultipleSigners(s) => write!(f, "Multiple Signers: {}", s),
            ExtractError::Validation(s) => write!(f, "Validation Error: {}", s),
            ExtractError::NotFound(s) => write!(f, "Not Found: {}", s),
        }
    }
}

impl std::error::Error for ExtractError {}

impl From<io::Error> for ExtractError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<zip::result::ZipError> for ExtractError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Zip(e)
    }
}

impl From<serde_json::Error> for ExtractError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
