//! Error types for STL-to-3MF conversion
//!
//! This module provides error handling for the conversion pipeline. All
//! errors include error codes for categorization and enough context to point
//! at the offending source or destination file.
//!
//! # Error Codes
//!
//! Error codes follow the pattern: `E<category><number>`
//!
//! Categories:
//! - **E1xxx**: I/O and archive errors
//! - **E2xxx**: decoding and serialization errors
//! - **E3xxx**: scene assembly errors
//!
//! ## Common Error Codes
//!
//! - `E1001`: I/O error
//! - `E1002`: ZIP archive error
//! - `E1003`: part source file not found
//! - `E1004`: failed to write the output package
//! - `E2101`: STL decode error
//! - `E2005`: XML writing error
//! - `E3001`: no parts produced any geometry

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for conversion operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while converting STL parts into a 3MF package
#[derive(Error, Debug)]
pub enum Error {
    /// IO error occurred while reading or writing a file
    ///
    /// **Error Code**: E1001
    #[error("[E1001] I/O error: {0}")]
    Io(#[from] io::Error),

    /// ZIP archive error
    ///
    /// **Error Code**: E1002
    ///
    /// **Common Causes**:
    /// - Output stream rejected a write mid-archive
    /// - Archive finalization failed
    #[error("[E1002] ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// A part's mesh source file does not exist
    ///
    /// **Error Code**: E1003
    ///
    /// This is a soft error during scene assembly: the part is skipped with
    /// a warning and the run continues. It is only fatal when every part is
    /// affected (see [`Error::EmptyInput`]).
    #[error("[E1003] Mesh source not found: {}", .0.display())]
    MissingSource(PathBuf),

    /// Failed to create or write the output package file
    ///
    /// **Error Code**: E1004
    #[error("[E1004] Failed to write package '{}': {source}", .path.display())]
    Write {
        /// Destination path of the package
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },

    /// A mesh source exists but is not a recognizable STL encoding
    ///
    /// **Error Code**: E2101
    ///
    /// **Common Causes**:
    /// - Truncated binary payload (fewer records than the declared count)
    /// - File too small to carry an STL header
    /// - Malformed coordinate fields in an ASCII solid
    #[error("[E2101] Failed to decode '{}': {reason}", .path.display())]
    Decode {
        /// Path of the mesh source
        path: PathBuf,
        /// What was malformed
        reason: String,
    },

    /// XML writing error
    ///
    /// **Error Code**: E2005
    ///
    /// **Common Causes**:
    /// - Failed to serialize the model document
    /// - I/O error during writing
    #[error("[E2005] XML writing error: {0}")]
    XmlWrite(String),

    /// No part contributed any geometry
    ///
    /// **Error Code**: E3001
    ///
    /// Raised when the part list is empty, or when every part was skipped
    /// because its source was missing or undecodable. No package is written.
    #[error(
        "[E3001] No mesh sources found. Export each part as STL first, \
         then run the conversion again."
    )]
    EmptyInput,
}

impl Error {
    /// Create a Decode error for a mesh source
    ///
    /// # Arguments
    /// * `path` - Path of the mesh source being decoded
    /// * `reason` - What was malformed
    pub fn decode(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Error::Decode {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an XmlWrite error
    ///
    /// # Arguments
    /// * `message` - Description of the writing error
    pub fn xml_write(message: String) -> Self {
        Error::XmlWrite(message)
    }

    /// True for the soft per-part errors that scene assembly recovers from
    /// by skipping the part instead of aborting the run.
    pub fn is_part_local(&self) -> bool {
        matches!(self, Error::MissingSource(_) | Error::Decode { .. })
    }
}
