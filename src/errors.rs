/*!
 * Error types for the jimakudeck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when loading subtitle files
#[derive(Error, Debug)]
pub enum LoaderError {
    /// Error reading the file from disk
    #[error("Failed to read subtitle file {path}: {source}")]
    Io {
        /// Path of the file that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The configured encoding hint is not one we can decode
    #[error("Unsupported encoding hint: {0}")]
    UnsupportedEncoding(String),

    /// The file decoded but contained no usable cues
    #[error("No valid subtitle cues found in {0}")]
    NoCues(PathBuf),
}

/// Errors that can occur while configuring or running an alignment
#[derive(Error, Debug)]
pub enum AlignError {
    /// A role label that is not part of the recognized set
    #[error("Unrecognized role name: {0}")]
    UnknownRole(String),

    /// The same role assigned to more than one secondary track
    #[error("Role '{0}' is assigned to more than one track")]
    DuplicateRole(String),

    /// Reference index does not point at a configured subtitle file
    #[error("Reference index {index} out of range for {count} subtitle file(s)")]
    ReferenceOutOfRange {
        /// Configured reference index
        index: usize,
        /// Number of configured subtitle files
        count: usize,
    },

    /// Role label count does not cover the secondary tracks
    #[error("Expected {expected} role label(s) for secondary tracks, got {actual}")]
    RoleCountMismatch {
        /// Number of secondary tracks
        expected: usize,
        /// Number of configured labels
        actual: usize,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle loading
    #[error("Loader error: {0}")]
    Loader(#[from] LoaderError),

    /// Error from alignment configuration or processing
    #[error("Alignment error: {0}")]
    Align(#[from] AlignError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
