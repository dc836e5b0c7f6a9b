/*!
 * Error types for the cinefluent pipeline.
 *
 * This module contains custom error types for the different boundaries of the
 * application, using the thiserror crate for ergonomic error definitions.
 * Degenerate inputs (no pairs, no segments, no items) are not errors.
 */

use thiserror::Error;

/// Errors raised while reading subtitle content
#[derive(Error, Debug)]
pub enum SubtitleError {
    /// No well-formed `index / timecode / text` block was found
    #[error("No valid subtitle blocks found in content")]
    NoBlocks,

    /// A timestamp did not follow the `HH:MM:SS,mmm` layout
    #[error("Invalid timestamp format: {0}")]
    InvalidTimestamp(String),
}

/// Errors for rejected input at the load or configuration boundary
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The file extension is not a supported subtitle format
    #[error("Unsupported subtitle format: {extension}")]
    UnsupportedFormat {
        /// Extension as found on the path (may be empty)
        extension: String,
    },

    /// A configuration value is out of range or inconsistent
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Errors reported by injected search/analysis collaborators
#[derive(Error, Debug)]
pub enum CollaboratorError {
    /// The collaborator could not be reached
    #[error("Collaborator unavailable: {0}")]
    Unavailable(String),

    /// The collaborator answered with something we could not use
    #[error("Invalid collaborator response: {0}")]
    InvalidResponse(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from input validation
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Error from a collaborator
    #[error("Collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

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
