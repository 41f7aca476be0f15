//! Error types for the Galaxy3D framebuffer registry
//!
//! This module defines the error types used throughout the crate,
//! including device failures, identifier validation and definition loading.

use std::fmt;

/// Result type for Galaxy3D framebuffer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Galaxy3D framebuffer errors
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Backend-specific error (framebuffer construction, driver calls, etc.)
    BackendError(String),

    /// Malformed namespaced identifier
    InvalidResourceName(String),

    /// Framebuffer definition could not be decoded or evaluated
    InvalidDefinition(String),

    /// Surface dimensions are not usable (zero width or height)
    InvalidSize {
        /// Requested width in pixels
        width: u32,
        /// Requested height in pixels
        height: u32,
    },

    /// No live framebuffer is registered under the given name
    FramebufferNotFound(String),

    /// Filesystem error while reading definitions
    Io(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::InvalidResourceName(msg) => write!(f, "Invalid resource name: {}", msg),
            Error::InvalidDefinition(msg) => write!(f, "Invalid framebuffer definition: {}", msg),
            Error::InvalidSize { width, height } => {
                write!(f, "Invalid surface size: {}x{}", width, height)
            }
            Error::FramebufferNotFound(name) => write!(f, "Framebuffer not found: {}", name),
            Error::Io(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
