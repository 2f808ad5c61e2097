//! Error types for the Forward3D task graph
//!
//! This module defines the error types used throughout the crate,
//! including graph construction, GPU resource allocation, and batch submission.

use std::fmt;

/// Result type for Forward3D operations
pub type Result<T> = std::result::Result<T, Error>;

/// Forward3D errors
#[derive(Debug, Clone)]
pub enum Error {
    /// Backend-specific error (GPU device, batch submission, etc.)
    BackendError(String),

    /// Out of GPU memory
    OutOfMemory,

    /// Invalid resource (texture, framebuffer, program, pipeline, etc.)
    InvalidResource(String),

    /// Task graph misconfiguration (dangling varying, type mismatch, unknown name)
    ///
    /// Always raised while the graph is being built, never while a frame runs.
    Configuration(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::BackendError(msg) => write!(f, "Backend error: {}", msg),
            Error::OutOfMemory => write!(f, "Out of GPU memory"),
            Error::InvalidResource(msg) => write!(f, "Invalid resource: {}", msg),
            Error::Configuration(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// Returns true for errors raised while building a task graph
    pub fn is_configuration(&self) -> bool {
        matches!(self, Error::Configuration(_))
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
