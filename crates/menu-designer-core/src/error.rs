//! Error types for attaching a menu to its markup.
//!
//! Engine operations never fail: a missing element turns a pass into a no-op.
//! Errors only surface while reading configuration or wiring a menu up.

use thiserror::Error;

use crate::platform::PlatformError;

/// Errors that can occur while building a menu instance.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum MenuError {
    /// The interactivity context on the menu root is not valid JSON.
    #[error("invalid menu context: {0}")]
    InvalidContext(#[from] serde_json::Error),

    /// A required element is missing from the menu markup.
    #[error("missing menu element: {0}")]
    MissingElement(&'static str),

    /// Platform glue failed (listener registration, style injection).
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}
