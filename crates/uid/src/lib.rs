//! Identifier generation for generated messages.
//!
//! Two kinds of identifier appear in every message:
//! - a **message control id** (MSH-10), a hyphenated UUID v4 unique per message;
//! - a **DICOM UID** for the image reference segment, in the UUID-derived form
//!   `2.25.<uuid as an unsigned decimal integer>`.
//!
//! Both wrappers guarantee their textual form once constructed. Externally supplied values
//! are accepted only through `parse`, which rejects anything not already well-formed.

mod service;

pub use service::{DicomUid, MessageControlId, Uuid};

/// Error type for identifier operations.
#[derive(Debug, thiserror::Error)]
pub enum UidError {
    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type for identifier operations.
pub type UidResult<T> = Result<T, UidError>;
