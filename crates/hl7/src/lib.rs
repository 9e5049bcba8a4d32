//! HL7 v2 wire/boundary support.
//!
//! This crate provides the **wire model** used to assemble pipe-delimited HL7 v2 messages one
//! segment at a time:
//! - delimiters and value escaping
//! - field/repetition/component/subcomponent addressing
//! - composite write slots for projecting structured data types onto a segment
//! - group trees with positional insertion of non-standard (`Z`) segments
//! - encoding into the standard delimited form
//!
//! This crate is write-only. It never parses or validates received messages, and it makes no
//! attempt to model the full message grammar: segments carry whatever fields the caller sets.

pub mod address;
pub mod composite;
pub mod delimiters;
pub mod segment;
pub mod structure;

pub use address::Address;
pub use composite::Composite;
pub use delimiters::Delimiters;
pub use segment::{Repetition, Segment, SegmentName};
pub use structure::{Group, Message, Structure};

/// Character terminating every encoded segment.
pub const SEGMENT_TERMINATOR: char = '\r';

/// Errors returned by the `hl7` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum Hl7Error {
    #[error("invalid segment name: {0}")]
    InvalidSegmentName(String),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid delimiters: {0}")]
    InvalidDelimiters(String),

    #[error("composite at field {field} component {component} cannot nest below subcomponent level")]
    NestingTooDeep { field: usize, component: usize },

    #[error("insertion index {index} out of range for group {group} ({len} children)")]
    InsertionOutOfRange {
        group: String,
        index: usize,
        len: usize,
    },

    #[error("structure not found: {0}")]
    StructureNotFound(String),
}

/// Type alias for Results that can fail with an [`Hl7Error`].
pub type Hl7Result<T> = Result<T, Hl7Error>;
