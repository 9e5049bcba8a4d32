//! # Fixture Core
//!
//! Generates synthetic HL7 v2 `ORU^R01` radiology report messages for interface testing.
//!
//! This crate contains the generation logic:
//! - Requirements selecting which optional content a message carries
//! - Segment generators sharing one message-scoped [`GenerationContext`]
//! - The message orchestrator and the report narrative
//! - Transcript logging of generated batches
//!
//! **No wire concerns**: delimiters, addressing and encoding belong in `hl7`; identifier
//! formats belong in `fixture-uid`.
//!
//! ```no_run
//! use fixture_core::{MessageGenerator, Requirements, UnsolicitedObservationGenerator};
//!
//! let requirements = Requirements::builder().num_patient_ids(2).build()?;
//! let message = UnsolicitedObservationGenerator::default().generate(&requirements)?;
//! print!("{}", message.encode()?);
//! # Ok::<(), fixture_core::GenerationError>(())
//! ```

pub mod config;
pub mod constants;
pub mod context;
mod error;
pub mod fixtures;
pub mod logger;
pub mod model;
pub mod narrative;
pub mod random;
pub mod requirements;
pub mod segment;
pub mod time;
pub mod trigger_events;

pub use config::GeneratorConfig;
pub use context::{GenerationContext, SegmentKind};
pub use error::{GenerationError, GenerationResult};
pub use logger::{MessageLogger, TranscriptLogger};
pub use narrative::NarrativeTemplate;
pub use requirements::{Requirements, RequirementsBuilder};
pub use trigger_events::{MessageGenerator, UnsolicitedObservationGenerator};
