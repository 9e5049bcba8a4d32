//! Message-scoped generation state.
//!
//! One [`GenerationContext`] exists per message being generated. It owns:
//! - the message tree under construction (custom segments attach to it directly),
//! - the registry of completed segments, in generation order,
//! - the random source for every random choice in the message.
//!
//! Registered segments are snapshots taken when their generator completed. Edits made to a
//! segment after registration (the orchestrator stamping MSH-9, for instance) are not
//! reflected in the registry.

use crate::requirements::Requirements;
use crate::{GenerationError, GenerationResult};
use hl7::{Hl7Result, Message, Segment, SegmentName};
use rand::rngs::StdRng;
use std::fmt;

/// Registry key for generated segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SegmentKind {
    Msh,
    Pid,
    Pv1,
    Orc,
    Obr,
    Obx,
    Custom(SegmentName),
}

impl SegmentKind {
    pub fn name(&self) -> &str {
        match self {
            SegmentKind::Msh => "MSH",
            SegmentKind::Pid => "PID",
            SegmentKind::Pv1 => "PV1",
            SegmentKind::Orc => "ORC",
            SegmentKind::Obr => "OBR",
            SegmentKind::Obx => "OBX",
            SegmentKind::Custom(name) => name.as_str(),
        }
    }

    pub fn segment_name(&self) -> Hl7Result<SegmentName> {
        SegmentName::parse(self.name())
    }
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shared state threaded through every generator of one message.
#[derive(Debug)]
pub struct GenerationContext<'r> {
    requirements: &'r Requirements,
    message: Message,
    segments: Vec<(SegmentKind, Segment)>,
    rng: StdRng,
}

impl<'r> GenerationContext<'r> {
    pub fn new(requirements: &'r Requirements, message: Message, rng: StdRng) -> Self {
        Self {
            requirements,
            message,
            segments: Vec::new(),
            rng,
        }
    }

    pub fn requirements(&self) -> &'r Requirements {
        self.requirements
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn message_mut(&mut self) -> &mut Message {
        &mut self.message
    }

    pub fn into_message(self) -> Message {
        self.message
    }

    pub fn rng(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Appends a completed segment to the registry.
    pub fn register(&mut self, kind: SegmentKind, segment: Segment) {
        self.segments.push((kind, segment));
    }

    /// First registered segment of `kind`, if its generator has run.
    pub fn lookup(&self, kind: &SegmentKind) -> Option<&Segment> {
        self.segments
            .iter()
            .find(|(registered, _)| registered == kind)
            .map(|(_, segment)| segment)
    }

    /// Like [`lookup`](Self::lookup), but a missing segment is an error.
    pub fn require(&self, kind: SegmentKind) -> GenerationResult<&Segment> {
        match self.lookup(&kind) {
            Some(segment) => Ok(segment),
            None => Err(GenerationError::MissingSegment(kind)),
        }
    }

    /// Registered segment kinds, in generation order.
    pub fn generated(&self) -> impl Iterator<Item = &SegmentKind> {
        self.segments.iter().map(|(kind, _)| kind)
    }
}
