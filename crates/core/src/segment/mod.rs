//! Segment generators.
//!
//! Every standard segment has a [`SegmentGenerator`] that fills a fresh segment and registers
//! it in the [`GenerationContext`]. Site-defined `Z` segments use
//! [`NonstandardSegmentGenerator`], which also decides where in the message tree the segment
//! goes.
//!
//! Generators are unit structs or carry per-instance values, like the technician an
//! [`OrcGenerator`] hands to [`ObrGenerator`] and [`ObxGenerator`]; all other message-scoped
//! state lives in the context.

mod msh;
mod obr;
mod obx;
mod orc;
mod pid;
mod pv1;
mod zds;
mod zpf;

pub use msh::MshGenerator;
pub use obr::ObrGenerator;
pub use obx::{ObservationKind, ObxGenerator};
pub use orc::OrcGenerator;
pub use pid::PidGenerator;
pub use pv1::Pv1Generator;
pub use zds::ZdsGenerator;
pub use zpf::ZpfGenerator;

use crate::context::{GenerationContext, SegmentKind};
use crate::GenerationResult;
use hl7::{Group, Message, Segment, SegmentName};

/// Fills one standard segment type.
pub trait SegmentGenerator {
    fn kind(&self) -> SegmentKind;

    /// Populates `segment` in place. May read earlier segments from `ctx`.
    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        segment: &mut Segment,
    ) -> GenerationResult<()>;

    /// Builds, populates and registers a new segment.
    ///
    /// The segment is registered only once fully populated; a failure leaves nothing behind.
    fn generate(&self, ctx: &mut GenerationContext<'_>) -> GenerationResult<Segment> {
        let kind = self.kind();
        let mut segment = Segment::from_name(kind.segment_name()?);
        self.generate_segment(ctx, &mut segment)?;
        tracing::debug!("generated {kind} segment");
        ctx.register(kind, segment.clone());
        Ok(segment)
    }
}

/// Fills a site-defined segment and inserts it into the message under construction.
pub trait NonstandardSegmentGenerator {
    /// The segment tag, e.g. `ZPF`.
    fn segment_name(&self) -> &'static str;

    /// The group the segment is inserted into.
    fn attachment_point<'m>(&self, message: &'m mut Message) -> GenerationResult<&'m mut Group>;

    /// Child index to insert at. Appends after all existing children unless overridden.
    fn insertion_index(&self, group: &Group) -> usize {
        group.len()
    }

    /// Populates the segment using explicit positional addressing.
    fn populate(&self, ctx: &mut GenerationContext<'_>, segment: &mut Segment)
        -> GenerationResult<()>;

    fn generate(&self, ctx: &mut GenerationContext<'_>) -> GenerationResult<()> {
        let name = SegmentName::parse(self.segment_name())?;
        let mut segment = Segment::from_name(name.clone());
        self.populate(ctx, &mut segment)?;

        let group = self.attachment_point(ctx.message_mut())?;
        let index = self.insertion_index(group);
        group.insert(index, segment.clone())?;
        tracing::debug!("inserted {name} at index {index} of {}", group.name());

        ctx.register(SegmentKind::Custom(name), segment);
        Ok(())
    }
}
