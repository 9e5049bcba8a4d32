use super::SegmentGenerator;
use crate::context::{GenerationContext, SegmentKind};
use crate::model::Person;
use crate::GenerationResult;
use hl7::Segment;

/// Which part of the report an observation line belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObservationKind {
    /// General descriptive text (`GDT`), sub-id 1.
    General,
    /// Impression (`IMP`), sub-id 2.
    Impression,
}

impl ObservationKind {
    pub fn observation_id(&self) -> &'static str {
        match self {
            ObservationKind::General => "GDT",
            ObservationKind::Impression => "IMP",
        }
    }

    pub fn sub_id(&self) -> &'static str {
        match self {
            ObservationKind::General => "1",
            ObservationKind::Impression => "2",
        }
    }
}

/// One report line as an observation result, signed by the performing technician.
pub struct ObxGenerator<'p> {
    kind: ObservationKind,
    content: String,
    set_id: usize,
    technician: &'p Person,
}

impl<'p> ObxGenerator<'p> {
    /// `index` is the line's position in the report; the set id is `index + 2`.
    pub fn new(
        kind: ObservationKind,
        content: impl Into<String>,
        index: usize,
        technician: &'p Person,
    ) -> Self {
        Self {
            kind,
            content: content.into(),
            set_id: index + 2,
            technician,
        }
    }
}

impl SegmentGenerator for ObxGenerator<'_> {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Obx
    }

    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        obx: &mut Segment,
    ) -> GenerationResult<()> {
        obx.set_field(1, self.set_id.to_string())?;
        obx.set_field(2, "ST")?;
        obx.set_at(3, 0, 1, 2, self.kind.observation_id())?;
        obx.set_field(4, self.kind.sub_id())?;
        obx.set_field(5, self.content.as_str())?;
        obx.set_field(11, ctx.requirements().order_status())?;
        self.technician.to_xcn(&mut obx.composite(16, 0)?)?;
        Ok(())
    }
}
