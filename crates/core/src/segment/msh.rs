use super::SegmentGenerator;
use crate::context::{GenerationContext, SegmentKind};
use crate::time::hl7_datetime_now;
use crate::GenerationResult;
use fixture_uid::MessageControlId;
use hl7::{Delimiters, Segment};

/// Message header: delimiters, fixed sending/receiving endpoints, timestamp and control id.
///
/// Message type, processing id and version are left to the orchestrator.
pub struct MshGenerator;

impl SegmentGenerator for MshGenerator {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Msh
    }

    fn generate_segment(
        &self,
        _ctx: &mut GenerationContext<'_>,
        msh: &mut Segment,
    ) -> GenerationResult<()> {
        let delimiters = Delimiters::default();
        msh.set_field(1, delimiters.field.to_string())?;
        msh.set_field(2, delimiters.encoding_characters())?;
        msh.set_field(3, "SOMERIS")?;
        msh.set_field(4, "ABCHOSP")?;
        msh.set_field(5, "SOMEAPP")?;
        msh.set_field(6, "ABC_HOSP_DEPT_X")?;
        msh.set_field(7, hl7_datetime_now())?;
        msh.set_field(8, "TBD")?;
        msh.set_field(10, MessageControlId::new().to_string())?;
        Ok(())
    }
}
