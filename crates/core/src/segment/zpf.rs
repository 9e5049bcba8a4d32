use super::NonstandardSegmentGenerator;
use crate::constants::ORDER_OBSERVATION_PATH;
use crate::context::GenerationContext;
use crate::GenerationResult;
use hl7::{Group, Message, Segment};

/// Procedure catalog entry, required by the consumer as the third child of the order group.
pub struct ZpfGenerator;

impl NonstandardSegmentGenerator for ZpfGenerator {
    fn segment_name(&self) -> &'static str {
        "ZPF"
    }

    fn attachment_point<'m>(&self, message: &'m mut Message) -> GenerationResult<&'m mut Group> {
        Ok(message.group_path_mut(&ORDER_OBSERVATION_PATH)?)
    }

    fn insertion_index(&self, _group: &Group) -> usize {
        2
    }

    fn populate(
        &self,
        _ctx: &mut GenerationContext<'_>,
        zpf: &mut Segment,
    ) -> GenerationResult<()> {
        zpf.set_at(1, 0, 1, 1, "1")?;
        zpf.set_at(2, 0, 1, 1, "10")?;
        zpf.set_at(2, 0, 2, 1, "IMG XR PROCEDURES")?;
        Ok(())
    }
}
