use super::NonstandardSegmentGenerator;
use crate::constants::ORDER_OBSERVATION_PATH;
use crate::context::GenerationContext;
use crate::GenerationResult;
use fixture_uid::DicomUid;
use hl7::{Group, Message, Segment};

/// Image reference: a study instance UID in the external image archive.
///
/// Appended after every other child of the order group.
pub struct ZdsGenerator;

impl NonstandardSegmentGenerator for ZdsGenerator {
    fn segment_name(&self) -> &'static str {
        "ZDS"
    }

    fn attachment_point<'m>(&self, message: &'m mut Message) -> GenerationResult<&'m mut Group> {
        Ok(message.group_path_mut(&ORDER_OBSERVATION_PATH)?)
    }

    fn populate(
        &self,
        _ctx: &mut GenerationContext<'_>,
        zds: &mut Segment,
    ) -> GenerationResult<()> {
        zds.set_at(1, 0, 1, 1, DicomUid::new().as_str())?;
        zds.set_at(1, 0, 2, 1, "EPIC")?;
        zds.set_at(1, 0, 3, 1, "APPLICATION")?;
        zds.set_at(1, 0, 4, 1, "DICOM")?;
        Ok(())
    }
}
