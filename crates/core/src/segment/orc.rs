use super::SegmentGenerator;
use crate::constants::{DEFAULT_ID_DIGITS, MAIN_HOSPITAL, PHONE_NUMBER};
use crate::context::{GenerationContext, SegmentKind};
use crate::fixtures::{ENTERED_BY, ORDERING_PROVIDER};
use crate::model::{CodedValue, Person};
use crate::random::random_id;
use crate::time::{hl7_datetime, now};
use crate::GenerationResult;
use chrono::Duration;
use hl7::Segment;

/// Common order.
///
/// The order enterer in ORC-10 is also the technologist who performed the study; the
/// observation request and every observation result are built from [`technician`](Self::technician).
#[derive(Clone, Debug)]
pub struct OrcGenerator {
    entered_by: Person,
}

impl OrcGenerator {
    pub fn new(entered_by: Person) -> Self {
        Self { entered_by }
    }

    pub fn technician(&self) -> &Person {
        &self.entered_by
    }
}

impl Default for OrcGenerator {
    fn default() -> Self {
        Self::new(ENTERED_BY.clone())
    }
}

impl SegmentGenerator for OrcGenerator {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Orc
    }

    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        orc: &mut Segment,
    ) -> GenerationResult<()> {
        orc.set_field(1, "RE")?; // observations to follow

        let placer = random_id(ctx.rng(), DEFAULT_ID_DIGITS);
        let filler = random_id(ctx.rng(), DEFAULT_ID_DIGITS);
        {
            let mut placer_order = orc.composite(2, 0)?;
            placer_order.set(1, placer.to_string())?;
            placer_order.set(2, "SYS")?;
        }
        orc.composite(3, 0)?.set(1, filler.to_string())?;

        orc.set_field(5, ctx.requirements().order_status())?;

        let transaction_time = now();
        orc.set_path("ORC-7-4", hl7_datetime(transaction_time - Duration::seconds(1)))?;
        orc.set_path("ORC-7-5", hl7_datetime(transaction_time))?;
        orc.set_path("ORC-7-6", "O")?;
        orc.set_field(9, hl7_datetime(transaction_time))?;

        self.entered_by.to_xcn(&mut orc.composite(10, 0)?)?;
        ORDERING_PROVIDER.to_xcn(&mut orc.composite(12, 0)?)?;

        {
            let mut enterer_location = orc.composite(13, 0)?;
            enterer_location
                .component(1)?
                .set(1, format!("{MAIN_HOSPITAL}_R"))?;
            enterer_location.component(4)?.set(1, "RS50")?;
            enterer_location.set(9, "RAD5")?;
        }

        orc.composite(14, 0)?.set(1, PHONE_NUMBER)?;
        CodedValue::identifier("O").to_cwe(&mut orc.composite(29, 0)?)?;
        orc.composite(30, 0)?.set(1, "Electr")?;
        Ok(())
    }
}
