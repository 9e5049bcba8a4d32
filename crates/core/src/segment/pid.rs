use super::SegmentGenerator;
use crate::constants::PHONE_NUMBER;
use crate::context::{GenerationContext, SegmentKind};
use crate::model::{CodedValue, Person, PATIENT_ID_ENCODERS};
use crate::time::{hl7_date, random_birth_date};
use crate::GenerationResult;
use hl7::Segment;

/// Patient identification.
///
/// Identifiers come from the first `num_patient_ids` encoders, in declared order. Address
/// country and type are always written; the rest of the address only when requested.
pub struct PidGenerator;

impl SegmentGenerator for PidGenerator {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Pid
    }

    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        pid: &mut Segment,
    ) -> GenerationResult<()> {
        let requirements = ctx.requirements();
        pid.set_field(1, "1")?;

        for (repetition, encoder) in PATIENT_ID_ENCODERS
            .iter()
            .take(requirements.num_patient_ids())
            .enumerate()
        {
            encoder.generate_and_encode(ctx.rng(), &mut pid.composite(3, repetition)?)?;
        }

        let patient = Person {
            name_type_code: Some("D".to_owned()), // customary name
            ..Person::named("SMITH", "JOHN", "J")
        };
        patient.to_xpn(&mut pid.composite(5, 0)?)?;

        if let Some(birth_date) = random_birth_date(ctx.rng()) {
            pid.set_field(7, hl7_date(birth_date))?;
        }
        CodedValue::identifier("M").to_cwe(&mut pid.composite(8, 0)?)?;

        if requirements.include_alias() {
            let alias = Person {
                family_name: patient.family_name.clone(),
                given_name: patient.given_name.clone(),
                ..Person::default()
            };
            alias.to_xpn(&mut pid.composite(9, 0)?)?;
        }
        CodedValue::identifier("WHITE").to_cwe(&mut pid.composite(10, 0)?)?;

        {
            let mut address = pid.composite(11, 0)?;
            if requirements.include_address() {
                address.component(1)?.set(1, "123 STREET")?;
                address.set(3, "CITY CITY")?;
                address.set(4, "MO")?;
                address.set(5, "61111")?;
                CodedValue::identifier("COUNTY").to_cwe(&mut address.component(9)?)?;
            }
            address.set(6, "USA")?;
            address.set(7, "L")?;
        }

        if !requirements.extended_pid() {
            return Ok(());
        }

        pid.set_field(12, "COUNTY")?;
        for (repetition, equipment) in ["H", "M"].into_iter().enumerate() {
            let mut phone = pid.composite(13, repetition)?;
            phone.set(1, PHONE_NUMBER)?;
            phone.set(2, "P")?;
            phone.set(3, equipment)?;
        }
        CodedValue::identifier("S").to_cwe(&mut pid.composite(16, 0)?)?;
        pid.set_field(19, "111-11-1111")?;
        CodedValue::identifier("CAU").to_cwe(&mut pid.composite(22, 0)?)?;
        Ok(())
    }
}
