use super::SegmentGenerator;
use crate::constants::MAIN_HOSPITAL;
use crate::context::{GenerationContext, SegmentKind};
use crate::fixtures::ATTENDING_DOCTORS;
use crate::model::CodedValue;
use crate::random::random_id;
use crate::time::hl7_datetime_now;
use crate::GenerationResult;
use hl7::Segment;

const VISIT_NUMBER_DIGITS: u32 = 8;

/// Patient visit: an outpatient radiology encounter.
pub struct Pv1Generator;

impl SegmentGenerator for Pv1Generator {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Pv1
    }

    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        pv1: &mut Segment,
    ) -> GenerationResult<()> {
        CodedValue::identifier("O").to_cwe(&mut pv1.composite(2, 0)?)?;

        {
            let ward = format!("{MAIN_HOSPITAL} RAD5");
            let room = format!("{ward} R-5005");
            let mut location = pv1.composite(3, 0)?;
            location.component(1)?.set(1, ward)?;
            location.component(2)?.set(1, room.as_str())?;
            location.component(3)?.set(1, room)?;
            location.component(4)?.set(1, MAIN_HOSPITAL)?;
        }

        let count = ctx.requirements().num_attending_doctors();
        for (repetition, doctor) in ATTENDING_DOCTORS.iter().take(count).enumerate() {
            doctor.to_xcn(&mut pv1.composite(7, repetition)?)?;
        }

        CodedValue::identifier("RAD").to_cwe(&mut pv1.composite(10, 0)?)?;
        let visit_number = random_id(ctx.rng(), VISIT_NUMBER_DIGITS);
        pv1.composite(19, 0)?.set(1, format!("V{visit_number}"))?;
        pv1.set_field(44, hl7_datetime_now())?;
        CodedValue::identifier("V").to_cwe(&mut pv1.composite(51, 0)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::requirements::Requirements;
    use hl7::{Delimiters, Message};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(requirements: &Requirements) -> Segment {
        let mut ctx =
            GenerationContext::new(requirements, Message::new("ORU_R01"), StdRng::seed_from_u64(9));
        Pv1Generator.generate(&mut ctx).unwrap()
    }

    #[test]
    fn one_attending_doctor_by_default() {
        let pv1 = generate(&Requirements::default());
        assert_eq!(pv1.repetition_count(7), 1);
        assert_eq!(pv1.get_at(7, 0, 2, 1), Some("CURIE"));
        assert_eq!(pv1.get_at(7, 0, 3, 1), Some("MARIE"));
        assert_eq!(pv1.get_at(7, 0, 4, 1), Some("S"));
        assert_eq!(pv1.get_at(7, 0, 9, 1), Some("ABC"));
        assert_eq!(pv1.get_at(7, 0, 13, 1), Some("HOSP"));
    }

    #[test]
    fn second_doctor_from_pool() {
        let requirements = Requirements::builder().num_attending_doctors(2).build().unwrap();
        let pv1 = generate(&requirements);
        assert_eq!(pv1.repetition_count(7), 2);
        assert_eq!(pv1.get_at(7, 1, 2, 1), Some("ROENTGEN"));
    }

    #[test]
    fn location_and_visit() {
        let pv1 = generate(&Requirements::default());
        assert!(pv1
            .encode(&Delimiters::default())
            .starts_with("PV1||O|ABC RAD5^ABC RAD5 R-5005^ABC RAD5 R-5005^ABC|"));
        assert_eq!(pv1.get_at(10, 0, 1, 1), Some("RAD"));
        assert!(pv1.get_at(19, 0, 1, 1).unwrap().starts_with('V'));
        assert_eq!(pv1.get_at(51, 0, 1, 1), Some("V"));
    }
}
