use super::SegmentGenerator;
use crate::constants::{HOSPITAL_STAFF_TYPE_CODE, MAIN_HOSPITAL, PHONE_NUMBER};
use crate::context::{GenerationContext, SegmentKind};
use crate::fixtures::RADIOLOGIST;
use crate::model::{CodedValue, Person};
use crate::time::hl7_datetime_now;
use crate::GenerationResult;
use hl7::{Address, Hl7Result, Segment};

const INTERPRETER_FIELD: usize = 33;
const TECHNICIAN_FIELD: usize = 34;

/// Observation request.
///
/// Must run after [`OrcGenerator`](super::OrcGenerator): order numbers, ordering provider and
/// the transaction window are copied from the registered ORC. The technician is the order's
/// enterer.
pub struct ObrGenerator<'p> {
    technician: &'p Person,
}

impl<'p> ObrGenerator<'p> {
    pub fn new(technician: &'p Person) -> Self {
        Self { technician }
    }

    /// The radiologist written to OBR-33, who signs the report narrative.
    pub fn interpreter(&self) -> &'static Person {
        &RADIOLOGIST
    }
}

impl SegmentGenerator for ObrGenerator<'_> {
    fn kind(&self) -> SegmentKind {
        SegmentKind::Obr
    }

    fn generate_segment(
        &self,
        ctx: &mut GenerationContext<'_>,
        obr: &mut Segment,
    ) -> GenerationResult<()> {
        let requirements = ctx.requirements();
        let orc = ctx.require(SegmentKind::Orc)?.clone();

        obr.set_field(1, "1")?;
        copy_repetition(&orc, 2, obr, 2)?;
        copy_repetition(&orc, 3, obr, 3)?;

        let universal_service = CodedValue {
            identifier: Some("IMG5595".to_owned()),
            text: Some("XR CHEST 1 VIEW".to_owned()),
            name_of_coding_system: Some("RISPACS".to_owned()),
            alternate_text: Some("XR CHEST 1 VW".to_owned()),
            ..CodedValue::default()
        };
        universal_service.to_cwe(&mut obr.composite(4, 0)?)?;

        obr.set_field(5, "O")?;
        obr.set_field(6, hl7_datetime_now())?;
        obr.set_field(11, "Hosp Perf")?;

        obr.set_path("OBR-15-4", "BODY")?;
        obr.set_path("OBR-15(1)-4", "CHEST")?;

        copy_repetition(&orc, 12, obr, 16)?;
        obr.composite(17, 0)?.set(1, PHONE_NUMBER)?;
        obr.set_field(18, "CHEST")?;

        obr.set_field(19, format!("{MAIN_HOSPITAL} RAD DX"))?;
        obr.set_path("OBR-19-4", MAIN_HOSPITAL)?;

        obr.set_field(20, "GEXR5")?;
        obr.set_field(22, hl7_datetime_now())?;
        obr.set_field(24, "CR")?;
        obr.set_field(25, requirements.order_status())?;

        copy_repetition(&orc, 7, obr, 27)?;
        obr.composite(31, 0)?.set(2, requirements.study_reason())?;

        let identity = IdentityWriter::new(requirements.malformed());
        let radiologist = self.interpreter();
        identity.write(obr, INTERPRETER_FIELD, 1, radiologist.person_identifier())?;
        identity.write(obr, INTERPRETER_FIELD, 2, radiologist.surname())?;
        identity.write(obr, INTERPRETER_FIELD, 3, radiologist.given_name())?;
        identity.write(obr, INTERPRETER_FIELD, 4, radiologist.second_name_etc.as_deref())?;
        identity.write(
            obr,
            INTERPRETER_FIELD,
            9,
            radiologist
                .assigning_authority
                .as_ref()
                .and_then(|authority| authority.namespace_id()),
        )?;
        if requirements.malformed() {
            identity.write(obr, INTERPRETER_FIELD, 13, Some(HOSPITAL_STAFF_TYPE_CODE))?;
        }

        let technician = self.technician;
        identity.write(obr, TECHNICIAN_FIELD, 1, technician.person_identifier())?;
        identity.write(obr, TECHNICIAN_FIELD, 2, technician.surname())?;
        identity.write(obr, TECHNICIAN_FIELD, 3, technician.given_name())?;

        obr.set_field(36, hl7_datetime_now())?;
        copy_repetition(&obr.clone(), 4, obr, 44)?;
        Ok(())
    }
}

fn copy_repetition(source: &Segment, from: usize, target: &mut Segment, to: usize) -> Hl7Result<()> {
    match source.repetition(from, 0) {
        Some(value) => target.set_repetition(to, 0, value.clone()),
        None => Ok(()),
    }
}

/// Writes identity fragments of OBR-33/34 under one of two layouts.
///
/// Well-formed: fragment `n` goes to subcomponent `n` of component 1.
/// Malformed: fragment `n` goes to component `n`, the way a component-level `XCN` would be laid
/// out, which is not what the field's data type allows.
#[derive(Clone, Copy, Debug)]
pub(crate) struct IdentityWriter {
    malformed: bool,
}

impl IdentityWriter {
    pub(crate) fn new(malformed: bool) -> Self {
        Self { malformed }
    }

    /// Where fragment `piece` of `field` lands under this layout.
    pub(crate) fn address(&self, field: usize, piece: usize) -> Hl7Result<Address> {
        if self.malformed {
            Address::new(field, 0, piece, 1)
        } else {
            Address::new(field, 0, 1, piece)
        }
    }

    fn write(
        &self,
        segment: &mut Segment,
        field: usize,
        piece: usize,
        value: Option<&str>,
    ) -> Hl7Result<()> {
        if let Some(value) = value {
            segment.set(self.address(field, piece)?, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ENTERED_BY;
    use crate::requirements::Requirements;
    use crate::segment::OrcGenerator;
    use crate::GenerationError;
    use hl7::{Delimiters, Message};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn generate(requirements: &Requirements) -> (Segment, Segment) {
        let mut ctx =
            GenerationContext::new(requirements, Message::new("ORU_R01"), StdRng::seed_from_u64(4));
        let order = OrcGenerator::default();
        let orc = order.generate(&mut ctx).unwrap();
        let request = ObrGenerator::new(order.technician());
        assert_eq!(request.interpreter(), &*RADIOLOGIST);
        let obr = request.generate(&mut ctx).unwrap();
        (orc, obr)
    }

    #[test]
    fn copies_order_values_verbatim() {
        let (orc, obr) = generate(&Requirements::default());
        assert_eq!(obr.repetition(2, 0), orc.repetition(2, 0));
        assert_eq!(obr.repetition(3, 0), orc.repetition(3, 0));
        assert_eq!(obr.repetition(16, 0), orc.repetition(12, 0));
        assert_eq!(obr.repetition(27, 0), orc.repetition(7, 0));
        assert_eq!(obr.repetition(44, 0), obr.repetition(4, 0));
    }

    #[test]
    fn fixed_and_required_values() {
        let requirements = Requirements::builder()
            .study_reason("Cough")
            .order_status("Final")
            .build()
            .unwrap();
        let (_, obr) = generate(&requirements);
        let encoded = obr.encode(&Delimiters::default());
        assert!(encoded.contains("|IMG5595^XR CHEST 1 VIEW^RISPACS^^XR CHEST 1 VW|O|"));
        assert!(encoded.contains("|^^^BODY~^^^CHEST|"));
        assert!(encoded.contains("|CHEST|ABC RAD DX^^^ABC|GEXR5|"));
        assert_eq!(obr.get_at(25, 0, 1, 1), Some("Final"));
        assert_eq!(obr.get_at(31, 0, 2, 1), Some("Cough"));
    }

    #[test]
    fn malformed_layout_uses_components() {
        let (_, obr) = generate(&Requirements::default());
        assert_eq!(obr.get_at(33, 0, 2, 1), Some("DOC"));
        assert_eq!(obr.get_at(33, 0, 9, 1), Some("ABC"));
        assert_eq!(obr.get_at(33, 0, 13, 1), Some("HOSP"));
        assert_eq!(obr.get_at(34, 0, 2, 1), Some("EXAMPLE"));
    }

    #[test]
    fn well_formed_layout_uses_subcomponents() {
        let requirements = Requirements::builder().malformed(false).build().unwrap();
        let (_, obr) = generate(&requirements);
        assert_eq!(obr.get_at(33, 0, 1, 2), Some("DOC"));
        assert_eq!(obr.get_at(33, 0, 1, 9), Some("ABC"));
        assert!(obr.get_at(33, 0, 1, 13).is_none());
        assert!(obr.get_at(33, 0, 2, 1).is_none());
        assert_eq!(obr.get_at(34, 0, 1, 3), Some("PERSON"));
    }

    #[test]
    fn layouts_hold_identical_values() {
        let malformed = generate(&Requirements::default()).1;
        let well_formed = generate(&Requirements::builder().malformed(false).build().unwrap()).1;
        let malformed_layout = IdentityWriter::new(true);
        let well_formed_layout = IdentityWriter::new(false);

        for (field, pieces) in [(33, &[1, 2, 3, 4, 9][..]), (34, &[1, 2, 3][..])] {
            for &piece in pieces {
                let a = malformed.get(malformed_layout.address(field, piece).unwrap());
                let b = well_formed.get(well_formed_layout.address(field, piece).unwrap());
                assert!(a.is_some());
                assert_eq!(a, b, "OBR-{field} piece {piece}");
            }
        }
        assert_eq!(
            well_formed.get(well_formed_layout.address(34, 1).unwrap()),
            ENTERED_BY.person_identifier()
        );
    }

    #[test]
    fn technician_comes_from_the_order() {
        let requirements = Requirements::builder().malformed(false).build().unwrap();
        let mut ctx =
            GenerationContext::new(&requirements, Message::new("ORU_R01"), StdRng::seed_from_u64(4));
        let order = OrcGenerator::new(Person::named("ROENTGEN", "WILHELM", "C."));
        order.generate(&mut ctx).unwrap();
        let obr = ObrGenerator::new(order.technician()).generate(&mut ctx).unwrap();
        assert_eq!(obr.get_at(34, 0, 1, 2), Some("ROENTGEN"));
        assert_eq!(obr.get_at(34, 0, 1, 3), Some("WILHELM"));
        assert_eq!(obr.get_at(33, 0, 1, 2), Some("DOC"));
    }

    #[test]
    fn requires_order_segment() {
        let requirements = Requirements::default();
        let mut ctx =
            GenerationContext::new(&requirements, Message::new("ORU_R01"), StdRng::seed_from_u64(4));
        let err = ObrGenerator::new(&ENTERED_BY).generate(&mut ctx).unwrap_err();
        assert!(matches!(err, GenerationError::MissingSegment(SegmentKind::Orc)));
        assert!(ctx.lookup(&SegmentKind::Obr).is_none());
    }
}
