//! Unsolicited observation result (`ORU^R01`): a radiology report.
//!
//! Generation order is fixed and each step may depend on the ones before it:
//!
//! ```text
//! MSH -> PID -> PV1 -> ORC -> OBR -> ZPF -> OBX* -> ZDS
//!                      |       |              |
//!                      |       +- interpreter +- narrative signature
//!                      +- technician -------> OBR-34, OBX-16
//! ```
//!
//! The first two observation lines are fixed general text. Every line after them is the
//! wrapped narrative, marked as impression.

use super::MessageGenerator;
use crate::constants::{
    COMMON_ORDER, OBSERVATION, ORDER_OBSERVATION, ORDER_OBSERVATION_PATH, ORU_R01, PATIENT,
    PATIENT_RESULT, VISIT,
};
use crate::context::GenerationContext;
use crate::narrative::NarrativeTemplate;
use crate::segment::{
    MshGenerator, NonstandardSegmentGenerator, ObrGenerator, ObservationKind, ObxGenerator,
    OrcGenerator, PidGenerator, Pv1Generator, SegmentGenerator, ZdsGenerator, ZpfGenerator,
};
use crate::GenerationResult;
use hl7::{Group, Segment};

const EXAMINATION_LINE: &str = "EXAMINATION: 1 view chest radiograph";

/// Generates chest radiograph reports.
#[derive(Clone, Debug, Default)]
pub struct UnsolicitedObservationGenerator {
    narrative: NarrativeTemplate,
}

impl UnsolicitedObservationGenerator {
    pub fn new(narrative: NarrativeTemplate) -> Self {
        Self { narrative }
    }

    fn stamp_message_type(msh: &mut Segment) -> GenerationResult<()> {
        msh.set_at(9, 0, 1, 1, "ORU")?;
        msh.set_at(9, 0, 2, 1, "R01")?; // MSH-9.3 stays empty
        msh.set_field(11, "P")?;
        msh.set_field(12, "2.7")?;
        Ok(())
    }

    fn place(
        ctx: &mut GenerationContext<'_>,
        path: &[&str],
        segment: Segment,
    ) -> GenerationResult<()> {
        ctx.message_mut().group_path_mut(path)?.push(segment);
        Ok(())
    }
}

impl MessageGenerator for UnsolicitedObservationGenerator {
    fn structure_name(&self) -> &'static str {
        ORU_R01
    }

    fn generate_message(&self, ctx: &mut GenerationContext<'_>) -> GenerationResult<()> {
        let mut msh = MshGenerator.generate(ctx)?;
        Self::stamp_message_type(&mut msh)?;

        let mut patient_result = Group::new(PATIENT_RESULT);
        patient_result.push(Group::new(PATIENT));
        let mut order_observation = Group::new(ORDER_OBSERVATION);
        order_observation.push(Group::new(COMMON_ORDER));
        patient_result.push(order_observation);

        let root = ctx.message_mut().root_mut();
        root.push(msh);
        root.push(patient_result);

        let pid = PidGenerator.generate(ctx)?;
        Self::place(ctx, &[PATIENT_RESULT, PATIENT], pid)?;

        let mut visit = Group::new(VISIT);
        visit.push(Pv1Generator.generate(ctx)?);
        ctx.message_mut()
            .group_path_mut(&[PATIENT_RESULT, PATIENT])?
            .push(visit);

        let order = OrcGenerator::default();
        let orc = order.generate(ctx)?;
        Self::place(ctx, &[PATIENT_RESULT, ORDER_OBSERVATION, COMMON_ORDER], orc)?;
        let technician = order.technician();

        let request = ObrGenerator::new(technician);
        let obr = request.generate(ctx)?;
        Self::place(ctx, &ORDER_OBSERVATION_PATH, obr)?;

        ZpfGenerator.generate(ctx)?;

        let mut lines = vec![
            (ObservationKind::General, EXAMINATION_LINE.to_owned()),
            (ObservationKind::General, String::new()),
        ];
        let narrative = self.narrative.report_lines(ctx.rng(), request.interpreter());
        lines.extend(
            narrative
                .into_iter()
                .map(|line| (ObservationKind::Impression, line)),
        );

        for (index, (kind, content)) in lines.into_iter().enumerate() {
            let mut observation = Group::new(OBSERVATION);
            observation.push(ObxGenerator::new(kind, content, index, technician).generate(ctx)?);
            ctx.message_mut()
                .group_path_mut(&ORDER_OBSERVATION_PATH)?
                .push(observation);
        }

        ZdsGenerator.generate(ctx)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::ENTERED_BY;
    use crate::requirements::Requirements;
    use hl7::{Message, Structure};

    fn generate(requirements: &Requirements) -> Message {
        UnsolicitedObservationGenerator::default()
            .generate(requirements)
            .unwrap()
    }

    fn order_observation(message: &Message) -> &Group {
        message.root().group_path(&ORDER_OBSERVATION_PATH).unwrap()
    }

    fn segment_names(message: &Message) -> Vec<String> {
        message
            .segments()
            .iter()
            .map(|s| s.name().to_string())
            .collect()
    }

    fn observations(message: &Message) -> Vec<&Segment> {
        message
            .segments()
            .into_iter()
            .filter(|s| s.name().as_str() == "OBX")
            .collect()
    }

    #[test]
    fn default_requirements_end_to_end() {
        let message = generate(&Requirements::default());
        let segments = message.segments();

        let pid = segments[1];
        assert_eq!(pid.repetition_count(3), 1);
        assert_eq!(pid.get_at(3, 0, 4, 1), Some("EPIC"));
        assert_eq!(pid.get_at(3, 0, 5, 1), Some("MRN"));

        let pv1 = segments[2];
        assert_eq!(pv1.repetition_count(7), 1);
        assert_eq!(
            (pv1.get_at(7, 0, 2, 1), pv1.get_at(7, 0, 3, 1), pv1.get_at(7, 0, 4, 1)),
            (Some("CURIE"), Some("MARIE"), Some("S"))
        );

        let obx = observations(&message);
        assert!(obx.len() > 2);
        assert_eq!(obx[0].get_at(5, 0, 1, 1), Some(EXAMINATION_LINE));
        assert_eq!(obx[0].get_at(3, 0, 1, 2), Some("GDT"));
        assert!(obx[1].get_at(5, 0, 1, 1).is_none());
        assert_eq!(obx[1].get_at(3, 0, 1, 2), Some("GDT"));
        for (index, line) in obx.iter().enumerate().skip(2) {
            assert_eq!(line.get_at(3, 0, 1, 2), Some("IMP"));
            assert_eq!(line.get_at(1, 0, 1, 1), Some((index + 2).to_string().as_str()));
            let content = line.get_at(5, 0, 1, 1).unwrap_or("");
            assert!(content.chars().count() < 70, "{content}");
        }
        let last = obx[obx.len() - 1].get_at(5, 0, 1, 1).unwrap();
        assert!(last.ends_with("THAT DOC"), "{last}");
    }

    #[test]
    fn segment_order_on_the_wire() {
        let message = generate(&Requirements::default());
        let names = segment_names(&message);
        assert_eq!(&names[..6], ["MSH", "PID", "PV1", "ORC", "OBR", "ZPF"]);
        assert_eq!(names.last().map(String::as_str), Some("ZDS"));
        assert!(names[6..names.len() - 1].iter().all(|n| n == "OBX"));

        let encoded = message.encode().unwrap();
        assert!(encoded.starts_with("MSH|^~\\&|SOMERIS|ABCHOSP|SOMEAPP|ABC_HOSP_DEPT_X|"));
        assert!(encoded.contains("|ORU^R01|"));
        assert!(encoded.contains("|P|2.7\r"));
        assert!(encoded.ends_with("^EPIC^APPLICATION^DICOM\r"));
    }

    #[test]
    fn custom_segments_at_their_positions() {
        let message = generate(&Requirements::default());
        let group = order_observation(&message);
        let names = group.names();
        assert_eq!(&names[..3], [COMMON_ORDER, "OBR", "ZPF"]);
        assert_eq!(names.last().copied(), Some("ZDS"));
        assert!(matches!(
            group.child(2),
            Some(Structure::Segment(zpf)) if zpf.get_at(2, 0, 2, 1) == Some("IMG XR PROCEDURES")
        ));
        let uid = group.segment("ZDS").unwrap().get_at(1, 0, 1, 1).unwrap();
        assert!(fixture_uid::DicomUid::is_valid(uid));
    }

    #[test]
    fn technician_matches_order_enterer_in_every_result() {
        let message = generate(&Requirements::default());
        let orc = message.segments()[3];
        for obx in observations(&message) {
            assert_eq!(obx.repetition(16, 0), orc.repetition(10, 0));
            assert_eq!(obx.get_at(16, 0, 1, 1), ENTERED_BY.person_identifier());
        }
    }

    #[test]
    fn two_identifiers_in_encoder_order() {
        let requirements = Requirements::builder()
            .num_patient_ids(2)
            .num_attending_doctors(2)
            .build()
            .unwrap();
        let message = generate(&requirements);
        let pid = message.segments()[1];
        assert_eq!(pid.repetition_count(3), 2);
        assert_eq!(pid.get_at(3, 0, 5, 1), Some("MRN"));
        assert_eq!(pid.get_at(3, 1, 5, 1), Some("MR"));
        assert_eq!(message.segments()[2].repetition_count(7), 2);
    }

    #[test]
    fn seeded_generation_repeats_random_choices() {
        let generator = UnsolicitedObservationGenerator::default();
        let requirements = Requirements::default();
        let a = generator.generate_seeded(&requirements, 17).unwrap();
        let b = generator.generate_seeded(&requirements, 17).unwrap();

        assert_eq!(a.segments()[1].get_at(3, 0, 1, 1), b.segments()[1].get_at(3, 0, 1, 1));
        assert_eq!(a.segments()[1].get_at(7, 0, 1, 1), b.segments()[1].get_at(7, 0, 1, 1));
        let text = |m: &Message| -> Vec<Option<String>> {
            observations(m)
                .iter()
                .map(|s| s.get_at(5, 0, 1, 1).map(str::to_owned))
                .collect()
        };
        assert_eq!(text(&a), text(&b));
    }

    #[test]
    fn custom_template_drives_report_lines() {
        let narrative =
            NarrativeTemplate::parse("%AB1%\n%AB2%\n%AB3%\n%AB4%\nRead by %INTERPRETER%.").unwrap();
        let message = UnsolicitedObservationGenerator::new(narrative)
            .generate(&Requirements::default())
            .unwrap();
        let obx = observations(&message);
        assert_eq!(obx.len(), 7);
        assert_eq!(obx[6].get_at(5, 0, 1, 1), Some("Read by THAT DOC."));
    }
}
