use super::HierarchicDesignator;
use crate::constants::{DEFAULT_ID_DIGITS, MAIN_HOSPITAL};
use crate::random::random_id;
use hl7::{Composite, Hl7Result};
use rand::Rng;

/// Issuers of patient identifiers (`CX`).
///
/// Variants differ only in assigning authority and identifier type code. The declared order
/// of [`PATIENT_ID_ENCODERS`] is the order identifiers appear in PID-3.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PatientIdEncoder {
    /// The external EHR system.
    Epic,
    /// The main hospital.
    Abc,
}

/// Encoders in PID-3 order.
pub const PATIENT_ID_ENCODERS: [PatientIdEncoder; 2] =
    [PatientIdEncoder::Epic, PatientIdEncoder::Abc];

impl PatientIdEncoder {
    pub fn namespace_id(&self) -> &'static str {
        match self {
            PatientIdEncoder::Epic => "EPIC",
            PatientIdEncoder::Abc => MAIN_HOSPITAL,
        }
    }

    pub fn identifier_type_code(&self) -> &'static str {
        match self {
            PatientIdEncoder::Epic => "MRN",
            PatientIdEncoder::Abc => "MR",
        }
    }

    pub fn assigning_authority(&self) -> HierarchicDesignator {
        HierarchicDesignator::simple(self.namespace_id())
    }

    /// Draws a fresh identifier and writes it, with authority and type code, into `slot`.
    ///
    /// The identifier is the authority namespace followed by a random number of up to seven
    /// digits, e.g. `EPIC4821937`.
    pub fn generate_and_encode<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        slot: &mut Composite<'_>,
    ) -> Hl7Result<()> {
        let id = format!("{}{}", self.namespace_id(), random_id(rng, DEFAULT_ID_DIGITS));
        slot.set(1, id)?;
        self.assigning_authority().to_hd(&mut slot.component(4)?)?;
        slot.set(5, self.identifier_type_code())
    }
}
