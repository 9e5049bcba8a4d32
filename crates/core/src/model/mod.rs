//! Value types projected onto segment fields.
//!
//! Each type mirrors one HL7 composite data type and knows how to write itself into a
//! [`hl7::Composite`] slot. Optional attributes that are unset are simply not written.

mod coded_value;
mod family_name;
mod hierarchic_designator;
mod patient_id;
mod person;

pub use coded_value::CodedValue;
pub use family_name::FamilyName;
pub use hierarchic_designator::HierarchicDesignator;
pub use patient_id::{PatientIdEncoder, PATIENT_ID_ENCODERS};
pub use person::Person;
