//! Constants used throughout the fixture core crate.
//!
//! Literal values shared between generators, plus the group names of the supported message
//! structure.

/// Namespace of the main hospital; the assigning authority for its doctors and identifiers.
pub const MAIN_HOSPITAL: &str = "ABC";

/// Callback phone number used wherever a phone is written.
pub const PHONE_NUMBER: &str = "(555)555-5555";

/// Identifier type code carried by hospital staff identities.
pub const HOSPITAL_STAFF_TYPE_CODE: &str = "HOSP";

pub const ABNORMALITY_1_PLACEHOLDER: &str = "%AB1%";
pub const ABNORMALITY_2_PLACEHOLDER: &str = "%AB2%";
pub const ABNORMALITY_3_PLACEHOLDER: &str = "%AB3%";
pub const ABNORMALITY_4_PLACEHOLDER: &str = "%AB4%";
pub const INTERPRETER_PLACEHOLDER: &str = "%INTERPRETER%";

/// Every placeholder a narrative template must contain.
pub const NARRATIVE_PLACEHOLDERS: [&str; 5] = [
    ABNORMALITY_1_PLACEHOLDER,
    ABNORMALITY_2_PLACEHOLDER,
    ABNORMALITY_3_PLACEHOLDER,
    ABNORMALITY_4_PLACEHOLDER,
    INTERPRETER_PLACEHOLDER,
];

/// Maximum width of one report line.
pub const LINE_LENGTH_WRAP: usize = 70;

/// Digits in a default random identifier.
pub const DEFAULT_ID_DIGITS: u32 = 7;

/// Upper bound on either requirement count; the size of the encoder and doctor pools.
pub const MAX_FIXTURE_POOL: usize = 2;

/// Message structure of the unsolicited observation result.
pub const ORU_R01: &str = "ORU_R01";
pub const PATIENT_RESULT: &str = "PATIENT_RESULT";
pub const PATIENT: &str = "PATIENT";
pub const VISIT: &str = "VISIT";
pub const ORDER_OBSERVATION: &str = "ORDER_OBSERVATION";
pub const COMMON_ORDER: &str = "COMMON_ORDER";
pub const OBSERVATION: &str = "OBSERVATION";

/// Path from the message root to the order group custom segments attach to.
pub const ORDER_OBSERVATION_PATH: [&str; 2] = [PATIENT_RESULT, ORDER_OBSERVATION];

/// Environment variable naming an optional YAML requirements file.
pub const REQUIREMENTS_ENV: &str = "FIXTURE_REQUIREMENTS";

/// Environment variable naming an optional narrative template override.
pub const TEMPLATE_ENV: &str = "FIXTURE_TEMPLATE";
