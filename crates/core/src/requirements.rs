//! Message requirements.
//!
//! A [`Requirements`] value selects which optional content a generated message carries. It is
//! immutable once built; use [`Requirements::builder`] to change defaults, or
//! [`Requirements::from_yaml`] to read them from a requirements file.

use crate::constants::MAX_FIXTURE_POOL;
use crate::{GenerationError, GenerationResult};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_ORDER_STATUS: &str = "Prelim";
const DEFAULT_STUDY_REASON: &str = "Chest pain";

/// Which optional content a generated message contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Requirements {
    num_patient_ids: usize,
    num_attending_doctors: usize,
    include_alias: bool,
    include_address: bool,
    extended_pid: bool,
    order_status: String,
    study_reason: String,
    malformed: bool,
}

impl Default for Requirements {
    fn default() -> Self {
        Self {
            num_patient_ids: 1,
            num_attending_doctors: 1,
            include_alias: false,
            include_address: true,
            extended_pid: true,
            order_status: DEFAULT_ORDER_STATUS.to_owned(),
            study_reason: DEFAULT_STUDY_REASON.to_owned(),
            malformed: true,
        }
    }
}

impl Requirements {
    pub fn builder() -> RequirementsBuilder {
        RequirementsBuilder {
            requirements: Requirements::default(),
        }
    }

    /// A builder starting from these requirements rather than the defaults.
    pub fn to_builder(&self) -> RequirementsBuilder {
        RequirementsBuilder {
            requirements: self.clone(),
        }
    }

    /// Number of PID-3 identifiers, one per patient-id encoder.
    pub fn num_patient_ids(&self) -> usize {
        self.num_patient_ids
    }

    /// Number of PV1-7 attending doctors, drawn from the doctor pool in order.
    pub fn num_attending_doctors(&self) -> usize {
        self.num_attending_doctors
    }

    pub fn include_alias(&self) -> bool {
        self.include_alias
    }

    pub fn include_address(&self) -> bool {
        self.include_address
    }

    /// Whether PID carries county, phones, marital status, SSN and ethnicity.
    pub fn extended_pid(&self) -> bool {
        self.extended_pid
    }

    /// Written to ORC-5, OBR-25 and every OBX-11.
    pub fn order_status(&self) -> &str {
        &self.order_status
    }

    pub fn study_reason(&self) -> &str {
        &self.study_reason
    }

    /// When set, OBR-33/34 identity fragments go into successive components instead of
    /// successive subcomponents of the first component.
    pub fn malformed(&self) -> bool {
        self.malformed
    }

    /// Parse requirements from YAML text.
    ///
    /// Every key is optional and falls back to its default. Unknown keys are rejected.
    ///
    /// This uses `serde_path_to_error` to surface the failing key (e.g. `num_patient_ids`)
    /// when the YAML does not match the requirements schema.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::RequirementsYaml`] on a schema mismatch and
    /// [`GenerationError::InvalidRequirements`] when a count is out of range.
    pub fn from_yaml(yaml_text: &str) -> GenerationResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let wire = match serde_path_to_error::deserialize::<_, RequirementsWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let path = if path.is_empty() || path == "." {
                    "<root>".to_owned()
                } else {
                    path
                };
                return Err(GenerationError::RequirementsYaml {
                    path,
                    message: err.into_inner().to_string(),
                });
            }
        };
        wire.into_builder().build()
    }

    /// Read and parse a requirements file.
    pub fn from_yaml_file(path: &Path) -> GenerationResult<Self> {
        Self::from_yaml(&std::fs::read_to_string(path)?)
    }
}

/// Builder for [`Requirements`]; unset values keep their defaults.
#[derive(Clone, Debug)]
pub struct RequirementsBuilder {
    requirements: Requirements,
}

impl RequirementsBuilder {
    pub fn num_patient_ids(mut self, count: usize) -> Self {
        self.requirements.num_patient_ids = count;
        self
    }

    pub fn num_attending_doctors(mut self, count: usize) -> Self {
        self.requirements.num_attending_doctors = count;
        self
    }

    pub fn include_alias(mut self, include: bool) -> Self {
        self.requirements.include_alias = include;
        self
    }

    pub fn include_address(mut self, include: bool) -> Self {
        self.requirements.include_address = include;
        self
    }

    pub fn extended_pid(mut self, extended: bool) -> Self {
        self.requirements.extended_pid = extended;
        self
    }

    pub fn order_status(mut self, status: impl Into<String>) -> Self {
        self.requirements.order_status = status.into();
        self
    }

    pub fn study_reason(mut self, reason: impl Into<String>) -> Self {
        self.requirements.study_reason = reason.into();
        self
    }

    pub fn malformed(mut self, malformed: bool) -> Self {
        self.requirements.malformed = malformed;
        self
    }

    /// Validates and returns the requirements.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::InvalidRequirements`] if either count is outside
    /// `1..=2`, the size of the patient-id encoder and attending doctor pools.
    pub fn build(self) -> GenerationResult<Requirements> {
        let requirements = self.requirements;
        check_count("num_patient_ids", requirements.num_patient_ids)?;
        check_count("num_attending_doctors", requirements.num_attending_doctors)?;
        Ok(requirements)
    }
}

fn check_count(name: &str, count: usize) -> GenerationResult<()> {
    if (1..=MAX_FIXTURE_POOL).contains(&count) {
        return Ok(());
    }
    Err(GenerationError::InvalidRequirements(format!(
        "{name} must be between 1 and {MAX_FIXTURE_POOL}, got {count}"
    )))
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RequirementsWire {
    num_patient_ids: Option<usize>,
    num_attending_doctors: Option<usize>,
    include_alias: Option<bool>,
    include_address: Option<bool>,
    extended_pid: Option<bool>,
    order_status: Option<String>,
    study_reason: Option<String>,
    malformed: Option<bool>,
}

impl RequirementsWire {
    fn into_builder(self) -> RequirementsBuilder {
        let mut builder = Requirements::builder();
        if let Some(v) = self.num_patient_ids {
            builder = builder.num_patient_ids(v);
        }
        if let Some(v) = self.num_attending_doctors {
            builder = builder.num_attending_doctors(v);
        }
        if let Some(v) = self.include_alias {
            builder = builder.include_alias(v);
        }
        if let Some(v) = self.include_address {
            builder = builder.include_address(v);
        }
        if let Some(v) = self.extended_pid {
            builder = builder.extended_pid(v);
        }
        if let Some(v) = self.order_status {
            builder = builder.order_status(v);
        }
        if let Some(v) = self.study_reason {
            builder = builder.study_reason(v);
        }
        if let Some(v) = self.malformed {
            builder = builder.malformed(v);
        }
        builder
    }
}
