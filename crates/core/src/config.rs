//! Generator configuration.
//!
//! Configuration is resolved once at process startup and then passed to the message
//! generator. Nothing in this crate reads environment variables; the caller decides where the
//! requirements file and template override come from.

use crate::narrative::NarrativeTemplate;
use crate::requirements::Requirements;
use crate::trigger_events::UnsolicitedObservationGenerator;
use crate::GenerationResult;
use std::path::Path;

/// Generator configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct GeneratorConfig {
    requirements: Requirements,
    narrative: NarrativeTemplate,
}

impl GeneratorConfig {
    pub fn new(requirements: Requirements, narrative: NarrativeTemplate) -> Self {
        Self {
            requirements,
            narrative,
        }
    }

    /// Loads the optional requirements file and template override.
    ///
    /// Missing paths fall back to default requirements and the bundled template.
    ///
    /// # Errors
    ///
    /// Returns the requirements file's parse or validation error, or a template load error.
    pub fn resolve(
        requirements_file: Option<&Path>,
        template_file: Option<&Path>,
    ) -> GenerationResult<Self> {
        let requirements = match requirements_file {
            Some(path) => {
                tracing::debug!("reading requirements from {}", path.display());
                Requirements::from_yaml_file(path)?
            }
            None => Requirements::default(),
        };

        let narrative = match template_file {
            Some(path) => {
                tracing::warn!(
                    "using narrative template override {} instead of the bundled template",
                    path.display()
                );
                NarrativeTemplate::load(path)?
            }
            None => NarrativeTemplate::bundled(),
        };

        Ok(Self::new(requirements, narrative))
    }

    pub fn requirements(&self) -> &Requirements {
        &self.requirements
    }

    /// Replaces the requirements, e.g. after applying command-line overrides.
    pub fn with_requirements(mut self, requirements: Requirements) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn narrative(&self) -> &NarrativeTemplate {
        &self.narrative
    }

    /// The report generator for this configuration.
    pub fn generator(&self) -> UnsolicitedObservationGenerator {
        UnsolicitedObservationGenerator::new(self.narrative.clone())
    }
}
