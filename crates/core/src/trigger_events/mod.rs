//! Message orchestrators, one per supported trigger event.

mod unsolicited_observation;

pub use unsolicited_observation::UnsolicitedObservationGenerator;

use crate::context::GenerationContext;
use crate::requirements::Requirements;
use crate::GenerationResult;
use hl7::Message;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Builds complete messages of one structure.
pub trait MessageGenerator {
    /// Root group name of the generated structure, e.g. `ORU_R01`.
    fn structure_name(&self) -> &'static str;

    /// Runs the generation pipeline against a fresh context.
    fn generate_message(&self, ctx: &mut GenerationContext<'_>) -> GenerationResult<()>;

    /// Generates one message.
    ///
    /// # Errors
    ///
    /// Any encoding or ordering failure aborts the whole message; no partial message is
    /// returned.
    fn generate(&self, requirements: &Requirements) -> GenerationResult<Message> {
        self.generate_with_rng(requirements, StdRng::from_entropy())
    }

    /// Generates one message with every random choice drawn from `seed`.
    ///
    /// Timestamps, control ids and the process-wide reference people are unaffected.
    fn generate_seeded(&self, requirements: &Requirements, seed: u64) -> GenerationResult<Message> {
        self.generate_with_rng(requirements, StdRng::seed_from_u64(seed))
    }

    fn generate_with_rng(&self, requirements: &Requirements, rng: StdRng) -> GenerationResult<Message> {
        let mut ctx = GenerationContext::new(requirements, Message::new(self.structure_name()), rng);
        self.generate_message(&mut ctx)?;
        let message = ctx.into_message();
        tracing::info!(
            "generated {} message with {} segments",
            message.structure_name(),
            message.segments().len()
        );
        Ok(message)
    }
}
