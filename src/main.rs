use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fixture_core::constants::{REQUIREMENTS_ENV, TEMPLATE_ENV};
use fixture_core::{
    GeneratorConfig, MessageGenerator, MessageLogger, Requirements, TranscriptLogger,
};
use hl7::Message;

#[derive(Parser)]
#[command(name = "hl7-fixtures")]
#[command(about = "Generate synthetic HL7 v2 ORU^R01 radiology reports")]
struct Cli {
    /// Number of messages to generate
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// Transcript file to write (default: a new temporary file)
    #[arg(long)]
    output: Option<PathBuf>,
    /// YAML requirements file (overrides FIXTURE_REQUIREMENTS)
    #[arg(long)]
    requirements: Option<PathBuf>,
    /// Narrative template override (overrides FIXTURE_TEMPLATE)
    #[arg(long)]
    template: Option<PathBuf>,
    /// Seed for reproducible random content; message `i` uses `seed + i`
    #[arg(long)]
    seed: Option<u64>,
    /// Number of patient identifiers (1-2)
    #[arg(long)]
    patient_ids: Option<usize>,
    /// Number of attending doctors (1-2)
    #[arg(long)]
    attending_doctors: Option<usize>,
    /// Include a patient alias
    #[arg(long)]
    alias: bool,
    /// Leave out the patient address
    #[arg(long)]
    no_address: bool,
    /// Leave out county, phones, marital status, SSN and ethnicity
    #[arg(long)]
    basic_pid: bool,
    /// Result status for ORC-5, OBR-25 and OBX-11
    #[arg(long)]
    order_status: Option<String>,
    /// Reason for study (OBR-31)
    #[arg(long)]
    study_reason: Option<String>,
    /// Write OBR-33/34 identities as subcomponents of the first component
    #[arg(long)]
    well_formed: bool,
}

impl Cli {
    /// Applies command-line overrides on top of the resolved requirements.
    fn apply_overrides(&self, base: &Requirements) -> fixture_core::GenerationResult<Requirements> {
        let mut builder = base.to_builder();
        if let Some(count) = self.patient_ids {
            builder = builder.num_patient_ids(count);
        }
        if let Some(count) = self.attending_doctors {
            builder = builder.num_attending_doctors(count);
        }
        if self.alias {
            builder = builder.include_alias(true);
        }
        if self.no_address {
            builder = builder.include_address(false);
        }
        if self.basic_pid {
            builder = builder.extended_pid(false);
        }
        if let Some(status) = &self.order_status {
            builder = builder.order_status(status.clone());
        }
        if let Some(reason) = &self.study_reason {
            builder = builder.study_reason(reason.clone());
        }
        if self.well_formed {
            builder = builder.malformed(false);
        }
        builder.build()
    }
}

fn env_path(name: &str) -> Option<PathBuf> {
    std::env::var_os(name)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Generates a batch of report messages and writes their transcript.
///
/// # Environment Variables
/// - `FIXTURE_REQUIREMENTS`: YAML requirements file
/// - `FIXTURE_TEMPLATE`: narrative template override
/// - `RUST_LOG`: log filter (default: `hl7_fixtures=info,fixture_core=info`)
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("hl7_fixtures=info".parse()?)
                .add_directive("fixture_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let requirements_file = cli.requirements.clone().or_else(|| env_path(REQUIREMENTS_ENV));
    let template_file = cli.template.clone().or_else(|| env_path(TEMPLATE_ENV));
    let config =
        GeneratorConfig::resolve(requirements_file.as_deref(), template_file.as_deref())?;
    let requirements = cli.apply_overrides(config.requirements())?;
    let config = config.with_requirements(requirements);

    tracing::info!("++ Generating {} ORU^R01 messages", cli.count);

    let generator = config.generator();
    let messages = (0..cli.count)
        .map(|i| match cli.seed {
            Some(seed) => {
                generator.generate_seeded(config.requirements(), seed.wrapping_add(i as u64))
            }
            None => generator.generate(config.requirements()),
        })
        .collect::<Result<Vec<Message>, _>>()?;

    let path = match &cli.output {
        Some(path) => {
            TranscriptLogger.write_to_log(path, &messages)?;
            path.clone()
        }
        None => TranscriptLogger.write_to_temp_log(&messages)?,
    };
    println!("{}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_requirements() {
        let cli = Cli::parse_from([
            "hl7-fixtures",
            "--patient-ids",
            "2",
            "--alias",
            "--no-address",
            "--well-formed",
            "--order-status",
            "Final",
        ]);
        let requirements = cli.apply_overrides(&Requirements::default()).unwrap();
        assert_eq!(requirements.num_patient_ids(), 2);
        assert!(requirements.include_alias());
        assert!(!requirements.include_address());
        assert!(!requirements.malformed());
        assert!(requirements.extended_pid());
        assert_eq!(requirements.order_status(), "Final");
    }

    #[test]
    fn out_of_range_flag_is_rejected() {
        let cli = Cli::parse_from(["hl7-fixtures", "--attending-doctors", "3"]);
        assert!(cli.apply_overrides(&Requirements::default()).is_err());
    }

    #[test]
    fn defaults_to_one_message() {
        let cli = Cli::parse_from(["hl7-fixtures"]);
        assert_eq!(cli.count, 1);
        assert!(cli.output.is_none());
        assert_eq!(
            cli.apply_overrides(&Requirements::default()).unwrap(),
            Requirements::default()
        );
    }
}
