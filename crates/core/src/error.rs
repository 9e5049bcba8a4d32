use crate::context::SegmentKind;
use std::path::PathBuf;

/// Errors raised while generating, configuring or logging fixture messages.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("encoding error: {0}")]
    Encoding(#[from] hl7::Hl7Error),
    #[error("invalid requirements: {0}")]
    InvalidRequirements(String),
    #[error("requirements file schema mismatch at {path}: {message}")]
    RequirementsYaml { path: String, message: String },
    #[error("segment {0} has not been generated yet")]
    MissingSegment(SegmentKind),
    #[error("failed to load narrative template {path}: {source}", path = path.display())]
    TemplateLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("narrative template is missing placeholder {0}")]
    TemplateMissingPlaceholder(&'static str),
    #[error("transcript I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Type alias for Results that can fail with a [`GenerationError`].
pub type GenerationResult<T> = Result<T, GenerationError>;
