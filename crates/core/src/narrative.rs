//! Free-text report narrative.
//!
//! A report is built from a template holding four abnormality placeholders and one interpreter
//! placeholder. Each message draws four distinct abnormalities from [`ABNORMALITIES`], fills
//! the template, splits it into lines and wraps every line to [`LINE_LENGTH_WRAP`] characters.
//!
//! Wrapping is greedy and only ever breaks at a space: from the first 70 characters of what
//! remains, everything before the last space becomes one line and the text after that space
//! carries on. A 70-character window with no space at all is broken at the first space after
//! it, and a remainder with no space is kept whole, so words are never split.

use crate::constants::{
    ABNORMALITY_1_PLACEHOLDER, ABNORMALITY_2_PLACEHOLDER, ABNORMALITY_3_PLACEHOLDER,
    ABNORMALITY_4_PLACEHOLDER, INTERPRETER_PLACEHOLDER, LINE_LENGTH_WRAP, NARRATIVE_PLACEHOLDERS,
};
use crate::model::Person;
use crate::random::random_subset;
use crate::{GenerationError, GenerationResult};
use rand::Rng;
use std::path::Path;

const BUNDLED_TEMPLATE: &str = include_str!("../templates/sample_read.txt");

/// Findings substituted into the narrative.
pub const ABNORMALITIES: [&str; 8] = [
    "arterial wall calcification",
    "pericardial effusion",
    "emphysema",
    "atelectasis",
    "lung nodules",
    "pleural effusion",
    "peribronchial thickening",
    "bronchiectasis",
];

/// A validated narrative template.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NarrativeTemplate {
    text: String,
}

impl Default for NarrativeTemplate {
    fn default() -> Self {
        Self::bundled()
    }
}

impl NarrativeTemplate {
    /// The template shipped with this crate.
    pub fn bundled() -> Self {
        Self {
            text: BUNDLED_TEMPLATE.to_owned(),
        }
    }

    /// Validates template text.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TemplateMissingPlaceholder`] naming the first placeholder
    /// the text lacks.
    pub fn parse(text: impl Into<String>) -> GenerationResult<Self> {
        let text = text.into();
        if let Some(missing) = NARRATIVE_PLACEHOLDERS
            .into_iter()
            .find(|placeholder| !text.contains(placeholder))
        {
            return Err(GenerationError::TemplateMissingPlaceholder(missing));
        }
        Ok(Self { text })
    }

    /// Reads and validates a template file.
    ///
    /// # Errors
    ///
    /// Returns [`GenerationError::TemplateLoad`] if the file cannot be read, or
    /// [`GenerationError::TemplateMissingPlaceholder`] if it is incomplete.
    pub fn load(path: &Path) -> GenerationResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| GenerationError::TemplateLoad {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitutes the abnormalities (in order) and the interpreter's "given surname".
    pub fn fill(&self, abnormalities: [&str; 4], interpreter: &Person) -> String {
        self.text
            .replace(ABNORMALITY_1_PLACEHOLDER, abnormalities[0])
            .replace(ABNORMALITY_2_PLACEHOLDER, abnormalities[1])
            .replace(ABNORMALITY_3_PLACEHOLDER, abnormalities[2])
            .replace(ABNORMALITY_4_PLACEHOLDER, abnormalities[3])
            .replace(INTERPRETER_PLACEHOLDER, &interpreter.display_name())
    }

    /// Fills the template with four random distinct abnormalities and wraps the result.
    pub fn report_lines<R: Rng + ?Sized>(&self, rng: &mut R, interpreter: &Person) -> Vec<String> {
        let drawn = random_subset(rng, &ABNORMALITIES, 4);
        let abnormalities = [*drawn[0], *drawn[1], *drawn[2], *drawn[3]];
        split_lines(&self.fill(abnormalities, interpreter))
            .into_iter()
            .flat_map(|line| wrap_line(line, LINE_LENGTH_WRAP))
            .collect()
    }
}

/// Splits on newlines, dropping trailing empty lines and any carriage return before a newline.
pub fn split_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

/// Greedily wraps `line` at spaces so that each fragment is shorter than `width` characters
/// wherever a space allows it.
pub fn wrap_line(line: &str, width: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut remaining = line;
    loop {
        if remaining.chars().count() < width {
            fragments.push(remaining.to_owned());
            break;
        }
        let window_end = remaining
            .char_indices()
            .nth(width)
            .map_or(remaining.len(), |(index, _)| index);
        let split_at = remaining[..window_end]
            .rfind(' ')
            .or_else(|| remaining[window_end..].find(' ').map(|i| window_end + i));
        match split_at {
            Some(space) => {
                fragments.push(remaining[..space].trim().to_owned());
                remaining = &remaining[space + 1..];
            }
            None => {
                fragments.push(remaining.to_owned());
                break;
            }
        }
    }
    fragments
}
