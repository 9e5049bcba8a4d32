//! Message delimiters and value escaping.

use crate::{Hl7Error, Hl7Result};
use std::borrow::Cow;

/// The five delimiter characters of an HL7 v2 message.
///
/// The field separator travels in MSH-1 and the remaining four, in the order component,
/// repetition, escape, subcomponent, travel in MSH-2.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delimiters {
    pub field: char,
    pub component: char,
    pub repetition: char,
    pub escape: char,
    pub subcomponent: char,
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
        }
    }
}

impl Delimiters {
    /// Builds delimiters from the values carried in MSH-1 and MSH-2.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::InvalidDelimiters`] if `field_separator` is not exactly one
    /// character, or `encoding_characters` is not exactly four characters distinct from each
    /// other and from the field separator.
    pub fn parse(field_separator: &str, encoding_characters: &str) -> Hl7Result<Self> {
        let mut field_chars = field_separator.chars();
        let field = match (field_chars.next(), field_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(Hl7Error::InvalidDelimiters(format!(
                    "field separator must be a single character, got '{field_separator}'"
                )))
            }
        };

        let encoding: Vec<char> = encoding_characters.chars().collect();
        if encoding.len() != 4 {
            return Err(Hl7Error::InvalidDelimiters(format!(
                "expected 4 encoding characters, got '{encoding_characters}'"
            )));
        }

        let mut all = encoding.clone();
        all.push(field);
        all.sort_unstable();
        all.dedup();
        if all.len() != 5 {
            return Err(Hl7Error::InvalidDelimiters(format!(
                "delimiters must be distinct: '{field_separator}' '{encoding_characters}'"
            )));
        }

        Ok(Self {
            field,
            component: encoding[0],
            repetition: encoding[1],
            escape: encoding[2],
            subcomponent: encoding[3],
        })
    }

    /// The MSH-2 value for these delimiters.
    pub fn encoding_characters(&self) -> String {
        [self.component, self.repetition, self.escape, self.subcomponent]
            .iter()
            .collect()
    }

    /// Escapes delimiter and line-break characters inside a single value.
    ///
    /// Values without special characters are returned borrowed.
    pub fn escape<'a>(&self, value: &'a str) -> Cow<'a, str> {
        let needs_escape = value.chars().any(|c| {
            c == self.field
                || c == self.component
                || c == self.repetition
                || c == self.escape
                || c == self.subcomponent
                || c == '\r'
                || c == '\n'
        });
        if !needs_escape {
            return Cow::Borrowed(value);
        }

        let e = self.escape;
        let mut out = String::with_capacity(value.len() + 8);
        for c in value.chars() {
            let code = if c == self.escape {
                Some("E")
            } else if c == self.field {
                Some("F")
            } else if c == self.component {
                Some("S")
            } else if c == self.repetition {
                Some("R")
            } else if c == self.subcomponent {
                Some("T")
            } else if c == '\r' {
                Some("X0D")
            } else if c == '\n' {
                Some("X0A")
            } else {
                None
            };
            match code {
                Some(code) => {
                    out.push(e);
                    out.push_str(code);
                    out.push(e);
                }
                None => out.push(c),
            }
        }
        Cow::Owned(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_encoding_characters() {
        assert_eq!(Delimiters::default().encoding_characters(), "^~\\&");
    }

    #[test]
    fn parse_round_trips_default() {
        let d = Delimiters::parse("|", "^~\\&").expect("valid delimiters");
        assert_eq!(d, Delimiters::default());
    }

    #[test]
    fn parse_rejects_bad_lengths_and_duplicates() {
        assert!(Delimiters::parse("||", "^~\\&").is_err());
        assert!(Delimiters::parse("|", "^~\\").is_err());
        assert!(Delimiters::parse("|", "^^\\&").is_err());
        assert!(Delimiters::parse("^", "^~\\&").is_err());
    }

    #[test]
    fn escape_leaves_plain_values_borrowed() {
        let d = Delimiters::default();
        assert!(matches!(d.escape("CHEST PAIN"), Cow::Borrowed(_)));
    }

    #[test]
    fn escape_replaces_every_delimiter() {
        let d = Delimiters::default();
        assert_eq!(d.escape("A|B^C~D\\E&F"), "A\\F\\B\\S\\C\\R\\D\\E\\E\\T\\F");
        assert_eq!(d.escape("line\rbreak"), "line\\X0D\\break");
    }
}
