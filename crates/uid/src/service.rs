//! Internal implementation of identifier services.

use crate::{UidError, UidResult};
use std::{fmt, str::FromStr};

/// Re-exported for convenience.
pub use ::uuid::Uuid;

/// Root arc for UIDs derived from a UUID (ITU-T X.667).
const UUID_DERIVED_ROOT: &str = "2.25";

/// Longest UID the DICOM standard allows.
const MAX_DICOM_UID_LEN: usize = 64;

/// A message control id (MSH-10): a hyphenated, lowercase UUID v4.
///
/// Once constructed, the contained UUID always displays in the 36-character hyphenated form,
/// for example `550e8400-e29b-41d4-a716-446655440000`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageControlId(Uuid);

impl Default for MessageControlId {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageControlId {
    /// Generates a fresh control id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Validates and parses a control id that must already be hyphenated lowercase.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::InvalidInput`] for any other UUID spelling (simple, braced,
    /// urn-prefixed, upper-case) and for non-UUID input.
    pub fn parse(input: &str) -> UidResult<Self> {
        match Uuid::parse_str(input) {
            Ok(uuid) if uuid.hyphenated().to_string() == input => Ok(Self(uuid)),
            _ => Err(UidError::InvalidInput(format!(
                "message control id must be a hyphenated lowercase UUID, got: '{}'",
                input
            ))),
        }
    }
}

impl fmt::Display for MessageControlId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl FromStr for MessageControlId {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MessageControlId::parse(s)
    }
}

/// A DICOM unique identifier.
///
/// Freshly generated values use the UUID-derived root: `2.25.` followed by the decimal value
/// of a random UUID v4. Parsed values may use any root, as long as they are syntactically
/// valid.
///
/// # Syntax
/// - Dot-separated components, at least two.
/// - Each component is a non-empty run of ASCII digits with no leading zero (a lone `0` is
///   allowed).
/// - At most 64 characters overall.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DicomUid(String);

impl Default for DicomUid {
    fn default() -> Self {
        Self::new()
    }
}

impl DicomUid {
    /// Generates a fresh UUID-derived UID.
    pub fn new() -> Self {
        Self::from_uuid(Uuid::new_v4())
    }

    /// Derives the UID for a given UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(format!("{UUID_DERIVED_ROOT}.{}", uuid.as_u128()))
    }

    /// Validates and wraps an externally supplied UID.
    ///
    /// # Errors
    ///
    /// Returns [`UidError::InvalidInput`] if `input` fails [`DicomUid::is_valid`].
    pub fn parse(input: &str) -> UidResult<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(UidError::InvalidInput(format!(
            "DICOM UID must be at most {MAX_DICOM_UID_LEN} characters of dot-separated numbers without leading zeros, got: '{}'",
            input
        )))
    }

    /// Returns true if `input` is a syntactically valid DICOM UID.
    pub fn is_valid(input: &str) -> bool {
        if input.is_empty() || input.len() > MAX_DICOM_UID_LEN {
            return false;
        }
        let mut components = 0;
        for component in input.split('.') {
            let well_formed = !component.is_empty()
                && component.bytes().all(|b| b.is_ascii_digit())
                && (component == "0" || !component.starts_with('0'));
            if !well_formed {
                return false;
            }
            components += 1;
        }
        components >= 2
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DicomUid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for DicomUid {
    type Err = UidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DicomUid::parse(s)
    }
}

impl AsRef<str> for DicomUid {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
