//! Segments and their field storage.

use crate::address::Address;
use crate::composite::Composite;
use crate::delimiters::Delimiters;
use crate::{Hl7Error, Hl7Result};
use std::fmt;
use std::str::FromStr;

/// A validated three-character segment tag.
///
/// Tags are upper-case ASCII: a letter followed by two letters or digits. Tags starting with
/// `Z` are site-defined (non-standard) segments.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SegmentName(String);

impl SegmentName {
    pub fn parse(input: &str) -> Hl7Result<Self> {
        if Self::is_valid(input) {
            return Ok(Self(input.to_owned()));
        }
        Err(Hl7Error::InvalidSegmentName(format!(
            "segment name must be 3 upper-case characters, got '{input}'"
        )))
    }

    pub fn is_valid(input: &str) -> bool {
        let bytes = input.as_bytes();
        bytes.len() == 3
            && bytes[0].is_ascii_uppercase()
            && bytes[1..]
                .iter()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for site-defined `Z` segments.
    pub fn is_custom(&self) -> bool {
        self.0.starts_with('Z')
    }

    /// True for the message header, whose first two fields are the delimiters themselves.
    pub fn is_header(&self) -> bool {
        self.0 == "MSH"
    }
}

impl fmt::Display for SegmentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for SegmentName {
    type Err = Hl7Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for SegmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// One repetition of a field: components, each holding subcomponents.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Repetition {
    components: Vec<Vec<String>>,
}

impl Repetition {
    /// Value at a 1-based component/subcomponent, or `None` if unset or empty.
    pub fn get(&self, component: usize, subcomponent: usize) -> Option<&str> {
        self.components
            .get(component.checked_sub(1)?)?
            .get(subcomponent.checked_sub(1)?)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.components
            .iter()
            .all(|component| component.iter().all(String::is_empty))
    }

    fn set(&mut self, component: usize, subcomponent: usize, value: String) {
        let component_index = component - 1;
        if self.components.len() <= component_index {
            self.components.resize_with(component_index + 1, Vec::new);
        }
        let subcomponents = &mut self.components[component_index];
        let sub_index = subcomponent - 1;
        if subcomponents.len() <= sub_index {
            subcomponents.resize_with(sub_index + 1, String::new);
        }
        subcomponents[sub_index] = value;
    }

    fn encode(&self, delimiters: &Delimiters) -> String {
        let components: Vec<String> = self
            .components
            .iter()
            .map(|subcomponents| {
                let encoded: Vec<_> = subcomponents
                    .iter()
                    .map(|value| delimiters.escape(value))
                    .collect();
                join_trimmed(encoded.iter().map(|v| v.as_ref()), delimiters.subcomponent)
            })
            .collect();
        join_trimmed(components.iter().map(String::as_str), delimiters.component)
    }
}

/// Joins values with `separator`, dropping trailing empty values.
fn join_trimmed<'a>(values: impl Iterator<Item = &'a str>, separator: char) -> String {
    let values: Vec<&str> = values.collect();
    let keep = values
        .iter()
        .rposition(|v| !v.is_empty())
        .map_or(0, |last| last + 1);
    let mut out = String::new();
    for (i, value) in values[..keep].iter().enumerate() {
        if i > 0 {
            out.push(separator);
        }
        out.push_str(value);
    }
    out
}

/// A segment: a tag plus positionally addressed fields.
///
/// Fields have no schema here; callers address values explicitly.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    name: SegmentName,
    fields: Vec<Vec<Repetition>>,
}

impl Segment {
    pub fn new(name: &str) -> Hl7Result<Self> {
        Ok(Self::from_name(SegmentName::parse(name)?))
    }

    pub fn from_name(name: SegmentName) -> Self {
        Self {
            name,
            fields: Vec::new(),
        }
    }

    pub fn name(&self) -> &SegmentName {
        &self.name
    }

    /// Writes `value` at `address`, growing the field storage as needed.
    pub fn set(&mut self, address: Address, value: impl Into<String>) {
        self.repetition_mut(address.field_index(), address.repetition())
            .set(address.component(), address.subcomponent(), value.into());
    }

    /// Writes `value` at an explicit (field, repetition, component, subcomponent) position.
    pub fn set_at(
        &mut self,
        field: usize,
        repetition: usize,
        component: usize,
        subcomponent: usize,
        value: impl Into<String>,
    ) -> Hl7Result<()> {
        self.set(
            Address::new(field, repetition, component, subcomponent)?,
            value,
        );
        Ok(())
    }

    /// Writes a simple value into the first repetition of `field`.
    pub fn set_field(&mut self, field: usize, value: impl Into<String>) -> Hl7Result<()> {
        self.set(Address::field(field)?, value);
        Ok(())
    }

    /// Writes `value` at a location spec such as `15(1)-4` or `OBR-19-4`.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::InvalidAddress`] if the location does not parse or names a different
    /// segment.
    pub fn set_path(&mut self, spec: &str, value: impl Into<String>) -> Hl7Result<()> {
        let (segment, address) = Address::parse_spec(spec)?;
        if let Some(name) = segment {
            if name != self.name {
                return Err(Hl7Error::InvalidAddress(format!(
                    "'{spec}' addresses {name}, not {}",
                    self.name
                )));
            }
        }
        self.set(address, value);
        Ok(())
    }

    /// Value at `address`, or `None` if unset or empty.
    pub fn get(&self, address: Address) -> Option<&str> {
        self.repetition(address.field_index(), address.repetition())?
            .get(address.component(), address.subcomponent())
    }

    /// Value at an explicit position; zero indices simply yield `None`.
    pub fn get_at(
        &self,
        field: usize,
        repetition: usize,
        component: usize,
        subcomponent: usize,
    ) -> Option<&str> {
        self.get(Address::new(field, repetition, component, subcomponent).ok()?)
    }

    pub fn repetition(&self, field: usize, repetition: usize) -> Option<&Repetition> {
        self.fields.get(field.checked_sub(1)?)?.get(repetition)
    }

    /// Number of non-empty repetitions of `field`.
    pub fn repetition_count(&self, field: usize) -> usize {
        field
            .checked_sub(1)
            .and_then(|index| self.fields.get(index))
            .map_or(0, |reps| reps.iter().filter(|r| !r.is_empty()).count())
    }

    /// Replaces a whole field repetition, typically with a verbatim copy from another segment.
    pub fn set_repetition(
        &mut self,
        field: usize,
        repetition: usize,
        value: Repetition,
    ) -> Hl7Result<()> {
        Address::field(field)?;
        *self.repetition_mut(field, repetition) = value;
        Ok(())
    }

    /// Opens a composite write slot over one field repetition.
    pub fn composite(&mut self, field: usize, repetition: usize) -> Hl7Result<Composite<'_>> {
        Address::field(field)?;
        Ok(Composite::new(self, field, repetition))
    }

    fn repetition_mut(&mut self, field: usize, repetition: usize) -> &mut Repetition {
        let field_index = field - 1;
        if self.fields.len() <= field_index {
            self.fields.resize_with(field_index + 1, Vec::new);
        }
        let reps = &mut self.fields[field_index];
        if reps.len() <= repetition {
            reps.resize_with(repetition + 1, Repetition::default);
        }
        &mut reps[repetition]
    }

    /// Encodes this segment without its terminator.
    ///
    /// For the message header, MSH-1 and MSH-2 are the delimiters themselves and are emitted
    /// raw; every other value is escaped.
    pub fn encode(&self, delimiters: &Delimiters) -> String {
        let mut out = String::from(self.name.as_str());
        let first_field = if self.name.is_header() {
            out.push(delimiters.field);
            out.push_str(&delimiters.encoding_characters());
            3
        } else {
            1
        };

        let encoded: Vec<String> = self
            .fields
            .iter()
            .skip(first_field - 1)
            .map(|reps| {
                let reps: Vec<String> = reps.iter().map(|r| r.encode(delimiters)).collect();
                join_trimmed(reps.iter().map(String::as_str), delimiters.repetition)
            })
            .collect();

        let keep = encoded
            .iter()
            .rposition(|f| !f.is_empty())
            .map_or(0, |last| last + 1);
        for field in &encoded[..keep] {
            out.push(delimiters.field);
            out.push_str(field);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode(segment: &Segment) -> String {
        segment.encode(&Delimiters::default())
    }

    #[test]
    fn segment_name_validation() {
        assert!(SegmentName::parse("PID").is_ok());
        assert!(SegmentName::parse("ZDS").unwrap().is_custom());
        assert!(SegmentName::parse("PV1").is_ok());
        assert!(SegmentName::parse("pid").is_err());
        assert!(SegmentName::parse("PIDX").is_err());
        assert!(SegmentName::parse("1AB").is_err());
    }

    #[test]
    fn encodes_components_and_subcomponents() {
        let mut segment = Segment::new("OBX").unwrap();
        segment.set_field(1, "2").unwrap();
        segment.set_at(3, 0, 1, 2, "GDT").unwrap();
        segment.set_field(4, "1").unwrap();
        assert_eq!(encode(&segment), "OBX|2||&GDT|1");
    }

    #[test]
    fn trims_trailing_empties_but_keeps_gaps() {
        let mut segment = Segment::new("OBR").unwrap();
        segment.set_field(19, "ABC RAD DX").unwrap();
        segment.set_path("OBR-19-4", "ABC").unwrap();
        segment.set_at(20, 0, 6, 1, "").unwrap();
        assert_eq!(
            encode(&segment),
            "OBR|||||||||||||||||||ABC RAD DX^^^ABC"
        );
    }

    #[test]
    fn encodes_repetitions() {
        let mut segment = Segment::new("PID").unwrap();
        segment.set_at(3, 0, 1, 1, "EPIC1").unwrap();
        segment.set_at(3, 1, 1, 1, "ABC2").unwrap();
        assert_eq!(encode(&segment), "PID|||EPIC1~ABC2");
        assert_eq!(segment.repetition_count(3), 2);
    }

    #[test]
    fn header_emits_delimiters_raw() {
        let mut segment = Segment::new("MSH").unwrap();
        segment.set_field(1, "|").unwrap();
        segment.set_field(2, "^~\\&").unwrap();
        segment.set_field(3, "SOMERIS").unwrap();
        assert_eq!(encode(&segment), "MSH|^~\\&|SOMERIS");
    }

    #[test]
    fn escapes_values() {
        let mut segment = Segment::new("NTE").unwrap();
        segment.set_field(3, "A^B").unwrap();
        assert_eq!(encode(&segment), "NTE|||A\\S\\B");
    }

    #[test]
    fn set_path_rejects_other_segment() {
        let mut segment = Segment::new("OBR").unwrap();
        let err = segment.set_path("ORC-7-4", "x").unwrap_err();
        assert!(matches!(err, Hl7Error::InvalidAddress(_)));
    }

    #[test]
    fn copies_repetition_verbatim() {
        let mut source = Segment::new("ORC").unwrap();
        source.set_at(2, 0, 1, 1, "123").unwrap();
        source.set_at(2, 0, 2, 1, "SYS").unwrap();

        let mut target = Segment::new("OBR").unwrap();
        target
            .set_repetition(2, 0, source.repetition(2, 0).cloned().unwrap())
            .unwrap();
        assert_eq!(target.get_at(2, 0, 2, 1), Some("SYS"));
        assert_eq!(encode(&target), "OBR||123^SYS");
    }

    #[test]
    fn get_returns_none_for_missing_or_zero() {
        let segment = Segment::new("PV1").unwrap();
        assert_eq!(segment.get_at(2, 0, 1, 1), None);
        assert_eq!(segment.get_at(0, 0, 1, 1), None);
    }
}
