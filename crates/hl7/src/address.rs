//! Positional addressing within a segment.
//!
//! An [`Address`] names one value slot: field, repetition, component and subcomponent. Field,
//! component and subcomponent are 1-based as in the HL7 standard; repetition is 0-based.
//!
//! Addresses can also be parsed from location specs in the conventional dash notation:
//!
//! ```text
//! 15-4          field 15, first repetition, component 4
//! 15(1)-4       field 15, second repetition, component 4
//! 33-1-2        field 33, component 1, subcomponent 2
//! OBR-19-4      same, with a segment prefix
//! /.OBR-19-4    terser-style prefix is accepted and ignored
//! ```

use crate::segment::SegmentName;
use crate::{Hl7Error, Hl7Result};
use std::fmt;
use std::str::FromStr;

/// A fully-resolved value slot inside a segment.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Address {
    field: usize,
    repetition: usize,
    component: usize,
    subcomponent: usize,
}

impl Address {
    /// Creates an address, rejecting zero field/component/subcomponent indices.
    pub fn new(
        field: usize,
        repetition: usize,
        component: usize,
        subcomponent: usize,
    ) -> Hl7Result<Self> {
        if field == 0 || component == 0 || subcomponent == 0 {
            return Err(Hl7Error::InvalidAddress(format!(
                "field, component and subcomponent are 1-based (got {field}({repetition})-{component}-{subcomponent})"
            )));
        }
        Ok(Self {
            field,
            repetition,
            component,
            subcomponent,
        })
    }

    /// First component and subcomponent of the first repetition of `field`.
    pub fn field(field: usize) -> Hl7Result<Self> {
        Self::new(field, 0, 1, 1)
    }

    pub fn field_index(&self) -> usize {
        self.field
    }

    pub fn repetition(&self) -> usize {
        self.repetition
    }

    pub fn component(&self) -> usize {
        self.component
    }

    pub fn subcomponent(&self) -> usize {
        self.subcomponent
    }

    /// Parses a location spec that may carry a segment prefix.
    ///
    /// Returns the segment name when one was given so callers can check it against the
    /// segment they are writing to.
    pub fn parse_spec(spec: &str) -> Hl7Result<(Option<SegmentName>, Self)> {
        let trimmed = spec.trim();
        let trimmed = trimmed.strip_prefix("/.").unwrap_or(trimmed);
        let mut parts = trimmed.split('-').peekable();

        let mut segment = None;
        if let Some(first) = parts.peek() {
            if first.chars().next().is_some_and(|c| c.is_ascii_alphabetic()) {
                segment = Some(SegmentName::parse(first)?);
                parts.next();
            }
        }

        let field_part = parts
            .next()
            .filter(|p| !p.is_empty())
            .ok_or_else(|| Hl7Error::InvalidAddress(format!("missing field in '{spec}'")))?;
        let (field, repetition) = parse_field_part(field_part, spec)?;

        let component = match parts.next() {
            Some(p) => parse_index(p, spec)?,
            None => 1,
        };
        let subcomponent = match parts.next() {
            Some(p) => parse_index(p, spec)?,
            None => 1,
        };
        if parts.next().is_some() {
            return Err(Hl7Error::InvalidAddress(format!(
                "too many levels in '{spec}'"
            )));
        }

        Ok((segment, Self::new(field, repetition, component, subcomponent)?))
    }
}

fn parse_index(part: &str, spec: &str) -> Hl7Result<usize> {
    part.parse::<usize>()
        .map_err(|_| Hl7Error::InvalidAddress(format!("'{part}' is not an index in '{spec}'")))
}

fn parse_field_part(part: &str, spec: &str) -> Hl7Result<(usize, usize)> {
    match part.find('(') {
        Some(open) => {
            let inner = part[open + 1..].strip_suffix(')').ok_or_else(|| {
                Hl7Error::InvalidAddress(format!("unterminated repetition in '{spec}'"))
            })?;
            Ok((parse_index(&part[..open], spec)?, parse_index(inner, spec)?))
        }
        None => Ok((parse_index(part, spec)?, 0)),
    }
}

impl FromStr for Address {
    type Err = Hl7Error;

    /// Parses a bare location spec (no segment prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::parse_spec(s)? {
            (None, address) => Ok(address),
            (Some(name), _) => Err(Hl7Error::InvalidAddress(format!(
                "unexpected segment prefix {name} in '{s}'"
            ))),
        }
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({})-{}-{}",
            self.field, self.repetition, self.component, self.subcomponent
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_field_and_component() {
        let address: Address = "15-4".parse().expect("valid spec");
        assert_eq!(address, Address::new(15, 0, 4, 1).unwrap());
    }

    #[test]
    fn parses_repetition() {
        let address: Address = "15(1)-4".parse().expect("valid spec");
        assert_eq!(address.repetition(), 1);
        assert_eq!(address.component(), 4);
    }

    #[test]
    fn parses_segment_prefix_and_terser_root() {
        let (segment, address) = Address::parse_spec("/.OBR-19-4").expect("valid spec");
        assert_eq!(segment.map(|s| s.to_string()).as_deref(), Some("OBR"));
        assert_eq!(address, Address::new(19, 0, 4, 1).unwrap());
    }

    #[test]
    fn parses_subcomponent() {
        let address: Address = "33-1-2".parse().expect("valid spec");
        assert_eq!(address.subcomponent(), 2);
    }

    #[test]
    fn rejects_zero_and_garbage() {
        assert!("0-1".parse::<Address>().is_err());
        assert!("3-0".parse::<Address>().is_err());
        assert!("3(x)".parse::<Address>().is_err());
        assert!("3(1".parse::<Address>().is_err());
        assert!("1-2-3-4".parse::<Address>().is_err());
        assert!("".parse::<Address>().is_err());
        assert!("OBR-4".parse::<Address>().is_err());
    }
}
