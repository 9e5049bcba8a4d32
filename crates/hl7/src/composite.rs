//! Write slots for composite data types.
//!
//! A composite (an `HD`, `CWE`, `XCN`, ...) is written piece by piece. Where the pieces land
//! depends on where the composite sits:
//!
//! - a composite occupying a whole field writes its pieces into **components**;
//! - a composite nested in a component writes its pieces into **subcomponents**.
//!
//! The wire format has no fourth level, so a composite nested inside a component-level
//! composite cannot be represented and is rejected.

use crate::segment::Segment;
use crate::{Hl7Error, Hl7Result};

/// A field-level or component-level position a composite value is written into.
#[derive(Debug)]
pub struct Composite<'a> {
    segment: &'a mut Segment,
    field: usize,
    repetition: usize,
    component: Option<usize>,
}

impl<'a> Composite<'a> {
    pub(crate) fn new(segment: &'a mut Segment, field: usize, repetition: usize) -> Self {
        Self {
            segment,
            field,
            repetition,
            component: None,
        }
    }

    /// Writes piece `piece` (1-based) of this composite.
    pub fn set(&mut self, piece: usize, value: impl Into<String>) -> Hl7Result<()> {
        match self.component {
            None => self.segment.set_at(self.field, self.repetition, piece, 1, value),
            Some(component) => {
                self.segment
                    .set_at(self.field, self.repetition, component, piece, value)
            }
        }
    }

    /// Writes piece `piece` when a value is present; absent values leave the slot untouched.
    pub fn set_opt(&mut self, piece: usize, value: Option<&str>) -> Hl7Result<()> {
        match value {
            Some(value) => self.set(piece, value),
            None => Ok(()),
        }
    }

    /// Opens the slot for a composite nested at piece `piece` of this one.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7Error::NestingTooDeep`] when this composite already sits at component
    /// level.
    pub fn component(&mut self, piece: usize) -> Hl7Result<Composite<'_>> {
        if let Some(component) = self.component {
            return Err(Hl7Error::NestingTooDeep {
                field: self.field,
                component,
            });
        }
        if piece == 0 {
            return Err(Hl7Error::InvalidAddress(format!(
                "component index is 1-based in field {}",
                self.field
            )));
        }
        Ok(Composite {
            segment: &mut *self.segment,
            field: self.field,
            repetition: self.repetition,
            component: Some(piece),
        })
    }
}
