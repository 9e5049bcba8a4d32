use hl7::{Composite, Hl7Result};

/// An assigning authority or facility (`HD`): namespace, universal id and its type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HierarchicDesignator {
    pub namespace_id: Option<String>,
    pub universal_id: Option<String>,
    pub universal_id_type: Option<String>,
}

impl HierarchicDesignator {
    /// The common case: a designator carrying only a namespace id.
    pub fn simple(namespace_id: impl Into<String>) -> Self {
        Self {
            namespace_id: Some(namespace_id.into()),
            ..Self::default()
        }
    }

    pub fn namespace_id(&self) -> Option<&str> {
        self.namespace_id.as_deref()
    }

    pub fn to_hd(&self, slot: &mut Composite<'_>) -> Hl7Result<()> {
        slot.set_opt(1, self.namespace_id.as_deref())?;
        slot.set_opt(2, self.universal_id.as_deref())?;
        slot.set_opt(3, self.universal_id_type.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7::Segment;

    #[test]
    fn nested_designator_lands_in_subcomponents() {
        let authority = HierarchicDesignator {
            namespace_id: Some("ABC".into()),
            universal_id: Some("1.2.3".into()),
            universal_id_type: Some("ISO".into()),
        };
        let mut pid = Segment::new("PID").unwrap();
        authority
            .to_hd(&mut pid.composite(3, 0).unwrap().component(4).unwrap())
            .unwrap();
        assert_eq!(pid.get_at(3, 0, 4, 1), Some("ABC"));
        assert_eq!(pid.get_at(3, 0, 4, 3), Some("ISO"));
    }
}
