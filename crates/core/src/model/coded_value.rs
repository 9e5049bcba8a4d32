use hl7::{Composite, Hl7Result};

/// A coded concept (`CWE`): a primary coding plus an alternate and a second alternate, each
/// with identifier, text, coding system, version and OIDs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CodedValue {
    pub identifier: Option<String>,
    pub text: Option<String>,
    pub name_of_coding_system: Option<String>,
    pub alternate_identifier: Option<String>,
    pub alternate_text: Option<String>,
    pub name_of_alternate_coding_system: Option<String>,
    pub coding_system_version_id: Option<String>,
    pub alternate_coding_system_version_id: Option<String>,
    pub original_text: Option<String>,
    pub second_alternate_identifier: Option<String>,
    pub second_alternate_text: Option<String>,
    pub name_of_second_alternate_coding_system: Option<String>,
    pub second_alternate_coding_system_version_id: Option<String>,
    pub coding_system_oid: Option<String>,
    pub value_set_oid: Option<String>,
    pub value_set_version_id: Option<String>,
    pub alternate_coding_system_oid: Option<String>,
    pub alternate_value_set_oid: Option<String>,
    pub alternate_value_set_version_id: Option<String>,
    pub second_alternate_coding_system_oid: Option<String>,
    pub second_alternate_value_set_oid: Option<String>,
    pub second_alternate_value_set_version_id: Option<String>,
}

impl CodedValue {
    /// A concept carrying only its identifier.
    pub fn identifier(identifier: impl Into<String>) -> Self {
        Self {
            identifier: Some(identifier.into()),
            ..Self::default()
        }
    }

    pub fn to_cwe(&self, slot: &mut Composite<'_>) -> Hl7Result<()> {
        let pieces = [
            &self.identifier,
            &self.text,
            &self.name_of_coding_system,
            &self.alternate_identifier,
            &self.alternate_text,
            &self.name_of_alternate_coding_system,
            &self.coding_system_version_id,
            &self.alternate_coding_system_version_id,
            &self.original_text,
            &self.second_alternate_identifier,
            &self.second_alternate_text,
            &self.name_of_second_alternate_coding_system,
            &self.second_alternate_coding_system_version_id,
            &self.coding_system_oid,
            &self.value_set_oid,
            &self.value_set_version_id,
            &self.alternate_coding_system_oid,
            &self.alternate_value_set_oid,
            &self.alternate_value_set_version_id,
            &self.second_alternate_coding_system_oid,
            &self.second_alternate_value_set_oid,
            &self.second_alternate_value_set_version_id,
        ];
        for (index, value) in pieces.into_iter().enumerate() {
            slot.set_opt(index + 1, value.as_deref())?;
        }
        Ok(())
    }
}
