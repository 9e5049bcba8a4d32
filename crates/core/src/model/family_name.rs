use hl7::{Composite, Hl7Result};

/// A structured family name (`FN`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FamilyName {
    pub surname: Option<String>,
    pub own_surname_prefix: Option<String>,
    pub own_surname: Option<String>,
    pub surname_prefix_from_partner: Option<String>,
    pub surname_from_partner: Option<String>,
}

impl FamilyName {
    pub fn simple(surname: impl Into<String>) -> Self {
        Self {
            surname: Some(surname.into()),
            ..Self::default()
        }
    }

    pub fn surname(&self) -> Option<&str> {
        self.surname.as_deref()
    }

    pub fn to_fn(&self, slot: &mut Composite<'_>) -> Hl7Result<()> {
        slot.set_opt(1, self.surname.as_deref())?;
        slot.set_opt(2, self.own_surname_prefix.as_deref())?;
        slot.set_opt(3, self.own_surname.as_deref())?;
        slot.set_opt(4, self.surname_prefix_from_partner.as_deref())?;
        slot.set_opt(5, self.surname_from_partner.as_deref())
    }
}
