use super::{CodedValue, FamilyName, HierarchicDesignator};
use hl7::{Composite, Hl7Result};

/// A person as written into name (`XPN`) and identity (`XCN`) fields.
///
/// Only the attributes a generator sets are written; everything else stays empty on the wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Person {
    pub family_name: Option<FamilyName>,
    pub given_name: Option<String>,
    pub second_name_etc: Option<String>,
    pub suffix: Option<String>,
    pub prefix: Option<String>,
    pub degree: Option<String>,
    pub name_type_code: Option<String>,
    pub name_representation_code: Option<String>,
    pub name_context: Option<CodedValue>,
    pub name_validity_range: Option<String>,
    pub name_assembly_order: Option<String>,
    pub effective_date: Option<String>,
    pub expiration_date: Option<String>,
    pub professional_suffix: Option<String>,
    pub called_by: Option<String>,
    pub person_identifier: Option<String>,
    pub source_table: Option<CodedValue>,
    pub assigning_authority: Option<HierarchicDesignator>,
    pub identifier_check_digit: Option<String>,
    pub check_digit_scheme: Option<String>,
    pub identifier_type_code: Option<String>,
    pub assigning_facility: Option<HierarchicDesignator>,
    pub assigning_jurisdiction: Option<CodedValue>,
    pub assigning_agency_or_department: Option<CodedValue>,
    pub security_check: Option<String>,
    pub security_check_scheme: Option<String>,
}

impl Person {
    /// A person with a simple surname, given name and middle name or initial.
    pub fn named(surname: &str, given_name: &str, second_name_etc: &str) -> Self {
        Self {
            family_name: Some(FamilyName::simple(surname)),
            given_name: Some(given_name.to_owned()),
            second_name_etc: Some(second_name_etc.to_owned()),
            ..Self::default()
        }
    }

    pub fn surname(&self) -> Option<&str> {
        self.family_name.as_ref().and_then(FamilyName::surname)
    }

    pub fn given_name(&self) -> Option<&str> {
        self.given_name.as_deref()
    }

    pub fn person_identifier(&self) -> Option<&str> {
        self.person_identifier.as_deref()
    }

    /// "Given Surname", as used when signing a report.
    pub fn display_name(&self) -> String {
        [self.given_name(), self.surname()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Writes the simple name projection.
    pub fn to_xpn(&self, slot: &mut Composite<'_>) -> Hl7Result<()> {
        if let Some(family_name) = &self.family_name {
            family_name.to_fn(&mut slot.component(1)?)?;
        }
        slot.set_opt(2, self.given_name.as_deref())?;
        slot.set_opt(3, self.second_name_etc.as_deref())?;
        slot.set_opt(4, self.suffix.as_deref())?;
        slot.set_opt(5, self.prefix.as_deref())?;
        slot.set_opt(6, self.degree.as_deref())?;
        slot.set_opt(7, self.name_type_code.as_deref())?;
        slot.set_opt(8, self.name_representation_code.as_deref())?;
        if let Some(context) = &self.name_context {
            context.to_cwe(&mut slot.component(9)?)?;
        }
        slot.set_opt(10, self.name_validity_range.as_deref())?;
        slot.set_opt(11, self.name_assembly_order.as_deref())?;
        slot.set_opt(12, self.effective_date.as_deref())?;
        slot.set_opt(13, self.expiration_date.as_deref())?;
        slot.set_opt(14, self.professional_suffix.as_deref())?;
        slot.set_opt(15, self.called_by.as_deref())
    }

    /// Writes the extended identity projection: name, identifier, authorities and codes.
    pub fn to_xcn(&self, slot: &mut Composite<'_>) -> Hl7Result<()> {
        slot.set_opt(1, self.person_identifier.as_deref())?;
        if let Some(family_name) = &self.family_name {
            family_name.to_fn(&mut slot.component(2)?)?;
        }
        slot.set_opt(3, self.given_name.as_deref())?;
        slot.set_opt(4, self.second_name_etc.as_deref())?;
        slot.set_opt(5, self.suffix.as_deref())?;
        slot.set_opt(6, self.prefix.as_deref())?;
        slot.set_opt(7, self.degree.as_deref())?;
        if let Some(table) = &self.source_table {
            table.to_cwe(&mut slot.component(8)?)?;
        }
        if let Some(authority) = &self.assigning_authority {
            authority.to_hd(&mut slot.component(9)?)?;
        }
        slot.set_opt(10, self.name_type_code.as_deref())?;
        slot.set_opt(11, self.identifier_check_digit.as_deref())?;
        slot.set_opt(12, self.check_digit_scheme.as_deref())?;
        slot.set_opt(13, self.identifier_type_code.as_deref())?;
        if let Some(facility) = &self.assigning_facility {
            facility.to_hd(&mut slot.component(14)?)?;
        }
        slot.set_opt(15, self.name_representation_code.as_deref())?;
        if let Some(context) = &self.name_context {
            context.to_cwe(&mut slot.component(16)?)?;
        }
        slot.set_opt(17, self.name_validity_range.as_deref())?;
        slot.set_opt(18, self.name_assembly_order.as_deref())?;
        slot.set_opt(19, self.effective_date.as_deref())?;
        slot.set_opt(20, self.expiration_date.as_deref())?;
        slot.set_opt(21, self.professional_suffix.as_deref())?;
        if let Some(jurisdiction) = &self.assigning_jurisdiction {
            jurisdiction.to_cwe(&mut slot.component(22)?)?;
        }
        if let Some(agency) = &self.assigning_agency_or_department {
            agency.to_cwe(&mut slot.component(23)?)?;
        }
        slot.set_opt(24, self.security_check.as_deref())?;
        slot.set_opt(25, self.security_check_scheme.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7::{Delimiters, Segment};

    fn curie() -> Person {
        Person {
            person_identifier: Some("D42".into()),
            assigning_authority: Some(HierarchicDesignator::simple("ABC")),
            identifier_type_code: Some("HOSP".into()),
            ..Person::named("CURIE", "MARIE", "S")
        }
    }

    #[test]
    fn xcn_projection() {
        let mut pv1 = Segment::new("PV1").unwrap();
        curie().to_xcn(&mut pv1.composite(7, 0).unwrap()).unwrap();
        assert_eq!(
            pv1.encode(&Delimiters::default()),
            "PV1|||||||D42^CURIE^MARIE^S^^^^^ABC^^^^HOSP"
        );
    }

    #[test]
    fn xpn_projection() {
        let patient = Person {
            name_type_code: Some("D".into()),
            ..Person::named("SMITH", "JOHN", "J")
        };
        let mut pid = Segment::new("PID").unwrap();
        patient.to_xpn(&mut pid.composite(5, 0).unwrap()).unwrap();
        assert_eq!(
            pid.encode(&Delimiters::default()),
            "PID|||||SMITH^JOHN^J^^^^D"
        );
    }

    #[test]
    fn display_name_is_given_then_surname() {
        assert_eq!(curie().display_name(), "MARIE CURIE");
        assert_eq!(Person::default().display_name(), "");
    }

    #[test]
    fn xcn_below_component_level_is_rejected() {
        let mut obr = Segment::new("OBR").unwrap();
        let mut field = obr.composite(33, 0).unwrap();
        let err = curie().to_xcn(&mut field.component(1).unwrap()).unwrap_err();
        assert!(matches!(err, hl7::Hl7Error::NestingTooDeep { .. }));
    }
}
