//! Process-wide reference people.
//!
//! Each person is built once, on first use, with a random staff number, and is read-only
//! afterwards. Every message generated by the process therefore names the same doctors,
//! radiologist and order enterer.

use crate::constants::{DEFAULT_ID_DIGITS, HOSPITAL_STAFF_TYPE_CODE, MAIN_HOSPITAL};
use crate::model::{HierarchicDesignator, Person};
use crate::random::random_id;
use std::sync::LazyLock;

fn staff_id(prefix: char) -> String {
    format!("{prefix}{}", random_id(&mut rand::thread_rng(), DEFAULT_ID_DIGITS))
}

fn hospital_doctor(surname: &str, given_name: &str, second_name_etc: &str) -> Person {
    Person {
        person_identifier: Some(staff_id('D')),
        assigning_authority: Some(HierarchicDesignator::simple(MAIN_HOSPITAL)),
        identifier_type_code: Some(HOSPITAL_STAFF_TYPE_CODE.to_owned()),
        ..Person::named(surname, given_name, second_name_etc)
    }
}

/// Attending doctor pool, in PV1-7 order.
pub static ATTENDING_DOCTORS: LazyLock<[Person; 2]> = LazyLock::new(|| {
    [
        hospital_doctor("CURIE", "MARIE", "S"),
        hospital_doctor("ROENTGEN", "WILHELM", "CONRAD"),
    ]
});

/// The radiologist interpreting every study.
pub static RADIOLOGIST: LazyLock<Person> = LazyLock::new(|| Person {
    person_identifier: Some(staff_id('D')),
    assigning_authority: Some(HierarchicDesignator::simple(MAIN_HOSPITAL)),
    ..Person::named("DOC", "THAT", "Q")
});

/// The technologist entering every order. Carries no assigning authority.
pub static ENTERED_BY: LazyLock<Person> = LazyLock::new(|| Person {
    person_identifier: Some(staff_id('T')),
    ..Person::named("EXAMPLE", "PERSON", "O.")
});

pub static ORDERING_PROVIDER: LazyLock<Person> =
    LazyLock::new(|| hospital_doctor("HOUNSFIELD", "GODFREY", "N"));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_are_stable_across_reads() {
        let first = ATTENDING_DOCTORS[0].person_identifier().map(str::to_owned);
        assert_eq!(ATTENDING_DOCTORS[0].person_identifier(), first.as_deref());
        assert!(first.unwrap().starts_with('D'));
    }

    #[test]
    fn order_enterer_has_no_authority() {
        assert!(ENTERED_BY.assigning_authority.is_none());
        assert!(ENTERED_BY.person_identifier().unwrap().starts_with('T'));
        assert_eq!(RADIOLOGIST.display_name(), "THAT DOC");
    }
}
