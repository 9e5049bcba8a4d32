//! HL7 timestamp formatting.

use chrono::{Days, Local, NaiveDate, NaiveDateTime};
use rand::Rng;

const HL7_DATETIME_FORMAT: &str = "%Y%m%d%H%M%S";
const HL7_DATE_FORMAT: &str = "%Y%m%d";

/// Width of the birth-date window, in days (100 years).
const BIRTH_DATE_WINDOW_DAYS: u64 = 36_525;

pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub fn hl7_datetime(timestamp: NaiveDateTime) -> String {
    timestamp.format(HL7_DATETIME_FORMAT).to_string()
}

pub fn hl7_date(date: NaiveDate) -> String {
    date.format(HL7_DATE_FORMAT).to_string()
}

pub fn hl7_datetime_now() -> String {
    hl7_datetime(now())
}

/// A birth date drawn uniformly from the hundred years starting 1900-01-01.
pub fn random_birth_date<R: Rng + ?Sized>(rng: &mut R) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1900, 1, 1)?;
    epoch.checked_add_days(Days::new(rng.gen_range(0..BIRTH_DATE_WINDOW_DAYS)))
}
