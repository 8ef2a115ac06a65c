use crate::constants::DEFAULT_FOUNDED_YEAR;

/// Primary and alternate phone numbers taken from a contact string
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhoneNumbers {
    pub primary: String,
    pub alternate: String,
}

/// Split a slash-delimited contact string. Blank segments are skipped;
/// anything past the second number is dropped.
pub fn split_phone_numbers(contact: &str) -> PhoneNumbers {
    let mut phones = contact
        .split('/')
        .map(str::trim)
        .filter(|p| !p.is_empty());

    PhoneNumbers {
        primary: phones.next().unwrap_or_default().to_string(),
        alternate: phones.next().unwrap_or_default().to_string(),
    }
}

/// Founding year from the trailing `-` token of a registration number.
/// Absent or unparseable numbers give the default year.
pub fn extract_founded_year(registration_number: Option<&str>) -> i32 {
    registration_number
        .filter(|r| !r.is_empty())
        .and_then(|r| r.rsplit('-').next())
        .and_then(|token| token.trim().parse::<i32>().ok())
        .unwrap_or(DEFAULT_FOUNDED_YEAR)
}
