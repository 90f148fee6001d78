//! Field validators for the name and phone screens.
//!
//! All validators are pure: they take the raw input (and the country for the
//! phone number) and return either the accepted value or a `ValidationError`
//! carrying the inline message for that field.

use std::sync::LazyLock;

use phonenumber::country;
use regex::Regex;
use serde::Serialize;

use crate::error::ValidationError;

use super::model::Field;

/// Minimum number of characters in a first or last name.
pub const NAME_MIN_LEN: usize = 3;

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z ]+$").expect("name pattern is valid"));

/// Validate a first or last name.
///
/// Length is checked before the character class, so an empty string reports
/// "required" rather than "letters and spaces". The accepted value is returned
/// exactly as entered.
pub fn validate_name(field: Field, input: &str) -> Result<&str, ValidationError> {
    if input.chars().count() < NAME_MIN_LEN {
        return Err(ValidationError::MissingField {
            field,
            message: format!("{} is required", field.label()),
        });
    }
    if !NAME_PATTERN.is_match(input) {
        return Err(ValidationError::InvalidCharacters {
            field,
            message: format!("{} can only contain letters and spaces", field.label()),
        });
    }
    Ok(input)
}

/// Validate both name fields, collecting every failure.
pub fn validate_names(firstname: &str, lastname: &str) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = [
        validate_name(Field::Firstname, firstname).err(),
        validate_name(Field::Lastname, lastname).err(),
    ]
    .into_iter()
    .flatten()
    .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

/// A phone number accepted for a given country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedNumber {
    /// Input as typed.
    pub raw: String,
    /// E.164 rendering, e.g. "+442079460958".
    pub e164: String,
    /// Country the number was validated against.
    pub country_code: String,
}

/// Validate a phone number against a country's numbering plan.
///
/// `country_code` is the ISO 3166-1 alpha-2 code used as the default region
/// when the input has no international prefix. Empty input fails before the
/// parser is consulted.
pub fn validate_phone(raw: &str, country_code: &str) -> Result<NormalizedNumber, ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::MissingField {
            field: Field::PhoneNumber,
            message: "Phone number is required".to_string(),
        });
    }

    let invalid = || ValidationError::InvalidPhoneNumber {
        field: Field::PhoneNumber,
        message: "Invalid phone number".to_string(),
    };

    let region: country::Id = country_code
        .to_ascii_uppercase()
        .parse()
        .map_err(|_| invalid())?;
    let number = phonenumber::parse(Some(region), raw).map_err(|_| invalid())?;
    if !phonenumber::is_valid(&number) {
        return Err(invalid());
    }

    Ok(NormalizedNumber {
        raw: raw.to_string(),
        e164: number.format().mode(phonenumber::Mode::E164).to_string(),
        country_code: country_code.to_ascii_uppercase(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_names_are_missing() {
        for input in ["", "a", "Al"] {
            let err = validate_name(Field::Firstname, input).unwrap_err();
            assert!(matches!(err, ValidationError::MissingField { .. }), "{input:?}");
            assert_eq!(err.message(), "First name is required");
        }
    }

    #[test]
    fn empty_fails_length_before_pattern() {
        let err = validate_name(Field::Lastname, "").unwrap_err();
        assert_eq!(err.message(), "Last name is required");
    }

    #[test]
    fn bad_characters_rejected() {
        for input in ["Jane2", "O'Brien", "Anne-Marie", "Zoë", "Jane\t", "bob!"] {
            let err = validate_name(Field::Lastname, input).unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidCharacters { field: Field::Lastname, .. }),
                "{input:?} should be rejected"
            );
            assert_eq!(err.message(), "Last name can only contain letters and spaces");
        }
    }

    #[test]
    fn short_name_with_bad_characters_reports_length() {
        let err = validate_name(Field::Firstname, "1!").unwrap_err();
        assert!(matches!(err, ValidationError::MissingField { .. }));
    }

    #[test]
    fn valid_names_preserved_verbatim() {
        for input in ["Jane", "Doe", "Mary Ann", "  abc  ", "ALL CAPS", "   "] {
            assert_eq!(validate_name(Field::Firstname, input).unwrap(), input);
        }
    }

    #[test]
    fn validate_names_collects_both_errors() {
        let errors = validate_names("J", "D0e").unwrap_err();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field(), Field::Firstname);
        assert_eq!(errors[1].field(), Field::Lastname);
        assert!(validate_names("Jane", "Doe").is_ok());
    }

    #[test]
    fn empty_phone_is_required_for_every_country() {
        for code in ["GB", "US", "IE", "AU", "AF", "DZ", "MK", "not-a-country"] {
            let err = validate_phone("", code).unwrap_err();
            assert!(matches!(err, ValidationError::MissingField { field: Field::PhoneNumber, .. }));
            assert_eq!(err.message(), "Phone number is required");
        }
    }

    #[test]
    fn us_number_accepted() {
        let number = validate_phone("2025550123", "US").unwrap();
        assert_eq!(number.e164, "+12025550123");
        assert_eq!(number.raw, "2025550123");
        assert_eq!(number.country_code, "US");
    }

    #[test]
    fn outcome_depends_on_country() {
        let gb = validate_phone("020 7946 0958", "GB").unwrap();
        assert_eq!(gb.e164, "+442079460958");

        let err = validate_phone("020 7946 0958", "US").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
        assert_eq!(err.message(), "Invalid phone number");
    }

    #[test]
    fn garbage_rejected() {
        for input in ["abc", "123", "   "] {
            assert!(validate_phone(input, "GB").is_err(), "{input:?}");
        }
    }

    #[test]
    fn unknown_region_rejected() {
        let err = validate_phone("2025550123", "ZZ").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidPhoneNumber { .. }));
    }

    #[test]
    fn lowercase_region_accepted() {
        assert!(validate_phone("2025550123", "us").is_ok());
    }
}
