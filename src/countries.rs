//! Fixed country catalog used by the phone screen.

use std::sync::LazyLock;

use serde::Serialize;

use crate::error::ConfigError;

/// A selectable country.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, e.g. "GB".
    pub code: String,
    pub name: String,
    /// International dialling prefix, e.g. "+44".
    pub dial_code: String,
    /// Display glyph.
    pub flag: String,
}

impl Country {
    fn new(code: &str, name: &str, dial_code: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            dial_code: dial_code.to_string(),
            flag: flag.to_string(),
        }
    }
}

impl std::fmt::Display for Country {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.flag, self.dial_code, self.name)
    }
}

/// Country selected when nothing else has been chosen.
pub const DEFAULT_COUNTRY_CODE: &str = "GB";

static CATALOG: LazyLock<Vec<Country>> = LazyLock::new(|| {
    vec![
        Country::new("GB", "United Kingdom", "+44", "🇬🇧"),
        Country::new("IE", "Ireland", "+353", "🇮🇪"),
        Country::new("US", "United States", "+1", "🇺🇸"),
        Country::new("AU", "Australia", "+61", "🇦🇺"),
        Country::new("AF", "Afghanistan", "+93", "🇦🇫"),
        Country::new("DZ", "Algeria", "+213", "🇩🇿"),
        Country::new("MK", "Macedonia", "+389", "🇲🇰"),
    ]
});

/// The whole catalog, in display order.
pub fn catalog() -> &'static [Country] {
    &CATALOG
}

/// Look up a catalog entry by code (case-insensitive).
pub fn find(code: &str) -> Result<&'static Country, ConfigError> {
    catalog()
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
        .ok_or_else(|| ConfigError::UnknownCountry(code.to_string()))
}

/// The default country entry.
pub fn default_country() -> &'static Country {
    &catalog()[0]
}

/// Case-insensitive substring match on the country name.
///
/// An empty query matches the whole catalog.
pub fn filter(query: &str) -> Vec<&'static Country> {
    let needle = query.to_lowercase();
    catalog()
        .iter()
        .filter(|c| c.name.to_lowercase().contains(&needle))
        .collect()
}
