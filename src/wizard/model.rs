//! Wizard data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::countries::{self, Country};

use super::state::{Step, SubStep};

/// Input fields that can carry an inline error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Firstname,
    Lastname,
    PhoneNumber,
}

impl Field {
    /// Human label used in messages, e.g. "First name".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Firstname => "First name",
            Self::Lastname => "Last name",
            Self::PhoneNumber => "Phone number",
        }
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Firstname => write!(f, "firstname"),
            Self::Lastname => write!(f, "lastname"),
            Self::PhoneNumber => write!(f, "phone_number"),
        }
    }
}

/// Everything the wizard has collected so far, plus where it is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub firstname: String,
    pub lastname: String,
    pub phone_number: String,
    pub country: Country,
    pub step: Step,
    pub sub_step: SubStep,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::with_country(countries::default_country().clone())
    }
}

impl WizardState {
    /// Fresh state with a specific starting country.
    pub fn with_country(country: Country) -> Self {
        Self {
            firstname: String::new(),
            lastname: String::new(),
            phone_number: String::new(),
            country,
            step: Step::default(),
            sub_step: SubStep::default(),
        }
    }
}

/// Partial update merged into the state by `FormStore::set_form_data`.
///
/// `None` leaves the existing value alone. Country is not part of the patch:
/// it only changes through a catalog lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPatch {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub phone_number: Option<String>,
}

impl FormPatch {
    pub fn names(firstname: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            firstname: Some(firstname.into()),
            lastname: Some(lastname.into()),
            ..Default::default()
        }
    }

    pub fn phone_number(phone_number: impl Into<String>) -> Self {
        Self {
            phone_number: Some(phone_number.into()),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.firstname.is_none() && self.lastname.is_none() && self.phone_number.is_none()
    }
}

/// What the confirmation screen shows.
#[derive(Debug, Clone, Serialize)]
pub struct OnboardingSummary {
    pub firstname: String,
    pub lastname: String,
    pub country: Country,
    /// Number as the user typed it.
    pub phone_number: String,
    /// Number in E.164 form, e.g. "+12025550123".
    pub phone_e164: String,
    pub completed_at: DateTime<Utc>,
}

impl OnboardingSummary {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.firstname, self.lastname)
    }
}
