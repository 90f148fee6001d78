//! Configuration types.

use crate::countries::{self, DEFAULT_COUNTRY_CODE};
use crate::error::ConfigError;

/// How the confirmation summary is printed by the terminal front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::InvalidValue {
                key: "ONBOARDING_OUTPUT".to_string(),
                message: format!("expected 'text' or 'json', got '{other}'"),
            }),
        }
    }
}

/// Wizard configuration.
#[derive(Debug, Clone)]
pub struct WizardConfig {
    /// Catalog code of the country selected on the phone screen at start.
    pub default_country: String,
    /// Summary output format.
    pub output: OutputFormat,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            default_country: DEFAULT_COUNTRY_CODE.to_string(),
            output: OutputFormat::default(),
        }
    }
}

impl WizardConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// - `ONBOARDING_DEFAULT_COUNTRY`: catalog code, e.g. `US`
    /// - `ONBOARDING_OUTPUT`: `text` or `json`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(code) = lookup("ONBOARDING_DEFAULT_COUNTRY").filter(|s| !s.trim().is_empty()) {
            let country = countries::find(code.trim()).map_err(|_| ConfigError::InvalidValue {
                key: "ONBOARDING_DEFAULT_COUNTRY".to_string(),
                message: format!("'{code}' is not a known country code"),
            })?;
            config.default_country = country.code.clone();
        }

        if let Some(output) = lookup("ONBOARDING_OUTPUT").filter(|s| !s.trim().is_empty()) {
            config.output = output.parse()?;
        }

        Ok(config)
    }
}
