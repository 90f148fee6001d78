//! Wizard — coordinates the screens, validators, and the form store.
//!
//! Each screen submission validates its input, writes accepted values into
//! the store, and advances the position. A rejected submission records the
//! inline messages and leaves the position alone.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::countries::{self, Country};
use crate::error::{ConfigError, Result, TransitionError, ValidationError};

use super::model::{Field, FormPatch, OnboardingSummary, WizardState};
use super::selector::{CountrySelector, SelectorOutcome};
use super::state::{Step, SubStep};
use super::store::FormStore;
use super::validate::{NormalizedNumber, validate_names, validate_phone};

/// Drives the onboarding screens over an injected `FormStore`.
pub struct Wizard {
    store: FormStore,
    selector: Option<CountrySelector>,
    field_errors: BTreeMap<Field, String>,
    phone: Option<NormalizedNumber>,
    completed_at: Option<DateTime<Utc>>,
}

impl Default for Wizard {
    fn default() -> Self {
        Self::new(FormStore::default())
    }
}

impl Wizard {
    pub fn new(store: FormStore) -> Self {
        Self {
            store,
            selector: None,
            field_errors: BTreeMap::new(),
            phone: None,
            completed_at: None,
        }
    }

    pub fn store(&self) -> &FormStore {
        &self.store
    }

    pub fn state(&self) -> &WizardState {
        self.store.state()
    }

    pub fn sub_step(&self) -> SubStep {
        self.store.state().sub_step
    }

    /// Submit the name screen.
    ///
    /// On failure every bad field gets a message and the first failure is
    /// returned.
    pub fn submit_name(&mut self, firstname: &str, lastname: &str) -> Result<SubStep> {
        self.expect_screen(SubStep::Name, SubStep::Phone)?;

        self.clear_field_error(Field::Firstname);
        self.clear_field_error(Field::Lastname);
        if let Err(errors) = validate_names(firstname, lastname) {
            self.record_errors(&errors);
            if let Some(first) = errors.into_iter().next() {
                return Err(first.into());
            }
        }

        self.store.set_form_data(FormPatch::names(firstname, lastname));
        Ok(self.store.set_sub_step(SubStep::Phone)?)
    }

    /// Submit the phone screen against the currently selected country.
    pub fn submit_phone(&mut self, raw: &str) -> Result<SubStep> {
        self.expect_screen(SubStep::Phone, SubStep::Confirmation)?;

        self.clear_field_error(Field::PhoneNumber);
        let number = match validate_phone(raw, &self.store.state().country.code) {
            Ok(number) => number,
            Err(e) => {
                self.record_errors(std::slice::from_ref(&e));
                return Err(e.into());
            }
        };

        self.store.set_form_data(FormPatch::phone_number(raw));
        let next = self.store.set_sub_step(SubStep::Confirmation)?;

        info!(country = %number.country_code, "Onboarding completed");
        self.phone = Some(number);
        self.completed_at = Some(Utc::now());
        Ok(next)
    }

    /// Open the country selector (no-op if already open).
    pub fn open_country_selector(&mut self) -> &mut CountrySelector {
        self.selector.get_or_insert_with(CountrySelector::new)
    }

    pub fn country_selector(&self) -> Option<&CountrySelector> {
        self.selector.as_ref()
    }

    pub fn country_selector_mut(&mut self) -> Option<&mut CountrySelector> {
        self.selector.as_mut()
    }

    /// Dismiss the selector without changing the country.
    pub fn close_country_selector(&mut self) -> Option<SelectorOutcome> {
        self.selector.take().map(CountrySelector::close)
    }

    /// Choose a country and write it to the store immediately.
    ///
    /// While the selector is open only its visible results can be chosen;
    /// choosing closes it.
    pub fn choose_country(&mut self, code: &str) -> Result<Country> {
        let country = match &self.selector {
            Some(selector) => match selector.select(code) {
                Some(SelectorOutcome::Selected(country)) => country,
                _ => return Err(ConfigError::UnknownCountry(code.to_string()).into()),
            },
            None => countries::find(code)?.clone(),
        };

        let country = self.store.select_country(&country.code)?;
        self.selector = None;
        debug!(code = %country.code, "Country chosen");
        Ok(country)
    }

    /// "Back to start": return to the name screen keeping every value.
    pub fn back_to_start(&mut self) -> Result<SubStep> {
        if self.sub_step() != SubStep::Name {
            self.store.set_sub_step(SubStep::Name)?;
        }
        self.field_errors.clear();
        self.phone = None;
        self.completed_at = None;
        Ok(SubStep::Name)
    }

    /// Header back arrow.
    pub fn back_to_first_step(&mut self) {
        self.store.set_step(Step::First);
    }

    pub fn set_step(&mut self, step: Step) {
        self.store.set_step(step);
    }

    pub fn field_errors(&self) -> &BTreeMap<Field, String> {
        &self.field_errors
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(&field).map(String::as_str)
    }

    /// Drop the message under `field`, as when the user edits it.
    pub fn clear_field_error(&mut self, field: Field) {
        self.field_errors.remove(&field);
    }

    /// Confirmation screen contents, once the wizard has completed.
    pub fn summary(&self) -> Option<OnboardingSummary> {
        if !self.sub_step().is_terminal() {
            return None;
        }
        let phone = self.phone.as_ref()?;
        let state = self.store.state();
        Some(OnboardingSummary {
            firstname: state.firstname.clone(),
            lastname: state.lastname.clone(),
            country: state.country.clone(),
            phone_number: state.phone_number.clone(),
            phone_e164: phone.e164.clone(),
            completed_at: self.completed_at.unwrap_or_else(Utc::now),
        })
    }

    fn expect_screen(&self, screen: SubStep, target: SubStep) -> Result<()> {
        let from = self.sub_step();
        if from != screen {
            return Err(TransitionError::InvalidTransition { from, to: target }.into());
        }
        Ok(())
    }

    fn record_errors(&mut self, errors: &[ValidationError]) {
        for e in errors {
            self.field_errors.insert(e.field(), e.message().to_string());
        }
    }
}
