//! Form state store — the single source of truth for the wizard.
//!
//! Owned by whoever drives the wizard and passed around explicitly. Every
//! mutation is broadcast to subscribers so views can re-render.

use tokio::sync::broadcast;
use tracing::{debug, info};

use crate::countries::{self, Country};
use crate::error::{ConfigError, TransitionError};

use super::model::{FormPatch, WizardState};
use super::state::{Step, SubStep};
use super::validate::{validate_names, validate_phone};

/// Default broadcast channel capacity.
const DEFAULT_BROADCAST_CAPACITY: usize = 64;

/// Change notifications sent to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    FormDataChanged,
    CountryChanged { code: String },
    StepChanged { step: Step },
    SubStepChanged { from: SubStep, to: SubStep },
}

/// In-memory wizard state plus a broadcast channel for change fan-out.
pub struct FormStore {
    state: WizardState,
    tx: broadcast::Sender<StoreEvent>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(WizardState::default())
    }
}

impl FormStore {
    pub fn new(state: WizardState) -> Self {
        let (tx, _rx) = broadcast::channel(DEFAULT_BROADCAST_CAPACITY);
        Self { state, tx }
    }

    /// Start with the catalog entry for `country_code` selected.
    pub fn with_country(country_code: &str) -> Result<Self, ConfigError> {
        let country = countries::find(country_code)?;
        Ok(Self::new(WizardState::with_country(country.clone())))
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &WizardState {
        &self.state
    }

    /// Owned copy of the current state.
    pub fn snapshot(&self) -> WizardState {
        self.state.clone()
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Shallow-merge the set fields of `patch` into the state.
    ///
    /// No validation happens here; callers validate first.
    pub fn set_form_data(&mut self, patch: FormPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(firstname) = patch.firstname {
            self.state.firstname = firstname;
        }
        if let Some(lastname) = patch.lastname {
            self.state.lastname = lastname;
        }
        if let Some(phone_number) = patch.phone_number {
            self.state.phone_number = phone_number;
        }
        self.notify(StoreEvent::FormDataChanged);
    }

    /// Replace the selected country with the catalog entry for `code`.
    pub fn select_country(&mut self, code: &str) -> Result<Country, ConfigError> {
        let country = countries::find(code)?.clone();
        if country != self.state.country {
            debug!(from = %self.state.country.code, to = %country.code, "Country changed");
            self.state.country = country.clone();
            self.notify(StoreEvent::CountryChanged {
                code: country.code.clone(),
            });
        }
        Ok(country)
    }

    /// Overwrite the top-level step. Every `Step` is a valid value.
    pub fn set_step(&mut self, step: Step) {
        if self.state.step == step {
            return;
        }
        debug!(from = %self.state.step, to = %step, "Step changed");
        self.state.step = step;
        self.notify(StoreEvent::StepChanged { step });
    }

    /// Move to another screen.
    ///
    /// The edge must exist in the sub-step graph, and forward moves require
    /// the data collected so far to be valid: names before `Phone`, names and
    /// phone number before `Confirmation`. On error nothing changes.
    pub fn set_sub_step(&mut self, target: SubStep) -> Result<SubStep, TransitionError> {
        let from = self.state.sub_step;
        if !from.can_transition_to(target) {
            return Err(TransitionError::InvalidTransition { from, to: target });
        }
        self.check_guard(target)?;

        self.state.sub_step = target;
        info!(%from, to = %target, "Wizard sub-step changed");
        self.notify(StoreEvent::SubStepChanged { from, to: target });
        Ok(target)
    }

    fn check_guard(&self, target: SubStep) -> Result<(), TransitionError> {
        let guard = |reason: String| TransitionError::Guard { target, reason };
        match target {
            SubStep::Name => Ok(()),
            SubStep::Phone => validate_names(&self.state.firstname, &self.state.lastname)
                .map_err(|errors| guard(join_messages(&errors))),
            SubStep::Confirmation => {
                validate_names(&self.state.firstname, &self.state.lastname)
                    .map_err(|errors| guard(join_messages(&errors)))?;
                validate_phone(&self.state.phone_number, &self.state.country.code)
                    .map(|_| ())
                    .map_err(|e| guard(e.to_string()))
            }
        }
    }

    fn notify(&self, event: StoreEvent) {
        // ok if nobody is subscribed
        let _ = self.tx.send(event);
    }
}

fn join_messages(errors: &[crate::error::ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message())
        .collect::<Vec<_>>()
        .join("; ")
}
