//! Onboarding wizard — name, then phone number, then confirmation.
//!
//! The `FormStore` owns the collected values and the position. Validators are
//! pure functions. `Wizard` ties them together screen by screen and is what a
//! front end talks to.

pub mod flow;
pub mod model;
pub mod selector;
pub mod state;
pub mod store;
pub mod validate;

pub use flow::Wizard;
pub use model::{Field, FormPatch, OnboardingSummary, WizardState};
pub use selector::{CountrySelector, EMPTY_RESULTS_MESSAGE, SelectorOutcome};
pub use state::{Step, SubStep};
pub use store::{FormStore, StoreEvent};
pub use validate::{NormalizedNumber, validate_name, validate_names, validate_phone};
