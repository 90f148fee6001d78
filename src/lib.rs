//! Onboarding wizard — name and phone-number collection with a validated
//! step state machine.

pub mod config;
pub mod countries;
pub mod error;
pub mod terminal;
pub mod wizard;
