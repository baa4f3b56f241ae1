//! Aggregates

pub mod wizard;

pub use wizard::{InquiryWizard, NextOutcome, WizardState, CONFIRMATION_DISPLAY};
