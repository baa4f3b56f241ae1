//! Inquiry domain: value objects, the wizard aggregate and its events

pub mod aggregates;
pub mod events;
pub mod value_objects;

pub use aggregates::*;
pub use events::WizardEvent;
pub use value_objects::*;
