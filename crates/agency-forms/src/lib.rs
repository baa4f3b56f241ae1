//! Agency Inquiry Forms
//!
//! Multi-step, bilingual (English/Arabic) inquiry form for the agency site.
//!
//! ## Features
//! - Declarative per-service form schemas (sections → fields → options)
//! - Conditional field visibility
//! - Structural validation rules mirrored from the schemas
//! - Wizard state machine with one outbound submission per final step
//!
//! ## Layers
//!
//! ```text
//! FormSchemaRegistry ──▶ ValidationRuleRegistry ──▶ InquiryWizard ──▶ InquirySubmitter
//!      (schema)               (validation)            (domain)           (submit port)
//! ```

#![warn(clippy::all)]

pub mod catalog;
pub mod domain;
pub mod error;
pub mod payload;
pub mod schema;
pub mod submit;
pub mod validation;

pub use domain::aggregates::{InquiryWizard, NextOutcome, WizardState, CONFIRMATION_DISPLAY};
pub use domain::events::WizardEvent;
pub use domain::value_objects::{FieldValue, Locale, LocalizedText, ServiceCategory};
pub use error::{FormsError, Result};
pub use payload::{ContactMethod, InquiryPayload};
pub use schema::{
    is_visible, FieldConstraints, FieldDefinition, FieldKind, FieldOption, FormSchema,
    FormSchemaRegistry, SectionDefinition, VisibilityCondition,
};
pub use submit::{
    ErrorBody, InquiryAck, InquirySubmitter, SubmissionReceipt, SubmitError, INQUIRY_PATH,
};
pub use validation::{
    FieldError, FieldRule, ValidationCode, ValidationErrors, ValidationRuleRegistry,
    ValidationRuleset, PRIVACY_FIELD,
};
