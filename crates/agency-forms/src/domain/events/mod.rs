//! Wizard events
use crate::domain::value_objects::ServiceCategory;

/// Transitions recorded by a wizard session, drained by the host with
/// `InquiryWizard::take_events`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WizardEvent {
    Started { category: ServiceCategory },
    StepAdvanced { from: usize, to: usize },
    StepRejected { step: usize, fields: Vec<String> },
    SteppedBack { from: usize, to: usize },
    SubmissionStarted { category: ServiceCategory },
    Submitted { inquiry_id: String },
    SubmissionFailed { reason: String },
}
