//! Inquiry Wizard aggregate
//!
//! One in-progress inquiry. Walks the schema's sections as steps, validates
//! the visible fields of the active step before advancing, accumulates the
//! committed values and hands a payload to the submitter on the last step.
//!
//! ```text
//! Welcome ─start─▶ Step(0) ─next─▶ … ─next─▶ Step(N-1) ─next─▶ Submitting ─ok─▶ Submitted
//!                     ▲  ◀─previous─                ▲                    │
//!                     │                             └──────────err───────┘
//! ```

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::domain::events::WizardEvent;
use crate::domain::value_objects::{FieldValue, Locale, ServiceCategory};
use crate::error::{FormsError, Result};
use crate::payload::InquiryPayload;
use crate::schema::{FieldDefinition, FormSchema, FormSchemaRegistry, SectionDefinition};
use crate::submit::{InquirySubmitter, SubmissionReceipt, SubmitError};
use crate::validation::{ValidationErrors, ValidationRuleRegistry, ValidationRuleset};

/// How long the confirmation screen stays up before the host discards the session
pub const CONFIRMATION_DISPLAY: Duration = Duration::from_secs(4);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "step", rename_all = "snake_case")]
pub enum WizardState {
    Welcome,
    Step(usize),
    Submitting,
    Submitted,
}

impl WizardState {
    /// Step index: −1 on the welcome screen, the section index while editing
    /// or submitting, `None` once submitted.
    pub fn index(&self, section_count: usize) -> Option<isize> {
        match self {
            Self::Welcome => Some(-1),
            Self::Step(i) => Some(*i as isize),
            Self::Submitting => Some(section_count as isize - 1),
            Self::Submitted => None,
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => write!(f, "welcome"),
            Self::Step(i) => write!(f, "step {i}"),
            Self::Submitting => write!(f, "submitting"),
            Self::Submitted => write!(f, "submitted"),
        }
    }
}

/// Result of a successful "next"
#[derive(Clone, Debug, PartialEq)]
pub enum NextOutcome {
    Advanced(usize),
    /// Last step passed; the session is now `Submitting` and this payload
    /// must be sent exactly once.
    Submit(InquiryPayload),
}

#[derive(Debug)]
pub struct InquiryWizard {
    schema: Arc<FormSchema>,
    rules: Arc<ValidationRuleset>,
    locale: Locale,
    state: WizardState,
    values: BTreeMap<String, FieldValue>,
    draft: BTreeMap<String, FieldValue>,
    errors: ValidationErrors,
    submission_error: Option<SubmitError>,
    receipt: Option<SubmissionReceipt>,
    submitted_at: Option<Instant>,
    events: Vec<WizardEvent>,
}

impl InquiryWizard {
    /// Open a session against the built-in registries
    pub fn new(category: ServiceCategory, locale: Locale) -> Result<Self> {
        Self::with_registries(
            category,
            locale,
            FormSchemaRegistry::global(),
            ValidationRuleRegistry::global(),
        )
    }

    /// Fails fast when either registry lacks the category
    pub fn with_registries(
        category: ServiceCategory,
        locale: Locale,
        schemas: &FormSchemaRegistry,
        rules: &ValidationRuleRegistry,
    ) -> Result<Self> {
        let schema = schemas
            .get(category)
            .ok_or_else(|| FormsError::Configuration(format!("no form schema for {category}")))?;
        if schema.section_count() == 0 {
            return Err(FormsError::Configuration(format!(
                "form schema for {category} has no sections"
            )));
        }
        let rules = rules.ruleset(category)?;

        tracing::debug!(%category, %locale, "wizard session opened");
        Ok(Self {
            schema,
            rules,
            locale,
            state: WizardState::Welcome,
            values: BTreeMap::new(),
            draft: BTreeMap::new(),
            errors: ValidationErrors::default(),
            submission_error: None,
            receipt: None,
            submitted_at: None,
            events: Vec::new(),
        })
    }

    // -------------------------------------------------------------------------
    // Read side
    // -------------------------------------------------------------------------

    pub fn category(&self) -> ServiceCategory {
        self.schema.category
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn section_count(&self) -> usize {
        self.schema.section_count()
    }

    pub fn current_section(&self) -> Option<&SectionDefinition> {
        match self.state {
            WizardState::Step(i) => self.schema.section(i),
            _ => None,
        }
    }

    /// Fields of the active step that are currently shown
    pub fn visible_fields(&self) -> Vec<&FieldDefinition> {
        let view = self.view();
        self.current_section()
            .map(|s| s.fields.iter().filter(|f| crate::schema::is_visible(f, &view)).collect())
            .unwrap_or_default()
    }

    /// Latest value of a field, uncommitted edits first
    pub fn value(&self, field: &str) -> Option<&FieldValue> {
        self.draft.get(field).or_else(|| self.values.get(field))
    }

    /// Committed values overlaid with uncommitted edits
    pub fn view(&self) -> BTreeMap<String, FieldValue> {
        let mut view = self.values.clone();
        view.extend(self.draft.iter().map(|(k, v)| (k.clone(), v.clone())));
        view
    }

    /// Values committed by successful "next" transitions
    pub fn committed_values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn submission_error(&self) -> Option<&SubmitError> {
        self.submission_error.as_ref()
    }

    pub fn receipt(&self) -> Option<&SubmissionReceipt> {
        self.receipt.as_ref()
    }

    /// (current step, total steps), 1-based; 0 on the welcome screen
    pub fn progress(&self) -> (usize, usize) {
        let total = self.section_count();
        match self.state {
            WizardState::Welcome => (0, total),
            WizardState::Step(i) => (i + 1, total),
            WizardState::Submitting | WizardState::Submitted => (total, total),
        }
    }

    pub fn is_last_step(&self) -> bool {
        self.state == WizardState::Step(self.section_count() - 1)
    }

    /// Whether the confirmation screen has been shown long enough
    pub fn confirmation_elapsed(&self, now: Instant) -> bool {
        self.submitted_at
            .map(|at| now.duration_since(at) >= CONFIRMATION_DISPLAY)
            .unwrap_or(false)
    }

    pub fn take_events(&mut self) -> Vec<WizardEvent> {
        std::mem::take(&mut self.events)
    }

    // -------------------------------------------------------------------------
    // Transitions
    // -------------------------------------------------------------------------

    /// Welcome → Step(0)
    pub fn start(&mut self) -> Result<WizardState> {
        match self.state {
            WizardState::Welcome => {
                self.state = WizardState::Step(0);
                self.events.push(WizardEvent::Started { category: self.category() });
                tracing::debug!(category = %self.category(), "wizard started");
                Ok(self.state)
            }
            other => Err(self.invalid("start", other)),
        }
    }

    /// Record an edit on the active step and re-check that field.
    ///
    /// Multi-select kinds always hold a list; a single string becomes a
    /// one-element list.
    pub fn set_value(&mut self, field: &str, value: impl Into<FieldValue>) -> Result<()> {
        self.ensure_editable("edit")?;
        let definition = self
            .schema
            .field(field)
            .ok_or_else(|| FormsError::UnknownField(field.to_string()))?;

        let value = match value.into() {
            FieldValue::Text(s) if definition.kind.is_multi() => {
                if s.trim().is_empty() {
                    FieldValue::List(Vec::new())
                } else {
                    FieldValue::List(vec![s])
                }
            }
            other => other,
        };

        match self.rules.check_field(field, Some(&value)) {
            Ok(()) => self.errors.remove(field),
            Err(e) => self.errors.insert(e),
        }
        self.draft.insert(field.to_string(), value);
        self.prune_hidden_errors();
        Ok(())
    }

    /// Step(i) → Step(i+1), or Step(N−1) → Submitting
    pub fn next(&mut self) -> Result<NextOutcome> {
        let step = match self.state {
            WizardState::Step(i) => i,
            WizardState::Submitting => return Err(FormsError::SubmissionInFlight),
            WizardState::Submitted => return Err(FormsError::Finished),
            other => return Err(self.invalid("next", other)),
        };
        let section = self
            .schema
            .section(step)
            .ok_or_else(|| FormsError::Configuration(format!("missing section {step}")))?;
        let field_ids: Vec<String> = section.fields.iter().map(|f| f.id.clone()).collect();

        let view = self.view();
        if let Err(errors) = self.rules.check_fields(field_ids.iter().map(String::as_str), &view) {
            return Err(self.reject(step, &field_ids, errors));
        }

        let last = self.section_count() - 1;
        if step < last {
            for id in &field_ids {
                if let Some(value) = self.draft.remove(id) {
                    self.values.insert(id.clone(), value);
                }
                self.errors.remove(id);
            }
            self.state = WizardState::Step(step + 1);
            self.events.push(WizardEvent::StepAdvanced { from: step, to: step + 1 });
            tracing::debug!(from = step, to = step + 1, "wizard advanced");
            return Ok(NextOutcome::Advanced(step + 1));
        }

        // Leftover edits from earlier steps take part in the final check.
        if let Err(errors) = self.rules.check_values(&view) {
            let fields = errors.fields();
            return Err(self.reject(step, &fields, errors));
        }
        self.draft.clear();
        self.values = view;
        self.errors = ValidationErrors::default();

        let payload = InquiryPayload::from_values(&self.schema, &self.values, self.locale);
        self.state = WizardState::Submitting;
        self.submission_error = None;
        self.events.push(WizardEvent::SubmissionStarted { category: self.category() });
        tracing::info!(category = %self.category(), "submitting inquiry");
        Ok(NextOutcome::Submit(payload))
    }

    /// Step(i) → Step(i−1); no-op at step 0 and on the welcome screen
    pub fn previous(&mut self) -> Result<WizardState> {
        match self.state {
            WizardState::Step(i) if i > 0 => {
                self.state = WizardState::Step(i - 1);
                self.events.push(WizardEvent::SteppedBack { from: i, to: i - 1 });
                Ok(self.state)
            }
            WizardState::Step(_) | WizardState::Welcome => Ok(self.state),
            WizardState::Submitting => Err(FormsError::SubmissionInFlight),
            WizardState::Submitted => Err(FormsError::Finished),
        }
    }

    /// Settle the outstanding submission.
    ///
    /// Success moves to `Submitted`; failure returns to the last step with
    /// every value kept and the error surfaced once.
    pub fn complete_submission(
        &mut self,
        result: std::result::Result<SubmissionReceipt, SubmitError>,
    ) -> Result<()> {
        if self.state != WizardState::Submitting {
            return Err(self.invalid("complete submission", self.state));
        }
        match result {
            Ok(receipt) => {
                tracing::info!(category = %self.category(), id = %receipt.id, "inquiry submitted");
                self.events.push(WizardEvent::Submitted { inquiry_id: receipt.id.clone() });
                self.receipt = Some(receipt);
                self.submitted_at = Some(Instant::now());
                self.state = WizardState::Submitted;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(
                    category = %self.category(),
                    error = %e,
                    "inquiry submission failed"
                );
                self.events.push(WizardEvent::SubmissionFailed { reason: e.to_string() });
                self.submission_error = Some(e.clone());
                self.state = WizardState::Step(self.section_count() - 1);
                Err(FormsError::Submission(e))
            }
        }
    }

    /// "next" with dispatch: one submitter call when the last step passes
    pub async fn advance(&mut self, submitter: &dyn InquirySubmitter) -> Result<WizardState> {
        match self.next()? {
            NextOutcome::Advanced(_) => Ok(self.state),
            NextOutcome::Submit(payload) => {
                let result = submitter.submit(&payload).await;
                self.complete_submission(result)?;
                Ok(self.state)
            }
        }
    }

    /// Acknowledge the submission notice before retrying
    pub fn dismiss_error(&mut self) {
        self.submission_error = None;
    }

    /// Discard the session. An in-flight request is not cancelled; its
    /// result is simply never applied.
    pub fn close(self) {
        tracing::debug!(category = %self.category(), state = %self.state, "wizard session closed");
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn ensure_editable(&self, action: &'static str) -> Result<()> {
        match self.state {
            WizardState::Step(_) => Ok(()),
            WizardState::Submitting => Err(FormsError::SubmissionInFlight),
            WizardState::Submitted => Err(FormsError::Finished),
            other => Err(self.invalid(action, other)),
        }
    }

    fn reject(&mut self, step: usize, scope: &[String], errors: ValidationErrors) -> FormsError {
        for id in scope {
            self.errors.remove(id);
        }
        for error in errors.iter() {
            self.errors.insert(error.clone());
        }
        let fields = errors.fields();
        tracing::debug!(step, ?fields, "step rejected");
        self.events.push(WizardEvent::StepRejected { step, fields });
        FormsError::Validation(errors)
    }

    fn prune_hidden_errors(&mut self) {
        let view = self.view();
        let hidden: Vec<String> = self
            .errors
            .fields()
            .into_iter()
            .filter(|id| {
                self.rules
                    .rule(id)
                    .map(|rule| !rule.is_visible(&view))
                    .unwrap_or(false)
            })
            .collect();
        for id in hidden {
            self.errors.remove(&id);
        }
    }

    fn invalid(&self, action: &'static str, state: WizardState) -> FormsError {
        FormsError::InvalidTransition { action, state: state.to_string() }
    }
}
