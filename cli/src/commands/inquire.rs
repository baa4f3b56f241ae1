//! Interactive inquiry
//!
//! Runs an [`InquiryWizard`] over a line-oriented terminal: one prompt per
//! visible field, `:back` and `:quit` at any prompt, inline field errors and
//! a retry prompt when the submission fails.

use anyhow::{anyhow, bail};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

use agency_forms::{
    is_visible, FieldDefinition, FieldKind, FieldValue, FormsError, InquirySubmitter,
    InquiryWizard, Locale, ServiceCategory, SubmissionReceipt, ValidationErrors, WizardState,
};

const BACK: &str = ":back";
const QUIT: &str = ":quit";
const CLEAR: &str = ":clear";

/// One line of user input, interpreted against the prompted field
#[derive(Debug, PartialEq)]
pub enum Answer {
    Back,
    Quit,
    /// Empty line: leave the current value as it is
    Keep,
    Set(FieldValue),
}

#[derive(Debug)]
pub enum SessionOutcome {
    Submitted(SubmissionReceipt),
    Quit,
}

enum StepAction {
    Next,
    Back,
    Quit,
}

fn ui(locale: Locale, en: &'static str, ar: &'static str) -> &'static str {
    match locale {
        Locale::En => en,
        Locale::Ar => ar,
    }
}

pub fn parse_answer(field: &FieldDefinition, line: &str, locale: Locale) -> Result<Answer, String> {
    let input = line.trim();
    match input {
        BACK => return Ok(Answer::Back),
        QUIT => return Ok(Answer::Quit),
        CLEAR => return Ok(Answer::Set(empty_value(field.kind))),
        "" => return Ok(Answer::Keep),
        _ => {}
    }

    match field.kind {
        FieldKind::Checkbox => parse_yes_no(input)
            .map(|b| Answer::Set(FieldValue::Bool(b)))
            .ok_or_else(|| ui(locale, "Answer y or n", "أجب بـ نعم أو لا").to_string()),
        kind if kind.is_single_choice() => {
            pick(field, input, locale).map(|v| Answer::Set(FieldValue::Text(v)))
        }
        kind if kind.is_multi() => input
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| pick(field, t, locale))
            .collect::<Result<Vec<_>, _>>()
            .map(|v| Answer::Set(FieldValue::List(v))),
        _ => Ok(Answer::Set(FieldValue::text(input))),
    }
}

fn empty_value(kind: FieldKind) -> FieldValue {
    match kind {
        FieldKind::Checkbox => FieldValue::Bool(false),
        k if k.is_multi() => FieldValue::List(Vec::new()),
        _ => FieldValue::text(""),
    }
}

fn parse_yes_no(input: &str) -> Option<bool> {
    match input.to_lowercase().as_str() {
        "y" | "yes" | "true" | "نعم" => Some(true),
        "n" | "no" | "false" | "لا" => Some(false),
        _ => None,
    }
}

/// Option by 1-based number or by value
fn pick(field: &FieldDefinition, token: &str, locale: Locale) -> Result<String, String> {
    if let Ok(n) = token.parse::<usize>() {
        if let Some(option) = n.checked_sub(1).and_then(|i| field.options.get(i)) {
            return Ok(option.value.clone());
        }
    }
    if field.has_option(token) {
        return Ok(token.to_string());
    }
    Err(format!("{} {}", ui(locale, "Not one of the options:", "ليس من الخيارات:"), token))
}

fn display_value(value: &FieldValue, locale: Locale) -> String {
    match value {
        FieldValue::Text(s) => s.clone(),
        FieldValue::List(v) => v.join(", "),
        FieldValue::Bool(true) => ui(locale, "yes", "نعم").to_string(),
        FieldValue::Bool(false) => ui(locale, "no", "لا").to_string(),
    }
}

pub struct Session<'a, R, W> {
    wizard: InquiryWizard,
    input: R,
    out: W,
    submitter: &'a dyn InquirySubmitter,
    hold_confirmation: bool,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(
        wizard: InquiryWizard,
        input: R,
        out: W,
        submitter: &'a dyn InquirySubmitter,
    ) -> Self {
        Self {
            wizard,
            input,
            out,
            submitter,
            hold_confirmation: false,
        }
    }

    /// Keep the confirmation up for the full display time before closing
    pub fn hold_confirmation(mut self) -> Self {
        self.hold_confirmation = true;
        self
    }

    pub async fn run(mut self) -> anyhow::Result<SessionOutcome> {
        let outcome = self.drive().await;
        self.wizard.close();
        outcome
    }

    async fn drive(&mut self) -> anyhow::Result<SessionOutcome> {
        if !self.welcome()? {
            return Ok(SessionOutcome::Quit);
        }
        self.wizard.start()?;

        loop {
            match self.wizard.state() {
                WizardState::Step(_) => match self.fill_step()? {
                    StepAction::Next => {
                        if let Some(outcome) = self.advance().await? {
                            return Ok(outcome);
                        }
                    }
                    StepAction::Back => {
                        self.wizard.previous()?;
                    }
                    StepAction::Quit => return Ok(SessionOutcome::Quit),
                },
                WizardState::Submitted => {
                    let receipt = self
                        .wizard
                        .receipt()
                        .cloned()
                        .ok_or_else(|| anyhow!("submitted session has no receipt"))?;
                    self.confirmation(&receipt)?;
                    if self.hold_confirmation {
                        while !self.wizard.confirmation_elapsed(Instant::now()) {
                            tokio::time::sleep(Duration::from_millis(200)).await;
                        }
                    }
                    return Ok(SessionOutcome::Submitted(receipt));
                }
                state => bail!("unexpected wizard state: {}", state),
            }
        }
    }

    fn welcome(&mut self) -> anyhow::Result<bool> {
        let locale = self.wizard.locale();
        let name = self.wizard.schema().service_name.get(locale).to_string();
        let steps = self.wizard.section_count();

        writeln!(self.out, "{}", name.bold())?;
        writeln!(
            self.out,
            "{} {}",
            steps,
            ui(
                locale,
                "short steps. Type :back for the previous step or :quit to leave.",
                "خطوات قصيرة. اكتب :back للخطوة السابقة أو :quit للخروج."
            )
        )?;
        write!(self.out, "{} ", ui(locale, "Press Enter to start", "اضغط Enter للبدء").green())?;
        self.out.flush()?;

        Ok(!matches!(self.read_line()?.as_deref().map(str::trim), None | Some(QUIT)))
    }

    fn fill_step(&mut self) -> anyhow::Result<StepAction> {
        let locale = self.wizard.locale();
        let section = self
            .wizard
            .current_section()
            .cloned()
            .ok_or_else(|| anyhow!("no active step"))?;
        let (step, total) = self.wizard.progress();

        writeln!(self.out)?;
        writeln!(
            self.out,
            "{} {}",
            format!("[{step}/{total}]").dimmed(),
            section.title.get(locale).bold()
        )?;
        if let Some(description) = &section.description {
            writeln!(self.out, "{}", description.get(locale).dimmed())?;
        }

        for field in &section.fields {
            // Visibility can change with answers given earlier in this step.
            if !is_visible(field, &self.wizard.view()) {
                continue;
            }
            loop {
                self.prompt(field)?;
                let Some(line) = self.read_line()? else {
                    return Ok(StepAction::Quit);
                };
                match parse_answer(field, &line, locale) {
                    Ok(Answer::Back) => return Ok(StepAction::Back),
                    Ok(Answer::Quit) => return Ok(StepAction::Quit),
                    Ok(Answer::Keep) => break,
                    Ok(Answer::Set(value)) => {
                        self.wizard.set_value(&field.id, value)?;
                        match self.wizard.errors().get(&field.id) {
                            Some(error) => {
                                let message = error.message.get(locale).to_string();
                                self.field_error(&message)?;
                            }
                            None => break,
                        }
                    }
                    Err(message) => self.field_error(&message)?,
                }
            }
        }

        Ok(StepAction::Next)
    }

    fn prompt(&mut self, field: &FieldDefinition) -> anyhow::Result<()> {
        let locale = self.wizard.locale();
        let mut label = field.label.get(locale).to_string();
        if field.required {
            label.push_str(" *");
        }

        write!(self.out, "\n{}", label.bold())?;
        if let Some(current) = self.wizard.value(&field.id).filter(|v| !v.is_empty()) {
            write!(self.out, " {}", format!("[{}]", display_value(current, locale)).dimmed())?;
        }
        writeln!(self.out)?;

        if let Some(error) = self.wizard.errors().get(&field.id) {
            writeln!(self.out, "  {} {}", "!".red().bold(), error.message.get(locale).red())?;
        }
        if let Some(description) = &field.description {
            writeln!(self.out, "  {}", description.get(locale).dimmed())?;
        }
        for (i, option) in field.options.iter().enumerate() {
            writeln!(self.out, "  {}) {}", i + 1, option.label.get(locale))?;
        }

        let hint = match field.kind {
            FieldKind::Checkbox => Some(ui(locale, "y/n", "نعم/لا")),
            kind if kind.is_multi() => Some(ui(
                locale,
                "numbers separated by commas",
                "أرقام مفصولة بفواصل",
            )),
            _ => field.placeholder.as_ref().map(|p| p.get(locale)),
        };
        match hint {
            Some(hint) => write!(self.out, "{} {} ", format!("({hint})").dimmed(), ">".cyan())?,
            None => write!(self.out, "{} ", ">".cyan())?,
        }
        self.out.flush()?;
        Ok(())
    }

    /// Returns `Some` when the session ends during submission
    async fn advance(&mut self) -> anyhow::Result<Option<SessionOutcome>> {
        let locale = self.wizard.locale();
        loop {
            if self.wizard.is_last_step() {
                let sending = ui(locale, "Sending your inquiry...", "جارٍ إرسال استفسارك...");
                writeln!(self.out, "\n{}", sending.dimmed())?;
            }

            match self.wizard.advance(self.submitter).await {
                Ok(_) => return Ok(None),
                Err(FormsError::Validation(errors)) => {
                    self.validation_summary(&errors)?;
                    return Ok(None);
                }
                Err(FormsError::Submission(e)) => {
                    self.wizard.dismiss_error();
                    writeln!(
                        self.out,
                        "{} {}",
                        ui(locale, "Submission failed:", "تعذر الإرسال:").red().bold(),
                        e
                    )?;
                    write!(
                        self.out,
                        "{} ",
                        ui(
                            locale,
                            "Press Enter to retry, :back to edit this step, :quit to leave",
                            "اضغط Enter لإعادة المحاولة، :back لتعديل هذه الخطوة، :quit للخروج"
                        )
                        .dimmed()
                    )?;
                    self.out.flush()?;
                    match self.read_line()?.as_deref().map(str::trim) {
                        None | Some(QUIT) => return Ok(Some(SessionOutcome::Quit)),
                        Some(BACK) => return Ok(None),
                        Some(_) => continue,
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn validation_summary(&mut self, errors: &ValidationErrors) -> anyhow::Result<()> {
        let locale = self.wizard.locale();
        writeln!(
            self.out,
            "\n{}",
            ui(locale, "Please correct the following:", "يرجى تصحيح ما يلي:").red().bold()
        )?;
        for error in errors.iter() {
            let label = self
                .wizard
                .schema()
                .field(&error.field)
                .map(|f| f.label.get(locale).to_string())
                .unwrap_or_else(|| error.field.clone());
            writeln!(self.out, "  {} {}: {}", "!".red().bold(), label, error.message.get(locale))?;
        }
        Ok(())
    }

    fn field_error(&mut self, message: &str) -> anyhow::Result<()> {
        writeln!(self.out, "  {} {}", "!".red().bold(), message.red())?;
        Ok(())
    }

    fn confirmation(&mut self, receipt: &SubmissionReceipt) -> anyhow::Result<()> {
        let locale = self.wizard.locale();
        writeln!(self.out)?;
        writeln!(
            self.out,
            "{}",
            ui(
                locale,
                "✓ Thank you! Your inquiry has been sent.",
                "✓ شكراً لك! تم إرسال استفسارك."
            )
            .green()
            .bold()
        )?;
        writeln!(self.out, "{} {}", ui(locale, "Reference:", "الرقم المرجعي:"), receipt.id)?;
        writeln!(
            self.out,
            "{}",
            ui(locale, "We will be in touch shortly.", "سنتواصل معك قريباً.")
        )?;
        Ok(())
    }

    fn read_line(&mut self) -> anyhow::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

pub async fn handle(
    service: &str,
    locale: Locale,
    submitter: &dyn InquirySubmitter,
) -> anyhow::Result<()> {
    let category: ServiceCategory = service.parse()?;
    let wizard = InquiryWizard::new(category, locale)?;

    let stdin = io::stdin();
    let session = Session::new(wizard, stdin.lock(), io::stdout(), submitter).hold_confirmation();

    if let SessionOutcome::Quit = session.run().await? {
        println!("\n{}", ui(locale, "Inquiry discarded.", "تم إلغاء الاستفسار."));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use agency_forms::{ContactMethod, FormSchemaRegistry, InquiryPayload, SubmitError};
    use async_trait::async_trait;
    use parking_lot::Mutex;

    #[derive(Default)]
    struct ScriptedSubmitter {
        calls: Mutex<Vec<InquiryPayload>>,
        failures_left: Mutex<usize>,
    }

    impl ScriptedSubmitter {
        fn failing_once() -> Self {
            Self {
                failures_left: Mutex::new(1),
                ..Self::default()
            }
        }
    }

    #[async_trait]
    impl InquirySubmitter for ScriptedSubmitter {
        async fn submit(&self, payload: &InquiryPayload) -> Result<SubmissionReceipt, SubmitError> {
            self.calls.lock().push(payload.clone());
            let mut failures = self.failures_left.lock();
            if *failures > 0 {
                *failures -= 1;
                return Err(SubmitError::Transport("connection refused".into()));
            }
            Ok(SubmissionReceipt {
                id: "inq-1".into(),
                timestamp: "2026-01-05T10:00:00Z".parse().unwrap(),
            })
        }
    }

    const CONTACT: &str = "Jane Doe\nAcme\njane@acme.com\n\n3\n\n";
    const INQUIRY: &str = "Pricing\nWe would like a quote for support.\n";
    const FINAL: &str = "1\n\ny\n";

    async fn run_script(script: &str, submitter: &ScriptedSubmitter) -> (SessionOutcome, String) {
        let wizard = InquiryWizard::new(ServiceCategory::GeneralInquiry, Locale::En).unwrap();
        let mut out = Vec::new();
        let outcome = Session::new(wizard, script.as_bytes(), &mut out, submitter)
            .run()
            .await
            .unwrap();
        (outcome, String::from_utf8(out).unwrap())
    }

    fn field(id: &str) -> FieldDefinition {
        FormSchemaRegistry::global()
            .get(ServiceCategory::WebDevelopment)
            .unwrap()
            .field(id)
            .unwrap()
            .clone()
    }

    #[test]
    fn test_parse_choice_by_number_or_value() {
        let hosting = field("hasDomainHosting");
        assert_eq!(
            parse_answer(&hosting, "3", Locale::En),
            Ok(Answer::Set(FieldValue::text("no")))
        );
        assert_eq!(
            parse_answer(&hosting, "yes-both", Locale::En),
            Ok(Answer::Set(FieldValue::text("yes-both")))
        );
        assert!(parse_answer(&hosting, "9", Locale::En).is_err());
    }

    #[test]
    fn test_parse_multi_choice() {
        let features = field("features");
        let first = features.options[0].value.clone();
        let second = features.options[1].value.clone();
        assert_eq!(
            parse_answer(&features, &format!("1, {second}"), Locale::En),
            Ok(Answer::Set(FieldValue::List(vec![first, second])))
        );
    }

    #[test]
    fn test_parse_commands_and_checkbox() {
        let consent = field("agreedToPrivacy");
        assert_eq!(parse_answer(&consent, " :back ", Locale::En), Ok(Answer::Back));
        assert_eq!(parse_answer(&consent, ":quit", Locale::En), Ok(Answer::Quit));
        assert_eq!(parse_answer(&consent, "", Locale::En), Ok(Answer::Keep));
        assert_eq!(
            parse_answer(&consent, "نعم", Locale::Ar),
            Ok(Answer::Set(FieldValue::Bool(true)))
        );
        assert_eq!(
            parse_answer(&consent, ":clear", Locale::En),
            Ok(Answer::Set(FieldValue::Bool(false)))
        );
        assert!(parse_answer(&consent, "maybe", Locale::En).is_err());
    }

    #[tokio::test]
    async fn test_full_session_submits_once() {
        let submitter = ScriptedSubmitter::default();
        let script = format!("\n{CONTACT}{INQUIRY}{FINAL}");

        let (outcome, output) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(ref r) if r.id == "inq-1"));
        assert!(output.contains("inq-1"));
        let calls = submitter.calls.lock();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].full_name, "Jane Doe");
        assert_eq!(calls[0].preferred_contact, Some(ContactMethod::Whatsapp));
        assert_eq!(calls[0].preferred_contact_time.as_deref(), Some("morning"));
        assert!(calls[0].agreed_to_privacy);
    }

    #[tokio::test]
    async fn test_invalid_value_is_reprompted_inline() {
        let submitter = ScriptedSubmitter::default();
        let script = format!(
            "\nJane Doe\nAcme\nnot-an-email\njane@acme.com\n\n3\n\n{INQUIRY}{FINAL}"
        );

        let (outcome, output) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        assert!(output.contains("Enter a valid email address"));
        assert_eq!(submitter.calls.lock()[0].email, "jane@acme.com");
    }

    #[tokio::test]
    async fn test_missing_required_field_blocks_step() {
        let submitter = ScriptedSubmitter::default();
        let script = format!("\n{CONTACT}\n\n{INQUIRY}{FINAL}");

        let (outcome, output) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        assert!(output.contains("Please correct the following:"));
        assert!(output.contains("This field is required"));
        assert_eq!(submitter.calls.lock().len(), 1);
    }

    #[tokio::test]
    async fn test_failed_submission_can_be_retried() {
        let submitter = ScriptedSubmitter::failing_once();
        let script = format!("\n{CONTACT}{INQUIRY}{FINAL}\n");

        let (outcome, output) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        assert!(output.contains("Submission failed:"));
        let calls = submitter.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0], calls[1]);
    }

    #[tokio::test]
    async fn test_back_after_failure_reopens_last_step() {
        let submitter = ScriptedSubmitter::failing_once();
        let script = format!("\n{CONTACT}{INQUIRY}{FINAL}:back\n2\n\n\n");

        let (outcome, output) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        assert!(output.contains(":back to edit this step"));
        let calls = submitter.calls.lock();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].preferred_contact_time.as_deref(), Some("morning"));
        assert_eq!(calls[1].preferred_contact_time.as_deref(), Some("afternoon"));
        assert!(calls[1].agreed_to_privacy);
    }

    #[tokio::test]
    async fn test_back_keeps_earlier_answers() {
        let submitter = ScriptedSubmitter::default();
        let script = format!("\n{CONTACT}:back\n\n\n\n\n\n\n{INQUIRY}{FINAL}");

        let (outcome, _) = run_script(&script, &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Submitted(_)));
        let calls = submitter.calls.lock();
        assert_eq!(calls[0].full_name, "Jane Doe");
        assert_eq!(calls[0].email, "jane@acme.com");
    }

    #[tokio::test]
    async fn test_quit_discards_without_submitting() {
        let submitter = ScriptedSubmitter::default();

        let (outcome, _) = run_script("\nJane Doe\n:quit\n", &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Quit));
        assert!(submitter.calls.lock().is_empty());
    }

    #[tokio::test]
    async fn test_end_of_input_quits() {
        let submitter = ScriptedSubmitter::default();

        let (outcome, _) = run_script("\nJane Doe\n", &submitter).await;

        assert!(matches!(outcome, SessionOutcome::Quit));
        assert!(submitter.calls.lock().is_empty());
    }
}
