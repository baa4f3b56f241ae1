//! Validation Rule Registry
//!
//! Structural rules derived from each form schema (same field ids): required
//! flags, length bounds, numeric bounds, patterns, kind grammars and option
//! membership. The privacy consent rule is added to every ruleset whether or
//! not the schema declares it.

use regex::Regex;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, OnceLock};

use crate::domain::value_objects::{FieldValue, LocalizedText, ServiceCategory};
use crate::error::{FormsError, Result};
use crate::schema::{
    FieldDefinition, FieldKind, FormSchema, FormSchemaRegistry, VisibilityCondition,
};

/// Consent checkbox required before any submission
pub const PRIVACY_FIELD: &str = "agreedToPrivacy";

pub const PHONE_MIN_LEN: usize = 8;
pub const PHONE_MAX_LEN: usize = 20;

const EMAIL_GRAMMAR: &str = r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9\-]*[A-Za-z0-9])?)*\.[A-Za-z]{2,}$";
const PHONE_GRAMMAR: &str = r"^[0-9+\-() ]+$";
const URL_GRAMMAR: &str = r"^https?://[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*(:\d+)?(/\S*)?$";

// =============================================================================
// Errors
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationCode {
    Required,
    TooShort,
    TooLong,
    InvalidEmail,
    InvalidPhone,
    InvalidUrl,
    PatternMismatch,
    NotANumber,
    OutOfRange,
    NotAnOption,
    MustAccept,
    WrongType,
}

/// Per-field validation failure with a message in both languages
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub code: ValidationCode,
    pub message: LocalizedText,
}

impl FieldError {
    fn new(field: &str, code: ValidationCode, message: LocalizedText) -> Self {
        Self { field: field.to_string(), code, message }
    }
}

/// Failures keyed by field id
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, FieldError>);

impl ValidationErrors {
    pub fn insert(&mut self, error: FieldError) {
        self.0.insert(error.field.clone(), error);
    }

    pub fn remove(&mut self, field: &str) {
        self.0.remove(field);
    }

    pub fn get(&self, field: &str) -> Option<&FieldError> {
        self.0.get(field)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.values()
    }

    fn into_result(self) -> std::result::Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

// =============================================================================
// Rules
// =============================================================================

#[derive(Clone, Debug)]
pub struct FieldRule {
    pub field: String,
    pub kind: FieldKind,
    pub required: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub options: Vec<String>,
    pub visible_when: Option<VisibilityCondition>,
    pattern: Option<Regex>,
    grammar: Option<Regex>,
}

impl FieldRule {
    fn from_definition(def: &FieldDefinition) -> Result<Self> {
        let pattern = def
            .constraints
            .pattern
            .as_deref()
            .map(|p| compile(&def.id, p))
            .transpose()?;
        let grammar = match def.kind {
            FieldKind::Email => Some(compile(&def.id, EMAIL_GRAMMAR)?),
            FieldKind::Phone => Some(compile(&def.id, PHONE_GRAMMAR)?),
            FieldKind::Url => Some(compile(&def.id, URL_GRAMMAR)?),
            _ => None,
        };

        Ok(Self {
            field: def.id.clone(),
            kind: def.kind,
            required: def.required,
            min_length: def.constraints.min_length,
            max_length: def.constraints.max_length,
            min_value: def.constraints.min_value,
            max_value: def.constraints.max_value,
            options: def.options.iter().map(|o| o.value.clone()).collect(),
            visible_when: def.visible_when.clone(),
            pattern,
            grammar,
        })
    }

    fn privacy_consent() -> Self {
        Self {
            field: PRIVACY_FIELD.to_string(),
            kind: FieldKind::Checkbox,
            required: true,
            min_length: None,
            max_length: None,
            min_value: None,
            max_value: None,
            options: Vec::new(),
            visible_when: None,
            pattern: None,
            grammar: None,
        }
    }

    pub fn is_visible(&self, values: &BTreeMap<String, FieldValue>) -> bool {
        self.visible_when.as_ref().map(|c| c.is_met(values)).unwrap_or(true)
    }

    /// Check one value. `None` means the field was never filled in.
    pub fn check(&self, value: Option<&FieldValue>) -> std::result::Result<(), FieldError> {
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ if self.required && self.kind == FieldKind::Checkbox => {
                return Err(self.error(ValidationCode::MustAccept));
            }
            _ if self.required => return Err(self.error(ValidationCode::Required)),
            _ => return Ok(()),
        };

        match self.kind {
            FieldKind::Checkbox => match value {
                FieldValue::Bool(_) => Ok(()),
                _ => Err(self.error(ValidationCode::WrongType)),
            },
            FieldKind::SingleSelect | FieldKind::SingleChoiceSet => match value {
                FieldValue::Text(s) if self.options.iter().any(|o| o == s) => Ok(()),
                FieldValue::Text(_) => Err(self.error(ValidationCode::NotAnOption)),
                _ => Err(self.error(ValidationCode::WrongType)),
            },
            FieldKind::MultiSelect | FieldKind::MultiChoiceSet => {
                let selected: Vec<&str> = match value {
                    FieldValue::List(v) => v.iter().map(String::as_str).collect(),
                    FieldValue::Text(s) => vec![s.as_str()],
                    FieldValue::Bool(_) => return Err(self.error(ValidationCode::WrongType)),
                };
                if selected.iter().all(|s| self.options.iter().any(|o| o == s)) {
                    Ok(())
                } else {
                    Err(self.error(ValidationCode::NotAnOption))
                }
            }
            FieldKind::ShortText
            | FieldKind::LongText
            | FieldKind::Email
            | FieldKind::Phone
            | FieldKind::Url => match value {
                FieldValue::Text(s) => self.check_text(s.trim()),
                _ => Err(self.error(ValidationCode::WrongType)),
            },
        }
    }

    fn check_text(&self, text: &str) -> std::result::Result<(), FieldError> {
        let len = text.chars().count();
        let min = self.min_length.unwrap_or(if self.required { 1 } else { 0 });
        if len < min {
            return Err(self.error(ValidationCode::TooShort));
        }
        if self.max_length.map(|max| len > max).unwrap_or(false) {
            return Err(self.error(ValidationCode::TooLong));
        }

        match self.kind {
            FieldKind::Phone => {
                if !(PHONE_MIN_LEN..=PHONE_MAX_LEN).contains(&len) || !self.matches_grammar(text) {
                    return Err(self.error(ValidationCode::InvalidPhone));
                }
            }
            FieldKind::Email if !self.matches_grammar(text) => {
                return Err(self.error(ValidationCode::InvalidEmail));
            }
            FieldKind::Url if !self.matches_grammar(text) => {
                return Err(self.error(ValidationCode::InvalidUrl));
            }
            _ => {}
        }

        if let Some(pattern) = &self.pattern {
            if !pattern.is_match(text) {
                return Err(self.error(ValidationCode::PatternMismatch));
            }
        }

        if self.min_value.is_some() || self.max_value.is_some() {
            let number: f64 = text
                .parse()
                .map_err(|_| self.error(ValidationCode::NotANumber))?;
            let below = self.min_value.map(|min| number < min).unwrap_or(false);
            let above = self.max_value.map(|max| number > max).unwrap_or(false);
            if below || above {
                return Err(self.error(ValidationCode::OutOfRange));
            }
        }

        Ok(())
    }

    fn matches_grammar(&self, text: &str) -> bool {
        self.grammar.as_ref().map(|g| g.is_match(text)).unwrap_or(true)
    }

    fn error(&self, code: ValidationCode) -> FieldError {
        FieldError::new(&self.field, code, self.message(code))
    }

    fn message(&self, code: ValidationCode) -> LocalizedText {
        match code {
            ValidationCode::Required => {
                LocalizedText::new("This field is required", "هذا الحقل مطلوب")
            }
            ValidationCode::TooShort => {
                let n = self.min_length.unwrap_or(1);
                LocalizedText::new(
                    format!("Must be at least {n} characters"),
                    format!("يجب ألا يقل عن {n} أحرف"),
                )
            }
            ValidationCode::TooLong => {
                let n = self.max_length.unwrap_or_default();
                LocalizedText::new(
                    format!("Must be at most {n} characters"),
                    format!("يجب ألا يزيد عن {n} حرفاً"),
                )
            }
            ValidationCode::InvalidEmail => {
                LocalizedText::new("Enter a valid email address", "أدخل بريداً إلكترونياً صحيحاً")
            }
            ValidationCode::InvalidPhone => LocalizedText::new(
                format!("Enter a valid phone number ({PHONE_MIN_LEN}-{PHONE_MAX_LEN} digits)"),
                format!("أدخل رقم هاتف صحيح ({PHONE_MIN_LEN}-{PHONE_MAX_LEN} رقماً)"),
            ),
            ValidationCode::InvalidUrl => {
                LocalizedText::new("Enter a valid URL", "أدخل رابطاً صحيحاً")
            }
            ValidationCode::PatternMismatch => {
                LocalizedText::new("Invalid format", "صيغة غير صحيحة")
            }
            ValidationCode::NotANumber => LocalizedText::new("Enter a number", "أدخل رقماً"),
            ValidationCode::OutOfRange => {
                let min = self.min_value.unwrap_or(f64::MIN);
                let max = self.max_value.unwrap_or(f64::MAX);
                LocalizedText::new(
                    format!("Must be between {min} and {max}"),
                    format!("يجب أن يكون بين {min} و {max}"),
                )
            }
            ValidationCode::NotAnOption => {
                LocalizedText::new("Choose one of the listed options", "اختر أحد الخيارات المتاحة")
            }
            ValidationCode::MustAccept => LocalizedText::new(
                "You must agree to the privacy policy",
                "يجب الموافقة على سياسة الخصوصية",
            ),
            ValidationCode::WrongType => LocalizedText::new("Invalid value", "قيمة غير صالحة"),
        }
    }
}

fn compile(field: &str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| FormsError::Configuration(format!("field {field}: invalid pattern: {e}")))
}

/// Rules for one service category, in schema order
#[derive(Clone, Debug)]
pub struct ValidationRuleset {
    pub category: ServiceCategory,
    rules: Vec<FieldRule>,
    index: HashMap<String, usize>,
}

impl ValidationRuleset {
    pub fn from_schema(schema: &FormSchema) -> Result<Self> {
        let mut rules = schema
            .fields()
            .map(FieldRule::from_definition)
            .collect::<Result<Vec<_>>>()?;

        match rules.iter_mut().find(|r| r.field == PRIVACY_FIELD) {
            Some(rule) => {
                rule.kind = FieldKind::Checkbox;
                rule.required = true;
                rule.visible_when = None;
            }
            None => rules.push(FieldRule::privacy_consent()),
        }

        let index = rules
            .iter()
            .enumerate()
            .map(|(i, r)| (r.field.clone(), i))
            .collect();

        Ok(Self { category: schema.category, rules, index })
    }

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.index.get(field).map(|&i| &self.rules[i])
    }

    pub fn field_ids(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.field.as_str())
    }

    /// Live check of one field. Ids without a rule pass.
    pub fn check_field(
        &self,
        field: &str,
        value: Option<&FieldValue>,
    ) -> std::result::Result<(), FieldError> {
        match self.rule(field) {
            Some(rule) => rule.check(value),
            None => Ok(()),
        }
    }

    /// Check the listed fields that are visible under `values`
    pub fn check_fields<'a, I>(
        &self,
        fields: I,
        values: &BTreeMap<String, FieldValue>,
    ) -> std::result::Result<(), ValidationErrors>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut errors = ValidationErrors::default();
        for field in fields {
            if let Some(rule) = self.rule(field) {
                if !rule.is_visible(values) {
                    continue;
                }
                if let Err(e) = rule.check(values.get(field)) {
                    errors.insert(e);
                }
            }
        }
        errors.into_result()
    }

    /// Full payload check, including the privacy consent
    pub fn check_values(
        &self,
        values: &BTreeMap<String, FieldValue>,
    ) -> std::result::Result<(), ValidationErrors> {
        self.check_fields(self.field_ids(), values)
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable category → ruleset table
#[derive(Debug, Default)]
pub struct ValidationRuleRegistry {
    rulesets: HashMap<ServiceCategory, std::result::Result<Arc<ValidationRuleset>, String>>,
}

impl ValidationRuleRegistry {
    /// Process-wide registry mirroring [`FormSchemaRegistry::global`]
    pub fn global() -> &'static ValidationRuleRegistry {
        static REGISTRY: OnceLock<ValidationRuleRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::from_schemas(FormSchemaRegistry::global()))
    }

    /// Derive one ruleset per schema. A schema whose rules cannot be built is
    /// recorded as broken and reported when its ruleset is requested.
    pub fn from_schemas(schemas: &FormSchemaRegistry) -> Self {
        let rulesets = schemas
            .schemas()
            .map(|schema| {
                let ruleset = ValidationRuleset::from_schema(schema)
                    .map(Arc::new)
                    .map_err(|e| {
                        tracing::error!(
                            category = %schema.category,
                            error = %e,
                            "ruleset build failed"
                        );
                        e.to_string()
                    });
                (schema.category, ruleset)
            })
            .collect();
        Self { rulesets }
    }

    pub fn ruleset(&self, category: ServiceCategory) -> Result<Arc<ValidationRuleset>> {
        match self.rulesets.get(&category) {
            Some(Ok(ruleset)) => Ok(ruleset.clone()),
            Some(Err(reason)) => Err(FormsError::Configuration(reason.clone())),
            None => Err(FormsError::Configuration(format!(
                "no validation ruleset for {category}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SectionDefinition;

    fn ruleset(category: ServiceCategory) -> Arc<ValidationRuleset> {
        ValidationRuleRegistry::global().ruleset(category).unwrap()
    }

    fn text(s: &str) -> FieldValue {
        FieldValue::text(s)
    }

    #[test]
    fn test_rulesets_cover_required_schema_fields() {
        for schema in FormSchemaRegistry::global().schemas() {
            let rules = ruleset(schema.category);
            let ids: Vec<&str> = rules.field_ids().collect();
            for required in schema.required_field_ids() {
                assert!(ids.contains(&required), "{}: {}", schema.category, required);
            }
        }
    }

    #[test]
    fn test_unknown_category_is_configuration_error() {
        let registry = ValidationRuleRegistry::from_schemas(&FormSchemaRegistry::from_schemas(vec![]));
        assert!(matches!(
            registry.ruleset(ServiceCategory::CustomSystems),
            Err(FormsError::Configuration(_))
        ));
    }

    #[test]
    fn test_broken_pattern_is_configuration_error() {
        let schema = FormSchema {
            category: ServiceCategory::GeneralInquiry,
            service_name: LocalizedText::new("General", "عام"),
            sections: vec![SectionDefinition::new(
                "s",
                LocalizedText::new("S", "S"),
                vec![FieldDefinition::new("code", FieldKind::ShortText, LocalizedText::new("Code", "Code"))
                    .pattern("([unclosed")],
            )],
        };
        let registry = ValidationRuleRegistry::from_schemas(&FormSchemaRegistry::from_schemas(vec![schema]));
        assert!(registry.ruleset(ServiceCategory::GeneralInquiry).is_err());
    }

    #[test]
    fn test_text_lengths() {
        let rules = ruleset(ServiceCategory::GeneralInquiry);
        let err = rules.check_field("fullName", Some(&text("J"))).unwrap_err();
        assert_eq!(err.code, ValidationCode::TooShort);
        assert!(rules.check_field("fullName", Some(&text("Jane Doe"))).is_ok());
        let err = rules.check_field("fullName", Some(&text(&"x".repeat(101)))).unwrap_err();
        assert_eq!(err.code, ValidationCode::TooLong);
        let err = rules.check_field("fullName", None).unwrap_err();
        assert_eq!(err.code, ValidationCode::Required);
    }

    #[test]
    fn test_email_grammar() {
        let rules = ruleset(ServiceCategory::GeneralInquiry);
        assert!(rules.check_field("email", Some(&text("jane@acme.com"))).is_ok());
        assert!(rules.check_field("email", Some(&text("jane.doe+leads@mail.acme.sa"))).is_ok());
        for bad in ["jane", "jane@", "@acme.com", "jane@acme", "jane@@acme.com", "jane @acme.com"] {
            let err = rules.check_field("email", Some(&text(bad))).unwrap_err();
            assert_eq!(err.code, ValidationCode::InvalidEmail, "{bad}");
        }
    }

    #[test]
    fn test_phone_is_loose() {
        let rules = ruleset(ServiceCategory::GeneralInquiry);
        assert!(rules.check_field("phone", Some(&text("+966 (55) 123-4567"))).is_ok());
        assert!(rules.check_field("phone", Some(&text("12345678"))).is_ok());
        for bad in ["1234567", "123456789012345678901", "0555-CALL-NOW"] {
            let err = rules.check_field("phone", Some(&text(bad))).unwrap_err();
            assert_eq!(err.code, ValidationCode::InvalidPhone, "{bad}");
        }
        // optional and blank
        assert!(rules.check_field("phone", Some(&text(""))).is_ok());
    }

    #[test]
    fn test_select_membership() {
        let rules = ruleset(ServiceCategory::WebDevelopment);
        assert!(rules.check_field("websiteType", Some(&text("e-commerce"))).is_ok());
        let err = rules.check_field("websiteType", Some(&text("blockchain"))).unwrap_err();
        assert_eq!(err.code, ValidationCode::NotAnOption);
    }

    #[test]
    fn test_multi_select() {
        let rules = ruleset(ServiceCategory::WebDevelopment);
        let err = rules.check_field("features", Some(&FieldValue::List(vec![]))).unwrap_err();
        assert_eq!(err.code, ValidationCode::Required);
        assert!(rules.check_field("features", Some(&FieldValue::list(["cms", "seo"]))).is_ok());
        let err = rules
            .check_field("features", Some(&FieldValue::list(["cms", "metaverse"])))
            .unwrap_err();
        assert_eq!(err.code, ValidationCode::NotAnOption);
    }

    #[test]
    fn test_numeric_bounds_and_pattern() {
        let rules = ruleset(ServiceCategory::WebDevelopment);
        assert!(rules.check_field("expectedPages", Some(&text("12"))).is_ok());
        assert_eq!(
            rules.check_field("expectedPages", Some(&text("0"))).unwrap_err().code,
            ValidationCode::OutOfRange
        );
        assert_eq!(
            rules.check_field("expectedPages", Some(&text("ten"))).unwrap_err().code,
            ValidationCode::PatternMismatch
        );
    }

    #[test]
    fn test_url_grammar() {
        let rules = ruleset(ServiceCategory::WebDevelopment);
        assert!(rules.check_field("existingWebsite", Some(&text("https://acme.com/about"))).is_ok());
        assert_eq!(
            rules.check_field("existingWebsite", Some(&text("acme dot com"))).unwrap_err().code,
            ValidationCode::InvalidUrl
        );
    }

    #[test]
    fn test_privacy_must_be_accepted() {
        let rules = ruleset(ServiceCategory::GeneralInquiry);
        let err = rules.check_field(PRIVACY_FIELD, Some(&FieldValue::Bool(false))).unwrap_err();
        assert_eq!(err.code, ValidationCode::MustAccept);
        assert!(rules.check_field(PRIVACY_FIELD, Some(&FieldValue::Bool(true))).is_ok());
    }

    #[test]
    fn test_privacy_rule_added_when_schema_omits_it() {
        let schema = FormSchema {
            category: ServiceCategory::GeneralInquiry,
            service_name: LocalizedText::new("General", "عام"),
            sections: vec![SectionDefinition::new(
                "s",
                LocalizedText::new("S", "S"),
                vec![FieldDefinition::new("email", FieldKind::Email, LocalizedText::new("Email", "Email"))],
            )],
        };
        let rules = ValidationRuleset::from_schema(&schema).unwrap();
        let errors = rules.check_values(&BTreeMap::new()).unwrap_err();
        assert_eq!(errors.fields(), vec![PRIVACY_FIELD.to_string()]);
    }

    #[test]
    fn test_hidden_fields_are_skipped() {
        let rules = ruleset(ServiceCategory::WebDevelopment);
        let mut values = BTreeMap::new();
        values.insert("hasDomainHosting".to_string(), text("yes-both"));
        assert!(rules.check_fields(["hasDomainHosting", "hostingStatus"], &values).is_ok());

        values.insert("hasDomainHosting".to_string(), text("no"));
        let errors = rules
            .check_fields(["hasDomainHosting", "hostingStatus"], &values)
            .unwrap_err();
        assert!(errors.contains("hostingStatus"));
    }

    #[test]
    fn test_messages_are_bilingual() {
        let rules = ruleset(ServiceCategory::GeneralInquiry);
        let err = rules.check_field("email", Some(&text("nope"))).unwrap_err();
        assert!(!err.message.en.is_empty());
        assert!(!err.message.ar.is_empty());
        assert_ne!(err.message.en, err.message.ar);
    }
}
