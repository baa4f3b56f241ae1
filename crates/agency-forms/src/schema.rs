//! Form Schema Registry
//!
//! Declarative, per-service description of the inquiry form: ordered
//! sections (one per wizard step), each holding typed fields. Pure data,
//! built once and shared read-only.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, OnceLock};

use crate::catalog;
use crate::domain::value_objects::{FieldValue, LocalizedText, ServiceCategory};
use crate::error::{FormsError, Result};

// =============================================================================
// Core Types
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    ShortText,
    Email,
    Phone,
    Url,
    LongText,
    SingleSelect,
    MultiSelect,
    SingleChoiceSet,
    MultiChoiceSet,
    /// Boolean consent box
    Checkbox,
}

impl FieldKind {
    pub fn is_multi(&self) -> bool {
        matches!(self, Self::MultiSelect | Self::MultiChoiceSet)
    }

    pub fn is_single_choice(&self) -> bool {
        matches!(self, Self::SingleSelect | Self::SingleChoiceSet)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub value: String,
    pub label: LocalizedText,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldConstraints {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub pattern: Option<String>,
}

/// Shows a field only while another field holds one of `values`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisibilityCondition {
    pub field: String,
    pub values: Vec<String>,
}

impl VisibilityCondition {
    pub fn is_met(&self, values: &BTreeMap<String, FieldValue>) -> bool {
        values
            .get(&self.field)
            .map(|current| self.values.iter().any(|v| current.selects(v)))
            .unwrap_or(false)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDefinition {
    pub id: String,
    pub kind: FieldKind,
    pub label: LocalizedText,
    pub placeholder: Option<LocalizedText>,
    pub description: Option<LocalizedText>,
    pub required: bool,
    pub options: Vec<FieldOption>,
    pub constraints: FieldConstraints,
    pub visible_when: Option<VisibilityCondition>,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, kind: FieldKind, label: LocalizedText) -> Self {
        Self {
            id: id.into(),
            kind,
            label,
            placeholder: None,
            description: None,
            required: false,
            options: Vec::new(),
            constraints: FieldConstraints::default(),
            visible_when: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn placeholder(mut self, text: LocalizedText) -> Self {
        self.placeholder = Some(text);
        self
    }

    pub fn description(mut self, text: LocalizedText) -> Self {
        self.description = Some(text);
        self
    }

    pub fn options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn length(mut self, min: Option<usize>, max: Option<usize>) -> Self {
        self.constraints.min_length = min;
        self.constraints.max_length = max;
        self
    }

    pub fn bounds(mut self, min: f64, max: f64) -> Self {
        self.constraints.min_value = Some(min);
        self.constraints.max_value = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.constraints.pattern = Some(pattern.into());
        self
    }

    pub fn visible_when(mut self, field: impl Into<String>, values: &[&str]) -> Self {
        self.visible_when = Some(VisibilityCondition {
            field: field.into(),
            values: values.iter().map(|v| v.to_string()).collect(),
        });
        self
    }

    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Whether `field` is shown given the live value map.
///
/// Fields without a condition are always visible.
pub fn is_visible(field: &FieldDefinition, values: &BTreeMap<String, FieldValue>) -> bool {
    field
        .visible_when
        .as_ref()
        .map(|condition| condition.is_met(values))
        .unwrap_or(true)
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SectionDefinition {
    pub id: String,
    pub title: LocalizedText,
    pub description: Option<LocalizedText>,
    pub fields: Vec<FieldDefinition>,
}

impl SectionDefinition {
    pub fn new(id: impl Into<String>, title: LocalizedText, fields: Vec<FieldDefinition>) -> Self {
        Self { id: id.into(), title, description: None, fields }
    }

    pub fn with_description(mut self, description: LocalizedText) -> Self {
        self.description = Some(description);
        self
    }

    /// Fields currently shown, in declaration order
    pub fn visible_fields<'a>(
        &'a self,
        values: &'a BTreeMap<String, FieldValue>,
    ) -> impl Iterator<Item = &'a FieldDefinition> + 'a {
        self.fields.iter().filter(move |f| is_visible(f, values))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub category: ServiceCategory,
    pub service_name: LocalizedText,
    pub sections: Vec<SectionDefinition>,
}

impl FormSchema {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn section(&self, index: usize) -> Option<&SectionDefinition> {
        self.sections.get(index)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, id: &str) -> Option<&FieldDefinition> {
        self.fields().find(|f| f.id == id)
    }

    pub fn required_field_ids(&self) -> Vec<&str> {
        self.fields().filter(|f| f.required).map(|f| f.id.as_str()).collect()
    }

    /// Structural integrity: unique field ids, options on choice kinds,
    /// conditions that point at declared fields.
    pub fn check(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for field in self.fields() {
            if !seen.insert(field.id.as_str()) {
                return Err(FormsError::Configuration(format!(
                    "{}: duplicate field id {}",
                    self.category, field.id
                )));
            }
            let is_choice = field.kind.is_multi() || field.kind.is_single_choice();
            if is_choice && field.options.is_empty() {
                return Err(FormsError::Configuration(format!(
                    "{}: field {} has no options",
                    self.category, field.id
                )));
            }
        }
        for field in self.fields() {
            if let Some(condition) = &field.visible_when {
                if !seen.contains(condition.field.as_str()) {
                    return Err(FormsError::Configuration(format!(
                        "{}: field {} depends on undeclared field {}",
                        self.category, field.id, condition.field
                    )));
                }
            }
        }
        Ok(())
    }
}

// =============================================================================
// Registry
// =============================================================================

/// Immutable category → schema table
#[derive(Debug, Default)]
pub struct FormSchemaRegistry {
    schemas: HashMap<ServiceCategory, Arc<FormSchema>>,
    order: Vec<ServiceCategory>,
}

impl FormSchemaRegistry {
    /// Process-wide registry over the built-in catalog
    pub fn global() -> &'static FormSchemaRegistry {
        static REGISTRY: OnceLock<FormSchemaRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| Self::from_schemas(catalog::all()))
    }

    /// Build a registry; a later schema for the same category replaces an earlier one.
    pub fn from_schemas(schemas: Vec<FormSchema>) -> Self {
        let mut registry = Self::default();
        for schema in schemas {
            let category = schema.category;
            if registry.schemas.insert(category, Arc::new(schema)).is_none() {
                registry.order.push(category);
            }
        }
        registry
    }

    pub fn get(&self, category: ServiceCategory) -> Option<Arc<FormSchema>> {
        self.schemas.get(&category).cloned()
    }

    /// Categories in catalog order
    pub fn categories(&self) -> &[ServiceCategory] {
        &self.order
    }

    pub fn schemas(&self) -> impl Iterator<Item = &Arc<FormSchema>> {
        self.order.iter().filter_map(|c| self.schemas.get(c))
    }
}
