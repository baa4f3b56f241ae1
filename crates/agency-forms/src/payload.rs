//! Inquiry payload
//!
//! Flattened, camelCase body sent to `POST /api/inquiry`. Built only from the
//! fields visible at submission time; category-specific answers travel as
//! extra top-level keys.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::domain::value_objects::{FieldValue, Locale, ServiceCategory};
use crate::schema::{is_visible, FormSchema};
use crate::validation::PRIVACY_FIELD;

/// Wire keys the endpoint insists on
const REQUIRED_FIELDS: [&str; 3] = ["fullName", "email", "companyName"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Email,
    Call,
    Whatsapp,
}

impl ContactMethod {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "email" => Some(Self::Email),
            "call" => Some(Self::Call),
            "whatsapp" => Some(Self::Whatsapp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Call => "call",
            Self::Whatsapp => "whatsapp",
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InquiryPayload {
    #[serde(default, deserialize_with = "text_or_empty")]
    pub full_name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub company_name: String,
    #[serde(default, deserialize_with = "text_or_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_contact: Option<ContactMethod>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub service_id: Option<ServiceCategory>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub budget_range: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub preferred_contact_time: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub agreed_to_privacy: bool,
    #[serde(default, deserialize_with = "optional_text", skip_serializing_if = "Option::is_none")]
    pub additional_comments: Option<String>,
    #[serde(default)]
    pub locale: Locale,
    /// Category-specific answers keyed by field id
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl InquiryPayload {
    /// Build from the session values. Hidden and blank fields are left out.
    pub fn from_values(
        schema: &FormSchema,
        values: &BTreeMap<String, FieldValue>,
        locale: Locale,
    ) -> Self {
        let mut payload = Self {
            service_id: Some(schema.category),
            locale,
            ..Self::default()
        };

        for field in schema.fields() {
            if !is_visible(field, values) {
                continue;
            }
            let Some(value) = values.get(&field.id) else {
                continue;
            };
            if field.id == PRIVACY_FIELD {
                payload.agreed_to_privacy = value.as_bool().unwrap_or(false);
                continue;
            }
            if value.is_empty() {
                continue;
            }
            payload.assign(&field.id, value);
        }

        payload
    }

    fn assign(&mut self, id: &str, value: &FieldValue) {
        let text = || flatten_text(value);
        match id {
            "fullName" => self.full_name = text(),
            "companyName" => self.company_name = text(),
            "email" => self.email = text(),
            "phone" => self.phone = Some(text()),
            "preferredContact" => match ContactMethod::parse(&text()) {
                Some(method) => self.preferred_contact = Some(method),
                None => {
                    self.extra.insert(id.to_string(), Value::String(text()));
                }
            },
            "industry" => self.industry = Some(text()),
            "description" => self.description = Some(text()),
            "budgetRange" => self.budget_range = Some(text()),
            "timeline" => self.timeline = Some(text()),
            "preferredContactTime" => self.preferred_contact_time = Some(text()),
            "additionalComments" => self.additional_comments = Some(text()),
            _ => {
                let json = serde_json::to_value(value).unwrap_or(Value::Null);
                self.extra.insert(id.to_string(), json);
            }
        }
    }

    /// The transport-level required trio: full name, email, company name
    pub fn missing_required_fields(&self) -> bool {
        [&self.full_name, &self.email, &self.company_name]
            .iter()
            .any(|s| s.trim().is_empty())
    }

    /// Same check on an undecoded body: each key must hold a non-blank string
    pub fn body_missing_required_fields(body: &Value) -> bool {
        REQUIRED_FIELDS.iter().any(|key| {
            body.get(key)
                .and_then(Value::as_str)
                .map_or(true, |s| s.trim().is_empty())
        })
    }

    pub fn extra_field(&self, id: &str) -> Option<&Value> {
        self.extra.get(id)
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn text_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn optional_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(scalar_text(Value::deserialize(deserializer)?))
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::String(s) => s == "true",
        _ => false,
    })
}

fn flatten_text(value: &FieldValue) -> String {
    match value {
        FieldValue::Text(s) => s.trim().to_string(),
        FieldValue::Bool(b) => b.to_string(),
        FieldValue::List(v) => v.join(", "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FormSchemaRegistry;
    use serde_json::json;

    fn web_schema() -> std::sync::Arc<FormSchema> {
        FormSchemaRegistry::global()
            .get(ServiceCategory::WebDevelopment)
            .unwrap()
    }

    #[test]
    fn test_camel_case_wire_shape() {
        let mut values = BTreeMap::new();
        values.insert("fullName".to_string(), FieldValue::text("Jane Doe"));
        values.insert("companyName".to_string(), FieldValue::text("Acme"));
        values.insert("email".to_string(), FieldValue::text("jane@acme.com"));
        values.insert("preferredContact".to_string(), FieldValue::text("whatsapp"));
        values.insert("features".to_string(), FieldValue::list(["cms", "seo"]));
        values.insert(PRIVACY_FIELD.to_string(), FieldValue::Bool(true));

        let payload = InquiryPayload::from_values(&web_schema(), &values, Locale::Ar);
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["fullName"], "Jane Doe");
        assert_eq!(json["companyName"], "Acme");
        assert_eq!(json["preferredContact"], "whatsapp");
        assert_eq!(json["serviceId"], "web-development");
        assert_eq!(json["agreedToPrivacy"], true);
        assert_eq!(json["locale"], "ar");
        assert_eq!(json["features"], json!(["cms", "seo"]));
        assert!(json.get("phone").is_none());
    }

    #[test]
    fn test_hidden_field_is_dropped_even_if_stale_value_exists() {
        let mut values = BTreeMap::new();
        values.insert("hasDomainHosting".to_string(), FieldValue::text("yes-both"));
        values.insert("hostingStatus".to_string(), FieldValue::text("manage-for-me"));

        let payload = InquiryPayload::from_values(&web_schema(), &values, Locale::En);
        assert_eq!(payload.extra_field("hasDomainHosting"), Some(&json!("yes-both")));
        assert!(payload.extra_field("hostingStatus").is_none());
    }

    #[test]
    fn test_unknown_keys_survive_deserialization() {
        let payload: InquiryPayload = serde_json::from_value(json!({
            "fullName": "Jane",
            "email": "jane@acme.com",
            "companyName": "Acme",
            "serviceId": "custom-systems",
            "systemType": "erp",
            "locale": "en"
        }))
        .unwrap();
        assert_eq!(payload.service_id, Some(ServiceCategory::CustomSystems));
        assert_eq!(payload.extra_field("systemType"), Some(&json!("erp")));
        assert!(!payload.missing_required_fields());
    }

    #[test]
    fn test_missing_required_fields() {
        let payload: InquiryPayload = serde_json::from_value(json!({
            "email": "jane@acme.com",
            "companyName": "Acme"
        }))
        .unwrap();
        assert!(payload.missing_required_fields());
        assert!(!payload.agreed_to_privacy);
        assert_eq!(payload.locale, Locale::En);
    }

    #[test]
    fn test_loose_scalars_are_coerced() {
        let payload: InquiryPayload = serde_json::from_value(json!({
            "fullName": null,
            "email": "jane@acme.com",
            "companyName": "Acme",
            "budgetRange": 5000,
            "phone": null,
            "agreedToPrivacy": "true"
        }))
        .unwrap();
        assert_eq!(payload.full_name, "");
        assert_eq!(payload.budget_range.as_deref(), Some("5000"));
        assert!(payload.phone.is_none());
        assert!(payload.agreed_to_privacy);
        assert!(payload.missing_required_fields());
    }

    #[test]
    fn test_required_check_on_raw_body() {
        let ok = json!({"fullName": "Jane", "email": "jane@acme.com", "companyName": "Acme"});
        assert!(!InquiryPayload::body_missing_required_fields(&ok));

        let null_name = json!({"fullName": null, "email": "jane@acme.com", "companyName": "Acme"});
        assert!(InquiryPayload::body_missing_required_fields(&null_name));

        let blank = json!({"fullName": "Jane", "email": "  ", "companyName": "Acme"});
        assert!(InquiryPayload::body_missing_required_fields(&blank));

        assert!(InquiryPayload::body_missing_required_fields(&json!([1, 2])));
    }
}
