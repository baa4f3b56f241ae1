//! Inquiry value objects
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FormsError;

// =============================================================================
// Locale
// =============================================================================

/// Display language of one session or request.
///
/// Resolved once by the host and passed down explicitly.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Ar,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ar => "ar",
        }
    }

    /// Arabic is laid out right-to-left
    pub fn is_rtl(&self) -> bool {
        matches!(self, Self::Ar)
    }
}

impl FromStr for Locale {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ar" => Ok(Self::Ar),
            other => Err(FormsError::Configuration(format!("unsupported locale: {other}"))),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// English/Arabic text pair
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedText {
    pub en: String,
    pub ar: String,
}

impl LocalizedText {
    pub fn new(en: impl Into<String>, ar: impl Into<String>) -> Self {
        Self { en: en.into(), ar: ar.into() }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Ar => &self.ar,
        }
    }
}

// =============================================================================
// Service category
// =============================================================================

/// Closed set of inquiry topics. Selects the schema and ruleset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceCategory {
    WebDevelopment,
    MobileAppDevelopment,
    CustomSystems,
    CybersecuritySolutions,
    GeneralInquiry,
}

impl ServiceCategory {
    pub const ALL: [ServiceCategory; 5] = [
        Self::WebDevelopment,
        Self::MobileAppDevelopment,
        Self::CustomSystems,
        Self::CybersecuritySolutions,
        Self::GeneralInquiry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WebDevelopment => "web-development",
            Self::MobileAppDevelopment => "mobile-app-development",
            Self::CustomSystems => "custom-systems",
            Self::CybersecuritySolutions => "cybersecurity-solutions",
            Self::GeneralInquiry => "general-inquiry",
        }
    }
}

impl FromStr for ServiceCategory {
    type Err = FormsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s.trim())
            .ok_or_else(|| FormsError::UnknownCategory(s.to_string()))
    }
}

impl fmt::Display for ServiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Field values
// =============================================================================

/// Value entered for one field: a string, a boolean or a list of option values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<String>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Blank text, `false` and the empty list count as "not filled in"
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.trim().is_empty(),
            Self::Bool(b) => !b,
            Self::List(v) => v.is_empty(),
        }
    }

    /// Whether this value selects `expected` (text equality, list membership,
    /// or the literal "true"/"false" for booleans).
    pub fn selects(&self, expected: &str) -> bool {
        match self {
            Self::Text(s) => s == expected,
            Self::Bool(b) => expected == if *b { "true" } else { "false" },
            Self::List(v) => v.iter().any(|s| s == expected),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(value: Vec<String>) -> Self {
        Self::List(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_round_trips_through_wire_id() {
        for category in ServiceCategory::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<ServiceCategory>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category() {
        assert!(matches!(
            "seo-services".parse::<ServiceCategory>(),
            Err(FormsError::UnknownCategory(id)) if id == "seo-services"
        ));
    }

    #[test]
    fn test_locale_parse_and_direction() {
        assert_eq!("AR".parse::<Locale>().unwrap(), Locale::Ar);
        assert!(Locale::Ar.is_rtl());
        assert!(!Locale::En.is_rtl());
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn test_field_value_untagged_json() {
        let v: FieldValue = serde_json::from_str("[\"seo\",\"cms\"]").unwrap();
        assert_eq!(v, FieldValue::list(["seo", "cms"]));
        let v: FieldValue = serde_json::from_str("true").unwrap();
        assert_eq!(v, FieldValue::Bool(true));
        let v: FieldValue = serde_json::from_str("\"no\"").unwrap();
        assert!(v.selects("no"));
    }

    #[test]
    fn test_field_value_emptiness() {
        assert!(FieldValue::text("   ").is_empty());
        assert!(FieldValue::Bool(false).is_empty());
        assert!(FieldValue::List(vec![]).is_empty());
        assert!(!FieldValue::text("x").is_empty());
    }
}
