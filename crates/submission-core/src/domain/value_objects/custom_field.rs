//! Custom field value objects
//!
//! A custom field is a typed, user-defined attribute attached to a
//! submission. The value is a tagged union keyed by [`FieldType`], so the
//! advanced/basic status is always derived from the variant and never stored.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::email::Email;

/// Closed set of custom field kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Number,
    Email,
    File,
    Date,
    Location,
    Price,
    Multiselect,
    Richtext,
    Currency,
}

impl FieldType {
    /// All kinds in declaration order
    pub const ALL: [FieldType; 10] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::File,
        FieldType::Date,
        FieldType::Location,
        FieldType::Price,
        FieldType::Multiselect,
        FieldType::Richtext,
        FieldType::Currency,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::File => "file",
            Self::Date => "date",
            Self::Location => "location",
            Self::Price => "price",
            Self::Multiselect => "multiselect",
            Self::Richtext => "richtext",
            Self::Currency => "currency",
        }
    }

    /// Recognized but not editable yet
    pub fn is_advanced(self) -> bool {
        !matches!(self, Self::Text | Self::Number | Self::Email)
    }

    /// Kinds whose value is a number
    pub fn is_numeric(self) -> bool {
        matches!(self, Self::Number | Self::Price | Self::Currency)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Untyped value as it arrives on the wire
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawFieldValue {
    Number(f64),
    Text(String),
}

impl From<&str> for RawFieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<f64> for RawFieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Typed custom field value, one variant per [`FieldType`]
#[derive(Clone, Debug, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Email(String),
    File(String),
    Date(String),
    Location(String),
    Price(f64),
    Multiselect(String),
    Richtext(String),
    Currency(f64),
}

impl FieldValue {
    /// Parse a raw value for the given kind.
    ///
    /// Numeric kinds accept numbers or numeric strings; the email kind
    /// requires a well-formed address; text-like kinds accept anything.
    pub fn parse(field_type: FieldType, raw: RawFieldValue) -> Result<Self, InvalidValue> {
        if field_type.is_numeric() {
            let number = match raw {
                RawFieldValue::Number(n) => n,
                RawFieldValue::Text(s) => s.trim().parse::<f64>().map_err(|_| InvalidValue)?,
            };
            if !number.is_finite() {
                return Err(InvalidValue);
            }
            return Ok(match field_type {
                FieldType::Price => Self::Price(number),
                FieldType::Currency => Self::Currency(number),
                _ => Self::Number(number),
            });
        }

        let text = match raw {
            RawFieldValue::Text(s) => s,
            RawFieldValue::Number(n) => n.to_string(),
        };

        Ok(match field_type {
            FieldType::Email => {
                if !Email::is_valid(&text) {
                    return Err(InvalidValue);
                }
                Self::Email(text.trim().to_string())
            }
            FieldType::File => Self::File(text),
            FieldType::Date => Self::Date(text),
            FieldType::Location => Self::Location(text),
            FieldType::Multiselect => Self::Multiselect(text),
            FieldType::Richtext => Self::Richtext(text),
            _ => Self::Text(text),
        })
    }

    /// The kind this value belongs to
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Text(_) => FieldType::Text,
            Self::Number(_) => FieldType::Number,
            Self::Email(_) => FieldType::Email,
            Self::File(_) => FieldType::File,
            Self::Date(_) => FieldType::Date,
            Self::Location(_) => FieldType::Location,
            Self::Price(_) => FieldType::Price,
            Self::Multiselect(_) => FieldType::Multiselect,
            Self::Richtext(_) => FieldType::Richtext,
            Self::Currency(_) => FieldType::Currency,
        }
    }

    /// Numbers are never empty
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Number(_) | Self::Price(_) | Self::Currency(_) => false,
            Self::Text(s)
            | Self::Email(s)
            | Self::File(s)
            | Self::Date(s)
            | Self::Location(s)
            | Self::Multiselect(s)
            | Self::Richtext(s) => s.trim().is_empty(),
        }
    }

    /// String form used by search
    pub fn as_search_text(&self) -> String {
        match self {
            Self::Number(n) | Self::Price(n) | Self::Currency(n) => n.to_string(),
            Self::Text(s)
            | Self::Email(s)
            | Self::File(s)
            | Self::Date(s)
            | Self::Location(s)
            | Self::Multiselect(s)
            | Self::Richtext(s) => s.clone(),
        }
    }

    fn to_raw(&self) -> RawFieldValue {
        match self {
            Self::Number(n) | Self::Price(n) | Self::Currency(n) => RawFieldValue::Number(*n),
            Self::Text(s)
            | Self::Email(s)
            | Self::File(s)
            | Self::Date(s)
            | Self::Location(s)
            | Self::Multiselect(s)
            | Self::Richtext(s) => RawFieldValue::Text(s.clone()),
        }
    }
}

/// Marker error from [`FieldValue::parse`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidValue;

/// Custom field validation errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("Field label is required")]
    EmptyLabel,

    #[error("Invalid value for {field_type} field '{label}'")]
    InvalidValue { label: String, field_type: FieldType },

    #[error("Field '{label}' is required")]
    Required { label: String },
}

/// Wire form of a custom field.
///
/// `isAdvanced` is written on output and ignored on input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomFieldInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub value: RawFieldValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_advanced: Option<bool>,
    #[serde(default)]
    pub required: bool,
}

impl CustomFieldInput {
    pub fn new(label: impl Into<String>, field_type: FieldType, value: impl Into<RawFieldValue>) -> Self {
        Self {
            id: None,
            label: label.into(),
            field_type,
            value: value.into(),
            is_advanced: None,
            required: false,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Validated custom field
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(into = "CustomFieldInput", try_from = "CustomFieldInput")]
pub struct CustomField {
    id: String,
    label: String,
    value: FieldValue,
    required: bool,
}

impl CustomField {
    /// Validate a wire field. A missing or blank id gets a fresh UUID.
    pub fn from_input(input: CustomFieldInput) -> Result<Self, FieldError> {
        let label = input.label.trim().to_string();
        if label.is_empty() {
            return Err(FieldError::EmptyLabel);
        }

        let value = FieldValue::parse(input.field_type, input.value).map_err(|_| {
            FieldError::InvalidValue {
                label: label.clone(),
                field_type: input.field_type,
            }
        })?;

        if input.required && value.is_empty() {
            return Err(FieldError::Required { label });
        }

        let id = match input.id {
            Some(id) if !id.trim().is_empty() => id,
            _ => uuid::Uuid::new_v4().to_string(),
        };

        Ok(Self {
            id,
            label,
            value,
            required: input.required,
        })
    }

    pub fn id(&self) -> &str { &self.id }
    pub fn label(&self) -> &str { &self.label }
    pub fn value(&self) -> &FieldValue { &self.value }
    pub fn required(&self) -> bool { self.required }
    pub fn field_type(&self) -> FieldType { self.value.field_type() }
    pub fn is_advanced(&self) -> bool { self.field_type().is_advanced() }

    /// Case-insensitive substring match on label or value
    pub fn matches(&self, needle_lower: &str) -> bool {
        self.label.to_lowercase().contains(needle_lower)
            || self.value.as_search_text().to_lowercase().contains(needle_lower)
    }
}

impl TryFrom<CustomFieldInput> for CustomField {
    type Error = FieldError;

    fn try_from(input: CustomFieldInput) -> Result<Self, Self::Error> {
        Self::from_input(input)
    }
}

impl From<CustomField> for CustomFieldInput {
    fn from(field: CustomField) -> Self {
        let field_type = field.field_type();
        Self {
            id: Some(field.id),
            label: field.label,
            field_type,
            value: field.value.to_raw(),
            is_advanced: Some(field_type.is_advanced()),
            required: field.required,
        }
    }
}
