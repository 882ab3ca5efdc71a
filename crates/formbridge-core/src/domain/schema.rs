//! Column and field descriptors
//!
//! A column descriptor is what the table store reports about one column.
//! A field descriptor is what gets appended to a hosted form.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CoreError;

/// Name of the column that is never turned into a form field
pub const RESERVED_ID_COLUMN: &str = "id";

/// One column as reported by the table store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    /// Column name
    pub name: String,

    /// Raw data type symbol, parsed lazily so unknown types surface as schema errors
    #[serde(rename = "dataType")]
    pub data_type: String,
}

impl ColumnDescriptor {
    /// Create a new column descriptor
    pub fn new(name: impl Into<String>, data_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
        }
    }

    /// Whether this is the reserved `id` column
    pub fn is_reserved(&self) -> bool {
        self.name == RESERVED_ID_COLUMN
    }
}

/// Column data types the table store knows about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Free text
    String,
    /// Whole number
    Integer,
    /// Decimal number
    Float,
    /// True/false
    Boolean,
    /// Arbitrary JSON value
    Json,
}

impl DataType {
    /// The symbol used by the table store
    pub fn as_str(&self) -> &'static str {
        match self {
            DataType::String => "string",
            DataType::Integer => "integer",
            DataType::Float => "float",
            DataType::Boolean => "boolean",
            DataType::Json => "json",
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(DataType::String),
            "integer" => Ok(DataType::Integer),
            "float" => Ok(DataType::Float),
            "boolean" => Ok(DataType::Boolean),
            "json" => Ok(DataType::Json),
            other => Err(CoreError::SchemaError(format!(
                "unsupported data type '{}'",
                other
            ))),
        }
    }
}

/// Host form field kinds, with their validation baked in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Paragraph text, no validation
    LongText,
    /// Single-line text, no validation
    ShortText,
    /// Single-line text that must hold an integer
    ShortTextInteger,
    /// Single-line text that must hold a number
    ShortTextNumber,
    /// Checkbox
    Checkbox,
    /// Paragraph text expected to hold JSON
    LongTextJson,
}

impl FieldKind {
    /// The field kind used for a column of the given data type
    pub fn for_data_type(data_type: DataType) -> Self {
        match data_type {
            DataType::String => FieldKind::LongText,
            DataType::Integer => FieldKind::ShortTextInteger,
            DataType::Float => FieldKind::ShortTextNumber,
            DataType::Boolean => FieldKind::Checkbox,
            DataType::Json => FieldKind::LongTextJson,
        }
    }

    /// Text validation the host should enforce for this kind
    pub fn validation(&self) -> Option<TextValidation> {
        match self {
            FieldKind::ShortTextInteger => Some(TextValidation::new(
                ValidationRule::RequireWholeNumber,
                "Input must be an integer",
            )),
            FieldKind::ShortTextNumber => Some(TextValidation::new(
                ValidationRule::RequireNumber,
                "Input must be a number",
            )),
            _ => None,
        }
    }

    /// Help text shown under the field
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            FieldKind::LongTextJson => Some("JSON value"),
            _ => None,
        }
    }
}

/// Validation rules the host supports on text fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationRule {
    /// The answer must parse as a number
    RequireNumber,
    /// The answer must parse as a whole number
    RequireWholeNumber,
}

/// A text validation attached to a field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextValidation {
    /// The rule to enforce
    pub rule: ValidationRule,
    /// Message shown when the rule fails
    pub help_text: String,
}

impl TextValidation {
    fn new(rule: ValidationRule, help_text: &str) -> Self {
        Self {
            rule,
            help_text: help_text.to_string(),
        }
    }
}

/// One field to append to a hosted form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    /// Field title; for synthesized forms this is the column name verbatim
    pub title: String,

    /// Field kind
    pub kind: FieldKind,

    /// Optional help text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,

    /// Optional text validation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<TextValidation>,

    /// Whether an answer is required
    #[serde(default)]
    pub required: bool,
}

impl FieldDescriptor {
    /// Create a field of the given kind with the kind's help text and validation
    pub fn new(title: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            title: title.into(),
            kind,
            help_text: kind.help_text().map(str::to_string),
            validation: kind.validation(),
            required: false,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}
