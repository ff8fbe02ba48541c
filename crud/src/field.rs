//! Field schema: what a form asks for and which values it accepts.
//!
//! DESIGN
//! ======
//! Schema mistakes (unknown input kinds, duplicate ids, a dropdown with
//! nothing to pick) are caught when the schema is built, not when it is
//! rendered. A `FieldSchema` that exists is always renderable.

#[cfg(test)]
#[path = "field_test.rs"]
mod field_test;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::record::{FieldValue, ID_KEY, Record, value_text};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("unknown field kind `{0}` (expected text, number, email, date, time, select, textarea or file)")]
    UnknownKind(String),
    #[error("field labelled `{label}` has an empty id")]
    EmptyId { label: String },
    #[error("duplicate field id `{0}`")]
    DuplicateId(String),
    #[error("field id `id` is reserved for the record identifier")]
    ReservedId,
    #[error("select field `{0}` has no selectable options")]
    SelectWithoutOptions(String),
    #[error("field `{0}` is not a select and cannot take options")]
    OptionsOnNonSelect(String),
    #[error("no field with id `{0}`")]
    UnknownField(String),
}

/// Input control kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Date,
    Time,
    Select,
    /// Multi-line rich content, stored as Markdown.
    RichText,
    File,
}

impl FieldKind {
    /// Wire name as used in schema definitions.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Date => "date",
            Self::Time => "time",
            Self::Select => "select",
            Self::RichText => "textarea",
            Self::File => "file",
        }
    }

    /// Native `<input type>` for single-line kinds; `None` for kinds rendered
    /// with a dedicated control.
    #[must_use]
    pub fn html_input_type(self) -> Option<&'static str> {
        match self {
            Self::Text => Some("text"),
            Self::Number => Some("number"),
            Self::Email => Some("email"),
            Self::Date => Some("date"),
            Self::Time => Some("time"),
            Self::Select | Self::RichText | Self::File => None,
        }
    }

    /// Value a fresh draft holds for this kind.
    #[must_use]
    pub fn empty_value(self) -> FieldValue {
        match self {
            Self::File => FieldValue::Null,
            _ => FieldValue::Text(String::new()),
        }
    }
}

impl FromStr for FieldKind {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "number" => Ok(Self::Number),
            "email" => Ok(Self::Email),
            "date" => Ok(Self::Date),
            "time" => Ok(Self::Time),
            "select" => Ok(Self::Select),
            "textarea" => Ok(Self::RichText),
            "file" => Ok(Self::File),
            other => Err(SchemaError::UnknownKind(other.to_owned())),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dropdown entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub disabled: bool,
}

impl SelectOption {
    #[must_use]
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self { value: value.into(), label: label.into(), disabled: false }
    }

    /// Disabled empty-value entry shown first in a dropdown.
    #[must_use]
    pub fn placeholder(label: impl Into<String>) -> Self {
        Self { value: String::new(), label: label.into(), disabled: true }
    }

    /// Options whose value and label are the same text.
    #[must_use]
    pub fn same(values: &[&str]) -> Vec<Self> {
        values.iter().map(|v| Self::new(*v, *v)).collect()
    }

    /// Build options out of fetched records, e.g. departments keyed by id.
    /// Records missing either key are skipped.
    #[must_use]
    pub fn from_records(records: &[Record], value_key: &str, label_key: &str) -> Vec<Self> {
        records
            .iter()
            .filter_map(|r| {
                let value = r.get(value_key).filter(|v| !v.is_null())?;
                let label = r.get(label_key).filter(|v| !v.is_null())?;
                Some(Self::new(value_text(value), value_text(label)))
            })
            .collect()
    }

    fn selectable(&self) -> bool {
        !self.disabled && !self.value.is_empty()
    }
}

/// Describes one form input.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    pub id: String,
    pub label: String,
    pub kind: FieldKind,
    pub options: Vec<SelectOption>,
    pub help_text: Option<String>,
    pub initial_value: Option<FieldValue>,
    pub required: bool,
    /// Options arrive later from the backend; see [`FieldSchema::with_options`].
    pub remote_options: bool,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(id: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            kind,
            options: Vec::new(),
            help_text: None,
            initial_value: None,
            required: kind != FieldKind::File,
            remote_options: false,
        }
    }

    #[must_use]
    pub fn text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Text)
    }

    #[must_use]
    pub fn number(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Number)
    }

    #[must_use]
    pub fn email(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Email)
    }

    #[must_use]
    pub fn date(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Date)
    }

    #[must_use]
    pub fn time(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::Time)
    }

    #[must_use]
    pub fn rich_text(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::RichText)
    }

    #[must_use]
    pub fn file(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(id, label, FieldKind::File)
    }

    /// Dropdown prefixed with the standard disabled placeholder.
    #[must_use]
    pub fn select(id: impl Into<String>, label: impl Into<String>, options: Vec<SelectOption>) -> Self {
        let mut field = Self::new(id, label, FieldKind::Select);
        field.options = with_placeholder(options);
        field
    }

    /// Dropdown whose options are fetched once the page mounts. Until then it
    /// holds only the placeholder.
    #[must_use]
    pub fn select_remote(id: impl Into<String>, label: impl Into<String>) -> Self {
        let mut field = Self::select(id, label, Vec::new());
        field.remote_options = true;
        field
    }

    #[must_use]
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help_text = Some(help.into());
        self
    }

    #[must_use]
    pub fn with_initial(mut self, value: FieldValue) -> Self {
        self.initial_value = Some(value);
        self
    }

    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Whether `value` may be stored in a draft for this field.
    ///
    /// Empty values are always accepted (an unset field); a select only takes
    /// the value of an enabled option, so a disabled placeholder can never be
    /// submitted.
    #[must_use]
    pub fn accepts(&self, value: &FieldValue) -> bool {
        if value.is_empty() {
            return true;
        }
        match (self.kind, value) {
            (FieldKind::File, FieldValue::File(_)) => true,
            (FieldKind::File, _) | (_, FieldValue::File(_)) => false,
            (FieldKind::Select, v) => {
                let text = v.as_input_text();
                self.options.iter().any(|o| o.selectable() && o.value == text)
            }
            _ => true,
        }
    }
}

fn with_placeholder(options: Vec<SelectOption>) -> Vec<SelectOption> {
    let has_placeholder = options.first().is_some_and(|o| o.value.is_empty() && o.disabled);
    if has_placeholder {
        return options;
    }
    let mut out = Vec::with_capacity(options.len() + 1);
    out.push(SelectOption::placeholder("Select an option"));
    out.extend(options);
    out
}

/// An ordered, validated list of field descriptors.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldSchema {
    fields: Vec<FieldDescriptor>,
}

impl FieldSchema {
    /// Validate and wrap a list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns the first schema mistake found: an empty, duplicate or reserved
    /// id, options on a non-select, or a select with no selectable option.
    pub fn new(fields: Vec<FieldDescriptor>) -> Result<Self, SchemaError> {
        let mut seen = HashSet::with_capacity(fields.len());
        for field in &fields {
            if field.id.trim().is_empty() {
                return Err(SchemaError::EmptyId { label: field.label.clone() });
            }
            if field.id == ID_KEY {
                return Err(SchemaError::ReservedId);
            }
            if !seen.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateId(field.id.clone()));
            }
            match field.kind {
                FieldKind::Select
                    if !field.remote_options && !field.options.iter().any(SelectOption::selectable) =>
                {
                    return Err(SchemaError::SelectWithoutOptions(field.id.clone()));
                }
                FieldKind::Select => {}
                _ if !field.options.is_empty() => {
                    return Err(SchemaError::OptionsOnNonSelect(field.id.clone()));
                }
                _ => {}
            }
        }
        Ok(Self { fields })
    }

    /// Copy of this schema with a select field's options replaced, e.g. once
    /// they have been fetched from the backend.
    ///
    /// # Errors
    ///
    /// Fails when the field does not exist, is not a select, or the new
    /// option list has nothing selectable.
    pub fn with_options(&self, field_id: &str, options: Vec<SelectOption>) -> Result<Self, SchemaError> {
        let mut fields = self.fields.clone();
        let field = fields
            .iter_mut()
            .find(|f| f.id == field_id)
            .ok_or_else(|| SchemaError::UnknownField(field_id.to_owned()))?;
        if field.kind != FieldKind::Select {
            return Err(SchemaError::OptionsOnNonSelect(field_id.to_owned()));
        }
        field.options = with_placeholder(options);
        field.remote_options = false;
        Self::new(fields)
    }

    /// Ids of select fields still waiting for remote options.
    pub fn pending_remote(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().filter(|f| f.remote_options).map(|f| f.id.as_str())
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
