//! Domain rows and draft values.
//!
//! A `Record` is an open-ended JSON object that must carry an `id`. The
//! dashboard never owns a typed struct per HR entity; the schema describes the
//! shape and the record stays a map so one coordinator serves every page.

#[cfg(test)]
#[path = "record_test.rs"]
mod record_test;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Key under which every record stores its identifier.
pub const ID_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RecordError {
    #[error("record must be a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("record is missing an `id` field")]
    MissingId,
    #[error("record id must be a number or string, got {0}")]
    InvalidId(&'static str),
    #[error("list body must be an array or a `results` envelope, got {0}")]
    NotAList(&'static str),
}

/// Identifier of a record, as issued by the backend or assigned locally.
///
/// Numeric ids sort before text ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Parse an id out of a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::InvalidId`] for anything but an integer or a
    /// non-empty string.
    pub fn from_json(value: &Value) -> Result<Self, RecordError> {
        match value {
            Value::Number(n) => n.as_i64().map(Self::Int).ok_or(RecordError::InvalidId("fractional number")),
            Value::String(s) if !s.is_empty() => Ok(Self::Text(s.clone())),
            Value::String(_) => Err(RecordError::InvalidId("empty string")),
            other => Err(RecordError::InvalidId(json_kind(other))),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Int(n) => Value::from(*n),
            Self::Text(s) => Value::String(s.clone()),
        }
    }

    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// One domain row: a JSON object with an `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Build a record with the given id and no other fields.
    #[must_use]
    pub fn new(id: RecordId) -> Self {
        let mut map = Map::new();
        map.insert(ID_KEY.to_owned(), id.to_json());
        Self(map)
    }

    /// Validate and wrap a JSON value returned by the backend.
    ///
    /// # Errors
    ///
    /// Fails when the value is not an object or has no usable `id`.
    pub fn from_json(value: Value) -> Result<Self, RecordError> {
        let Value::Object(map) = value else {
            return Err(RecordError::NotAnObject(json_kind(&value)));
        };
        let id = map.get(ID_KEY).ok_or(RecordError::MissingId)?;
        RecordId::from_json(id)?;
        Ok(Self(map))
    }

    /// Build a record from an id plus a field payload. An `id` inside the
    /// payload is ignored.
    #[must_use]
    pub fn with_fields(id: RecordId, fields: &Map<String, Value>) -> Self {
        let mut record = Self::new(id);
        record.merge(fields);
        record
    }

    /// The record's identifier.
    ///
    /// Records are only constructed through validating paths, so the id is
    /// always present; a malformed id degrades to its JSON text.
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.0
            .get(ID_KEY)
            .and_then(|v| RecordId::from_json(v).ok())
            .unwrap_or_else(|| RecordId::Text(self.0.get(ID_KEY).map(Value::to_string).unwrap_or_default()))
    }

    pub(crate) fn set_id(&mut self, id: &RecordId) {
        self.0.insert(ID_KEY.to_owned(), id.to_json());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Set a non-id field. Writes to `id` are ignored.
    pub fn set(&mut self, key: &str, value: Value) {
        if key == ID_KEY {
            return;
        }
        self.0.insert(key.to_owned(), value);
    }

    /// Shallow-merge `patch` over this record, keeping the existing id.
    pub fn merge(&mut self, patch: &Map<String, Value>) {
        for (key, value) in patch {
            self.set(key, value.clone());
        }
    }

    /// Display text for one field, empty when absent.
    #[must_use]
    pub fn display(&self, key: &str) -> String {
        self.0.get(key).map(display_value).unwrap_or_default()
    }

    #[must_use]
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    #[must_use]
    pub fn into_json(self) -> Value {
        Value::Object(self.0)
    }
}

/// Reference to a user-selected file. The content is never read here; the
/// page uploads it separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub size: u64,
    #[serde(default)]
    pub mime: String,
}

/// Current value of one form field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// Nothing chosen; used for cleared file inputs.
    #[default]
    Null,
    Text(String),
    Number(f64),
    File(FileRef),
    /// Seeded booleans, arrays and non-file objects, kept as stored so an
    /// untouched field submits exactly what it was seeded with.
    Json(Value),
}

impl FieldValue {
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// True for `Null` and the empty string.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::Number(_) | Self::File(_) | Self::Json(_) => false,
        }
    }

    /// String form used to drive native inputs.
    #[must_use]
    pub fn as_input_text(&self) -> String {
        match self {
            Self::Null => String::new(),
            Self::Text(s) => s.clone(),
            Self::Number(n) => format_number(*n),
            Self::File(f) => f.name.clone(),
            Self::Json(v) => value_text(v),
        }
    }

    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Text(s) => Value::String(s.clone()),
            Self::Number(n) => number_to_json(*n),
            Self::File(f) => serde_json::to_value(f).unwrap_or(Value::Null),
            Self::Json(v) => v.clone(),
        }
    }

    /// Interpret a stored JSON value as a draft value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::String(s) => Self::Text(s.clone()),
            Value::Number(n) => n.as_f64().map_or(Self::Null, Self::Number),
            Value::Object(_) => serde_json::from_value::<FileRef>(value.clone())
                .map_or_else(|_| Self::Json(value.clone()), Self::File),
            Value::Bool(_) | Value::Array(_) => Self::Json(value.clone()),
        }
    }
}

/// Render any JSON value as table-cell text.
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_f64().map(format_number))
            .unwrap_or_default(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_owned(),
        Value::Object(map) => map
            .get("name")
            .and_then(Value::as_str)
            .map_or_else(|| value.to_string(), ToOwned::to_owned),
        Value::Array(items) => items.iter().map(display_value).collect::<Vec<_>>().join(", "),
    }
}

/// Raw text of a JSON value: strings unquoted, everything else as JSON.
pub(crate) fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
pub(crate) fn number_to_json(n: f64) -> Value {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return Value::from(n as i64);
    }
    serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 9.0e15 {
        return (n as i64).to_string();
    }
    n.to_string()
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
