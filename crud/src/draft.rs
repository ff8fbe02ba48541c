//! Form draft: the transient values behind one open add/edit modal.
//!
//! SYSTEM CONTEXT
//! ==============
//! `DynamicForm` in the client crate owns a `FormState` for exactly as long as
//! its modal is open. Values flow in through `set` on every keystroke and out
//! through `submit` as a flat JSON payload; nothing here is persisted.

#[cfg(test)]
#[path = "draft_test.rs"]
mod draft_test;

use serde_json::{Map, Value};

use crate::field::{FieldKind, FieldSchema};
use crate::record::{FieldValue, number_to_json};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("no field with id `{0}` in this form")]
    UnknownField(String),
    #[error("value `{value}` is not allowed for field `{field}`")]
    Rejected { field: String, value: String },
}

/// Field values keyed by field id, in schema order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FormDraft {
    values: Vec<(String, FieldValue)>,
}

impl FormDraft {
    /// Seed a draft: the initial value when present and non-null, else the
    /// field's own default, else empty (`null` for file inputs).
    #[must_use]
    pub fn seed(schema: &FieldSchema, initial: &Map<String, Value>) -> Self {
        let values = schema
            .iter()
            .map(|field| {
                let value = initial
                    .get(&field.id)
                    .filter(|v| !v.is_null())
                    .map(FieldValue::from_json)
                    .or_else(|| field.initial_value.clone())
                    .unwrap_or_else(|| field.kind.empty_value());
                (field.id.clone(), value)
            })
            .collect();
        Self { values }
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&FieldValue> {
        self.values.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The full draft as a JSON object, every field included.
    #[must_use]
    pub fn to_payload(&self) -> Map<String, Value> {
        self.values.iter().map(|(k, v)| (k.clone(), v.to_json())).collect()
    }

    fn slot_mut(&mut self, id: &str) -> Option<&mut FieldValue> {
        self.values.iter_mut().find(|(k, _)| k == id).map(|(_, v)| v)
    }
}

/// Draft plus the schema it was seeded from and the in-flight flag.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    schema: FieldSchema,
    draft: FormDraft,
    /// While true, submit and cancel are disabled and submit is relabelled.
    pub loading: bool,
}

impl FormState {
    #[must_use]
    pub fn new(schema: FieldSchema, initial: &Map<String, Value>) -> Self {
        let draft = FormDraft::seed(&schema, initial);
        Self { schema, draft, loading: false }
    }

    #[must_use]
    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    #[must_use]
    pub fn draft(&self) -> &FormDraft {
        &self.draft
    }

    #[must_use]
    pub fn value(&self, id: &str) -> FieldValue {
        self.draft.get(id).cloned().unwrap_or_default()
    }

    /// Record one field change.
    ///
    /// # Errors
    ///
    /// Fails for ids outside the schema and for values the field does not
    /// accept (e.g. a select value that is not an enabled option).
    pub fn set(&mut self, id: &str, value: FieldValue) -> Result<(), DraftError> {
        let field = self.schema.get(id).ok_or_else(|| DraftError::UnknownField(id.to_owned()))?;
        if !field.accepts(&value) {
            return Err(DraftError::Rejected { field: id.to_owned(), value: value.as_input_text() });
        }
        let slot = self.draft.slot_mut(id).ok_or_else(|| DraftError::UnknownField(id.to_owned()))?;
        *slot = value;
        Ok(())
    }

    /// Replace the draft with a fresh seed, e.g. when the same form is reused
    /// for a different row.
    pub fn reseed(&mut self, initial: &Map<String, Value>) {
        self.draft = FormDraft::seed(&self.schema, initial);
    }

    /// Swap in an updated schema (e.g. select options that finished loading
    /// while the form was open), keeping every value already in the draft.
    pub fn set_schema(&mut self, schema: FieldSchema) {
        self.draft = FormDraft::seed(&schema, &self.draft.to_payload());
        self.schema = schema;
    }

    /// Required fields that are still empty, in schema order.
    #[must_use]
    pub fn missing_required(&self) -> Vec<&str> {
        self.schema
            .iter()
            .filter(|f| f.required && self.draft.get(&f.id).is_none_or(FieldValue::is_empty))
            .map(|f| f.id.as_str())
            .collect()
    }

    /// The submit payload, or `None` while a previous submit is in flight.
    #[must_use]
    pub fn submit(&self) -> Option<Map<String, Value>> {
        if self.loading {
            return None;
        }
        Some(self.draft.to_payload())
    }
}

/// Turn numeric-looking `number` fields into JSON numbers before a payload is
/// sent. Empty strings become `null`; anything unparseable is left as typed.
#[must_use]
pub fn coerce_numbers(schema: &FieldSchema, mut payload: Map<String, Value>) -> Map<String, Value> {
    for field in schema.iter().filter(|f| f.kind == FieldKind::Number) {
        let Some(Value::String(raw)) = payload.get(&field.id) else {
            continue;
        };
        let trimmed = raw.trim();
        let coerced = if trimmed.is_empty() {
            Value::Null
        } else if let Ok(n) = trimmed.parse::<f64>() {
            number_to_json(n)
        } else {
            continue;
        };
        payload.insert(field.id.clone(), coerced);
    }
    payload
}
