//! REST endpoint descriptions for remote resources.
//!
//! The HR backend is Django-flavoured: every collection and item URL carries a
//! trailing slash, and some collections expose their primary key under a name
//! other than `id`.

#[cfg(test)]
#[path = "endpoint_test.rs"]
mod endpoint_test;

use serde_json::Value;

use crate::record::{ID_KEY, Record, RecordError, RecordId, json_kind};

/// Where a resource lives on the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceEndpoint {
    /// Collection path without leading or trailing slashes.
    pub collection: String,
    /// Key the backend uses for the primary key.
    pub id_field: String,
}

impl ResourceEndpoint {
    #[must_use]
    pub fn new(collection: &str) -> Self {
        Self { collection: collection.trim_matches('/').to_owned(), id_field: ID_KEY.to_owned() }
    }

    #[must_use]
    pub fn with_id_field(mut self, id_field: impl Into<String>) -> Self {
        self.id_field = id_field.into();
        self
    }

    /// `/company-setup/branches/`
    #[must_use]
    pub fn collection_url(&self) -> String {
        if self.collection.is_empty() {
            return "/".to_owned();
        }
        format!("/{}/", self.collection)
    }

    /// `/company-setup/branches/7/`
    #[must_use]
    pub fn item_url(&self, id: &RecordId) -> String {
        format!("{}{id}/", self.collection_url())
    }

    /// Turn one backend object into a `Record`, copying the backend's primary
    /// key into `id` when it uses a different name.
    ///
    /// # Errors
    ///
    /// Fails when the value is not an object or carries no usable id.
    pub fn to_record(&self, value: Value) -> Result<Record, RecordError> {
        let Value::Object(mut map) = value else {
            return Err(RecordError::NotAnObject(json_kind(&value)));
        };
        if self.id_field != ID_KEY && !map.contains_key(ID_KEY) {
            if let Some(id) = map.get(&self.id_field).cloned() {
                map.insert(ID_KEY.to_owned(), id);
            }
        }
        Record::from_json(Value::Object(map))
    }

    /// Decode a list response. Accepts a bare array or a paginated
    /// `{"results": [...]}` envelope; rows without an id are skipped.
    ///
    /// # Errors
    ///
    /// Fails when the body is neither shape.
    pub fn to_records(&self, body: Value) -> Result<Vec<Record>, RecordError> {
        let rows = match body {
            Value::Array(rows) => rows,
            Value::Object(mut map) => match map.remove("results") {
                Some(Value::Array(rows)) => rows,
                _ => return Err(RecordError::NotAList("object")),
            },
            other => return Err(RecordError::NotAList(json_kind(&other))),
        };
        let mut records = Vec::with_capacity(rows.len());
        for row in rows {
            match self.to_record(row) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!(collection = %self.collection, error = %e, "skipping row"),
            }
        }
        Ok(records)
    }
}

/// Options for a select field loaded from another collection at mount time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteOptions {
    pub field_id: String,
    pub source: ResourceEndpoint,
    pub value_key: String,
    pub label_key: String,
}

impl RemoteOptions {
    #[must_use]
    pub fn new(field_id: &str, collection: &str, value_key: &str, label_key: &str) -> Self {
        Self {
            field_id: field_id.to_owned(),
            source: ResourceEndpoint::new(collection),
            value_key: value_key.to_owned(),
            label_key: label_key.to_owned(),
        }
    }
}
