//! Records
//!
//! Provides [`Record`] and its identifier [`RecordId`].

use crate::error::ModelError;
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// Unique record identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Integer id
    Int(i64),
    /// String id
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
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
        Self::Text(value.to_string())
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// One project entity
///
/// The `id` is fixed at construction; there is no setter. Field order is
/// preserved as inserted, which keeps JSON output stable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRecord")]
pub struct Record {
    id: RecordId,
    #[serde(flatten)]
    fields: IndexMap<String, FieldValue>,
}

impl Record {
    /// Create a record with no fields
    #[inline]
    #[must_use]
    pub fn new(id: impl Into<RecordId>) -> Self {
        Self {
            id: id.into(),
            fields: IndexMap::new(),
        }
    }

    /// Add a field, returning the record
    ///
    /// A field named `id` is ignored; the identifier is not a field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        let key = key.into();
        if key != "id" {
            self.fields.insert(key, value.into());
        }
        self
    }

    /// Record identifier
    #[inline]
    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Look up a field value; `None` means absent
    #[inline]
    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// All fields in insertion order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &IndexMap<String, FieldValue> {
        &self.fields
    }

    /// String forms of every value, the id included
    pub fn searchable_strings(&self) -> impl Iterator<Item = String> + '_ {
        std::iter::once(self.id.to_string())
            .chain(self.fields.values().map(FieldValue::to_display_string))
    }

    /// Fields as a JSON object, without the id
    #[must_use]
    pub fn to_json_without_id(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(k, v)| (k.clone(), field_to_json(v)))
            .collect::<serde_json::Map<_, _>>();
        serde_json::Value::Object(map)
    }
}

fn field_to_json(value: &FieldValue) -> serde_json::Value {
    match value {
        FieldValue::Bool(b) => serde_json::Value::Bool(*b),
        #[allow(clippy::cast_possible_truncation)]
        FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 => {
            serde_json::Value::from(*n as i64)
        }
        FieldValue::Number(n) => serde_json::Number::from_f64(*n)
            .map_or(serde_json::Value::Null, serde_json::Value::Number),
        FieldValue::Text(s) => serde_json::Value::String(s.clone()),
    }
}

/// Loosely typed wire shape
#[derive(Deserialize)]
struct RawRecord {
    id: Option<serde_json::Value>,
    #[serde(flatten)]
    fields: IndexMap<String, serde_json::Value>,
}

impl TryFrom<RawRecord> for Record {
    type Error = ModelError;

    fn try_from(raw: RawRecord) -> Result<Self, Self::Error> {
        let id = match raw.id {
            Some(serde_json::Value::String(s)) => RecordId::Text(s),
            Some(serde_json::Value::Number(n)) => n
                .as_i64()
                .map(RecordId::Int)
                .ok_or_else(|| ModelError::InvalidId(n.to_string()))?,
            Some(other) => return Err(ModelError::InvalidId(other.to_string())),
            None => return Err(ModelError::MissingId),
        };

        let fields = raw
            .fields
            .into_iter()
            .filter_map(|(k, v)| FieldValue::from_json(v).map(|v| (k, v)))
            .collect();

        Ok(Self { id, fields })
    }
}
