//! Stage records: the named values a pipeline stage hands to the reporter.
//!
//! Field access is checked per stage so a missing or mis-shaped field fails
//! with the stage and field name instead of a bare lookup error.
use crate::value::Value;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Field name to value mapping for one report call.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Value>,
}

impl Record {
    /// Empty record; fill it with [`Record::with`] or [`Record::insert`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used by callers assembling a record inline.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(field, value);
        self
    }

    /// Set a field, replacing any earlier value.
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(field.into(), value.into());
    }

    /// Look up a field; optional fields are detected through this.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Parse a record from a JSON object.
    pub fn from_json(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub(crate) fn require(&self, stage: &str, field: &str) -> Result<&Value, RecordError> {
        self.get(field)
            .ok_or_else(|| RecordError::missing(stage, field))
    }

    pub(crate) fn require_seq(&self, stage: &str, field: &str) -> Result<&[Value], RecordError> {
        let value = self.require(stage, field)?;
        value
            .as_seq()
            .ok_or_else(|| RecordError::shape(stage, field, "sequence", value))
    }

    /// Require a sequence whose elements are themselves sequences.
    pub(crate) fn require_nested_seq(
        &self,
        stage: &str,
        field: &str,
    ) -> Result<Vec<&[Value]>, RecordError> {
        self.require_seq(stage, field)?
            .iter()
            .map(|item| {
                item.as_seq()
                    .ok_or_else(|| RecordError::shape(stage, field, "sequence of sequences", item))
            })
            .collect()
    }

    /// Require `field` to be a mapping and return its `key` entry.
    pub(crate) fn require_entry(
        &self,
        stage: &str,
        field: &str,
        key: &str,
    ) -> Result<&Value, RecordError> {
        let value = self.require(stage, field)?;
        let map = value
            .as_map()
            .ok_or_else(|| RecordError::shape(stage, field, "mapping", value))?;
        map.get(key)
            .ok_or_else(|| RecordError::missing(stage, &format!("{field}.{key}")))
    }
}

/// A record did not carry what its stage template needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// The field (or `field.key` entry) is absent.
    MissingField {
        stage: String,
        field: String,
    },
    /// The field is present but holds the wrong kind of value.
    WrongShape {
        stage: String,
        field: String,
        expected: &'static str,
        found: &'static str,
    },
}

impl RecordError {
    pub(crate) fn missing(stage: &str, field: &str) -> Self {
        RecordError::MissingField {
            stage: stage.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn shape(stage: &str, field: &str, expected: &'static str, found: &Value) -> Self {
        RecordError::WrongShape {
            stage: stage.to_string(),
            field: field.to_string(),
            expected,
            found: found.kind(),
        }
    }
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::MissingField { stage, field } => {
                write!(f, "{stage} record is missing field `{field}`")
            }
            RecordError::WrongShape {
                stage,
                field,
                expected,
                found,
            } => write!(
                f,
                "{stage} record field `{field}` must be a {expected} (got {found})"
            ),
        }
    }
}

impl std::error::Error for RecordError {}
