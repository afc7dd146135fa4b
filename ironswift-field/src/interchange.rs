/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Label-map and JSON interchange.
//!
//! A field is exchanged as a flat object of camel-case component keys to
//! string values, holding present components only. JSON objects also carry
//! the field name under [`NAME_KEY`]. Decoding is tolerant: entries with an
//! unknown key or a value that fails its component's rule are dropped and
//! reported as [`InterchangeIssue`]s.

use crate::field::Field;
use crate::validation;
use ironswift_core::error::InterchangeIssue;
use ironswift_dictionary::{FieldConfig, FieldDescriptor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// JSON key holding the field name.
pub const NAME_KEY: &str = "name";

impl Field {
    /// Returns the present components keyed by their camel-case label key.
    #[must_use]
    pub fn to_label_map(&self) -> BTreeMap<String, String> {
        self.descriptor()
            .components()
            .iter()
            .filter_map(|c| {
                self.component(c.index)
                    .map(|value| (c.key.clone(), value.to_string()))
            })
            .collect()
    }

    /// Builds a field from label/value pairs, ignoring unknown labels and
    /// invalid values.
    ///
    /// Keys may be camel-case keys or display labels.
    #[must_use]
    pub fn from_label_map<I, K, V>(descriptor: Arc<FieldDescriptor>, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        Self::from_label_map_with_issues(descriptor, entries).0
    }

    /// Builds a field from label/value pairs, reporting dropped entries.
    pub fn from_label_map_with_issues<I, K, V>(
        descriptor: Arc<FieldDescriptor>,
        entries: I,
    ) -> (Self, Vec<InterchangeIssue>)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut field = Self::with_config(descriptor, FieldConfig::default());
        let mut issues = Vec::new();
        for (key, value) in entries {
            field.place(key.as_ref(), value.into(), &mut issues);
        }
        (field, issues)
    }

    /// Returns the field as a JSON object.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut object = Map::new();
        object.insert(NAME_KEY.to_string(), Value::String(self.name().to_string()));
        for (key, value) in self.to_label_map() {
            object.insert(key, Value::String(value));
        }
        Value::Object(object)
    }

    /// Builds a field from a JSON object, dropping what cannot be placed.
    #[must_use]
    pub fn from_json(descriptor: Arc<FieldDescriptor>, json: &Value) -> Self {
        Self::from_json_with_issues(descriptor, json).0
    }

    /// Builds a field from a JSON object, reporting dropped entries.
    ///
    /// String and number values are accepted. A `name` entry that disagrees
    /// with the descriptor is reported and otherwise ignored.
    pub fn from_json_with_issues(
        descriptor: Arc<FieldDescriptor>,
        json: &Value,
    ) -> (Self, Vec<InterchangeIssue>) {
        let mut field = Self::with_config(descriptor, FieldConfig::default());
        let mut issues = Vec::new();
        let Some(object) = json.as_object() else {
            issues.push(InterchangeIssue {
                key: None,
                reason: "expected a JSON object".to_string(),
            });
            return (field, issues);
        };
        for (key, value) in object {
            if key == NAME_KEY {
                if value.as_str() != Some(field.name().as_str()) {
                    issues.push(InterchangeIssue {
                        key: Some(key.clone()),
                        reason: format!("name {value} does not match field {}", field.name()),
                    });
                }
                continue;
            }
            let text = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                other => {
                    issues.push(InterchangeIssue {
                        key: Some(key.clone()),
                        reason: format!("unsupported value {other}"),
                    });
                    continue;
                }
            };
            field.place(key, text, &mut issues);
        }
        (field, issues)
    }

    /// Builds a field from JSON text, tolerating malformed input.
    pub fn from_json_str(
        descriptor: Arc<FieldDescriptor>,
        text: &str,
    ) -> (Self, Vec<InterchangeIssue>) {
        match serde_json::from_str::<Value>(text) {
            Ok(json) => Self::from_json_with_issues(descriptor, &json),
            Err(e) => (
                Self::with_config(descriptor, FieldConfig::default()),
                vec![InterchangeIssue {
                    key: None,
                    reason: e.to_string(),
                }],
            ),
        }
    }

    fn place(&mut self, key: &str, value: String, issues: &mut Vec<InterchangeIssue>) {
        let Some(index) = self.descriptor().index_of_label(key) else {
            debug!(field = %self.name(), key, "dropping unknown interchange key");
            issues.push(InterchangeIssue {
                key: Some(key.to_string()),
                reason: "unknown component label".to_string(),
            });
            return;
        };
        let check = self.descriptor().component(index).map(|component| {
            validation::check_component(
                self.descriptor(),
                component,
                Some(value.as_str()),
                self.config().decimal_mark,
            )
        });
        if let Some(Err(failure)) = check {
            debug!(field = %self.name(), key, %failure, "dropping invalid interchange value");
            issues.push(InterchangeIssue {
                key: Some(key.to_string()),
                reason: failure.violation.to_string(),
            });
            return;
        }
        // the index comes from the descriptor so it is always in range
        let _ = self.set_component(index, value);
    }
}

impl Serialize for Field {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let labels = self.to_label_map();
        let mut map = serializer.serialize_map(Some(labels.len() + 1))?;
        map.serialize_entry(NAME_KEY, self.name().as_str())?;
        for (key, value) in &labels {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
