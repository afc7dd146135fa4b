/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Schema definitions for field types.
//!
//! This module defines:
//! - [`ComponentSpec`] / [`DescriptorSpec`]: Declarative catalog records
//! - [`ComponentDescriptor`]: Compiled per-component metadata
//! - [`FieldDescriptor`]: Compiled field type, shared read-only by every field
//!   instance of that type

use crate::format::ValueFormat;
use crate::labels;
use ironswift_core::error::{PatternError, RegistryError};
use ironswift_core::tag::TagName;
use ironswift_pattern::{ComponentRule, Pattern};
use serde::{Deserialize, Serialize};

/// Declarative description of one component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentSpec {
    /// Semantic label (e.g. `"Party Identifier"`).
    pub label: String,
    /// Optional semantic format checked on top of the class rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ValueFormat>,
}

impl ComponentSpec {
    /// Creates a component spec without a value format.
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            format: None,
        }
    }

    /// Adds a value format.
    #[must_use]
    pub fn with_format(mut self, format: ValueFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// Declarative description of a field type, as stored in a catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DescriptorSpec {
    /// Field name (e.g. `"50F"`).
    pub name: String,
    /// Structural pattern used to split raw values.
    pub parser_pattern: String,
    /// Per-component class and length rules.
    pub validator_pattern: String,
    /// Component labels and formats, one per component slot.
    pub components: Vec<ComponentSpec>,
}

impl DescriptorSpec {
    /// Compiles the record into a descriptor.
    ///
    /// # Errors
    /// Returns `RegistryError::Catalog` for an invalid name and
    /// `RegistryError::Malformed` if a pattern does not compile or the
    /// component counts disagree.
    pub fn compile(&self) -> Result<FieldDescriptor, RegistryError> {
        let name = TagName::new(&self.name)
            .map_err(|err| RegistryError::Catalog(err.to_string()))?;
        FieldDescriptor::new(
            name,
            &self.parser_pattern,
            &self.validator_pattern,
            self.components.clone(),
        )
        .map_err(|source| RegistryError::Malformed {
            name: self.name.clone(),
            source,
        })
    }
}

/// Compiled metadata of one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentDescriptor {
    /// 1-based component index.
    pub index: usize,
    /// Semantic label.
    pub label: String,
    /// Interchange key derived from the label (e.g. `partyIdentifier`).
    pub key: String,
    /// Class and length rule from the validator pattern.
    pub rule: ComponentRule,
    /// Whether the component may be absent.
    pub optional: bool,
    /// Optional semantic format.
    pub format: Option<ValueFormat>,
}

/// Compiled description of a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    name: TagName,
    parser: Pattern,
    validator: Pattern,
    components: Vec<ComponentDescriptor>,
}

impl FieldDescriptor {
    /// Compiles a field descriptor.
    ///
    /// # Arguments
    /// * `name` - The field name
    /// * `parser_pattern` - Structural grammar used for splitting
    /// * `validator_pattern` - Class and length grammar used for validation
    /// * `components` - One label/format record per component
    ///
    /// # Errors
    /// Returns `PatternError` if a pattern is malformed, if the two patterns
    /// and the component list disagree on the number of components, or if two
    /// labels share an interchange key.
    pub fn new(
        name: TagName,
        parser_pattern: &str,
        validator_pattern: &str,
        components: Vec<ComponentSpec>,
    ) -> Result<Self, PatternError> {
        let parser = Pattern::compile(parser_pattern)?;
        let validator = Pattern::compile(validator_pattern)?;
        if parser.component_count() != validator.component_count()
            || validator.component_count() != components.len()
        {
            return Err(PatternError::ComponentCount {
                parser: parser.component_count(),
                validator: validator.component_count(),
                labels: components.len(),
            });
        }
        let mut keys: Vec<String> = Vec::with_capacity(components.len());
        for spec in &components {
            let key = labels::label_key(&spec.label);
            if keys.iter().any(|k| k.eq_ignore_ascii_case(&key)) {
                return Err(PatternError::DuplicateLabel {
                    label: spec.label.clone(),
                    key,
                });
            }
            keys.push(key);
        }
        let components = validator
            .slots()
            .iter()
            .zip(components)
            .map(|(slot, spec)| ComponentDescriptor {
                index: slot.index + 1,
                key: labels::label_key(&spec.label),
                label: spec.label,
                rule: slot.rule,
                optional: slot.optional,
                format: spec.format,
            })
            .collect();
        Ok(Self {
            name,
            parser,
            validator,
            components,
        })
    }

    /// Returns the field name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the structural pattern.
    #[inline]
    #[must_use]
    pub const fn parser_pattern(&self) -> &Pattern {
        &self.parser
    }

    /// Returns the validation pattern.
    #[inline]
    #[must_use]
    pub const fn validator_pattern(&self) -> &Pattern {
        &self.validator
    }

    /// Returns the component descriptors in order.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[ComponentDescriptor] {
        &self.components
    }

    /// Returns the declared number of components.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns the descriptor of the 1-based component `index`.
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&ComponentDescriptor> {
        index.checked_sub(1).and_then(|i| self.components.get(i))
    }

    /// Returns the label of the 1-based component `index`.
    #[must_use]
    pub fn label_of(&self, index: usize) -> Option<&str> {
        labels::label_of(self, index)
    }

    /// Returns the 1-based index of the component with the given label or key.
    #[must_use]
    pub fn index_of_label(&self, label: &str) -> Option<usize> {
        labels::index_of_label(self, label)
    }

    /// Converts the descriptor back into a catalog record.
    #[must_use]
    pub fn to_spec(&self) -> DescriptorSpec {
        DescriptorSpec {
            name: self.name.to_string(),
            parser_pattern: self.parser.source().to_string(),
            validator_pattern: self.validator.source().to_string(),
            components: self
                .components
                .iter()
                .map(|c| ComponentSpec {
                    label: c.label.clone(),
                    format: c.format,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironswift_pattern::{CharClass, Length};

    fn spec_50k() -> DescriptorSpec {
        DescriptorSpec {
            name: "50K".to_string(),
            parser_pattern: "[/S$]S[$S]*3".to_string(),
            validator_pattern: "[/34x$]35x[$35x]*3".to_string(),
            components: vec![
                ComponentSpec::new("Account"),
                ComponentSpec::new("Name And Address"),
                ComponentSpec::new("Name And Address 2"),
                ComponentSpec::new("Name And Address 3"),
                ComponentSpec::new("Name And Address 4"),
            ],
        }
    }

    #[test]
    fn test_compile_descriptor() {
        let descriptor = spec_50k().compile().unwrap();
        assert_eq!(descriptor.name().as_str(), "50K");
        assert_eq!(descriptor.component_count(), 5);

        let account = descriptor.component(1).unwrap();
        assert_eq!(account.key, "account");
        assert!(account.optional);
        assert_eq!(
            account.rule,
            ComponentRule::new(CharClass::SwiftX, Length::UpTo(34))
        );
        assert!(!descriptor.component(2).unwrap().optional);
        assert!(descriptor.component(0).is_none());
        assert!(descriptor.component(6).is_none());
    }

    #[test]
    fn test_component_count_mismatch() {
        let mut spec = spec_50k();
        spec.components.pop();
        assert!(matches!(
            spec.compile(),
            Err(RegistryError::Malformed {
                source: PatternError::ComponentCount {
                    parser: 5,
                    validator: 5,
                    labels: 4
                },
                ..
            })
        ));
    }

    #[test]
    fn test_duplicate_label_keys() {
        let mut spec = spec_50k();
        spec.components[4] = ComponentSpec::new("NAME AND ADDRESS");
        assert!(matches!(
            spec.compile(),
            Err(RegistryError::Malformed {
                source: PatternError::DuplicateLabel { ref key, .. },
                ..
            }) if key == "nameAndAddress"
        ));

        let mut spec = spec_50k();
        spec.components[2] = ComponentSpec::new("Account");
        assert!(matches!(
            spec.compile(),
            Err(RegistryError::Malformed {
                source: PatternError::DuplicateLabel { .. },
                ..
            })
        ));
    }

    #[test]
    fn test_malformed_pattern() {
        let mut spec = spec_50k();
        spec.validator_pattern = "[/34x$35x".to_string();
        assert!(matches!(
            spec.compile(),
            Err(RegistryError::Malformed { .. })
        ));
    }

    #[test]
    fn test_invalid_name() {
        let mut spec = spec_50k();
        spec.name = "5 0K".to_string();
        assert!(matches!(spec.compile(), Err(RegistryError::Catalog(_))));
    }

    #[test]
    fn test_spec_roundtrip() {
        let spec = spec_50k();
        assert_eq!(spec.compile().unwrap().to_spec(), spec);
    }

    #[test]
    fn test_spec_json() {
        let json = r#"{
            "name": "32A",
            "parser_pattern": "6!S3!SS",
            "validator_pattern": "6!n3!a15d",
            "components": [
                {"label": "Date", "format": "Date6"},
                {"label": "Currency", "format": "Currency"},
                {"label": "Amount", "format": "Amount"}
            ]
        }"#;
        let spec: DescriptorSpec = serde_json::from_str(json).unwrap();
        let descriptor = spec.compile().unwrap();
        assert_eq!(descriptor.component(1).unwrap().format, Some(ValueFormat::Date6));
    }
}
