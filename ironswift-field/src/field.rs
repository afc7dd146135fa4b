/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Structured field instances.
//!
//! A [`Field`] binds a shared [`FieldDescriptor`] to an ordered list of
//! component values. Components are addressed by 1-based index or by label,
//! and each one is either absent or present (possibly as an empty string).
//! The wire value is always derived from the components.

use crate::serializer;
use crate::splitter;
use crate::validation::{self, ValidationReport};
use chrono::{NaiveDate, NaiveTime};
use ironswift_core::error::{FieldError, ValidationFailure};
use ironswift_core::tag::{Tag, TagName};
use ironswift_core::types::LineBreak;
use ironswift_dictionary::format::{parse_amount, parse_date, parse_time};
use ironswift_dictionary::{FieldConfig, FieldDescriptor, ValueFormat};
use rust_decimal::Decimal;
use std::fmt;
use std::sync::Arc;

/// A field instance: a descriptor plus component values.
#[derive(Debug, Clone)]
pub struct Field {
    descriptor: Arc<FieldDescriptor>,
    components: Vec<Option<String>>,
    line_break: LineBreak,
    config: FieldConfig,
}

/// Result of parsing a raw value into a field.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// The parsed field.
    pub field: Field,
    /// Text the parser pattern could not place.
    pub remainder: Option<String>,
    /// Separators the value lacked between components.
    pub missing_separators: usize,
    /// Validation of the parsed components.
    pub report: ValidationReport,
}

impl ParseOutcome {
    /// Returns true if all input was consumed, no separator was missing and
    /// every component is valid. A clean value formats back unchanged.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.remainder.is_none() && self.missing_separators == 0 && self.report.is_valid()
    }
}

impl Field {
    /// Creates a field with every component absent.
    #[must_use]
    pub fn new(descriptor: Arc<FieldDescriptor>) -> Self {
        Self::with_config(descriptor, FieldConfig::default())
    }

    /// Creates an empty field using the given configuration.
    #[must_use]
    pub fn with_config(descriptor: Arc<FieldDescriptor>, config: FieldConfig) -> Self {
        let count = descriptor.component_count();
        Self {
            descriptor,
            components: vec![None; count],
            line_break: config.default_line_break,
            config,
        }
    }

    /// Parses a raw value.
    ///
    /// Parsing never fails: unplaceable text is returned as the remainder and
    /// malformed components show up in the report.
    ///
    /// # Arguments
    /// * `descriptor` - The field type
    /// * `value` - The raw wire value
    /// * `config` - Line break and decimal mark settings
    #[must_use]
    pub fn parse(descriptor: Arc<FieldDescriptor>, value: &str, config: FieldConfig) -> ParseOutcome {
        let split = splitter::split(descriptor.parser_pattern(), value, &config);
        let field = Self {
            components: split.components,
            line_break: split.line_break.unwrap_or(config.default_line_break),
            config,
            descriptor,
        };
        let report = field.validate();
        ParseOutcome {
            field,
            remainder: split.remainder,
            missing_separators: split.missing_separators,
            report,
        }
    }

    /// Parses a raw value with the default configuration, keeping only the
    /// field.
    #[must_use]
    pub fn from_value(descriptor: Arc<FieldDescriptor>, value: &str) -> Self {
        Self::parse(descriptor, value, FieldConfig::default()).field
    }

    /// Creates a field from a tag whose name must equal the descriptor name.
    ///
    /// # Errors
    /// Returns `FieldError::NameMismatch` if the names differ.
    pub fn from_tag(descriptor: Arc<FieldDescriptor>, tag: &Tag) -> Result<Self, FieldError> {
        Self::from_tag_with(descriptor, tag, FieldConfig::default())
    }

    /// Creates a field from a tag using the given configuration.
    ///
    /// # Errors
    /// Returns `FieldError::NameMismatch` if the names differ.
    pub fn from_tag_with(
        descriptor: Arc<FieldDescriptor>,
        tag: &Tag,
        config: FieldConfig,
    ) -> Result<Self, FieldError> {
        if tag.name() != descriptor.name() {
            return Err(FieldError::NameMismatch {
                expected: descriptor.name().to_string(),
                found: tag.name().to_string(),
            });
        }
        Ok(Self::parse(descriptor, tag.value(), config).field)
    }

    /// Creates a field from a tag that is required to be present.
    ///
    /// # Errors
    /// Returns `FieldError::MissingTag` if `tag` is `None`, or
    /// `FieldError::NameMismatch` if the names differ.
    pub fn from_optional_tag(
        descriptor: Arc<FieldDescriptor>,
        tag: Option<&Tag>,
    ) -> Result<Self, FieldError> {
        match tag {
            Some(tag) => Self::from_tag(descriptor, tag),
            None => Err(FieldError::MissingTag {
                expected: descriptor.name().to_string(),
            }),
        }
    }

    /// Returns the field name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &TagName {
        self.descriptor.name()
    }

    /// Returns the field descriptor.
    #[inline]
    #[must_use]
    pub fn descriptor(&self) -> &Arc<FieldDescriptor> {
        &self.descriptor
    }

    /// Returns the configuration the field was created with.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Returns the number of components.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// Returns the 1-based component `index`, or `None` if it is absent or
    /// out of range.
    #[inline]
    #[must_use]
    pub fn component(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.components.get(i))
            .and_then(Option::as_deref)
    }

    /// Returns all components in order.
    #[inline]
    #[must_use]
    pub fn components(&self) -> &[Option<String>] {
        &self.components
    }

    /// Sets the 1-based component `index`.
    ///
    /// The value is stored even if it does not satisfy the component's rule;
    /// the shape check is returned for the caller to act on.
    ///
    /// # Errors
    /// Returns `FieldError::IndexOutOfRange` for an index outside
    /// `1..=component_count()`.
    pub fn set_component(
        &mut self,
        index: usize,
        value: impl Into<String>,
    ) -> Result<Option<ValidationFailure>, FieldError> {
        let slot = self.slot_mut(index)?;
        *slot = Some(value.into());
        Ok(self.check(index))
    }

    /// Marks the 1-based component `index` absent.
    ///
    /// # Errors
    /// Returns `FieldError::IndexOutOfRange` for an invalid index.
    pub fn clear_component(&mut self, index: usize) -> Result<Option<String>, FieldError> {
        Ok(self.slot_mut(index)?.take())
    }

    /// Returns the component carrying `label`.
    #[must_use]
    pub fn component_by_label(&self, label: &str) -> Option<&str> {
        self.descriptor
            .index_of_label(label)
            .and_then(|index| self.component(index))
    }

    /// Sets the component carrying `label`.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownLabel` if no component has the label.
    pub fn set_by_label(
        &mut self,
        label: &str,
        value: impl Into<String>,
    ) -> Result<Option<ValidationFailure>, FieldError> {
        let index = self
            .descriptor
            .index_of_label(label)
            .ok_or_else(|| FieldError::UnknownLabel(label.to_string()))?;
        self.set_component(index, value)
    }

    /// Returns true if every component is absent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.iter().all(Option::is_none)
    }

    /// Returns the line break style used when formatting.
    #[inline]
    #[must_use]
    pub const fn line_break(&self) -> LineBreak {
        self.line_break
    }

    /// Sets the line break style used when formatting.
    pub fn set_line_break(&mut self, line_break: LineBreak) {
        self.line_break = line_break;
    }

    /// Formats the components into the wire value.
    #[must_use]
    pub fn value(&self) -> String {
        serializer::format(
            self.descriptor.parser_pattern(),
            &self.components,
            self.line_break,
        )
    }

    /// Converts the field into a tag.
    #[must_use]
    pub fn to_tag(&self) -> Tag {
        Tag::with_name(*self.name(), self.value())
    }

    /// Validates every component.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        validation::validate(&self.descriptor, &self.components, self.config.decimal_mark)
    }

    /// Returns true if no component fails validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_valid()
    }

    /// Interprets a date component according to its declared format.
    ///
    /// Returns `None` if the component is absent, has no date format or does
    /// not hold a valid date.
    #[must_use]
    pub fn component_as_date(&self, index: usize) -> Option<NaiveDate> {
        let format = self.format_of(index)?;
        parse_date(format, self.component(index)?)
    }

    /// Interprets a time component according to its declared format.
    #[must_use]
    pub fn component_as_time(&self, index: usize) -> Option<NaiveTime> {
        let format = self.format_of(index)?;
        parse_time(format, self.component(index)?)
    }

    /// Interprets a component as a decimal amount using the configured mark.
    #[must_use]
    pub fn component_as_decimal(&self, index: usize) -> Option<Decimal> {
        parse_amount(self.component(index)?, self.config.decimal_mark)
    }

    fn format_of(&self, index: usize) -> Option<ValueFormat> {
        self.descriptor.component(index).and_then(|c| c.format)
    }

    fn slot_mut(&mut self, index: usize) -> Result<&mut Option<String>, FieldError> {
        let count = self.components.len();
        index
            .checked_sub(1)
            .and_then(|i| self.components.get_mut(i))
            .ok_or(FieldError::IndexOutOfRange { index, count })
    }

    fn check(&self, index: usize) -> Option<ValidationFailure> {
        let component = self.descriptor.component(index)?;
        validation::check_component(
            &self.descriptor,
            component,
            self.component(index),
            self.config.decimal_mark,
        )
        .err()
    }
}

impl PartialEq for Field {
    fn eq(&self, other: &Self) -> bool {
        self.name() == other.name() && self.components == other.components
    }
}

impl Eq for Field {}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.name(), self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ironswift_core::error::Violation;
    use ironswift_dictionary::Registry;

    fn descriptor(name: &str) -> Arc<FieldDescriptor> {
        Arc::clone(Registry::standard().lookup(name).unwrap())
    }

    #[test]
    fn test_parse_party_identifier() {
        let outcome = Field::parse(
            descriptor("50F"),
            "/ACC/123456\nJOHN DOE",
            FieldConfig::default(),
        );
        let field = &outcome.field;
        assert_eq!(field.component(1), Some("/ACC/123456"));
        assert_eq!(field.component(2), Some("JOHN DOE"));
        assert_eq!(field.component(3), None);
        assert_eq!(field.component_by_label("Party Identifier"), Some("/ACC/123456"));
        assert_eq!(field.component_by_label("nameAndAddress"), Some("JOHN DOE"));
        assert_eq!(field.line_break(), LineBreak::Lf);
        assert_eq!(field.value(), "/ACC/123456\nJOHN DOE");
        assert!(outcome.is_clean(), "{}", outcome.report);
    }

    #[test]
    fn test_empty_value_all_absent() {
        let field = Field::from_value(descriptor("50K"), "");
        assert!(field.is_empty());
        assert_eq!(field.value(), "");
        assert!(!field.is_valid());
    }

    #[test]
    fn test_from_tag_name_mismatch() {
        let tag = Tag::new("59", "JOHN").unwrap();
        let err = Field::from_tag(descriptor("50K"), &tag).unwrap_err();
        assert_eq!(
            err,
            FieldError::NameMismatch {
                expected: "50K".to_string(),
                found: "59".to_string()
            }
        );
    }

    #[test]
    fn test_from_optional_tag() {
        let err = Field::from_optional_tag(descriptor("20"), None).unwrap_err();
        assert!(matches!(err, FieldError::MissingTag { .. }));
        let tag = Tag::new("20", "REF1").unwrap();
        let field = Field::from_optional_tag(descriptor("20"), Some(&tag)).unwrap();
        assert_eq!(field.to_tag(), tag);
    }

    #[test]
    fn test_set_component_reports_shape_problem() {
        let mut field = Field::new(descriptor("32A"));
        assert_eq!(field.set_component(1, "090115").unwrap(), None);
        let failure = field.set_component(2, "eu").unwrap().unwrap();
        assert!(matches!(failure.violation, Violation::InvalidCharacter { .. }));
        assert_eq!(field.component(2), Some("eu"));
        assert_eq!(
            field.set_component(4, "x").unwrap_err(),
            FieldError::IndexOutOfRange { index: 4, count: 3 }
        );
        assert_eq!(
            field.set_component(0, "x").unwrap_err(),
            FieldError::IndexOutOfRange { index: 0, count: 3 }
        );
    }

    #[test]
    fn test_build_from_components_uses_crlf() {
        let mut field = Field::new(descriptor("50K"));
        field.set_by_label("Account", "DE89370400440532013000").unwrap();
        field.set_component(2, "JOHN DOE").unwrap();
        field.set_component(3, "BERLIN").unwrap();
        assert_eq!(field.value(), "/DE89370400440532013000\r\nJOHN DOE\r\nBERLIN");
        assert_eq!(field.to_string(), ":50K:/DE89370400440532013000\r\nJOHN DOE\r\nBERLIN");
        assert_eq!(field.clear_component(1).unwrap().as_deref(), Some("DE89370400440532013000"));
        assert_eq!(field.value(), "JOHN DOE\r\nBERLIN");
    }

    #[test]
    fn test_unknown_label() {
        let mut field = Field::new(descriptor("20"));
        assert_eq!(
            field.set_by_label("Nope", "x").unwrap_err(),
            FieldError::UnknownLabel("Nope".to_string())
        );
        assert_eq!(field.component_by_label("Nope"), None);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Field::from_value(descriptor("20"), "REF1");
        let mut copy = original.clone();
        copy.set_component(1, "REF2").unwrap();
        assert_eq!(original.component(1), Some("REF1"));
        assert_ne!(original, copy);
    }

    #[test]
    fn test_typed_getters() {
        let field = Field::from_value(descriptor("32A"), "090115EUR1234,56");
        assert_eq!(field.component_as_date(1), NaiveDate::from_ymd_opt(2009, 1, 15));
        assert_eq!(field.component_as_decimal(3), Some(Decimal::new(123_456, 2)));
        assert_eq!(field.component_as_date(2), None);

        let field = Field::from_value(descriptor("98C"), ":PREP//20090115120000");
        assert_eq!(field.component_as_date(2), NaiveDate::from_ymd_opt(2009, 1, 15));
        assert_eq!(field.component_as_time(3), NaiveTime::from_hms_opt(12, 0, 0));
    }

    #[test]
    fn test_trailing_line_break_round_trips() {
        let value = "/ACC/123456\r\nJOHN DOE\r\n";
        let outcome = Field::parse(descriptor("50F"), value, FieldConfig::default());
        assert!(outcome.is_clean(), "{}", outcome.report);
        assert_eq!(outcome.field.component(3), Some(""));
        assert_eq!(outcome.field.value(), value);
    }

    #[test]
    fn test_missing_separator_is_not_clean() {
        let outcome = Field::parse(descriptor("95P"), ":SELL/ABCDEFGH", FieldConfig::default());
        assert!(outcome.report.is_valid());
        assert_eq!(outcome.missing_separators, 1);
        assert!(!outcome.is_clean());
    }

    #[test]
    fn test_name_mismatch_for_every_registered_type() {
        for descriptor in Registry::standard().descriptors() {
            let name = descriptor.name().as_str();
            let other = Tag::new("ZZ9", "X").unwrap();
            assert!(
                matches!(
                    Field::from_tag(Arc::clone(descriptor), &other),
                    Err(FieldError::NameMismatch { .. })
                ),
                "{name}"
            );
            let lower = name.to_ascii_lowercase();
            if lower != name {
                let tag = Tag::new(&lower, "X").unwrap();
                assert!(
                    matches!(
                        Field::from_tag(Arc::clone(descriptor), &tag),
                        Err(FieldError::NameMismatch { .. })
                    ),
                    "{lower}"
                );
            }
            let own = Tag::new(name, "X").unwrap();
            assert!(Field::from_tag(Arc::clone(descriptor), &own).is_ok());
        }
    }

    #[test]
    fn test_remainder_reported() {
        let outcome = Field::parse(descriptor("70"), "A\r\nB\r\nC\r\nD\r\nE", FieldConfig::default());
        assert_eq!(outcome.field.component(1), Some("A\r\nB\r\nC\r\nD"));
        assert_eq!(outcome.remainder.as_deref(), Some("\r\nE"));
        assert!(!outcome.is_clean());
    }
}
