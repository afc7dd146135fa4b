/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Error types for the IronSwift field engine.
//!
//! This module provides a unified error hierarchy using `thiserror`. Only
//! contract violations are raised as errors: a malformed grammar
//! ([`PatternError`]), a caller mistake ([`FieldError`]) or an inconsistent
//! catalog ([`RegistryError`]). Validation results ([`ValidationFailure`]) and
//! dropped interchange entries ([`InterchangeIssue`]) are advisory values that
//! are collected and reported, never propagated with `?`.

use thiserror::Error;

/// Result type alias using [`SwiftError`] as the error type.
pub type Result<T> = std::result::Result<T, SwiftError>;

/// Top-level error type for all IronSwift operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SwiftError {
    /// A pattern grammar string is not well-formed.
    #[error("pattern error: {0}")]
    Pattern(#[from] PatternError),

    /// A caller passed an argument that violates a field contract.
    #[error("field error: {0}")]
    Field(#[from] FieldError),

    /// The descriptor catalog is inconsistent.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
}

/// Errors raised while compiling a pattern grammar (malformed pattern).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// The pattern string is empty.
    #[error("empty pattern")]
    Empty,

    /// An optional group marker has no matching counterpart.
    #[error("unbalanced optional group at position {position}")]
    UnbalancedGroup {
        /// Character offset of the offending bracket.
        position: usize,
    },

    /// A character class letter is not part of the grammar.
    #[error("unknown character class '{class}' at position {position}")]
    UnknownClass {
        /// The unknown class letter.
        class: char,
        /// Character offset of the class letter.
        position: usize,
    },

    /// A length or repeat specification is not valid.
    #[error("invalid length at position {position}: {reason}")]
    InvalidLength {
        /// Character offset where the length starts.
        position: usize,
        /// Description of the problem.
        reason: String,
    },

    /// A length prefix is not followed by a character class.
    #[error("missing character class at position {position}")]
    MissingClass {
        /// Character offset where a class was expected.
        position: usize,
    },

    /// An optional group contains nothing.
    #[error("empty optional group at position {position}")]
    EmptyGroup {
        /// Character offset of the opening bracket.
        position: usize,
    },

    /// Parser pattern, validator pattern and component labels disagree on the
    /// number of components.
    #[error(
        "component count mismatch: parser pattern has {parser}, validator pattern has {validator}, {labels} labels declared"
    )]
    ComponentCount {
        /// Slots in the parser pattern.
        parser: usize,
        /// Slots in the validator pattern.
        validator: usize,
        /// Declared component descriptors.
        labels: usize,
    },

    /// Two component labels map to the same interchange key.
    #[error("duplicate component label {label:?} (key {key})")]
    DuplicateLabel {
        /// The label that repeats an earlier key.
        label: String,
        /// The shared interchange key.
        key: String,
    },
}

/// Caller errors (invalid argument) raised by field construction and access.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FieldError {
    /// The tag name does not equal the field's declared name.
    #[error("tag name mismatch: expected {expected}, found {found}")]
    NameMismatch {
        /// The field's declared name.
        expected: String,
        /// The name carried by the tag.
        found: String,
    },

    /// A required tag was absent.
    #[error("missing tag for field {expected}")]
    MissingTag {
        /// The field's declared name.
        expected: String,
    },

    /// A component index is outside `1..=count`.
    #[error("component index {index} out of range 1..={count}")]
    IndexOutOfRange {
        /// The requested 1-based index.
        index: usize,
        /// Number of components of the field.
        count: usize,
    },

    /// No component carries the given label.
    #[error("unknown component label: {0}")]
    UnknownLabel(String),

    /// A tag name is empty, too long or not alphanumeric.
    #[error("invalid tag name: {0:?}")]
    InvalidTagName(String),

    /// No descriptor is registered under the given name.
    #[error("unknown field type: {0}")]
    UnknownField(String),
}

/// Errors raised while populating the descriptor registry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A name was registered twice with different descriptors.
    #[error("conflicting descriptor for field {name}")]
    Conflict {
        /// The field name.
        name: String,
    },

    /// A descriptor's grammar failed to compile.
    #[error("malformed descriptor for field {name}: {source}")]
    Malformed {
        /// The field name.
        name: String,
        /// The underlying grammar error.
        #[source]
        source: PatternError,
    },

    /// A catalog document could not be read.
    #[error("invalid catalog: {0}")]
    Catalog(String),
}

/// Reason a single component does not satisfy its rule.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Violation {
    /// A mandatory component is absent.
    #[error("missing mandatory component")]
    Missing,

    /// A character is outside the component's character class.
    #[error("character {character:?} at position {position} not allowed in {class}")]
    InvalidCharacter {
        /// The offending character.
        character: char,
        /// 0-based character offset in the component.
        position: usize,
        /// Name of the character class.
        class: &'static str,
    },

    /// The component length does not match the length rule.
    #[error("length {actual} does not satisfy {expected}")]
    Length {
        /// Human readable length rule.
        expected: String,
        /// Actual length in characters.
        actual: usize,
    },

    /// A multi-line component has more lines than allowed.
    #[error("{actual} lines exceed maximum of {max}")]
    TooManyLines {
        /// Maximum line count.
        max: usize,
        /// Actual line count.
        actual: usize,
    },

    /// A line of a multi-line component is too long.
    #[error("line {line} has {actual} characters, maximum is {max}")]
    LineTooLong {
        /// 1-based line number.
        line: usize,
        /// Maximum line width.
        max: usize,
        /// Actual line width.
        actual: usize,
    },

    /// The component does not satisfy its semantic value format.
    #[error("invalid format: {reason}")]
    Format {
        /// Description of the problem.
        reason: String,
    },
}

/// An advisory validation result for one component of a field.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("field {field} component {index} ({label}): {violation}")]
pub struct ValidationFailure {
    /// Name of the field.
    pub field: String,
    /// 1-based component index.
    pub index: usize,
    /// Semantic label of the component.
    pub label: String,
    /// What is wrong with the component.
    pub violation: Violation,
}

/// A structured-interchange entry that was dropped while decoding.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("dropped interchange entry {key:?}: {reason}")]
pub struct InterchangeIssue {
    /// The offending key, if the issue is tied to one.
    pub key: Option<String>,
    /// Why the entry was dropped.
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pattern_error_display() {
        let err = PatternError::UnknownClass {
            class: 'q',
            position: 3,
        };
        assert_eq!(err.to_string(), "unknown character class 'q' at position 3");
    }

    #[test]
    fn test_swift_error_from_field() {
        let field_err = FieldError::MissingTag {
            expected: "50F".to_string(),
        };
        let err: SwiftError = field_err.into();
        assert!(matches!(err, SwiftError::Field(FieldError::MissingTag { .. })));
    }

    #[test]
    fn test_registry_error_source() {
        use std::error::Error as _;
        let err = RegistryError::Malformed {
            name: "20".to_string(),
            source: PatternError::Empty,
        };
        assert_eq!(
            err.to_string(),
            "malformed descriptor for field 20: empty pattern"
        );
        assert!(err.source().is_some());
    }

    #[test]
    fn test_validation_failure_display() {
        let failure = ValidationFailure {
            field: "32A".to_string(),
            index: 2,
            label: "Currency".to_string(),
            violation: Violation::Length {
                expected: "exactly 3".to_string(),
                actual: 2,
            },
        };
        assert_eq!(
            failure.to_string(),
            "field 32A component 2 (Currency): length 2 does not satisfy exactly 3"
        );
    }
}
