/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Field validation.
//!
//! Validation is advisory: it never mutates the field and never fails with an
//! error. Each component is checked against the validator pattern's class and
//! length rule and then against its value format, and every problem found is
//! collected into a [`ValidationReport`].

use ironswift_core::error::{ValidationFailure, Violation};
use ironswift_core::types::DecimalMark;
use ironswift_dictionary::{ComponentDescriptor, FieldDescriptor};
use std::fmt;

/// Collected validation failures of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    failures: Vec<ValidationFailure>,
}

impl ValidationReport {
    /// Returns true if no failure was found.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the failures in component order.
    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Returns the number of failures.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if the report holds no failures.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the failures of the 1-based component `index`.
    pub fn for_component(&self, index: usize) -> impl Iterator<Item = &ValidationFailure> {
        self.failures.iter().filter(move |f| f.index == index)
    }

    /// Consumes the report and returns its failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.is_empty() {
            return write!(f, "valid");
        }
        for (i, failure) in self.failures.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{failure}")?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a ValidationReport {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

/// Validates all components of a field.
///
/// # Arguments
/// * `descriptor` - The field type
/// * `components` - One entry per component; missing entries are absent
/// * `mark` - Accepted decimal separator
#[must_use]
pub fn validate(
    descriptor: &FieldDescriptor,
    components: &[Option<String>],
    mark: DecimalMark,
) -> ValidationReport {
    let failures = descriptor
        .components()
        .iter()
        .filter_map(|component| {
            let value = components
                .get(component.index - 1)
                .and_then(Option::as_deref);
            check_component(descriptor, component, value, mark).err()
        })
        .collect();
    ValidationReport { failures }
}

/// Checks a single component value.
///
/// An absent optional component is valid; an absent mandatory one is
/// reported as missing. Present values are checked by class and length
/// first, then by value format.
///
/// # Errors
/// Returns the first failure found for the component.
pub fn check_component(
    descriptor: &FieldDescriptor,
    component: &ComponentDescriptor,
    value: Option<&str>,
    mark: DecimalMark,
) -> Result<(), ValidationFailure> {
    let violation = match value {
        None if component.optional => return Ok(()),
        None => Violation::Missing,
        Some(value) => match component
            .rule
            .check(value, mark)
            .and_then(|()| component.format.map_or(Ok(()), |f| f.check(value, mark)))
        {
            Ok(()) => return Ok(()),
            Err(violation) => violation,
        },
    };
    Err(ValidationFailure {
        field: descriptor.name().to_string(),
        index: component.index,
        label: component.label.clone(),
        violation,
    })
}
