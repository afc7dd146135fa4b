/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Field lookup over tag sequences.
//!
//! Messages hand fields around as ordered sequences of [`Tag`]s. The
//! [`FieldLookup`] trait resolves names against a [`Registry`] and builds
//! typed [`Field`]s from those sequences.

use crate::field::Field;
use ironswift_core::error::FieldError;
use ironswift_core::tag::Tag;
use ironswift_dictionary::{FieldConfig, FieldDescriptor, Registry};
use std::sync::Arc;

/// Builds fields from tags using a source of descriptors.
pub trait FieldLookup {
    /// Returns the descriptor registered under `name`.
    fn descriptor(&self, name: &str) -> Option<&Arc<FieldDescriptor>>;

    /// Returns the configuration applied to fields built by this lookup.
    fn field_config(&self) -> FieldConfig;

    /// Creates an empty field of the named type.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownField` if no descriptor has the name.
    fn empty_field(&self, name: &str) -> Result<Field, FieldError> {
        self.descriptor(name)
            .map(|d| Field::with_config(Arc::clone(d), self.field_config()))
            .ok_or_else(|| FieldError::UnknownField(name.to_string()))
    }

    /// Parses a tag into a field of the type named by the tag.
    ///
    /// # Errors
    /// Returns `FieldError::UnknownField` if the tag's name is not registered.
    fn parse_tag(&self, tag: &Tag) -> Result<Field, FieldError> {
        let descriptor = self
            .descriptor(tag.name().as_str())
            .ok_or_else(|| FieldError::UnknownField(tag.name().to_string()))?;
        Field::from_tag_with(Arc::clone(descriptor), tag, self.field_config())
    }

    /// Returns the first tag named `name` as a field.
    ///
    /// Returns `None` if no tag matches or the name is not registered.
    fn get_first<'a, I>(&self, tags: I, name: &str) -> Option<Field>
    where
        I: IntoIterator<Item = &'a Tag>,
    {
        let descriptor = self.descriptor(name)?;
        first_of(descriptor, tags, self.field_config())
    }

    /// Returns every tag named `name` as a field, in order.
    ///
    /// Always returns a list, empty when nothing matches.
    fn get_all<'a, I>(&self, tags: I, name: &str) -> Vec<Field>
    where
        I: IntoIterator<Item = &'a Tag>,
    {
        match self.descriptor(name) {
            Some(descriptor) => all_of(descriptor, tags, self.field_config()),
            None => Vec::new(),
        }
    }
}

impl FieldLookup for Registry {
    fn descriptor(&self, name: &str) -> Option<&Arc<FieldDescriptor>> {
        self.lookup(name)
    }

    fn field_config(&self) -> FieldConfig {
        *self.config()
    }
}

/// Returns the first tag carrying the descriptor's name as a field.
#[must_use]
pub fn first_of<'a, I>(descriptor: &Arc<FieldDescriptor>, tags: I, config: FieldConfig) -> Option<Field>
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter()
        .find(|tag| tag.name() == descriptor.name())
        .map(|tag| Field::parse(Arc::clone(descriptor), tag.value(), config).field)
}

/// Returns every tag carrying the descriptor's name as a field.
#[must_use]
pub fn all_of<'a, I>(descriptor: &Arc<FieldDescriptor>, tags: I, config: FieldConfig) -> Vec<Field>
where
    I: IntoIterator<Item = &'a Tag>,
{
    tags.into_iter()
        .filter(|tag| tag.name() == descriptor.name())
        .map(|tag| Field::parse(Arc::clone(descriptor), tag.value(), config).field)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block() -> Vec<Tag> {
        vec![
            Tag::new("20", "REF1").unwrap(),
            Tag::new("50K", "/ACC1\r\nJOHN").unwrap(),
            Tag::new("95P", ":SELL//ABCDEFGH").unwrap(),
            Tag::new("95P", ":BUYR//IJKLMNOP").unwrap(),
        ]
    }

    #[test]
    fn test_get_first() {
        let registry = Registry::standard();
        let tags = block();
        let field = registry.get_first(&tags, "95P").unwrap();
        assert_eq!(field.component(1), Some("SELL"));
        assert!(registry.get_first(&tags, "59").is_none());
        assert!(registry.get_first(&tags, "NOPE").is_none());
    }

    #[test]
    fn test_get_all_in_order() {
        let registry = Registry::standard();
        let tags = block();
        let fields = registry.get_all(&tags, "95P");
        let qualifiers: Vec<_> = fields.iter().filter_map(|f| f.component(1)).collect();
        assert_eq!(qualifiers, ["SELL", "BUYR"]);
    }

    #[test]
    fn test_get_all_empty_or_absent() {
        let registry = Registry::standard();
        assert!(registry.get_all(&Vec::<Tag>::new(), "95P").is_empty());
        let absent: Option<&Vec<Tag>> = None;
        assert!(registry.get_all(absent.into_iter().flatten(), "95P").is_empty());
        assert!(registry.get_all(&block(), "59").is_empty());
    }

    #[test]
    fn test_parse_tag_and_empty_field() {
        let registry = Registry::standard();
        let field = registry.parse_tag(&Tag::new("50K", "/ACC1\r\nJOHN").unwrap()).unwrap();
        assert_eq!(field.component(1), Some("ACC1"));
        assert_eq!(
            registry.parse_tag(&Tag::new("ZZ", "x").unwrap()).unwrap_err(),
            FieldError::UnknownField("ZZ".to_string())
        );
        assert!(registry.empty_field("59").unwrap().is_empty());
    }
}
