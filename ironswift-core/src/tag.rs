/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Raw tagged values.
//!
//! This module provides:
//! - [`TagName`]: Short alphanumeric field identifier (e.g. `20`, `50F`, `98C`)
//! - [`Tag`]: Immutable `(name, value)` pair as read from a message block

use crate::error::FieldError;
use arrayvec::ArrayString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum length for tag names in bytes.
pub const TAG_NAME_MAX_LEN: usize = 8;

/// Field identifier: the field number plus an optional letter option.
///
/// Names are 1 to [`TAG_NAME_MAX_LEN`] ASCII alphanumeric characters and
/// compare case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(try_from = "String", into = "String")]
pub struct TagName(ArrayString<TAG_NAME_MAX_LEN>);

impl TagName {
    /// Creates a new tag name.
    ///
    /// # Arguments
    /// * `s` - The tag name string
    ///
    /// # Errors
    /// Returns `FieldError::InvalidTagName` if the name is empty, longer than
    /// [`TAG_NAME_MAX_LEN`] or contains a non-alphanumeric character.
    pub fn new(s: &str) -> Result<Self, FieldError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(FieldError::InvalidTagName(s.to_string()));
        }
        ArrayString::from(s)
            .map(Self)
            .map_err(|_| FieldError::InvalidTagName(s.to_string()))
    }

    /// Returns the name as a string slice.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the numeric part of the name (`"50"` for `"50F"`).
    #[must_use]
    pub fn number(&self) -> &str {
        let s = self.as_str();
        let end = s
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(s.len());
        &s[..end]
    }

    /// Returns the letter option of the name, if any (`Some('F')` for `"50F"`).
    #[must_use]
    pub fn letter_option(&self) -> Option<char> {
        let s = self.as_str();
        let number_len = self.number().len();
        if s.len() == number_len + 1 {
            s[number_len..].chars().next().filter(char::is_ascii_alphabetic)
        } else {
            None
        }
    }
}

impl AsRef<str> for TagName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TagName {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TagName {
    type Error = FieldError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<TagName> for String {
    fn from(name: TagName) -> Self {
        name.as_str().to_string()
    }
}

/// A raw tagged value as found in a message block.
///
/// The value is the wire payload, possibly spanning several lines. Tags are
/// immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tag {
    name: TagName,
    value: String,
}

impl Tag {
    /// Creates a new tag.
    ///
    /// # Arguments
    /// * `name` - The tag name (e.g. `"50F"`)
    /// * `value` - The raw wire value
    ///
    /// # Errors
    /// Returns `FieldError::InvalidTagName` if the name is not valid.
    pub fn new(name: &str, value: impl Into<String>) -> Result<Self, FieldError> {
        Ok(Self {
            name: TagName::new(name)?,
            value: value.into(),
        })
    }

    /// Creates a tag from an already validated name.
    #[must_use]
    pub fn with_name(name: TagName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    /// Returns the tag name.
    #[inline]
    #[must_use]
    pub const fn name(&self) -> &TagName {
        &self.name
    }

    /// Returns the raw wire value.
    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns true if the tag name equals `name` (case-sensitive).
    #[inline]
    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.name.as_str() == name
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}:{}", self.name, self.value)
    }
}
