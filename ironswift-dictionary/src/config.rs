/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Engine configuration.
//!
//! This module provides the options that control how raw values are split,
//! written back and validated.

use ironswift_core::types::{DecimalMark, LineBreak};
use serde::{Deserialize, Serialize};

/// Configuration for parsing, formatting and validating fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Line break written by fields that were not parsed from the wire.
    pub default_line_break: LineBreak,
    /// Whether a bare LF is recognized as a line separator.
    pub accept_bare_lf: bool,
    /// Accepted decimal separator in decimal components.
    pub decimal_mark: DecimalMark,
}

impl FieldConfig {
    /// Creates a configuration with wire defaults: CRLF line breaks, bare LF
    /// accepted on input, comma decimal mark.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            default_line_break: LineBreak::CrLf,
            accept_bare_lf: true,
            decimal_mark: DecimalMark::Comma,
        }
    }

    /// Sets the line break used by fields built from components.
    #[must_use]
    pub const fn with_default_line_break(mut self, line_break: LineBreak) -> Self {
        self.default_line_break = line_break;
        self
    }

    /// Sets whether a bare LF is recognized as a line separator.
    #[must_use]
    pub const fn with_accept_bare_lf(mut self, accept: bool) -> Self {
        self.accept_bare_lf = accept;
        self
    }

    /// Sets the accepted decimal separator.
    #[must_use]
    pub const fn with_decimal_mark(mut self, mark: DecimalMark) -> Self {
        self.decimal_mark = mark;
        self
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FieldConfig::default();
        assert_eq!(config.default_line_break, LineBreak::CrLf);
        assert!(config.accept_bare_lf);
        assert_eq!(config.decimal_mark, DecimalMark::Comma);
    }

    #[test]
    fn test_builder() {
        let config = FieldConfig::new()
            .with_default_line_break(LineBreak::Lf)
            .with_accept_bare_lf(false)
            .with_decimal_mark(DecimalMark::Either);
        assert_eq!(config.default_line_break, LineBreak::Lf);
        assert!(!config.accept_bare_lf);
        assert_eq!(config.decimal_mark, DecimalMark::Either);
    }

    #[test]
    fn test_partial_json() {
        let config: FieldConfig = serde_json::from_str(r#"{"decimal_mark":"Point"}"#).unwrap();
        assert_eq!(config.decimal_mark, DecimalMark::Point);
        assert!(config.accept_bare_lf);
    }
}
