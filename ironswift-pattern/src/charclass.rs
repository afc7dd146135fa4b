/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Character classes and per-component rules.
//!
//! This module provides:
//! - [`CharClass`]: The character sets a component may be drawn from
//! - [`Length`]: Exact, bounded, unbounded and multi-line length rules
//! - [`ComponentRule`]: A class and a length, checked against a candidate value
//!
//! Checking never fails hard: it answers with `Ok(())` or the first
//! [`Violation`] found, and leaves it to the caller to record it.

use ironswift_core::error::Violation;
use ironswift_core::types::DecimalMark;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Character set of a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharClass {
    /// Digits `0-9` (`n`).
    Numeric,
    /// Upper-case letters `A-Z` (`a`).
    Alpha,
    /// Upper-case letters and digits (`c`).
    Alphanumeric,
    /// The X character set (`x`).
    SwiftX,
    /// The extended Z character set, line breaks included (`z`).
    SwiftZ,
    /// Digits with at most one decimal mark (`d`).
    Decimal,
    /// Upper-case hexadecimal digits (`h`).
    Hex,
    /// A space (`e`).
    Space,
    /// Arbitrary text including line breaks (`t`).
    Text,
    /// Structural placeholder accepting anything (`S`).
    Any,
}

/// Punctuation of the X character set besides letters, digits and space.
const X_PUNCTUATION: &[char] = &['/', '-', '?', ':', '(', ')', '.', ',', '\'', '+'];

/// Additional punctuation of the Z character set.
const Z_PUNCTUATION: &[char] = &['=', '!', '"', '%', '&', '*', '<', '>', ';', '@', '#', '{', '_'];

impl CharClass {
    /// Returns the class denoted by a grammar letter.
    #[must_use]
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'n' => Some(Self::Numeric),
            'a' => Some(Self::Alpha),
            'c' => Some(Self::Alphanumeric),
            'x' => Some(Self::SwiftX),
            'z' => Some(Self::SwiftZ),
            'd' => Some(Self::Decimal),
            'h' => Some(Self::Hex),
            'e' => Some(Self::Space),
            't' => Some(Self::Text),
            'S' => Some(Self::Any),
            _ => None,
        }
    }

    /// Returns the grammar letter of this class.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Numeric => 'n',
            Self::Alpha => 'a',
            Self::Alphanumeric => 'c',
            Self::SwiftX => 'x',
            Self::SwiftZ => 'z',
            Self::Decimal => 'd',
            Self::Hex => 'h',
            Self::Space => 'e',
            Self::Text => 't',
            Self::Any => 'S',
        }
    }

    /// Returns a human readable class name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Alpha => "alphabetic",
            Self::Alphanumeric => "alphanumeric",
            Self::SwiftX => "x-charset",
            Self::SwiftZ => "z-charset",
            Self::Decimal => "decimal",
            Self::Hex => "hexadecimal",
            Self::Space => "space",
            Self::Text => "text",
            Self::Any => "any",
        }
    }

    /// Returns true if the class admits embedded line breaks.
    #[must_use]
    pub const fn admits_line_breaks(self) -> bool {
        matches!(self, Self::SwiftZ | Self::Text | Self::Any)
    }

    /// Returns true if `c` belongs to the class.
    ///
    /// # Arguments
    /// * `c` - The candidate character
    /// * `mark` - Accepted decimal separator, only relevant for [`CharClass::Decimal`]
    #[must_use]
    pub fn admits(self, c: char, mark: DecimalMark) -> bool {
        match self {
            Self::Numeric => c.is_ascii_digit(),
            Self::Alpha => c.is_ascii_uppercase(),
            Self::Alphanumeric => c.is_ascii_uppercase() || c.is_ascii_digit(),
            Self::SwiftX => is_x_char(c),
            Self::SwiftZ => is_x_char(c) || Z_PUNCTUATION.contains(&c) || c == '\r' || c == '\n',
            Self::Decimal => c.is_ascii_digit() || mark.accepts(c),
            Self::Hex => c.is_ascii_digit() || ('A'..='F').contains(&c),
            Self::Space => c == ' ',
            Self::Text | Self::Any => true,
        }
    }
}

fn is_x_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == ' ' || X_PUNCTUATION.contains(&c)
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Length rule of a component, in characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Length {
    /// Exactly N characters (`N!`).
    Exact(usize),
    /// Between 0 and N characters (`N`).
    UpTo(usize),
    /// Any length.
    Unbounded,
    /// Up to `lines` lines, each up to `width` characters (`N*M`).
    Lines {
        /// Maximum number of lines.
        lines: usize,
        /// Maximum characters per line, unbounded when absent.
        width: Option<usize>,
    },
}

impl Length {
    /// Returns true if `len` characters satisfy a single-line rule.
    #[must_use]
    pub const fn admits(self, len: usize) -> bool {
        match self {
            Self::Exact(n) => len == n,
            Self::UpTo(n) => len <= n,
            Self::Unbounded | Self::Lines { .. } => true,
        }
    }

    fn describe(self) -> String {
        match self {
            Self::Exact(n) => format!("exactly {n}"),
            Self::UpTo(n) => format!("at most {n}"),
            Self::Unbounded => "any length".to_string(),
            Self::Lines { lines, width: Some(w) } => format!("{lines} lines of at most {w}"),
            Self::Lines { lines, width: None } => format!("{lines} lines"),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact(n) => write!(f, "{n}!"),
            Self::UpTo(n) => write!(f, "{n}"),
            Self::Unbounded => Ok(()),
            Self::Lines { lines, width: Some(w) } => write!(f, "{lines}*{w}"),
            Self::Lines { lines, width: None } => write!(f, "{lines}*"),
        }
    }
}

/// Character class and length rule of one component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ComponentRule {
    /// Allowed characters.
    pub class: CharClass,
    /// Allowed length.
    pub length: Length,
}

impl ComponentRule {
    /// Creates a new rule.
    #[must_use]
    pub const fn new(class: CharClass, length: Length) -> Self {
        Self { class, length }
    }

    /// Returns true if the rule takes a fixed number of characters.
    #[inline]
    #[must_use]
    pub const fn is_exact(&self) -> bool {
        matches!(self.length, Length::Exact(_))
    }

    /// Returns true if the component may span several lines.
    #[inline]
    #[must_use]
    pub const fn is_multiline(&self) -> bool {
        matches!(self.length, Length::Lines { .. }) || matches!(self.class, CharClass::Text)
    }

    /// Checks a candidate value against the rule.
    ///
    /// # Arguments
    /// * `candidate` - The component value
    /// * `mark` - Accepted decimal separator
    ///
    /// # Errors
    /// Returns the first [`Violation`] found.
    pub fn check(&self, candidate: &str, mark: DecimalMark) -> Result<(), Violation> {
        if let Length::Lines { lines, width } = self.length {
            return self.check_lines(candidate, lines, width, mark);
        }
        self.check_chars(candidate, 0, mark)?;
        let actual = candidate.chars().count();
        if !self.length.admits(actual) {
            return Err(Violation::Length {
                expected: self.length.describe(),
                actual,
            });
        }
        if self.class == CharClass::Decimal {
            check_decimal(candidate, mark)?;
        }
        Ok(())
    }

    /// Returns true if the candidate satisfies the rule.
    #[inline]
    #[must_use]
    pub fn validate(&self, candidate: &str, mark: DecimalMark) -> bool {
        self.check(candidate, mark).is_ok()
    }

    fn check_lines(
        &self,
        candidate: &str,
        max_lines: usize,
        width: Option<usize>,
        mark: DecimalMark,
    ) -> Result<(), Violation> {
        let lines: Vec<&str> = candidate
            .split('\n')
            .map(|line| line.strip_suffix('\r').unwrap_or(line))
            .collect();
        if lines.len() > max_lines {
            return Err(Violation::TooManyLines {
                max: max_lines,
                actual: lines.len(),
            });
        }
        let mut offset = 0;
        for (number, line) in lines.iter().enumerate() {
            self.check_chars(line, offset, mark)?;
            let actual = line.chars().count();
            if let Some(max) = width.filter(|max| actual > *max) {
                return Err(Violation::LineTooLong {
                    line: number + 1,
                    max,
                    actual,
                });
            }
            offset += actual + 1;
        }
        Ok(())
    }

    fn check_chars(&self, s: &str, offset: usize, mark: DecimalMark) -> Result<(), Violation> {
        let multiline = self.is_multiline();
        match s.chars().enumerate().find(|&(_, c)| {
            let line_break = c == '\r' || c == '\n';
            !(self.class.admits(c, mark) && (multiline || !line_break))
        }) {
            Some((position, character)) => Err(Violation::InvalidCharacter {
                character,
                position: offset + position,
                class: self.class.name(),
            }),
            None => Ok(()),
        }
    }
}

/// Decimal shape: non-empty, at most one mark, at least one digit before it.
fn check_decimal(s: &str, mark: DecimalMark) -> Result<(), Violation> {
    let marks = s.chars().filter(|&c| mark.accepts(c)).count();
    if marks > 1 {
        return Err(Violation::Format {
            reason: "more than one decimal mark".to_string(),
        });
    }
    if !s.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        return Err(Violation::Format {
            reason: "decimal must start with a digit".to_string(),
        });
    }
    Ok(())
}

impl fmt::Display for ComponentRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.length, self.class)
    }
}
