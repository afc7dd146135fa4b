/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Wire conventions shared by the parser, serializer and validator.
//!
//! - [`LineBreak`]: Line separator style of a multi-line field value
//! - [`DecimalMark`]: Accepted decimal separator in amount components

use serde::{Deserialize, Serialize};
use std::fmt;

/// Line separator style.
///
/// Wire values use CRLF, but values handed over by other systems frequently
/// carry bare LF. The parser records the style it saw so the serializer can
/// reproduce the exact input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LineBreak {
    /// Carriage return followed by line feed.
    #[default]
    CrLf,
    /// Bare line feed.
    Lf,
}

impl LineBreak {
    /// Returns the separator text.
    #[inline]
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CrLf => "\r\n",
            Self::Lf => "\n",
        }
    }

    /// Returns the line break at the start of `s`, if any.
    ///
    /// # Arguments
    /// * `s` - The text to inspect
    /// * `accept_lf` - Whether a bare LF counts as a line break
    #[inline]
    #[must_use]
    pub fn at_start(s: &str, accept_lf: bool) -> Option<Self> {
        if s.starts_with("\r\n") {
            Some(Self::CrLf)
        } else if accept_lf && s.starts_with('\n') {
            Some(Self::Lf)
        } else {
            None
        }
    }

    /// Returns the length in bytes of the separator.
    #[inline]
    #[must_use]
    pub const fn width(self) -> usize {
        match self {
            Self::CrLf => 2,
            Self::Lf => 1,
        }
    }
}

impl fmt::Display for LineBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CrLf => write!(f, "CRLF"),
            Self::Lf => write!(f, "LF"),
        }
    }
}

/// Decimal separator accepted in decimal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DecimalMark {
    /// Comma, as used on the wire (`1234,56`).
    #[default]
    Comma,
    /// Point (`1234.56`).
    Point,
    /// Either a comma or a point.
    Either,
}

impl DecimalMark {
    /// Returns true if `c` is an accepted decimal separator.
    #[inline]
    #[must_use]
    pub const fn accepts(self, c: char) -> bool {
        match self {
            Self::Comma => c == ',',
            Self::Point => c == '.',
            Self::Either => c == ',' || c == '.',
        }
    }

    /// Rewrites `s` with a point as decimal separator, ready for numeric parsing.
    #[must_use]
    pub fn normalize(self, s: &str) -> String {
        s.chars()
            .map(|c| if self.accepts(c) { '.' } else { c })
            .collect()
    }
}
