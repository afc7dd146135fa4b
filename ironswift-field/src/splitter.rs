/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Component splitter.
//!
//! Walks a compiled parser pattern over a raw value and cuts it into
//! components. Splitting is total: malformed input never fails, it produces
//! components that later fail validation, and any text the pattern could not
//! place is handed back as a remainder. Separators the value lacks are counted
//! so callers can tell a value that will not format back verbatim.

use ironswift_core::types::{DecimalMark, LineBreak};
use ironswift_dictionary::FieldConfig;
use ironswift_pattern::{ComponentToken, Length, Pattern, Separator, Stops, Token};
use memchr::{memchr, memchr2, memchr3};
use tracing::debug;

/// Result of splitting a raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    /// One entry per component slot of the pattern.
    pub components: Vec<Option<String>>,
    /// Line break style seen in the value, if any.
    pub line_break: Option<LineBreak>,
    /// Text left over after the pattern was exhausted.
    pub remainder: Option<String>,
    /// Separators that were expected but absent while input remained.
    pub missing_separators: usize,
}

/// Splits `value` according to `pattern`.
///
/// # Arguments
/// * `pattern` - The compiled parser pattern
/// * `value` - The raw wire value
/// * `config` - Line break acceptance
#[must_use]
pub fn split(pattern: &Pattern, value: &str, config: &FieldConfig) -> Split {
    let mut splitter = Splitter::new(value, pattern.component_count(), config.accept_bare_lf);
    splitter.sequence(pattern.tokens());
    let remainder = splitter.rest();
    let remainder = if remainder.is_empty() {
        None
    } else {
        debug!(pattern = %pattern, remainder, "unparsed text after last component");
        Some(remainder.to_string())
    };
    if splitter.missing_separators > 0 {
        debug!(
            pattern = %pattern,
            missing = splitter.missing_separators,
            "separators absent from value"
        );
    }
    Split {
        components: splitter.slots,
        line_break: splitter.line_break,
        remainder,
        missing_separators: splitter.missing_separators,
    }
}

/// Cursor over the raw value.
struct Splitter<'a> {
    input: &'a str,
    offset: usize,
    accept_lf: bool,
    line_break: Option<LineBreak>,
    slots: Vec<Option<String>>,
    cursor: usize,
    /// A separator was consumed and nothing has been placed after it yet.
    after_separator: bool,
    missing_separators: usize,
}

impl<'a> Splitter<'a> {
    fn new(input: &'a str, slot_count: usize, accept_lf: bool) -> Self {
        Self {
            input,
            offset: 0,
            accept_lf,
            line_break: None,
            slots: vec![None; slot_count],
            cursor: 0,
            after_separator: false,
            missing_separators: 0,
        }
    }

    #[inline]
    fn rest(&self) -> &'a str {
        &self.input[self.offset..]
    }

    fn sequence(&mut self, tokens: &[Token]) {
        for token in tokens {
            match token {
                Token::Literal(separator) => self.literal(*separator),
                Token::Component(component) => self.component(component),
                Token::Group(group) => {
                    self.after_separator = false;
                    let end = self.cursor + group.total_slots();
                    let mut repeats = 0;
                    while repeats < group.max_repeat && self.can_start(&group.tokens, &group.follow)
                    {
                        let before = self.offset;
                        self.sequence(&group.tokens);
                        repeats += 1;
                        if self.offset == before {
                            break;
                        }
                    }
                    self.cursor = end;
                }
            }
        }
    }

    /// Consumes the separator if present; a missing separator is skipped.
    fn literal(&mut self, separator: Separator) {
        match self.match_literal(separator, self.rest()) {
            Some((width, line_break)) => {
                self.offset += width;
                if self.line_break.is_none() {
                    self.line_break = line_break;
                }
                self.after_separator = true;
            }
            None => {
                if !self.rest().is_empty() {
                    self.missing_separators += 1;
                }
                self.after_separator = false;
            }
        }
    }

    /// Matches a separator; line breaks must keep the style first seen.
    fn match_literal(&self, separator: Separator, rest: &str) -> Option<(usize, Option<LineBreak>)> {
        let matched = separator.match_at(rest, self.accept_lf)?;
        match (matched.1, self.line_break) {
            (Some(found), Some(recorded)) if found != recorded => None,
            _ => Some(matched),
        }
    }

    /// A component right after a consumed separator is present even when
    /// empty; otherwise running out of input leaves it absent.
    fn component(&mut self, component: &ComponentToken) {
        let rest = self.rest();
        if !rest.is_empty() || self.after_separator {
            let end = self.extent(component, rest);
            if let Some(slot) = self.slots.get_mut(self.cursor) {
                *slot = Some(rest[..end].to_string());
            }
            self.offset += end;
        }
        self.after_separator = false;
        self.cursor += 1;
    }

    /// Byte length of the component at the start of `rest`.
    fn extent(&self, component: &ComponentToken, rest: &str) -> usize {
        match component.rule.length {
            Length::Exact(n) => self.exact_extent(rest, n),
            Length::Lines { lines, .. } => self.lines_extent(rest, lines),
            Length::UpTo(_) | Length::Unbounded => {
                let ignore_breaks = component.rule.is_multiline();
                self.stop_position(rest, &component.stops, ignore_breaks)
                    .unwrap_or(rest.len())
            }
        }
    }

    /// Up to `n` characters, ending early at a line break.
    fn exact_extent(&self, rest: &str, n: usize) -> usize {
        for (count, (i, _)) in rest.char_indices().enumerate() {
            if count == n || LineBreak::at_start(&rest[i..], self.accept_lf).is_some() {
                return i;
            }
        }
        rest.len()
    }

    /// Up to `lines` lines; the line break after the last one is not consumed.
    fn lines_extent(&self, rest: &str, lines: usize) -> usize {
        let mut seen = 0;
        let mut from = 0;
        while let Some(at) = self.next_line_break(rest, from) {
            seen += 1;
            if seen == lines {
                return at;
            }
            from = at + LineBreak::at_start(&rest[at..], self.accept_lf).map_or(1, LineBreak::width);
        }
        rest.len()
    }

    /// Byte offset of the next line break at or after `from`.
    fn next_line_break(&self, rest: &str, from: usize) -> Option<usize> {
        let bytes = rest.as_bytes();
        let mut from = from;
        while let Some(i) = memchr(b'\n', &bytes[from..]).map(|i| i + from) {
            if i > 0 && bytes[i - 1] == b'\r' {
                return Some(i - 1);
            }
            if self.accept_lf {
                return Some(i);
            }
            from = i + 1;
        }
        None
    }

    /// Byte offset of the earliest stop separator in `rest`.
    fn stop_position(&self, rest: &str, stops: &Stops, ignore_breaks: bool) -> Option<usize> {
        let mut needles: Vec<u8> = Vec::with_capacity(3);
        let mut breaks = false;
        for stop in stops {
            match stop {
                Separator::Slash => needles.push(b'/'),
                Separator::Colon => needles.push(b':'),
                Separator::LineBreak => breaks = !ignore_breaks,
            }
        }
        let symbol = find_any(rest.as_bytes(), &needles);
        let line_break = if breaks {
            self.next_line_break(rest, 0)
        } else {
            None
        };
        match (symbol, line_break) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether a group starting with `tokens` can match at the current offset.
    fn can_start(&self, tokens: &[Token], follow: &Stops) -> bool {
        let rest = self.rest();
        if rest.is_empty() {
            return false;
        }
        match tokens.first() {
            None => false,
            Some(Token::Literal(separator)) => self.match_literal(*separator, rest).is_some(),
            Some(Token::Group(inner)) => self.can_start(&inner.tokens, &inner.follow),
            Some(Token::Component(component)) => {
                if component.rule.is_exact() {
                    let first = rest.chars().next();
                    let at_break = LineBreak::at_start(rest, self.accept_lf).is_some();
                    // the class decides whether an optional fixed-width token is there
                    !at_break
                        && first.is_some_and(|c| {
                            component.rule.class.admits(c, DecimalMark::Either)
                        })
                } else {
                    !component
                        .stops
                        .iter()
                        .chain(follow.iter())
                        .any(|stop| stop.match_at(rest, self.accept_lf).is_some())
                }
            }
        }
    }
}

fn find_any(haystack: &[u8], needles: &[u8]) -> Option<usize> {
    match *needles {
        [] => None,
        [a] => memchr(a, haystack),
        [a, b] => memchr2(a, b, haystack),
        [a, b, c, ..] => memchr3(a, b, c, haystack),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(pattern: &str, value: &str) -> Split {
        split(
            &Pattern::compile(pattern).unwrap(),
            value,
            &FieldConfig::default(),
        )
    }

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some((*v).to_string())).collect()
    }

    #[test]
    fn test_single_component() {
        let split = run("S", "REF123");
        assert_eq!(split.components, some(&["REF123"]));
        assert_eq!(split.remainder, None);
    }

    #[test]
    fn test_party_identifier_lines() {
        let split = run("S$S[$S]*3", "/ACC/123456\nJOHN DOE");
        assert_eq!(
            split.components,
            vec![
                Some("/ACC/123456".to_string()),
                Some("JOHN DOE".to_string()),
                None,
                None,
                None
            ]
        );
        assert_eq!(split.line_break, Some(LineBreak::Lf));
    }

    #[test]
    fn test_account_group_present_and_absent() {
        let with_account = run("[/S$]S[$S]*3", "/DE123\r\nJOHN\r\nMAIN ST 1\r\nBERLIN");
        assert_eq!(
            with_account.components,
            vec![
                Some("DE123".to_string()),
                Some("JOHN".to_string()),
                Some("MAIN ST 1".to_string()),
                Some("BERLIN".to_string()),
                None
            ]
        );
        assert_eq!(with_account.line_break, Some(LineBreak::CrLf));

        let without = run("[/S$]S[$S]*3", "JOHN\r\nBERLIN");
        assert_eq!(
            without.components,
            vec![
                None,
                Some("JOHN".to_string()),
                Some("BERLIN".to_string()),
                None,
                None
            ]
        );
    }

    #[test]
    fn test_fixed_width_components() {
        let split = run("6!S3!SS", "090115EUR1234,56");
        assert_eq!(split.components, some(&["090115", "EUR", "1234,56"]));
    }

    #[test]
    fn test_short_fixed_width_is_tolerated() {
        let split = run("6!S3!SS", "0901");
        assert_eq!(
            split.components,
            vec![Some("0901".to_string()), None, None]
        );
    }

    #[test]
    fn test_qualifier_with_skipped_optional() {
        let split = run(":S/[S]/S", ":PROC//COLL");
        assert_eq!(
            split.components,
            vec![Some("PROC".to_string()), None, Some("COLL".to_string())]
        );
        let with_scheme = run(":S/[S]/S", ":PROC/SCHEME/COLL");
        assert_eq!(with_scheme.components, some(&["PROC", "SCHEME", "COLL"]));
    }

    #[test]
    fn test_optional_fixed_width_uses_class() {
        assert_eq!(
            run("3!S[1!a]S", "EURD1234,5").components,
            some(&["EUR", "D", "1234,5"])
        );
        assert_eq!(
            run("3!S[1!a]S", "EUR1234,5").components,
            vec![Some("EUR".to_string()), None, Some("1234,5".to_string())]
        );
    }

    #[test]
    fn test_multiline_component_keeps_line_breaks() {
        let split = run("/S$4*S", "/12345\r\nJOHN\r\nMAIN ST");
        assert_eq!(split.components, some(&["12345", "JOHN\r\nMAIN ST"]));
    }

    #[test]
    fn test_lines_budget_leaves_remainder() {
        let split = run("2*S", "A\r\nB\r\nC");
        assert_eq!(split.components, some(&["A\r\nB"]));
        assert_eq!(split.remainder.as_deref(), Some("\r\nC"));
    }

    #[test]
    fn test_empty_component_is_present() {
        let split = run("S$S", "\r\nJOHN");
        assert_eq!(split.components, some(&["", "JOHN"]));
    }

    #[test]
    fn test_trailing_line_break_gives_empty_line() {
        let split = run("S$S[$S]*3", "/ACC/123456\r\nJOHN DOE\r\n");
        assert_eq!(
            split.components,
            vec![
                Some("/ACC/123456".to_string()),
                Some("JOHN DOE".to_string()),
                Some(String::new()),
                None,
                None
            ]
        );
        assert_eq!(split.remainder, None);

        let split = run(":S//S", ":STAT//");
        assert_eq!(split.components, some(&["STAT", ""]));
    }

    #[test]
    fn test_separator_before_skipped_group_is_not_a_component() {
        let split = run(":S/[S]/S", ":PROC/");
        assert_eq!(
            split.components,
            vec![Some("PROC".to_string()), None, None]
        );
        assert_eq!(split.missing_separators, 0);
    }

    #[test]
    fn test_missing_separator_is_counted() {
        let split = run(":S//S", ":SELL/ABCDEFGH");
        assert_eq!(split.components, some(&["SELL", "ABCDEFGH"]));
        assert_eq!(split.missing_separators, 1);
        assert_eq!(run(":S//S", ":SELL//ABCDEFGH").missing_separators, 0);
    }

    #[test]
    fn test_mixed_line_breaks_leave_remainder() {
        let split = run("S$S[$S]*3", "A\nB\r\nC");
        assert_eq!(split.line_break, Some(LineBreak::Lf));
        assert_eq!(
            split.components,
            vec![Some("A".to_string()), Some("B".to_string()), None, None, None]
        );
        assert_eq!(split.remainder.as_deref(), Some("\r\nC"));
    }

    #[test]
    fn test_empty_value_is_all_absent() {
        let split = run("[/S$]S[$S]*3", "");
        assert!(split.components.iter().all(Option::is_none));
        assert_eq!(split.components.len(), 5);
        assert_eq!(split.line_break, None);
    }

    #[test]
    fn test_whitespace_preserved() {
        let split = run("S$S", "  LEAD\r\nTRAIL  ");
        assert_eq!(split.components, some(&["  LEAD", "TRAIL  "]));
    }

    #[test]
    fn test_bare_lf_rejected_when_configured() {
        let config = FieldConfig::new().with_accept_bare_lf(false);
        let split = split(&Pattern::compile("S$S").unwrap(), "A\nB", &config);
        assert_eq!(split.components, vec![Some("A\nB".to_string()), None]);
    }

    #[test]
    fn test_header_session_group() {
        let split = run("3!S$6!S[$4!S6!S]", "103\r\n090115\r\n1234567890");
        assert_eq!(split.components, some(&["103", "090115", "1234", "567890"]));
    }

    #[test]
    fn test_time_indication() {
        let split = run("/S/4!S1!S4!S", "/CLSTIME/0915+0100");
        assert_eq!(split.components, some(&["CLSTIME", "0915", "+", "0100"]));
    }
}
