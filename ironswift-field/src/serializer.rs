/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Component serializer.
//!
//! The inverse of the splitter: walks the parser pattern and joins present
//! components with the pattern's separators. A group repetition is written
//! only if one of its components is present, and a separator is written only
//! while some later component is still present, so absent trailing
//! components leave no dangling separators behind.

use ironswift_core::types::LineBreak;
use ironswift_pattern::{Pattern, Separator, Token};

/// Formats components back into a wire value.
///
/// # Arguments
/// * `pattern` - The compiled parser pattern
/// * `components` - One entry per component slot; missing entries are absent
/// * `line_break` - Line break written for `$` separators
#[must_use]
pub fn format(pattern: &Pattern, components: &[Option<String>], line_break: LineBreak) -> String {
    let last_present = components.iter().rposition(Option::is_some);
    let Some(last_present) = last_present else {
        return String::new();
    };
    let capacity = components.iter().flatten().map(String::len).sum::<usize>() + components.len() * 2;
    let mut writer = Writer {
        components,
        line_break,
        last_present,
        out: String::with_capacity(capacity),
        cursor: 0,
    };
    writer.sequence(pattern.tokens());
    writer.out
}

struct Writer<'a> {
    components: &'a [Option<String>],
    line_break: LineBreak,
    last_present: usize,
    out: String,
    cursor: usize,
}

impl Writer<'_> {
    fn sequence(&mut self, tokens: &[Token]) {
        for token in tokens {
            match token {
                Token::Literal(separator) => {
                    if self.cursor <= self.last_present {
                        self.separator(*separator);
                    }
                }
                Token::Component(_) => {
                    if let Some(Some(value)) = self.components.get(self.cursor) {
                        self.out.push_str(value);
                    }
                    self.cursor += 1;
                }
                Token::Group(group) => {
                    for _ in 0..group.max_repeat {
                        let end = self.cursor + group.slots_per_repeat;
                        if self.any_present(self.cursor, end) {
                            self.sequence(&group.tokens);
                        }
                        self.cursor = end;
                    }
                }
            }
        }
    }

    fn any_present(&self, start: usize, end: usize) -> bool {
        let end = end.min(self.components.len());
        start < end && self.components[start..end].iter().any(Option::is_some)
    }

    #[inline]
    fn separator(&mut self, separator: Separator) {
        match separator {
            Separator::LineBreak => self.out.push_str(self.line_break.as_str()),
            other => self.out.push(other.symbol()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splitter::split;
    use ironswift_dictionary::FieldConfig;

    fn write(pattern: &str, components: &[Option<&str>]) -> String {
        let components: Vec<Option<String>> = components
            .iter()
            .map(|c| c.map(str::to_string))
            .collect();
        format(
            &Pattern::compile(pattern).unwrap(),
            &components,
            LineBreak::CrLf,
        )
    }

    #[test]
    fn test_trailing_absent_components_leave_no_separators() {
        assert_eq!(
            write("S$S[$S]*3", &[Some("/ACC"), Some("JOHN"), None, None, None]),
            "/ACC\r\nJOHN"
        );
        assert_eq!(write("S$S[$S]*3", &[Some("/ACC"), None, None, None, None]), "/ACC");
    }

    #[test]
    fn test_optional_group_skipped() {
        assert_eq!(
            write("[/S$]S[$S]*3", &[None, Some("JOHN"), Some("BERLIN"), None, None]),
            "JOHN\r\nBERLIN"
        );
        assert_eq!(
            write("[/S$]S[$S]*3", &[Some("DE1"), Some("JOHN"), None, None, None]),
            "/DE1\r\nJOHN"
        );
    }

    #[test]
    fn test_inner_separators_kept_for_later_component() {
        assert_eq!(write(":S/[S]/S", &[Some("PROC"), None, Some("COLL")]), ":PROC//COLL");
        assert_eq!(write(":S//S", &[Some("STAT"), None]), ":STAT");
    }

    #[test]
    fn test_absent_mandatory_before_present_is_empty() {
        assert_eq!(write("S$S", &[None, Some("JOHN")]), "\r\nJOHN");
    }

    #[test]
    fn test_all_absent_is_empty() {
        assert_eq!(write("6!S3!SS", &[None, None, None]), "");
        assert_eq!(write("S", &[]), "");
    }

    #[test]
    fn test_lf_style() {
        let pattern = Pattern::compile("S$S").unwrap();
        let components = vec![Some("A".to_string()), Some("B".to_string())];
        assert_eq!(format(&pattern, &components, LineBreak::Lf), "A\nB");
    }

    #[test]
    fn test_wire_round_trip() {
        let config = FieldConfig::default();
        for (pattern, value) in [
            ("S$S[$S]*3", "/ACC/123456\r\nJOHN DOE\r\nSTREET"),
            ("[/S$]S[$S]*3", "JOHN\r\nBERLIN"),
            (":S/[S]/S", ":PROC/SCHEME/COLL"),
            ("6!S3!SS", "090115EUR1234,56"),
            ("3!S$6!S[$4!S6!S]", "103\r\n090115"),
            (":S//8!SS", ":PREP//20090115120000"),
        ] {
            let pattern = Pattern::compile(pattern).unwrap();
            let split = split(&pattern, value, &config);
            let line_break = split.line_break.unwrap_or_default();
            assert_eq!(format(&pattern, &split.components, line_break), value);
        }
    }
}
