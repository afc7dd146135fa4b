/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Pattern grammar compiler.
//!
//! [`Pattern::compile`] turns a grammar string into a token tree and a flat
//! list of component [`Slot`]s. Each variable-length component token also
//! carries its *stops*: the separators that may legally follow it, which is
//! what the splitter cuts on. Compiled patterns are immutable and can be
//! shared across threads.

use crate::charclass::{CharClass, ComponentRule, Length};
use ironswift_core::error::PatternError;
use ironswift_core::types::LineBreak;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Largest number accepted in a length or repeat specification.
const MAX_NUMBER: usize = 9_999;

/// Largest number of component slots a pattern may declare once repeat
/// groups are unrolled.
pub const MAX_SLOTS: usize = 1_024;

/// Literal separator between components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Separator {
    /// `/`
    Slash,
    /// `:`
    Colon,
    /// A line break (`$` in the grammar).
    LineBreak,
}

impl Separator {
    /// Returns the grammar character of this separator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Slash => '/',
            Self::Colon => ':',
            Self::LineBreak => '$',
        }
    }

    /// Matches the separator at the start of `s`.
    ///
    /// # Returns
    /// The number of bytes the separator occupies and, for line breaks, the
    /// style that was found. `None` if `s` does not start with the separator.
    #[must_use]
    pub fn match_at(self, s: &str, accept_lf: bool) -> Option<(usize, Option<LineBreak>)> {
        match self {
            Self::Slash => s.starts_with('/').then_some((1, None)),
            Self::Colon => s.starts_with(':').then_some((1, None)),
            Self::LineBreak => LineBreak::at_start(s, accept_lf).map(|lb| (lb.width(), Some(lb))),
        }
    }
}

/// Separators that may follow a token.
pub type Stops = SmallVec<[Separator; 3]>;

/// A component token of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentToken {
    /// Class and length of the component.
    pub rule: ComponentRule,
    /// Separators that end the component when it is variable-length.
    pub stops: Stops,
}

/// An optional, possibly repeated group of tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    /// Tokens inside the group.
    pub tokens: Vec<Token>,
    /// Maximum number of repetitions (1 for a plain optional group).
    pub max_repeat: usize,
    /// Component slots produced by one repetition.
    pub slots_per_repeat: usize,
    /// Separators that may follow the group.
    pub follow: Stops,
}

impl Group {
    /// Returns the total number of slots the group reserves.
    #[inline]
    #[must_use]
    pub const fn total_slots(&self) -> usize {
        self.slots_per_repeat * self.max_repeat
    }
}

/// A token of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// A literal separator.
    Literal(Separator),
    /// A component.
    Component(ComponentToken),
    /// An optional group.
    Group(Group),
}

/// A component position of a pattern, with repeat groups unrolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// 0-based component index.
    pub index: usize,
    /// Class and length of the component.
    pub rule: ComponentRule,
    /// Whether the component sits inside an optional group.
    pub optional: bool,
    /// Repetition number of the innermost enclosing repeat group.
    pub repetition: usize,
}

/// A compiled pattern grammar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pattern {
    source: String,
    #[serde(skip)]
    tokens: SmallVec<[Token; 8]>,
    #[serde(skip)]
    slots: Vec<Slot>,
}

impl Pattern {
    /// Compiles a grammar string.
    ///
    /// # Arguments
    /// * `source` - The grammar string (e.g. `":4!c//8!n6!n"`)
    ///
    /// # Errors
    /// Returns `PatternError` if the grammar is not well-formed.
    pub fn compile(source: &str) -> Result<Self, PatternError> {
        if source.is_empty() {
            return Err(PatternError::Empty);
        }
        let mut compiler = Compiler::new(source);
        let mut tokens = compiler.sequence(None)?;
        check_slot_count(count_slots(&tokens), 0)?;
        assign_stops(&mut tokens, &Stops::new());
        let mut slots = Vec::new();
        flatten(&tokens, false, 0, &mut slots);
        Ok(Self {
            source: source.to_string(),
            tokens: tokens.into_iter().collect(),
            slots,
        })
    }

    /// Returns the grammar string the pattern was compiled from.
    #[inline]
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the top-level tokens.
    #[inline]
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns the component slots in order.
    #[inline]
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    /// Returns the number of component slots.
    #[inline]
    #[must_use]
    pub fn component_count(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of slots outside any optional group.
    #[must_use]
    pub fn mandatory_count(&self) -> usize {
        self.slots.iter().filter(|slot| !slot.optional).count()
    }
}

impl FromStr for Pattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::compile(s)
    }
}

impl TryFrom<String> for Pattern {
    type Error = PatternError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::compile(&s)
    }
}

impl From<Pattern> for String {
    fn from(pattern: Pattern) -> Self {
        pattern.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

type Tokens = Vec<Token>;

/// Recursive descent over the grammar characters.
struct Compiler {
    chars: Vec<char>,
    pos: usize,
}

impl Compiler {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    /// Parses tokens until end of input, or until `]` when inside a group
    /// opened at `open`.
    fn sequence(&mut self, open: Option<usize>) -> Result<Tokens, PatternError> {
        let mut tokens = Tokens::new();
        loop {
            let Some(c) = self.peek() else {
                return match open {
                    Some(position) => Err(PatternError::UnbalancedGroup { position }),
                    None => Ok(tokens),
                };
            };
            match c {
                ']' => {
                    return match open {
                        Some(_) => Ok(tokens),
                        None => Err(PatternError::UnbalancedGroup { position: self.pos }),
                    };
                }
                '[' => tokens.push(Token::Group(self.group()?)),
                '/' | ':' | '$' => {
                    self.pos += 1;
                    tokens.push(Token::Literal(match c {
                        '/' => Separator::Slash,
                        ':' => Separator::Colon,
                        _ => Separator::LineBreak,
                    }));
                }
                _ => tokens.push(Token::Component(self.component()?)),
            }
        }
    }

    fn group(&mut self) -> Result<Group, PatternError> {
        let open = self.pos;
        self.pos += 1;
        let tokens = self.sequence(Some(open))?;
        // sequence() only returns Ok inside a group when it stopped at ']'
        self.pos += 1;
        if tokens.is_empty() {
            return Err(PatternError::EmptyGroup { position: open });
        }
        let max_repeat = if self.peek() == Some('*') {
            self.pos += 1;
            self.number()?.ok_or_else(|| PatternError::InvalidLength {
                position: self.pos,
                reason: "missing repeat count".to_string(),
            })?
        } else {
            1
        };
        let slots_per_repeat = count_slots(&tokens);
        let total = slots_per_repeat.checked_mul(max_repeat).unwrap_or(usize::MAX);
        check_slot_count(total, open)?;
        Ok(Group {
            tokens,
            max_repeat,
            slots_per_repeat,
            follow: Stops::new(),
        })
    }

    fn component(&mut self) -> Result<ComponentToken, PatternError> {
        let start = self.pos;
        let length = match self.number()? {
            None => {
                if matches!(self.peek(), Some('!' | '*')) {
                    return Err(PatternError::InvalidLength {
                        position: start,
                        reason: "missing number".to_string(),
                    });
                }
                Length::Unbounded
            }
            Some(n) => match self.peek() {
                Some('!') => {
                    self.pos += 1;
                    Length::Exact(n)
                }
                Some('*') => {
                    self.pos += 1;
                    Length::Lines {
                        lines: n,
                        width: self.number()?,
                    }
                }
                _ => Length::UpTo(n),
            },
        };
        let position = self.pos;
        let letter = self
            .peek()
            .ok_or(PatternError::MissingClass { position })?;
        let class = CharClass::from_letter(letter).ok_or_else(|| {
            if matches!(letter, '[' | ']' | '/' | ':' | '$') {
                PatternError::MissingClass { position }
            } else {
                PatternError::UnknownClass {
                    class: letter,
                    position,
                }
            }
        })?;
        self.pos += 1;
        Ok(ComponentToken {
            rule: ComponentRule::new(class, length),
            stops: Stops::new(),
        })
    }

    /// Parses an optional positive decimal number.
    fn number(&mut self) -> Result<Option<usize>, PatternError> {
        let start = self.pos;
        let mut value: usize = 0;
        while let Some(digit) = self.peek().and_then(|c| c.to_digit(10)) {
            value = value * 10 + digit as usize;
            if value > MAX_NUMBER {
                return Err(PatternError::InvalidLength {
                    position: start,
                    reason: format!("number exceeds {MAX_NUMBER}"),
                });
            }
            self.pos += 1;
        }
        if self.pos == start {
            return Ok(None);
        }
        if value == 0 {
            return Err(PatternError::InvalidLength {
                position: start,
                reason: "zero length".to_string(),
            });
        }
        Ok(Some(value))
    }
}

fn count_slots(tokens: &[Token]) -> usize {
    tokens
        .iter()
        .map(|token| match token {
            Token::Literal(_) => 0,
            Token::Component(_) => 1,
            Token::Group(group) => group.total_slots(),
        })
        .fold(0, usize::saturating_add)
}

fn check_slot_count(count: usize, position: usize) -> Result<(), PatternError> {
    if count > MAX_SLOTS {
        return Err(PatternError::InvalidLength {
            position,
            reason: format!("pattern declares more than {MAX_SLOTS} components"),
        });
    }
    Ok(())
}

fn push_unique(stops: &mut Stops, separator: Separator) {
    if !stops.contains(&separator) {
        stops.push(separator);
    }
}

/// Separators that can appear first when matching `tokens`, followed by `follow`.
fn first_set(tokens: &[Token], follow: &Stops) -> Stops {
    let mut stops = Stops::new();
    for token in tokens {
        match token {
            Token::Literal(separator) => {
                push_unique(&mut stops, *separator);
                return stops;
            }
            Token::Component(_) => return stops,
            Token::Group(group) => {
                for separator in first_set(&group.tokens, &Stops::new()) {
                    push_unique(&mut stops, separator);
                }
            }
        }
    }
    for separator in follow {
        push_unique(&mut stops, *separator);
    }
    stops
}

fn assign_stops(tokens: &mut [Token], follow: &Stops) {
    for i in 0..tokens.len() {
        let after = first_set(&tokens[i + 1..], follow);
        match &mut tokens[i] {
            Token::Literal(_) => {}
            Token::Component(component) => component.stops = after,
            Token::Group(group) => {
                let mut inner = after.clone();
                if group.max_repeat > 1 {
                    for separator in first_set(&group.tokens, &Stops::new()) {
                        push_unique(&mut inner, separator);
                    }
                }
                assign_stops(&mut group.tokens, &inner);
                group.follow = after;
            }
        }
    }
}

fn flatten(tokens: &[Token], optional: bool, repetition: usize, out: &mut Vec<Slot>) {
    for token in tokens {
        match token {
            Token::Literal(_) => {}
            Token::Component(component) => out.push(Slot {
                index: out.len(),
                rule: component.rule,
                optional,
                repetition,
            }),
            Token::Group(group) => {
                for r in 0..group.max_repeat {
                    flatten(&group.tokens, true, r, out);
                }
            }
        }
    }
}
