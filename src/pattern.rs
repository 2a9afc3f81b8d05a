//! This module defines `Pattern`, an algebraic regular expression built from the empty pattern,
//! single-character literals, concatenation, choice, and repetition.

use crate::compiler::compile;
use crate::types::RegulaError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Characters with a meaning of their own in rendered patterns.
const METACHARACTERS: &str = "|*()\\";

/// A regular expression tree.
///
/// Patterns are built programmatically and never parsed from regex text. The JSON form uses
/// externally tagged variants, for example `{"Repeat": {"Literal": "a"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPattern", into = "RawPattern")]
pub enum Pattern {
    /// Matches only the empty string.
    Empty,
    /// Matches exactly one character.
    Literal(char),
    /// Matches the first pattern followed by the second.
    Concatenate(Box<Pattern>, Box<Pattern>),
    /// Matches either pattern.
    Choose(Box<Pattern>, Box<Pattern>),
    /// Matches zero or more repetitions of the pattern.
    Repeat(Box<Pattern>),
}

impl Pattern {
    pub fn empty() -> Self {
        Pattern::Empty
    }

    pub fn literal(c: char) -> Self {
        Pattern::Literal(c)
    }

    /// Creates a literal from a string that must hold exactly one character.
    ///
    /// # Returns
    ///
    /// * `Ok(Pattern::Literal)` if `text` is a single character.
    /// * `Err(RegulaError::InvalidPattern)` otherwise.
    pub fn try_literal(text: &str) -> Result<Self, RegulaError> {
        let mut chars = text.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(Pattern::Literal(c)),
            _ => Err(RegulaError::InvalidPattern(format!(
                "literal {text:?} must be exactly one character"
            ))),
        }
    }

    pub fn concatenate(first: Pattern, second: Pattern) -> Self {
        Pattern::Concatenate(Box::new(first), Box::new(second))
    }

    pub fn choose(first: Pattern, second: Pattern) -> Self {
        Pattern::Choose(Box::new(first), Box::new(second))
    }

    pub fn repeat(pattern: Pattern) -> Self {
        Pattern::Repeat(Box::new(pattern))
    }

    /// Binding strength used to decide where parentheses are required when rendering.
    pub fn precedence(&self) -> u8 {
        match self {
            Pattern::Empty | Pattern::Literal(_) => 3,
            Pattern::Repeat(_) => 2,
            Pattern::Concatenate(..) => 1,
            Pattern::Choose(..) => 0,
        }
    }

    /// Renders the pattern inside a context of precedence `outer`, parenthesizing it only if it
    /// binds more loosely than that context requires.
    ///
    /// A nested `Empty` always renders as `()`, since it has no text of its own.
    pub fn bracket(&self, outer: u8) -> String {
        if *self == Pattern::Empty || self.precedence() < outer {
            format!("({self})")
        } else {
            self.to_string()
        }
    }

    /// Renders the pattern as regex text with minimal parentheses.
    ///
    /// Literal operator characters are escaped with a backslash, e.g. `\|`.
    pub fn to_text(&self) -> String {
        self.to_string()
    }

    /// Renders the pattern between slashes, e.g. `/(a|b)*/`.
    pub fn inspect(&self) -> String {
        format!("/{self}/")
    }

    /// Checks whether the pattern matches the whole of `input`.
    pub fn matches(&self, input: &str) -> bool {
        compile(self).accepts(input)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let precedence = self.precedence();

        match self {
            Pattern::Empty => Ok(()),
            Pattern::Literal(c) if METACHARACTERS.contains(*c) => write!(f, "\\{c}"),
            Pattern::Literal(c) => write!(f, "{c}"),
            Pattern::Concatenate(first, second) => write!(
                f,
                "{}{}",
                first.bracket(precedence),
                second.bracket(precedence)
            ),
            Pattern::Choose(first, second) => write!(
                f,
                "{}|{}",
                first.bracket(precedence),
                second.bracket(precedence)
            ),
            Pattern::Repeat(pattern) => write!(f, "{}*", pattern.bracket(precedence)),
        }
    }
}

/// Serialized form of a `Pattern`, where literals are strings that still need validating.
#[derive(Serialize, Deserialize)]
enum RawPattern {
    Empty,
    Literal(String),
    Concatenate(Box<RawPattern>, Box<RawPattern>),
    Choose(Box<RawPattern>, Box<RawPattern>),
    Repeat(Box<RawPattern>),
}

impl TryFrom<RawPattern> for Pattern {
    type Error = RegulaError;

    fn try_from(raw: RawPattern) -> Result<Self, Self::Error> {
        Ok(match raw {
            RawPattern::Empty => Pattern::Empty,
            RawPattern::Literal(text) => Pattern::try_literal(&text)?,
            RawPattern::Concatenate(first, second) => {
                Pattern::concatenate((*first).try_into()?, (*second).try_into()?)
            }
            RawPattern::Choose(first, second) => {
                Pattern::choose((*first).try_into()?, (*second).try_into()?)
            }
            RawPattern::Repeat(pattern) => Pattern::repeat((*pattern).try_into()?),
        })
    }
}

impl From<Pattern> for RawPattern {
    fn from(pattern: Pattern) -> Self {
        match pattern {
            Pattern::Empty => RawPattern::Empty,
            Pattern::Literal(c) => RawPattern::Literal(c.to_string()),
            Pattern::Concatenate(first, second) => {
                RawPattern::Concatenate(Box::new((*first).into()), Box::new((*second).into()))
            }
            Pattern::Choose(first, second) => {
                RawPattern::Choose(Box::new((*first).into()), Box::new((*second).into()))
            }
            Pattern::Repeat(pattern) => RawPattern::Repeat(Box::new((*pattern).into())),
        }
    }
}
