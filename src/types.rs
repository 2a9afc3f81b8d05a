//! This module defines the core data structures and types used throughout the automaton
//! toolkit, including states, input symbols, transition rules, and error types.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The maximum allowed size for a pattern document in bytes.
pub const MAX_DOCUMENT_SIZE: usize = 65536; // 64KB
/// The file extension recognized when loading pattern documents from a directory.
pub const DOCUMENT_EXTENSION: &str = "json";
/// The label used for epsilon moves when rendering rules.
pub const EPSILON_LABEL: &str = "ε";

/// An automaton state.
///
/// States carry no structure beyond their identity. They are allocated by the compiler from a
/// counter local to a single compilation, so two states are equal only if they were handed out
/// by the same allocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct State(pub usize);

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q{}", self.0)
    }
}

/// The input a rule consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// A free move: the rule can be followed without reading any input.
    Epsilon,
    /// A single input character.
    Char(char),
}

impl Symbol {
    /// Returns `true` if this is an epsilon (free) move.
    pub fn is_epsilon(&self) -> bool {
        matches!(self, Symbol::Epsilon)
    }
}

impl From<char> for Symbol {
    fn from(c: char) -> Self {
        Symbol::Char(c)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Symbol::Epsilon => f.write_str(EPSILON_LABEL),
            Symbol::Char(c) => write!(f, "{c}"),
        }
    }
}

/// A single transition rule of a nondeterministic automaton.
///
/// Several rules may share the same `from` state and `symbol`; that is where the
/// nondeterminism comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    /// The state the rule leaves from.
    pub from: State,
    /// The input consumed by following the rule.
    pub symbol: Symbol,
    /// The state the rule leads to.
    pub to: State,
}

impl Rule {
    /// Creates a rule consuming the character `c`.
    pub fn new(from: State, c: char, to: State) -> Self {
        Self {
            from,
            symbol: Symbol::Char(c),
            to,
        }
    }

    /// Creates a free move.
    pub fn free(from: State, to: State) -> Self {
        Self {
            from,
            symbol: Symbol::Epsilon,
            to,
        }
    }

    /// Checks whether this rule can be followed from `state` on `symbol`.
    pub fn applies_to(&self, state: State, symbol: Symbol) -> bool {
        self.from == state && self.symbol == symbol
    }

    /// Returns the state reached by following this rule.
    pub fn follow(&self) -> State {
        self.to
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} --{}--> {}", self.from, self.symbol, self.to)
    }
}

/// Represents various errors that can occur while building, loading, or validating automata.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegulaError {
    /// Indicates a malformed pattern tree, such as a literal that is not exactly one character.
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    /// Indicates an error while decoding a pattern document or automaton description.
    #[error("Document parsing error: {0}")]
    ParseError(String),
    /// Indicates an error during the validation of an automaton or a catalog lookup.
    #[error("Validation error: {0}")]
    ValidationError(String),
    /// Indicates an error related to file system operations, such as reading document files.
    #[error("File error: {0}")]
    FileError(String),
}

impl From<serde_json::Error> for RegulaError {
    fn from(error: serde_json::Error) -> Self {
        RegulaError::ParseError(error.to_string())
    }
}
