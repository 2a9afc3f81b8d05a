//! This crate compiles regular expressions into nondeterministic finite automata and runs them.
//! It includes modules for building pattern trees, compiling them with Thompson-style
//! construction, simulating the resulting NFAs, converting them to DFAs, and loading patterns
//! from JSON documents.

pub mod analyzer;
pub mod catalog;
pub mod compiler;
pub mod design;
pub mod dfa;
pub mod dot;
pub mod loader;
pub mod pattern;
pub mod rulebook;
pub mod simulation;
pub mod types;


/// Re-exports the `analyze` function and `AnalysisError` enum from the analyzer module.
pub use analyzer::{analyze, AnalysisError};
/// Re-exports `CatalogEntry`, `DocumentInfo`, `PatternCatalog`, and `DOCUMENTS` from the catalog module.
pub use catalog::{CatalogEntry, DocumentInfo, PatternCatalog, DOCUMENTS};
/// Re-exports the `compile` function and `Compiler` struct from the compiler module.
pub use compiler::{compile, Compiler};
/// Re-exports the `NfaDesign` struct from the design module.
pub use design::NfaDesign;
/// Re-exports the `DfaDesign` struct from the dfa module.
pub use dfa::{DfaDesign, DfaStateId};
/// Re-exports `PatternDocument` and `PatternLoader` from the loader module.
pub use loader::{PatternDocument, PatternLoader};
/// Re-exports the `Pattern` enum from the pattern module.
pub use pattern::Pattern;
/// Re-exports the `RuleBook` struct from the rulebook module.
pub use rulebook::RuleBook;
/// Re-exports the simulation cursor and the epsilon-closure helper from the simulation module.
pub use simulation::{current_states, NfaSimulation};
/// Re-exports the automaton building blocks and error type from the types module.
pub use types::{RegulaError, Rule, State, Symbol, MAX_DOCUMENT_SIZE};
