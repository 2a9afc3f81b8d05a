//! This module compiles a `Pattern` tree into an `NfaDesign` using Thompson-style construction
//! with free moves.

use crate::design::NfaDesign;
use crate::pattern::Pattern;
use crate::rulebook::RuleBook;
use crate::types::{Rule, State};
use log::debug;

/// Compiles `pattern` into a fresh NFA.
///
/// Every call allocates its own states, so designs from separate compilations never share
/// anything.
pub fn compile(pattern: &Pattern) -> NfaDesign {
    let design = Compiler::new().compile(pattern);

    debug!(
        "compiled {} into {} states and {} rules",
        pattern.inspect(),
        design.state_count(),
        design.rule_count()
    );

    design
}

impl From<&Pattern> for NfaDesign {
    fn from(pattern: &Pattern) -> Self {
        compile(pattern)
    }
}

/// Pattern to NFA compiler.
///
/// Each subpattern becomes a fragment: a self-contained `NfaDesign` over states nobody else
/// uses. Fragments are combined into new designs without modifying the originals.
#[derive(Debug, Default)]
pub struct Compiler {
    /// Index of the next state to hand out.
    next_state: usize,
}

impl Compiler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compiles `pattern`, consuming the compiler.
    pub fn compile(mut self, pattern: &Pattern) -> NfaDesign {
        self.fragment(pattern)
    }

    fn new_state(&mut self) -> State {
        let state = State(self.next_state);
        self.next_state += 1;
        state
    }

    fn fragment(&mut self, pattern: &Pattern) -> NfaDesign {
        match pattern {
            Pattern::Empty => self.empty(),
            Pattern::Literal(c) => self.literal(*c),
            Pattern::Concatenate(first, second) => {
                let first = self.fragment(first);
                let second = self.fragment(second);
                self.concatenate(&first, &second)
            }
            Pattern::Choose(first, second) => {
                let first = self.fragment(first);
                let second = self.fragment(second);
                self.choose(&first, &second)
            }
            Pattern::Repeat(inner) => {
                let inner = self.fragment(inner);
                self.repeat(&inner)
            }
        }
    }

    /// A single state that both starts and accepts, with no rules.
    fn empty(&mut self) -> NfaDesign {
        let start = self.new_state();
        NfaDesign::new(start, [start], RuleBook::default())
    }

    fn literal(&mut self, c: char) -> NfaDesign {
        let start = self.new_state();
        let accept = self.new_state();
        NfaDesign::new(start, [accept], RuleBook::new(vec![Rule::new(start, c, accept)]))
    }

    /// Links every accept state of `first` to the start of `second` with a free move.
    fn concatenate(&mut self, first: &NfaDesign, second: &NfaDesign) -> NfaDesign {
        let links = first
            .accept_states()
            .iter()
            .map(|&state| Rule::free(state, second.start_state()));

        NfaDesign::new(
            first.start_state(),
            second.accept_states().iter().copied(),
            RuleBook::combine([first.rulebook(), second.rulebook()], links),
        )
    }

    /// Adds a new start state with free moves into both alternatives.
    fn choose(&mut self, first: &NfaDesign, second: &NfaDesign) -> NfaDesign {
        let start = self.new_state();
        let entries = [first, second].map(|design| Rule::free(start, design.start_state()));

        NfaDesign::new(
            start,
            first
                .accept_states()
                .iter()
                .chain(second.accept_states())
                .copied(),
            RuleBook::combine([first.rulebook(), second.rulebook()], entries),
        )
    }

    /// Adds a new accepting start state and loops every accept state back to the old start.
    fn repeat(&mut self, inner: &NfaDesign) -> NfaDesign {
        let start = self.new_state();
        let loops = inner
            .accept_states()
            .iter()
            .map(|&state| Rule::free(state, inner.start_state()));
        let entry = Rule::free(start, inner.start_state());

        NfaDesign::new(
            start,
            inner
                .accept_states()
                .iter()
                .copied()
                .chain(std::iter::once(start)),
            RuleBook::combine([inner.rulebook()], loops.chain(std::iter::once(entry))),
        )
    }
}
