//! This module defines the `RuleBook`, the transition table of a nondeterministic finite
//! automaton. It answers which rules apply to a state, where a character leads, and which
//! states are reachable through free moves alone.

use crate::types::{Rule, State, Symbol};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// An immutable collection of NFA transition rules.
///
/// The rule order is stable for a given instance but carries no meaning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleBook {
    rules: Vec<Rule>,
}

impl RuleBook {
    /// Creates a rulebook from the given rules.
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Creates a new rulebook holding the rules of every given rulebook followed by `extra`.
    ///
    /// None of the inputs are modified.
    pub fn combine<'a>(
        books: impl IntoIterator<Item = &'a RuleBook>,
        extra: impl IntoIterator<Item = Rule>,
    ) -> Self {
        books
            .into_iter()
            .flat_map(|book| book.rules.iter().copied())
            .chain(extra)
            .collect()
    }

    /// Returns every rule in the book.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Returns all rules leaving `state`, free moves included.
    pub fn rules_for(&self, state: State) -> impl Iterator<Item = &Rule> + '_ {
        self.rules.iter().filter(move |rule| rule.from == state)
    }

    /// Returns the states reached from `state` by consuming `c`.
    pub fn follow_rules_for(&self, state: State, c: char) -> BTreeSet<State> {
        self.follow(state, Symbol::Char(c)).collect()
    }

    /// Returns the states reached from any of `states` by consuming `c`.
    pub fn next_states(&self, states: &BTreeSet<State>, c: char) -> BTreeSet<State> {
        states
            .iter()
            .flat_map(|&state| self.follow(state, Symbol::Char(c)))
            .collect()
    }

    /// Computes the epsilon-closure of `states`.
    ///
    /// The result contains the given states plus every state reachable from them through free
    /// moves only. Epsilon cycles are harmless: a state is expanded at most once.
    pub fn follow_free_moves(&self, states: &BTreeSet<State>) -> BTreeSet<State> {
        let mut closure = states.clone();
        let mut pending: VecDeque<State> = states.iter().copied().collect();

        while let Some(state) = pending.pop_front() {
            for next in self.follow(state, Symbol::Epsilon) {
                if closure.insert(next) {
                    pending.push_back(next);
                }
            }
        }

        closure
    }

    /// Returns every character consumed by some rule, in sorted order.
    pub fn alphabet(&self) -> BTreeSet<char> {
        self.rules
            .iter()
            .filter_map(|rule| match rule.symbol {
                Symbol::Char(c) => Some(c),
                Symbol::Epsilon => None,
            })
            .collect()
    }

    /// Returns every state mentioned by a rule, either as source or destination.
    pub fn states(&self) -> BTreeSet<State> {
        self.rules
            .iter()
            .flat_map(|rule| [rule.from, rule.to])
            .collect()
    }

    fn follow(&self, state: State, symbol: Symbol) -> impl Iterator<Item = State> + '_ {
        self.rules
            .iter()
            .filter(move |rule| rule.applies_to(state, symbol))
            .map(Rule::follow)
    }
}

impl FromIterator<Rule> for RuleBook {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
