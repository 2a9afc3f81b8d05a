//! This module simulates an `NfaDesign` by tracking the full set of states the automaton could
//! be in, rather than committing to a single one.

use crate::design::NfaDesign;
use crate::rulebook::RuleBook;
use crate::types::State;
use log::trace;
use std::collections::BTreeSet;

/// Returns the epsilon-closure of `states` under `rulebook`.
///
/// This is the set a simulation is in after it has taken every free move available to it.
pub fn current_states(rulebook: &RuleBook, states: &BTreeSet<State>) -> BTreeSet<State> {
    rulebook.follow_free_moves(states)
}

/// A running simulation of an `NfaDesign`.
///
/// The state set is always epsilon-closed. Reading input never mutates a simulation; it
/// produces a new one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NfaSimulation<'a> {
    design: &'a NfaDesign,
    states: BTreeSet<State>,
}

impl<'a> NfaSimulation<'a> {
    /// Creates a simulation of `design` positioned at the closure of `states`.
    pub fn new(design: &'a NfaDesign, states: BTreeSet<State>) -> Self {
        let states = current_states(design.rulebook(), &states);
        Self { design, states }
    }

    /// Returns the epsilon-closed set of states the automaton could currently be in.
    pub fn current_states(&self) -> &BTreeSet<State> {
        &self.states
    }

    /// Checks whether any current state is an accept state.
    pub fn is_accepting(&self) -> bool {
        !self.states.is_disjoint(self.design.accept_states())
    }

    /// Returns `true` if no state is reachable any more. A dead simulation stays dead.
    pub fn is_dead(&self) -> bool {
        self.states.is_empty()
    }

    /// Consumes a single character.
    ///
    /// A character no current state can consume yields a dead simulation, not an error.
    pub fn read_character(&self, c: char) -> Self {
        let next = self.design.rulebook().next_states(&self.states, c);
        let simulation = Self::new(self.design, next);

        trace!(
            "read {c:?}: {} -> {}",
            format_states(&self.states),
            format_states(&simulation.states)
        );

        simulation
    }

    /// Consumes every character of `input` in order.
    pub fn read_string(&self, input: &str) -> Self {
        let mut simulation = self.clone();

        for c in input.chars() {
            if simulation.is_dead() {
                break;
            }
            simulation = simulation.read_character(c);
        }

        simulation
    }
}

/// Formats a state set as `{q0, q1}`.
pub fn format_states(states: &BTreeSet<State>) -> String {
    format!(
        "{{{}}}",
        states
            .iter()
            .map(State::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    )
}
