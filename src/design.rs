//! This module defines `NfaDesign`, a complete description of a nondeterministic finite
//! automaton: where it starts, which states accept, and the rules connecting them.

use crate::rulebook::RuleBook;
use crate::simulation::NfaSimulation;
use crate::types::State;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// An immutable NFA description.
///
/// A design is never modified after construction, so a single design can back any number of
/// simulations, including simulations running on different threads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NfaDesign {
    start_state: State,
    accept_states: BTreeSet<State>,
    rulebook: RuleBook,
}

impl NfaDesign {
    /// Creates a new `NfaDesign`.
    ///
    /// # Arguments
    ///
    /// * `start_state` - The state every simulation starts from.
    /// * `accept_states` - The states in which the automaton accepts.
    /// * `rulebook` - The transition rules.
    pub fn new(
        start_state: State,
        accept_states: impl IntoIterator<Item = State>,
        rulebook: RuleBook,
    ) -> Self {
        Self {
            start_state,
            accept_states: accept_states.into_iter().collect(),
            rulebook,
        }
    }

    pub fn start_state(&self) -> State {
        self.start_state
    }

    pub fn accept_states(&self) -> &BTreeSet<State> {
        &self.accept_states
    }

    pub fn rulebook(&self) -> &RuleBook {
        &self.rulebook
    }

    /// Returns a fresh simulation positioned at the epsilon-closure of the start state.
    pub fn to_simulation(&self) -> NfaSimulation<'_> {
        NfaSimulation::new(self, BTreeSet::from([self.start_state]))
    }

    /// Checks whether the automaton accepts the whole of `input`.
    ///
    /// Each call runs its own simulation; the design itself is left untouched.
    pub fn accepts(&self, input: &str) -> bool {
        self.to_simulation().read_string(input).is_accepting()
    }

    /// Returns every state of the automaton: the start state, the accept states, and every
    /// state mentioned by a rule.
    pub fn states(&self) -> BTreeSet<State> {
        let mut states = self.rulebook.states();
        states.insert(self.start_state);
        states.extend(self.accept_states.iter().copied());
        states
    }

    pub fn state_count(&self) -> usize {
        self.states().len()
    }

    pub fn rule_count(&self) -> usize {
        self.rulebook.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Rule;

    /// Accepts strings over {a, b} whose third-to-last character is `b`.
    fn create_third_from_last_design() -> NfaDesign {
        let rulebook = RuleBook::new(vec![
            Rule::new(State(1), 'a', State(1)),
            Rule::new(State(1), 'b', State(1)),
            Rule::new(State(1), 'b', State(2)),
            Rule::new(State(2), 'a', State(3)),
            Rule::new(State(2), 'b', State(3)),
            Rule::new(State(3), 'a', State(4)),
            Rule::new(State(3), 'b', State(4)),
        ]);

        NfaDesign::new(State(1), [State(4)], rulebook)
    }

    /// Accepts strings of `a`s whose length is a multiple of two or three.
    fn create_free_move_design() -> NfaDesign {
        let rulebook = RuleBook::new(vec![
            Rule::free(State(1), State(2)),
            Rule::free(State(1), State(4)),
            Rule::new(State(2), 'a', State(3)),
            Rule::new(State(3), 'a', State(2)),
            Rule::new(State(4), 'a', State(5)),
            Rule::new(State(5), 'a', State(6)),
            Rule::new(State(6), 'a', State(4)),
        ]);

        NfaDesign::new(State(1), [State(2), State(4)], rulebook)
    }

    #[test]
    fn test_design_accepts() {
        let design = create_third_from_last_design();

        assert!(design.accepts("bab"));
        assert!(design.accepts("bbbbb"));
        assert!(!design.accepts("bbabb"));
        assert!(!design.accepts(""));
    }

    #[test]
    fn test_design_follows_free_moves() {
        let design = create_free_move_design();

        assert!(design.accepts(""));
        assert!(design.accepts("aa"));
        assert!(design.accepts("aaa"));
        assert!(!design.accepts("aaaaa"));
        assert!(design.accepts("aaaaaa"));
    }

    #[test]
    fn test_design_is_reusable() {
        let design = create_free_move_design();
        let before = design.clone();

        for input in ["", "a", "aa", "aaaaaaa", "b"] {
            design.accepts(input);
        }

        assert_eq!(design, before);
    }

    #[test]
    fn test_design_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NfaDesign>();

        let design = &create_free_move_design();
        let inputs = ["", "a", "aa", "aaa", "aaaaa", "aaaaaa"];

        let results: Vec<bool> = std::thread::scope(|scope| {
            let handles: Vec<_> = inputs
                .iter()
                .map(|&input| scope.spawn(move || design.accepts(input)))
                .collect();

            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(results, [true, false, true, true, false, true]);
    }

    #[test]
    fn test_simulation_starts_closed() {
        let design = create_free_move_design();

        assert_eq!(
            design.to_simulation().current_states(),
            &BTreeSet::from([State(1), State(2), State(4)])
        );
    }

    #[test]
    fn test_design_counts() {
        let design = create_third_from_last_design();

        assert_eq!(design.state_count(), 4);
        assert_eq!(design.rule_count(), 7);
        assert_eq!(design.accept_states(), &BTreeSet::from([State(4)]));
    }

    #[test]
    fn test_design_serialization() {
        let design = create_free_move_design();

        let json = serde_json::to_string(&design).unwrap();
        let restored: NfaDesign = serde_json::from_str(&json).unwrap();

        assert_eq!(design, restored);
        assert!(json.contains("\"start_state\":1"));
    }
}
