//! This module converts an `NfaDesign` into an equivalent deterministic automaton by subset
//! construction. Every set of NFA states a simulation can reach becomes one DFA state.

use crate::design::NfaDesign;
use crate::simulation::{format_states, NfaSimulation};
use crate::types::State;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

/// Index of a DFA state.
pub type DfaStateId = usize;

/// A deterministic finite automaton produced from an NFA.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DfaDesign {
    start_state: DfaStateId,
    accept_states: BTreeSet<DfaStateId>,
    transitions: BTreeMap<DfaStateId, BTreeMap<char, DfaStateId>>,
    /// The NFA states each DFA state stands for, indexed by `DfaStateId`.
    nfa_states: Vec<BTreeSet<State>>,
}

impl DfaDesign {
    pub fn start_state(&self) -> DfaStateId {
        self.start_state
    }

    pub fn accept_states(&self) -> &BTreeSet<DfaStateId> {
        &self.accept_states
    }

    pub fn state_count(&self) -> usize {
        self.nfa_states.len()
    }

    /// Returns the set of NFA states behind a DFA state.
    pub fn nfa_states(&self, state: DfaStateId) -> Option<&BTreeSet<State>> {
        self.nfa_states.get(state)
    }

    /// Returns the state reached from `state` on `c`, if `c` belongs to the alphabet.
    pub fn next_state(&self, state: DfaStateId, c: char) -> Option<DfaStateId> {
        self.transitions.get(&state)?.get(&c).copied()
    }

    /// Iterates over every transition as `(from, character, to)`.
    pub fn transitions(&self) -> impl Iterator<Item = (DfaStateId, char, DfaStateId)> + '_ {
        self.transitions
            .iter()
            .flat_map(|(&from, moves)| moves.iter().map(move |(&c, &to)| (from, c, to)))
    }

    /// Checks whether the automaton accepts the whole of `input`.
    ///
    /// Characters outside the NFA's alphabet reject immediately.
    pub fn accepts(&self, input: &str) -> bool {
        input
            .chars()
            .try_fold(self.start_state, |state, c| self.next_state(state, c))
            .is_some_and(|state| self.accept_states.contains(&state))
    }

    /// Describes a DFA state by the NFA states it stands for, e.g. `{q0, q2}`.
    pub fn label(&self, state: DfaStateId) -> String {
        self.nfa_states
            .get(state)
            .map(format_states)
            .unwrap_or_default()
    }
}

impl NfaDesign {
    /// Builds the equivalent DFA by discovering every reachable simulation state.
    pub fn to_dfa(&self) -> DfaDesign {
        let alphabet = self.rulebook().alphabet();
        let start = self.to_simulation();

        let mut ids: HashMap<BTreeSet<State>, DfaStateId> = HashMap::new();
        let mut nfa_states = Vec::new();
        let mut transitions = BTreeMap::new();
        let mut pending: VecDeque<NfaSimulation<'_>> = VecDeque::new();

        ids.insert(start.current_states().clone(), 0);
        nfa_states.push(start.current_states().clone());
        pending.push_back(start);

        while let Some(simulation) = pending.pop_front() {
            let from = ids[simulation.current_states()];
            let mut moves = BTreeMap::new();

            for &c in &alphabet {
                let next = simulation.read_character(c);
                let to = match ids.get(next.current_states()) {
                    Some(&id) => id,
                    None => {
                        let id = nfa_states.len();
                        ids.insert(next.current_states().clone(), id);
                        nfa_states.push(next.current_states().clone());
                        pending.push_back(next);
                        id
                    }
                };
                moves.insert(c, to);
            }

            transitions.insert(from, moves);
        }

        let accept_states = nfa_states
            .iter()
            .enumerate()
            .filter(|(_, states)| !states.is_disjoint(self.accept_states()))
            .map(|(id, _)| id)
            .collect();

        debug!(
            "subset construction produced {} DFA states from {} NFA states",
            nfa_states.len(),
            self.state_count()
        );

        DfaDesign {
            start_state: 0,
            accept_states,
            transitions,
            nfa_states,
        }
    }
}
