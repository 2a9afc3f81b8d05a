//! This module provides functions for analyzing NFA designs to detect structural problems
//! before they are simulated. Designs produced by the compiler always pass; the checks matter
//! for designs assembled by hand or loaded from JSON.

use crate::design::NfaDesign;
use crate::types::{RegulaError, State};
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Represents the problems that can be found during the analysis of an NFA design.
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum AnalysisError {
    /// Indicates that the design has no accept states, so it can never accept anything.
    NoAcceptStates,
    /// Indicates states that cannot be reached from the start state.
    UnreachableStates(Vec<State>),
    /// Indicates reachable states from which no accept state can be reached.
    DeadStates(Vec<State>),
}

impl From<AnalysisError> for RegulaError {
    /// Converts an `AnalysisError` into a `RegulaError::ValidationError`.
    fn from(error: AnalysisError) -> Self {
        match error {
            AnalysisError::NoAcceptStates => {
                RegulaError::ValidationError("Design has no accept states".to_string())
            }
            AnalysisError::UnreachableStates(states) => RegulaError::ValidationError(format!(
                "Unreachable states detected: {}",
                format_state_list(&states)
            )),
            AnalysisError::DeadStates(states) => RegulaError::ValidationError(format!(
                "States that can never accept: {}",
                format_state_list(&states)
            )),
        }
    }
}

/// Analyzes an `NfaDesign` for structural errors.
///
/// # Returns
///
/// * `Ok(())` if no errors are found.
/// * `Err(RegulaError::ValidationError)` describing the first problem found.
pub fn analyze(design: &NfaDesign) -> Result<(), RegulaError> {
    let errors = [check_accept_states, check_unreachable_states, check_dead_states]
        .iter()
        .filter_map(|f| f(design).err())
        .collect::<Vec<_>>();

    match errors.into_iter().next() {
        Some(first_error) => Err(first_error.into()),
        None => Ok(()),
    }
}

/// Checks that at least one accept state exists.
fn check_accept_states(design: &NfaDesign) -> Result<(), AnalysisError> {
    if design.accept_states().is_empty() {
        return Err(AnalysisError::NoAcceptStates);
    }

    Ok(())
}

/// Checks that every state can be reached from the start state, following any rule.
fn check_unreachable_states(design: &NfaDesign) -> Result<(), AnalysisError> {
    let reachable = reachable_states(design);

    let unreachable: Vec<State> = design
        .states()
        .into_iter()
        .filter(|state| !reachable.contains(state))
        .collect();

    if !unreachable.is_empty() {
        return Err(AnalysisError::UnreachableStates(unreachable));
    }

    Ok(())
}

/// Checks that every reachable state can still lead to an accept state.
///
/// Walks the rules backwards from the accept states; whatever is reachable from the start but
/// not found by that walk is dead.
fn check_dead_states(design: &NfaDesign) -> Result<(), AnalysisError> {
    let mut predecessors: HashMap<State, Vec<State>> = HashMap::new();
    for rule in design.rulebook().rules() {
        predecessors.entry(rule.to).or_default().push(rule.from);
    }

    let mut live: BTreeSet<State> = design.accept_states().clone();
    let mut pending: VecDeque<State> = live.iter().copied().collect();

    while let Some(state) = pending.pop_front() {
        for &previous in predecessors.get(&state).into_iter().flatten() {
            if live.insert(previous) {
                pending.push_back(previous);
            }
        }
    }

    let dead: Vec<State> = reachable_states(design)
        .into_iter()
        .filter(|state| !live.contains(state))
        .collect();

    if !dead.is_empty() {
        return Err(AnalysisError::DeadStates(dead));
    }

    Ok(())
}

/// Returns every state reachable from the start state through any sequence of rules.
fn reachable_states(design: &NfaDesign) -> BTreeSet<State> {
    let mut reachable = BTreeSet::from([design.start_state()]);
    let mut pending = VecDeque::from([design.start_state()]);

    while let Some(state) = pending.pop_front() {
        for rule in design.rulebook().rules_for(state) {
            if reachable.insert(rule.to) {
                pending.push_back(rule.to);
            }
        }
    }

    reachable
}

fn format_state_list(states: &[State]) -> String {
    states
        .iter()
        .map(State::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
