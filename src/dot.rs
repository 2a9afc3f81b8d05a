//! Graphviz export for NFA and DFA designs, using the
//! [dot language](https://graphviz.org/docs/layouts/dot/).

use crate::design::NfaDesign;
use crate::dfa::DfaDesign;

impl NfaDesign {
    /// Converts the design to a `digraph` in the dot language.
    ///
    /// Accept states are drawn as double circles and free moves are labelled `ε`.
    pub fn to_dot(&self) -> String {
        let accepting = self
            .accept_states()
            .iter()
            .map(|state| state.to_string())
            .collect::<Vec<_>>();
        let others = self
            .states()
            .into_iter()
            .filter(|state| !self.accept_states().contains(state))
            .map(|state| state.to_string())
            .collect::<Vec<_>>();
        let edges = self
            .rulebook()
            .rules()
            .iter()
            .map(|rule| edge(&rule.from, &rule.to, &rule.symbol.to_string()))
            .collect::<Vec<_>>();

        digraph("nfa", &self.start_state().to_string(), &accepting, &others, &edges)
    }
}

impl DfaDesign {
    /// Converts the design to a `digraph` in the dot language, one node per DFA state.
    pub fn to_dot(&self) -> String {
        let (accepting, others): (Vec<_>, Vec<_>) =
            (0..self.state_count()).partition(|id| self.accept_states().contains(id));
        let names = |ids: Vec<usize>| ids.iter().map(|id| format!("d{id}")).collect::<Vec<_>>();
        let edges = self
            .transitions()
            .map(|(from, c, to)| edge(&format!("d{from}"), &format!("d{to}"), &c.to_string()))
            .collect::<Vec<_>>();

        digraph(
            "dfa",
            &format!("d{}", self.start_state()),
            &names(accepting),
            &names(others),
            &edges,
        )
    }
}

fn edge(from: &impl ToString, to: &impl ToString, label: &str) -> String {
    format!(
        "{} -> {} [label = \"{}\"];",
        from.to_string(),
        to.to_string(),
        escape(label)
    )
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

fn digraph(
    name: &str,
    start: &str,
    accepting: &[String],
    others: &[String],
    edges: &[String],
) -> String {
    let mut lines = vec![
        "rankdir = LR;".to_string(),
        "start [shape = point];".to_string(),
    ];

    if !accepting.is_empty() {
        lines.push(format!(
            "node [shape = doublecircle]; {};",
            accepting.join(" ")
        ));
    }
    if !others.is_empty() {
        lines.push(format!("node [shape = circle]; {};", others.join(" ")));
    }

    lines.push(format!("start -> {start};"));
    lines.extend(edges.iter().cloned());

    format!(
        "digraph {name} {{\n{}\n}}",
        lines
            .iter()
            .map(|line| format!("\t{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    )
}
