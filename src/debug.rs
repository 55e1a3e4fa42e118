//! Debug utilities for inspecting automaton structure.
//!
//! Renders transition tables as plain text. These are primarily useful in
//! tests, demos and during development.

use std::fmt;

use crate::automaton::Automaton;
use crate::dfa::Dfa;
use crate::dot::transition_label;
use crate::pda::Pda;

/// A row of a transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    /// Marker column: `→` for the start state, `*` for accepting, both possible.
    pub marker: String,
    pub state: String,
    pub cells: Vec<String>,
}

/// A rectangular, printable transition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionTable {
    pub header: Vec<String>,
    pub rows: Vec<TableRow>,
}

fn marker(is_start: bool, is_accepting: bool) -> String {
    let mut m = String::new();
    if is_start {
        m.push('→');
    }
    if is_accepting {
        m.push('*');
    }
    m
}

impl TransitionTable {
    fn widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.header.iter().map(|h| h.chars().count()).collect();
        for row in &self.rows {
            let cols = std::iter::once(&row.state).chain(&row.cells);
            for (w, cell) in widths.iter_mut().zip(cols) {
                *w = (*w).max(cell.chars().count());
            }
        }
        widths
    }
}

impl fmt::Display for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        write!(f, "  ")?;
        for (h, w) in self.header.iter().zip(&widths) {
            write!(f, " {:<w$}", h, w = *w)?;
        }
        writeln!(f)?;
        for row in &self.rows {
            write!(f, "{:<2}", row.marker)?;
            let cols = std::iter::once(&row.state).chain(&row.cells);
            for (cell, w) in cols.zip(&widths) {
                write!(f, " {:<w$}", cell, w = *w)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Dfa {
    /// Builds the state-by-symbol table. Missing entries are shown as `-`.
    pub fn table(&self) -> TransitionTable {
        let header = std::iter::once("state".to_string()).chain(self.alphabet().iter().cloned()).collect();
        let rows = self
            .states()
            .iter()
            .map(|state| TableRow {
                marker: marker(state == self.start_state(), self.is_accepting(state)),
                state: state.clone(),
                cells: self
                    .alphabet()
                    .iter()
                    .map(|symbol| self.next(state, symbol).unwrap_or("-").to_string())
                    .collect(),
            })
            .collect();
        TransitionTable { header, rows }
    }
}

impl Pda {
    /// Builds a table with one row per state, listing its moves as
    /// `read, pop → push / target`.
    pub fn table(&self) -> TransitionTable {
        let header = vec!["state".to_string(), "moves".to_string()];
        let rows = self
            .states()
            .iter()
            .map(|state| {
                let moves: Vec<String> = self
                    .transitions()
                    .iter()
                    .filter(|t| &t.from == state)
                    .map(|t| format!("{} / {}", transition_label(t), t.to))
                    .collect();
                TableRow {
                    marker: marker(state == self.start_state(), self.is_accepting(state)),
                    state: state.clone(),
                    cells: vec![if moves.is_empty() { "-".to_string() } else { moves.join("; ") }],
                }
            })
            .collect();
        TransitionTable { header, rows }
    }
}

impl Automaton {
    pub fn table(&self) -> Option<TransitionTable> {
        match self {
            Automaton::Dfa(dfa) => Some(dfa.table()),
            Automaton::Pda(pda) => Some(pda.table()),
            Automaton::Inapplicable { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_dfa_table() {
        let table = Dfa::even_length().table();
        assert_eq!(table.header, vec!["state", "0", "1"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].marker, "→*");
        assert_eq!(table.rows[0].cells, vec!["q_odd", "q_odd"]);
        assert_eq!(table.rows[1].marker, "");

        let text = table.to_string();
        println!("{}", text);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().nth(1).unwrap().starts_with("→* q_even"));
    }

    #[test]
    fn test_pda_table() {
        let pda = Pda::normalize(&json!({
            "states": ["q0", "q1"],
            "accept_states": ["q1"],
            "transitions": [
                { "from": "q0", "to": "q0", "read": "a", "pop": "Z", "push": ["A", "Z"] },
                { "from": "q0", "to": "q1", "read": "", "pop": "Z", "push": ["Z"] }
            ]
        }));
        let table = pda.table();
        assert_eq!(table.rows[0].cells, vec!["a, Z → AZ / q0; ε, Z → Z / q1"]);
        assert_eq!(table.rows[1].marker, "*");
        assert_eq!(table.rows[1].cells, vec!["-"]);
    }

    #[test]
    fn test_inapplicable_has_no_table() {
        let automaton = Automaton::Inapplicable {
            explanation: String::new(),
        };
        assert!(automaton.table().is_none());
    }
}
