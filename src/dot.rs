//! Automaton to DOT (Graphviz) conversion.
//!
//! # DOT Format
//!
//! The generated DOT output follows these conventions:
//! - **States** are circles; **accepting states** are double circles
//! - **Synthesized states** (sink, undeclared targets) are dashed
//! - **Start state** is pointed at by an edge from an invisible node
//! - **Edges** between the same pair of states are merged, with labels joined
//!   by commas. PDA edges are labeled `read, pop → push`, with `ε` for epsilon.
//!
//! # Examples
//!
//! ```
//! use automata_rs::dfa::Dfa;
//!
//! let dfa = Dfa::even_length();
//! let dot = dfa.to_dot().unwrap();
//! assert!(dot.starts_with("digraph {"));
//! // Write to file and render with: dot -Tpng output.dot -o output.png
//! ```

use std::fmt::Write as _;

use indexmap::IndexMap;

use crate::automaton::Automaton;
use crate::dfa::Dfa;
use crate::pda::{Pda, Transition};
use crate::symbol::{is_epsilon, EPSILON_DISPLAY};

/// Configuration options for DOT output generation.
#[derive(Debug, Clone)]
pub struct DotConfig {
    /// Shape for ordinary states (default: "circle")
    pub state_shape: &'static str,
    /// Shape for accepting states (default: "doublecircle")
    pub accept_shape: &'static str,
    /// Style for synthesized states (default: "dashed")
    pub synthesized_style: &'static str,
    /// Graph direction (default: "LR")
    pub rankdir: &'static str,
    /// Whether to merge parallel edges into one labeled edge (default: true)
    pub merge_edges: bool,
}

impl Default for DotConfig {
    fn default() -> Self {
        Self {
            state_shape: "circle",
            accept_shape: "doublecircle",
            synthesized_style: "dashed",
            rankdir: "LR",
            merge_edges: true,
        }
    }
}

fn quote(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

fn shown(symbol: &str) -> &str {
    if is_epsilon(symbol) {
        EPSILON_DISPLAY
    } else {
        symbol
    }
}

struct Graph<'a> {
    states: &'a [String],
    start: &'a str,
    accepting: &'a [String],
    synthesized: &'a [String],
    edges: Vec<(&'a str, &'a str, String)>,
}

impl Graph<'_> {
    fn render(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let mut dot = String::new();
        writeln!(dot, "digraph {{")?;
        writeln!(dot, "rankdir={};", config.rankdir)?;
        writeln!(dot, "__start [shape=point, style=invis];")?;

        for state in self.states {
            let shape = if self.accepting.contains(state) {
                config.accept_shape
            } else {
                config.state_shape
            };
            if self.synthesized.contains(state) {
                writeln!(dot, "{} [shape={}, style={}];", quote(state), shape, config.synthesized_style)?;
            } else {
                writeln!(dot, "{} [shape={}];", quote(state), shape)?;
            }
        }
        writeln!(dot, "__start -> {};", quote(self.start))?;

        if config.merge_edges {
            let mut merged = IndexMap::<(&str, &str), Vec<&str>>::new();
            for (from, to, label) in &self.edges {
                merged.entry((*from, *to)).or_default().push(label.as_str());
            }
            for ((from, to), labels) in merged {
                writeln!(dot, "{} -> {} [label={}];", quote(from), quote(to), quote(&labels.join(", ")))?;
            }
        } else {
            for (from, to, label) in &self.edges {
                writeln!(dot, "{} -> {} [label={}];", quote(from), quote(to), quote(label))?;
            }
        }

        writeln!(dot, "}}")?;
        Ok(dot)
    }
}

impl Dfa {
    /// Converts the DFA to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the DFA to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let edges = self
            .transitions()
            .iter()
            .flat_map(|(from, row)| row.iter().map(move |(symbol, to)| (from.as_str(), to.as_str(), symbol.clone())))
            .collect();
        Graph {
            states: self.states(),
            start: self.start_state(),
            accepting: self.accept_states(),
            synthesized: self.synthesized_states(),
            edges,
        }
        .render(config)
    }
}

/// Label of a PDA move: `read, pop → push`.
pub fn transition_label(t: &Transition) -> String {
    let push = if t.push.is_empty() {
        EPSILON_DISPLAY.to_string()
    } else {
        t.push.concat()
    };
    format!("{}, {} → {}", shown(&t.read), shown(&t.pop), push)
}

impl Pda {
    /// Converts the PDA to DOT format.
    pub fn to_dot(&self) -> Result<String, std::fmt::Error> {
        self.to_dot_with_config(&DotConfig::default())
    }

    /// Converts the PDA to DOT format with custom configuration.
    pub fn to_dot_with_config(&self, config: &DotConfig) -> Result<String, std::fmt::Error> {
        let edges = self
            .transitions()
            .iter()
            .map(|t| (t.from.as_str(), t.to.as_str(), transition_label(t)))
            .collect();
        Graph {
            states: self.states(),
            start: self.start_state(),
            accepting: self.accept_states(),
            synthesized: &[],
            edges,
        }
        .render(config)
    }
}

impl Automaton {
    /// Converts the automaton to DOT format, or `None` if there is no automaton.
    pub fn to_dot(&self) -> Option<Result<String, std::fmt::Error>> {
        match self {
            Automaton::Dfa(dfa) => Some(dfa.to_dot()),
            Automaton::Pda(pda) => Some(pda.to_dot()),
            Automaton::Inapplicable { .. } => None,
        }
    }
}
