//! Deterministic finite automata: repair and execution.
//!
//! A [`Dfa`] can only be obtained through [`Dfa::normalize`], which turns an
//! arbitrary, possibly malformed document into a *total* automaton:
//!
//! - `states` is deduplicated (first-seen order) and never empty,
//! - `start_state` is always one of `states`,
//! - for every state `s` and symbol `a`, `transitions[s][a]` is defined and
//!   names a state of the automaton,
//! - `accept_states` only contains states that were declared.
//!
//! Missing transitions go to a synthesized sink state, never to a self-loop,
//! and synthesized states are never accepting. They are listed under
//! `synthesized_states` when serialized, so normalizing the output again
//! yields the same automaton. Normalization cannot fail: it
//! may yield an automaton for the wrong language, which is the scorer's job to
//! detect.
//!
//! # Examples
//!
//! ```
//! use automata_rs::dfa::Dfa;
//! use serde_json::json;
//!
//! let dfa = Dfa::normalize(&json!({
//!     "alphabet": ["a", "b"],
//!     "states": ["q0", "q1"],
//!     "start_state": "q0",
//!     "accept_states": ["q1"],
//!     "transitions": { "q0": { "a": "q1" }, "q1": { "a": "q1", "b": "q1" } }
//! }));
//!
//! assert!(dfa.run("ab"));
//! assert!(!dfa.run("b")); // q0 --b--> sink
//! assert!(!dfa.run("ac")); // 'c' is outside the alphabet
//! ```

use indexmap::{IndexMap, IndexSet};
use log::debug;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::raw;
use crate::trace::{Run, TraceStep};

/// Base name for the synthesized sink state.
pub const SINK_STATE: &str = "q_sink";

/// A total deterministic finite automaton.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dfa {
    alphabet: Vec<String>,
    states: Vec<String>,
    start_state: String,
    accept_states: Vec<String>,
    transitions: IndexMap<String, IndexMap<String, String>>,
    explanation: String,
    logic: String,
    #[serde(skip_serializing_if = "Value::is_null")]
    simulation: Value,
    #[serde(rename = "synthesized_states", skip_serializing_if = "Vec::is_empty")]
    synthesized: Vec<String>,
}

impl Dfa {
    /// Repairs a raw DFA document into a total automaton.
    pub fn normalize(raw: &Value) -> Self {
        let alphabet = raw::string_list(raw, "alphabet").unwrap_or_else(|| {
            debug!("dfa: no alphabet, defaulting to binary");
            vec!["0".to_string(), "1".to_string()]
        });

        let mut states = raw::string_list(raw, "states").unwrap_or_default();
        if states.is_empty() {
            debug!("dfa: no states, using placeholder q0");
            states.push("q0".to_string());
        }

        let start_state = raw::string(raw, "start_state").unwrap_or_else(|| states[0].clone());
        if !states.contains(&start_state) {
            debug!("dfa: start state {} not declared, prepending", start_state);
            states.insert(0, start_state.clone());
        }

        // States marked synthesized by an earlier normalization stay so.
        let marked: Vec<String> = raw::string_list(raw, "synthesized_states")
            .unwrap_or_default()
            .into_iter()
            .filter(|s| states.contains(s))
            .collect();

        let accept_states: Vec<String> = raw::name_list(raw, "accept_states")
            .unwrap_or_else(|| vec![start_state.clone()])
            .into_iter()
            .filter(|s| states.contains(s) && !marked.contains(s))
            .collect();

        let rows = raw::object(raw, "transitions");
        let explicit = |state: &str, symbol: &str| -> Option<String> {
            rows?.get(state)?.get(symbol).and_then(raw::name)
        };

        // The sink must not collide with anything the document mentions.
        let mut taken: IndexSet<String> = states.iter().cloned().collect();
        if let Some(rows) = rows {
            for (state, row) in rows {
                taken.insert(state.clone());
                if let Some(row) = row.as_object() {
                    taken.extend(row.values().filter_map(raw::name));
                }
            }
        }
        let sink = fresh_name(SINK_STATE, &taken);

        let mut known: IndexSet<String> = states.iter().cloned().collect();
        let mut synthesized = marked;
        let mut transitions = IndexMap::new();

        // Worklist over `known`: rows for undeclared targets are filled too.
        let mut i = 0;
        while let Some(state) = known.get_index(i).cloned() {
            let mut row = IndexMap::with_capacity(alphabet.len());
            for symbol in &alphabet {
                let target = explicit(&state, symbol).unwrap_or_else(|| sink.clone());
                if known.insert(target.clone()) {
                    debug!("dfa: synthesized state {} (target of {} --{}-->)", target, state, symbol);
                    synthesized.push(target.clone());
                }
                row.insert(symbol.clone(), target);
            }
            transitions.insert(state, row);
            i += 1;
        }

        Self {
            alphabet,
            states: known.into_iter().collect(),
            start_state,
            accept_states,
            transitions,
            explanation: raw::text(raw, "explanation").unwrap_or_default(),
            logic: raw::text(raw, "logic").unwrap_or_default(),
            simulation: raw.get("simulation").cloned().unwrap_or(Value::Null),
            synthesized,
        }
    }

    /// The fixed, hand-authored automaton returned when no model output is
    /// available at all: binary words of even length.
    pub fn even_length() -> Self {
        Self::normalize(&json!({
            "alphabet": ["0", "1"],
            "states": ["q_even", "q_odd"],
            "start_state": "q_even",
            "accept_states": ["q_even"],
            "transitions": {
                "q_even": { "0": "q_odd", "1": "q_odd" },
                "q_odd": { "0": "q_even", "1": "q_even" }
            },
            "explanation": "Accepts binary words of even length.",
            "logic": "Every symbol toggles between q_even and q_odd."
        }))
    }

    pub fn alphabet(&self) -> &[String] {
        &self.alphabet
    }
    pub fn states(&self) -> &[String] {
        &self.states
    }
    pub fn start_state(&self) -> &str {
        &self.start_state
    }
    pub fn accept_states(&self) -> &[String] {
        &self.accept_states
    }
    pub fn transitions(&self) -> &IndexMap<String, IndexMap<String, String>> {
        &self.transitions
    }
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
    pub fn logic(&self) -> &str {
        &self.logic
    }

    /// States that were not declared but had to be created (sink, dangling targets).
    pub fn synthesized_states(&self) -> &[String] {
        &self.synthesized
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_states.iter().any(|s| s == state)
    }

    /// The successor of `state` on `symbol`, or `None` if the symbol is not in the alphabet.
    pub fn next(&self, state: &str, symbol: &str) -> Option<&str> {
        self.transitions.get(state)?.get(symbol).map(String::as_str)
    }

    /// Runs the automaton on `word`, one character per symbol.
    ///
    /// A character outside the alphabet rejects immediately.
    pub fn run(&self, word: &str) -> bool {
        let mut current = self.start_state.as_str();
        let mut buf = [0u8; 4];
        for c in word.chars() {
            match self.next(current, c.encode_utf8(&mut buf)) {
                Some(next) => current = next,
                None => return false,
            }
        }
        self.is_accepting(current)
    }

    /// Like [`run`][Dfa::run], but records every visited state.
    pub fn trace(&self, word: &str) -> Run {
        let mut current = self.start_state.as_str();
        let mut trace = vec![TraceStep {
            step: 0,
            state: current.to_string(),
            consumed: String::new(),
            remaining_input: word.to_string(),
            stack: None,
        }];
        let mut buf = [0u8; 4];
        for (offset, c) in word.char_indices() {
            let Some(next) = self.next(current, c.encode_utf8(&mut buf)) else {
                debug!("dfa: symbol {:?} outside alphabet, rejecting", c);
                return Run { accepted: false, trace };
            };
            current = next;
            trace.push(TraceStep {
                step: trace.len(),
                state: current.to_string(),
                consumed: c.to_string(),
                remaining_input: word[offset + c.len_utf8()..].to_string(),
                stack: None,
            });
        }
        Run {
            accepted: self.is_accepting(current),
            trace,
        }
    }
}

impl<'de> Deserialize<'de> for Dfa {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Dfa::normalize(&raw))
    }
}

/// Picks `base`, or `base_1`, `base_2`, ... whichever is not taken.
pub(crate) fn fresh_name(base: &str, taken: &IndexSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_string();
    }
    (1..)
        .map(|i| format!("{}_{}", base, i))
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| base.to_string())
}
