//! Nondeterministic pushdown automata with epsilon-moves.
//!
//! As with [`Dfa`][crate::dfa::Dfa], a [`Pda`] is only obtained through
//! [`Pda::normalize`]. No totality is imposed: several transitions may share
//! a `(from, read, pop)` key, and a configuration without applicable
//! transitions is simply a dead end for the simulator.

use log::{debug, warn};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::raw;
use crate::symbol::{is_epsilon, normalize_push, normalize_symbol, EPSILON_SPELLINGS};

/// Initial stack symbol used when the document does not name one.
pub const DEFAULT_STACK_SYMBOL: &str = "Z";

/// A single move of a pushdown automaton.
///
/// `read` and `pop` use the empty string for epsilon. `push` follows the usual
/// `AZ` notation and is pushed in reverse: after pushing `["A", "Z"]` the
/// stack reads `.. Z A` with `A` on top.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Transition {
    pub from: String,
    pub to: String,
    pub read: String,
    pub pop: String,
    pub push: Vec<String>,
}

impl Transition {
    pub fn new(from: &str, to: &str, read: &str, pop: &str, push: &[&str]) -> Self {
        Self {
            from: from.to_string(),
            to: to.to_string(),
            read: read.to_string(),
            pop: pop.to_string(),
            push: push.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether this move consumes no input.
    pub fn reads_epsilon(&self) -> bool {
        is_epsilon(&self.read)
    }

    /// Whether this move inspects and pops the stack top.
    pub fn pops(&self) -> bool {
        !is_epsilon(&self.pop)
    }
}

/// Example words proposed alongside the automaton.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationExamples {
    #[serde(default)]
    pub accepted: Vec<String>,
    #[serde(default)]
    pub rejected: Vec<String>,
}

/// A normalized pushdown automaton (acceptance by final state).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pda {
    input_alphabet: Vec<String>,
    stack_alphabet: Vec<String>,
    states: Vec<String>,
    start_state: String,
    accept_states: Vec<String>,
    initial_stack_symbol: String,
    transitions: Vec<Transition>,
    explanation: String,
    logic: String,
    simulation_examples: SimulationExamples,
}

impl Pda {
    /// Repairs a raw PDA document.
    pub fn normalize(raw: &Value) -> Self {
        let mut input_alphabet = symbols(raw, "input_alphabet");
        let mut stack_alphabet = symbols(raw, "stack_alphabet");

        let mut states = raw::string_list(raw, "states").unwrap_or_default();
        if states.is_empty() {
            debug!("pda: no states, using placeholder q0");
            states.push("q0".to_string());
        }

        let start_state = raw::string(raw, "start_state").unwrap_or_else(|| states[0].clone());
        if !states.contains(&start_state) {
            debug!("pda: start state {} not declared, prepending", start_state);
            states.insert(0, start_state.clone());
        }

        let accept_states: Vec<String> = raw::name_list(raw, "accept_states")
            .unwrap_or_else(|| vec![start_state.clone()])
            .into_iter()
            .filter(|s| states.contains(s))
            .collect();
        if accept_states.is_empty() {
            warn!("pda: no declared accepting state, automaton accepts nothing");
        }

        let mut initial_stack_symbol = normalize_symbol(raw.get("initial_stack_symbol"));
        if is_epsilon(&initial_stack_symbol) {
            initial_stack_symbol = DEFAULT_STACK_SYMBOL.to_string();
        }
        add_missing(&mut stack_alphabet, &initial_stack_symbol, "stack symbol");

        let mut transitions = Vec::new();
        let raw_transitions = raw.get("transitions").and_then(Value::as_array);
        for (index, t) in raw_transitions.into_iter().flatten().enumerate() {
            let (Some(from), Some(to)) = (raw::string(t, "from"), raw::string(t, "to")) else {
                warn!("pda: dropping transition #{} without from/to: {}", index, t);
                continue;
            };
            let transition = Transition {
                from,
                to,
                read: normalize_symbol(t.get("read")),
                pop: normalize_symbol(t.get("pop")),
                push: normalize_push(t.get("push")),
            };

            add_missing(&mut states, &transition.from, "state");
            add_missing(&mut states, &transition.to, "state");
            if !transition.reads_epsilon() {
                add_missing(&mut input_alphabet, &transition.read, "input symbol");
            }
            if transition.pops() {
                add_missing(&mut stack_alphabet, &transition.pop, "stack symbol");
            }
            for symbol in &transition.push {
                add_missing(&mut stack_alphabet, symbol, "stack symbol");
            }
            transitions.push(transition);
        }

        let simulation_examples = raw
            .get("simulation_examples")
            .and_then(|v| SimulationExamples::deserialize(v).ok())
            .unwrap_or_default();

        Self {
            input_alphabet,
            stack_alphabet,
            states,
            start_state,
            accept_states,
            initial_stack_symbol,
            transitions,
            explanation: raw::text(raw, "explanation").unwrap_or_default(),
            logic: raw::text(raw, "logic").unwrap_or_default(),
            simulation_examples,
        }
    }

    pub fn input_alphabet(&self) -> &[String] {
        &self.input_alphabet
    }
    pub fn stack_alphabet(&self) -> &[String] {
        &self.stack_alphabet
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
    pub fn initial_stack_symbol(&self) -> &str {
        &self.initial_stack_symbol
    }
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
    pub fn explanation(&self) -> &str {
        &self.explanation
    }
    pub fn logic(&self) -> &str {
        &self.logic
    }
    pub fn simulation_examples(&self) -> &SimulationExamples {
        &self.simulation_examples
    }

    pub fn is_accepting(&self, state: &str) -> bool {
        self.accept_states.iter().any(|s| s == state)
    }
}

impl<'de> Deserialize<'de> for Pda {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Value::deserialize(deserializer)?;
        Ok(Pda::normalize(&raw))
    }
}

fn symbols(raw: &Value, key: &str) -> Vec<String> {
    raw::string_list(raw, key)
        .unwrap_or_default()
        .into_iter()
        .filter(|s| !EPSILON_SPELLINGS.contains(&s.as_str()))
        .collect()
}

fn add_missing(list: &mut Vec<String>, name: &str, what: &str) {
    if !list.iter().any(|s| s == name) {
        debug!("pda: adding undeclared {} {}", what, name);
        list.push(name.to_string());
    }
}
