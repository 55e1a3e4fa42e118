//! # automata-rs: Validating DFA and PDA synthesis
//!
//! **`automata-rs`** turns untrusted, possibly malformed automaton descriptions into
//! well-formed, runnable **deterministic finite automata (DFAs)** and **pushdown
//! automata (PDAs)**, simulates them with full traces, and scores them against
//! labeled examples.
//!
//! ## What does it do?
//!
//! An external oracle (typically a language model) proposes an automaton as a JSON
//! document. Such documents routinely have missing transitions, undeclared states,
//! creative spellings of epsilon, or no alphabet at all. This crate:
//!
//! - **Normalizes** any document into a total DFA or a well-formed PDA. Normalization never fails.
//! - **Simulates** words with step-by-step traces. PDA simulation is a bounded
//!   breadth-first search over configurations, so it terminates even on epsilon-loops.
//! - **Scores** an automaton against accepted/rejected example strings.
//! - **Decides** whether to accept, warn, repair once, or flag low confidence.
//!
//! ## Basic Usage
//!
//! ```rust
//! use automata_rs::automaton::{Automaton, AutomatonKind};
//! use automata_rs::simulator::SimulationLimits;
//! use serde_json::json;
//!
//! // 1. Normalize a raw document: a^n b^n, n >= 1
//! let raw = json!({
//!     "type": "PDA",
//!     "states": ["q0", "q1", "q2"],
//!     "start_state": "q0",
//!     "accept_states": ["q2"],
//!     "initial_stack_symbol": "Z",
//!     "transitions": [
//!         { "from": "q0", "to": "q0", "read": "a", "pop": "Z", "push": ["A", "Z"] },
//!         { "from": "q0", "to": "q0", "read": "a", "pop": "A", "push": ["A", "A"] },
//!         { "from": "q0", "to": "q1", "read": "b", "pop": "A", "push": [] },
//!         { "from": "q1", "to": "q1", "read": "b", "pop": "A", "push": [] },
//!         { "from": "q1", "to": "q2", "read": "ε", "pop": "Z", "push": ["Z"] }
//!     ]
//! });
//! let pda = Automaton::normalize(&raw, AutomatonKind::Pda);
//!
//! // 2. Simulate
//! let run = pda.simulate("aabb", &SimulationLimits::default());
//! assert!(run.accepted);
//! assert_eq!(run.final_state(), Some("q2"));
//!
//! assert!(!pda.simulate("aab", &SimulationLimits::default()).accepted);
//! ```
//!
//! ## Core Components
//!
//! - **[`dfa`]** and **[`pda`]**: normalization of raw documents.
//! - **[`simulator`]**: bounded nondeterministic PDA search with witness traces.
//! - **[`scorer`]** and **[`policy`]**: fidelity scoring and the repair-loop decision.
//! - **[`synthesis`]**: the full generate, score, repair, fallback pipeline.
//! - **[`dot`]** and **[`debug`]**: Graphviz and transition-table rendering.

pub mod automaton;
pub mod config;
pub mod debug;
pub mod dfa;
pub mod dot;
pub mod error;
pub mod pda;
pub mod policy;
pub mod queue;
pub mod raw;
pub mod scorer;
pub mod simulator;
pub mod symbol;
pub mod synthesis;
pub mod trace;
pub mod types;
