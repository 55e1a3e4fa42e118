//! The tagged automaton document and its single-string entry point.
//!
//! DFAs and PDAs are unrelated variants of [`Automaton`], discriminated by
//! the `type` field of the document (`"DFA"`, `"PDA"` or `"none"`). The
//! `"none"` variant is an explicit verdict that no finite or pushdown
//! automaton applies; it only carries an explanation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::dfa::Dfa;
use crate::error::Error;
use crate::pda::Pda;
use crate::raw;
use crate::scorer::Recognizer;
use crate::simulator::{simulate, SimulationLimits, Simulator};
use crate::trace::Run;

const INAPPLICABLE: &str = "No finite or pushdown automaton recognizes this language.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AutomatonKind {
    #[serde(rename = "DFA")]
    Dfa,
    #[serde(rename = "PDA")]
    Pda,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Automaton {
    #[serde(rename = "DFA")]
    Dfa(Dfa),
    #[serde(rename = "PDA")]
    Pda(Pda),
    #[serde(rename = "none")]
    Inapplicable { explanation: String },
}

impl Automaton {
    /// Normalizes a raw document.
    ///
    /// A missing (or non-textual) `type` means `expected`. `"none"` and any
    /// unknown type yield [`Automaton::Inapplicable`].
    pub fn normalize(raw: &Value, expected: AutomatonKind) -> Self {
        let declared = raw.get("type").and_then(Value::as_str).map(|t| t.trim().to_ascii_uppercase());
        let kind = match declared.as_deref() {
            None => Some(expected),
            Some("DFA") => Some(AutomatonKind::Dfa),
            Some("PDA") | Some("NPDA") => Some(AutomatonKind::Pda),
            Some(_) => None,
        };
        match kind {
            Some(AutomatonKind::Dfa) => Automaton::Dfa(Dfa::normalize(raw)),
            Some(AutomatonKind::Pda) => Automaton::Pda(Pda::normalize(raw)),
            None => Automaton::Inapplicable {
                explanation: raw::text(raw, "explanation")
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or_else(|| INAPPLICABLE.to_string()),
            },
        }
    }

    /// Parses and normalizes a JSON document.
    pub fn from_json_str(s: &str, expected: AutomatonKind) -> Result<Self, Error> {
        let raw: Value = serde_json::from_str(s)?;
        Ok(Self::normalize(&raw, expected))
    }

    pub fn kind(&self) -> Option<AutomatonKind> {
        match self {
            Automaton::Dfa(_) => Some(AutomatonKind::Dfa),
            Automaton::Pda(_) => Some(AutomatonKind::Pda),
            Automaton::Inapplicable { .. } => None,
        }
    }

    pub fn explanation(&self) -> &str {
        match self {
            Automaton::Dfa(dfa) => dfa.explanation(),
            Automaton::Pda(pda) => pda.explanation(),
            Automaton::Inapplicable { explanation } => explanation,
        }
    }

    /// Runs the automaton on a single word and returns its verdict and trace.
    ///
    /// `limits` only matter for pushdown automata. An inapplicable automaton
    /// rejects everything with an empty trace.
    pub fn simulate(&self, word: &str, limits: &SimulationLimits) -> Run {
        match self {
            Automaton::Dfa(dfa) => dfa.trace(word),
            Automaton::Pda(pda) => simulate(pda, word, limits),
            Automaton::Inapplicable { .. } => Run::rejected(),
        }
    }

    /// Prepares the automaton for deciding many words.
    pub fn recognizer(&self, limits: SimulationLimits) -> AutomatonRecognizer<'_> {
        match self {
            Automaton::Dfa(dfa) => AutomatonRecognizer::Dfa(dfa),
            Automaton::Pda(pda) => AutomatonRecognizer::Pda(Box::new(Simulator::new(pda, limits))),
            Automaton::Inapplicable { .. } => AutomatonRecognizer::Empty,
        }
    }
}

impl From<Dfa> for Automaton {
    fn from(dfa: Dfa) -> Self {
        Automaton::Dfa(dfa)
    }
}

impl From<Pda> for Automaton {
    fn from(pda: Pda) -> Self {
        Automaton::Pda(pda)
    }
}

/// A borrowed, ready-to-run view of an [`Automaton`].
pub enum AutomatonRecognizer<'a> {
    Dfa(&'a Dfa),
    Pda(Box<Simulator>),
    /// Recognizes the empty language.
    Empty,
}

impl Recognizer for AutomatonRecognizer<'_> {
    fn accepts(&self, word: &str) -> bool {
        match self {
            AutomatonRecognizer::Dfa(dfa) => dfa.run(word),
            AutomatonRecognizer::Pda(simulator) => simulator.accepts(word),
            AutomatonRecognizer::Empty => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_log::test;

    use super::*;

    #[test]
    fn test_type_dispatch() {
        let raw = json!({ "states": ["q0"] });
        assert_eq!(Automaton::normalize(&raw, AutomatonKind::Dfa).kind(), Some(AutomatonKind::Dfa));
        assert_eq!(Automaton::normalize(&raw, AutomatonKind::Pda).kind(), Some(AutomatonKind::Pda));

        let raw = json!({ "type": "pda" });
        assert_eq!(Automaton::normalize(&raw, AutomatonKind::Dfa).kind(), Some(AutomatonKind::Pda));

        let raw = json!({ "type": 7 });
        assert_eq!(Automaton::normalize(&raw, AutomatonKind::Dfa).kind(), Some(AutomatonKind::Dfa));
    }

    #[test]
    fn test_none_carries_explanation() {
        let raw = json!({ "type": "none", "explanation": "needs counting" });
        let automaton = Automaton::normalize(&raw, AutomatonKind::Dfa);
        assert_eq!(automaton.kind(), None);
        assert_eq!(automaton.explanation(), "needs counting");
        assert!(!automaton.simulate("", &SimulationLimits::default()).accepted);

        let automaton = Automaton::normalize(&json!({ "type": "Turing" }), AutomatonKind::Pda);
        assert_eq!(automaton.explanation(), INAPPLICABLE);
    }

    #[test]
    fn test_serialization_is_tagged() {
        let json = serde_json::to_value(Automaton::from(Dfa::even_length())).unwrap();
        assert_eq!(json["type"], "DFA");
        assert_eq!(json["start_state"], "q_even");
        assert_eq!(json["transitions"]["q_odd"]["1"], "q_even");

        let inapplicable = Automaton::Inapplicable {
            explanation: "x".to_string(),
        };
        let json = serde_json::to_value(&inapplicable).unwrap();
        assert_eq!(json, json!({ "type": "none", "explanation": "x" }));
    }

    #[test]
    fn test_normalized_output_normalizes_to_itself() {
        let automaton = Automaton::from(Dfa::even_length());
        let json = serde_json::to_string(&automaton).unwrap();
        let again = Automaton::from_json_str(&json, AutomatonKind::Pda).unwrap();
        assert_eq!(again, automaton);

        let with_sink = Automaton::normalize(&json!({ "type": "DFA", "alphabet": ["a"], "states": ["q0"] }), AutomatonKind::Dfa);
        let json = serde_json::to_string(&with_sink).unwrap();
        let again = Automaton::from_json_str(&json, AutomatonKind::Dfa).unwrap();
        assert_eq!(again, with_sink);
    }

    #[test]
    fn test_from_json_str_rejects_garbage() {
        assert!(matches!(Automaton::from_json_str("{", AutomatonKind::Dfa), Err(Error::Json(_))));
    }

    #[test]
    fn test_recognizer() {
        let automaton = Automaton::from(Dfa::even_length());
        let recognizer = automaton.recognizer(SimulationLimits::default());
        assert!(recognizer.accepts("10"));
        assert!(!recognizer.accepts("1"));
    }
}
