//! Example-based fidelity scoring.
//!
//! An automaton is run against words labeled "accept" and "reject". Every
//! disagreement is recorded as a [`Mismatch`] and costs points. Scoring
//! against an empty example set is worthless, not vacuously perfect: it
//! yields an invalid report with score 0.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::dfa::Dfa;
use crate::simulator::Simulator;

/// Anything that can decide membership of a word.
pub trait Recognizer {
    fn accepts(&self, word: &str) -> bool;
}

impl Recognizer for Dfa {
    fn accepts(&self, word: &str) -> bool {
        self.run(word)
    }
}

impl Recognizer for Simulator {
    fn accepts(&self, word: &str) -> bool {
        Simulator::accepts(self, word)
    }
}

impl<F: Fn(&str) -> bool> Recognizer for F {
    fn accepts(&self, word: &str) -> bool {
        self(word)
    }
}

/// Labeled example words for one language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSet {
    #[serde(default, alias = "accepted")]
    pub accepted_examples: Vec<String>,
    #[serde(default, alias = "rejected")]
    pub rejected_examples: Vec<String>,
}

impl ExampleSet {
    pub fn new<S: Into<String>>(accepted: impl IntoIterator<Item = S>, rejected: impl IntoIterator<Item = S>) -> Self {
        Self {
            accepted_examples: accepted.into_iter().map(Into::into).collect(),
            rejected_examples: rejected.into_iter().map(Into::into).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.accepted_examples.len() + self.rejected_examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Accept,
    Reject,
}

impl From<bool> for Verdict {
    fn from(accepted: bool) -> Self {
        if accepted {
            Verdict::Accept
        } else {
            Verdict::Reject
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    /// A word that should be accepted was rejected.
    FalseReject,
    /// A word that should be rejected was accepted.
    FalseAccept,
    /// There was nothing to score against.
    NoExamples,
}

/// One entry of a validation report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub kind: MismatchKind,
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected: Option<Verdict>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual: Option<Verdict>,
}

impl Mismatch {
    fn new(kind: MismatchKind, word: &str, expected: Verdict) -> Self {
        let actual = match expected {
            Verdict::Accept => Verdict::Reject,
            Verdict::Reject => Verdict::Accept,
        };
        Self {
            kind,
            word: word.to_string(),
            expected: Some(expected),
            actual: Some(actual),
        }
    }

    fn no_examples() -> Self {
        Self {
            kind: MismatchKind::NoExamples,
            word: String::new(),
            expected: None,
            actual: None,
        }
    }
}

/// How mismatches are turned into lost points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Penalty {
    /// A flat number of points per mismatch, whatever the corpus size.
    Fixed(u32),
    /// Points proportional to the share of mismatching examples.
    Proportional,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub penalty: Penalty,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            penalty: Penalty::Fixed(15),
        }
    }
}

/// The result of scoring one automaton.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` iff there are no mismatches at all.
    pub valid: bool,
    pub errors: Vec<Mismatch>,
    /// 0..=100
    pub score: u8,
}

impl ValidationReport {
    fn empty() -> Self {
        Self {
            valid: false,
            errors: vec![Mismatch::no_examples()],
            score: 0,
        }
    }
}

/// Scores `recognizer` against labeled examples.
pub fn score<R, S>(recognizer: &R, accepted: &[S], rejected: &[S], config: &ScoringConfig) -> ValidationReport
where
    R: Recognizer + ?Sized,
    S: AsRef<str>,
{
    let total = accepted.len() + rejected.len();
    if total == 0 {
        info!("score: no examples, report is worthless");
        return ValidationReport::empty();
    }

    let mut errors = Vec::new();
    for word in accepted.iter().map(AsRef::as_ref) {
        if !recognizer.accepts(word) {
            debug!("score: false reject {:?}", word);
            errors.push(Mismatch::new(MismatchKind::FalseReject, word, Verdict::Accept));
        }
    }
    for word in rejected.iter().map(AsRef::as_ref) {
        if recognizer.accepts(word) {
            debug!("score: false accept {:?}", word);
            errors.push(Mismatch::new(MismatchKind::FalseAccept, word, Verdict::Reject));
        }
    }

    let lost = match config.penalty {
        Penalty::Fixed(points) => (errors.len() as u64).saturating_mul(points as u64),
        Penalty::Proportional => (100 * errors.len() as u64).div_ceil(total as u64),
    };
    let score = 100u64.saturating_sub(lost) as u8;

    info!("score: {} ({} mismatches out of {} examples)", score, errors.len(), total);
    ValidationReport {
        valid: errors.is_empty(),
        errors,
        score,
    }
}

/// Scores `recognizer` against an [`ExampleSet`].
pub fn score_examples<R: Recognizer + ?Sized>(
    recognizer: &R,
    examples: &ExampleSet,
    config: &ScoringConfig,
) -> ValidationReport {
    score(recognizer, &examples.accepted_examples, &examples.rejected_examples, config)
}
