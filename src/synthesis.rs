//! Generate, score, repair once, degrade: the synthesis pipeline.
//!
//! The automaton itself comes from an external [`Oracle`] that is treated as
//! untrusted and fallible. Whatever it returns is normalized, scored against
//! an [`ExampleSet`] and routed through the repair-loop [`policy`][crate::policy].
//!
//! [`synthesize`] always answers with something displayable: a runnable
//! automaton, or an explicit "not applicable" verdict from the oracle. How
//! much to trust the answer is carried by [`Annotated::source`],
//! [`Annotated::status`], [`Annotated::accuracy`] and
//! [`Annotated::warnings`], never by an error. The only unrecoverable case,
//! an oracle that cannot produce anything, is answered with the fixed
//! even-length DFA.

use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::automaton::{Automaton, AutomatonKind};
use crate::config::Config;
use crate::dfa::Dfa;
use crate::policy::{decide, Disposition, Thresholds};
use crate::scorer::{score_examples, ExampleSet, Mismatch, ValidationReport};

/// The external service that proposes and repairs automata.
pub trait Oracle {
    type Error: std::error::Error;

    /// Proposes a raw automaton document for the described language.
    fn generate(&self, description: &str, kind: AutomatonKind) -> Result<Value, Self::Error>;

    /// Proposes a corrected document, given the mismatches of the current one.
    fn repair(&self, description: &str, automaton: &Automaton, errors: &[Mismatch]) -> Result<Value, Self::Error>;
}

/// Where the returned automaton comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    /// The oracle's first proposal.
    Model,
    /// The oracle's proposal after one repair round.
    Repaired,
    /// The fixed even-length DFA.
    Fallback,
    /// The oracle's first proposal, kept although it scored poorly.
    LowConfidence,
}

/// How much the returned automaton can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    HighConfidence,
    Approximate,
    LowConfidence,
    Fallback,
    /// The oracle answered that no DFA/PDA applies.
    NotApplicable,
}

impl Status {
    fn for_score(score: u8, thresholds: &Thresholds) -> Self {
        if thresholds.meets_strict(score) {
            Status::HighConfidence
        } else if thresholds.meets_display(score) {
            Status::Approximate
        } else {
            Status::LowConfidence
        }
    }
}

/// An automaton together with everything the presentation layer needs.
///
/// Serializes flat: the automaton's own fields followed by the annotations.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotated {
    #[serde(flatten)]
    pub automaton: Automaton,
    pub source: Source,
    pub status: Status,
    /// Fidelity score, 0..=100.
    pub accuracy: u8,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Mismatch>,
}

impl Annotated {
    pub fn fallback() -> Self {
        Self {
            automaton: Automaton::Dfa(Dfa::even_length()),
            source: Source::Fallback,
            status: Status::Fallback,
            accuracy: 0,
            warnings: Vec::new(),
        }
    }

    fn scored(automaton: Automaton, source: Source, status: Status, report: ValidationReport) -> Self {
        Self {
            automaton,
            source,
            status,
            accuracy: report.score,
            warnings: report.errors,
        }
    }
}

/// Scores an automaton against examples with the configured budgets and penalty.
pub fn evaluate(automaton: &Automaton, examples: &ExampleSet, config: &Config) -> ValidationReport {
    score_examples(&automaton.recognizer(config.limits), examples, &config.scoring)
}

/// Runs the whole pipeline for one request.
pub fn synthesize<O: Oracle + ?Sized>(
    oracle: &O,
    description: &str,
    kind: AutomatonKind,
    examples: &ExampleSet,
    config: &Config,
) -> Annotated {
    let raw = match oracle.generate(description, kind) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("synthesis: oracle generation failed, using fallback: {}", e);
            return Annotated::fallback();
        }
    };

    let automaton = Automaton::normalize(&raw, kind);
    if automaton.kind().is_none() {
        info!("synthesis: oracle reports no applicable automaton");
        return Annotated {
            automaton,
            source: Source::Model,
            status: Status::NotApplicable,
            accuracy: 0,
            warnings: Vec::new(),
        };
    }

    let thresholds = &config.thresholds;
    let report = evaluate(&automaton, examples, config);
    let disposition = decide(report.score, thresholds);
    info!("synthesis: model scored {}, disposition {:?}", report.score, disposition);

    let result = match disposition {
        Disposition::Accept => Annotated::scored(automaton, Source::Model, Status::HighConfidence, report),
        Disposition::AcceptWithWarnings => Annotated::scored(automaton, Source::Model, Status::Approximate, report),
        Disposition::LowConfidence => {
            Annotated::scored(automaton, Source::LowConfidence, Status::LowConfidence, report)
        }
        Disposition::Repair => match attempt_repair(oracle, description, kind, &automaton, &report, examples, config) {
            Some(repaired) => repaired,
            None => Annotated::scored(automaton, Source::LowConfidence, Status::LowConfidence, report),
        },
    };

    info!(
        "synthesis: returning {:?} automaton, status {:?}, accuracy {}",
        result.source, result.status, result.accuracy
    );
    result
}

/// One repair round. Returns the repaired automaton only if it now meets the
/// display threshold.
fn attempt_repair<O: Oracle + ?Sized>(
    oracle: &O,
    description: &str,
    kind: AutomatonKind,
    automaton: &Automaton,
    report: &ValidationReport,
    examples: &ExampleSet,
    config: &Config,
) -> Option<Annotated> {
    let raw = oracle
        .repair(description, automaton, &report.errors)
        .map_err(|e| warn!("synthesis: oracle repair failed, keeping original: {}", e))
        .ok()?;

    let repaired = Automaton::normalize(&raw, kind);
    if repaired.kind().is_none() {
        warn!("synthesis: repair returned no automaton, keeping original");
        return None;
    }

    let rescore = evaluate(&repaired, examples, config);
    info!("synthesis: repaired automaton scored {} (was {})", rescore.score, report.score);
    if !config.thresholds.meets_display(rescore.score) {
        return None;
    }

    let status = Status::for_score(rescore.score, &config.thresholds);
    Some(Annotated::scored(repaired, Source::Repaired, status, rescore))
}
