//! Step-by-step records of a single run.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One step of a run.
///
/// Step 0 is the initial configuration and consumes nothing. Epsilon-moves
/// record [`EPSILON_DISPLAY`][crate::symbol::EPSILON_DISPLAY] as the consumed
/// symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub step: usize,
    pub state: String,
    pub consumed: String,
    pub remaining_input: String,
    /// Stack snapshot, bottom first. Always `None` for finite automata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<Vec<String>>,
}

impl fmt::Display for TraceStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let consumed = if self.consumed.is_empty() { "-" } else { &self.consumed };
        let remaining = if self.remaining_input.is_empty() { "-" } else { &self.remaining_input };
        write!(f, "{:>3}  {:<10} {:<3} {:<12}", self.step, self.state, consumed, remaining)?;
        if let Some(stack) = &self.stack {
            write!(f, " [{}]", stack.join(" "))?;
        }
        Ok(())
    }
}

/// Verdict and witness trace of a single-string simulation.
///
/// On acceptance the trace ends in an accepting configuration. On rejection
/// it is a best-effort diagnostic, not a proof of rejection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub accepted: bool,
    pub trace: Vec<TraceStep>,
}

impl Run {
    pub fn rejected() -> Self {
        Self::default()
    }

    /// The state the run ended in, if any step was recorded.
    pub fn final_state(&self) -> Option<&str> {
        self.trace.last().map(|s| s.state.as_str())
    }
}

impl fmt::Display for Run {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", if self.accepted { "ACCEPTED" } else { "REJECTED" })?;
        for step in &self.trace {
            writeln!(f, "{}", step)?;
        }
        Ok(())
    }
}
