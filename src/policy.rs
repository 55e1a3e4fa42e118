//! Tiered decision on what to do with a scored automaton.
//!
//! The policy never rejects: every score maps to exactly one [`Disposition`],
//! and each disposition still hands back a runnable automaton.
//!
//! ```text
//!   0 ........ display ........ repair ........ strict ........ 100
//!   | LowConfidence | AcceptWithWarnings | Repair  |    Accept     |
//! ```
//!
//! Valid thresholds satisfy `strict > repair > display`, so every band is
//! non-empty. The one exception is `repair = 0`, which attempts a repair for
//! every imperfect automaton; `display` then only grades the repaired result.

use serde::{Deserialize, Serialize};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Minimum score accepted as high-confidence.
    pub strict: u8,
    /// Minimum score for which one repair is attempted.
    pub repair: u8,
    /// Minimum score shown without a low-confidence caveat.
    pub display: u8,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            strict: 95,
            repair: 85,
            display: 70,
        }
    }
}

impl Thresholds {
    /// Checks `strict > repair > display` with `strict <= 100`.
    ///
    /// `repair = 0` is also accepted and means "repair everything below
    /// `strict`"; `display` then only grades the repaired result.
    pub fn validate(&self) -> Result<(), Error> {
        let Thresholds { strict, repair, display } = *self;
        let ordered = strict > repair && (repair > display || repair == 0) && strict > display;
        if strict > 100 || !ordered {
            return Err(Error::InvalidThresholds { strict, repair, display });
        }
        Ok(())
    }

    pub fn meets_strict(&self, score: u8) -> bool {
        score >= self.strict
    }

    pub fn meets_display(&self, score: u8) -> bool {
        score >= self.display
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disposition {
    /// Good enough as is.
    Accept,
    /// Shown, with the mismatches attached as warnings.
    AcceptWithWarnings,
    /// Worth exactly one repair attempt and a re-score.
    Repair,
    /// Shown with an explicit low-confidence caveat.
    LowConfidence,
}

/// Maps a fidelity score to a disposition.
pub fn decide(score: u8, thresholds: &Thresholds) -> Disposition {
    if score >= thresholds.strict {
        Disposition::Accept
    } else if score >= thresholds.repair {
        Disposition::Repair
    } else if score >= thresholds.display {
        Disposition::AcceptWithWarnings
    } else {
        Disposition::LowConfidence
    }
}
