use thiserror::Error;

/// Errors from the fallible edges of the crate: configuration and decoding.
///
/// The automaton operations themselves never fail.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid thresholds: strict={strict}, repair={repair}, display={display} (need strict <= 100 and strict > repair > display, or repair = 0)")]
    InvalidThresholds { strict: u8, repair: u8, display: u8 },

    #[error("invalid simulation limits: {0}")]
    InvalidLimits(&'static str),
}
