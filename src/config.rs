//! Tunable parameters of the engine.
//!
//! Every field has a default, so a configuration document only needs to name
//! what it changes:
//!
//! ```
//! use automata_rs::config::Config;
//! use automata_rs::scorer::Penalty;
//!
//! let config = Config::from_json_str(r#"{
//!     "thresholds": { "repair": 0 },
//!     "scoring": { "penalty": "proportional" }
//! }"#).unwrap();
//!
//! assert_eq!(config.thresholds.strict, 95);
//! assert_eq!(config.thresholds.repair, 0);
//! assert_eq!(config.scoring.penalty, Penalty::Proportional);
//! assert_eq!(config.limits.max_steps, 2000);
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::policy::Thresholds;
use crate::scorer::ScoringConfig;
use crate::simulator::SimulationLimits;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub limits: SimulationLimits,
    pub thresholds: Thresholds,
    pub scoring: ScoringConfig,
}

impl Config {
    /// Parses and validates a JSON configuration document.
    pub fn from_json_str(s: &str) -> Result<Self, Error> {
        let config: Config = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.thresholds.validate()?;
        if self.limits.max_steps == 0 {
            return Err(Error::InvalidLimits("max_steps must be positive"));
        }
        if self.limits.max_configs == 0 {
            return Err(Error::InvalidLimits("max_configs must be positive"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scorer::Penalty;

    #[test]
    fn test_defaults() {
        let config = Config::from_json_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.limits.max_steps, 2000);
        assert_eq!(config.limits.max_configs, 3000);
        assert_eq!(config.thresholds, Thresholds::default());
        assert_eq!(config.scoring.penalty, Penalty::Fixed(15));
    }

    #[test]
    fn test_partial_override() {
        let config = Config::from_json_str(r#"{ "limits": { "max_configs": 10 }, "scoring": { "penalty": { "fixed": 20 } } }"#)
            .unwrap();
        assert_eq!(config.limits.max_steps, 2000);
        assert_eq!(config.limits.max_configs, 10);
        assert_eq!(config.scoring.penalty, Penalty::Fixed(20));
    }

    #[test]
    fn test_invalid_documents() {
        assert!(matches!(Config::from_json_str("[1, 2]"), Err(Error::Json(_))));
        assert!(matches!(
            Config::from_json_str(r#"{ "thresholds": { "strict": 50 } }"#),
            Err(Error::InvalidThresholds { .. })
        ));
        assert!(matches!(
            Config::from_json_str(r#"{ "limits": { "max_steps": 0 } }"#),
            Err(Error::InvalidLimits(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(Config::from_path("/nonexistent/config.json"), Err(Error::Io(_))));
    }
}
