//! Assessment engine configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::application::handlers::assessment::MAX_HISTORY_LIMIT;
use crate::domain::scoring::{BrainProfileScoring, ResponseValidator};

/// Assessment engine configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentConfig {
    /// How brain profile sets are read (`independent_ratings` or `forced_rank`)
    #[serde(default)]
    pub brain_profile_scoring: BrainProfileScoring,

    /// Default number of history entries per request
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,
}

impl AssessmentConfig {
    /// Build the response validator for the configured scoring mode.
    pub fn validator(&self) -> ResponseValidator {
        ResponseValidator::new(self.brain_profile_scoring)
    }

    /// Validate assessment configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.history_limit == 0 || self.history_limit > MAX_HISTORY_LIMIT {
            return Err(ValidationError::InvalidHistoryLimit(MAX_HISTORY_LIMIT));
        }
        Ok(())
    }
}

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            brain_profile_scoring: BrainProfileScoring::default(),
            history_limit: default_history_limit(),
        }
    }
}

fn default_history_limit() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assessment_config_defaults() {
        let config = AssessmentConfig::default();
        assert_eq!(config.brain_profile_scoring, BrainProfileScoring::IndependentRatings);
        assert_eq!(config.history_limit, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_history_limit_bounds() {
        for limit in [0, MAX_HISTORY_LIMIT + 1] {
            let config = AssessmentConfig {
                history_limit: limit,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "limit {}", limit);
        }
    }

    #[test]
    fn test_validator_uses_configured_mode() {
        let config = AssessmentConfig {
            brain_profile_scoring: BrainProfileScoring::ForcedRank,
            ..Default::default()
        };
        assert_eq!(config.validator().brain_scoring(), BrainProfileScoring::ForcedRank);
    }
}
