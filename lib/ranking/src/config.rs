use carfit_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Request-count defaults and limits for the entry points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub default_top_k: usize,
    pub max_top_k: usize,
    pub default_exact_match_count: usize,
    pub default_compatible_count: usize,
    /// Passed to the selector, which ignores it
    pub diversity_factor: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_top_k: 6,
            max_top_k: 50,
            default_exact_match_count: 6,
            default_compatible_count: 6,
            diversity_factor: 0.3,
        }
    }
}

impl EngineConfig {
    /// Whether a requested count lies in `1..=max_top_k`
    pub fn count_in_range(&self, count: usize) -> bool {
        (1..=self.max_top_k).contains(&count)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_top_k == 0 {
            return Err(Error::InvalidConfig("max_top_k must be at least 1".to_string()));
        }
        for (name, value) in [
            ("default_top_k", self.default_top_k),
            ("default_exact_match_count", self.default_exact_match_count),
            ("default_compatible_count", self.default_compatible_count),
        ] {
            if !self.count_in_range(value) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be between 1 and {}, got {}",
                    name, self.max_top_k, value
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.count_in_range(1));
        assert!(config.count_in_range(50));
        assert!(!config.count_in_range(0));
        assert!(!config.count_in_range(51));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: EngineConfig = serde_json::from_str(r#"{"max_top_k": 20}"#).unwrap();
        assert_eq!(config.max_top_k, 20);
        assert_eq!(config.default_top_k, 6);
    }

    #[test]
    fn test_default_above_max_is_rejected() {
        let config = EngineConfig {
            max_top_k: 4,
            ..EngineConfig::default()
        };
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));
    }
}
