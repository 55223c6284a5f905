//! Trainer configuration file
//!
//! ```toml
//! [batch_rcf]
//! number_of_trees = 50
//! anomaly_score_threshold = 2.5
//!
//! [rcf_summarize]
//! max_k = 4
//! distance_type = "L1"
//! ```

use rcf_core::{BatchRcfParams, RcfSummarizeParams};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::TrainerError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainerConfig {
    pub batch_rcf: BatchRcfParams,
    pub rcf_summarize: RcfSummarizeParams,
}

impl TrainerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self, TrainerError> {
        toml::from_str(content).map_err(|e| TrainerError::Config(e.to_string()))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, TrainerError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcf_core::DistanceType;

    #[test]
    fn test_parses_both_tables() {
        let config = TrainerConfig::from_toml_str(
            r#"
            [batch_rcf]
            number_of_trees = 50
            training_data_policy = "strict"

            [rcf_summarize]
            max_k = 4
            distance_type = "L1"
            "#,
        )
        .unwrap();
        assert_eq!(config.batch_rcf.number_of_trees, Some(50));
        assert_eq!(config.rcf_summarize.max_k, Some(4));
        assert_eq!(config.rcf_summarize.distance_type, Some(DistanceType::L1));
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        assert_eq!(TrainerConfig::from_toml_str("").unwrap(), TrainerConfig::default());
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let err = TrainerConfig::from_toml_str("[batch_rcf]\ntrees = 3\n").unwrap_err();
        assert!(matches!(err, TrainerError::Config(_)));
    }
}
