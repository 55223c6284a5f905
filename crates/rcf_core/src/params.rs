//! Algorithm parameters and their validated forms
//!
//! `*Params` structs are what callers and config files supply: every field is
//! optional and absent fields take the documented default. `validate` turns
//! them into immutable `*Config` values or fails with an
//! `InvalidArgument` naming the violated constraint. Signed integers are kept
//! on the params side so negative input is reported rather than wrapped.
//!
//! Batch RCF defaults:
//!
//! | field                     | default      |
//! |---------------------------|--------------|
//! | `number_of_trees`         | 30           |
//! | `sample_size`             | 256          |
//! | `output_after`            | 32           |
//! | `training_data_size`      | all rows     |
//! | `training_data_policy`    | `truncate`   |
//! | `anomaly_score_threshold` | 1.0          |
//! | `seed`                    | 42           |
//! | `parallel`                | false        |
//!
//! RCF summarize defaults:
//!
//! | field             | default |
//! |-------------------|---------|
//! | `max_k`           | 2       |
//! | `initial_k`       | 10      |
//! | `distance_type`   | `L2`    |
//! | `phase1_reassign` | true    |
//! | `parallel`        | false   |
//! | `seed`            | 42      |

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::deterministic::DEFAULT_SEED;
use crate::distance::DistanceType;
use crate::errors::{RcfError, Result};
use crate::forest::tree::{DEFAULT_MAX_DEPTH, DEFAULT_MIN_LEAF_SIZE};
use crate::forest::ForestConfig;

pub const DEFAULT_NUMBER_OF_TREES: usize = 30;
pub const DEFAULT_SAMPLE_SIZE: usize = 256;
pub const DEFAULT_OUTPUT_AFTER: usize = 32;
pub const DEFAULT_ANOMALY_SCORE_THRESHOLD: f64 = 1.0;

pub const DEFAULT_MAX_K: usize = 2;
pub const DEFAULT_INITIAL_K: usize = 10;

/// What training does when the batch size disagrees with `training_data_size`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrainingDataPolicy {
    /// Train on the first `min(training_data_size, rows)` rows
    #[default]
    Truncate,
    /// Fail unless the batch has exactly `training_data_size` rows
    Strict,
}

/// Caller-supplied batch RCF parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchRcfParams {
    pub number_of_trees: Option<i32>,
    pub sample_size: Option<i32>,
    pub output_after: Option<i32>,
    /// 0 or absent means every row
    pub training_data_size: Option<i32>,
    pub training_data_policy: Option<TrainingDataPolicy>,
    pub anomaly_score_threshold: Option<f64>,
    pub seed: Option<u64>,
    pub parallel: Option<bool>,
}

/// Validated batch RCF configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchRcfConfig {
    pub number_of_trees: usize,
    pub sample_size: usize,
    pub output_after: usize,
    pub training_data_size: Option<usize>,
    pub training_data_policy: TrainingDataPolicy,
    pub anomaly_score_threshold: f64,
    pub seed: u64,
    pub parallel: bool,
}

impl Default for BatchRcfConfig {
    fn default() -> Self {
        Self {
            number_of_trees: DEFAULT_NUMBER_OF_TREES,
            sample_size: DEFAULT_SAMPLE_SIZE,
            output_after: DEFAULT_OUTPUT_AFTER,
            training_data_size: None,
            training_data_policy: TrainingDataPolicy::Truncate,
            anomaly_score_threshold: DEFAULT_ANOMALY_SCORE_THRESHOLD,
            seed: DEFAULT_SEED,
            parallel: false,
        }
    }
}

impl BatchRcfConfig {
    pub fn forest_config(&self) -> ForestConfig {
        ForestConfig {
            number_of_trees: self.number_of_trees,
            sample_size: self.sample_size,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            parallel: self.parallel,
        }
    }
}

fn positive(value: Option<i32>, default: usize, msg: &str) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(v) if v > 0 => Ok(v as usize),
        Some(_) => Err(RcfError::invalid_argument(msg)),
    }
}

fn non_negative(value: Option<i32>, default: usize, msg: &str) -> Result<usize> {
    match value {
        None => Ok(default),
        Some(v) if v >= 0 => Ok(v as usize),
        Some(_) => Err(RcfError::invalid_argument(msg)),
    }
}

impl BatchRcfParams {
    pub fn validate(&self) -> Result<BatchRcfConfig> {
        let defaults = BatchRcfConfig::default();
        let number_of_trees = positive(
            self.number_of_trees,
            defaults.number_of_trees,
            "number of trees should be positive",
        )?;
        let sample_size = positive(
            self.sample_size,
            defaults.sample_size,
            "sample size should be positive",
        )?;
        let training_data_size = non_negative(
            self.training_data_size,
            0,
            "training data size should not be negative",
        )?;
        let output_after = non_negative(
            self.output_after,
            defaults.output_after,
            "output after should not be negative",
        )?;
        let anomaly_score_threshold = match self.anomaly_score_threshold {
            None => defaults.anomaly_score_threshold,
            Some(t) if t.is_finite() && t >= 0.0 => t,
            Some(_) => {
                return Err(RcfError::invalid_argument(
                    "anomaly score threshold should not be negative",
                ))
            }
        };

        Ok(BatchRcfConfig {
            number_of_trees,
            sample_size,
            output_after,
            training_data_size: (training_data_size > 0).then_some(training_data_size),
            training_data_policy: self.training_data_policy.unwrap_or_default(),
            anomaly_score_threshold,
            seed: self.seed.unwrap_or(DEFAULT_SEED),
            parallel: self.parallel.unwrap_or(false),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_toml(path)
    }
}

/// Caller-supplied RCF summarize parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RcfSummarizeParams {
    pub max_k: Option<i32>,
    pub initial_k: Option<i32>,
    pub distance_type: Option<DistanceType>,
    pub phase1_reassign: Option<bool>,
    pub parallel: Option<bool>,
    pub seed: Option<u64>,
}

/// Validated RCF summarize configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RcfSummarizeConfig {
    pub max_k: usize,
    pub initial_k: usize,
    pub distance_type: DistanceType,
    pub phase1_reassign: bool,
    pub parallel: bool,
    pub seed: u64,
}

impl Default for RcfSummarizeConfig {
    fn default() -> Self {
        Self {
            max_k: DEFAULT_MAX_K,
            initial_k: DEFAULT_INITIAL_K,
            distance_type: DistanceType::L2,
            phase1_reassign: true,
            parallel: false,
            seed: DEFAULT_SEED,
        }
    }
}

impl RcfSummarizeParams {
    pub fn validate(&self) -> Result<RcfSummarizeConfig> {
        let defaults = RcfSummarizeConfig::default();
        let max_k = positive(self.max_k, defaults.max_k, "max K should be positive")?;
        let initial_k = positive(
            self.initial_k,
            defaults.initial_k,
            "initial K should be positive",
        )?;

        Ok(RcfSummarizeConfig {
            max_k,
            initial_k,
            distance_type: self.distance_type.unwrap_or(defaults.distance_type),
            phase1_reassign: self.phase1_reassign.unwrap_or(defaults.phase1_reassign),
            parallel: self.parallel.unwrap_or(defaults.parallel),
            seed: self.seed.unwrap_or(defaults.seed),
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        load_toml(path)
    }
}

fn load_toml<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(path.as_ref())?;
    Ok(toml::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_defaults() {
        let config = BatchRcfParams::default().validate().unwrap();
        assert_eq!(config, BatchRcfConfig::default());
        assert_eq!(config.number_of_trees, 30);
        assert_eq!(config.sample_size, 256);
        assert_eq!(config.output_after, 32);
        assert_eq!(config.training_data_size, None);
        assert_eq!(config.anomaly_score_threshold, 1.0);
    }

    #[test]
    fn test_batch_rejections() {
        let cases = [
            (
                BatchRcfParams {
                    number_of_trees: Some(0),
                    ..Default::default()
                },
                "number of trees should be positive",
            ),
            (
                BatchRcfParams {
                    sample_size: Some(-3),
                    ..Default::default()
                },
                "sample size should be positive",
            ),
            (
                BatchRcfParams {
                    training_data_size: Some(-1),
                    ..Default::default()
                },
                "training data size should not be negative",
            ),
            (
                BatchRcfParams {
                    output_after: Some(-1),
                    ..Default::default()
                },
                "output after should not be negative",
            ),
            (
                BatchRcfParams {
                    anomaly_score_threshold: Some(-0.5),
                    ..Default::default()
                },
                "anomaly score threshold should not be negative",
            ),
            (
                BatchRcfParams {
                    anomaly_score_threshold: Some(f64::NAN),
                    ..Default::default()
                },
                "anomaly score threshold should not be negative",
            ),
        ];
        for (params, msg) in cases {
            let err = params.validate().unwrap_err();
            assert!(matches!(err, RcfError::InvalidArgument(_)));
            assert_eq!(err.to_string(), msg);
        }
    }

    #[test]
    fn test_zero_training_data_size_means_all_rows() {
        let params = BatchRcfParams {
            training_data_size: Some(0),
            ..Default::default()
        };
        assert_eq!(params.validate().unwrap().training_data_size, None);
    }

    #[test]
    fn test_summarize_defaults_and_rejections() {
        let config = RcfSummarizeParams::default().validate().unwrap();
        assert_eq!(config, RcfSummarizeConfig::default());

        let err = RcfSummarizeParams {
            max_k: Some(-1),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "max K should be positive");

        let err = RcfSummarizeParams {
            initial_k: Some(-1),
            ..Default::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "initial K should be positive");
    }

    #[test]
    fn test_params_from_toml() {
        let params = BatchRcfParams::from_toml_str(
            r#"
            number_of_trees = 10
            sample_size = 100
            training_data_policy = "strict"
            anomaly_score_threshold = 0.01
            "#,
        )
        .unwrap();
        let config = params.validate().unwrap();
        assert_eq!(config.number_of_trees, 10);
        assert_eq!(config.training_data_policy, TrainingDataPolicy::Strict);
        assert_eq!(config.output_after, DEFAULT_OUTPUT_AFTER);

        let params = RcfSummarizeParams::from_toml_str("distance_type = \"L1\"\nmax_k = 3").unwrap();
        let config = params.validate().unwrap();
        assert_eq!(config.distance_type, DistanceType::L1);
        assert_eq!(config.max_k, 3);

        assert!(matches!(
            BatchRcfParams::from_toml_str("bogus = 1").unwrap_err(),
            RcfError::Config(_)
        ));
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "initial_k = 20").unwrap();
        file.flush().unwrap();

        let params = RcfSummarizeParams::load_from_file(file.path()).unwrap();
        assert_eq!(params.initial_k, Some(20));
    }
}
