//! RCF summarize clusterer
//!
//! Training reduces a batch to a `SampleSummary`; prediction labels each row
//! with the nearest summary point under the configured distance.

use tracing::{debug, info};

use crate::algorithm::{Predictable, TrainAndPredictable, Trainable};
use crate::artifact::ModelArtifact;
use crate::dataframe::{ColumnMeta, ColumnType, ColumnValue, DataFrame, Point};
use crate::errors::{RcfError, Result};
use crate::params::{RcfSummarizeConfig, RcfSummarizeParams};
use crate::summary::summarize;

pub const NO_MODEL_MESSAGE: &str = "No model found for RCFSummarize prediction.";

pub const CLUSTER_ID_COLUMN: &str = "ClusterID";

#[derive(Debug, Clone)]
pub struct RcfSummarize {
    config: RcfSummarizeConfig,
}

impl RcfSummarize {
    /// Validate `params`; `None` uses every default
    pub fn new(params: Option<&RcfSummarizeParams>) -> Result<Self> {
        let config = match params {
            Some(params) => params.validate()?,
            None => RcfSummarizeConfig::default(),
        };
        Ok(Self { config })
    }

    pub fn config(&self) -> &RcfSummarizeConfig {
        &self.config
    }

    pub fn train_points(&self, points: &[Point]) -> Result<ModelArtifact> {
        info!(
            rows = points.len(),
            max_k = self.config.max_k,
            initial_k = self.config.initial_k,
            distance = %self.config.distance_type,
            "training RCF summarize"
        );
        let summary = summarize(points, &self.config)?;
        debug!(clusters = summary.len(), "summary built");
        Ok(ModelArtifact::summary(summary))
    }

    /// Label each point with its nearest summary point
    pub fn label_points(&self, points: &[Point], model: Option<&ModelArtifact>) -> Result<Vec<usize>> {
        let summary = model
            .and_then(ModelArtifact::as_summary)
            .ok_or_else(|| RcfError::invalid_argument(NO_MODEL_MESSAGE))?;
        points
            .iter()
            .map(|p| summary.nearest_label(p, self.config.distance_type))
            .collect()
    }

    fn output_frame(labels: &[usize]) -> Result<DataFrame> {
        let mut frame = DataFrame::new(vec![ColumnMeta::new(
            CLUSTER_ID_COLUMN,
            ColumnType::Integer,
        )]);
        for &label in labels {
            let id = i32::try_from(label)
                .map_err(|_| RcfError::invalid_state(format!("cluster label {label} overflows")))?;
            frame.append_row(vec![ColumnValue::Integer(id)])?;
        }
        Ok(frame)
    }
}

impl Trainable for RcfSummarize {
    fn train(&self, input: &DataFrame) -> Result<ModelArtifact> {
        self.train_points(&input.to_points()?)
    }
}

impl Predictable for RcfSummarize {
    fn predict(&self, input: &DataFrame, model: Option<&ModelArtifact>) -> Result<DataFrame> {
        if model.and_then(ModelArtifact::as_summary).is_none() {
            return Err(RcfError::invalid_argument(NO_MODEL_MESSAGE));
        }
        let labels = self.label_points(&input.to_points()?, model)?;
        Self::output_frame(&labels)
    }
}

impl TrainAndPredictable for RcfSummarize {}
