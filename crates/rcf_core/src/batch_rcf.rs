//! Batch random cut forest anomaly detector
//!
//! Trains a forest over a fixed batch, then scores each row of an
//! evaluation batch. Rows before `output_after` are warm-up rows: they are
//! reported with score 0 and never flagged, and the forest is not consulted
//! for them.

use tracing::{debug, info};

use crate::algorithm::{Predictable, TrainAndPredictable, Trainable};
use crate::artifact::ModelArtifact;
use crate::dataframe::{ColumnMeta, ColumnType, ColumnValue, DataFrame, Point};
use crate::deterministic::seeded_rng;
use crate::errors::{RcfError, Result};
use crate::forest::RandomForest;
use crate::params::{BatchRcfConfig, BatchRcfParams, TrainingDataPolicy};

/// Message for predictions without a usable model
pub const NO_MODEL_MESSAGE: &str = "No model found for batch RCF prediction";

pub const SCORE_COLUMN: &str = "score";
pub const ANOMALOUS_COLUMN: &str = "anomalous";

/// Score and decision for one row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnomalyResult {
    pub score: f64,
    pub is_anomaly: bool,
}

impl AnomalyResult {
    const WARM_UP: AnomalyResult = AnomalyResult {
        score: 0.0,
        is_anomaly: false,
    };
}

/// Batch RCF detector
#[derive(Debug, Clone)]
pub struct BatchRandomCutForest {
    config: BatchRcfConfig,
}

impl BatchRandomCutForest {
    /// Validate `params`; `None` uses every default
    pub fn new(params: Option<&BatchRcfParams>) -> Result<Self> {
        let config = match params {
            Some(params) => params.validate()?,
            None => BatchRcfConfig::default(),
        };
        Ok(Self { config })
    }

    pub fn config(&self) -> &BatchRcfConfig {
        &self.config
    }

    /// Rows used for training under the configured size policy
    fn training_rows<'a>(&self, points: &'a [Point]) -> Result<&'a [Point]> {
        let Some(size) = self.config.training_data_size else {
            return Ok(points);
        };
        match self.config.training_data_policy {
            TrainingDataPolicy::Truncate => Ok(&points[..size.min(points.len())]),
            TrainingDataPolicy::Strict if points.len() == size => Ok(points),
            TrainingDataPolicy::Strict => Err(RcfError::invalid_argument(format!(
                "training data size {size} does not match {} input rows",
                points.len()
            ))),
        }
    }

    /// Build the forest over raw points
    pub fn train_points(&self, points: &[Point]) -> Result<ModelArtifact> {
        let rows = self.training_rows(points)?;
        info!(
            rows = rows.len(),
            trees = self.config.number_of_trees,
            sample_size = self.config.sample_size,
            "training batch RCF"
        );
        let mut rng = seeded_rng(self.config.seed);
        let forest = RandomForest::build(rows, &self.config.forest_config(), &mut rng)?;
        Ok(ModelArtifact::forest(forest))
    }

    /// Score raw points in order against a trained forest artifact
    pub fn score_points(
        &self,
        points: &[Point],
        model: Option<&ModelArtifact>,
    ) -> Result<Vec<AnomalyResult>> {
        let forest = model
            .and_then(ModelArtifact::as_forest)
            .ok_or_else(|| RcfError::invalid_argument(NO_MODEL_MESSAGE))?;

        let threshold = self.config.anomaly_score_threshold;
        let results = points
            .iter()
            .enumerate()
            .map(|(i, point)| {
                if i < self.config.output_after {
                    return Ok(AnomalyResult::WARM_UP);
                }
                let score = forest.score(point)?;
                Ok(AnomalyResult {
                    score,
                    is_anomaly: score > threshold,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!(
            rows = results.len(),
            anomalies = results.iter().filter(|r| r.is_anomaly).count(),
            "scored batch"
        );
        Ok(results)
    }

    fn output_frame(results: &[AnomalyResult]) -> Result<DataFrame> {
        let mut frame = DataFrame::new(vec![
            ColumnMeta::new(SCORE_COLUMN, ColumnType::Double),
            ColumnMeta::new(ANOMALOUS_COLUMN, ColumnType::Boolean),
        ]);
        for r in results {
            frame.append_row(vec![
                ColumnValue::Double(r.score),
                ColumnValue::Boolean(r.is_anomaly),
            ])?;
        }
        Ok(frame)
    }
}

impl Trainable for BatchRandomCutForest {
    fn train(&self, input: &DataFrame) -> Result<ModelArtifact> {
        self.train_points(&input.to_points()?)
    }
}

impl Predictable for BatchRandomCutForest {
    fn predict(&self, input: &DataFrame, model: Option<&ModelArtifact>) -> Result<DataFrame> {
        if model.and_then(ModelArtifact::as_forest).is_none() {
            return Err(RcfError::invalid_argument(NO_MODEL_MESSAGE));
        }
        let results = self.score_points(&input.to_points()?, model)?;
        Self::output_frame(&results)
    }
}

impl TrainAndPredictable for BatchRandomCutForest {}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(n: usize) -> Vec<Point> {
        (0..n).map(|i| vec![(i % 10) as f64]).collect()
    }

    fn detector(params: BatchRcfParams) -> BatchRandomCutForest {
        BatchRandomCutForest::new(Some(&params)).unwrap()
    }

    #[test]
    fn test_truncate_policy_uses_prefix() {
        let d = detector(BatchRcfParams {
            training_data_size: Some(5),
            ..Default::default()
        });
        let points = line(20);
        assert_eq!(d.training_rows(&points).unwrap().len(), 5);

        let short = line(3);
        assert_eq!(d.training_rows(&short).unwrap().len(), 3);
    }

    #[test]
    fn test_strict_policy_requires_exact_size() {
        let d = detector(BatchRcfParams {
            training_data_size: Some(5),
            training_data_policy: Some(TrainingDataPolicy::Strict),
            ..Default::default()
        });
        assert_eq!(d.training_rows(&line(5)).unwrap().len(), 5);
        let err = d.training_rows(&line(6)).unwrap_err();
        assert!(matches!(err, RcfError::InvalidArgument(_)));
    }

    #[test]
    fn test_warm_up_rows_skip_forest() {
        let d = detector(BatchRcfParams {
            number_of_trees: Some(5),
            sample_size: Some(32),
            output_after: Some(3),
            anomaly_score_threshold: Some(0.5),
            ..Default::default()
        });
        let model = d.train_points(&line(100)).unwrap();
        let eval = vec![vec![900.0], vec![900.0], vec![900.0], vec![900.0]];
        let results = d.score_points(&eval, Some(&model)).unwrap();

        assert_eq!(results.len(), 4);
        for r in &results[..3] {
            assert_eq!(*r, AnomalyResult::WARM_UP);
        }
        assert!(results[3].is_anomaly);
    }

    #[test]
    fn test_summary_model_is_rejected() {
        use crate::distance::DistanceType;
        use crate::summary::{SampleSummary, SummaryPoint};

        let d = detector(BatchRcfParams::default());
        let summary = ModelArtifact::summary(SampleSummary::new(
            vec![SummaryPoint {
                label: 0,
                centroid: vec![1.0],
                weight: 1,
            }],
            DistanceType::L2,
        ));
        let err = d.score_points(&line(3), Some(&summary)).unwrap_err();
        assert_eq!(err.to_string(), NO_MODEL_MESSAGE);
    }
}
