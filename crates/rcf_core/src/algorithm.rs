//! Train / predict contract shared by both engines

use crate::artifact::ModelArtifact;
use crate::dataframe::DataFrame;
use crate::errors::Result;

/// Produces a model artifact from a training batch
pub trait Trainable {
    fn train(&self, input: &DataFrame) -> Result<ModelArtifact>;
}

/// Scores or labels a batch against a trained artifact
///
/// `model` is `None` when the caller has no trained state; implementations
/// reject that before reading `input`.
pub trait Predictable {
    fn predict(&self, input: &DataFrame, model: Option<&ModelArtifact>) -> Result<DataFrame>;
}

/// Train on a batch and score that same batch
pub trait TrainAndPredictable: Trainable + Predictable {
    fn train_and_predict(&self, input: &DataFrame) -> Result<DataFrame> {
        let model = self.train(input)?;
        self.predict(input, Some(&model))
    }
}
