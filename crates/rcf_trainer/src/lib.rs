//! RCF Trainer - batch anomaly detection and summarization over CSV files
//!
//! Loads numeric CSV datasets, trains or reloads a model artifact, and
//! writes per-row predictions plus the artifact and its content hash.

pub mod config;
pub mod dataset;
pub mod errors;

use rcf_core::{
    BatchRandomCutForest, BatchRcfParams, DataFrame, ModelArtifact, Predictable, RcfSummarize,
    RcfSummarizeParams, TrainAndPredictable, Trainable,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub use config::TrainerConfig;
pub use dataset::{write_frame, write_frame_to_path, Dataset, FeatureStats};
pub use errors::TrainerError;

pub const MODEL_FILE: &str = "model.bin";
pub const HASH_FILE: &str = "model.hash";
pub const PREDICTIONS_FILE: &str = "predictions.csv";

/// Model used for a run and the rows it produced
#[derive(Debug)]
pub struct RunOutput {
    pub model: ModelArtifact,
    pub predictions: DataFrame,
}

/// Locations written by `save_model`
#[derive(Debug, Clone)]
pub struct SavedModel {
    pub model_path: PathBuf,
    pub hash_path: PathBuf,
    pub hash: String,
}

/// Load a CSV dataset and log its shape and per-feature ranges
pub fn load_dataset<P: AsRef<Path>>(path: P) -> Result<Dataset, TrainerError> {
    let path = path.as_ref();
    info!("Loading dataset from: {}", path.display());
    let dataset = Dataset::from_csv(path).map_err(|err| TrainerError::Dataset(format!("{err:#}")))?;
    info!(
        "Loaded {} rows with {} features",
        dataset.len(),
        dataset.feature_count()
    );
    for (header, stats) in dataset.headers.iter().zip(dataset.feature_stats()) {
        debug!("  {header}: min={}, max={}", stats.min, stats.max);
    }
    Ok(dataset)
}

fn run<A: TrainAndPredictable>(
    engine: &A,
    train: Option<&Dataset>,
    input: &Dataset,
    model: Option<ModelArtifact>,
) -> Result<RunOutput, TrainerError> {
    let model = match model {
        Some(model) => model,
        None => engine.train(&train.unwrap_or(input).to_frame()?)?,
    };
    let predictions = engine.predict(&input.to_frame()?, Some(&model))?;
    Ok(RunOutput { model, predictions })
}

/// Score `input` with a batch RCF model trained on `train` (or `input`), or with `model`
pub fn detect(
    params: &BatchRcfParams,
    train: Option<&Dataset>,
    input: &Dataset,
    model: Option<ModelArtifact>,
) -> Result<RunOutput, TrainerError> {
    let engine = BatchRandomCutForest::new(Some(params))?;
    run(&engine, train, input, model)
}

/// Label `input` with an RCF summary trained on `train` (or `input`), or with `model`
pub fn summarize(
    params: &RcfSummarizeParams,
    train: Option<&Dataset>,
    input: &Dataset,
    model: Option<ModelArtifact>,
) -> Result<RunOutput, TrainerError> {
    let engine = RcfSummarize::new(Some(params))?;
    run(&engine, train, input, model)
}

/// Write the artifact bytes and the hex content hash into `dir`
pub fn save_model(dir: &Path, model: &ModelArtifact) -> Result<SavedModel, TrainerError> {
    std::fs::create_dir_all(dir)?;

    let model_path = dir.join(MODEL_FILE);
    std::fs::write(&model_path, model.to_bytes()?)?;

    let hash = model.content_hash_hex()?;
    let hash_path = dir.join(HASH_FILE);
    std::fs::write(&hash_path, &hash)?;

    info!("Saved {} model to {}", model.name(), model_path.display());
    Ok(SavedModel {
        model_path,
        hash_path,
        hash,
    })
}

/// Read and verify an artifact written by `save_model`
pub fn load_model<P: AsRef<Path>>(path: P) -> Result<ModelArtifact, TrainerError> {
    let bytes = std::fs::read(path.as_ref())?;
    Ok(ModelArtifact::from_bytes(&bytes)?)
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
