//! Random Cut Forest engines over numeric batches
//!
//! Provides batch anomaly scoring and sample summarization built on a shared
//! random-cut tree substrate, plus a checksummed model artifact format.
//!
//! Modules:
//! - `forest`: Bounding boxes, random cut trees and forests
//! - `batch_rcf`: Batch anomaly detector (train, score, threshold)
//! - `summary`: Sample summarization into weighted centroids
//! - `rcf_summarize`: Clusterer built on `summary`
//! - `artifact`: Model artifact encoding and integrity checks
//! - `params`: Parameter validation and defaults
//! - `dataframe`: Tabular input and output batches
//! - `distance`: L1, L2 and L-infinity distances
//! - `algorithm`: Train / predict traits shared by the engines
//! - `deterministic`: Seeded randomness helpers

pub mod algorithm;
pub mod artifact;
pub mod batch_rcf;
pub mod dataframe;
pub mod deterministic;
pub mod distance;
pub mod errors;
pub mod forest;
pub mod params;
pub mod rcf_summarize;
pub mod summary;

pub use algorithm::{Predictable, TrainAndPredictable, Trainable};
pub use artifact::{FunctionName, MlModel, ModelArtifact, ModelPayload, MODEL_VERSION};
pub use batch_rcf::{AnomalyResult, BatchRandomCutForest};
pub use dataframe::{ColumnMeta, ColumnType, ColumnValue, DataFrame, Point, Row};
pub use distance::DistanceType;
pub use errors::{RcfError, Result};
pub use forest::{RandomForest, RandomTree};
pub use params::{
    BatchRcfConfig, BatchRcfParams, RcfSummarizeConfig, RcfSummarizeParams, TrainingDataPolicy,
};
pub use rcf_summarize::RcfSummarize;
pub use summary::{summarize, SampleSummary, SummaryPoint};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
