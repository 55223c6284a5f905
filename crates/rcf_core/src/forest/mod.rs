//! Randomized partition tree substrate
//!
//! Shared by the batch anomaly detector and the sample summarizer:
//!
//! - `bbox`: bounding boxes, range-weighted random cuts, separation odds
//! - `tree`: arena tree with sampling, insertion, deletion and scoring
//! - `model`: forest of independently sampled trees
//!
//! # Usage
//!
//! ```rust
//! use rcf_core::deterministic::seeded_rng;
//! use rcf_core::forest::{ForestConfig, RandomForest};
//!
//! let points: Vec<Vec<f64>> = (0..100).map(|i| vec![(i % 10) as f64]).collect();
//! let config = ForestConfig {
//!     number_of_trees: 10,
//!     sample_size: 50,
//!     ..ForestConfig::default()
//! };
//! let forest = RandomForest::build(&points, &config, &mut seeded_rng(42)).unwrap();
//!
//! let outlier = forest.score(&[500.0]).unwrap();
//! let inlier = forest.score(&[5.0]).unwrap();
//! assert!(outlier > inlier);
//! ```

pub mod bbox;
pub mod model;
pub mod tree;

pub use bbox::{BoundingBox, Cut};
pub use model::{ForestConfig, RandomForest};
pub use tree::{LeafEntry, RandomTree, TreeConfig};
