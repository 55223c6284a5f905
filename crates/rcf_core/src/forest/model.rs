//! Forest of independently sampled random trees
//!
//! Each tree draws its own sample without replacement from the training
//! batch, using a child seed derived from the caller's generator. Trees share
//! no state while building, so the optional parallel build yields the same
//! forest as the sequential one.

use rand::seq::index;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::tree::{RandomTree, TreeConfig, DEFAULT_MAX_DEPTH, DEFAULT_MIN_LEAF_SIZE};
use crate::dataframe::Point;
use crate::deterministic::{derive_seeds, seeded_rng};
use crate::errors::{RcfError, Result};

/// Forest construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestConfig {
    pub number_of_trees: usize,
    pub sample_size: usize,
    pub max_depth: usize,
    pub min_leaf_size: usize,
    /// Build trees on the rayon pool
    pub parallel: bool,
}

impl Default for ForestConfig {
    fn default() -> Self {
        Self {
            number_of_trees: 30,
            sample_size: 256,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
            parallel: false,
        }
    }
}

impl ForestConfig {
    pub fn validate(&self) -> Result<()> {
        if self.number_of_trees == 0 {
            return Err(RcfError::invalid_argument("number of trees should be positive"));
        }
        if self.sample_size == 0 {
            return Err(RcfError::invalid_argument("sample size should be positive"));
        }
        if self.max_depth == 0 {
            return Err(RcfError::invalid_argument("max depth should be positive"));
        }
        Ok(())
    }

    fn tree_config(&self) -> TreeConfig {
        TreeConfig {
            capacity: self.sample_size,
            max_depth: self.max_depth,
            min_leaf_size: self.min_leaf_size,
        }
    }
}

/// An ensemble of random trees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    dimensions: usize,
    /// Sample size actually drawn per tree (capped by the batch size)
    sample_size: usize,
    trees: Vec<RandomTree>,
}

impl RandomForest {
    /// Build a forest over `points`
    pub fn build<R: Rng + ?Sized>(points: &[Point], config: &ForestConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;
        let Some(first) = points.first() else {
            return Err(RcfError::invalid_argument("No training points provided"));
        };
        let dimensions = first.len();
        if dimensions == 0 {
            return Err(RcfError::invalid_argument("Training points have no coordinates"));
        }
        if let Some(pos) = points.iter().position(|p| p.len() != dimensions) {
            return Err(RcfError::invalid_argument(format!(
                "Point {pos} has {} dimensions, expected {dimensions}",
                points[pos].len()
            )));
        }

        let sample_size = config.sample_size.min(points.len());
        let tree_config = config.tree_config();
        let seeds = derive_seeds(rng, config.number_of_trees);

        let build_tree = |seed: u64| -> Result<RandomTree> {
            let mut tree_rng = seeded_rng(seed);
            let sample: Vec<Point> = index::sample(&mut tree_rng, points.len(), sample_size)
                .into_iter()
                .map(|i| points[i].clone())
                .collect();
            RandomTree::build(sample, tree_config, &mut tree_rng)
        };

        let trees = if config.parallel {
            seeds.into_par_iter().map(build_tree).collect::<Result<Vec<_>>>()?
        } else {
            seeds.into_iter().map(build_tree).collect::<Result<Vec<_>>>()?
        };

        debug!(
            trees = trees.len(),
            sample_size,
            dimensions,
            "built random forest"
        );

        Ok(Self {
            dimensions,
            sample_size,
            trees,
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn trees(&self) -> &[RandomTree] {
        &self.trees
    }

    /// Anomaly score of `point`: mean tree signal scaled by `log2(sample_size + 1)`
    pub fn score(&self, point: &[f64]) -> Result<f64> {
        if point.len() != self.dimensions {
            return Err(RcfError::invalid_argument(format!(
                "Point has {} dimensions, expected {}",
                point.len(),
                self.dimensions
            )));
        }
        if self.trees.is_empty() {
            return Ok(0.0);
        }

        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.score(point)?;
        }
        let normalizer = (self.sample_size as f64 + 1.0).log2();
        Ok(total / self.trees.len() as f64 * normalizer)
    }

    /// Structural check used after deserialization
    pub fn validate(&self) -> Result<()> {
        if self.trees.is_empty() {
            return Err(RcfError::invalid_state("forest has no trees"));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.dimensions() != self.dimensions {
                return Err(RcfError::invalid_state(format!("tree {i} has wrong dimensions")));
            }
            tree.validate()
                .map_err(|e| RcfError::invalid_state(format!("tree {i}: {e}")))?;
        }
        Ok(())
    }
}
