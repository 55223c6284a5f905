//! Sample summaries: weighted representative points
//!
//! `summarize` reduces a point set to at most `max_k` weighted centroids:
//!
//! 1. Seed up to `initial_k` centers from the sample of a one-tree forest.
//! 2. Assign every point to its nearest center and drop empty clusters.
//! 3. While more than `max_k` clusters remain, merge the closest pair of
//!    centroids (weights add, centroid is the weighted mean). With
//!    `phase1_reassign`, every point is reassigned to the surviving centroids
//!    after each merge.
//!
//! Assignment is a pure map over points against a read-only centroid
//! snapshot and may run on the rayon pool; weights and centroids are then
//! rebuilt by a sequential reduction before the next merge decision.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dataframe::Point;
use crate::deterministic::seeded_rng;
use crate::distance::DistanceType;
use crate::errors::{RcfError, Result};
use crate::forest::{ForestConfig, RandomForest};
use crate::params::RcfSummarizeConfig;

/// A weighted representative of a cluster
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub label: usize,
    pub centroid: Point,
    /// Number of input points represented
    pub weight: usize,
}

/// Final set of summary points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSummary {
    points: Vec<SummaryPoint>,
    distance_type: DistanceType,
    dimensions: usize,
}

impl SampleSummary {
    pub fn new(points: Vec<SummaryPoint>, distance_type: DistanceType) -> Self {
        let dimensions = points.first().map(|p| p.centroid.len()).unwrap_or(0);
        Self {
            points,
            distance_type,
            dimensions,
        }
    }

    pub fn summary_points(&self) -> &[SummaryPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Metric the summary was built with
    pub fn distance_type(&self) -> DistanceType {
        self.distance_type
    }

    pub fn total_weight(&self) -> usize {
        self.points.iter().map(|p| p.weight).sum()
    }

    /// Label of the closest summary point under `metric`
    pub fn nearest_label(&self, point: &[f64], metric: DistanceType) -> Result<usize> {
        if point.len() != self.dimensions {
            return Err(RcfError::invalid_argument(format!(
                "Point has {} dimensions, expected {}",
                point.len(),
                self.dimensions
            )));
        }
        let mut best: Option<(usize, f64)> = None;
        for sp in &self.points {
            let d = metric.distance(point, &sp.centroid);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((sp.label, d)),
            }
        }
        best.map(|(label, _)| label)
            .ok_or_else(|| RcfError::invalid_state("summary has no points"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.points.is_empty() {
            return Err(RcfError::invalid_state("summary has no points"));
        }
        for (i, sp) in self.points.iter().enumerate() {
            if sp.label != i {
                return Err(RcfError::invalid_state(format!(
                    "summary point {i} has label {}",
                    sp.label
                )));
            }
            if sp.weight == 0 {
                return Err(RcfError::invalid_state(format!("summary point {i} has no weight")));
            }
            if sp.centroid.len() != self.dimensions || sp.centroid.iter().any(|v| !v.is_finite()) {
                return Err(RcfError::invalid_state(format!("summary point {i} has a bad centroid")));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct Cluster {
    centroid: Point,
    weight: usize,
}

/// Nearest-center index for every point
fn assign(points: &[Point], centers: &[Point], metric: DistanceType, parallel: bool) -> Vec<usize> {
    let nearest = |p: &Point| metric.nearest(p, centers).unwrap_or(0);
    if parallel {
        points.par_iter().map(nearest).collect()
    } else {
        points.iter().map(nearest).collect()
    }
}

/// Rebuild clusters from an assignment, dropping empty ones and relabeling
/// the assignment to stay contiguous
fn aggregate(points: &[Point], assignment: &mut [usize], k: usize, dimensions: usize) -> Vec<Cluster> {
    let mut sums = vec![vec![0.0; dimensions]; k];
    let mut weights = vec![0usize; k];
    for (point, &c) in points.iter().zip(assignment.iter()) {
        weights[c] += 1;
        for (s, v) in sums[c].iter_mut().zip(point) {
            *s += v;
        }
    }

    let mut relabel = vec![usize::MAX; k];
    let mut clusters = Vec::with_capacity(k);
    for (c, (sum, weight)) in sums.into_iter().zip(weights).enumerate() {
        if weight == 0 {
            continue;
        }
        relabel[c] = clusters.len();
        let centroid = sum.into_iter().map(|s| s / weight as f64).collect();
        clusters.push(Cluster { centroid, weight });
    }
    for c in assignment.iter_mut() {
        *c = relabel[*c];
    }
    clusters
}

fn closest_pair(clusters: &[Cluster], metric: DistanceType) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize, f64)> = None;
    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let d = metric.distance(&clusters[i].centroid, &clusters[j].centroid);
            match best {
                Some((_, _, best_d)) if d >= best_d => {}
                _ => best = Some((i, j, d)),
            }
        }
    }
    best.map(|(i, j, _)| (i, j))
}

fn merge(clusters: &mut Vec<Cluster>, assignment: &mut [usize], i: usize, j: usize) {
    let absorbed = clusters.remove(j);
    let target = &mut clusters[i];
    let total = (target.weight + absorbed.weight) as f64;
    for (c, a) in target.centroid.iter_mut().zip(&absorbed.centroid) {
        *c = (*c * target.weight as f64 + a * absorbed.weight as f64) / total;
    }
    target.weight += absorbed.weight;

    for c in assignment.iter_mut() {
        if *c == j {
            *c = i;
        } else if *c > j {
            *c -= 1;
        }
    }
}

/// Reduce `points` to at most `config.max_k` weighted summary points
pub fn summarize(points: &[Point], config: &RcfSummarizeConfig) -> Result<SampleSummary> {
    let Some(first) = points.first() else {
        return Err(RcfError::invalid_argument("No training points provided"));
    };
    let dimensions = first.len();
    let metric = config.distance_type;
    let initial_k = config.initial_k.min(points.len());

    let seed_config = ForestConfig {
        number_of_trees: 1,
        sample_size: initial_k,
        parallel: false,
        ..ForestConfig::default()
    };
    let mut rng = seeded_rng(config.seed);
    let seed_forest = RandomForest::build(points, &seed_config, &mut rng)?;
    let seeds: Vec<Point> = seed_forest
        .trees()
        .iter()
        .flat_map(|tree| tree.points())
        .collect();

    let mut assignment = assign(points, &seeds, metric, config.parallel);
    let mut clusters = aggregate(points, &mut assignment, seeds.len(), dimensions);
    debug!(
        seeds = seeds.len(),
        clusters = clusters.len(),
        "seeded summary clusters"
    );

    while clusters.len() > config.max_k {
        let Some((i, j)) = closest_pair(&clusters, metric) else {
            break;
        };
        merge(&mut clusters, &mut assignment, i, j);

        if config.phase1_reassign {
            let centers: Vec<Point> = clusters.iter().map(|c| c.centroid.clone()).collect();
            assignment = assign(points, &centers, metric, config.parallel);
            clusters = aggregate(points, &mut assignment, centers.len(), dimensions);
        }
        debug!(clusters = clusters.len(), "merged closest clusters");
    }

    let mut order: Vec<usize> = (0..clusters.len()).collect();
    order.sort_by(|&a, &b| clusters[b].weight.cmp(&clusters[a].weight));
    let summary_points = order
        .into_iter()
        .enumerate()
        .map(|(label, c)| SummaryPoint {
            label,
            centroid: clusters[c].centroid.clone(),
            weight: clusters[c].weight,
        })
        .collect();

    Ok(SampleSummary::new(summary_points, metric))
}
