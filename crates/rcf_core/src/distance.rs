//! Distance metrics for summarization

use serde::{Deserialize, Serialize};

/// Metric used for seeding, reassignment, merging and prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DistanceType {
    /// Manhattan
    L1,
    /// Euclidean
    #[default]
    L2,
    /// Chebyshev
    #[serde(alias = "L_INFINITY", alias = "linf")]
    LInfinity,
}

impl DistanceType {
    pub fn distance(&self, a: &[f64], b: &[f64]) -> f64 {
        let diffs = a.iter().zip(b).map(|(x, y)| (x - y).abs());
        match self {
            DistanceType::L1 => diffs.sum(),
            DistanceType::L2 => diffs.map(|d| d * d).sum::<f64>().sqrt(),
            DistanceType::LInfinity => diffs.fold(0.0, f64::max),
        }
    }

    /// Index of the closest center; ties go to the lowest index
    pub fn nearest(&self, point: &[f64], centers: &[Vec<f64>]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, center) in centers.iter().enumerate() {
            let d = self.distance(point, center);
            match best {
                Some((_, best_d)) if d >= best_d => {}
                _ => best = Some((i, d)),
            }
        }
        best.map(|(i, _)| i)
    }
}

impl std::fmt::Display for DistanceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DistanceType::L1 => write!(f, "L1"),
            DistanceType::L2 => write!(f, "L2"),
            DistanceType::LInfinity => write!(f, "LInfinity"),
        }
    }
}

impl std::str::FromStr for DistanceType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "l1" | "manhattan" => Ok(DistanceType::L1),
            "l2" | "euclidean" => Ok(DistanceType::L2),
            "linfinity" | "l_infinity" | "linf" | "chebyshev" => Ok(DistanceType::LInfinity),
            other => Err(format!("unknown distance type: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics() {
        let a = [0.0, 0.0];
        let b = [3.0, -4.0];
        assert_eq!(DistanceType::L1.distance(&a, &b), 7.0);
        assert_eq!(DistanceType::L2.distance(&a, &b), 5.0);
        assert_eq!(DistanceType::LInfinity.distance(&a, &b), 4.0);
    }

    #[test]
    fn test_nearest_breaks_ties_low() {
        let centers = vec![vec![-1.0], vec![1.0], vec![5.0]];
        assert_eq!(DistanceType::L2.nearest(&[0.0], &centers), Some(0));
        assert_eq!(DistanceType::L2.nearest(&[4.0], &centers), Some(2));
        assert_eq!(DistanceType::L2.nearest(&[0.0], &[]), None);
    }

    #[test]
    fn test_parse() {
        assert_eq!("l2".parse::<DistanceType>().unwrap(), DistanceType::L2);
        assert_eq!("LInfinity".parse::<DistanceType>().unwrap(), DistanceType::LInfinity);
        assert!("cosine".parse::<DistanceType>().is_err());
    }
}
