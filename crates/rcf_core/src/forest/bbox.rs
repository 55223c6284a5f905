//! Axis-aligned bounding boxes and random cuts

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A split of space along one coordinate
///
/// Points with `point[dimension] <= value` go left.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub dimension: usize,
    pub value: f64,
}

impl Cut {
    pub fn goes_left(&self, point: &[f64]) -> bool {
        point[self.dimension] <= self.value
    }
}

/// Smallest box containing a set of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    min: Vec<f64>,
    max: Vec<f64>,
}

impl BoundingBox {
    pub fn from_point(point: &[f64]) -> Self {
        Self {
            min: point.to_vec(),
            max: point.to_vec(),
        }
    }

    /// Box over `points`; `None` when the iterator is empty
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        let mut iter = points.into_iter();
        let mut bbox = BoundingBox::from_point(iter.next()?);
        for point in iter {
            bbox.extend(point);
        }
        Some(bbox)
    }

    pub fn dimensions(&self) -> usize {
        self.min.len()
    }

    pub fn min(&self) -> &[f64] {
        &self.min
    }

    pub fn max(&self) -> &[f64] {
        &self.max
    }

    pub fn extend(&mut self, point: &[f64]) {
        for (d, &v) in point.iter().enumerate() {
            if v < self.min[d] {
                self.min[d] = v;
            }
            if v > self.max[d] {
                self.max[d] = v;
            }
        }
    }

    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut merged = self.clone();
        merged.extend(&other.min);
        merged.extend(&other.max);
        merged
    }

    pub fn contains(&self, point: &[f64]) -> bool {
        point
            .iter()
            .enumerate()
            .all(|(d, &v)| v >= self.min[d] && v <= self.max[d])
    }

    /// Shape check for boxes that did not come from points
    pub fn is_well_formed(&self, dimensions: usize) -> bool {
        self.min.len() == dimensions
            && self.max.len() == dimensions
            && self.min.iter().zip(&self.max).all(|(lo, hi)| lo <= hi)
    }

    /// Half of a coordinate's range, finite for any finite bounds
    fn half_range(&self, dimension: usize) -> f64 {
        half_span(self.min[dimension], self.max[dimension])
    }

    /// Draw a cut: coordinate proportional to its range, value uniform in it
    ///
    /// Zero-range and non-finite-range coordinates are never chosen. Returns
    /// `None` when no coordinate is eligible. The cut value always lies in
    /// `[min, max)` of the chosen coordinate, so both sides are non-empty.
    pub fn random_cut<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cut> {
        let halves: Vec<f64> = (0..self.dimensions())
            .map(|d| {
                let h = self.half_range(d);
                if h.is_finite() && h > 0.0 {
                    h
                } else {
                    0.0
                }
            })
            .collect();
        let scale = halves.iter().copied().fold(0.0, f64::max);
        if scale <= 0.0 {
            return None;
        }
        // weights lie in [0, 1]
        let weights: Vec<f64> = halves.iter().map(|h| h / scale).collect();
        let total: f64 = weights.iter().sum();

        let mut r = rng.gen::<f64>() * total;
        let mut dimension = weights.iter().rposition(|&w| w > 0.0)?;
        for (d, &w) in weights.iter().enumerate() {
            if w <= 0.0 {
                continue;
            }
            if r < w {
                dimension = d;
                break;
            }
            r -= w;
        }

        let fraction = (r / weights[dimension]).clamp(0.0, 1.0);
        let (lo, hi) = (self.min[dimension], self.max[dimension]);
        let mut value = lo * (1.0 - fraction) + hi * fraction;
        if !(value >= lo && value < hi) {
            value = lo;
        }
        Some(Cut { dimension, value })
    }

    /// Probability that a random cut over this box extended by `point`
    /// separates `point` from the box
    pub fn separation_probability(&self, point: &[f64]) -> f64 {
        let mut extended = Vec::with_capacity(point.len());
        let mut gaps = Vec::with_capacity(point.len());
        for (d, &v) in point.iter().enumerate() {
            let e = half_span(self.min[d].min(v), self.max[d].max(v));
            extended.push(e);
            gaps.push(e - self.half_range(d));
        }
        if extended.iter().chain(&gaps).any(|x| !x.is_finite()) {
            return if self.contains(point) { 0.0 } else { 1.0 };
        }

        let scale = extended.iter().copied().fold(0.0, f64::max);
        if scale <= 0.0 {
            return 0.0;
        }
        let extended_total: f64 = extended.iter().map(|e| e / scale).sum();
        let gap_total: f64 = gaps.iter().map(|g| g / scale).sum();
        (gap_total / extended_total).clamp(0.0, 1.0)
    }
}

fn half_span(lo: f64, hi: f64) -> f64 {
    hi * 0.5 - lo * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deterministic::seeded_rng;

    fn unit_box() -> BoundingBox {
        BoundingBox::from_points([&[0.0, 0.0][..], &[1.0, 4.0][..]]).unwrap()
    }

    #[test]
    fn test_from_points_and_contains() {
        let bbox = unit_box();
        assert_eq!(bbox.min(), &[0.0, 0.0]);
        assert_eq!(bbox.max(), &[1.0, 4.0]);
        assert!(bbox.contains(&[0.5, 2.0]));
        assert!(!bbox.contains(&[1.5, 2.0]));
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::from_point(&[0.0, 0.0]);
        let b = BoundingBox::from_point(&[2.0, -1.0]);
        let u = a.union(&b);
        assert_eq!(u.min(), &[0.0, -1.0]);
        assert_eq!(u.max(), &[2.0, 0.0]);
    }

    #[test]
    fn test_random_cut_stays_inside_box() {
        let bbox = unit_box();
        let mut rng = seeded_rng(1);
        for _ in 0..1000 {
            let cut = bbox.random_cut(&mut rng).unwrap();
            assert!(cut.value >= bbox.min()[cut.dimension]);
            assert!(cut.value < bbox.max()[cut.dimension]);
        }
    }

    #[test]
    fn test_random_cut_prefers_wider_dimension() {
        let bbox = unit_box();
        let mut rng = seeded_rng(2);
        let wide = (0..4000)
            .filter(|_| bbox.random_cut(&mut rng).unwrap().dimension == 1)
            .count();
        // range 4 vs 1: expect ~80% on dimension 1
        assert!(wide > 2800 && wide < 3600, "wide = {wide}");
    }

    #[test]
    fn test_random_cut_skips_zero_range() {
        let bbox = BoundingBox::from_points([&[3.0, 0.0][..], &[3.0, 5.0][..]]).unwrap();
        let mut rng = seeded_rng(3);
        for _ in 0..100 {
            assert_eq!(bbox.random_cut(&mut rng).unwrap().dimension, 1);
        }
    }

    #[test]
    fn test_degenerate_box_has_no_cut() {
        let bbox = BoundingBox::from_point(&[1.0, 1.0]);
        assert!(bbox.random_cut(&mut seeded_rng(4)).is_none());

        let unbounded = BoundingBox::from_points([&[f64::NEG_INFINITY][..], &[f64::INFINITY][..]]).unwrap();
        assert!(unbounded.random_cut(&mut seeded_rng(4)).is_none());
    }

    #[test]
    fn test_huge_finite_ranges_stay_cuttable() {
        let mut rng = seeded_rng(5);
        let wide = BoundingBox::from_points([&[0.0, 0.0][..], &[1e308, 1e308][..]]).unwrap();
        let spanning = BoundingBox::from_points([&[-f64::MAX][..], &[f64::MAX][..]]).unwrap();
        for bbox in [wide, spanning] {
            for _ in 0..200 {
                let cut = bbox.random_cut(&mut rng).unwrap();
                assert!(cut.value >= bbox.min()[cut.dimension]);
                assert!(cut.value < bbox.max()[cut.dimension]);
            }
        }
    }

    #[test]
    fn test_separation_probability_with_huge_ranges() {
        let bbox = BoundingBox::from_points([&[0.0, 0.0][..], &[1e308, 1e308][..]]).unwrap();
        assert_eq!(bbox.separation_probability(&[5.0, 5.0]), 0.0);
        // each axis doubles: extended 2e308 per axis, gap 1e308 per axis
        let p = bbox.separation_probability(&[-1e308, -1e308]);
        assert!((p - 0.5).abs() < 1e-12, "p = {p}");
    }

    #[test]
    fn test_well_formed() {
        assert!(unit_box().is_well_formed(2));
        assert!(!unit_box().is_well_formed(3));
        let short = BoundingBox {
            min: vec![0.0, 0.0],
            max: vec![1.0],
        };
        assert!(!short.is_well_formed(2));
        let inverted = BoundingBox {
            min: vec![2.0],
            max: vec![1.0],
        };
        assert!(!inverted.is_well_formed(1));
    }

    #[test]
    fn test_separation_probability() {
        let bbox = unit_box();
        assert_eq!(bbox.separation_probability(&[0.5, 0.5]), 0.0);
        // extended ranges 2 + 4, gap 1
        let p = bbox.separation_probability(&[2.0, 1.0]);
        assert!((p - 1.0 / 6.0).abs() < 1e-12);

        let point_box = BoundingBox::from_point(&[1.0, 1.0]);
        assert_eq!(point_box.separation_probability(&[1.0, 1.0]), 0.0);
        assert_eq!(point_box.separation_probability(&[2.0, 1.0]), 1.0);
    }
}
