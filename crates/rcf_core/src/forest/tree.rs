//! Randomized partition tree over a bounded sample
//!
//! Nodes live in an arena (`Vec<Node>`) and refer to each other by index;
//! slots released by deletion are recycled through a free list. Internal
//! nodes hold a bounding-box-weighted random cut, leaves hold a bag of
//! distinct points with reference counts.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::bbox::{BoundingBox, Cut};
use crate::dataframe::Point;
use crate::errors::{RcfError, Result};

/// Default depth bound for a single tree
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default bag size at or below which a node is not split
pub const DEFAULT_MIN_LEAF_SIZE: usize = 1;

/// Shape limits for one tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// Maximum number of points (counting duplicates) the tree may hold
    pub capacity: usize,
    pub max_depth: usize,
    pub min_leaf_size: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            capacity: 256,
            max_depth: DEFAULT_MAX_DEPTH,
            min_leaf_size: DEFAULT_MIN_LEAF_SIZE,
        }
    }
}

/// A distinct point in a leaf and how many times it was sampled
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafEntry {
    pub point: Point,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum NodeKind {
    Internal { cut: Cut, left: usize, right: usize },
    Leaf { bag: Vec<LeafEntry> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Node {
    bbox: BoundingBox,
    mass: usize,
    parent: Option<usize>,
    kind: NodeKind,
}

/// Weight of a separation event at `depth`: shallower is more anomalous
fn displacement_weight(depth: usize) -> f64 {
    1.0 / (depth as f64 + 1.0)
}

fn bag_of(points: Vec<Point>) -> Vec<LeafEntry> {
    let mut bag: Vec<LeafEntry> = Vec::new();
    for point in points {
        if let Some(pos) = bag.iter().position(|e| e.point == point) {
            bag[pos].count += 1;
        } else {
            bag.push(LeafEntry { point, count: 1 });
        }
    }
    bag
}

fn bag_box(bag: &[LeafEntry]) -> Option<BoundingBox> {
    BoundingBox::from_points(bag.iter().map(|e| e.point.as_slice()))
}

/// A single randomized partition tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomTree {
    config: TreeConfig,
    dimensions: usize,
    nodes: Vec<Node>,
    free: Vec<usize>,
    root: Option<usize>,
}

impl RandomTree {
    /// Create an empty tree for points of `dimensions` coordinates
    pub fn new(dimensions: usize, config: TreeConfig) -> Self {
        Self {
            config,
            dimensions,
            nodes: Vec::new(),
            free: Vec::new(),
            root: None,
        }
    }

    /// Recursively partition `sample` into a tree
    pub fn build<R: Rng + ?Sized>(sample: Vec<Point>, config: TreeConfig, rng: &mut R) -> Result<Self> {
        let dimensions = sample.first().map(Vec::len).unwrap_or(0);
        let mut tree = RandomTree::new(dimensions, config);

        if sample.len() > config.capacity {
            return Err(RcfError::invalid_argument(format!(
                "Sample of {} points exceeds tree capacity {}",
                sample.len(),
                config.capacity
            )));
        }
        for point in &sample {
            tree.check_dimensions(point)?;
        }

        if !sample.is_empty() {
            let root = tree.grow(sample, 0, None, rng)?;
            tree.root = Some(root);
        }
        Ok(tree)
    }

    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of points held, counting duplicates
    pub fn mass(&self) -> usize {
        self.root.map(|r| self.nodes[r].mass).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Live nodes (excludes recycled slots)
    pub fn node_count(&self) -> usize {
        self.nodes.len() - self.free.len()
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.root.map(|r| &self.nodes[r].bbox)
    }

    /// Every sampled point, duplicates expanded, in left-to-right leaf order
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.mass());
        let mut stack: Vec<usize> = self.root.into_iter().collect();
        while let Some(idx) = stack.pop() {
            match &self.nodes[idx].kind {
                NodeKind::Internal { left, right, .. } => {
                    stack.push(*right);
                    stack.push(*left);
                }
                NodeKind::Leaf { bag } => {
                    for entry in bag {
                        out.extend(std::iter::repeat(entry.point.clone()).take(entry.count));
                    }
                }
            }
        }
        out
    }

    /// Depth of the leaf `point` would reach
    pub fn leaf_depth(&self, point: &[f64]) -> Result<usize> {
        self.check_dimensions(point)?;
        let Some(mut idx) = self.root else {
            return Ok(0);
        };
        let mut depth = 0;
        while let NodeKind::Internal { cut, left, right } = &self.nodes[idx].kind {
            idx = if cut.goes_left(point) { *left } else { *right };
            depth += 1;
        }
        Ok(depth)
    }

    /// Depth-weighted displacement signal for `point`
    ///
    /// Walks the point's natural path. At every node, the chance that a
    /// random cut over the node's box extended by `point` isolates it is
    /// credited with weight `1 / (depth + 1)`. A point absent from the leaf
    /// it reaches is isolated one level below that leaf. A point equal to a
    /// sampled point scores 0.
    pub fn score(&self, point: &[f64]) -> Result<f64> {
        self.check_dimensions(point)?;
        let Some(mut idx) = self.root else {
            return Ok(0.0);
        };

        let mut depth = 0usize;
        let mut unseparated = 1.0;
        let mut score = 0.0;
        loop {
            let node = &self.nodes[idx];
            let p = node.bbox.separation_probability(point);
            score += unseparated * p * displacement_weight(depth);
            unseparated *= 1.0 - p;
            if unseparated <= 0.0 {
                break;
            }

            match &node.kind {
                NodeKind::Internal { cut, left, right } => {
                    idx = if cut.goes_left(point) { *left } else { *right };
                    depth += 1;
                }
                NodeKind::Leaf { bag } => {
                    if !bag.iter().any(|e| e.point.as_slice() == point) {
                        score += unseparated * displacement_weight(depth + 1);
                    }
                    break;
                }
            }
        }
        Ok(score)
    }

    /// Add one point along its natural path
    ///
    /// Boxes and masses on the path grow to include the point. The leaf it
    /// lands in is re-partitioned when it becomes splittable. If that fails
    /// the tree is left as it was before the call.
    pub fn insert<R: Rng + ?Sized>(&mut self, point: Point, rng: &mut R) -> Result<()> {
        if self.root.is_none() && self.dimensions == 0 {
            self.dimensions = point.len();
        }
        self.check_dimensions(&point)?;
        if self.mass() >= self.config.capacity {
            return Err(RcfError::invalid_state(format!(
                "Tree is at capacity ({} points)",
                self.config.capacity
            )));
        }

        let Some(mut idx) = self.root else {
            let root = self.grow(vec![point], 0, None, rng)?;
            self.root = Some(root);
            return Ok(());
        };

        let mut depth = 0;
        loop {
            let node = &mut self.nodes[idx];
            node.bbox.extend(&point);
            node.mass += 1;
            match &mut node.kind {
                NodeKind::Internal { cut, left, right } => {
                    idx = if cut.goes_left(&point) { *left } else { *right };
                    depth += 1;
                }
                NodeKind::Leaf { bag } => {
                    if let Some(pos) = bag.iter().position(|e| e.point == point) {
                        bag[pos].count += 1;
                    } else {
                        bag.push(LeafEntry {
                            point: point.clone(),
                            count: 1,
                        });
                    }
                    break;
                }
            }
        }

        let leaf = &self.nodes[idx];
        let distinct = match &leaf.kind {
            NodeKind::Leaf { bag } => bag.len(),
            NodeKind::Internal { .. } => 0,
        };
        if distinct > 1 && leaf.mass > self.config.min_leaf_size && depth < self.config.max_depth {
            let (arena_len, free) = (self.nodes.len(), self.free.clone());
            if let Err(err) = self.regrow(idx, depth, rng) {
                // grow only touches new or recycled slots
                self.nodes.truncate(arena_len);
                self.free = free;
                self.delete(&point)?;
                return Err(err);
            }
        }
        Ok(())
    }

    /// Remove one reference to `point`; `false` if it is not in the tree
    pub fn delete(&mut self, point: &[f64]) -> Result<bool> {
        self.check_dimensions(point)?;
        let Some(mut idx) = self.root else {
            return Ok(false);
        };
        while let NodeKind::Internal { cut, left, right } = &self.nodes[idx].kind {
            idx = if cut.goes_left(point) { *left } else { *right };
        }

        let emptied = match &mut self.nodes[idx].kind {
            NodeKind::Leaf { bag } => {
                let Some(pos) = bag.iter().position(|e| e.point.as_slice() == point) else {
                    return Ok(false);
                };
                bag[pos].count -= 1;
                if bag[pos].count == 0 {
                    bag.remove(pos);
                }
                bag.is_empty()
            }
            NodeKind::Internal { .. } => return Ok(false),
        };

        let mut cursor = Some(idx);
        while let Some(i) = cursor {
            self.nodes[i].mass -= 1;
            cursor = self.nodes[i].parent;
        }

        let refresh_from = if emptied { self.collapse(idx)? } else { Some(idx) };
        self.refresh_boxes(refresh_from);
        Ok(true)
    }

    /// Check arena links, masses and boxes
    ///
    /// Every box is shape-checked before it takes part in box arithmetic,
    /// so arbitrary decoded trees are rejected without panicking.
    pub fn validate(&self) -> Result<()> {
        let mut released = vec![false; self.nodes.len()];
        for &idx in &self.free {
            match released.get_mut(idx) {
                Some(slot) if !*slot => *slot = true,
                _ => return Err(RcfError::invalid_state(format!("free slot {idx} is invalid"))),
            }
        }

        let Some(root) = self.root else {
            return Ok(());
        };
        if self.nodes.get(root).map(|n| n.parent.is_some()).unwrap_or(true) {
            return Err(RcfError::invalid_state("root index is invalid"));
        }

        let mut visited = vec![false; self.nodes.len()];
        let mut stack = vec![(root, 0usize)];
        while let Some((idx, depth)) = stack.pop() {
            if visited[idx] || depth > self.config.max_depth {
                return Err(RcfError::invalid_state(format!("node {idx} is reachable twice")));
            }
            if released[idx] {
                return Err(RcfError::invalid_state(format!("node {idx} is on the free list")));
            }
            visited[idx] = true;

            let node = &self.nodes[idx];
            if !node.bbox.is_well_formed(self.dimensions) {
                return Err(RcfError::invalid_state(format!("node {idx} has a malformed box")));
            }
            match &node.kind {
                NodeKind::Internal { cut, left, right } => {
                    let (l, r) = (*left, *right);
                    let (Some(ln), Some(rn)) = (self.nodes.get(l), self.nodes.get(r)) else {
                        return Err(RcfError::invalid_state(format!("node {idx} has a dangling child")));
                    };
                    if cut.dimension >= self.dimensions {
                        return Err(RcfError::invalid_state(format!("node {idx} cuts a missing dimension")));
                    }
                    if ln.parent != Some(idx) || rn.parent != Some(idx) {
                        return Err(RcfError::invalid_state(format!("node {idx} has mislinked children")));
                    }
                    if !ln.bbox.is_well_formed(self.dimensions) || !rn.bbox.is_well_formed(self.dimensions) {
                        return Err(RcfError::invalid_state(format!("node {idx} has a malformed child box")));
                    }
                    if node.mass != ln.mass + rn.mass {
                        return Err(RcfError::invalid_state(format!("node {idx} mass mismatch")));
                    }
                    if node.bbox != ln.bbox.union(&rn.bbox) {
                        return Err(RcfError::invalid_state(format!("node {idx} box mismatch")));
                    }
                    stack.push((l, depth + 1));
                    stack.push((r, depth + 1));
                }
                NodeKind::Leaf { bag } => {
                    if bag.is_empty() || bag.iter().any(|e| e.count == 0 || e.point.len() != self.dimensions) {
                        return Err(RcfError::invalid_state(format!("leaf {idx} has an invalid entry")));
                    }
                    if node.mass != bag.iter().map(|e| e.count).sum::<usize>() {
                        return Err(RcfError::invalid_state(format!("leaf {idx} mass mismatch")));
                    }
                    if bag_box(bag).as_ref() != Some(&node.bbox) {
                        return Err(RcfError::invalid_state(format!("leaf {idx} box mismatch")));
                    }
                }
            }
        }
        if self.mass() > self.config.capacity {
            return Err(RcfError::invalid_state("tree exceeds its capacity"));
        }
        Ok(())
    }

    fn check_dimensions(&self, point: &[f64]) -> Result<()> {
        if point.len() != self.dimensions {
            return Err(RcfError::invalid_argument(format!(
                "Point has {} dimensions, expected {}",
                point.len(),
                self.dimensions
            )));
        }
        Ok(())
    }

    fn alloc(&mut self, node: Node) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = node;
                idx
            }
            None => {
                self.nodes.push(node);
                self.nodes.len() - 1
            }
        }
    }

    fn grow<R: Rng + ?Sized>(
        &mut self,
        points: Vec<Point>,
        depth: usize,
        parent: Option<usize>,
        rng: &mut R,
    ) -> Result<usize> {
        let bbox = BoundingBox::from_points(points.iter().map(Vec::as_slice))
            .ok_or_else(|| RcfError::invalid_state("cannot grow a node without points"))?;
        let mass = points.len();
        let splittable = mass > self.config.min_leaf_size && depth < self.config.max_depth;

        let cut = if splittable { bbox.random_cut(rng) } else { None };
        let Some(cut) = cut else {
            let bag = bag_of(points);
            if splittable && bag.len() > 1 {
                return Err(RcfError::invalid_state(format!(
                    "no coordinate can split {} distinct points at depth {depth}",
                    bag.len()
                )));
            }
            return Ok(self.alloc(Node {
                bbox,
                mass,
                parent,
                kind: NodeKind::Leaf { bag },
            }));
        };

        let (left_points, right_points): (Vec<Point>, Vec<Point>) =
            points.into_iter().partition(|p| cut.goes_left(p));
        let idx = self.alloc(Node {
            bbox,
            mass,
            parent,
            kind: NodeKind::Leaf { bag: Vec::new() },
        });
        let left = self.grow(left_points, depth + 1, Some(idx), rng)?;
        let right = self.grow(right_points, depth + 1, Some(idx), rng)?;
        self.nodes[idx].kind = NodeKind::Internal { cut, left, right };
        Ok(idx)
    }

    fn regrow<R: Rng + ?Sized>(&mut self, idx: usize, depth: usize, rng: &mut R) -> Result<()> {
        let parent = self.nodes[idx].parent;
        let points = match &self.nodes[idx].kind {
            NodeKind::Leaf { bag } => bag
                .iter()
                .flat_map(|e| std::iter::repeat(e.point.clone()).take(e.count))
                .collect(),
            NodeKind::Internal { .. } => return Ok(()),
        };
        let replacement = self.grow(points, depth, parent, rng)?;
        self.free.push(idx);
        self.replace_child(parent, idx, replacement);
        trace!(leaf = idx, replacement, depth, "re-partitioned leaf");
        Ok(())
    }

    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: usize) {
        match parent {
            None => self.root = Some(new),
            Some(p) => {
                if let NodeKind::Internal { left, right, .. } = &mut self.nodes[p].kind {
                    if *left == old {
                        *left = new;
                    } else if *right == old {
                        *right = new;
                    }
                }
            }
        }
    }

    /// Drop an emptied leaf, lifting its sibling into the parent's slot.
    /// Returns the node whose box needs refreshing first.
    fn collapse(&mut self, leaf: usize) -> Result<Option<usize>> {
        let parent = self.nodes[leaf].parent;
        self.free.push(leaf);
        let Some(p) = parent else {
            self.root = None;
            return Ok(None);
        };

        let sibling = match &self.nodes[p].kind {
            NodeKind::Internal { left, right, .. } => {
                if *left == leaf {
                    *right
                } else {
                    *left
                }
            }
            NodeKind::Leaf { .. } => {
                return Err(RcfError::invalid_state(format!("parent {p} of leaf {leaf} is a leaf")));
            }
        };

        let mut lifted = self.nodes[sibling].clone();
        lifted.parent = self.nodes[p].parent;
        if let NodeKind::Internal { left, right, .. } = &lifted.kind {
            let (l, r) = (*left, *right);
            self.nodes[l].parent = Some(p);
            self.nodes[r].parent = Some(p);
        }
        self.nodes[p] = lifted;
        self.free.push(sibling);
        Ok(Some(p))
    }

    fn refresh_boxes(&mut self, start: Option<usize>) {
        let mut cursor = start;
        while let Some(idx) = cursor {
            let refreshed = match &self.nodes[idx].kind {
                NodeKind::Leaf { bag } => bag_box(bag),
                NodeKind::Internal { left, right, .. } => {
                    Some(self.nodes[*left].bbox.union(&self.nodes[*right].bbox))
                }
            };
            if let Some(bbox) = refreshed {
                self.nodes[idx].bbox = bbox;
            }
            cursor = self.nodes[idx].parent;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deterministic::seeded_rng;

    fn grid(n: usize) -> Vec<Point> {
        (0..n).map(|i| vec![(i % 10) as f64, (i / 10) as f64]).collect()
    }

    fn config(capacity: usize) -> TreeConfig {
        TreeConfig {
            capacity,
            ..TreeConfig::default()
        }
    }

    #[test]
    fn test_build_holds_every_point() {
        let sample = grid(50);
        let tree = RandomTree::build(sample.clone(), config(64), &mut seeded_rng(1)).unwrap();

        assert_eq!(tree.mass(), 50);
        assert!(tree.validate().is_ok());
        let mut points = tree.points();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut expected = sample;
        expected.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(points, expected);
    }

    #[test]
    fn test_build_is_deterministic() {
        let t1 = RandomTree::build(grid(40), config(64), &mut seeded_rng(9)).unwrap();
        let t2 = RandomTree::build(grid(40), config(64), &mut seeded_rng(9)).unwrap();
        assert_eq!(t1, t2);
    }

    #[test]
    fn test_identical_points_make_single_leaf() {
        let sample = vec![vec![2.0, 2.0]; 8];
        let tree = RandomTree::build(sample, config(8), &mut seeded_rng(1)).unwrap();
        assert_eq!(tree.node_count(), 1);
        assert_eq!(tree.mass(), 8);
        assert_eq!(tree.score(&[2.0, 2.0]).unwrap(), 0.0);
        assert!(tree.score(&[3.0, 2.0]).unwrap() > 0.0);
    }

    #[test]
    fn test_unsplittable_distinct_points_fail() {
        let sample = vec![vec![f64::NEG_INFINITY], vec![f64::INFINITY]];
        let err = RandomTree::build(sample, config(2), &mut seeded_rng(1)).unwrap_err();
        assert!(matches!(err, RcfError::InvalidModelState(_)));
    }

    #[test]
    fn test_max_depth_bounds_tree() {
        let cfg = TreeConfig {
            capacity: 100,
            max_depth: 2,
            min_leaf_size: 1,
        };
        let tree = RandomTree::build(grid(100), cfg, &mut seeded_rng(5)).unwrap();
        for point in grid(100) {
            assert!(tree.leaf_depth(&point).unwrap() <= 2);
        }
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_outlier_scores_higher_than_member() {
        let tree = RandomTree::build(grid(100), config(100), &mut seeded_rng(3)).unwrap();
        let member = tree.score(&[4.0, 4.0]).unwrap();
        let outlier = tree.score(&[500.0, 4.0]).unwrap();
        assert_eq!(member, 0.0);
        assert!(outlier > 0.9, "outlier = {outlier}");
    }

    #[test]
    fn test_insert_then_delete_restores_mass() {
        let mut rng = seeded_rng(11);
        let mut tree = RandomTree::build(grid(20), config(32), &mut rng).unwrap();

        tree.insert(vec![100.0, 100.0], &mut rng).unwrap();
        tree.insert(vec![3.0, 1.0], &mut rng).unwrap();
        assert_eq!(tree.mass(), 22);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.score(&[100.0, 100.0]).unwrap(), 0.0);

        assert!(tree.delete(&[100.0, 100.0]).unwrap());
        assert!(tree.delete(&[3.0, 1.0]).unwrap());
        assert_eq!(tree.mass(), 20);
        assert!(tree.validate().is_ok());
        assert_eq!(tree.bounding_box().unwrap().max(), &[9.0, 1.0]);
    }

    #[test]
    fn test_delete_missing_point() {
        let mut tree = RandomTree::build(grid(10), config(16), &mut seeded_rng(2)).unwrap();
        assert!(!tree.delete(&[42.0, 42.0]).unwrap());
        assert_eq!(tree.mass(), 10);
    }

    #[test]
    fn test_delete_everything_empties_tree() {
        let sample = grid(12);
        let mut tree = RandomTree::build(sample.clone(), config(16), &mut seeded_rng(4)).unwrap();
        for point in &sample {
            assert!(tree.delete(point).unwrap());
            assert!(tree.validate().is_ok());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn test_insert_into_empty_tree() {
        let mut rng = seeded_rng(6);
        let mut tree = RandomTree::new(2, config(4));
        for point in grid(4) {
            tree.insert(point, &mut rng).unwrap();
        }
        assert_eq!(tree.mass(), 4);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn test_insert_respects_capacity() {
        let mut rng = seeded_rng(8);
        let mut tree = RandomTree::build(grid(4), config(4), &mut rng).unwrap();
        let err = tree.insert(vec![1.0, 1.0], &mut rng).unwrap_err();
        assert!(matches!(err, RcfError::InvalidModelState(_)));
    }

    #[test]
    fn test_failed_insert_leaves_tree_unchanged() {
        let mut rng = seeded_rng(12);
        let mut tree = RandomTree::build(vec![vec![f64::NEG_INFINITY]], config(4), &mut rng).unwrap();
        let before = tree.clone();

        let err = tree.insert(vec![f64::INFINITY], &mut rng).unwrap_err();
        assert!(matches!(err, RcfError::InvalidModelState(_)));
        assert_eq!(tree.mass(), 1);
        assert!(tree.validate().is_ok());
        assert_eq!(tree, before);
    }

    #[test]
    fn test_validate_rejects_bad_free_list() {
        let mut tree = RandomTree::build(grid(8), config(8), &mut seeded_rng(3)).unwrap();
        let root = tree.root.unwrap();
        tree.free.push(root);
        assert!(matches!(tree.validate().unwrap_err(), RcfError::InvalidModelState(_)));

        tree.free = vec![tree.nodes.len() + 5];
        assert!(matches!(tree.validate().unwrap_err(), RcfError::InvalidModelState(_)));
    }

    #[test]
    fn test_validate_rejects_short_child_box() {
        let mut tree = RandomTree::build(grid(8), config(8), &mut seeded_rng(3)).unwrap();
        let root = tree.root.unwrap();
        let NodeKind::Internal { left, .. } = tree.nodes[root].kind else {
            panic!("grid root should be internal");
        };
        tree.nodes[left].bbox = BoundingBox::from_point(&[0.0]);
        assert!(matches!(tree.validate().unwrap_err(), RcfError::InvalidModelState(_)));
    }

    #[test]
    fn test_dimension_mismatch() {
        let tree = RandomTree::build(grid(4), config(4), &mut seeded_rng(1)).unwrap();
        assert!(matches!(
            tree.score(&[1.0]).unwrap_err(),
            RcfError::InvalidArgument(_)
        ));
    }
}
