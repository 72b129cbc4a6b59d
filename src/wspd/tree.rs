//! Fair split tree.
//!
//! Each node owns the tight bounding box of its points. An internal node splits its box at the
//! middle of its longest side, points strictly below the split value go left, the others go right.
//! As the box is tight both sides are non empty so the recursion ends with one point per leaf,
//! except for coincident points which are kept together in one leaf.
//!
//! Nodes are stored in an arena (a Vec) and addressed by their rank.
//! Points of a node are a contiguous range of a reordered array of point ids.

use num_traits::float::Float;

use std::fmt::Debug;

use crate::point::{PointId, PointSet};

/// node identifier, rank in the tree arena
pub type NodeId = usize;

/// per axis minimum and maximum of a set of points
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    low: Vec<f64>,
    upper: Vec<f64>,
}

impl BoundingBox {
    /// tight box around points ids. ids must not be empty
    pub(crate) fn from_points<T: Float + Debug>(set: &PointSet<T>, ids: &[PointId]) -> Self {
        let dim = set.get_dim();
        let mut low = vec![f64::INFINITY; dim];
        let mut upper = vec![f64::NEG_INFINITY; dim];
        for id in ids {
            for (d, x) in set.get_coords(*id).iter().enumerate() {
                low[d] = low[d].min(*x);
                upper[d] = upper[d].max(*x);
            }
        }
        BoundingBox { low, upper }
    }

    pub fn get_low(&self) -> &[f64] {
        &self.low
    }

    pub fn get_upper(&self) -> &[f64] {
        &self.upper
    }

    /// returns axis of largest extent (lowest axis on ties) and this extent
    pub fn get_max_extent(&self) -> (usize, f64) {
        let mut axis = 0;
        let mut extent = self.upper[0] - self.low[0];
        for d in 1..self.low.len() {
            let e = self.upper[d] - self.low[d];
            if e > extent {
                axis = d;
                extent = e;
            }
        }
        (axis, extent)
    }

    /// half of the diagonal
    pub fn get_radius(&self) -> f64 {
        self.low
            .iter()
            .zip(self.upper.iter())
            .fold(0., |acc, (l, u)| acc + (u - l) * (u - l))
            .sqrt()
            / 2.
    }

    /// minimum distance between a point of self and a point of other. 0 if boxes intersect
    pub fn distance(&self, other: &BoundingBox) -> f64 {
        let mut dist2 = 0.;
        for d in 0..self.low.len() {
            let gap = (other.low[d] - self.upper[d])
                .max(self.low[d] - other.upper[d])
                .max(0.);
            dist2 += gap * gap;
        }
        dist2.sqrt()
    }

    /// smallest box containing self and other
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let low = self
            .low
            .iter()
            .zip(other.low.iter())
            .map(|(a, b)| a.min(*b))
            .collect();
        let upper = self
            .upper
            .iter()
            .zip(other.upper.iter())
            .map(|(a, b)| a.max(*b))
            .collect();
        BoundingBox { low, upper }
    }
} // end of impl BoundingBox

//===================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NodeKind {
    /// one point or a group of coincident points
    Leaf,
    Internal {
        axis: usize,
        split: f64,
        left: NodeId,
        right: NodeId,
    },
}

#[derive(Debug, Clone)]
pub struct Node {
    bbox: BoundingBox,
    radius: f64,
    // range of points in SplitTree::order
    start: usize,
    end: usize,
    // smallest point id in subtree
    representative: PointId,
    kind: NodeKind,
}

impl Node {
    pub fn get_bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// half diagonal of box, 0 for a leaf
    pub fn get_radius(&self) -> f64 {
        self.radius
    }

    /// smallest point id in the subtree
    pub fn get_representative(&self) -> PointId {
        self.representative
    }

    pub fn get_kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_leaf(&self) -> bool {
        self.kind == NodeKind::Leaf
    }

    /// number of points in subtree
    pub fn get_size(&self) -> usize {
        self.end - self.start
    }

    pub fn get_children(&self) -> Option<(NodeId, NodeId)> {
        match self.kind {
            NodeKind::Leaf => None,
            NodeKind::Internal { left, right, .. } => Some((left, right)),
        }
    }
} // end of impl Node

//===================================

/// The fair split tree of a point set
#[derive(Debug, Clone)]
pub struct SplitTree {
    nodes: Vec<Node>,
    // point ids reordered so that each node has a contiguous range
    order: Vec<PointId>,
    // leaves holding more than one (coincident) point
    nb_multi_leaves: usize,
}

impl SplitTree {
    /// builds the tree of a validated point set
    pub fn new<T: Float + Debug>(set: &PointSet<T>) -> Self {
        let nb_points = set.get_nb_points();
        let mut tree = SplitTree {
            nodes: Vec::with_capacity(2 * nb_points),
            order: (0..nb_points).collect(),
            nb_multi_leaves: 0,
        };
        if nb_points > 0 {
            tree.build_node(set, 0, nb_points);
        }
        log::debug!(
            "split tree : nb points {}, nb nodes {}, depth {}",
            nb_points,
            tree.nodes.len(),
            tree.get_depth()
        );
        tree
    }

    // builds node for points in order[start..end], returns its id. Root gets id 0.
    fn build_node<T: Float + Debug>(
        &mut self,
        set: &PointSet<T>,
        start: usize,
        end: usize,
    ) -> NodeId {
        let bbox = BoundingBox::from_points(set, &self.order[start..end]);
        let (axis, extent) = bbox.get_max_extent();
        let id = self.nodes.len();
        if end - start <= 1 || extent <= 0. {
            return self.push_leaf(bbox, 0., start, end);
        }
        let low = bbox.get_low()[axis];
        let upper = bbox.get_upper()[axis];
        // halves first, low + extent / 2. overflows when the extent exceeds f64::MAX
        let mut split = low / 2. + upper / 2.;
        // rounding may bring the middle back to low for tiny extents
        if split <= low {
            split = upper;
        }
        let nb_below = partition(&mut self.order[start..end], |p| set.get(p, axis) < split);
        let mid = start + nb_below;
        if mid == start || mid == end {
            log::error!(
                "node {} : empty side splitting {} points at {:.3e} on axis {}, kept as leaf",
                id,
                end - start,
                split,
                axis
            );
            let radius = bbox.get_radius();
            return self.push_leaf(bbox, radius, start, end);
        }
        //
        let radius = bbox.get_radius();
        self.nodes.push(Node {
            bbox,
            radius,
            start,
            end,
            representative: PointId::MAX,
            kind: NodeKind::Leaf,
        });
        let left = self.build_node(set, start, mid);
        let right = self.build_node(set, mid, end);
        let representative = self.nodes[left]
            .representative
            .min(self.nodes[right].representative);
        let node = &mut self.nodes[id];
        node.representative = representative;
        node.kind = NodeKind::Internal {
            axis,
            split,
            left,
            right,
        };
        id
    } // end of build_node

    fn push_leaf(&mut self, bbox: BoundingBox, radius: f64, start: usize, end: usize) -> NodeId {
        let id = self.nodes.len();
        let representative = self.order[start..end]
            .iter()
            .fold(PointId::MAX, |acc, p| acc.min(*p));
        if end - start > 1 {
            log::debug!("leaf {} gathers {} points", id, end - start);
            self.nb_multi_leaves += 1;
        }
        self.nodes.push(Node {
            bbox,
            radius,
            start,
            end,
            representative,
            kind: NodeKind::Leaf,
        });
        id
    }

    /// id of root node
    pub fn get_root(&self) -> NodeId {
        0
    }

    pub fn get_node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn get_nb_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// points in subtree of node id
    pub fn get_points(&self, id: NodeId) -> &[PointId] {
        let node = &self.nodes[id];
        &self.order[node.start..node.end]
    }

    /// iterator over ids of leaves
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, n)| n.is_leaf())
            .map(|(i, _)| i)
    }

    /// number of leaves gathering coincident points
    pub fn get_nb_multi_leaves(&self) -> usize {
        self.nb_multi_leaves
    }

    /// true if all points coincide, the root is then a leaf
    pub fn is_degenerate(&self) -> bool {
        self.nodes.first().is_some_and(|n| n.is_leaf() && n.get_size() > 1)
    }

    /// length of longest root to leaf path (0 for a single leaf)
    pub fn get_depth(&self) -> usize {
        if self.nodes.is_empty() {
            return 0;
        }
        let mut depth = 0;
        let mut stack = vec![(self.get_root(), 0usize)];
        while let Some((id, d)) = stack.pop() {
            depth = depth.max(d);
            if let Some((l, r)) = self.nodes[id].get_children() {
                stack.push((l, d + 1));
                stack.push((r, d + 1));
            }
        }
        depth
    }
} // end of impl SplitTree

// moves ids satisfying pred to the front, returns their number
fn partition<F>(ids: &mut [PointId], pred: F) -> usize
where
    F: Fn(PointId) -> bool,
{
    let mut nb_front = 0;
    for j in 0..ids.len() {
        if pred(ids[j]) {
            ids.swap(nb_front, j);
            nb_front += 1;
        }
    }
    nb_front
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    use rand::distr::{Distribution, Uniform};
    use rand::prelude::*;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_set(nbvec: usize, dim: usize, seed: u64) -> PointSet<f64> {
        let unif = Uniform::<f64>::new(0., 100.).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let data: Vec<Vec<f64>> = (0..nbvec)
            .map(|_| (0..dim).map(|_| unif.sample(&mut rng)).collect())
            .collect();
        PointSet::from_vecs(dim, &data).unwrap()
    }

    #[test]
    fn tree_invariants() {
        log_init_test();
        let set = random_set(2000, 3, 4567_u64);
        let tree = SplitTree::new(&set);
        assert!(tree.get_nb_nodes() < 2 * set.get_nb_points());
        // each point in exactly one leaf
        let mut seen = vec![0usize; set.get_nb_points()];
        for leaf in tree.leaves() {
            for p in tree.get_points(leaf) {
                seen[*p] += 1;
            }
        }
        assert!(seen.iter().all(|c| *c == 1));
        // boxes and representatives aggregate children
        for id in 0..tree.get_nb_nodes() {
            let node = tree.get_node(id);
            let min_id = tree.get_points(id).iter().min().copied().unwrap();
            assert_eq!(node.get_representative(), min_id);
            if let NodeKind::Internal {
                axis,
                split,
                left,
                right,
            } = node.get_kind()
            {
                let (l, r) = (tree.get_node(left), tree.get_node(right));
                assert_eq!(&l.get_bbox().union(r.get_bbox()), node.get_bbox());
                assert_eq!(l.get_size() + r.get_size(), node.get_size());
                assert!(tree.get_points(left).iter().all(|p| set.get(*p, axis) < split));
                assert!(tree.get_points(right).iter().all(|p| set.get(*p, axis) >= split));
            }
        }
        log::info!("depth : {}", tree.get_depth());
        assert!(tree.get_depth() < 60);
    }

    #[test]
    fn coincident_points() {
        log_init_test();
        let data = vec![vec![1f64, 2.], vec![1., 2.], vec![1., 2.]];
        let set = PointSet::from_vecs(2, &data).unwrap();
        let tree = SplitTree::new(&set);
        assert_eq!(tree.get_nb_nodes(), 1);
        assert!(tree.is_degenerate());
        assert_eq!(tree.get_node(0).get_radius(), 0.);
        //
        let data = vec![vec![0f64, 0.], vec![5., 5.], vec![0., 0.]];
        let set = PointSet::from_vecs(2, &data).unwrap();
        let tree = SplitTree::new(&set);
        assert!(!tree.is_degenerate());
        assert_eq!(tree.get_nb_multi_leaves(), 1);
        assert_eq!(tree.leaves().count(), 2);
    }

    #[test]
    fn box_distance() {
        let a = BoundingBox {
            low: vec![0., 0.],
            upper: vec![1., 1.],
        };
        let b = BoundingBox {
            low: vec![4., 5.],
            upper: vec![6., 6.],
        };
        assert_eq!(a.distance(&b), 5.);
        assert_eq!(b.distance(&a), 5.);
        assert_eq!(a.distance(&a.union(&b)), 0.);
        assert_eq!(b.get_radius(), 5f64.sqrt() / 2.);
        assert_eq!(b.get_max_extent(), (0, 2.));
    }

    #[test]
    fn tiny_extent() {
        let x = 1.0f64;
        let data = vec![vec![x], vec![f64::from_bits(x.to_bits() + 1)]];
        let set = PointSet::from_vecs(1, &data).unwrap();
        let tree = SplitTree::new(&set);
        assert_eq!(tree.leaves().count(), 2);
    }

    #[test]
    fn extent_beyond_max_float() {
        log_init_test();
        let data = vec![vec![-1.0e308f64], vec![1.0e308], vec![0.]];
        let set = PointSet::from_vecs(1, &data).unwrap();
        let tree = SplitTree::new(&set);
        assert_eq!(tree.leaves().count(), 3);
        assert_eq!(tree.get_nb_multi_leaves(), 0);
        match tree.get_node(tree.get_root()).get_kind() {
            NodeKind::Internal { split, left, .. } => {
                assert_eq!(split, 0.);
                assert_eq!(tree.get_points(left), &[0]);
            }
            NodeKind::Leaf => panic!("root should be split"),
        }
        // same in dimension 2 with the span on the second axis
        let data = vec![vec![1f64, f64::MAX], vec![2., -f64::MAX], vec![3., 0.]];
        let set = PointSet::from_vecs(2, &data).unwrap();
        let tree = SplitTree::new(&set);
        assert_eq!(tree.leaves().count(), 3);
    }
}
