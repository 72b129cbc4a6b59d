//! Well separated pair decomposition of a fair split tree (Callahan Kosaraju).
//!
//! Two nodes u and v are well separated for ratio s if
//! $$ d(box(u), box(v)) \geq s \cdot \max(r(u), r(v)) $$
//! where d is the minimum distance between boxes and r the half diagonal of a box.
//!
//! For each internal node we search pairs between its two children. A candidate pair which is not
//! well separated is refined by splitting the node with larger radius.

use super::tree::{NodeId, SplitTree};
use crate::error::SpannerError;

/// a pair of nodes, stored with first < second
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WsPair {
    first: NodeId,
    second: NodeId,
}

impl WsPair {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            WsPair {
                first: u,
                second: v,
            }
        } else {
            WsPair {
                first: v,
                second: u,
            }
        }
    }

    pub fn get_first(&self) -> NodeId {
        self.first
    }

    pub fn get_second(&self) -> NodeId {
        self.second
    }
}

//==============================

/// The decomposition, a list of well separated pairs. Each pair of points lying in distinct leaves
/// is covered by exactly one pair.
#[derive(Debug, Clone)]
pub struct Wspd {
    separation: f64,
    pairs: Vec<WsPair>,
}

impl Wspd {
    /// decomposes tree with separation ratio s > 4.
    /// If parallel is set, independent subtrees are processed with rayon,
    /// pairs come out in the same order.
    pub fn new(tree: &SplitTree, separation: f64, parallel: bool) -> Result<Self, SpannerError> {
        if !separation.is_finite() || separation <= 4. {
            return Err(SpannerError::InvalidConfig(format!(
                "separation ratio {} must be finite and > 4",
                separation
            )));
        }
        let mut wspd = Wspd {
            separation,
            pairs: Vec::new(),
        };
        if tree.get_nb_nodes() == 0 {
            return Ok(wspd);
        }
        if parallel {
            let spawn_depth = get_spawn_depth();
            log::debug!("parallel decomposition, spawn depth {}", spawn_depth);
            wspd.pairs = wspd.par_decompose(tree, tree.get_root(), spawn_depth);
        } else {
            let mut pairs = Vec::<WsPair>::new();
            wspd.decompose(tree, tree.get_root(), &mut pairs);
            wspd.pairs = pairs;
        }
        log::info!(
            "wspd with separation {:.2}, nb pairs : {}",
            separation,
            wspd.pairs.len()
        );
        Ok(wspd)
    }

    pub fn get_separation(&self) -> f64 {
        self.separation
    }

    pub fn get_pairs(&self) -> &[WsPair] {
        &self.pairs
    }

    pub fn get_nb_pairs(&self) -> usize {
        self.pairs.len()
    }

    /// separation test
    pub fn well_separated(&self, tree: &SplitTree, u: NodeId, v: NodeId) -> bool {
        let (nu, nv) = (tree.get_node(u), tree.get_node(v));
        let r = nu.get_radius().max(nv.get_radius());
        nu.get_bbox().distance(nv.get_bbox()) >= self.separation * r
    }

    // the two candidate pairs obtained by splitting the node with larger radius (u on ties)
    fn refine(tree: &SplitTree, u: NodeId, v: NodeId) -> Option<[(NodeId, NodeId); 2]> {
        let (nu, nv) = (tree.get_node(u), tree.get_node(v));
        if nv.get_radius() > nu.get_radius() {
            let (l, r) = nv.get_children()?;
            Some([(u, l), (u, r)])
        } else {
            let (l, r) = nu.get_children()?;
            Some([(l, v), (r, v)])
        }
    }

    fn find_pairs(&self, tree: &SplitTree, u: NodeId, v: NodeId, pairs: &mut Vec<WsPair>) {
        if u == v && tree.get_node(u).is_leaf() {
            return;
        }
        if self.well_separated(tree, u, v) {
            pairs.push(WsPair::new(u, v));
            return;
        }
        match Wspd::refine(tree, u, v) {
            Some([a, b]) => {
                self.find_pairs(tree, a.0, a.1, pairs);
                self.find_pairs(tree, b.0, b.1, pairs);
            }
            None => log::error!("cannot refine pair ({}, {})", u, v),
        }
    }

    fn decompose(&self, tree: &SplitTree, n: NodeId, pairs: &mut Vec<WsPair>) {
        if let Some((l, r)) = tree.get_node(n).get_children() {
            self.find_pairs(tree, l, r, pairs);
            self.decompose(tree, l, pairs);
            self.decompose(tree, r, pairs);
        }
    }

    fn par_find_pairs(&self, tree: &SplitTree, u: NodeId, v: NodeId, depth: usize) -> Vec<WsPair> {
        if depth == 0 {
            let mut pairs = Vec::new();
            self.find_pairs(tree, u, v, &mut pairs);
            return pairs;
        }
        if u == v && tree.get_node(u).is_leaf() {
            return Vec::new();
        }
        if self.well_separated(tree, u, v) {
            return vec![WsPair::new(u, v)];
        }
        match Wspd::refine(tree, u, v) {
            Some([a, b]) => {
                let (mut pairs, right) = rayon::join(
                    || self.par_find_pairs(tree, a.0, a.1, depth - 1),
                    || self.par_find_pairs(tree, b.0, b.1, depth - 1),
                );
                pairs.extend(right);
                pairs
            }
            None => {
                log::error!("cannot refine pair ({}, {})", u, v);
                Vec::new()
            }
        }
    }

    fn par_decompose(&self, tree: &SplitTree, n: NodeId, depth: usize) -> Vec<WsPair> {
        if depth == 0 {
            let mut pairs = Vec::new();
            self.decompose(tree, n, &mut pairs);
            return pairs;
        }
        match tree.get_node(n).get_children() {
            None => Vec::new(),
            Some((l, r)) => {
                let (mut pairs, (left, right)) = rayon::join(
                    || self.par_find_pairs(tree, l, r, depth - 1),
                    || {
                        rayon::join(
                            || self.par_decompose(tree, l, depth - 1),
                            || self.par_decompose(tree, r, depth - 1),
                        )
                    },
                );
                pairs.reserve(left.len() + right.len());
                pairs.extend(left);
                pairs.extend(right);
                pairs
            }
        }
    }
} // end of impl Wspd

// depth of recursion under which we spawn rayon tasks
fn get_spawn_depth() -> usize {
    let nb_cpus = num_cpus::get().max(1);
    (nb_cpus as f64).log2().ceil() as usize + 3
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;
    use crate::point::PointSet;

    use rand::distr::{Distribution, Uniform};
    use rand::prelude::*;
    use rand_xoshiro::Xoshiro256PlusPlus;

    fn log_init_test() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn random_set(nbvec: usize, dim: usize, seed: u64) -> PointSet<f64> {
        let unif = Uniform::<f64>::new(-10., 10.).unwrap();
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let data: Vec<Vec<f64>> = (0..nbvec)
            .map(|_| (0..dim).map(|_| unif.sample(&mut rng)).collect())
            .collect();
        PointSet::from_vecs(dim, &data).unwrap()
    }

    #[test]
    fn pairs_cover_once() {
        log_init_test();
        let set = random_set(80, 2, 1234_u64);
        let tree = SplitTree::new(&set);
        let wspd = Wspd::new(&tree, 6., false).unwrap();
        let n = set.get_nb_points();
        let mut count = vec![0usize; n * n];
        for pair in wspd.get_pairs() {
            assert!(pair.get_first() < pair.get_second());
            assert!(wspd.well_separated(&tree, pair.get_first(), pair.get_second()));
            for p in tree.get_points(pair.get_first()) {
                for q in tree.get_points(pair.get_second()) {
                    count[p * n + q] += 1;
                    count[q * n + p] += 1;
                }
            }
        }
        for p in 0..n {
            assert_eq!(count[p * n + p], 0);
            for q in (p + 1)..n {
                assert_eq!(count[p * n + q], 1, "points {} {}", p, q);
            }
        }
    }

    #[test]
    fn parallel_same_order() {
        log_init_test();
        let set = random_set(3000, 3, 98765_u64);
        let tree = SplitTree::new(&set);
        let seq = Wspd::new(&tree, 8., false).unwrap();
        let par = Wspd::new(&tree, 8., true).unwrap();
        assert_eq!(seq.get_pairs(), par.get_pairs());
        let unique: std::collections::HashSet<WsPair> = seq.get_pairs().iter().copied().collect();
        assert_eq!(unique.len(), seq.get_nb_pairs());
    }

    #[test]
    fn separation_checked() {
        let set = random_set(10, 2, 1_u64);
        let tree = SplitTree::new(&set);
        assert!(matches!(
            Wspd::new(&tree, 4., false),
            Err(SpannerError::InvalidConfig(_))
        ));
        assert!(matches!(
            Wspd::new(&tree, 2., true),
            Err(SpannerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn pairs_grow_with_separation() {
        log_init_test();
        let set = random_set(500, 2, 777_u64);
        let tree = SplitTree::new(&set);
        let small = Wspd::new(&tree, 5., false).unwrap();
        let large = Wspd::new(&tree, 20., false).unwrap();
        log::info!(
            "nb pairs s=5 : {}, s=20 : {}",
            small.get_nb_pairs(),
            large.get_nb_pairs()
        );
        assert!(small.get_nb_pairs() <= large.get_nb_pairs());
    }
}
