//! Clusters are connected components of the spanner once long edges are cut,
//! or groups of split tree nodes heading the well separated pairs (see [heads]).
//!
//! Cluster ids are dense, assigned in order of first appearance when scanning points
//! by increasing id.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::spanner::Edge;

pub mod cut;
pub mod heads;
pub mod unionfind;

pub use cut::CutPolicy;
pub use heads::pair_heads;
pub use unionfind::UnionFind;

/// cluster affectation of points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clustering {
    // cluster id of each point
    membership: Vec<usize>,
    nb_clusters: usize,
    // edges longer than this were removed
    threshold: Option<f64>,
}

impl Clustering {
    pub fn get_membership(&self) -> &[usize] {
        &self.membership
    }

    pub fn get_nb_clusters(&self) -> usize {
        self.nb_clusters
    }

    pub fn get_threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// number of points in each cluster
    pub fn get_cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0usize; self.nb_clusters];
        for c in &self.membership {
            sizes[*c] += 1;
        }
        sizes
    }
} // end of impl Clustering

/// sort edges by length, ties broken by (src, dst)
pub fn sort_edges(edges: &[Edge], parallel: bool) -> Vec<Edge> {
    let mut sorted = edges.to_vec();
    let cmp = |a: &Edge, b: &Edge| {
        a.get_dist()
            .total_cmp(&b.get_dist())
            .then(a.get_src().cmp(&b.get_src()))
            .then(a.get_dst().cmp(&b.get_dst()))
    };
    if parallel {
        sorted.par_sort_unstable_by(cmp);
    } else {
        sorted.sort_unstable_by(cmp);
    }
    sorted
}

/// clusters of nb_points points joined by edges, after removal of edges given by policy.
/// [CutPolicy::PairHeads] needs the decomposition and is handled as [CutPolicy::Connectivity] here.
pub fn extract_clusters(
    edges: &[Edge],
    nb_points: usize,
    policy: &CutPolicy,
    parallel: bool,
) -> Clustering {
    let threshold = match policy {
        CutPolicy::Connectivity => None,
        CutPolicy::PairHeads => {
            log::warn!("pair heads clustering needs the decomposition, using connectivity");
            None
        }
        CutPolicy::Threshold(d) => Some(*d),
        _ => policy.get_threshold(&sort_edges(edges, parallel), nb_points),
    };
    log::debug!("cut policy {:?}, threshold {:?}", policy, threshold);
    //
    let mut uf = UnionFind::new(nb_points);
    let mut nb_cut = 0;
    for e in edges {
        if threshold.is_none_or(|t| e.get_dist() <= t) {
            uf.union(e.get_src(), e.get_dst());
        } else {
            nb_cut += 1;
        }
    }
    let (membership, nb_clusters) = dense_ids((0..nb_points).map(|p| uf.find(p)), nb_points);
    log::info!(
        "nb edges cut : {}, nb clusters : {}",
        nb_cut,
        nb_clusters
    );
    Clustering {
        membership,
        nb_clusters,
        threshold,
    }
} // end of extract_clusters

// renumbers set roots (each < nb_sets) given in point order by order of discovery
pub(crate) fn dense_ids<I>(roots: I, nb_sets: usize) -> (Vec<usize>, usize)
where
    I: Iterator<Item = usize>,
{
    let mut root_to_cluster = vec![usize::MAX; nb_sets];
    let mut membership = Vec::<usize>::with_capacity(roots.size_hint().0);
    let mut nb_clusters = 0;
    for root in roots {
        if root_to_cluster[root] == usize::MAX {
            root_to_cluster[root] = nb_clusters;
            nb_clusters += 1;
        }
        membership.push(root_to_cluster[root]);
    }
    (membership, nb_clusters)
}

//========================================================

#[cfg(test)]
mod tests {

    use super::*;

    fn edge(src: usize, dst: usize, dist: f64) -> Edge {
        Edge::new(src, dst, dist)
    }

    // two tight groups {0,2,4} {1,3} and an isolated far point 5
    fn two_groups() -> Vec<Edge> {
        vec![
            edge(0, 2, 0.1),
            edge(2, 4, 0.2),
            edge(1, 3, 0.15),
            edge(0, 1, 7.),
            edge(3, 4, 6.),
            edge(4, 5, 5.5),
        ]
    }

    #[test]
    fn relative_gap_groups() {
        let clustering = extract_clusters(&two_groups(), 6, &CutPolicy::default(), false);
        assert_eq!(clustering.get_nb_clusters(), 3);
        assert_eq!(clustering.get_membership(), &[0, 1, 0, 1, 0, 2]);
        assert_eq!(clustering.get_threshold(), Some(0.2));
        assert_eq!(clustering.get_cluster_sizes(), vec![3, 2, 1]);
    }

    #[test]
    fn other_policies() {
        let edges = two_groups();
        let clustering = extract_clusters(&edges, 6, &CutPolicy::Connectivity, false);
        assert_eq!(clustering.get_nb_clusters(), 1);
        assert!(clustering.get_membership().iter().all(|c| *c == 0));
        //
        let clustering = extract_clusters(&edges, 6, &CutPolicy::Threshold(5.8), true);
        assert_eq!(clustering.get_membership(), &[0, 1, 0, 1, 0, 0]);
        // 3 shortest edges kept
        let clustering = extract_clusters(&edges, 6, &CutPolicy::Percentile(0.4), false);
        assert_eq!(clustering.get_threshold(), Some(0.2));
        assert_eq!(clustering.get_nb_clusters(), 3);
    }

    #[test]
    fn pair_heads_without_decomposition() {
        let clustering = extract_clusters(&two_groups(), 6, &CutPolicy::PairHeads, false);
        assert_eq!(clustering.get_nb_clusters(), 1);
        assert_eq!(clustering.get_threshold(), None);
    }

    #[test]
    fn dense_renumbering() {
        let (membership, nb) = dense_ids([7, 2, 7, 5, 2].into_iter(), 8);
        assert_eq!(membership, vec![0, 1, 0, 2, 1]);
        assert_eq!(nb, 3);
    }

    #[test]
    fn no_edges() {
        let clustering = extract_clusters(&[], 3, &CutPolicy::default(), false);
        assert_eq!(clustering.get_membership(), &[0, 1, 2]);
        assert_eq!(clustering.get_threshold(), None);
    }

    #[test]
    fn sorting_ties() {
        let edges = vec![edge(3, 4, 1.), edge(0, 2, 1.), edge(0, 1, 1.), edge(1, 2, 0.5)];
        let sorted = sort_edges(&edges, true);
        let keys: Vec<(usize, usize)> = sorted.iter().map(|e| (e.get_src(), e.get_dst())).collect();
        assert_eq!(keys, vec![(1, 2), (0, 1), (0, 2), (3, 4)]);
        assert_eq!(sorted, sort_edges(&edges, false));
    }
}
