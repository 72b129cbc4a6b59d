//! edges of the spanner, one edge for each well separated pair

use indexmap::IndexSet;
use num_traits::float::Float;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use std::fmt::Debug;

use crate::point::{PointId, PointSet};
use crate::wspd::{SplitTree, Wspd};

/// an edge of the spanner. src < dst, dist is the Euclidean distance between them
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    src: PointId,
    dst: PointId,
    dist: f64,
}

impl Edge {
    /// edge between u and v of length dist, ends are stored in increasing order
    pub fn new(u: PointId, v: PointId, dist: f64) -> Self {
        Edge {
            src: u.min(v),
            dst: u.max(v),
            dist,
        }
    }

    pub fn get_src(&self) -> PointId {
        self.src
    }

    pub fn get_dst(&self) -> PointId {
        self.dst
    }

    pub fn get_dist(&self) -> f64 {
        self.dist
    }
}

/// For each pair of the decomposition, joins the representatives (smallest point id)
/// of both nodes.
/// Duplicated edges are dropped, first occurrence is kept.
/// Coincident points (gathered in one leaf) are joined to their leaf representative
/// by a zero length edge.
pub fn build_edges<T>(
    set: &PointSet<T>,
    tree: &SplitTree,
    wspd: &Wspd,
    parallel: bool,
) -> Vec<Edge>
where
    T: Float + Debug + Sync,
{
    let mut keys = IndexSet::<(PointId, PointId)>::with_capacity(wspd.get_nb_pairs());
    for pair in wspd.get_pairs() {
        let a = tree.get_node(pair.get_first()).get_representative();
        let b = tree.get_node(pair.get_second()).get_representative();
        if a != b {
            keys.insert((a.min(b), a.max(b)));
        }
    }
    let nb_from_pairs = keys.len();
    if tree.get_nb_multi_leaves() > 0 {
        for leaf in tree.leaves() {
            let rep = tree.get_node(leaf).get_representative();
            for p in tree.get_points(leaf) {
                if *p != rep {
                    keys.insert((rep.min(*p), rep.max(*p)));
                }
            }
        }
    }
    log::debug!(
        "nb pairs : {}, nb distinct edges : {}, edges between coincident points : {}",
        wspd.get_nb_pairs(),
        nb_from_pairs,
        keys.len() - nb_from_pairs
    );
    let keys: Vec<(PointId, PointId)> = keys.into_iter().collect();
    let to_edge = |(src, dst): &(PointId, PointId)| Edge::new(*src, *dst, set.dist(*src, *dst));
    if parallel {
        keys.par_iter().map(to_edge).collect()
    } else {
        keys.iter().map(to_edge).collect()
    }
} // end of build_edges

/// log quantiles of edge lengths
pub(crate) fn log_edge_quantiles(edges: &[Edge]) {
    if edges.is_empty() || !log::log_enabled!(log::Level::Info) {
        return;
    }
    let mut ckms = quantiles::ckms::CKMS::<f64>::new(0.001);
    for e in edges {
        ckms.insert(e.get_dist());
    }
    let q = |f: f64| ckms.query(f).map_or(f64::NAN, |(_, v)| v);
    log::info!(
        "edge length quantiles at 0.05 : {:.2e} , 0.25 : {:.2e}, 0.5 : {:.2e}, \
         0.75 : {:.2e}, 0.95 : {:.2e}, max : {:.2e}",
        q(0.05),
        q(0.25),
        q(0.5),
        q(0.75),
        q(0.95),
        q(1.)
    );
}

//========================================================
