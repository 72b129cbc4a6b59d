//! The spanner graph and its clustering, built once from a point set.

use cpu_time::ProcessTime;
use num_traits::float::Float;
use serde::{Deserialize, Serialize};

use std::fmt::Debug;
use std::time::SystemTime;

use super::edge::{Edge, build_edges, log_edge_quantiles};
use crate::cluster::{Clustering, CutPolicy, extract_clusters, pair_heads};
use crate::error::SpannerError;
use crate::params::SpannerParams;
use crate::point::PointSet;
use crate::wspd::{SplitTree, Wspd};

#[cfg_attr(doc, katexit::katexit)]
/// A geometric spanner of a point set and the clustering extracted from its edges.
///
/// For a separation ratio $s > 4$ the shortest path between two points through the edges is at most
/// $t = (s+4)/(s-4)$ times their Euclidean distance.
/// The structure is immutable, all fields are computed at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpannerGraph {
    separation: f64,
    nb_points: usize,
    edges: Vec<Edge>,
    clustering: Clustering,
}

impl SpannerGraph {
    /// builds the graph of points (each of dimension dim) with separation ratio (must be > 4),
    /// using default cut policy.
    pub fn new<T>(dim: usize, points: &[Vec<T>], separation: u32) -> Result<Self, SpannerError>
    where
        T: Float + Debug + Sync,
    {
        let params = SpannerParams::new(separation as f64)?;
        let set = PointSet::from_vecs(dim, points)?;
        SpannerGraph::with_params(&set, &params)
    }

    /// builds the graph of a point set
    pub fn with_params<T>(set: &PointSet<T>, params: &SpannerParams) -> Result<Self, SpannerError>
    where
        T: Float + Debug + Sync,
    {
        lazy_static::initialize(&crate::LOG);
        params.get_cut_policy().check()?;
        //
        let cpu_start = ProcessTime::now();
        let sys_now = SystemTime::now();
        //
        let tree = SplitTree::new(set);
        if tree.is_degenerate() {
            log::warn!(
                "all {} points coincide, they form one cluster joined by zero length edges",
                set.get_nb_points()
            );
        }
        let wspd = Wspd::new(&tree, params.get_separation(), params.is_parallel())?;
        let edges = build_edges(set, &tree, &wspd, params.is_parallel());
        log_edge_quantiles(&edges);
        //
        let clustering = match params.get_cut_policy() {
            CutPolicy::PairHeads => {
                pair_heads(&tree, &wspd, set.get_nb_points(), params.is_parallel())
            }
            policy => extract_clusters(&edges, set.get_nb_points(), policy, params.is_parallel()),
        };
        drop(wspd);
        drop(tree);
        //
        log::info!(
            "spanner+cluster nb points : {}, nb edges : {}, nb clusters : {}, \
             sys time(ms) {:?} cpu time(ms) {:?}",
            set.get_nb_points(),
            edges.len(),
            clustering.get_nb_clusters(),
            sys_now.elapsed().map(|d| d.as_millis()).unwrap_or(0),
            cpu_start.elapsed().as_millis()
        );
        Ok(SpannerGraph {
            separation: params.get_separation(),
            nb_points: set.get_nb_points(),
            edges,
            clustering,
        })
    } // end of with_params

    /// edges (src, dst, dist) with src < dst
    pub fn get_edges(&self) -> &[Edge] {
        &self.edges
    }

    /// cluster id of each point, in point order
    pub fn get_membership(&self) -> &[usize] {
        self.clustering.get_membership()
    }

    pub fn get_nb_clusters(&self) -> usize {
        self.clustering.get_nb_clusters()
    }

    pub fn get_clustering(&self) -> &Clustering {
        &self.clustering
    }

    pub fn get_nb_points(&self) -> usize {
        self.nb_points
    }

    pub fn get_separation(&self) -> f64 {
        self.separation
    }

    /// guaranteed stretch factor (s+4)/(s-4)
    pub fn get_stretch_factor(&self) -> f64 {
        (self.separation + 4.) / (self.separation - 4.)
    }

    /// length above which edges were cut before extracting clusters, if any
    pub fn get_cut_threshold(&self) -> Option<f64> {
        self.clustering.get_threshold()
    }
} // end of impl SpannerGraph

//========================================================
