//! Clusters read from the decomposition itself.
//!
//! A head is a topmost node of the split tree that belongs to a well separated pair.
//! Heads partition the points. Two heads are merged if they are not well separated from
//! each other, clusters are the classes of heads after all merges.
//! The number of head pairs tested is quadratic in the number of heads.

use rayon::prelude::*;

use super::unionfind::UnionFind;
use super::{Clustering, dense_ids};
use crate::wspd::{NodeId, SplitTree, Wspd};

/// topmost nodes appearing in a pair, in pre-order.
/// A leaf no pair reaches (all points coincide) is a head.
pub fn find_heads(tree: &SplitTree, wspd: &Wspd) -> Vec<NodeId> {
    let mut heads = Vec::<NodeId>::new();
    if tree.get_nb_nodes() == 0 {
        return heads;
    }
    let mut in_pair = vec![false; tree.get_nb_nodes()];
    for pair in wspd.get_pairs() {
        in_pair[pair.get_first()] = true;
        in_pair[pair.get_second()] = true;
    }
    let mut stack = vec![tree.get_root()];
    while let Some(n) = stack.pop() {
        if in_pair[n] {
            heads.push(n);
            continue;
        }
        match tree.get_node(n).get_children() {
            Some((l, r)) => {
                stack.push(r);
                stack.push(l);
            }
            None => heads.push(n),
        }
    }
    heads
} // end of find_heads

/// clusters of the nb_points points of tree obtained by merging heads
/// not well separated from each other
pub fn pair_heads(tree: &SplitTree, wspd: &Wspd, nb_points: usize, parallel: bool) -> Clustering {
    let heads = find_heads(tree, wspd);
    let nb_heads = heads.len();
    log::debug!("nb heads : {}", nb_heads);
    // for each head, the following heads it is to be merged with
    let close_to = |i: usize| -> Vec<usize> {
        ((i + 1)..nb_heads)
            .filter(|j| !wspd.well_separated(tree, heads[i], heads[*j]))
            .collect()
    };
    let merges: Vec<Vec<usize>> = if parallel {
        (0..nb_heads).into_par_iter().map(close_to).collect()
    } else {
        (0..nb_heads).map(close_to).collect()
    };
    let mut uf = UnionFind::new(nb_heads);
    for (i, js) in merges.iter().enumerate() {
        for j in js {
            uf.union(i, *j);
        }
    }
    //
    let mut point_head = vec![0usize; nb_points];
    for (i, h) in heads.iter().enumerate() {
        for p in tree.get_points(*h) {
            point_head[*p] = i;
        }
    }
    let (membership, nb_clusters) =
        dense_ids(point_head.iter().map(|h| uf.find(*h)), nb_heads);
    log::info!(
        "nb heads : {}, merged into nb clusters : {}",
        nb_heads,
        nb_clusters
    );
    Clustering {
        membership,
        nb_clusters,
        threshold: None,
    }
} // end of pair_heads

//========================================================
