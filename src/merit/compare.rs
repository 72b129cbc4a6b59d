//! Comparison of a clustering with reference labels through the contingency table of the nmi crate.

use dashmap::DashMap;
use nmi::*;

use crate::error::SpannerError;
use crate::spanner::SpannerGraph;

/// normalized mutual informations between a reference labelling and a clustering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NmiScores {
    joint: f64,
    mean: f64,
    sqrt: f64,
}

impl NmiScores {
    /// mutual information over joint entropy
    pub fn get_nmi_joint(&self) -> f64 {
        self.joint
    }

    /// mutual information over mean of entropies
    pub fn get_nmi_mean(&self) -> f64 {
        self.mean
    }

    /// mutual information over geometric mean of entropies
    pub fn get_nmi_sqrt(&self) -> f64 {
        self.sqrt
    }
}

/// affectation map point rank -> label
pub fn to_dashmap(labels: &[u32]) -> DashMap<usize, u32> {
    let map = DashMap::<usize, u32>::with_capacity(labels.len());
    for (i, l) in labels.iter().enumerate() {
        map.insert(i, *l);
    }
    map
}

/// Compares labels of the same points. reference is first arg so it corresponds to rows.
pub fn compare_labels(reference: &[u32], algo: &[u32]) -> Result<NmiScores, SpannerError> {
    if reference.len() != algo.len() || reference.is_empty() {
        return Err(SpannerError::InvalidInput(format!(
            "cannot compare {} reference labels with {} cluster labels",
            reference.len(),
            algo.len()
        )));
    }
    let ref_hashmap = to_dashmap(reference);
    let algo_hashmap = to_dashmap(algo);
    let contingency = Contingency::<DashAffectation<usize, u32>, usize, u32>::new(
        DashAffectation::new(&ref_hashmap),
        DashAffectation::new(&algo_hashmap),
    );
    if log::log_enabled!(log::Level::Debug) {
        contingency.dump_entropies();
    }
    let scores = NmiScores {
        joint: contingency.get_nmi_joint(),
        mean: contingency.get_nmi_mean(),
        sqrt: contingency.get_nmi_sqrt(),
    };
    log::debug!("{:?}", scores);
    Ok(scores)
} // end of compare_labels

/// compares graph clusters with reference labels given in point order
pub fn compare_with_graph(graph: &SpannerGraph, labels: &[u32]) -> Result<NmiScores, SpannerError> {
    let algo: Vec<u32> = graph.get_membership().iter().map(|c| *c as u32).collect();
    compare_labels(labels, &algo)
}

//========================================================
