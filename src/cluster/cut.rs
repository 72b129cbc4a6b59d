//! policies deciding which spanner edges are removed before extracting connected components

use crate::error::SpannerError;
use crate::spanner::Edge;

use super::unionfind::UnionFind;

/// Rule giving a length threshold, edges longer than it are cut.
#[derive(Debug, Clone, PartialEq)]
pub enum CutPolicy {
    /// no cut, clusters are the connected components of the spanner (usually one)
    Connectivity,
    /// Scans the positive lengths of the minimum spanning forest of the spanner from the median up
    /// and cuts above the first length followed by a length at least min_ratio times larger.
    /// Gaps are compared by ratio so that groups at very different spacings are all separated.
    RelativeGap { min_ratio: f64 },
    /// Clusters are the top nodes of the split tree that appear in a well separated pair,
    /// merged when they are not well separated from each other. Needs the decomposition,
    /// so it is only honoured by [SpannerGraph](crate::spanner::SpannerGraph).
    PairHeads,
    /// cut above the length at this fraction (in [0,1]) of sorted edge lengths
    Percentile(f64),
    /// cut above a fixed length
    Threshold(f64),
}

impl Default for CutPolicy {
    fn default() -> Self {
        CutPolicy::RelativeGap { min_ratio: 2. }
    }
}

impl CutPolicy {
    /// checks policy parameters
    pub fn check(&self) -> Result<(), SpannerError> {
        let ok = match self {
            CutPolicy::Connectivity => true,
            CutPolicy::RelativeGap { min_ratio } => min_ratio.is_finite() && *min_ratio > 1.,
            CutPolicy::PairHeads => true,
            CutPolicy::Percentile(q) => (0. ..=1.).contains(q),
            CutPolicy::Threshold(d) => d.is_finite() && *d >= 0.,
        };
        if ok {
            Ok(())
        } else {
            Err(SpannerError::InvalidConfig(format!("bad cut policy {:?}", self)))
        }
    }

    /// threshold for edges sorted by (dist, src, dst). None means no cut.
    pub(crate) fn get_threshold(&self, sorted: &[Edge], nb_points: usize) -> Option<f64> {
        match self {
            CutPolicy::Connectivity | CutPolicy::PairHeads => None,
            CutPolicy::Threshold(d) => Some(*d),
            CutPolicy::Percentile(q) => {
                if sorted.is_empty() {
                    return None;
                }
                let rank = (q * (sorted.len() - 1) as f64).floor() as usize;
                Some(sorted[rank.min(sorted.len() - 1)].get_dist())
            }
            CutPolicy::RelativeGap { min_ratio } => {
                let weights = spanning_forest_lengths(sorted, nb_points);
                relative_gap(&weights, *min_ratio)
            }
        }
    }
} // end of impl CutPolicy

// Kruskal on sorted edges, returns lengths of forest edges in increasing order.
// Components of edges <= x in the spanner are the components of forest edges <= x.
fn spanning_forest_lengths(sorted: &[Edge], nb_points: usize) -> Vec<f64> {
    let mut uf = UnionFind::new(nb_points);
    let mut lengths = Vec::<f64>::with_capacity(nb_points.saturating_sub(1));
    for e in sorted {
        if uf.union(e.get_src(), e.get_dst()) {
            lengths.push(e.get_dist());
            if uf.get_nb_sets() == 1 {
                break;
            }
        }
    }
    lengths
}

// Lowest positive value v at or above the lower median of positive values such that the next
// distinct value is at least min_ratio * v. Null lengths (coincident points) never give a cut.
fn relative_gap(sorted: &[f64], min_ratio: f64) -> Option<f64> {
    let positive: Vec<f64> = sorted.iter().copied().filter(|w| *w > 0.).collect();
    if positive.len() < 2 {
        return None;
    }
    let median = positive[(positive.len() - 1) / 2];
    let found = positive
        .windows(2)
        .map(|w| (w[0], w[1]))
        .find(|(lower, upper)| {
            *lower >= median && upper > lower && *upper >= min_ratio * *lower
        });
    match found {
        Some((lower, upper)) => {
            log::debug!(
                "cut above {:.3e}, next forest length {:.3e}, median {:.3e}",
                lower,
                upper,
                median
            );
            Some(lower)
        }
        None => {
            log::debug!("no gap of ratio {:.3e} above median {:.3e}", min_ratio, median);
            None
        }
    }
} // end of relative_gap
