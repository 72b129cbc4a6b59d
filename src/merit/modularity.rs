//! Newman modularity of the clustering over the spanner edges

use crate::spanner::{Edge, SpannerGraph};

#[cfg_attr(doc, katexit::katexit)]
/// Modularity of the graph clusters, edges being weighted by $1/d^2$.
///
/// With $W$ the total weight, $w_c$ the weight of edges inside cluster $c$ and $k_c$
/// the sum of weighted degrees of points of $c$:
/// $$ Q = \sum_c \left( \frac{w_c}{W} - \left(\frac{k_c}{2W}\right)^2 \right) $$
///
/// Zero length edges (between coincident points) are skipped. Returns 0. if no edge has a weight.
pub fn modularity(graph: &SpannerGraph) -> f64 {
    edges_modularity(graph.get_edges(), graph.get_membership(), graph.get_nb_clusters())
}

pub(crate) fn edges_modularity(edges: &[Edge], membership: &[usize], nb_clusters: usize) -> f64 {
    let mut inner = vec![0f64; nb_clusters];
    let mut degrees = vec![0f64; nb_clusters];
    let mut total = 0f64;
    for e in edges.iter().filter(|e| e.get_dist() > 0.) {
        let w = 1. / (e.get_dist() * e.get_dist());
        let (c_src, c_dst) = (membership[e.get_src()], membership[e.get_dst()]);
        if c_src == c_dst {
            inner[c_src] += w;
        }
        degrees[c_src] += w;
        degrees[c_dst] += w;
        total += w;
    }
    if total <= 0. {
        return 0.;
    }
    let q = inner
        .iter()
        .zip(degrees.iter())
        .map(|(w_c, k_c)| w_c / total - (k_c / (2. * total)).powi(2))
        .sum::<f64>();
    log::debug!("modularity : {:.3e}, total weight : {:.3e}", q, total);
    q
}

#[cfg(test)]
mod tests {

    use super::*;

    fn edge(src: usize, dst: usize, dist: f64) -> Edge {
        Edge::new(src, dst, dist)
    }

    #[test]
    fn two_triangles() {
        // two triangles of unit edges joined by one long edge
        let edges = vec![
            edge(0, 1, 1.),
            edge(1, 2, 1.),
            edge(0, 2, 1.),
            edge(3, 4, 1.),
            edge(4, 5, 1.),
            edge(3, 5, 1.),
            edge(2, 3, 10.),
        ];
        let split = edges_modularity(&edges, &[0, 0, 0, 1, 1, 1], 2);
        let total = 6.01f64;
        let expected = 2. * (3. / total - (6.01 / (2. * total)).powi(2));
        assert!((split - expected).abs() < 1.0e-12);
        // one cluster has null modularity
        assert!(edges_modularity(&edges, &[0; 6], 1).abs() < 1.0e-12);
        // a bad partition is worse
        assert!(edges_modularity(&edges, &[0, 1, 0, 1, 0, 1], 2) < split);
    }

    #[test]
    fn zero_length_skipped() {
        let edges = vec![edge(0, 1, 0.), edge(0, 2, 0.)];
        assert_eq!(edges_modularity(&edges, &[0, 0, 0], 1), 0.);
    }

    #[test]
    fn graph_modularity() {
        let points = vec![vec![0f64, 0.], vec![0., 1.], vec![50., 0.], vec![50., 1.]];
        let graph = SpannerGraph::new(2, &points, 8).unwrap();
        assert_eq!(graph.get_nb_clusters(), 2);
        assert!(modularity(&graph) > 0.4);
    }
}
