//! Spanner construction from a well separated pair decomposition.

pub mod edge;
pub mod graph;

pub use edge::{Edge, build_edges};
pub use graph::SpannerGraph;
