//! Spatial index and well separated pair decomposition.
//!
//! The genesis of this algorithm relies on:
//!  - Callahan P.B, Kosaraju S.R. A decomposition of multidimensional point sets with applications
//!    to k-nearest-neighbors and n-body potential fields. 1995.
//!  - Narasimhan G, Smid M. Geometric spanner networks. 2007, chap 9.

pub mod pairs;
pub mod tree;

pub use pairs::{WsPair, Wspd};
pub use tree::{BoundingBox, Node, NodeId, NodeKind, SplitTree};
