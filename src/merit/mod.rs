//! This module is dedicated to clustering merit.
//! Information metrics come from the nmi crate, see :
//! - Vinh.N.X Information Theoretic Measures for clustering comparison (Vinh 2010)
//!   <https://jmlr.csail.mit.edu/papers/volume11/vinh10a/vinh10a.pdf>
//!
//! Modularity is computed on the spanner graph itself, see [modularity].

pub mod compare;
pub mod modularity;

pub use compare::{NmiScores, compare_labels, compare_with_graph, to_dashmap};
pub use modularity::modularity;
