//! Geometric t-spanner of a point set built from a well separated pair decomposition
//! over a fair split tree, and clustering of points using the spanner edges.
//!
//! The entry point is [SpannerGraph](spanner::SpannerGraph):
//! ```
//! use wspdcluster::prelude::*;
//! let points = vec![vec![0., 0.], vec![0., 1.], vec![10., 10.], vec![10., 11.]];
//! let graph = SpannerGraph::new(2, &points, 8).unwrap();
//! assert_eq!(graph.get_membership().len(), 4);
//! ```

use lazy_static::lazy_static;

lazy_static! {
    pub(crate) static ref LOG: u64 = init_log();
}

// install a logger facility
fn init_log() -> u64 {
    let _res = env_logger::try_init();
    log::debug!("logger initialized");
    1
}

pub mod cluster;
pub mod datagen;
pub mod error;
pub mod io;
pub mod merit;
pub mod params;
pub mod point;
pub mod spanner;
pub mod wspd;

pub mod prelude {
    pub use crate::cluster::{Clustering, CutPolicy};
    pub use crate::error::SpannerError;
    pub use crate::params::SpannerParams;
    pub use crate::point::{Point, PointId, PointSet};
    pub use crate::spanner::{Edge, SpannerGraph};
}
