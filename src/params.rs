//! parameters driving spanner construction and cluster extraction

use crate::cluster::CutPolicy;
use crate::error::SpannerError;

/// Parameters of a spanner construction.
///
/// - separation : ratio $s$ of the well separated pair decomposition, must be > 4.
/// - cut : policy used to remove long edges before extracting connected components.
/// - parallel : run tree traversal and edge computations with rayon. Results do not depend on it.
#[cfg_attr(doc, katexit::katexit)]
#[derive(Debug, Clone, PartialEq)]
pub struct SpannerParams {
    separation: f64,
    cut: CutPolicy,
    parallel: bool,
}

impl SpannerParams {
    /// parameters for a separation ratio, with default cut policy and sequential run
    pub fn new(separation: f64) -> Result<Self, SpannerError> {
        if !separation.is_finite() || separation <= 4. {
            return Err(SpannerError::InvalidConfig(format!(
                "separation ratio {} must be finite and > 4",
                separation
            )));
        }
        Ok(SpannerParams {
            separation,
            cut: CutPolicy::default(),
            parallel: false,
        })
    }

    #[cfg_attr(doc, katexit::katexit)]
    /// parameters giving a spanner of stretch factor at most $t$.
    /// The separation ratio is then $s = 4 (t+1)/(t-1)$
    pub fn from_stretch(stretch: f64) -> Result<Self, SpannerError> {
        if !stretch.is_finite() || stretch <= 1. {
            return Err(SpannerError::InvalidConfig(format!(
                "stretch factor {} must be finite and > 1",
                stretch
            )));
        }
        SpannerParams::new(4. * (stretch + 1.) / (stretch - 1.))
    }

    /// set the cut policy
    pub fn with_cut_policy(mut self, cut: CutPolicy) -> Result<Self, SpannerError> {
        cut.check()?;
        self.cut = cut;
        Ok(self)
    }

    /// run parallel parts with rayon
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn get_separation(&self) -> f64 {
        self.separation
    }

    pub fn get_cut_policy(&self) -> &CutPolicy {
        &self.cut
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    #[cfg_attr(doc, katexit::katexit)]
    /// stretch factor guaranteed by separation $s$ : $t = (s+4)/(s-4)$
    pub fn get_stretch_factor(&self) -> f64 {
        (self.separation + 4.) / (self.separation - 4.)
    }
} // end of impl SpannerParams

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn separation_bound() {
        assert!(matches!(
            SpannerParams::new(4.),
            Err(SpannerError::InvalidConfig(_))
        ));
        assert!(matches!(
            SpannerParams::new(f64::NAN),
            Err(SpannerError::InvalidConfig(_))
        ));
        let params = SpannerParams::new(12.).unwrap();
        assert_eq!(params.get_stretch_factor(), 2.);
        assert!(!params.is_parallel());
    }

    #[test]
    fn stretch_roundtrip() {
        let params = SpannerParams::from_stretch(2.).unwrap();
        assert!((params.get_separation() - 12.).abs() < 1.0e-12);
        assert!((params.get_stretch_factor() - 2.).abs() < 1.0e-12);
        assert!(SpannerParams::from_stretch(1.).is_err());
    }

    #[test]
    fn bad_cut() {
        let params = SpannerParams::new(8.).unwrap();
        assert!(params.clone().with_cut_policy(CutPolicy::Percentile(1.5)).is_err());
        assert!(params.with_cut_policy(CutPolicy::Threshold(3.)).is_ok());
    }
}
