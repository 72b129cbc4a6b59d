//! errors reported by spanner construction

use thiserror::Error;

/// Failure of a spanner construction. All checks are done before the split tree is built
/// so an error never comes with a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpannerError {
    /// points do not match dimension, empty point set or non finite coordinates
    #[error("invalid input : {0}")]
    InvalidInput(String),
    /// separation ratio not above 4, null dimension, bad stretch or cut parameter
    #[error("invalid config : {0}")]
    InvalidConfig(String),
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn into_anyhow() {
        let err = SpannerError::InvalidConfig(String::from("separation 4 must be > 4"));
        let any: anyhow::Error = err.clone().into();
        assert_eq!(any.to_string(), "invalid config : separation 4 must be > 4");
        assert_eq!(any.downcast_ref::<SpannerError>(), Some(&err));
    }

    #[test]
    fn displayed_message() {
        let err = SpannerError::InvalidInput(String::from("empty point set"));
        assert_eq!(err.to_string(), "invalid input : empty point set");
        let source: &dyn std::error::Error = &err;
        assert!(source.source().is_none());
    }
}
