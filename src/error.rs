use thiserror::Error;

/// Errors returned when building a clustering run.
///
/// Every variant is raised before any state is constructed; once a
/// [`ClusterState`](crate::cluster::ClusterState) exists, running it cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Input dataset is empty.
    #[error("empty input")]
    EmptyInput,

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Human-readable explanation.
        message: &'static str,
    },

    /// A point has a NaN or infinite coordinate, so the data bounds are undefined.
    #[error("point {point} has a non-finite coordinate")]
    NonFiniteCoordinate {
        /// 1-based id of the offending point.
        point: usize,
    },
}

impl Error {
    /// Whether the error stems from the caller's arguments.
    ///
    /// All current variants do; the method exists so callers can match on the
    /// class rather than on individual variants.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            Error::EmptyInput | Error::InvalidParameter { .. } | Error::NonFiniteCoordinate { .. }
        )
    }
}

/// Result type used by this crate.
pub type Result<T> = std::result::Result<T, Error>;
