use crate::error::Result;

/// Common interface for hard clustering of 2D points (one label per point).
pub trait Clustering {
    /// Fit the model and return one 0-based cluster label per input point.
    fn fit_predict(&self, data: &[(f64, f64)]) -> Result<Vec<usize>>;

    /// The configured number of clusters.
    fn n_clusters(&self) -> usize;
}
