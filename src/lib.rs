//! Lloyd's k-means for 2D point sets.
//!
//! `lloyd` clusters a set of `(x, y)` points around `k` centroids and keeps the
//! whole run observable: every point's assignment, every centroid's position and
//! within-cluster sum of squares (WCSS), and the iteration count, after any pass.
//!
//! The primary public API is under [`cluster`]:
//! - [`Kmeans`]: builder-style configuration, `fit` to run to completion
//! - [`ClusterState`]: the engine state, advanced pass by pass with `step`

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    uniform_points, Assignment, Bounds, Centroid, ClusterState, Clustering, Kmeans, KmeansFit,
    Point, StepOutcome, StopReason,
};
pub use error::{Error, Result};
