//! K-means clustering of 2D points.
//!
//! ## The algorithm
//!
//! Lloyd's algorithm: assign each point to the nearest centroid, then move
//! each centroid to the mean of its points. Repeat until no point changes
//! cluster.
//!
//! **Objective**: minimize the within-cluster sum of squares:
//!
//! ```text
//! J = Σ_k Σ_{x ∈ C_k} ||x - μ_k||²
//! ```
//!
//! Each centroid's share of `J` is recorded as its WCSS after every pass. It is
//! a diagnostic only and plays no part in deciding when to stop.
//!
//! **Assumptions**:
//! - Clusters are roughly spherical
//! - Clusters have similar sizes
//! - You know k in advance
//!
//! ## Initialization
//!
//! Centroids are drawn uniformly inside the bounding box of the data, one
//! coordinate at a time. Positions can also be supplied explicitly, which makes
//! a run fully deterministic.
//!
//! ## Usage
//!
//! ```rust
//! use lloyd::cluster::{ClusterState, Clustering, Kmeans};
//!
//! let data = vec![(0.0, 0.0), (0.1, 0.1), (10.0, 10.0), (10.1, 10.1)];
//!
//! // One-shot: labels only.
//! let labels = Kmeans::new(2)
//!     .with_centroids(vec![(0.0, 0.0), (10.0, 10.0)])
//!     .fit_predict(&data)
//!     .unwrap();
//! assert_eq!(labels[0], labels[1]);
//! assert_ne!(labels[0], labels[2]);
//!
//! // Pass by pass, e.g. to animate convergence.
//! let mut state = ClusterState::with_centroids(&data, &[(0.0, 0.0), (10.0, 10.0)]).unwrap();
//! while let Some(pass) = state.step() {
//!     assert!(pass.iteration <= 2);
//! }
//! assert!(state.is_converged());
//! ```

mod kmeans;
mod state;
mod traits;
mod util;

pub use kmeans::{Kmeans, KmeansFit, StepOutcome, StopReason};
pub use state::{Assignment, Bounds, Centroid, ClusterState, Point};
pub use traits::Clustering;
pub use util::uniform_points;
