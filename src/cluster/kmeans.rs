//! Lloyd's k-means on 2D points.
//!
//! Each pass runs three steps over a [`ClusterState`]:
//!
//! 1. **Assign**: every point moves to its nearest centroid (Euclidean distance,
//!    ties go to the lowest centroid id).
//! 2. **Relocate**: every centroid moves to the mean of its points. A centroid
//!    with no points stays where it is.
//! 3. **Score**: every centroid records its within-cluster sum of squares.
//!
//! The run has converged once a whole assign step leaves every point's
//! assignment unchanged. The very first pass can never converge, since no
//! point has a previous assignment to compare against.
//!
//! ## Termination
//!
//! Lloyd's algorithm converges on almost all inputs, but nothing here forces it
//! to: exact ties and floating point noise can make an assignment oscillate.
//! [`ClusterState::run`] therefore takes an optional iteration cap, and hitting
//! it is reported as [`StopReason::IterationCap`], never as convergence.

use log::{debug, info, trace, warn};
use rand::prelude::*;

use super::state::{Assignment, Centroid, ClusterState};
use super::traits::Clustering;
use super::util::{euclidean, squared_euclidean};
use crate::error::{Error, Result};

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// A pass left every assignment unchanged.
    Converged {
        /// Passes performed, including the one that detected convergence.
        iterations: usize,
    },
    /// The iteration cap was reached before convergence.
    IterationCap {
        /// Passes performed (equal to the cap).
        iterations: usize,
    },
}

impl StopReason {
    /// Passes performed when the run stopped.
    pub fn iterations(&self) -> usize {
        match *self {
            StopReason::Converged { iterations } | StopReason::IterationCap { iterations } => {
                iterations
            }
        }
    }

    /// Whether the run stopped because it converged.
    pub fn is_converged(&self) -> bool {
        matches!(self, StopReason::Converged { .. })
    }
}

/// What a single pass did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    /// Iteration number of this pass (1 for the first).
    pub iteration: usize,
    /// Points whose assignment did not change.
    pub unchanged: usize,
    /// Centroids that received no points and held their position.
    pub empty_centroids: usize,
    /// Whether this pass detected convergence.
    pub converged: bool,
}

impl ClusterState {
    /// Run one assign/relocate/score pass.
    ///
    /// Returns `None` without touching the state once it has converged.
    pub fn step(&mut self) -> Option<StepOutcome> {
        if self.converged {
            return None;
        }
        self.iteration += 1;
        let unchanged = self.assign();
        let empty_centroids = self.relocate();
        self.score_wcss();

        debug!(
            "kmeans pass {}: {}/{} points unchanged, {} empty centroids, wcss {:?}",
            self.iteration,
            unchanged,
            self.points.len(),
            empty_centroids,
            self.total_wcss()
        );

        Some(StepOutcome {
            iteration: self.iteration,
            unchanged,
            empty_centroids,
            converged: self.converged,
        })
    }

    /// Run passes until convergence, or until `max_iter` passes have been made.
    ///
    /// With `max_iter = None` the loop is unbounded and will not return on an
    /// input whose assignments never settle. The cap counts total passes on
    /// this state, so calling `run` again with a larger cap resumes the run.
    pub fn run(&mut self, max_iter: Option<usize>) -> StopReason {
        loop {
            if self.converged {
                info!("kmeans converged after {} iterations", self.iteration);
                return StopReason::Converged {
                    iterations: self.iteration,
                };
            }
            if let Some(cap) = max_iter {
                if self.iteration >= cap {
                    warn!(
                        "kmeans stopped at iteration cap {} without converging",
                        cap
                    );
                    return StopReason::IterationCap {
                        iterations: self.iteration,
                    };
                }
            }
            self.step();
        }
    }

    /// Assign every point to its nearest centroid; returns how many kept their assignment.
    fn assign(&mut self) -> usize {
        let centroids = &self.centroids;
        let mut unchanged = 0;

        for point in self.points.iter_mut() {
            let Some(nearest) = nearest_centroid(centroids, point.x, point.y) else {
                continue;
            };
            if point.centroid_id() == Some(nearest.id) {
                unchanged += 1;
            }
            point.assignment = Some(Assignment {
                centroid: nearest.id,
                x: nearest.x,
                y: nearest.y,
            });
        }

        if unchanged == self.points.len() {
            self.converged = true;
        }
        unchanged
    }

    /// Move every centroid to the mean of its points; returns how many had none.
    fn relocate(&mut self) -> usize {
        let k = self.centroids.len();
        let mut sums = vec![(0.0f64, 0.0f64); k];
        let mut counts = vec![0usize; k];

        for point in &self.points {
            if let Some(id) = point.centroid_id() {
                sums[id - 1].0 += point.x;
                sums[id - 1].1 += point.y;
                counts[id - 1] += 1;
            }
        }

        let mut empty = 0;
        for ((centroid, (sx, sy)), count) in self.centroids.iter_mut().zip(sums).zip(counts) {
            if count == 0 {
                trace!(
                    "centroid {} has no points, holding at ({}, {})",
                    centroid.id,
                    centroid.x,
                    centroid.y
                );
                empty += 1;
                continue;
            }
            centroid.x = sx / count as f64;
            centroid.y = sy / count as f64;
        }
        empty
    }

    fn score_wcss(&mut self) {
        let mut wcss = vec![0.0f64; self.centroids.len()];
        for point in &self.points {
            if let Some(id) = point.centroid_id() {
                let c = &self.centroids[id - 1];
                wcss[id - 1] += squared_euclidean(c.x, c.y, point.x, point.y);
            }
        }
        for (centroid, w) in self.centroids.iter_mut().zip(wcss) {
            centroid.wcss = Some(w);
        }
    }
}

/// Nearest centroid by Euclidean distance; the first (lowest id) wins ties.
fn nearest_centroid(centroids: &[Centroid], x: f64, y: f64) -> Option<&Centroid> {
    let mut best: Option<(&Centroid, f64)> = None;
    for c in centroids {
        let d = euclidean(c.x, c.y, x, y);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((c, d)),
        }
    }
    best.map(|(c, _)| c)
}

/// K-means configuration.
///
/// ```rust
/// use lloyd::Kmeans;
///
/// let data = vec![(0.0, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0)];
/// let fit = Kmeans::new(2)
///     .with_centroids(vec![(0.0, 0.5), (10.0, 10.5)])
///     .fit(&data)
///     .unwrap();
///
/// assert!(fit.converged());
/// assert_eq!(fit.labels(), vec![0, 0, 1, 1]);
/// ```
#[derive(Debug, Clone)]
pub struct Kmeans {
    k: usize,
    max_iter: Option<usize>,
    seed: Option<u64>,
    centroids: Option<Vec<(f64, f64)>>,
}

impl Kmeans {
    /// Create a configuration for `k` clusters, unbounded iterations, unseeded RNG.
    pub fn new(k: usize) -> Self {
        Self {
            k,
            max_iter: None,
            seed: None,
            centroids: None,
        }
    }

    /// Stop after at most `max_iter` passes (reported as [`StopReason::IterationCap`]).
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    /// Seed the centroid draw for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Start from these centroid positions instead of drawing them. Sets `k`.
    pub fn with_centroids(mut self, centroids: Vec<(f64, f64)>) -> Self {
        self.k = centroids.len();
        self.centroids = Some(centroids);
        self
    }

    /// Build the initial state for `data` without running any pass.
    pub fn init(&self, data: &[(f64, f64)]) -> Result<ClusterState> {
        if let Some(centroids) = &self.centroids {
            return ClusterState::with_centroids(data, centroids);
        }
        let mut rng: Box<dyn RngCore> = match self.seed {
            Some(s) => Box::new(StdRng::seed_from_u64(s)),
            None => Box::new(rand::rng()),
        };
        ClusterState::new(self.k, data, rng.as_mut())
    }

    /// Initialize and run to convergence (or to the iteration cap).
    pub fn fit(&self, data: &[(f64, f64)]) -> Result<KmeansFit> {
        if self.max_iter == Some(0) {
            return Err(Error::InvalidParameter {
                name: "max_iter",
                message: "must be at least 1",
            });
        }
        let mut state = self.init(data)?;
        let stop = state.run(self.max_iter);
        Ok(KmeansFit { state, stop })
    }
}

impl Clustering for Kmeans {
    fn fit_predict(&self, data: &[(f64, f64)]) -> Result<Vec<usize>> {
        Ok(self.fit(data)?.labels())
    }

    fn n_clusters(&self) -> usize {
        self.k
    }
}

/// Result of [`Kmeans::fit`].
#[derive(Debug, Clone)]
pub struct KmeansFit {
    state: ClusterState,
    stop: StopReason,
}

impl KmeansFit {
    /// 0-based cluster label per point (`centroid id - 1`).
    pub fn labels(&self) -> Vec<usize> {
        // `fit` always runs at least one pass, so every point is assigned.
        self.state
            .points()
            .iter()
            .map(|p| p.centroid_id().map_or(0, |id| id - 1))
            .collect()
    }

    /// Final centroids in id order.
    pub fn centroids(&self) -> &[Centroid] {
        self.state.centroids()
    }

    pub fn iterations(&self) -> usize {
        self.stop.iterations()
    }

    pub fn stop(&self) -> StopReason {
        self.stop
    }

    pub fn converged(&self) -> bool {
        self.stop.is_converged()
    }

    /// Full final state.
    pub fn state(&self) -> &ClusterState {
        &self.state
    }

    pub fn into_state(self) -> ClusterState {
        self.state
    }
}
