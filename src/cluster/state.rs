//! Engine state: points, centroids, and the run bookkeeping around them.
//!
//! Ids are 1-based and dense. Both collections are stored in id order
//! (index = id - 1), which fixes the iteration order used for tie-breaking.

use rand::Rng;

use crate::error::{Error, Result};

/// The centroid a point was assigned to, with the centroid's coordinates as
/// they were at assignment time.
///
/// The coordinates are a snapshot: relocating the centroid afterwards does not
/// update them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Assignment {
    /// Assigned centroid id.
    pub centroid: usize,
    /// Centroid x at assignment time.
    pub x: f64,
    /// Centroid y at assignment time.
    pub y: f64,
}

/// An input point.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// 1-based position in the input dataset.
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// `None` until the first assignment pass.
    pub assignment: Option<Assignment>,
}

impl Point {
    /// Id of the assigned centroid, if any.
    pub fn centroid_id(&self) -> Option<usize> {
        self.assignment.map(|a| a.centroid)
    }
}

/// A cluster representative.
#[derive(Debug, Clone, PartialEq)]
pub struct Centroid {
    /// Id in `1..=k`.
    pub id: usize,
    pub x: f64,
    pub y: f64,
    /// Within-cluster sum of squares from the latest pass; `None` before the first.
    pub wcss: Option<f64>,
}

/// Axis-aligned bounding box of a dataset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Compute the bounds of `data`.
    ///
    /// Fails on an empty dataset or on any non-finite coordinate.
    pub fn of(data: &[(f64, f64)]) -> Result<Self> {
        let (&(x0, y0), _) = data.split_first().ok_or(Error::EmptyInput)?;
        let mut b = Bounds {
            min_x: x0,
            max_x: x0,
            min_y: y0,
            max_y: y0,
        };
        for (i, &(x, y)) in data.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(Error::NonFiniteCoordinate { point: i + 1 });
            }
            b.min_x = b.min_x.min(x);
            b.max_x = b.max_x.max(x);
            b.min_y = b.min_y.min(y);
            b.max_y = b.max_y.max(y);
        }
        Ok(b)
    }

    /// Draw a point uniformly inside the box, x first then y.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        let x = uniform(self.min_x, self.max_x, rng);
        let y = uniform(self.min_y, self.max_y, rng);
        (x, y)
    }
}

// Interpolating form keeps the result finite even when `hi - lo` overflows.
fn uniform<R: Rng + ?Sized>(lo: f64, hi: f64, rng: &mut R) -> f64 {
    let t = rng.random::<f64>();
    ((1.0 - t) * lo + t * hi).clamp(lo, hi)
}

/// Full mutable state of one k-means run.
///
/// Created once from a fixed dataset, then advanced in place by
/// [`step`](ClusterState::step) or [`run`](ClusterState::run).
#[derive(Debug, Clone)]
pub struct ClusterState {
    pub(crate) iteration: usize,
    pub(crate) converged: bool,
    pub(crate) centroids: Vec<Centroid>,
    pub(crate) points: Vec<Point>,
}

impl ClusterState {
    /// Initialize `k` centroids uniformly at random inside the bounding box of `data`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] if `k == 0`.
    /// - [`Error::EmptyInput`] if `data` is empty.
    /// - [`Error::NonFiniteCoordinate`] if any coordinate is NaN or infinite.
    ///
    /// `k` larger than the number of points is accepted; the surplus centroids
    /// simply never receive points.
    pub fn new<R: Rng + ?Sized>(k: usize, data: &[(f64, f64)], rng: &mut R) -> Result<Self> {
        if k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        let bounds = Bounds::of(data)?;
        let seeds: Vec<(f64, f64)> = (0..k).map(|_| bounds.sample(rng)).collect();
        Ok(Self::build(data, &seeds))
    }

    /// Initialize with explicit centroid positions; `k` is `centroids.len()`.
    ///
    /// Centroid `i` (0-based) of the slice gets id `i + 1`. This bypasses the
    /// random draw, which makes runs fully deterministic.
    pub fn with_centroids(data: &[(f64, f64)], centroids: &[(f64, f64)]) -> Result<Self> {
        if centroids.is_empty() {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if centroids.iter().any(|&(x, y)| !x.is_finite() || !y.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "centroids",
                message: "coordinates must be finite",
            });
        }
        Bounds::of(data)?;
        Ok(Self::build(data, centroids))
    }

    fn build(data: &[(f64, f64)], seeds: &[(f64, f64)]) -> Self {
        let centroids = seeds
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Centroid {
                id: i + 1,
                x,
                y,
                wcss: None,
            })
            .collect();
        let points = data
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point {
                id: i + 1,
                x,
                y,
                assignment: None,
            })
            .collect();
        Self {
            iteration: 0,
            converged: false,
            centroids,
            points,
        }
    }

    /// Number of centroids.
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Number of completed passes.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    /// Whether a pass has seen no assignment change. Terminal.
    pub fn is_converged(&self) -> bool {
        self.converged
    }

    /// Centroids in id order.
    pub fn centroids(&self) -> &[Centroid] {
        &self.centroids
    }

    /// Points in id (input) order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Look up a centroid by its 1-based id.
    pub fn centroid(&self, id: usize) -> Option<&Centroid> {
        id.checked_sub(1).and_then(|i| self.centroids.get(i))
    }

    /// Look up a point by its 1-based id.
    pub fn point(&self, id: usize) -> Option<&Point> {
        id.checked_sub(1).and_then(|i| self.points.get(i))
    }

    /// Assigned centroid id per point, in input order.
    pub fn labels(&self) -> Vec<Option<usize>> {
        self.points.iter().map(Point::centroid_id).collect()
    }

    /// Number of points currently assigned to each centroid, indexed by `id - 1`.
    pub fn cluster_sizes(&self) -> Vec<usize> {
        let mut sizes = vec![0; self.centroids.len()];
        for id in self.points.iter().filter_map(Point::centroid_id) {
            sizes[id - 1] += 1;
        }
        sizes
    }

    /// Sum of all centroids' WCSS, once every centroid has been scored.
    pub fn total_wcss(&self) -> Option<f64> {
        self.centroids.iter().map(|c| c.wcss).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;

    fn square() -> Vec<(f64, f64)> {
        vec![(0.0, 0.0), (2.0, 0.0), (0.0, 3.0), (2.0, 3.0)]
    }

    #[test]
    fn bounds_of_square() {
        let b = Bounds::of(&square()).unwrap();
        assert_eq!(
            b,
            Bounds {
                min_x: 0.0,
                max_x: 2.0,
                min_y: 0.0,
                max_y: 3.0
            }
        );
    }

    #[test]
    fn bounds_rejects_empty_and_nan() {
        assert_eq!(Bounds::of(&[]), Err(Error::EmptyInput));
        let data = vec![(0.0, 0.0), (f64::NAN, 1.0)];
        assert_eq!(
            Bounds::of(&data),
            Err(Error::NonFiniteCoordinate { point: 2 })
        );
        let data = vec![(f64::INFINITY, 0.0)];
        assert_eq!(
            Bounds::of(&data),
            Err(Error::NonFiniteCoordinate { point: 1 })
        );
    }

    #[test]
    fn random_centroids_fall_inside_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let state = ClusterState::new(6, &square(), &mut rng).unwrap();
        assert_eq!(state.k(), 6);
        for (i, c) in state.centroids().iter().enumerate() {
            assert_eq!(c.id, i + 1);
            assert!((0.0..=2.0).contains(&c.x));
            assert!((0.0..=3.0).contains(&c.y));
            assert!(c.wcss.is_none());
        }
    }

    #[test]
    fn degenerate_bounds_pin_centroids() {
        let data = vec![(1.5, -2.0), (1.5, -2.0)];
        let mut rng = StdRng::seed_from_u64(0);
        let state = ClusterState::new(3, &data, &mut rng).unwrap();
        for c in state.centroids() {
            assert_eq!((c.x, c.y), (1.5, -2.0));
        }
    }

    #[test]
    fn points_keep_input_order_and_start_unassigned() {
        let state = ClusterState::with_centroids(&square(), &[(1.0, 1.0)]).unwrap();
        assert_eq!(state.iteration(), 0);
        assert!(!state.is_converged());
        for (i, p) in state.points().iter().enumerate() {
            assert_eq!(p.id, i + 1);
            assert_eq!((p.x, p.y), square()[i]);
            assert!(p.assignment.is_none());
        }
        assert_eq!(state.labels(), vec![None; 4]);
        assert_eq!(state.total_wcss(), None);
        assert_eq!(state.cluster_sizes(), vec![0]);
    }

    #[test]
    fn k_zero_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = ClusterState::new(0, &square(), &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "k", .. }));
        let err = ClusterState::with_centroids(&square(), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "k", .. }));
    }

    #[test]
    fn empty_dataset_is_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            ClusterState::new(2, &[], &mut rng).unwrap_err(),
            Error::EmptyInput
        );
        assert_eq!(
            ClusterState::with_centroids(&[], &[(0.0, 0.0)]).unwrap_err(),
            Error::EmptyInput
        );
    }

    #[test]
    fn non_finite_injected_centroid_is_rejected() {
        let err = ClusterState::with_centroids(&square(), &[(f64::NAN, 0.0)]).unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidParameter {
                name: "centroids",
                ..
            }
        ));
    }

    #[test]
    fn lookup_by_id() {
        let state = ClusterState::with_centroids(&square(), &[(0.0, 0.0), (5.0, 5.0)]).unwrap();
        assert_eq!(state.centroid(2).map(|c| (c.x, c.y)), Some((5.0, 5.0)));
        assert!(state.centroid(0).is_none());
        assert!(state.centroid(3).is_none());
        assert_eq!(state.point(4).map(|p| (p.x, p.y)), Some((2.0, 3.0)));
        assert!(state.point(5).is_none());
    }
}
