use rand::Rng;

#[inline]
pub(crate) fn squared_euclidean(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    let dx = ax - bx;
    let dy = ay - by;
    dx * dx + dy * dy
}

#[inline]
pub(crate) fn euclidean(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    squared_euclidean(ax, ay, bx, by).sqrt()
}

/// Draw `n` points uniformly from the unit square `[0, 1) x [0, 1)`.
///
/// This is the dataset the interactive demo feeds the engine; it is exposed so
/// benches and callers can reproduce it with a seeded RNG.
pub fn uniform_points<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<(f64, f64)> {
    (0..n)
        .map(|_| (rng.random::<f64>(), rng.random::<f64>()))
        .collect()
}
