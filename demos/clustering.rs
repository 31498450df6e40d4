//! K-means on random points in the unit square, pass by pass.
//!
//! Usage: `cargo run --example clustering -- [points] [clusters] [seed]`
//! (defaults: 300 points, 4 clusters, unseeded).

use lloyd::{uniform_points, ClusterState, Kmeans};
use rand::prelude::*;

// Colour per centroid id, with the last entry for unassigned points.
const COLORS: [&str; 7] = ["r", "g", "b", "c", "m", "y", "k"];

fn color(state: &ClusterState, point: usize) -> &'static str {
    match state.point(point).and_then(|p| p.centroid_id()) {
        Some(id) if id < COLORS.len() => COLORS[id - 1],
        _ => COLORS[COLORS.len() - 1],
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let n = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(300);
    let k = args.next().map(|s| s.parse::<usize>()).transpose()?.unwrap_or(4);
    let seed = args.next().map(|s| s.parse::<u64>()).transpose()?;

    let mut rng: Box<dyn RngCore> = match seed {
        Some(s) => Box::new(StdRng::seed_from_u64(s)),
        None => Box::new(rand::rng()),
    };
    let data = uniform_points(n, rng.as_mut());

    println!("=== K-means ===");
    println!("Clusters: {k}, points: {}.", data.len());

    let mut model = Kmeans::new(k);
    if let Some(s) = seed {
        model = model.with_seed(s);
    }
    let mut state = model.init(&data)?;

    while let Some(pass) = state.step() {
        println!(
            "  pass {:3}: {:3} unchanged, {} empty, wcss {:.4}",
            pass.iteration,
            pass.unchanged,
            pass.empty_centroids,
            state.total_wcss().unwrap_or(0.0)
        );
    }

    println!(
        "The number of iterations necessary to achieve a sufficient result: {}.",
        state.iteration()
    );

    println!("\nCentroids:");
    for c in state.centroids() {
        println!(
            "  {} ({:.3}, {:.3}) wcss {:.4}",
            c.id,
            c.x,
            c.y,
            c.wcss.unwrap_or(0.0)
        );
    }

    println!("\nPoints:");
    for p in state.points() {
        println!(
            "  point {:3} ({:.3}, {:.3}) => {}",
            p.id,
            p.x,
            p.y,
            color(&state, p.id)
        );
    }

    Ok(())
}
