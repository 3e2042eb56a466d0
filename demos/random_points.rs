//! Fill a tree with random points from a background thread while querying it.
//!
//! ```notest
//! RUST_LOG=random_points=info cargo run --release --example random_points
//! ```

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use geo_quadtree::QuadTree;
use rand::Rng;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const NUM_POINTS: i64 = 1_000_000;
const SEARCH_KM: f64 = 100.;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let tree = Arc::new(QuadTree::new());
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let tree = Arc::clone(&tree);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut rng = rand::thread_rng();
            for id in 0..NUM_POINTS {
                tree.add(id, rng.gen_range(-90.0..90.0), rng.gen_range(-180.0..180.0));
                if id % 100_000 == 0 {
                    info!(inserted = id, "populating");
                }
            }
            done.store(true, Ordering::Release);
        })
    };

    let mut rng = rand::thread_rng();
    let mut searches = 0u32;
    let mut total = Duration::ZERO;
    while !done.load(Ordering::Acquire) {
        let latitude = rng.gen_range(-90.0..90.0);
        let longitude = rng.gen_range(-180.0..180.0);

        let start = Instant::now();
        let found = tree.query(latitude, longitude, SEARCH_KM);
        total += start.elapsed();
        searches += 1;

        if searches % 1000 == 0 {
            info!(
                searches,
                latitude,
                longitude,
                found = found.len(),
                avg = ?total / searches,
                "searching"
            );
        }
    }

    if writer.join().is_err() {
        error!("writer thread panicked");
        return;
    }

    info!(
        points = tree.len(),
        nodes = tree.num_nodes(),
        leaves = tree.num_leaves(),
        depth = tree.max_depth(),
        searches,
        "finished"
    );
}
