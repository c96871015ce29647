//! Flow field generation timing
//!
//! Compares:
//! 1. Adjacency build time for growing grids
//! 2. Full flow field vs targeted search
//! 3. Distance table reconstruction

use std::time::Instant;

use hexnav_core::{find_path, generate_full_flow_field, MapConfig, TileCoord};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const ITERATIONS: u32 = 200;

fn time_per_iter<F: FnMut()>(mut f: F) -> f64 {
    let start = Instant::now();
    for _ in 0..ITERATIONS {
        f();
    }
    start.elapsed().as_secs_f64() * 1000.0 / ITERATIONS as f64
}

fn main() {
    println!("{:>9} {:>10} {:>10} {:>10} {:>10}", "size", "build ms", "full ms", "target ms", "dist ms");

    for size in [16, 32, 64, 128] {
        let mut rng = ChaCha8Rng::seed_from_u64(size as u64);
        let config = MapConfig::random(&mut rng, "bench", size, size, (size * size / 8) as usize);
        let obstacles = config.obstacle_set();
        let Ok(grid) = config.grid() else { continue };
        let Some(origin) = grid.coords().find(|c| !obstacles.contains(c)) else { continue };
        let goal = TileCoord::new(size - 1, size - 1);

        let build = time_per_iter(|| {
            let _ = config.build();
        });
        let Ok((_, graph)) = config.build() else { continue };

        let full = time_per_iter(|| {
            let _ = generate_full_flow_field(&graph, origin);
        });
        let target = time_per_iter(|| {
            let _ = find_path(&graph, origin, goal);
        });
        let Ok(field) = generate_full_flow_field(&graph, origin) else { continue };
        let dist = time_per_iter(|| {
            let _ = field.distances();
        });

        println!(
            "{:>9} {:>10.4} {:>10.4} {:>10.4} {:>10.4}",
            format!("{size}x{size}"),
            build,
            full,
            target,
            dist
        );
    }
}
