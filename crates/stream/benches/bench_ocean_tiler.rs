use std::hint::black_box;
use std::time::Instant;

use glam::Vec2;
use oceanspace_stream::{OceanTiler, TilerConfig, WaveField};

fn bench_recenter(config: TilerConfig, iterations: usize) {
    let mut tiler = OceanTiler::new(config);
    let mut pos = Vec2::ZERO;

    let start = Instant::now();
    for _ in 0..iterations {
        pos += Vec2::new(31.0, -17.0);
        black_box(tiler.recenter(black_box(pos)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  recenter ({} patches, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}",
        config.patch_count()
    );
}

fn bench_update_waves(config: TilerConfig, iterations: usize) {
    let mut tiler = OceanTiler::new(config);
    let field = WaveField::canonical();

    let start = Instant::now();
    for i in 0..iterations {
        tiler.update_waves(black_box(&field), black_box(i as f32 * 0.016));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    let vertices = config.patch_count() * tiler.layout().vertex_count();
    println!(
        "  update_waves ({vertices} vertices, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("ocean tiler benchmarks");

    for range in [1u32, 3, 5] {
        let config = TilerConfig {
            tile_range: range,
            ..TilerConfig::default()
        };
        bench_recenter(config, 10_000);
        bench_update_waves(config, 20);
    }

    let dense = TilerConfig {
        segments: 64,
        ..TilerConfig::default()
    };
    bench_update_waves(dense, 10);
}
