use std::hint::black_box;
use std::time::Instant;

use tileworld_common::BlockId;
use tileworld_kernel::{StructureConfig, World, WorldConfig, settle};

fn bench_materialize(columns: i32, structures: bool) {
    let config = WorldConfig {
        structures: if structures {
            StructureConfig::default()
        } else {
            StructureConfig::none()
        },
        ..WorldConfig::with_seed(42)
    };
    let mut world = World::new(config).expect("default config is valid");

    let start = Instant::now();
    for column in 0..columns {
        black_box(world.get_column(black_box(column)));
    }
    let elapsed = start.elapsed();
    let per_column = elapsed / columns as u32;
    let label = if structures { "with structures" } else { "bare" };
    println!("  {columns} columns, {label}: {per_column:?}/column");
}

fn bench_window(radius: u32, iterations: usize) {
    let mut world = World::with_seed(7);
    world.visible_columns(0, radius);

    let start = Instant::now();
    for _ in 0..iterations {
        let window = world.visible_columns(black_box(0), black_box(radius));
        black_box(window.iter().map(|(_, col)| col.len()).sum::<usize>());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  radius {radius}: {per_iter:?}/walk, total {elapsed:?}");
}

fn bench_settle(sand: i32, iterations: usize) {
    let mut world = World::with_seed(3);
    for column in 0..sand {
        let h = world.surface_height(column);
        world.set_block(column, h + 20, BlockId::SAND);
    }

    let start = Instant::now();
    let mut moved = 0;
    for _ in 0..iterations {
        moved += settle(&mut world, black_box(sand / 2), black_box(sand as u32));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!("  {sand} columns, {moved} moves: {per_iter:?}/pass");
}

fn main() {
    println!("=== World Kernel Benchmarks ===\n");

    println!("Column materialization:");
    bench_materialize(1_000, false);
    bench_materialize(1_000, true);
    bench_materialize(10_000, true);

    println!("\nVisible window:");
    bench_window(20, 10_000);
    bench_window(200, 1_000);

    println!("\nSettling:");
    bench_settle(64, 100);
    bench_settle(512, 100);

    println!("\n=== Done ===");
}
