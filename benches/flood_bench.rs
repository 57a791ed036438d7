use criterion::{criterion_group, criterion_main, Criterion};
use itertools::iproduct;
use maze_floodfill::{Direction, FloodFill, Maze, Navigator, NoDiscovery};
use rand::prelude::*;
use std::hint::black_box;

fn random_maze(size: usize, wall_chance: f64, rng: &mut StdRng) -> Maze {
    let mut maze = Maze::build(size).unwrap();
    for (x, y) in iproduct!(0..size as i32, 0..size as i32) {
        for dir in [Direction::Right, Direction::Down] {
            if rng.gen_bool(wall_chance) {
                maze.set_wall(x, y, dir, true).unwrap();
            }
        }
    }
    maze.update();
    maze
}

fn flood_bench(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0);
    let mut maze = random_maze(64, 0.2, &mut rng);
    let mut flood = FloodFill::new();
    c.bench_function("recompute 64x64", |b| {
        b.iter(|| flood.recompute(black_box(&mut maze)))
    });

    let solve_maze = random_maze(32, 0.15, &mut rng);
    c.bench_function("solve 32x32", |b| {
        b.iter(|| {
            let mut maze = solve_maze.clone();
            let mut flood = FloodFill::new();
            let mut navigator = Navigator::new(&maze);
            black_box(navigator.solve(&mut maze, &mut flood, &mut NoDiscovery).ok());
        })
    });
}

criterion_group!(benches, flood_bench);
criterion_main!(benches);
