// benches/picking_benchmark.rs
use criterion::{black_box, criterion_group, criterion_main, Criterion};

use cube_board::board_scene::create_board_scene;
use cube_board::config::BoardConfig;
use cube_board::engine_lib::{face_label, GridCoord, Ray, GRID_SIZE};
use glam::Vec3;
use rand::Rng;

fn random_ray(rng: &mut impl Rng) -> Ray {
    // Points on a shell around the board, aimed roughly at its middle.
    let origin = Vec3::new(
        rng.gen_range(-5.0..5.0),
        rng.gen_range(-2.0..6.0),
        rng.gen_range(-5.0..5.0),
    );
    let aim = Vec3::new(
        rng.gen_range(-0.6..0.6),
        rng.gen_range(0.4..1.6),
        rng.gen_range(-0.6..0.6),
    );
    Ray::new(origin, aim - origin)
}

fn picking_benchmark_fn(c: &mut Criterion) {
    let mut rng = rand::thread_rng();
    let scene = create_board_scene(&BoardConfig::default());

    const NUM_BENCH_RAYS: usize = 100;
    let rays: Vec<Ray> = (0..NUM_BENCH_RAYS).map(|_| random_ray(&mut rng)).collect();

    let mut group = c.benchmark_group("Picking");

    group.bench_function("pick_nearest_cube_100_rays", |b| {
        let mut ray_iter = rays.iter().cycle();
        b.iter(|| {
            let ray = ray_iter.next().unwrap();
            scene.pick(black_box(ray))
        })
    });

    group.bench_function("face_label_full_grid", |b| {
        b.iter(|| {
            let mut labelled = 0;
            for x in 0..GRID_SIZE {
                for y in 0..GRID_SIZE {
                    for z in 0..GRID_SIZE {
                        labelled += face_label(black_box(GridCoord::new(x, y, z))).is_some() as usize;
                    }
                }
            }
            labelled
        })
    });
    group.finish();
}

criterion_group!(benches, picking_benchmark_fn);
criterion_main!(benches);
