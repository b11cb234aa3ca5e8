//! Benchmarks for gossamer web simulation.

use criterion::{criterion_group, criterion_main, Criterion};
use gossamer::*;

fn bench_cloth_simulation(c: &mut Criterion) {
    c.bench_function("cloth_10x10_border_60_steps", |b| {
        let cloth = Topology::cloth(
            Vec3::new(0.0f32, 0.0, 0.0),
            &ClothConfig::classic().with_anchors(ClothAnchors::Border),
        );
        b.iter(|| {
            let config = WebConfig::new()
                .with_iterations(4)
                .with_force_jitter(ForceJitter::breeze());
            let mut web = Web::from_topology(&cloth, config).unwrap();
            let mut sink = SegmentBuffer::new();
            for _ in 0..60 {
                web.step_with(1.0 / 60.0, &mut NoOpStepObserver, &mut sink);
            }
            web.positions()
        });
    });
}

fn bench_ensnaring_sweep(c: &mut Criterion) {
    c.bench_function("ensnare_200_drifters_60_steps", |b| {
        b.iter(|| {
            let config = WebConfig::new().with_capture_radius(2.0).with_seed(3);
            let mut web: Web<Vec3<f32>> = Web::new(config).unwrap();
            for i in 0..200 {
                let x = (i % 20) as f32 * 3.0;
                let y = (i / 20) as f32 * 3.0;
                let h = web.add_particle(Vec3::new(x, y, 0.0));
                web.particle_mut(h).prev_pos = Vec3::new(x - 0.05, y + 0.05, 0.0);
            }
            for _ in 0..60 {
                web.step(1.0 / 60.0);
            }
            web.constraint_count()
        });
    });
}

fn bench_shaking_web(c: &mut Criterion) {
    c.bench_function("cloth_corners_shaking_120_steps", |b| {
        let cloth = Topology::cloth(
            Vec3::new(0.0f32, 0.0, 0.0),
            &ClothConfig::classic().with_anchors(ClothAnchors::Corners),
        );
        let first_anchor = cloth.link_count();
        b.iter(|| {
            let mut web = Web::from_topology(&cloth, WebConfig::new().with_iterations(2)).unwrap();
            for step in 0..120 {
                if step % 30 == 0 {
                    for n in 0..cloth.anchors.len() {
                        web.enqueue(Stimulus::perturb(first_anchor + n, 5.0, 200.0));
                    }
                }
                web.step(1.0 / 60.0);
            }
            web.positions()
        });
    });
}

criterion_group!(benches, bench_cloth_simulation, bench_ensnaring_sweep, bench_shaking_web);
criterion_main!(benches);
