use criterion::{criterion_group, criterion_main, Criterion};
use plenum_core::Vec3;
use plenum_sim::scene::{ColliderShape, Transform};
use plenum_sim::sim::{AirflowSim, SimConfig};
use std::f32::consts::PI;

/// Populated machine room: floor, four racks, two coolers
fn populated_sim() -> AirflowSim {
    let mut sim = AirflowSim::with_seed(SimConfig::default(), 0xbeef);
    sim.add_collidable(Transform::identity(), ColliderShape::floor(0.0));

    let rack = ColliderShape::centered_box(Vec3::new(0.4, 1.0, 0.6));
    for i in 0..4 {
        let z = i as f32 * 2.0;
        sim.register_rack(Transform::at(2.0, 1.0, z), rack);
        sim.register_rack(Transform::at(-2.0, 1.0, z).with_rotation(0.0, PI, 0.0), rack);
    }

    let cooler = ColliderShape::centered_box(Vec3::new(0.5, 0.5, 2.0));
    sim.register_cooler(Transform::at(-8.0, 2.0, 3.0), cooler);
    sim.register_cooler(Transform::at(8.0, 2.0, 3.0), cooler);

    // Warm up so pools are mid-flight rather than freshly spawned
    for _ in 0..100 {
        sim.step();
    }
    sim
}

fn bench_step(c: &mut Criterion) {
    let mut sim = populated_sim();
    c.bench_function("step/machine_room", |b| b.iter(|| sim.step()));

    let mut instances = Vec::new();
    c.bench_function("render/write_instances", |b| {
        b.iter(|| plenum_sim::render::write_instances(&sim, &mut instances))
    });
}

criterion_group!(benches, bench_step);
criterion_main!(benches);
