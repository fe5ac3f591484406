/*
 * Particle Simulation Benchmark
 *
 * Measures the pairwise flocking pass, the per-particle integration step and
 * a full swarm frame for a range of swarm sizes.
 */

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

use particles::{ConstantField, SimulationParams, Swarm, Viewport};

fn swarm_of(n: usize, seed: u64) -> (Swarm, SimulationParams, StdRng) {
    let mut rng = StdRng::seed_from_u64(seed);
    let params = SimulationParams::with_num_particles(n);
    let mut swarm = Swarm::new(Viewport::new(1920.0, 1080.0));
    swarm.reset(&params, &mut rng);
    (swarm, params, rng)
}

// Benchmark the pairwise flocking accumulation
fn bench_flocking_pass(c: &mut Criterion) {
    let mut group = c.benchmark_group("flocking_pass");

    for num_particles in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let (mut swarm, _, _) = swarm_of(n, 11);

            b.iter(|| {
                for particle in &mut swarm.particles {
                    particle.reset_flocking();
                }
                let particles = &mut swarm.particles;
                for i in 0..particles.len() {
                    let (head, tail) = particles.split_at_mut(i + 1);
                    let current = &mut head[i];
                    for other in tail {
                        current.add_for_flocking(other);
                    }
                }
                black_box(&swarm.particles);
            });
        });
    }

    group.finish();
}

// Benchmark the integration step on its own
fn bench_integration(c: &mut Criterion) {
    let mut group = c.benchmark_group("integration");

    for num_particles in [1000, 10000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let (mut swarm, _, mut rng) = swarm_of(n, 12);

            b.iter(|| {
                for particle in &mut swarm.particles {
                    particle.add_flocking_forces();
                    particle.update_with(black_box(0.001), &mut rng);
                }
            });
        });
    }

    group.finish();
}

// Benchmark a full frame through the swarm driver
fn bench_swarm_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("swarm_step");
    let field = ConstantField(0.5);

    for num_particles in [100, 500, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(num_particles), num_particles, |b, &n| {
            let (mut swarm, params, mut rng) = swarm_of(n, 13);
            let mut time = 0.0;

            b.iter(|| {
                time += 1.0 / 60.0;
                black_box(swarm.step(&params, &field, None, time, 1.0 / 60.0, &mut rng));
            });
        });
    }

    group.finish();
}

// Configure the benchmarks
criterion_group! {
    name = benches;
    config = Criterion::default()
        .sample_size(10)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));
    targets = bench_flocking_pass, bench_integration, bench_swarm_step
}

criterion_main!(benches);
