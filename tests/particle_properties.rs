use nannou::prelude::{pt2, vec2, Point2, Vec2};
use particles::{Behavior, HsbColor, Particle, ParticleConfig, Viewport};
use proptest::prelude::*;
use rand::rngs::mock::StepRng;

fn config_with(behavior: Behavior) -> ParticleConfig {
    ParticleConfig {
        behavior,
        ..ParticleConfig::default()
    }
}

fn particle(config: &ParticleConfig, position: Point2, velocity: Vec2, radius: f32, lifetime: f32) -> Particle {
    let mut p = Particle::new(config, Viewport::new(800.0, 600.0));
    p.setup(1, position, velocity, HsbColor::new(120.0, 255.0, 255.0), radius, lifetime);
    p
}

fn no_flicker() -> StepRng {
    StepRng::new(0, 0)
}

#[test]
fn setup_round_trip() {
    let p = particle(&ParticleConfig::default(), pt2(0.0, 0.0), vec2(1.0, 1.0), 5.0, 10.0);
    assert!((p.mass - 0.125).abs() < 1e-6);
    assert_eq!(p.radius, 5.0);
    assert_eq!(p.previous_position, pt2(0.0, 0.0));
    assert_eq!(p.initial_position, pt2(0.0, 0.0));
    assert_eq!(p.velocity, vec2(1.0, 1.0));
}

#[test]
fn bounce_clamps_and_reflects() {
    let config = config_with(Behavior {
        bounces: true,
        ..Behavior::default()
    });
    let mut p = particle(&config, pt2(5.0, 300.0), vec2(-3.0, 0.0), 10.0, 10.0);
    p.update_with(0.1, &mut no_flicker());
    assert_eq!(p.position.x, 10.0);
    assert_eq!(p.velocity.x, 3.0);
}

#[test]
fn repulsion_obeys_third_law() {
    let config = ParticleConfig::default();
    let a = particle(&config, pt2(10.0, 10.0), Vec2::ZERO, 4.0, 10.0);
    let b = particle(&config, pt2(16.0, 18.0), Vec2::ZERO, 4.0, 10.0);

    let pair = a.repulsion_from(&b, 400.0, 5.0);
    // dist² = 100, pct = 0.75, direction from b to a
    let expected = vec2(-0.6, -0.8) * 5.0 * 0.75;
    assert!((pair.on_self - expected).length() < 1e-5);
    assert!((pair.on_self + pair.on_other).length() < 1e-6);
    assert!((pair.on_self.length() - pair.on_other.length()).abs() < 1e-6);
}

#[test]
fn attraction_is_repulsion_reversed() {
    let config = ParticleConfig::default();
    let a = particle(&config, pt2(10.0, 10.0), Vec2::ZERO, 4.0, 10.0);
    let b = particle(&config, pt2(16.0, 18.0), Vec2::ZERO, 4.0, 10.0);

    let push = a.repulsion_from(&b, 400.0, 5.0);
    let pull = a.attraction_to(&b, 400.0, 5.0);
    assert_eq!(push.on_self, -pull.on_self);
    assert_eq!(push.on_other, -pull.on_other);
}

#[test]
fn flocking_with_one_neighbor_matches_closed_form() {
    let config = ParticleConfig::default();
    let mut a = particle(&config, pt2(200.0, 200.0), vec2(0.0, 3.0), 4.0, 10.0);
    let mut b = particle(&config, pt2(200.0, 212.0), vec2(-2.0, 0.0), 4.0, 10.0);

    a.reset_flocking();
    b.reset_flocking();
    a.add_for_flocking(&mut b);
    assert_eq!(a.flock.separation.count, 1);
    assert_eq!(b.flock.cohesion.count, 1);
    assert_eq!(a.flock.alignment.count, 1);

    a.add_flocking_forces();
    b.add_flocking_forces();

    let f = config.flocking;
    let expected_a = -vec2(0.0, 1.0) * f.separation.strength
        + vec2(200.0, 212.0).normalize() * f.cohesion.strength
        - vec2(-1.0, 0.0) * f.alignment.strength;
    let expected_b = vec2(0.0, 1.0) * f.separation.strength
        + vec2(200.0, 200.0).normalize() * f.cohesion.strength
        - vec2(0.0, 1.0) * f.alignment.strength;
    assert!((a.force - expected_a).length() < 1e-5);
    assert!((b.force - expected_b).length() < 1e-5);
}

#[test]
fn flocking_sums_compound_without_reset() {
    let config = ParticleConfig::default();
    let mut a = particle(&config, pt2(200.0, 200.0), Vec2::ZERO, 4.0, 10.0);
    let mut b = particle(&config, pt2(205.0, 200.0), Vec2::ZERO, 4.0, 10.0);

    a.add_for_flocking(&mut b);
    a.add_for_flocking(&mut b);
    assert_eq!(a.flock.cohesion.count, 2);

    a.reset_flocking();
    a.add_for_flocking(&mut b);
    assert_eq!(a.flock.cohesion.count, 1);
}

#[test]
fn move_toward_origin_removes_a_quarter_each_call() {
    let config = ParticleConfig::default();
    let mut p = particle(&config, pt2(0.0, 0.0), Vec2::ZERO, 4.0, 10.0);
    p.position = pt2(64.0, -128.0);

    let mut remaining = p.position.distance(p.initial_position);
    for _ in 0..20 {
        p.move_toward_origin(0.25);
        let next = p.position.distance(p.initial_position);
        assert!((next - remaining * 0.75).abs() < 1e-3);
        assert!(next > 0.0);
        remaining = next;
    }
}

#[test]
fn dead_particle_is_frozen() {
    let config = config_with(Behavior {
        bounces: true,
        size_age: true,
        opacity_age: true,
        color_age: true,
        ..Behavior::default()
    });
    let mut p = particle(&config, pt2(400.0, 300.0), vec2(5.0, 5.0), 6.0, 1.0);
    p.update_with(2.0, &mut no_flicker());
    assert!(!p.is_alive());

    let frozen = p.clone();
    p.update_with(0.5, &mut no_flicker());
    assert_eq!(p, frozen);
}

proptest! {
    #[test]
    fn speed_never_exceeds_max(vx in -1.0e4f32..1.0e4, vy in -1.0e4f32..1.0e4, dt in 0.001f32..0.5) {
        let config = ParticleConfig::default();
        let mut p = particle(&config, pt2(400.0, 300.0), vec2(vx, vy), 4.0, 100.0);
        p.update_with(dt, &mut no_flicker());
        prop_assert!(p.velocity.length() <= config.max_speed * (1.0 + 1e-5));
    }

    #[test]
    fn mortal_particles_die_and_stay_dead(lifetime in 0.05f32..20.0, dt in 0.01f32..1.0) {
        let config = ParticleConfig::default();
        let mut p = particle(&config, pt2(400.0, 300.0), Vec2::ZERO, 4.0, lifetime);
        let max_steps = (lifetime / dt).ceil() as usize + 2;

        let mut steps = 0;
        while p.is_alive() && steps < max_steps {
            p.update_with(dt, &mut no_flicker());
            steps += 1;
        }
        prop_assert!(!p.is_alive());
        prop_assert!(p.age() >= lifetime);

        for _ in 0..5 {
            p.update_with(dt, &mut no_flicker());
            prop_assert!(!p.is_alive());
        }
    }

    #[test]
    fn aging_keeps_radius_and_opacity_in_range(lifetime in 0.1f32..10.0, dt in 0.01f32..5.0) {
        let config = config_with(Behavior {
            size_age: true,
            opacity_age: true,
            flickers_age: true,
            ..Behavior::default()
        });
        let mut p = particle(&config, pt2(400.0, 300.0), Vec2::ZERO, 8.0, lifetime);
        let mut rng = StepRng::new(u64::MAX, 0);
        for _ in 0..20 {
            p.update_with(dt, &mut rng);
            prop_assert!(p.radius >= 0.0 && p.radius <= 8.0);
            prop_assert!(p.opacity >= 0.0 && p.opacity <= 255.0);
        }
    }
}
