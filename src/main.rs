/*
 * Particle Playground
 *
 * A window full of particles that age, bounce, flock and drift on a noise
 * field. The control panel toggles each behavior live; the mouse attracts
 * (left button) or repels (right button) nearby particles.
 *
 * Set RUST_LOG=debug to see particle lifecycle events.
 */

use particles::app;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    nannou::app(app::model).update(app::update).run();
}
