/*
 * Renderer Module
 *
 * This module records the playground's draw commands and presents them.
 * Recording happens once per update because trail drawing mutates
 * particles; the view only flushes the recorded commands and the UI.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::render::{to_screen, ScreenDraw};
use crate::ui;

// Record particles and overlays into the model's draw
pub fn record_frame(app: &App, model: &mut Model) {
    let window_rect = app.window_rect();

    model.draw.reset();
    model.draw.background().color(BLACK);

    {
        let mut surface = ScreenDraw::new(&model.draw, window_rect);
        model.swarm.draw(&mut surface);
    }

    if model.params.show_debug {
        // Pointer reach
        if model.pointer_mode.is_some() {
            model
                .draw
                .ellipse()
                .xy(to_screen(window_rect, model.mouse_position))
                .radius(model.params.pointer_radius)
                .no_fill()
                .stroke(YELLOW)
                .stroke_weight(1.0);
        }

        // Flocking radii of the first live particle
        if let Some(first) = model.swarm.particles.iter().find(|p| p.is_alive()) {
            let center = to_screen(window_rect, first.position);
            let rings = [
                (first.flock.separation.dist_sqrd.sqrt(), RED),
                (first.flock.alignment.dist_sqrd.sqrt(), GREEN),
                (first.flock.cohesion.dist_sqrd.sqrt(), BLUE),
            ];
            for (radius, color) in rings {
                model
                    .draw
                    .ellipse()
                    .xy(center)
                    .radius(radius)
                    .no_fill()
                    .stroke(color)
                    .stroke_weight(1.0);
            }
        }

        ui::draw_debug_info(&model.draw, &model.debug_info, window_rect, model.swarm.particles.len());
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    if let Err(err) = model.draw.to_frame(app, &frame) {
        log::error!("failed to render particles: {:?}", err);
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::error!("failed to render controls: {:?}", err);
    }
}
