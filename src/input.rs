/*
 * Input Module
 *
 * This module handles user input events for the particle playground.
 *
 * Features:
 * - Left drag attracts particles toward the pointer
 * - Right drag repels them
 * - Space pauses, R resets
 * - Events over the egui panel are left to the UI
 */

use nannou::event::Key;
use nannou::prelude::*;
use nannou::winit::event::{MouseButton, WindowEvent};

use crate::app::Model;
use crate::physics::PointerMode;
use crate::render::from_screen;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = from_screen(app.window_rect(), pos);
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    // Check if the click is on the UI before handling it
    if model.egui.ctx().is_pointer_over_area() {
        return;
    }

    model.pointer_mode = match button {
        MouseButton::Left => Some(PointerMode::Attract),
        MouseButton::Right => Some(PointerMode::Repel),
        _ => model.pointer_mode,
    };
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if matches!(button, MouseButton::Left | MouseButton::Right) {
        model.pointer_mode = None;
    }
}

pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        Key::Space => {
            model.params.pause_simulation = !model.params.pause_simulation;
        }
        Key::R => {
            model.swarm.reset(&model.params, &mut model.rng);
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
