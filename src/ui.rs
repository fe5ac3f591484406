/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for particle behavior, flocking
 * rules and field forces. Parameter change detection is handled by the
 * SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::{FlockRuleParams, SimulationParams};

/// What the UI asked for this frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiChanges {
    pub reset_requested: bool,
    pub num_particles_changed: bool,
    pub particle_config_changed: bool,
}

pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> UiChanges {
    let mut reset_requested = false;

    // Take a snapshot of current parameter values for change detection
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Particle Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Particles", |ui| {
                ui.add(
                    egui::Slider::new(&mut params.num_particles, SimulationParams::get_num_particles_range())
                        .text("Number of Particles"),
                );
                if ui.button("Reset Particles").clicked() {
                    reset_requested = true;
                }
                ui.add(
                    egui::Slider::new(&mut params.particle.max_speed, SimulationParams::get_max_speed_range())
                        .text("Max Speed"),
                );
                ui.add(
                    egui::Slider::new(&mut params.particle.friction, SimulationParams::get_friction_range())
                        .text("Friction"),
                );
                ui.checkbox(&mut params.respawn_dead, "Respawn Dead Particles");
            });

            ui.collapsing("Behavior", |ui| {
                let behavior = &mut params.particle.behavior;
                ui.checkbox(&mut behavior.bounces, "Bounce Off Edges");
                ui.checkbox(&mut behavior.size_age, "Shrink With Age");
                ui.checkbox(&mut behavior.opacity_age, "Fade With Age");
                ui.checkbox(&mut behavior.color_age, "Shift Color With Age");
                ui.checkbox(&mut behavior.flickers_age, "Flicker Before Death");
                ui.checkbox(&mut behavior.hollow, "Outline Only");
                ui.checkbox(&mut behavior.draw_line, "Draw Trails");
                ui.checkbox(&mut behavior.immortal, "Immortal");
            });

            ui.collapsing("Flocking", |ui| {
                ui.checkbox(&mut params.enable_flocking, "Enable Flocking");
                rule_sliders(ui, "Separation", &mut params.particle.flocking.separation);
                rule_sliders(ui, "Cohesion", &mut params.particle.flocking.cohesion);
                rule_sliders(ui, "Alignment", &mut params.particle.flocking.alignment);
            });

            ui.collapsing("Forces", |ui| {
                ui.checkbox(&mut params.enable_collisions, "Contact Repulsion");
                ui.add(
                    egui::Slider::new(&mut params.collision_strength, SimulationParams::get_strength_range())
                        .text("Contact Strength"),
                );
                ui.add(
                    egui::Slider::new(&mut params.turbulence, SimulationParams::get_turbulence_range())
                        .text("Turbulence"),
                );
                ui.add(egui::Slider::new(&mut params.noise_angle, 0.0..=std::f32::consts::TAU * 2.0).text("Noise Angle"));
                ui.add(
                    egui::Slider::new(&mut params.pointer_strength, SimulationParams::get_strength_range())
                        .text("Pointer Strength"),
                );
                ui.label("Left drag attracts, right drag repels");
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Alive Particles: {}", debug_info.alive_particles));
                ui.label(format!("Pairs Visited: {}", debug_info.pairs_visited));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    let (num_particles_changed, particle_config_changed) = params.detect_changes();

    UiChanges {
        reset_requested,
        num_particles_changed,
        particle_config_changed,
    }
}

fn rule_sliders(ui: &mut egui::Ui, name: &str, rule: &mut FlockRuleParams) {
    ui.add(egui::Slider::new(&mut rule.radius, SimulationParams::get_radius_range()).text(format!("{} Radius", name)));
    ui.add(
        egui::Slider::new(&mut rule.strength, SimulationParams::get_strength_range())
            .text(format!("{} Strength", name)),
    );
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, total: usize) {
    // Create a background panel in the top-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;
    let panel_height = line_height * 5.0 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0),
        format!("Particles: {} / {}", debug_info.alive_particles, total),
        format!("Pairs: {}", debug_info.pairs_visited),
        format!("Respawned: {}", debug_info.respawned_total),
    ];

    for (i, text) in debug_texts.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 70.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
