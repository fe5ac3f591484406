/*
 * Application Module
 *
 * This module defines the playground application model: a window, a swarm
 * of particles, the egui control panel and the per-frame update. Rendering
 * commands are recorded during update because drawing a trail advances the
 * particle's previous position.
 */

use std::path::PathBuf;

use clap::Parser;
use nannou::prelude::*;
use nannou_egui::Egui;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::debug::DebugInfo;
use crate::field::PerlinField;
use crate::input;
use crate::params::{SimulationParams, Viewport};
use crate::physics::{Pointer, PointerMode, Swarm};
use crate::renderer;
use crate::ui;

/// Longest step fed to the integrator, so a stalled frame cannot tunnel
/// particles through the viewport edges.
const MAX_STEP: f32 = 1.0 / 20.0;

#[derive(Debug, Parser)]
#[command(name = "particles", about = "Interactive particle and flocking playground")]
pub struct Args {
    /// JSON file with simulation parameters
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Number of particles, overriding the config
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed for particle spawning and flicker
    #[arg(long)]
    pub seed: Option<u64>,
}

// Main model for the application
pub struct Model {
    pub swarm: Swarm,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub field: PerlinField,
    pub rng: StdRng,
    pub draw: Draw,
    pub mouse_position: Vec2,
    pub pointer_mode: Option<PointerMode>,
}

impl Model {
    pub fn pointer(&self) -> Option<Pointer> {
        self.pointer_mode.map(|mode| Pointer {
            position: self.mouse_position,
            mode,
        })
    }
}

// Load parameters from the command line, falling back to defaults on error
fn load_params(args: &Args) -> SimulationParams {
    let mut params = match &args.config {
        Some(path) => SimulationParams::load(path).unwrap_or_else(|err| {
            log::error!("{}, using default parameters", err);
            SimulationParams::default()
        }),
        None => SimulationParams::default(),
    };
    if let Some(count) = args.count {
        params.num_particles = count;
    }
    params
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let args = Args::parse();
    let params = load_params(&args);

    // Calculate window size based on monitor size (80% of monitor size)
    let (window_width, window_height) = app
        .primary_monitor()
        .map(|monitor| {
            let size = monitor.size();
            (size.width as f32 * 0.8, size.height as f32 * 0.8)
        })
        .unwrap_or((1024.0, 768.0));

    let window_id = app
        .new_window()
        .title("Particle Playground")
        .size(window_width as u32, window_height as u32)
        .view(renderer::view)
        .resized(resized)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
        .expect("failed to create the playground window");

    let window = app.window(window_id).expect("window was just created");
    let egui = Egui::from_window(&window);

    let (width, height) = window.inner_size_points();
    let viewport = Viewport::new(width, height);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut swarm = Swarm::new(viewport);
    swarm.reset(&params, &mut rng);
    log::info!("playground started at {:.0}x{:.0}", width, height);

    Model {
        swarm,
        params,
        egui,
        debug_info: DebugInfo::default(),
        field: PerlinField::new(),
        rng,
        draw: Draw::new(),
        mouse_position: Vec2::ZERO,
        pointer_mode: None,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    let changes = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if changes.reset_requested {
        model.swarm.reset(&model.params, &mut model.rng);
    } else if changes.num_particles_changed {
        model.swarm.resize(&model.params, &mut model.rng);
    }
    if changes.particle_config_changed {
        model.swarm.configure(&model.params);
    }

    if !model.params.pause_simulation {
        let dt = update.since_last.as_secs_f32().min(MAX_STEP);
        let pointer = model.pointer();
        let stats = model
            .swarm
            .step(&model.params, &model.field, pointer, app.time, dt, &mut model.rng);
        model.debug_info.record_step(stats);
    }

    renderer::record_frame(app, model);
}

// The viewport follows the window only through this explicit call
pub fn resized(_app: &App, model: &mut Model, size: Vec2) {
    model.swarm.set_viewport(Viewport::new(size.x, size.y));
}
