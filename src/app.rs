/*
 * Application Module
 *
 * This module defines the nannou application model for the boid simulation.
 * It wires the window, the egui controls and the renderer to the World:
 * - one world step per frame unless paused
 * - window resizes become world resizes, applied on the next step
 * - UI parameter changes are validated by the world before they take effect
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::{debug, error, warn};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::ui;
use crate::world::World;

// nannou model functions cannot capture, so startup parameters go through here
static INITIAL_PARAMS: OnceLock<SimulationParams> = OnceLock::new();

// Main model for the application
pub struct Model {
    pub world: World,
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
}

// Run the simulation window with validated parameters
pub fn run(params: SimulationParams) {
    if INITIAL_PARAMS.set(params).is_err() {
        warn!("Simulation parameters were already set; keeping the first ones");
    }
    nannou::app(model).update(update).run();
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = INITIAL_PARAMS.get().cloned().unwrap_or_default();

    // The window starts at the configured world size; resizes follow the window
    let window_id = app
        .new_window()
        .title("Quadtree Boids")
        .size(params.world_width as u32, params.world_height as u32)
        .view(view)
        .resized(resized)
        .raw_event(raw_window_event)
        .build()
        .expect("Failed to create window");

    let window = app.window(window_id).expect("Window was just created");
    let egui = Egui::from_window(&window);

    let world = World::new(params.clone()).expect("Simulation parameters are validated before startup");

    Model {
        world,
        params,
        egui,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let previous = model.params.clone();
    let should_reset_boids = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);
    let changes = model.params.changes_since(&previous);
    if changes.any() {
        debug!(?changes, "Parameters changed in the UI");
    }

    if changes.population || changes.simulation {
        if let Err(err) = model.world.set_params(model.params.clone()) {
            warn!(%err, "Rejected parameter change");
            model.params = previous;
        }
    }

    if should_reset_boids {
        model.world.reset();
    }

    if model.params.pause_simulation {
        return;
    }

    let started = Instant::now();
    match model.world.step() {
        Ok(stats) => model.debug_info.last_step = stats,
        Err(err) => error!(%err, "World step failed"),
    }
    model.debug_info.step_time = started.elapsed();
}

// Window resizes change the world for the next step
fn resized(_app: &App, model: &mut Model, size: Vec2) {
    // Minimised windows report a zero size
    if let Err(err) = model.world.resize(size.x, size.y) {
        warn!(%err, "Ignoring window resize");
        return;
    }
    model.params.world_width = size.x;
    model.params.world_height = size.y;
}

// Handle raw window events for egui
fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
