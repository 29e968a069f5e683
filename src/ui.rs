/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for every simulation tunable.
 * Change detection is handled by comparing SimulationParams snapshots in the
 * app module.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::neighbors::NeighborStrategy;
use crate::params::SimulationParams;

// Update the UI and return whether the boids should be scattered again
pub fn update_ui(egui: &mut Egui, params: &mut SimulationParams, debug_info: &DebugInfo) -> bool {
    let mut should_reset_boids = false;

    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, SimulationParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    should_reset_boids = true;
                }

                ui.add(egui::Slider::new(&mut params.speed, SimulationParams::get_speed_range()).text("Speed"));
                ui.add(egui::Slider::new(&mut params.lerp_rate, SimulationParams::get_lerp_rate_range()).text("Turn Rate"));
            });

            ui.collapsing("Neighbor Search", |ui| {
                strategy_controls(ui, &mut params.strategy);
                if params.strategy.uses_index() {
                    ui.add(egui::Slider::new(&mut params.leaf_capacity, SimulationParams::get_leaf_capacity_range()).text("Leaf Capacity"));
                }
            });

            ui.collapsing("Performance", |ui| {
                ui.checkbox(&mut params.enable_parallel, "Enable Parallel Processing");

                ui.separator();

                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Step time: {:.2} ms", debug_info.step_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tree depth: {}", debug_info.last_step.tree_depth));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.show_quadtree, "Show Quadtree");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    should_reset_boids
}

fn strategy_controls(ui: &mut egui::Ui, strategy: &mut NeighborStrategy) {
    let radius_mode = strategy.uses_index();
    if ui.radio(radius_mode, "Radius (quadtree)").clicked() && !radius_mode {
        *strategy = NeighborStrategy::default();
    }
    if ui.radio(!radius_mode, "K nearest (heap)").clicked() && radius_mode {
        *strategy = NeighborStrategy::KNearest { local_k: 7, close_k: 3 };
    }

    match strategy {
        NeighborStrategy::Radius { local_radius, close_radius } => {
            ui.add(egui::Slider::new(local_radius, SimulationParams::get_radius_range()).text("Local Radius"));
            ui.add(egui::Slider::new(close_radius, SimulationParams::get_radius_range()).text("Close Radius"));
        }
        NeighborStrategy::KNearest { local_k, close_k } => {
            ui.add(egui::Slider::new(local_k, SimulationParams::get_neighbor_count_range()).text("Local K"));
            ui.add(egui::Slider::new(close_k, SimulationParams::get_neighbor_count_range()).text("Close K"));
        }
    }
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, lines: &[String], window_rect: nannou::geom::Rect) {
    // Create a background panel in the top-left corner
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 220.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.left() + panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.left() + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);

        // Position the text with a fixed offset from the left edge
        draw.text(text)
            .x_y(text_x + 80.0, y)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
