/*
 * Renderer Module
 *
 * This module handles the rendering of the boid simulation.
 * It draws the boids, an optional quadtree overlay and debug information.
 *
 * World coordinates have their origin in the top-left corner with y growing
 * downward; nannou's origin is the window centre with y growing upward, so
 * every position goes through world_to_screen before drawing.
 */

use nannou::prelude::*;
use tracing::error;

use crate::app::Model;
use crate::boid::Boid;
use crate::geometry::{BoundingBox, Point};
use crate::neighbors::NeighborStrategy;
use crate::ui;
use crate::BOID_SIZE;

// Map a world position onto the window, stretching the world to fill it
pub fn world_to_screen(point: Point, world: &BoundingBox, window_rect: Rect) -> Vec2 {
    let sx = window_rect.w() / world.width();
    let sy = window_rect.h() / world.height();
    vec2(
        window_rect.left() + (point.x - world.left) * sx,
        window_rect.top() - (point.y - world.top) * sy,
    )
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let world = model.world.bounds();

    if model.params.show_quadtree {
        draw_quadtree(&draw, model, &world, window_rect);
    }

    for boid in model.world.boids() {
        draw_boid(&draw, boid, world_to_screen(boid.position, &world, window_rect));
    }

    if model.params.show_debug {
        if let Some(first) = model.world.boids().first() {
            draw_neighborhood(&draw, first, model, &world, window_rect);
        }
        let lines = model.debug_info.lines(
            model.world.boids().len(),
            world.width(),
            world.height(),
        );
        ui::draw_debug_info(&draw, &lines, window_rect);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        error!(?err, "Failed to draw frame");
    }

    // Draw the egui UI
    if let Err(err) = model.egui.draw_to_frame(&frame) {
        error!(?err, "Failed to draw UI");
    }
}

// A triangle pointing along the boid's heading
fn draw_boid(draw: &Draw, boid: &Boid, screen_pos: Vec2) {
    let points = [
        pt2(0.0, BOID_SIZE),
        pt2(-BOID_SIZE / 2.0, -BOID_SIZE / 2.0),
        pt2(BOID_SIZE / 2.0, -BOID_SIZE / 2.0),
    ];

    // Headings turn clockwise on screen, nannou rotates counter-clockwise
    draw.polygon()
        .color(rgb(0.86, 0.86, 0.86))
        .points(points)
        .xy(screen_pos)
        .rotate(-boid.heading);
}

// Outline of every quadtree node built from the current positions
fn draw_quadtree(draw: &Draw, model: &Model, world: &BoundingBox, window_rect: Rect) {
    let index = match model.world.build_index() {
        Ok((index, _)) => index,
        Err(err) => {
            error!(%err, "Failed to build quadtree overlay");
            return;
        }
    };

    for node in index.node_boundaries() {
        let a = world_to_screen(Point::new(node.left, node.top), world, window_rect);
        let b = world_to_screen(Point::new(node.right, node.bottom), world, window_rect);
        let rect = Rect::from_corners(a, b);

        draw.rect()
            .xy(rect.xy())
            .wh(rect.wh())
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgba(0.3, 0.3, 0.3, 1.0));
    }
}

// Neighbor radii and heading for one boid
fn draw_neighborhood(draw: &Draw, boid: &Boid, model: &Model, world: &BoundingBox, window_rect: Rect) {
    let center = world_to_screen(boid.position, world, window_rect);
    let scale = window_rect.w() / world.width();

    if let NeighborStrategy::Radius { local_radius, close_radius } = model.params.strategy {
        // Local radius
        draw.ellipse()
            .xy(center)
            .radius(local_radius * scale)
            .no_fill()
            .stroke(GREEN)
            .stroke_weight(1.0);

        // Close radius
        draw.ellipse()
            .xy(center)
            .radius(close_radius * scale)
            .no_fill()
            .stroke(RED)
            .stroke_weight(1.0);
    }

    // Heading vector
    let direction = vec2(boid.heading.sin(), boid.heading.cos());
    draw.arrow()
        .start(center)
        .end(center + direction * BOID_SIZE * 4.0)
        .color(YELLOW)
        .stroke_weight(2.0);
}
