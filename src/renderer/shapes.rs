//! Pixel-grid shape generation for 2D primitives
//!
//! Shapes are in screen pixels (y down). Positions snap down to the retro
//! grid and sizes round up, so everything lines up on the same grid.

use glam::Vec2;

use super::vertex::Vertex;
use crate::settings::Rgba;

/// A drawable primitive in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        color: Rgba,
    },
    /// Vertical gradient filling a rectangle
    Gradient {
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        top: Rgba,
        bottom: Rgba,
    },
    Triangle {
        points: [Vec2; 3],
        color: Rgba,
    },
    /// Convex quad, corners in winding order
    Quad {
        corners: [Vec2; 4],
        color: Rgba,
    },
}

/// Snap a coordinate down to the grid
#[inline]
pub fn snap(v: f32, grid: f32) -> f32 {
    (v / grid).floor() * grid
}

/// Round a size up to whole grid cells
#[inline]
pub fn snap_size(v: f32, grid: f32) -> f32 {
    (v / grid).ceil() * grid
}

/// Grid-aligned filled rectangle
pub fn pixel_rect(x: f32, y: f32, w: f32, h: f32, grid: f32, color: Rgba) -> Shape {
    Shape::Rect {
        x: snap(x, grid),
        y: snap(y, grid),
        w: snap_size(w, grid),
        h: snap_size(h, grid),
        color,
    }
}

/// Filled circle built from grid cells
pub fn pixel_circle(center: Vec2, radius: f32, grid: f32, color: Rgba, out: &mut Vec<Shape>) {
    let cells = (radius / grid).ceil() as i32;
    let pixel_radius = cells as f32 * grid;

    for i in -cells..=cells {
        for j in -cells..=cells {
            let px = i as f32 * grid;
            let py = j as f32 * grid;
            if px * px + py * py <= pixel_radius * pixel_radius {
                out.push(Shape::Rect {
                    x: snap(center.x + px, grid),
                    y: snap(center.y + py, grid),
                    w: grid,
                    h: grid,
                    color,
                });
            }
        }
    }
}

/// Triangle with grid-snapped corners
pub fn pixel_triangle(a: Vec2, b: Vec2, c: Vec2, grid: f32, color: Rgba) -> Shape {
    let s = |p: Vec2| Vec2::new(snap(p.x, grid), snap(p.y, grid));
    Shape::Triangle {
        points: [s(a), s(b), s(c)],
        color,
    }
}

/// Bar of `thickness` growing from `base`, rotated clockwise from straight up
pub fn rotated_bar(base: Vec2, length: f32, thickness: f32, degrees: f32, color: Rgba) -> Shape {
    let angle = degrees.to_radians();
    // Screen y grows downward, so "up" is -y
    let dir = Vec2::new(angle.sin(), -angle.cos());
    let side = Vec2::new(-dir.y, dir.x) * (thickness / 2.0);
    let tip = base + dir * length;

    Shape::Quad {
        corners: [base - side, base + side, tip + side, tip - side],
        color,
    }
}

/// Number of vertices a shape tessellates into
pub fn vertex_count(shape: &Shape) -> usize {
    match shape {
        Shape::Triangle { .. } => 3,
        _ => 6,
    }
}

/// Convert shapes into a triangle list
pub fn tessellate(shapes: &[Shape]) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(shapes.iter().map(vertex_count).sum());

    for shape in shapes {
        match *shape {
            Shape::Rect { x, y, w, h, color } => {
                quad(
                    &mut vertices,
                    [
                        Vec2::new(x, y),
                        Vec2::new(x + w, y),
                        Vec2::new(x + w, y + h),
                        Vec2::new(x, y + h),
                    ],
                    [color; 4],
                );
            }
            Shape::Gradient {
                x,
                y,
                w,
                h,
                top,
                bottom,
            } => {
                quad(
                    &mut vertices,
                    [
                        Vec2::new(x, y),
                        Vec2::new(x + w, y),
                        Vec2::new(x + w, y + h),
                        Vec2::new(x, y + h),
                    ],
                    [top, top, bottom, bottom],
                );
            }
            Shape::Triangle { points, color } => {
                for p in points {
                    vertices.push(Vertex::new(p.x, p.y, color));
                }
            }
            Shape::Quad { corners, color } => quad(&mut vertices, corners, [color; 4]),
        }
    }

    vertices
}

/// Two triangles for a convex quad
fn quad(vertices: &mut Vec<Vertex>, c: [Vec2; 4], colors: [Rgba; 4]) {
    let v = |i: usize| Vertex::new(c[i].x, c[i].y, colors[i]);
    vertices.extend_from_slice(&[v(0), v(1), v(2), v(2), v(3), v(0)]);
}
