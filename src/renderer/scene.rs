//! Scene composition
//!
//! Turns a read-only view of the game state into grid-snapped shapes, back to
//! front: sky, parallax hills, trees, platforms, hero, sticks, scanlines.
//! The play area is a fixed-size canvas centered in the viewport and shifted
//! left by the scene offset.

use glam::Vec2;

use super::shapes::{Shape, pixel_circle, pixel_rect, pixel_triangle, rotated_bar, snap};
use crate::consts::*;
use crate::settings::{Palette, Rgba};
use crate::sim::GameState;
use crate::sin_deg;

const SCANLINE_COLOR: Rgba = [0.0, 0.0, 0.0, 0.1];
const TREE_TRUNK_HEIGHT: f32 = 5.0;
const TREE_CROWN_HEIGHT: f32 = 25.0;
const HERO_LEG_DISTANCE: f32 = 5.0;

/// Drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Vertical space below the centered canvas
    fn margin_y(&self) -> f32 {
        (self.height - CANVAS_HEIGHT) / 2.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(CANVAS_WIDTH, CANVAS_HEIGHT)
    }
}

/// Everything the scene needs besides the game state
#[derive(Debug, Clone, Copy)]
pub struct SceneStyle<'a> {
    pub palette: &'a Palette,
    /// Pixel grid size
    pub grid: f32,
    pub scanlines: bool,
}

/// Build the shape list for one frame
pub fn build_scene(state: &GameState, viewport: Viewport, style: SceneStyle<'_>) -> Vec<Shape> {
    let mut shapes = Vec::with_capacity(1024);
    let grid = style.grid;
    let palette = style.palette;

    shapes.push(Shape::Gradient {
        x: 0.0,
        y: 0.0,
        w: viewport.width,
        h: viewport.height,
        top: palette.sky[0],
        bottom: palette.sky[1],
    });

    let hills = [
        (HILL1_BASE_HEIGHT, HILL1_AMPLITUDE, HILL1_STRETCH),
        (HILL2_BASE_HEIGHT, HILL2_AMPLITUDE, HILL2_STRETCH),
    ];
    for ((base, amplitude, stretch), color) in hills.into_iter().zip(palette.hills) {
        draw_hill(
            &mut shapes,
            state.scene_offset,
            viewport,
            grid,
            (base, amplitude, stretch),
            color,
        );
    }

    draw_trees(&mut shapes, state, viewport, grid, palette);

    // Play area origin in screen space
    let origin = Vec2::new(
        (viewport.width - CANVAS_WIDTH) / 2.0 - state.scene_offset,
        (viewport.height - CANVAS_HEIGHT) / 2.0,
    );
    let ground_y = origin.y + CANVAS_HEIGHT - PLATFORM_HEIGHT;

    draw_platforms(&mut shapes, state, viewport, origin.x, ground_y, grid, palette);
    draw_hero(&mut shapes, state, origin.x, ground_y, grid, palette);

    for stick in &state.sticks {
        shapes.push(rotated_bar(
            Vec2::new(origin.x + stick.x, ground_y),
            stick.length,
            grid * 2.0,
            stick.rotation,
            palette.stick,
        ));
    }

    if style.scanlines {
        let mut y = 0.0;
        while y < viewport.height {
            shapes.push(Shape::Rect {
                x: 0.0,
                y,
                w: viewport.width,
                h: 1.0,
                color: SCANLINE_COLOR,
            });
            y += 2.0;
        }
    }

    shapes
}

/// Hill surface height at a screen column
fn hill_y(
    screen_x: f32,
    scene_offset: f32,
    viewport: Viewport,
    (base, amplitude, stretch): (f32, f32, f32),
) -> f32 {
    let sine_base_y = viewport.height - base;
    let phase = (scene_offset * BACKGROUND_SPEED_MULTIPLIER + screen_x) * stretch;
    sin_deg(phase) * amplitude + sine_base_y
}

/// Stepped sine hill filled down to the bottom of the viewport
fn draw_hill(
    shapes: &mut Vec<Shape>,
    scene_offset: f32,
    viewport: Viewport,
    grid: f32,
    hill: (f32, f32, f32),
    color: Rgba,
) {
    let columns = (viewport.width / grid).ceil() as u32;
    for column in 0..columns {
        let x = column as f32 * grid;
        let y = snap(hill_y(x, scene_offset, viewport, hill), grid);
        shapes.push(Shape::Rect {
            x,
            y,
            w: grid,
            h: viewport.height - y,
            color,
        });
    }
}

fn draw_trees(
    shapes: &mut Vec<Shape>,
    state: &GameState,
    viewport: Viewport,
    grid: f32,
    palette: &Palette,
) {
    let trunk_width = 2.0 * grid;
    let crown_width = 10.0 * grid;

    for tree in &state.trees {
        let x = (tree.x - state.scene_offset * BACKGROUND_SPEED_MULTIPLIER) * HILL1_STRETCH;
        if x < -crown_width || x > viewport.width + crown_width {
            continue;
        }
        let y = sin_deg(tree.x) * HILL1_AMPLITUDE + viewport.height - HILL1_BASE_HEIGHT;

        shapes.push(pixel_rect(
            x - trunk_width / 2.0,
            y - TREE_TRUNK_HEIGHT,
            trunk_width,
            TREE_TRUNK_HEIGHT,
            grid,
            palette.tree_trunk,
        ));
        shapes.push(pixel_triangle(
            Vec2::new(x - crown_width / 2.0, y - TREE_TRUNK_HEIGHT),
            Vec2::new(x, y - TREE_TRUNK_HEIGHT - TREE_CROWN_HEIGHT),
            Vec2::new(x + crown_width / 2.0, y - TREE_TRUNK_HEIGHT),
            grid,
            palette.trees[tree.shade.index()],
        ));
    }
}

fn draw_platforms(
    shapes: &mut Vec<Shape>,
    state: &GameState,
    viewport: Viewport,
    origin_x: f32,
    ground_y: f32,
    grid: f32,
    palette: &Palette,
) {
    let stick_base = state.active_stick().x;

    for platform in &state.platforms {
        let x = origin_x + platform.x;
        if x + platform.width < 0.0 || x > viewport.width {
            continue;
        }
        shapes.push(pixel_rect(
            x,
            ground_y,
            platform.width,
            PLATFORM_HEIGHT + viewport.margin_y(),
            grid,
            palette.platform,
        ));

        // Only platforms the hero has not reached yet show their target
        if stick_base < platform.x {
            shapes.push(pixel_rect(
                origin_x + platform.center() - PERFECT_AREA_SIZE / 2.0,
                ground_y,
                PERFECT_AREA_SIZE,
                PERFECT_AREA_SIZE,
                grid,
                palette.perfect_zone,
            ));
        }
    }
}

fn draw_hero(
    shapes: &mut Vec<Shape>,
    state: &GameState,
    origin_x: f32,
    ground_y: f32,
    grid: f32,
    palette: &Palette,
) {
    // Sprite center; the hero's x is its right side, y its drop below ground
    let c = Vec2::new(
        origin_x + state.hero.x - HERO_WIDTH / 2.0,
        ground_y + state.hero.y - HERO_HEIGHT / 2.0,
    );
    let at = |dx: f32, dy: f32| c + Vec2::new(dx, dy);
    let half_w = HERO_WIDTH / 2.0;
    let half_h = HERO_HEIGHT / 2.0;

    let outline = at(-half_w - 1.0, -half_h - 1.0);
    shapes.push(pixel_rect(
        outline.x,
        outline.y,
        HERO_WIDTH + 2.0,
        HERO_HEIGHT - 2.0,
        grid,
        palette.hero_outline,
    ));
    let body = at(-half_w, -half_h);
    shapes.push(pixel_rect(
        body.x,
        body.y,
        HERO_WIDTH,
        HERO_HEIGHT - 4.0,
        grid,
        palette.hero_body,
    ));

    for leg_x in [HERO_LEG_DISTANCE, -HERO_LEG_DISTANCE] {
        pixel_circle(at(leg_x, 11.5), 4.0, grid, palette.hero_outline, shapes);
        pixel_circle(at(leg_x, 11.5), 3.0, grid, palette.hero_body, shapes);
    }

    pixel_circle(at(5.0, -7.0), 4.0, grid, palette.hero_outline, shapes);
    pixel_circle(at(5.0, -7.0), 3.0, grid, palette.hero_eye, shapes);

    let band = at(-half_w - 1.0, -12.0);
    let band_color = palette.hero_band;
    shapes.push(pixel_rect(band.x, band.y, HERO_WIDTH + 2.0, 4.5, grid, band_color));
    // Headband tails
    shapes.push(pixel_triangle(
        at(-9.0, -14.5),
        at(-17.0, -18.5),
        at(-14.0, -8.5),
        grid,
        band_color,
    ));
    shapes.push(pixel_triangle(
        at(-10.0, -10.5),
        at(-15.0, -3.5),
        at(-5.0, -7.0),
        grid,
        band_color,
    ));
}
